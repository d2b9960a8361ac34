//! Executes [`Task`]s against an [`ArtworkSource`].
//!
//! Designed for a single-threaded loop: `perform` awaits one fetch and hands
//! back the completion message; `settle` keeps feeding completions into the
//! table until nothing is left to do.

use tracing::debug;

use crate::source::ArtworkSource;
use crate::table::{ArtworkTable, TableMessage, Task};

/// Runs one task and returns its completion message, if any.
pub async fn perform<S: ArtworkSource>(source: &S, task: Task) -> Option<TableMessage> {
    match task {
        Task::None => None,
        Task::FetchPage {
            generation,
            request,
        } => {
            debug!(generation, page = request.page, "Performing page fetch");
            let result = source.fetch_page(request).await;
            Some(TableMessage::PageLoaded { generation, result })
        }
        Task::FetchTopIds { count } => {
            debug!(count = count.get(), "Performing identifier fetch");
            let result = source.fetch_top_ids(count).await;
            Some(TableMessage::TopIdsLoaded(result))
        }
    }
}

/// Drives `task` and every follow-up task to completion.
pub async fn settle<S: ArtworkSource>(table: &mut ArtworkTable, source: &S, task: Task) {
    let mut next = task;
    while let Some(message) = perform(source, next).await {
        next = table.update(message);
    }
}

/// Sends `message` to the table and settles the resulting work.
pub async fn dispatch<S: ArtworkSource>(
    table: &mut ArtworkTable,
    source: &S,
    message: TableMessage,
) {
    let task = table.update(message);
    settle(table, source, task).await;
}
