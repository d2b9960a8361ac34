//! Table workflows against an in-memory source.

mod common;

use std::cell::RefCell;
use std::rc::Rc;

use gallery_core::{
    ArtworkId, ArtworkTable, BulkSelect, PageRequest, TableEvent, TableMessage, runtime,
};

use common::{FakeSource, ids};

async fn started(source: &FakeSource) -> ArtworkTable {
    let mut table = ArtworkTable::default();
    let task = table.start();
    runtime::settle(&mut table, source, task).await;
    table
}

fn record_ids(table: &ArtworkTable) -> Vec<u64> {
    table.records().iter().map(|r| r.id.get()).collect()
}

fn alerts(table: &mut ArtworkTable) -> Rc<RefCell<Vec<String>>> {
    let alerts = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&alerts);
    table.subscribe(move |event| {
        if let TableEvent::Alert(text) = event {
            sink.borrow_mut().push(text.clone());
        }
    });
    alerts
}

#[tokio::test]
async fn initial_load_shows_first_page() {
    let source = FakeSource::new(100);
    let table = started(&source).await;

    assert_eq!(
        *source.page_requests.borrow(),
        vec![PageRequest { page: 1, limit: 10 }]
    );
    assert_eq!(record_ids(&table), (1..=10).collect::<Vec<_>>());
    let view = table.view();
    assert_eq!(view.total_records, 100);
    assert!(view.selection.is_empty());
    assert!(!view.loading);
}

#[tokio::test]
async fn selection_survives_navigation() {
    let source = FakeSource::new(100);
    let mut table = started(&source).await;

    runtime::dispatch(&mut table, &source, TableMessage::SelectionChanged(ids([1, 3]))).await;
    runtime::dispatch(&mut table, &source, TableMessage::NextPage).await;
    assert_eq!(record_ids(&table)[0], 11);
    assert!(table.view().selection.is_empty());

    runtime::dispatch(&mut table, &source, TableMessage::SelectionChanged(ids([12]))).await;
    runtime::dispatch(&mut table, &source, TableMessage::PreviousPage).await;

    assert_eq!(table.view().selection, ids([1, 3]));
    assert_eq!(table.view().selected_count, 3);
    assert!(table.ledger().contains(ArtworkId::new(12)));
}

#[tokio::test]
async fn deselecting_removes_only_that_record() {
    let source = FakeSource::new(100);
    let mut table = started(&source).await;

    runtime::dispatch(
        &mut table,
        &source,
        TableMessage::SelectionChanged(ids([1, 2, 3])),
    )
    .await;
    runtime::dispatch(&mut table, &source, TableMessage::SelectionChanged(ids([1, 3]))).await;

    let selected: Vec<u64> = table.ledger().iter().map(ArtworkId::get).collect();
    assert_eq!(selected, vec![1, 3]);
}

#[tokio::test]
async fn bulk_select_adds_first_n() {
    let source = FakeSource::new(100);
    let mut table = started(&source).await;

    table.update(TableMessage::BulkToggled);
    table.update(TableMessage::BulkInputChanged("15".to_string()));
    let task = table.update(TableMessage::BulkSubmitted);
    assert!(table.is_loading());
    runtime::settle(&mut table, &source, task).await;

    assert_eq!(*source.id_requests.borrow(), vec![15]);
    assert_eq!(table.view().selected_count, 15);
    assert_eq!(table.view().selection, ids(1..=10));
    assert_eq!(*table.bulk(), BulkSelect::Closed);
    assert!(!table.is_loading());
}

#[tokio::test]
async fn bulk_select_keeps_existing_members() {
    let source = FakeSource::new(100);
    let mut table = started(&source).await;
    runtime::dispatch(&mut table, &source, TableMessage::GoToPage(5)).await;
    runtime::dispatch(&mut table, &source, TableMessage::SelectionChanged(ids([55]))).await;

    table.update(TableMessage::BulkToggled);
    table.update(TableMessage::BulkInputChanged("3".to_string()));
    runtime::dispatch(&mut table, &source, TableMessage::BulkSubmitted).await;

    let selected: Vec<u64> = table.ledger().iter().map(ArtworkId::get).collect();
    assert_eq!(selected, vec![1, 2, 3, 55]);
}

#[tokio::test]
async fn invalid_bulk_input_issues_no_request() {
    let source = FakeSource::new(100);
    let mut table = started(&source).await;
    let alerts = alerts(&mut table);
    table.update(TableMessage::BulkToggled);

    for input in ["0", "-5", "abc"] {
        table.update(TableMessage::BulkInputChanged(input.to_string()));
        runtime::dispatch(&mut table, &source, TableMessage::BulkSubmitted).await;
        assert_eq!(table.bulk().input(), Some(input));
    }

    assert_eq!(source.id_request_count(), 0);
    assert!(table.ledger().is_empty());
    assert_eq!(alerts.borrow().len(), 3);
}

#[tokio::test]
async fn bulk_failure_alerts_and_closes() {
    let source = FakeSource::new(100).failing_ids();
    let mut table = started(&source).await;
    let alerts = alerts(&mut table);

    table.update(TableMessage::BulkToggled);
    table.update(TableMessage::BulkInputChanged("4".to_string()));
    runtime::dispatch(&mut table, &source, TableMessage::BulkSubmitted).await;

    assert_eq!(source.id_request_count(), 1);
    assert!(table.ledger().is_empty());
    assert_eq!(*table.bulk(), BulkSelect::Closed);
    assert!(!table.is_loading());
    assert_eq!(alerts.borrow().len(), 1);
}

#[tokio::test]
async fn failed_page_keeps_previous_records() {
    let source = FakeSource::new(100).failing_page(2);
    let mut table = started(&source).await;
    let alerts = alerts(&mut table);

    runtime::dispatch(&mut table, &source, TableMessage::NextPage).await;

    assert_eq!(source.page_request_count(), 2);
    assert_eq!(record_ids(&table), (1..=10).collect::<Vec<_>>());
    assert_eq!(table.total_records(), 100);
    assert_eq!(table.page_state().page(), 1);
    assert!(!table.is_loading());
    assert!(alerts.borrow().is_empty());
}

#[tokio::test]
async fn newest_request_wins_when_responses_cross() {
    let source = FakeSource::new(100);
    let mut table = ArtworkTable::default();
    let first = table.start();
    let second = table.update(TableMessage::GoToPage(3));

    let second_done = runtime::perform(&source, second).await.unwrap();
    let first_done = runtime::perform(&source, first).await.unwrap();
    let _ = table.update(second_done);
    let _ = table.update(first_done);

    assert_eq!(record_ids(&table)[0], 31);
    assert!(!table.is_loading());
}

#[tokio::test]
async fn rows_per_page_change_refetches_from_start() {
    let source = FakeSource::new(100);
    let mut table = started(&source).await;
    runtime::dispatch(&mut table, &source, TableMessage::GoToPage(2)).await;
    runtime::dispatch(&mut table, &source, TableMessage::RowsPerPageChanged(20)).await;

    assert_eq!(
        source.page_requests.borrow().last().copied(),
        Some(PageRequest { page: 1, limit: 20 })
    );
    assert_eq!(record_ids(&table).len(), 20);
}

#[tokio::test]
async fn last_page_is_partial() {
    let source = FakeSource::new(95);
    let mut table = started(&source).await;
    runtime::dispatch(&mut table, &source, TableMessage::LastPage).await;

    assert_eq!(table.page_state().first(), 90);
    assert_eq!(record_ids(&table), (91..=95).collect::<Vec<_>>());
}

#[tokio::test]
async fn go_to_page_past_the_end_lands_on_last_page() {
    let source = FakeSource::new(100);
    let mut table = started(&source).await;
    runtime::dispatch(&mut table, &source, TableMessage::GoToPage(5000)).await;

    assert_eq!(
        source.page_requests.borrow().last().copied(),
        Some(PageRequest { page: 10, limit: 10 })
    );
    assert_eq!(table.page_state().page(), 9);
    assert_eq!(record_ids(&table), (91..=100).collect::<Vec<_>>());
}
