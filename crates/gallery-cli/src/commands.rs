//! Command implementations.

use std::cell::RefCell;
use std::io::{self, Write};
use std::num::NonZeroUsize;
use std::rc::Rc;

use anyhow::{Context, Result};
use gallery_cli::render::{self, ColorMode};
use gallery_cli::repl::{self, HELP, ReplCommand};
use gallery_cli::settings::Settings;
use gallery_client::HttpArtworkSource;
use gallery_core::{ArtworkSource, ArtworkTable, PageState, TableEvent, TableMessage, runtime};
use tracing::{debug, info};

use crate::cli::PageArgs;

fn build_runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")
}

fn build_source(settings: &Settings) -> Result<HttpArtworkSource> {
    HttpArtworkSource::new(&settings.client)
        .with_context(|| format!("invalid collection endpoint {}", settings.client.base_url))
}

/// Interactive browse loop.
pub fn run_browse(settings: &Settings, color: ColorMode) -> Result<()> {
    let source = build_source(settings)?;
    let mut table = ArtworkTable::new(settings.initial_page_state());

    let alerts = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&alerts);
    table.subscribe(move |event| {
        if let TableEvent::Alert(message) = event {
            sink.borrow_mut().push(message.clone());
        }
    });

    let rt = build_runtime()?;
    info!(endpoint = %settings.client.base_url, "Starting browse session");
    let task = table.start();
    rt.block_on(runtime::settle(&mut table, &source, task));
    print_frame(&table, &alerts, color);

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut line = String::new();
    loop {
        write!(stdout, "> ")?;
        stdout.flush()?;
        line.clear();
        if stdin.read_line(&mut line).context("failed to read command")? == 0 {
            break;
        }
        let command = match repl::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                println!("{err}");
                continue;
            }
        };
        debug!(?command, "Parsed command");
        match command {
            ReplCommand::Quit => break,
            ReplCommand::Help => println!("{HELP}"),
            ReplCommand::Show => print_frame(&table, &alerts, color),
            command => {
                let message = command.to_message(&table.view());
                match message {
                    Ok(Some(message)) => {
                        rt.block_on(runtime::dispatch(&mut table, &source, message));
                        print_frame(&table, &alerts, color);
                    }
                    Ok(None) => {}
                    Err(err) => println!("{err}"),
                }
            }
        }
    }
    info!(selected = table.ledger().len(), "Browse session ended");
    Ok(())
}

/// Fetches and prints one page.
pub fn run_page(settings: &Settings, args: &PageArgs, color: ColorMode) -> Result<()> {
    let rows = args
        .rows
        .unwrap_or_else(|| settings.initial_page_state().rows());
    let page = usize::try_from(args.page - 1).context("page number out of range")?;
    let state = PageState::with_rows(rows)?.go_to(page);

    let source = build_source(settings)?;
    let mut table = ArtworkTable::new(state);
    let rt = build_runtime()?;
    let task = table.start();
    if let Some(TableMessage::PageLoaded { generation, result }) =
        rt.block_on(runtime::perform(&source, task))
    {
        let page = result.with_context(|| format!("failed to load page {}", args.page))?;
        table.update(TableMessage::PageLoaded {
            generation,
            result: Ok(page),
        });
    }

    let view = table.view();
    println!("{}", render::artwork_table(&view, color));
    println!("{}", render::status_line(&view));
    Ok(())
}

/// Fetches and prints the first `count` ids.
pub fn run_top_ids(settings: &Settings, count: NonZeroUsize, color: ColorMode) -> Result<()> {
    let source = build_source(settings)?;
    let rt = build_runtime()?;
    let ids = rt
        .block_on(source.fetch_top_ids(count))
        .with_context(|| format!("failed to fetch the first {count} ids"))?;
    println!("{}", render::id_table(&ids, color));
    if ids.len() < count.get() {
        println!("Collection holds only {} artworks.", ids.len());
    }
    Ok(())
}

fn print_frame(table: &ArtworkTable, alerts: &RefCell<Vec<String>>, color: ColorMode) {
    println!("{}", render::frame(&table.view(), color));
    for alert in alerts.borrow_mut().drain(..) {
        println!("! {alert}");
    }
}
