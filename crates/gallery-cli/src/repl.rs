//! Line commands for the interactive `browse` loop.

use gallery_core::{ArtworkId, TableMessage, TableView};
use thiserror::Error;

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Next,
    Prev,
    First,
    Last,
    /// One-based page number.
    Page(usize),
    Rows(usize),
    /// Replace the visible page's selection with exactly these ids.
    Select(Vec<ArtworkId>),
    Toggle(ArtworkId),
    Bulk,
    /// Raw text for the bulk input; validated on submit.
    Count(String),
    Submit,
    Show,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command '{0}' (type `help` for a list)")]
    Unknown(String),

    #[error("`{command}` expects {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },

    #[error("'{0}' is not a valid number")]
    InvalidNumber(String),

    #[error("page numbers start at 1")]
    PageZero,

    #[error("artwork {0} is not on this page")]
    NotOnPage(ArtworkId),
}

pub const HELP: &str = "\
Commands:
  next | prev | first | last   move between pages
  page N                       go to page N
  rows N                       rows per page (5, 10, 20, 50)
  select ID...                 set the selection on this page (empty clears it)
  toggle ID                    select or deselect one row on this page
  bulk                         open or close \"select first N rows\"
  count TEXT                   type into the bulk input
  submit                       submit the bulk input
  show                         redraw the table
  help                         this text
  quit                         exit";

/// Parses one input line. Blank lines yield `None`.
pub fn parse(line: &str) -> Result<Option<ReplCommand>, CommandError> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "" => return Ok(None),
        "next" | "n" => ReplCommand::Next,
        "prev" | "p" => ReplCommand::Prev,
        "first" => ReplCommand::First,
        "last" => ReplCommand::Last,
        "page" => {
            let page = number(rest, "page", "a page number")?;
            if page == 0 {
                return Err(CommandError::PageZero);
            }
            ReplCommand::Page(page)
        }
        "rows" => ReplCommand::Rows(number(rest, "rows", "a page size")?),
        "select" => ReplCommand::Select(
            rest.split_whitespace()
                .map(artwork_id)
                .collect::<Result<_, _>>()?,
        ),
        "toggle" => {
            if rest.is_empty() {
                return Err(CommandError::MissingArgument {
                    command: "toggle",
                    expected: "an artwork id",
                });
            }
            ReplCommand::Toggle(artwork_id(rest)?)
        }
        "bulk" => ReplCommand::Bulk,
        "count" => ReplCommand::Count(rest.to_string()),
        "submit" => ReplCommand::Submit,
        "show" | "ls" => ReplCommand::Show,
        "help" | "?" => ReplCommand::Help,
        "quit" | "exit" | "q" => ReplCommand::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

impl ReplCommand {
    /// Table message for this command, if it has one.
    ///
    /// `toggle` is resolved against the current view into a full page
    /// selection.
    pub fn to_message(&self, view: &TableView<'_>) -> Result<Option<TableMessage>, CommandError> {
        let message = match self {
            Self::Next => TableMessage::NextPage,
            Self::Prev => TableMessage::PreviousPage,
            Self::First => TableMessage::FirstPage,
            Self::Last => TableMessage::LastPage,
            Self::Page(page) => TableMessage::GoToPage(page.saturating_sub(1)),
            Self::Rows(rows) => TableMessage::RowsPerPageChanged(*rows),
            Self::Select(ids) => TableMessage::SelectionChanged(ids.clone()),
            Self::Toggle(id) => {
                if !view.records.iter().any(|artwork| artwork.id == *id) {
                    return Err(CommandError::NotOnPage(*id));
                }
                let mut selection = view.selection.clone();
                if let Some(index) = selection.iter().position(|selected| selected == id) {
                    selection.remove(index);
                } else {
                    selection.push(*id);
                }
                TableMessage::SelectionChanged(selection)
            }
            Self::Bulk => TableMessage::BulkToggled,
            Self::Count(text) => TableMessage::BulkInputChanged(text.clone()),
            Self::Submit => TableMessage::BulkSubmitted,
            Self::Show | Self::Help | Self::Quit => return Ok(None),
        };
        Ok(Some(message))
    }
}

fn number(text: &str, command: &'static str, expected: &'static str) -> Result<usize, CommandError> {
    if text.is_empty() {
        return Err(CommandError::MissingArgument { command, expected });
    }
    text.parse()
        .map_err(|_| CommandError::InvalidNumber(text.to_string()))
}

fn artwork_id(text: &str) -> Result<ArtworkId, CommandError> {
    text.parse()
        .map_err(|_| CommandError::InvalidNumber(text.to_string()))
}
