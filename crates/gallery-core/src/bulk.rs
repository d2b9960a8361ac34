//! "Select first N" panel.
//!
//! ```text
//! Closed --toggle--> Open --submit(valid)--> Submitting --finish--> Closed
//!            <--toggle--  |
//!                         +--submit(invalid)--> Open (input kept)
//! ```

use std::num::NonZeroUsize;

use serde::Serialize;

use crate::error::BulkInputError;

/// State of the bulk-selection panel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub enum BulkSelect {
    #[default]
    Closed,
    /// Panel visible with an editable count.
    Open { input: String },
    /// Identifier fetch in flight.
    Submitting { count: NonZeroUsize },
}

impl BulkSelect {
    /// Opens a closed panel or closes an open one. Ignored while submitting.
    pub fn toggle(&mut self) {
        *self = match std::mem::take(self) {
            Self::Closed => Self::Open {
                input: String::new(),
            },
            Self::Open { .. } => Self::Closed,
            submitting @ Self::Submitting { .. } => submitting,
        };
    }

    /// Replaces the count input. Returns false unless the panel is open.
    pub fn set_input(&mut self, text: impl Into<String>) -> bool {
        match self {
            Self::Open { input } => {
                *input = text.into();
                true
            }
            _ => false,
        }
    }

    /// Validates the input and moves to `Submitting`.
    ///
    /// Returns `Ok(None)` when the panel is not open. On invalid input the
    /// panel stays open with the input unchanged.
    pub fn submit(&mut self) -> Result<Option<NonZeroUsize>, BulkInputError> {
        let Self::Open { input } = self else {
            return Ok(None);
        };
        let count = parse_count(input)?;
        *self = Self::Submitting { count };
        Ok(Some(count))
    }

    /// Ends a submission, successful or not. Input is discarded.
    pub fn finish(&mut self) {
        *self = Self::Closed;
    }

    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open { .. })
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self, Self::Submitting { .. })
    }

    /// Current input text while open.
    pub fn input(&self) -> Option<&str> {
        match self {
            Self::Open { input } => Some(input),
            _ => None,
        }
    }
}

/// Parses a positive whole number of rows to select.
pub fn parse_count(input: &str) -> Result<NonZeroUsize, BulkInputError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(BulkInputError::Empty);
    }
    let value: i64 = trimmed
        .parse()
        .map_err(|_| BulkInputError::NotANumber(trimmed.to_string()))?;
    usize::try_from(value)
        .ok()
        .and_then(NonZeroUsize::new)
        .ok_or_else(|| BulkInputError::NotPositive(trimmed.to_string()))
}
