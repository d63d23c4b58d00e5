//! Header reconciliation for append mode.
//!
//! The decision only looks at the first existing row of the tab and the new header, so it is kept
//! apart from the code that executes the resulting action against a remote tab.

use super::table::{is_blank_row, normalize_row};

/// What the first row of the destination tab looks like relative to the new header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum HeaderState {
    /// The tab holds no rows at all (this includes a freshly created tab).
    TabEmpty,
    HeaderMatches,
    /// Row 1 exists but every cell is blank.
    HeaderBlank,
    /// Row 1 holds content that is not the header.
    HeaderDiffers,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum HeaderAction {
    AppendHeaderRow,
    NoOp,
    OverwriteRow1,
    InsertRowAt1,
}

impl HeaderState {
    /// Checks run in order: equality, then blankness, then anything else differs.
    pub fn classify<S: AsRef<str>>(first_row: Option<&[S]>, header: &[String]) -> Self {
        let Some(first_row) = first_row else {
            return HeaderState::TabEmpty;
        };

        if normalize_row(first_row) == normalize_row(header) {
            HeaderState::HeaderMatches
        } else if is_blank_row(first_row) {
            HeaderState::HeaderBlank
        } else {
            HeaderState::HeaderDiffers
        }
    }

    pub fn action(self) -> HeaderAction {
        match self {
            HeaderState::TabEmpty => HeaderAction::AppendHeaderRow,
            HeaderState::HeaderMatches => HeaderAction::NoOp,
            HeaderState::HeaderBlank => HeaderAction::OverwriteRow1,
            HeaderState::HeaderDiffers => HeaderAction::InsertRowAt1,
        }
    }
}

pub fn decide_header_action<S: AsRef<str>>(
    first_row: Option<&[S]>,
    header: &[String],
) -> HeaderAction {
    HeaderState::classify(first_row, header).action()
}
