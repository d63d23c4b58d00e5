use std::fmt::Formatter;

use super::{header_action::HeaderAction, sync_mode::SyncMode};

/// Outcome of a run that reached the destination tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub tab: String,
    pub mode: SyncMode,
    /// Only set in append mode.
    pub header_action: Option<HeaderAction>,
    pub rows_written: usize,
}

impl SyncReport {
    pub fn replaced(tab: impl Into<String>, rows_written: usize) -> Self {
        SyncReport {
            tab: tab.into(),
            mode: SyncMode::Replace,
            header_action: None,
            rows_written,
        }
    }

    pub fn appended(tab: impl Into<String>, header_action: HeaderAction, rows_written: usize) -> Self {
        SyncReport {
            tab: tab.into(),
            mode: SyncMode::Append,
            header_action: Some(header_action),
            rows_written,
        }
    }
}

impl std::fmt::Display for SyncReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.header_action {
            None => write!(
                f,
                "Replaced tab '{}' with {} rows (+ header).",
                self.tab, self.rows_written
            ),
            Some(action) => write!(
                f,
                "Appended {} rows to '{}' (header: {}).",
                self.rows_written, self.tab, action
            ),
        }
    }
}
