//! Timereport error types
//!
//! **`ReportError`** is the typed enum for the two fatal input conditions. Use
//! `.into()` to convert to `anyhow::Error`; `main.rs` recovers the variant with
//! `downcast_ref` for styled display and the record dump.
//!
//! ```ignore
//! if let Some(ReportError::UnassignedTask { record, .. }) = err.downcast_ref() {
//!     eprintln!("{}", serde_json::to_string_pretty(record)?);
//! }
//! ```
//!
//! Everything else (I/O, config, rendering) travels as plain `anyhow::Error`
//! with context attached at the call site.

use crate::report::TaskRecord;

/// Fatal input errors. Either one aborts the whole run before any output is written.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ReportError {
    /// A line does not match the timing-log grammar
    #[error("cannot parse line {line_number}: \"{line}\"")]
    Parse {
        /// 1-based line number in the input
        line_number: usize,
        /// The offending line, trimmed
        line: String,
    },

    /// A task used measurable CPU time but carries no label
    #[error("big task unassigned at line {line_number}: \"{line}\"")]
    UnassignedTask {
        line_number: usize,
        line: String,
        /// The full parsed record, dumped for diagnosis
        record: Box<TaskRecord>,
    },
}

impl ReportError {
    /// Line number the error was detected on.
    pub fn line_number(&self) -> usize {
        match self {
            ReportError::Parse { line_number, .. }
            | ReportError::UnassignedTask { line_number, .. } => *line_number,
        }
    }
}
