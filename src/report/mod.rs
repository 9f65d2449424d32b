//! Timing log parsing and timeline layout.
//!
//! The pipeline is a single batch pass over one log:
//!
//! 1. [`parse`] turns each line into a [`TaskRecord`], dropping very short
//!    unlabeled tasks and failing on malformed or unaccounted lines.
//! 2. [`normalize`] rebases the retained tasks onto seconds from the earliest start.
//! 3. [`connect`] finds tasks that begin where another one ended.
//! 4. [`layout`] sorts tasks into rows and computes the chart extent.
//!
//! Rendering lives in [`crate::render`] and only ever sees the resulting [`Timeline`].
//!
//! # Usage
//!
//! ```ignore
//! use timereport::report::{build_timeline, display};
//!
//! let timeline = build_timeline(&log_contents)?;
//! println!("{}", display::render(&timeline));
//! ```

pub mod connect;
pub mod display;
pub mod layout;
pub mod normalize;
pub mod parse;

pub use connect::{Connections, TaskId, detect};
pub use layout::{Connector, Timeline, TimelineRow, layout};
pub use normalize::{NormalizedTask, normalize};
pub use parse::{ParsedLine, TaskRecord, classify_line, parse_line, parse_lines};

use crate::error::ReportError;

/// Unlabeled tasks with less wall time than this are left out of the chart;
/// any task with more user or system time than this must carry a label.
pub const VERY_SHORT_TASK: f64 = 0.005;

/// Half-width of the window in which a start counts as following an end.
pub const MIN_TIME_DIFF: f64 = 0.05;

/// Major gridline spacing, in seconds. The chart extent is a multiple of it.
pub const TIME_STEPS: f64 = 10.0;

/// Minor gridline spacing, in seconds.
pub const TIME_PARTIAL_STEPS: f64 = 1.0;

/// Run the whole pipeline over the contents of a timing log.
pub fn build_timeline(input: &str) -> Result<Timeline, ReportError> {
    let records = parse_lines(input)?;
    if records.is_empty() {
        log::warn!("no tasks left to chart");
    }

    let tasks = normalize(records);
    let connections = detect(&tasks);
    Ok(layout(&tasks, &connections))
}
