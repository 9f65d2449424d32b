//! Rebase absolute task timestamps onto a shared relative time axis.

use chrono::{NaiveDateTime, TimeDelta};

use super::parse::TaskRecord;

/// A retained task placed on the relative time axis, in seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedTask {
    pub record: TaskRecord,
    pub start: f64,
    pub end: f64,
}

impl NormalizedTask {
    pub fn label(&self) -> &str {
        &self.record.label
    }

    /// May be negative when the log recorded an end before the start.
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// Earliest absolute start among `records`.
pub fn origin(records: &[TaskRecord]) -> Option<NaiveDateTime> {
    records.iter().map(|r| r.absolute_start).min()
}

/// Convert retained records into offsets from their earliest start.
///
/// Two passes over the whole set: every record first gets raw offsets from the
/// origin, then the smallest raw start is subtracted from every offset, so the
/// earliest task always starts at exactly 0 regardless of input order.
pub fn normalize(records: Vec<TaskRecord>) -> Vec<NormalizedTask> {
    let Some(origin) = origin(&records) else {
        return Vec::new();
    };
    log::debug!("time origin: {}", origin);

    let mut tasks: Vec<NormalizedTask> = records
        .into_iter()
        .map(|record| NormalizedTask {
            start: seconds(record.absolute_start - origin),
            end: seconds(record.absolute_end - origin),
            record,
        })
        .collect();

    let time_zero = tasks
        .iter()
        .map(|t| t.start)
        .fold(f64::INFINITY, f64::min);

    for task in &mut tasks {
        task.start -= time_zero;
        task.end -= time_zero;
        log::debug!(
            "relative time for '{}': {} -> {}",
            task.label(),
            task.start,
            task.end
        );
    }

    tasks
}

fn seconds(delta: TimeDelta) -> f64 {
    delta.num_seconds() as f64 + f64::from(delta.subsec_nanos()) / 1e9
}
