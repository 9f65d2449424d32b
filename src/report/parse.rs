//! Timing log line parsing.
//!
//! One line per recorded task:
//!
//! ```text
//! 20230101120000000000000-20230101120005000000000 r=0m5.0s u=0m1.0s s=0m0.5s echo hi##Greeting##
//! ```
//!
//! Each 23-digit field is `YYYYMMDDHHMMSS` followed by nine sub-second digits,
//! of which the first six are taken as microseconds. The trailing text is the
//! command, optionally followed by a `##label##` annotation.

use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;
use serde::Serialize;

use super::VERY_SHORT_TASK;
use crate::error::ReportError;

/// Labels derived from a command are cut to this many characters.
const MAX_LABEL_CHARS: usize = 10;

static LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^([0-9]{23})-([0-9]{23}) r=([0-9.]+)m([0-9.]+)s u=([0-9.]+)m([0-9.]+)s s=([0-9.]+)m([0-9.]+)s (.*)$",
    )
    .unwrap()
});

static LABEL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(.*)##(.*)##$").unwrap());

/// One parsed task.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskRecord {
    pub absolute_start: NaiveDateTime,
    pub absolute_end: NaiveDateTime,
    pub real_seconds: f64,
    pub user_seconds: f64,
    pub sys_seconds: f64,
    pub command: String,
    /// Display label. Empty when nothing could be resolved: an empty
    /// annotation, or an unannotated task too short to be charted.
    pub label: String,
    /// Whether the label came from a `##label##` annotation
    pub annotated: bool,
}

impl TaskRecord {
    /// Whether this task belongs in the chart.
    ///
    /// Annotated tasks are always kept; unannotated ones only when they ran
    /// for at least [`VERY_SHORT_TASK`] seconds of wall time.
    pub fn is_retained(&self) -> bool {
        self.annotated || self.real_seconds >= VERY_SHORT_TASK
    }

    /// Used measurable CPU time, so it must be accounted for with a label.
    pub fn is_significant(&self) -> bool {
        self.user_seconds >= VERY_SHORT_TASK || self.sys_seconds >= VERY_SHORT_TASK
    }

    pub fn has_label(&self) -> bool {
        !self.label.is_empty()
    }
}

/// Outcome of classifying one parsed line.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedLine {
    /// Goes into the retained set
    Retained(TaskRecord),
    /// Too short to chart and unlabeled; kept only for logging
    Dropped(TaskRecord),
}

/// Parse a single line into a [`TaskRecord`].
///
/// Returns `None` when the line does not match the grammar. Retention and
/// label checks are left to [`classify_line`].
pub fn parse_line(line: &str) -> Option<TaskRecord> {
    let caps = LINE_RE.captures(line)?;

    let absolute_start = parse_timestamp(&caps[1])?;
    let absolute_end = parse_timestamp(&caps[2])?;
    let real_seconds = parse_minutes_seconds(&caps[3], &caps[4])?;
    let user_seconds = parse_minutes_seconds(&caps[5], &caps[6])?;
    let sys_seconds = parse_minutes_seconds(&caps[7], &caps[8])?;

    let rest = caps[9].trim();
    let (command, label, annotated) = match LABEL_RE.captures(rest) {
        Some(label_caps) => (
            label_caps[1].trim().to_string(),
            label_caps[2].trim().to_string(),
            true,
        ),
        // Only tasks that make it into the chart get a label derived from the command
        None if real_seconds >= VERY_SHORT_TASK => (rest.to_string(), short_label(rest), false),
        None => (rest.to_string(), String::new(), false),
    };

    Some(TaskRecord {
        absolute_start,
        absolute_end,
        real_seconds,
        user_seconds,
        sys_seconds,
        command,
        label,
        annotated,
    })
}

/// Parse a line and decide whether it is retained, dropped, or fatal.
///
/// `line_number` is 1-based and only used for error reporting and logs.
pub fn classify_line(line_number: usize, line: &str) -> Result<ParsedLine, ReportError> {
    let record = parse_line(line).ok_or_else(|| ReportError::Parse {
        line_number,
        line: line.trim().to_string(),
    })?;

    if record.is_significant() && !record.has_label() {
        return Err(ReportError::UnassignedTask {
            line_number,
            line: line.trim().to_string(),
            record: Box::new(record),
        });
    }

    if record.is_retained() {
        Ok(ParsedLine::Retained(record))
    } else {
        log::info!(
            "dropping short unlabeled task at line {}: {:?} (real {}s)",
            line_number,
            record.command,
            record.real_seconds
        );
        Ok(ParsedLine::Dropped(record))
    }
}

/// Parse a whole log, returning the retained tasks in file order.
///
/// Stops at the first fatal line; no partial result is returned.
pub fn parse_lines(input: &str) -> Result<Vec<TaskRecord>, ReportError> {
    let mut retained = Vec::new();
    let mut dropped = 0usize;

    for (idx, line) in input.lines().enumerate() {
        match classify_line(idx + 1, line)? {
            ParsedLine::Retained(record) => retained.push(record),
            ParsedLine::Dropped(_) => dropped += 1,
        }
    }

    log::debug!("parsed {} retained, {} dropped tasks", retained.len(), dropped);
    Ok(retained)
}

/// Fixed-width `YYYYMMDDHHMMSS` + sub-second digits.
fn parse_timestamp(digits: &str) -> Option<NaiveDateTime> {
    let field = |range: std::ops::Range<usize>| digits.get(range)?.parse::<u32>().ok();

    let year = digits.get(0..4)?.parse::<i32>().ok()?;
    let micros = field(14..20)?;

    NaiveDate::from_ymd_opt(year, field(4..6)?, field(6..8)?)?.and_hms_micro_opt(
        field(8..10)?,
        field(10..12)?,
        field(12..14)?,
        micros,
    )
}

fn parse_minutes_seconds(minutes: &str, seconds: &str) -> Option<f64> {
    let minutes: f64 = minutes.parse().ok()?;
    let seconds: f64 = seconds.parse().ok()?;
    Some(minutes * 60.0 + seconds)
}

fn short_label(command: &str) -> String {
    if command.chars().count() <= MAX_LABEL_CHARS {
        command.to_string()
    } else {
        let head: String = command.chars().take(MAX_LABEL_CHARS).collect();
        format!("{head}...")
    }
}
