//! Assign rows and produce the draw primitives for a timeline chart.
//!
//! Rows are numbered from the top: row 0 is the earliest task.

use super::connect::{Connections, TaskId};
use super::normalize::NormalizedTask;
use super::{TIME_PARTIAL_STEPS, TIME_STEPS};

/// Vertical guide from the predecessor's row down (or up) to this row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Connector {
    pub from_row: usize,
    /// Where the guide is drawn: the chained task's start
    pub x: f64,
}

/// One horizontal bar.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineRow {
    pub row: usize,
    pub task_id: TaskId,
    pub label: String,
    pub start: f64,
    pub end: f64,
    pub connector: Option<Connector>,
}

/// Everything a renderer needs, in seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct Timeline {
    pub rows: Vec<TimelineRow>,
    /// Right edge of the chart, a multiple of `major_step`
    pub extent: f64,
    pub major_step: f64,
    pub minor_step: f64,
}

impl Timeline {
    pub fn connection_count(&self) -> usize {
        self.rows.iter().filter(|r| r.connector.is_some()).count()
    }

    /// Label of the row a chained row follows.
    pub fn predecessor_label(&self, row: &TimelineRow) -> Option<&str> {
        let connector = row.connector?;
        self.rows
            .get(connector.from_row)
            .map(|pred| pred.label.as_str())
    }

    /// `[0, step, 2*step, ..]` up to and including the extent.
    pub fn ticks(&self, step: f64) -> Vec<f64> {
        if step <= 0.0 {
            return Vec::new();
        }
        let count = (self.extent / step).floor() as usize;
        (0..=count).map(|i| i as f64 * step).collect()
    }
}

/// Lay out tasks sorted by `(start, end)`.
///
/// The sort is stable, so tasks with identical offsets keep their sequence
/// order. Connections are keyed by position in `tasks` and translated to rows.
pub fn layout(tasks: &[NormalizedTask], connections: &Connections) -> Timeline {
    let mut order: Vec<TaskId> = (0..tasks.len()).collect();
    order.sort_by(|&a, &b| {
        tasks[a]
            .start
            .total_cmp(&tasks[b].start)
            .then(tasks[a].end.total_cmp(&tasks[b].end))
    });

    let mut row_of = vec![0usize; tasks.len()];
    for (row, &id) in order.iter().enumerate() {
        row_of[id] = row;
    }

    let rows = order
        .iter()
        .enumerate()
        .map(|(row, &id)| {
            let task = &tasks[id];
            TimelineRow {
                row,
                task_id: id,
                label: task.label().to_string(),
                start: task.start,
                end: task.end,
                connector: connections.predecessor(id).map(|pred| Connector {
                    from_row: row_of[pred],
                    x: task.start,
                }),
            }
        })
        .collect();

    let extent = chart_extent(tasks);
    log::debug!("chart extent: {}s over {} rows", extent, tasks.len());

    Timeline {
        rows,
        extent,
        major_step: TIME_STEPS,
        minor_step: TIME_PARTIAL_STEPS,
    }
}

/// Latest offset bumped to the next major gridline.
///
/// An exact multiple still advances a full step, leaving room after the last bar.
pub fn chart_extent(tasks: &[NormalizedTask]) -> f64 {
    let latest = tasks
        .iter()
        .flat_map(|t| [t.start, t.end])
        .fold(0.0, f64::max);
    let bumped = latest + TIME_STEPS;
    bumped - bumped.rem_euclid(TIME_STEPS)
}
