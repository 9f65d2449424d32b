//! Detect tasks that start right where another one ended.

use std::collections::BTreeMap;

use super::MIN_TIME_DIFF;
use super::normalize::NormalizedTask;

/// Position of a task in the normalized (file order) sequence.
pub type TaskId = usize;

/// Sparse map from a task to the one task it appears to follow.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Connections {
    predecessors: BTreeMap<TaskId, TaskId>,
}

impl Connections {
    /// The task `id` is chained after, if any.
    pub fn predecessor(&self, id: TaskId) -> Option<TaskId> {
        self.predecessors.get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.predecessors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predecessors.is_empty()
    }

    /// `(task, predecessor)` pairs ordered by task.
    pub fn iter(&self) -> impl Iterator<Item = (TaskId, TaskId)> + '_ {
        self.predecessors.iter().map(|(&task, &pred)| (task, pred))
    }
}

/// Whether `start` falls strictly inside the tolerance window around `end`.
fn coincides(start: f64, end: f64) -> bool {
    start > end - MIN_TIME_DIFF && start < end + MIN_TIME_DIFF
}

/// For every task, find the first other task (in sequence order) whose end
/// coincides with its start.
///
/// First match wins even when a later candidate is closer in time.
pub fn detect(tasks: &[NormalizedTask]) -> Connections {
    let mut predecessors = BTreeMap::new();

    for (id, task) in tasks.iter().enumerate() {
        let found = tasks
            .iter()
            .enumerate()
            .find(|&(other_id, other)| other_id != id && coincides(task.start, other.end));

        if let Some((pred_id, pred)) = found {
            log::info!(
                "connection '{}' ({} -> {}) to '{}' ({} -> {})",
                pred.label(),
                pred.start,
                pred.end,
                task.label(),
                task.start,
                task.end
            );
            predecessors.insert(id, pred_id);
        }
    }

    Connections { predecessors }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::parse::TaskRecord;
    use chrono::NaiveDate;
    use rstest::rstest;

    fn task(label: &str, start: f64, end: f64) -> NormalizedTask {
        let at = NaiveDate::from_ymd_opt(2023, 1, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        NormalizedTask {
            record: TaskRecord {
                absolute_start: at,
                absolute_end: at,
                real_seconds: end - start,
                user_seconds: 0.0,
                sys_seconds: 0.0,
                command: label.to_string(),
                label: label.to_string(),
                annotated: true,
            },
            start,
            end,
        }
    }

    #[rstest]
    #[case::within_tolerance(5.02, true)]
    #[case::just_before(4.97, true)]
    #[case::exact(5.0, true)]
    #[case::too_late(5.2, false)]
    #[case::too_early(4.9, false)]
    fn test_connection_window(#[case] start: f64, #[case] connected: bool) {
        let tasks = [task("A", 0.0, 5.0), task("B", start, start + 1.0)];
        let connections = detect(&tasks);
        assert_eq!(connections.predecessor(1) == Some(0), connected);
    }

    #[test]
    fn test_never_self_connected() {
        // Zero-length task: its start equals its own end
        let tasks = [task("A", 1.0, 1.0)];
        assert!(detect(&tasks).is_empty());
    }

    #[test]
    fn test_first_match_in_sequence_order() {
        let tasks = [
            task("far", 0.0, 4.96),
            task("near", 1.0, 5.0),
            task("next", 5.0, 6.0),
        ];
        let connections = detect(&tasks);
        // "near" ends closer to 5.0, but "far" comes first
        assert_eq!(connections.predecessor(2), Some(0));
        assert_eq!(connections.len(), 1);
    }

    #[test]
    fn test_chain() {
        let tasks = [
            task("c", 2.0, 3.0),
            task("a", 0.0, 1.0),
            task("b", 1.01, 2.0),
        ];
        let connections = detect(&tasks);
        assert_eq!(connections.iter().collect::<Vec<_>>(), [(0, 2), (2, 1)]);
    }
}
