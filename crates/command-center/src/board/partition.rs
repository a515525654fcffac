//! The stage partition: an ordered assignment of job ids to stages.

use super::{BoardError, Stage};
use crate::jobs::JobRecord;

/// Outcome of a successful [`Board::move_job`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Same-stage drop back onto the source position; nothing changed.
    Unchanged,
    /// Reordered within a single stage.
    Reordered {
        stage: Stage,
        from_index: usize,
        to_index: usize,
    },
    /// Relocated from one stage to another.
    Relocated {
        from: Stage,
        to: Stage,
        to_index: usize,
    },
}

/// The authoritative mapping of stage to ordered job-id list.
///
/// Every job id appears in exactly one lane, and lane order is meaningful:
/// it reflects manual arrangement, not a derived sort. The only mutation
/// entry point is [`Board::move_job`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Board {
    lanes: [Vec<String>; Stage::COUNT],
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Derives a partition from job records, preserving input order within
    /// each stage. Jobs land in the lane their `status` names.
    pub fn from_jobs<'a, I>(jobs: I) -> Self
    where
        I: IntoIterator<Item = &'a JobRecord>,
    {
        let mut board = Self::new();
        for job in jobs {
            board.lanes[job.status.index()].push(job.id.clone());
        }
        board
    }

    /// Ordered job ids for one stage.
    pub fn lane(&self, stage: Stage) -> &[String] {
        &self.lanes[stage.index()]
    }

    /// Locates a job id on the board.
    pub fn position_of(&self, job_id: &str) -> Option<(Stage, usize)> {
        for stage in Stage::ALL {
            if let Some(idx) = self.lanes[stage.index()].iter().position(|id| id == job_id) {
                return Some((stage, idx));
            }
        }
        None
    }

    /// Total number of jobs across all lanes.
    pub fn job_count(&self) -> usize {
        self.lanes.iter().map(Vec::len).sum()
    }

    /// Returns true when no lane holds any job.
    pub fn is_empty(&self) -> bool {
        self.job_count() == 0
    }

    /// Iterates lanes in pipeline order.
    pub fn iter(&self) -> impl Iterator<Item = (Stage, &[String])> {
        Stage::ALL
            .into_iter()
            .map(move |stage| (stage, self.lane(stage)))
    }

    /// Places a newly created job at the end of its stage's lane.
    pub(crate) fn insert(&mut self, stage: Stage, job_id: &str) {
        self.lanes[stage.index()].push(job_id.to_string());
    }

    /// Moves `job_id` from `from` to `to`, inserting at `to_index`.
    ///
    /// `to_index` is the insertion position in the destination lane with the
    /// card already lifted out of its source lane (the drag-and-drop
    /// convention): for a cross-stage move the valid range is
    /// `0..=lane.len()`, for a same-stage move it is `0..=lane.len() - 1`.
    ///
    /// All validation happens before any mutation, so a failed call leaves
    /// the partition untouched and a successful call is atomic from the
    /// caller's perspective: the job is never observable in zero or two
    /// lanes. A same-stage move onto the source position is a no-op.
    pub fn move_job(
        &mut self,
        job_id: &str,
        from: Stage,
        to: Stage,
        to_index: usize,
    ) -> Result<MoveOutcome, BoardError> {
        let from_index = self.lanes[from.index()]
            .iter()
            .position(|id| id == job_id)
            .ok_or_else(|| BoardError::StaleMove {
                job_id: job_id.to_string(),
                stage: from,
            })?;

        let dest_len = self.lanes[to.index()].len();
        let max = if from == to { dest_len - 1 } else { dest_len };
        if to_index > max {
            return Err(BoardError::IndexOutOfRange {
                stage: to,
                index: to_index,
                max,
            });
        }

        if from == to {
            if to_index == from_index {
                return Ok(MoveOutcome::Unchanged);
            }
            let lane = &mut self.lanes[from.index()];
            let id = lane.remove(from_index);
            lane.insert(to_index, id);
            return Ok(MoveOutcome::Reordered {
                stage: from,
                from_index,
                to_index,
            });
        }

        let id = self.lanes[from.index()].remove(from_index);
        self.lanes[to.index()].insert(to_index, id);
        Ok(MoveOutcome::Relocated {
            from,
            to,
            to_index,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jobs::{JobRecord, Priority};
    use chrono::Utc;

    fn job(id: &str, status: Stage) -> JobRecord {
        JobRecord::new(id, "Test Customer", "2022 Honda Civic", "Rear bumper")
            .with_status(status)
            .with_priority(Priority::Medium)
            .with_due_date(Utc::now())
    }

    fn board(specs: &[(&str, Stage)]) -> Board {
        let jobs: Vec<JobRecord> = specs.iter().map(|(id, s)| job(id, *s)).collect();
        Board::from_jobs(&jobs)
    }

    fn assert_partition(board: &Board, expected_ids: &[&str]) {
        let mut seen = Vec::new();
        for (_, lane) in board.iter() {
            for id in lane {
                assert!(!seen.contains(id), "job '{}' appears in two lanes", id);
                seen.push(id.clone());
            }
        }
        let mut seen_sorted: Vec<&str> = seen.iter().map(String::as_str).collect();
        seen_sorted.sort_unstable();
        let mut expected_sorted = expected_ids.to_vec();
        expected_sorted.sort_unstable();
        assert_eq!(seen_sorted, expected_sorted);
    }

    #[test]
    fn test_from_jobs_preserves_input_order_within_stage() {
        let b = board(&[
            ("J1", Stage::NewInquiry),
            ("J2", Stage::InProgress),
            ("J3", Stage::NewInquiry),
        ]);
        assert_eq!(b.lane(Stage::NewInquiry), ["J1", "J3"]);
        assert_eq!(b.lane(Stage::InProgress), ["J2"]);
        assert!(b.lane(Stage::Complete).is_empty());
        assert_eq!(b.job_count(), 3);
    }

    #[test]
    fn test_cross_stage_move() {
        let mut b = board(&[("J1", Stage::NewInquiry), ("J2", Stage::NewInquiry)]);

        let outcome = b
            .move_job("J1", Stage::NewInquiry, Stage::EstimateSent, 0)
            .unwrap();

        assert_eq!(
            outcome,
            MoveOutcome::Relocated {
                from: Stage::NewInquiry,
                to: Stage::EstimateSent,
                to_index: 0,
            }
        );
        assert_eq!(b.lane(Stage::NewInquiry), ["J2"]);
        assert_eq!(b.lane(Stage::EstimateSent), ["J1"]);
        assert_partition(&b, &["J1", "J2"]);
    }

    #[test]
    fn test_cross_stage_move_appends_at_end() {
        let mut b = board(&[
            ("J1", Stage::NewInquiry),
            ("J2", Stage::EstimateSent),
            ("J3", Stage::EstimateSent),
        ]);

        b.move_job("J1", Stage::NewInquiry, Stage::EstimateSent, 2)
            .unwrap();

        assert_eq!(b.lane(Stage::EstimateSent), ["J2", "J3", "J1"]);
    }

    #[test]
    fn test_same_stage_reorder() {
        let mut b = board(&[
            ("J1", Stage::NewInquiry),
            ("J2", Stage::NewInquiry),
            ("J3", Stage::NewInquiry),
        ]);

        let outcome = b
            .move_job("J3", Stage::NewInquiry, Stage::NewInquiry, 0)
            .unwrap();

        assert_eq!(
            outcome,
            MoveOutcome::Reordered {
                stage: Stage::NewInquiry,
                from_index: 2,
                to_index: 0,
            }
        );
        assert_eq!(b.lane(Stage::NewInquiry), ["J3", "J1", "J2"]);
        assert_partition(&b, &["J1", "J2", "J3"]);
    }

    #[test]
    fn test_same_position_is_a_no_op() {
        let mut b = board(&[("J1", Stage::NewInquiry), ("J2", Stage::NewInquiry)]);
        let before = b.clone();

        let outcome = b
            .move_job("J1", Stage::NewInquiry, Stage::NewInquiry, 0)
            .unwrap();

        assert_eq!(outcome, MoveOutcome::Unchanged);
        assert_eq!(b, before);
    }

    #[test]
    fn test_stale_move_is_rejected_without_mutation() {
        let mut b = board(&[("J1", Stage::NewInquiry), ("J2", Stage::EstimateSent)]);
        let before = b.clone();

        let err = b
            .move_job("J3", Stage::NewInquiry, Stage::EstimateSent, 0)
            .unwrap_err();

        assert!(matches!(err, BoardError::StaleMove { .. }));
        assert_eq!(b, before);
    }

    #[test]
    fn test_wrong_source_stage_is_stale() {
        let mut b = board(&[("J1", Stage::InProgress)]);

        let err = b
            .move_job("J1", Stage::NewInquiry, Stage::Complete, 0)
            .unwrap_err();

        assert_eq!(
            err,
            BoardError::StaleMove {
                job_id: "J1".to_string(),
                stage: Stage::NewInquiry,
            }
        );
        assert_eq!(b.lane(Stage::InProgress), ["J1"]);
    }

    #[test]
    fn test_index_out_of_range_is_rejected_not_clamped() {
        let mut b = board(&[("J1", Stage::NewInquiry), ("J2", Stage::EstimateSent)]);
        let before = b.clone();

        let err = b
            .move_job("J1", Stage::NewInquiry, Stage::EstimateSent, 2)
            .unwrap_err();

        assert_eq!(
            err,
            BoardError::IndexOutOfRange {
                stage: Stage::EstimateSent,
                index: 2,
                max: 1,
            }
        );
        assert_eq!(b, before);
    }

    #[test]
    fn test_same_stage_bound_excludes_the_lifted_card() {
        let mut b = board(&[("J1", Stage::NewInquiry), ("J2", Stage::NewInquiry)]);

        // Two cards in the lane, so post-removal positions are 0..=1.
        b.move_job("J1", Stage::NewInquiry, Stage::NewInquiry, 1)
            .unwrap();
        assert_eq!(b.lane(Stage::NewInquiry), ["J2", "J1"]);

        let err = b
            .move_job("J1", Stage::NewInquiry, Stage::NewInquiry, 2)
            .unwrap_err();
        assert!(matches!(err, BoardError::IndexOutOfRange { max: 1, .. }));
    }

    #[test]
    fn test_backward_moves_are_allowed() {
        let mut b = board(&[("J1", Stage::Complete)]);

        b.move_job("J1", Stage::Complete, Stage::NewInquiry, 0)
            .unwrap();

        assert_eq!(b.lane(Stage::NewInquiry), ["J1"]);
        assert!(b.lane(Stage::Complete).is_empty());
    }

    #[test]
    fn test_partition_invariant_over_move_sequences() {
        let mut b = board(&[
            ("J1", Stage::NewInquiry),
            ("J2", Stage::NewInquiry),
            ("J3", Stage::EstimateSent),
            ("J4", Stage::InProgress),
        ]);
        let all = ["J1", "J2", "J3", "J4"];

        let moves = [
            ("J1", Stage::NewInquiry, Stage::Complete, 0),
            ("J3", Stage::EstimateSent, Stage::Complete, 1),
            ("J1", Stage::Complete, Stage::Complete, 1),
            ("J2", Stage::NewInquiry, Stage::InProgress, 0),
            ("J4", Stage::InProgress, Stage::NewInquiry, 0),
            ("J3", Stage::Complete, Stage::InProgress, 1),
        ];
        for (id, from, to, idx) in moves {
            b.move_job(id, from, to, idx).unwrap();
            assert_partition(&b, &all);
        }

        assert_eq!(b.lane(Stage::NewInquiry), ["J4"]);
        assert_eq!(b.lane(Stage::InProgress), ["J2", "J3"]);
        assert_eq!(b.lane(Stage::Complete), ["J1"]);
    }
}
