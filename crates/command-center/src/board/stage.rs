//! Pipeline stages of the job-status board.

use serde::{Deserialize, Serialize};

/// One column of the job-status board, in pipeline order.
///
/// A stage carries three distinct string projections that the UI and the
/// job records use in different places:
/// - a stable id (`new-inquiry`), used as the serde form and as the drop
///   target identifier coming back from the view layer,
/// - a display title (`New Inquiry`), shown as the column header and in
///   move notifications,
/// - a status label (`Estimate` for the `EstimateSent` stage), the value a
///   job record's `status` field holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Stage {
    NewInquiry,
    EstimateSent,
    JobScheduled,
    InProgress,
    Complete,
}

impl Stage {
    /// Number of stages on the board.
    pub const COUNT: usize = 5;

    /// All stages in pipeline order. This is both the display order and the
    /// universe of valid move destinations; no linear progression is
    /// enforced between them.
    pub const ALL: [Stage; Stage::COUNT] = [
        Stage::NewInquiry,
        Stage::EstimateSent,
        Stage::JobScheduled,
        Stage::InProgress,
        Stage::Complete,
    ];

    /// Stable identifier, distinct from the display title.
    pub fn id(&self) -> &'static str {
        match self {
            Stage::NewInquiry => "new-inquiry",
            Stage::EstimateSent => "estimate-sent",
            Stage::JobScheduled => "job-scheduled",
            Stage::InProgress => "in-progress",
            Stage::Complete => "complete",
        }
    }

    /// Column header shown on the board.
    pub fn title(&self) -> &'static str {
        match self {
            Stage::NewInquiry => "New Inquiry",
            Stage::EstimateSent => "Estimate Sent",
            Stage::JobScheduled => "Job Scheduled",
            Stage::InProgress => "In Progress",
            Stage::Complete => "Complete",
        }
    }

    /// The value a job record's `status` field holds while the job sits in
    /// this stage.
    pub fn status_label(&self) -> &'static str {
        match self {
            Stage::NewInquiry => "New Inquiry",
            Stage::EstimateSent => "Estimate",
            Stage::JobScheduled => "Scheduled",
            Stage::InProgress => "In Progress",
            Stage::Complete => "Delivered",
        }
    }

    /// Position of this stage in [`Stage::ALL`].
    pub fn index(&self) -> usize {
        match self {
            Stage::NewInquiry => 0,
            Stage::EstimateSent => 1,
            Stage::JobScheduled => 2,
            Stage::InProgress => 3,
            Stage::Complete => 4,
        }
    }

    /// Resolves a stage from its stable id.
    pub fn from_id(id: &str) -> Option<Stage> {
        Stage::ALL.into_iter().find(|s| s.id() == id)
    }

    /// Resolves a stage from a job record's status label.
    pub fn from_status_label(label: &str) -> Option<Stage> {
        Stage::ALL.into_iter().find(|s| s.status_label() == label)
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title())
    }
}

/// Serde adapter for fields that store a stage as its status label
/// (`"Estimate"`, `"Delivered"`, ...) rather than its id.
pub mod status_label {
    use super::Stage;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(stage: &Stage, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(stage.status_label())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Stage, D::Error> {
        let label = String::deserialize(deserializer)?;
        Stage::from_status_label(&label)
            .ok_or_else(|| de::Error::custom(format!("unknown job status '{}'", label)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_round_trip() {
        for stage in Stage::ALL {
            assert_eq!(Stage::from_id(stage.id()), Some(stage));
        }
        assert_eq!(Stage::from_id("estimate"), None);
        assert_eq!(Stage::from_id("Estimate Sent"), None);
    }

    #[test]
    fn test_status_labels_round_trip() {
        for stage in Stage::ALL {
            assert_eq!(Stage::from_status_label(stage.status_label()), Some(stage));
        }
        assert_eq!(Stage::from_status_label("estimate-sent"), None);
    }

    #[test]
    fn test_status_label_differs_from_title_where_it_should() {
        assert_eq!(Stage::EstimateSent.title(), "Estimate Sent");
        assert_eq!(Stage::EstimateSent.status_label(), "Estimate");
        assert_eq!(Stage::Complete.status_label(), "Delivered");
        assert_eq!(Stage::InProgress.title(), Stage::InProgress.status_label());
    }

    #[test]
    fn test_serde_uses_stage_id() {
        let json = serde_json::to_string(&Stage::EstimateSent).unwrap();
        assert_eq!(json, r#""estimate-sent""#);
        let stage: Stage = serde_json::from_str(r#""in-progress""#).unwrap();
        assert_eq!(stage, Stage::InProgress);
    }

    #[test]
    fn test_pipeline_order() {
        let indexes: Vec<usize> = Stage::ALL.iter().map(|s| s.index()).collect();
        assert_eq!(indexes, vec![0, 1, 2, 3, 4]);
        assert!(Stage::NewInquiry < Stage::Complete);
    }
}
