//! Posture issues flagged by the rule sets.

use serde::{Deserialize, Serialize};

/// A posture defect found in a single frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    /// Which rule fired.
    #[serde(rename = "type")]
    pub kind: IssueKind,
    /// Human-readable finding, including the measured value where the rule
    /// involves one.
    pub message: String,
    /// Measured angle in degrees for angle-based rules.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub angle: Option<f32>,
}

impl Issue {
    /// Creates an issue without a measured angle.
    #[must_use]
    pub const fn flag(kind: IssueKind, message: String) -> Self {
        Self {
            kind,
            message,
            angle: None,
        }
    }

    /// Creates an issue carrying the measured angle behind the finding.
    #[must_use]
    pub const fn measured(kind: IssueKind, message: String, angle: f32) -> Self {
        Self {
            kind,
            message,
            angle: Some(angle),
        }
    }
}

/// The rule outcome an issue reports.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// Left knee tracked past the left toe during a squat.
    LeftKneeOverToe,
    /// Right knee tracked past the right toe during a squat.
    RightKneeOverToe,
    /// Torso leaned too far forward during a squat.
    BackTooForward,
    /// Squat did not reach sufficient depth.
    SquatTooShallow,
    /// Head positioned forward of the shoulders while seated.
    ForwardHead,
    /// Rounded back while seated.
    Slouching,
    /// Shoulders at visibly different heights while seated.
    UnevenShoulders,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_skips_absent_angle() {
        let issue = Issue::flag(IssueKind::UnevenShoulders, "Uneven shoulder alignment".into());
        let json = serde_json::to_string(&issue).expect("serialize");
        assert!(!json.contains("angle"));
        assert!(json.contains("\"type\":\"uneven_shoulders\""));
    }

    #[test]
    fn test_serialize_includes_measured_angle() {
        let issue = Issue::measured(IssueKind::Slouching, "Slouching detected".into(), 142.5);
        let json = serde_json::to_string(&issue).expect("serialize");
        assert!(json.contains("\"angle\":142.5"));
    }
}
