//! Squat form rules.
//!
//! Four checks run in a fixed order: knee-over-toe per side, torso lean,
//! and squat depth. All thresholds compare strictly, so a measurement
//! exactly at a threshold passes.

use crate::domain::{AnalysisError, Issue, IssueKind, LandmarkKind, LandmarkSet};
use crate::geometry::angle;

use super::REFERENCE_OFFSET;

/// Thresholds for squat analysis.
#[derive(Debug, Clone)]
pub struct SquatConfig {
    /// Minimum hip-shoulder-vertical angle in degrees. Smaller values mean
    /// the torso leans too far forward.
    pub back_angle_min: f32,
    /// Maximum hip-knee-ankle angle in degrees. Larger values on either
    /// leg mean the squat is too shallow.
    pub knee_angle_max: f32,
}

impl Default for SquatConfig {
    fn default() -> Self {
        Self {
            back_angle_min: 150.0,
            knee_angle_max: 100.0,
        }
    }
}

/// Judges one frame's landmarks against the squat rules.
///
/// Evaluates every rule even after earlier ones fire; issues come back in
/// rule order. The knee-over-toe check assumes the subject faces the
/// camera's left-to-right axis in the usual side-on capture, so a knee
/// "past the toe" has the larger x coordinate.
///
/// # Errors
///
/// Returns [`AnalysisError::MissingLandmark`] for the first required
/// landmark that is absent, without emitting any issues.
pub fn analyze(landmarks: &LandmarkSet, config: &SquatConfig) -> Result<Vec<Issue>, AnalysisError> {
    let left_shoulder = landmarks.require(LandmarkKind::LeftShoulder)?;
    let left_hip = landmarks.require(LandmarkKind::LeftHip)?;
    let left_knee = landmarks.require(LandmarkKind::LeftKnee)?;
    let left_ankle = landmarks.require(LandmarkKind::LeftAnkle)?;
    let right_hip = landmarks.require(LandmarkKind::RightHip)?;
    let right_knee = landmarks.require(LandmarkKind::RightKnee)?;
    let right_ankle = landmarks.require(LandmarkKind::RightAnkle)?;

    let mut issues = Vec::new();

    if left_knee.x > left_ankle.x {
        issues.push(Issue::flag(
            IssueKind::LeftKneeOverToe,
            "Left knee extends beyond toe".to_owned(),
        ));
    }
    if right_knee.x > right_ankle.x {
        issues.push(Issue::flag(
            IssueKind::RightKneeOverToe,
            "Right knee extends beyond toe".to_owned(),
        ));
    }

    // Torso lean measured on the left side only, against a vertical
    // reference ray rising from the shoulder.
    let reference = left_shoulder.point().above(REFERENCE_OFFSET);
    let back_angle = angle(left_hip.point(), left_shoulder.point(), reference);
    if back_angle < config.back_angle_min {
        issues.push(Issue::measured(
            IssueKind::BackTooForward,
            format!(
                "Back angle too forward: {back_angle:.1}\u{b0} (should be >{}\u{b0})",
                config.back_angle_min
            ),
            back_angle,
        ));
    }

    // Depth is bilateral: a straight knee on either leg flags the squat.
    let left_knee_angle = angle(left_hip.point(), left_knee.point(), left_ankle.point());
    let right_knee_angle = angle(right_hip.point(), right_knee.point(), right_ankle.point());
    if left_knee_angle > config.knee_angle_max || right_knee_angle > config.knee_angle_max {
        issues.push(Issue::flag(
            IssueKind::SquatTooShallow,
            "Squat not deep enough".to_owned(),
        ));
    }

    Ok(issues)
}
