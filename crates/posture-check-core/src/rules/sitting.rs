//! Seated posture rules.
//!
//! Three checks run in a fixed order: forward head, slouching, and
//! shoulder alignment. All thresholds compare strictly, so a measurement
//! exactly at a threshold passes.

use crate::domain::{AnalysisError, Issue, IssueKind, LandmarkKind, LandmarkSet};
use crate::geometry::{angle, midpoint};

use super::REFERENCE_OFFSET;

/// Thresholds for seated posture analysis.
#[derive(Debug, Clone)]
pub struct SittingConfig {
    /// Maximum shoulder-nose-vertical angle in degrees before the head
    /// counts as pushed forward.
    pub neck_angle_max: f32,
    /// Minimum hip-shoulder-vertical angle in degrees. Smaller values mean
    /// a rounded back.
    pub back_angle_min: f32,
    /// Maximum allowed difference between shoulder heights, in normalized
    /// image units.
    pub shoulder_level_tolerance: f32,
}

impl Default for SittingConfig {
    fn default() -> Self {
        Self {
            neck_angle_max: 30.0,
            back_angle_min: 160.0,
            shoulder_level_tolerance: 0.05,
        }
    }
}

/// Judges one frame's landmarks against the seated posture rules.
///
/// The neck check measures at the nose between the left-shoulder ray and
/// a vertical reference, so it expects the usual desk-camera framing with
/// the shoulder above the nose line in image space. Slouching is measured
/// from the left hip through the shoulder midpoint.
///
/// # Errors
///
/// Returns [`AnalysisError::MissingLandmark`] for the first required
/// landmark that is absent, without emitting any issues.
pub fn analyze(
    landmarks: &LandmarkSet,
    config: &SittingConfig,
) -> Result<Vec<Issue>, AnalysisError> {
    let nose = landmarks.require(LandmarkKind::Nose)?;
    let left_shoulder = landmarks.require(LandmarkKind::LeftShoulder)?;
    let right_shoulder = landmarks.require(LandmarkKind::RightShoulder)?;
    let left_hip = landmarks.require(LandmarkKind::LeftHip)?;

    let mut issues = Vec::new();

    let neck_reference = nose.point().above(REFERENCE_OFFSET);
    let neck_angle = angle(left_shoulder.point(), nose.point(), neck_reference);
    if neck_angle > config.neck_angle_max {
        issues.push(Issue::measured(
            IssueKind::ForwardHead,
            format!(
                "Forward head posture: {neck_angle:.1}\u{b0} (should be <{}\u{b0})",
                config.neck_angle_max
            ),
            neck_angle,
        ));
    }

    let shoulder_center = midpoint(left_shoulder.point(), right_shoulder.point());
    let back_reference = shoulder_center.above(REFERENCE_OFFSET);
    let back_angle = angle(left_hip.point(), shoulder_center, back_reference);
    if back_angle < config.back_angle_min {
        issues.push(Issue::measured(
            IssueKind::Slouching,
            format!(
                "Slouching detected: {back_angle:.1}\u{b0} (should be >{}\u{b0})",
                config.back_angle_min
            ),
            back_angle,
        ));
    }

    let shoulder_diff = (left_shoulder.y - right_shoulder.y).abs();
    if shoulder_diff > config.shoulder_level_tolerance {
        issues.push(Issue::flag(
            IssueKind::UnevenShoulders,
            "Uneven shoulder alignment".to_owned(),
        ));
    }

    Ok(issues)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Landmark;

    fn set(entries: &[(LandmarkKind, f32, f32)]) -> LandmarkSet {
        entries
            .iter()
            .map(|&(kind, x, y)| (kind, Landmark::new(x, y)))
            .collect()
    }

    /// Upright desk posture: every rule passes.
    fn upright_sitting() -> LandmarkSet {
        set(&[
            (LandmarkKind::Nose, 0.50, 0.60),
            (LandmarkKind::LeftShoulder, 0.48, 0.40),
            (LandmarkKind::RightShoulder, 0.52, 0.42),
            (LandmarkKind::LeftHip, 0.49, 0.78),
        ])
    }

    #[test]
    fn test_default_config() {
        let config = SittingConfig::default();
        assert!((config.neck_angle_max - 30.0).abs() < f32::EPSILON);
        assert!((config.back_angle_min - 160.0).abs() < f32::EPSILON);
        assert!((config.shoulder_level_tolerance - 0.05).abs() < f32::EPSILON);
    }

    #[test]
    fn test_upright_sitting_has_no_issues() {
        let issues = analyze(&upright_sitting(), &SittingConfig::default()).expect("analysis");
        assert!(issues.is_empty(), "expected clean result, got {issues:?}");
    }

    #[test]
    fn test_forward_head_only() {
        let mut landmarks = upright_sitting();
        landmarks.insert(LandmarkKind::Nose, Landmark::new(0.62, 0.60));

        let issues = analyze(&landmarks, &SittingConfig::default()).expect("analysis");
        assert_eq!(issues.len(), 1, "got {issues:?}");
        assert_eq!(issues[0].kind, IssueKind::ForwardHead);
        assert_eq!(
            issues[0].message,
            "Forward head posture: 35.0\u{b0} (should be <30\u{b0})"
        );
        let angle = issues[0].angle.expect("measured rule");
        assert!((angle - 35.0).abs() < 0.1, "angle {angle}");
    }

    #[test]
    fn test_slouching_only() {
        let mut landmarks = upright_sitting();
        landmarks.insert(LandmarkKind::LeftHip, Landmark::new(0.30, 0.70));

        let issues = analyze(&landmarks, &SittingConfig::default()).expect("analysis");
        assert_eq!(issues.len(), 1, "got {issues:?}");
        assert_eq!(issues[0].kind, IssueKind::Slouching);
        assert_eq!(
            issues[0].message,
            "Slouching detected: 145.4\u{b0} (should be >160\u{b0})"
        );
        let angle = issues[0].angle.expect("measured rule");
        assert!((angle - 145.4).abs() < 0.1, "angle {angle}");
    }

    #[test]
    fn test_uneven_shoulders_only() {
        // Right shoulder dropped by 0.07 in image space while the other
        // measurements stay in their passing range.
        let mut landmarks = upright_sitting();
        landmarks.insert(LandmarkKind::RightShoulder, Landmark::new(0.52, 0.47));

        let issues = analyze(&landmarks, &SittingConfig::default()).expect("analysis");
        assert_eq!(issues.len(), 1, "got {issues:?}");
        assert_eq!(issues[0].kind, IssueKind::UnevenShoulders);
        assert_eq!(issues[0].message, "Uneven shoulder alignment");
        assert_eq!(issues[0].angle, None);
    }

    #[test]
    fn test_all_rules_fire_in_order() {
        let landmarks = set(&[
            (LandmarkKind::Nose, 0.62, 0.60),
            (LandmarkKind::LeftShoulder, 0.48, 0.40),
            (LandmarkKind::RightShoulder, 0.52, 0.47),
            (LandmarkKind::LeftHip, 0.30, 0.70),
        ]);

        let issues = analyze(&landmarks, &SittingConfig::default()).expect("analysis");
        let kinds: Vec<_> = issues.iter().map(|issue| issue.kind).collect();
        assert_eq!(
            kinds,
            vec![
                IssueKind::ForwardHead,
                IssueKind::Slouching,
                IssueKind::UnevenShoulders,
            ]
        );
    }

    #[test]
    fn test_missing_landmarks_reported_in_extraction_order() {
        let mut landmarks = upright_sitting();
        landmarks.remove(LandmarkKind::Nose);
        landmarks.remove(LandmarkKind::LeftHip);

        let err = analyze(&landmarks, &SittingConfig::default()).unwrap_err();
        assert_eq!(err, AnalysisError::MissingLandmark(LandmarkKind::Nose));
    }

    #[test]
    fn test_missing_hip_fails_without_issues() {
        // The remaining landmarks would trip the shoulder check, but the
        // missing hip has to win.
        let mut landmarks = upright_sitting();
        landmarks.insert(LandmarkKind::RightShoulder, Landmark::new(0.52, 0.47));
        landmarks.remove(LandmarkKind::LeftHip);

        let err = analyze(&landmarks, &SittingConfig::default()).unwrap_err();
        assert_eq!(err, AnalysisError::MissingLandmark(LandmarkKind::LeftHip));
    }

    #[test]
    fn test_unrelated_landmarks_do_not_change_outcome() {
        let baseline = analyze(&upright_sitting(), &SittingConfig::default()).expect("analysis");

        let mut landmarks = upright_sitting();
        landmarks.insert(LandmarkKind::RightHip, Landmark::new(0.51, 0.79));
        landmarks.insert(LandmarkKind::LeftEar, Landmark::new(0.46, 0.55));
        let with_extras = analyze(&landmarks, &SittingConfig::default()).expect("analysis");

        assert_eq!(baseline, with_extras);
    }

    #[test]
    fn test_neck_angle_boundary_passes() {
        // Measure the fixture's actual neck angle, then cap at exactly
        // that value: the strict comparison must not fire.
        let landmarks = upright_sitting();
        let nose = landmarks.get(LandmarkKind::Nose).expect("fixture");
        let shoulder = landmarks.get(LandmarkKind::LeftShoulder).expect("fixture");
        let measured = angle(
            shoulder.point(),
            nose.point(),
            nose.point().above(REFERENCE_OFFSET),
        );

        let config = SittingConfig {
            neck_angle_max: measured,
            ..Default::default()
        };
        let issues = analyze(&landmarks, &config).expect("analysis");
        assert!(
            !issues
                .iter()
                .any(|issue| issue.kind == IssueKind::ForwardHead),
            "exact threshold must pass, got {issues:?}"
        );

        let config = SittingConfig {
            neck_angle_max: measured - 0.01,
            ..Default::default()
        };
        let issues = analyze(&landmarks, &config).expect("analysis");
        assert!(issues
            .iter()
            .any(|issue| issue.kind == IssueKind::ForwardHead));
    }

    #[test]
    fn test_back_angle_boundary_passes() {
        let landmarks = upright_sitting();
        let left = landmarks.get(LandmarkKind::LeftShoulder).expect("fixture");
        let right = landmarks.get(LandmarkKind::RightShoulder).expect("fixture");
        let hip = landmarks.get(LandmarkKind::LeftHip).expect("fixture");
        let center = midpoint(left.point(), right.point());
        let measured = angle(hip.point(), center, center.above(REFERENCE_OFFSET));

        let config = SittingConfig {
            back_angle_min: measured,
            ..Default::default()
        };
        let issues = analyze(&landmarks, &config).expect("analysis");
        assert!(
            !issues.iter().any(|issue| issue.kind == IssueKind::Slouching),
            "exact threshold must pass, got {issues:?}"
        );
    }

    #[test]
    fn test_shoulder_tolerance_boundary_passes() {
        let landmarks = upright_sitting();
        let left = landmarks.get(LandmarkKind::LeftShoulder).expect("fixture");
        let right = landmarks.get(LandmarkKind::RightShoulder).expect("fixture");
        let measured = (left.y - right.y).abs();

        let config = SittingConfig {
            shoulder_level_tolerance: measured,
            ..Default::default()
        };
        let issues = analyze(&landmarks, &config).expect("analysis");
        assert!(
            !issues
                .iter()
                .any(|issue| issue.kind == IssueKind::UnevenShoulders),
            "exact tolerance must pass, got {issues:?}"
        );
    }

    #[test]
    fn test_custom_neck_threshold() {
        // Raising the maximum accepts the head position the default flags.
        let mut landmarks = upright_sitting();
        landmarks.insert(LandmarkKind::Nose, Landmark::new(0.62, 0.60));

        let config = SittingConfig {
            neck_angle_max: 60.0,
            ..Default::default()
        };
        let issues = analyze(&landmarks, &config).expect("analysis");
        assert!(issues.is_empty(), "got {issues:?}");
    }

    #[test]
    fn test_repeated_analysis_is_deterministic() {
        let landmarks = upright_sitting();
        let first = analyze(&landmarks, &SittingConfig::default()).expect("analysis");
        for _ in 0..10 {
            let again = analyze(&landmarks, &SittingConfig::default()).expect("analysis");
            assert_eq!(first, again);
        }
    }
}
