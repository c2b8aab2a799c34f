//! Posture rule sets and activity dispatch.
//!
//! Each activity is an independent set of pure geometric checks over one
//! frame's landmarks. There is no shared rule machinery between
//! activities: dispatch is a plain match, and a rule set is data (its
//! config) plus a function.

mod sitting;
mod squat;

pub use sitting::SittingConfig;
pub use squat::SquatConfig;

use crate::domain::{Activity, AnalysisError, AnalysisResult, LandmarkSet};

/// Vertical offset, in normalized image units, used to construct the
/// synthetic reference point above a landmark for angle measurements.
pub const REFERENCE_OFFSET: f32 = 0.1;

/// Threshold configuration for every rule set.
#[derive(Debug, Clone, Default)]
pub struct RuleConfig {
    /// Squat rule thresholds.
    pub squat: SquatConfig,
    /// Seated posture rule thresholds.
    pub sitting: SittingConfig,
}

/// Judges a frame's landmarks against an activity's rules with default
/// thresholds.
///
/// Analysis is a pure function of its inputs: no I/O, no hidden state,
/// no cross-frame memory. Calling it twice with the same inputs returns
/// identical results.
///
/// # Errors
///
/// Returns [`AnalysisError::MissingLandmark`] when a required landmark is
/// absent from the set.
pub fn analyze(landmarks: &LandmarkSet, activity: Activity) -> Result<AnalysisResult, AnalysisError> {
    analyze_with(landmarks, activity, &RuleConfig::default())
}

/// Judges a frame's landmarks against an activity's rules with explicit
/// thresholds.
///
/// # Errors
///
/// Returns [`AnalysisError::MissingLandmark`] when a required landmark is
/// absent from the set.
pub fn analyze_with(
    landmarks: &LandmarkSet,
    activity: Activity,
    config: &RuleConfig,
) -> Result<AnalysisResult, AnalysisError> {
    let issues = match activity {
        Activity::Squat => squat::analyze(landmarks, &config.squat)?,
        Activity::Sitting => sitting::analyze(landmarks, &config.sitting)?,
    };
    Ok(AnalysisResult::new(activity, issues))
}
