//! Error taxonomy for posture analysis.

use thiserror::Error;

use super::LandmarkKind;

/// Errors surfaced by the rule engine and its immediate callers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    /// A rule needed a landmark the detector did not produce. Analysis
    /// fails fast; no substitute coordinate is ever invented.
    #[error("missing required landmark: {0}")]
    MissingLandmark(LandmarkKind),

    /// The requested activity tag is not recognized. Rejected before any
    /// geometry runs.
    #[error("invalid activity {0:?}: expected \"squat\" or \"sitting\"")]
    InvalidActivity(String),

    /// The detector found no person in the frame. Raised at the pipeline
    /// boundary; the rule engine itself is never invoked in this case.
    #[error("no pose detected in the image")]
    NoPoseDetected,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            AnalysisError::MissingLandmark(LandmarkKind::LeftShoulder).to_string(),
            "missing required landmark: left_shoulder"
        );
        assert_eq!(
            AnalysisError::InvalidActivity("yoga".into()).to_string(),
            "invalid activity \"yoga\": expected \"squat\" or \"sitting\""
        );
        assert_eq!(
            AnalysisError::NoPoseDetected.to_string(),
            "no pose detected in the image"
        );
    }
}
