//! Pose detector port.

use crate::domain::{ImageInfo, LandmarkSet};

/// Port for obtaining body landmarks from a frame.
///
/// The pose model itself is outside this crate; implementations may wrap
/// an inference runtime, a remote service, or precomputed detection dumps.
/// Implementations sharing state across threads guard it themselves.
pub trait PoseDetector: Send + Sync {
    /// Detects the most prominent person's landmarks in a frame.
    ///
    /// Returns `Ok(None)` when no person is found. The returned set may be
    /// partial when the detector dropped low-confidence landmarks or the
    /// frame cut off part of the body.
    ///
    /// # Errors
    ///
    /// Returns an error when detection itself fails, as opposed to
    /// finding nobody.
    fn detect(&self, image: &ImageInfo) -> anyhow::Result<Option<LandmarkSet>>;
}
