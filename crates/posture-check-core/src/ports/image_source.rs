//! Frame source port for loading images from various sources.

use crate::domain::ImageInfo;

/// Port for loading frames to analyze.
pub trait ImageSource: Send + Sync {
    /// Returns an iterator over frames from this source.
    ///
    /// # Errors
    ///
    /// Individual items may be errors if a frame fails to load; one bad
    /// file does not end the iteration.
    fn images(&self) -> Box<dyn Iterator<Item = anyhow::Result<ImageInfo>> + Send + '_>;

    /// Returns the total number of frames, if known.
    fn count_hint(&self) -> Option<usize>;
}
