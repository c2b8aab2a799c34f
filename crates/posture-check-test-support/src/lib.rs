//! Test support utilities for posture-check.
//!
//! Provides mock ports and pose fixtures with known rule outcomes for
//! testing the analysis pipeline.
//!
//! # Example
//!
//! ```
//! use posture_check_test_support::{MockPoseDetector, PoseFixture};
//!
//! // A detector that finds a clean squat in every frame
//! let detector = MockPoseDetector::always(PoseFixture::deep_squat());
//!
//! // A frame for it to look at
//! let frame = PoseFixture::frame(64, 64);
//! ```

mod builders;
mod mocks;

pub use builders::PoseFixture;
pub use mocks::{MockImageSource, MockPoseDetector, MockProgressSink, MockResultOutput};
