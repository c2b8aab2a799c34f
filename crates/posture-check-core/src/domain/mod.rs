//! Core domain types for posture analysis.

mod activity;
mod error;
mod issue;
mod landmark;
mod result;

pub use activity::Activity;
pub use error::AnalysisError;
pub use issue::{Issue, IssueKind};
pub use landmark::{Landmark, LandmarkKind, LandmarkSet};
pub use result::{AnalysisResult, FrameReport, ImageDimensions, ImageInfo};
