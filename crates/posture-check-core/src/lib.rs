//! Posture Check Core - Domain logic and posture rule sets
//!
//! This crate contains the core domain types, the angle geometry, and the
//! squat and sitting rule sets, plus the ports adapters plug into.

pub mod domain;
pub mod geometry;
pub mod ports;
pub mod rules;

pub use domain::{
    Activity, AnalysisError, AnalysisResult, FrameReport, ImageDimensions, ImageInfo, Issue,
    IssueKind, Landmark, LandmarkKind, LandmarkSet,
};
pub use ports::{ImageSource, PoseDetector, ProgressEvent, ProgressSink, ResultOutput};
pub use rules::{analyze, analyze_with, RuleConfig, SittingConfig, SquatConfig};
