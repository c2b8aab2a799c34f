//! Posture Check Adapters - External adapters for posture-check.
//!
//! This crate provides adapters for:
//! - Filesystem frame source
//! - Landmark sidecar files as a pose detector
//! - Skeleton overlay rendering

pub mod annotate;
pub mod fs;
pub mod landmarks;

pub use annotate::{annotate_frame, draw_skeleton, POSE_EDGES};
pub use fs::FsImageSource;
pub use landmarks::{save_landmark_file, sidecar_path, LandmarkFileDetector};
