//! Pose fixtures for testing.
//!
//! Every fixture is a hand-placed landmark set with known rule outcomes,
//! so tests can assert exact issues rather than "something fired".

use image::{DynamicImage, Rgb, RgbImage};
use posture_check_core::domain::{ImageInfo, Landmark, LandmarkKind, LandmarkSet};

/// Builder for landmark sets with known rule outcomes.
pub struct PoseFixture;

impl PoseFixture {
    fn build(entries: &[(LandmarkKind, f32, f32)]) -> LandmarkSet {
        entries
            .iter()
            .map(|&(kind, x, y)| (kind, Landmark::new(x, y)))
            .collect()
    }

    // === Squat fixtures ===

    /// Deep, upright squat: all squat rules pass.
    #[must_use]
    pub fn deep_squat() -> LandmarkSet {
        Self::build(&[
            (LandmarkKind::LeftShoulder, 0.55, 0.32),
            (LandmarkKind::LeftHip, 0.62, 0.68),
            (LandmarkKind::LeftKnee, 0.48, 0.70),
            (LandmarkKind::LeftAnkle, 0.50, 0.85),
            (LandmarkKind::RightHip, 0.63, 0.67),
            (LandmarkKind::RightKnee, 0.47, 0.69),
            (LandmarkKind::RightAnkle, 0.49, 0.84),
        ])
    }

    /// Deep squat with the left knee pushed past the toe: exactly the
    /// left knee-over-toe rule fires.
    #[must_use]
    pub fn left_knee_past_toe() -> LandmarkSet {
        Self::build(&[
            (LandmarkKind::LeftShoulder, 0.55, 0.32),
            (LandmarkKind::LeftHip, 0.62, 0.80),
            (LandmarkKind::LeftKnee, 0.60, 0.70),
            (LandmarkKind::LeftAnkle, 0.50, 0.85),
            (LandmarkKind::RightHip, 0.63, 0.67),
            (LandmarkKind::RightKnee, 0.47, 0.69),
            (LandmarkKind::RightAnkle, 0.49, 0.84),
        ])
    }

    /// Near-standing pose: exactly the squat depth rule fires.
    #[must_use]
    pub fn shallow_squat() -> LandmarkSet {
        Self::build(&[
            (LandmarkKind::LeftShoulder, 0.50, 0.14),
            (LandmarkKind::LeftHip, 0.52, 0.40),
            (LandmarkKind::LeftKnee, 0.50, 0.62),
            (LandmarkKind::LeftAnkle, 0.50, 0.85),
            (LandmarkKind::RightHip, 0.52, 0.40),
            (LandmarkKind::RightKnee, 0.50, 0.62),
            (LandmarkKind::RightAnkle, 0.50, 0.85),
        ])
    }

    /// Deep squat with a folded torso: exactly the back-angle rule fires
    /// (measured angle about 136.6 degrees).
    #[must_use]
    pub fn forward_lean_squat() -> LandmarkSet {
        let mut set = Self::deep_squat();
        set.insert(LandmarkKind::LeftShoulder, Landmark::new(0.45, 0.50));
        set
    }

    // === Sitting fixtures ===

    /// Upright desk posture: all sitting rules pass.
    #[must_use]
    pub fn upright_sitting() -> LandmarkSet {
        Self::build(&[
            (LandmarkKind::Nose, 0.50, 0.60),
            (LandmarkKind::LeftShoulder, 0.48, 0.40),
            (LandmarkKind::RightShoulder, 0.52, 0.42),
            (LandmarkKind::LeftHip, 0.49, 0.78),
        ])
    }

    /// Upright posture with the right shoulder dropped 0.07 below the
    /// left: exactly the shoulder-alignment rule fires.
    #[must_use]
    pub fn uneven_shoulders_sitting() -> LandmarkSet {
        let mut set = Self::upright_sitting();
        set.insert(LandmarkKind::RightShoulder, Landmark::new(0.52, 0.47));
        set
    }

    /// Hips pushed forward of the shoulders: exactly the slouching rule
    /// fires (measured angle about 145.4 degrees).
    #[must_use]
    pub fn slouched_sitting() -> LandmarkSet {
        let mut set = Self::upright_sitting();
        set.insert(LandmarkKind::LeftHip, Landmark::new(0.30, 0.70));
        set
    }

    /// Head craned forward: exactly the forward-head rule fires
    /// (measured angle about 35.0 degrees).
    #[must_use]
    pub fn forward_head_sitting() -> LandmarkSet {
        let mut set = Self::upright_sitting();
        set.insert(LandmarkKind::Nose, Landmark::new(0.62, 0.60));
        set
    }

    // === Whole-body fixture ===

    /// A standing figure with every landmark present. Rule outcomes are
    /// unspecified; use it for detector round trips and annotation.
    #[must_use]
    pub fn full_body() -> LandmarkSet {
        Self::build(&[
            (LandmarkKind::Nose, 0.50, 0.20),
            (LandmarkKind::LeftEyeInner, 0.485, 0.18),
            (LandmarkKind::LeftEye, 0.475, 0.18),
            (LandmarkKind::LeftEyeOuter, 0.465, 0.18),
            (LandmarkKind::RightEyeInner, 0.515, 0.18),
            (LandmarkKind::RightEye, 0.525, 0.18),
            (LandmarkKind::RightEyeOuter, 0.535, 0.18),
            (LandmarkKind::LeftEar, 0.455, 0.19),
            (LandmarkKind::RightEar, 0.545, 0.19),
            (LandmarkKind::MouthLeft, 0.48, 0.23),
            (LandmarkKind::MouthRight, 0.52, 0.23),
            (LandmarkKind::LeftShoulder, 0.42, 0.32),
            (LandmarkKind::RightShoulder, 0.58, 0.32),
            (LandmarkKind::LeftElbow, 0.40, 0.45),
            (LandmarkKind::RightElbow, 0.60, 0.45),
            (LandmarkKind::LeftWrist, 0.39, 0.57),
            (LandmarkKind::RightWrist, 0.61, 0.57),
            (LandmarkKind::LeftPinky, 0.385, 0.60),
            (LandmarkKind::RightPinky, 0.615, 0.60),
            (LandmarkKind::LeftIndex, 0.38, 0.60),
            (LandmarkKind::RightIndex, 0.62, 0.60),
            (LandmarkKind::LeftThumb, 0.39, 0.59),
            (LandmarkKind::RightThumb, 0.61, 0.59),
            (LandmarkKind::LeftHip, 0.45, 0.55),
            (LandmarkKind::RightHip, 0.55, 0.55),
            (LandmarkKind::LeftKnee, 0.45, 0.72),
            (LandmarkKind::RightKnee, 0.55, 0.72),
            (LandmarkKind::LeftAnkle, 0.45, 0.88),
            (LandmarkKind::RightAnkle, 0.55, 0.88),
            (LandmarkKind::LeftHeel, 0.44, 0.90),
            (LandmarkKind::RightHeel, 0.56, 0.90),
            (LandmarkKind::LeftFootIndex, 0.46, 0.93),
            (LandmarkKind::RightFootIndex, 0.54, 0.93),
        ])
    }

    // === Frames ===

    /// A small synthetic frame for pipelines that need pixels to exist.
    #[must_use]
    pub fn frame(width: u32, height: u32) -> ImageInfo {
        Self::frame_named("synthetic://frame", width, height)
    }

    /// A small synthetic frame with an explicit path.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn frame_named(path: &str, width: u32, height: u32) -> ImageInfo {
        let img = RgbImage::from_fn(width, height, |x, y| {
            let shade = ((x + y) % 200) as u8 + 30;
            Rgb([shade, shade, shade])
        });
        ImageInfo::new(path, DynamicImage::ImageRgb8(img))
    }
}
