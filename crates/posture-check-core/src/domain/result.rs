//! Analysis result types.

use serde::{Deserialize, Serialize};

use super::{Activity, Issue};

/// Outcome of judging one landmark set against one activity's rules.
///
/// Pure data: building one performs no I/O and leaves no state behind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// The activity the frame was judged against.
    pub activity: Activity,
    /// Defects found, in rule evaluation order.
    pub issues: Vec<Issue>,
    /// True when at least one rule fired.
    pub has_bad_posture: bool,
}

impl AnalysisResult {
    /// Creates a result from the issues the rules produced.
    ///
    /// `has_bad_posture` is derived here and nowhere else, so it can never
    /// disagree with `issues`.
    #[must_use]
    pub fn new(activity: Activity, issues: Vec<Issue>) -> Self {
        let has_bad_posture = !issues.is_empty();
        Self {
            activity,
            issues,
            has_bad_posture,
        }
    }
}

/// Complete per-frame record as written to the output stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameReport {
    /// Path to the analyzed frame.
    pub path: String,
    /// Timestamp of analysis (RFC 3339).
    pub timestamp: String,
    /// Frame dimensions in pixels.
    pub dimensions: ImageDimensions,
    /// The activity the frame was judged against.
    pub activity: Activity,
    /// Defects found, in rule evaluation order.
    pub issues: Vec<Issue>,
    /// True when at least one rule fired.
    pub has_bad_posture: bool,
    /// Path of the annotated copy, when annotation was requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotated_image: Option<String>,
}

impl FrameReport {
    /// Builds the per-frame record around an analysis outcome.
    #[must_use]
    pub fn new(
        path: impl Into<String>,
        timestamp: impl Into<String>,
        dimensions: ImageDimensions,
        analysis: AnalysisResult,
    ) -> Self {
        Self {
            path: path.into(),
            timestamp: timestamp.into(),
            dimensions,
            activity: analysis.activity,
            issues: analysis.issues,
            has_bad_posture: analysis.has_bad_posture,
            annotated_image: None,
        }
    }

    /// Records the path the annotated copy was written to.
    #[must_use]
    pub fn with_annotated_image(mut self, path: impl Into<String>) -> Self {
        self.annotated_image = Some(path.into());
        self
    }
}

/// Image dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageDimensions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// A decoded frame plus where it came from.
#[derive(Debug, Clone)]
pub struct ImageInfo {
    /// Path to the frame file.
    pub path: String,
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Decoded pixel data.
    pub image: image::DynamicImage,
}

impl ImageInfo {
    /// Wraps a decoded image, capturing its dimensions.
    #[must_use]
    pub fn new(path: impl Into<String>, image: image::DynamicImage) -> Self {
        let width = image.width();
        let height = image.height();
        Self {
            path: path.into(),
            width,
            height,
            image,
        }
    }

    /// Returns the frame's pixel dimensions.
    #[must_use]
    pub const fn dimensions(&self) -> ImageDimensions {
        ImageDimensions {
            width: self.width,
            height: self.height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::IssueKind;

    #[test]
    fn test_has_bad_posture_follows_issues() {
        let clean = AnalysisResult::new(Activity::Squat, vec![]);
        assert!(!clean.has_bad_posture);

        let flagged = AnalysisResult::new(
            Activity::Squat,
            vec![Issue::flag(
                IssueKind::LeftKneeOverToe,
                "Left knee extends beyond toe".into(),
            )],
        );
        assert!(flagged.has_bad_posture);
    }

    #[test]
    fn test_report_serializes_without_annotation_field_when_absent() {
        let report = FrameReport::new(
            "frame.png",
            "2025-01-01T00:00:00Z",
            ImageDimensions {
                width: 640,
                height: 480,
            },
            AnalysisResult::new(Activity::Sitting, vec![]),
        );

        let json = serde_json::to_string(&report).expect("serialize");
        assert!(!json.contains("annotated_image"));
        assert!(json.contains("\"has_bad_posture\":false"));
        assert!(json.contains("\"activity\":\"sitting\""));
    }

    #[test]
    fn test_report_carries_annotation_path() {
        let report = FrameReport::new(
            "frame.png",
            "2025-01-01T00:00:00Z",
            ImageDimensions {
                width: 64,
                height: 64,
            },
            AnalysisResult::new(Activity::Squat, vec![]),
        )
        .with_annotated_image("out/frame.annotated.png");

        assert_eq!(
            report.annotated_image.as_deref(),
            Some("out/frame.annotated.png")
        );
    }

    #[test]
    fn test_image_info_captures_dimensions() {
        let image = image::DynamicImage::new_rgb8(320, 240);
        let info = ImageInfo::new("cam.png", image);
        assert_eq!(info.dimensions().width, 320);
        assert_eq!(info.dimensions().height, 240);
    }
}
