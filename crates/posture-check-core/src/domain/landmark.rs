//! Body landmark types produced by a pose detector.

use serde::{Deserialize, Serialize};

use super::AnalysisError;
use crate::geometry::Point2D;

/// The 33 body landmarks of the detector's pose topology, in output order.
///
/// The discriminant of each variant is its index in the detector output, so
/// `kind as usize` is the position of that landmark in a detection frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LandmarkKind {
    Nose,
    LeftEyeInner,
    LeftEye,
    LeftEyeOuter,
    RightEyeInner,
    RightEye,
    RightEyeOuter,
    LeftEar,
    RightEar,
    MouthLeft,
    MouthRight,
    LeftShoulder,
    RightShoulder,
    LeftElbow,
    RightElbow,
    LeftWrist,
    RightWrist,
    LeftPinky,
    RightPinky,
    LeftIndex,
    RightIndex,
    LeftThumb,
    RightThumb,
    LeftHip,
    RightHip,
    LeftKnee,
    RightKnee,
    LeftAnkle,
    RightAnkle,
    LeftHeel,
    RightHeel,
    LeftFootIndex,
    RightFootIndex,
}

impl LandmarkKind {
    /// Number of landmarks in the topology.
    pub const COUNT: usize = 33;

    /// All landmark kinds in detector output order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Nose,
        Self::LeftEyeInner,
        Self::LeftEye,
        Self::LeftEyeOuter,
        Self::RightEyeInner,
        Self::RightEye,
        Self::RightEyeOuter,
        Self::LeftEar,
        Self::RightEar,
        Self::MouthLeft,
        Self::MouthRight,
        Self::LeftShoulder,
        Self::RightShoulder,
        Self::LeftElbow,
        Self::RightElbow,
        Self::LeftWrist,
        Self::RightWrist,
        Self::LeftPinky,
        Self::RightPinky,
        Self::LeftIndex,
        Self::RightIndex,
        Self::LeftThumb,
        Self::RightThumb,
        Self::LeftHip,
        Self::RightHip,
        Self::LeftKnee,
        Self::RightKnee,
        Self::LeftAnkle,
        Self::RightAnkle,
        Self::LeftHeel,
        Self::RightHeel,
        Self::LeftFootIndex,
        Self::RightFootIndex,
    ];

    /// Returns the detector output index of this landmark.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the landmark at a detector output index, if in range.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Returns the snake_case name used in serialized output.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Nose => "nose",
            Self::LeftEyeInner => "left_eye_inner",
            Self::LeftEye => "left_eye",
            Self::LeftEyeOuter => "left_eye_outer",
            Self::RightEyeInner => "right_eye_inner",
            Self::RightEye => "right_eye",
            Self::RightEyeOuter => "right_eye_outer",
            Self::LeftEar => "left_ear",
            Self::RightEar => "right_ear",
            Self::MouthLeft => "mouth_left",
            Self::MouthRight => "mouth_right",
            Self::LeftShoulder => "left_shoulder",
            Self::RightShoulder => "right_shoulder",
            Self::LeftElbow => "left_elbow",
            Self::RightElbow => "right_elbow",
            Self::LeftWrist => "left_wrist",
            Self::RightWrist => "right_wrist",
            Self::LeftPinky => "left_pinky",
            Self::RightPinky => "right_pinky",
            Self::LeftIndex => "left_index",
            Self::RightIndex => "right_index",
            Self::LeftThumb => "left_thumb",
            Self::RightThumb => "right_thumb",
            Self::LeftHip => "left_hip",
            Self::RightHip => "right_hip",
            Self::LeftKnee => "left_knee",
            Self::RightKnee => "right_knee",
            Self::LeftAnkle => "left_ankle",
            Self::RightAnkle => "right_ankle",
            Self::LeftHeel => "left_heel",
            Self::RightHeel => "right_heel",
            Self::LeftFootIndex => "left_foot_index",
            Self::RightFootIndex => "right_foot_index",
        }
    }
}

impl std::fmt::Display for LandmarkKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A single detected body landmark in normalized image coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    /// Horizontal position in `[0, 1]` (0.0 = left edge of the frame).
    pub x: f32,
    /// Vertical position in `[0, 1]` (0.0 = top edge, y grows downward).
    pub y: f32,
    /// Detection confidence in `[0, 1]`.
    #[serde(default = "default_visibility")]
    pub visibility: f32,
}

const fn default_visibility() -> f32 {
    1.0
}

impl Landmark {
    /// Creates a fully visible landmark at the given position.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            visibility: 1.0,
        }
    }

    /// Sets the detection confidence.
    #[must_use]
    pub const fn with_visibility(mut self, visibility: f32) -> Self {
        self.visibility = visibility;
        self
    }

    /// Projects the landmark position onto the geometry plane.
    #[must_use]
    pub const fn point(self) -> Point2D {
        Point2D::new(self.x, self.y)
    }
}

/// One frame's worth of detected landmarks, possibly partial.
///
/// Detectors may drop landmarks the frame cuts off or that fall below a
/// confidence floor, so every slot is optional. The rule engine treats a
/// set as immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct LandmarkSet {
    slots: [Option<Landmark>; LandmarkKind::COUNT],
}

impl Default for LandmarkSet {
    fn default() -> Self {
        Self::empty()
    }
}

impl LandmarkSet {
    /// Creates a set with no landmarks present.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            slots: [None; LandmarkKind::COUNT],
        }
    }

    /// Sets the landmark for a body position, replacing any previous value.
    pub fn insert(&mut self, kind: LandmarkKind, landmark: Landmark) {
        self.slots[kind.index()] = Some(landmark);
    }

    /// Removes the landmark for a body position.
    pub fn remove(&mut self, kind: LandmarkKind) {
        self.slots[kind.index()] = None;
    }

    /// Returns the landmark for a body position, if detected.
    #[must_use]
    pub const fn get(&self, kind: LandmarkKind) -> Option<Landmark> {
        self.slots[kind.index()]
    }

    /// Returns the landmark for a body position or a `MissingLandmark` error.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::MissingLandmark`] when the detector did not
    /// produce this landmark.
    pub fn require(&self, kind: LandmarkKind) -> Result<Landmark, AnalysisError> {
        self.get(kind).ok_or(AnalysisError::MissingLandmark(kind))
    }

    /// Returns the number of landmarks present.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Returns true when no landmarks are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Iterates over present landmarks in detector output order.
    pub fn iter(&self) -> impl Iterator<Item = (LandmarkKind, Landmark)> + '_ {
        LandmarkKind::ALL
            .iter()
            .filter_map(|&kind| self.get(kind).map(|landmark| (kind, landmark)))
    }
}

impl FromIterator<(LandmarkKind, Landmark)> for LandmarkSet {
    fn from_iter<I: IntoIterator<Item = (LandmarkKind, Landmark)>>(iter: I) -> Self {
        let mut set = Self::empty();
        for (kind, landmark) in iter {
            set.insert(kind, landmark);
        }
        set
    }
}
