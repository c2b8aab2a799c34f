//! Pose detector adapter backed by landmark sidecar files.
//!
//! Detection dumps live next to each frame: `squat.png` pairs with
//! `squat.landmarks.json`. The dump holds one entry per landmark in
//! detector output order; `null` marks a landmark the detector dropped.
//! This keeps the pose model itself out of process while exercising the
//! full pipeline.

use anyhow::{bail, Context, Result};
use posture_check_core::{ImageInfo, Landmark, LandmarkKind, LandmarkSet, PoseDetector};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Extension appended to the frame stem for the sidecar file.
const SIDECAR_SUFFIX: &str = "landmarks.json";

/// Serialized detection dump.
#[derive(Debug, Serialize, Deserialize)]
struct LandmarkFile {
    /// Entries in detector output order; `null` for dropped landmarks.
    landmarks: Vec<Option<Landmark>>,
}

/// Pose detector reading per-frame landmark sidecar files.
pub struct LandmarkFileDetector {
    min_visibility: f32,
}

impl LandmarkFileDetector {
    /// Creates a detector keeping every landmark regardless of confidence.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            min_visibility: 0.0,
        }
    }

    /// Drops landmarks whose visibility falls below the given floor.
    #[must_use]
    pub const fn with_min_visibility(mut self, min_visibility: f32) -> Self {
        self.min_visibility = min_visibility;
        self
    }

    fn read_sidecar(&self, path: &Path) -> Result<Option<LandmarkSet>> {
        let contents = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No landmark file at {}", path.display());
                return Ok(None);
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to read landmark file: {}", path.display()))
            }
        };

        let file: LandmarkFile = serde_json::from_str(&contents)
            .with_context(|| format!("Malformed landmark file: {}", path.display()))?;

        if file.landmarks.len() > LandmarkKind::COUNT {
            bail!(
                "Landmark file {} has {} entries, expected at most {}",
                path.display(),
                file.landmarks.len(),
                LandmarkKind::COUNT
            );
        }

        let set: LandmarkSet = file
            .landmarks
            .into_iter()
            .enumerate()
            .filter_map(|(index, entry)| {
                let landmark = entry?;
                if landmark.visibility < self.min_visibility {
                    return None;
                }
                // Index is within COUNT after the length check above.
                LandmarkKind::from_index(index).map(|kind| (kind, landmark))
            })
            .collect();

        if set.is_empty() {
            debug!("Landmark file {} holds no pose", path.display());
            return Ok(None);
        }
        Ok(Some(set))
    }
}

impl Default for LandmarkFileDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl PoseDetector for LandmarkFileDetector {
    fn detect(&self, image: &ImageInfo) -> Result<Option<LandmarkSet>> {
        self.read_sidecar(&sidecar_path(Path::new(&image.path)))
    }
}

/// Returns the sidecar path for a frame path.
#[must_use]
pub fn sidecar_path(frame: &Path) -> PathBuf {
    frame.with_extension(SIDECAR_SUFFIX)
}

/// Writes a landmark set as a sidecar file next to the given frame.
///
/// The dump always has one entry per landmark so files stay aligned with
/// detector output; absent landmarks are written as `null`.
///
/// # Errors
///
/// Returns an error if serialization or the write fails.
pub fn save_landmark_file(frame: &Path, landmarks: &LandmarkSet) -> Result<PathBuf> {
    let entries: Vec<Option<Landmark>> = LandmarkKind::ALL
        .iter()
        .map(|&kind| landmarks.get(kind))
        .collect();
    let file = LandmarkFile { landmarks: entries };

    let path = sidecar_path(frame);
    let json = serde_json::to_string_pretty(&file).context("Failed to serialize landmarks")?;
    std::fs::write(&path, json)
        .with_context(|| format!("Failed to write landmark file: {}", path.display()))?;
    Ok(path)
}
