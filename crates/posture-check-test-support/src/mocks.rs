//! Mock implementations of core port traits.

use std::sync::{Arc, Mutex, PoisonError};

use posture_check_core::domain::{FrameReport, ImageInfo, LandmarkSet};
use posture_check_core::ports::{
    ImageSource, PoseDetector, ProgressEvent, ProgressSink, ResultOutput,
};

/// Mock implementation of `ImageSource` for testing.
///
/// Yields pre-built frames and tracks iteration for assertions.
pub struct MockImageSource {
    images: Vec<ImageInfo>,
    iteration_count: Arc<Mutex<usize>>,
}

impl MockImageSource {
    /// Creates a new mock source with the given frames.
    #[must_use]
    pub fn new(images: Vec<ImageInfo>) -> Self {
        Self {
            images,
            iteration_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Creates an empty mock source.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(vec![])
    }

    /// Returns the number of times the source has been iterated.
    #[must_use]
    pub fn iteration_count(&self) -> usize {
        *self
            .iteration_count
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl ImageSource for MockImageSource {
    fn images(&self) -> Box<dyn Iterator<Item = anyhow::Result<ImageInfo>> + Send + '_> {
        let count = Arc::clone(&self.iteration_count);
        if let Ok(mut c) = count.lock() {
            *c += 1;
        }
        Box::new(self.images.iter().cloned().map(Ok))
    }

    fn count_hint(&self) -> Option<usize> {
        Some(self.images.len())
    }
}

/// What a mock detector answers per call.
#[derive(Debug, Clone)]
enum MockDetection {
    Pose(LandmarkSet),
    NoPose,
    Fail(String),
}

/// Mock implementation of `PoseDetector` for testing.
///
/// Answers from a preset script and counts calls. When the script runs
/// out, further calls report no pose.
pub struct MockPoseDetector {
    script: Vec<MockDetection>,
    repeat_last: bool,
    calls: Arc<Mutex<usize>>,
}

impl MockPoseDetector {
    /// Detector that finds the same pose in every frame.
    #[must_use]
    pub fn always(landmarks: LandmarkSet) -> Self {
        Self {
            script: vec![MockDetection::Pose(landmarks)],
            repeat_last: true,
            calls: Arc::new(Mutex::new(0)),
        }
    }

    /// Detector that never finds a pose.
    #[must_use]
    pub fn no_pose() -> Self {
        Self {
            script: vec![MockDetection::NoPose],
            repeat_last: true,
            calls: Arc::new(Mutex::new(0)),
        }
    }

    /// Detector whose detection always fails.
    #[must_use]
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            script: vec![MockDetection::Fail(message.into())],
            repeat_last: true,
            calls: Arc::new(Mutex::new(0)),
        }
    }

    /// Detector answering call N with the Nth entry; `None` entries mean
    /// no pose. Past the end it reports no pose.
    #[must_use]
    pub fn sequence(detections: Vec<Option<LandmarkSet>>) -> Self {
        let script = detections
            .into_iter()
            .map(|entry| entry.map_or(MockDetection::NoPose, MockDetection::Pose))
            .collect();
        Self {
            script,
            repeat_last: false,
            calls: Arc::new(Mutex::new(0)),
        }
    }

    /// Returns how many times `detect` was called.
    #[must_use]
    pub fn call_count(&self) -> usize {
        *self.calls.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl PoseDetector for MockPoseDetector {
    fn detect(&self, _image: &ImageInfo) -> anyhow::Result<Option<LandmarkSet>> {
        let call = {
            let mut calls = self.calls.lock().unwrap_or_else(PoisonError::into_inner);
            let current = *calls;
            *calls += 1;
            current
        };

        let index = if self.repeat_last {
            call.min(self.script.len().saturating_sub(1))
        } else {
            call
        };

        match self.script.get(index) {
            Some(MockDetection::Pose(landmarks)) => Ok(Some(landmarks.clone())),
            Some(MockDetection::Fail(message)) => Err(anyhow::anyhow!("{message}")),
            Some(MockDetection::NoPose) | None => Ok(None),
        }
    }
}

/// Mock implementation of `ResultOutput` for testing.
///
/// Captures reports for later assertions.
pub struct MockResultOutput {
    reports: Arc<Mutex<Vec<FrameReport>>>,
    flush_count: Arc<Mutex<usize>>,
}

impl MockResultOutput {
    /// Creates a new mock output.
    #[must_use]
    pub fn new() -> Self {
        Self {
            reports: Arc::new(Mutex::new(Vec::new())),
            flush_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Returns all captured reports.
    #[must_use]
    pub fn reports(&self) -> Vec<FrameReport> {
        self.reports
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the number of times `flush()` was called.
    #[must_use]
    pub fn flush_count(&self) -> usize {
        *self
            .flush_count
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MockResultOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultOutput for MockResultOutput {
    fn write(&self, report: &FrameReport) -> anyhow::Result<()> {
        self.reports
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(report.clone());
        Ok(())
    }

    fn flush(&self) -> anyhow::Result<()> {
        if let Ok(mut c) = self.flush_count.lock() {
            *c += 1;
        }
        Ok(())
    }
}

/// Mock implementation of `ProgressSink` for testing.
///
/// Captures events for later assertions.
pub struct MockProgressSink {
    events: Arc<Mutex<Vec<ProgressEvent>>>,
}

impl MockProgressSink {
    /// Creates a new mock progress sink.
    #[must_use]
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Returns all captured events.
    #[must_use]
    pub fn events(&self) -> Vec<ProgressEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the number of `Started` events.
    #[must_use]
    pub fn started_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, ProgressEvent::Started { .. }))
            .count()
    }

    /// Returns the number of `Completed` events.
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, ProgressEvent::Completed { .. }))
            .count()
    }

    /// Returns the number of `Skipped` events.
    #[must_use]
    pub fn skipped_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, ProgressEvent::Skipped { .. }))
            .count()
    }

    /// Returns the skip reasons in the order they arrived.
    #[must_use]
    pub fn skip_reasons(&self) -> Vec<String> {
        self.events()
            .iter()
            .filter_map(|e| match e {
                ProgressEvent::Skipped { reason, .. } => Some(reason.clone()),
                _ => None,
            })
            .collect()
    }

    /// Returns whether a `Finished` event was received.
    #[must_use]
    pub fn has_finished(&self) -> bool {
        self.events()
            .iter()
            .any(|e| matches!(e, ProgressEvent::Finished { .. }))
    }

    /// Returns the final counts from the `Finished` event, if any.
    #[must_use]
    pub fn finished_counts(&self) -> Option<(usize, usize)> {
        self.events().iter().find_map(|e| match e {
            ProgressEvent::Finished { processed, skipped } => Some((*processed, *skipped)),
            _ => None,
        })
    }
}

impl Default for MockProgressSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressSink for MockProgressSink {
    fn on_event(&self, event: ProgressEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}
