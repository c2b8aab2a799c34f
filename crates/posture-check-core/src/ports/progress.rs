//! Progress reporting port for UI integration.

use crate::domain::FrameReport;

/// Events emitted while processing a batch of frames.
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// Analysis started for a frame.
    Started {
        /// Path to the frame.
        path: String,
        /// Index in the batch (0-based).
        index: usize,
        /// Total frames in batch, if known.
        total: Option<usize>,
    },
    /// Analysis completed for a frame.
    Completed {
        /// The per-frame report.
        report: FrameReport,
    },
    /// A frame was skipped. Covers load failures, frames with no detected
    /// person, and frames missing landmarks a rule needs.
    Skipped {
        /// Path to the frame.
        path: String,
        /// Reason for skipping.
        reason: String,
    },
    /// All frames have been processed.
    Finished {
        /// Total frames analyzed successfully.
        processed: usize,
        /// Total frames skipped.
        skipped: usize,
    },
}

/// Port for receiving progress events.
pub trait ProgressSink: Send + Sync {
    /// Called when a progress event occurs.
    fn on_event(&self, event: ProgressEvent);
}
