//! Chord recognition modules
//!
//! Recognize chords frame by frame:
//! - Triad templates (12 major + 8 minor)
//! - Template matching per sampled frame
//! - Merging consecutive identical labels into segments

pub mod classifier;
pub mod segmenter;
pub mod templates;

pub use classifier::{classify_frame, detect_frames, FrameScore};
pub use segmenter::segment_detections;
pub use templates::{ChordQuality, ChordTemplate, TemplateBank, TEMPLATE_TABLE_VERSION};

/// A sampled frame that passed the confidence gate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameDetection<'a> {
    /// Best-matching chord label
    pub label: &'a str,

    /// Frame time in seconds
    pub time: f32,

    /// Match score clamped into [confidence_threshold, 1.0]
    pub confidence: f32,
}

/// A run of consecutive detections sharing a label
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChordSegment<'a> {
    /// Chord label
    pub label: &'a str,

    /// Time of the first detection in the run, in seconds
    pub start: f32,

    /// Segment confidence (0.0-1.0), sourced per `SegmentConfidence`
    pub confidence: f32,
}
