//! Analysis metadata structures

use serde::{Deserialize, Serialize};

/// Bookkeeping about one recognition run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisMetadata {
    /// Crate version that produced the result
    pub algorithm_version: String,

    /// Version tag of the template table used
    pub template_table_version: String,

    /// Seconds of audio analysed: min(clip duration, analysis cap)
    pub analyzed_seconds: f32,

    /// Frames received from the caller
    pub frames_received: usize,

    /// Frames inside the analysis window
    pub frames_analyzed: usize,

    /// Frames actually classified (every `frame_stride`-th one)
    pub frames_sampled: usize,

    /// Sampled frames that passed the confidence gate
    pub detections: usize,

    /// Segments before duration filtering
    pub segments: usize,

    /// Segments removed for being shorter than the minimum duration
    pub segments_dropped: usize,

    /// Processing time in milliseconds
    pub processing_time_ms: f32,
}

impl Default for AnalysisMetadata {
    fn default() -> Self {
        Self {
            algorithm_version: env!("CARGO_PKG_VERSION").to_string(),
            template_table_version: String::new(),
            analyzed_seconds: 0.0,
            frames_received: 0,
            frames_analyzed: 0,
            frames_sampled: 0,
            detections: 0,
            segments: 0,
            segments_dropped: 0,
            processing_time_ms: 0.0,
        }
    }
}
