//! Configuration parameters for chord recognition

use crate::error::AnalysisError;
use serde::{Deserialize, Serialize};

/// Where a segment's confidence comes from when consecutive detections are merged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentConfidence {
    /// A closed segment takes the confidence of the detection that closed it
    /// (the first detection of the *next* segment); the final segment gets
    /// `final_segment_confidence`. This is the reference behaviour.
    FollowingDetection,

    /// Every segment, the final one included, carries the confidence of its own
    /// first detection. Changes observable confidence values compared to
    /// `FollowingDetection`.
    FirstDetection,
}

/// Chord recognition configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecognitionConfig {
    // Frame classification
    /// Classify only every Nth feature frame (default: 8)
    ///
    /// Finer strides add label churn without adding musical information.
    pub frame_stride: usize,

    /// Minimum frame score for a detection to be kept (default: 0.3)
    ///
    /// Also the floor every emitted confidence is clamped to.
    pub confidence_threshold: f32,

    /// Added to a frame's sum before L1 normalization (default: 1e-8)
    pub normalization_epsilon: f32,

    // Segmentation
    /// Confidence source for merged segments (default: FollowingDetection)
    pub segment_confidence: SegmentConfidence,

    /// Confidence given to the last segment under `FollowingDetection` (default: 0.7)
    pub final_segment_confidence: f32,

    // Filtering and output
    /// Minimum chord duration in seconds (default: 2.0)
    pub min_chord_duration: f32,

    /// Upper bound on the analysed window in seconds (default: 120.0)
    pub max_analysis_seconds: f32,

    /// Confidence attached to each chord of the fallback progression (default: 0.7)
    pub fallback_confidence: f32,
}

impl Default for RecognitionConfig {
    fn default() -> Self {
        Self {
            frame_stride: 8,
            confidence_threshold: 0.3,
            normalization_epsilon: 1e-8,
            segment_confidence: SegmentConfidence::FollowingDetection,
            final_segment_confidence: 0.7,
            min_chord_duration: 2.0,
            max_analysis_seconds: 120.0,
            fallback_confidence: 0.7,
        }
    }
}

impl RecognitionConfig {
    /// Check every parameter, returning `InvalidConfig` for the first bad one
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.frame_stride == 0 {
            return Err(AnalysisError::InvalidConfig(
                "frame_stride must be at least 1".to_string(),
            ));
        }

        check_unit_interval("confidence_threshold", self.confidence_threshold)?;
        check_unit_interval("final_segment_confidence", self.final_segment_confidence)?;
        check_unit_interval("fallback_confidence", self.fallback_confidence)?;

        // Every emitted confidence must respect the threshold floor
        for (name, value) in [
            ("final_segment_confidence", self.final_segment_confidence),
            ("fallback_confidence", self.fallback_confidence),
        ] {
            if value < self.confidence_threshold {
                return Err(AnalysisError::InvalidConfig(format!(
                    "{} ({}) is below confidence_threshold ({})",
                    name, value, self.confidence_threshold
                )));
            }
        }

        if !self.normalization_epsilon.is_finite() || self.normalization_epsilon <= 0.0 {
            return Err(AnalysisError::InvalidConfig(format!(
                "normalization_epsilon must be positive, got {}",
                self.normalization_epsilon
            )));
        }

        if !self.min_chord_duration.is_finite() || self.min_chord_duration < 0.0 {
            return Err(AnalysisError::InvalidConfig(format!(
                "min_chord_duration must be non-negative, got {}",
                self.min_chord_duration
            )));
        }

        if !self.max_analysis_seconds.is_finite() || self.max_analysis_seconds <= 0.0 {
            return Err(AnalysisError::InvalidConfig(format!(
                "max_analysis_seconds must be positive, got {}",
                self.max_analysis_seconds
            )));
        }

        Ok(())
    }

    /// Analysed window for a clip of the given nominal duration
    pub fn analysis_window(&self, clip_duration: f32) -> f32 {
        clip_duration.min(self.max_analysis_seconds)
    }

    /// Clamp a raw score into `[confidence_threshold, 1.0]`
    pub fn clamp_confidence(&self, score: f32) -> f32 {
        score.max(self.confidence_threshold).min(1.0)
    }
}

fn check_unit_interval(name: &str, value: f32) -> Result<(), AnalysisError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(AnalysisError::InvalidConfig(format!(
            "{} must be within [0, 1], got {}",
            name, value
        )));
    }
    Ok(())
}
