//! Validated feature input
//!
//! The feature extractor hands us timed chroma frames plus the clip's nominal
//! duration and title. Everything here is checked once on construction so the
//! recognition pipeline can trust its input.

use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;
use crate::features::chroma::{PitchClassVector, PITCH_CLASSES};

/// Title used when the caller does not supply one
pub const DEFAULT_TITLE: &str = "Unknown Song";

/// One chroma frame tagged with its time in seconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimedFrame {
    /// Frame time in seconds
    pub time: f32,
    /// Pitch-class energies
    pub chroma: PitchClassVector,
}

impl TimedFrame {
    /// Create a new timed frame
    pub fn new(time: f32, chroma: PitchClassVector) -> Self {
        Self { time, chroma }
    }
}

/// Convert a slice into a pitch-class vector, checking dimensionality
///
/// # Errors
///
/// Returns `InvalidInput` if `values` does not have exactly 12 elements.
pub fn pitch_class_vector(values: &[f32]) -> Result<PitchClassVector, AnalysisError> {
    let chroma: PitchClassVector = values.try_into().map_err(|_| {
        AnalysisError::InvalidInput(format!(
            "Chroma vectors must have {} elements, got {}",
            PITCH_CLASSES,
            values.len()
        ))
    })?;
    Ok(chroma)
}

/// Time-ascending sequence of chroma frames
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeatureSequence {
    frames: Vec<TimedFrame>,
}

impl FeatureSequence {
    /// Validate and wrap timed frames
    ///
    /// Non-finite chroma values are let through: the classifier skips such
    /// frames individually rather than rejecting the whole sequence.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if a timestamp is negative, non-finite or not
    /// strictly after the previous one, or if a chroma value is negative.
    pub fn new(frames: Vec<TimedFrame>) -> Result<Self, AnalysisError> {
        let mut prev_time: Option<f32> = None;
        for (i, frame) in frames.iter().enumerate() {
            if !frame.time.is_finite() || frame.time < 0.0 {
                return Err(AnalysisError::InvalidInput(format!(
                    "Frame {} has invalid time {}",
                    i, frame.time
                )));
            }
            if let Some(prev) = prev_time {
                if frame.time <= prev {
                    return Err(AnalysisError::InvalidInput(format!(
                        "Frame times must be strictly ascending: frame {} at {}s follows {}s",
                        i, frame.time, prev
                    )));
                }
            }
            if frame.chroma.iter().any(|&x| x < 0.0) {
                return Err(AnalysisError::InvalidInput(format!(
                    "Frame {} has negative chroma values",
                    i
                )));
            }
            prev_time = Some(frame.time);
        }

        Ok(Self { frames })
    }

    /// Build a sequence from a chroma matrix sampled at a fixed hop
    ///
    /// Frame `i` is stamped at `i * hop_seconds`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if `hop_seconds` is not positive or a frame is invalid.
    pub fn from_hop(chroma: Vec<PitchClassVector>, hop_seconds: f32) -> Result<Self, AnalysisError> {
        if !hop_seconds.is_finite() || hop_seconds <= 0.0 {
            return Err(AnalysisError::InvalidInput(format!(
                "hop_seconds must be positive, got {}",
                hop_seconds
            )));
        }
        let frames = chroma
            .into_iter()
            .enumerate()
            .map(|(i, c)| TimedFrame::new(i as f32 * hop_seconds, c))
            .collect();
        Self::new(frames)
    }

    /// All frames, time-ascending
    pub fn frames(&self) -> &[TimedFrame] {
        &self.frames
    }

    /// Frames that start before `window_end` seconds
    pub fn within(&self, window_end: f32) -> &[TimedFrame] {
        let end = self.frames.partition_point(|f| f.time < window_end);
        &self.frames[..end]
    }

    /// Number of frames
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// True if there are no frames
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

/// Pass-through clip information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClipInfo {
    /// Clip title (opaque)
    pub title: String,
    /// Nominal clip duration in seconds
    pub duration: f32,
    /// Tempo supplied by the caller; never estimated here
    pub bpm: Option<f32>,
}

impl ClipInfo {
    /// Validate clip information
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a negative or non-finite duration, or a
    /// non-positive BPM.
    pub fn new(
        title: impl Into<String>,
        duration: f32,
        bpm: Option<f32>,
    ) -> Result<Self, AnalysisError> {
        if !duration.is_finite() || duration < 0.0 {
            return Err(AnalysisError::InvalidInput(format!(
                "Clip duration must be a non-negative number of seconds, got {}",
                duration
            )));
        }
        if let Some(bpm) = bpm {
            if !bpm.is_finite() || bpm <= 0.0 {
                return Err(AnalysisError::InvalidInput(format!(
                    "BPM must be positive, got {}",
                    bpm
                )));
            }
        }
        Ok(Self {
            title: title.into(),
            duration,
            bpm,
        })
    }

    /// Clip with the default title and no BPM
    pub fn untitled(duration: f32) -> Result<Self, AnalysisError> {
        Self::new(DEFAULT_TITLE, duration, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pitch_class_vector_dimensions() {
        assert!(pitch_class_vector(&[0.0; 12]).is_ok());
        let err = pitch_class_vector(&[0.0; 10]).unwrap_err();
        assert!(err.to_string().contains("got 10"));
    }

    #[test]
    fn test_sequence_rejects_unordered_times() {
        let frames = vec![
            TimedFrame::new(0.5, [0.0; 12]),
            TimedFrame::new(0.5, [0.0; 12]),
        ];
        assert!(FeatureSequence::new(frames).is_err());
    }

    #[test]
    fn test_sequence_rejects_negative_values() {
        let mut chroma = [0.0f32; 12];
        chroma[3] = -0.1;
        assert!(FeatureSequence::new(vec![TimedFrame::new(0.0, chroma)]).is_err());
        assert!(FeatureSequence::new(vec![TimedFrame::new(-1.0, [0.0; 12])]).is_err());
    }

    #[test]
    fn test_sequence_allows_non_finite_chroma() {
        let mut chroma = [0.0f32; 12];
        chroma[0] = f32::NAN;
        assert!(FeatureSequence::new(vec![TimedFrame::new(0.0, chroma)]).is_ok());
    }

    #[test]
    fn test_from_hop_timestamps() {
        let seq = FeatureSequence::from_hop(vec![[0.0; 12]; 4], 0.25).unwrap();
        let times: Vec<f32> = seq.frames().iter().map(|f| f.time).collect();
        assert_eq!(times, vec![0.0, 0.25, 0.5, 0.75]);
        assert!(FeatureSequence::from_hop(vec![[0.0; 12]], 0.0).is_err());
    }

    #[test]
    fn test_within_window() {
        let seq = FeatureSequence::from_hop(vec![[0.0; 12]; 10], 1.0).unwrap();
        assert_eq!(seq.within(4.0).len(), 4);
        assert_eq!(seq.within(100.0).len(), 10);
        assert!(seq.within(0.0).is_empty());
    }

    #[test]
    fn test_clip_info_validation() {
        assert!(ClipInfo::new("song", -1.0, None).is_err());
        assert!(ClipInfo::new("song", f32::INFINITY, None).is_err());
        assert!(ClipInfo::new("song", 10.0, Some(0.0)).is_err());
        let clip = ClipInfo::untitled(30.0).unwrap();
        assert_eq!(clip.title, DEFAULT_TITLE);
        assert_eq!(clip.bpm, None);
    }
}
