//! Request schema
//!
//! The JSON shape a serving layer hands over, validated once into a
//! [`FeatureSequence`] and [`ClipInfo`].
//!
//! Required: `duration`, and exactly one of `frames` (explicit timestamps) or
//! `chroma` + `hop_seconds` (fixed hop). Optional: `title`, `bpm`.
//!
//! ```
//! use chordline::io::request::AnalysisRequest;
//!
//! let json = r#"{
//!     "duration": 2.0,
//!     "title": "Demo",
//!     "chroma": [[1,0,0,0,1,0,0,1,0,0,0,0]],
//!     "hop_seconds": 0.1
//! }"#;
//! let validated = AnalysisRequest::from_json(json)?.validate()?;
//! assert_eq!(validated.features.len(), 1);
//! assert_eq!(validated.clip.title, "Demo");
//! # Ok::<(), chordline::AnalysisError>(())
//! ```

use std::io::Read;

use serde::{Deserialize, Serialize};

use super::features::{pitch_class_vector, ClipInfo, FeatureSequence, TimedFrame, DEFAULT_TITLE};
use crate::error::AnalysisError;

/// One timed frame as it appears on the wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FrameRecord {
    /// Frame time in seconds
    pub time: f32,
    /// Pitch-class energies (must have 12 entries)
    pub chroma: Vec<f32>,
}

/// Incoming analysis request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnalysisRequest {
    /// Nominal clip duration in seconds
    pub duration: f32,

    /// Clip title, defaults to "Unknown Song"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Caller-supplied tempo, passed through untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bpm: Option<f32>,

    /// Frames with explicit timestamps
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frames: Option<Vec<FrameRecord>>,

    /// Chroma matrix (one 12-element row per frame) sampled at `hop_seconds`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chroma: Option<Vec<Vec<f32>>>,

    /// Hop between `chroma` rows in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hop_seconds: Option<f32>,
}

/// A request that passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedRequest {
    /// Time-ascending chroma frames
    pub features: FeatureSequence,
    /// Pass-through clip information
    pub clip: ClipInfo,
}

impl AnalysisRequest {
    /// Parse a request from a JSON string
    pub fn from_json(json: &str) -> Result<Self, AnalysisError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a request from a JSON reader
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, AnalysisError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Validate the request
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the frame source is missing or ambiguous, a
    /// chroma row has the wrong length, or any value fails the checks of
    /// [`FeatureSequence::new`] and [`ClipInfo::new`].
    pub fn validate(self) -> Result<ValidatedRequest, AnalysisError> {
        let clip = ClipInfo::new(
            self.title.unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            self.duration,
            self.bpm,
        )?;

        let features = match (self.frames, self.chroma, self.hop_seconds) {
            (Some(frames), None, None) => {
                let frames = frames
                    .iter()
                    .enumerate()
                    .map(|(i, record)| {
                        let chroma = pitch_class_vector(&record.chroma).map_err(|e| {
                            AnalysisError::InvalidInput(format!("frame {}: {}", i, e))
                        })?;
                        Ok(TimedFrame::new(record.time, chroma))
                    })
                    .collect::<Result<Vec<_>, AnalysisError>>()?;
                FeatureSequence::new(frames)?
            }
            (None, Some(rows), Some(hop)) => {
                let rows = rows
                    .iter()
                    .enumerate()
                    .map(|(i, row)| {
                        pitch_class_vector(row).map_err(|e| {
                            AnalysisError::InvalidInput(format!("chroma row {}: {}", i, e))
                        })
                    })
                    .collect::<Result<Vec<_>, AnalysisError>>()?;
                FeatureSequence::from_hop(rows, hop)?
            }
            (None, Some(_), None) => {
                return Err(AnalysisError::InvalidInput(
                    "`chroma` requires `hop_seconds`".to_string(),
                ))
            }
            (None, None, _) => {
                return Err(AnalysisError::InvalidInput(
                    "one of `frames` or `chroma` is required".to_string(),
                ))
            }
            _ => {
                return Err(AnalysisError::InvalidInput(
                    "`frames` cannot be combined with `chroma` or `hop_seconds`".to_string(),
                ))
            }
        };

        log::debug!(
            "Validated request '{}': {} frames, duration {:.1}s",
            clip.title,
            features.len(),
            clip.duration
        );

        Ok(ValidatedRequest { features, clip })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frames_request() {
        let json = r#"{
            "duration": 10,
            "bpm": 96,
            "frames": [
                {"time": 0.0, "chroma": [1,0,0,0,1,0,0,1,0,0,0,0]},
                {"time": 0.5, "chroma": [0,0,1,0,0,0,0,1,0,0,0,1]}
            ]
        }"#;
        let validated = AnalysisRequest::from_json(json).unwrap().validate().unwrap();
        assert_eq!(validated.features.len(), 2);
        assert_eq!(validated.clip.title, DEFAULT_TITLE);
        assert_eq!(validated.clip.bpm, Some(96.0));
        assert_eq!(validated.features.frames()[1].time, 0.5);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let json = r#"{"duration": 10, "chroma": [], "hop_seconds": 0.1, "youtube_url": "x"}"#;
        assert!(matches!(
            AnalysisRequest::from_json(json),
            Err(AnalysisError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_missing_duration_rejected() {
        let json = r#"{"chroma": [], "hop_seconds": 0.1}"#;
        assert!(AnalysisRequest::from_json(json).is_err());
    }

    #[test]
    fn test_wrong_dimensionality_rejected() {
        let json = r#"{"duration": 4, "chroma": [[1,0,0]], "hop_seconds": 0.1}"#;
        let err = AnalysisRequest::from_json(json)
            .unwrap()
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("chroma row 0"));
    }

    #[test]
    fn test_frame_source_must_be_unambiguous() {
        let both = AnalysisRequest {
            duration: 4.0,
            title: None,
            bpm: None,
            frames: Some(vec![]),
            chroma: Some(vec![]),
            hop_seconds: Some(0.1),
        };
        assert!(both.validate().is_err());

        let neither = AnalysisRequest {
            duration: 4.0,
            title: None,
            bpm: None,
            frames: None,
            chroma: None,
            hop_seconds: None,
        };
        assert!(neither.validate().is_err());

        let no_hop = AnalysisRequest {
            duration: 4.0,
            title: None,
            bpm: None,
            frames: None,
            chroma: Some(vec![]),
            hop_seconds: None,
        };
        assert!(no_hop.validate().is_err());
    }

    #[test]
    fn test_negative_duration_rejected() {
        let json = r#"{"duration": -3, "frames": []}"#;
        assert!(AnalysisRequest::from_json(json)
            .unwrap()
            .validate()
            .is_err());
    }

    #[test]
    fn test_empty_frames_are_valid() {
        let json = r#"{"duration": 30, "frames": []}"#;
        let validated = AnalysisRequest::from_json(json).unwrap().validate().unwrap();
        assert!(validated.features.is_empty());
    }
}
