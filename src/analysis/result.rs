//! Analysis result types

use serde::{Deserialize, Serialize};

use super::metadata::AnalysisMetadata;

/// A chord as presented to the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChordEvent {
    /// Chord label (e.g., "C", "F#m")
    pub chord: String,

    /// Start time in seconds
    pub time: f32,

    /// Duration in seconds (at least the minimum chord duration)
    pub duration: f32,

    /// Confidence (0.0-1.0)
    pub confidence: f32,

    /// Synthetic 4/4 beat counter (1-4), not derived from tempo
    pub beat: u8,
}

/// Why the fallback progression was used
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackReason {
    /// No frames inside the analysis window
    NoFrames,
    /// No sampled frame passed the confidence gate
    NoDetections,
    /// Every segment was shorter than the minimum chord duration
    NoStableSegments,
}

impl FallbackReason {
    /// Human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            FallbackReason::NoFrames => "no feature frames in the analysis window",
            FallbackReason::NoDetections => "no frame passed the confidence threshold",
            FallbackReason::NoStableSegments => "no chord lasted the minimum duration",
        }
    }
}

/// Outcome of chord recognition
///
/// Both variants carry events, so a caller always has something to render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Recognition {
    /// Chords were recognized from the features
    Detected {
        /// Recognized chords in time order
        events: Vec<ChordEvent>,
    },
    /// Detection was inconclusive; events hold the canned progression
    Fallback {
        /// Why detection was inconclusive
        reason: FallbackReason,
        /// The fallback progression
        events: Vec<ChordEvent>,
    },
}

impl Recognition {
    /// Events in time order, whichever branch was taken
    pub fn events(&self) -> &[ChordEvent] {
        match self {
            Recognition::Detected { events } | Recognition::Fallback { events, .. } => events,
        }
    }

    /// Consume and return the events
    pub fn into_events(self) -> Vec<ChordEvent> {
        match self {
            Recognition::Detected { events } | Recognition::Fallback { events, .. } => events,
        }
    }

    /// Fallback reason, if the fallback branch was taken
    pub fn fallback_reason(&self) -> Option<FallbackReason> {
        match self {
            Recognition::Detected { .. } => None,
            Recognition::Fallback { reason, .. } => Some(*reason),
        }
    }

    /// True if the fallback progression was used
    pub fn is_fallback(&self) -> bool {
        self.fallback_reason().is_some()
    }
}

/// Complete chord chart for one clip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChordChart {
    /// Clip title (passed through)
    pub title: String,

    /// Nominal clip duration in seconds (passed through)
    pub duration: f32,

    /// Tempo supplied by the caller (passed through, never estimated)
    pub bpm: Option<f32>,

    /// Best-guess key: the label of the first chord
    ///
    /// This is a heuristic, not a key-detection result.
    pub key: String,

    /// Recognized or fallback chords
    pub recognition: Recognition,

    /// Analysis metadata
    pub metadata: AnalysisMetadata,
}

impl ChordChart {
    /// Chord events in time order
    pub fn events(&self) -> &[ChordEvent] {
        self.recognition.events()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(chord: &str, time: f32) -> ChordEvent {
        ChordEvent {
            chord: chord.to_string(),
            time,
            duration: 4.0,
            confidence: 0.7,
            beat: 1,
        }
    }

    #[test]
    fn test_recognition_accessors() {
        let detected = Recognition::Detected {
            events: vec![event("D", 0.0)],
        };
        assert!(!detected.is_fallback());
        assert_eq!(detected.events().len(), 1);

        let fallback = Recognition::Fallback {
            reason: FallbackReason::NoDetections,
            events: vec![event("C", 0.0), event("G", 4.0)],
        };
        assert_eq!(fallback.fallback_reason(), Some(FallbackReason::NoDetections));
        assert_eq!(fallback.into_events().len(), 2);
    }

    #[test]
    fn test_recognition_serialization_tags() {
        let fallback = Recognition::Fallback {
            reason: FallbackReason::NoFrames,
            events: vec![],
        };
        let json = serde_json::to_value(&fallback).unwrap();
        assert_eq!(json["outcome"], "fallback");
        assert_eq!(json["reason"], "no_frames");

        let detected = Recognition::Detected { events: vec![] };
        let json = serde_json::to_value(&detected).unwrap();
        assert_eq!(json["outcome"], "detected");
    }
}
