//! Minimum-duration filtering and fallback
//!
//! A segment lasts until the next segment starts (the last one until the end
//! of the analysed window). Segments shorter than the minimum chord duration
//! are flicker between stable passages and are dropped. If nothing survives,
//! a fixed progression stands in so the caller always has chords to show.

use super::result::FallbackReason;
use crate::config::RecognitionConfig;
use crate::features::chords::ChordSegment;

/// Fallback progression as (label, start time in seconds)
pub const FALLBACK_PROGRESSION: [(&str, f32); 4] =
    [("C", 0.0), ("G", 4.0), ("Am", 8.0), ("F", 12.0)];

/// Result of duration filtering
#[derive(Debug, Clone, PartialEq)]
pub enum FilterOutcome<'a> {
    /// At least one segment survived
    Stable(Vec<ChordSegment<'a>>),
    /// Nothing survived; the segments are the fallback progression
    Fallback {
        /// Why nothing survived
        reason: FallbackReason,
        /// Fallback progression segments
        segments: Vec<ChordSegment<'a>>,
    },
}

impl<'a> FilterOutcome<'a> {
    /// Segments to format, whichever branch was taken
    pub fn segments(&self) -> &[ChordSegment<'a>] {
        match self {
            FilterOutcome::Stable(segments) | FilterOutcome::Fallback { segments, .. } => segments,
        }
    }
}

/// Drop segments shorter than `min_duration`
///
/// # Arguments
///
/// * `segments` - Segments in time order
/// * `analysis_duration` - End of the analysed window in seconds
/// * `min_duration` - Minimum chord duration in seconds (e.g., 2.0)
pub fn filter_short_segments<'a>(
    segments: &[ChordSegment<'a>],
    analysis_duration: f32,
    min_duration: f32,
) -> Vec<ChordSegment<'a>> {
    segments
        .iter()
        .enumerate()
        .filter(|(i, segment)| {
            let end = segments
                .get(i + 1)
                .map(|next| next.start)
                .unwrap_or(analysis_duration);
            end - segment.start >= min_duration
        })
        .map(|(_, segment)| *segment)
        .collect()
}

/// The canned progression, each chord at the given confidence
pub fn fallback_progression(confidence: f32) -> Vec<ChordSegment<'static>> {
    FALLBACK_PROGRESSION
        .iter()
        .map(|&(label, start)| ChordSegment {
            label,
            start,
            confidence,
        })
        .collect()
}

/// Filter segments and decide between stable output and fallback
///
/// # Arguments
///
/// * `segments` - Segments in time order
/// * `frames_analyzed` - Frames inside the analysis window
/// * `analysis_duration` - End of the analysed window in seconds
/// * `config` - Recognition configuration
pub fn apply_duration_filter<'a>(
    segments: &[ChordSegment<'a>],
    frames_analyzed: usize,
    analysis_duration: f32,
    config: &RecognitionConfig,
) -> FilterOutcome<'a> {
    let stable = filter_short_segments(segments, analysis_duration, config.min_chord_duration);

    log::debug!(
        "Duration filter kept {}/{} segments (min {:.1}s, window {:.1}s)",
        stable.len(),
        segments.len(),
        config.min_chord_duration,
        analysis_duration
    );

    if !stable.is_empty() {
        return FilterOutcome::Stable(stable);
    }

    let reason = if frames_analyzed == 0 {
        FallbackReason::NoFrames
    } else if segments.is_empty() {
        FallbackReason::NoDetections
    } else {
        FallbackReason::NoStableSegments
    };

    log::warn!("Using fallback progression: {}", reason.description());

    FilterOutcome::Fallback {
        reason,
        segments: fallback_progression(config.fallback_confidence),
    }
}
