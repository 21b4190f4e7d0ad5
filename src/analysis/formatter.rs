//! Caller-facing chord events

use super::result::ChordEvent;
use crate::features::chords::ChordSegment;

/// Key reported when there are no events to take it from
const DEFAULT_KEY: &str = "C";

/// Convert filtered segments into chord events
///
/// Each event lasts until the next segment starts (the last one until
/// `analysis_duration`), but never less than `min_duration`. `beat` cycles
/// 1-4 by position; it is not derived from tempo.
///
/// The last event ends at the analysed window, not the nominal clip duration:
/// on a 200 s clip with the default 120 s cap, a chord starting at 0 with no
/// successor lasts 120 s, not 200 s.
///
/// # Arguments
///
/// * `segments` - Filtered (or fallback) segments in time order
/// * `analysis_duration` - End of the analysed window in seconds
/// * `min_duration` - Minimum reported duration in seconds (e.g., 2.0)
pub fn format_events(
    segments: &[ChordSegment<'_>],
    analysis_duration: f32,
    min_duration: f32,
) -> Vec<ChordEvent> {
    segments
        .iter()
        .enumerate()
        .map(|(i, segment)| {
            let end = segments
                .get(i + 1)
                .map(|next| next.start)
                .unwrap_or(analysis_duration);
            ChordEvent {
                chord: segment.label.to_string(),
                time: segment.start,
                duration: (end - segment.start).max(min_duration),
                confidence: segment.confidence,
                beat: (i % 4) as u8 + 1,
            }
        })
        .collect()
}

/// Best-guess key: the label of the first event
pub fn best_guess_key(events: &[ChordEvent]) -> String {
    events
        .first()
        .map(|e| e.chord.clone())
        .unwrap_or_else(|| DEFAULT_KEY.to_string())
}
