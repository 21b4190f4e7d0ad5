//! # Chordline
//!
//! Template-based chord recognition over pitch-class (chroma) feature
//! sequences. Feed it timed 12-bin chroma frames from any feature extractor and
//! get back a time-ordered chord chart.
//!
//! ## Features
//!
//! - **Template matching**: 12 major and 8 minor triads, versioned table
//! - **Segmentation**: consecutive identical labels merged into chords
//! - **Duration filtering**: sub-2-second flicker removed
//! - **Explicit fallback**: inconclusive input yields a canned progression,
//!   tagged with the reason
//!
//! ## Quick Start
//!
//! ```
//! use chordline::{analyze_features, ClipInfo, FeatureSequence, RecognitionConfig};
//!
//! // One C major frame every 0.125 s for 8 seconds
//! let c_major = [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0];
//! let features = FeatureSequence::from_hop(vec![c_major; 64], 0.125)?;
//! let clip = ClipInfo::new("Demo", 8.0, Some(120.0))?;
//!
//! let chart = analyze_features(&features, &clip, &RecognitionConfig::default())?;
//! assert_eq!(chart.key, "C");
//! for event in chart.events() {
//!     println!("{} at {:.1}s for {:.1}s", event.chord, event.time, event.duration);
//! }
//! # Ok::<(), chordline::AnalysisError>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! Chroma frames → Frame classifier (every Nth frame) → Segmenter
//!               → Duration filter / fallback → Event formatter → ChordChart
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analysis;
pub mod config;
pub mod error;
pub mod features;
pub mod io;

use rayon::prelude::*;

use analysis::duration_filter::{apply_duration_filter, FilterOutcome};
use analysis::formatter::{best_guess_key, format_events};
use features::chords::{detect_frames, segment_detections};

// Re-export main types
pub use analysis::metadata::AnalysisMetadata;
pub use analysis::result::{ChordChart, ChordEvent, FallbackReason, Recognition};
pub use config::{RecognitionConfig, SegmentConfidence};
pub use error::AnalysisError;
pub use features::chords::TemplateBank;
pub use io::features::{ClipInfo, FeatureSequence, TimedFrame};
pub use io::request::AnalysisRequest;

/// Main analysis function
///
/// Recognizes chords in a feature sequence using the standard template bank.
///
/// # Arguments
///
/// * `features` - Validated, time-ascending chroma frames
/// * `clip` - Clip title, nominal duration and optional BPM (passed through)
/// * `config` - Recognition configuration
///
/// # Returns
///
/// A `ChordChart` whose recognition is either `Detected` or `Fallback`. Poor or
/// empty input never produces an error; it produces the fallback progression.
///
/// # Errors
///
/// Returns `AnalysisError::InvalidConfig` if `config` fails validation.
pub fn analyze_features(
    features: &FeatureSequence,
    clip: &ClipInfo,
    config: &RecognitionConfig,
) -> Result<ChordChart, AnalysisError> {
    analyze_features_with_bank(features, clip, TemplateBank::standard(), config)
}

/// Recognize chords against a caller-supplied template bank
///
/// See [`analyze_features`].
pub fn analyze_features_with_bank(
    features: &FeatureSequence,
    clip: &ClipInfo,
    bank: &TemplateBank,
    config: &RecognitionConfig,
) -> Result<ChordChart, AnalysisError> {
    use std::time::Instant;
    let start_time = Instant::now();

    config.validate()?;

    let analyzed_seconds = config.analysis_window(clip.duration);
    let frames = features.within(analyzed_seconds);

    log::debug!(
        "Starting chord recognition for '{}': {} of {} frames inside {:.1}s window",
        clip.title,
        frames.len(),
        features.len(),
        analyzed_seconds
    );

    // Frame classification feeds the segmenter lazily
    let mut detections = 0usize;
    let segments = segment_detections(
        detect_frames(frames, bank, config).inspect(|_| detections += 1),
        config,
    );

    let frames_sampled = frames.len().div_ceil(config.frame_stride);
    log::debug!(
        "Classified {} frames (stride {}), {} passed the confidence gate",
        frames_sampled,
        config.frame_stride,
        detections
    );

    let outcome = apply_duration_filter(&segments, frames.len(), analyzed_seconds, config);
    let segments_dropped = match &outcome {
        FilterOutcome::Stable(kept) => segments.len() - kept.len(),
        FilterOutcome::Fallback { .. } => segments.len(),
    };

    let events = format_events(outcome.segments(), analyzed_seconds, config.min_chord_duration);
    let key = best_guess_key(&events);

    let recognition = match outcome {
        FilterOutcome::Stable(_) => Recognition::Detected { events },
        FilterOutcome::Fallback { reason, .. } => Recognition::Fallback { reason, events },
    };

    let processing_time_ms = start_time.elapsed().as_secs_f32() * 1000.0;

    log::debug!(
        "Chord recognition for '{}' finished: {} chords ({}), key {}, {:.2} ms",
        clip.title,
        recognition.events().len(),
        if recognition.is_fallback() { "fallback" } else { "detected" },
        key,
        processing_time_ms
    );

    Ok(ChordChart {
        title: clip.title.clone(),
        duration: clip.duration,
        bpm: clip.bpm,
        key,
        recognition,
        metadata: AnalysisMetadata {
            template_table_version: bank.version().to_string(),
            analyzed_seconds,
            frames_received: features.len(),
            frames_analyzed: frames.len(),
            frames_sampled,
            detections,
            segments: segments.len(),
            segments_dropped,
            processing_time_ms,
            ..Default::default()
        },
    })
}

/// Validate a request and recognize its chords
///
/// # Errors
///
/// Returns `AnalysisError::InvalidInput` if the request fails validation, or
/// `InvalidConfig` if `config` does.
///
/// # Example
///
/// ```
/// use chordline::{analyze_request, AnalysisRequest, FallbackReason, RecognitionConfig};
///
/// let request = AnalysisRequest::from_json(r#"{"duration": 30, "frames": []}"#)?;
/// let chart = analyze_request(request, &RecognitionConfig::default())?;
/// assert_eq!(chart.recognition.fallback_reason(), Some(FallbackReason::NoFrames));
/// assert_eq!(chart.events().len(), 4);
/// # Ok::<(), chordline::AnalysisError>(())
/// ```
pub fn analyze_request(
    request: AnalysisRequest,
    config: &RecognitionConfig,
) -> Result<ChordChart, AnalysisError> {
    let validated = request.validate()?;
    analyze_features(&validated.features, &validated.clip, config)
}

/// Analyze many requests in parallel
///
/// Parallelism is across requests; each request is still processed
/// single-threaded and shares nothing but the read-only template bank.
/// Results come back in input order.
pub fn analyze_batch(
    requests: Vec<AnalysisRequest>,
    config: &RecognitionConfig,
) -> Vec<Result<ChordChart, AnalysisError>> {
    log::debug!("Analyzing batch of {} requests", requests.len());
    requests
        .into_par_iter()
        .map(|request| analyze_request(request, config))
        .collect()
}
