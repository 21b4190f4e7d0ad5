//! Frame classification by template matching
//!
//! Each sampled chroma frame is L1-normalized and compared against every
//! template in the bank. The similarity is the dot product of the two
//! normalized vectors divided by the template's peak weight, which puts a
//! frame identical to a template at exactly 1.0 and keeps every score in
//! [0, 1]. For triads the score is the share of the frame's energy that falls
//! on the chord tones.

use super::templates::TemplateBank;
use super::FrameDetection;
use crate::config::RecognitionConfig;
use crate::error::AnalysisError;
use crate::features::chroma::normalization::{dot_product, l1_normalize};
use crate::features::chroma::PitchClassVector;
use crate::io::features::TimedFrame;

/// Best template match for a single frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameScore<'a> {
    /// Label of the best-scoring template
    pub label: &'a str,

    /// Similarity score (0.0-1.0)
    pub score: f32,
}

/// Classify one chroma frame against every template in the bank
///
/// The strictly greatest score wins; on ties the template that comes first in
/// bank order is kept.
///
/// # Arguments
///
/// * `chroma` - 12-element chroma vector (non-negative)
/// * `bank` - Template bank
/// * `epsilon` - Added to the frame sum before normalization (e.g., 1e-8)
///
/// # Returns
///
/// `Ok(None)` when no template scores above zero (e.g., a silent frame).
///
/// # Errors
///
/// Returns `NumericalError` if the frame contains non-finite values, its sum
/// overflows, or a score comes out non-finite.
///
/// # Example
///
/// ```
/// use chordline::features::chords::{classify_frame, TemplateBank};
///
/// let g_major = [0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0];
/// let best = classify_frame(&g_major, TemplateBank::standard(), 1e-8)?.unwrap();
/// assert_eq!(best.label, "G");
/// assert!((best.score - 1.0).abs() < 1e-5);
/// # Ok::<(), chordline::AnalysisError>(())
/// ```
pub fn classify_frame<'a>(
    chroma: &PitchClassVector,
    bank: &'a TemplateBank,
    epsilon: f32,
) -> Result<Option<FrameScore<'a>>, AnalysisError> {
    if chroma.iter().any(|x| !x.is_finite()) {
        return Err(AnalysisError::NumericalError(
            "Chroma frame contains non-finite values".to_string(),
        ));
    }

    if !chroma.iter().sum::<f32>().is_finite() {
        return Err(AnalysisError::NumericalError(
            "Chroma frame energy overflows".to_string(),
        ));
    }

    let frame = l1_normalize(chroma, epsilon);

    let mut best: Option<FrameScore<'a>> = None;
    let mut best_score = 0.0f32;

    for template in bank.iter() {
        let score = dot_product(&frame, template.profile()) / template.peak();
        if !score.is_finite() {
            return Err(AnalysisError::NumericalError(format!(
                "Non-finite score against template '{}'",
                template.label()
            )));
        }
        if score > best_score {
            best_score = score;
            best = Some(FrameScore {
                label: template.label(),
                score: score.min(1.0),
            });
        }
    }

    Ok(best)
}

/// Lazily classify every `frame_stride`-th frame and keep confident detections
///
/// Frames are sampled from index 0. A frame whose best score does not exceed
/// `confidence_threshold` is dropped; surviving confidences are clamped into
/// `[confidence_threshold, 1.0]`. Frames that fail numerically are skipped with
/// a warning.
///
/// # Arguments
///
/// * `frames` - Time-ascending chroma frames
/// * `bank` - Template bank
/// * `config` - Recognition configuration (stride, threshold, epsilon)
pub fn detect_frames<'a>(
    frames: &'a [TimedFrame],
    bank: &'a TemplateBank,
    config: &'a RecognitionConfig,
) -> impl Iterator<Item = FrameDetection<'a>> + 'a {
    frames
        .iter()
        .step_by(config.frame_stride.max(1))
        .filter_map(move |frame| {
            match classify_frame(&frame.chroma, bank, config.normalization_epsilon) {
                Ok(Some(best)) if best.score > config.confidence_threshold => {
                    Some(FrameDetection {
                        label: best.label,
                        time: frame.time,
                        confidence: config.clamp_confidence(best.score),
                    })
                }
                Ok(_) => None,
                Err(e) => {
                    log::warn!("Skipping frame at {:.2}s: {}", frame.time, e);
                    None
                }
            }
        })
}
