//! Chord segmentation
//!
//! Merges consecutive detections that share a label into segments.
//!
//! # Algorithm
//!
//! 1. Track the current label and the time it started
//! 2. When a detection with a different label arrives, close the current
//!    segment and open a new one at the detection's time
//! 3. Close the last open segment once the detections run out
//!
//! Under `SegmentConfidence::FollowingDetection` a closed segment takes the
//! confidence of the detection that closed it, and the last segment gets the
//! fixed `final_segment_confidence`. Under `FirstDetection` every segment keeps
//! the confidence of its own first detection.

use super::{ChordSegment, FrameDetection};
use crate::config::{RecognitionConfig, SegmentConfidence};

/// Segment a time-ascending stream of detections
///
/// # Arguments
///
/// * `detections` - Gated frame detections, in time order
/// * `config` - Recognition configuration (confidence source)
///
/// # Returns
///
/// Segments in time order; empty when there were no detections.
pub fn segment_detections<'a, I>(detections: I, config: &RecognitionConfig) -> Vec<ChordSegment<'a>>
where
    I: IntoIterator<Item = FrameDetection<'a>>,
{
    let mut segments = Vec::new();
    // (label, start, confidence of the first detection)
    let mut current: Option<(&'a str, f32, f32)> = None;

    for detection in detections {
        match current {
            Some((label, _, _)) if label == detection.label => {}
            Some((label, start, first_confidence)) => {
                let confidence = match config.segment_confidence {
                    SegmentConfidence::FollowingDetection => detection.confidence,
                    SegmentConfidence::FirstDetection => first_confidence,
                };
                segments.push(ChordSegment {
                    label,
                    start,
                    confidence,
                });
                current = Some((detection.label, detection.time, detection.confidence));
            }
            None => {
                current = Some((detection.label, detection.time, detection.confidence));
            }
        }
    }

    if let Some((label, start, first_confidence)) = current {
        let confidence = match config.segment_confidence {
            SegmentConfidence::FollowingDetection => config.final_segment_confidence,
            SegmentConfidence::FirstDetection => first_confidence,
        };
        segments.push(ChordSegment {
            label,
            start,
            confidence,
        });
    }

    log::debug!("Merged detections into {} segments", segments.len());

    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    fn det(label: &'static str, time: f32, confidence: f32) -> FrameDetection<'static> {
        FrameDetection {
            label,
            time,
            confidence,
        }
    }

    #[test]
    fn test_empty_detections() {
        let segments = segment_detections(Vec::new(), &RecognitionConfig::default());
        assert!(segments.is_empty());
    }

    #[test]
    fn test_merges_consecutive_labels() {
        let detections = vec![
            det("C", 0.0, 0.9),
            det("C", 1.0, 0.8),
            det("G", 2.0, 0.6),
            det("G", 3.0, 0.5),
            det("C", 4.0, 0.4),
        ];
        let segments = segment_detections(detections, &RecognitionConfig::default());
        let summary: Vec<(&str, f32)> = segments.iter().map(|s| (s.label, s.start)).collect();
        assert_eq!(summary, vec![("C", 0.0), ("G", 2.0), ("C", 4.0)]);
    }

    #[test]
    fn test_following_detection_confidence() {
        let detections = vec![det("C", 0.0, 0.9), det("G", 2.0, 0.6), det("Am", 4.0, 0.4)];
        let segments = segment_detections(detections, &RecognitionConfig::default());
        // Each closed segment borrows the confidence of the detection that closed it
        assert_eq!(segments[0].confidence, 0.6);
        assert_eq!(segments[1].confidence, 0.4);
        assert_eq!(segments[2].confidence, 0.7);
    }

    #[test]
    fn test_first_detection_confidence() {
        let config = RecognitionConfig {
            segment_confidence: SegmentConfidence::FirstDetection,
            ..Default::default()
        };
        let detections = vec![
            det("C", 0.0, 0.9),
            det("C", 1.0, 0.35),
            det("G", 2.0, 0.6),
            det("Am", 4.0, 0.4),
        ];
        let segments = segment_detections(detections, &config);
        let confidences: Vec<f32> = segments.iter().map(|s| s.confidence).collect();
        assert_eq!(confidences, vec![0.9, 0.6, 0.4]);
    }

    #[test]
    fn test_single_detection() {
        let segments =
            segment_detections(vec![det("F", 3.0, 0.95)], &RecognitionConfig::default());
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].start, 3.0);
        assert_eq!(segments[0].confidence, 0.7);
    }
}
