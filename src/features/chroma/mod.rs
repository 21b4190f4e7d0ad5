//! Chroma (pitch-class) vector primitives
//!
//! Chroma vectors are produced upstream by a feature extractor; this module only
//! defines their shape and the normalization used for template matching.

pub mod normalization;

/// Number of pitch classes in a chroma vector
pub const PITCH_CLASSES: usize = 12;

/// Note names in chroma order (index 0 = C)
pub const NOTE_NAMES: [&str; PITCH_CLASSES] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// 12 non-negative energies, one per pitch class, in `NOTE_NAMES` order
pub type PitchClassVector = [f32; PITCH_CLASSES];
