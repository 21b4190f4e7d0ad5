//! Feature modules
//!
//! - Chroma vector primitives and normalization
//! - Chord templates, frame classification and segmentation

pub mod chords;
pub mod chroma;
