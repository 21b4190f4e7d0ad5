//! Chord templates
//!
//! Binary triad profiles (root, third, fifth) for the supported chord
//! vocabulary: the twelve major triads and a curated set of eight minor
//! triads. The table is enumerated in full and versioned; its order is the
//! tie-break order used by the classifier.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;
use crate::features::chroma::normalization::l1_normalize_profile;
use crate::features::chroma::{PitchClassVector, NOTE_NAMES, PITCH_CLASSES};

/// Version tag of the standard template table, reported in analysis metadata
pub const TEMPLATE_TABLE_VERSION: &str = "triads-v1";

/// Triad quality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChordQuality {
    /// Root, major third, perfect fifth
    Major,
    /// Root, minor third, perfect fifth
    Minor,
}

impl ChordQuality {
    /// Semitone offsets of the chord tones from the root
    pub fn intervals(&self) -> [usize; 3] {
        match self {
            ChordQuality::Major => [0, 4, 7],
            ChordQuality::Minor => [0, 3, 7],
        }
    }

    /// Label suffix ("" for major, "m" for minor)
    pub fn suffix(&self) -> &'static str {
        match self {
            ChordQuality::Major => "",
            ChordQuality::Minor => "m",
        }
    }
}

/// The standard vocabulary, in matching order (root pitch class, quality)
const STANDARD_TABLE: [(usize, ChordQuality); 20] = [
    (0, ChordQuality::Major),  // C
    (1, ChordQuality::Major),  // C#
    (2, ChordQuality::Major),  // D
    (3, ChordQuality::Major),  // D#
    (4, ChordQuality::Major),  // E
    (5, ChordQuality::Major),  // F
    (6, ChordQuality::Major),  // F#
    (7, ChordQuality::Major),  // G
    (8, ChordQuality::Major),  // G#
    (9, ChordQuality::Major),  // A
    (10, ChordQuality::Major), // A#
    (11, ChordQuality::Major), // B
    (9, ChordQuality::Minor),  // Am
    (4, ChordQuality::Minor),  // Em
    (2, ChordQuality::Minor),  // Dm
    (11, ChordQuality::Minor), // Bm
    (6, ChordQuality::Minor),  // F#m
    (7, ChordQuality::Minor),  // Gm
    (0, ChordQuality::Minor),  // Cm
    (5, ChordQuality::Minor),  // Fm
];

/// Chord label for a root pitch class and quality (e.g. "F#", "Am")
pub fn chord_label(root: usize, quality: ChordQuality) -> String {
    format!("{}{}", NOTE_NAMES[root % PITCH_CLASSES], quality.suffix())
}

/// Binary profile of a triad: 1.0 on each chord tone, 0.0 elsewhere
pub fn triad_profile(root: usize, quality: ChordQuality) -> PitchClassVector {
    let mut profile = [0.0f32; PITCH_CLASSES];
    for interval in quality.intervals() {
        profile[(root + interval) % PITCH_CLASSES] = 1.0;
    }
    profile
}

/// A chord label with its L1-normalized profile
#[derive(Debug, Clone, PartialEq)]
pub struct ChordTemplate {
    label: String,
    profile: PitchClassVector,
    peak: f32,
}

impl ChordTemplate {
    /// Build a template from a raw (un-normalized) binary profile
    ///
    /// Every chord tone must carry the same weight (e.g. 1.0 on each tone, 0.0
    /// elsewhere). Returns `Ok(None)` for a zero-sum profile, which can never
    /// match.
    ///
    /// # Errors
    ///
    /// - `NumericalError` if the profile contains non-finite values or its sum
    ///   overflows
    /// - `InvalidInput` if the profile contains negative or unequal non-zero
    ///   weights, or the label is empty
    pub fn from_profile(
        label: impl Into<String>,
        raw: &PitchClassVector,
    ) -> Result<Option<Self>, AnalysisError> {
        let label = label.into();
        if label.is_empty() {
            return Err(AnalysisError::InvalidInput(
                "Template label must not be empty".to_string(),
            ));
        }
        if raw.iter().any(|x| !x.is_finite()) {
            return Err(AnalysisError::NumericalError(format!(
                "Template '{}' has non-finite weights",
                label
            )));
        }
        if raw.iter().any(|&x| x < 0.0) {
            return Err(AnalysisError::InvalidInput(format!(
                "Template '{}' has negative weights",
                label
            )));
        }
        if !raw.iter().sum::<f32>().is_finite() {
            return Err(AnalysisError::NumericalError(format!(
                "Template '{}' weights overflow when summed",
                label
            )));
        }

        // Binary profiles only: one weight shared by every chord tone
        let mut tones = raw.iter().copied().filter(|&x| x > 0.0);
        if let Some(first) = tones.next() {
            if tones.any(|x| x != first) {
                return Err(AnalysisError::InvalidInput(format!(
                    "Template '{}' must weight every chord tone equally",
                    label
                )));
            }
        }

        Ok(l1_normalize_profile(raw).map(|profile| {
            let peak = profile.iter().cloned().fold(0.0f32, f32::max);
            Self {
                label,
                profile,
                peak,
            }
        }))
    }

    fn triad(root: usize, quality: ChordQuality) -> Self {
        let tones = quality.intervals().len() as f32;
        Self {
            label: chord_label(root, quality),
            profile: triad_profile(root, quality).map(|x| x / tones),
            peak: 1.0 / tones,
        }
    }

    /// Chord label (e.g. "C", "F#m")
    pub fn label(&self) -> &str {
        &self.label
    }

    /// L1-normalized profile (sums to 1)
    pub fn profile(&self) -> &PitchClassVector {
        &self.profile
    }

    /// Weight of each chord tone in the normalized profile
    ///
    /// Profiles are binary, so a frame identical to the profile has a dot
    /// product of `peak` with it; dividing by `peak` puts similarity scores on a
    /// [0, 1] scale with exact matches at 1.0.
    pub fn peak(&self) -> f32 {
        self.peak
    }
}

/// Immutable, ordered set of chord templates
#[derive(Debug, Clone)]
pub struct TemplateBank {
    templates: Vec<ChordTemplate>,
    version: String,
}

impl TemplateBank {
    /// Shared process-wide standard bank, built on first use
    pub fn standard() -> &'static TemplateBank {
        static STANDARD: OnceLock<TemplateBank> = OnceLock::new();
        STANDARD.get_or_init(TemplateBank::new_standard)
    }

    /// Build a fresh copy of the standard bank (12 major + 8 minor triads)
    pub fn new_standard() -> Self {
        let templates = STANDARD_TABLE
            .iter()
            .map(|&(root, quality)| ChordTemplate::triad(root, quality))
            .collect::<Vec<_>>();
        log::debug!(
            "Built standard template bank {} with {} templates",
            TEMPLATE_TABLE_VERSION,
            templates.len()
        );
        Self {
            templates,
            version: TEMPLATE_TABLE_VERSION.to_string(),
        }
    }

    /// Build a bank from `(label, raw profile)` pairs, in matching order
    ///
    /// Zero-sum profiles are skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError` for invalid profiles, duplicate labels, or when no
    /// usable template remains.
    pub fn from_profiles<I, S>(version: impl Into<String>, entries: I) -> Result<Self, AnalysisError>
    where
        I: IntoIterator<Item = (S, PitchClassVector)>,
        S: Into<String>,
    {
        let mut templates: Vec<ChordTemplate> = Vec::new();
        for (label, raw) in entries {
            let label = label.into();
            if templates.iter().any(|t| t.label == label) {
                return Err(AnalysisError::InvalidInput(format!(
                    "Duplicate template label '{}'",
                    label
                )));
            }
            match ChordTemplate::from_profile(label.clone(), &raw)? {
                Some(template) => templates.push(template),
                None => log::warn!("Skipping template '{}': profile sums to zero", label),
            }
        }

        if templates.is_empty() {
            return Err(AnalysisError::InvalidInput(
                "Template bank has no usable templates".to_string(),
            ));
        }

        Ok(Self {
            templates,
            version: version.into(),
        })
    }

    /// Look up a template by label; `None` if the label is unsupported
    pub fn get(&self, label: &str) -> Option<&ChordTemplate> {
        self.templates.iter().find(|t| t.label == label)
    }

    /// Iterate over templates in matching order
    pub fn iter(&self) -> impl Iterator<Item = &ChordTemplate> {
        self.templates.iter()
    }

    /// Number of templates
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// True if the bank holds no templates
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Version tag of this bank's table
    pub fn version(&self) -> &str {
        &self.version
    }
}

impl Default for TemplateBank {
    fn default() -> Self {
        Self::new_standard()
    }
}
