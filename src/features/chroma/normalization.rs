//! Chroma normalization strategies

use super::{PitchClassVector, PITCH_CLASSES};

/// L1-normalize a chroma vector so its entries sum to 1
///
/// `epsilon` is added to the sum before dividing, so a silent (all-zero) frame
/// comes back as all zeros instead of NaN.
///
/// # Arguments
///
/// * `chroma` - 12-element chroma vector
/// * `epsilon` - Small constant added to the denominator (e.g., 1e-8)
///
/// # Returns
///
/// L1-normalized chroma vector
pub fn l1_normalize(chroma: &PitchClassVector, epsilon: f32) -> PitchClassVector {
    let sum: f32 = chroma.iter().sum();
    let denom = sum + epsilon;
    let mut out = [0.0f32; PITCH_CLASSES];
    for (o, &x) in out.iter_mut().zip(chroma.iter()) {
        *o = x / denom;
    }
    out
}

/// L1-normalize a template profile without epsilon
///
/// Returns `None` when the profile sums to zero (such templates never match).
pub fn l1_normalize_profile(profile: &PitchClassVector) -> Option<PitchClassVector> {
    let sum: f32 = profile.iter().sum();
    if sum <= 0.0 {
        return None;
    }
    let mut out = [0.0f32; PITCH_CLASSES];
    for (o, &x) in out.iter_mut().zip(profile.iter()) {
        *o = x / sum;
    }
    Some(out)
}

/// Compute dot product between two chroma vectors
pub fn dot_product(a: &PitchClassVector, b: &PitchClassVector) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_l1_normalize_sums_to_one() {
        let chroma = [1.0, 0.0, 0.0, 0.0, 2.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0];
        let norm = l1_normalize(&chroma, 1e-8);
        let sum: f32 = norm.iter().sum();
        assert!((sum - 1.0).abs() < 1e-6);
        assert!((norm[4] - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_l1_normalize_silent_frame() {
        let norm = l1_normalize(&[0.0; 12], 1e-8);
        assert!(norm.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_profile_zero_sum_is_none() {
        assert!(l1_normalize_profile(&[0.0; 12]).is_none());
    }

    #[test]
    fn test_profile_normalization() {
        let mut profile = [0.0f32; 12];
        profile[0] = 1.0;
        profile[4] = 1.0;
        profile[7] = 1.0;
        let norm = l1_normalize_profile(&profile).unwrap();
        assert!((norm[7] - 1.0 / 3.0).abs() < 1e-6);
        assert_eq!(norm[1], 0.0);
    }

    #[test]
    fn test_dot_product() {
        let mut a = [0.0f32; 12];
        let mut b = [0.0f32; 12];
        a[0] = 1.0;
        a[1] = 2.0;
        a[2] = 3.0;
        b[0] = 4.0;
        b[1] = 5.0;
        b[2] = 6.0;
        assert_eq!(dot_product(&a, &b), 32.0); // 1*4 + 2*5 + 3*6
    }
}
