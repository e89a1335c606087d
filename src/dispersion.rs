//! Effective-index profiles for ring and bus waveguides.

use crate::constants::DEFAULT_EFFECTIVE_INDEX;
use crate::math::Scalar;

/// Effective refractive index of a waveguide across a wavelength sweep.
///
/// Material and geometric dispersion enter the model through a per-sample
/// index; a flat index is broadcast over the whole sweep.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub enum EffectiveIndex {
    /// Wavelength-independent index applied to every sample.
    Constant(Scalar),
    /// One index value per wavelength sample.
    Sampled(Vec<Scalar>),
}

impl EffectiveIndex {
    /// Index value at sweep position `sample`.
    ///
    /// Sampled profiles must be long enough; devices validate the length
    /// against their sweep at construction.
    #[must_use]
    pub fn value_at(&self, sample: usize) -> Scalar {
        match self {
            Self::Constant(n) => *n,
            Self::Sampled(values) => values[sample],
        }
    }

    /// Number of stored samples, or `None` for a broadcast constant.
    #[must_use]
    pub fn sample_count(&self) -> Option<usize> {
        match self {
            Self::Constant(_) => None,
            Self::Sampled(values) => Some(values.len()),
        }
    }

    /// Position and value of the first non-finite or non-positive entry, if any.
    #[must_use]
    pub fn first_invalid(&self) -> Option<(usize, Scalar)> {
        match self {
            Self::Constant(n) => (!(n.is_finite() && *n > 0.0)).then_some((0, *n)),
            Self::Sampled(values) => values
                .iter()
                .copied()
                .enumerate()
                .find(|(_, n)| !(n.is_finite() && *n > 0.0)),
        }
    }
}

impl Default for EffectiveIndex {
    fn default() -> Self {
        Self::Constant(DEFAULT_EFFECTIVE_INDEX)
    }
}

impl From<Scalar> for EffectiveIndex {
    fn from(value: Scalar) -> Self {
        Self::Constant(value)
    }
}

impl From<Vec<Scalar>> for EffectiveIndex {
    fn from(values: Vec<Scalar>) -> Self {
        Self::Sampled(values)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn constant_broadcasts_over_any_sample() {
        let n = EffectiveIndex::Constant(3.505);
        assert_relative_eq!(n.value_at(0), 3.505);
        assert_relative_eq!(n.value_at(9_999), 3.505);
        assert_eq!(n.sample_count(), None);
    }

    #[test]
    fn sampled_profile_reads_per_position() {
        let n = EffectiveIndex::from(vec![3.50, 3.51, 3.52]);
        assert_relative_eq!(n.value_at(1), 3.51);
        assert_eq!(n.sample_count(), Some(3));
    }

    #[test]
    fn first_invalid_flags_bad_entries() {
        assert_eq!(EffectiveIndex::Constant(0.0).first_invalid(), Some((0, 0.0)));
        let n = EffectiveIndex::from(vec![3.5, -1.0, 3.5]);
        assert_eq!(n.first_invalid(), Some((1, -1.0)));
        assert_eq!(EffectiveIndex::default().first_invalid(), None);
    }
}
