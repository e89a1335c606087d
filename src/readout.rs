//! Balanced-photodetector readout of resonance lines.
//!
//! Consumes the port intensity spectra `|E|^2` produced downstream of a ring
//! or cascade and reduces them to per-line readings, either at detected
//! local maxima of the drop intensity ([`detect_resonance_peaks`]) or at the
//! samples nearest a list of design wavelengths
//! ([`align_to_design_wavelengths`]). The balanced reading of a line is its
//! drop intensity minus its thru intensity.

use std::ops::RangeInclusive;

use thiserror::Error;

use crate::math::Scalar;

/// Per-line readings extracted from a pair of intensity spectra.
///
/// All vectors share one length, one entry per resonance line.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct ResonanceReadout {
    /// Wavelength of each line, in meters.
    pub wavelengths_m: Vec<Scalar>,
    /// Sweep position of each line.
    pub samples: Vec<usize>,
    /// Thru intensity at each line.
    pub thru: Vec<Scalar>,
    /// Drop intensity at each line.
    pub drop: Vec<Scalar>,
    /// Balanced-photodetector reading, drop minus thru, at each line.
    pub balanced: Vec<Scalar>,
}

impl ResonanceReadout {
    /// Number of resonance lines in the readout.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True when no lines were found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Errors raised while reducing intensity spectra to line readings.
#[derive(Debug, Error, PartialEq)]
pub enum ReadoutError {
    /// The wavelength axis holds no samples.
    #[error("spectra must hold at least one sample")]
    EmptySpectrum,
    /// The spectra and wavelength axis disagree in length.
    #[error("spectra must share the axis length: axis {wavelengths}, thru {thru}, drop {drop}")]
    ShapeMismatch {
        /// Length of the wavelength axis.
        wavelengths: usize,
        /// Length of the thru intensity spectrum.
        thru: usize,
        /// Length of the drop intensity spectrum.
        drop: usize,
    },
    /// The thru and drop spectra disagree in length.
    #[error("thru holds {thru} samples but drop holds {drop}")]
    PairMismatch {
        /// Length of the thru intensity spectrum.
        thru: usize,
        /// Length of the drop intensity spectrum.
        drop: usize,
    },
    /// The design wavelength list disagrees with the expected line count.
    #[error("expected {expected} design wavelengths, got {got}")]
    DesignLineCount {
        /// Expected number of lines.
        expected: usize,
        /// Number of design wavelengths supplied.
        got: usize,
    },
    /// A design wavelength is zero, negative, or non-finite.
    #[error("design wavelength must be positive and finite, got {wavelength_m} m at position {position}")]
    InvalidDesignWavelength {
        /// Position in the design list.
        position: usize,
        /// Offending wavelength in meters.
        wavelength_m: Scalar,
    },
}

fn check_shapes(
    wavelengths_m: &[Scalar],
    thru_intensity: &[Scalar],
    drop_intensity: &[Scalar],
) -> Result<(), ReadoutError> {
    if wavelengths_m.is_empty() {
        return Err(ReadoutError::EmptySpectrum);
    }
    if thru_intensity.len() != wavelengths_m.len() || drop_intensity.len() != wavelengths_m.len() {
        return Err(ReadoutError::ShapeMismatch {
            wavelengths: wavelengths_m.len(),
            thru: thru_intensity.len(),
            drop: drop_intensity.len(),
        });
    }
    Ok(())
}

fn collect_readout(
    wavelengths_m: &[Scalar],
    thru_intensity: &[Scalar],
    drop_intensity: &[Scalar],
    samples: Vec<usize>,
) -> ResonanceReadout {
    let wavelengths = samples.iter().map(|&s| wavelengths_m[s]).collect();
    let thru = samples.iter().map(|&s| thru_intensity[s]).collect();
    let drop = samples.iter().map(|&s| drop_intensity[s]).collect();
    let balanced = samples
        .iter()
        .map(|&s| drop_intensity[s] - thru_intensity[s])
        .collect();
    ResonanceReadout {
        wavelengths_m: wavelengths,
        samples,
        thru,
        drop,
        balanced,
    }
}

/// Reads out the strict local maxima of the drop intensity whose height lies
/// inside `height`.
///
/// An empty readout is a valid outcome when no maximum falls in the band.
///
/// # Errors
///
/// Returns a [`ReadoutError`] when the axis is empty or the spectra disagree
/// with it in length.
pub fn detect_resonance_peaks(
    wavelengths_m: &[Scalar],
    thru_intensity: &[Scalar],
    drop_intensity: &[Scalar],
    height: RangeInclusive<Scalar>,
) -> Result<ResonanceReadout, ReadoutError> {
    check_shapes(wavelengths_m, thru_intensity, drop_intensity)?;
    let mut samples = Vec::new();
    for sample in 1..drop_intensity.len().saturating_sub(1) {
        let value = drop_intensity[sample];
        if drop_intensity[sample - 1] < value
            && value > drop_intensity[sample + 1]
            && height.contains(&value)
        {
            samples.push(sample);
        }
    }
    Ok(collect_readout(
        wavelengths_m,
        thru_intensity,
        drop_intensity,
        samples,
    ))
}

/// Reads out the samples nearest each design wavelength.
///
/// `expected_lines` pins the design list length, one line per ring driven by
/// its own laser. Ties between equally near samples resolve to the earlier
/// sample.
///
/// # Errors
///
/// Returns a [`ReadoutError`] when the axis is empty, the spectra disagree
/// with it in length, the design list does not hold `expected_lines`
/// entries, or a design wavelength is not positive and finite.
pub fn align_to_design_wavelengths(
    wavelengths_m: &[Scalar],
    thru_intensity: &[Scalar],
    drop_intensity: &[Scalar],
    design_wavelengths_m: &[Scalar],
    expected_lines: usize,
) -> Result<ResonanceReadout, ReadoutError> {
    check_shapes(wavelengths_m, thru_intensity, drop_intensity)?;
    if design_wavelengths_m.len() != expected_lines {
        return Err(ReadoutError::DesignLineCount {
            expected: expected_lines,
            got: design_wavelengths_m.len(),
        });
    }
    for (position, &wavelength_m) in design_wavelengths_m.iter().enumerate() {
        if !(wavelength_m.is_finite() && wavelength_m > 0.0) {
            return Err(ReadoutError::InvalidDesignWavelength {
                position,
                wavelength_m,
            });
        }
    }
    let mut samples = Vec::with_capacity(design_wavelengths_m.len());
    for &design_m in design_wavelengths_m {
        let mut best = 0;
        let mut best_gap = Scalar::INFINITY;
        for (sample, &wavelength_m) in wavelengths_m.iter().enumerate() {
            let gap = (wavelength_m - design_m).abs();
            if gap < best_gap {
                best_gap = gap;
                best = sample;
            }
        }
        samples.push(best);
    }
    Ok(collect_readout(
        wavelengths_m,
        thru_intensity,
        drop_intensity,
        samples,
    ))
}

/// Balanced-photodetector spectrum, drop intensity minus thru intensity at
/// every sample.
///
/// # Errors
///
/// Returns [`ReadoutError::PairMismatch`] when the spectra disagree in
/// length.
pub fn balanced_difference(
    thru_intensity: &[Scalar],
    drop_intensity: &[Scalar],
) -> Result<Vec<Scalar>, ReadoutError> {
    if thru_intensity.len() != drop_intensity.len() {
        return Err(ReadoutError::PairMismatch {
            thru: thru_intensity.len(),
            drop: drop_intensity.len(),
        });
    }
    Ok(thru_intensity
        .iter()
        .zip(drop_intensity)
        .map(|(t, d)| d - t)
        .collect())
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::rings::{AddDropRing, OpticalTwoPort, RingParameters};
    use crate::sweep::intensity;

    #[test]
    fn detects_the_reference_resonance_line() {
        let ring = AddDropRing::new(RingParameters::new(8, 2)).unwrap();
        let pair = ring.transfer_pair();
        let thru = intensity(&pair.thru);
        let drop = intensity(&pair.drop);

        let readout =
            detect_resonance_peaks(ring.wavelengths_m(), &thru, &drop, 0.3..=1.0).unwrap();
        assert_eq!(readout.len(), 1);
        let line = readout.wavelengths_m[0];
        assert!(
            (1559.0e-9..=1559.2e-9).contains(&line),
            "line at {line} m"
        );
        assert_relative_eq!(readout.drop[0], 4.0 / 9.0, max_relative = 2e-2);
        assert_relative_eq!(readout.balanced[0], 1.0 / 3.0, max_relative = 2e-2);
    }

    #[test]
    fn height_band_filters_out_weak_peaks() {
        let ring = AddDropRing::new(RingParameters::new(8, 2)).unwrap();
        let pair = ring.transfer_pair();
        let thru = intensity(&pair.thru);
        let drop = intensity(&pair.drop);

        let readout =
            detect_resonance_peaks(ring.wavelengths_m(), &thru, &drop, 0.5..=1.0).unwrap();
        assert!(readout.is_empty());
    }

    #[test]
    fn detect_rejects_mismatched_shapes() {
        let err = detect_resonance_peaks(&[1.0e-6, 2.0e-6], &[0.1], &[0.2, 0.3], 0.0..=1.0)
            .unwrap_err();
        assert_eq!(
            err,
            ReadoutError::ShapeMismatch {
                wavelengths: 2,
                thru: 1,
                drop: 2
            }
        );

        let err = detect_resonance_peaks(&[], &[], &[], 0.0..=1.0).unwrap_err();
        assert_eq!(err, ReadoutError::EmptySpectrum);
    }

    #[test]
    fn alignment_picks_the_nearest_sample() {
        let axis = [1.0e-6, 2.0e-6, 3.0e-6, 4.0e-6];
        let thru = [10.0, 20.0, 30.0, 40.0];
        let drop = [1.0, 2.0, 3.0, 4.0];

        let readout =
            align_to_design_wavelengths(&axis, &thru, &drop, &[2.2e-6, 3.9e-6], 2).unwrap();
        assert_eq!(readout.samples, vec![1, 3]);
        assert_relative_eq!(readout.thru[0], 20.0);
        assert_relative_eq!(readout.balanced[0], -18.0);
        assert_relative_eq!(readout.balanced[1], -36.0);
    }

    #[test]
    fn alignment_enforces_the_design_line_count() {
        let axis = [1.0e-6, 2.0e-6];
        let flat = [0.0, 0.0];
        let err = align_to_design_wavelengths(&axis, &flat, &flat, &[1.0e-6], 3).unwrap_err();
        assert_eq!(
            err,
            ReadoutError::DesignLineCount {
                expected: 3,
                got: 1
            }
        );
    }

    #[test]
    fn alignment_rejects_bad_design_wavelengths() {
        let axis = [1.0e-6, 2.0e-6];
        let flat = [0.0, 0.0];
        let err =
            align_to_design_wavelengths(&axis, &flat, &flat, &[1.0e-6, -2.0e-6], 2).unwrap_err();
        assert!(matches!(
            err,
            ReadoutError::InvalidDesignWavelength { position: 1, .. }
        ));
    }

    #[test]
    fn balanced_difference_subtracts_thru_from_drop() {
        let delta = balanced_difference(&[1.0, 2.0], &[5.0, 1.0]).unwrap();
        assert_eq!(delta, vec![4.0, -1.0]);

        let err = balanced_difference(&[1.0], &[1.0, 2.0]).unwrap_err();
        assert_eq!(err, ReadoutError::PairMismatch { thru: 1, drop: 2 });
    }
}
