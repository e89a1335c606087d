//! Closed-form transfer model of a single add-drop microring resonator.
//!
//! The ring couples an input bus to a drop bus through two coupling regions
//! with self-coupling coefficients `r1` and `r2`. One roundtrip around the
//! ring retains the amplitude fraction `a` and accumulates the phase
//! `phi = 4 pi^2 n_eff R / lambda`. Thru and drop transmission follow the
//! standard coupled-mode closed forms
//!
//! ```text
//! T = (r1 - r2 a e^{i phi}) / (1 - r1 r2 a e^{i phi})
//! D = sqrt((1 - r1^2)(1 - r2^2) a) e^{i phi / 2} / (1 - r1 r2 a e^{i phi})
//! ```
//!
//! evaluated elementwise over the wavelength sweep.

use std::f64::consts::TAU;
use std::fmt;

use thiserror::Error;

use crate::constants::{
    vacuum_wavenumber, DEFAULT_RING_RADIUS, DEFAULT_ROUNDTRIP_LOSS, DEFAULT_SELF_COUPLING,
};
use crate::dispersion::EffectiveIndex;
use crate::math::{phasor, CScalar, Scalar};
use crate::rings::element::{OpticalTwoPort, PortId, TransferPair};
use crate::sweep::default_wavelength_sweep;

/// Physical description of one add-drop ring and its wavelength sweep.
///
/// Construct with [`RingParameters::new`] for the documented defaults, then
/// override individual fields as needed. [`AddDropRing::new`] validates the
/// final set.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct RingParameters {
    /// Self-coupling coefficient of the input-bus coupler, in `(0, 1]`.
    pub self_coupling_in: Scalar,
    /// Self-coupling coefficient of the drop-bus coupler, in `(0, 1]`.
    pub self_coupling_out: Scalar,
    /// Field amplitude retained after one roundtrip, in `(0, 1]`.
    pub roundtrip_loss: Scalar,
    /// Ring radius in meters.
    pub radius_m: Scalar,
    /// Effective index of the ring waveguide.
    pub effective_index: EffectiveIndex,
    /// Wavelength samples in meters, ordered along the sweep.
    pub wavelengths_m: Vec<Scalar>,
    /// Field launched into the input waveguide.
    pub input_field: CScalar,
    /// Port receiving the thru spectrum.
    pub port_thru: PortId,
    /// Port receiving the drop spectrum.
    pub port_drop: PortId,
}

impl RingParameters {
    /// Parameters for the reference ring: `r1 = r2 = a = 0.9816`,
    /// `R = 8 um`, `n_eff = 3.505`, 10 000 samples spanning 1558 nm to
    /// 1560 nm, unit input field.
    #[must_use]
    pub fn new(port_thru: PortId, port_drop: PortId) -> Self {
        Self {
            self_coupling_in: DEFAULT_SELF_COUPLING,
            self_coupling_out: DEFAULT_SELF_COUPLING,
            roundtrip_loss: DEFAULT_ROUNDTRIP_LOSS,
            radius_m: DEFAULT_RING_RADIUS,
            effective_index: EffectiveIndex::default(),
            wavelengths_m: default_wavelength_sweep(),
            input_field: CScalar::new(1.0, 0.0),
            port_thru,
            port_drop,
        }
    }
}

/// Errors raised while validating [`RingParameters`].
#[derive(Debug, Error, PartialEq)]
pub enum RingError {
    /// A coupling or loss coefficient lies outside `(0, 1]`.
    #[error("{name} must lie in (0, 1], got {value}")]
    CoefficientOutOfRange {
        /// Name of the offending coefficient.
        name: &'static str,
        /// Offending value.
        value: Scalar,
    },
    /// The ring radius is zero, negative, or non-finite.
    #[error("ring radius must be positive and finite, got {radius_m} m")]
    InvalidRadius {
        /// Offending radius in meters.
        radius_m: Scalar,
    },
    /// The wavelength sweep holds no samples.
    #[error("wavelength sweep must hold at least one sample")]
    EmptySweep,
    /// A wavelength sample is zero, negative, or non-finite.
    #[error("wavelength must be positive and finite, got {wavelength_m} m at sample {sample}")]
    InvalidWavelength {
        /// Position of the offending sample.
        sample: usize,
        /// Offending wavelength in meters.
        wavelength_m: Scalar,
    },
    /// A sampled effective-index profile disagrees with the sweep length.
    #[error("effective index holds {got} samples but the sweep holds {expected}")]
    IndexLengthMismatch {
        /// Sweep length.
        expected: usize,
        /// Profile length.
        got: usize,
    },
    /// An effective-index entry is zero, negative, or non-finite.
    #[error("effective index must be positive and finite, got {value} at sample {sample}")]
    InvalidIndex {
        /// Position of the offending entry.
        sample: usize,
        /// Offending index value.
        value: Scalar,
    },
    /// Thru and drop map to the same port.
    #[error("thru and drop ports must differ, both set to {port}")]
    PortConflict {
        /// The doubly assigned port.
        port: PortId,
    },
}

fn check_coefficient(name: &'static str, value: Scalar) -> Result<(), RingError> {
    if value.is_finite() && value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(RingError::CoefficientOutOfRange { name, value })
    }
}

/// A validated add-drop ring with closed-form thru and drop transfer
/// functions.
#[derive(Debug, Clone, PartialEq)]
pub struct AddDropRing {
    params: RingParameters,
}

impl AddDropRing {
    /// Validates `params` and builds the ring model.
    ///
    /// # Errors
    ///
    /// Returns a [`RingError`] when a coefficient leaves `(0, 1]`, the radius
    /// or a wavelength is not positive and finite, the sweep is empty, a
    /// sampled index profile disagrees with the sweep length, an index entry
    /// is not positive and finite, or both spectra map to one port.
    pub fn new(params: RingParameters) -> Result<Self, RingError> {
        check_coefficient("self-coupling r1", params.self_coupling_in)?;
        check_coefficient("self-coupling r2", params.self_coupling_out)?;
        check_coefficient("roundtrip loss a", params.roundtrip_loss)?;
        if !(params.radius_m.is_finite() && params.radius_m > 0.0) {
            return Err(RingError::InvalidRadius {
                radius_m: params.radius_m,
            });
        }
        if params.wavelengths_m.is_empty() {
            return Err(RingError::EmptySweep);
        }
        for (sample, &wavelength_m) in params.wavelengths_m.iter().enumerate() {
            if !(wavelength_m.is_finite() && wavelength_m > 0.0) {
                return Err(RingError::InvalidWavelength {
                    sample,
                    wavelength_m,
                });
            }
        }
        let expected = params.wavelengths_m.len();
        if let Some(got) = params.effective_index.sample_count() {
            if got != expected {
                return Err(RingError::IndexLengthMismatch { expected, got });
            }
        }
        if let Some((sample, value)) = params.effective_index.first_invalid() {
            return Err(RingError::InvalidIndex { sample, value });
        }
        if params.port_thru == params.port_drop {
            return Err(RingError::PortConflict {
                port: params.port_thru,
            });
        }
        Ok(Self { params })
    }

    /// Validated parameter set backing the model.
    #[must_use]
    pub fn params(&self) -> &RingParameters {
        &self.params
    }

    /// Wavelength samples of the sweep in meters.
    #[must_use]
    pub fn wavelengths_m(&self) -> &[Scalar] {
        &self.params.wavelengths_m
    }

    /// Number of wavelength samples in the sweep.
    #[must_use]
    pub fn sample_count(&self) -> usize {
        self.params.wavelengths_m.len()
    }

    /// Self-coupling coefficient of the drop-bus coupler.
    #[must_use]
    pub fn self_coupling_out(&self) -> Scalar {
        self.params.self_coupling_out
    }

    /// Phase accumulated over one roundtrip at sweep position `sample`.
    #[must_use]
    pub fn roundtrip_phase(&self, sample: usize) -> Scalar {
        let circumference_m = TAU * self.params.radius_m;
        let index = self.params.effective_index.value_at(sample);
        index * vacuum_wavenumber(self.params.wavelengths_m[sample]) * circumference_m
    }

    /// Thru and drop transfer at sweep position `sample`.
    #[must_use]
    pub fn transfer_at(&self, sample: usize) -> (CScalar, CScalar) {
        let p = &self.params;
        let phase = self.roundtrip_phase(sample);
        let roundtrip = p.roundtrip_loss * phasor(phase);
        let denominator =
            CScalar::new(1.0, 0.0) - p.self_coupling_in * p.self_coupling_out * roundtrip;
        let thru = (CScalar::new(p.self_coupling_in, 0.0) - p.self_coupling_out * roundtrip)
            / denominator;
        let cross = ((1.0 - p.self_coupling_in.powi(2))
            * (1.0 - p.self_coupling_out.powi(2))
            * p.roundtrip_loss)
            .sqrt();
        let drop = cross * phasor(0.5 * phase) / denominator;
        (thru, drop)
    }
}

impl OpticalTwoPort for AddDropRing {
    fn port_thru(&self) -> PortId {
        self.params.port_thru
    }

    fn port_drop(&self) -> PortId {
        self.params.port_drop
    }

    fn transfer_pair(&self) -> TransferPair {
        let samples = self.sample_count();
        let mut thru = Vec::with_capacity(samples);
        let mut drop = Vec::with_capacity(samples);
        for sample in 0..samples {
            let (t, d) = self.transfer_at(sample);
            thru.push(t);
            drop.push(d);
        }
        TransferPair { thru, drop }
    }
}

impl fmt::Display for AddDropRing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = &self.params;
        write!(
            f,
            "add-drop ring: R = {:.3e} m, r1 = {}, r2 = {}, a = {}, {} wavelength samples",
            p.radius_m,
            p.self_coupling_in,
            p.self_coupling_out,
            p.roundtrip_loss,
            p.wavelengths_m.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::{FRAC_1_SQRT_2, PI};

    use approx::assert_relative_eq;

    use super::*;
    use crate::math::wrap_phase;
    use crate::sweep::mag;

    fn reference_ring() -> AddDropRing {
        AddDropRing::new(RingParameters::new(8, 2)).unwrap()
    }

    fn argmax(values: &[Scalar]) -> usize {
        let mut best = 0;
        for (sample, &value) in values.iter().enumerate() {
            if value > values[best] {
                best = sample;
            }
        }
        best
    }

    #[test]
    fn defaults_match_reference_ring() {
        let p = RingParameters::new(8, 2);
        assert_relative_eq!(p.self_coupling_in, 0.9816);
        assert_relative_eq!(p.self_coupling_out, 0.9816);
        assert_relative_eq!(p.roundtrip_loss, 0.9816);
        assert_relative_eq!(p.radius_m, 8000.0e-9);
        assert_eq!(p.wavelengths_m.len(), 10_000);
        assert_relative_eq!(p.wavelengths_m[0], 1558.0e-9);
        assert_relative_eq!(p.wavelengths_m[9_999], 1560.0e-9, max_relative = 1e-12);
    }

    #[test]
    fn rejects_out_of_range_coefficients() {
        let mut p = RingParameters::new(8, 2);
        p.self_coupling_in = 0.0;
        assert!(matches!(
            AddDropRing::new(p),
            Err(RingError::CoefficientOutOfRange { name: "self-coupling r1", .. })
        ));

        let mut p = RingParameters::new(8, 2);
        p.roundtrip_loss = 1.2;
        assert!(matches!(
            AddDropRing::new(p),
            Err(RingError::CoefficientOutOfRange { name: "roundtrip loss a", .. })
        ));
    }

    #[test]
    fn rejects_bad_geometry_and_sweep() {
        let mut p = RingParameters::new(8, 2);
        p.radius_m = -1.0e-6;
        assert!(matches!(AddDropRing::new(p), Err(RingError::InvalidRadius { .. })));

        let mut p = RingParameters::new(8, 2);
        p.wavelengths_m = Vec::new();
        assert_eq!(AddDropRing::new(p), Err(RingError::EmptySweep));

        let mut p = RingParameters::new(8, 2);
        p.wavelengths_m[17] = 0.0;
        assert!(matches!(
            AddDropRing::new(p),
            Err(RingError::InvalidWavelength { sample: 17, .. })
        ));
    }

    #[test]
    fn rejects_index_profile_mismatch() {
        let mut p = RingParameters::new(8, 2);
        p.effective_index = EffectiveIndex::from(vec![3.505; 42]);
        assert_eq!(
            AddDropRing::new(p),
            Err(RingError::IndexLengthMismatch {
                expected: 10_000,
                got: 42
            })
        );

        let mut p = RingParameters::new(8, 2);
        p.effective_index = EffectiveIndex::Constant(-3.505);
        assert!(matches!(AddDropRing::new(p), Err(RingError::InvalidIndex { .. })));
    }

    #[test]
    fn rejects_port_conflict() {
        let p = RingParameters::new(5, 5);
        assert_eq!(AddDropRing::new(p), Err(RingError::PortConflict { port: 5 }));
    }

    #[test]
    fn drop_peak_sits_at_half_phase_resonance() {
        let ring = reference_ring();
        let pair = ring.transfer_pair();
        let drop_mag = mag(&pair.drop);
        let peak = argmax(&drop_mag);

        // Resonance leaves the half phase at pi modulo a full turn.
        let half_phase = wrap_phase(0.5 * ring.roundtrip_phase(peak));
        assert_relative_eq!(half_phase, PI, max_relative = 1e-2);

        // Reference coefficients give |T| = 1/3 and |D| = 2/3 on resonance.
        let (thru, drop) = ring.transfer_at(peak);
        assert_relative_eq!(drop.norm(), 2.0 / 3.0, max_relative = 1e-2);
        assert_relative_eq!(thru.norm(), 1.0 / 3.0, max_relative = 1e-2);

        // Far from resonance the drop response collapses.
        let edge = drop_mag[0].max(drop_mag[9_999]);
        assert!(edge < 0.15 * drop_mag[peak]);
    }

    #[test]
    fn transfer_is_passive_over_the_sweep() {
        let ring = reference_ring();
        let pair = ring.transfer_pair();
        for sample in 0..pair.len() {
            let total = pair.thru[sample].norm_sqr() + pair.drop[sample].norm_sqr();
            assert!(total <= 1.0 + 1e-12, "sample {sample} radiates: {total}");
        }
    }

    #[test]
    fn lossless_ring_conserves_energy() {
        let mut p = RingParameters::new(8, 2);
        p.roundtrip_loss = 1.0;
        p.wavelengths_m = crate::sweep::linspace(1558.0e-9, 1560.0e-9, 257);
        let ring = AddDropRing::new(p).unwrap();
        let pair = ring.transfer_pair();
        for sample in 0..pair.len() {
            let total = pair.thru[sample].norm_sqr() + pair.drop[sample].norm_sqr();
            assert_relative_eq!(total, 1.0, max_relative = 1e-9);
        }
    }

    #[test]
    fn propagate_splits_by_three_decibels() {
        let ring = reference_ring();
        let pair = ring.transfer_pair();
        let ports = ring.propagate(CScalar::new(0.0, 2.0)).unwrap();

        assert_eq!(ports.len(), 2);
        let scale = CScalar::new(0.0, 2.0) * FRAC_1_SQRT_2;
        let sample = 4_321;
        assert_relative_eq!(ports[&8][sample].re, (pair.thru[sample] * scale).re, epsilon = 1e-12);
        assert_relative_eq!(ports[&8][sample].im, (pair.thru[sample] * scale).im, epsilon = 1e-12);
        assert_relative_eq!(ports[&2][sample].re, (pair.drop[sample] * scale).re, epsilon = 1e-12);
        assert_relative_eq!(ports[&2][sample].im, (pair.drop[sample] * scale).im, epsilon = 1e-12);
    }

    #[test]
    fn propagate_is_linear_in_the_input_field() {
        let ring = reference_ring();
        let gain = CScalar::new(-1.5, 0.25);

        let unit_ports = ring.propagate(CScalar::new(1.0, 0.0)).unwrap();
        let scaled_ports = ring.propagate(gain).unwrap();
        for port in [8, 2] {
            for sample in [0, 99, 9_999] {
                let expected = unit_ports[&port][sample] * gain;
                let got = scaled_ports[&port][sample];
                assert_relative_eq!(got.re, expected.re, epsilon = 1e-12);
                assert_relative_eq!(got.im, expected.im, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn propagate_rejects_non_finite_field() {
        let ring = reference_ring();
        assert!(ring.propagate(CScalar::new(1.0, f64::INFINITY)).is_err());
    }
}
