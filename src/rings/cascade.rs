//! Scattering synthesis for a linear chain of add-drop rings.
//!
//! Rings share a thru bus and a drop bus. Light reaching the network thru
//! port passes every ring's thru coupler in series, picking up one
//! inter-ring bus phase per hop. Light reaching the network drop port left
//! the bus at some ring `k` after passing rings `0..k` forward, then routed
//! back along the drop bus through the same rings, so each drop term carries
//! the prefix product of the earlier rings' thru transfer, their drop-bus
//! self-coupling, and twice the hop phase, with alternating sign from the
//! coupler crossings.

use std::fmt;

use thiserror::Error;

use crate::constants::vacuum_wavenumber;
use crate::math::{phasor, CScalar, Scalar};
use crate::rings::element::{OpticalTwoPort, PortId, TransferPair};
use crate::rings::resonator::{AddDropRing, RingError, RingParameters};

/// Physical description of a ring cascade.
///
/// Rings are listed in physical order along the thru bus. Construct with
/// [`CascadeParameters::new`] for the documented defaults (adjacent rings,
/// interconnect index matching the ring waveguide, unit input field), then
/// override fields as needed.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct CascadeParameters {
    /// Per-ring parameters, ordered along the thru bus.
    pub rings: Vec<RingParameters>,
    /// Refractive index of the inter-ring bus waveguides.
    pub interconnect_index: Scalar,
    /// Spacing between adjacent rings along the bus, in meters.
    pub spacing_m: Scalar,
    /// Field launched into the network input waveguide.
    pub input_field: CScalar,
    /// Port receiving the network thru spectrum.
    pub port_thru: PortId,
    /// Port receiving the network drop spectrum.
    pub port_drop: PortId,
}

impl CascadeParameters {
    /// Parameters for a cascade of `rings` with zero inter-ring spacing, an
    /// interconnect index of 3.505 and a unit input field.
    #[must_use]
    pub fn new(port_thru: PortId, port_drop: PortId, rings: Vec<RingParameters>) -> Self {
        Self {
            rings,
            interconnect_index: crate::constants::DEFAULT_EFFECTIVE_INDEX,
            spacing_m: 0.0,
            input_field: CScalar::new(1.0, 0.0),
            port_thru,
            port_drop,
        }
    }
}

/// Errors raised while validating [`CascadeParameters`].
#[derive(Debug, Error, PartialEq)]
pub enum CascadeError {
    /// The cascade holds no rings.
    #[error("cascade needs at least one ring")]
    NoRings,
    /// A ring failed its own validation.
    #[error("ring {ring}: {source}")]
    Ring {
        /// Position of the offending ring along the bus.
        ring: usize,
        /// Underlying ring validation error.
        #[source]
        source: RingError,
    },
    /// A ring's wavelength sweep disagrees with ring 0's in length.
    #[error("ring {ring} holds {got} wavelength samples but ring 0 holds {expected}")]
    SamplingMismatch {
        /// Position of the offending ring along the bus.
        ring: usize,
        /// Sample count of ring 0.
        expected: usize,
        /// Sample count of the offending ring.
        got: usize,
    },
    /// The interconnect index is zero, negative, or non-finite.
    #[error("interconnect index must be positive and finite, got {value}")]
    InvalidInterconnectIndex {
        /// Offending index value.
        value: Scalar,
    },
    /// The inter-ring spacing is negative or non-finite.
    #[error("ring spacing must be non-negative and finite, got {spacing_m} m")]
    InvalidSpacing {
        /// Offending spacing in meters.
        spacing_m: Scalar,
    },
    /// Thru and drop map to the same port.
    #[error("thru and drop ports must differ, both set to {port}")]
    PortConflict {
        /// The doubly assigned port.
        port: PortId,
    },
}

/// A validated linear chain of add-drop rings with aggregate thru and drop
/// transfer functions.
#[derive(Debug, Clone, PartialEq)]
pub struct RingCascade {
    rings: Vec<AddDropRing>,
    interconnect_index: Scalar,
    spacing_m: Scalar,
    input_field: CScalar,
    port_thru: PortId,
    port_drop: PortId,
}

impl RingCascade {
    /// Validates `params` and builds the cascade model.
    ///
    /// # Errors
    ///
    /// Returns a [`CascadeError`] when the cascade is empty, a ring fails its
    /// own validation, the rings disagree on sweep length, the interconnect
    /// index is not positive and finite, the spacing is negative or
    /// non-finite, or both spectra map to one port.
    pub fn new(params: CascadeParameters) -> Result<Self, CascadeError> {
        if params.rings.is_empty() {
            return Err(CascadeError::NoRings);
        }
        if !(params.interconnect_index.is_finite() && params.interconnect_index > 0.0) {
            return Err(CascadeError::InvalidInterconnectIndex {
                value: params.interconnect_index,
            });
        }
        if !(params.spacing_m.is_finite() && params.spacing_m >= 0.0) {
            return Err(CascadeError::InvalidSpacing {
                spacing_m: params.spacing_m,
            });
        }
        if params.port_thru == params.port_drop {
            return Err(CascadeError::PortConflict {
                port: params.port_thru,
            });
        }
        let mut rings = Vec::with_capacity(params.rings.len());
        for (position, ring_params) in params.rings.into_iter().enumerate() {
            let ring = AddDropRing::new(ring_params).map_err(|source| CascadeError::Ring {
                ring: position,
                source,
            })?;
            rings.push(ring);
        }
        let expected = rings[0].sample_count();
        for (position, ring) in rings.iter().enumerate().skip(1) {
            let got = ring.sample_count();
            if got != expected {
                return Err(CascadeError::SamplingMismatch {
                    ring: position,
                    expected,
                    got,
                });
            }
        }
        Ok(Self {
            rings,
            interconnect_index: params.interconnect_index,
            spacing_m: params.spacing_m,
            input_field: params.input_field,
            port_thru: params.port_thru,
            port_drop: params.port_drop,
        })
    }

    /// Rings in physical order along the thru bus.
    #[must_use]
    pub fn rings(&self) -> &[AddDropRing] {
        &self.rings
    }

    /// Number of rings in the chain.
    #[must_use]
    pub fn ring_count(&self) -> usize {
        self.rings.len()
    }

    /// Wavelength samples of the shared sweep, taken from ring 0.
    #[must_use]
    pub fn wavelengths_m(&self) -> &[Scalar] {
        self.rings[0].wavelengths_m()
    }

    /// Number of wavelength samples in the shared sweep.
    #[must_use]
    pub fn sample_count(&self) -> usize {
        self.rings[0].sample_count()
    }

    /// Spacing between adjacent rings along the bus, in meters.
    #[must_use]
    pub fn spacing_m(&self) -> Scalar {
        self.spacing_m
    }

    /// Refractive index of the inter-ring bus waveguides.
    #[must_use]
    pub fn interconnect_index(&self) -> Scalar {
        self.interconnect_index
    }

    /// Nominal launch field carried by the parameter set.
    #[must_use]
    pub fn input_field(&self) -> CScalar {
        self.input_field
    }

    /// Representative wavelength for the inter-ring phase, the mean over
    /// every ring's wavelength samples.
    #[must_use]
    pub fn mean_spacing_wavelength_m(&self) -> Scalar {
        let total: Scalar = self
            .rings
            .iter()
            .map(|ring| ring.wavelengths_m().iter().sum::<Scalar>())
            .sum();
        let samples = self.ring_count() * self.sample_count();
        total / samples as Scalar
    }

    /// Phase accumulated over one inter-ring hop on either bus.
    #[must_use]
    pub fn bus_phase(&self) -> Scalar {
        vacuum_wavenumber(self.mean_spacing_wavelength_m()) * self.interconnect_index
            * self.spacing_m
    }
}

impl OpticalTwoPort for RingCascade {
    fn port_thru(&self) -> PortId {
        self.port_thru
    }

    fn port_drop(&self) -> PortId {
        self.port_drop
    }

    /// Aggregate network transfer over the shared sweep.
    ///
    /// Thru is the running product of `T_k e^{i theta}` over the chain. Drop
    /// sums one term per ring `k`: `(-1)^(k+1) D_k` times the prefix product
    /// over earlier rings `m` of `r2_m T_m e^{i (m+1) 2 theta}`.
    fn transfer_pair(&self) -> TransferPair {
        let samples = self.sample_count();
        let pairs: Vec<TransferPair> = self
            .rings
            .iter()
            .map(OpticalTwoPort::transfer_pair)
            .collect();
        let theta = self.bus_phase();
        let hop = phasor(theta);
        let bounce: Vec<CScalar> = self
            .rings
            .iter()
            .enumerate()
            .map(|(k, ring)| {
                ring.self_coupling_out() * phasor(2.0 * (k + 1) as Scalar * theta)
            })
            .collect();

        let mut thru = Vec::with_capacity(samples);
        let mut drop = Vec::with_capacity(samples);
        for sample in 0..samples {
            let mut running_thru = CScalar::new(1.0, 0.0);
            let mut prefix = CScalar::new(1.0, 0.0);
            let mut network_drop = CScalar::new(0.0, 0.0);
            for (k, pair) in pairs.iter().enumerate() {
                let t = pair.thru[sample];
                running_thru *= t * hop;
                let sign = if k % 2 == 0 { -1.0 } else { 1.0 };
                network_drop += sign * pair.drop[sample] * prefix;
                prefix *= bounce[k] * t;
            }
            thru.push(running_thru);
            drop.push(network_drop);
        }
        TransferPair { thru, drop }
    }
}

impl fmt::Display for RingCascade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ring cascade: {} rings, spacing = {:.3e} m, interconnect index = {}",
            self.ring_count(),
            self.spacing_m,
            self.interconnect_index
        )
    }
}
