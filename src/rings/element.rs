//! Port-level abstraction shared by single rings and cascades.

use std::collections::BTreeMap;
use std::f64::consts::FRAC_1_SQRT_2;

use thiserror::Error;

use crate::math::CScalar;

/// Identifier of an output port on the photonic circuit.
pub type PortId = u32;

/// Complex field spectra keyed by output port.
pub type PortFieldMap = BTreeMap<PortId, Vec<CScalar>>;

/// Thru and drop transfer spectra of a device, one entry per wavelength
/// sample.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct TransferPair {
    /// Field transfer toward the thru port.
    pub thru: Vec<CScalar>,
    /// Field transfer toward the drop port.
    pub drop: Vec<CScalar>,
}

impl TransferPair {
    /// Number of wavelength samples in each spectrum.
    #[must_use]
    pub fn len(&self) -> usize {
        self.thru.len()
    }

    /// True when the spectra hold no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.thru.is_empty()
    }
}

/// Errors raised while projecting an input field onto output ports.
#[derive(Debug, Error, PartialEq)]
pub enum PropagateError {
    /// The launched field carries a NaN or infinite component.
    #[error("input field must be finite, got {value}")]
    NonFiniteInput {
        /// Offending field value.
        value: CScalar,
    },
}

/// A device with one thru and one drop output fed from a single input
/// waveguide.
///
/// Implementors supply the transfer spectra; field propagation is shared.
pub trait OpticalTwoPort {
    /// Port receiving the thru spectrum.
    fn port_thru(&self) -> PortId;

    /// Port receiving the drop spectrum.
    fn port_drop(&self) -> PortId;

    /// Thru and drop transfer spectra over the wavelength sweep.
    fn transfer_pair(&self) -> TransferPair;

    /// Projects `input_field` onto the output ports.
    ///
    /// The input is split evenly between the two arms, so each port sees the
    /// transfer spectrum scaled by `E / sqrt(2)`.
    ///
    /// # Errors
    ///
    /// Returns [`PropagateError::NonFiniteInput`] when `input_field` is NaN
    /// or infinite.
    fn propagate(&self, input_field: CScalar) -> Result<PortFieldMap, PropagateError> {
        if !input_field.re.is_finite() || !input_field.im.is_finite() {
            return Err(PropagateError::NonFiniteInput { value: input_field });
        }
        let split = input_field * FRAC_1_SQRT_2;
        let pair = self.transfer_pair();
        let mut ports = PortFieldMap::new();
        ports.insert(self.port_thru(), pair.thru.iter().map(|t| t * split).collect());
        ports.insert(self.port_drop(), pair.drop.iter().map(|d| d * split).collect());
        Ok(ports)
    }
}
