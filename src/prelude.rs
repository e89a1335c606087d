//! Convenience re-exports for building ring filter experiments.

pub use crate::constants::*;
pub use crate::dispersion::EffectiveIndex;
pub use crate::errors::MrrPhotonicsError;
pub use crate::math::{phasor, wrap_phase, CScalar, Scalar};
pub use crate::readout::{
    align_to_design_wavelengths, balanced_difference, detect_resonance_peaks, ReadoutError,
    ResonanceReadout,
};
pub use crate::rings::{
    AddDropRing, CascadeError, CascadeParameters, OpticalTwoPort, PortFieldMap, PortId,
    PropagateError, RingCascade, RingError, RingParameters, TransferPair,
};
pub use crate::sweep::{
    default_wavelength_sweep, intensity, linspace, mag, mag_db, phase_deg, phase_rad, sweep_map,
    write_spectra_csv,
};
