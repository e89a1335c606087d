//! Microring resonator models.
//!
//! [`resonator`] holds the closed-form single add-drop ring, [`cascade`] the
//! scattering synthesis for a linear chain of rings, and [`element`] the
//! port-level propagation contract both share.

pub mod cascade;
pub mod element;
pub mod resonator;

pub use cascade::{CascadeError, CascadeParameters, RingCascade};
pub use element::{OpticalTwoPort, PortFieldMap, PortId, PropagateError, TransferPair};
pub use resonator::{AddDropRing, RingError, RingParameters};
