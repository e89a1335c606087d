//! Shared error types used across submodules.

use thiserror::Error;

use crate::readout::ReadoutError;
use crate::rings::{CascadeError, PropagateError, RingError};

/// Top-level error type for the crate.
#[derive(Debug, Error)]
pub enum MrrPhotonicsError {
    /// Wraps single-ring validation errors.
    #[error(transparent)]
    Ring(#[from] RingError),
    /// Wraps cascade validation errors.
    #[error(transparent)]
    Cascade(#[from] CascadeError),
    /// Wraps field propagation errors.
    #[error(transparent)]
    Propagate(#[from] PropagateError),
    /// Wraps readout errors.
    #[error(transparent)]
    Readout(#[from] ReadoutError),
}
