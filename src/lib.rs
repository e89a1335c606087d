#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![warn(clippy::all, clippy::cargo, clippy::nursery, missing_docs)]
#![doc = include_str!("../README.md")]

/// Physical constants and reference ring parameters.
pub mod constants;
/// Shared mathematical utilities (complex scalars, phasors).
pub mod math;
/// Effective-index profiles for waveguide dispersion.
pub mod dispersion;
/// Microring resonator models: single rings and cascades.
pub mod rings;
/// Wavelength sweep builders and post-processing helpers.
pub mod sweep;
/// Balanced-photodetector readout of resonance lines.
pub mod readout;
/// Error types shared between submodules.
pub mod errors;

/// Common exports for downstream crates.
pub mod prelude;
