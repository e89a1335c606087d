//! Baseline physical constants, documented device defaults, and utility functions.
//!
//! ## Defaults
//!
//! The `DEFAULT_*` values reproduce the reference add-drop filter used
//! throughout the crate's tests and demos: a weakly coupled ring
//! (r₁ = r₂ = a = 0.9816) of 8 µm radius with a flat effective index of
//! 3.505, swept over a 2 nm window around 1559 nm. They are substituted once
//! at parameter construction, never inside the transfer-function math.

use std::f64::consts::TAU;

/// Speed of light in vacuum _c_ in meters per second (m/s).
/// Exact value by SI definition (2019): 299,792,458 m/s.
pub const SPEED_OF_LIGHT: f64 = 299_792_458.0;

/// Default self-coupling coefficient r₁ = r₂ at both bus/ring junctions.
pub const DEFAULT_SELF_COUPLING: f64 = 0.9816;
/// Default roundtrip field amplitude retention a (fraction kept per trip).
pub const DEFAULT_ROUNDTRIP_LOSS: f64 = 0.9816;
/// Default ring radius in meters (8000 nm).
pub const DEFAULT_RING_RADIUS: f64 = 8000.0e-9;
/// Default effective refractive index of the ring waveguide.
pub const DEFAULT_EFFECTIVE_INDEX: f64 = 3.505;
/// Default wavelength sweep start in meters (1558 nm).
pub const DEFAULT_SWEEP_START: f64 = 1558.0e-9;
/// Default wavelength sweep stop in meters (1560 nm).
pub const DEFAULT_SWEEP_STOP: f64 = 1560.0e-9;
/// Default number of wavelength samples in a sweep.
pub const DEFAULT_SWEEP_SAMPLES: usize = 10_000;

/// Returns the free-space wavelength in meters for a given frequency in hertz.
#[inline]
#[must_use]
pub fn wavelength_from_frequency(hz: f64) -> f64 {
    SPEED_OF_LIGHT / hz
}

/// Returns the optical frequency in hertz for a free-space wavelength in meters.
#[inline]
#[must_use]
pub fn frequency_from_wavelength(wavelength_m: f64) -> f64 {
    SPEED_OF_LIGHT / wavelength_m
}

/// Returns the vacuum wavenumber `k₀ = 2π / λ` in rad/m.
#[inline]
#[must_use]
pub fn vacuum_wavenumber(wavelength_m: f64) -> f64 {
    TAU / wavelength_m
}
