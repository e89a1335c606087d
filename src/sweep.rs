//! Wavelength sweep utilities and post-processing helpers.

use std::io;

use crate::constants::{DEFAULT_SWEEP_SAMPLES, DEFAULT_SWEEP_START, DEFAULT_SWEEP_STOP};
use crate::math::{CScalar, Scalar};

/// Generates `n` linearly spaced samples in [start, stop].
#[must_use]
pub fn linspace(start: Scalar, stop: Scalar, n: usize) -> Vec<Scalar> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n as Scalar - 1.0);
            (0..n).map(|i| start + step * i as Scalar).collect()
        }
    }
}

/// The reference sweep: 10 000 samples spanning 1558 nm to 1560 nm.
#[must_use]
pub fn default_wavelength_sweep() -> Vec<Scalar> {
    linspace(DEFAULT_SWEEP_START, DEFAULT_SWEEP_STOP, DEFAULT_SWEEP_SAMPLES)
}

/// Applies `f` to each wavelength and collects results.
#[must_use]
pub fn sweep_map<I, F, T>(wavelengths: I, mut f: F) -> Vec<T>
where
    I: IntoIterator<Item = Scalar>,
    F: FnMut(Scalar) -> T,
{
    wavelengths.into_iter().map(|w| f(w)).collect()
}

/// Magnitude of a complex spectrum.
#[must_use]
pub fn mag(values: &[CScalar]) -> Vec<Scalar> {
    values.iter().map(|v| v.norm()).collect()
}

/// Magnitude in dB (20*log10(|x|)), clamping very small values.
#[must_use]
pub fn mag_db(values: &[CScalar]) -> Vec<Scalar> {
    const MIN: Scalar = 1e-300;
    values
        .iter()
        .map(|v| 20.0 * (v.norm().max(MIN)).log10())
        .collect()
}

/// Detected intensity `|x|^2` of a complex spectrum.
#[must_use]
pub fn intensity(values: &[CScalar]) -> Vec<Scalar> {
    values.iter().map(|v| v.norm_sqr()).collect()
}

/// Phase in radians of a complex spectrum.
#[must_use]
pub fn phase_rad(values: &[CScalar]) -> Vec<Scalar> {
    values.iter().map(|v| v.arg()).collect()
}

/// Phase in degrees of a complex spectrum.
#[must_use]
pub fn phase_deg(values: &[CScalar]) -> Vec<Scalar> {
    phase_rad(values).into_iter().map(|r| r.to_degrees()).collect()
}

/// Writes thru and drop spectra as CSV rows keyed by wavelength.
///
/// Columns are `wavelength_m,thru_re,thru_im,drop_re,drop_im`; the three
/// slices must share one length.
///
/// # Errors
///
/// Returns any error raised by the underlying writer.
pub fn write_spectra_csv<W: io::Write>(
    out: &mut W,
    wavelengths_m: &[Scalar],
    thru: &[CScalar],
    drop: &[CScalar],
) -> io::Result<()> {
    writeln!(out, "wavelength_m,thru_re,thru_im,drop_re,drop_im")?;
    for ((wavelength_m, t), d) in wavelengths_m.iter().zip(thru).zip(drop) {
        writeln!(
            out,
            "{wavelength_m:e},{:e},{:e},{:e},{:e}",
            t.re, t.im, d.re, d.im
        )?;
    }
    Ok(())
}
