use mrr_photonics::prelude::*;

fn main() -> Result<(), MrrPhotonicsError> {
    // Three identical rings on shared buses, 10 um apart.
    let rings = vec![RingParameters::new(8, 2); 3];
    let mut params = CascadeParameters::new(8, 2, rings);
    params.spacing_m = 10.0e-6;
    let cascade = RingCascade::new(params)?;
    println!("{cascade}");
    println!("inter-ring bus phase: {:.4} rad", cascade.bus_phase());

    // Launch the nominal field and read the port intensities.
    let ports = cascade.propagate(cascade.input_field())?;
    let thru_intensity = intensity(&ports[&8]);
    let drop_intensity = intensity(&ports[&2]);

    // Balanced-photodetector lines at detected drop maxima.
    let lines = detect_resonance_peaks(
        cascade.wavelengths_m(),
        &thru_intensity,
        &drop_intensity,
        0.05..=1.0,
    )?;
    println!("detected {} resonance line(s)", lines.len());
    for line in 0..lines.len() {
        println!(
            "line at {:.6e} m: thru = {:.4e}, drop = {:.4e}, balanced = {:.4e}",
            lines.wavelengths_m[line],
            lines.thru[line],
            lines.drop[line],
            lines.balanced[line]
        );
    }

    let delta = balanced_difference(&thru_intensity, &drop_intensity)?;
    let strongest = delta.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    println!("strongest balanced reading: {strongest:.4e}");
    Ok(())
}
