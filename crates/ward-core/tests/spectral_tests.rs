// Spectrum-derived features: RMS, band partition, and positive-only flux.

use ward_core::spectral::{db_to_linear, linear_to_db, SpectralFeatures};

#[test]
fn db_linear_round_trip() {
    for db in [-80.0, -40.0, -20.0, 0.0] {
        let lin = db_to_linear(db);
        let back = linear_to_db(lin);
        assert!((back - db).abs() < 0.1, "round trip at {db}: {back}");
    }
}

#[test]
fn flat_spectrum_rms_matches_bin_amplitude() {
    // Every bin at 0 dB -> linear 1 -> rms 1
    let flat0 = vec![0.0f32; 64];
    assert!((SpectralFeatures::spectrum_rms(&flat0) - 1.0).abs() < 1e-5);

    // Every bin at -20 dB -> linear 0.1 -> rms 0.1
    let flat20 = vec![-20.0f32; 64];
    assert!((SpectralFeatures::spectrum_rms(&flat20) - 0.1).abs() < 1e-5);

    assert_eq!(SpectralFeatures::spectrum_rms(&[]), 0.0);
}

#[test]
fn band_partition_splits_by_frequency() {
    // 8 kHz sample rate, FFT 32 -> 250 Hz per bin.
    // bin 0 = 0 Hz (low), bin 1 = 250 Hz (mid), bin 2 = 500 Hz (high split).
    let features = SpectralFeatures::new(8_000.0, 32, 500.0);
    let mut mag = vec![-300.0f32; 16];
    mag[0] = 0.0;
    mag[1] = 0.0;
    mag[2] = 0.0;
    let bands = features.band_energies(&mag);
    assert!((bands.low - 1.0).abs() < 1e-3, "low {}", bands.low);
    assert!((bands.mid - 1.0).abs() < 1e-3, "mid {}", bands.mid);
    assert!((bands.high - 1.0).abs() < 1e-3, "high {}", bands.high);
    assert!((bands.high_ratio() - 1.0 / 3.0).abs() < 1e-3);
}

#[test]
fn high_ratio_is_guarded_against_empty_energy() {
    let features = SpectralFeatures::new(8_000.0, 32, 500.0);
    let silent = vec![-300.0f32; 16];
    let bands = features.band_energies(&silent);
    assert!(bands.high_ratio().is_finite());
}

#[test]
fn flux_is_zero_on_first_snapshot() {
    let mut features = SpectralFeatures::new(48_000.0, 2048, 2_000.0);
    let mag = vec![-40.0f32; 1024];
    assert_eq!(features.flux(&mag), 0.0);
}

#[test]
fn flux_counts_only_positive_change() {
    let mut features = SpectralFeatures::new(48_000.0, 64, 2_000.0);
    let quiet = vec![-60.0f32; 32];
    features.flux(&quiet);

    // Every bin rises by 6 dB -> flux is the mean rise
    let louder = vec![-54.0f32; 32];
    let rise = features.flux(&louder);
    assert!((rise - 6.0).abs() < 1e-4, "rise {rise}");

    // Falling back down contributes nothing
    let fall = features.flux(&quiet);
    assert!(fall.abs() < 1e-6, "fall {fall}");
}

#[test]
fn flux_mixes_per_bin_changes() {
    let mut features = SpectralFeatures::new(48_000.0, 8, 2_000.0);
    features.flux(&[-60.0, -60.0, -60.0, -60.0]);
    // Two bins up 8 dB, two bins down: only the rises count
    let flux = features.flux(&[-52.0, -52.0, -80.0, -80.0]);
    assert!((flux - 4.0).abs() < 1e-4, "flux {flux}");
}

#[test]
fn analyze_reports_consistent_parts() {
    let mut features = SpectralFeatures::new(8_000.0, 32, 500.0);
    let mag = vec![-20.0f32; 16];
    let frame = features.analyze(&mag);
    assert!((frame.rms - 0.1).abs() < 1e-4);
    assert_eq!(frame.flux, 0.0);
    assert!(frame.bands.low > 0.0 && frame.bands.high > 0.0);

    features.reset();
    let again = features.analyze(&mag);
    assert_eq!(again.flux, 0.0, "reset should clear flux history");
}
