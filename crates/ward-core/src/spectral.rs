//! Features derived from an analyser magnitude spectrum (dB): RMS,
//! band-energy partition, and frame-to-frame spectral flux.

use crate::constants::{DB_EPS, LOW_BAND_CEIL_HZ};

pub fn db_to_linear(db: f32) -> f32 {
    10.0_f32.powf(db / 20.0)
}

pub fn linear_to_db(lin: f32) -> f32 {
    20.0 * (lin + DB_EPS).log10()
}

/// Linear power summed per band. Bands partition bins by frequency:
/// low below 250 Hz, mid up to the configured split, high above it.
#[derive(Clone, Copy, Debug, Default)]
pub struct BandEnergies {
    pub low: f32,
    pub mid: f32,
    pub high: f32,
}

impl BandEnergies {
    pub fn high_ratio(&self) -> f32 {
        self.high / (self.low + self.mid + self.high).max(DB_EPS)
    }
}

/// Raw (unsmoothed) features for one spectrum snapshot.
#[derive(Clone, Copy, Debug, Default)]
pub struct SpectralFrame {
    pub rms: f32,
    pub bands: BandEnergies,
    pub flux: f32,
}

/// Stateful extractor; retains the previous snapshot for flux.
#[derive(Debug)]
pub struct SpectralFeatures {
    sample_rate: f32,
    fft_size: usize,
    high_band_split_hz: f32,
    last_spectrum: Option<Vec<f32>>,
}

impl SpectralFeatures {
    pub fn new(sample_rate: f32, fft_size: usize, high_band_split_hz: f32) -> Self {
        Self {
            sample_rate,
            fft_size,
            high_band_split_hz,
            last_spectrum: None,
        }
    }

    /// RMS of the spectrum: sqrt of mean squared linear magnitude.
    pub fn spectrum_rms(mag_db: &[f32]) -> f32 {
        if mag_db.is_empty() {
            return 0.0;
        }
        let sum: f32 = mag_db
            .iter()
            .map(|&db| {
                let v = db_to_linear(db);
                v * v
            })
            .sum();
        (sum / mag_db.len() as f32).sqrt()
    }

    pub fn band_energies(&self, mag_db: &[f32]) -> BandEnergies {
        let bin_hz = self.sample_rate / self.fft_size as f32;
        let mut bands = BandEnergies::default();
        for (i, &db) in mag_db.iter().enumerate() {
            let f = i as f32 * bin_hz;
            let p = db_to_linear(db);
            if f < LOW_BAND_CEIL_HZ {
                bands.low += p;
            } else if f < self.high_band_split_hz {
                bands.mid += p;
            } else {
                bands.high += p;
            }
        }
        bands
    }

    /// Positive-only spectral change vs the previous snapshot, per bin.
    /// Zero until a previous snapshot exists; retains `mag_db` afterwards.
    pub fn flux(&mut self, mag_db: &[f32]) -> f32 {
        let flux = match &self.last_spectrum {
            Some(prev) if prev.len() == mag_db.len() && !mag_db.is_empty() => {
                let positive: f32 = mag_db
                    .iter()
                    .zip(prev.iter())
                    .map(|(&cur, &old)| (cur - old).max(0.0))
                    .sum();
                positive / mag_db.len() as f32
            }
            _ => 0.0,
        };
        self.last_spectrum = Some(mag_db.to_vec());
        flux
    }

    /// Compute all features for one snapshot, advancing the flux state.
    pub fn analyze(&mut self, mag_db: &[f32]) -> SpectralFrame {
        SpectralFrame {
            rms: Self::spectrum_rms(mag_db),
            bands: self.band_energies(mag_db),
            flux: self.flux(mag_db),
        }
    }

    pub fn reset(&mut self) {
        self.last_spectrum = None;
    }
}
