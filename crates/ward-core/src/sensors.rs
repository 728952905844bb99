//! Turns raw device readings (magnitude spectrum + camera scalars) into the
//! smoothed per-frame [`Sample`] the pipeline consumes.

use crate::conditioner::{Channel, SignalConditioner};
use crate::config::SensorTuning;
use crate::constants::SPECTRUM_FLOOR_DB;
use crate::sample::Sample;
use crate::spectral::{linear_to_db, SpectralFeatures};

/// Raw input for one frame, as delivered by the device layer.
#[derive(Clone, Copy, Debug)]
pub struct RawFrame<'a> {
    /// Analyser magnitude spectrum in dB, one value per bin.
    pub spectrum_db: &'a [f32],
    /// Mean frame luminance, 0..1.
    pub luminance: f32,
    /// Mean absolute inter-frame pixel difference, 0..1.
    pub motion: f32,
}

/// Feature extraction + smoothing front-end for a sensor source.
///
/// Non-finite camera scalars are rejected here (the caller reports
/// `NotReady`); non-finite spectrum bins are clamped to the analyser floor
/// so silence (-inf dB) does not poison the flux history.
pub struct FeatureExtractor {
    tuning: SensorTuning,
    spectral: SpectralFeatures,
    ema: SignalConditioner,
    scratch: Vec<f32>,
}

impl FeatureExtractor {
    pub fn new(tuning: SensorTuning, sample_rate: f32) -> Self {
        let spectral = SpectralFeatures::new(sample_rate, tuning.fft_size, tuning.high_band_split_hz);
        Self {
            tuning,
            spectral,
            ema: SignalConditioner::new(),
            scratch: Vec::new(),
        }
    }

    /// Condition one raw frame into a `Sample`, or `None` if the frame is
    /// unusable (empty spectrum, non-finite camera scalars, bad dt).
    pub fn ingest(&mut self, raw: &RawFrame<'_>, dt: f32) -> Option<Sample> {
        if raw.spectrum_db.is_empty()
            || !raw.luminance.is_finite()
            || !raw.motion.is_finite()
            || !dt.is_finite()
            || dt < 0.0
        {
            return None;
        }

        self.scratch.clear();
        self.scratch.extend(raw.spectrum_db.iter().map(|&v| {
            if v.is_finite() {
                v
            } else {
                SPECTRUM_FLOOR_DB
            }
        }));

        let frame = self.spectral.analyze(&self.scratch);
        let mic_ms = self.tuning.mic_smoothing_ms;
        let cam_ms = self.tuning.cam_smoothing_ms;

        let mic_rms = self.ema.update(Channel::MicRms, frame.rms, mic_ms, dt);
        let high_band_ratio =
            self.ema
                .update(Channel::HighBandRatio, frame.bands.high_ratio(), mic_ms, dt);
        let spectral_flux = self.ema.update(Channel::SpectralFlux, frame.flux, mic_ms, dt);
        let luminance = self.ema.update(Channel::Luminance, raw.luminance, cam_ms, dt);
        let motion = self.ema.update(Channel::Motion, raw.motion, cam_ms, dt);

        Some(Sample {
            mic_rms,
            mic_rms_db: linear_to_db(mic_rms),
            spectral_flux,
            high_band_ratio,
            luminance,
            motion,
            dt,
        })
    }

    /// Smoothed values, read by calibration between frames.
    pub fn ema(&self) -> &SignalConditioner {
        &self.ema
    }

    /// Restart smoothing and flux history (session restart only).
    pub fn reset(&mut self) {
        self.ema.reset();
        self.spectral.reset();
    }
}
