//! The per-frame sensor boundary: a validated `Sample` or `NotReady`.

use thiserror::Error;

/// One frame of conditioned sensor features. Produced once per frame and
/// never mutated afterwards; every field is finite by construction.
#[derive(Clone, Copy, Debug, Default)]
pub struct Sample {
    /// Smoothed mic RMS, linear amplitude.
    pub mic_rms: f32,
    /// Smoothed mic RMS in dB.
    pub mic_rms_db: f32,
    /// Smoothed positive spectral change per bin.
    pub spectral_flux: f32,
    /// Smoothed high-band share of total spectral power, 0..1.
    pub high_band_ratio: f32,
    /// Smoothed camera luminance, 0..1.
    pub luminance: f32,
    /// Smoothed camera motion score, 0..1.
    pub motion: f32,
    /// Measured seconds since the previous frame.
    pub dt: f32,
}

impl Sample {
    pub fn is_finite(&self) -> bool {
        self.mic_rms.is_finite()
            && self.mic_rms_db.is_finite()
            && self.spectral_flux.is_finite()
            && self.high_band_ratio.is_finite()
            && self.luminance.is_finite()
            && self.motion.is_finite()
            && self.dt.is_finite()
    }
}

/// Outcome of polling a sensor source for one frame.
#[derive(Clone, Copy, Debug)]
pub enum SampleResult {
    Ready(Sample),
    /// Device not delivering yet, or a non-finite reading was rejected.
    /// Non-fatal: the session holds its last output and retries next tick.
    NotReady,
}

#[derive(Debug, Error)]
#[error("sensor release failed: {reason}")]
pub struct TeardownError {
    pub reason: String,
}

/// A source of per-frame samples, plus cooperative resource release.
pub trait SensorSource {
    fn sample(&mut self, now_ms: f64) -> SampleResult;

    /// Release devices/tracks during teardown. Errors are logged by the
    /// session and never propagated; recovery is a full session restart.
    fn release(&mut self) -> Result<(), TeardownError>;
}
