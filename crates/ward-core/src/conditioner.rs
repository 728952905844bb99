//! Per-channel exponential smoothing of raw sensor scalars.

use fnv::FnvHashMap;

/// Conditioned sensor channels. One smoothed scalar is kept per channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Channel {
    MicRms,
    HighBandRatio,
    SpectralFlux,
    Luminance,
    Motion,
}

/// EMA registry keyed by channel. Values start at zero and persist for the
/// session; the first update biases toward the raw value by `1 - alpha`.
#[derive(Debug, Default)]
pub struct SignalConditioner {
    values: FnvHashMap<Channel, f32>,
}

impl SignalConditioner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold `raw` into the channel's smoothed value and return it.
    ///
    /// `dt` is the measured inter-frame interval in seconds; the filter's
    /// time constant holds at any frame rate because alpha is derived from
    /// the actual elapsed time, not a nominal frame period.
    pub fn update(&mut self, channel: Channel, raw: f32, smoothing_ms: f32, dt: f32) -> f32 {
        let alpha = (-(dt * 1000.0) / smoothing_ms.max(1.0)).exp();
        let slot = self.values.entry(channel).or_insert(0.0);
        *slot = alpha * *slot + (1.0 - alpha) * raw;
        *slot
    }

    pub fn get(&self, channel: Channel) -> f32 {
        self.values.get(&channel).copied().unwrap_or(0.0)
    }

    /// Drop all smoothed state; used only at session restart.
    pub fn reset(&mut self) {
        self.values.clear();
    }
}
