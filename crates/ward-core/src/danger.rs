//! Multi-signal hysteresis danger detection.
//!
//! Five conditioned channels are compared against static thresholds each
//! tick. When enough channels are simultaneously over threshold for the
//! sustain window, the detector fires once and enters a refractory cooldown
//! during which no re-arming occurs.

use smallvec::SmallVec;

use crate::config::{DangerConfig, ThresholdSet};

/// The fused input channels, by name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DangerSignal {
    RmsDb,
    SpectralFlux,
    HighBandRatio,
    LuminanceDrop,
    Motion,
}

pub const DANGER_CHANNEL_COUNT: usize = 5;

/// Current values for the five fused channels.
#[derive(Clone, Copy, Debug, Default)]
pub struct SignalReadings {
    pub rms_db: f32,
    pub spectral_flux: f32,
    pub high_band_ratio: f32,
    pub lumi_drop_rate: f32,
    pub motion: f32,
}

/// Result of one detector tick. `triggered` is true exactly once, on the
/// arming-to-active edge.
#[derive(Clone, Debug, Default)]
pub struct DangerOutcome {
    pub triggered: bool,
    pub hits: SmallVec<[DangerSignal; DANGER_CHANNEL_COUNT]>,
}

/// Hysteresis state machine over the five channels.
///
/// States are Idle, Arming (`armed_at` set), Active, and Cooldown; Active
/// and Cooldown share one timer — triggering schedules the cooldown exit,
/// and `active` stays true for the whole cooldown even though no further
/// evaluation happens until it elapses.
///
/// If `require_any` exceeds the channel count the detector silently never
/// triggers; validating the configuration is the caller's responsibility.
#[derive(Debug)]
pub struct DangerDetector {
    thresholds: ThresholdSet,
    require_any: usize,
    sustain_ms: f64,
    cooldown_ms: f64,
    armed_at: Option<f64>,
    cool_until: f64,
    active: bool,
}

impl DangerDetector {
    pub fn new(config: &DangerConfig) -> Self {
        Self {
            thresholds: config.thresholds,
            require_any: config.require_any,
            sustain_ms: config.sustain_ms,
            cooldown_ms: config.cooldown_ms,
            armed_at: None,
            cool_until: 0.0,
            active: false,
        }
    }

    /// Evaluate one frame. Any frame with insufficient hits cancels arming
    /// outright; sustain time never accumulates across interruptions.
    pub fn tick(&mut self, readings: &SignalReadings, now_ms: f64) -> DangerOutcome {
        if now_ms < self.cool_until {
            // Refractory: the response rides out the cooldown, no arming.
            return DangerOutcome::default();
        }
        self.active = false;

        let mut hits: SmallVec<[DangerSignal; DANGER_CHANNEL_COUNT]> = SmallVec::new();
        let th = &self.thresholds;
        if readings.rms_db > th.rms_db {
            hits.push(DangerSignal::RmsDb);
        }
        if readings.spectral_flux > th.spectral_flux {
            hits.push(DangerSignal::SpectralFlux);
        }
        if readings.high_band_ratio > th.high_band_ratio {
            hits.push(DangerSignal::HighBandRatio);
        }
        if readings.lumi_drop_rate > th.luminance_drop_rate {
            hits.push(DangerSignal::LuminanceDrop);
        }
        if readings.motion > th.motion_score {
            hits.push(DangerSignal::Motion);
        }

        if hits.len() >= self.require_any {
            let armed_at = *self.armed_at.get_or_insert(now_ms);
            if now_ms - armed_at >= self.sustain_ms {
                self.active = true;
                self.cool_until = now_ms + self.cooldown_ms;
                self.armed_at = None;
                return DangerOutcome {
                    triggered: true,
                    hits,
                };
            }
        } else {
            self.armed_at = None;
        }

        DangerOutcome {
            triggered: false,
            hits,
        }
    }

    /// True from the trigger tick until the cooldown elapses.
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_arming(&self) -> bool {
        self.armed_at.is_some()
    }
}
