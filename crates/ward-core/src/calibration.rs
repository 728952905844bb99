//! Guided calibration: four sequential timed phases deriving the reference
//! baselines the pipeline normalizes against.
//!
//! Modeled as an explicit tick-driven phase machine so an external driver
//! owns the clock; each phase is a scoped wait with nothing else running
//! concurrently.

use thiserror::Error;

use crate::config::CalibrationPlan;
use crate::constants::MOTION_BASE_FACTOR;
use crate::sample::Sample;
use crate::spectral::linear_to_db;

/// Reference baselines. Populated once, in phase order; read-only after
/// the manager reports ready.
#[derive(Clone, Copy, Debug)]
pub struct Calibration {
    pub mic_silence_db: f32,
    pub light_dark_ref: Option<f32>,
    pub light_bright_ref: Option<f32>,
    pub motion_base: f32,
}

impl Calibration {
    fn with_floor(silence_floor_db: f32) -> Self {
        Self {
            mic_silence_db: silence_floor_db,
            light_dark_ref: None,
            light_bright_ref: None,
            motion_base: 0.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CalibrationPhase {
    QuietBaseline,
    CoverCamera,
    BrightSource,
    Stabilize,
    Complete,
}

#[derive(Debug, Error)]
pub enum CalibrationError {
    #[error("calibration aborted during {phase:?}")]
    Aborted { phase: CalibrationPhase },
    #[error("calibration has not completed")]
    Incomplete,
}

/// Drives the four phases against the smoothed samples a sensor source is
/// already producing. The session must not enter its detection loop unless
/// [`CalibrationManager::finish`] returns a calibration.
pub struct CalibrationManager {
    plan: CalibrationPlan,
    silence_floor_db: f32,
    phase: CalibrationPhase,
    phase_started: f64,
    cal: Calibration,
    ready: bool,
    aborted: bool,
}

impl CalibrationManager {
    pub fn new(plan: CalibrationPlan, silence_floor_db: f32) -> Self {
        Self {
            plan,
            silence_floor_db,
            phase: CalibrationPhase::QuietBaseline,
            phase_started: 0.0,
            cal: Calibration::with_floor(silence_floor_db),
            ready: false,
            aborted: false,
        }
    }

    /// Start the protocol; announces the first phase.
    pub fn begin(&mut self, now_ms: f64, progress: &mut dyn FnMut(&str)) {
        self.phase = CalibrationPhase::QuietBaseline;
        self.phase_started = now_ms;
        self.cal = Calibration::with_floor(self.silence_floor_db);
        self.ready = false;
        self.aborted = false;
        progress("calibrating: hold quiet (mic baseline)");
    }

    /// Feed one smoothed sample. Captures the current phase's reference
    /// once its duration has elapsed, then advances. Returns the phase in
    /// effect after the call.
    pub fn feed(
        &mut self,
        sample: &Sample,
        now_ms: f64,
        progress: &mut dyn FnMut(&str),
    ) -> CalibrationPhase {
        if self.aborted || self.phase == CalibrationPhase::Complete {
            return self.phase;
        }
        let elapsed = now_ms - self.phase_started;
        match self.phase {
            CalibrationPhase::QuietBaseline if elapsed >= self.plan.quiet_ms => {
                let quiet_db = linear_to_db(sample.mic_rms);
                self.cal.mic_silence_db = quiet_db.max(self.silence_floor_db);
                self.advance(CalibrationPhase::CoverCamera, now_ms);
                progress("calibrating: cover the camera");
            }
            CalibrationPhase::CoverCamera if elapsed >= self.plan.cover_ms => {
                self.cal.light_dark_ref = Some(sample.luminance);
                self.advance(CalibrationPhase::BrightSource, now_ms);
                progress("calibrating: aim at a bright light");
            }
            CalibrationPhase::BrightSource if elapsed >= self.plan.bright_ms => {
                self.cal.light_bright_ref = Some(sample.luminance);
                self.advance(CalibrationPhase::Stabilize, now_ms);
                progress("stabilizing");
            }
            CalibrationPhase::Stabilize if elapsed >= self.plan.stabilize_ms => {
                self.cal.motion_base = sample.motion * MOTION_BASE_FACTOR;
                self.advance(CalibrationPhase::Complete, now_ms);
                self.ready = true;
                log::info!(
                    "[calibrate] complete: silence {:.1} dB, dark {:?}, bright {:?}, motion base {:.3}",
                    self.cal.mic_silence_db,
                    self.cal.light_dark_ref,
                    self.cal.light_bright_ref,
                    self.cal.motion_base
                );
                progress("calibration complete");
            }
            _ => {}
        }
        self.phase
    }

    /// Abandon the protocol; the session must not proceed.
    pub fn abort(&mut self) {
        if self.phase != CalibrationPhase::Complete {
            self.aborted = true;
            self.ready = false;
        }
    }

    pub fn phase(&self) -> CalibrationPhase {
        self.phase
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn finish(&self) -> Result<Calibration, CalibrationError> {
        if self.ready {
            Ok(self.cal)
        } else if self.aborted {
            Err(CalibrationError::Aborted { phase: self.phase })
        } else {
            Err(CalibrationError::Incomplete)
        }
    }

    fn advance(&mut self, next: CalibrationPhase, now_ms: f64) {
        self.phase = next;
        self.phase_started = now_ms;
    }
}
