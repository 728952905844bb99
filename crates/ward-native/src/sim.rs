//! Simulated sensor source: synthesizes an analyser spectrum and camera
//! scalars for a scripted scene, then conditions them through the real
//! feature extractor so the whole pipeline path is exercised.

use rand::prelude::*;
use ward_core::{
    CalibrationPlan, FeatureExtractor, RawFrame, SampleResult, SensorSource, SensorTuning,
    TeardownError,
};

const SIM_SAMPLE_RATE: f32 = 48_000.0;

/// Wall-clock script for the demo scene: the calibration steps in order,
/// then an intruder episode (broadband noise burst, luminance dip, motion).
#[derive(Clone, Copy, Debug)]
pub struct ScenePlan {
    quiet_until_ms: f64,
    dark_until_ms: f64,
    bright_until_ms: f64,
    stabilize_until_ms: f64,
    episode_start_ms: f64,
    episode_end_ms: f64,
}

impl ScenePlan {
    /// Align the scene with the calibration phase durations, placing the
    /// episode a fixed delay after calibration completes.
    pub fn from_calibration(plan: &CalibrationPlan, episode_delay_ms: f64, episode_len_ms: f64) -> Self {
        let quiet_until_ms = plan.quiet_ms;
        let dark_until_ms = quiet_until_ms + plan.cover_ms;
        let bright_until_ms = dark_until_ms + plan.bright_ms;
        let stabilize_until_ms = bright_until_ms + plan.stabilize_ms;
        let episode_start_ms = stabilize_until_ms + episode_delay_ms;
        Self {
            quiet_until_ms,
            dark_until_ms,
            bright_until_ms,
            stabilize_until_ms,
            episode_start_ms,
            episode_end_ms: episode_start_ms + episode_len_ms,
        }
    }

    fn in_episode(&self, now_ms: f64) -> bool {
        now_ms >= self.episode_start_ms && now_ms < self.episode_end_ms
    }
}

pub struct SimSensor {
    tuning: SensorTuning,
    extractor: FeatureExtractor,
    rng: StdRng,
    plan: ScenePlan,
    spectrum: Vec<f32>,
    last_now_ms: Option<f64>,
    released: bool,
}

impl SimSensor {
    pub fn new(seed: u64, tuning: SensorTuning, plan: ScenePlan) -> Self {
        let bins = tuning.fft_size / 2;
        Self {
            tuning,
            extractor: FeatureExtractor::new(tuning, SIM_SAMPLE_RATE),
            rng: StdRng::seed_from_u64(seed),
            plan,
            spectrum: vec![0.0; bins],
            last_now_ms: None,
            released: false,
        }
    }

    fn fill_spectrum(&mut self, now_ms: f64) {
        let loud = self.plan.in_episode(now_ms);
        let bin_hz = SIM_SAMPLE_RATE / self.tuning.fft_size as f32;
        let nyquist = SIM_SAMPLE_RATE * 0.5;
        for (i, bin) in self.spectrum.iter_mut().enumerate() {
            let f = i as f32 * bin_hz;
            // quiet room tone: warm floor tilting down toward the high end
            let mut db = -60.0 - 30.0 * (f / nyquist) + self.rng.gen_range(-2.0f32..2.0);
            if loud {
                // broadband burst with heavy frame-to-frame churn; the
                // hissy top end pushes the high-band share up as well
                db = -16.0 + self.rng.gen_range(-6.0f32..6.0);
                if f >= self.tuning.high_band_split_hz {
                    db += 3.0;
                }
            }
            *bin = db;
        }
    }

    fn camera_state(&mut self, now_ms: f64) -> (f32, f32) {
        let p = self.plan;
        if now_ms < p.quiet_until_ms {
            (0.45 + self.rng.gen_range(-0.02f32..0.02), 0.02)
        } else if now_ms < p.dark_until_ms {
            (0.04, 0.03)
        } else if now_ms < p.bright_until_ms {
            (0.92, 0.03)
        } else if now_ms < p.stabilize_until_ms {
            (0.50, 0.04 + self.rng.gen_range(0.0f32..0.02))
        } else if p.in_episode(now_ms) {
            // shadow over the lens plus close movement
            (0.18, 0.75 + self.rng.gen_range(0.0f32..0.1))
        } else {
            (0.50 + self.rng.gen_range(-0.02f32..0.02), 0.04)
        }
    }
}

impl SensorSource for SimSensor {
    fn sample(&mut self, now_ms: f64) -> SampleResult {
        if self.released {
            return SampleResult::NotReady;
        }
        let dt = match self.last_now_ms {
            Some(last) => ((now_ms - last) / 1000.0) as f32,
            None => 0.0,
        };
        self.last_now_ms = Some(now_ms);

        self.fill_spectrum(now_ms);
        let (luminance, motion) = self.camera_state(now_ms);
        let raw = RawFrame {
            spectrum_db: &self.spectrum,
            luminance,
            motion,
        };
        match self.extractor.ingest(&raw, dt) {
            Some(sample) => SampleResult::Ready(sample),
            None => SampleResult::NotReady,
        }
    }

    fn release(&mut self) -> Result<(), TeardownError> {
        log::info!("[sim] devices released");
        self.released = true;
        Ok(())
    }
}
