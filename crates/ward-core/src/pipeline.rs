//! Per-frame orchestration: normalized features in, render parameters out.
//!
//! One logical tick runs per driver callback. Conditioning, mapping, and
//! detection complete in that order within a tick; all mutable state is
//! exclusively owned here and touched by nothing else between ticks.

use crate::blend::ParameterBlender;
use crate::calibration::Calibration;
use crate::config::{BrightnessStrategy, PipelineConfig, RotationBoost};
use crate::constants::{ACTIVE_BRIGHTNESS_SHIFT, ACTIVE_ROTATION_BOOST_DEG, LUMI_DT_EPS, SCALE_MAX, SCALE_MIN};
use crate::danger::{DangerDetector, DangerOutcome, SignalReadings};
use crate::mapping::{clamp01, norm_luminance};
use crate::sample::Sample;
use crate::scheduler::ShapeScheduler;

/// The per-tick output record, consumed fire-and-forget by the renderer.
#[derive(Clone, Debug)]
pub struct RenderParams {
    pub brightness: f32,
    pub bloom: f32,
    pub scale: f32,
    pub absorb_level: f32,
    pub bubble_radius_vmin: f32,
    pub patterns: Vec<String>,
    pub rotation_deg_per_sec: f32,
    pub boundary_gain: f32,
    pub mesh_gain: f32,
}

/// One tick's full result: the render record plus the detector outcome.
#[derive(Clone, Debug)]
pub struct TickReport {
    pub render: RenderParams,
    pub danger: DangerOutcome,
    pub danger_active: bool,
}

pub struct Pipeline {
    config: PipelineConfig,
    cal: Calibration,
    detector: DangerDetector,
    scheduler: ShapeScheduler,
    absorb: ParameterBlender,
    bubble: ParameterBlender,
    last_lumi_norm: Option<f32>,
    bias_until: f64,
    biased: bool,
}

impl Pipeline {
    pub fn new(config: PipelineConfig, cal: Calibration, now_ms: f64) -> Self {
        let detector = DangerDetector::new(&config.danger);
        let mut scheduler = ShapeScheduler::new(config.rotation_interval_ms, now_ms);
        scheduler.build_sequence(&config.pools, &config.idle_weights);
        let absorb = ParameterBlender::new(config.mappings.absorb_from_flux.decay_ms);
        let bubble = ParameterBlender::new(config.mappings.bubble_from_peak.decay_ms);
        Self {
            config,
            cal,
            detector,
            scheduler,
            absorb,
            bubble,
            last_lumi_norm: None,
            bias_until: 0.0,
            biased: false,
        }
    }

    pub fn tick(&mut self, sample: &Sample, now_ms: f64) -> TickReport {
        let y_norm = norm_luminance(
            sample.luminance,
            self.cal.light_dark_ref,
            self.cal.light_bright_ref,
        );
        let lumi_drop_rate = match self.last_lumi_norm {
            Some(prev) => {
                let dl = y_norm - prev;
                ((-dl) / sample.dt.max(LUMI_DT_EPS)).clamp(0.0, 1.0)
            }
            None => 0.0,
        };
        self.last_lumi_norm = Some(y_norm);

        let m = &self.config.mappings;
        let brightness = m.brightness.map(y_norm).clamp(
            self.config.safety.min_brightness,
            self.config.safety.max_brightness,
        );
        let bloom = m.bloom.map(y_norm);
        let scale = m.scale_from_rms.map(sample.mic_rms).clamp(SCALE_MIN, SCALE_MAX);
        let rotation_base = m.rotation_from_rms.map(sample.mic_rms);

        let absorb_target = clamp01(m.absorb_from_flux.spec.map(sample.spectral_flux));
        let absorb_level = self.absorb.step(absorb_target, sample.dt);
        let bubble_target = m
            .bubble_from_peak
            .spec
            .map(sample.spectral_flux)
            .clamp(0.0, m.bubble_from_peak.spec.out_max);
        let bubble_add = self.bubble.step(bubble_target, sample.dt);

        let readings = SignalReadings {
            rms_db: sample.mic_rms_db,
            spectral_flux: sample.spectral_flux,
            high_band_ratio: sample.high_band_ratio,
            lumi_drop_rate,
            motion: sample.motion,
        };
        let danger = self.detector.tick(&readings, now_ms);
        let response = &self.config.danger.response;
        if danger.triggered {
            log::info!("[danger] triggered by {:?}", danger.hits);
            self.bias_until = now_ms + response.bias_duration_ms;
            self.biased = true;
            self.scheduler
                .build_sequence(&self.config.pools, &response.shape_weights);
        } else if self.biased && now_ms > self.bias_until {
            self.biased = false;
            self.scheduler
                .build_sequence(&self.config.pools, &self.config.idle_weights);
        }
        self.scheduler.tick(now_ms);

        let active = self.detector.is_active();
        let rotation_deg_per_sec = rotation_base
            + if active && response.rotation_boost == RotationBoost::Modest {
                ACTIVE_ROTATION_BOOST_DEG
            } else {
                0.0
            };
        let brightness = if active {
            match response.brightness_strategy {
                BrightnessStrategy::Stealth => {
                    (brightness - ACTIVE_BRIGHTNESS_SHIFT).max(self.config.safety.min_brightness)
                }
                BrightnessStrategy::Deter => {
                    (brightness + ACTIVE_BRIGHTNESS_SHIFT).min(self.config.safety.max_brightness)
                }
                BrightnessStrategy::None => brightness,
            }
        } else {
            brightness
        };
        let (boundary_gain, mesh_gain) = if active {
            (response.boundary.edge_gain, response.boundary.mesh_gain)
        } else {
            (1.0, 1.0)
        };

        let render = RenderParams {
            brightness,
            bloom,
            scale,
            absorb_level,
            bubble_radius_vmin: self.config.bubble_base_vmin + bubble_add,
            patterns: self.scheduler.sequence().to_vec(),
            rotation_deg_per_sec,
            boundary_gain,
            mesh_gain,
        };
        TickReport {
            render,
            danger,
            danger_active: active,
        }
    }

    pub fn detector(&self) -> &DangerDetector {
        &self.detector
    }

    pub fn scheduler(&self) -> &ShapeScheduler {
        &self.scheduler
    }

    pub fn calibration(&self) -> &Calibration {
        &self.cal
    }
}
