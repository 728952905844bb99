// Static configuration: mapping specs, thresholds, danger-response policy,
// sensor tuning, and pattern pools. Defaults come from `constants.rs`;
// nothing here mutates at runtime.

use crate::constants::*;
use crate::mapping::{map_range, Curve};
use crate::scheduler::{PatternPools, WeightMap};

/// One output channel's range/curve tuple.
#[derive(Clone, Copy, Debug)]
pub struct MappingSpec {
    pub in_min: f32,
    pub in_max: f32,
    pub out_min: f32,
    pub out_max: f32,
    pub curve: Curve,
}

impl MappingSpec {
    pub fn map(&self, x: f32) -> f32 {
        map_range(x, self.in_min, self.in_max, self.out_min, self.out_max, self.curve)
    }
}

/// A mapping whose output is approached through an exponential decay.
#[derive(Clone, Copy, Debug)]
pub struct DecayMapping {
    pub spec: MappingSpec,
    pub decay_ms: f32,
}

/// The five danger thresholds, compared with strict `>`.
#[derive(Clone, Copy, Debug)]
pub struct ThresholdSet {
    pub rms_db: f32,
    pub spectral_flux: f32,
    pub high_band_ratio: f32,
    pub luminance_drop_rate: f32,
    pub motion_score: f32,
}

impl Default for ThresholdSet {
    fn default() -> Self {
        Self {
            rms_db: THRESH_RMS_DB,
            spectral_flux: THRESH_SPECTRAL_FLUX,
            high_band_ratio: THRESH_HIGH_BAND_RATIO,
            luminance_drop_rate: THRESH_LUMI_DROP_RATE,
            motion_score: THRESH_MOTION_SCORE,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RotationBoost {
    None,
    #[default]
    Modest,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BrightnessStrategy {
    #[default]
    None,
    /// Dim slightly while active, floored at the safety minimum.
    Stealth,
    /// Brighten slightly while active, capped at the safety maximum.
    Deter,
}

/// Boundary emphasis applied while the detector is active.
#[derive(Clone, Copy, Debug)]
pub struct BoundaryResponse {
    pub edge_gain: f32,
    pub mesh_gain: f32,
}

impl Default for BoundaryResponse {
    fn default() -> Self {
        Self {
            edge_gain: ACTIVE_EDGE_GAIN,
            mesh_gain: ACTIVE_MESH_GAIN,
        }
    }
}

/// Secondary adjustments applied only while the detector is active.
#[derive(Clone, Debug)]
pub struct DangerResponse {
    pub bias_duration_ms: f64,
    pub shape_weights: WeightMap,
    pub rotation_boost: RotationBoost,
    pub brightness_strategy: BrightnessStrategy,
    pub boundary: BoundaryResponse,
}

impl Default for DangerResponse {
    fn default() -> Self {
        Self {
            bias_duration_ms: DANGER_BIAS_DURATION_MS,
            shape_weights: WeightMap::of(&[
                ("strengthening", 0.60),
                ("neutral", 0.30),
                ("calming", 0.10),
            ]),
            rotation_boost: RotationBoost::default(),
            brightness_strategy: BrightnessStrategy::default(),
            boundary: BoundaryResponse::default(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct DangerConfig {
    pub thresholds: ThresholdSet,
    pub require_any: usize,
    pub sustain_ms: f64,
    pub cooldown_ms: f64,
    pub response: DangerResponse,
}

impl Default for DangerConfig {
    fn default() -> Self {
        Self {
            thresholds: ThresholdSet::default(),
            require_any: DANGER_REQUIRE_ANY,
            sustain_ms: DANGER_SUSTAIN_MS,
            cooldown_ms: DANGER_COOLDOWN_MS,
            response: DangerResponse::default(),
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct SafetyClamps {
    pub min_brightness: f32,
    pub max_brightness: f32,
}

impl Default for SafetyClamps {
    fn default() -> Self {
        Self {
            min_brightness: MIN_BRIGHTNESS,
            max_brightness: MAX_BRIGHTNESS,
        }
    }
}

/// Device-side conditioning parameters.
#[derive(Clone, Copy, Debug)]
pub struct SensorTuning {
    pub fft_size: usize,
    pub mic_smoothing_ms: f32,
    pub high_band_split_hz: f32,
    pub silence_floor_db: f32,
    pub cam_smoothing_ms: f32,
}

impl Default for SensorTuning {
    fn default() -> Self {
        Self {
            fft_size: DEFAULT_FFT_SIZE,
            mic_smoothing_ms: MIC_SMOOTHING_MS,
            high_band_split_hz: HIGH_BAND_SPLIT_HZ,
            silence_floor_db: SILENCE_FLOOR_DB,
            cam_smoothing_ms: CAM_SMOOTHING_MS,
        }
    }
}

/// Durations of the four calibration phases; shortened by tests and the
/// demo driver.
#[derive(Clone, Copy, Debug)]
pub struct CalibrationPlan {
    pub quiet_ms: f64,
    pub cover_ms: f64,
    pub bright_ms: f64,
    pub stabilize_ms: f64,
}

impl Default for CalibrationPlan {
    fn default() -> Self {
        Self {
            quiet_ms: CAL_QUIET_MS,
            cover_ms: CAL_COVER_MS,
            bright_ms: CAL_BRIGHT_MS,
            stabilize_ms: CAL_STABILIZE_MS,
        }
    }
}

/// Range/curve tuples for every visual output channel.
#[derive(Clone, Copy, Debug)]
pub struct VisualMappings {
    /// Normalized luminance -> display brightness.
    pub brightness: MappingSpec,
    /// Normalized luminance -> bloom strength.
    pub bloom: MappingSpec,
    /// Mic RMS -> geometry scale.
    pub scale_from_rms: MappingSpec,
    /// Mic RMS -> base rotation, deg/s.
    pub rotation_from_rms: MappingSpec,
    /// Spectral flux -> absorb level, blended.
    pub absorb_from_flux: DecayMapping,
    /// Spectral flux -> bubble growth (vmin), blended.
    pub bubble_from_peak: DecayMapping,
}

impl Default for VisualMappings {
    fn default() -> Self {
        Self {
            brightness: MappingSpec {
                in_min: 0.0,
                in_max: 1.0,
                out_min: 0.2,
                out_max: 1.0,
                curve: Curve::EaseOut,
            },
            bloom: MappingSpec {
                in_min: 0.0,
                in_max: 1.0,
                out_min: 0.0,
                out_max: 0.6,
                curve: Curve::EaseIn,
            },
            scale_from_rms: MappingSpec {
                in_min: 0.01,
                in_max: 0.2,
                out_min: 0.8,
                out_max: 2.2,
                curve: Curve::EaseOut,
            },
            rotation_from_rms: MappingSpec {
                in_min: 0.01,
                in_max: 0.2,
                out_min: 4.0,
                out_max: 26.0,
                curve: Curve::Linear,
            },
            absorb_from_flux: DecayMapping {
                spec: MappingSpec {
                    in_min: 0.002,
                    in_max: 0.02,
                    out_min: 0.0,
                    out_max: 1.0,
                    curve: Curve::Linear,
                },
                decay_ms: ABSORB_DECAY_MS,
            },
            bubble_from_peak: DecayMapping {
                spec: MappingSpec {
                    in_min: 0.002,
                    in_max: 0.02,
                    out_min: 0.0,
                    out_max: BUBBLE_MAX_ADD_VMIN,
                    curve: Curve::Linear,
                },
                decay_ms: BUBBLE_DECAY_MS,
            },
        }
    }
}

fn default_pools() -> PatternPools {
    let mut pools = PatternPools::new();
    pools.insert("neutral", &["orb", "ring", "drift"]);
    pools.insert("calming", &["slow_wave", "halo"]);
    pools.insert("strengthening", &["starburst", "lattice", "pulse"]);
    pools
}

/// Everything the per-session pipeline needs, in one place.
#[derive(Clone, Debug)]
pub struct PipelineConfig {
    pub mappings: VisualMappings,
    pub danger: DangerConfig,
    pub safety: SafetyClamps,
    /// Weights used outside the danger bias window.
    pub idle_weights: WeightMap,
    pub pools: PatternPools,
    pub bubble_base_vmin: f32,
    pub rotation_interval_ms: f64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            mappings: VisualMappings::default(),
            danger: DangerConfig::default(),
            safety: SafetyClamps::default(),
            idle_weights: WeightMap::of(&[
                ("neutral", 0.70),
                ("calming", 0.10),
                ("strengthening", 0.20),
            ]),
            pools: default_pools(),
            bubble_base_vmin: BUBBLE_BASE_VMIN,
            rotation_interval_ms: ROTATION_INTERVAL_MS,
        }
    }
}
