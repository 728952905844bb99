// Shared tuning constants for the sensor pipeline and the danger response.

// Sensor conditioning
pub const DEFAULT_FFT_SIZE: usize = 2048; // analyser window; bin count is half
pub const MIC_SMOOTHING_MS: f32 = 120.0; // EMA time constant for mic features
pub const CAM_SMOOTHING_MS: f32 = 250.0; // EMA time constant for camera features
pub const HIGH_BAND_SPLIT_HZ: f32 = 2000.0; // mid/high boundary
pub const LOW_BAND_CEIL_HZ: f32 = 250.0; // low/mid boundary
pub const SILENCE_FLOOR_DB: f32 = -55.0; // mic silence floor, never calibrated below
pub const SPECTRUM_FLOOR_DB: f32 = -120.0; // non-finite analyser bins clamp here

// Numeric guards
pub const RANGE_EPS: f32 = 1e-6; // degenerate mapping span floor
pub const DB_EPS: f32 = 1e-6; // keeps log10 finite at zero amplitude
pub const LUMI_DT_EPS: f32 = 1e-3; // drop-rate division floor (seconds)

// Danger detection defaults
pub const DANGER_REQUIRE_ANY: usize = 2; // channels over threshold to arm
pub const DANGER_SUSTAIN_MS: f64 = 1200.0;
pub const DANGER_COOLDOWN_MS: f64 = 6000.0;
pub const THRESH_RMS_DB: f32 = -20.0;
pub const THRESH_SPECTRAL_FLUX: f32 = 0.01;
pub const THRESH_HIGH_BAND_RATIO: f32 = 0.3;
pub const THRESH_LUMI_DROP_RATE: f32 = 0.5;
pub const THRESH_MOTION_SCORE: f32 = 0.6;

// Danger response
pub const DANGER_BIAS_DURATION_MS: f64 = 8000.0; // pattern bias window after a trigger
pub const ACTIVE_ROTATION_BOOST_DEG: f32 = 2.0; // extra deg/s while active (Modest)
pub const ACTIVE_BRIGHTNESS_SHIFT: f32 = 0.05; // stealth dims, deter brightens
pub const ACTIVE_EDGE_GAIN: f32 = 1.6;
pub const ACTIVE_MESH_GAIN: f32 = 1.35;

// Safety clamps
pub const MIN_BRIGHTNESS: f32 = 0.05;
pub const MAX_BRIGHTNESS: f32 = 0.95;

// Visual output ranges
pub const SCALE_MIN: f32 = 0.1;
pub const SCALE_MAX: f32 = 5.0;
pub const BUBBLE_BASE_VMIN: f32 = 18.0; // idle bubble radius
pub const BUBBLE_MAX_ADD_VMIN: f32 = 18.0; // flux-driven growth on top of base
pub const ABSORB_DECAY_MS: f32 = 350.0;
pub const BUBBLE_DECAY_MS: f32 = 250.0;

// Pattern scheduling
pub const ROTATION_INTERVAL_MS: f64 = 8000.0; // fixed wall-clock rotation cadence
pub const WEIGHT_REPEAT_SCALE: f32 = 10.0; // repeats = round(weight * scale / total)

// Calibration phase durations
pub const CAL_QUIET_MS: f64 = 5000.0;
pub const CAL_COVER_MS: f64 = 2000.0;
pub const CAL_BRIGHT_MS: f64 = 2000.0;
pub const CAL_STABILIZE_MS: f64 = 3000.0;
pub const MOTION_BASE_FACTOR: f32 = 0.7; // conservative motion baseline
