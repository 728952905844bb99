// EMA conditioning: time-constant behavior under measured frame intervals.

use ward_core::conditioner::{Channel, SignalConditioner};

#[test]
fn first_update_biases_toward_raw_by_one_minus_alpha() {
    let mut ema = SignalConditioner::new();
    let smoothing_ms: f32 = 120.0;
    let dt: f32 = 0.016;
    let alpha = (-(dt * 1000.0) / smoothing_ms).exp();
    let v = ema.update(Channel::MicRms, 1.0, smoothing_ms, dt);
    assert!(((1.0 - alpha) - v).abs() < 1e-6);
}

#[test]
fn converges_to_constant_input() {
    let mut ema = SignalConditioner::new();
    let mut v = 0.0;
    for _ in 0..400 {
        v = ema.update(Channel::Luminance, 0.8, 250.0, 0.016);
    }
    assert!((v - 0.8).abs() < 1e-3, "did not converge: {v}");
}

#[test]
fn one_time_constant_closes_gap_to_one_over_e() {
    let mut ema = SignalConditioner::new();
    // dt equal to the smoothing time: remaining gap should be exp(-1)
    let v = ema.update(Channel::Motion, 1.0, 120.0, 0.120);
    let expected = 1.0 - (-1.0f32).exp();
    assert!((v - expected).abs() < 1e-5, "got {v}, expected {expected}");
}

#[test]
fn two_half_steps_equal_one_full_step() {
    // The measured-dt formulation makes the filter frame-rate invariant.
    let mut split = SignalConditioner::new();
    split.update(Channel::SpectralFlux, 1.0, 200.0, 0.05);
    let a = split.update(Channel::SpectralFlux, 1.0, 200.0, 0.05);

    let mut whole = SignalConditioner::new();
    let b = whole.update(Channel::SpectralFlux, 1.0, 200.0, 0.10);

    assert!((a - b).abs() < 1e-6, "split {a} vs whole {b}");
}

#[test]
fn zero_dt_leaves_value_unchanged() {
    let mut ema = SignalConditioner::new();
    ema.update(Channel::MicRms, 1.0, 120.0, 0.016);
    let before = ema.get(Channel::MicRms);
    let after = ema.update(Channel::MicRms, 100.0, 120.0, 0.0);
    assert!((before - after).abs() < 1e-6);
}

#[test]
fn channels_are_independent_and_reset_clears_all() {
    let mut ema = SignalConditioner::new();
    ema.update(Channel::MicRms, 1.0, 120.0, 0.016);
    assert_eq!(ema.get(Channel::Luminance), 0.0);
    assert!(ema.get(Channel::MicRms) > 0.0);

    ema.reset();
    assert_eq!(ema.get(Channel::MicRms), 0.0);
}
