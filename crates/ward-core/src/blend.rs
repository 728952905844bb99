//! Exponential approach-to-target blending for derived visual intensities.

/// Continuous-time first-order low-pass step.
///
/// `dt = 0` leaves the value unchanged; as `decay_ms` approaches zero the
/// value snaps to the target within one step.
pub fn approach(current: f32, target: f32, decay_ms: f32, dt: f32) -> f32 {
    let tau = (decay_ms / 1000.0).max(1e-6);
    let alpha = (-dt / tau).exp();
    alpha * current + (1.0 - alpha) * target
}

/// A single blended parameter with its own decay time.
#[derive(Clone, Copy, Debug)]
pub struct ParameterBlender {
    value: f32,
    decay_ms: f32,
}

impl ParameterBlender {
    pub fn new(decay_ms: f32) -> Self {
        Self {
            value: 0.0,
            decay_ms,
        }
    }

    pub fn step(&mut self, target: f32, dt: f32) -> f32 {
        self.value = approach(self.value, target, self.decay_ms, dt);
        self.value
    }

    pub fn value(&self) -> f32 {
        self.value
    }
}
