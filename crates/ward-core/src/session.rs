//! Session loop: polls the sensor source once per tick, runs the pipeline,
//! and handles cooperative shutdown.

use crate::pipeline::{Pipeline, RenderParams, TickReport};
use crate::sample::{SampleResult, SensorSource};

/// What one driver callback produced.
#[derive(Debug)]
pub enum TickOutcome {
    /// A frame was processed; the render record should be forwarded.
    Frame(TickReport),
    /// Sensors not ready; the last emitted output still stands.
    Idle,
    /// Teardown ran (or already ran); schedule no further ticks.
    Stopped,
}

/// Owns the sensor source and pipeline for one session. Cancellation is
/// cooperative: a stop request takes effect at the next tick, which runs a
/// bounded teardown instead of processing a frame.
pub struct Session<S: SensorSource> {
    source: S,
    pipeline: Pipeline,
    last_render: Option<RenderParams>,
    stop_requested: bool,
    stopped: bool,
}

impl<S: SensorSource> Session<S> {
    pub fn new(source: S, pipeline: Pipeline) -> Self {
        Self {
            source,
            pipeline,
            last_render: None,
            stop_requested: false,
            stopped: false,
        }
    }

    /// Flag the session to tear down on its next tick.
    pub fn request_stop(&mut self) {
        self.stop_requested = true;
    }

    pub fn tick(&mut self, now_ms: f64) -> TickOutcome {
        if self.stopped {
            return TickOutcome::Stopped;
        }
        if self.stop_requested {
            if let Err(e) = self.source.release() {
                // Logged, never propagated; recovery is a session restart.
                log::warn!("[session] teardown: {e}");
            }
            self.stopped = true;
            return TickOutcome::Stopped;
        }
        match self.source.sample(now_ms) {
            SampleResult::Ready(sample) if sample.is_finite() => {
                let report = self.pipeline.tick(&sample, now_ms);
                self.last_render = Some(report.render.clone());
                TickOutcome::Frame(report)
            }
            _ => TickOutcome::Idle,
        }
    }

    /// The most recent render record, held across not-ready ticks.
    pub fn last_render(&self) -> Option<&RenderParams> {
        self.last_render.as_ref()
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }
}
