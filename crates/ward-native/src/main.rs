use std::thread;
use std::time::Duration;

use instant::Instant;
use ward_core::{
    CalibrationManager, CalibrationPhase, CalibrationPlan, Pipeline, PipelineConfig, SampleResult,
    SensorSource, SensorTuning, Session, TickOutcome,
};

use crate::sim::{ScenePlan, SimSensor};

mod sim;

const TICK_SLEEP_MS: u64 = 16; // ~60 Hz driver cadence
const EPISODE_DELAY_MS: f64 = 3_000.0;
const EPISODE_LEN_MS: f64 = 2_500.0;
const DEMO_RUN_MS: f64 = 14_500.0;

fn main() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();
    if let Err(e) = run() {
        log::error!("demo failed: {e:?}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let tuning = SensorTuning::default();
    // Shortened phases so the demo calibrates in a few seconds.
    let plan = CalibrationPlan {
        quiet_ms: 1_200.0,
        cover_ms: 500.0,
        bright_ms: 500.0,
        stabilize_ms: 700.0,
    };
    let scene = ScenePlan::from_calibration(&plan, EPISODE_DELAY_MS, EPISODE_LEN_MS);
    let mut source = SimSensor::new(42, tuning, scene);
    let mut manager = CalibrationManager::new(plan, tuning.silence_floor_db);

    let start = Instant::now();
    let now_ms = || start.elapsed().as_secs_f64() * 1000.0;
    let mut progress = |msg: &str| log::info!("[calibrate] {msg}");

    manager.begin(now_ms(), &mut progress);
    while manager.phase() != CalibrationPhase::Complete {
        let t = now_ms();
        if let SampleResult::Ready(sample) = source.sample(t) {
            manager.feed(&sample, t, &mut progress);
        }
        thread::sleep(Duration::from_millis(TICK_SLEEP_MS));
    }
    let cal = manager.finish()?;

    let pipeline = Pipeline::new(PipelineConfig::default(), cal, now_ms());
    let mut session = Session::new(source, pipeline);

    let mut last_log_ms = 0.0f64;
    loop {
        let t = now_ms();
        match session.tick(t) {
            TickOutcome::Frame(report) => {
                if t - last_log_ms >= 1_000.0 {
                    last_log_ms = t;
                    let r = &report.render;
                    log::info!(
                        "[frame] bright {:.2} bloom {:.2} scale {:.2} rot {:.1} deg/s absorb {:.2} bubble {:.1} vmin active {}",
                        r.brightness,
                        r.bloom,
                        r.scale,
                        r.rotation_deg_per_sec,
                        r.absorb_level,
                        r.bubble_radius_vmin,
                        report.danger_active
                    );
                }
            }
            TickOutcome::Idle => {}
            TickOutcome::Stopped => break,
        }
        if t >= DEMO_RUN_MS {
            session.request_stop();
        }
        thread::sleep(Duration::from_millis(TICK_SLEEP_MS));
    }
    log::info!("[session] demo complete");
    Ok(())
}
