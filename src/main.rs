use clap::Parser;
use log::{error, info};
use pedometer_bridge::bridge::{EventEmitter, PedometerBridge, STEP_COUNTER_UPDATE_EVENT};
use pedometer_bridge::config::{Config, load_dotenv};
use pedometer_bridge::lifecycle::LifecycleCoordinator;
use pedometer_bridge::session::StepSession;
use pedometer_bridge::sim::{SimulatedStepSensor, run_walk_simulation};
use std::sync::Arc;
use tokio::signal;

/// Run the pedometer bridge against a simulated walk sensor.
#[derive(Parser, Debug)]
#[command(name = "pedometer-bridge", version)]
struct Args {
    /// Milliseconds between simulated walk ticks
    #[arg(long, env = "SIM_TICK_INTERVAL_MS")]
    tick_interval_ms: Option<u64>,

    /// Maximum steps per simulated tick
    #[arg(long, env = "SIM_MAX_STRIDE")]
    max_stride: Option<u32>,

    /// Pretend no step-counter hardware exists
    #[arg(long)]
    no_sensor: bool,
}

fn init_logger() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();
}

#[tokio::main]
async fn main() {
    init_logger();
    load_dotenv();
    info!("Starting pedometer bridge");

    let args = Args::parse();
    let mut config = Config::from_env();
    if let Some(ms) = args.tick_interval_ms {
        config.simulation.tick_interval_ms = ms;
    }
    if let Some(max) = args.max_stride {
        config.simulation.max_stride = max;
    }
    if args.no_sensor {
        config.simulation.sensor_available = false;
    }

    info!("Configuration loaded:");
    info!("  Reset policy: {:?}", config.reset_policy);
    info!("  Tick interval: {}ms", config.simulation.tick_interval_ms);
    info!(
        "  Stride range: {}..={}",
        config.simulation.min_stride, config.simulation.max_stride
    );

    let sensor = SimulatedStepSensor::new(config.simulation.sensor_available);
    let session = StepSession::new(sensor.clone(), config.reset_policy);
    let lifecycle = LifecycleCoordinator::new(session.clone());

    // Stand-in for the host event emitter: log each pushed payload.
    let emitter: EventEmitter = Arc::new(|name, payload| {
        info!("{} -> {}", name, payload);
    });
    let bridge = PedometerBridge::new(session, emitter);

    bridge.add_listener(STEP_COUNTER_UPDATE_EVENT);
    match bridge.start_step_counter_update().await {
        Ok(true) => info!("Step counting started"),
        Ok(false) => info!("Step counting already running"),
        Err(e) => {
            error!("{}: {}", e.code(), e);
            std::process::exit(1);
        }
    }

    let sim_task = run_walk_simulation(sensor, config.simulation.clone());

    info!("Pedometer bridge is running");
    info!("  - Press Ctrl+C to exit");
    signal::ctrl_c().await.expect("Failed to listen for Ctrl+C");

    info!("Shutting down");
    sim_task.abort();
    lifecycle.on_host_destroy();
}
