use clap::Parser;
use std::{path::PathBuf, time::Instant};
use tracing::info;

use tracker_lib::{
    clock::SystemClock,
    config::Config,
    schedule::Schedule,
    service::{ServiceConfig, TrackerService},
    source::CelestrakSource,
    store::JsonFileStore,
};

#[derive(Parser, Debug)]
#[command(version)]
struct Opts {
    /// Tracker configuration toml file.
    ///
    /// Built-in defaults are used when not provided.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Insert satellites from the feed that the store doesn't have yet,
    /// before starting the refresh cycles
    #[arg(long)]
    seed: bool,

    /// Run every refresh cycle once and exit
    #[arg(long)]
    once: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();
    let opts = Opts::parse();

    let shutdown = shutdown::Shutdown::install()?;

    let config = match &opts.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    info!(config = ?config, "Starting tracker");

    let store = JsonFileStore::open(&config.store.path)?;
    let source = CelestrakSource::from_config(&config.feed)?;
    let service_config = ServiceConfig::try_from(&config)?;
    let mut service = TrackerService::new(store, source, SystemClock, service_config);

    if opts.seed {
        let report = service.seed_catalog()?;
        info!(
            inserted = report.updated,
            failed = report.failed,
            "Seeded the satellite store"
        );
    }

    let mut schedule = Schedule::new(&config.schedule, Instant::now());
    'cycles: loop {
        for cycle in schedule.due(Instant::now()) {
            if shutdown.requested() {
                break 'cycles;
            }
            service.run_cycle(cycle);
        }

        if opts.once {
            break;
        }
        match schedule.next_deadline() {
            Some(deadline) if shutdown.sleep_until(deadline) => (),
            _ => break,
        }
    }

    info!(satellites = service.store().memory().len(), "Stopped");

    Ok(())
}

mod shutdown {
    use std::{
        sync::{
            atomic::{AtomicBool, Ordering},
            Arc,
        },
        time::{Duration, Instant},
    };
    use tracing::warn;

    /// Longest stretch slept without checking for a shutdown request
    const POLL_INTERVAL: Duration = Duration::from_millis(250);

    /// 128 + SIGINT on unix, STATUS_CONTROL_C_EXIT elsewhere
    const FORCED_EXIT_CODE: i32 = if cfg!(target_family = "unix") {
        130
    } else {
        0xC000013Au32 as i32
    };

    /// Set by the first Ctrl-C, the second one exits right away
    #[derive(Clone, Debug)]
    pub struct Shutdown(Arc<AtomicBool>);

    impl Shutdown {
        pub fn install() -> Result<Self, ctrlc::Error> {
            let flag = Arc::new(AtomicBool::new(false));
            let handler_flag = flag.clone();
            ctrlc::set_handler(move || {
                if handler_flag.swap(true, Ordering::SeqCst) {
                    std::process::exit(FORCED_EXIT_CODE);
                }
                warn!("Shutting down after the current cycle, Ctrl-C again to exit now");
            })?;
            Ok(Self(flag))
        }

        pub fn requested(&self) -> bool {
            self.0.load(Ordering::SeqCst)
        }

        /// Sleeps until `deadline`, returning false if shutdown was requested first
        pub fn sleep_until(&self, deadline: Instant) -> bool {
            loop {
                if self.requested() {
                    return false;
                }
                let now = Instant::now();
                if now >= deadline {
                    return true;
                }
                std::thread::sleep((deadline - now).min(POLL_INTERVAL));
            }
        }
    }

}
