//! Process startup for both binaries
//!
//! Loads configuration, initialises logging, then runs the blocking
//! pipeline work on the tokio blocking pool while the async side watches
//! for shutdown signals. Each function returns the process exit status.

use crate::app::cli::{GlobalArgs, MonitorArgs, SensorArgs};
use crate::app::config::{self, FileConfig};
use crate::core::error_handling::log_error_with_context;
use crate::core::logging::init_logging;
use crate::core::shutdown::{ShutdownCoordinator, FORCED_EXIT_CODE};
use crate::pipeline::{run_monitor, run_sensor};
use std::time::Duration;

/// How long the sensor may take to notice a shutdown request
const SENSOR_STOP_GRACE: Duration = Duration::from_secs(2);

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;

fn build_runtime() -> Option<tokio::runtime::Runtime> {
    match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => Some(runtime),
        Err(e) => {
            eprintln!("Error: cannot start async runtime: {}", e);
            None
        }
    }
}

/// Load the configuration file and start logging
async fn prepare(global: &GlobalArgs, command: &str) -> Option<FileConfig> {
    let file_config = match config::load(global.config_file.as_deref()).await {
        Ok(file_config) => file_config,
        Err(e) => {
            // Logging is configured from this file, so report directly
            eprintln!("Error: {}", e);
            return None;
        }
    };

    let logging = global.logging(&file_config);
    if let Err(e) = init_logging(
        logging.level.as_deref(),
        logging.format.as_deref(),
        logging.file.as_deref(),
        logging.color,
    ) {
        eprintln!("Error: cannot initialise logging: {}", e);
        return None;
    }

    log::debug!("{} starting (version {})", command, env!("CARGO_PKG_VERSION"));
    log::trace!("Configuration: {:?}", file_config);
    Some(file_config)
}

/// Run the sensor binary
pub fn sensor(args: SensorArgs) -> i32 {
    let Some(runtime) = build_runtime() else {
        return EXIT_FAILURE;
    };

    let status = runtime.block_on(async move {
        let Some(file_config) = prepare(&args.global, "sensor").await else {
            return EXIT_FAILURE;
        };
        let settings = args.resolve(&file_config);
        log::debug!("Sensor settings: {:?}", settings);

        let coordinator = ShutdownCoordinator::new();
        coordinator.install_signal_handlers();
        let mut shutdown_rx = coordinator.subscribe();
        let flag = coordinator.flag();

        let mut task = tokio::task::spawn_blocking(move || run_sensor(&settings, &flag));

        let joined = tokio::select! {
            joined = &mut task => joined,
            _ = shutdown_rx.recv() => {
                // The pacing loop polls the flag; opening the pipe does not
                match tokio::time::timeout(SENSOR_STOP_GRACE, &mut task).await {
                    Ok(joined) => joined,
                    Err(_) => {
                        log::warn!("Sensor is blocked waiting for the monitor; exiting");
                        return FORCED_EXIT_CODE;
                    }
                }
            }
        };

        match joined {
            Ok(Ok(_)) => EXIT_SUCCESS,
            Ok(Err(e)) => {
                log_error_with_context(&e, "Sensor");
                EXIT_FAILURE
            }
            Err(e) => {
                log::error!("FATAL: Sensor task failed: {}", e);
                EXIT_FAILURE
            }
        }
    });

    runtime.shutdown_background();
    status
}

/// Run the monitor binary
pub fn monitor(args: MonitorArgs) -> i32 {
    let Some(runtime) = build_runtime() else {
        return EXIT_FAILURE;
    };

    let status = runtime.block_on(async move {
        let Some(file_config) = prepare(&args.global, "monitor").await else {
            return EXIT_FAILURE;
        };
        let settings = args.resolve(&file_config);

        let coordinator = ShutdownCoordinator::new();
        coordinator.install_signal_handlers();
        let mut shutdown_rx = coordinator.subscribe();

        let task = tokio::task::spawn_blocking(move || run_monitor(&settings));

        tokio::select! {
            joined = task => match joined {
                Ok(Ok(_)) => EXIT_SUCCESS,
                Ok(Err(e)) => {
                    log_error_with_context(&e, "Monitor");
                    EXIT_FAILURE
                }
                Err(e) => {
                    log::error!("FATAL: Monitor task failed: {}", e);
                    EXIT_FAILURE
                }
            },
            _ = shutdown_rx.recv() => {
                log::warn!("Shutdown requested; abandoning pipe workers");
                FORCED_EXIT_CODE
            }
        }
    });

    runtime.shutdown_background();
    status
}
