//! Shutdown Coordination
//!
//! Turns SIGINT/SIGTERM/SIGHUP into a shutdown request that both async code
//! (broadcast channel) and blocking worker threads (atomic flag) can observe.
//! A second signal exits the process immediately with status 130.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::broadcast;

/// Exit status used when a second signal forces termination
pub const FORCED_EXIT_CODE: i32 = 130;

/// Coordinates graceful shutdown across the application
pub struct ShutdownCoordinator {
    shutdown_tx: broadcast::Sender<()>,
    shutdown_requested: Arc<AtomicBool>,
}

impl ShutdownCoordinator {
    pub fn new() -> Self {
        let (shutdown_tx, _) = broadcast::channel(8);
        Self {
            shutdown_tx,
            shutdown_requested: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Subscribe to shutdown notifications
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.shutdown_tx.subscribe()
    }

    /// Flag for blocking code that cannot await the broadcast channel
    pub fn flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.shutdown_requested)
    }

    pub fn trigger_shutdown(&self) {
        // Release pairs with the Acquire loads in is_shutdown_requested and worker loops
        self.shutdown_requested.store(true, Ordering::Release);
        let _ = self.shutdown_tx.send(());
    }

    pub fn is_shutdown_requested(&self) -> bool {
        self.shutdown_requested.load(Ordering::Acquire)
    }

    /// Install signal handlers; must be called from within a tokio runtime
    pub fn install_signal_handlers(&self) {
        setup_signal_handlers(self.shutdown_tx.clone(), self.flag());
    }
}

impl Default for ShutdownCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

fn on_signal(
    name: &str,
    counter: &AtomicUsize,
    requested: &AtomicBool,
    tx: &broadcast::Sender<()>,
) {
    let prev = counter.fetch_add(1, Ordering::AcqRel);
    requested.store(true, Ordering::Release);
    let _ = tx.send(());
    if prev >= 1 {
        log::warn!("{} received again; exiting", name);
        std::process::exit(FORCED_EXIT_CODE);
    }
    log::info!("{} received; shutting down (repeat to force exit)", name);
}

fn setup_signal_handlers(shutdown_tx: broadcast::Sender<()>, shutdown_requested: Arc<AtomicBool>) {
    let signal_count = Arc::new(AtomicUsize::new(0));

    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let signals = [
            (SignalKind::interrupt(), "SIGINT"),
            (SignalKind::terminate(), "SIGTERM"),
            (SignalKind::hangup(), "SIGHUP"),
        ];

        for (kind, name) in signals {
            let tx = shutdown_tx.clone();
            let requested = shutdown_requested.clone();
            let counter = signal_count.clone();

            tokio::spawn(async move {
                match signal(kind) {
                    Ok(mut sig) => {
                        while sig.recv().await.is_some() {
                            on_signal(name, &counter, &requested, &tx);
                        }
                    }
                    Err(e) => log::debug!("Cannot listen for {}: {}", name, e),
                }
            });
        }
    }

    #[cfg(not(unix))]
    {
        tokio::spawn(async move {
            while tokio::signal::ctrl_c().await.is_ok() {
                on_signal("Ctrl-C", &signal_count, &shutdown_requested, &shutdown_tx);
            }
        });
    }
}
