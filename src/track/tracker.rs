use chrono::Utc;
use std::sync::{Arc, Mutex as StdMutex};
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

use super::error::TrackError;
use super::types::Status;
use crate::geodetic::{self, GeodeticFix};
use crate::propagator::{PropagationError, Propagator};

pub const LIVE_CADENCE: Duration = Duration::from_secs(1);

#[derive(Debug)]
struct Shared {
    latest: Option<GeodeticFix>,
    status: Status,
}

#[derive(Debug)]
struct WorkerHandle {
    stop_tx: oneshot::Sender<()>,
    join: JoinHandle<()>,
}

/// Read handle onto the published-fix slot. Cheap to clone; any number of
/// readers may observe the slot while the worker writes it.
#[derive(Clone)]
pub struct FixFeed {
    shared: Arc<StdMutex<Shared>>,
}

impl FixFeed {
    pub fn latest(&self) -> Option<GeodeticFix> {
        self.shared.lock().unwrap().latest
    }

    pub fn status(&self) -> Status {
        self.shared.lock().unwrap().status.clone()
    }
}

/// A recurring worker that propagates to "now" at a fixed cadence and
/// publishes the fix. One worker per element set; swapping element sets
/// means stopping this tracker and starting a new one.
#[derive(Debug)]
pub struct LiveTracker {
    shared: Arc<StdMutex<Shared>>,
    worker: Option<WorkerHandle>,
}

impl LiveTracker {
    /// Spawns the worker. The first tick fires immediately, so a fix is
    /// normally available within one propagation of the call.
    pub fn start(propagator: Arc<Propagator>, cadence: Duration) -> Result<Self, TrackError> {
        if cadence.is_zero() {
            return Err(TrackError::Scheduling(
                "live cadence must be non-zero".to_string(),
            ));
        }

        let shared = Arc::new(StdMutex::new(Shared {
            latest: None,
            status: Status::Tracking,
        }));
        let (stop_tx, stop_rx) = oneshot::channel();
        let join = tokio::spawn(run_feed_loop(shared.clone(), propagator, cadence, stop_rx));

        Ok(Self {
            shared,
            worker: Some(WorkerHandle { stop_tx, join }),
        })
    }

    pub fn feed(&self) -> FixFeed {
        FixFeed {
            shared: self.shared.clone(),
        }
    }

    pub fn latest(&self) -> Option<GeodeticFix> {
        self.shared.lock().unwrap().latest
    }

    pub fn status(&self) -> Status {
        self.shared.lock().unwrap().status.clone()
    }

    pub fn is_running(&self) -> bool {
        self.worker.is_some()
    }

    /// Stops the worker and waits for it to finish. Once this returns, no
    /// further publish into the slot can occur.
    pub async fn stop(&mut self) {
        if let Some(worker) = self.worker.take() {
            let _ = worker.stop_tx.send(());
            let _ = worker.join.await;
        }
        let mut locked = self.shared.lock().unwrap();
        locked.status = Status::Idle;
    }
}

async fn run_feed_loop(
    shared: Arc<StdMutex<Shared>>,
    propagator: Arc<Propagator>,
    cadence: Duration,
    mut stop_rx: oneshot::Receiver<()>,
) {
    let mut ticker = interval(cadence);
    // An overrunning tick delays the next one instead of bursting, so
    // publishes stay serialised and monotonic.
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        let stopped = tokio::select! {
            _ = ticker.tick() => false,
            _ = &mut stop_rx => true,
        };
        if stopped {
            return;
        }

        let now = Utc::now();
        match propagator.propagate(now) {
            Ok(state) => {
                let fix = geodetic::fix_from_state(&state);
                let mut locked = shared.lock().unwrap();
                locked.latest = Some(fix);
                locked.status = Status::Tracking;
            }
            Err(e) => {
                // The previous fix stays published; only the status changes.
                log::warn!("live tick failed at {}: {}", now, e);
                let status = match e {
                    PropagationError::NumericalDivergence(_) => Status::Degraded(e.to_string()),
                    PropagationError::Decayed | PropagationError::InvalidElements(_) => {
                        Status::Failed(e.to_string())
                    }
                };
                let mut locked = shared.lock().unwrap();
                locked.status = status;
            }
        }
    }
}
