use chrono::{Duration, Utc};
use std::sync::Arc;
use std::time::Duration as StdDuration;

use super::error::TrackError;
use super::path::{build_path, Path, PATH_STEP, PATH_WINDOW};
use super::tracker::{FixFeed, LiveTracker, LIVE_CADENCE};
use super::types::{SessionState, Status, ViewMode};
use crate::elements::OrbitalElements;
use crate::geodetic::GeodeticFix;
use crate::propagator::Propagator;

/// Single-body tracking root: one element set, one precomputed path, one
/// live tracker. `load` supersedes all three atomically; the old tracker is
/// fully stopped before anything from the new element set is installed.
pub struct TrackSession {
    state: SessionState,
    elements: Option<Arc<OrbitalElements>>,
    path: Option<Arc<Path>>,
    tracker: Option<LiveTracker>,
    view_mode: ViewMode,
    window: Duration,
    step: Duration,
    cadence: StdDuration,
}

impl Default for TrackSession {
    fn default() -> Self {
        Self::new()
    }
}

impl TrackSession {
    pub fn new() -> Self {
        Self::with_timing(PATH_WINDOW, PATH_STEP, LIVE_CADENCE)
    }

    pub fn with_timing(window: Duration, step: Duration, cadence: StdDuration) -> Self {
        Self {
            state: SessionState::Empty,
            elements: None,
            path: None,
            tracker: None,
            view_mode: ViewMode::default(),
            window,
            step,
            cadence,
        }
    }

    /// Parses a new element set and rebuilds the session around it. A parse
    /// failure leaves the current session untouched; any later failure ends
    /// the session empty, never half-initialised.
    pub async fn load(
        &mut self,
        name: Option<&str>,
        line1: &str,
        line2: &str,
    ) -> Result<(), TrackError> {
        // Parse before any teardown so bad text cannot take down a running
        // session.
        let elements = Arc::new(OrbitalElements::parse(name, line1, line2)?);

        self.teardown().await;
        self.state = SessionState::Loading;
        log::info!(
            "loading elements for {} (norad {})",
            elements.name().unwrap_or("unnamed object"),
            elements.norad_id()
        );

        let propagator = match Propagator::new(elements.clone()) {
            Ok(p) => Arc::new(p),
            Err(e) => {
                self.state = SessionState::Empty;
                return Err(TrackError::Propagation(e));
            }
        };

        let path = Arc::new(build_path(&propagator, Utc::now(), self.window, self.step));
        if path.is_empty() {
            log::warn!("ground track is empty over the sampling window");
        }

        let tracker = match LiveTracker::start(propagator, self.cadence) {
            Ok(t) => t,
            Err(e) => {
                self.state = SessionState::Empty;
                return Err(e);
            }
        };

        self.elements = Some(elements);
        self.path = Some(path);
        self.tracker = Some(tracker);
        self.state = SessionState::Active;
        Ok(())
    }

    /// Cancels the live tracker and empties the session.
    pub async fn close(&mut self) {
        self.teardown().await;
        self.state = SessionState::Empty;
    }

    async fn teardown(&mut self) {
        if let Some(mut tracker) = self.tracker.take() {
            tracker.stop().await;
        }
        self.elements = None;
        self.path = None;
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn status(&self) -> Status {
        match &self.tracker {
            Some(tracker) => tracker.status(),
            None => match self.state {
                SessionState::Loading => Status::Loading,
                _ => Status::Idle,
            },
        }
    }

    pub fn elements(&self) -> Option<&Arc<OrbitalElements>> {
        self.elements.as_ref()
    }

    pub fn path(&self) -> Option<Arc<Path>> {
        self.path.clone()
    }

    pub fn latest_fix(&self) -> Option<GeodeticFix> {
        self.tracker.as_ref().and_then(|t| t.latest())
    }

    pub fn fix_feed(&self) -> Option<FixFeed> {
        self.tracker.as_ref().map(|t| t.feed())
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.view_mode = mode;
    }
}
