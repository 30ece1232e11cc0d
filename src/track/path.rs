use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::geodetic;
use crate::propagator::Propagator;

pub const PATH_WINDOW: Duration = Duration::seconds(7200);
pub const PATH_STEP: Duration = Duration::seconds(20);

/// One renderable ground-track point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrackSample {
    pub timestamp: DateTime<Utc>,
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    pub height_km: f64,
}

/// A time-ordered forward ground track. Immutable after construction;
/// superseding element sets rebuild it from scratch. May be empty when every
/// sample in the window failed, which is a valid degraded display state.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Path {
    samples: Vec<TrackSample>,
}

impl Path {
    pub fn samples(&self) -> &[TrackSample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn start(&self) -> Option<DateTime<Utc>> {
        self.samples.first().map(|s| s.timestamp)
    }

    pub fn end(&self) -> Option<DateTime<Utc>> {
        self.samples.last().map(|s| s.timestamp)
    }
}

/// Samples the ground track over `[start, start + window)` at a fixed step.
/// Timestamps whose propagation fails are skipped, not fatal; the result
/// stays strictly time-ordered.
pub fn build_path(
    propagator: &Propagator,
    start: DateTime<Utc>,
    window: Duration,
    step: Duration,
) -> Path {
    if step <= Duration::zero() {
        log::warn!("non-positive path step {}, returning empty path", step);
        return Path::default();
    }

    let end = match start.checked_add_signed(window) {
        Some(end) => end,
        None => {
            log::warn!("window end overflows the time range, returning empty path");
            return Path::default();
        }
    };
    let mut cursor = start;
    let mut samples = Vec::new();

    while cursor < end {
        match propagator.propagate(cursor) {
            Ok(state) => {
                let fix = geodetic::fix_from_state(&state);
                samples.push(TrackSample {
                    timestamp: cursor,
                    latitude_deg: fix.latitude_deg,
                    longitude_deg: fix.longitude_deg,
                    height_km: fix.height_km,
                });
            }
            Err(e) => {
                log::debug!("skipping path sample at {}: {}", cursor, e);
            }
        }
        cursor = match cursor.checked_add_signed(step) {
            Some(next) => next,
            None => break,
        };
    }

    Path { samples }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::elements::OrbitalElements;
    use std::sync::Arc;

    fn iss_propagator() -> Propagator {
        let entry = catalog::lookup("ISS (ZARYA)").unwrap();
        let elements =
            OrbitalElements::parse(Some(entry.name), entry.line1, entry.line2).unwrap();
        Propagator::new(Arc::new(elements)).unwrap()
    }

    #[test]
    fn default_window_yields_360_ordered_samples() {
        let propagator = iss_propagator();
        let start = propagator.elements().epoch();

        let path = build_path(&propagator, start, PATH_WINDOW, PATH_STEP);

        assert_eq!(path.len(), 360);
        assert_eq!(path.start(), Some(start));
        assert_eq!(path.end(), Some(start + PATH_WINDOW - PATH_STEP));
        for pair in path.samples().windows(2) {
            assert!(pair[0].timestamp < pair[1].timestamp);
        }
        for sample in path.samples() {
            assert!((-180.0..=180.0).contains(&sample.longitude_deg));
            assert!((-90.0..=90.0).contains(&sample.latitude_deg));
        }
    }

    #[test]
    fn empty_window_yields_empty_path() {
        let propagator = iss_propagator();
        let start = propagator.elements().epoch();

        let path = build_path(&propagator, start, Duration::zero(), PATH_STEP);

        assert!(path.is_empty());
        assert_eq!(path.start(), None);
    }

    #[test]
    fn step_longer_than_window_yields_single_sample() {
        let propagator = iss_propagator();
        let start = propagator.elements().epoch();

        let path = build_path(
            &propagator,
            start,
            Duration::seconds(60),
            Duration::seconds(90),
        );

        assert_eq!(path.len(), 1);
        assert_eq!(path.start(), Some(start));
    }

    #[test]
    fn non_positive_step_yields_empty_path() {
        let propagator = iss_propagator();
        let start = propagator.elements().epoch();

        let path = build_path(&propagator, start, PATH_WINDOW, Duration::zero());

        assert!(path.is_empty());
    }

    #[test]
    fn decay_onset_truncates_but_never_aborts() {
        let propagator = iss_propagator();
        // The catalog ISS set falls below the model's altitude floor about
        // 1202 days past its epoch; this window spans the crossing.
        let start = propagator.elements().epoch() + Duration::days(1201);

        let path = build_path(&propagator, start, Duration::hours(26), Duration::minutes(20));

        assert!(!path.is_empty());
        assert!(path.len() < 78);
        assert_eq!(path.start(), Some(start));
        for pair in path.samples().windows(2) {
            assert!(pair[0].timestamp < pair[1].timestamp);
        }
    }

    #[test]
    fn window_after_decay_yields_empty_path() {
        let propagator = iss_propagator();
        let start = propagator.elements().epoch() + Duration::days(1210);

        let path = build_path(&propagator, start, PATH_WINDOW, PATH_STEP);

        assert!(path.is_empty());
    }

    #[test]
    fn oversized_window_yields_empty_path() {
        let propagator = iss_propagator();
        let start = propagator.elements().epoch();

        let path = build_path(&propagator, start, Duration::days(400_000_000), PATH_STEP);

        assert!(path.is_empty());
    }

    #[test]
    fn rebuild_does_not_disturb_previous_path() {
        let propagator = iss_propagator();
        let start = propagator.elements().epoch();

        let first = build_path(&propagator, start, Duration::seconds(600), PATH_STEP);
        let snapshot: Vec<_> = first.samples().to_vec();

        let _second = build_path(
            &propagator,
            start + Duration::seconds(300),
            Duration::seconds(600),
            PATH_STEP,
        );

        assert_eq!(first.samples(), snapshot.as_slice());
    }
}
