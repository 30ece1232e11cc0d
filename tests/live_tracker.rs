mod common;

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use orbiteye::catalog;
use orbiteye::track::{FixFeed, LiveTracker, Status};
use orbiteye::{GeodeticFix, OrbitalElements, PropagationError, Propagator};

fn propagator(norad_id: u32, inclination_deg: f64) -> Arc<Propagator> {
    let (line1, line2) = common::circular_leo(norad_id, inclination_deg, 0.0);
    let elements = OrbitalElements::parse(Some("TEST SAT"), &line1, &line2).unwrap();
    Arc::new(Propagator::new(Arc::new(elements)).unwrap())
}

async fn wait_for_fix(feed: &FixFeed) -> GeodeticFix {
    for _ in 0..400 {
        if let Some(fix) = feed.latest() {
            return fix;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("no fix published within two seconds");
}

#[tokio::test]
async fn publishes_monotonic_fixes() {
    let mut tracker = LiveTracker::start(propagator(90001, 51.6), Duration::from_millis(5)).unwrap();
    let feed = tracker.feed();

    let first = wait_for_fix(&feed).await;
    tokio::time::sleep(Duration::from_millis(50)).await;
    let later = feed.latest().unwrap();

    assert!(later.timestamp > first.timestamp);
    assert_eq!(feed.status(), Status::Tracking);

    tracker.stop().await;
}

#[tokio::test]
async fn no_publish_after_stop_returns() {
    let mut tracker = LiveTracker::start(propagator(90002, 51.6), Duration::from_millis(5)).unwrap();
    let feed = tracker.feed();

    wait_for_fix(&feed).await;
    tracker.stop().await;
    assert!(!tracker.is_running());
    assert_eq!(feed.status(), Status::Idle);

    let frozen = feed.latest();
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(feed.latest(), frozen);
}

#[tokio::test]
async fn stop_is_idempotent() {
    let mut tracker = LiveTracker::start(propagator(90003, 51.6), Duration::from_millis(5)).unwrap();
    tracker.stop().await;
    tracker.stop().await;
    assert!(!tracker.is_running());
}

#[tokio::test]
async fn decayed_elements_never_publish() {
    // Catalog ISS set re-dated so the orbit sits past its decay point
    // right now.
    let entry = catalog::lookup("ISS (ZARYA)").unwrap();
    let line1 = common::with_epoch(entry.line1, Utc::now() - chrono::Duration::days(1203));
    let elements = OrbitalElements::parse(Some(entry.name), &line1, entry.line2).unwrap();
    let propagator = Arc::new(Propagator::new(Arc::new(elements)).unwrap());
    assert!(matches!(
        propagator.propagate(Utc::now()),
        Err(PropagationError::Decayed)
    ));

    let mut tracker = LiveTracker::start(propagator, Duration::from_millis(5)).unwrap();
    let feed = tracker.feed();
    for _ in 0..400 {
        if feed.status() != Status::Tracking {
            break;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }

    assert!(matches!(feed.status(), Status::Failed(_)));
    assert_eq!(feed.latest(), None);

    tracker.stop().await;
}

#[tokio::test]
async fn restart_on_new_elements_never_revives_the_old_feed() {
    let mut old = LiveTracker::start(propagator(90004, 51.6), Duration::from_millis(5)).unwrap();
    let old_feed = old.feed();
    wait_for_fix(&old_feed).await;
    old.stop().await;
    let frozen = old_feed.latest();

    let mut new = LiveTracker::start(propagator(90005, 97.4), Duration::from_millis(5)).unwrap();
    let new_feed = new.feed();
    wait_for_fix(&new_feed).await;
    tokio::time::sleep(Duration::from_millis(50)).await;

    assert_eq!(old_feed.latest(), frozen);
    assert_eq!(old_feed.status(), Status::Idle);

    new.stop().await;
}
