#![allow(dead_code)]

use chrono::{DateTime, Datelike, Timelike, Utc};

/// Formats a checksum-valid element pair for a near-circular low-earth
/// orbit with its epoch at the current instant, so live propagation in
/// tests always runs close to epoch.
pub fn circular_leo(norad_id: u32, inclination_deg: f64, raan_deg: f64) -> (String, String) {
    let now = Utc::now();
    let epoch_year = (now.year() % 100) as u8;
    let epoch_day = now.ordinal() as f64
        + now.hour() as f64 / 24.0
        + now.minute() as f64 / 1440.0
        + now.second() as f64 / 86400.0;

    // 15.5 rev/day puts the orbit near 390 km altitude.
    let mean_motion = 15.5;

    let line1 = format!(
        "1 {:05}U 00000A   {:02}{:012.8}  .00000000  00000-0  00000-0 0    1",
        norad_id, epoch_year, epoch_day
    );
    let line1 = format!("{}{}", line1, checksum(&line1));

    let line2 = format!(
        "2 {:05} {:>8.4} {:>8.4} 0001000 {:>8.4} {:>8.4} {:>11.8}{:05}",
        norad_id, inclination_deg, raan_deg, 0.0, 0.0, mean_motion, 1u32
    );
    let line2 = format!("{}{}", line2, checksum(&line2));

    (line1, line2)
}

/// Rewrites the epoch field of a first element line to the given instant
/// and repairs the checksum, so tests can place an existing set anywhere
/// in its validity span relative to now.
pub fn with_epoch(line1: &str, epoch: DateTime<Utc>) -> String {
    let epoch_year = (epoch.year() % 100) as u8;
    let epoch_day = epoch.ordinal() as f64
        + epoch.hour() as f64 / 24.0
        + epoch.minute() as f64 / 1440.0
        + epoch.second() as f64 / 86400.0;

    let redated = format!(
        "{}{:02}{:012.8}{}",
        &line1[..18],
        epoch_year,
        epoch_day,
        &line1[32..68]
    );
    format!("{}{}", redated, checksum(&redated))
}

fn checksum(line: &str) -> u8 {
    (line
        .bytes()
        .take(68)
        .map(|b| {
            if b.is_ascii_digit() {
                u16::from(b - b'0')
            } else if b == b'-' {
                1
            } else {
                0
            }
        })
        .sum::<u16>()
        % 10) as u8
}
