use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::propagator::PropagatedState;

// WGS84 ellipsoid.
const EQUATORIAL_RADIUS_KM: f64 = 6378.137;
const ECCENTRICITY_SQUARED: f64 = 0.00669437999014;

/// Earth-fixed position at one instant. Latitude and longitude are degrees,
/// longitude in [-180, 180].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeodeticFix {
    pub timestamp: DateTime<Utc>,
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    /// Height above the WGS84 ellipsoid.
    pub height_km: f64,
    /// Norm of the inertial velocity. The earth-rotation contribution is
    /// below display precision and is not applied.
    pub speed_km_s: f64,
}

/// Deterministic conversion of an inertial state to a geodetic fix: sidereal
/// rotation into the earth-fixed frame, then ellipsoidal latitude/height.
pub fn fix_from_state(state: &PropagatedState) -> GeodeticFix {
    let gmst =
        sgp4::iau_epoch_to_sidereal_time(sgp4::julian_years_since_j2000(&state.epoch.naive_utc()));

    let ecef = teme_to_ecef(state.position_km, gmst);
    let (latitude_deg, longitude_deg, height_km) = ecef_to_geodetic(ecef);

    GeodeticFix {
        timestamp: state.epoch,
        latitude_deg,
        longitude_deg,
        height_km,
        speed_km_s: state.speed_km_s(),
    }
}

pub fn teme_to_ecef(pos_teme: [f64; 3], gmst: f64) -> [f64; 3] {
    let cos_gmst = gmst.cos();
    let sin_gmst = gmst.sin();
    [
        pos_teme[0] * cos_gmst + pos_teme[1] * sin_gmst,
        -pos_teme[0] * sin_gmst + pos_teme[1] * cos_gmst,
        pos_teme[2],
    ]
}

// Iterative ellipsoidal conversion. Latitude converges in a handful of
// rounds; five is enough for sub-millimeter agreement at any altitude.
fn ecef_to_geodetic(ecef: [f64; 3]) -> (f64, f64, f64) {
    let [x, y, z] = ecef;
    let p = (x * x + y * y).sqrt();
    let longitude = y.atan2(x);

    let mut latitude = z.atan2(p * (1.0 - ECCENTRICITY_SQUARED));
    for _ in 0..5 {
        let sin_lat = latitude.sin();
        let n = EQUATORIAL_RADIUS_KM / (1.0 - ECCENTRICITY_SQUARED * sin_lat * sin_lat).sqrt();
        latitude = (z + ECCENTRICITY_SQUARED * n * sin_lat).atan2(p);
    }

    let sin_lat = latitude.sin();
    let cos_lat = latitude.cos();
    let n = EQUATORIAL_RADIUS_KM / (1.0 - ECCENTRICITY_SQUARED * sin_lat * sin_lat).sqrt();
    let height = if cos_lat.abs() > 1e-10 {
        p / cos_lat - n
    } else {
        // Polar singularity: derive height from the z axis instead.
        z.abs() - n * (1.0 - ECCENTRICITY_SQUARED)
    };

    (latitude.to_degrees(), longitude.to_degrees(), height)
}
