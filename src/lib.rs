//! Real-time satellite ground-track engine: TLE parsing, SGP4 propagation,
//! geodetic conversion, forward path sampling and a cancellable live fix
//! feed, orchestrated by a single-body track session.

pub mod catalog;
pub mod config;
pub mod elements;
pub mod geodetic;
pub mod propagator;
pub mod track;

pub use elements::{OrbitalElements, ParseError};
pub use geodetic::{fix_from_state, GeodeticFix};
pub use propagator::{PropagatedState, PropagationError, Propagator};
pub use track::{Path, SessionState, Status, TrackError, TrackSample, TrackSession, ViewMode};
