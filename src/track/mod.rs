mod error;
mod path;
mod session;
mod tracker;
mod types;

pub use error::TrackError;
pub use path::{build_path, Path, TrackSample, PATH_STEP, PATH_WINDOW};
pub use session::TrackSession;
pub use tracker::{FixFeed, LiveTracker, LIVE_CADENCE};
pub use types::{SessionState, Status, ViewMode};
