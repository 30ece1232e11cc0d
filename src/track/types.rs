use serde::Serialize;
use strum_macros::Display;

/// The one user-facing signal from the engine. `Degraded` means the live
/// feed is stale but may recover; `Failed` means it will not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Display)]
pub enum Status {
    Idle,
    Loading,
    Tracking,
    #[strum(to_string = "Degraded: {0}")]
    Degraded(String),
    #[strum(to_string = "Failed: {0}")]
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SessionState {
    Empty,
    Loading,
    Active,
}

/// Camera hint for the host's rendering surface. The engine stores the flag
/// and supplies positions; it computes nothing from it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Display)]
pub enum ViewMode {
    #[default]
    Global,
    Follow,
}
