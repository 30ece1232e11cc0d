use thiserror::Error;

use crate::elements::ParseError;
use crate::propagator::PropagationError;

#[derive(Debug, Error)]
pub enum TrackError {
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),
    #[error("propagation error: {0}")]
    Propagation(#[from] PropagationError),
    #[error("scheduling error: {0}")]
    Scheduling(String),
}
