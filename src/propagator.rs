use chrono::{DateTime, Utc};
use sgp4::Constants;
use std::sync::Arc;
use thiserror::Error;

use crate::elements::OrbitalElements;

#[derive(Debug, Error)]
pub enum PropagationError {
    #[error("orbit has decayed below the model altitude floor")]
    Decayed,
    #[error("propagation diverged: {0}")]
    NumericalDivergence(String),
    #[error("element set rejected by the model: {0}")]
    InvalidElements(String),
}

/// Inertial (TEME) state at one instant. Produced fresh on every
/// propagation call, never mutated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropagatedState {
    pub epoch: DateTime<Utc>,
    pub position_km: [f64; 3],
    pub velocity_km_s: [f64; 3],
}

impl PropagatedState {
    pub fn radius_km(&self) -> f64 {
        let [x, y, z] = self.position_km;
        (x * x + y * y + z * z).sqrt()
    }

    pub fn speed_km_s(&self) -> f64 {
        let [x, y, z] = self.velocity_km_s;
        (x * x + y * y + z * z).sqrt()
    }
}

/// One element set plus its precomputed model constants. The near-earth or
/// deep-space variant is selected from the orbital period when the constants
/// are built; callers never choose.
pub struct Propagator {
    elements: Arc<OrbitalElements>,
    constants: Constants,
}

impl Propagator {
    pub fn new(elements: Arc<OrbitalElements>) -> Result<Self, PropagationError> {
        let constants = Constants::from_elements(elements.raw())
            .map_err(|e| PropagationError::InvalidElements(e.to_string()))?;

        Ok(Self {
            elements,
            constants,
        })
    }

    pub fn elements(&self) -> &Arc<OrbitalElements> {
        &self.elements
    }

    /// Propagates to an absolute time. Pure function of (elements, at):
    /// identical inputs yield bit-for-bit identical output.
    pub fn propagate(&self, at: DateTime<Utc>) -> Result<PropagatedState, PropagationError> {
        let minutes = self
            .elements
            .raw()
            .datetime_to_minutes_since_epoch(&at.naive_utc())
            .map_err(|e| PropagationError::NumericalDivergence(e.to_string()))?;

        let prediction = self
            .constants
            .propagate(minutes)
            .map_err(|e| PropagationError::NumericalDivergence(e.to_string()))?;

        let state = PropagatedState {
            epoch: at,
            position_km: prediction.position,
            velocity_km_s: prediction.velocity,
        };

        // A state under the equatorial radius means the orbit is gone, not
        // that the math failed.
        if state.radius_km() < sgp4::WGS84.ae {
            return Err(PropagationError::Decayed);
        }

        Ok(state)
    }
}
