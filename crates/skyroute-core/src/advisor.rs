//! Angle advisor interface.
//!
//! The advisor is an external model that maps an 8x8 matrix to two control
//! angles. Routing never depends on it: failures are captured as
//! [`AdvisorOutcome::Unavailable`] and reported next to the plan.

use crate::error::AdvisorError;
use crate::models::{AnglePrediction, QuboMatrix, QUBO_SIZE};
use serde::{Deserialize, Serialize};

/// Predicts `beta`/`gamma` angles for a matrix.
pub trait AngleAdvisor: Send + Sync {
    fn predict_angles(&self, matrix: &QuboMatrix) -> Result<AnglePrediction, AdvisorError>;
}

impl<F> AngleAdvisor for F
where
    F: Fn(&QuboMatrix) -> Result<AnglePrediction, AdvisorError> + Send + Sync,
{
    fn predict_angles(&self, matrix: &QuboMatrix) -> Result<AnglePrediction, AdvisorError> {
        self(matrix)
    }
}

/// What the advisor produced for one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AdvisorOutcome {
    Available(AnglePrediction),
    Unavailable { error: String },
}

impl AdvisorOutcome {
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available(_))
    }

    pub fn prediction(&self) -> Option<AnglePrediction> {
        match self {
            Self::Available(prediction) => Some(*prediction),
            Self::Unavailable { .. } => None,
        }
    }
}

/// All-zero matrix used when the caller supplies none.
pub fn zero_matrix() -> QuboMatrix {
    [[0.0; QUBO_SIZE]; QUBO_SIZE]
}

/// Read a caller-supplied matrix, rejecting anything that is not 8x8 numbers.
pub fn matrix_from_json(value: &serde_json::Value) -> Result<QuboMatrix, AdvisorError> {
    let invalid = || AdvisorError::InvalidMatrix { size: QUBO_SIZE };
    let rows = value
        .as_array()
        .filter(|rows| rows.len() == QUBO_SIZE)
        .ok_or_else(invalid)?;

    let mut matrix = zero_matrix();
    for (row, cells) in matrix.iter_mut().zip(rows) {
        let cells = cells
            .as_array()
            .filter(|cells| cells.len() == QUBO_SIZE)
            .ok_or_else(invalid)?;
        for (slot, cell) in row.iter_mut().zip(cells) {
            *slot = cell.as_f64().ok_or_else(invalid)?;
        }
    }
    Ok(matrix)
}

/// Ask the advisor, converting any failure into an outcome.
pub fn consult(advisor: Option<&dyn AngleAdvisor>, matrix: &QuboMatrix) -> AdvisorOutcome {
    let Some(advisor) = advisor else {
        return AdvisorOutcome::Unavailable {
            error: "angle advisor not configured".to_string(),
        };
    };
    match advisor.predict_angles(matrix) {
        Ok(prediction) if prediction.beta.is_finite() && prediction.gamma.is_finite() => {
            AdvisorOutcome::Available(prediction)
        }
        Ok(prediction) => {
            let err = AdvisorError::Malformed(format!(
                "non-finite angles beta={} gamma={}",
                prediction.beta, prediction.gamma
            ));
            tracing::warn!("{}", err);
            AdvisorOutcome::Unavailable {
                error: err.to_string(),
            }
        }
        Err(err) => {
            tracing::warn!("Angle advisor failed: {}", err);
            AdvisorOutcome::Unavailable {
                error: err.to_string(),
            }
        }
    }
}
