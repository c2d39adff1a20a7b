use ba_core::{CoreError, ParcelId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("parcel {0} not registered with this planner")]
    ParcelNotFound(ParcelId),

    #[error("planner configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type PlanResult<T> = Result<T, PlanError>;
