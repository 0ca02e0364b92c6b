use chrono::NaiveDate;
use thiserror::Error;

/// Errors raised while validating a plan request.
///
/// Generation itself never fails once a request is accepted: missing
/// templates, dictionary gaps and zero divisions all degrade to defaults.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlanError {
    #[error("Invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("Invalid pace '{0}': expected M:SS or MM:SS")]
    InvalidPace(String),
    #[error("Race date {race} is before start date {start}")]
    RaceBeforeStart { start: NaiveDate, race: NaiveDate },
    #[error("Invalid weekly volume: {0}")]
    InvalidVolume(u32),
    #[error("Unknown workout id: {0}")]
    UnknownWorkoutId(String),
    #[error("Unknown training phase: {0}")]
    UnknownPhase(String),
    #[error("Unknown experience tier: {0}")]
    UnknownTier(String),
    #[error("Unknown workout type: {0}")]
    UnknownWorkoutType(String),
    #[error("Unknown distance unit: {0}")]
    UnknownDistanceUnit(String),
}

pub type PlanResult<T> = Result<T, PlanError>;
