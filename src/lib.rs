//! Training-plan generation engine.
//!
//! Turns a race date, goal pace and peak weekly volume into a day-by-day
//! schedule that climbs through base, build and peak weeks, tapers, and ends
//! on a single race-day event.

pub mod config;
pub mod error;
pub mod models;
pub mod services;

pub use config::PlanSettings;
pub use error::{PlanError, PlanResult};
pub use models::{PlanPreferences, PlanRequest, TrainingPlan, WorkoutEvent};
pub use services::{create_training_plan, PlanGenerationService};
