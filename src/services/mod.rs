// Plan generation services

pub mod calendar;
pub mod mileage_service;
pub mod pace_service;
pub mod periodization_service;
pub mod plan_generation_service;
pub mod template_service;
pub mod workout_dictionary_service;

pub use pace_service::{recommend_pace, PaceRecommendation};
pub use plan_generation_service::{create_training_plan, PlanGenerationService, PlanScheduler};
pub use template_service::TemplateRegistry;
pub use workout_dictionary_service::{ResolveContext, WorkoutDictionary};
