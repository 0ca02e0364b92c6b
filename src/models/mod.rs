// Plan request, periodization enums, dictionary and template types, events

pub mod plan_request;
pub mod template;
pub mod training;
pub mod workout_dictionary;
pub mod workout_event;

pub use plan_request::*;
pub use template::*;
pub use training::*;
pub use workout_dictionary::*;
pub use workout_event::*;
