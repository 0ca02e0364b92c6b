// Library exports for the race-planner CLI
// This allows testing of internal modules

pub mod commands;
pub mod config;
