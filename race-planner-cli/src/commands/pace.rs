use anyhow::{Context, Result};
use clap::Args;

use race_planner::models::{GoalPace, TrainingPhase, WorkoutType};
use race_planner::services::recommend_pace;

use crate::config::Config;

#[derive(Args)]
pub struct PaceCommand {
    /// Workout type: easy, tempo, speed, long, race
    #[arg(short = 't', long = "type")]
    workout: String,

    /// Training phase: base, build, peak, taper
    #[arg(long)]
    phase: String,

    /// Goal pace (M:SS)
    #[arg(long)]
    pace: String,
}

impl PaceCommand {
    pub fn execute(self, config: &Config) -> Result<()> {
        let workout: WorkoutType = self.workout.parse()?;
        let phase: TrainingPhase = self.phase.parse()?;
        let goal = GoalPace::parse(&self.pace).context("Invalid goal pace")?;
        let unit = config.distance_unit()?;

        match recommend_pace(workout, phase, &goal) {
            Some(recommendation) => {
                println!(
                    "{} ({} phase, goal {}): {} /{}",
                    workout.title(),
                    phase,
                    goal,
                    recommendation.pace,
                    unit.label()
                );
            }
            None => println!("{} has no target pace", workout.title()),
        }

        Ok(())
    }
}
