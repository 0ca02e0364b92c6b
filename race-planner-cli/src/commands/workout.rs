use anyhow::{bail, Result};
use clap::Args;
use colored::Colorize;

use race_planner::models::{DistanceUnit, ExperienceTier, TrainingPhase, WorkoutId};
use race_planner::services::{ResolveContext, WorkoutDictionary};

use crate::config::Config;

#[derive(Args)]
pub struct WorkoutCommand {
    /// Workout id, e.g. THRESHOLD_MILE_REPEATS (omit to list all)
    id: Option<String>,

    /// Experience tier: beginner, intermediate, advanced
    #[arg(long, default_value = "intermediate")]
    tier: String,

    /// Training phase: base, build, peak, taper
    #[arg(long, default_value = "build")]
    phase: String,

    /// Week number within the plan (1-based)
    #[arg(long, default_value = "1")]
    week: u32,

    /// Plan length in weeks
    #[arg(long, default_value = "12")]
    weeks: u32,

    /// Planned volume for the week
    #[arg(long, default_value = "40")]
    volume: u32,

    /// Distance unit: mi or km
    #[arg(short, long)]
    unit: Option<String>,
}

impl WorkoutCommand {
    pub fn execute(self, config: &Config) -> Result<()> {
        let dictionary = WorkoutDictionary::standard();

        let Some(raw_id) = self.id.as_deref() else {
            print!("{}", list_workouts(dictionary));
            return Ok(());
        };

        if self.week == 0 || self.week > self.weeks {
            bail!("--week must be between 1 and {}", self.weeks);
        }

        let id: WorkoutId = raw_id.parse()?;
        let unit = match self.unit.as_deref() {
            Some(raw) => raw.parse::<DistanceUnit>()?,
            None => config.distance_unit()?,
        };
        let ctx = ResolveContext {
            phase: self.phase.parse::<TrainingPhase>()?,
            week_index: self.week - 1,
            total_weeks: self.weeks,
            week_volume: self.volume,
            tier: self.tier.parse::<ExperienceTier>()?,
            unit,
        };

        let resolved = dictionary.resolve(id, &ctx);
        if resolved.is_empty() {
            println!("No {} variant of {} for the {} phase", ctx.tier, id, ctx.phase);
            return Ok(());
        }

        println!("{}", resolved.title.as_str().bold());
        if let Some(level) = resolved.level {
            println!("Level:    {}", level);
        }
        println!("Type:     {}", resolved.workout_type);
        println!("Distance: {} {}", resolved.distance, unit.label());
        println!("Session:  {}", resolved.note);

        Ok(())
    }
}

/// Every workout id with its dictionary name and phases
pub fn list_workouts(dictionary: &WorkoutDictionary) -> String {
    let mut out = String::new();
    for id in WorkoutId::ALL {
        let line = match dictionary.get(id) {
            Some(entry) => {
                let phases = entry
                    .phases
                    .iter()
                    .map(|p| p.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("{:<28} {:<24} {}", id.as_str(), entry.name, phases)
            }
            None => format!(
                "{:<28} {:<24} (uses {})",
                id.as_str(),
                id.title(),
                WorkoutId::LongRunProgressive
            ),
        };
        out.push_str(&line);
        out.push('\n');
    }
    out
}
