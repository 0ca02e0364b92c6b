use anyhow::Result;
use clap::Args;
use colored::Colorize;
use serde::Serialize;

use race_planner::models::TrainingPhase;
use race_planner::services::mileage_service::build_weekly_mileage;
use race_planner::services::periodization_service::{phase_for_week, weekly_tier};

use super::{validate_weeks, OutputFormat};
use crate::config::Config;

#[derive(Args)]
pub struct MileageCommand {
    /// Plan length in weeks
    #[arg(short, long)]
    weeks: u32,

    /// Peak weekly volume (defaults to the configured peak)
    #[arg(long)]
    peak: Option<u32>,

    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,
}

/// One row of the mileage curve
#[derive(Debug, Serialize)]
pub struct MileageWeek {
    pub week: u32,
    pub phase: TrainingPhase,
    pub volume: u32,
    pub tier: String,
}

impl MileageCommand {
    pub fn execute(self, config: &Config) -> Result<()> {
        let weeks = validate_weeks(self.weeks)?;
        let peak = self.peak.unwrap_or(config.plan.default_peak);
        let rows = mileage_rows(weeks, peak);

        match OutputFormat::resolve(self.format, config)? {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&rows)?),
            OutputFormat::Table => {
                let unit = config.distance_unit()?;
                println!("{}", format!("Weekly volume, peak {} {}", peak, unit.label()).as_str().bold());
                println!();
                for row in &rows {
                    println!(
                        "  Week {:>2}  {:<6}  {:>4} {}  {}",
                        row.week, row.phase, row.volume, unit.label(), row.tier
                    );
                }
            }
        }

        Ok(())
    }
}

pub fn mileage_rows(weeks: u32, peak: u32) -> Vec<MileageWeek> {
    build_weekly_mileage(weeks, peak)
        .into_iter()
        .enumerate()
        .map(|(index, volume)| MileageWeek {
            week: index as u32 + 1,
            phase: phase_for_week(index as u32, weeks),
            volume,
            tier: weekly_tier(volume).to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_follow_curve() {
        let rows = mileage_rows(8, 40);
        let volumes: Vec<u32> = rows.iter().map(|r| r.volume).collect();
        assert_eq!(volumes, vec![22, 26, 30, 30, 37, 40, 30, 10]);
        assert_eq!(rows[0].week, 1);
        assert_eq!(rows[0].phase, TrainingPhase::Base);
        assert_eq!(rows[5].tier, "intermediate");
        assert_eq!(rows[7].phase, TrainingPhase::Peak);
    }
}
