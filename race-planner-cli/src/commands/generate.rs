use anyhow::{Context, Result};
use clap::Args;
use colored::{ColoredString, Colorize};

use race_planner::models::{DistanceUnit, PlanPreferences, PlanRequest, TrainingPlan, WorkoutEvent, WorkoutType};
use race_planner::services::calendar::{parse_iso_date, weeks_between};
use race_planner::{PlanGenerationService, PlanSettings};

use super::{validate_weeks, OutputFormat};
use crate::config::Config;

#[derive(Args)]
pub struct GenerateCommand {
    /// First day of the plan (YYYY-MM-DD)
    #[arg(long)]
    start: String,

    /// Race day (YYYY-MM-DD)
    #[arg(long)]
    race: String,

    /// Goal pace per distance unit (M:SS)
    #[arg(long)]
    pace: String,

    /// Race distance, e.g. "5k", "10k", "half-marathon", "marathon"
    #[arg(short, long)]
    distance: String,

    /// Peak weekly volume in distance units
    #[arg(long)]
    peak: Option<u32>,

    /// Plan length in weeks (defaults to the weeks between start and race)
    #[arg(short, long)]
    weeks: Option<u32>,

    /// Workout families to allow, e.g. "tempo" or "vo2" (repeatable)
    #[arg(long = "prefer", value_delimiter = ',')]
    prefer: Vec<String>,

    /// Seed for the tempo/speed choice on open quality days
    #[arg(long)]
    seed: Option<u64>,

    /// Distance unit: mi or km
    #[arg(short, long)]
    unit: Option<String>,

    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,
}

impl GenerateCommand {
    pub fn execute(self, config: &Config) -> Result<()> {
        let env_settings = PlanSettings::from_env()?;

        let unit = match self.unit.as_deref() {
            Some(raw) => raw.parse::<DistanceUnit>()?,
            None => match env_settings.distance_unit {
                Some(unit) => unit,
                None => config.distance_unit()?,
            },
        };
        let seed = self.seed.or(env_settings.seed).or(config.plan.seed);
        let peak = self.peak.unwrap_or(config.plan.default_peak);

        let weeks = match self.weeks {
            Some(weeks) => weeks,
            None => weeks_between(parse_iso_date(&self.start)?, parse_iso_date(&self.race)?),
        };
        let weeks = validate_weeks(weeks)?;

        let preferences = if self.prefer.is_empty() {
            None
        } else {
            Some(PlanPreferences::with_selected_ids(self.prefer))
        };

        let request = PlanRequest::from_raw(
            &self.start,
            peak,
            &self.race,
            &self.pace,
            weeks,
            &self.distance,
            preferences,
        )
        .context("Invalid plan request")?
        .with_unit(unit);

        let settings = PlanSettings {
            seed,
            distance_unit: Some(unit),
        };
        let plan = PlanGenerationService::new(settings).generate_plan(&request)?;

        match OutputFormat::resolve(self.format, config)? {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(plan.events())?);
            }
            OutputFormat::Table => print!("{}", render_table(&plan, unit)),
        }

        Ok(())
    }
}

/// Week-by-week listing of a plan
pub fn render_table(plan: &TrainingPlan, unit: DistanceUnit) -> String {
    let mut out = String::new();
    let label = unit.label();

    let race_name = plan
        .race_distance()
        .map(|d| d.display_name().to_string())
        .unwrap_or_else(|| "Race".to_string());
    out.push_str(&format!("{}\n", format!("{} Training Plan", race_name).as_str().bold()));
    out.push_str(&format!(
        "Tier: {}   Weekly volume: {}\n",
        plan.tier(),
        plan.weekly_mileage()
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(" / ")
    ));

    let totals = plan.weekly_totals();
    let mut current_week = None;
    for event in plan.events() {
        if current_week != Some(event.week_index()) {
            current_week = Some(event.week_index());
            let total = totals.get(event.week_index() as usize).copied().unwrap_or(0.0);
            out.push('\n');
            out.push_str(&format!(
                "{}\n",
                format!(
                    "Week {} ({}, {} {} scheduled)",
                    event.week_index() + 1,
                    event.phase(),
                    total,
                    label
                )
                .as_str()
                .bold()
            ));
        }
        out.push_str(&render_event(event, label));
        out.push('\n');
    }

    out
}

fn render_event(event: &WorkoutEvent, label: &str) -> String {
    let distance = if event.distance() > 0.0 {
        format!("{:>5} {}", event.distance(), label)
    } else {
        format!("{:>8}", "-")
    };

    format!(
        "  {}  {:<9}  {}  {}  {}",
        event.date(),
        event.day_name(),
        colorize(event.workout(), &format!("{:<24}", event.title())),
        distance,
        event.recommended_pace().unwrap_or("")
    )
}

fn colorize(workout: WorkoutType, text: &str) -> ColoredString {
    match workout {
        WorkoutType::Easy => text.green(),
        WorkoutType::Tempo => text.yellow(),
        WorkoutType::Speed => text.red(),
        WorkoutType::Long => text.blue(),
        WorkoutType::Rest => text.dimmed(),
        WorkoutType::Race => text.bold().yellow(),
    }
}
