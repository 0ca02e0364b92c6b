use crate::models::{ExperienceTier, GoalPace, TrainingPhase};

/// Periodization phase of `week` (0-based) in a plan of `total_weeks`.
///
/// Fraction of the plan elapsed: below 0.4 base, below 0.7 build, below 0.9
/// peak, taper otherwise.
pub fn phase_for_week(week: u32, total_weeks: u32) -> TrainingPhase {
    if total_weeks == 0 {
        return TrainingPhase::Taper;
    }

    let progress = week as f64 / total_weeks as f64;
    match progress {
        p if p < 0.4 => TrainingPhase::Base,
        p if p < 0.7 => TrainingPhase::Build,
        p if p < 0.9 => TrainingPhase::Peak,
        _ => TrainingPhase::Taper,
    }
}

/// First and last week of `phase`, if the plan has any
pub fn phase_range(phase: TrainingPhase, total_weeks: u32) -> Option<(u32, u32)> {
    let mut weeks = (0..total_weeks).filter(|w| phase_for_week(*w, total_weeks) == phase);
    let first = weeks.next()?;
    let last = weeks.last().unwrap_or(first);
    Some((first, last))
}

/// Middle week of the build phase; build weeks up to and including it use
/// the second progression level
pub fn build_phase_midpoint(total_weeks: u32) -> Option<u32> {
    phase_range(TrainingPhase::Build, total_weeks).map(|(first, last)| (first + last) / 2)
}

/// Overall plan character from peak volume and goal pace
pub fn global_tier(peak_volume: u32, goal_pace: &GoalPace) -> ExperienceTier {
    let pace = goal_pace.decimal();
    if peak_volume > 50 || pace <= 7.0 {
        ExperienceTier::Advanced
    } else if peak_volume >= 25 || pace <= 9.0 {
        ExperienceTier::Intermediate
    } else {
        ExperienceTier::Beginner
    }
}

/// Tier used to pick structured-workout variants for one week's volume
pub fn weekly_tier(week_volume: u32) -> ExperienceTier {
    if week_volume > 60 {
        ExperienceTier::Advanced
    } else if week_volume > 35 {
        ExperienceTier::Intermediate
    } else {
        ExperienceTier::Beginner
    }
}
