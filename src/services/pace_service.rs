use serde::{Deserialize, Serialize};

use crate::models::{GoalPace, TrainingPhase, WorkoutType};

/// Recommended pace for one workout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaceRecommendation {
    /// "M:SS" for precise paces, "M:SS-M:SS" for ranges
    pub pace: String,
    /// Center pace in decimal minutes
    pub decimal: f64,
    /// Fast and slow ends for range-based workouts
    pub range: Option<(String, String)>,
}

/// Seconds per distance unit added to goal pace. Speed work runs faster
/// than goal pace, so its offsets are negative.
fn pace_offset_seconds(workout: WorkoutType, phase: TrainingPhase) -> Option<f64> {
    use TrainingPhase::*;

    let offset = match (workout, phase) {
        (WorkoutType::Easy, Base) => 90.0,
        (WorkoutType::Easy, Build) => 75.0,
        (WorkoutType::Easy, Peak) => 75.0,
        (WorkoutType::Easy, Taper) => 90.0,

        (WorkoutType::Tempo, Base) => 30.0,
        (WorkoutType::Tempo, Build) => 20.0,
        (WorkoutType::Tempo, Peak) => 15.0,
        (WorkoutType::Tempo, Taper) => 25.0,

        (WorkoutType::Speed, Base) => -15.0,
        (WorkoutType::Speed, Build) => -20.0,
        (WorkoutType::Speed, Peak) => -30.0,
        (WorkoutType::Speed, Taper) => -20.0,

        (WorkoutType::Long, Base) => 75.0,
        (WorkoutType::Long, Build) => 60.0,
        (WorkoutType::Long, Peak) => 45.0,
        (WorkoutType::Long, Taper) => 75.0,

        (WorkoutType::Race, _) => 0.0,
        (WorkoutType::Rest, _) => return None,
    };

    Some(offset)
}

/// Half-width of the reported range, in seconds
fn range_half_width(workout: WorkoutType) -> Option<f64> {
    match workout {
        WorkoutType::Easy => Some(20.0),
        WorkoutType::Long => Some(30.0),
        _ => None,
    }
}

/// Recommended pace for `workout` in `phase`; `None` for rest days
pub fn recommend_pace(workout: WorkoutType, phase: TrainingPhase, goal: &GoalPace) -> Option<PaceRecommendation> {
    let offset = pace_offset_seconds(workout, phase)?;
    let decimal = (goal.decimal() + offset / 60.0).max(0.0);

    let recommendation = match range_half_width(workout) {
        Some(half_width) => {
            let fast = format_pace(decimal - half_width / 60.0);
            let slow = format_pace(decimal + half_width / 60.0);
            PaceRecommendation {
                pace: format!("{}-{}", fast, slow),
                decimal,
                range: Some((fast, slow)),
            }
        }
        None => PaceRecommendation {
            pace: format_pace(decimal),
            decimal,
            range: None,
        },
    };

    Some(recommendation)
}

/// Decimal minutes to "M:SS"; 60 rounded seconds roll into the next minute
pub fn format_pace(decimal: f64) -> String {
    let decimal = decimal.max(0.0);
    let mut minutes = decimal.floor() as u32;
    let mut seconds = ((decimal - decimal.floor()) * 60.0).round() as u32;
    if seconds == 60 {
        minutes += 1;
        seconds = 0;
    }
    format!("{}:{:02}", minutes, seconds)
}
