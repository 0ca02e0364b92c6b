use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{ExperienceTier, RaceDistance, TrainingPhase, WorkoutType};

/// One scheduled day. Created once by the scheduler and never mutated;
/// export consumers read the `event_*` fields verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutEvent {
    event_date: NaiveDate,
    week_index: u32,
    /// Days since the start of the plan week (0..=6)
    day_index: u32,
    day_name: String,
    order_in_day: u32,
    event_title: String,
    event_workout: WorkoutType,
    event_distance: f64,
    event_notes: String,
    color: String,
    recommended_pace: Option<String>,
    recommended_pace_decimal: Option<f64>,
    phase: TrainingPhase,
}

/// Field bag consumed by [`WorkoutEvent::new`]
#[derive(Debug, Clone)]
pub struct EventDraft {
    pub date: NaiveDate,
    pub week_index: u32,
    pub day_index: u32,
    pub day_name: String,
    pub title: String,
    pub workout: WorkoutType,
    pub distance: f64,
    pub notes: String,
    pub recommended_pace: Option<String>,
    pub recommended_pace_decimal: Option<f64>,
    pub phase: TrainingPhase,
}

impl WorkoutEvent {
    pub fn new(draft: EventDraft) -> Self {
        Self {
            event_date: draft.date,
            week_index: draft.week_index,
            day_index: draft.day_index,
            day_name: draft.day_name,
            order_in_day: 0,
            event_title: draft.title,
            color: draft.workout.theme_color().to_string(),
            event_workout: draft.workout,
            event_distance: draft.distance,
            event_notes: draft.notes,
            recommended_pace: draft.recommended_pace,
            recommended_pace_decimal: draft.recommended_pace_decimal,
            phase: draft.phase,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.event_date
    }

    pub fn week_index(&self) -> u32 {
        self.week_index
    }

    pub fn day_index(&self) -> u32 {
        self.day_index
    }

    pub fn day_name(&self) -> &str {
        &self.day_name
    }

    pub fn order_in_day(&self) -> u32 {
        self.order_in_day
    }

    pub fn title(&self) -> &str {
        &self.event_title
    }

    pub fn workout(&self) -> WorkoutType {
        self.event_workout
    }

    pub fn distance(&self) -> f64 {
        self.event_distance
    }

    pub fn notes(&self) -> &str {
        &self.event_notes
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn recommended_pace(&self) -> Option<&str> {
        self.recommended_pace.as_deref()
    }

    pub fn recommended_pace_decimal(&self) -> Option<f64> {
        self.recommended_pace_decimal
    }

    pub fn phase(&self) -> TrainingPhase {
        self.phase
    }

    pub fn is_race(&self) -> bool {
        self.event_workout == WorkoutType::Race
    }
}

/// A generated plan: the ordered events plus what was derived to build them
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrainingPlan {
    events: Vec<WorkoutEvent>,
    weekly_mileage: Vec<u32>,
    tier: ExperienceTier,
    race_distance: Option<RaceDistance>,
}

impl TrainingPlan {
    pub fn new(
        events: Vec<WorkoutEvent>,
        weekly_mileage: Vec<u32>,
        tier: ExperienceTier,
        race_distance: Option<RaceDistance>,
    ) -> Self {
        Self {
            events,
            weekly_mileage,
            tier,
            race_distance,
        }
    }

    pub fn events(&self) -> &[WorkoutEvent] {
        &self.events
    }

    pub fn weekly_mileage(&self) -> &[u32] {
        &self.weekly_mileage
    }

    pub fn tier(&self) -> ExperienceTier {
        self.tier
    }

    pub fn race_distance(&self) -> Option<RaceDistance> {
        self.race_distance
    }

    pub fn race_event(&self) -> Option<&WorkoutEvent> {
        self.events.iter().rev().find(|e| e.is_race())
    }

    /// Scheduled distance per plan week, race excluded
    pub fn weekly_totals(&self) -> Vec<f64> {
        let weeks = self
            .events
            .iter()
            .map(|e| e.week_index() as usize + 1)
            .max()
            .unwrap_or(0);
        let mut totals = vec![0.0; weeks];
        for event in self.events.iter().filter(|e| !e.is_race()) {
            totals[event.week_index() as usize] += event.distance();
        }
        totals
            .into_iter()
            .map(|total| (total * 10.0).round() / 10.0)
            .collect()
    }

    /// Number of events of each workout type
    pub fn count_of(&self, workout: WorkoutType) -> usize {
        self.events.iter().filter(|e| e.workout() == workout).count()
    }
}
