use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::models::{RaceDistance, TrainingPhase, WorkoutId, WorkoutType};

/// What a template prescribes for one weekday
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TemplateEntry {
    /// A plain category such as Easy or Rest
    Plain {
        workout: WorkoutType,
        note: Option<String>,
    },
    /// A quality day whose family (Tempo or Speed) is left open
    Quality { note: Option<String> },
    /// A dictionary workout resolved at generation time
    Structured { id: WorkoutId, note: Option<String> },
}

impl TemplateEntry {
    pub fn plain(workout: WorkoutType) -> Self {
        Self::Plain { workout, note: None }
    }

    pub fn plain_with_note(workout: WorkoutType, note: &str) -> Self {
        Self::Plain {
            workout,
            note: Some(note.to_string()),
        }
    }

    pub fn quality() -> Self {
        Self::Quality { note: None }
    }

    pub fn structured(id: WorkoutId) -> Self {
        Self::Structured { id, note: None }
    }

    pub fn structured_with_note(id: WorkoutId, note: &str) -> Self {
        Self::Structured {
            id,
            note: Some(note.to_string()),
        }
    }

    pub fn note(&self) -> Option<&str> {
        match self {
            Self::Plain { note, .. } | Self::Quality { note } | Self::Structured { note, .. } => {
                note.as_deref()
            }
        }
    }
}

/// Weekday → entry mapping for one phase. Days left empty fall back to the
/// scheduler's default fill.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WeekTemplate {
    days: [Option<TemplateEntry>; 7],
}

impl WeekTemplate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, weekday: Weekday, entry: TemplateEntry) -> Self {
        self.days[weekday.num_days_from_monday() as usize] = Some(entry);
        self
    }

    pub fn entry(&self, weekday: Weekday) -> Option<&TemplateEntry> {
        self.days[weekday.num_days_from_monday() as usize].as_ref()
    }

    /// Entries in Monday..Sunday order
    pub fn entries(&self) -> impl Iterator<Item = (Weekday, Option<&TemplateEntry>)> {
        WEEK.iter().map(move |day| (*day, self.entry(*day)))
    }

    pub fn structured_ids(&self) -> impl Iterator<Item = WorkoutId> + '_ {
        self.days.iter().flatten().filter_map(|entry| match entry {
            TemplateEntry::Structured { id, .. } => Some(*id),
            _ => None,
        })
    }
}

/// All four phase templates for one race distance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaceTemplate {
    pub distance: RaceDistance,
    pub base: WeekTemplate,
    pub build: WeekTemplate,
    pub peak: WeekTemplate,
    pub taper: WeekTemplate,
}

impl RaceTemplate {
    pub fn phase(&self, phase: TrainingPhase) -> &WeekTemplate {
        match phase {
            TrainingPhase::Base => &self.base,
            TrainingPhase::Build => &self.build,
            TrainingPhase::Peak => &self.peak,
            TrainingPhase::Taper => &self.taper,
        }
    }
}

pub const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// English weekday name
pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}
