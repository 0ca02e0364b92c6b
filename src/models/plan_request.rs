use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{PlanError, PlanResult};
use crate::models::{DistanceUnit, WorkoutType};
use crate::services::calendar::parse_iso_date;

/// Race distance categories with a registered template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RaceDistance {
    #[serde(rename = "5k")]
    FiveK,
    #[serde(rename = "10k")]
    TenK,
    #[serde(rename = "half-marathon")]
    HalfMarathon,
    #[serde(rename = "marathon")]
    Marathon,
}

impl RaceDistance {
    pub const ALL: [RaceDistance; 4] = [Self::FiveK, Self::TenK, Self::HalfMarathon, Self::Marathon];

    /// Map a free-form race name onto a category.
    ///
    /// Case-insensitive substring rules, first match wins:
    /// "half" → half marathon, "marathon" → marathon, "10" → 10k, "5" → 5k.
    pub fn normalize(raw: &str) -> Option<Self> {
        let lower = raw.to_lowercase();
        if lower.contains("half") {
            Some(Self::HalfMarathon)
        } else if lower.contains("marathon") {
            Some(Self::Marathon)
        } else if lower.contains("10") {
            Some(Self::TenK)
        } else if lower.contains('5') {
            Some(Self::FiveK)
        } else {
            None
        }
    }

    /// Registry key of the race template
    pub fn key(&self) -> &'static str {
        match self {
            Self::FiveK => "5k",
            Self::TenK => "10k",
            Self::HalfMarathon => "half-marathon",
            Self::Marathon => "marathon",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::FiveK => "5K",
            Self::TenK => "10K",
            Self::HalfMarathon => "Half Marathon",
            Self::Marathon => "Marathon",
        }
    }

    pub fn meters(&self) -> f64 {
        match self {
            Self::FiveK => 5_000.0,
            Self::TenK => 10_000.0,
            Self::HalfMarathon => 21_097.5,
            Self::Marathon => 42_195.0,
        }
    }

    /// Race length in the plan's unit, rounded to one decimal
    pub fn length(&self, unit: DistanceUnit) -> f64 {
        (unit.from_meters(self.meters()) * 10.0).round() / 10.0
    }
}

impl std::fmt::Display for RaceDistance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Goal pace in minutes:seconds per distance unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalPace {
    pub minutes: u32,
    pub seconds: u32,
}

impl GoalPace {
    /// Parse "M:SS" or "MM:SS"
    pub fn parse(raw: &str) -> PlanResult<Self> {
        let invalid = || PlanError::InvalidPace(raw.to_string());
        let (min_part, sec_part) = raw.trim().split_once(':').ok_or_else(invalid)?;

        if min_part.is_empty()
            || min_part.len() > 2
            || sec_part.len() != 2
            || !min_part.chars().all(|c| c.is_ascii_digit())
            || !sec_part.chars().all(|c| c.is_ascii_digit())
        {
            return Err(invalid());
        }

        let minutes: u32 = min_part.parse().map_err(|_| invalid())?;
        let seconds: u32 = sec_part.parse().map_err(|_| invalid())?;
        if seconds >= 60 || (minutes == 0 && seconds == 0) {
            return Err(invalid());
        }

        Ok(Self { minutes, seconds })
    }

    /// Decimal minutes: minutes + seconds / 60
    pub fn decimal(&self) -> f64 {
        self.minutes as f64 + self.seconds as f64 / 60.0
    }
}

impl std::fmt::Display for GoalPace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{:02}", self.minutes, self.seconds)
    }
}

impl std::str::FromStr for GoalPace {
    type Err = PlanError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Optional runner preferences
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanPreferences {
    /// Workout identifiers the runner opted into. `None` allows every family.
    #[serde(default)]
    pub selected_workout_type_ids: Option<Vec<String>>,
}

const TEMPO_MARKERS: [&str; 2] = ["tempo", "threshold"];
const SPEED_MARKERS: [&str; 3] = ["speed", "interval", "vo2"];

impl PlanPreferences {
    pub fn with_selected_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            selected_workout_type_ids: Some(ids.into_iter().map(Into::into).collect()),
        }
    }

    /// Whether the quality family of `workout` may be scheduled
    pub fn allows(&self, workout: WorkoutType) -> bool {
        let Some(ids) = &self.selected_workout_type_ids else {
            return true;
        };

        let markers: &[&str] = match workout {
            WorkoutType::Tempo => &TEMPO_MARKERS,
            WorkoutType::Speed => &SPEED_MARKERS,
            _ => return true,
        };

        ids.iter().any(|id| {
            let id = id.to_lowercase();
            markers.iter().any(|marker| id.contains(marker))
        })
    }
}

/// Everything the scheduler needs to build one plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanRequest {
    pub start_date: NaiveDate,
    pub peak_weekly_volume: u32,
    pub race_date: NaiveDate,
    pub goal_pace: GoalPace,
    /// Callers keep this within 4..=20; the engine accepts any value
    pub num_weeks: u32,
    /// Free-form race name, normalized through the template resolver
    pub race_distance: String,
    #[serde(default)]
    pub preferences: Option<PlanPreferences>,
    #[serde(default)]
    pub distance_unit: DistanceUnit,
}

impl PlanRequest {
    /// Build a request from the raw strings a form or command line supplies
    pub fn from_raw(
        start_date: &str,
        peak_weekly_volume: u32,
        race_date: &str,
        goal_pace: &str,
        num_weeks: u32,
        race_distance: &str,
        preferences: Option<PlanPreferences>,
    ) -> PlanResult<Self> {
        let request = Self {
            start_date: parse_iso_date(start_date)?,
            peak_weekly_volume,
            race_date: parse_iso_date(race_date)?,
            goal_pace: GoalPace::parse(goal_pace)?,
            num_weeks,
            race_distance: race_distance.to_string(),
            preferences,
            distance_unit: DistanceUnit::default(),
        };
        request.validate()?;
        Ok(request)
    }

    pub fn with_unit(mut self, unit: DistanceUnit) -> Self {
        self.distance_unit = unit;
        self
    }

    /// Reject requests that would silently produce a wrong schedule
    pub fn validate(&self) -> PlanResult<()> {
        if self.race_date < self.start_date {
            return Err(PlanError::RaceBeforeStart {
                start: self.start_date,
                race: self.race_date,
            });
        }
        if self.peak_weekly_volume == 0 {
            return Err(PlanError::InvalidVolume(self.peak_weekly_volume));
        }
        Ok(())
    }

    pub fn resolved_distance(&self) -> Option<RaceDistance> {
        RaceDistance::normalize(&self.race_distance)
    }

    pub fn allows(&self, workout: WorkoutType) -> bool {
        self.preferences.as_ref().map_or(true, |p| p.allows(workout))
    }
}
