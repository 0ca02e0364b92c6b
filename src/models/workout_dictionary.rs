use serde::{Deserialize, Serialize};

use crate::error::PlanError;
use crate::models::{DistanceUnit, ExperienceTier, RaceDistance, TrainingPhase, WorkoutType};

/// Structured workout identifiers referenced by race templates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkoutId {
    #[serde(rename = "THRESHOLD_MILE_REPEATS")]
    ThresholdMileRepeats,
    #[serde(rename = "THRESHOLD_CRUISE_INTERVALS")]
    ThresholdCruiseIntervals,
    #[serde(rename = "VO2_800M_REPEATS")]
    Vo2EightHundreds,
    #[serde(rename = "VO2_KILOMETER_REPEATS")]
    Vo2Kilometers,
    #[serde(rename = "VO2_HILL_REPEATS")]
    Vo2HillRepeats,
    #[serde(rename = "LONG_RUN_BASE")]
    LongRunBase,
    #[serde(rename = "LONG_RUN_PROGRESSIVE")]
    LongRunProgressive,
    #[serde(rename = "LONG_RUN_RACE_PACE")]
    LongRunRacePace,
    #[serde(rename = "LONG_RUN_SHARPENING")]
    LongRunSharpening,
    #[serde(rename = "LONG_RUN_TAPER")]
    LongRunTaper,
}

impl WorkoutId {
    pub const ALL: [WorkoutId; 10] = [
        Self::ThresholdMileRepeats,
        Self::ThresholdCruiseIntervals,
        Self::Vo2EightHundreds,
        Self::Vo2Kilometers,
        Self::Vo2HillRepeats,
        Self::LongRunBase,
        Self::LongRunProgressive,
        Self::LongRunRacePace,
        Self::LongRunSharpening,
        Self::LongRunTaper,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ThresholdMileRepeats => "THRESHOLD_MILE_REPEATS",
            Self::ThresholdCruiseIntervals => "THRESHOLD_CRUISE_INTERVALS",
            Self::Vo2EightHundreds => "VO2_800M_REPEATS",
            Self::Vo2Kilometers => "VO2_KILOMETER_REPEATS",
            Self::Vo2HillRepeats => "VO2_HILL_REPEATS",
            Self::LongRunBase => "LONG_RUN_BASE",
            Self::LongRunProgressive => "LONG_RUN_PROGRESSIVE",
            Self::LongRunRacePace => "LONG_RUN_RACE_PACE",
            Self::LongRunSharpening => "LONG_RUN_SHARPENING",
            Self::LongRunTaper => "LONG_RUN_TAPER",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::ThresholdMileRepeats => "Threshold Mile Repeats",
            Self::ThresholdCruiseIntervals => "Cruise Intervals",
            Self::Vo2EightHundreds => "800m Repeats",
            Self::Vo2Kilometers => "Kilometer Repeats",
            Self::Vo2HillRepeats => "Hill Repeats",
            Self::LongRunBase => "Base Long Run",
            Self::LongRunProgressive => "Progressive Long Run",
            Self::LongRunRacePace => "Race-Pace Long Run",
            Self::LongRunSharpening => "Sharpening Long Run",
            Self::LongRunTaper => "Taper Long Run",
        }
    }

    pub fn family(&self) -> WorkoutFamily {
        match self {
            Self::ThresholdMileRepeats | Self::ThresholdCruiseIntervals => WorkoutFamily::Threshold,
            Self::Vo2EightHundreds | Self::Vo2Kilometers | Self::Vo2HillRepeats => WorkoutFamily::Vo2Max,
            Self::LongRunBase
            | Self::LongRunProgressive
            | Self::LongRunRacePace
            | Self::LongRunSharpening
            | Self::LongRunTaper => WorkoutFamily::LongRun,
        }
    }
}

impl std::fmt::Display for WorkoutId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for WorkoutId {
    type Err = PlanError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_uppercase();
        Self::ALL
            .into_iter()
            .find(|id| id.as_str() == wanted)
            .ok_or_else(|| PlanError::UnknownWorkoutId(s.to_string()))
    }
}

/// Family of a structured workout; decides the event's workout type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutFamily {
    Threshold,
    Vo2Max,
    LongRun,
}

impl WorkoutFamily {
    pub fn workout_type(&self) -> WorkoutType {
        match self {
            Self::Threshold => WorkoutType::Tempo,
            Self::Vo2Max => WorkoutType::Speed,
            Self::LongRun => WorkoutType::Long,
        }
    }
}

/// Length of one repetition
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Segment {
    /// Already in the plan's distance unit
    Distance(f64),
    /// Road distance in miles, converted for kilometer plans
    Miles(f64),
    /// Track distance, converted to the plan unit
    Meters(f64),
    /// Time-based repetition; contributes no distance
    Seconds(u32),
}

impl Segment {
    pub fn distance_in(&self, unit: DistanceUnit) -> f64 {
        match self {
            Self::Distance(d) => *d,
            Self::Miles(d) => match unit {
                DistanceUnit::Miles => *d,
                DistanceUnit::Kilometers => unit.from_meters(d * DistanceUnit::Miles.meters()),
            },
            Self::Meters(m) => unit.from_meters(*m),
            Self::Seconds(_) => 0.0,
        }
    }

    pub fn describe(&self, unit: DistanceUnit) -> String {
        match self {
            Self::Distance(d) => format!("{} {}", trim_number(*d), unit.label()),
            Self::Miles(_) => format!("{} {}", trim_number(self.distance_in(unit)), unit.label()),
            Self::Meters(m) => format!("{}m", trim_number(*m)),
            Self::Seconds(s) => describe_seconds(*s),
        }
    }
}

/// Recovery between repetitions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rest {
    pub value: u32,
    pub unit: RestUnit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RestUnit {
    Seconds,
    Minutes,
}

impl Rest {
    pub fn seconds(value: u32) -> Self {
        Self { value, unit: RestUnit::Seconds }
    }

    pub fn minutes(value: u32) -> Self {
        Self { value, unit: RestUnit::Minutes }
    }
}

impl std::fmt::Display for Rest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.unit {
            RestUnit::Seconds => write!(f, "{}s", self.value),
            RestUnit::Minutes => write!(f, "{}min", self.value),
        }
    }
}

/// Long-run sub-variant. One per variant, checked in declaration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LongRunDetail {
    /// Finish the run with a faster segment of `distance` units
    FinishFast { distance: f64 },
    /// Blocks at goal race pace, in plan units
    RacePaceSegments { segments: Vec<f64> },
    /// Short strides sprinkled through the run
    Pickups { reps: u32, seconds: u32 },
}

/// Tier-specific concrete parameters of one progression level
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WorkoutVariant {
    pub reps: Option<u32>,
    pub segment: Option<Segment>,
    pub rest: Option<Rest>,
    pub long_run: Option<LongRunDetail>,
}

impl WorkoutVariant {
    pub fn intervals(reps: u32, segment: Segment, rest: Rest) -> Self {
        Self {
            reps: Some(reps),
            segment: Some(segment),
            rest: Some(rest),
            long_run: None,
        }
    }

    pub fn long_run(detail: LongRunDetail) -> Self {
        Self {
            long_run: Some(detail),
            ..Self::default()
        }
    }
}

/// An ordered difficulty rung
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressionLevel {
    pub level: u8,
    pub beginner: Option<WorkoutVariant>,
    pub intermediate: Option<WorkoutVariant>,
    pub advanced: Option<WorkoutVariant>,
}

impl ProgressionLevel {
    pub fn new(level: u8, beginner: WorkoutVariant, intermediate: WorkoutVariant, advanced: WorkoutVariant) -> Self {
        Self {
            level,
            beginner: Some(beginner),
            intermediate: Some(intermediate),
            advanced: Some(advanced),
        }
    }

    pub fn variant_for(&self, tier: ExperienceTier) -> Option<&WorkoutVariant> {
        match tier {
            ExperienceTier::Beginner => self.beginner.as_ref(),
            ExperienceTier::Intermediate => self.intermediate.as_ref(),
            ExperienceTier::Advanced => self.advanced.as_ref(),
        }
    }
}

/// A structured workout definition
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkoutDictionaryEntry {
    pub id: WorkoutId,
    pub name: &'static str,
    pub family: WorkoutFamily,
    pub phases: Vec<TrainingPhase>,
    pub race_distances: Vec<RaceDistance>,
    pub intensity: &'static str,
    pub warmup: Option<f64>,
    pub cooldown: Option<f64>,
    pub levels: Vec<ProgressionLevel>,
}

impl WorkoutDictionaryEntry {
    pub fn level(&self, level: u8) -> Option<&ProgressionLevel> {
        self.levels.iter().find(|l| l.level == level)
    }

    pub fn hardest_level(&self) -> u8 {
        self.levels.iter().map(|l| l.level).max().unwrap_or(1)
    }

    pub fn is_applicable(&self, phase: TrainingPhase, distance: Option<RaceDistance>) -> bool {
        self.phases.contains(&phase) && distance.map_or(true, |d| self.race_distances.contains(&d))
    }
}

/// A structured workout resolved to concrete numbers for one day
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedWorkout {
    pub id: WorkoutId,
    pub title: String,
    pub workout_type: WorkoutType,
    pub level: Option<u8>,
    pub distance: f64,
    pub note: String,
}

impl ResolvedWorkout {
    /// Descriptor for a missing level or variant: zero distance, blank note
    pub fn empty(id: WorkoutId, title: &str, workout_type: WorkoutType) -> Self {
        Self {
            id,
            title: title.to_string(),
            workout_type,
            level: None,
            distance: 0.0,
            note: String::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.note.is_empty() && self.distance == 0.0
    }
}

/// "2" for 2.0, "1.5" for 1.5
pub fn trim_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{}", (value * 10.0).round() / 10.0)
    }
}

fn describe_seconds(seconds: u32) -> String {
    if seconds >= 60 && seconds % 60 == 0 {
        format!("{} min", seconds / 60)
    } else {
        format!("{} sec", seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workout_id_parse_rejects_unknown() {
        assert_eq!(
            "threshold_mile_repeats".parse::<WorkoutId>().unwrap(),
            WorkoutId::ThresholdMileRepeats
        );
        assert_eq!(
            "FARTLEK_MIX".parse::<WorkoutId>(),
            Err(PlanError::UnknownWorkoutId("FARTLEK_MIX".to_string()))
        );
    }

    #[test]
    fn test_workout_id_serde_matches_as_str() {
        for id in WorkoutId::ALL {
            let json = serde_json::to_string(&id).unwrap();
            assert_eq!(json, format!("\"{}\"", id.as_str()));
        }
    }

    #[test]
    fn test_family_mapping_is_total() {
        assert_eq!(WorkoutId::ThresholdCruiseIntervals.family().workout_type(), WorkoutType::Tempo);
        assert_eq!(WorkoutId::Vo2HillRepeats.family().workout_type(), WorkoutType::Speed);
        assert_eq!(WorkoutId::LongRunTaper.family().workout_type(), WorkoutType::Long);
    }

    #[test]
    fn test_segment_descriptions() {
        assert_eq!(Segment::Distance(2.0).describe(DistanceUnit::Miles), "2 mi");
        assert_eq!(Segment::Meters(800.0).describe(DistanceUnit::Miles), "800m");
        assert_eq!(Segment::Miles(1.0).describe(DistanceUnit::Miles), "1 mi");
        assert_eq!(Segment::Miles(1.0).describe(DistanceUnit::Kilometers), "1.6 km");
        assert_eq!(Segment::Miles(2.0).describe(DistanceUnit::Kilometers), "3.2 km");
        assert_eq!(Segment::Seconds(90).describe(DistanceUnit::Miles), "90 sec");
        assert_eq!(Segment::Seconds(180).describe(DistanceUnit::Miles), "3 min");
        assert_eq!(Segment::Seconds(180).distance_in(DistanceUnit::Miles), 0.0);
    }

    #[test]
    fn test_rest_display() {
        assert_eq!(Rest::seconds(60).to_string(), "60s");
        assert_eq!(Rest::minutes(2).to_string(), "2min");
    }
}
