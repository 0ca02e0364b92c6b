use serde::{Deserialize, Serialize};

use crate::error::PlanError;

// ---------------------------------------------------------------------------
// Training Phase: periodization stage derived from position in the plan
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrainingPhase {
    /// Aerobic foundation, easy volume
    Base,
    /// Rising volume with regular quality sessions
    Build,
    /// Hardest, most race-specific weeks
    Peak,
    /// Reduced volume before the race
    Taper,
}

impl TrainingPhase {
    pub const ALL: [TrainingPhase; 4] = [Self::Base, Self::Build, Self::Peak, Self::Taper];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Base => "base",
            Self::Build => "build",
            Self::Peak => "peak",
            Self::Taper => "taper",
        }
    }

    /// One-line focus for the phase, embedded in workout notes
    pub fn guidance(&self) -> &'static str {
        match self {
            Self::Base => "Base phase: keep it aerobic and build consistency",
            Self::Build => "Build phase: volume and quality rise together",
            Self::Peak => "Peak phase: race-specific work at full load",
            Self::Taper => "Taper phase: stay sharp, shed fatigue",
        }
    }
}

impl std::fmt::Display for TrainingPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for TrainingPhase {
    type Err = PlanError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "base" => Ok(Self::Base),
            "build" => Ok(Self::Build),
            "peak" => Ok(Self::Peak),
            "taper" => Ok(Self::Taper),
            _ => Err(PlanError::UnknownPhase(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Experience Tier: selects workout difficulty
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceTier {
    Beginner,
    Intermediate,
    Advanced,
}

impl ExperienceTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }
}

impl std::fmt::Display for ExperienceTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ExperienceTier {
    type Err = PlanError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "beginner" => Ok(Self::Beginner),
            "intermediate" => Ok(Self::Intermediate),
            "advanced" => Ok(Self::Advanced),
            _ => Err(PlanError::UnknownTier(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Workout Type: the category of a scheduled day
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkoutType {
    Easy,
    Tempo,
    Speed,
    Long,
    Rest,
    Race,
}

impl WorkoutType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Tempo => "Tempo",
            Self::Speed => "Speed",
            Self::Long => "Long",
            Self::Rest => "Rest",
            Self::Race => "Race",
        }
    }

    /// Default event title for plain (non-structured) days
    pub fn title(&self) -> &'static str {
        match self {
            Self::Easy => "Easy Run",
            Self::Tempo => "Tempo Run",
            Self::Speed => "Speed Workout",
            Self::Long => "Long Run",
            Self::Rest => "Rest Day",
            Self::Race => "Race Day",
        }
    }

    /// Calendar theme color
    pub fn theme_color(&self) -> &'static str {
        match self {
            Self::Easy => "#4caf50",
            Self::Tempo => "#ff9800",
            Self::Speed => "#f44336",
            Self::Long => "#3f51b5",
            Self::Rest => "#9e9e9e",
            Self::Race => "#ffd700",
        }
    }

    pub fn intensity(&self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Tempo => "threshold",
            Self::Speed => "interval",
            Self::Long => "aerobic",
            Self::Rest => "rest",
            Self::Race => "race",
        }
    }

    /// Tempo and Speed are the two quality-workout families
    pub fn is_quality(&self) -> bool {
        matches!(self, Self::Tempo | Self::Speed)
    }
}

impl std::fmt::Display for WorkoutType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for WorkoutType {
    type Err = PlanError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "tempo" => Ok(Self::Tempo),
            "speed" => Ok(Self::Speed),
            "long" => Ok(Self::Long),
            "rest" => Ok(Self::Rest),
            "race" => Ok(Self::Race),
            _ => Err(PlanError::UnknownWorkoutType(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Distance unit used for volumes, paces and event distances
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceUnit {
    #[default]
    Miles,
    Kilometers,
}

impl DistanceUnit {
    pub fn meters(&self) -> f64 {
        match self {
            Self::Miles => 1609.344,
            Self::Kilometers => 1000.0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Miles => "mi",
            Self::Kilometers => "km",
        }
    }

    pub fn from_meters(&self, meters: f64) -> f64 {
        meters / self.meters()
    }
}

impl std::fmt::Display for DistanceUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for DistanceUnit {
    type Err = PlanError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mi" | "mile" | "miles" => Ok(Self::Miles),
            "km" | "kilometer" | "kilometers" | "kilometre" | "kilometres" => Ok(Self::Kilometers),
            _ => Err(PlanError::UnknownDistanceUnit(s.to_string())),
        }
    }
}
