use std::collections::HashMap;

use chrono::Weekday;
use once_cell::sync::Lazy;
use tracing::warn;

use crate::models::{
    RaceDistance, RaceTemplate, TemplateEntry, TrainingPhase, WeekTemplate, WorkoutId,
    WorkoutType,
};

/// Race templates keyed by race-distance key
#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    templates: HashMap<String, RaceTemplate>,
}

static STANDARD_TEMPLATES: Lazy<TemplateRegistry> = Lazy::new(|| {
    TemplateRegistry::new(vec![
        five_k_template(),
        ten_k_template(),
        half_marathon_template(),
        marathon_template(),
    ])
});

impl TemplateRegistry {
    /// Registry keyed by each template's race-distance key
    pub fn new(templates: Vec<RaceTemplate>) -> Self {
        Self {
            templates: templates
                .into_iter()
                .map(|t| (t.distance.key().to_string(), t))
                .collect(),
        }
    }

    /// Built-in templates for 5k, 10k, half marathon and marathon
    pub fn standard() -> &'static TemplateRegistry {
        &STANDARD_TEMPLATES
    }

    /// Register `template` under an arbitrary key
    pub fn insert(&mut self, key: impl Into<String>, template: RaceTemplate) {
        self.templates.insert(key.into(), template);
    }

    /// Template for a free-form race name.
    ///
    /// Lookup order:
    /// 1. key of the normalized race distance
    /// 2. the raw string
    /// 3. the lowercased raw string
    ///
    /// `None` when all three miss; the scheduler then default-fills every day.
    pub fn resolve(&self, raw: &str) -> Option<&RaceTemplate> {
        let found = RaceDistance::normalize(raw)
            .and_then(|d| self.templates.get(d.key()))
            .or_else(|| self.templates.get(raw))
            .or_else(|| self.templates.get(&raw.to_lowercase()));

        if found.is_none() {
            warn!("No template registered for race distance '{}'", raw);
        }
        found
    }

    /// Weekday map for one phase of a race
    pub fn phase_template(&self, raw: &str, phase: TrainingPhase) -> Option<&WeekTemplate> {
        self.resolve(raw).map(|t| t.phase(phase))
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

fn rest() -> TemplateEntry {
    TemplateEntry::plain(WorkoutType::Rest)
}

fn easy() -> TemplateEntry {
    TemplateEntry::plain(WorkoutType::Easy)
}

// 5K plans are speed-led with a Sunday long run. Base week leaves Wednesday
// to the default fill.
fn five_k_template() -> RaceTemplate {
    use Weekday::*;

    RaceTemplate {
        distance: RaceDistance::FiveK,
        base: WeekTemplate::new()
            .with(Mon, rest())
            .with(Tue, TemplateEntry::structured(WorkoutId::Vo2HillRepeats))
            .with(Thu, easy())
            .with(Fri, rest())
            .with(Sat, TemplateEntry::plain_with_note(WorkoutType::Easy, "Finish with 4 × 20 sec strides"))
            .with(Sun, TemplateEntry::structured(WorkoutId::LongRunBase)),
        build: WeekTemplate::new()
            .with(Mon, rest())
            .with(Tue, TemplateEntry::structured(WorkoutId::Vo2EightHundreds))
            .with(Wed, easy())
            .with(Thu, TemplateEntry::structured(WorkoutId::ThresholdMileRepeats))
            .with(Fri, rest())
            .with(Sat, easy())
            .with(Sun, TemplateEntry::structured(WorkoutId::LongRunProgressive)),
        peak: WeekTemplate::new()
            .with(Mon, rest())
            .with(Tue, TemplateEntry::structured(WorkoutId::Vo2Kilometers))
            .with(Wed, easy())
            .with(Thu, TemplateEntry::quality())
            .with(Fri, rest())
            .with(Sat, easy())
            .with(Sun, TemplateEntry::structured(WorkoutId::LongRunSharpening)),
        taper: WeekTemplate::new()
            .with(Mon, rest())
            .with(Tue, TemplateEntry::structured(WorkoutId::Vo2EightHundreds))
            .with(Wed, easy())
            .with(Thu, TemplateEntry::plain_with_note(WorkoutType::Easy, "Relaxed with a few strides"))
            .with(Fri, rest())
            .with(Sat, easy())
            .with(Sun, TemplateEntry::structured(WorkoutId::LongRunTaper)),
    }
}

fn ten_k_template() -> RaceTemplate {
    use Weekday::*;

    RaceTemplate {
        distance: RaceDistance::TenK,
        base: WeekTemplate::new()
            .with(Mon, rest())
            .with(Tue, TemplateEntry::structured(WorkoutId::ThresholdMileRepeats))
            .with(Wed, easy())
            .with(Thu, TemplateEntry::structured(WorkoutId::Vo2HillRepeats))
            .with(Fri, rest())
            .with(Sat, easy())
            .with(Sun, TemplateEntry::structured(WorkoutId::LongRunBase)),
        build: WeekTemplate::new()
            .with(Mon, rest())
            .with(Tue, TemplateEntry::structured(WorkoutId::ThresholdCruiseIntervals))
            .with(Wed, easy())
            .with(Thu, TemplateEntry::structured(WorkoutId::Vo2EightHundreds))
            .with(Fri, rest())
            .with(Sat, easy())
            .with(Sun, TemplateEntry::structured(WorkoutId::LongRunProgressive)),
        peak: WeekTemplate::new()
            .with(Mon, rest())
            .with(Tue, TemplateEntry::structured(WorkoutId::Vo2Kilometers))
            .with(Wed, easy())
            .with(Thu, TemplateEntry::structured(WorkoutId::ThresholdCruiseIntervals))
            .with(Fri, rest())
            .with(Sat, easy())
            .with(Sun, TemplateEntry::structured(WorkoutId::LongRunSharpening)),
        taper: WeekTemplate::new()
            .with(Mon, rest())
            .with(Tue, TemplateEntry::quality())
            .with(Wed, easy())
            .with(Fri, rest())
            .with(Sat, easy())
            .with(Sun, TemplateEntry::structured(WorkoutId::LongRunTaper)),
    }
}

// Half and full marathon plans put the long run on Saturday
fn half_marathon_template() -> RaceTemplate {
    use Weekday::*;

    RaceTemplate {
        distance: RaceDistance::HalfMarathon,
        base: WeekTemplate::new()
            .with(Mon, rest())
            .with(Tue, TemplateEntry::structured(WorkoutId::ThresholdMileRepeats))
            .with(Wed, easy())
            .with(Thu, easy())
            .with(Fri, rest())
            .with(Sat, TemplateEntry::structured(WorkoutId::LongRunBase))
            .with(Sun, TemplateEntry::plain_with_note(WorkoutType::Easy, "Recovery pace")),
        build: WeekTemplate::new()
            .with(Mon, rest())
            .with(Tue, TemplateEntry::structured(WorkoutId::ThresholdCruiseIntervals))
            .with(Wed, easy())
            .with(Thu, TemplateEntry::quality())
            .with(Fri, rest())
            .with(Sat, TemplateEntry::structured(WorkoutId::LongRunProgressive))
            .with(Sun, easy()),
        peak: WeekTemplate::new()
            .with(Mon, rest())
            .with(Tue, TemplateEntry::structured(WorkoutId::ThresholdMileRepeats))
            .with(Wed, easy())
            .with(Thu, TemplateEntry::structured(WorkoutId::Vo2EightHundreds))
            .with(Fri, rest())
            .with(Sat, TemplateEntry::structured(WorkoutId::LongRunRacePace))
            .with(Sun, easy()),
        taper: WeekTemplate::new()
            .with(Mon, rest())
            .with(Tue, TemplateEntry::structured(WorkoutId::ThresholdCruiseIntervals))
            .with(Wed, easy())
            .with(Thu, easy())
            .with(Fri, rest())
            .with(Sat, TemplateEntry::structured(WorkoutId::LongRunTaper)),
    }
}

fn marathon_template() -> RaceTemplate {
    use Weekday::*;

    RaceTemplate {
        distance: RaceDistance::Marathon,
        base: WeekTemplate::new()
            .with(Mon, rest())
            .with(Tue, easy())
            .with(Wed, TemplateEntry::structured(WorkoutId::ThresholdMileRepeats))
            .with(Thu, easy())
            .with(Fri, rest())
            .with(Sat, TemplateEntry::structured(WorkoutId::LongRunBase))
            .with(Sun, TemplateEntry::plain_with_note(WorkoutType::Easy, "Recovery pace")),
        build: WeekTemplate::new()
            .with(Mon, rest())
            .with(Tue, TemplateEntry::structured(WorkoutId::ThresholdCruiseIntervals))
            .with(Wed, easy())
            .with(Thu, TemplateEntry::structured(WorkoutId::Vo2Kilometers))
            .with(Fri, rest())
            .with(Sat, TemplateEntry::structured(WorkoutId::LongRunRacePace))
            .with(Sun, easy()),
        peak: WeekTemplate::new()
            .with(Mon, rest())
            .with(Tue, TemplateEntry::structured(WorkoutId::ThresholdCruiseIntervals))
            .with(Wed, easy())
            .with(Thu, TemplateEntry::structured_with_note(WorkoutId::ThresholdMileRepeats, "Marathon-specific strength"))
            .with(Fri, rest())
            .with(Sat, TemplateEntry::structured(WorkoutId::LongRunRacePace))
            .with(Sun, easy()),
        taper: WeekTemplate::new()
            .with(Mon, rest())
            .with(Tue, TemplateEntry::structured(WorkoutId::ThresholdCruiseIntervals))
            .with(Wed, easy())
            .with(Thu, easy())
            .with(Fri, rest())
            .with(Sat, TemplateEntry::structured(WorkoutId::LongRunTaper))
            .with(Sun, easy()),
    }
}
