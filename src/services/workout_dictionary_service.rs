//! Structured workout dictionary and progression selector.
//!
//! A dictionary entry holds ordered progression levels, each with one
//! variant per experience tier. Resolution picks the level from the phase,
//! the variant from the week's tier, and turns it into a total distance and
//! a one-line note.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use tracing::{debug, warn};

use crate::models::{
    trim_number, DistanceUnit, ExperienceTier, LongRunDetail, ProgressionLevel, RaceDistance,
    ResolvedWorkout, Rest, Segment, TrainingPhase, WorkoutDictionaryEntry, WorkoutFamily,
    WorkoutId, WorkoutVariant,
};
use crate::services::periodization_service::build_phase_midpoint;

/// Share of the week's volume given to the long run
const LONG_RUN_SHARE: f64 = 0.3;

/// Where in the plan a structured workout is being scheduled
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolveContext {
    pub phase: TrainingPhase,
    pub week_index: u32,
    pub total_weeks: u32,
    pub week_volume: u32,
    /// Per-week tier, derived from `week_volume`
    pub tier: ExperienceTier,
    pub unit: DistanceUnit,
}

pub struct WorkoutDictionary {
    entries: HashMap<WorkoutId, WorkoutDictionaryEntry>,
}

static STANDARD_DICTIONARY: Lazy<WorkoutDictionary> =
    Lazy::new(|| WorkoutDictionary::new(standard_entries()));

impl WorkoutDictionary {
    pub fn new(entries: Vec<WorkoutDictionaryEntry>) -> Self {
        Self {
            entries: entries.into_iter().map(|e| (e.id, e)).collect(),
        }
    }

    /// The built-in dictionary, constructed once and shared read-only
    pub fn standard() -> &'static WorkoutDictionary {
        &STANDARD_DICTIONARY
    }

    pub fn get(&self, id: WorkoutId) -> Option<&WorkoutDictionaryEntry> {
        self.entries.get(&id)
    }

    /// Entry for `id`; long runs without their own entry use the generic
    /// progressive long run
    pub fn lookup(&self, id: WorkoutId) -> Option<&WorkoutDictionaryEntry> {
        self.get(id).or_else(|| match id.family() {
            WorkoutFamily::LongRun => self.get(WorkoutId::LongRunProgressive),
            _ => None,
        })
    }

    /// Resolve `id` to concrete numbers. Missing entries, levels or variants
    /// yield an empty descriptor rather than an error.
    pub fn resolve(&self, id: WorkoutId, ctx: &ResolveContext) -> ResolvedWorkout {
        let workout_type = id.family().workout_type();

        let Some(entry) = self.lookup(id) else {
            warn!("No dictionary entry for {}", id);
            return ResolvedWorkout::empty(id, id.title(), workout_type);
        };

        let level_number = select_level(entry, ctx);
        let Some(variant) = entry.level(level_number).and_then(|l| l.variant_for(ctx.tier)) else {
            debug!(
                "No {} variant for {} at level {}",
                ctx.tier, entry.id, level_number
            );
            return ResolvedWorkout::empty(id, id.title(), workout_type);
        };

        let (distance, note) = match entry.family {
            WorkoutFamily::LongRun => long_run_summary(entry, variant, ctx),
            _ => interval_summary(entry, variant, ctx.unit),
        };

        debug!(
            id = %id,
            level = level_number,
            tier = %ctx.tier,
            distance,
            "Resolved structured workout"
        );

        ResolvedWorkout {
            id,
            title: id.title().to_string(),
            workout_type,
            level: Some(level_number),
            distance,
            note,
        }
    }
}

/// Progression level for the phase.
///
/// Base uses level 1 (threshold work alternates 1 and 2 by week parity),
/// build uses level 2 through the build midpoint and the hardest level after
/// it, peak uses the hardest level and taper drops back to level 1.
pub fn select_level(entry: &WorkoutDictionaryEntry, ctx: &ResolveContext) -> u8 {
    let hardest = entry.hardest_level();
    let wanted = match ctx.phase {
        TrainingPhase::Base => {
            if entry.family == WorkoutFamily::Threshold && ctx.week_index % 2 == 1 {
                2
            } else {
                1
            }
        }
        TrainingPhase::Build => match build_phase_midpoint(ctx.total_weeks) {
            Some(midpoint) if ctx.week_index > midpoint => hardest,
            _ => 2,
        },
        TrainingPhase::Peak => hardest,
        TrainingPhase::Taper => 1,
    };
    wanted.min(hardest)
}

/// Base long-run distance for a week's volume, at least one unit
pub fn long_run_distance(week_volume: u32) -> f64 {
    (week_volume as f64 * LONG_RUN_SHARE).round().max(1.0)
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn interval_summary(
    entry: &WorkoutDictionaryEntry,
    variant: &WorkoutVariant,
    unit: DistanceUnit,
) -> (f64, String) {
    let reps = variant.reps.unwrap_or(0);
    let rep_distance = variant.segment.map(|s| s.distance_in(unit)).unwrap_or(0.0);
    let distance = round_tenth(
        entry.warmup.unwrap_or(0.0) + reps as f64 * rep_distance + entry.cooldown.unwrap_or(0.0),
    );

    let note = match variant.segment {
        Some(segment) => {
            let mut note = format!("{} × {} @ {}", reps, segment.describe(unit), entry.intensity);
            if let Some(rest) = variant.rest {
                note.push_str(&format!(" (rest {})", rest));
            }
            note
        }
        None => String::new(),
    };

    (distance, note)
}

fn long_run_summary(
    entry: &WorkoutDictionaryEntry,
    variant: &WorkoutVariant,
    ctx: &ResolveContext,
) -> (f64, String) {
    let base = long_run_distance(ctx.week_volume);
    let distance =
        round_tenth(entry.warmup.unwrap_or(0.0) + base + entry.cooldown.unwrap_or(0.0));
    let label = ctx.unit.label();

    let note = match &variant.long_run {
        Some(LongRunDetail::FinishFast { distance: finish }) => {
            let finish = finish.min(base / 2.0);
            format!("Final {} {} at goal pace", trim_number(finish), label)
        }
        Some(LongRunDetail::RacePaceSegments { segments }) => {
            let joined = segments
                .iter()
                .map(|s| trim_number(*s))
                .collect::<Vec<_>>()
                .join("+");
            format!("Race-pace segments: {} {}", joined, label)
        }
        Some(LongRunDetail::Pickups { reps, seconds }) => {
            format!("{} × {} pickups", reps, Segment::Seconds(*seconds).describe(ctx.unit))
        }
        None => String::new(),
    };

    (distance, note)
}

// ---------------------------------------------------------------------------
// Built-in dictionary
// ---------------------------------------------------------------------------

fn reps(count: u32, segment: Segment, rest: Rest) -> WorkoutVariant {
    WorkoutVariant::intervals(count, segment, rest)
}

fn finish_fast(distance: f64) -> WorkoutVariant {
    WorkoutVariant::long_run(LongRunDetail::FinishFast { distance })
}

fn race_pace(segments: &[f64]) -> WorkoutVariant {
    WorkoutVariant::long_run(LongRunDetail::RacePaceSegments {
        segments: segments.to_vec(),
    })
}

fn pickups(count: u32, seconds: u32) -> WorkoutVariant {
    WorkoutVariant::long_run(LongRunDetail::Pickups { reps: count, seconds })
}

fn standard_entries() -> Vec<WorkoutDictionaryEntry> {
    use RaceDistance::*;
    use Segment::{Meters, Miles, Seconds};
    use TrainingPhase::*;

    let all_distances = RaceDistance::ALL.to_vec();

    vec![
        WorkoutDictionaryEntry {
            id: WorkoutId::ThresholdMileRepeats,
            name: "Threshold Mile Repeats",
            family: WorkoutFamily::Threshold,
            phases: vec![Base, Build, Peak],
            race_distances: all_distances.clone(),
            intensity: "threshold",
            warmup: Some(1.5),
            cooldown: Some(1.0),
            levels: vec![
                ProgressionLevel::new(
                    1,
                    reps(2, Miles(1.0), Rest::seconds(90)),
                    reps(3, Miles(1.0), Rest::seconds(90)),
                    reps(4, Miles(1.0), Rest::seconds(60)),
                ),
                ProgressionLevel::new(
                    2,
                    reps(3, Miles(1.0), Rest::seconds(90)),
                    reps(4, Miles(1.0), Rest::seconds(75)),
                    reps(3, Miles(2.0), Rest::seconds(90)),
                ),
                ProgressionLevel::new(
                    3,
                    reps(4, Miles(1.0), Rest::seconds(75)),
                    reps(3, Miles(2.0), Rest::seconds(90)),
                    reps(5, Miles(2.0), Rest::seconds(60)),
                ),
            ],
        },
        WorkoutDictionaryEntry {
            id: WorkoutId::ThresholdCruiseIntervals,
            name: "Cruise Intervals",
            family: WorkoutFamily::Threshold,
            phases: vec![Build, Peak, Taper],
            race_distances: vec![TenK, HalfMarathon, Marathon],
            intensity: "threshold",
            warmup: Some(1.5),
            cooldown: Some(1.0),
            levels: vec![
                ProgressionLevel::new(
                    1,
                    reps(3, Meters(1200.0), Rest::minutes(2)),
                    reps(4, Meters(1200.0), Rest::minutes(2)),
                    reps(5, Meters(1200.0), Rest::seconds(90)),
                ),
                ProgressionLevel::new(
                    2,
                    reps(3, Meters(1600.0), Rest::minutes(2)),
                    reps(4, Meters(1600.0), Rest::minutes(2)),
                    reps(5, Meters(1600.0), Rest::seconds(90)),
                ),
            ],
        },
        WorkoutDictionaryEntry {
            id: WorkoutId::Vo2EightHundreds,
            name: "800m Repeats",
            family: WorkoutFamily::Vo2Max,
            phases: vec![Build, Peak, Taper],
            race_distances: vec![FiveK, TenK, HalfMarathon],
            intensity: "5K effort",
            warmup: Some(1.5),
            cooldown: Some(1.0),
            levels: vec![
                ProgressionLevel::new(
                    1,
                    reps(4, Meters(400.0), Rest::seconds(90)),
                    reps(6, Meters(400.0), Rest::seconds(90)),
                    reps(8, Meters(400.0), Rest::seconds(60)),
                ),
                ProgressionLevel::new(
                    2,
                    reps(4, Meters(800.0), Rest::minutes(2)),
                    reps(5, Meters(800.0), Rest::minutes(2)),
                    reps(6, Meters(800.0), Rest::seconds(90)),
                ),
                ProgressionLevel::new(
                    3,
                    reps(5, Meters(800.0), Rest::minutes(2)),
                    reps(6, Meters(800.0), Rest::seconds(90)),
                    reps(8, Meters(800.0), Rest::seconds(90)),
                ),
            ],
        },
        WorkoutDictionaryEntry {
            id: WorkoutId::Vo2Kilometers,
            name: "Kilometer Repeats",
            family: WorkoutFamily::Vo2Max,
            phases: vec![Build, Peak, Taper],
            race_distances: all_distances.clone(),
            intensity: "5K effort",
            warmup: Some(2.0),
            cooldown: Some(1.0),
            levels: vec![
                ProgressionLevel::new(
                    1,
                    reps(3, Meters(1000.0), Rest::minutes(3)),
                    reps(4, Meters(1000.0), Rest::minutes(3)),
                    reps(5, Meters(1000.0), Rest::minutes(2)),
                ),
                ProgressionLevel::new(
                    2,
                    reps(4, Meters(1000.0), Rest::minutes(3)),
                    reps(5, Meters(1000.0), Rest::minutes(2)),
                    reps(6, Meters(1000.0), Rest::minutes(2)),
                ),
            ],
        },
        WorkoutDictionaryEntry {
            id: WorkoutId::Vo2HillRepeats,
            name: "Hill Repeats",
            family: WorkoutFamily::Vo2Max,
            phases: vec![Base, Build],
            race_distances: all_distances.clone(),
            intensity: "hard uphill effort",
            warmup: Some(2.0),
            cooldown: Some(1.5),
            levels: vec![
                ProgressionLevel::new(
                    1,
                    reps(6, Seconds(45), Rest::seconds(90)),
                    reps(8, Seconds(60), Rest::seconds(90)),
                    reps(10, Seconds(60), Rest::seconds(90)),
                ),
                ProgressionLevel::new(
                    2,
                    reps(8, Seconds(60), Rest::minutes(2)),
                    reps(10, Seconds(60), Rest::minutes(2)),
                    reps(8, Seconds(90), Rest::minutes(2)),
                ),
            ],
        },
        WorkoutDictionaryEntry {
            id: WorkoutId::LongRunProgressive,
            name: "Progressive Long Run",
            family: WorkoutFamily::LongRun,
            phases: vec![Base, Build, Peak, Taper],
            race_distances: all_distances.clone(),
            intensity: "aerobic",
            warmup: None,
            cooldown: None,
            levels: vec![
                ProgressionLevel::new(1, finish_fast(1.0), finish_fast(2.0), finish_fast(3.0)),
                ProgressionLevel::new(2, finish_fast(2.0), finish_fast(3.0), finish_fast(4.0)),
                ProgressionLevel::new(3, finish_fast(3.0), finish_fast(4.0), finish_fast(5.0)),
            ],
        },
        WorkoutDictionaryEntry {
            id: WorkoutId::LongRunRacePace,
            name: "Race-Pace Long Run",
            family: WorkoutFamily::LongRun,
            phases: vec![Build, Peak],
            race_distances: vec![HalfMarathon, Marathon],
            intensity: "goal race pace",
            warmup: None,
            cooldown: None,
            levels: vec![
                ProgressionLevel::new(1, race_pace(&[1.0, 1.0]), race_pace(&[2.0, 2.0]), race_pace(&[2.0, 2.0, 2.0])),
                ProgressionLevel::new(2, race_pace(&[2.0, 2.0]), race_pace(&[3.0, 3.0]), race_pace(&[3.0, 3.0, 3.0])),
                ProgressionLevel::new(
                    3,
                    race_pace(&[2.0, 2.0, 2.0]),
                    race_pace(&[3.0, 3.0, 3.0]),
                    race_pace(&[4.0, 4.0, 4.0]),
                ),
            ],
        },
        WorkoutDictionaryEntry {
            id: WorkoutId::LongRunSharpening,
            name: "Sharpening Long Run",
            family: WorkoutFamily::LongRun,
            phases: vec![Peak, Taper],
            race_distances: all_distances,
            intensity: "strides",
            warmup: None,
            cooldown: None,
            levels: vec![
                ProgressionLevel::new(1, pickups(4, 20), pickups(6, 20), pickups(8, 20)),
                ProgressionLevel::new(2, pickups(6, 20), pickups(6, 30), pickups(8, 30)),
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(phase: TrainingPhase, week_index: u32, tier: ExperienceTier) -> ResolveContext {
        ResolveContext {
            phase,
            week_index,
            total_weeks: 16,
            week_volume: 40,
            tier,
            unit: DistanceUnit::Miles,
        }
    }

    #[test]
    fn test_mile_repeats_advanced_peak() {
        let dictionary = WorkoutDictionary::standard();
        let resolved = dictionary.resolve(
            WorkoutId::ThresholdMileRepeats,
            &ctx(TrainingPhase::Peak, 13, ExperienceTier::Advanced),
        );

        assert_eq!(resolved.level, Some(3));
        assert_eq!(resolved.distance, 12.5);
        assert_eq!(resolved.note, "5 × 2 mi @ threshold (rest 60s)");
        assert_eq!(resolved.workout_type, crate::models::WorkoutType::Tempo);
    }

    #[test]
    fn test_mile_repeats_keep_their_length_in_km_plans() {
        let mut context = ctx(TrainingPhase::Peak, 13, ExperienceTier::Advanced);
        context.unit = DistanceUnit::Kilometers;
        let resolved = WorkoutDictionary::standard().resolve(WorkoutId::ThresholdMileRepeats, &context);

        // 1.5 + 5 × 3.22 km + 1
        assert_eq!(resolved.distance, 18.6);
        assert_eq!(resolved.note, "5 × 3.2 km @ threshold (rest 60s)");
    }

    #[test]
    fn test_threshold_alternates_levels_in_base() {
        let entry = WorkoutDictionary::standard().get(WorkoutId::ThresholdMileRepeats).unwrap();
        assert_eq!(select_level(entry, &ctx(TrainingPhase::Base, 0, ExperienceTier::Beginner)), 1);
        assert_eq!(select_level(entry, &ctx(TrainingPhase::Base, 1, ExperienceTier::Beginner)), 2);
        assert_eq!(select_level(entry, &ctx(TrainingPhase::Base, 2, ExperienceTier::Beginner)), 1);

        let hills = WorkoutDictionary::standard().get(WorkoutId::Vo2HillRepeats).unwrap();
        assert_eq!(select_level(hills, &ctx(TrainingPhase::Base, 1, ExperienceTier::Beginner)), 1);
    }

    #[test]
    fn test_build_switches_to_hardest_after_midpoint() {
        let entry = WorkoutDictionary::standard().get(WorkoutId::Vo2EightHundreds).unwrap();
        // 16 weeks: build is weeks 7..=11, midpoint 9
        assert_eq!(select_level(entry, &ctx(TrainingPhase::Build, 7, ExperienceTier::Beginner)), 2);
        assert_eq!(select_level(entry, &ctx(TrainingPhase::Build, 9, ExperienceTier::Beginner)), 2);
        assert_eq!(select_level(entry, &ctx(TrainingPhase::Build, 10, ExperienceTier::Beginner)), 3);
        assert_eq!(select_level(entry, &ctx(TrainingPhase::Taper, 15, ExperienceTier::Beginner)), 1);
    }

    #[test]
    fn test_meters_convert_to_plan_unit() {
        let dictionary = WorkoutDictionary::standard();
        let mut context = ctx(TrainingPhase::Taper, 15, ExperienceTier::Intermediate);
        let resolved = dictionary.resolve(WorkoutId::Vo2EightHundreds, &context);
        // 1.5 + 6 × 400m (1.49 mi) + 1
        assert_eq!(resolved.distance, 4.0);
        assert_eq!(resolved.note, "6 × 400m @ 5K effort (rest 90s)");

        context.unit = DistanceUnit::Kilometers;
        let resolved = dictionary.resolve(WorkoutId::Vo2EightHundreds, &context);
        assert_eq!(resolved.distance, 4.9);
    }

    #[test]
    fn test_time_based_reps_add_no_distance() {
        let resolved = WorkoutDictionary::standard().resolve(
            WorkoutId::Vo2HillRepeats,
            &ctx(TrainingPhase::Base, 0, ExperienceTier::Intermediate),
        );
        assert_eq!(resolved.distance, 3.5);
        assert_eq!(resolved.note, "8 × 1 min @ hard uphill effort (rest 90s)");
    }

    #[test]
    fn test_long_run_without_entry_falls_back_to_progressive() {
        let resolved = WorkoutDictionary::standard().resolve(
            WorkoutId::LongRunBase,
            &ctx(TrainingPhase::Base, 0, ExperienceTier::Intermediate),
        );
        assert_eq!(resolved.title, "Base Long Run");
        assert_eq!(resolved.distance, 12.0);
        assert_eq!(resolved.note, "Final 2 mi at goal pace");
    }

    #[test]
    fn test_finish_fast_is_capped_at_half_the_long_run() {
        let mut context = ctx(TrainingPhase::Peak, 13, ExperienceTier::Advanced);
        context.week_volume = 20;
        let resolved = WorkoutDictionary::standard().resolve(WorkoutId::LongRunProgressive, &context);
        assert_eq!(resolved.distance, 6.0);
        assert_eq!(resolved.note, "Final 3 mi at goal pace");
    }

    #[test]
    fn test_race_pace_segments_and_pickups() {
        let dictionary = WorkoutDictionary::standard();
        let resolved = dictionary.resolve(
            WorkoutId::LongRunRacePace,
            &ctx(TrainingPhase::Peak, 13, ExperienceTier::Advanced),
        );
        assert_eq!(resolved.note, "Race-pace segments: 4+4+4 mi");

        let resolved = dictionary.resolve(
            WorkoutId::LongRunSharpening,
            &ctx(TrainingPhase::Taper, 15, ExperienceTier::Beginner),
        );
        assert_eq!(resolved.note, "4 × 20 sec pickups");
    }

    #[test]
    fn test_missing_variant_degrades_to_empty() {
        let mut level = ProgressionLevel::new(
            1,
            reps(3, Segment::Distance(1.0), Rest::seconds(90)),
            reps(4, Segment::Distance(1.0), Rest::seconds(90)),
            reps(5, Segment::Distance(1.0), Rest::seconds(90)),
        );
        level.advanced = None;
        let dictionary = WorkoutDictionary::new(vec![WorkoutDictionaryEntry {
            id: WorkoutId::ThresholdMileRepeats,
            name: "Sparse",
            family: WorkoutFamily::Threshold,
            phases: vec![TrainingPhase::Base],
            race_distances: vec![],
            intensity: "threshold",
            warmup: None,
            cooldown: None,
            levels: vec![level],
        }]);

        let resolved = dictionary.resolve(
            WorkoutId::ThresholdMileRepeats,
            &ctx(TrainingPhase::Base, 0, ExperienceTier::Advanced),
        );
        assert!(resolved.is_empty());
        assert_eq!(resolved.level, None);

        let missing = dictionary.resolve(
            WorkoutId::Vo2Kilometers,
            &ctx(TrainingPhase::Build, 8, ExperienceTier::Beginner),
        );
        assert!(missing.is_empty());
    }

    #[test]
    fn test_every_entry_has_all_tiers() {
        for id in WorkoutId::ALL {
            let Some(entry) = WorkoutDictionary::standard().get(id) else {
                continue;
            };
            for level in &entry.levels {
                for tier in [ExperienceTier::Beginner, ExperienceTier::Intermediate, ExperienceTier::Advanced] {
                    assert!(level.variant_for(tier).is_some(), "{} level {} {}", id, level.level, tier);
                }
            }
        }
    }
}
