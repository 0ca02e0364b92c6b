//! Day-by-day scheduler.
//!
//! Walks the calendar from the start date to race day, emitting one event per
//! scheduled day and finishing with a single race event. The mileage curve and
//! the global tier are computed once; phase, template entry, structured
//! workout and pace are looked up per day.

use chrono::{Datelike, NaiveDate, Weekday};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::config::PlanSettings;
use crate::error::PlanResult;
use crate::models::{
    weekday_name, EventDraft, ExperienceTier, PlanRequest, RaceTemplate, TemplateEntry,
    TrainingPhase, TrainingPlan, WorkoutEvent, WorkoutId, WorkoutType,
};
use crate::services::calendar::add_days;
use crate::services::mileage_service::build_weekly_mileage;
use crate::services::pace_service::recommend_pace;
use crate::services::periodization_service::{global_tier, phase_for_week, weekly_tier};
use crate::services::template_service::TemplateRegistry;
use crate::services::workout_dictionary_service::{ResolveContext, WorkoutDictionary};

/// Chance that an unconstrained quality day becomes a tempo run
const TEMPO_PROBABILITY: f64 = 0.75;

/// Build a plan with the built-in templates and dictionary.
///
/// `rng` drives the tempo/speed choice on quality days that neither the
/// template nor the preferences pin down; a seeded generator makes the
/// whole plan reproducible.
pub fn create_training_plan<R: Rng + ?Sized>(
    request: &PlanRequest,
    rng: &mut R,
) -> PlanResult<TrainingPlan> {
    PlanScheduler::new(request, TemplateRegistry::standard(), WorkoutDictionary::standard())?.run(rng)
}

/// Plan generation with settings-driven randomness
pub struct PlanGenerationService<'a> {
    settings: PlanSettings,
    templates: &'a TemplateRegistry,
    dictionary: &'a WorkoutDictionary,
}

impl PlanGenerationService<'static> {
    pub fn new(settings: PlanSettings) -> Self {
        Self::with_sources(settings, TemplateRegistry::standard(), WorkoutDictionary::standard())
    }
}

impl<'a> PlanGenerationService<'a> {
    pub fn with_sources(
        settings: PlanSettings,
        templates: &'a TemplateRegistry,
        dictionary: &'a WorkoutDictionary,
    ) -> Self {
        Self {
            settings,
            templates,
            dictionary,
        }
    }

    pub fn settings(&self) -> &PlanSettings {
        &self.settings
    }

    /// Generate a plan, seeding the RNG from settings when a seed is set
    pub fn generate_plan(&self, request: &PlanRequest) -> PlanResult<TrainingPlan> {
        let mut rng = match self.settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.generate_plan_with_rng(request, &mut rng)
    }

    pub fn generate_plan_with_rng<R: Rng + ?Sized>(
        &self,
        request: &PlanRequest,
        rng: &mut R,
    ) -> PlanResult<TrainingPlan> {
        match self.settings.distance_unit {
            Some(unit) if unit != request.distance_unit => {
                let request = request.clone().with_unit(unit);
                PlanScheduler::new(&request, self.templates, self.dictionary)?.run(rng)
            }
            _ => PlanScheduler::new(request, self.templates, self.dictionary)?.run(rng),
        }
    }
}

/// Per-request scheduling state
pub struct PlanScheduler<'a> {
    request: &'a PlanRequest,
    template: Option<&'a RaceTemplate>,
    dictionary: &'a WorkoutDictionary,
    mileage: Vec<u32>,
    tier: ExperienceTier,
}

/// Where the day being scheduled sits in the plan
struct Day {
    date: NaiveDate,
    weekday: Weekday,
    week_index: u32,
    day_index: u32,
    phase: TrainingPhase,
    volume: u32,
}

/// A day's workout before pace and effort annotations
struct PlannedWorkout {
    title: String,
    workout: WorkoutType,
    distance: f64,
    notes: Vec<String>,
}

impl PlannedWorkout {
    fn new(workout: WorkoutType, distance: f64) -> Self {
        Self {
            title: workout.title().to_string(),
            workout,
            distance,
            notes: Vec::new(),
        }
    }

    fn with_note(mut self, note: Option<&str>) -> Self {
        if let Some(note) = note.filter(|n| !n.is_empty()) {
            self.notes.push(note.to_string());
        }
        self
    }
}

impl<'a> PlanScheduler<'a> {
    pub fn new(
        request: &'a PlanRequest,
        templates: &'a TemplateRegistry,
        dictionary: &'a WorkoutDictionary,
    ) -> PlanResult<Self> {
        request.validate()?;

        Ok(Self {
            request,
            template: templates.resolve(&request.race_distance),
            dictionary,
            mileage: build_weekly_mileage(request.num_weeks, request.peak_weekly_volume),
            tier: global_tier(request.peak_weekly_volume, &request.goal_pace),
        })
    }

    pub fn mileage(&self) -> &[u32] {
        &self.mileage
    }

    pub fn tier(&self) -> ExperienceTier {
        self.tier
    }

    /// Walk every day from the start date until the race event is emitted
    pub fn run<R: Rng + ?Sized>(self, rng: &mut R) -> PlanResult<TrainingPlan> {
        let request = self.request;
        info!(
            start = %request.start_date,
            race = %request.race_date,
            weeks = request.num_weeks,
            distance = %request.race_distance,
            tier = %self.tier,
            templated = self.template.is_some(),
            "Generating training plan"
        );

        let mut events = Vec::new();
        let mut date = request.start_date;
        let mut week_start = date;
        let mut week_index = 0;

        loop {
            if (date - week_start).num_days() >= 7 {
                week_index += 1;
                week_start = date;
                debug!(week = week_index, volume = self.week_volume(week_index), "Next plan week");
            }

            let day = Day {
                date,
                weekday: date.weekday(),
                week_index,
                day_index: (date - week_start).num_days() as u32,
                phase: phase_for_week(week_index, request.num_weeks),
                volume: self.week_volume(week_index),
            };

            if date == request.race_date {
                events.push(self.race_event(&day));
                break;
            }

            if !self.is_final_week(week_index) || matches!(day.weekday, Weekday::Tue | Weekday::Thu) {
                let planned = self.plan_day(&day, rng);
                events.push(self.annotate(&day, planned));
            }

            date = add_days(date, 1);
        }

        info!(events = events.len(), "Training plan generated");

        Ok(TrainingPlan::new(
            events,
            self.mileage,
            self.tier,
            request.resolved_distance(),
        ))
    }

    /// Planned volume for a week; weeks past the curve reuse its last value
    fn week_volume(&self, week_index: u32) -> u32 {
        self.mileage
            .get(week_index as usize)
            .or(self.mileage.last())
            .copied()
            .unwrap_or(0)
    }

    fn is_final_week(&self, week_index: u32) -> bool {
        week_index + 1 >= self.request.num_weeks
    }

    fn plan_day<R: Rng + ?Sized>(&self, day: &Day, rng: &mut R) -> PlannedWorkout {
        let entry = self
            .template
            .map(|t| t.phase(day.phase))
            .and_then(|week| week.entry(day.weekday));

        match entry {
            Some(TemplateEntry::Structured { id, note }) => self.structured_day(*id, note.as_deref(), day),
            Some(TemplateEntry::Plain { workout, note }) => self.plain_day(*workout, note.as_deref(), day),
            Some(TemplateEntry::Quality { note }) => {
                let workout = self.pick_quality(rng).unwrap_or(WorkoutType::Easy);
                self.plain_day(workout, note.as_deref(), day)
            }
            None => self.default_fill(day, rng),
        }
    }

    fn structured_day(&self, id: WorkoutId, note: Option<&str>, day: &Day) -> PlannedWorkout {
        let ctx = ResolveContext {
            phase: day.phase,
            week_index: day.week_index,
            total_weeks: self.request.num_weeks,
            week_volume: day.volume,
            tier: weekly_tier(day.volume),
            unit: self.request.distance_unit,
        };
        let resolved = self.dictionary.resolve(id, &ctx);

        if !self.request.allows(resolved.workout_type) {
            debug!(id = %id, "Structured workout excluded by preferences");
            return PlannedWorkout::new(WorkoutType::Easy, even_share(day.volume, 7.0))
                .with_note(Some(format!("Easy run in place of {}", resolved.title).as_str()));
        }

        PlannedWorkout {
            title: resolved.title,
            workout: resolved.workout_type,
            distance: resolved.distance,
            notes: Vec::new(),
        }
        .with_note(note)
        .with_note(Some(resolved.note.as_str()))
    }

    fn plain_day(&self, workout: WorkoutType, note: Option<&str>, day: &Day) -> PlannedWorkout {
        let workout = if self.request.allows(workout) {
            workout
        } else {
            WorkoutType::Easy
        };
        let distance = match workout {
            WorkoutType::Rest => 0.0,
            _ => even_share(day.volume, 7.0),
        };
        PlannedWorkout::new(workout, distance).with_note(note)
    }

    /// Days without a template entry: Sunday rest below the advanced tier,
    /// then Tuesday quality, Saturday long and easy running otherwise
    fn default_fill<R: Rng + ?Sized>(&self, day: &Day, rng: &mut R) -> PlannedWorkout {
        let advanced = self.tier == ExperienceTier::Advanced;
        if !advanced && day.weekday == Weekday::Sun {
            return PlannedWorkout::new(WorkoutType::Rest, 0.0);
        }

        let workout = match day.weekday {
            Weekday::Tue => self.pick_quality(rng).unwrap_or(WorkoutType::Easy),
            Weekday::Sat => WorkoutType::Long,
            _ => WorkoutType::Easy,
        };
        let divisor = if advanced { 7.0 } else { 6.0 };
        PlannedWorkout::new(workout, even_share(day.volume, divisor))
    }

    /// Tempo or speed, honoring preferences; `None` when both are excluded
    fn pick_quality<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<WorkoutType> {
        match (
            self.request.allows(WorkoutType::Tempo),
            self.request.allows(WorkoutType::Speed),
        ) {
            (true, true) => Some(if rng.gen_bool(TEMPO_PROBABILITY) {
                WorkoutType::Tempo
            } else {
                WorkoutType::Speed
            }),
            (true, false) => Some(WorkoutType::Tempo),
            (false, true) => Some(WorkoutType::Speed),
            (false, false) => None,
        }
    }

    fn annotate(&self, day: &Day, planned: PlannedWorkout) -> WorkoutEvent {
        let unit = self.request.distance_unit.label();
        let goal = &self.request.goal_pace;
        let mut notes = planned.notes;

        if planned.workout.is_quality() && notes.is_empty() {
            notes.push(format!("Run at {} effort", planned.workout.intensity()));
        }

        let pace = recommend_pace(planned.workout, day.phase, goal);
        if let Some(pace) = &pace {
            notes.push(format!("Target pace: {} /{}", pace.pace, unit));
        }

        if planned.workout == WorkoutType::Long {
            notes.push(format!("Effort: {}. {}", long_run_effort(day.phase), day.phase.guidance()));
            if matches!(day.phase, TrainingPhase::Build | TrainingPhase::Peak) {
                notes.push(format!(
                    "Finish fast: run the last 10-15 minutes near goal pace ({} /{})",
                    goal, unit
                ));
            }
        }

        WorkoutEvent::new(EventDraft {
            date: day.date,
            week_index: day.week_index,
            day_index: day.day_index,
            day_name: weekday_name(day.weekday).to_string(),
            title: planned.title,
            workout: planned.workout,
            distance: planned.distance,
            notes: notes.join("\n"),
            recommended_pace: pace.as_ref().map(|p| p.pace.clone()),
            recommended_pace_decimal: pace.map(|p| p.decimal),
            phase: day.phase,
        })
    }

    fn race_event(&self, day: &Day) -> WorkoutEvent {
        let request = self.request;
        let distance = request.resolved_distance();
        let title = match distance {
            Some(d) => format!("{} Race Day", d.display_name()),
            None => WorkoutType::Race.title().to_string(),
        };

        WorkoutEvent::new(EventDraft {
            date: day.date,
            week_index: day.week_index,
            day_index: day.day_index,
            day_name: weekday_name(day.weekday).to_string(),
            title,
            workout: WorkoutType::Race,
            distance: distance.map(|d| d.length(request.distance_unit)).unwrap_or(0.0),
            notes: format!(
                "Race day! Goal pace {} /{}",
                request.goal_pace,
                request.distance_unit.label()
            ),
            recommended_pace: Some(request.goal_pace.to_string()),
            recommended_pace_decimal: Some(request.goal_pace.decimal()),
            phase: day.phase,
        })
    }
}

/// `volume / divisor` rounded, at least one unit
fn even_share(volume: u32, divisor: f64) -> f64 {
    (volume as f64 / divisor).round().max(1.0)
}

fn long_run_effort(phase: TrainingPhase) -> &'static str {
    match phase {
        TrainingPhase::Base => "RPE 4-5, conversational",
        TrainingPhase::Build => "RPE 5-6, steady",
        TrainingPhase::Peak => "RPE 6-7, strong but controlled",
        TrainingPhase::Taper => "RPE 3-4, relaxed",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DistanceUnit, PlanPreferences, RaceDistance};
    use rand::rngs::mock::StepRng;

    fn date(raw: &str) -> NaiveDate {
        NaiveDate::parse_from_str(raw, "%Y-%m-%d").unwrap()
    }

    fn request(distance: &str, peak: u32) -> PlanRequest {
        PlanRequest::from_raw("2024-01-01", peak, "2024-02-26", "9:00", 8, distance, None).unwrap()
    }

    fn plan(request: &PlanRequest) -> TrainingPlan {
        create_training_plan(request, &mut StdRng::seed_from_u64(7)).unwrap()
    }

    fn event_on<'p>(plan: &'p TrainingPlan, raw: &str) -> &'p WorkoutEvent {
        let wanted = date(raw);
        plan.events().iter().find(|e| e.date() == wanted).unwrap()
    }

    #[test]
    fn test_plan_ends_with_single_race_event() {
        let plan = plan(&request("half-marathon", 40));

        assert_eq!(plan.weekly_mileage(), &[22, 26, 30, 30, 37, 40, 30, 10]);
        assert_eq!(plan.count_of(WorkoutType::Race), 1);

        let race = plan.events().last().unwrap();
        assert!(race.is_race());
        assert_eq!(race.date(), date("2024-02-26"));
        assert_eq!(race.title(), "Half Marathon Race Day");
        assert_eq!(race.distance(), 13.1);
        assert_eq!(race.recommended_pace(), Some("9:00"));
        assert_eq!(race.week_index(), 8);
        assert_eq!(race.phase(), TrainingPhase::Taper);
    }

    #[test]
    fn test_final_week_only_tuesday_and_thursday() {
        let plan = plan(&request("half-marathon", 40));
        let final_week: Vec<_> = plan
            .events()
            .iter()
            .filter(|e| e.week_index() == 7)
            .map(|e| e.day_name().to_string())
            .collect();

        assert_eq!(final_week, vec!["Tuesday", "Thursday"]);
        // seven full weeks, two final-week days and the race
        assert_eq!(plan.events().len(), 7 * 7 + 2 + 1);
    }

    #[test]
    fn test_structured_day_is_resolved() {
        let plan = plan(&request("half-marathon", 40));
        let tuesday = event_on(&plan, "2024-01-02");

        assert_eq!(tuesday.title(), "Threshold Mile Repeats");
        assert_eq!(tuesday.workout(), WorkoutType::Tempo);
        assert_eq!(tuesday.distance(), 4.5);
        assert_eq!(tuesday.recommended_pace(), Some("9:30"));
        assert_eq!(
            tuesday.notes(),
            "2 × 1 mi @ threshold (rest 90s)\nTarget pace: 9:30 /mi"
        );
        assert_eq!(tuesday.day_index(), 1);
    }

    #[test]
    fn test_plain_days_and_long_run_annotations() {
        let plan = plan(&request("half-marathon", 40));

        let monday = event_on(&plan, "2024-01-01");
        assert_eq!(monday.workout(), WorkoutType::Rest);
        assert_eq!(monday.distance(), 0.0);
        assert_eq!(monday.notes(), "");
        assert_eq!(monday.recommended_pace(), None);

        let wednesday = event_on(&plan, "2024-01-03");
        assert_eq!(wednesday.workout(), WorkoutType::Easy);
        assert_eq!(wednesday.distance(), 3.0);

        let saturday = event_on(&plan, "2024-01-06");
        assert_eq!(saturday.workout(), WorkoutType::Long);
        assert_eq!(saturday.title(), "Base Long Run");
        assert_eq!(saturday.distance(), 7.0);
        assert_eq!(saturday.recommended_pace(), Some("9:45-10:45"));
        assert!(saturday.notes().starts_with("Final 1 mi at goal pace"));
        assert!(saturday.notes().contains("Effort: RPE 4-5"));
        assert!(!saturday.notes().contains("Finish fast"));
    }

    #[test]
    fn test_build_long_run_gets_finish_fast_line() {
        let plan = plan(&request("half-marathon", 40));
        // week 4 is build for an 8-week plan
        let long_run = plan
            .events()
            .iter()
            .find(|e| e.week_index() == 4 && e.workout() == WorkoutType::Long)
            .unwrap();
        assert_eq!(long_run.phase(), TrainingPhase::Build);
        assert!(long_run.notes().contains("Finish fast"));
    }

    #[test]
    fn test_unknown_distance_default_fills_every_day() {
        let plan = plan(&request("ultra", 40));

        let sunday = event_on(&plan, "2024-01-07");
        assert_eq!(sunday.workout(), WorkoutType::Rest);

        let saturday = event_on(&plan, "2024-01-06");
        assert_eq!(saturday.workout(), WorkoutType::Long);
        assert_eq!(saturday.distance(), 4.0);

        let monday = event_on(&plan, "2024-01-01");
        assert_eq!(monday.workout(), WorkoutType::Easy);
        assert_eq!(monday.distance(), 4.0);

        let race = plan.race_event().unwrap();
        assert_eq!(race.title(), "Race Day");
        assert_eq!(race.distance(), 0.0);
        assert_eq!(plan.race_distance(), None);
    }

    #[test]
    fn test_advanced_default_fill_runs_sunday() {
        let plan = plan(&request("ultra", 60));
        assert_eq!(plan.tier(), ExperienceTier::Advanced);

        let sunday = event_on(&plan, "2024-01-07");
        assert_eq!(sunday.workout(), WorkoutType::Easy);
        // ceil(0.55 × 60) = 33, 33 / 7 rounds to 5
        assert_eq!(sunday.distance(), 5.0);
    }

    #[test]
    fn test_partial_template_uses_default_fill_for_gaps() {
        let plan = plan(&request("5k", 40));
        // 5K base leaves Wednesday open
        let wednesday = event_on(&plan, "2024-01-03");
        assert_eq!(wednesday.workout(), WorkoutType::Easy);
        assert_eq!(wednesday.distance(), 4.0);
    }

    #[test]
    fn test_quality_coin_flip_follows_rng() {
        let request = request("ultra", 40);

        let mut always_low = StepRng::new(0, 0);
        let plan = create_training_plan(&request, &mut always_low).unwrap();
        assert_eq!(event_on(&plan, "2024-01-02").workout(), WorkoutType::Tempo);
        assert!(event_on(&plan, "2024-01-02").notes().starts_with("Run at threshold effort"));

        let mut always_high = StepRng::new(u64::MAX, 0);
        let plan = create_training_plan(&request, &mut always_high).unwrap();
        assert_eq!(event_on(&plan, "2024-01-02").workout(), WorkoutType::Speed);
        assert_eq!(event_on(&plan, "2024-01-02").recommended_pace(), Some("8:45"));
    }

    #[test]
    fn test_preferences_gate_quality_days() {
        let mut request = request("ultra", 40);
        request.preferences = Some(PlanPreferences::with_selected_ids(["VO2_800M_REPEATS"]));
        let plan = create_training_plan(&request, &mut StepRng::new(0, 0)).unwrap();
        assert_eq!(plan.count_of(WorkoutType::Tempo), 0);
        assert!(plan.count_of(WorkoutType::Speed) > 0);

        request.preferences = Some(PlanPreferences::with_selected_ids(Vec::<String>::new()));
        let plan = create_training_plan(&request, &mut StepRng::new(0, 0)).unwrap();
        assert_eq!(plan.count_of(WorkoutType::Tempo), 0);
        assert_eq!(plan.count_of(WorkoutType::Speed), 0);
        assert_eq!(event_on(&plan, "2024-01-02").workout(), WorkoutType::Easy);
    }

    #[test]
    fn test_preferences_swap_excluded_structured_workouts() {
        let mut request = request("half-marathon", 40);
        request.preferences = Some(PlanPreferences::with_selected_ids(["speed"]));
        let plan = plan(&request);

        let tuesday = event_on(&plan, "2024-01-02");
        assert_eq!(tuesday.workout(), WorkoutType::Easy);
        assert!(tuesday.notes().starts_with("Easy run in place of Threshold Mile Repeats"));
        assert_eq!(plan.count_of(WorkoutType::Tempo), 0);
    }

    #[test]
    fn test_race_on_start_date() {
        let request =
            PlanRequest::from_raw("2024-01-01", 30, "2024-01-01", "8:00", 4, "10k", None).unwrap();
        let plan = plan(&request);
        assert_eq!(plan.events().len(), 1);
        assert_eq!(plan.events()[0].distance(), RaceDistance::TenK.length(request.distance_unit));
    }

    #[test]
    fn test_weeks_past_curve_reuse_last_volume() {
        // 4 weeks requested but the race is 6 weeks out
        let request =
            PlanRequest::from_raw("2024-01-01", 20, "2024-02-12", "9:00", 4, "ultra", None).unwrap();
        let scheduler =
            PlanScheduler::new(&request, TemplateRegistry::standard(), WorkoutDictionary::standard()).unwrap();
        assert_eq!(scheduler.mileage(), &[11, 16, 20, 8]);
        assert_eq!(scheduler.week_volume(5), 8);

        let plan = scheduler.run(&mut StdRng::seed_from_u64(1)).unwrap();
        assert_eq!(plan.race_event().unwrap().week_index(), 6);
    }

    #[test]
    fn test_service_seed_makes_plans_reproducible() {
        let request = request("ultra", 40);
        let service = PlanGenerationService::new(PlanSettings::default().with_seed(99));
        assert_eq!(service.generate_plan(&request).unwrap(), service.generate_plan(&request).unwrap());
    }

    #[test]
    fn test_settings_unit_applies_to_plan() {
        let request = request("half marathon", 40);
        let settings = PlanSettings::default().with_seed(1).with_unit(DistanceUnit::Kilometers);
        let plan = PlanGenerationService::new(settings).generate_plan(&request).unwrap();

        let race = plan.race_event().unwrap();
        assert_eq!(race.distance(), 21.1);
        assert!(race.notes().ends_with("/km"));
    }

    #[test]
    fn test_early_race_keeps_its_week_phase() {
        // Race lands in week 5 of a 12-week request
        let request =
            PlanRequest::from_raw("2024-01-01", 40, "2024-02-05", "9:00", 12, "10k", None).unwrap();
        let plan = create_training_plan(&request, &mut StdRng::seed_from_u64(3)).unwrap();

        let race = plan.race_event().unwrap();
        assert_eq!(race.week_index(), 5);
        assert_eq!(race.phase(), phase_for_week(5, 12));
        assert_eq!(race.phase(), TrainingPhase::Build);
    }

    #[test]
    fn test_invalid_request_is_rejected() {
        let mut request = request("10k", 40);
        request.race_date = date("2023-12-01");
        assert!(create_training_plan(&request, &mut StdRng::seed_from_u64(0)).is_err());
    }
}
