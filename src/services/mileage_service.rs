use tracing::debug;

/// Share of peak volume the plan starts from
const START_FRACTION: f64 = 0.55;
/// Multiplier applied to every fourth build week
const DELOAD_FACTOR: f64 = 0.9;
/// Race week volume: 40% of peak, never more than this many units
const RACE_WEEK_FRACTION: f64 = 0.4;
const RACE_WEEK_CAP: u32 = 10;

/// Round a volume up, ignoring floating-point noise (0.55 × 40 is 22, not 23)
pub fn ceil_volume(value: f64) -> u32 {
    (value - 1e-9).ceil().max(0.0) as u32
}

/// Number of taper weeks, race week included
pub fn taper_length(total_weeks: u32) -> u32 {
    match total_weeks {
        0..=5 => 1,
        6..=8 => 2,
        _ => 3,
    }
}

pub fn starting_volume(peak: u32) -> u32 {
    ceil_volume(START_FRACTION * peak as f64)
}

pub fn race_week_volume(peak: u32) -> u32 {
    ceil_volume(RACE_WEEK_FRACTION * peak as f64).min(RACE_WEEK_CAP)
}

/// Linear weekly increase across the build segment
pub fn build_increment(total_weeks: u32, peak: u32) -> f64 {
    let build_weeks = total_weeks.saturating_sub(taper_length(total_weeks));
    let steps = build_weeks.saturating_sub(1).max(1);
    (peak as f64 - starting_volume(peak) as f64) / steps as f64
}

/// Per-week target volume for the whole plan.
///
/// Build weeks climb linearly from 55% of peak, every fourth one is a 10%
/// deload, and the last build week is pinned to `peak`. The taper steps down
/// and the race week is capped. The result always has `total_weeks` entries.
pub fn build_weekly_mileage(total_weeks: u32, peak: u32) -> Vec<u32> {
    if total_weeks == 0 {
        return Vec::new();
    }

    let taper_weeks = taper_length(total_weeks);
    let build_weeks = total_weeks.saturating_sub(taper_weeks);
    let start = starting_volume(peak) as f64;
    let increment = build_increment(total_weeks, peak);

    let mut mileage = Vec::with_capacity(total_weeks as usize);
    for week in 0..build_weeks {
        let mut volume = start + increment * week as f64;
        if (week + 1) % 4 == 0 {
            volume *= DELOAD_FACTOR;
        }
        mileage.push(ceil_volume(volume));
    }

    if let Some(last) = mileage.last_mut() {
        *last = peak;
    }

    let peak = peak as f64;
    match taper_weeks {
        3 => {
            mileage.push(ceil_volume(0.85 * peak));
            mileage.push(ceil_volume(0.65 * peak));
        }
        2 => mileage.push(ceil_volume(0.75 * peak)),
        _ => {}
    }

    mileage.push(race_week_volume(peak as u32));

    debug!(total_weeks, taper_weeks, ?mileage, "Built weekly mileage curve");
    mileage
}
