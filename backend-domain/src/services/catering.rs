// Catering clock
// Daily allowance resets and the rolling feedback window, both computed
// at the fixed campus offset. The reset is lazy and relative to each
// user's own last_reset, never a shared clock boundary.

use crate::entities::{CateringAllowance, CateringDefaults};

pub const CAMPUS_UTC_OFFSET_HOURS: i64 = 8;

const MILLIS_PER_HOUR: i64 = 3_600_000;
const MILLIS_PER_DAY: i64 = 24 * MILLIS_PER_HOUR;

fn campus_millis(ts: i64) -> i64 {
    ts + CAMPUS_UTC_OFFSET_HOURS * MILLIS_PER_HOUR
}

/// Calendar day index at the campus offset.
pub fn campus_day(ts: i64) -> i64 {
    campus_millis(ts).div_euclid(MILLIS_PER_DAY)
}

/// Resets all three meal allowances to the defaults once the campus
/// calendar day has advanced past the last reset. Returns true when the
/// reset fired.
pub fn refresh_allowance(
    allowance: &mut CateringAllowance,
    defaults: &CateringDefaults,
    now: i64,
) -> bool {
    if campus_day(now) <= campus_day(allowance.last_reset) {
        return false;
    }
    allowance.breakfast = defaults.breakfast;
    allowance.lunch = defaults.lunch;
    allowance.dinner = defaults.dinner;
    allowance.last_reset = now;
    true
}

/// Start of the current feedback window: the most recent cutover-hour
/// boundary at the campus offset, expressed back in UTC millis.
pub fn feedback_window_start(now: i64, cutover_hour: u32) -> i64 {
    let local = campus_millis(now);
    let day = local.div_euclid(MILLIS_PER_DAY);
    let cutover = day * MILLIS_PER_DAY + i64::from(cutover_hour) * MILLIS_PER_HOUR;
    let window_local = if local >= cutover {
        cutover
    } else {
        cutover - MILLIS_PER_DAY
    };
    window_local - CAMPUS_UTC_OFFSET_HOURS * MILLIS_PER_HOUR
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEFAULTS: CateringDefaults = CateringDefaults {
        breakfast: 20,
        lunch: 35,
        dinner: 35,
    };

    fn allowance(last_reset: i64) -> CateringAllowance {
        CateringAllowance {
            breakfast: 3,
            lunch: 0,
            dinner: 12,
            last_reset,
        }
    }

    #[test]
    fn reset_fires_after_two_days() {
        let mut spent = allowance(0);
        let two_days_later = 2 * MILLIS_PER_DAY;
        assert!(refresh_allowance(&mut spent, &DEFAULTS, two_days_later));
        assert_eq!(spent.breakfast, 20);
        assert_eq!(spent.lunch, 35);
        assert_eq!(spent.dinner, 35);
        assert_eq!(spent.last_reset, two_days_later);
    }

    #[test]
    fn reset_skipped_within_the_same_campus_day() {
        let mut spent = allowance(0);
        assert!(!refresh_allowance(&mut spent, &DEFAULTS, MILLIS_PER_HOUR));
        assert_eq!(spent.lunch, 0);
        assert_eq!(spent.last_reset, 0);
    }

    #[test]
    fn reset_fires_across_the_campus_midnight() {
        // 23:59 vs 00:01 at UTC+8: 15:59Z and 16:01Z.
        let before_midnight = 15 * MILLIS_PER_HOUR + 59 * 60_000;
        let after_midnight = 16 * MILLIS_PER_HOUR + 60_000;
        let mut spent = allowance(before_midnight);
        assert!(refresh_allowance(&mut spent, &DEFAULTS, after_midnight));
    }

    #[test]
    fn feedback_window_spans_the_six_am_boundary() {
        // 08:00 campus on day 0 and 05:59 campus on day 1 share a window;
        // 06:01 on day 1 starts a new one.
        let morning_day0 = 0;
        let early_day1 = MILLIS_PER_DAY + 5 * MILLIS_PER_HOUR - 8 * MILLIS_PER_HOUR;
        let after_cutover_day1 = MILLIS_PER_DAY + 7 * MILLIS_PER_HOUR - 8 * MILLIS_PER_HOUR;

        let first = feedback_window_start(morning_day0, 6);
        assert_eq!(feedback_window_start(early_day1, 6), first);
        assert!(feedback_window_start(after_cutover_day1, 6) > first);
    }
}
