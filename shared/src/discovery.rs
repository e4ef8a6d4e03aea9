use chrono::{DateTime, Datelike, Duration, Utc, Weekday};

use crate::config::{DiscoverySchedule, RevealCadence};

/// How many regions of the discovery order should be revealed at `now`,
/// clamped to `total`.
pub fn reveal_count(schedule: &DiscoverySchedule, now: DateTime<Utc>, total: usize) -> usize {
    match schedule.cadence {
        RevealCadence::CalendarDays => calendar_reveal_count(schedule.start_date, now, total),
        RevealCadence::BusinessDays => business_reveal_count(schedule.start_date, now, total),
    }
}

/// Calendar cadence: one region per complete 24h period since `start`, plus
/// one. Negative elapsed time clamps to zero periods, so the first region is
/// revealed even slightly before the start date. That boundary is part of the
/// contract, not an accident.
pub fn calendar_reveal_count(start: DateTime<Utc>, now: DateTime<Utc>, total: usize) -> usize {
    let elapsed_days = (now - start).num_days().max(0) as usize;
    elapsed_days.saturating_add(1).min(total)
}

/// Business cadence: nothing before `start`; one region immediately if `start`
/// falls Mon-Fri; then one more for every subsequent 24h boundary from `start`
/// that lands Mon-Fri. Weekend boundaries contribute nothing.
pub fn business_reveal_count(start: DateTime<Utc>, now: DateTime<Utc>, total: usize) -> usize {
    if now < start {
        return 0;
    }

    let mut count = if is_business_day(start.weekday()) { 1 } else { 0 };
    let mut boundary = start + Duration::days(1);
    while boundary <= now && count < total {
        if is_business_day(boundary.weekday()) {
            count += 1;
        }
        boundary += Duration::days(1);
    }
    count.min(total)
}

fn is_business_day(day: Weekday) -> bool {
    !matches!(day, Weekday::Sat | Weekday::Sun)
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Duration, TimeZone, Utc};

    use super::{business_reveal_count, calendar_reveal_count, reveal_count};
    use crate::config::{DiscoverySchedule, RevealCadence};

    const TOTAL: usize = 15;

    fn date(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, hour, 0, 0).unwrap()
    }

    // 2025-09-01 is a Monday; 2025-09-05 a Friday; 2025-09-06 a Saturday.
    fn monday_start() -> DateTime<Utc> {
        date(2025, 9, 1, 6)
    }

    #[test]
    fn calendar_counts_one_per_complete_day_plus_one() {
        let start = monday_start();
        assert_eq!(calendar_reveal_count(start, start, TOTAL), 1);
        assert_eq!(
            calendar_reveal_count(start, start + Duration::hours(23), TOTAL),
            1
        );
        assert_eq!(
            calendar_reveal_count(start, start + Duration::hours(25), TOTAL),
            2
        );
    }

    #[test]
    fn calendar_reveals_the_first_region_even_before_start() {
        let start = monday_start();
        assert_eq!(
            calendar_reveal_count(start, start - Duration::hours(1), TOTAL),
            1
        );
        assert_eq!(
            calendar_reveal_count(start, start - Duration::days(30), TOTAL),
            1
        );
    }

    #[test]
    fn calendar_clamps_to_the_region_count() {
        let start = monday_start();
        assert_eq!(
            calendar_reveal_count(start, start + Duration::days(400), TOTAL),
            TOTAL
        );
    }

    #[test]
    fn business_reveals_nothing_before_start() {
        let start = monday_start();
        assert_eq!(
            business_reveal_count(start, start - Duration::minutes(1), TOTAL),
            0
        );
    }

    #[test]
    fn business_monday_start_counts_one_within_the_first_day() {
        let start = monday_start();
        assert_eq!(
            business_reveal_count(start, start + Duration::minutes(10), TOTAL),
            1
        );
    }

    #[test]
    fn business_weekend_start_counts_zero() {
        let saturday = date(2025, 9, 6, 12);
        assert_eq!(business_reveal_count(saturday, saturday, TOTAL), 0);
        // Sunday boundary adds nothing either; Monday's does.
        assert_eq!(
            business_reveal_count(saturday, saturday + Duration::days(1), TOTAL),
            0
        );
        assert_eq!(
            business_reveal_count(saturday, saturday + Duration::days(2), TOTAL),
            1
        );
    }

    #[test]
    fn business_skips_weekend_boundaries() {
        let friday = date(2025, 9, 5, 6);
        // Friday itself counts; Saturday and Sunday boundaries do not; the
        // Monday boundary lands exactly three days later.
        assert_eq!(
            business_reveal_count(friday, friday + Duration::days(3) - Duration::hours(1), TOTAL),
            1
        );
        assert_eq!(
            business_reveal_count(friday, friday + Duration::days(3), TOTAL),
            2
        );
    }

    #[test]
    fn business_clamps_to_the_region_count() {
        let start = monday_start();
        assert_eq!(
            business_reveal_count(start, start + Duration::days(400), TOTAL),
            TOTAL
        );
    }

    #[test]
    fn cadence_selects_the_variant() {
        let schedule = DiscoverySchedule {
            cadence: RevealCadence::CalendarDays,
            ..DiscoverySchedule::kingdom()
        };
        let before_start = schedule.start_date - Duration::hours(1);
        assert_eq!(reveal_count(&schedule, before_start, TOTAL), 1);

        let schedule = DiscoverySchedule {
            cadence: RevealCadence::BusinessDays,
            ..DiscoverySchedule::kingdom()
        };
        assert_eq!(reveal_count(&schedule, before_start, TOTAL), 0);
    }
}
