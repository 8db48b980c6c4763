use chrono::{DateTime, Duration, NaiveDate, Utc};

/// Returns the instant `days` days before `now`, the lower bound of a history window.
pub fn window_start(now: DateTime<Utc>, days: u32) -> DateTime<Utc> {
    now - Duration::days(i64::from(days))
}

/// Returns the calendar date `days` days before `today`.
pub fn window_start_date(today: NaiveDate, days: u32) -> NaiveDate {
    today
        .checked_sub_signed(Duration::days(i64::from(days)))
        .unwrap_or(NaiveDate::MIN)
}

/// Returns the `count` consecutive dates following `last`.
///
/// Used to label forecast points: the first forecast value belongs to the day
/// after the last observed sample.
pub fn get_following_days(last: NaiveDate, count: usize) -> Vec<NaiveDate> {
    let mut days = Vec::with_capacity(count);
    let mut current = last;
    for _ in 0..count {
        match current.succ_opt() {
            Some(next) => {
                days.push(next);
                current = next;
            }
            // Should not happen for realistic dates
            None => break,
        }
    }
    days
}
