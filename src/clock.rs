use crate::types::Hours;

/// Advances `(hour, day)` by `duration` hours on a `hours`-hour day and a
/// `days`-day week. Durations of a day or more roll over as many days as they
/// cover.
pub fn advance(hour: usize, day: usize, duration: Hours, hours: usize, days: usize) -> (usize, usize) {
    let (hours, days) = (hours as u64, days as u64);
    let elapsed = hour as u64 + u64::from(duration);
    let new_hour = elapsed % hours;
    let new_day = (day as u64 + elapsed / hours) % days;
    (new_hour as usize, new_day as usize)
}
