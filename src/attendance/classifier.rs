use chrono::{NaiveTime, Timelike};

use crate::model::attendance::AttendanceStatus;

/// Minutes since midnight. Schedules are kept at minute resolution, so any
/// seconds on the scan clock are dropped before comparing.
fn minute_of_day(time: NaiveTime) -> u32 {
    time.hour() * 60 + time.minute()
}

/// Status for the first scan of the day.
pub fn classify_check_in(now: NaiveTime, scheduled_check_in: NaiveTime) -> AttendanceStatus {
    if minute_of_day(now) > minute_of_day(scheduled_check_in) {
        AttendanceStatus::Late
    } else {
        AttendanceStatus::Present
    }
}

/// Status after the second scan of the day. Leaving before the scheduled end
/// overrides whatever the check-in produced.
pub fn classify_check_out(
    now: NaiveTime,
    scheduled_check_out: NaiveTime,
    current: AttendanceStatus,
) -> AttendanceStatus {
    if minute_of_day(now) < minute_of_day(scheduled_check_out) {
        AttendanceStatus::HalfDay
    } else {
        current
    }
}
