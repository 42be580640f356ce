//! Local time and hourly slot calculations.
//!
//! Booking and event rules compare against "today" and "now" in the rink's configured fixed UTC
//! offset rather than the server clock's zone. Slots are whole hours: hour `h` covers
//! `h:00 - (h+1):00`.

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Utc};

/// Current local date and time for the given offset.
pub fn local_now(offset: FixedOffset) -> NaiveDateTime {
    local_datetime(Utc::now(), offset)
}

/// Current local date for the given offset.
pub fn local_today(offset: FixedOffset) -> NaiveDate {
    local_now(offset).date()
}

/// Convert a UTC timestamp into naive local time for the given offset.
pub fn local_datetime(now: DateTime<Utc>, offset: FixedOffset) -> NaiveDateTime {
    now.with_timezone(&offset).naive_local()
}

/// Weekday index used by opening hours rules, 0 = Monday through 6 = Sunday.
pub fn weekday_index(date: NaiveDate) -> i32 {
    date.weekday().num_days_from_monday() as i32
}

/// Whether the hour starting at `hour:00` fits entirely inside `open..=close`.
///
/// A slot is valid when `hour:00 >= open` and `(hour + 1):00 <= close`. Times are compared as
/// minutes since midnight, so the 23:00 slot would need a 24:00 close and is never offered.
pub fn slot_within_hours(hour: u32, open: NaiveTime, close: NaiveTime) -> bool {
    let open_minutes = open.hour() * 60 + open.minute();
    let close_minutes = close.hour() * 60 + close.minute();

    hour < 24 && hour * 60 >= open_minutes && (hour + 1) * 60 <= close_minutes
}

/// Every slot hour inside the given opening hours, ascending.
pub fn slot_hours(open: NaiveTime, close: NaiveTime) -> Vec<u32> {
    (0..24)
        .filter(|hour| slot_within_hours(*hour, open, close))
        .collect()
}

/// Display label for a slot, e.g. `09:00 - 10:00`.
pub fn slot_label(hour: u32) -> String {
    format!("{:02}:00 - {:02}:00", hour, (hour + 1) % 24)
}

/// Parse `HH:MM` (seconds optional) into a time.
pub fn parse_hhmm(value: &str) -> Option<NaiveTime> {
    let value = value.trim();

    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .ok()
}

/// Format a time as `HH:MM`.
pub fn format_hhmm(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}
