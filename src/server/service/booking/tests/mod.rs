
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use rink_test_utils::prelude::*;

use crate::server::{model::app::AppState, util::time::local_today};

/// Local date `days` from today in the state's offset
fn day(state: &AppState, days: i64) -> NaiveDate {
    local_today(state.utc_offset) + Duration::days(days)
}

fn at(date: NaiveDate, hour: u32, minute: u32) -> NaiveDateTime {
    date.and_time(NaiveTime::from_hms_opt(hour, minute, 0).unwrap())
}
