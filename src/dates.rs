use chrono::{Datelike, Local, NaiveDate};

/// Resolve a date argument against today's local date.
pub fn resolve(value: &str) -> String {
    resolve_keyword(value, Local::now().date_naive())
}

/// Resolve the well-known date keywords to ISO dates. Anything else passes
/// through untouched, so explicit `YYYY-MM-DD` arguments keep working.
pub fn resolve_keyword(value: &str, today: NaiveDate) -> String {
    let resolved = match value {
        "today" => Some(today),
        "start-of-this-month" => today.with_day(1),
        "end-of-this-month" => end_of_month(today.year(), today.month()),
        "end-of-previous-month" => today.with_day(1).and_then(|first| first.pred_opt()),
        "start-of-this-year" => NaiveDate::from_ymd_opt(today.year(), 1, 1),
        "end-of-this-year" => NaiveDate::from_ymd_opt(today.year(), 12, 31),
        _ => None,
    };
    match resolved {
        Some(date) => date.format("%Y-%m-%d").to_string(),
        None => value.to_string(),
    }
}

fn end_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1).and_then(|first| first.pred_opt())
}
