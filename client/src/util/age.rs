//! Age display for profile cards.

#[cfg(test)]
#[path = "age_test.rs"]
mod age_test;

use time::macros::format_description;
use time::{Date, OffsetDateTime};

/// Whole years between `birthdate` and `today`.
///
/// Accepts `YYYY-MM-DD`, optionally followed by a time suffix
/// (`2001-04-12T00:00:00`). Absent or unparsable dates give `None`.
#[must_use]
pub fn calculate_age(birthdate: Option<&str>, today: Date) -> Option<i32> {
    let raw = birthdate?.trim();
    let day_part = raw.get(..10)?;
    let born = Date::parse(day_part, format_description!("[year]-[month]-[day]")).ok()?;

    let mut age = today.year() - born.year();
    if (u8::from(today.month()), today.day()) < (u8::from(born.month()), born.day()) {
        age -= 1;
    }
    Some(age)
}

/// [`calculate_age`] against today's UTC date.
#[must_use]
pub fn age_today(birthdate: Option<&str>) -> Option<i32> {
    calculate_age(birthdate, OffsetDateTime::now_utc().date())
}
