//! Birthday extraction and countdowns.
//!
//! Character biographies on the external database are free text, but most of
//! them carry a line such as `Birthday: August 21` or `Birthdate: 21 Aug`.
//! [`extract_birthday`] pulls the month and day out of those two phrasings,
//! and [`days_until_birthday`] turns a stored month/day into the number of
//! days until it next comes around.

use std::fmt;
use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate};
use regex::Regex;
use serde::{Serialize, Serializer};

/// Countdown value used when the birthday is not known.
///
/// Larger than any real countdown, so unknown birthdays sort last.
pub const UNKNOWN_BIRTHDAY: i64 = 999;

/// Month-name prefixes. Only the first three letters of a month token matter.
const MONTHS: [(&str, u32); 12] = [
    ("jan", 1),
    ("feb", 2),
    ("mar", 3),
    ("apr", 4),
    ("may", 5),
    ("jun", 6),
    ("jul", 7),
    ("aug", 8),
    ("sep", 9),
    ("oct", 10),
    ("nov", 11),
    ("dec", 12),
];

/// "birthday: august 21"
static MONTH_FIRST_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"birth(?:day|date):?\s*([a-z]{3})[a-z]*\s+([0-9]{1,2})").expect("Invalid regex")
});

/// "birthday: 21 august"
static DAY_FIRST_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"birth(?:day|date):?\s*([0-9]{1,2})\s+([a-z]{3})").expect("Invalid regex")
});

/// Month and day found in a biography. Either part may be missing.
///
/// A phrase can match while naming something that is not a month
/// (`"birthday: the 5th"`), in which case only `day` is set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BirthdayParts {
    pub month: Option<u32>,
    pub day: Option<u32>,
}

impl BirthdayParts {
    /// No birthday information.
    pub const UNKNOWN: Self = Self {
        month: None,
        day: None,
    };

    /// Returns `true` when both month and day are present.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.month.is_some() && self.day.is_some()
    }

    /// Drop parts that cannot be stored: months outside `1..=12`, days
    /// outside `1..=31`.
    #[must_use]
    pub fn in_range(self) -> Self {
        Self {
            month: self.month.filter(|m| (1..=12).contains(m)),
            day: self.day.filter(|d| (1..=31).contains(d)),
        }
    }
}

/// Look up a month number by the first three letters of its name.
#[must_use]
pub fn month_from_prefix(token: &str) -> Option<u32> {
    let prefix = token.get(..3)?;
    MONTHS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(prefix))
        .map(|&(_, number)| number)
}

/// Extract a birthday from biography text.
///
/// Tries the month-first phrasing before the day-first one; within each
/// phrasing only the first occurrence counts.
///
/// ```
/// use waifu_tracker_core::birthday::{BirthdayParts, extract_birthday};
///
/// let parts = extract_birthday(Some("Birthday: August 21\nHeight: 158 cm"));
/// assert_eq!(parts, BirthdayParts { month: Some(8), day: Some(21) });
/// assert_eq!(extract_birthday(None), BirthdayParts::UNKNOWN);
/// ```
#[must_use]
pub fn extract_birthday(bio: Option<&str>) -> BirthdayParts {
    let Some(bio) = bio.filter(|text| !text.is_empty()) else {
        return BirthdayParts::UNKNOWN;
    };
    let text = bio.to_lowercase();

    if let Some(caps) = MONTH_FIRST_RE.captures(&text) {
        return BirthdayParts {
            month: caps.get(1).and_then(|m| month_from_prefix(m.as_str())),
            day: caps.get(2).and_then(|d| d.as_str().parse().ok()),
        };
    }

    if let Some(caps) = DAY_FIRST_RE.captures(&text) {
        return BirthdayParts {
            month: caps.get(2).and_then(|m| month_from_prefix(m.as_str())),
            day: caps.get(1).and_then(|d| d.as_str().parse().ok()),
        };
    }

    BirthdayParts::UNKNOWN
}

/// The date a birthday falls on in `year`.
///
/// Dates that do not exist (February 30, February 29 outside leap years,
/// April 31, ...) fall on March 1 of that year instead.
fn birthday_in_year(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day).or_else(|| NaiveDate::from_ymd_opt(year, 3, 1))
}

/// Days from `today` until the next occurrence of `month`/`day`.
///
/// Returns `0` on the birthday itself and [`UNKNOWN_BIRTHDAY`] when either
/// part is missing (or zero).
///
/// ```
/// use chrono::NaiveDate;
/// use waifu_tracker_core::birthday::{UNKNOWN_BIRTHDAY, days_until_birthday};
///
/// let today = NaiveDate::from_ymd_opt(2024, 8, 21).unwrap();
/// assert_eq!(days_until_birthday(Some(8), Some(21), today), 0);
/// assert_eq!(days_until_birthday(Some(8), Some(22), today), 1);
/// assert_eq!(days_until_birthday(None, Some(22), today), UNKNOWN_BIRTHDAY);
/// ```
#[must_use]
pub fn days_until_birthday(month: Option<u32>, day: Option<u32>, today: NaiveDate) -> i64 {
    let (Some(month), Some(day)) = (month.filter(|&m| m != 0), day.filter(|&d| d != 0)) else {
        return UNKNOWN_BIRTHDAY;
    };

    let Some(this_year) = birthday_in_year(today.year(), month, day) else {
        return UNKNOWN_BIRTHDAY;
    };
    let delta = (this_year - today).num_days();
    if delta >= 0 {
        return delta;
    }

    birthday_in_year(today.year() + 1, month, day)
        .map_or(UNKNOWN_BIRTHDAY, |next| (next - today).num_days())
}

/// Human-readable state of a countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BirthdayStatus {
    Today,
    InDays(i64),
    Unknown,
}

impl BirthdayStatus {
    /// Classify a countdown produced by [`days_until_birthday`].
    #[must_use]
    pub const fn from_days(days: i64) -> Self {
        match days {
            0 => Self::Today,
            UNKNOWN_BIRTHDAY => Self::Unknown,
            n => Self::InDays(n),
        }
    }
}

impl fmt::Display for BirthdayStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Today => f.write_str("🎉 Birthday Today!"),
            Self::InDays(n) => write!(f, "in {n} days"),
            Self::Unknown => f.write_str("Unknown Date"),
        }
    }
}

impl Serialize for BirthdayStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Reminder text for birthdays that are today or tomorrow.
#[must_use]
pub fn reminder_message(name: &str, days_until: i64) -> Option<String> {
    match days_until {
        0 => Some(format!("It's {name}'s Birthday!")),
        1 => Some(format!("{name}'s birthday is tomorrow!")),
        _ => None,
    }
}
