//! Calendar and time-of-day features.
//!
//! [`TimeFeatures::from_datetime`] derives every per-row column the
//! aggregations group by. Derivation is pure: it reads the local wall-clock
//! time of an instant and never regroups rows.
//!
//! # Part of day
//!
//! | Hours | Bucket |
//! |-------|--------|
//! | 0–3 | Late Night (12 am-4 am) |
//! | 4–7 | Early Morning (4am-8am) |
//! | 8–11 | Morning (8am-12pm) |
//! | 12–15 | Noon (12pm-4pm) |
//! | 16–19 | Eve (4pm-8pm) |
//! | 20–23 | Night (8pm-12am) |
//!
//! ```
//! use chatheat::core::features::{PartOfDay, TimeFeatures};
//! use chrono::TimeZone;
//! use chrono_tz::Asia::Dhaka;
//!
//! let dt = Dhaka.with_ymd_and_hms(2021, 3, 3, 14, 5, 0).unwrap();
//! let features = TimeFeatures::from_datetime(&dt);
//!
//! assert_eq!(features.weekday, "Wednesday");
//! assert_eq!(features.weekday_no, 2);
//! assert_eq!(features.part_of_day, PartOfDay::Noon);
//! ```

use chrono::{DateTime, Datelike, TimeZone, Timelike};
use serde::Serialize;

/// Weekday names, Monday first.
pub const WEEKDAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Month names, January first.
pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// One of six four-hour buckets covering a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum PartOfDay {
    #[serde(rename = "Late Night (12 am-4 am)")]
    LateNight,
    #[serde(rename = "Early Morning (4am-8am)")]
    EarlyMorning,
    #[serde(rename = "Morning (8am-12pm)")]
    Morning,
    #[serde(rename = "Noon (12pm-4pm)")]
    Noon,
    #[serde(rename = "Eve (4pm-8pm)")]
    Eve,
    #[serde(rename = "Night (8pm-12am)")]
    Night,
}

impl PartOfDay {
    /// All buckets in day order.
    pub const ALL: [PartOfDay; 6] = [
        PartOfDay::LateNight,
        PartOfDay::EarlyMorning,
        PartOfDay::Morning,
        PartOfDay::Noon,
        PartOfDay::Eve,
        PartOfDay::Night,
    ];

    /// Buckets an hour of the day.
    ///
    /// A boundary hour belongs to the later bucket, so 4 is early morning
    /// and 0 is late night. Hours above 23 fall into [`PartOfDay::Night`].
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            0..=3 => PartOfDay::LateNight,
            4..=7 => PartOfDay::EarlyMorning,
            8..=11 => PartOfDay::Morning,
            12..=15 => PartOfDay::Noon,
            16..=19 => PartOfDay::Eve,
            _ => PartOfDay::Night,
        }
    }

    /// Returns the display label.
    pub fn label(&self) -> &'static str {
        match self {
            PartOfDay::LateNight => "Late Night (12 am-4 am)",
            PartOfDay::EarlyMorning => "Early Morning (4am-8am)",
            PartOfDay::Morning => "Morning (8am-12pm)",
            PartOfDay::Noon => "Noon (12pm-4pm)",
            PartOfDay::Eve => "Eve (4pm-8pm)",
            PartOfDay::Night => "Night (8pm-12am)",
        }
    }
}

impl std::fmt::Display for PartOfDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Derived calendar columns of a single message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeFeatures {
    /// ISO 8601 week number (1–53)
    pub week_of_year: u32,
    /// Weekday name
    pub weekday: &'static str,
    /// Days since Monday (0–6)
    pub weekday_no: u32,
    /// Hour of day (0–23)
    pub hour: u32,
    /// Calendar year
    pub year: i32,
    /// Month name
    pub month: &'static str,
    /// Month number (1–12)
    pub month_no: u32,
    /// Four-hour bucket of `hour`
    pub part_of_day: PartOfDay,
}

impl TimeFeatures {
    /// Derives all features from the local time of `dt`.
    ///
    /// `year` is the calendar year, not the ISO week-numbering year, so the
    /// first days of January can carry week 52 or 53.
    pub fn from_datetime<Tz: TimeZone>(dt: &DateTime<Tz>) -> Self {
        let weekday_no = dt.weekday().num_days_from_monday();
        let month_no = dt.month();
        let hour = dt.hour();

        Self {
            week_of_year: dt.iso_week().week(),
            weekday: WEEKDAY_NAMES[weekday_no as usize],
            weekday_no,
            hour,
            year: dt.year(),
            month: MONTH_NAMES[(month_no - 1) as usize],
            month_no,
            part_of_day: PartOfDay::from_hour(hour),
        }
    }
}
