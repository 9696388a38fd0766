use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::error::{Error, Result};
use crate::fix_hour;

pub const INVALID_TIME: &str = "--:--";

/* convert float hours to 24h format */
pub fn float_time_to_time24(time: f64) -> String {
    PrayerTime::from_hours(time).to_string()
}

/// The six fixed entries of a day's schedule, in chronological order.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, PartialOrd, Ord)]
pub enum TimeId {
    Fajr,
    Sunrise,
    Dhuhr,
    Asr,
    Maghrib,
    Isha,
}

impl TimeId {
    pub const ALL: [TimeId; 6] = [
        TimeId::Fajr,
        TimeId::Sunrise,
        TimeId::Dhuhr,
        TimeId::Asr,
        TimeId::Maghrib,
        TimeId::Isha,
    ];

    /// The five canonical prayers. Sunrise marks the end of Fajr and is not one.
    pub const PRAYERS: [TimeId; 5] = [
        TimeId::Fajr,
        TimeId::Dhuhr,
        TimeId::Asr,
        TimeId::Maghrib,
        TimeId::Isha,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TimeId::Fajr => "Fajr",
            TimeId::Sunrise => "Sunrise",
            TimeId::Dhuhr => "Dhuhr",
            TimeId::Asr => "Asr",
            TimeId::Maghrib => "Maghrib",
            TimeId::Isha => "Isha",
        }
    }

    pub fn is_prayer(self) -> bool {
        self != TimeId::Sunrise
    }
}

impl fmt::Display for TimeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A wall-clock time of day with minute resolution.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, PartialOrd, Ord)]
pub struct ClockTime {
    hour: u8,
    minute: u8,
}

impl ClockTime {
    pub fn new(hour: u32, minute: u32) -> Option<Self> {
        if hour < 24 && minute < 60 {
            Some(Self {
                hour: hour as u8,
                minute: minute as u8,
            })
        } else {
            None
        }
    }

    /// Rounds fractional hours to the nearest minute, wrapping into `[0, 24)`.
    ///
    /// Returns `None` for non-finite input.
    pub fn from_hours(time: f64) -> Option<Self> {
        if !time.is_finite() {
            return None;
        }
        let time = fix_hour(time + 0.5 / 60.0); // add 0.5 minutes to round
        let hours = time.floor();
        let minutes = ((time - hours) * 60.0).floor();
        Some(Self {
            hour: (hours as u8) % 24,
            minute: (minutes as u8).min(59),
        })
    }

    pub fn hour(&self) -> u32 {
        self.hour as u32
    }

    pub fn minute(&self) -> u32 {
        self.minute as u32
    }

    pub fn minutes_of_day(&self) -> u32 {
        self.hour() * 60 + self.minute()
    }

    /// 12-hour rendering without a leading zero, e.g. `5:29 AM`.
    pub fn to_12h(&self) -> String {
        let period = if self.hour >= 12 { "PM" } else { "AM" };
        let hour = match self.hour % 12 {
            0 => 12,
            h => h,
        };
        format!("{}:{:02} {}", hour, self.minute, period)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for ClockTime {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidTime(s.to_owned());
        let (hour, minute) = s.trim().split_once(':').ok_or_else(invalid)?;
        let hour = hour.parse::<u32>().map_err(|_| invalid())?;
        let minute = minute.parse::<u32>().map_err(|_| invalid())?;
        Self::new(hour, minute).ok_or_else(invalid)
    }
}

/// One entry of a [`PrayerTimeSet`].
///
/// `Unavailable` means the sun never reaches the required angle on that day
/// at that latitude; schedulers should skip it and displays should render it
/// distinctly.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum PrayerTime {
    Available(ClockTime),
    Unavailable,
}

impl PrayerTime {
    pub fn from_hours(time: f64) -> Self {
        ClockTime::from_hours(time).map_or(PrayerTime::Unavailable, PrayerTime::Available)
    }

    pub(crate) fn from_solution(time: Option<f64>) -> Self {
        time.map_or(PrayerTime::Unavailable, Self::from_hours)
    }

    pub fn is_available(&self) -> bool {
        matches!(self, PrayerTime::Available(_))
    }

    pub fn clock(&self) -> Option<ClockTime> {
        match self {
            PrayerTime::Available(clock) => Some(*clock),
            PrayerTime::Unavailable => None,
        }
    }

    pub fn to_12h(&self) -> String {
        match self {
            PrayerTime::Available(clock) => clock.to_12h(),
            PrayerTime::Unavailable => INVALID_TIME.into(),
        }
    }
}

impl fmt::Display for PrayerTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrayerTime::Available(clock) => clock.fmt(f),
            PrayerTime::Unavailable => f.write_str(INVALID_TIME),
        }
    }
}

impl FromStr for PrayerTime {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.trim() == INVALID_TIME {
            return Ok(PrayerTime::Unavailable);
        }
        s.parse().map(PrayerTime::Available)
    }
}

impl Serialize for PrayerTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A day's schedule. Every key is always present; individual entries may be
/// unavailable.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PrayerTimeSet {
    pub fajr: PrayerTime,
    pub sunrise: PrayerTime,
    pub dhuhr: PrayerTime,
    pub asr: PrayerTime,
    pub maghrib: PrayerTime,
    pub isha: PrayerTime,
}

impl PrayerTimeSet {
    pub fn get(&self, id: TimeId) -> PrayerTime {
        match id {
            TimeId::Fajr => self.fajr,
            TimeId::Sunrise => self.sunrise,
            TimeId::Dhuhr => self.dhuhr,
            TimeId::Asr => self.asr,
            TimeId::Maghrib => self.maghrib,
            TimeId::Isha => self.isha,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (TimeId, PrayerTime)> + '_ {
        TimeId::ALL.into_iter().map(move |id| (id, self.get(id)))
    }

    pub fn all_available(&self) -> bool {
        self.iter().all(|(_, time)| time.is_available())
    }
}
