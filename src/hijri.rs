//! Tabular (arithmetic) Hijri calendar.
//!
//! This is a civil approximation based on the 30-year cycle, not on crescent
//! sighting, so it can differ from locally announced dates by a day or two.

use std::fmt;

use chrono::{Datelike, NaiveDate};

use crate::get_julian_date;

pub const MONTH_NAMES: [&str; 12] = [
    "Muharram",
    "Safar",
    "Rabi al-Awwal",
    "Rabi al-Thani",
    "Jumada al-Ula",
    "Jumada al-Thani",
    "Rajab",
    "Sha'ban",
    "Ramadan",
    "Shawwal",
    "Dhul Qi'dah",
    "Dhul Hijjah",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HijriDate {
    pub year: i64,
    /// 1 = Muharram
    pub month: u32,
    pub day: u32,
}

impl HijriDate {
    pub fn from_gregorian(date: NaiveDate) -> Self {
        let jd = get_julian_date(date.year(), date.month(), date.day());

        let l = (jd - 1948439.5 + 10632.).floor() as i64;
        let n = (l - 1).div_euclid(10631);
        let l = l - 10631 * n + 354;
        let j = (10985 - l).div_euclid(5316) * (50 * l).div_euclid(17719)
            + l.div_euclid(5670) * (43 * l).div_euclid(15238);
        let l = l
            - (30 - j).div_euclid(15) * (17719 * j).div_euclid(50)
            - j.div_euclid(16) * (15238 * j).div_euclid(43)
            + 29;
        let month = (24 * l).div_euclid(709);
        let day = l - (709 * month).div_euclid(24);
        let year = 30 * n + j - 30;

        Self {
            year,
            month: month as u32,
            day: day as u32,
        }
    }

    pub fn month_name(&self) -> &'static str {
        self.month
            .checked_sub(1)
            .and_then(|index| MONTH_NAMES.get(index as usize))
            .copied()
            .unwrap_or("")
    }
}

impl fmt::Display for HijriDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} AH", self.day, self.month_name(), self.year)
    }
}

/// Formats the Hijri date for a Gregorian day, e.g. `14 Ramadan 1446 AH`.
pub fn get_hijri_date(date: NaiveDate) -> String {
    HijriDate::from_gregorian(date).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hijri(year: i32, month: u32, day: u32) -> HijriDate {
        HijriDate::from_gregorian(NaiveDate::from_ymd_opt(year, month, day).unwrap())
    }

    #[test]
    fn test_known_dates() {
        assert_eq!(
            hijri(2025, 3, 14),
            HijriDate {
                year: 1446,
                month: 9,
                day: 14
            }
        );
        assert_eq!(
            hijri(2023, 7, 19),
            HijriDate {
                year: 1445,
                month: 1,
                day: 1
            }
        );
        assert_eq!(
            hijri(2000, 1, 1),
            HijriDate {
                year: 1420,
                month: 9,
                day: 24
            }
        );
    }

    #[test]
    fn test_month_end_and_year_end() {
        assert_eq!(hijri(2025, 3, 30).day, 30);
        let last = hijri(2024, 7, 7);
        assert_eq!((last.month, last.day), (12, 30));
    }

    #[test]
    fn test_display() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        assert_eq!(get_hijri_date(date), "14 Ramadan 1446 AH");
        assert_eq!(hijri(2023, 7, 19).to_string(), "1 Muharram 1445 AH");
    }

    #[test]
    fn test_consecutive_days_advance() {
        let mut date = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        let mut previous = HijriDate::from_gregorian(date);
        for _ in 0..800 {
            date = date.succ_opt().unwrap();
            let current = HijriDate::from_gregorian(date);
            assert!(current > previous, "{} then {}", previous, current);
            previous = current;
        }
    }
}
