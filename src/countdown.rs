use chrono::{DateTime, Days, Duration, TimeZone, Utc};

use crate::error::Result;
use crate::times::{PrayerTime, PrayerTimeSet, TimeId};

const DAY_MILLIS: i64 = 24 * 60 * 60 * 1000;

impl PrayerTime {
    /// The instant this time falls on, on `reference`'s local date.
    ///
    /// `None` when the time is unavailable or does not exist on that date
    /// (skipped by a DST transition).
    pub fn on<Tz: TimeZone>(&self, reference: &DateTime<Tz>) -> Option<DateTime<Tz>> {
        let clock = self.clock()?;
        let local = reference
            .date_naive()
            .and_hms_opt(clock.hour(), clock.minute(), 0)?;
        reference.timezone().from_local_datetime(&local).earliest()
    }
}

/// Parses `HH:MM` (or the unavailable marker) into an instant on
/// `reference`'s date.
pub fn parse_to_instant<Tz: TimeZone>(
    formatted: &str,
    reference: &DateTime<Tz>,
) -> Result<Option<DateTime<Tz>>> {
    let time: PrayerTime = formatted.parse()?;
    Ok(time.on(reference))
}

/// Time left until `target`. A target already in the past is taken to be
/// the same time tomorrow, so the result is never negative.
pub fn countdown<Tz1: TimeZone, Tz2: TimeZone>(
    target: &DateTime<Tz1>,
    now: &DateTime<Tz2>,
) -> Duration {
    let diff = target.with_timezone(&Utc) - now.with_timezone(&Utc);
    if diff < Duration::zero() {
        Duration::milliseconds(diff.num_milliseconds().rem_euclid(DAY_MILLIS))
    } else {
        diff
    }
}

/* render the countdown as "2h 14m remaining" or "37m remaining" */
pub fn get_countdown<Tz1: TimeZone, Tz2: TimeZone>(
    target: &DateTime<Tz1>,
    now: &DateTime<Tz2>,
) -> String {
    let remaining = countdown(target, now);
    let hours = remaining.num_hours();
    let minutes = remaining.num_minutes() % 60;
    if hours > 0 {
        format!("{}h {}m remaining", hours, minutes)
    } else {
        format!("{}m remaining", minutes)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NextPrayer<Tz: TimeZone> {
    pub prayer: TimeId,
    pub at: DateTime<Tz>,
}

/// The first prayer after `now`, reading `times` as today's schedule.
///
/// After Isha the next prayer is Fajr tomorrow, approximated with today's
/// Fajr time. Returns `None` only if that fallback Fajr is unavailable.
pub fn next_prayer<Tz: TimeZone>(
    times: &PrayerTimeSet,
    now: &DateTime<Tz>,
) -> Option<NextPrayer<Tz>> {
    for prayer in TimeId::PRAYERS {
        if let Some(at) = times.get(prayer).on(now) {
            if &at > now {
                return Some(NextPrayer { prayer, at });
            }
        }
    }

    let at = times.fajr.on(now)?.checked_add_days(Days::new(1))?;
    Some(NextPrayer {
        prayer: TimeId::Fajr,
        at,
    })
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, Timelike};

    use super::*;

    fn makkah_tz() -> FixedOffset {
        FixedOffset::east_opt(3 * 3600).unwrap()
    }

    fn at(hour: u32, minute: u32) -> DateTime<FixedOffset> {
        makkah_tz()
            .with_ymd_and_hms(2025, 3, 14, hour, minute, 0)
            .unwrap()
    }

    fn schedule() -> PrayerTimeSet {
        PrayerTimeSet {
            fajr: "05:29".parse().unwrap(),
            sunrise: "06:30".parse().unwrap(),
            dhuhr: "12:30".parse().unwrap(),
            asr: "15:54".parse().unwrap(),
            maghrib: "18:30".parse().unwrap(),
            isha: "19:31".parse().unwrap(),
        }
    }

    #[test]
    fn test_parse_to_instant() {
        let reference = at(9, 0);
        let instant = parse_to_instant("15:54", &reference).unwrap().unwrap();
        assert_eq!(instant, at(15, 54));
        assert_eq!(instant.second(), 0);
        assert_eq!(parse_to_instant("--:--", &reference).unwrap(), None);
        assert!(parse_to_instant("3pm", &reference).is_err());
    }

    #[test]
    fn test_countdown_future() {
        assert_eq!(get_countdown(&at(15, 54), &at(13, 40)), "2h 14m remaining");
        assert_eq!(get_countdown(&at(15, 54), &at(15, 17)), "37m remaining");
        assert_eq!(get_countdown(&at(15, 54), &at(15, 54)), "0m remaining");
    }

    #[test]
    fn test_countdown_wraps_to_tomorrow() {
        let remaining = countdown(&at(5, 29), &at(19, 32));
        assert_eq!(remaining, Duration::hours(9) + Duration::minutes(57));
        assert_eq!(get_countdown(&at(5, 29), &at(19, 32)), "9h 57m remaining");
    }

    #[test]
    fn test_countdown_across_timezones() {
        let target = Utc.with_ymd_and_hms(2025, 3, 14, 12, 54, 0).unwrap();
        assert_eq!(get_countdown(&target, &at(13, 40)), "2h 14m remaining");
    }

    #[test]
    fn test_next_prayer_during_day() {
        let next = next_prayer(&schedule(), &at(13, 0)).unwrap();
        assert_eq!(next.prayer, TimeId::Asr);
        assert_eq!(next.at, at(15, 54));

        // sunrise is skipped
        let next = next_prayer(&schedule(), &at(6, 0)).unwrap();
        assert_eq!(next.prayer, TimeId::Dhuhr);
    }

    #[test]
    fn test_next_prayer_after_isha_is_tomorrows_fajr() {
        let next = next_prayer(&schedule(), &at(22, 0)).unwrap();
        assert_eq!(next.prayer, TimeId::Fajr);
        assert_eq!(
            next.at,
            makkah_tz().with_ymd_and_hms(2025, 3, 15, 5, 29, 0).unwrap()
        );
    }

    #[test]
    fn test_next_prayer_skips_unavailable() {
        let mut times = schedule();
        times.isha = PrayerTime::Unavailable;
        let next = next_prayer(&times, &at(19, 0)).unwrap();
        assert_eq!(next.prayer, TimeId::Fajr);

        times.fajr = PrayerTime::Unavailable;
        assert_eq!(next_prayer(&times, &at(19, 0)), None);
    }
}
