use chrono::{DateTime, Timelike, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

pub const BARCELONA: Tz = chrono_tz::Europe::Madrid;

/// Minutes since local midnight.
#[derive(Debug, Clone, Copy, Default, Ord, Eq, PartialEq, Hash, Serialize, Deserialize, PartialOrd)]
pub struct Time(pub u64);

impl Time {
    pub const MINUTES_PER_DAY: u64 = 1440;

    pub fn from_hm(hours: u32, minutes: u32) -> Time {
        Time(hours as u64 * 60 + minutes as u64)
    }

    pub fn of_day<T: Timelike>(t: &T) -> Time {
        Time::from_hm(t.hour(), t.minute())
    }

    /// Strict `HH:MM` parse. Returns `None` for anything that is not two
    /// colon-separated numbers.
    pub fn parse(s: &str) -> Option<Time> {
        let (h, m) = s.trim().split_once(':')?;
        let h = h.trim().parse::<u32>().ok()?;
        let m = m.trim().parse::<u32>().ok()?;
        Some(Time::from_hm(h, m))
    }

    /// Feed times are free text. A missing or unparseable minutes part counts
    /// as zero minutes, an unparseable hour makes the whole value midnight.
    pub fn parse_lenient(s: &str) -> Time {
        let mut parts = s.trim().splitn(2, ':');
        let hours = match parts.next().map(|h| h.trim().parse::<u32>()) {
            Some(Ok(h)) => h,
            _ => return Time(0),
        };
        let minutes = parts
            .next()
            .and_then(|m| m.trim().parse::<u32>().ok())
            .unwrap_or(0);
        Time::from_hm(hours, minutes)
    }

    pub fn hour(&self) -> u32 {
        ((self.0 / 60) % 24) as u32
    }

    /// Minutes forward on the clock face until `later`, wrapping past midnight.
    pub fn minutes_until(&self, later: Time) -> u64 {
        let day = Self::MINUTES_PER_DAY;
        (later.0 % day + day - self.0 % day) % day
    }
}

impl std::fmt::Display for Time {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let remaining = self.0 % Self::MINUTES_PER_DAY;
        let hours = remaining / 60;
        let mins = remaining % 60;
        write!(f, "{:02}:{:02}", hours, mins)
    }
}

impl Add<u64> for Time {
    type Output = Self;

    fn add(self, rhs: u64) -> Self::Output {
        Time(self.0 + rhs)
    }
}

impl Sub<Time> for Time {
    type Output = u64;

    /// Minutes between two times, zero when `rhs` is later.
    fn sub(self, rhs: Time) -> Self::Output {
        self.0.saturating_sub(rhs.0)
    }
}

/// Wall clock at the airport.
pub fn local_now() -> DateTime<Tz> {
    Utc::now().with_timezone(&BARCELONA)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_hhmm() {
        assert_eq!(Time::parse("08:15"), Some(Time(495)));
        assert_eq!(Time::parse(" 23:59 "), Some(Time(1439)));
        assert_eq!(Time::parse("0815"), None);
        assert_eq!(Time::parse("ab:10"), None);
    }

    #[test]
    fn test_parse_lenient_defaults_to_midnight() {
        assert_eq!(Time::parse_lenient(""), Time(0));
        assert_eq!(Time::parse_lenient("--:--"), Time(0));
        assert_eq!(Time::parse_lenient("09"), Time(540));
        assert_eq!(Time::parse_lenient("09:xx"), Time(540));
        assert_eq!(Time::parse_lenient("9:5"), Time(545));
    }

    #[test]
    fn test_display_and_hour() {
        let t = Time::from_hm(7, 5);
        assert_eq!(t.to_string(), "07:05");
        assert_eq!(t.hour(), 7);
        assert_eq!(Time(1440 + 61).hour(), 1);
        assert_eq!(Time(1440 + 61).to_string(), "01:01");
    }

    #[test]
    fn test_difference_saturates() {
        assert_eq!(Time(600) - Time(540), 60);
        assert_eq!(Time(540) - Time(600), 0);
        assert_eq!(Time(540) + 30, Time(570));
    }

    #[test]
    fn test_minutes_until_wraps_midnight() {
        assert_eq!(Time::from_hm(8, 0).minutes_until(Time::from_hm(9, 30)), 90);
        assert_eq!(Time::from_hm(23, 30).minutes_until(Time::from_hm(0, 20)), 50);
        assert_eq!(Time::from_hm(10, 0).minutes_until(Time::from_hm(10, 0)), 0);
        assert_eq!(Time::from_hm(10, 0).minutes_until(Time::from_hm(9, 59)), 1439);
    }

    #[test]
    fn test_of_day_uses_local_wall_clock() {
        let summer = Utc.with_ymd_and_hms(2025, 7, 1, 8, 30, 0).unwrap().with_timezone(&BARCELONA);
        assert_eq!(Time::of_day(&summer), Time::from_hm(10, 30));
        let winter = Utc.with_ymd_and_hms(2025, 1, 15, 8, 30, 0).unwrap().with_timezone(&BARCELONA);
        assert_eq!(Time::of_day(&winter), Time::from_hm(9, 30));
    }
}
