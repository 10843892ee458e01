use crate::time::Time;
use crate::wait::{LevelThresholds, WaitLevel};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::io;
use std::path::Path;

/// Editorial data maintained by hand next to the feeds: events, cruise calls
/// and the license market.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalContent {
    pub events: Vec<Event>,
    pub cruises: Vec<CruiseCall>,
    pub license: LicenseMarket,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Event {
    pub id: String,
    pub name: String,
    pub venue: String,
    pub kind: String,
    pub date: Option<NaiveDate>,
    pub time: String,
    pub attendance: Option<u32>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CruiseCall {
    pub ship: String,
    pub terminal: String,
    pub disembark: String,
    pub pax: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CruiseSummary {
    pub ships: usize,
    pub pax: u32,
    pub next_disembark: Option<Time>,
    pub wait_minutes: u32,
    pub level: WaitLevel,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LicenseMarket {
    pub history: Vec<PricePoint>,
    pub listings: Vec<Listing>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: String,
    pub price: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Listing {
    pub source: String,
    pub price: f64,
    pub car_value: Option<f64>,
}

impl Listing {
    /// Asking price without the car sold along with the license.
    pub fn net_price(&self) -> f64 {
        self.price - self.car_value.unwrap_or(0.0)
    }
}

impl LicenseMarket {
    pub fn current_price(&self) -> Option<f64> {
        self.history.last().map(|p| p.price)
    }

    /// Percent change of the latest price against the one before it.
    pub fn change_pct(&self) -> Option<f64> {
        match self.history.as_slice() {
            [.., previous, current] if previous.price != 0.0 => {
                Some((current.price - previous.price) / previous.price * 100.0)
            }
            _ => None,
        }
    }

    pub fn median_net_price(&self) -> Option<f64> {
        let mut prices = self.listings.iter().map(Listing::net_price).collect::<Vec<_>>();
        if prices.is_empty() {
            return None;
        }
        prices.sort_by(f64::total_cmp);
        let mid = prices.len() / 2;
        if prices.len() % 2 == 0 {
            Some((prices[mid - 1] + prices[mid]) / 2.0)
        } else {
            Some(prices[mid])
        }
    }
}

impl LocalContent {
    pub fn load_from_file(path: &Path) -> io::Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }

    /// Events from `today` on, by date and start time. Undated events go last.
    pub fn upcoming_events(&self, today: NaiveDate, limit: usize) -> Vec<&Event> {
        let mut events = self
            .events
            .iter()
            .filter(|e| e.date.is_none_or(|d| d >= today))
            .collect::<Vec<&Event>>();
        events.sort_by_key(|e| (e.date.is_none(), e.date, Time::parse_lenient(&e.time)));
        events.truncate(limit);
        events
    }

    /// Next disembarkation is the first one at or after `now`, or the first of
    /// the day once all ships are in.
    pub fn cruise_summary(&self, now: Time, port_wait: u32) -> CruiseSummary {
        let mut times = self
            .cruises
            .iter()
            .map(|c| Time::parse_lenient(&c.disembark))
            .collect::<Vec<Time>>();
        times.sort();
        let next_disembark = times.iter().find(|t| **t >= now).or(times.first()).copied();

        CruiseSummary {
            ships: self.cruises.len(),
            pax: self.cruises.iter().map(|c| c.pax).sum(),
            next_disembark,
            wait_minutes: port_wait,
            level: WaitLevel::of(port_wait, LevelThresholds::PORT),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn market(prices: &[f64]) -> LicenseMarket {
        LicenseMarket {
            history: prices
                .iter()
                .enumerate()
                .map(|(i, p)| PricePoint {
                    date: format!("0{}/01", i + 1),
                    price: *p,
                })
                .collect(),
            listings: vec![],
        }
    }

    #[test]
    fn test_price_change() {
        let m = market(&[178000.0, 180000.0, 181000.0, 182000.0]);
        assert_eq!(m.current_price(), Some(182000.0));
        let change = m.change_pct().unwrap();
        assert!((change - 0.5524861878).abs() < 1e-6);

        assert_eq!(market(&[182000.0]).change_pct(), None);
        assert_eq!(market(&[0.0, 182000.0]).change_pct(), None);
        assert_eq!(market(&[]).current_price(), None);
    }

    #[test]
    fn test_listing_net_price() {
        let m = LicenseMarket {
            history: vec![],
            listings: vec![
                Listing { source: "Milanuncios".into(), price: 188000.0, car_value: Some(8000.0) },
                Listing { source: "Wallapop".into(), price: 178000.0, car_value: None },
                Listing { source: "Idealista".into(), price: 195000.0, car_value: Some(12000.0) },
            ],
        };
        assert_eq!(m.listings[0].net_price(), 180000.0);
        assert_eq!(m.median_net_price(), Some(180000.0));

        let even = LicenseMarket {
            history: vec![],
            listings: m.listings[..2].to_vec(),
        };
        assert_eq!(even.median_net_price(), Some(179000.0));
        assert_eq!(LicenseMarket::default().median_net_price(), None);
    }

    #[test]
    fn test_cruise_summary() {
        let content = LocalContent {
            cruises: vec![
                CruiseCall { ship: "Wonder of the Seas".into(), disembark: "11:00".into(), pax: 4000, ..Default::default() },
                CruiseCall { ship: "MSC World Europa".into(), disembark: "07:30".into(), pax: 2500, ..Default::default() },
            ],
            ..Default::default()
        };

        let summary = content.cruise_summary(Time::from_hm(9, 0), 18);
        assert_eq!(summary.ships, 2);
        assert_eq!(summary.pax, 6500);
        assert_eq!(summary.next_disembark, Some(Time::from_hm(11, 0)));
        assert_eq!(summary.level, WaitLevel::Medium);

        let late = content.cruise_summary(Time::from_hm(15, 0), 10);
        assert_eq!(late.next_disembark, Some(Time::from_hm(7, 30)));
        assert_eq!(late.level, WaitLevel::Low);

        let empty = LocalContent::default().cruise_summary(Time(0), 30);
        assert_eq!(empty.next_disembark, None);
        assert_eq!(empty.level, WaitLevel::High);
    }

    #[test]
    fn test_upcoming_events_order() {
        let day = |d: u32| NaiveDate::from_ymd_opt(2025, 3, d);
        let event = |id: &str, date: Option<NaiveDate>, time: &str| Event {
            id: id.into(),
            date,
            time: time.into(),
            ..Default::default()
        };
        let content = LocalContent {
            events: vec![
                event("PAST", day(1), "21:00"),
                event("UNDATED", None, "10:00"),
                event("LATE", day(3), "21:00"),
                event("EARLY", day(3), "18:30"),
                event("NEXT_DAY", day(4), "09:00"),
            ],
            ..Default::default()
        };

        let ids = content
            .upcoming_events(NaiveDate::from_ymd_opt(2025, 3, 2).unwrap(), 10)
            .iter()
            .map(|e| e.id.as_str())
            .collect::<Vec<_>>();
        assert_eq!(ids, vec!["EARLY", "LATE", "NEXT_DAY", "UNDATED"]);
        assert_eq!(content.upcoming_events(NaiveDate::from_ymd_opt(2025, 3, 2).unwrap(), 2).len(), 2);
    }

    #[test]
    fn test_load_from_file() {
        let file = NamedTempFile::new().unwrap();
        std::fs::write(
            file.path(),
            r#"{"events": [{"id": "e1", "name": "FC Barcelona - Real Madrid", "venue": "Estadi Olímpic",
                            "kind": "football", "date": "2025-03-02", "time": "21:00", "attendance": 50000}],
                "license": {"history": [{"date": "Hoy", "price": 182000}]}}"#,
        )
        .unwrap();

        let content = LocalContent::load_from_file(file.path()).unwrap();
        assert_eq!(content.events.len(), 1);
        assert_eq!(content.events[0].date, NaiveDate::from_ymd_opt(2025, 3, 2));
        assert!(content.cruises.is_empty());
        assert_eq!(content.license.current_price(), Some(182000.0));
    }
}
