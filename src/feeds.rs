use crate::flight::nullable;
use crate::time::Time;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Rain probability from which drivers get a rain alert.
pub const RAIN_ALERT_PERCENT: f64 = 50.0;

/// Shape of `data.json`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataFeed {
    #[serde(deserialize_with = "nullable")]
    pub meta: Meta,
    pub extras: Option<Extras>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Meta {
    #[serde(deserialize_with = "nullable")]
    pub update_time: String,
    pub total_vuelos: Option<u32>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Extras {
    #[serde(rename = "licencia")]
    pub license_price: Option<f64>,
    #[serde(rename = "licencia_tendencia", deserialize_with = "nullable")]
    pub license_trend: String,
    #[serde(rename = "clima_prob")]
    pub rain_probability: Option<f64>,
    #[serde(rename = "clima_estado", deserialize_with = "nullable")]
    pub weather: String,
}

impl Extras {
    pub fn rain_alert(&self) -> bool {
        self.rain_probability.is_some_and(|p| p >= RAIN_ALERT_PERCENT)
    }
}

/// One long-distance arrival at Sants, as in `trenes_sants.json`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainRecord {
    #[serde(rename = "hora", deserialize_with = "nullable")]
    pub time: String,
    #[serde(rename = "origen", deserialize_with = "nullable")]
    pub origin: String,
    #[serde(rename = "tren", deserialize_with = "nullable")]
    pub service: String,
    #[serde(rename = "via", deserialize_with = "nullable")]
    pub platform: String,
}

impl TrainRecord {
    pub fn arrival(&self) -> Time {
        Time::parse_lenient(&self.time)
    }
}

/// The station board lists the same train more than once. Keeps the first
/// record per (time, service) pair and orders the survivors by arrival time.
pub fn dedup_trains(trains: Vec<TrainRecord>) -> Vec<TrainRecord> {
    let mut seen = HashSet::new();
    let mut unique = trains
        .into_iter()
        .filter(|t| seen.insert((t.time.trim().to_string(), t.service.trim().to_string())))
        .collect::<Vec<_>>();
    unique.sort_by_key(TrainRecord::arrival);
    unique
}

/// Trains arriving from `now` up to `window` minutes later, soonest first.
/// The board only carries times of day, so the window runs past midnight.
pub fn upcoming_trains(trains: &[TrainRecord], now: Time, window: u64) -> Vec<&TrainRecord> {
    let mut upcoming = trains
        .iter()
        .map(|t| (now.minutes_until(t.arrival()), t))
        .filter(|(wait, _)| *wait <= window)
        .collect::<Vec<_>>();
    upcoming.sort_by_key(|(wait, _)| *wait);
    upcoming.into_iter().map(|(_, t)| t).collect()
}
