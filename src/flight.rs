use crate::time::Time;
use serde::{Deserialize, Deserializer, Serialize};

/// Feeds emit `null` as freely as they omit fields.
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// `dia_relativo` shows up as an integer, a float or a numeric string
/// depending on the scraper. Anything unreadable counts as today.
fn day_offset<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(i64),
        Float(f64),
        Text(String),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Int(n)) => n.clamp(i32::MIN as i64, i32::MAX as i64) as i32,
        Some(Raw::Float(n)) => n as i32,
        Some(Raw::Text(s)) => s.trim().parse().unwrap_or(0),
        None => 0,
    })
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlightStatus {
    OnTime,
    Landing,
    Landed,
    Delayed,
    Cancelled,
    Unknown,
}

impl FlightStatus {
    pub fn from_label(label: &str) -> FlightStatus {
        let label = label.trim().to_lowercase();
        if label.contains("cancel") {
            FlightStatus::Cancelled
        } else if label.contains("aterrizado") || label.contains("landed") {
            FlightStatus::Landed
        } else if label.contains("aterriz") || label.contains("landing") || label.contains("final") {
            FlightStatus::Landing
        } else if label.contains("retras") || label.contains("delay") {
            FlightStatus::Delayed
        } else if label.contains("hora")
            || label.contains("on time")
            || label.contains("ontime")
            || label.contains("programado")
            || label.contains("previsto")
            || label.contains("scheduled")
        {
            FlightStatus::OnTime
        } else {
            FlightStatus::Unknown
        }
    }
}

/// One arrival as published in `vuelos.json`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlightRecord {
    #[serde(deserialize_with = "nullable")]
    pub id: String,
    #[serde(rename = "origen", deserialize_with = "nullable")]
    pub origin: String,
    #[serde(rename = "destino", deserialize_with = "nullable")]
    pub destination: String,
    #[serde(rename = "fecha", deserialize_with = "nullable")]
    pub date: String,
    #[serde(rename = "hora_prog", deserialize_with = "nullable")]
    pub scheduled: String,
    #[serde(rename = "hora_est", deserialize_with = "nullable")]
    pub estimated: String,
    #[serde(deserialize_with = "nullable")]
    pub terminal: String,
    #[serde(rename = "estado", deserialize_with = "nullable")]
    pub status_label: String,
    #[serde(rename = "aerolinea", deserialize_with = "nullable")]
    pub airline: String,
    #[serde(rename = "dia_relativo", deserialize_with = "day_offset")]
    pub day_offset: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pax: Option<u32>,
}

impl FlightRecord {
    /// Estimated time when published, scheduled otherwise.
    pub fn effective_time(&self) -> Option<&str> {
        [self.estimated.as_str(), self.scheduled.as_str()]
            .into_iter()
            .map(str::trim)
            .find(|t| !t.is_empty())
    }

    pub fn time(&self) -> Time {
        self.effective_time().map(Time::parse_lenient).unwrap_or_default()
    }

    pub fn status(&self) -> FlightStatus {
        FlightStatus::from_label(&self.status_label)
    }

    /// The flight designator carries the carrier prefix; the airline field is
    /// only a fallback for feeds that leave the designator blank.
    pub fn carrier_code(&self) -> &str {
        let id = self.id.trim();
        if id.is_empty() { self.airline.trim() } else { id }
    }

    pub fn is_listed(&self) -> bool {
        self.effective_time().is_some() && self.status() != FlightStatus::Cancelled
    }

    pub fn sort_key(&self) -> (i32, Time) {
        (self.day_offset, self.time())
    }
}
