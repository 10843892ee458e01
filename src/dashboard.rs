use crate::aggregate::aggregator::{AggregatedView, Aggregator};
use crate::config::Settings;
use crate::content::{CruiseSummary, Event, LocalContent};
use crate::feeds::{upcoming_trains, Extras, TrainRecord};
use crate::flight::FlightRecord;
use crate::service::Snapshot;
use crate::terminal::TerminalCategory;
use crate::time::Time;
use crate::wait::{LevelThresholds, WaitLevel};
use chrono::NaiveDate;

pub const UPCOMING_LANDINGS: usize = 5;
pub const UPCOMING_EVENTS: usize = 3;

pub struct TerminalCard<'a> {
    pub category: TerminalCategory,
    pub flights: usize,
    pub pax: u32,
    pub wait_minutes: u32,
    pub level: WaitLevel,
    pub next: Option<&'a FlightRecord>,
    /// First flight of the terminal still to land, today or tomorrow.
    pub landing: Option<&'a FlightRecord>,
}

impl TerminalCard<'_> {
    /// Minutes until `landing` touches down.
    pub fn minutes_to_next(&self, now: Time) -> Option<u64> {
        self.landing.map(|f| match f.day_offset {
            0 => f.time() - now,
            _ => now.minutes_until(f.time()),
        })
    }
}

fn still_to_land(flight: &FlightRecord, now: Time) -> bool {
    match flight.day_offset {
        0 => flight.time() >= now,
        1 => flight.time() < now,
        _ => false,
    }
}

pub struct LicenseFigures {
    pub price: Option<f64>,
    pub trend: String,
    pub change_pct: Option<f64>,
    pub median_listing: Option<f64>,
}

/// Everything the screen shows, derived from one snapshot at one instant.
pub struct Dashboard<'a> {
    pub now: Time,
    pub update_time: &'a str,
    pub view: AggregatedView<'a>,
    pub cards: Vec<TerminalCard<'a>>,
    pub extras: Option<&'a Extras>,
    pub trains: Vec<&'a TrainRecord>,
    pub cruises: CruiseSummary,
    pub events: Vec<&'a Event>,
    pub license: LicenseFigures,
}

impl<'a> Dashboard<'a> {
    pub fn build(
        snapshot: &'a Snapshot,
        content: &'a LocalContent,
        settings: &Settings,
        today: NaiveDate,
        now: Time,
    ) -> Dashboard<'a> {
        let aggregator = Aggregator::new(settings.classifier.clone(), settings.average_pax);
        let view = aggregator.aggregate(&snapshot.flights, now);

        let cards = view
            .terminals()
            .iter()
            .map(|summary| {
                let wait_minutes = settings.wait.estimate(summary.category, now.hour());
                TerminalCard {
                    category: summary.category,
                    flights: summary.count(),
                    pax: summary.pax,
                    wait_minutes,
                    level: WaitLevel::of(wait_minutes, LevelThresholds::TERMINAL),
                    next: summary.next(),
                    landing: summary.flights.iter().copied().find(|f| still_to_land(f, now)),
                }
            })
            .collect();

        let extras = snapshot.data.extras.as_ref();
        let license = LicenseFigures {
            price: extras
                .and_then(|e| e.license_price)
                .or(content.license.current_price()),
            trend: extras.map(|e| e.license_trend.clone()).unwrap_or_default(),
            change_pct: content.license.change_pct(),
            median_listing: content.license.median_net_price(),
        };

        Dashboard {
            now,
            update_time: &snapshot.data.meta.update_time,
            view,
            cards,
            extras,
            trains: upcoming_trains(&snapshot.trains, now, settings.train_window_minutes),
            cruises: content.cruise_summary(now, settings.port_wait_minutes),
            events: content.upcoming_events(today, UPCOMING_EVENTS),
            license,
        }
    }

    pub fn total_flights(&self) -> usize {
        self.view.len()
    }

    pub fn rain_alert(&self) -> bool {
        self.extras.is_some_and(Extras::rain_alert)
    }
}
