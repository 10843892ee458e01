use crate::flight::FlightRecord;
use crate::terminal::{ClassifierRules, TerminalCategory};
use crate::time::Time;

/// Load assumed for a flight whose passenger count is not published.
pub const AVERAGE_PAX_PER_FLIGHT: u32 = 180;

pub struct TerminalSummary<'a> {
    pub category: TerminalCategory,
    pub flights: Vec<&'a FlightRecord>,
    pub pax: u32,
}

impl<'a> TerminalSummary<'a> {
    fn empty(category: TerminalCategory) -> TerminalSummary<'a> {
        TerminalSummary {
            category,
            flights: vec![],
            pax: 0,
        }
    }

    pub fn count(&self) -> usize {
        self.flights.len()
    }

    pub fn next(&self) -> Option<&'a FlightRecord> {
        self.flights.first().copied()
    }
}

/// Everything derived from one feed snapshot. Borrowed from the snapshot and
/// rebuilt from scratch on every refresh.
pub struct AggregatedView<'a> {
    pub now: Time,
    flights: Vec<(&'a FlightRecord, TerminalCategory)>,
    terminals: [TerminalSummary<'a>; 4],
    hourly: [[u32; 24]; 4],
}

impl<'a> AggregatedView<'a> {
    pub fn len(&self) -> usize {
        self.flights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flights.is_empty()
    }

    pub fn entries(&self) -> &[(&'a FlightRecord, TerminalCategory)] {
        &self.flights
    }

    pub fn flights(&self) -> impl Iterator<Item = &'a FlightRecord> {
        self.flights.iter().map(|(f, _)| *f)
    }

    pub fn terminal(&self, category: TerminalCategory) -> &TerminalSummary<'a> {
        &self.terminals[category.index()]
    }

    /// Summaries in dashboard card order.
    pub fn terminals(&self) -> &[TerminalSummary<'a>] {
        &self.terminals
    }

    pub fn total_pax(&self) -> u32 {
        self.terminals.iter().map(|t| t.pax).sum()
    }

    /// Flights in the next occurrence of `hour`: today from the current hour
    /// on, tomorrow for earlier hours.
    pub fn flights_in_hour(&self, category: TerminalCategory, hour: u32) -> u32 {
        self.hourly[category.index()][(hour % 24) as usize]
    }

    /// Flights landing in the current hour bucket and the `hours - 1`
    /// following ones, wrapping past midnight.
    pub fn flights_in_next_hours(&self, category: TerminalCategory, hours: u32) -> u32 {
        let current = self.now.hour();
        (0..hours.min(24))
            .map(|offset| self.flights_in_hour(category, current + offset))
            .sum()
    }

    /// Sorted flights that have not landed yet according to the wall clock.
    pub fn upcoming(&self, limit: usize) -> Vec<(&'a FlightRecord, TerminalCategory)> {
        self.flights
            .iter()
            .filter(|(f, _)| f.day_offset > 0 || (f.day_offset == 0 && f.time() >= self.now))
            .take(limit)
            .copied()
            .collect()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Aggregator {
    pub rules: ClassifierRules,
    pub average_pax: u32,
}

impl Default for Aggregator {
    fn default() -> Self {
        Aggregator {
            rules: ClassifierRules::default(),
            average_pax: AVERAGE_PAX_PER_FLIGHT,
        }
    }
}

impl Aggregator {
    pub fn new(rules: ClassifierRules, average_pax: u32) -> Aggregator {
        Aggregator { rules, average_pax }
    }

    pub fn aggregate<'a>(&self, flights: &'a [FlightRecord], now: Time) -> AggregatedView<'a> {
        let mut listed = flights.iter().filter(|f| f.is_listed()).collect::<Vec<&FlightRecord>>();
        // stable: equal keys keep feed order
        listed.sort_by_key(|f| f.sort_key());

        let mut terminals = TerminalCategory::ALL.map(TerminalSummary::empty);
        let mut hourly = [[0u32; 24]; 4];
        let mut entries = Vec::with_capacity(listed.len());

        for flight in listed {
            let category = self.rules.classify_flight(flight);
            let summary = &mut terminals[category.index()];
            summary.flights.push(flight);
            summary.pax = summary.pax.saturating_add(flight.pax.unwrap_or(self.average_pax));
            if in_rolling_day(flight, now) {
                hourly[category.index()][flight.time().hour() as usize] += 1;
            }
            entries.push((flight, category));
        }

        AggregatedView {
            now,
            flights: entries,
            terminals,
            hourly,
        }
    }
}

/// The 24 hour buckets starting at the current hour.
fn in_rolling_day(flight: &FlightRecord, now: Time) -> bool {
    let hour = flight.time().hour();
    match flight.day_offset {
        0 => hour >= now.hour(),
        1 => hour < now.hour(),
        _ => false,
    }
}

pub fn aggregate(flights: &[FlightRecord], now: Time) -> AggregatedView<'_> {
    Aggregator::default().aggregate(flights, now)
}
