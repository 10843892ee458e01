use crate::dashboard::Dashboard;
use crate::flight::FlightRecord;
use crate::service::Snapshot;
use crate::terminal::TerminalCategory;
use crate::time::BARCELONA;
use crate::wait::WaitLevel;
use colored::Colorize;
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};

#[derive(Tabled)]
pub struct FlightRow {
    #[tabled(rename = "Hora")]
    time: String,
    #[tabled(rename = "Vuelo")]
    id: String,
    #[tabled(rename = "Origen")]
    origin: String,
    #[tabled(rename = "Terminal")]
    terminal: TerminalCategory,
    #[tabled(rename = "Estado")]
    status: String,
}

impl FlightRow {
    pub fn new(flight: &FlightRecord, terminal: TerminalCategory) -> FlightRow {
        let time = flight.effective_time().unwrap_or_default();
        FlightRow {
            time: if flight.day_offset > 0 {
                format!("{} (+{})", time, flight.day_offset)
            } else {
                time.to_string()
            },
            id: flight.id.clone(),
            origin: flight.origin.clone(),
            terminal,
            status: flight.status_label.clone(),
        }
    }
}

#[derive(Tabled)]
struct TerminalRow {
    #[tabled(rename = "Terminal")]
    name: &'static str,
    #[tabled(rename = "Vuelos")]
    flights: usize,
    #[tabled(rename = "Pax")]
    pax: u32,
    #[tabled(rename = "Retén")]
    wait: String,
    #[tabled(rename = "Próximo")]
    next: String,
}

#[derive(Tabled)]
struct HoursRow {
    #[tabled(rename = "Terminal")]
    name: &'static str,
    #[tabled(rename = "Vuelos")]
    flights: u32,
}

#[derive(Tabled)]
struct TrainRow {
    #[tabled(rename = "Hora")]
    time: String,
    #[tabled(rename = "Tren")]
    service: String,
    #[tabled(rename = "Origen")]
    origin: String,
    #[tabled(rename = "Vía")]
    platform: String,
}

#[derive(Tabled)]
struct EventRow {
    #[tabled(rename = "Fecha")]
    date: String,
    #[tabled(rename = "Hora")]
    time: String,
    #[tabled(rename = "Evento")]
    name: String,
    #[tabled(rename = "Lugar")]
    venue: String,
    #[tabled(rename = "Asistentes")]
    attendance: String,
}

fn render<T: Tabled>(rows: impl IntoIterator<Item = T>) -> String {
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    table.with(Alignment::left());
    table.to_string()
}

pub fn wait_label(minutes: u32, level: WaitLevel) -> String {
    let text = format!("~{} min", minutes);
    match level {
        WaitLevel::Low => text.green().to_string(),
        WaitLevel::Medium => text.yellow().to_string(),
        WaitLevel::High => text.red().to_string(),
    }
}

fn euros(amount: f64) -> String {
    format!("{:.0} €", amount)
}

pub fn header(dashboard: &Dashboard) -> String {
    let mut line = format!(
        "{} · {} vuelos · {} pax estimados",
        "Aeropuerto BCN".bold(),
        dashboard.total_flights(),
        dashboard.view.total_pax()
    );
    if !dashboard.update_time.is_empty() {
        line.push_str(&format!(" · datos {}", dashboard.update_time));
    }
    if dashboard.rain_alert() {
        line.push_str(&format!(" · {}", "lluvia".blue().bold()));
    }
    line
}

pub fn refreshed(snapshot: &Snapshot) -> String {
    format!(
        "Radar actualizado a las {}: {} vuelos, {} trenes.",
        snapshot.fetched_at.with_timezone(&BARCELONA).format("%H:%M"),
        snapshot.flights.len(),
        snapshot.trains.len()
    )
}

pub fn flights_table(rows: Vec<FlightRow>) -> String {
    render(rows)
}

pub fn terminals_table(dashboard: &Dashboard) -> String {
    render(dashboard.cards.iter().map(|card| TerminalRow {
        name: card.category.name(),
        flights: card.flights,
        pax: card.pax,
        wait: wait_label(card.wait_minutes, card.level),
        next: match (card.landing, card.minutes_to_next(dashboard.now), card.next) {
            (Some(f), Some(mins), _) => format!("{} {} (en {} min)", f.time(), f.origin, mins),
            (_, _, Some(f)) => format!("{} {}", f.time(), f.origin),
            _ => "-".to_string(),
        },
    }))
}

pub fn hours_table(dashboard: &Dashboard, hours: u32) -> String {
    render(TerminalCategory::ALL.iter().map(|category| HoursRow {
        name: category.name(),
        flights: dashboard.view.flights_in_next_hours(*category, hours),
    }))
}

pub fn trains_table(dashboard: &Dashboard) -> String {
    render(dashboard.trains.iter().map(|t| TrainRow {
        time: t.time.clone(),
        service: t.service.clone(),
        origin: t.origin.clone(),
        platform: t.platform.clone(),
    }))
}

pub fn events_table(dashboard: &Dashboard) -> String {
    render(dashboard.events.iter().map(|e| EventRow {
        date: e.date.map(|d| d.format("%d/%m").to_string()).unwrap_or_default(),
        time: e.time.clone(),
        name: e.name.clone(),
        venue: e.venue.clone(),
        attendance: e.attendance.map(|a| a.to_string()).unwrap_or_default(),
    }))
}

pub fn port_summary(dashboard: &Dashboard) -> String {
    let cruises = &dashboard.cruises;
    format!(
        "Puerto BCN: {} cruceros · {:.1}k pax · próximo desembarco {} · retén {}",
        cruises.ships,
        cruises.pax as f64 / 1000.0,
        cruises.next_disembark.map(|t| t.to_string()).unwrap_or_else(|| "-".into()),
        wait_label(cruises.wait_minutes, cruises.level)
    )
}

pub fn license_summary(dashboard: &Dashboard) -> String {
    let license = &dashboard.license;
    let mut line = format!(
        "Licencia: {}",
        license.price.map(euros).unwrap_or_else(|| "sin datos".into())
    );
    if let Some(change) = license.change_pct {
        let change = format!("{:+.1}%", change);
        line.push_str(&format!(" ({})", if change.starts_with('-') { change.red() } else { change.green() }));
    }
    if !license.trend.is_empty() {
        line.push_str(&format!(" · tendencia {}", license.trend));
    }
    if let Some(median) = license.median_listing {
        line.push_str(&format!(" · mediana anuncios sin coche {}", euros(median)));
    }
    line
}

pub fn weather_summary(dashboard: &Dashboard) -> String {
    match dashboard.extras {
        Some(extras) => format!(
            "Clima: {} · probabilidad de lluvia {}",
            if extras.weather.is_empty() { "-" } else { extras.weather.as_str() },
            extras.rain_probability.map(|p| format!("{:.0}%", p)).unwrap_or_else(|| "-".into())
        ),
        None => "Clima: sin datos".to_string(),
    }
}
