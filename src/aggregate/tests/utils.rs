use crate::flight::FlightRecord;
use proptest::prelude::Strategy;
use proptest::prop_oneof;
use proptest::strategy::Just;

pub fn add_flight(
    flights: &mut Vec<FlightRecord>,
    flight_id: &str,
    time: &str,
    terminal: &str,
    origin: &str,
) {
    flights.push(FlightRecord {
        id: flight_id.into(),
        origin: origin.into(),
        destination: "Barcelona".into(),
        scheduled: time.into(),
        terminal: terminal.into(),
        status_label: "En hora".into(),
        ..Default::default()
    });
}

pub fn add_flight_on_day(
    flights: &mut Vec<FlightRecord>,
    flight_id: &str,
    time: &str,
    terminal: &str,
    day_offset: i32,
) {
    add_flight(flights, flight_id, time, terminal, "Paris CDG");
    if let Some(f) = flights.last_mut() {
        f.day_offset = day_offset;
    }
}

pub fn ids(flights: impl Iterator<Item = impl AsRef<str>>) -> Vec<String> {
    flights.map(|f| f.as_ref().to_string()).collect()
}

pub fn arb_time() -> impl Strategy<Value = String> {
    prop_oneof![
        (0..24u32, 0..60u32).prop_map(|(h, m)| format!("{:02}:{:02}", h, m)),
        Just("".to_string()),
        Just("--:--".to_string()),
    ]
}

pub fn arb_flight() -> impl Strategy<Value = FlightRecord> {
    (
        prop_oneof![
            Just("IBE3124"),
            Just("EZY4410"),
            Just("VY1001"),
            Just("FR8921"),
            Just("")
        ],
        prop_oneof![Just("T1"), Just("T2"), Just("T2C"), Just("2B"), Just("")],
        prop_oneof![Just("Madrid-Barajas"), Just("Londres LHR"), Just("")],
        prop_oneof![Just("En hora"), Just("Aterrizando"), Just("Cancelado")],
        arb_time(),
        arb_time(),
        -1..3i32,
    )
        .prop_map(|(id, terminal, origin, status, scheduled, estimated, day)| FlightRecord {
            id: id.into(),
            origin: origin.into(),
            terminal: terminal.into(),
            status_label: status.into(),
            scheduled,
            estimated,
            day_offset: day,
            ..Default::default()
        })
}
