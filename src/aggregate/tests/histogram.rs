use crate::aggregate::aggregator::aggregate;
use crate::aggregate::tests::utils::{add_flight, add_flight_on_day};
use crate::terminal::TerminalCategory::{T1, T2};
use crate::time::Time;

#[test]
fn test_hour_buckets() {
    let mut flights = Vec::new();
    add_flight(&mut flights, "A", "08:00", "T1", "Roma");
    add_flight(&mut flights, "B", "08:59", "T1", "Lisboa");
    add_flight(&mut flights, "C", "09:00", "T1", "Paris CDG");
    add_flight(&mut flights, "D", "08:30", "T2", "Porto");

    let view = aggregate(&flights, Time::from_hm(8, 10));

    assert_eq!(view.flights_in_hour(T1, 8), 2);
    assert_eq!(view.flights_in_hour(T1, 9), 1);
    assert_eq!(view.flights_in_hour(T2, 8), 1);
    assert_eq!(view.flights_in_hour(T2, 9), 0);
}

#[test]
fn test_next_hours_window() {
    let mut flights = Vec::new();
    add_flight(&mut flights, "A", "08:00", "T1", "Roma");
    add_flight(&mut flights, "B", "09:15", "T1", "Lisboa");
    add_flight(&mut flights, "C", "10:45", "T1", "Paris CDG");
    add_flight(&mut flights, "D", "07:50", "T1", "Porto");

    let view = aggregate(&flights, Time::from_hm(8, 30));

    assert_eq!(view.flights_in_next_hours(T1, 0), 0);
    assert_eq!(view.flights_in_next_hours(T1, 1), 1);
    assert_eq!(view.flights_in_next_hours(T1, 2), 2);
    assert_eq!(view.flights_in_next_hours(T1, 3), 3);
}

#[test]
fn test_next_hours_wraps_midnight() {
    let mut flights = Vec::new();
    add_flight_on_day(&mut flights, "LATE", "23:20", "T1", 0);
    add_flight_on_day(&mut flights, "AFTER_MIDNIGHT", "00:40", "T1", 1);
    add_flight_on_day(&mut flights, "EARLY", "01:10", "T1", 1);

    let view = aggregate(&flights, Time::from_hm(23, 0));

    assert_eq!(view.flights_in_next_hours(T1, 2), 2);
    assert_eq!(view.flights_in_next_hours(T1, 3), 3);
}

#[test]
fn test_window_is_capped_at_one_day() {
    let mut flights = Vec::new();
    add_flight_on_day(&mut flights, "A", "08:00", "T1", 1);
    add_flight(&mut flights, "B", "20:00", "T1", "Lisboa");

    let view = aggregate(&flights, Time::from_hm(12, 0));

    assert_eq!(view.flights_in_next_hours(T1, 24), 2);
    assert_eq!(view.flights_in_next_hours(T1, 100), 2);
}

#[test]
fn test_other_days_stay_out_of_the_window() {
    let mut flights = Vec::new();
    add_flight_on_day(&mut flights, "YESTERDAY", "09:15", "T1", -1);
    add_flight_on_day(&mut flights, "TODAY", "09:15", "T1", 0);
    add_flight_on_day(&mut flights, "TOMORROW", "09:15", "T1", 1);
    add_flight_on_day(&mut flights, "TOMORROW_EARLY", "07:40", "T1", 1);
    add_flight_on_day(&mut flights, "IN_TWO_DAYS", "10:00", "T1", 2);

    let view = aggregate(&flights, Time::from_hm(8, 30));

    assert_eq!(view.flights_in_next_hours(T1, 2), 1);
    assert_eq!(view.flights_in_hour(T1, 9), 1);
    assert_eq!(view.flights_in_hour(T1, 7), 1);
    assert_eq!(view.flights_in_hour(T1, 10), 0);
    assert_eq!(view.flights_in_next_hours(T1, 24), 2);
    assert_eq!(view.terminal(T1).count(), 5);
}
