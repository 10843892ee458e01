//! Retén radar: arrivals, queue estimates and side information for taxi
//! drivers working Barcelona airport, Sants station and the port.

pub mod aggregate;
pub mod config;
pub mod content;
pub mod dashboard;
pub mod display;
pub mod feeds;
pub mod flight;
pub mod service;
pub mod source;
pub mod terminal;
pub mod time;
pub mod wait;
