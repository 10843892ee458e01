use crate::aggregate::aggregator::AVERAGE_PAX_PER_FLIGHT;
use crate::terminal::ClassifierRules;
use crate::wait::WaitProfile;
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Parser)]
#[command(version, about = "Retén radar for Barcelona taxi drivers")]
pub struct Args {
    /// Base URL or directory publishing vuelos.json, data.json and trenes_sants.json
    #[arg(short, long, env = "RETEN_SOURCE", default_value = "public")]
    pub source: String,

    /// JSON settings file (classification rules, wait profile, feed names)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// JSON file with events, cruise calls and license market data
    #[arg(long, value_name = "FILE")]
    pub content: Option<PathBuf>,

    /// Seconds between feed refreshes, 0 to fetch once
    #[arg(short, long, env = "RETEN_INTERVAL", default_value_t = 7200)]
    pub interval: u64,

    /// Wait-time constants to use, overriding the settings file
    #[arg(short, long, value_enum)]
    pub profile: Option<ProfileName>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ProfileName {
    Standard,
    Compact,
}

impl ProfileName {
    pub fn profile(self) -> WaitProfile {
        match self {
            ProfileName::Standard => WaitProfile::STANDARD,
            ProfileName::Compact => WaitProfile::COMPACT,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedNames {
    pub flights: String,
    pub data: String,
    pub trains: String,
}

impl Default for FeedNames {
    fn default() -> Self {
        FeedNames {
            flights: "vuelos.json".into(),
            data: "data.json".into(),
            trains: "trenes_sants.json".into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub classifier: ClassifierRules,
    pub wait: WaitProfile,
    pub average_pax: u32,
    pub port_wait_minutes: u32,
    pub train_window_minutes: u64,
    pub request_timeout_secs: u64,
    pub feeds: FeedNames,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            classifier: ClassifierRules::default(),
            wait: WaitProfile::default(),
            average_pax: AVERAGE_PAX_PER_FLIGHT,
            port_wait_minutes: 18,
            train_window_minutes: 120,
            request_timeout_secs: 15,
            feeds: FeedNames::default(),
        }
    }
}

impl Settings {
    pub fn load_from_file(path: &Path) -> io::Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Args {
    pub fn settings(&self) -> io::Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => Settings::load_from_file(path)?,
            None => Settings::default(),
        };
        if let Some(profile) = self.profile {
            settings.wait = profile.profile();
        }
        Ok(settings)
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.interval)
    }
}
