use crate::flight::FlightRecord;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::Formatter;
use std::str::FromStr;
use std::sync::LazyLock;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TerminalCategory {
    T1,
    T2,
    T2C,
    AirBridge,
}

impl TerminalCategory {
    /// Dashboard card order.
    pub const ALL: [TerminalCategory; 4] = [
        TerminalCategory::T1,
        TerminalCategory::T2,
        TerminalCategory::AirBridge,
        TerminalCategory::T2C,
    ];

    pub fn index(self) -> usize {
        match self {
            TerminalCategory::T1 => 0,
            TerminalCategory::T2 => 1,
            TerminalCategory::AirBridge => 2,
            TerminalCategory::T2C => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TerminalCategory::T1 => "Terminal 1",
            TerminalCategory::T2 => "Terminal 2",
            TerminalCategory::AirBridge => "Puente Aéreo",
            TerminalCategory::T2C => "T2C EasyJet",
        }
    }

    pub fn badge(self) -> &'static str {
        match self {
            TerminalCategory::T1 => "T1",
            TerminalCategory::T2 => "T2",
            TerminalCategory::AirBridge => "PA",
            TerminalCategory::T2C => "T2C",
        }
    }
}

impl fmt::Display for TerminalCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.badge())
    }
}

impl FromStr for TerminalCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "t1" | "1" => Ok(TerminalCategory::T1),
            "t2" | "2" => Ok(TerminalCategory::T2),
            "t2c" | "2c" | "easyjet" => Ok(TerminalCategory::T2C),
            "pa" | "puente" | "airbridge" | "shuttle" => Ok(TerminalCategory::AirBridge),
            other => Err(format!("unknown terminal '{}'", other)),
        }
    }
}

/// Carrier prefixes and labels driving terminal classification.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierRules {
    pub shuttle_prefixes: Vec<String>,
    pub shuttle_origin: String,
    pub low_cost_prefixes: Vec<String>,
    pub low_cost_terminal: String,
}

impl Default for ClassifierRules {
    fn default() -> Self {
        ClassifierRules {
            shuttle_prefixes: vec!["IBE".into(), "IB".into()],
            shuttle_origin: "MADRID".into(),
            low_cost_prefixes: vec!["EZY".into(), "EJU".into()],
            low_cost_terminal: "T2C".into(),
        }
    }
}

static DEFAULT_RULES: LazyLock<ClassifierRules> = LazyLock::new(ClassifierRules::default);

fn has_prefix(code: &str, prefixes: &[String]) -> bool {
    prefixes
        .iter()
        .map(|p| p.trim().to_uppercase())
        .any(|p| !p.is_empty() && code.starts_with(&p))
}

impl ClassifierRules {
    /// First matching rule wins: shuttle from Madrid, low-cost carrier or its
    /// dedicated terminal, then the digits of the declared terminal.
    pub fn classify(&self, carrier: &str, declared_terminal: &str, origin: &str) -> TerminalCategory {
        let carrier = carrier.trim().to_uppercase();
        let terminal = declared_terminal.trim().to_uppercase();
        let origin = origin.trim().to_uppercase();
        let shuttle_origin = self.shuttle_origin.trim().to_uppercase();
        let low_cost_terminal = self.low_cost_terminal.trim().to_uppercase();

        if has_prefix(&carrier, &self.shuttle_prefixes)
            && !shuttle_origin.is_empty()
            && origin.contains(&shuttle_origin)
        {
            return TerminalCategory::AirBridge;
        }
        if has_prefix(&carrier, &self.low_cost_prefixes)
            || (!low_cost_terminal.is_empty() && terminal.contains(&low_cost_terminal))
        {
            return TerminalCategory::T2C;
        }
        if terminal.contains('2') {
            return TerminalCategory::T2;
        }
        if terminal.contains('1') {
            return TerminalCategory::T1;
        }
        TerminalCategory::T2
    }

    pub fn classify_flight(&self, flight: &FlightRecord) -> TerminalCategory {
        self.classify(flight.carrier_code(), &flight.terminal, &flight.origin)
    }
}

pub fn classify(carrier: &str, declared_terminal: &str, origin: &str) -> TerminalCategory {
    DEFAULT_RULES.classify(carrier, declared_terminal, origin)
}
