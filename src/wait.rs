use crate::terminal::TerminalCategory;
use serde::{Deserialize, Serialize};

/// Inclusive hour ranges when every terminal queue gets the surcharge.
pub const PEAK_WINDOWS: [(u32, u32); 2] = [(10, 14), (18, 21)];

pub fn is_peak_hour(hour: u32) -> bool {
    let hour = hour % 24;
    PEAK_WINDOWS.iter().any(|(from, to)| hour >= *from && hour <= *to)
}

/// Base retén minutes per terminal plus the peak surcharge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaitProfile {
    pub t1: u32,
    pub t2: u32,
    pub t2c: u32,
    pub air_bridge: u32,
    pub peak_surcharge: u32,
}

impl WaitProfile {
    pub const STANDARD: WaitProfile = WaitProfile {
        t1: 30,
        t2: 20,
        t2c: 15,
        air_bridge: 10,
        peak_surcharge: 15,
    };

    pub const COMPACT: WaitProfile = WaitProfile {
        t1: 25,
        t2: 15,
        t2c: 12,
        air_bridge: 8,
        peak_surcharge: 12,
    };

    pub fn base(&self, category: TerminalCategory) -> u32 {
        match category {
            TerminalCategory::T1 => self.t1,
            TerminalCategory::T2 => self.t2,
            TerminalCategory::T2C => self.t2c,
            TerminalCategory::AirBridge => self.air_bridge,
        }
    }

    pub fn estimate(&self, category: TerminalCategory, hour: u32) -> u32 {
        let surcharge = if is_peak_hour(hour) { self.peak_surcharge } else { 0 };
        self.base(category) + surcharge
    }
}

impl Default for WaitProfile {
    fn default() -> Self {
        WaitProfile::STANDARD
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum WaitLevel {
    Low,
    Medium,
    High,
}

/// Upper bounds (inclusive) of the low and medium bands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LevelThresholds {
    pub low: u32,
    pub medium: u32,
}

impl LevelThresholds {
    pub const TERMINAL: LevelThresholds = LevelThresholds { low: 10, medium: 25 };
    pub const PORT: LevelThresholds = LevelThresholds { low: 15, medium: 25 };
}

impl WaitLevel {
    pub fn of(minutes: u32, thresholds: LevelThresholds) -> WaitLevel {
        if minutes <= thresholds.low {
            WaitLevel::Low
        } else if minutes <= thresholds.medium {
            WaitLevel::Medium
        } else {
            WaitLevel::High
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_peak_windows_are_inclusive() {
        assert!(!is_peak_hour(9));
        assert!(is_peak_hour(10));
        assert!(is_peak_hour(14));
        assert!(!is_peak_hour(15));
        assert!(!is_peak_hour(17));
        assert!(is_peak_hour(18));
        assert!(is_peak_hour(21));
        assert!(!is_peak_hour(22));
        assert!(is_peak_hour(24 + 10));
    }

    #[test]
    fn test_standard_profile() {
        let p = WaitProfile::STANDARD;
        assert_eq!(p.estimate(TerminalCategory::T1, 8), 30);
        assert_eq!(p.estimate(TerminalCategory::T1, 12), 45);
        assert_eq!(p.estimate(TerminalCategory::AirBridge, 3), 10);
        assert_eq!(p.estimate(TerminalCategory::T2C, 20), 30);
    }

    #[test]
    fn test_compact_profile() {
        let p = WaitProfile::COMPACT;
        assert_eq!(p.estimate(TerminalCategory::T2, 16), 15);
        assert_eq!(p.estimate(TerminalCategory::T2, 19), 27);
        assert_eq!(p.estimate(TerminalCategory::AirBridge, 11), 20);
    }

    #[test]
    fn test_partial_profile_fills_from_standard() {
        let p: WaitProfile = serde_json::from_str(r#"{"t1": 40}"#).unwrap();
        assert_eq!(p.t1, 40);
        assert_eq!(p.t2, WaitProfile::STANDARD.t2);
        assert_eq!(p.peak_surcharge, WaitProfile::STANDARD.peak_surcharge);
    }

    #[test]
    fn test_levels() {
        assert_eq!(WaitLevel::of(10, LevelThresholds::TERMINAL), WaitLevel::Low);
        assert_eq!(WaitLevel::of(11, LevelThresholds::TERMINAL), WaitLevel::Medium);
        assert_eq!(WaitLevel::of(25, LevelThresholds::TERMINAL), WaitLevel::Medium);
        assert_eq!(WaitLevel::of(26, LevelThresholds::TERMINAL), WaitLevel::High);
        assert_eq!(WaitLevel::of(15, LevelThresholds::PORT), WaitLevel::Low);
        assert_eq!(WaitLevel::of(18, LevelThresholds::PORT), WaitLevel::Medium);
    }

    proptest! {
        #[test]
        fn test_peak_never_shorter(
            idx in 0usize..4,
            peak in prop::sample::select(vec![10u32, 11, 12, 13, 14, 18, 19, 20, 21]),
            off_peak in prop::sample::select(vec![0u32, 1, 5, 9, 15, 16, 17, 22, 23]),
            compact in any::<bool>(),
        ) {
            let profile = if compact { WaitProfile::COMPACT } else { WaitProfile::STANDARD };
            let category = TerminalCategory::ALL[idx];
            prop_assert!(profile.estimate(category, peak) >= profile.estimate(category, off_peak));
            prop_assert_eq!(profile.estimate(category, off_peak), profile.base(category));
        }
    }
}
