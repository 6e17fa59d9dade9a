// Day-part matching for departure times
use crate::error::{FlightError, Result};
use chrono::{DateTime, FixedOffset, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

pub const INVALID_TIME_OF_DAY: &str =
    "Invalid time_of_day value passed. Choose from 'morning', 'afternoon', 'evening', 'night'.";

/// Selects between the historical ranking rules and their corrected form.
///
/// `Legacy` keeps results identical to the heuristic this service has always shipped:
/// cost never contributes to the score, evening also covers the small hours and night
/// accepts any departure. `Corrected` normalises cost over the real price range and
/// gives evening and night disjoint ranges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeuristicMode {
    #[default]
    Legacy,
    Corrected,
}

impl FromStr for HeuristicMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "legacy" => Ok(HeuristicMode::Legacy),
            "corrected" => Ok(HeuristicMode::Corrected),
            other => Err(format!(
                "unknown heuristic mode '{}', expected 'legacy' or 'corrected'",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
    Night,
}

// Checked at compile time
const fn boundary(hour: u32) -> NaiveTime {
    match NaiveTime::from_hms_opt(hour, 0, 0) {
        Some(time) => time,
        None => panic!("day-part boundary out of range"),
    }
}

const SIX_AM: NaiveTime = boundary(6);
const NOON: NaiveTime = boundary(12);
const SIX_PM: NaiveTime = boundary(18);

impl TimeOfDay {
    // Tests a wall-clock time against this day-part
    pub fn contains(&self, time: NaiveTime, mode: HeuristicMode) -> bool {
        let midnight = NaiveTime::MIN;
        match (self, mode) {
            (TimeOfDay::Morning, _) => SIX_AM <= time && time < NOON,
            (TimeOfDay::Afternoon, _) => NOON <= time && time < SIX_PM,
            (TimeOfDay::Evening, HeuristicMode::Legacy) => SIX_PM <= time || time < SIX_AM,
            (TimeOfDay::Evening, HeuristicMode::Corrected) => SIX_PM <= time,
            (TimeOfDay::Night, HeuristicMode::Legacy) => midnight <= time || time < SIX_AM,
            (TimeOfDay::Night, HeuristicMode::Corrected) => midnight <= time && time < SIX_AM,
        }
    }

    pub fn matches_timestamp(&self, timestamp: &DateTime<FixedOffset>, mode: HeuristicMode) -> bool {
        // Local wall-clock time in the timestamp's own offset
        self.contains(timestamp.time(), mode)
    }
}

impl FromStr for TimeOfDay {
    type Err = FlightError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "morning" => Ok(TimeOfDay::Morning),
            "afternoon" => Ok(TimeOfDay::Afternoon),
            "evening" => Ok(TimeOfDay::Evening),
            "night" => Ok(TimeOfDay::Night),
            _ => {
                warn!(time_of_day = s, "{}", INVALID_TIME_OF_DAY);
                Err(FlightError::InvalidArgument(INVALID_TIME_OF_DAY.to_string()))
            }
        }
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TimeOfDay::Morning => "morning",
            TimeOfDay::Afternoon => "afternoon",
            TimeOfDay::Evening => "evening",
            TimeOfDay::Night => "night",
        };
        f.write_str(label)
    }
}

/// Case-insensitive label check; unknown labels fail with `InvalidArgument`.
pub fn matches(timestamp: &DateTime<FixedOffset>, label: &str, mode: HeuristicMode) -> Result<bool> {
    let time_of_day: TimeOfDay = label.parse()?;
    Ok(time_of_day.matches_timestamp(timestamp, mode))
}
