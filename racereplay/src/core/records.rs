use crate::core::best_times::Metric;
use helpers::general::valid_duration;
use serde::{Deserialize, Serialize};

/// * `date` - Timestamp of the position update (ISO 8601)
/// * `driver_number` - Car number of the driver
/// * `position` - Running order rank of the driver (1 is the leader)
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PositionRecord {
    pub date: String,
    pub driver_number: u32,
    pub position: u32,
}

/// * `date_start` - Timestamp at which the lap was started (ISO 8601), not available for some
/// laps, e.g. the first lap of a session
/// * `driver_number` - Car number of the driver
/// * `lap_number` - Number of the lap
/// * `lap_duration` - (s) Lap time
/// * `duration_sector_1` - (s) Sector 1 time
/// * `duration_sector_2` - (s) Sector 2 time
/// * `duration_sector_3` - (s) Sector 3 time
/// * `is_pit_out_lap` - Lap was started in the pit lane
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct LapRecord {
    #[serde(default)]
    pub date_start: Option<String>,
    pub driver_number: u32,
    pub lap_number: u32,
    #[serde(default)]
    pub lap_duration: Option<f64>,
    #[serde(default)]
    pub duration_sector_1: Option<f64>,
    #[serde(default)]
    pub duration_sector_2: Option<f64>,
    #[serde(default)]
    pub duration_sector_3: Option<f64>,
    #[serde(default)]
    pub is_pit_out_lap: bool,
}

impl LapRecord {
    /// duration returns the time of the given metric if it contains usable timing data (see
    /// valid_duration).
    pub fn duration(&self, metric: Metric) -> Option<f64> {
        valid_duration(match metric {
            Metric::Lap => self.lap_duration,
            Metric::Sector1 => self.duration_sector_1,
            Metric::Sector2 => self.duration_sector_2,
            Metric::Sector3 => self.duration_sector_3,
        })
    }
}

/// * `date` - Timestamp of the message (ISO 8601)
/// * `category` - Message category, e.g. Flag or SafetyCar
/// * `flag` - Flag shown together with the message, e.g. YELLOW
/// * `message` - Free text of the message
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct RaceControlMessage {
    pub date: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub flag: Option<String>,
    pub message: String,
}
