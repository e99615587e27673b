use crate::core::competitor::Competitor;
use crate::core::records::{LapRecord, PositionRecord, RaceControlMessage};
use anyhow::Context;
use serde::Deserialize;
use std::fs::OpenOptions;
use std::path::Path;

/// SessionData contains the raw data of a session as delivered by the timing feed. The arrays
/// are not required to be sorted.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct SessionData {
    pub drivers: Vec<Competitor>,
    #[serde(default)]
    pub positions: Vec<PositionRecord>,
    #[serde(default)]
    pub laps: Vec<LapRecord>,
    #[serde(default)]
    pub messages: Vec<RaceControlMessage>,
}

/// read_session_data reads the JSON file and decodes the JSON string into the session data
/// struct.
pub fn read_session_data(filepath: &Path) -> anyhow::Result<SessionData> {
    // open file
    let fh = OpenOptions::new()
        .read(true)
        .open(filepath)
        .context(format!(
            "Failed to open session file {}!",
            filepath.display()
        ))?;

    // read and parse session file content
    let session_data = serde_json::from_reader(&fh).context(format!(
        "Failed to parse session file {}!",
        filepath.display()
    ))?;
    Ok(session_data)
}
