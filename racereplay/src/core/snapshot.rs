use crate::core::competitor::Competitor;
use crate::core::records::{LapRecord, PositionRecord, RaceControlMessage};
use crate::core::timeline::{EventPayload, TimelineEvent};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Category and flag used for race control messages that do not state them.
const DEFAULT_MSG_CATEGORY: &str = "Race Control";
const DEFAULT_MSG_FLAG: &str = "none";

/// Applied informs the caller what an event changed in the snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Position,
    Lap,
    Message,
    Ignored,
}

/// RaceStateSnapshot is the complete race state at a point of the replay as it is handed to a
/// renderer:
/// * `competitors` - Roster of the session
/// * `positions` - Exactly one position entry per competitor, sorted by ascending position (ties,
/// which can occur in the timing feed, are broken by the car number)
/// * `latest_lap_by_competitor` - Most recent lap per car number
/// * `messages` - Race control messages, newest first
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RaceStateSnapshot {
    pub competitors: Vec<Competitor>,
    pub positions: Vec<PositionRecord>,
    pub latest_lap_by_competitor: BTreeMap<u32, LapRecord>,
    pub messages: Vec<RaceControlMessage>,
}

impl RaceStateSnapshot {
    /// new creates the baseline snapshot of a session: the competitors are placed in roster order,
    /// no laps and no messages are known.
    pub fn new(competitors: &[Competitor], now: &str) -> RaceStateSnapshot {
        let positions = competitors
            .iter()
            .enumerate()
            .map(|(i, competitor)| PositionRecord {
                date: now.to_owned(),
                driver_number: competitor.driver_number,
                position: i as u32 + 1,
            })
            .collect();

        RaceStateSnapshot {
            competitors: competitors.to_owned(),
            positions,
            latest_lap_by_competitor: BTreeMap::new(),
            messages: vec![],
        }
    }

    /// apply_event applies a single timeline event to the snapshot. Timestamps of position
    /// updates and messages are set to the processing time `now`. Events of car numbers that are
    /// not part of the roster are ignored.
    pub fn apply_event(&mut self, event: &TimelineEvent, now: &str) -> Applied {
        match &event.payload {
            EventPayload::Position(pos) => {
                let entry = self
                    .positions
                    .iter_mut()
                    .find(|x| x.driver_number == pos.driver_number);

                match entry {
                    Some(entry) => {
                        entry.position = pos.position;
                        entry.date = now.to_owned();
                    }
                    None => return Applied::Ignored,
                }

                self.sort_positions();
                Applied::Position
            }
            EventPayload::Lap(lap) => {
                if self.get_competitor(lap.driver_number).is_none() {
                    return Applied::Ignored;
                }

                self.latest_lap_by_competitor
                    .insert(lap.driver_number, lap.to_owned());
                Applied::Lap
            }
            EventPayload::Message(msg) => {
                self.messages.insert(
                    0,
                    RaceControlMessage {
                        date: now.to_owned(),
                        category: Some(
                            msg.category
                                .to_owned()
                                .unwrap_or_else(|| DEFAULT_MSG_CATEGORY.to_owned()),
                        ),
                        flag: Some(
                            msg.flag
                                .to_owned()
                                .unwrap_or_else(|| DEFAULT_MSG_FLAG.to_owned()),
                        ),
                        message: msg.message.to_owned(),
                    },
                );
                Applied::Message
            }
        }
    }

    /// sort_positions sorts the position entries by position (ties broken by car number).
    pub fn sort_positions(&mut self) {
        self.positions
            .sort_by(|a, b| (a.position, a.driver_number).cmp(&(b.position, b.driver_number)));
    }

    pub fn get_competitor(&self, driver_number: u32) -> Option<&Competitor> {
        self.competitors
            .iter()
            .find(|x| x.driver_number == driver_number)
    }

    pub fn get_position(&self, driver_number: u32) -> Option<u32> {
        self.positions
            .iter()
            .find(|x| x.driver_number == driver_number)
            .map(|x| x.position)
    }

    /// get_position_map returns the current position of every car number.
    pub fn get_position_map(&self) -> HashMap<u32, u32> {
        self.positions
            .iter()
            .map(|x| (x.driver_number, x.position))
            .collect()
    }
}
