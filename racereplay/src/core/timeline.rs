use crate::core::records::{LapRecord, PositionRecord, RaceControlMessage};
use chrono::{DateTime, Utc};
use helpers::timestamp::parse_timestamp;
use log::{debug, warn};
use rayon::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Position,
    Lap,
    Message,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EventPayload {
    Position(PositionRecord),
    Lap(LapRecord),
    Message(RaceControlMessage),
}

/// TimelineEvent is a single record of one of the three data sources together with its parsed
/// timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineEvent {
    pub timestamp: DateTime<Utc>,
    pub payload: EventPayload,
}

impl TimelineEvent {
    pub fn kind(&self) -> EventKind {
        match self.payload {
            EventPayload::Position(_) => EventKind::Position,
            EventPayload::Lap(_) => EventKind::Lap,
            EventPayload::Message(_) => EventKind::Message,
        }
    }
}

/// build_timeline merges position updates, lap records and race control messages into a single
/// timeline that is sorted by ascending timestamp. Laps are placed at their start time. The sort
/// is stable, i.e. events with equal timestamps keep the order positions -> laps -> messages and,
/// within a source, the order of the source array. Records whose timestamp cannot be parsed cannot
/// be placed on the timeline and are skipped.
pub fn build_timeline(
    positions: &[PositionRecord],
    laps: &[LapRecord],
    messages: &[RaceControlMessage],
) -> Vec<TimelineEvent> {
    let no_records = positions.len() + laps.len() + messages.len();
    let mut timeline: Vec<TimelineEvent> = Vec::with_capacity(no_records);

    // tag the records of all sources (parallel collection keeps the source order)
    timeline.par_extend(positions.par_iter().filter_map(|x| {
        parse_timestamp(&x.date).map(|timestamp| TimelineEvent {
            timestamp,
            payload: EventPayload::Position(x.to_owned()),
        })
    }));

    timeline.par_extend(laps.par_iter().filter_map(|x| {
        x.date_start
            .as_deref()
            .and_then(parse_timestamp)
            .map(|timestamp| TimelineEvent {
                timestamp,
                payload: EventPayload::Lap(x.to_owned()),
            })
    }));

    timeline.par_extend(messages.par_iter().filter_map(|x| {
        parse_timestamp(&x.date).map(|timestamp| TimelineEvent {
            timestamp,
            payload: EventPayload::Message(x.to_owned()),
        })
    }));

    let no_skipped = no_records - timeline.len();
    if no_skipped > 0 {
        warn!(
            "Skipped {} of {} records with a malformed timestamp",
            no_skipped, no_records
        );
    }

    // par_sort_by_key is a stable sort
    timeline.par_sort_by_key(|event| event.timestamp);

    debug!("Built timeline with {} events", timeline.len());
    timeline
}

/// get_initial_slice_len returns the number of leading events that share the earliest timestamp
/// of the timeline.
pub fn get_initial_slice_len(timeline: &[TimelineEvent]) -> usize {
    match timeline.first() {
        Some(first) => timeline
            .iter()
            .take_while(|event| event.timestamp == first.timestamp)
            .count(),
        None => 0,
    }
}
