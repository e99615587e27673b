use crate::core::best_times::BestTimeTracker;
use crate::core::snapshot::{Applied, RaceStateSnapshot};
use crate::core::timeline::{get_initial_slice_len, EventPayload, TimelineEvent};
use log::debug;

/// PlaybackCursor holds the merged timeline and the index of the next event to be replayed. The
/// index is always in [0, timeline length): as soon as the last event is consumed, the cursor
/// wraps around to the beginning of the timeline such that the replay loops.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaybackCursor {
    timeline: Vec<TimelineEvent>,
    idx: usize,
}

impl PlaybackCursor {
    pub fn new(timeline: Vec<TimelineEvent>) -> PlaybackCursor {
        PlaybackCursor { timeline, idx: 0 }
    }

    /// advance consumes up to batch_size events starting at the current index (fewer if the end of
    /// the timeline is reached first), and applies them in order to a copy of the inserted
    /// snapshot, which is returned afterwards. Lap events are fed into the best time tracker
    /// before they are stored. The notify callback is called exactly once for every consumed race
    /// control message (with the message text). A batch never continues across the end of the
    /// timeline, the index is set back to zero instead.
    pub fn advance(
        &mut self,
        snapshot: &RaceStateSnapshot,
        batch_size: usize,
        best_times: &mut BestTimeTracker,
        notify: &mut dyn FnMut(&str),
        now: &str,
    ) -> RaceStateSnapshot {
        let mut new_snapshot = snapshot.to_owned();

        if self.timeline.is_empty() || batch_size == 0 {
            return new_snapshot;
        }

        let idx_end = (self.idx + batch_size).min(self.timeline.len());

        for event in self.timeline[self.idx..idx_end].iter() {
            // best times must only consider laps that are stored in the snapshot
            if let EventPayload::Lap(lap) = &event.payload {
                if new_snapshot.get_competitor(lap.driver_number).is_some() {
                    best_times.observe(lap);
                }
            }

            match new_snapshot.apply_event(event, now) {
                Applied::Message => {
                    if let EventPayload::Message(msg) = &event.payload {
                        notify(&msg.message)
                    }
                }
                Applied::Ignored => debug!(
                    "Ignored {:?} event of an unknown car number at {}",
                    event.kind(),
                    event.timestamp
                ),
                _ => {}
            }
        }

        debug!(
            "Consumed timeline events {}..{} of {}",
            self.idx,
            idx_end,
            self.timeline.len()
        );

        // wrap around if the end of the timeline was reached
        self.idx = if idx_end >= self.timeline.len() {
            0
        } else {
            idx_end
        };

        new_snapshot
    }

    /// rewind sets the cursor back to the beginning of the timeline.
    pub fn rewind(&mut self) {
        self.idx = 0
    }

    pub fn get_idx(&self) -> usize {
        self.idx
    }

    pub fn len(&self) -> usize {
        self.timeline.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timeline.is_empty()
    }

    pub fn get_timeline(&self) -> &[TimelineEvent] {
        &self.timeline
    }

    /// get_initial_slice_len returns the number of events that share the earliest timestamp.
    pub fn get_initial_slice_len(&self) -> usize {
        get_initial_slice_len(&self.timeline)
    }
}
