use crate::core::best_times::BestTimeTracker;
use crate::core::competitor::Competitor;
use crate::core::cursor::PlaybackCursor;
use crate::core::position_delta::{classify_snapshot, PositionDelta};
use crate::core::snapshot::RaceStateSnapshot;
use crate::core::timeline::build_timeline;
use crate::pre::check_sim_opts_session::check_session_data;
use crate::pre::read_session_data::SessionData;
use anyhow::Context;
use chrono::Utc;
use helpers::general::InputValueError;
use helpers::timestamp::format_timestamp;
use log::{debug, info, warn};
use std::collections::HashMap;
use std::fmt;
use std::time::{Duration, Instant};

/// (ms) Tick period at speed 1.
pub const BASE_INTERVAL_MS: u64 = 2000;

/// (ms) Lower limit of the tick period, e.g. for very high speeds.
pub const MIN_PERIOD_MS: u64 = 1;

/// Maximum number of timeline events that are consumed per tick.
pub const MAX_BATCH_SIZE: u32 = 3;

/// MessageHook is called with the text of every race control message that is replayed.
pub type MessageHook = Box<dyn FnMut(&str) + Send>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Running,
    Paused,
}

/// Timer describes the single periodic schedule of the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timer {
    pub period: Duration,
    pub next_due: Instant,
}

/// The PlaybackController replays a session. It owns the playback cursor, the current snapshot
/// and all derived state (best times, previous positions), and contains a small statemachine:
///
/// * `Running` -> a single periodic timer is armed, every due tick advances the replay
/// * `Paused` -> no timer is armed, the replay only advances by manual steps
///
/// The timer period is `base_interval / speed` and each tick consumes `min(speed, 3)` events. The
/// controller does not sleep itself: the owner of the controller waits until the timer is due
/// (see `handle_playback`) and calls `tick`.
pub struct PlaybackController {
    base_interval: Duration,
    run_state: RunState,
    speed: u32,
    timer: Option<Timer>,
    roster: Vec<Competitor>,
    cursor: PlaybackCursor,
    snapshot: RaceStateSnapshot,
    prev_positions: HashMap<u32, u32>,
    best_times: BestTimeTracker,
    message_hook: Option<MessageHook>,
}

impl PlaybackController {
    /// new creates a controller without data. The controller starts in the running state (ticks
    /// are no-ops until data is loaded).
    pub fn new(base_interval: Duration) -> PlaybackController {
        let mut controller = PlaybackController {
            base_interval,
            run_state: RunState::Running,
            speed: 1,
            timer: None,
            roster: vec![],
            cursor: PlaybackCursor::default(),
            snapshot: RaceStateSnapshot::default(),
            prev_positions: HashMap::new(),
            best_times: BestTimeTracker::new(),
            message_hook: None,
        };
        controller.arm_timer();
        controller
    }

    /// set_message_hook sets the callback that is called for every replayed race control
    /// message.
    pub fn set_message_hook(&mut self, message_hook: MessageHook) {
        self.message_hook = Some(message_hook)
    }

    // ---------------------------------------------------------------------------------------------
    // DATA HANDLING -------------------------------------------------------------------------------
    // ---------------------------------------------------------------------------------------------

    /// load_data replaces the session data, builds the new timeline, and resets the replay such
    /// that no stale index or derived state is applied to the new timeline. Invalid session data
    /// is rejected before any state is replaced.
    pub fn load_data(&mut self, session_data: SessionData) -> anyhow::Result<()> {
        check_session_data(&session_data).context("Rejected session data!")?;

        let timeline = build_timeline(
            &session_data.positions,
            &session_data.laps,
            &session_data.messages,
        );

        info!(
            "Loaded {} drivers, {} position updates, {} laps and {} messages ({} timeline events)",
            session_data.drivers.len(),
            session_data.positions.len(),
            session_data.laps.len(),
            session_data.messages.len(),
            timeline.len()
        );

        self.roster = session_data.drivers;
        self.cursor = PlaybackCursor::new(timeline);
        self.reset();
        Ok(())
    }

    /// initialize creates the snapshot at the beginning of the timeline: all competitors are
    /// placed in roster order, then all events sharing the earliest timestamp are replayed. Best
    /// times are cleared and the previous positions are set to the resulting positions.
    pub fn initialize(&mut self) {
        self.cursor.rewind();
        self.best_times.clear();

        let now = format_timestamp(&Utc::now());
        let snapshot = RaceStateSnapshot::new(&self.roster, &now);
        let batch_size = self.cursor.get_initial_slice_len();

        self.snapshot = self.advance(&snapshot, batch_size);
        self.prev_positions = self.snapshot.get_position_map();
    }

    /// reset cancels the timer, clears all derived state, re-initializes the snapshot, and
    /// restarts the timer at the current speed if the replay is running.
    pub fn reset(&mut self) {
        self.cancel_timer();
        self.prev_positions.clear();
        self.initialize();

        if matches!(self.run_state, RunState::Running) {
            self.arm_timer();
        }

        info!("Reset replay to the beginning of the timeline");
    }

    // ---------------------------------------------------------------------------------------------
    // PLAYBACK ------------------------------------------------------------------------------------
    // ---------------------------------------------------------------------------------------------

    /// tick is called when the timer is due. It advances the replay by one batch and schedules
    /// the next tick. Ticks are ignored while paused, and they are no-ops if no data is loaded.
    pub fn tick(&mut self) -> bool {
        if !matches!(self.run_state, RunState::Running) {
            return false;
        }

        // schedule next tick (relative to the planned time to avoid drift)
        if let Some(timer) = self.timer.as_mut() {
            let now = Instant::now();
            timer.next_due += timer.period;

            if timer.next_due < now {
                warn!("Could not keep up with the tick period!");
                timer.next_due = now + timer.period;
            }
        }

        self.step_batch()
    }

    /// step advances the replay by one batch independent of the run state. The timer is not
    /// affected.
    pub fn step(&mut self) -> bool {
        self.step_batch()
    }

    fn step_batch(&mut self) -> bool {
        if self.cursor.is_empty() || self.roster.is_empty() {
            return false;
        }

        // store current positions to be able to determine the position deltas afterwards
        self.prev_positions = self.snapshot.get_position_map();

        let batch_size = self.get_batch_size() as usize;
        let snapshot = std::mem::take(&mut self.snapshot);
        self.snapshot = self.advance(&snapshot, batch_size);

        debug!(
            "Tick at timeline index {} of {}",
            self.cursor.get_idx(),
            self.cursor.len()
        );
        true
    }

    /// advance passes the snapshot through the cursor, the message hook is forwarded if set.
    fn advance(&mut self, snapshot: &RaceStateSnapshot, batch_size: usize) -> RaceStateSnapshot {
        let now = format_timestamp(&Utc::now());
        let mut no_hook = |_: &str| {};
        let notify: &mut dyn FnMut(&str) = match self.message_hook.as_mut() {
            Some(hook) => &mut **hook,
            None => &mut no_hook,
        };

        self.cursor
            .advance(snapshot, batch_size, &mut self.best_times, notify, &now)
    }

    // ---------------------------------------------------------------------------------------------
    // RUN STATE AND SPEED -------------------------------------------------------------------------
    // ---------------------------------------------------------------------------------------------

    /// set_running starts or pauses the replay. Starting always re-creates the timer such that
    /// only a single timer exists.
    pub fn set_running(&mut self, running: bool) {
        if running {
            self.run_state = RunState::Running;
            self.arm_timer();
        } else {
            self.run_state = RunState::Paused;
            self.cancel_timer();
        }
        debug!("Run state is now {:?}", self.run_state);
    }

    pub fn toggle_running(&mut self) {
        self.set_running(!matches!(self.run_state, RunState::Running))
    }

    /// set_speed sets the speed multiplier, which must be at least one. The run state does not
    /// change, an armed timer is re-created with the new period.
    pub fn set_speed(&mut self, speed: u32) -> anyhow::Result<()> {
        if speed < 1 {
            return Err(InputValueError)
                .context(format!("speed must be at least one, but is {}!", speed));
        }

        self.speed = speed;

        if self.timer.is_some() {
            self.arm_timer();
        }
        debug!("Speed is now {} (tick period {:?})", speed, self.get_period());
        Ok(())
    }

    /// get_period returns the tick period at the current speed (at least MIN_PERIOD_MS).
    pub fn get_period(&self) -> Duration {
        (self.base_interval / self.speed).max(Duration::from_millis(MIN_PERIOD_MS))
    }

    /// get_batch_size returns the number of events consumed per tick at the current speed.
    pub fn get_batch_size(&self) -> u32 {
        self.speed.min(MAX_BATCH_SIZE)
    }

    /// arm_timer cancels an existing timer and creates a new one with the current period.
    fn arm_timer(&mut self) {
        self.cancel_timer();

        let period = self.get_period();
        self.timer = Some(Timer {
            period,
            next_due: Instant::now() + period,
        });
    }

    fn cancel_timer(&mut self) {
        self.timer = None;
    }

    // ---------------------------------------------------------------------------------------------
    // GETTERS -------------------------------------------------------------------------------------
    // ---------------------------------------------------------------------------------------------

    pub fn get_snapshot(&self) -> &RaceStateSnapshot {
        &self.snapshot
    }

    pub fn get_run_state(&self) -> RunState {
        self.run_state
    }

    pub fn get_speed(&self) -> u32 {
        self.speed
    }

    pub fn get_timer(&self) -> Option<&Timer> {
        self.timer.as_ref()
    }

    /// get_next_due returns the time at which the next tick is due (None while paused).
    pub fn get_next_due(&self) -> Option<Instant> {
        self.timer.map(|timer| timer.next_due)
    }

    pub fn get_cursor(&self) -> &PlaybackCursor {
        &self.cursor
    }

    pub fn get_best_times(&self) -> &BestTimeTracker {
        &self.best_times
    }

    pub fn get_prev_positions(&self) -> &HashMap<u32, u32> {
        &self.prev_positions
    }

    /// get_position_deltas returns the position delta of every driver (in running order) between
    /// the previous and the current snapshot.
    pub fn get_position_deltas(&self) -> Vec<(u32, PositionDelta)> {
        classify_snapshot(&self.prev_positions, &self.snapshot)
    }
}

impl fmt::Debug for PlaybackController {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("PlaybackController")
            .field("base_interval", &self.base_interval)
            .field("run_state", &self.run_state)
            .field("speed", &self.speed)
            .field("timer", &self.timer)
            .field("cursor_idx", &self.cursor.get_idx())
            .field("timeline_len", &self.cursor.len())
            .field("snapshot", &self.snapshot)
            .finish()
    }
}

impl Drop for PlaybackController {
    fn drop(&mut self) {
        if self.timer.take().is_some() {
            debug!("Cancelled active timer on teardown");
        }
    }
}
