use crate::core::best_times::LapClassification;
use crate::core::controller::{PlaybackController, RunState};
use crate::core::position_delta::PositionDelta;
use crate::core::records::{LapRecord, RaceControlMessage};
use anyhow::Context;
use css_color_parser;
use helpers::general::InputValueError;

/// Maximum number of race control messages handed to the renderer (newest first).
pub const MAX_RENDERED_MESSAGES: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RgbColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl RgbColor {
    pub const WHITE: RgbColor = RgbColor {
        r: 255,
        g: 255,
        b: 255,
    };
}

impl Default for RgbColor {
    fn default() -> Self {
        RgbColor::WHITE
    }
}

/// parse_team_colour converts a hex color as delivered by the timing feed (e.g. 3671C6, with or
/// without leading #) into a rgb color.
pub fn parse_team_colour(hex: &str) -> anyhow::Result<RgbColor> {
    let hex = hex.trim();

    if hex.is_empty() {
        return Err(InputValueError).context("Team colour is empty!");
    }

    let tmp_color = if hex.starts_with('#') {
        hex.parse::<css_color_parser::Color>()
    } else {
        format!("#{}", hex).parse::<css_color_parser::Color>()
    }
    .context(format!("Could not parse hex color {}!", hex))?;

    Ok(RgbColor {
        r: tmp_color.r,
        g: tmp_color.g,
        b: tmp_color.b,
    })
}

/// CompetitorRow contains everything that is shown for a driver in the running order.
#[derive(Debug, Clone, PartialEq)]
pub struct CompetitorRow {
    pub driver_number: u32,
    pub display_name: String,
    pub team_name: String,
    pub color: RgbColor,
    pub position: u32,
    pub position_delta: PositionDelta,
    pub latest_lap: Option<LapRecord>,
    pub lap_classification: Option<LapClassification>,
}

/// RenderState is sent to the renderer after every tick.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderState {
    pub rows: Vec<CompetitorRow>,
    pub messages: Vec<RaceControlMessage>,
    pub run_state: RunState,
    pub speed: u32,
    pub cursor_idx: usize,
    pub timeline_len: usize,
}

impl RenderState {
    /// from_controller creates the render state for the current snapshot of the controller. The
    /// latest lap of every driver is classified against the current best times.
    pub fn from_controller(controller: &PlaybackController) -> RenderState {
        let snapshot = controller.get_snapshot();
        let best_times = controller.get_best_times();

        let rows = controller
            .get_position_deltas()
            .into_iter()
            .zip(snapshot.positions.iter())
            .map(|((driver_number, position_delta), position)| {
                let competitor = snapshot.get_competitor(driver_number);
                let latest_lap = snapshot
                    .latest_lap_by_competitor
                    .get(&driver_number)
                    .cloned();

                // unknown or unparsable colors are shown in white
                let color = competitor
                    .and_then(|x| x.team_colour.as_deref())
                    .and_then(|x| parse_team_colour(x).ok())
                    .unwrap_or_default();

                CompetitorRow {
                    driver_number,
                    display_name: competitor
                        .map(|x| x.display_name())
                        .unwrap_or_else(|| format!("#{}", driver_number)),
                    team_name: competitor
                        .and_then(|x| x.team_name.to_owned())
                        .unwrap_or_default(),
                    color,
                    position: position.position,
                    position_delta,
                    lap_classification: latest_lap.as_ref().map(|x| best_times.classify(x)),
                    latest_lap,
                }
            })
            .collect();

        RenderState {
            rows,
            messages: snapshot
                .messages
                .iter()
                .take(MAX_RENDERED_MESSAGES)
                .cloned()
                .collect(),
            run_state: controller.get_run_state(),
            speed: controller.get_speed(),
            cursor_idx: controller.get_cursor().get_idx(),
            timeline_len: controller.get_cursor().len(),
        }
    }
}
