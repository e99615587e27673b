use crate::interfaces::renderer_interface::parse_team_colour;
use crate::pre::read_session_data::SessionData;
use crate::pre::sim_opts::SimOpts;
use anyhow::Context;
use helpers::general::InputValueError;
use std::collections::HashSet;

/// check_sim_opts assures that the inserted options are within reasonable limits and raises an
/// error if not.
pub fn check_sim_opts(sim_opts: &SimOpts) -> anyhow::Result<()> {
    if !(1 <= sim_opts.speed && sim_opts.speed <= 10) {
        return Err(InputValueError).context(format!(
            "speed is {}, which is not within the reasonable range of [1, 10]!",
            sim_opts.speed
        ));
    }

    if !(1 <= sim_opts.base_interval_ms && sim_opts.base_interval_ms <= 60000) {
        return Err(InputValueError).context(format!(
            "base_interval_ms is {}ms, which is not within the reasonable range of [1, 60000]ms!",
            sim_opts.base_interval_ms
        ));
    }

    if let Some(no_ticks) = sim_opts.no_ticks {
        if no_ticks < 1 {
            return Err(InputValueError).context(format!(
                "no_ticks must be at least equal to one, but is {}!",
                no_ticks
            ));
        }
    }

    Ok(())
}

/// check_session_data assures that the session data has the shape the replay relies on and
/// raises an error if not. Noisy data that the replay tolerates (malformed timestamps, unknown car
/// numbers, colliding positions) is not rejected here.
pub fn check_session_data(session_data: &SessionData) -> anyhow::Result<()> {
    // DRIVERS -------------------------------------------------------------------------------------
    let no_records =
        session_data.positions.len() + session_data.laps.len() + session_data.messages.len();

    if session_data.drivers.is_empty() && no_records > 0 {
        return Err(InputValueError)
            .context("The session contains records, but the list of drivers is empty!");
    }

    let mut driver_numbers = HashSet::with_capacity(session_data.drivers.len());

    for driver in session_data.drivers.iter() {
        if !driver_numbers.insert(driver.driver_number) {
            return Err(InputValueError).context(format!(
                "Car number {} is contained more than once in the list of drivers!",
                driver.driver_number
            ));
        }

        if let Some(team_colour) = &driver.team_colour {
            parse_team_colour(team_colour).context(format!(
                "The team colour of car {} is invalid!",
                driver.driver_number
            ))?;
        }
    }

    // POSITIONS -----------------------------------------------------------------------------------
    if let Some(pos) = session_data.positions.iter().find(|x| x.position < 1) {
        return Err(InputValueError).context(format!(
            "Position of car {} at {} must be at least equal to one!",
            pos.driver_number, pos.date
        ));
    }

    // LAPS ----------------------------------------------------------------------------------------
    if let Some(lap) = session_data.laps.iter().find(|x| x.lap_number < 1) {
        return Err(InputValueError).context(format!(
            "Lap number of car {} must be at least equal to one!",
            lap.driver_number
        ));
    }

    Ok(())
}
