use anyhow::Context;
use clap::Parser;
use flume;
use helpers::general::format_laptime;
use log::LevelFilter;
use racereplay::core::controller::PlaybackController;
use racereplay::core::handle_playback::{handle_playback, Command};
use racereplay::core::position_delta::PositionDelta;
use racereplay::interfaces::renderer_interface::RenderState;
use racereplay::post::standings::Standings;
use racereplay::pre::check_sim_opts_session::{check_session_data, check_sim_opts};
use racereplay::pre::read_session_data::read_session_data;
use racereplay::pre::sim_opts::SimOpts;
use std::fs::File;
use std::thread;
use std::time::{Duration, Instant};

fn main() -> anyhow::Result<()> {
    // PRE-PROCESSING ------------------------------------------------------------------------------
    // get replay options from the command line arguments and read the session data
    let sim_opts: SimOpts = SimOpts::parse();

    env_logger::Builder::from_default_env()
        .filter_level(if sim_opts.debug {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        })
        .init();

    let session_data = read_session_data(sim_opts.session_path.as_path())?;

    // check replay options and session data
    check_sim_opts(&sim_opts)?;
    check_session_data(&session_data)?;

    // print replay details
    println!(
        "INFO: Replaying {} with {} drivers at speed {} (tick period {}ms)",
        sim_opts.session_path.display(),
        session_data.drivers.len(),
        sim_opts.speed,
        sim_opts.base_interval_ms / sim_opts.speed as u64
    );

    // set up controller
    let mut controller = PlaybackController::new(Duration::from_millis(sim_opts.base_interval_ms));
    controller.set_speed(sim_opts.speed)?;
    controller.set_message_hook(Box::new(|msg: &str| println!("RACE CONTROL: {}", msg)));
    controller.load_data(session_data)?;

    // play the timeline once if the number of ticks is not given
    let no_ticks = match sim_opts.no_ticks {
        Some(no_ticks) => no_ticks,
        None => {
            let cursor = controller.get_cursor();
            let no_events_left = (cursor.len() - cursor.get_idx()) as u32;
            let batch_size = controller.get_batch_size();
            ((no_events_left + batch_size - 1) / batch_size).max(1)
        }
    };

    // EXECUTION -----------------------------------------------------------------------------------
    let t_start = Instant::now();

    let controller = if !sim_opts.realtime {
        // BACK-TO-BACK CASE -----------------------------------------------------------------------
        for _ in 0..no_ticks {
            controller.tick();
        }
        controller
    } else {
        // REAL-TIME CASE --------------------------------------------------------------------------
        // create channels for the communication between host and playback
        let (cmd_tx, cmd_rx) = flume::unbounded();
        let (render_tx, render_rx) = flume::unbounded();

        // the playback thread owns the controller until it is shut down
        let handle = thread::spawn(move || handle_playback(controller, cmd_rx, Some(&render_tx)));

        for _ in 0..no_ticks {
            let render_state = render_rx
                .recv()
                .context("Playback stopped before all ticks were played!")?;
            print_render_state(&render_state);
        }

        cmd_tx
            .send(Command::Shutdown)
            .context("Failed to send shutdown command to playback!")?;

        match handle.join() {
            Ok(controller) => controller?,
            Err(_) => anyhow::bail!("Playback thread panicked!"),
        }
    };

    println!(
        "INFO: Execution time (total): {}ms",
        t_start.elapsed().as_millis()
    );

    // POST-PROCESSING -----------------------------------------------------------------------------
    // print results
    Standings::new(controller.get_snapshot(), controller.get_best_times()).print_standings();

    // write final snapshot
    if let Some(output_path) = sim_opts.output_path.as_ref() {
        let fh = File::create(output_path).context(format!(
            "Failed to create output file {}!",
            output_path.display()
        ))?;
        serde_json::to_writer_pretty(fh, controller.get_snapshot()).context(format!(
            "Failed to write snapshot to {}!",
            output_path.display()
        ))?;
        println!("INFO: Wrote final snapshot to {}", output_path.display());
    }

    Ok(())
}

/// print_render_state prints the running order of a render state to the console output.
fn print_render_state(render_state: &RenderState) {
    println!(
        "INFO: Timeline event {} of {} ({:?}, speed {})",
        render_state.cursor_idx,
        render_state.timeline_len,
        render_state.run_state,
        render_state.speed
    );

    for row in render_state.rows.iter() {
        let delta = match row.position_delta {
            PositionDelta::Improved => "^",
            PositionDelta::Worsened => "v",
            PositionDelta::Unchanged => " ",
        };

        println!(
            "{:3}{} {:>4} {:<20} {:>9}",
            row.position,
            delta,
            row.display_name,
            row.team_name,
            format_laptime(row.latest_lap.as_ref().and_then(|x| x.lap_duration))
        );
    }
}
