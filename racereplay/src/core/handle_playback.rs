use crate::core::controller::PlaybackController;
use crate::interfaces::renderer_interface::RenderState;
use crate::pre::read_session_data::SessionData;
use anyhow::Context;
use flume::{Receiver, RecvTimeoutError, Sender};
use log::{debug, info, warn};

/// Command contains the control operations a host application can send to a running playback.
#[derive(Debug)]
pub enum Command {
    LoadData(Box<SessionData>),
    SetRunning(bool),
    ToggleRunning,
    SetSpeed(u32),
    Step,
    Reset,
    Shutdown,
}

/// handle_playback runs the replay of the inserted controller in real-time, i.e. it waits for the
/// controller's timer to become due and ticks the controller then. In between, it handles the
/// commands received from the host. If a sender is inserted, the render state is sent after every
/// tick and every command. While the replay is paused, the loop blocks until the next command
/// arrives. The loop ends (and thereby cancels the timer) if a shutdown command is received or if
/// all command senders were dropped. The paused controller is returned for post-processing.
pub fn handle_playback(
    mut controller: PlaybackController,
    rx: Receiver<Command>,
    tx: Option<&Sender<RenderState>>,
) -> anyhow::Result<PlaybackController> {
    loop {
        // wait for the next command, but not longer than until the next tick is due
        let cmd = match controller.get_next_due() {
            Some(next_due) => match rx.recv_deadline(next_due) {
                Ok(cmd) => Some(cmd),
                Err(RecvTimeoutError::Timeout) => None,
                Err(RecvTimeoutError::Disconnected) => break,
            },
            None => match rx.recv() {
                Ok(cmd) => Some(cmd),
                Err(_) => break,
            },
        };

        match cmd {
            // TICK --------------------------------------------------------------------------------
            None => {
                controller.tick();
            }

            // COMMANDS ----------------------------------------------------------------------------
            Some(Command::Shutdown) => break,
            Some(cmd) => {
                debug!("Received command {:?}", cmd);

                // an invalid command must not stop the playback
                if let Err(e) = handle_command(&mut controller, cmd) {
                    warn!("Ignored command: {:#}", e);
                }
            }
        }

        // update renderer
        if let Some(tx) = tx {
            tx.send(RenderState::from_controller(&controller))
                .context("Failed to send render state to renderer!")?;
        }
    }

    info!("Playback stopped");

    // stop the timer before handing out the controller
    controller.set_running(false);
    Ok(controller)
}

/// handle_command applies a single command (except shutdown) to the controller.
fn handle_command(controller: &mut PlaybackController, cmd: Command) -> anyhow::Result<()> {
    match cmd {
        Command::LoadData(session_data) => controller.load_data(*session_data)?,
        Command::SetRunning(running) => controller.set_running(running),
        Command::ToggleRunning => controller.toggle_running(),
        Command::SetSpeed(speed) => controller.set_speed(speed)?,
        Command::Step => {
            controller.step();
        }
        Command::Reset => controller.reset(),
        Command::Shutdown => {}
    }
    Ok(())
}
