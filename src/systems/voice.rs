//! Background voice recognizer thread.
//!
//! [`recognizer_thread`] runs on its own OS thread and owns the recognition
//! state. It reacts to [`VoiceCmd`] inputs and forwards every accepted
//! detection on the outgoing channel. Detections are dropped while the
//! recognizer is stopped and while the player is in the middle of a call.
//!
//! See also: [`crate::resources::voice::VoiceBridge`].

use crossbeam_channel::{Receiver, Sender};
use log::{debug, info};

use crate::components::species::Species;
use crate::events::voice::VoiceCmd;

/// Entry point of the dedicated recognizer thread.
///
/// Blocks on the command channel until it receives [`VoiceCmd::Shutdown`] or
/// every sender is gone.
pub fn recognizer_thread(rx_cmd: Receiver<VoiceCmd>, tx_call: Sender<Species>) {
    info!(
        "voice recognizer starting (id={:?})",
        std::thread::current().id()
    );

    let mut listening = false;
    let mut calling = false;

    for cmd in rx_cmd.iter() {
        match cmd {
            VoiceCmd::Start => {
                debug!("voice: start");
                listening = true;
            }
            VoiceCmd::Stop => {
                debug!("voice: stop");
                listening = false;
            }
            VoiceCmd::SetCalling(value) => calling = value,
            VoiceCmd::Heard(species) => {
                if listening && !calling {
                    debug!("voice: recognized '{}'", species);
                    if tx_call.send(species).is_err() {
                        break;
                    }
                } else {
                    debug!(
                        "voice: dropped '{}' (listening={}, calling={})",
                        species, listening, calling
                    );
                }
            }
            VoiceCmd::Shutdown => break,
        }
    }

    info!("voice recognizer stopped");
}
