//! Voice call collaborator.
//!
//! Levels talk to speech recognition through the [`CallSource`] trait only:
//! they mirror the player's calling flag into it once per tick and poll it for
//! the most recently recognized species while the player is idle.
//!
//! [`VoiceBridge`] is the threaded implementation: it bridges the ECS world
//! with the background recognizer thread over crossbeam channels, the same
//! way the audio bridge does. Create it once with [`VoiceBridge::spawn`] and
//! stop it with [`VoiceBridge::shutdown`]. [`ScriptedCalls`] is a queue-driven
//! stand-in for tests and headless runs.

use bevy_ecs::prelude::*;
use crossbeam_channel::{Receiver, Sender, unbounded};
use log::{debug, warn};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use crate::components::species::Species;
use crate::events::voice::VoiceCmd;
use crate::systems::voice::recognizer_thread;

/// Source of recognized calls.
pub trait CallSource: Send + Sync {
    /// Tell the recognizer whether a call is in progress.
    fn set_calling(&self, calling: bool);
    fn calling(&self) -> bool;
    /// Most recent recognized species since the last poll. Never blocks.
    fn recognized_call(&self) -> Option<Species>;
    fn start(&self);
    fn stop(&self);
}

/// Resource giving a level world access to the shared call source.
#[derive(Resource, Clone)]
pub struct CallInterface(pub Arc<dyn CallSource>);

impl CallInterface {
    pub fn new(source: Arc<dyn CallSource>) -> Self {
        Self(source)
    }
}

/// Shared bridge between game states and the recognizer thread.
pub struct VoiceBridge {
    tx_cmd: Sender<VoiceCmd>,
    rx_call: Receiver<Species>,
    calling: AtomicBool,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl VoiceBridge {
    /// Spawn the recognizer thread and connect its channels.
    pub fn spawn() -> Self {
        let (tx_cmd, rx_cmd) = unbounded::<VoiceCmd>();
        let (tx_call, rx_call) = unbounded::<Species>();

        let handle = std::thread::spawn(move || recognizer_thread(rx_cmd, tx_call));

        Self {
            tx_cmd,
            rx_call,
            calling: AtomicBool::new(false),
            handle: Mutex::new(Some(handle)),
        }
    }

    /// Feed a detection into the recognizer, as the capture front-end would.
    pub fn hear(&self, species: Species) {
        self.send(VoiceCmd::Heard(species));
    }

    /// Request shutdown of the recognizer thread and join it.
    pub fn shutdown(&self) {
        self.send(VoiceCmd::Shutdown);
        let handle = match self.handle.lock() {
            Ok(mut guard) => guard.take(),
            Err(_) => None,
        };
        if let Some(handle) = handle {
            if handle.join().is_err() {
                warn!("Voice recognizer thread panicked");
            }
        }
    }

    fn send(&self, cmd: VoiceCmd) {
        // ignore send error after shutdown
        let _ = self.tx_cmd.send(cmd);
    }
}

impl CallSource for VoiceBridge {
    fn set_calling(&self, calling: bool) {
        if self.calling.swap(calling, Ordering::Relaxed) != calling {
            self.send(VoiceCmd::SetCalling(calling));
        }
    }

    fn calling(&self) -> bool {
        self.calling.load(Ordering::Relaxed)
    }

    fn recognized_call(&self) -> Option<Species> {
        self.rx_call.try_iter().last()
    }

    fn start(&self) {
        self.send(VoiceCmd::Start);
    }

    fn stop(&self) {
        self.send(VoiceCmd::Stop);
        let dropped = self.rx_call.try_iter().count();
        if dropped > 0 {
            debug!("Dropped {} pending calls on stop", dropped);
        }
    }
}

/// Queue-driven call source.
///
/// Pushed species are handed out one per poll while the source is started.
/// Start/stop calls are counted so callers can assert on them.
#[derive(Default)]
pub struct ScriptedCalls {
    queue: Mutex<VecDeque<Species>>,
    calling: AtomicBool,
    listening: AtomicBool,
    starts: AtomicUsize,
    stops: AtomicUsize,
}

impl ScriptedCalls {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, species: Species) {
        if let Ok(mut queue) = self.queue.lock() {
            queue.push_back(species);
        }
    }

    pub fn pending(&self) -> usize {
        self.queue.lock().map(|q| q.len()).unwrap_or(0)
    }

    pub fn is_listening(&self) -> bool {
        self.listening.load(Ordering::Relaxed)
    }

    pub fn starts(&self) -> usize {
        self.starts.load(Ordering::Relaxed)
    }

    pub fn stops(&self) -> usize {
        self.stops.load(Ordering::Relaxed)
    }
}

impl CallSource for ScriptedCalls {
    fn set_calling(&self, calling: bool) {
        self.calling.store(calling, Ordering::Relaxed);
    }

    fn calling(&self) -> bool {
        self.calling.load(Ordering::Relaxed)
    }

    fn recognized_call(&self) -> Option<Species> {
        if !self.is_listening() {
            return None;
        }
        self.queue.lock().ok()?.pop_front()
    }

    fn start(&self) {
        self.listening.store(true, Ordering::Relaxed);
        self.starts.fetch_add(1, Ordering::Relaxed);
    }

    fn stop(&self) {
        self.listening.store(false, Ordering::Relaxed);
        self.stops.fetch_add(1, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    fn wait_for_call(bridge: &VoiceBridge) -> Option<Species> {
        let deadline = Instant::now() + Duration::from_secs(2);
        while Instant::now() < deadline {
            if let Some(species) = bridge.recognized_call() {
                return Some(species);
            }
            std::thread::sleep(Duration::from_millis(5));
        }
        None
    }

    #[test]
    fn bridge_forwards_detections_only_while_started() {
        let bridge = VoiceBridge::spawn();
        bridge.hear(Species::Dog);
        bridge.start();
        bridge.hear(Species::Cat);
        assert_eq!(wait_for_call(&bridge), Some(Species::Cat));
        bridge.shutdown();
    }

    #[test]
    fn bridge_drops_detections_while_calling() {
        let bridge = VoiceBridge::spawn();
        bridge.start();
        bridge.set_calling(true);
        bridge.hear(Species::Pig);
        bridge.set_calling(false);
        bridge.hear(Species::Sheep);
        assert_eq!(wait_for_call(&bridge), Some(Species::Sheep));
        bridge.shutdown();
    }

    #[test]
    fn scripted_calls_wait_for_start() {
        let calls = ScriptedCalls::new();
        calls.push(Species::Cow);
        assert_eq!(calls.recognized_call(), None);
        calls.start();
        assert_eq!(calls.recognized_call(), Some(Species::Cow));
        assert_eq!(calls.recognized_call(), None);
        assert_eq!(calls.starts(), 1);
    }
}
