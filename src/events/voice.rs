use crate::components::species::Species;

/// Commands sent *to* the voice recognizer thread
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceCmd {
    /// Begin forwarding detections.
    Start,
    /// Stop forwarding detections (level paused or finished).
    Stop,
    /// The player started or finished a call.
    SetCalling(bool),
    /// A call was detected by the capture front-end.
    Heard(Species),
    Shutdown,
}
