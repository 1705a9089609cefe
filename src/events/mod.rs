//! Events used for decoupled communication between systems.
//!
//! Events are triggered by systems and handled by observers registered on
//! every level world. This keeps producers (input, call polling, the
//! orchestrator) separate from the code that acts on them.
//!
//! Submodules overview:
//! - [`call`] – a call for a species, from the recognizer or a shortcut key
//! - [`gamestate`] – request a state change from inside a level
//! - [`resize`] – the display changed size
//! - [`voice`] – commands sent to the recognizer thread

pub mod call;
pub mod gamestate;
pub mod resize;
pub mod voice;
