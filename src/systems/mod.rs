//! ECS systems that drive a level.
//!
//! Systems are grouped by concern. The level schedule runs them in a fixed
//! order every tick (see [`crate::states::level::build_level_schedule`]).
//!
//! Submodules overview:
//! - [`animal`] – animal movement per state and animal spawning
//! - [`call`] – the observer answering calls
//! - [`gate`] – gate opening and closing
//! - [`input`] – pause and call shortcuts
//! - [`orchestrator`] – owners, deliveries, lives and the end of the level
//! - [`owner`] – owner walking and leaving
//! - [`phase`] – time spent in the current phase
//! - [`player`] – caretaker movement and call expiry
//! - [`time`] – world time update
//! - [`visual`] – display rectangles
//! - [`voice`] – the recognizer thread loop

pub mod animal;
pub mod call;
pub mod gate;
pub mod input;
pub mod orchestrator;
pub mod owner;
pub mod phase;
pub mod player;
pub mod time;
pub mod visual;
pub mod voice;
