//! Animal Daycare library.
//!
//! This module exposes the game's ECS components, resources, systems, events
//! and states for use by the binary, in integration tests, and by other
//! front-ends that bring their own rendering and audio capture.

pub mod components;
pub mod events;
pub mod game;
pub mod geometry;
pub mod resources;
pub mod states;
pub mod systems;
