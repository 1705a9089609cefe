//! ECS components for entities.
//!
//! This module groups all component types that can be attached to entities in
//! a level world. Components hold data; the behavior lives in
//! [`crate::systems`].
//!
//! Submodules overview:
//! - [`animal`] – a free-roaming animal, its owner and its markers
//! - [`animation`] – frame cycling and horizontal flip of a sprite
//! - [`boxcollider`] – axis-aligned rectangular collider
//! - [`collisionmask`] – per-pixel occupancy used by the call circle
//! - [`gate`] – the gate between the play area and the owners' lane
//! - [`indicator`] – markers and speech bubbles that follow an entity
//! - [`mapposition`] – logical position (top-left) for an entity
//! - [`owner`] – an owner coming to pick up an animal
//! - [`phase`] – generic state machine component with time in phase
//! - [`player`] – the caretaker and its call circle
//! - [`rigidbody`] – velocity and speed of moving entities
//! - [`species`] – the kinds of animals
//! - [`visual`] – display rectangle and redraw flag

pub mod animal;
pub mod animation;
pub mod boxcollider;
pub mod collisionmask;
pub mod gate;
pub mod indicator;
pub mod mapposition;
pub mod owner;
pub mod phase;
pub mod player;
pub mod rigidbody;
pub mod species;
pub mod visual;
