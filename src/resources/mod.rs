//! ECS resources available to systems.
//!
//! Resources are global singletons stored in a level world. They hold shared
//! state like configuration, the clock, input, lives and the connection to
//! the call recognizer.
//!
//! Submodules overview:
//! - [`gameconfig`] – settings loaded from `config.ini`
//! - [`gamestate`] – state requests and the pending request latch
//! - [`input`] – per-frame keyboard state
//! - [`levelrng`] – seeded random source of a level
//! - [`levelstatus`] – lives, outcome and redraw requests of a level
//! - [`levelstore`] – the ordered level definitions
//! - [`playfield`] – the fixed regions of the logical screen
//! - [`screenscale`] – logical to display scaling
//! - [`speciesgroups`] – animals still in the level, by species
//! - [`voice`] – the call recognizer bridge and its scripted stand-in
//! - [`worldtime`] – simulation time and delta

pub mod gameconfig;
pub mod gamestate;
pub mod input;
pub mod levelrng;
pub mod levelstatus;
pub mod levelstore;
pub mod playfield;
pub mod screenscale;
pub mod speciesgroups;
pub mod voice;
pub mod worldtime;
