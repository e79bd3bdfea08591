//! Simulation kernel for KESTREL.
//!
//! Owns the map, the hecs world of map entities, the avatar and its state
//! machine, and runs one fixed simulation step per call to
//! [`SimulationEngine::tick`]. Completely headless and deterministic.

pub mod avatar;
pub mod carried;
pub mod collision;
pub mod components;
pub mod controls;
pub mod engine;
pub mod equipment;
pub mod error;
pub mod map;
pub mod movement;
pub mod services;
pub mod states;
pub mod systems;
pub mod world_setup;

pub use engine::SimulationEngine;

#[cfg(test)]
mod tests;
