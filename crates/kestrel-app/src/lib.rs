//! KESTREL application layer.
//!
//! Drives the simulation engine with a fixed-timestep scheduler and wires it
//! to the input and renderer collaborators.

pub mod error;
pub mod game_loop;
pub mod input;
pub mod render;

pub use kestrel_core as core;
pub use kestrel_sim as sim;
