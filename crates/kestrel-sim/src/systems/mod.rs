//! Per-step systems operating on the map entities.
//!
//! Systems are plain functions over the hecs world. They never switch the
//! avatar's state themselves: anything that should change it is returned
//! as a [`Transition`](crate::states::Transition) for the engine to apply.

pub mod cleanup;
pub mod detectors;
pub mod ground;
pub mod motion;
pub mod projectiles;
pub mod snapshot;
