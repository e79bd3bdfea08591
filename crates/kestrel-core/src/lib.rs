//! Core types and definitions for the KESTREL simulation kernel.
//!
//! This crate defines the vocabulary shared across the other crates:
//! geometry, enums, commands, events, frame snapshots, configuration, errors
//! and the clock.
//! It holds no simulation logic and depends on no runtime framework.

pub mod clock;
pub mod commands;
pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod state;
pub mod types;

#[cfg(test)]
mod tests;
