//! Command implementations for the netviz CLI
//!
//! Each command module provides a `run` function that executes the command logic.

pub mod import;
pub mod nodes;
pub mod render;
