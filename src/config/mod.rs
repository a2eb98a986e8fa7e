//! Configuration and parameters
//!
//! Observed default constants and the simulation configuration.

pub mod constants;
pub mod simulation_config;

pub use constants::*;
pub use simulation_config::*;
