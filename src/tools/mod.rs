//! Tools module
//!
//! MCP tool implementations for Solo Leveling Fitness.

pub mod profiles;
pub mod sessions;
pub mod social;
pub mod status;
pub mod tracking;
pub mod workouts;
