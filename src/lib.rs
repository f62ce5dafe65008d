//! Solo Leveling Fitness (slfit) Library
//!
//! Metabolic targets, daily tracking, workouts, and a small social feed,
//! persisted in SQLite and served over MCP.

pub mod build_info;
pub mod config;
pub mod db;
pub mod mcp;
pub mod metabolism;
pub mod models;
pub mod templates;
pub mod tools;
