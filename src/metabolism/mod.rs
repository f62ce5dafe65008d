//! Metabolic calculation module
//!
//! Pure functions mapping biometrics and goals to energy, hydration, and
//! macronutrient targets.

pub mod calculator;
pub mod targets;

pub use calculator::{
    compute_bmr, compute_daily_calories, compute_daily_water, compute_macros, compute_tdee,
    ActivityLevel, Goal, MacroProfile, MacroSplit, Sex,
};
pub use targets::{compute_targets, Biometrics, CalcError, CalcResult, EnergyProfile, Targets};
