//! Validated target computation
//!
//! Runs the full BMR -> TDEE -> calories -> macros pipeline for user-supplied
//! biometrics, rejecting inputs the formulas cannot meaningfully handle.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::calculator::{
    compute_bmr, compute_daily_calories, compute_daily_water, compute_macros, compute_tdee,
    ActivityLevel, Goal, MacroProfile, Sex,
};

/// Calculator input errors
#[derive(Debug, Error, PartialEq)]
pub enum CalcError {
    #[error("Invalid {field}: {value} (must be greater than 0 and at most {max})")]
    InvalidInput { field: &'static str, value: f64, max: f64 },
}

pub type CalcResult<T> = Result<T, CalcError>;

/// Body measurements used by the calculator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Biometrics {
    pub weight_kg: f64,
    pub height_cm: f64,
    pub age_years: u32,
    #[serde(default)]
    pub sex: Sex,
}

/// Upper bounds accepted for each biometric
pub const MAX_WEIGHT_KG: f64 = 500.0;
pub const MAX_HEIGHT_CM: f64 = 300.0;
pub const MAX_AGE_YEARS: u32 = 150;

impl Biometrics {
    pub fn validate(&self) -> CalcResult<()> {
        check_range("weight_kg", self.weight_kg, MAX_WEIGHT_KG)?;
        check_range("height_cm", self.height_cm, MAX_HEIGHT_CM)?;
        check_range("age_years", f64::from(self.age_years), f64::from(MAX_AGE_YEARS))?;
        Ok(())
    }
}

fn check_range(field: &'static str, value: f64, max: f64) -> CalcResult<()> {
    if value.is_finite() && value > 0.0 && value <= max {
        Ok(())
    } else {
        Err(CalcError::InvalidInput { field, value, max })
    }
}

/// Energy figures derived from biometrics, activity, and goal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnergyProfile {
    pub bmr: f64,
    pub tdee: i64,
    pub daily_calories: i64,
}

/// Everything the dashboard needs as daily targets
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Targets {
    pub energy: EnergyProfile,
    pub macros: MacroProfile,
    pub daily_water_ml: i64,
}

/// Compute daily targets after validating the biometrics
pub fn compute_targets(
    biometrics: &Biometrics,
    activity_level: ActivityLevel,
    goal: Goal,
) -> CalcResult<Targets> {
    biometrics.validate()?;

    let bmr = compute_bmr(
        biometrics.weight_kg,
        biometrics.height_cm,
        biometrics.age_years,
        biometrics.sex,
    );
    let tdee = compute_tdee(bmr, activity_level);
    let daily_calories = compute_daily_calories(tdee as f64, goal);

    Ok(Targets {
        energy: EnergyProfile { bmr, tdee, daily_calories },
        macros: compute_macros(daily_calories, goal),
        daily_water_ml: compute_daily_water(biometrics.weight_kg),
    })
}
