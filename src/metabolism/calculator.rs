//! Metabolic formulas
//!
//! Closed-form energy, hydration, and macronutrient targets. Every function
//! here is total: out-of-range inputs produce out-of-range numbers rather than
//! errors. Use [`super::compute_targets`] when inputs come from a user.

use serde::{Deserialize, Serialize};

/// Energy density of protein and carbohydrate (kcal/g)
pub const KCAL_PER_GRAM_PROTEIN: f64 = 4.0;
pub const KCAL_PER_GRAM_CARBS: f64 = 4.0;
/// Energy density of fat (kcal/g)
pub const KCAL_PER_GRAM_FAT: f64 = 9.0;

/// Daily water per kilogram of body weight (ml)
pub const WATER_ML_PER_KG: f64 = 35.0;

/// Biological sex, used only to pick the BMR formula variant
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    #[default]
    Male,
    Female,
}

impl Sex {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" => Some(Sex::Male),
            "female" | "f" => Some(Sex::Female),
            _ => None,
        }
    }

    /// Constant term of the Mifflin-St Jeor equation
    fn bmr_offset(&self) -> f64 {
        match self {
            Sex::Male => 5.0,
            Sex::Female => -161.0,
        }
    }
}

/// Weekly activity, ordered low to high
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityLevel {
    Sedentary,
    Light,
    Moderate,
    Intense,
}

impl ActivityLevel {
    pub const ALL: [ActivityLevel; 4] = [
        ActivityLevel::Sedentary,
        ActivityLevel::Light,
        ActivityLevel::Moderate,
        ActivityLevel::Intense,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::Light => "light",
            ActivityLevel::Moderate => "moderate",
            ActivityLevel::Intense => "intense",
        }
    }

    /// Parse a level name. The Portuguese labels of older profiles are accepted.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "sedentary" | "baixa" => Some(ActivityLevel::Sedentary),
            "light" | "moderada" => Some(ActivityLevel::Light),
            "moderate" | "alta" => Some(ActivityLevel::Moderate),
            "intense" | "intensa" => Some(ActivityLevel::Intense),
            _ => None,
        }
    }

    pub fn multiplier(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::Intense => 1.725,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "Little or no exercise",
            ActivityLevel::Light => "Light exercise 1-3 days/week",
            ActivityLevel::Moderate => "Moderate exercise 3-5 days/week",
            ActivityLevel::Intense => "Heavy exercise 6-7 days/week",
        }
    }
}

/// Body composition goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Goal {
    /// Caloric surplus for muscle gain ("bulking")
    Surplus,
    /// Caloric deficit for fat loss ("cutting")
    Deficit,
}

impl Goal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Goal::Surplus => "surplus",
            Goal::Deficit => "deficit",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "surplus" | "bulking" | "bulk" => Some(Goal::Surplus),
            "deficit" | "cutting" | "cut" => Some(Goal::Deficit),
            _ => None,
        }
    }

    /// Offset applied to TDEE (kcal/day)
    pub fn calorie_offset(&self) -> f64 {
        match self {
            Goal::Surplus => 300.0,
            Goal::Deficit => -500.0,
        }
    }

    /// Protein/carbs/fat share of daily calories
    pub fn macro_split(&self) -> MacroSplit {
        match self {
            Goal::Surplus => MacroSplit { protein: 0.3, carbs: 0.5, fat: 0.2 },
            Goal::Deficit => MacroSplit { protein: 0.4, carbs: 0.3, fat: 0.3 },
        }
    }
}

/// Fractions of daily calories per macronutrient; sums to 1.0
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroSplit {
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

/// Daily macronutrient targets in grams
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroProfile {
    pub protein_g: i64,
    pub carbs_g: i64,
    pub fats_g: i64,
}

impl MacroProfile {
    /// Energy represented by the rounded gram amounts
    pub fn total_kcal(&self) -> f64 {
        self.protein_g as f64 * KCAL_PER_GRAM_PROTEIN
            + self.carbs_g as f64 * KCAL_PER_GRAM_CARBS
            + self.fats_g as f64 * KCAL_PER_GRAM_FAT
    }
}

/// Basal metabolic rate (kcal/day), Mifflin-St Jeor
pub fn compute_bmr(weight_kg: f64, height_cm: f64, age_years: u32, sex: Sex) -> f64 {
    10.0 * weight_kg + 6.25 * height_cm - 5.0 * f64::from(age_years) + sex.bmr_offset()
}

/// Total daily energy expenditure (kcal/day)
pub fn compute_tdee(bmr: f64, level: ActivityLevel) -> i64 {
    (bmr * level.multiplier()).round() as i64
}

/// Daily intake target (kcal/day). No floor is applied to the deficit path.
pub fn compute_daily_calories(tdee: f64, goal: Goal) -> i64 {
    (tdee + goal.calorie_offset()).round() as i64
}

/// Daily water target (ml)
pub fn compute_daily_water(weight_kg: f64) -> i64 {
    (weight_kg * WATER_ML_PER_KG).round() as i64
}

/// Split daily calories into gram targets, each rounded independently
pub fn compute_macros(daily_calories: i64, goal: Goal) -> MacroProfile {
    let kcal = daily_calories as f64;
    let split = goal.macro_split();

    MacroProfile {
        protein_g: (kcal * split.protein / KCAL_PER_GRAM_PROTEIN).round() as i64,
        carbs_g: (kcal * split.carbs / KCAL_PER_GRAM_CARBS).round() as i64,
        fats_g: (kcal * split.fat / KCAL_PER_GRAM_FAT).round() as i64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bmr_male_reference() {
        let bmr = compute_bmr(70.0, 175.0, 25, Sex::Male);
        assert!((bmr - 1673.75).abs() < 1e-9);
    }

    #[test]
    fn test_bmr_female_is_166_lower() {
        let male = compute_bmr(60.0, 165.0, 30, Sex::Male);
        let female = compute_bmr(60.0, 165.0, 30, Sex::Female);
        assert!((male - female - 166.0).abs() < 1e-9);
    }

    #[test]
    fn test_bmr_monotonic() {
        for sex in [Sex::Male, Sex::Female] {
            let base = compute_bmr(70.0, 170.0, 30, sex);
            assert!(compute_bmr(71.0, 170.0, 30, sex) > base);
            assert!(compute_bmr(70.0, 171.0, 30, sex) > base);
            assert!(compute_bmr(70.0, 170.0, 31, sex) < base);
        }
    }

    #[test]
    fn test_bmr_negative_input_propagates() {
        let bmr = compute_bmr(-10.0, 0.0, 90, Sex::Female);
        assert!(bmr < 0.0);
    }

    #[test]
    fn test_tdee_increases_with_activity() {
        let bmr = 1600.0;
        let values: Vec<i64> = ActivityLevel::ALL.iter().map(|l| compute_tdee(bmr, *l)).collect();
        assert_eq!(values, vec![1920, 2200, 2480, 2760]);
        assert!(values.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_tdee_reference() {
        assert_eq!(compute_tdee(1673.75, ActivityLevel::Light), 2301);
    }

    #[test]
    fn test_daily_calories() {
        assert_eq!(compute_daily_calories(2301.0, Goal::Surplus), 2601);
        assert_eq!(compute_daily_calories(2301.0, Goal::Deficit), 1801);
        assert_eq!(compute_daily_calories(2300.4, Goal::Surplus), 2600);
        // no floor on the deficit path
        assert_eq!(compute_daily_calories(300.0, Goal::Deficit), -200);
    }

    #[test]
    fn test_daily_water() {
        assert_eq!(compute_daily_water(70.0), 2450);
        assert_eq!(compute_daily_water(81.2), 2842);
        assert_eq!(compute_daily_water(0.0), 0);
    }

    #[test]
    fn test_macros_surplus_reference() {
        let macros = compute_macros(2601, Goal::Surplus);
        assert_eq!(macros, MacroProfile { protein_g: 195, carbs_g: 325, fats_g: 58 });
    }

    #[test]
    fn test_macros_deficit() {
        let macros = compute_macros(1801, Goal::Deficit);
        assert_eq!(macros, MacroProfile { protein_g: 180, carbs_g: 135, fats_g: 60 });
    }

    #[test]
    fn test_macros_rounding_drift_is_bounded() {
        // each gram amount is within 0.5 g of exact
        let max_drift = 0.5 * (KCAL_PER_GRAM_PROTEIN + KCAL_PER_GRAM_CARBS + KCAL_PER_GRAM_FAT);
        for goal in [Goal::Surplus, Goal::Deficit] {
            for kcal in (0..5000).step_by(37) {
                let macros = compute_macros(kcal, goal);
                assert!(macros.protein_g >= 0 && macros.carbs_g >= 0 && macros.fats_g >= 0);
                assert!((macros.total_kcal() - kcal as f64).abs() <= max_drift);
            }
        }
    }

    #[test]
    fn test_macro_splits_sum_to_one() {
        for goal in [Goal::Surplus, Goal::Deficit] {
            let s = goal.macro_split();
            assert!((s.protein + s.carbs + s.fat - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_enum_parsing_accepts_legacy_labels() {
        assert_eq!(ActivityLevel::from_str("moderada"), Some(ActivityLevel::Light));
        assert_eq!(ActivityLevel::from_str("Intense"), Some(ActivityLevel::Intense));
        assert_eq!(ActivityLevel::from_str("extreme"), None);
        assert_eq!(Goal::from_str("bulking"), Some(Goal::Surplus));
        assert_eq!(Goal::from_str("cutting"), Some(Goal::Deficit));
        assert_eq!(Sex::from_str("F"), Some(Sex::Female));
    }
}
