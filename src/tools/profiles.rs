//! Profile MCP Tools
//!
//! Onboarding, profile reads and edits, and target recalculation.

use serde::Serialize;

use crate::db::Database;
use crate::metabolism::{compute_targets, ActivityLevel, Biometrics, Goal, MacroProfile, Sex, Targets};
use crate::models::{User, UserCreate, UserUpdate, WorkoutType};

/// Raw onboarding answers
#[derive(Debug, Clone)]
pub struct OnboardingInput {
    pub name: String,
    pub email: Option<String>,
    pub age: u32,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub sex: Option<String>,
    pub activity_level: String,
    pub goal: String,
    pub workout_type: String,
}

/// Profile plus targets derived from it
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub user: User,
    pub macros: MacroProfile,
}

impl ProfileResponse {
    fn new(user: User) -> Self {
        let macros = crate::metabolism::compute_macros(user.daily_calories, user.goal);
        Self { user, macros }
    }
}

#[derive(Debug, Serialize)]
pub struct ProfileSummary {
    pub id: i64,
    pub name: String,
    pub goal: Goal,
    pub daily_calories: i64,
}

#[derive(Debug, Serialize)]
pub struct RecalculateResponse {
    pub user_id: i64,
    pub previous_daily_calories: i64,
    pub targets: Targets,
}

pub(crate) fn parse_sex(s: Option<&str>) -> Result<Sex, String> {
    match s {
        None => Ok(Sex::default()),
        Some(s) => Sex::from_str(s).ok_or_else(|| format!("Unknown sex: {} (expected male or female)", s)),
    }
}

pub(crate) fn parse_activity_level(s: &str) -> Result<ActivityLevel, String> {
    ActivityLevel::from_str(s).ok_or_else(|| {
        format!("Unknown activity level: {} (expected sedentary, light, moderate, or intense)", s)
    })
}

pub(crate) fn parse_goal(s: &str) -> Result<Goal, String> {
    Goal::from_str(s).ok_or_else(|| format!("Unknown goal: {} (expected surplus or deficit)", s))
}

pub(crate) fn parse_workout_type(s: &str) -> Result<WorkoutType, String> {
    WorkoutType::from_str(s)
        .ok_or_else(|| format!("Unknown workout type: {} (expected strength or calisthenics)", s))
}

/// Create a profile and compute its daily targets
pub fn onboard(db: &Database, input: OnboardingInput) -> Result<ProfileResponse, String> {
    let name = input.name.trim().to_string();
    if name.is_empty() {
        return Err("Name must not be empty".to_string());
    }

    let biometrics = Biometrics {
        weight_kg: input.weight_kg,
        height_cm: input.height_cm,
        age_years: input.age,
        sex: parse_sex(input.sex.as_deref())?,
    };
    let activity_level = parse_activity_level(&input.activity_level)?;
    let goal = parse_goal(&input.goal)?;
    let workout_type = parse_workout_type(&input.workout_type)?;

    let targets = compute_targets(&biometrics, activity_level, goal).map_err(|e| e.to_string())?;

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
    let user = User::create(&conn, &UserCreate {
        name,
        email: input.email.filter(|e| !e.trim().is_empty()),
        biometrics,
        activity_level,
        goal,
        workout_type,
        targets,
    })
    .map_err(|e| format!("Failed to create profile: {}", e))?;

    tracing::info!(user_id = user.id, daily_calories = user.daily_calories, "Onboarded user");
    Ok(ProfileResponse::new(user))
}

pub fn get_profile(db: &Database, user_id: i64) -> Result<Option<ProfileResponse>, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let user = User::get_by_id(&conn, user_id)
        .map_err(|e| format!("Failed to get profile: {}", e))?;
    Ok(user.map(ProfileResponse::new))
}

pub fn list_profiles(db: &Database) -> Result<Vec<ProfileSummary>, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let users = User::list(&conn).map_err(|e| format!("Failed to list profiles: {}", e))?;
    Ok(users
        .into_iter()
        .map(|u| ProfileSummary {
            id: u.id,
            name: u.name,
            goal: u.goal,
            daily_calories: u.daily_calories,
        })
        .collect())
}

/// Apply profile edits; targets are recomputed when a calculator input changes
pub fn update_profile(db: &Database, user_id: i64, data: UserUpdate) -> Result<Option<ProfileResponse>, String> {
    if let Some(ref name) = data.name {
        if name.trim().is_empty() {
            return Err("Name must not be empty".to_string());
        }
    }

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let Some(existing) = User::get_by_id(&conn, user_id)
        .map_err(|e| format!("Failed to get profile: {}", e))?
    else {
        return Ok(None);
    };

    // Validate the merged biometrics before anything is written
    let targets = if data.touches_targets() {
        let biometrics = Biometrics {
            weight_kg: data.weight_kg.unwrap_or(existing.weight_kg),
            height_cm: data.height_cm.unwrap_or(existing.height_cm),
            age_years: data.age.unwrap_or(existing.age),
            sex: data.sex.unwrap_or(existing.sex),
        };
        let level = data.activity_level.unwrap_or(existing.activity_level);
        let goal = data.goal.unwrap_or(existing.goal);
        Some(compute_targets(&biometrics, level, goal).map_err(|e| e.to_string())?)
    } else {
        None
    };

    // Profile fields and targets change together or not at all
    let tx = conn
        .unchecked_transaction()
        .map_err(|e| format!("Database error: {}", e))?;
    User::update(&tx, user_id, &data).map_err(|e| format!("Failed to update profile: {}", e))?;
    if let Some(ref targets) = targets {
        User::set_targets(&tx, user_id, targets)
            .map_err(|e| format!("Failed to store targets: {}", e))?;
    }
    tx.commit().map_err(|e| format!("Failed to update profile: {}", e))?;

    if let Some(ref targets) = targets {
        tracing::info!(user_id, daily_calories = targets.energy.daily_calories, "Recomputed targets");
    }

    let user = User::get_by_id(&conn, user_id).map_err(|e| format!("Failed to get profile: {}", e))?;
    Ok(user.map(ProfileResponse::new))
}

/// Re-derive stored targets from the stored biometrics
pub fn recalculate_targets(db: &Database, user_id: i64) -> Result<Option<RecalculateResponse>, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let Some(user) = User::get_by_id(&conn, user_id)
        .map_err(|e| format!("Failed to get profile: {}", e))?
    else {
        return Ok(None);
    };

    let targets = compute_targets(&user.biometrics(), user.activity_level, user.goal)
        .map_err(|e| format!("Profile {} has invalid biometrics: {}", user.id, e))?;
    User::set_targets(&conn, user.id, &targets)
        .map_err(|e| format!("Failed to store targets: {}", e))?;

    Ok(Some(RecalculateResponse {
        user_id: user.id,
        previous_daily_calories: user.daily_calories,
        targets,
    }))
}

/// Remove a profile and all data it owns
pub fn delete_profile(db: &Database, user_id: i64) -> Result<bool, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let deleted = User::delete(&conn, user_id).map_err(|e| format!("Failed to delete profile: {}", e))?;
    if deleted {
        tracing::info!(user_id, "Deleted profile");
    }
    Ok(deleted)
}


#[cfg(test)]
mod tests {
    use super::test_support::{reference_input, temp_database};
    use super::*;

    #[test]
    fn test_onboard_computes_targets() {
        let (_dir, db) = temp_database();
        let profile = onboard(&db, reference_input()).unwrap();

        assert_eq!(profile.user.sex, Sex::Male);
        assert_eq!(profile.user.tdee, 2301);
        assert_eq!(profile.user.daily_calories, 2601);
        assert_eq!(profile.user.daily_water_ml, 2450);
        assert_eq!(profile.macros, MacroProfile { protein_g: 195, carbs_g: 325, fats_g: 58 });
    }

    #[test]
    fn test_onboard_rejects_bad_input() {
        let (_dir, db) = temp_database();

        let mut input = reference_input();
        input.weight_kg = 0.0;
        assert!(onboard(&db, input).unwrap_err().contains("weight_kg"));

        let mut input = reference_input();
        input.activity_level = "couch".to_string();
        assert!(onboard(&db, input).unwrap_err().contains("activity level"));

        let mut input = reference_input();
        input.name = "   ".to_string();
        assert!(onboard(&db, input).is_err());

        assert!(list_profiles(&db).unwrap().is_empty());
    }

    #[test]
    fn test_update_recomputes_targets_only_when_needed() {
        let (_dir, db) = temp_database();
        let id = onboard(&db, reference_input()).unwrap().user.id;

        let renamed = update_profile(&db, id, UserUpdate {
            name: Some("Jin".to_string()),
            ..Default::default()
        })
        .unwrap()
        .unwrap();
        assert_eq!(renamed.user.daily_calories, 2601);

        let cutting = update_profile(&db, id, UserUpdate {
            goal: Some(Goal::Deficit),
            ..Default::default()
        })
        .unwrap()
        .unwrap();
        assert_eq!(cutting.user.daily_calories, 1801);
        assert_eq!(cutting.macros.protein_g, 180);
    }

    #[test]
    fn test_invalid_update_writes_nothing() {
        let (_dir, db) = temp_database();
        let id = onboard(&db, reference_input()).unwrap().user.id;

        let result = update_profile(&db, id, UserUpdate {
            weight_kg: Some(-1.0),
            name: Some("Changed".to_string()),
            ..Default::default()
        });
        assert!(result.is_err());

        let profile = get_profile(&db, id).unwrap().unwrap();
        assert_eq!(profile.user.name, "Sung Jin-Woo");
        assert_eq!(profile.user.weight_kg, 70.0);
    }

    #[test]
    fn test_update_rolls_back_when_targets_cannot_be_stored() {
        let (_dir, db) = temp_database();
        let id = onboard(&db, reference_input()).unwrap().user.id;
        db.get_conn()
            .unwrap()
            .execute_batch(
                "CREATE TRIGGER freeze_targets BEFORE UPDATE OF daily_calories ON users
                 BEGIN SELECT RAISE(ABORT, 'targets frozen'); END;",
            )
            .unwrap();

        let err = update_profile(&db, id, UserUpdate {
            weight_kg: Some(90.0),
            ..Default::default()
        })
        .unwrap_err();
        assert!(err.contains("targets frozen"));

        let profile = get_profile(&db, id).unwrap().unwrap();
        assert_eq!(profile.user.weight_kg, 70.0);
        assert_eq!(profile.user.daily_calories, 2601);
    }

    #[test]
    fn test_onboard_rejects_oversized_biometrics() {
        let (_dir, db) = temp_database();

        let mut input = reference_input();
        input.weight_kg = 1e18;
        assert!(onboard(&db, input).unwrap_err().contains("weight_kg"));

        let mut input = reference_input();
        input.age = 151;
        assert!(onboard(&db, input).unwrap_err().contains("age_years"));

        assert!(list_profiles(&db).unwrap().is_empty());
    }

    #[test]
    fn test_recalculate_and_delete() {
        let (_dir, db) = temp_database();
        let id = onboard(&db, reference_input()).unwrap().user.id;

        let recalculated = recalculate_targets(&db, id).unwrap().unwrap();
        assert_eq!(recalculated.previous_daily_calories, 2601);
        assert_eq!(recalculated.targets.energy.daily_calories, 2601);

        assert!(delete_profile(&db, id).unwrap());
        assert!(get_profile(&db, id).unwrap().is_none());
        assert!(recalculate_targets(&db, id).unwrap().is_none());
    }
}
