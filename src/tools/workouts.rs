//! Workout MCP Tools
//!
//! Templates, custom routines, and workout history.

use serde::Serialize;

use crate::db::Database;
use crate::models::{ExerciseInput, User, Workout, WorkoutCreate, WorkoutLog, WorkoutType, WorkoutUpdate};
use crate::templates::{templates_for, WorkoutTemplate};

#[derive(Debug, Serialize)]
pub struct TemplateSummary {
    pub index: usize,
    pub name: &'static str,
    pub exercise_count: usize,
    pub exercises: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct ListTemplatesResponse {
    pub workout_type: WorkoutType,
    pub templates: Vec<TemplateSummary>,
}

#[derive(Debug, Serialize)]
pub struct WorkoutSummary {
    pub id: i64,
    pub name: String,
    pub exercise_count: usize,
    pub total_sets: u32,
    pub updated_at: String,
}

#[derive(Debug, Serialize)]
pub struct DeleteWorkoutResponse {
    pub success: bool,
    pub message: String,
}

fn validate_workout(name: Option<&str>, exercises: Option<&[ExerciseInput]>) -> Result<(), String> {
    if let Some(name) = name {
        if name.trim().is_empty() {
            return Err("Workout name must not be empty".to_string());
        }
    }
    if let Some(exercises) = exercises {
        if exercises.is_empty() {
            return Err("A workout needs at least one exercise".to_string());
        }
        for (i, ex) in exercises.iter().enumerate() {
            if ex.name.trim().is_empty() {
                return Err(format!("Exercise {} has no name", i + 1));
            }
            if ex.sets == 0 {
                return Err(format!("Exercise '{}' must have at least one set", ex.name));
            }
        }
    }
    Ok(())
}

fn load_user(conn: &rusqlite::Connection, user_id: i64) -> Result<User, String> {
    User::get_by_id(conn, user_id)
        .map_err(|e| format!("Failed to get profile: {}", e))?
        .ok_or_else(|| format!("Profile not found with id: {}", user_id))
}

/// Templates matching the user's workout type
pub fn list_templates(db: &Database, user_id: i64) -> Result<ListTemplatesResponse, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
    let user = load_user(&conn, user_id)?;

    let templates = templates_for(user.workout_type)
        .iter()
        .enumerate()
        .map(|(index, t)| TemplateSummary {
            index,
            name: t.name,
            exercise_count: t.exercises.len(),
            exercises: t.exercises.iter().map(|e| e.name).collect(),
        })
        .collect();

    Ok(ListTemplatesResponse { workout_type: user.workout_type, templates })
}

/// Copy one of the user's templates into a new workout
pub fn create_from_template(db: &Database, user_id: i64, template_index: usize) -> Result<Workout, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
    let user = load_user(&conn, user_id)?;

    let templates: &[WorkoutTemplate] = templates_for(user.workout_type);
    let template = templates.get(template_index).ok_or_else(|| {
        format!(
            "Template index {} out of range (0-{})",
            template_index,
            templates.len().saturating_sub(1)
        )
    })?;

    let workout = Workout::create(&conn, &WorkoutCreate {
        user_id: user.id,
        name: template.name.to_string(),
        is_template: false,
        exercises: template.exercise_inputs(),
    })
    .map_err(|e| format!("Failed to create workout: {}", e))?;

    tracing::info!(user_id, workout_id = workout.id, template = template.name, "Created workout from template");
    Ok(workout)
}

pub fn create_workout(db: &Database, user_id: i64, name: &str, exercises: Vec<ExerciseInput>) -> Result<Workout, String> {
    validate_workout(Some(name), Some(&exercises))?;

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
    let user = load_user(&conn, user_id)?;

    Workout::create(&conn, &WorkoutCreate {
        user_id: user.id,
        name: name.trim().to_string(),
        is_template: false,
        exercises,
    })
    .map_err(|e| format!("Failed to create workout: {}", e))
}

pub fn get_workout(db: &Database, id: i64) -> Result<Option<Workout>, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    Workout::get_by_id(&conn, id).map_err(|e| format!("Failed to get workout: {}", e))
}

pub fn list_workouts(db: &Database, user_id: i64) -> Result<Vec<WorkoutSummary>, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let workouts = Workout::list_for_user(&conn, user_id)
        .map_err(|e| format!("Failed to list workouts: {}", e))?;

    Ok(workouts
        .into_iter()
        .map(|w| WorkoutSummary {
            id: w.id,
            exercise_count: w.exercises.len(),
            total_sets: w.exercises.iter().map(|e| e.sets).sum(),
            name: w.name,
            updated_at: w.updated_at,
        })
        .collect())
}

pub fn update_workout(
    db: &Database,
    id: i64,
    name: Option<String>,
    exercises: Option<Vec<ExerciseInput>>,
) -> Result<Option<Workout>, String> {
    validate_workout(name.as_deref(), exercises.as_deref())?;

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let data = WorkoutUpdate {
        name: name.map(|n| n.trim().to_string()),
        exercises,
    };
    Workout::update(&conn, id, &data).map_err(|e| format!("Failed to update workout: {}", e))
}

pub fn delete_workout(db: &Database, id: i64) -> Result<DeleteWorkoutResponse, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let deleted = Workout::delete(&conn, id).map_err(|e| format!("Failed to delete workout: {}", e))?;
    Ok(DeleteWorkoutResponse {
        success: deleted,
        message: if deleted {
            format!("Deleted workout {}", id)
        } else {
            format!("Workout not found with id: {}", id)
        },
    })
}

pub fn list_workout_logs(db: &Database, user_id: i64, limit: i64, offset: i64) -> Result<Vec<WorkoutLog>, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    WorkoutLog::list_for_user(&conn, user_id, limit.clamp(1, 200), offset.max(0))
        .map_err(|e| format!("Failed to list workout logs: {}", e))
}


#[cfg(test)]
mod tests {
    use super::test_support::exercise;
    use super::*;
    use crate::tools::profiles::test_support::{reference_input, temp_database};
    use crate::tools::profiles::onboard;

    #[test]
    fn test_templates_follow_workout_type() {
        let (_dir, db) = temp_database();
        let mut input = reference_input();
        input.workout_type = "calistenia".to_string();
        let id = onboard(&db, input).unwrap().user.id;

        let resp = list_templates(&db, id).unwrap();
        assert_eq!(resp.workout_type, WorkoutType::Calisthenics);
        assert_eq!(resp.templates.len(), 4);
        assert_eq!(resp.templates[0].name, "Workout A - Push");
    }

    #[test]
    fn test_create_from_template() {
        let (_dir, db) = temp_database();
        let id = onboard(&db, reference_input()).unwrap().user.id;

        let workout = create_from_template(&db, id, 2).unwrap();
        assert_eq!(workout.name, "Workout C - Legs");
        assert!(!workout.is_template);
        assert_eq!(workout.exercises.len(), 5);
        assert_eq!(workout.exercises[0].rest_seconds, Some(120));

        assert!(create_from_template(&db, id, 4).unwrap_err().contains("out of range"));
    }

    #[test]
    fn test_custom_workout_validation() {
        let (_dir, db) = temp_database();
        let id = onboard(&db, reference_input()).unwrap().user.id;

        assert!(create_workout(&db, id, "", vec![exercise("Squat", 3)]).is_err());
        assert!(create_workout(&db, id, "Empty", vec![]).is_err());
        assert!(create_workout(&db, id, "Zero", vec![exercise("Squat", 0)]).is_err());

        let workout = create_workout(&db, id, " Full Body ", vec![exercise("Squat", 3), exercise("Row", 4)]).unwrap();
        assert_eq!(workout.name, "Full Body");

        let summaries = list_workouts(&db, id).unwrap();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].total_sets, 7);
    }

    #[test]
    fn test_update_and_delete() {
        let (_dir, db) = temp_database();
        let id = onboard(&db, reference_input()).unwrap().user.id;
        let workout = create_workout(&db, id, "Pull", vec![exercise("Row", 3)]).unwrap();

        let updated = update_workout(&db, workout.id, None, Some(vec![exercise("Chin-up", 5)]))
            .unwrap()
            .unwrap();
        assert_eq!(updated.name, "Pull");
        assert_eq!(updated.exercises[0].name, "Chin-up");

        assert!(delete_workout(&db, workout.id).unwrap().success);
        assert!(!delete_workout(&db, workout.id).unwrap().success);
        assert!(get_workout(&db, workout.id).unwrap().is_none());
    }
}
