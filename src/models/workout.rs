//! Workout model
//!
//! A named routine owned by a user, with an ordered list of exercises.

use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::db::DbResult;

/// One exercise inside a workout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutExercise {
    pub id: i64,
    pub workout_id: i64,
    pub name: String,
    pub sets: u32,
    pub reps: String, // "8-12", "30-60s"
    pub rest_seconds: Option<u32>,
    pub notes: Option<String>,
    pub order_index: i64,
    pub created_at: String,
}

/// Exercise data supplied when creating or rewriting a workout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseInput {
    pub name: String,
    pub sets: u32,
    pub reps: String,
    pub rest_seconds: Option<u32>,
    pub notes: Option<String>,
}

/// A workout with its exercises in order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workout {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub is_template: bool,
    pub exercises: Vec<WorkoutExercise>,
    pub created_at: String,
    pub updated_at: String,
}

/// Data for creating a workout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutCreate {
    pub user_id: i64,
    pub name: String,
    pub is_template: bool,
    pub exercises: Vec<ExerciseInput>,
}

/// Data for updating a workout; `exercises` replaces the whole list
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkoutUpdate {
    pub name: Option<String>,
    pub exercises: Option<Vec<ExerciseInput>>,
}

impl WorkoutExercise {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            workout_id: row.get("workout_id")?,
            name: row.get("name")?,
            sets: row.get("sets")?,
            reps: row.get("reps")?,
            rest_seconds: row.get("rest_seconds")?,
            notes: row.get("notes")?,
            order_index: row.get("order_index")?,
            created_at: row.get("created_at")?,
        })
    }
}

impl Workout {
    /// Build from a workouts row; exercises are loaded separately
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            user_id: row.get("user_id")?,
            name: row.get("name")?,
            is_template: row.get::<_, i64>("is_template")? != 0,
            exercises: Vec::new(),
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }

    /// Create a workout and its exercises atomically
    pub fn create(conn: &Connection, data: &WorkoutCreate) -> DbResult<Self> {
        let tx = conn.unchecked_transaction()?;

        tx.execute(
            "INSERT INTO workouts (user_id, name, is_template) VALUES (?1, ?2, ?3)",
            params![data.user_id, data.name, data.is_template as i64],
        )?;
        let id = tx.last_insert_rowid();
        insert_exercises(&tx, id, &data.exercises)?;

        tx.commit()?;

        Self::get_by_id(conn, id)?.ok_or_else(|| {
            crate::db::DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows)
        })
    }

    pub fn get_by_id(conn: &Connection, id: i64) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM workouts WHERE id = ?1")?;

        let workout = match stmt.query_row([id], Self::from_row) {
            Ok(w) => w,
            Err(rusqlite::Error::QueryReturnedNoRows) => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        Ok(Some(Self {
            exercises: Self::exercises(conn, workout.id)?,
            ..workout
        }))
    }

    /// Exercises of a workout in display order
    pub fn exercises(conn: &Connection, workout_id: i64) -> DbResult<Vec<WorkoutExercise>> {
        let mut stmt = conn.prepare(
            "SELECT * FROM workout_exercises WHERE workout_id = ?1 ORDER BY order_index, id",
        )?;
        let exercises = stmt
            .query_map([workout_id], WorkoutExercise::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(exercises)
    }

    /// All workouts owned by a user, newest first
    pub fn list_for_user(conn: &Connection, user_id: i64) -> DbResult<Vec<Self>> {
        let mut stmt = conn.prepare(
            "SELECT * FROM workouts WHERE user_id = ?1 ORDER BY created_at DESC, id DESC",
        )?;
        let workouts = stmt
            .query_map([user_id], Self::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        workouts
            .into_iter()
            .map(|w| {
                let exercises = Self::exercises(conn, w.id)?;
                Ok(Self { exercises, ..w })
            })
            .collect()
    }

    pub fn update(conn: &Connection, id: i64, data: &WorkoutUpdate) -> DbResult<Option<Self>> {
        if Self::get_by_id(conn, id)?.is_none() {
            return Ok(None);
        }

        let tx = conn.unchecked_transaction()?;

        if let Some(ref name) = data.name {
            tx.execute("UPDATE workouts SET name = ?1 WHERE id = ?2", params![name, id])?;
        }
        if let Some(ref exercises) = data.exercises {
            tx.execute("DELETE FROM workout_exercises WHERE workout_id = ?1", [id])?;
            insert_exercises(&tx, id, exercises)?;
        }
        tx.execute(
            "UPDATE workouts SET updated_at = strftime('%Y-%m-%dT%H:%M:%SZ', 'now') WHERE id = ?1",
            [id],
        )?;

        tx.commit()?;

        Self::get_by_id(conn, id)
    }

    /// Delete a workout; exercises cascade, logs keep a null reference
    pub fn delete(conn: &Connection, id: i64) -> DbResult<bool> {
        let rows = conn.execute("DELETE FROM workouts WHERE id = ?1", [id])?;
        Ok(rows > 0)
    }
}

fn insert_exercises(conn: &Connection, workout_id: i64, exercises: &[ExerciseInput]) -> DbResult<()> {
    let mut stmt = conn.prepare(
        r#"
        INSERT INTO workout_exercises (workout_id, name, sets, reps, rest_seconds, notes, order_index)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
        "#,
    )?;

    for (index, ex) in exercises.iter().enumerate() {
        stmt.execute(params![
            workout_id,
            ex.name,
            ex.sets,
            ex.reps,
            ex.rest_seconds,
            ex.notes,
            index as i64,
        ])?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_connection;
    use crate::models::user::test_support::create_reference_user;

    fn exercise(name: &str, sets: u32) -> ExerciseInput {
        ExerciseInput {
            name: name.to_string(),
            sets,
            reps: "8-12".to_string(),
            rest_seconds: Some(90),
            notes: None,
        }
    }

    #[test]
    fn test_create_keeps_exercise_order() {
        let conn = test_connection();
        let user = create_reference_user(&conn, "Jin");

        let workout = Workout::create(&conn, &WorkoutCreate {
            user_id: user.id,
            name: "Push".to_string(),
            is_template: false,
            exercises: vec![exercise("Bench Press", 4), exercise("Dips", 3)],
        })
        .unwrap();

        let names: Vec<&str> = workout.exercises.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Bench Press", "Dips"]);
        assert_eq!(workout.exercises[1].order_index, 1);
        assert!(workout.exercises.iter().all(|e| e.workout_id == workout.id));
    }

    #[test]
    fn test_invalid_exercise_rolls_back_workout() {
        let conn = test_connection();
        let user = create_reference_user(&conn, "Jin");

        // sets = 0 violates the CHECK constraint
        let result = Workout::create(&conn, &WorkoutCreate {
            user_id: user.id,
            name: "Broken".to_string(),
            is_template: false,
            exercises: vec![exercise("Squat", 4), exercise("Nothing", 0)],
        });

        assert!(result.is_err());
        assert!(Workout::list_for_user(&conn, user.id).unwrap().is_empty());
    }

    #[test]
    fn test_update_replaces_exercises() {
        let conn = test_connection();
        let user = create_reference_user(&conn, "Jin");
        let workout = Workout::create(&conn, &WorkoutCreate {
            user_id: user.id,
            name: "Legs".to_string(),
            is_template: false,
            exercises: vec![exercise("Squat", 4), exercise("Lunge", 3)],
        })
        .unwrap();

        let updated = Workout::update(&conn, workout.id, &WorkoutUpdate {
            name: Some("Leg Day".to_string()),
            exercises: Some(vec![exercise("Deadlift", 5)]),
        })
        .unwrap()
        .unwrap();

        assert_eq!(updated.name, "Leg Day");
        assert_eq!(updated.exercises.len(), 1);
        assert_eq!(updated.exercises[0].name, "Deadlift");
        assert!(Workout::update(&conn, 9999, &WorkoutUpdate::default()).unwrap().is_none());
    }

    #[test]
    fn test_list_is_scoped_to_user_and_delete_cascades() {
        let conn = test_connection();
        let jin = create_reference_user(&conn, "Jin");
        let other = create_reference_user(&conn, "Cha");

        let mine = Workout::create(&conn, &WorkoutCreate {
            user_id: jin.id,
            name: "Mine".to_string(),
            is_template: false,
            exercises: vec![exercise("Row", 3)],
        })
        .unwrap();
        Workout::create(&conn, &WorkoutCreate {
            user_id: other.id,
            name: "Theirs".to_string(),
            is_template: false,
            exercises: vec![],
        })
        .unwrap();

        let listed = Workout::list_for_user(&conn, jin.id).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].exercises.len(), 1);

        assert!(Workout::delete(&conn, mine.id).unwrap());
        assert!(Workout::exercises(&conn, mine.id).unwrap().is_empty());
    }
}
