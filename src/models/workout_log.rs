//! Workout log model
//!
//! Records of finished workout sessions.

use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::db::DbResult;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutLog {
    pub id: i64,
    pub user_id: i64,
    pub workout_id: Option<i64>,
    pub date: String,
    pub duration_minutes: Option<i64>,
    pub notes: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutLogCreate {
    pub user_id: i64,
    pub workout_id: Option<i64>,
    pub date: String,
    pub duration_minutes: Option<i64>,
    pub notes: Option<String>,
}

impl WorkoutLog {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            user_id: row.get("user_id")?,
            workout_id: row.get("workout_id")?,
            date: row.get("date")?,
            duration_minutes: row.get("duration_minutes")?,
            notes: row.get("notes")?,
            created_at: row.get("created_at")?,
        })
    }

    pub fn create(conn: &Connection, data: &WorkoutLogCreate) -> DbResult<Self> {
        conn.execute(
            r#"
            INSERT INTO workout_logs (user_id, workout_id, date, duration_minutes, notes)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![data.user_id, data.workout_id, data.date, data.duration_minutes, data.notes],
        )?;

        let id = conn.last_insert_rowid();
        Self::get_by_id(conn, id)?.ok_or_else(|| {
            crate::db::DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows)
        })
    }

    pub fn get_by_id(conn: &Connection, id: i64) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM workout_logs WHERE id = ?1")?;

        match stmt.query_row([id], Self::from_row) {
            Ok(log) => Ok(Some(log)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// A user's logs, newest first
    pub fn list_for_user(conn: &Connection, user_id: i64, limit: i64, offset: i64) -> DbResult<Vec<Self>> {
        let mut stmt = conn.prepare(
            "SELECT * FROM workout_logs WHERE user_id = ?1 ORDER BY date DESC, id DESC LIMIT ?2 OFFSET ?3",
        )?;
        let logs = stmt
            .query_map(params![user_id, limit, offset], Self::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(logs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_connection;
    use crate::models::user::test_support::create_reference_user;
    use crate::models::{Workout, WorkoutCreate};

    #[test]
    fn test_log_survives_workout_deletion() {
        let conn = test_connection();
        let user = create_reference_user(&conn, "Jin");
        let workout = Workout::create(&conn, &WorkoutCreate {
            user_id: user.id,
            name: "Pull".to_string(),
            is_template: false,
            exercises: vec![],
        })
        .unwrap();

        let log = WorkoutLog::create(&conn, &WorkoutLogCreate {
            user_id: user.id,
            workout_id: Some(workout.id),
            date: "2025-03-01".to_string(),
            duration_minutes: Some(42),
            notes: None,
        })
        .unwrap();
        assert_eq!(log.workout_id, Some(workout.id));

        Workout::delete(&conn, workout.id).unwrap();

        let logs = WorkoutLog::list_for_user(&conn, user.id, 10, 0).unwrap();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].workout_id, None);
        assert_eq!(logs[0].duration_minutes, Some(42));
    }
}
