//! Daily tracking model
//!
//! Water, calories, and workout completion for one user on one date.

use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::db::DbResult;

/// A user's tracking row for a single day
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyTracking {
    pub id: i64,
    pub user_id: i64,
    pub date: String, // ISO date: "2025-01-09"
    pub water_consumed_ml: i64,
    pub calories_consumed: i64,
    pub workout_completed: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl DailyTracking {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            user_id: row.get("user_id")?,
            date: row.get("date")?,
            water_consumed_ml: row.get("water_consumed_ml")?,
            calories_consumed: row.get("calories_consumed")?,
            workout_completed: row.get::<_, i64>("workout_completed")? != 0,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }

    pub fn get_by_id(conn: &Connection, id: i64) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM daily_tracking WHERE id = ?1")?;

        match stmt.query_row([id], Self::from_row) {
            Ok(t) => Ok(Some(t)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn get(conn: &Connection, user_id: i64, date: &str) -> DbResult<Option<Self>> {
        let mut stmt =
            conn.prepare("SELECT * FROM daily_tracking WHERE user_id = ?1 AND date = ?2")?;

        match stmt.query_row(params![user_id, date], Self::from_row) {
            Ok(t) => Ok(Some(t)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Get or create the row for a user and date
    pub fn get_or_create(conn: &Connection, user_id: i64, date: &str) -> DbResult<Self> {
        conn.execute(
            "INSERT OR IGNORE INTO daily_tracking (user_id, date) VALUES (?1, ?2)",
            params![user_id, date],
        )?;

        Self::get(conn, user_id, date)?.ok_or_else(|| {
            crate::db::DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows)
        })
    }

    /// List a user's days, newest first, with optional date range
    pub fn list_for_user(
        conn: &Connection,
        user_id: i64,
        start_date: Option<&str>,
        end_date: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> DbResult<Vec<Self>> {
        let mut sql = String::from("SELECT * FROM daily_tracking WHERE user_id = ?1");
        let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = vec![Box::new(user_id)];

        if let Some(start) = start_date {
            params_vec.push(Box::new(start.to_string()));
            sql.push_str(&format!(" AND date >= ?{}", params_vec.len()));
        }

        if let Some(end) = end_date {
            params_vec.push(Box::new(end.to_string()));
            sql.push_str(&format!(" AND date <= ?{}", params_vec.len()));
        }

        sql.push_str(" ORDER BY date DESC");

        params_vec.push(Box::new(limit));
        sql.push_str(&format!(" LIMIT ?{}", params_vec.len()));

        params_vec.push(Box::new(offset));
        sql.push_str(&format!(" OFFSET ?{}", params_vec.len()));

        let mut stmt = conn.prepare(&sql)?;
        let params_refs: Vec<&dyn rusqlite::ToSql> = params_vec.iter().map(|p| p.as_ref()).collect();

        let rows = stmt
            .query_map(params_refs.as_slice(), Self::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(rows)
    }

    /// Add water, keeping the total within `[0, cap_ml]`
    pub fn add_water(conn: &Connection, id: i64, delta_ml: i64, cap_ml: i64) -> DbResult<Option<Self>> {
        conn.execute(
            r#"
            UPDATE daily_tracking SET
                water_consumed_ml = MAX(0, MIN(water_consumed_ml + ?1, ?2)),
                updated_at = strftime('%Y-%m-%dT%H:%M:%SZ', 'now')
            WHERE id = ?3
            "#,
            params![delta_ml, cap_ml.max(0), id],
        )?;
        Self::get_by_id(conn, id)
    }

    /// Add calories, never going below zero
    pub fn add_calories(conn: &Connection, id: i64, delta: i64) -> DbResult<Option<Self>> {
        conn.execute(
            r#"
            UPDATE daily_tracking SET
                calories_consumed = MAX(0, calories_consumed + ?1),
                updated_at = strftime('%Y-%m-%dT%H:%M:%SZ', 'now')
            WHERE id = ?2
            "#,
            params![delta, id],
        )?;
        Self::get_by_id(conn, id)
    }

    pub fn mark_workout_completed(conn: &Connection, id: i64) -> DbResult<bool> {
        let rows = conn.execute(
            r#"
            UPDATE daily_tracking SET
                workout_completed = 1,
                updated_at = strftime('%Y-%m-%dT%H:%M:%SZ', 'now')
            WHERE id = ?1
            "#,
            [id],
        )?;
        Ok(rows > 0)
    }

    pub fn count_for_user(conn: &Connection, user_id: i64) -> DbResult<i64> {
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM daily_tracking WHERE user_id = ?1",
            [user_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}
