//! User model
//!
//! A local profile: biometrics, preferences, and the daily targets computed
//! from them.

use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::db::DbResult;
use crate::metabolism::{ActivityLevel, Biometrics, Goal, Sex, Targets};

/// Training style, selects the built-in templates offered to the user
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutType {
    #[default]
    Strength,
    Calisthenics,
}

impl WorkoutType {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkoutType::Strength => "strength",
            WorkoutType::Calisthenics => "calisthenics",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "strength" | "weights" | "musculacao" => Some(WorkoutType::Strength),
            "calisthenics" | "bodyweight" | "calistenia" => Some(WorkoutType::Calisthenics),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            WorkoutType::Strength => "Strength Training",
            WorkoutType::Calisthenics => "Calisthenics",
        }
    }
}

/// A user profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub age: u32,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub sex: Sex,
    pub activity_level: ActivityLevel,
    pub goal: Goal,
    pub workout_type: WorkoutType,
    pub bmr: f64,
    pub tdee: i64,
    pub daily_calories: i64,
    pub daily_water_ml: i64,
    pub created_at: String,
    pub updated_at: String,
}

/// Data for creating a user; targets are computed by the caller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserCreate {
    pub name: String,
    pub email: Option<String>,
    pub biometrics: Biometrics,
    pub activity_level: ActivityLevel,
    pub goal: Goal,
    pub workout_type: WorkoutType,
    pub targets: Targets,
}

/// Data for updating a user
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub age: Option<u32>,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub sex: Option<Sex>,
    pub activity_level: Option<ActivityLevel>,
    pub goal: Option<Goal>,
    pub workout_type: Option<WorkoutType>,
}

impl UserUpdate {
    /// Whether any field feeding the calculator changes
    pub fn touches_targets(&self) -> bool {
        self.age.is_some()
            || self.height_cm.is_some()
            || self.weight_kg.is_some()
            || self.sex.is_some()
            || self.activity_level.is_some()
            || self.goal.is_some()
    }
}

impl User {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        let sex: String = row.get("sex")?;
        let activity_level: String = row.get("activity_level")?;
        let goal: String = row.get("goal")?;
        let workout_type: String = row.get("workout_type")?;

        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            email: row.get("email")?,
            age: row.get("age")?,
            height_cm: row.get("height_cm")?,
            weight_kg: row.get("weight_kg")?,
            sex: Sex::from_str(&sex).unwrap_or_default(),
            activity_level: ActivityLevel::from_str(&activity_level)
                .unwrap_or(ActivityLevel::Sedentary),
            goal: Goal::from_str(&goal).unwrap_or(Goal::Deficit),
            workout_type: WorkoutType::from_str(&workout_type).unwrap_or_default(),
            bmr: row.get("bmr")?,
            tdee: row.get("tdee")?,
            daily_calories: row.get("daily_calories")?,
            daily_water_ml: row.get("daily_water_ml")?,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }

    /// Biometrics as stored on the profile
    pub fn biometrics(&self) -> Biometrics {
        Biometrics {
            weight_kg: self.weight_kg,
            height_cm: self.height_cm,
            age_years: self.age,
            sex: self.sex,
        }
    }

    pub fn create(conn: &Connection, data: &UserCreate) -> DbResult<Self> {
        conn.execute(
            r#"
            INSERT INTO users (
                name, email, age, height_cm, weight_kg, sex, activity_level, goal, workout_type,
                bmr, tdee, daily_calories, daily_water_ml
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)
            "#,
            params![
                data.name,
                data.email,
                data.biometrics.age_years,
                data.biometrics.height_cm,
                data.biometrics.weight_kg,
                data.biometrics.sex.as_str(),
                data.activity_level.as_str(),
                data.goal.as_str(),
                data.workout_type.as_str(),
                data.targets.energy.bmr,
                data.targets.energy.tdee,
                data.targets.energy.daily_calories,
                data.targets.daily_water_ml,
            ],
        )?;

        let id = conn.last_insert_rowid();
        Self::get_by_id(conn, id)?.ok_or_else(|| {
            crate::db::DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows)
        })
    }

    pub fn get_by_id(conn: &Connection, id: i64) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM users WHERE id = ?1")?;

        let result = stmt.query_row([id], Self::from_row);
        match result {
            Ok(user) => Ok(Some(user)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// List all profiles, oldest first
    pub fn list(conn: &Connection) -> DbResult<Vec<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM users ORDER BY id")?;
        let users = stmt
            .query_map([], Self::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(users)
    }

    /// Apply profile changes (not targets; see [`User::set_targets`])
    pub fn update(conn: &Connection, id: i64, data: &UserUpdate) -> DbResult<Option<Self>> {
        let mut updates = Vec::new();
        let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(ref name) = data.name {
            params_vec.push(Box::new(name.clone()));
            updates.push(format!("name = ?{}", params_vec.len()));
        }
        if let Some(ref email) = data.email {
            params_vec.push(Box::new(email.clone()));
            updates.push(format!("email = ?{}", params_vec.len()));
        }
        if let Some(age) = data.age {
            params_vec.push(Box::new(age));
            updates.push(format!("age = ?{}", params_vec.len()));
        }
        if let Some(height) = data.height_cm {
            params_vec.push(Box::new(height));
            updates.push(format!("height_cm = ?{}", params_vec.len()));
        }
        if let Some(weight) = data.weight_kg {
            params_vec.push(Box::new(weight));
            updates.push(format!("weight_kg = ?{}", params_vec.len()));
        }
        if let Some(sex) = data.sex {
            params_vec.push(Box::new(sex.as_str()));
            updates.push(format!("sex = ?{}", params_vec.len()));
        }
        if let Some(level) = data.activity_level {
            params_vec.push(Box::new(level.as_str()));
            updates.push(format!("activity_level = ?{}", params_vec.len()));
        }
        if let Some(goal) = data.goal {
            params_vec.push(Box::new(goal.as_str()));
            updates.push(format!("goal = ?{}", params_vec.len()));
        }
        if let Some(workout_type) = data.workout_type {
            params_vec.push(Box::new(workout_type.as_str()));
            updates.push(format!("workout_type = ?{}", params_vec.len()));
        }

        if updates.is_empty() {
            return Self::get_by_id(conn, id);
        }

        updates.push("updated_at = strftime('%Y-%m-%dT%H:%M:%SZ', 'now')".to_string());
        params_vec.push(Box::new(id));

        let sql = format!(
            "UPDATE users SET {} WHERE id = ?{}",
            updates.join(", "),
            params_vec.len()
        );
        let params_refs: Vec<&dyn rusqlite::ToSql> = params_vec.iter().map(|p| p.as_ref()).collect();
        conn.execute(&sql, params_refs.as_slice())?;

        Self::get_by_id(conn, id)
    }

    /// Overwrite the stored targets
    pub fn set_targets(conn: &Connection, id: i64, targets: &Targets) -> DbResult<bool> {
        let rows = conn.execute(
            r#"
            UPDATE users SET
                bmr = ?1,
                tdee = ?2,
                daily_calories = ?3,
                daily_water_ml = ?4,
                updated_at = strftime('%Y-%m-%dT%H:%M:%SZ', 'now')
            WHERE id = ?5
            "#,
            params![
                targets.energy.bmr,
                targets.energy.tdee,
                targets.energy.daily_calories,
                targets.daily_water_ml,
                id,
            ],
        )?;
        Ok(rows > 0)
    }

    /// Delete a user and, by cascade, everything they own
    pub fn delete(conn: &Connection, id: i64) -> DbResult<bool> {
        let rows = conn.execute("DELETE FROM users WHERE id = ?1", [id])?;
        Ok(rows > 0)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::metabolism::compute_targets;

    /// Insert the 70 kg / 175 cm / 25 y reference profile
    pub fn create_reference_user(conn: &Connection, name: &str) -> User {
        let biometrics = Biometrics { weight_kg: 70.0, height_cm: 175.0, age_years: 25, sex: Sex::Male };
        let targets = compute_targets(&biometrics, ActivityLevel::Light, Goal::Surplus).unwrap();
        User::create(conn, &UserCreate {
            name: name.to_string(),
            email: None,
            biometrics,
            activity_level: ActivityLevel::Light,
            goal: Goal::Surplus,
            workout_type: WorkoutType::Strength,
            targets,
        })
        .unwrap()
    }
}
