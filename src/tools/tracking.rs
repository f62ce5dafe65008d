//! Daily Tracking MCP Tools
//!
//! Dashboard view, water and calorie logging, and tracking history.

use serde::Serialize;

use crate::db::{today, Database};
use crate::metabolism::{compute_macros, MacroProfile};
use crate::models::{DailyTracking, User};

/// Water intake may not exceed this multiple of the daily target
const WATER_CAP_MULTIPLIER: i64 = 2;

/// One axis of the dashboard radar chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatPoint {
    pub stat: &'static str,
    pub value: u32,
    pub max: u32,
}

/// Everything shown on the dashboard for one day
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub user_id: i64,
    pub name: String,
    pub date: String,
    pub bmr: i64,
    pub daily_calories: i64,
    pub daily_water_ml: i64,
    pub macros: MacroProfile,
    pub tracking: DailyTracking,
    pub water_progress_percent: f64,
    pub calories_progress_percent: f64,
    pub stats: Vec<StatPoint>,
}

#[derive(Debug, Serialize)]
pub struct TrackingUpdateResponse {
    pub tracking: DailyTracking,
    pub target: i64,
    pub progress_percent: f64,
}

#[derive(Debug, Serialize)]
pub struct ListTrackingResponse {
    pub days: Vec<DailyTracking>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}

fn progress_percent(consumed: i64, target: i64) -> f64 {
    if target <= 0 {
        return 0.0;
    }
    consumed as f64 / target as f64 * 100.0
}

/// Radar-chart stats; only nutrition, hydration, and consistency move
pub fn radar_stats(calories_progress: f64, water_progress: f64, workout_completed: bool) -> Vec<StatPoint> {
    let point = |stat, value| StatPoint { stat, value, max: 100 };
    vec![
        point("strength", 65),
        point("endurance", 70),
        point("agility", 60),
        point("nutrition", if calories_progress > 80.0 { 85 } else { 50 }),
        point("hydration", if water_progress > 80.0 { 90 } else { 55 }),
        point("consistency", if workout_completed { 75 } else { 40 }),
    ]
}

fn load_user(conn: &rusqlite::Connection, user_id: i64) -> Result<User, String> {
    User::get_by_id(conn, user_id)
        .map_err(|e| format!("Failed to get profile: {}", e))?
        .ok_or_else(|| format!("Profile not found with id: {}", user_id))
}

/// Dashboard for a user and date (default today); creates the day's row if missing
pub fn get_dashboard(db: &Database, user_id: i64, date: Option<&str>) -> Result<DashboardResponse, String> {
    let date = date.map(str::to_string).unwrap_or_else(today);
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let user = load_user(&conn, user_id)?;
    let tracking = DailyTracking::get_or_create(&conn, user.id, &date)
        .map_err(|e| format!("Failed to get tracking: {}", e))?;

    let water_progress = progress_percent(tracking.water_consumed_ml, user.daily_water_ml);
    let calories_progress = progress_percent(tracking.calories_consumed, user.daily_calories);

    Ok(DashboardResponse {
        user_id: user.id,
        name: user.name,
        date,
        bmr: user.bmr.round() as i64,
        daily_calories: user.daily_calories,
        daily_water_ml: user.daily_water_ml,
        macros: compute_macros(user.daily_calories, user.goal),
        stats: radar_stats(calories_progress, water_progress, tracking.workout_completed),
        tracking,
        water_progress_percent: water_progress,
        calories_progress_percent: calories_progress,
    })
}

/// Log water (negative to undo); total stays within 0..=2x the daily target
pub fn add_water(db: &Database, user_id: i64, amount_ml: i64, date: Option<&str>) -> Result<TrackingUpdateResponse, String> {
    let date = date.map(str::to_string).unwrap_or_else(today);
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let user = load_user(&conn, user_id)?;
    let day = DailyTracking::get_or_create(&conn, user.id, &date)
        .map_err(|e| format!("Failed to get tracking: {}", e))?;

    let cap = user.daily_water_ml.saturating_mul(WATER_CAP_MULTIPLIER);
    let tracking = DailyTracking::add_water(&conn, day.id, amount_ml, cap)
        .map_err(|e| format!("Failed to add water: {}", e))?
        .ok_or_else(|| "Tracking row disappeared".to_string())?;

    Ok(TrackingUpdateResponse {
        progress_percent: progress_percent(tracking.water_consumed_ml, user.daily_water_ml),
        target: user.daily_water_ml,
        tracking,
    })
}

/// Log calories (negative to undo); total never drops below zero
pub fn add_calories(db: &Database, user_id: i64, amount: i64, date: Option<&str>) -> Result<TrackingUpdateResponse, String> {
    let date = date.map(str::to_string).unwrap_or_else(today);
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let user = load_user(&conn, user_id)?;
    let day = DailyTracking::get_or_create(&conn, user.id, &date)
        .map_err(|e| format!("Failed to get tracking: {}", e))?;

    let tracking = DailyTracking::add_calories(&conn, day.id, amount)
        .map_err(|e| format!("Failed to add calories: {}", e))?
        .ok_or_else(|| "Tracking row disappeared".to_string())?;

    Ok(TrackingUpdateResponse {
        progress_percent: progress_percent(tracking.calories_consumed, user.daily_calories),
        target: user.daily_calories,
        tracking,
    })
}

pub fn list_tracking(
    db: &Database,
    user_id: i64,
    start_date: Option<&str>,
    end_date: Option<&str>,
    limit: i64,
    offset: i64,
) -> Result<ListTrackingResponse, String> {
    let limit = limit.clamp(1, 366);
    let offset = offset.max(0);

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let days = DailyTracking::list_for_user(&conn, user_id, start_date, end_date, limit, offset)
        .map_err(|e| format!("Failed to list tracking: {}", e))?;
    let total = DailyTracking::count_for_user(&conn, user_id)
        .map_err(|e| format!("Failed to count tracking: {}", e))?;

    Ok(ListTrackingResponse { days, total, limit, offset })
}
