//! MCP Server Implementation
//!
//! Exposes every tool over MCP.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::{Deserialize, Serialize};

use crate::db::Database;
use crate::metabolism::{compute_targets, Biometrics};
use crate::models::{ExerciseInput, UserUpdate};
use crate::tools::profiles::{
    self, parse_activity_level, parse_goal, parse_sex, parse_workout_type, OnboardingInput,
};
use crate::tools::sessions::{self, SessionRegistry};
use crate::tools::status::StatusTracker;
use crate::tools::{social, tracking, workouts};

/// Solo Leveling Fitness MCP service
#[derive(Clone)]
pub struct FitnessService {
    status_tracker: Arc<StatusTracker>,
    database: Database,
    sessions: Arc<Mutex<SessionRegistry>>,
    tool_router: ToolRouter<FitnessService>,
}

impl FitnessService {
    pub fn new(database_path: PathBuf, database: Database) -> Self {
        Self {
            status_tracker: Arc::new(StatusTracker::new(database_path)),
            database,
            sessions: Arc::new(Mutex::new(SessionRegistry::new())),
            tool_router: Self::tool_router(),
        }
    }
}

fn to_json_text<T: Serialize>(value: &T) -> Result<String, McpError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))
}

fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    Ok(CallToolResult::success(vec![Content::text(to_json_text(value)?)]))
}

fn not_found(kind: &str, id: i64) -> serde_json::Value {
    serde_json::json!({ "error": format!("{} not found", kind), "id": id })
}

fn optional_result<T: Serialize>(value: Option<T>, kind: &str, id: i64) -> Result<CallToolResult, McpError> {
    match value {
        Some(v) => json_result(&v),
        None => json_result(&not_found(kind, id)),
    }
}

fn tool_error(e: String) -> McpError {
    McpError::internal_error(e, None)
}

// ============================================================================
// Profile Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CalculateTargetsParams {
    /// Body weight in kilograms
    pub weight_kg: f64,
    /// Height in centimeters
    pub height_cm: f64,
    /// Age in years
    pub age: u32,
    /// male (default) or female
    pub sex: Option<String>,
    /// sedentary, light, moderate, or intense
    pub activity_level: String,
    /// surplus (bulking) or deficit (cutting)
    pub goal: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct OnboardParams {
    pub name: String,
    pub email: Option<String>,
    pub age: u32,
    pub height_cm: f64,
    pub weight_kg: f64,
    /// male (default) or female
    pub sex: Option<String>,
    /// sedentary, light, moderate, or intense
    pub activity_level: String,
    /// surplus (bulking) or deficit (cutting)
    pub goal: String,
    /// strength or calisthenics
    #[serde(default = "default_workout_type")]
    pub workout_type: String,
}

fn default_workout_type() -> String { "strength".to_string() }

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct UserIdParams {
    pub user_id: i64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct UpdateProfileParams {
    pub user_id: i64,
    pub name: Option<String>,
    pub email: Option<String>,
    pub age: Option<u32>,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub sex: Option<String>,
    pub activity_level: Option<String>,
    pub goal: Option<String>,
    pub workout_type: Option<String>,
}

// ============================================================================
// Tracking Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DashboardParams {
    pub user_id: i64,
    /// ISO date (YYYY-MM-DD), defaults to today
    pub date: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AddWaterParams {
    pub user_id: i64,
    /// Milliliters to add (negative to undo)
    pub amount_ml: i64,
    /// ISO date (YYYY-MM-DD), defaults to today
    pub date: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AddCaloriesParams {
    pub user_id: i64,
    /// Kilocalories to add (negative to undo)
    pub amount: i64,
    /// ISO date (YYYY-MM-DD), defaults to today
    pub date: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListTrackingParams {
    pub user_id: i64,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    #[serde(default = "default_list_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_list_limit() -> i64 { 30 }

// ============================================================================
// Workout Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ExerciseParams {
    pub name: String,
    pub sets: u32,
    /// Free text, e.g. "8-12" or "30-60s"
    pub reps: String,
    pub rest_seconds: Option<u32>,
    pub notes: Option<String>,
}

impl From<ExerciseParams> for ExerciseInput {
    fn from(p: ExerciseParams) -> Self {
        ExerciseInput {
            name: p.name,
            sets: p.sets,
            reps: p.reps,
            rest_seconds: p.rest_seconds,
            notes: p.notes,
        }
    }
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CreateFromTemplateParams {
    pub user_id: i64,
    /// Index from list_templates
    pub template_index: usize,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CreateWorkoutParams {
    pub user_id: i64,
    pub name: String,
    pub exercises: Vec<ExerciseParams>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct WorkoutIdParams {
    pub workout_id: i64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct UpdateWorkoutParams {
    pub workout_id: i64,
    pub name: Option<String>,
    /// Replaces the whole exercise list when given
    pub exercises: Option<Vec<ExerciseParams>>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListWorkoutLogsParams {
    pub user_id: i64,
    #[serde(default = "default_list_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

// ============================================================================
// Session Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SessionIdParams {
    pub session_id: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ToggleSetParams {
    pub session_id: String,
    /// 0-based set index within the current exercise
    pub set_index: u32,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct FinishSessionParams {
    pub session_id: String,
    pub notes: Option<String>,
}

// ============================================================================
// Social Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CreatePostParams {
    pub user_id: i64,
    /// workout, meal, or achievement
    pub post_type: String,
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListFeedParams {
    /// Viewer, used for the is_liked flag
    pub user_id: i64,
    #[serde(default = "default_feed_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_feed_limit() -> i64 { 20 }

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct PostViewerParams {
    pub post_id: i64,
    pub user_id: i64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AddCommentParams {
    pub post_id: i64,
    pub user_id: i64,
    pub content: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct PostIdParams {
    pub post_id: i64,
}

// ============================================================================
// Tool Router
// ============================================================================

#[tool_router]
impl FitnessService {
    // --- Status ---

    #[tool(description = "Get service status: build info, database path and size, uptime, memory, open sessions")]
    async fn slfit_status(&self) -> Result<CallToolResult, McpError> {
        let open_sessions = self
            .sessions
            .lock()
            .map(|s| s.len())
            .map_err(|_| McpError::internal_error("Session registry lock poisoned", None))?;
        json_result(&self.status_tracker.get_status(open_sessions))
    }

    #[tool(description = "Get step-by-step instructions for onboarding, tracking, workouts, sessions, and the feed. Call this first when unsure how to use the tools.")]
    async fn usage_instructions(&self) -> Result<CallToolResult, McpError> {
        use crate::tools::status::USAGE_INSTRUCTIONS;
        Ok(CallToolResult::success(vec![Content::text(USAGE_INSTRUCTIONS)]))
    }

    // --- Profiles ---

    #[tool(description = "Compute BMR, TDEE, daily calories, water, and macros without saving anything")]
    async fn calculate_targets(&self, Parameters(p): Parameters<CalculateTargetsParams>) -> Result<CallToolResult, McpError> {
        let biometrics = Biometrics {
            weight_kg: p.weight_kg,
            height_cm: p.height_cm,
            age_years: p.age,
            sex: parse_sex(p.sex.as_deref()).map_err(tool_error)?,
        };
        let level = parse_activity_level(&p.activity_level).map_err(tool_error)?;
        let goal = parse_goal(&p.goal).map_err(tool_error)?;
        let targets = compute_targets(&biometrics, level, goal).map_err(|e| tool_error(e.to_string()))?;
        json_result(&targets)
    }

    #[tool(description = "Create a profile from biometrics and goals; computes and stores daily targets")]
    async fn onboard(&self, Parameters(p): Parameters<OnboardParams>) -> Result<CallToolResult, McpError> {
        let input = OnboardingInput {
            name: p.name, email: p.email, age: p.age, height_cm: p.height_cm, weight_kg: p.weight_kg,
            sex: p.sex, activity_level: p.activity_level, goal: p.goal, workout_type: p.workout_type,
        };
        let result = profiles::onboard(&self.database, input).map_err(tool_error)?;
        json_result(&result)
    }

    #[tool(description = "Get a profile with its stored targets and macro split")]
    async fn get_profile(&self, Parameters(p): Parameters<UserIdParams>) -> Result<CallToolResult, McpError> {
        let result = profiles::get_profile(&self.database, p.user_id).map_err(tool_error)?;
        optional_result(result, "Profile", p.user_id)
    }

    #[tool(description = "List all local profiles")]
    async fn list_profiles(&self) -> Result<CallToolResult, McpError> {
        let result = profiles::list_profiles(&self.database).map_err(tool_error)?;
        json_result(&result)
    }

    #[tool(description = "Update a profile. Targets are recomputed when age, height, weight, sex, activity level, or goal change.")]
    async fn update_profile(&self, Parameters(p): Parameters<UpdateProfileParams>) -> Result<CallToolResult, McpError> {
        let data = UserUpdate {
            name: p.name,
            email: p.email,
            age: p.age,
            height_cm: p.height_cm,
            weight_kg: p.weight_kg,
            sex: p.sex.as_deref().map(|s| parse_sex(Some(s))).transpose().map_err(tool_error)?,
            activity_level: p.activity_level.as_deref().map(parse_activity_level).transpose().map_err(tool_error)?,
            goal: p.goal.as_deref().map(parse_goal).transpose().map_err(tool_error)?,
            workout_type: p.workout_type.as_deref().map(parse_workout_type).transpose().map_err(tool_error)?,
        };
        let result = profiles::update_profile(&self.database, p.user_id, data).map_err(tool_error)?;
        optional_result(result, "Profile", p.user_id)
    }

    #[tool(description = "Re-derive a profile's stored targets from its stored biometrics")]
    async fn recalculate_targets(&self, Parameters(p): Parameters<UserIdParams>) -> Result<CallToolResult, McpError> {
        let result = profiles::recalculate_targets(&self.database, p.user_id).map_err(tool_error)?;
        optional_result(result, "Profile", p.user_id)
    }

    #[tool(description = "Delete a profile and all of its tracking, workouts, posts, and comments")]
    async fn delete_profile(&self, Parameters(p): Parameters<UserIdParams>) -> Result<CallToolResult, McpError> {
        let deleted = profiles::delete_profile(&self.database, p.user_id).map_err(tool_error)?;
        json_result(&serde_json::json!({ "user_id": p.user_id, "deleted": deleted }))
    }

    // --- Tracking ---

    #[tool(description = "Get the dashboard for a day: targets, macros, water and calorie progress, and stats")]
    async fn get_dashboard(&self, Parameters(p): Parameters<DashboardParams>) -> Result<CallToolResult, McpError> {
        let result = tracking::get_dashboard(&self.database, p.user_id, p.date.as_deref()).map_err(tool_error)?;
        json_result(&result)
    }

    #[tool(description = "Log water in ml (negative to undo). The day's total is capped at twice the water target.")]
    async fn add_water(&self, Parameters(p): Parameters<AddWaterParams>) -> Result<CallToolResult, McpError> {
        let result = tracking::add_water(&self.database, p.user_id, p.amount_ml, p.date.as_deref()).map_err(tool_error)?;
        json_result(&result)
    }

    #[tool(description = "Log calories in kcal (negative to undo). The day's total never drops below zero.")]
    async fn add_calories(&self, Parameters(p): Parameters<AddCaloriesParams>) -> Result<CallToolResult, McpError> {
        let result = tracking::add_calories(&self.database, p.user_id, p.amount, p.date.as_deref()).map_err(tool_error)?;
        json_result(&result)
    }

    #[tool(description = "List a user's daily tracking history, newest first, with optional date range")]
    async fn list_tracking(&self, Parameters(p): Parameters<ListTrackingParams>) -> Result<CallToolResult, McpError> {
        let result = tracking::list_tracking(
            &self.database, p.user_id, p.start_date.as_deref(), p.end_date.as_deref(), p.limit, p.offset,
        )
        .map_err(tool_error)?;
        json_result(&result)
    }

    // --- Workouts ---

    #[tool(description = "List the built-in workout templates for the user's workout type")]
    async fn list_templates(&self, Parameters(p): Parameters<UserIdParams>) -> Result<CallToolResult, McpError> {
        let result = workouts::list_templates(&self.database, p.user_id).map_err(tool_error)?;
        json_result(&result)
    }

    #[tool(description = "Create a workout by copying a built-in template")]
    async fn create_workout_from_template(&self, Parameters(p): Parameters<CreateFromTemplateParams>) -> Result<CallToolResult, McpError> {
        let result = workouts::create_from_template(&self.database, p.user_id, p.template_index).map_err(tool_error)?;
        json_result(&result)
    }

    #[tool(description = "Create a custom workout with a name and at least one exercise")]
    async fn create_workout(&self, Parameters(p): Parameters<CreateWorkoutParams>) -> Result<CallToolResult, McpError> {
        let exercises = p.exercises.into_iter().map(ExerciseInput::from).collect();
        let result = workouts::create_workout(&self.database, p.user_id, &p.name, exercises).map_err(tool_error)?;
        json_result(&result)
    }

    #[tool(description = "Get a workout with its exercises in order")]
    async fn get_workout(&self, Parameters(p): Parameters<WorkoutIdParams>) -> Result<CallToolResult, McpError> {
        let result = workouts::get_workout(&self.database, p.workout_id).map_err(tool_error)?;
        optional_result(result, "Workout", p.workout_id)
    }

    #[tool(description = "List a user's workouts, newest first")]
    async fn list_workouts(&self, Parameters(p): Parameters<UserIdParams>) -> Result<CallToolResult, McpError> {
        let result = workouts::list_workouts(&self.database, p.user_id).map_err(tool_error)?;
        json_result(&result)
    }

    #[tool(description = "Rename a workout and/or replace its exercise list")]
    async fn update_workout(&self, Parameters(p): Parameters<UpdateWorkoutParams>) -> Result<CallToolResult, McpError> {
        let exercises = p.exercises.map(|list| list.into_iter().map(ExerciseInput::from).collect());
        let result = workouts::update_workout(&self.database, p.workout_id, p.name, exercises).map_err(tool_error)?;
        optional_result(result, "Workout", p.workout_id)
    }

    #[tool(description = "Delete a workout. Past workout logs are kept.")]
    async fn delete_workout(&self, Parameters(p): Parameters<WorkoutIdParams>) -> Result<CallToolResult, McpError> {
        let result = workouts::delete_workout(&self.database, p.workout_id).map_err(tool_error)?;
        json_result(&result)
    }

    #[tool(description = "List finished workout sessions, newest first")]
    async fn list_workout_logs(&self, Parameters(p): Parameters<ListWorkoutLogsParams>) -> Result<CallToolResult, McpError> {
        let result = workouts::list_workout_logs(&self.database, p.user_id, p.limit, p.offset).map_err(tool_error)?;
        json_result(&result)
    }

    // --- Sessions ---

    #[tool(description = "Start a timed session for a workout; returns a session_id")]
    async fn start_session(&self, Parameters(p): Parameters<WorkoutIdParams>) -> Result<CallToolResult, McpError> {
        let result = sessions::start_session(&self.database, &self.sessions, p.workout_id).map_err(tool_error)?;
        json_result(&result)
    }

    #[tool(description = "Show a session's current exercise, completed sets, and progress")]
    async fn get_session(&self, Parameters(p): Parameters<SessionIdParams>) -> Result<CallToolResult, McpError> {
        let result = sessions::get_session(&self.sessions, &p.session_id).map_err(tool_error)?;
        json_result(&result)
    }

    #[tool(description = "Mark a set of the current exercise done, or undo it")]
    async fn toggle_set(&self, Parameters(p): Parameters<ToggleSetParams>) -> Result<CallToolResult, McpError> {
        let result = sessions::toggle_set(&self.sessions, &p.session_id, p.set_index).map_err(tool_error)?;
        json_result(&result)
    }

    #[tool(description = "Move to the next exercise (completed sets reset)")]
    async fn next_exercise(&self, Parameters(p): Parameters<SessionIdParams>) -> Result<CallToolResult, McpError> {
        let result = sessions::next_exercise(&self.sessions, &p.session_id).map_err(tool_error)?;
        json_result(&result)
    }

    #[tool(description = "Move to the previous exercise (completed sets reset)")]
    async fn previous_exercise(&self, Parameters(p): Parameters<SessionIdParams>) -> Result<CallToolResult, McpError> {
        let result = sessions::previous_exercise(&self.sessions, &p.session_id).map_err(tool_error)?;
        json_result(&result)
    }

    #[tool(description = "Finish a session: logs the workout with its duration and marks today's workout as completed")]
    async fn finish_session(&self, Parameters(p): Parameters<FinishSessionParams>) -> Result<CallToolResult, McpError> {
        let result = sessions::finish_session(&self.database, &self.sessions, &p.session_id, p.notes).map_err(tool_error)?;
        json_result(&result)
    }

    #[tool(description = "Discard a session without logging it")]
    async fn cancel_session(&self, Parameters(p): Parameters<SessionIdParams>) -> Result<CallToolResult, McpError> {
        let cancelled = sessions::cancel_session(&self.sessions, &p.session_id).map_err(tool_error)?;
        json_result(&serde_json::json!({ "session_id": p.session_id, "cancelled": cancelled }))
    }

    // --- Social ---

    #[tool(description = "Share a post (workout, meal, or achievement) to the feed")]
    async fn create_post(&self, Parameters(p): Parameters<CreatePostParams>) -> Result<CallToolResult, McpError> {
        let result = social::create_post(&self.database, p.user_id, &p.post_type, &p.title, &p.content, p.image_url)
            .map_err(tool_error)?;
        json_result(&result)
    }

    #[tool(description = "List the feed, newest first, with like and comment counts")]
    async fn list_feed(&self, Parameters(p): Parameters<ListFeedParams>) -> Result<CallToolResult, McpError> {
        let result = social::list_feed(&self.database, p.user_id, p.limit, p.offset).map_err(tool_error)?;
        json_result(&result)
    }

    #[tool(description = "Get a post with its comments")]
    async fn get_post(&self, Parameters(p): Parameters<PostViewerParams>) -> Result<CallToolResult, McpError> {
        let result = social::get_post(&self.database, p.post_id, p.user_id).map_err(tool_error)?;
        optional_result(result, "Post", p.post_id)
    }

    #[tool(description = "Like a post, or remove the like if already liked")]
    async fn toggle_like(&self, Parameters(p): Parameters<PostViewerParams>) -> Result<CallToolResult, McpError> {
        let result = social::toggle_like(&self.database, p.post_id, p.user_id).map_err(tool_error)?;
        json_result(&result)
    }

    #[tool(description = "Comment on a post")]
    async fn add_comment(&self, Parameters(p): Parameters<AddCommentParams>) -> Result<CallToolResult, McpError> {
        let result = social::add_comment(&self.database, p.post_id, p.user_id, &p.content).map_err(tool_error)?;
        json_result(&result)
    }

    #[tool(description = "List a post's comments, oldest first")]
    async fn list_comments(&self, Parameters(p): Parameters<PostIdParams>) -> Result<CallToolResult, McpError> {
        let result = social::list_comments(&self.database, p.post_id).map_err(tool_error)?;
        json_result(&result)
    }

    #[tool(description = "Delete a post with its likes and comments")]
    async fn delete_post(&self, Parameters(p): Parameters<PostIdParams>) -> Result<CallToolResult, McpError> {
        let deleted = social::delete_post(&self.database, p.post_id).map_err(tool_error)?;
        json_result(&serde_json::json!({ "post_id": p.post_id, "deleted": deleted }))
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for FitnessService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "slfit".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("Solo Leveling Fitness".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Solo Leveling Fitness - nutrition targets, daily tracking, workouts, and a progress feed. \
                 IMPORTANT: Call usage_instructions before the first onboarding or session. \
                 Profiles: calculate_targets, onboard, get/list/update/delete_profile, recalculate_targets. \
                 Tracking: get_dashboard, add_water, add_calories, list_tracking. \
                 Workouts: list_templates, create_workout_from_template, create/get/list/update/delete_workout, list_workout_logs. \
                 Sessions: start_session, get_session, toggle_set, next_exercise, previous_exercise, finish_session, cancel_session. \
                 Feed: create_post, list_feed, get_post, toggle_like, add_comment, list_comments, delete_post."
                    .into(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::profiles::test_support::temp_database;

    fn service() -> (tempfile::TempDir, FitnessService) {
        let (dir, db) = temp_database();
        let path = dir.path().join("test.db");
        (dir, FitnessService::new(path, db))
    }

    #[test]
    fn test_not_found_payload() {
        let text = to_json_text(&not_found("Workout", 7)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["error"], "Workout not found");
        assert_eq!(value["id"], 7);
    }

    #[test]
    fn test_param_defaults() {
        let onboard: OnboardParams = serde_json::from_value(serde_json::json!({
            "name": "Jin", "age": 25, "height_cm": 175.0, "weight_kg": 70.0,
            "activity_level": "light", "goal": "surplus"
        }))
        .unwrap();
        assert_eq!(onboard.workout_type, "strength");

        let feed: ListFeedParams = serde_json::from_value(serde_json::json!({ "user_id": 1 })).unwrap();
        assert_eq!((feed.limit, feed.offset), (20, 0));
    }

    #[test]
    fn test_exercise_params_conversion() {
        let input = ExerciseInput::from(ExerciseParams {
            name: "Pull-up".to_string(),
            sets: 4,
            reps: "6-10".to_string(),
            rest_seconds: Some(90),
            notes: None,
        });
        assert_eq!(input.name, "Pull-up");
        assert_eq!(input.sets, 4);
        assert_eq!(input.rest_seconds, Some(90));
    }

    #[test]
    fn test_server_info() {
        let (_dir, service) = service();
        let info = service.get_info();
        assert_eq!(info.server_info.name, "slfit");
        assert!(info.capabilities.tools.is_some());
    }

    #[tokio::test]
    async fn test_calculate_targets_tool() {
        let (_dir, service) = service();
        let params = |weight_kg: f64| CalculateTargetsParams {
            weight_kg,
            height_cm: 175.0,
            age: 25,
            sex: None,
            activity_level: "light".to_string(),
            goal: "surplus".to_string(),
        };

        assert!(service.calculate_targets(Parameters(params(70.0))).await.is_ok());
        assert!(service.calculate_targets(Parameters(params(1e18))).await.is_err());
    }

    #[tokio::test]
    async fn test_session_tools_report_unknown_session() {
        let (_dir, service) = service();
        let params = SessionIdParams { session_id: uuid::Uuid::new_v4().to_string() };
        assert!(service.get_session(Parameters(params)).await.is_err());
        assert!(service.slfit_status().await.is_ok());
    }
}
