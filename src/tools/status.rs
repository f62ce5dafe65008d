//! Status Tool
//!
//! Runtime status of the service and usage instructions for assistants.

use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;

/// Usage guide returned by the `usage_instructions` tool
pub const USAGE_INSTRUCTIONS: &str = r#"
# Solo Leveling Fitness Instructions

## 1. Onboarding

Every other tool needs a `user_id`. Call `list_profiles` first; if the user
has no profile, collect:

| Field | Values |
|-------|--------|
| name, email | free text (email optional) |
| age | years, 1 to 150 |
| height_cm, weight_kg | positive, at most 300 cm and 500 kg |
| sex | `male` (default) or `female` |
| activity_level | `sedentary`, `light`, `moderate`, `intense` |
| goal | `surplus` (bulking, +300 kcal) or `deficit` (cutting, -500 kcal) |
| workout_type | `strength` or `calisthenics` |

`onboard` returns the stored targets: BMR, TDEE, daily calories, daily water,
and the macro split (surplus 30/50/20, deficit 40/30/30 protein/carbs/fat).

## 2. Daily Tracking

- `get_dashboard` shows today's progress (creates the day if needed).
- `add_water` in ml (250 per glass). The day's total is capped at twice the
  water target. Negative amounts undo.
- `add_calories` in kcal. Negative amounts undo; the total never goes below 0.
- Pass `date` as `YYYY-MM-DD` to log a different day.

## 3. Workouts

- `list_templates` shows the four built-in routines for the user's workout type;
  `create_workout_from_template` copies one by index.
- `create_workout` takes a name and a list of exercises (`name`, `sets` >= 1,
  `reps` as text such as "8-12" or "30-60s", optional `rest_seconds`, `notes`).
- `update_workout` with `exercises` replaces the whole list.

## 4. Sessions

1. `start_session` with a `workout_id` returns a `session_id`.
2. `toggle_set` marks a set of the current exercise (0-based index) done or undone.
3. `next_exercise` / `previous_exercise` move through the workout.
4. `finish_session` logs the workout with its duration and marks today's workout
   as completed. `cancel_session` discards it.

Sessions are held in memory and are lost when the server restarts. Sessions
started more than 24 hours ago are dropped when a new one starts.

## 5. Social Feed

`create_post` (type `workout`, `meal`, or `achievement`), `list_feed`,
`toggle_like`, `add_comment`, `get_post`.
"#;

/// Runtime status of the service
#[derive(Debug, Clone, Serialize)]
pub struct ServiceStatus {
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub build_profile: &'static str,
    pub version: &'static str,

    pub database_path: String,
    pub database_size_bytes: Option<u64>,

    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
    pub open_sessions: usize,
}

/// Status tracker for collecting runtime information
pub struct StatusTracker {
    start_time: Instant,
    database_path: PathBuf,
}

impl StatusTracker {
    pub fn new(database_path: PathBuf) -> Self {
        Self {
            start_time: Instant::now(),
            database_path,
        }
    }

    pub fn get_status(&self, open_sessions: usize) -> ServiceStatus {
        let build_info = BuildInfo::current();

        let database_size_bytes = std::fs::metadata(&self.database_path)
            .ok()
            .map(|m| m.len());

        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        ServiceStatus {
            build_number: build_info.build_number,
            build_timestamp: build_info.build_timestamp,
            build_profile: build_info.build_profile,
            version: build_info.version,
            database_path: self.database_path.display().to_string(),
            database_size_bytes,
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
            open_sessions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_for_missing_database() {
        let tracker = StatusTracker::new(PathBuf::from("/nonexistent/slfit.db"));
        let status = tracker.get_status(2);

        assert_eq!(status.database_size_bytes, None);
        assert_eq!(status.process_id, std::process::id());
        assert_eq!(status.open_sessions, 2);
        assert_eq!(status.version, crate::build_info::VERSION);
    }
}
