//! Workout Session MCP Tools
//!
//! A session walks through a workout's exercises one at a time, tracking
//! which sets are done. Sessions live in memory until finished or cancelled;
//! finishing writes a workout log and marks the day's workout as completed.

use std::collections::{BTreeSet, HashMap};
use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::db::{today, Database};
use crate::models::{DailyTracking, User, Workout, WorkoutExercise, WorkoutLog, WorkoutLogCreate};

/// Open sessions older than this are dropped when a new one starts
pub const SESSION_MAX_AGE_HOURS: i64 = 24;

/// An in-progress workout
#[derive(Debug, Clone)]
pub struct WorkoutSession {
    pub id: Uuid,
    pub user_id: i64,
    pub workout_id: i64,
    pub workout_name: String,
    exercises: Vec<WorkoutExercise>,
    current_index: usize,
    completed_sets: BTreeSet<u32>,
    started_at: DateTime<Utc>,
}

impl WorkoutSession {
    /// Start a session; a workout without exercises cannot be run
    pub fn new(workout: Workout, started_at: DateTime<Utc>) -> Result<Self, String> {
        if workout.exercises.is_empty() {
            return Err(format!("Workout '{}' has no exercises", workout.name));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            user_id: workout.user_id,
            workout_id: workout.id,
            workout_name: workout.name,
            exercises: workout.exercises,
            current_index: 0,
            completed_sets: BTreeSet::new(),
            started_at,
        })
    }

    pub fn current_exercise(&self) -> &WorkoutExercise {
        &self.exercises[self.current_index]
    }

    /// Mark a set done, or undo it if already done
    pub fn toggle_set(&mut self, set_index: u32) -> Result<bool, String> {
        let sets = self.current_exercise().sets;
        if set_index >= sets {
            return Err(format!("Set index {} out of range (exercise has {} sets)", set_index, sets));
        }
        if self.completed_sets.remove(&set_index) {
            Ok(false)
        } else {
            self.completed_sets.insert(set_index);
            Ok(true)
        }
    }

    /// Advance to the next exercise; stays put on the last one
    pub fn next_exercise(&mut self) -> bool {
        if self.current_index + 1 < self.exercises.len() {
            self.current_index += 1;
            self.completed_sets.clear();
            true
        } else {
            false
        }
    }

    /// Go back one exercise; stays put on the first one
    pub fn previous_exercise(&mut self) -> bool {
        if self.current_index > 0 {
            self.current_index -= 1;
            self.completed_sets.clear();
            true
        } else {
            false
        }
    }

    pub fn progress_percent(&self) -> f64 {
        (self.current_index + 1) as f64 / self.exercises.len() as f64 * 100.0
    }

    /// Whole minutes elapsed, rounded to nearest
    pub fn duration_minutes(&self, now: DateTime<Utc>) -> i64 {
        let seconds = (now - self.started_at).num_seconds().max(0);
        (seconds as f64 / 60.0).round() as i64
    }

    pub fn view(&self, now: DateTime<Utc>) -> SessionView {
        SessionView {
            session_id: self.id,
            workout_id: self.workout_id,
            workout_name: self.workout_name.clone(),
            exercise_number: self.current_index + 1,
            exercise_count: self.exercises.len(),
            current_exercise: self.current_exercise().clone(),
            completed_sets: self.completed_sets.iter().copied().collect(),
            progress_percent: self.progress_percent(),
            is_last_exercise: self.current_index + 1 == self.exercises.len(),
            elapsed_seconds: (now - self.started_at).num_seconds().max(0),
        }
    }
}

/// Snapshot of a session for display
#[derive(Debug, Serialize)]
pub struct SessionView {
    pub session_id: Uuid,
    pub workout_id: i64,
    pub workout_name: String,
    pub exercise_number: usize,
    pub exercise_count: usize,
    pub current_exercise: WorkoutExercise,
    pub completed_sets: Vec<u32>,
    pub progress_percent: f64,
    pub is_last_exercise: bool,
    pub elapsed_seconds: i64,
}

#[derive(Debug, Serialize)]
pub struct FinishSessionResponse {
    pub log: WorkoutLog,
    pub date: String,
    pub workout_completed: bool,
}

/// All open sessions of this process
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: HashMap<Uuid, WorkoutSession>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Drop sessions started more than `max_age` before `now`; returns how many
    pub fn expire_older_than(&mut self, now: DateTime<Utc>, max_age: Duration) -> usize {
        let before = self.sessions.len();
        self.sessions.retain(|_, s| now - s.started_at <= max_age);
        before - self.sessions.len()
    }

    fn insert(&mut self, session: WorkoutSession) {
        self.sessions.insert(session.id, session);
    }
}

fn parse_session_id(s: &str) -> Result<Uuid, String> {
    Uuid::parse_str(s.trim()).map_err(|_| format!("Invalid session id: {}", s))
}

/// Run `f` on a session with the registry locked
fn with_session<T>(
    registry: &Mutex<SessionRegistry>,
    session_id: &str,
    f: impl FnOnce(&mut WorkoutSession) -> Result<T, String>,
) -> Result<T, String> {
    let id = parse_session_id(session_id)?;
    let mut guard = registry.lock().map_err(|_| "Session registry lock poisoned".to_string())?;
    let session = guard
        .sessions
        .get_mut(&id)
        .ok_or_else(|| format!("Session not found: {}", id))?;
    f(session)
}

pub fn start_session(db: &Database, registry: &Mutex<SessionRegistry>, workout_id: i64) -> Result<SessionView, String> {
    let workout = {
        let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
        Workout::get_by_id(&conn, workout_id)
            .map_err(|e| format!("Failed to get workout: {}", e))?
            .ok_or_else(|| format!("Workout not found with id: {}", workout_id))?
    };

    let now = Utc::now();
    let session = WorkoutSession::new(workout, now)?;
    let view = session.view(now);

    {
        let mut guard = registry.lock().map_err(|_| "Session registry lock poisoned".to_string())?;
        let expired = guard.expire_older_than(now, Duration::hours(SESSION_MAX_AGE_HOURS));
        if expired > 0 {
            tracing::info!(expired, "Dropped stale workout sessions");
        }
        guard.insert(session);
    }

    tracing::info!(session_id = %view.session_id, workout_id, "Started workout session");
    Ok(view)
}

pub fn get_session(registry: &Mutex<SessionRegistry>, session_id: &str) -> Result<SessionView, String> {
    with_session(registry, session_id, |s| Ok(s.view(Utc::now())))
}

pub fn toggle_set(registry: &Mutex<SessionRegistry>, session_id: &str, set_index: u32) -> Result<SessionView, String> {
    with_session(registry, session_id, |s| {
        s.toggle_set(set_index)?;
        Ok(s.view(Utc::now()))
    })
}

pub fn next_exercise(registry: &Mutex<SessionRegistry>, session_id: &str) -> Result<SessionView, String> {
    with_session(registry, session_id, |s| {
        s.next_exercise();
        Ok(s.view(Utc::now()))
    })
}

pub fn previous_exercise(registry: &Mutex<SessionRegistry>, session_id: &str) -> Result<SessionView, String> {
    with_session(registry, session_id, |s| {
        s.previous_exercise();
        Ok(s.view(Utc::now()))
    })
}

/// Discard a session without logging it
pub fn cancel_session(registry: &Mutex<SessionRegistry>, session_id: &str) -> Result<bool, String> {
    let id = parse_session_id(session_id)?;
    let mut guard = registry.lock().map_err(|_| "Session registry lock poisoned".to_string())?;
    Ok(guard.sessions.remove(&id).is_some())
}

/// Close a session: log it and mark today's workout as completed
pub fn finish_session(
    db: &Database,
    registry: &Mutex<SessionRegistry>,
    session_id: &str,
    notes: Option<String>,
) -> Result<FinishSessionResponse, String> {
    let id = parse_session_id(session_id)?;
    let session = registry
        .lock()
        .map_err(|_| "Session registry lock poisoned".to_string())?
        .sessions
        .remove(&id)
        .ok_or_else(|| format!("Session not found: {}", id))?;

    match record_finished(db, &session, notes, Utc::now()) {
        Ok(Some(resp)) => {
            tracing::info!(
                session_id = %id,
                duration_minutes = resp.log.duration_minutes,
                "Finished workout session"
            );
            Ok(resp)
        }
        Ok(None) => {
            tracing::warn!(session_id = %id, user_id = session.user_id, "Discarded session of deleted profile");
            Err(format!("Profile {} no longer exists; session discarded", session.user_id))
        }
        Err(e) => {
            // keep the session so the caller can retry
            if let Ok(mut guard) = registry.lock() {
                guard.insert(session);
            }
            Err(e)
        }
    }
}

/// Write the log and mark the day in one transaction; `None` if the profile is gone
fn record_finished(
    db: &Database,
    session: &WorkoutSession,
    notes: Option<String>,
    now: DateTime<Utc>,
) -> Result<Option<FinishSessionResponse>, String> {
    let date = today();
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
    let tx = conn
        .unchecked_transaction()
        .map_err(|e| format!("Database error: {}", e))?;

    let user = User::get_by_id(&tx, session.user_id)
        .map_err(|e| format!("Failed to get profile: {}", e))?;
    if user.is_none() {
        return Ok(None);
    }

    // The workout may have been deleted while the session was open
    let workout_id = Workout::get_by_id(&tx, session.workout_id)
        .map_err(|e| format!("Failed to get workout: {}", e))?
        .map(|w| w.id);

    let log = WorkoutLog::create(&tx, &WorkoutLogCreate {
        user_id: session.user_id,
        workout_id,
        date: date.clone(),
        duration_minutes: Some(session.duration_minutes(now)),
        notes,
    })
    .map_err(|e| format!("Failed to log workout: {}", e))?;

    let tracking = DailyTracking::get_or_create(&tx, session.user_id, &date)
        .map_err(|e| format!("Failed to get tracking: {}", e))?;
    let workout_completed = DailyTracking::mark_workout_completed(&tx, tracking.id)
        .map_err(|e| format!("Failed to update tracking: {}", e))?;

    tx.commit().map_err(|e| format!("Failed to log workout: {}", e))?;

    Ok(Some(FinishSessionResponse { log, date, workout_completed }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::profiles::onboard;
    use crate::tools::profiles::test_support::{reference_input, temp_database};
    use crate::tools::profiles::delete_profile;
    use crate::tools::workouts::test_support::exercise;
    use crate::tools::workouts::{create_workout, delete_workout, list_workout_logs};

    fn workout_with(exercises: &[(&str, u32)]) -> Workout {
        Workout {
            id: 1,
            user_id: 1,
            name: "Test".to_string(),
            is_template: false,
            exercises: exercises
                .iter()
                .enumerate()
                .map(|(i, (name, sets))| WorkoutExercise {
                    id: i as i64 + 1,
                    workout_id: 1,
                    name: name.to_string(),
                    sets: *sets,
                    reps: "10".to_string(),
                    rest_seconds: None,
                    notes: None,
                    order_index: i as i64,
                    created_at: String::new(),
                })
                .collect(),
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    #[test]
    fn test_empty_workout_rejected() {
        assert!(WorkoutSession::new(workout_with(&[]), Utc::now()).is_err());
    }

    #[test]
    fn test_navigation_stays_in_bounds_and_resets_sets() {
        let mut s = WorkoutSession::new(workout_with(&[("Squat", 3), ("Row", 2)]), Utc::now()).unwrap();

        assert!(!s.previous_exercise());
        assert!((s.progress_percent() - 50.0).abs() < 1e-9);

        s.toggle_set(2).unwrap();
        assert!(s.next_exercise());
        assert_eq!(s.current_exercise().name, "Row");
        assert!(s.view(Utc::now()).completed_sets.is_empty());
        assert!(!s.next_exercise());
        assert!((s.progress_percent() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_toggle_set() {
        let mut s = WorkoutSession::new(workout_with(&[("Squat", 3)]), Utc::now()).unwrap();

        assert!(s.toggle_set(0).unwrap());
        assert!(s.toggle_set(2).unwrap());
        assert!(!s.toggle_set(0).unwrap());
        assert_eq!(s.view(Utc::now()).completed_sets, vec![2]);
        assert!(s.toggle_set(3).is_err());
    }

    #[test]
    fn test_duration_rounds_to_nearest_minute() {
        let start = Utc::now();
        let s = WorkoutSession::new(workout_with(&[("Squat", 3)]), start).unwrap();

        assert_eq!(s.duration_minutes(start + Duration::seconds(29)), 0);
        assert_eq!(s.duration_minutes(start + Duration::seconds(90)), 2);
        assert_eq!(s.duration_minutes(start + Duration::minutes(45) + Duration::seconds(10)), 45);
    }

    #[test]
    fn test_full_session_logs_and_marks_day() {
        let (_dir, db) = temp_database();
        let registry = Mutex::new(SessionRegistry::new());
        let user_id = onboard(&db, reference_input()).unwrap().user.id;
        let workout = create_workout(&db, user_id, "Legs", vec![exercise("Squat", 3), exercise("Lunge", 2)]).unwrap();

        let view = start_session(&db, &registry, workout.id).unwrap();
        let sid = view.session_id.to_string();
        assert_eq!(view.exercise_count, 2);

        toggle_set(&registry, &sid, 0).unwrap();
        let view = next_exercise(&registry, &sid).unwrap();
        assert!(view.is_last_exercise);

        let resp = finish_session(&db, &registry, &sid, Some("felt strong".to_string())).unwrap();
        assert!(resp.workout_completed);
        assert_eq!(resp.log.workout_id, Some(workout.id));
        assert_eq!(resp.log.duration_minutes, Some(0));
        assert!(registry.lock().unwrap().is_empty());

        let conn = db.get_conn().unwrap();
        let day = DailyTracking::get(&conn, user_id, &resp.date).unwrap().unwrap();
        assert!(day.workout_completed);
    }

    #[test]
    fn test_unknown_and_cancelled_sessions() {
        let (_dir, db) = temp_database();
        let registry = Mutex::new(SessionRegistry::new());
        let user_id = onboard(&db, reference_input()).unwrap().user.id;
        let workout = create_workout(&db, user_id, "Push", vec![exercise("Dips", 3)]).unwrap();

        assert!(get_session(&registry, "not-a-uuid").is_err());
        assert!(start_session(&db, &registry, 999).is_err());

        let sid = start_session(&db, &registry, workout.id).unwrap().session_id.to_string();
        assert!(cancel_session(&registry, &sid).unwrap());
        assert!(!cancel_session(&registry, &sid).unwrap());
        assert!(finish_session(&db, &registry, &sid, None).is_err());
    }

    #[test]
    fn test_finish_after_workout_deleted() {
        let (_dir, db) = temp_database();
        let registry = Mutex::new(SessionRegistry::new());
        let user_id = onboard(&db, reference_input()).unwrap().user.id;
        let workout = create_workout(&db, user_id, "Pull", vec![exercise("Row", 3)]).unwrap();

        let sid = start_session(&db, &registry, workout.id).unwrap().session_id.to_string();
        delete_workout(&db, workout.id).unwrap();

        let resp = finish_session(&db, &registry, &sid, None).unwrap();
        assert_eq!(resp.log.workout_id, None);
        assert!(resp.workout_completed);
        assert!(registry.lock().unwrap().is_empty());
        assert_eq!(list_workout_logs(&db, user_id, 10, 0).unwrap().len(), 1);
    }

    #[test]
    fn test_finish_after_profile_deleted_discards_session() {
        let (_dir, db) = temp_database();
        let registry = Mutex::new(SessionRegistry::new());
        let user_id = onboard(&db, reference_input()).unwrap().user.id;
        let workout = create_workout(&db, user_id, "Pull", vec![exercise("Row", 3)]).unwrap();

        let sid = start_session(&db, &registry, workout.id).unwrap().session_id.to_string();
        delete_profile(&db, user_id).unwrap();

        assert!(finish_session(&db, &registry, &sid, None).unwrap_err().contains("discarded"));
        assert!(registry.lock().unwrap().is_empty());
    }

    #[test]
    fn test_failed_finish_writes_nothing_and_can_be_retried() {
        let (_dir, db) = temp_database();
        let registry = Mutex::new(SessionRegistry::new());
        let user_id = onboard(&db, reference_input()).unwrap().user.id;
        let workout = create_workout(&db, user_id, "Legs", vec![exercise("Squat", 3)]).unwrap();
        let sid = start_session(&db, &registry, workout.id).unwrap().session_id.to_string();

        let conn = db.get_conn().unwrap();
        conn.execute_batch(
            "CREATE TRIGGER lock_tracking BEFORE UPDATE OF workout_completed ON daily_tracking
             BEGIN SELECT RAISE(ABORT, 'tracking locked'); END;",
        )
        .unwrap();

        assert!(finish_session(&db, &registry, &sid, None).unwrap_err().contains("tracking locked"));
        assert_eq!(registry.lock().unwrap().len(), 1);
        assert!(list_workout_logs(&db, user_id, 10, 0).unwrap().is_empty());

        conn.execute_batch("DROP TRIGGER lock_tracking;").unwrap();
        finish_session(&db, &registry, &sid, None).unwrap();
        assert_eq!(list_workout_logs(&db, user_id, 10, 0).unwrap().len(), 1);
    }

    #[test]
    fn test_stale_sessions_expire() {
        let now = Utc::now();
        let mut registry = SessionRegistry::new();
        registry.insert(WorkoutSession::new(workout_with(&[("Squat", 3)]), now - Duration::hours(25)).unwrap());
        registry.insert(WorkoutSession::new(workout_with(&[("Row", 3)]), now - Duration::hours(1)).unwrap());

        assert_eq!(registry.expire_older_than(now, Duration::hours(SESSION_MAX_AGE_HOURS)), 1);
        assert_eq!(registry.len(), 1);
    }
}
