//! Data models
//!
//! Rust structs representing database entities.

mod comment;
mod daily_tracking;
mod post;
pub(crate) mod user;
mod workout;
mod workout_log;

pub use comment::{Comment, CommentCreate};
pub use daily_tracking::DailyTracking;
pub use post::{FeedPost, Post, PostCreate, PostLike, PostType};
pub use user::{User, UserCreate, UserUpdate, WorkoutType};
pub use workout::{ExerciseInput, Workout, WorkoutCreate, WorkoutExercise, WorkoutUpdate};
pub use workout_log::{WorkoutLog, WorkoutLogCreate};
