//! Built-in workout templates
//!
//! A four-day split for each workout type. Templates are copied into a
//! user's workouts; they are never stored themselves.

use serde::Serialize;

use crate::models::{ExerciseInput, WorkoutType};

#[derive(Debug, Clone, Serialize)]
pub struct TemplateExercise {
    pub name: &'static str,
    pub sets: u32,
    pub reps: &'static str,
    pub rest_seconds: u32,
    pub notes: Option<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WorkoutTemplate {
    pub name: &'static str,
    pub exercises: &'static [TemplateExercise],
}

impl WorkoutTemplate {
    /// Exercises in the form accepted by `Workout::create`
    pub fn exercise_inputs(&self) -> Vec<ExerciseInput> {
        self.exercises
            .iter()
            .map(|ex| ExerciseInput {
                name: ex.name.to_string(),
                sets: ex.sets,
                reps: ex.reps.to_string(),
                rest_seconds: Some(ex.rest_seconds),
                notes: ex.notes.map(str::to_string),
            })
            .collect()
    }
}

const fn ex(name: &'static str, sets: u32, reps: &'static str, rest_seconds: u32) -> TemplateExercise {
    TemplateExercise { name, sets, reps, rest_seconds, notes: None }
}

const fn ex_note(
    name: &'static str,
    sets: u32,
    reps: &'static str,
    rest_seconds: u32,
    notes: &'static str,
) -> TemplateExercise {
    TemplateExercise { name, sets, reps, rest_seconds, notes: Some(notes) }
}

pub const STRENGTH_TEMPLATES: &[WorkoutTemplate] = &[
    WorkoutTemplate {
        name: "Workout A - Chest & Triceps",
        exercises: &[
            ex("Flat Bench Press", 4, "8-12", 90),
            ex("Incline Bench Press", 3, "10-12", 90),
            ex("Dumbbell Fly", 3, "12-15", 60),
            ex("Skull Crushers", 3, "10-12", 60),
            ex("Rope Pushdown", 3, "12-15", 60),
        ],
    },
    WorkoutTemplate {
        name: "Workout B - Back & Biceps",
        exercises: &[
            ex("Pull-up", 4, "6-10", 90),
            ex("Bent-over Row", 4, "8-12", 90),
            ex("Lat Pulldown", 3, "10-12", 60),
            ex("Barbell Curl", 3, "10-12", 60),
            ex("Hammer Curl", 3, "12-15", 60),
        ],
    },
    WorkoutTemplate {
        name: "Workout C - Legs",
        exercises: &[
            ex("Back Squat", 4, "8-12", 120),
            ex("Leg Press", 4, "10-15", 90),
            ex("Leg Extension", 3, "12-15", 60),
            ex("Leg Curl", 3, "12-15", 60),
            ex("Standing Calf Raise", 4, "15-20", 60),
        ],
    },
    WorkoutTemplate {
        name: "Workout D - Shoulders & Abs",
        exercises: &[
            ex("Barbell Overhead Press", 4, "8-12", 90),
            ex("Lateral Raise", 3, "12-15", 60),
            ex("Front Raise", 3, "12-15", 60),
            ex("Shrugs", 3, "12-15", 60),
            ex("Crunches", 3, "15-20", 45),
        ],
    },
];

pub const CALISTHENICS_TEMPLATES: &[WorkoutTemplate] = &[
    WorkoutTemplate {
        name: "Workout A - Push",
        exercises: &[
            ex("Push-up", 4, "10-15", 90),
            ex("Diamond Push-up", 3, "8-12", 90),
            ex("Pike Push-up", 3, "8-12", 90),
            ex("Dips", 3, "8-12", 90),
            ex("Plank", 3, "30-60s", 60),
        ],
    },
    WorkoutTemplate {
        name: "Workout B - Pull",
        exercises: &[
            ex("Pull-up", 4, "5-10", 120),
            ex("Australian Pull-up", 3, "10-15", 90),
            ex("Chin-up", 3, "6-10", 90),
            ex("Inverted Row", 3, "10-15", 90),
            ex("Hollow Body Hold", 3, "20-40s", 60),
        ],
    },
    WorkoutTemplate {
        name: "Workout C - Legs",
        exercises: &[
            ex("Bodyweight Squat", 4, "15-20", 90),
            ex_note("Pistol Squat", 3, "5-10", 90, "each leg"),
            ex_note("Lunge", 3, "10-15", 90, "each leg"),
            ex("Calf Raise", 4, "15-20", 60),
            ex("Glute Bridge", 3, "15-20", 60),
        ],
    },
    WorkoutTemplate {
        name: "Workout D - Core & Skills",
        exercises: &[
            ex("L-Sit", 4, "10-30s", 90),
            ex("Handstand Hold", 3, "10-30s", 90),
            ex("Dragon Flag", 3, "5-10", 90),
            ex_note("Side Plank", 3, "30-45s", 60, "each side"),
            ex("Burpees", 3, "10-15", 60),
        ],
    },
];

pub fn templates_for(workout_type: WorkoutType) -> &'static [WorkoutTemplate] {
    match workout_type {
        WorkoutType::Strength => STRENGTH_TEMPLATES,
        WorkoutType::Calisthenics => CALISTHENICS_TEMPLATES,
    }
}
