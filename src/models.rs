// ABOUTME: Core data models for the FitGenius API
// ABOUTME: Defines User, CheckIn, WorkoutPlan and the tracking record structures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitGenius

//! # Data Models
//!
//! Common data structures for users, wellness check-ins, workout plans, and
//! tracking records. All wire serialization uses camelCase field names to
//! match the web client.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ================================================================================================
// Users
// ================================================================================================

/// A registered user and their onboarding profile
///
/// The profile fields feed the AI plan generators: age, weight, height and
/// fitness level shape the workout plan, calorie target shapes the meal plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user identifier
    pub id: Uuid,
    /// Unique login name
    pub username: String,
    /// Raw credential as submitted at onboarding; accepted but never echoed back
    #[serde(skip_serializing)]
    pub password: String,
    /// Age in years
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    /// Weight in kilograms
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    /// Height in centimeters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    /// Self-reported fitness level (beginner, intermediate, advanced)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fitness_level: Option<String>,
    /// Free-form fitness goals
    #[serde(default)]
    pub goals: Vec<String>,
    /// Desired training days per week
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workout_days: Option<u32>,
    /// Daily calorie target
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calorie_target: Option<u32>,
    /// When the account was created
    pub created_at: DateTime<Utc>,
}

// ================================================================================================
// Wellness Check-Ins
// ================================================================================================

/// One user-submitted daily wellness rating set
///
/// All five ratings are integers in `[1,10]`. The readiness score is derived
/// at submission time and stored with the record; check-ins are immutable
/// afterwards and the storage layer allows at most one per user per UTC day.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckIn {
    /// Unique check-in identifier
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    /// Sleep quality rating (1-10, higher is better)
    pub sleep_quality: u8,
    /// Energy level rating (1-10, higher is better)
    pub energy_level: u8,
    /// Muscle soreness rating (1-10, higher is worse)
    pub soreness: u8,
    /// Mood rating (1-10, higher is better)
    pub mood: u8,
    /// Stress rating (1-10, higher is worse)
    pub stress: u8,
    /// Composite readiness score (0-100), derived from the five ratings
    pub readiness_score: u8,
    /// Optional free-form note
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// When the check-in was submitted
    pub checkin_date: DateTime<Utc>,
}

// ================================================================================================
// Workout Plans
// ================================================================================================

/// A user's current workout plan
///
/// One plan per user; regeneration or readiness adjustment overwrites the
/// plan wholesale (no versioning).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutPlan {
    /// Unique plan identifier
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    /// The structured plan content
    pub plan: PlanDetails,
    /// When this plan version was stored
    pub created_at: DateTime<Utc>,
}

/// Structured workout plan content
///
/// Validated at the system boundary; downstream consumers (the plan
/// adjuster in particular) can rely on the numeric fields being numeric,
/// though optional sub-fields may be absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanDetails {
    /// Brief description of the plan
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
    /// Ordered training days
    #[serde(default)]
    pub weekly_schedule: Vec<PlanDay>,
    /// Training tips
    #[serde(default)]
    pub tips: Vec<String>,
}

/// A single training day within a weekly schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanDay {
    /// Day label ("Monday", "Day 1", ...)
    pub day: String,
    /// Session focus ("Upper Body", "Cardio", ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workout_type: Option<String>,
    /// Session length in minutes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    /// Session intensity; absent until an adjustment forces one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intensity: Option<Intensity>,
    /// Ordered exercises for the day
    #[serde(default)]
    pub exercises: Vec<PlanExercise>,
}

/// A single exercise entry within a training day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanExercise {
    /// Exercise name
    pub name: String,
    /// Number of sets
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sets: Option<u32>,
    /// Repetitions per set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reps: Option<u32>,
    /// Short execution instructions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}

/// Training intensity of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Intensity {
    /// Reduced load, recovery-oriented
    Low,
    /// Unmodified baseline load
    Normal,
    /// Increased load for high-readiness days
    High,
}

// ================================================================================================
// Meal Plans and Nutrition
// ================================================================================================

/// AI-generated meal plan
///
/// Returned to the client without being persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPlan {
    /// Daily calorie and macro targets
    pub daily_nutrition_targets: NutritionTargets,
    /// Recommended protein sources
    #[serde(default)]
    pub protein_sources: Vec<ProteinSource>,
    /// Example meals matching the targets
    #[serde(default)]
    pub sample_meals: Vec<SampleMeal>,
    /// Nutrition tips
    #[serde(default)]
    pub tips: Vec<String>,
}

/// Daily nutrition targets in calories and grams
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionTargets {
    /// Daily calories
    pub calories: u32,
    /// Protein in grams
    pub protein: u32,
    /// Carbohydrates in grams
    pub carbs: u32,
    /// Fat in grams
    pub fat: u32,
}

/// A recommended protein source within a meal plan
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProteinSource {
    /// Food name
    pub name: String,
    /// Serving size description
    pub serving: String,
    /// Calories per serving
    pub calories: u32,
    /// Protein grams per serving
    pub protein: u32,
    /// Why this food suits the user's goals
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub benefits: Option<String>,
}

/// An example meal within a meal plan
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleMeal {
    /// Which meal of the day this is
    pub meal_type: MealType,
    /// Meal name
    pub name: String,
    /// Ingredient list
    #[serde(default)]
    pub ingredients: Vec<String>,
    /// Total calories
    pub calories: u32,
    /// Total protein in grams
    pub protein: u32,
}

/// Type of meal
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "PascalCase")]
pub enum MealType {
    /// Breakfast meal
    Breakfast,
    /// Lunch meal
    Lunch,
    /// Dinner meal
    Dinner,
    /// Snack between meals
    Snack,
    /// Unspecified or other meal type
    Other,
}

impl MealType {
    /// Parse meal type from string
    #[must_use]
    pub fn from_str_lossy(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "breakfast" => Self::Breakfast,
            "lunch" => Self::Lunch,
            "dinner" => Self::Dinner,
            "snack" => Self::Snack,
            _ => Self::Other,
        }
    }
}

/// Nutritional estimate for a described food
///
/// Produced by the nutrition analyzer, either from the LLM or from the
/// deterministic fallback when no API key is configured.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionEstimate {
    /// Food as described by the user
    pub food: String,
    /// Quantity analyzed
    pub quantity: u32,
    /// Unit of the quantity
    pub unit: String,
    /// Estimated total calories
    pub calories: u32,
    /// Estimated protein in grams
    pub protein: u32,
    /// Estimated carbohydrates in grams
    pub carbs: u32,
    /// Estimated fat in grams
    pub fat: u32,
    /// How reliable the estimate is
    pub confidence: Confidence,
}

/// Confidence level of a nutritional estimate
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    /// Well-known food, reliable numbers
    High,
    /// Reasonable estimate
    Medium,
    /// Rough guess
    Low,
}

/// A logged calorie entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalorieEntry {
    /// Unique entry identifier
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    /// Food name as logged
    pub food_name: String,
    /// Calories for the logged quantity
    pub calories: u32,
    /// Protein in grams, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protein: Option<u32>,
    /// Quantity consumed
    pub quantity: u32,
    /// Unit of the quantity
    pub unit: String,
    /// When the food was logged
    pub entry_date: DateTime<Utc>,
}

// ================================================================================================
// Alarms, Progress, Achievements, Records
// ================================================================================================

/// A workout reminder alarm
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutAlarm {
    /// Unique alarm identifier
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    /// Fire time as "HH:MM" local to the client
    pub time: String,
    /// Weekday names the alarm fires on
    pub days: Vec<String>,
    /// Reminder text shown on fire
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Whether the alarm is armed
    pub is_active: bool,
    /// When the alarm was created
    pub created_at: DateTime<Utc>,
}

/// A body and training progress snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressEntry {
    /// Unique entry identifier
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    /// Body weight in kilograms
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    /// Cumulative workouts completed
    pub workouts_completed: u32,
    /// Calories consumed that day
    pub calories_consumed: u32,
    /// When the snapshot was recorded
    pub entry_date: DateTime<Utc>,
}

/// An earned achievement
///
/// At most one record per `(user, achievement type)`; awarding the same
/// achievement again returns the existing record unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    /// Unique achievement record identifier
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    /// Stable achievement type key ("first_workout", "week_streak", ...)
    pub achievement_type: String,
    /// Display name
    pub name: String,
    /// Display description
    pub description: String,
    /// Achievement grouping
    pub category: AchievementCategory,
    /// Emoji badge
    pub icon: String,
    /// When the achievement was earned
    pub earned_at: DateTime<Utc>,
}

/// Grouping of achievements for display
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AchievementCategory {
    /// Counting milestones (first workout, 50 workouts, ...)
    Milestone,
    /// Consecutive-day streaks
    Streak,
    /// Habit consistency
    Consistency,
    /// Measurable performance progress
    Progress,
    /// Perfect execution over a period
    Excellence,
}

/// A personal best for one exercise and metric
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalRecord {
    /// Unique record identifier
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    /// Exercise name ("Bench Press", "5k Run", ...)
    pub exercise_name: String,
    /// Type of performance metric
    pub record_type: RecordKind,
    /// Value of the record (units depend on metric type)
    pub value: f64,
    /// Unit of the value
    pub unit: String,
    /// Optional note about the attempt
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// When the record was achieved
    pub achieved_at: DateTime<Utc>,
}

/// Types of personal record metrics tracked
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    /// Heaviest weight moved
    Weight,
    /// Most repetitions completed
    Reps,
    /// Fastest or longest time
    Time,
    /// Longest distance covered
    Distance,
    /// Anything else worth remembering
    Other,
}

impl RecordKind {
    /// Default display unit when the client does not supply one
    #[must_use]
    pub const fn default_unit(&self) -> &'static str {
        match self {
            Self::Weight => "lbs",
            Self::Time => "min",
            Self::Reps | Self::Distance | Self::Other => "reps",
        }
    }
}

// ================================================================================================
// Chat
// ================================================================================================

/// A stored chat message between the user and the AI coach
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    /// Unique message identifier
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    /// Who authored the message
    pub role: ChatRole,
    /// Message text
    pub content: String,
    /// When the message was stored
    pub created_at: DateTime<Utc>,
}

/// Author of a chat message
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// The human user
    User,
    /// The AI coach
    Assistant,
}
