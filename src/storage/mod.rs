// ABOUTME: Storage abstraction for all persisted fitness data
// ABOUTME: Route handlers depend on the trait; backends are swappable at construction time
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitGenius

//! # Storage
//!
//! Every handler receives storage as `Arc<dyn StorageProvider>`, so tests
//! and deployments pick a backend without touching route code. The only
//! backend today is [`MemoryStorage`]; a database-backed one implements
//! the same trait.

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::errors::AppResult;
use crate::models::{
    Achievement, CalorieEntry, ChatMessage, CheckIn, PersonalRecord, ProgressEntry, User,
    WorkoutAlarm, WorkoutPlan,
};

pub mod memory;

pub use memory::MemoryStorage;

/// Persistence operations for all fitness data.
///
/// Implementations enforce the uniqueness rules documented per method so
/// callers can rely on them regardless of backend.
#[async_trait]
pub trait StorageProvider: Send + Sync {
    // ================================
    // Users
    // ================================

    /// Stores a new user.
    ///
    /// Fails with a conflict when the username is already taken.
    async fn create_user(&self, user: &User) -> AppResult<()>;

    /// Fetches a user by id.
    async fn get_user(&self, user_id: Uuid) -> AppResult<Option<User>>;

    /// Fetches a user by exact username.
    async fn get_user_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// Replaces a stored user.
    ///
    /// Fails with not-found when the user does not exist.
    async fn update_user(&self, user: &User) -> AppResult<()>;

    // ================================
    // Daily Check-ins
    // ================================

    /// Stores a daily check-in.
    ///
    /// Fails with a conflict when the user already checked in on the
    /// same UTC calendar day.
    async fn create_checkin(&self, checkin: &CheckIn) -> AppResult<()>;

    /// Fetches the user's check-in for one UTC calendar day, if any.
    async fn get_checkin_on(&self, user_id: Uuid, date: NaiveDate) -> AppResult<Option<CheckIn>>;

    /// Fetches the user's check-ins, newest first, optionally limited.
    async fn get_user_checkins(
        &self,
        user_id: Uuid,
        limit: Option<usize>,
    ) -> AppResult<Vec<CheckIn>>;

    // ================================
    // Workout Plans
    // ================================

    /// Stores a workout plan, replacing the user's current plan if any.
    ///
    /// Each user has one current plan; regeneration and adjustment
    /// overwrite it wholesale.
    async fn upsert_workout_plan(&self, plan: &WorkoutPlan) -> AppResult<()>;

    /// Fetches the user's current workout plan, if any.
    async fn get_workout_plan(&self, user_id: Uuid) -> AppResult<Option<WorkoutPlan>>;

    // ================================
    // Calorie Entries
    // ================================

    /// Stores a logged food entry.
    async fn create_calorie_entry(&self, entry: &CalorieEntry) -> AppResult<()>;

    /// Fetches the user's food entries, newest first, optionally
    /// restricted to one UTC calendar day.
    async fn get_user_calorie_entries(
        &self,
        user_id: Uuid,
        date: Option<NaiveDate>,
    ) -> AppResult<Vec<CalorieEntry>>;

    // ================================
    // Workout Alarms
    // ================================

    /// Stores a workout reminder alarm.
    async fn create_alarm(&self, alarm: &WorkoutAlarm) -> AppResult<()>;

    /// Fetches one alarm by id.
    async fn get_alarm(&self, alarm_id: Uuid) -> AppResult<Option<WorkoutAlarm>>;

    /// Fetches the user's alarms, newest first.
    async fn get_user_alarms(&self, user_id: Uuid) -> AppResult<Vec<WorkoutAlarm>>;

    /// Replaces a stored alarm.
    ///
    /// Fails with not-found when the alarm does not exist.
    async fn update_alarm(&self, alarm: &WorkoutAlarm) -> AppResult<()>;

    /// Deletes an alarm.
    ///
    /// Fails with not-found when the alarm does not exist.
    async fn delete_alarm(&self, alarm_id: Uuid) -> AppResult<()>;

    // ================================
    // Progress Tracking
    // ================================

    /// Stores a progress snapshot.
    async fn create_progress_entry(&self, entry: &ProgressEntry) -> AppResult<()>;

    /// Fetches the user's progress entries, newest first.
    async fn get_user_progress(&self, user_id: Uuid) -> AppResult<Vec<ProgressEntry>>;

    /// Fetches the user's most recent progress entry, if any.
    async fn get_latest_progress(&self, user_id: Uuid) -> AppResult<Option<ProgressEntry>>;

    // ================================
    // Achievements
    // ================================

    /// Records an earned achievement, once per user and type.
    ///
    /// Returns the stored achievement: the new one, or the existing
    /// award when the user already earned that type.
    async fn record_achievement(&self, achievement: &Achievement) -> AppResult<Achievement>;

    /// Fetches the user's earned achievements, newest first.
    async fn get_user_achievements(&self, user_id: Uuid) -> AppResult<Vec<Achievement>>;

    // ================================
    // Personal Records
    // ================================

    /// Stores a personal record.
    async fn create_personal_record(&self, record: &PersonalRecord) -> AppResult<()>;

    /// Fetches the user's personal records, newest first.
    async fn get_user_personal_records(&self, user_id: Uuid) -> AppResult<Vec<PersonalRecord>>;

    // ================================
    // Coach Chat
    // ================================

    /// Stores one chat message.
    async fn create_chat_message(&self, message: &ChatMessage) -> AppResult<()>;

    /// Fetches the user's chat history in chronological order.
    async fn get_user_chat_messages(&self, user_id: Uuid) -> AppResult<Vec<ChatMessage>>;
}
