// ABOUTME: In-memory storage backend holding all collections behind async RwLocks
// ABOUTME: Insertion order is preserved so equal timestamps sort deterministically
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitGenius

//! In-memory storage.
//!
//! Backs the server in development and the test suite. Data lives for the
//! lifetime of the process; nothing is written to disk.

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::errors::{AppError, AppResult};
use crate::models::{
    Achievement, CalorieEntry, ChatMessage, CheckIn, PersonalRecord, ProgressEntry, User,
    WorkoutAlarm, WorkoutPlan,
};
use crate::storage::StorageProvider;

/// Process-local [`StorageProvider`] backend.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    users: RwLock<Vec<User>>,
    checkins: RwLock<Vec<CheckIn>>,
    workout_plans: RwLock<Vec<WorkoutPlan>>,
    calorie_entries: RwLock<Vec<CalorieEntry>>,
    alarms: RwLock<Vec<WorkoutAlarm>>,
    progress_entries: RwLock<Vec<ProgressEntry>>,
    achievements: RwLock<Vec<Achievement>>,
    personal_records: RwLock<Vec<PersonalRecord>>,
    chat_messages: RwLock<Vec<ChatMessage>>,
}

impl MemoryStorage {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StorageProvider for MemoryStorage {
    async fn create_user(&self, user: &User) -> AppResult<()> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.username == user.username) {
            return Err(AppError::conflict("Username already exists"));
        }
        users.push(user.clone());
        Ok(())
    }

    async fn get_user(&self, user_id: Uuid) -> AppResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id == user_id).cloned())
    }

    async fn get_user_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.username == username).cloned())
    }

    async fn update_user(&self, user: &User) -> AppResult<()> {
        let mut users = self.users.write().await;
        match users.iter_mut().find(|u| u.id == user.id) {
            Some(stored) => {
                *stored = user.clone();
                Ok(())
            }
            None => Err(AppError::not_found("User")),
        }
    }

    async fn create_checkin(&self, checkin: &CheckIn) -> AppResult<()> {
        let mut checkins = self.checkins.write().await;
        let day = checkin.checkin_date.date_naive();
        if checkins
            .iter()
            .any(|c| c.user_id == checkin.user_id && c.checkin_date.date_naive() == day)
        {
            return Err(AppError::conflict("Already checked in today"));
        }
        checkins.push(checkin.clone());
        Ok(())
    }

    async fn get_checkin_on(&self, user_id: Uuid, date: NaiveDate) -> AppResult<Option<CheckIn>> {
        let checkins = self.checkins.read().await;
        Ok(checkins
            .iter()
            .find(|c| c.user_id == user_id && c.checkin_date.date_naive() == date)
            .cloned())
    }

    async fn get_user_checkins(
        &self,
        user_id: Uuid,
        limit: Option<usize>,
    ) -> AppResult<Vec<CheckIn>> {
        let checkins = self.checkins.read().await;
        let mut result: Vec<CheckIn> = checkins
            .iter()
            .filter(|c| c.user_id == user_id)
            .cloned()
            .collect();
        result.sort_by(|a, b| b.checkin_date.cmp(&a.checkin_date));
        if let Some(limit) = limit {
            result.truncate(limit);
        }
        Ok(result)
    }

    async fn upsert_workout_plan(&self, plan: &WorkoutPlan) -> AppResult<()> {
        let mut plans = self.workout_plans.write().await;
        plans.retain(|p| p.user_id != plan.user_id);
        plans.push(plan.clone());
        Ok(())
    }

    async fn get_workout_plan(&self, user_id: Uuid) -> AppResult<Option<WorkoutPlan>> {
        let plans = self.workout_plans.read().await;
        Ok(plans.iter().find(|p| p.user_id == user_id).cloned())
    }

    async fn create_calorie_entry(&self, entry: &CalorieEntry) -> AppResult<()> {
        self.calorie_entries.write().await.push(entry.clone());
        Ok(())
    }

    async fn get_user_calorie_entries(
        &self,
        user_id: Uuid,
        date: Option<NaiveDate>,
    ) -> AppResult<Vec<CalorieEntry>> {
        let entries = self.calorie_entries.read().await;
        let mut result: Vec<CalorieEntry> = entries
            .iter()
            .filter(|e| e.user_id == user_id)
            .filter(|e| date.is_none_or(|d| e.entry_date.date_naive() == d))
            .cloned()
            .collect();
        result.sort_by(|a, b| b.entry_date.cmp(&a.entry_date));
        Ok(result)
    }

    async fn create_alarm(&self, alarm: &WorkoutAlarm) -> AppResult<()> {
        self.alarms.write().await.push(alarm.clone());
        Ok(())
    }

    async fn get_alarm(&self, alarm_id: Uuid) -> AppResult<Option<WorkoutAlarm>> {
        let alarms = self.alarms.read().await;
        Ok(alarms.iter().find(|a| a.id == alarm_id).cloned())
    }

    async fn get_user_alarms(&self, user_id: Uuid) -> AppResult<Vec<WorkoutAlarm>> {
        let alarms = self.alarms.read().await;
        let mut result: Vec<WorkoutAlarm> = alarms
            .iter()
            .filter(|a| a.user_id == user_id)
            .cloned()
            .collect();
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(result)
    }

    async fn update_alarm(&self, alarm: &WorkoutAlarm) -> AppResult<()> {
        let mut alarms = self.alarms.write().await;
        match alarms.iter_mut().find(|a| a.id == alarm.id) {
            Some(stored) => {
                *stored = alarm.clone();
                Ok(())
            }
            None => Err(AppError::not_found("Alarm")),
        }
    }

    async fn delete_alarm(&self, alarm_id: Uuid) -> AppResult<()> {
        let mut alarms = self.alarms.write().await;
        let before = alarms.len();
        alarms.retain(|a| a.id != alarm_id);
        if alarms.len() == before {
            return Err(AppError::not_found("Alarm"));
        }
        Ok(())
    }

    async fn create_progress_entry(&self, entry: &ProgressEntry) -> AppResult<()> {
        self.progress_entries.write().await.push(entry.clone());
        Ok(())
    }

    async fn get_user_progress(&self, user_id: Uuid) -> AppResult<Vec<ProgressEntry>> {
        let entries = self.progress_entries.read().await;
        let mut result: Vec<ProgressEntry> = entries
            .iter()
            .filter(|e| e.user_id == user_id)
            .cloned()
            .collect();
        result.sort_by(|a, b| b.entry_date.cmp(&a.entry_date));
        Ok(result)
    }

    async fn get_latest_progress(&self, user_id: Uuid) -> AppResult<Option<ProgressEntry>> {
        let entries = self.get_user_progress(user_id).await?;
        Ok(entries.into_iter().next())
    }

    async fn record_achievement(&self, achievement: &Achievement) -> AppResult<Achievement> {
        let mut achievements = self.achievements.write().await;
        if let Some(existing) = achievements.iter().find(|a| {
            a.user_id == achievement.user_id && a.achievement_type == achievement.achievement_type
        }) {
            return Ok(existing.clone());
        }
        achievements.push(achievement.clone());
        Ok(achievement.clone())
    }

    async fn get_user_achievements(&self, user_id: Uuid) -> AppResult<Vec<Achievement>> {
        let achievements = self.achievements.read().await;
        let mut result: Vec<Achievement> = achievements
            .iter()
            .filter(|a| a.user_id == user_id)
            .cloned()
            .collect();
        result.sort_by(|a, b| b.earned_at.cmp(&a.earned_at));
        Ok(result)
    }

    async fn create_personal_record(&self, record: &PersonalRecord) -> AppResult<()> {
        self.personal_records.write().await.push(record.clone());
        Ok(())
    }

    async fn get_user_personal_records(&self, user_id: Uuid) -> AppResult<Vec<PersonalRecord>> {
        let records = self.personal_records.read().await;
        let mut result: Vec<PersonalRecord> = records
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        result.sort_by(|a, b| b.achieved_at.cmp(&a.achieved_at));
        Ok(result)
    }

    async fn create_chat_message(&self, message: &ChatMessage) -> AppResult<()> {
        self.chat_messages.write().await.push(message.clone());
        Ok(())
    }

    async fn get_user_chat_messages(&self, user_id: Uuid) -> AppResult<Vec<ChatMessage>> {
        let messages = self.chat_messages.read().await;
        Ok(messages
            .iter()
            .filter(|m| m.user_id == user_id)
            .cloned()
            .collect())
    }
}
