// ABOUTME: Route module organization for FitGenius HTTP endpoints
// ABOUTME: One module per resource family, each owning its request and response types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitGenius

//! Route modules for the FitGenius server.
//!
//! Each domain module contains its request/response payloads and thin
//! handler functions that delegate to storage, the coach service, and the
//! intelligence layer. Handlers return [`AppError`] so every failure is
//! serialized through the same error envelope, including body parse
//! failures via [`AppJson`].

use async_trait::async_trait;
use axum::extract::{FromRequest, Request};
use axum::Json;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::errors::{AppError, AppResult};
use crate::models::User;
use crate::storage::StorageProvider;

/// Achievement catalog and earned-badge routes
pub mod achievements;
/// Workout alarm CRUD routes
pub mod alarms;
/// Calorie analysis and food log routes
pub mod calories;
/// Chat history and AI coach conversation routes
pub mod chat;
/// Daily wellness check-in routes
pub mod checkins;
/// Health check and system status routes
pub mod health;
/// Meal plan generation routes
pub mod meal_plans;
/// Personal record routes
pub mod personal_records;
/// Progress tracking routes
pub mod progress;
/// User registration and profile routes
pub mod users;
/// Workout plan generation and adjustment routes
pub mod workout_plans;

/// Achievement route handlers
pub use achievements::AchievementRoutes;
/// Alarm route handlers
pub use alarms::AlarmRoutes;
/// Calorie route handlers
pub use calories::CalorieRoutes;
/// Chat route handlers
pub use chat::ChatRoutes;
/// Check-in route handlers
pub use checkins::CheckInRoutes;
/// Health check route handlers
pub use health::HealthRoutes;
/// Meal plan route handlers
pub use meal_plans::MealPlanRoutes;
/// Personal record route handlers
pub use personal_records::PersonalRecordRoutes;
/// Progress route handlers
pub use progress::ProgressRoutes;
/// User route handlers
pub use users::UserRoutes;
/// Workout plan route handlers
pub use workout_plans::WorkoutPlanRoutes;

/// JSON body extractor whose rejection is the structured error envelope.
///
/// Malformed bodies and type mismatches come back as a 400 with an
/// `INVALID_INPUT` code instead of axum's plain-text rejection.
pub struct AppJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(AppError::invalid_input(rejection.body_text())),
        }
    }
}

/// Parses a path segment as a UUID, mapping failure to a 400 with the
/// offending value echoed back.
pub(crate) fn parse_uuid(value: &str, label: &str) -> AppResult<Uuid> {
    Uuid::parse_str(value)
        .map_err(|_| AppError::invalid_input(format!("Invalid {label}: {value}")))
}

/// Loads a user or fails with the not-found envelope the web client expects.
pub(crate) async fn require_user(storage: &dyn StorageProvider, user_id: Uuid) -> AppResult<User> {
    storage
        .get_user(user_id)
        .await?
        .ok_or_else(|| AppError::not_found("User"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_uuid_accepts_canonical_form() {
        let id = Uuid::new_v4();
        assert_eq!(parse_uuid(&id.to_string(), "user ID").unwrap(), id);
    }

    #[test]
    fn parse_uuid_rejects_garbage_with_invalid_input() {
        let err = parse_uuid("not-a-uuid", "user ID").unwrap_err();
        assert_eq!(err.http_status(), 400);
        assert!(err.message.contains("Invalid user ID: not-a-uuid"));
    }
}
