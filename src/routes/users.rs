// ABOUTME: Route handlers for user account creation and profile management
// ABOUTME: Usernames are unique; profile fields stay optional and patchable
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitGenius

//! User routes
//!
//! Registration runs under the strict auth rate limit tier; profile reads
//! and partial updates sit on the general tier only.

use crate::{
    errors::AppError,
    models::User,
    rate_limiting,
    resources::ServerResources,
    routes::{parse_uuid, require_user, AppJson},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch, post},
    Json, Router,
};
use chrono::Utc;
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

/// Request body for creating a user account
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    /// Unique login name
    pub username: String,
    /// Login password
    pub password: String,
    /// Age in years
    #[serde(default)]
    pub age: Option<u32>,
    /// Body weight in pounds
    #[serde(default)]
    pub weight: Option<f64>,
    /// Height in inches
    #[serde(default)]
    pub height: Option<f64>,
    /// Self-reported fitness level
    #[serde(default)]
    pub fitness_level: Option<String>,
    /// Fitness goals
    #[serde(default)]
    pub goals: Vec<String>,
    /// Preferred training days per week
    #[serde(default)]
    pub workout_days: Option<u32>,
    /// Daily calorie target
    #[serde(default)]
    pub calorie_target: Option<u32>,
}

impl From<CreateUserRequest> for User {
    fn from(request: CreateUserRequest) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: request.username,
            password: request.password,
            age: request.age,
            weight: request.weight,
            height: request.height,
            fitness_level: request.fitness_level,
            goals: request.goals,
            workout_days: request.workout_days,
            calorie_target: request.calorie_target,
            created_at: Utc::now(),
        }
    }
}

/// Request body for partially updating a profile.
///
/// Username and password are immutable after registration; only the
/// profile fields can change.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    /// Age in years
    pub age: Option<u32>,
    /// Body weight in pounds
    pub weight: Option<f64>,
    /// Height in inches
    pub height: Option<f64>,
    /// Self-reported fitness level
    pub fitness_level: Option<String>,
    /// Fitness goals, replacing the stored list when present
    pub goals: Option<Vec<String>>,
    /// Preferred training days per week
    pub workout_days: Option<u32>,
    /// Daily calorie target
    pub calorie_target: Option<u32>,
}

impl UpdateUserRequest {
    /// Overlays the present fields onto a stored user
    fn apply_to(self, user: &mut User) {
        if let Some(age) = self.age {
            user.age = Some(age);
        }
        if let Some(weight) = self.weight {
            user.weight = Some(weight);
        }
        if let Some(height) = self.height {
            user.height = Some(height);
        }
        if let Some(fitness_level) = self.fitness_level {
            user.fitness_level = Some(fitness_level);
        }
        if let Some(goals) = self.goals {
            user.goals = goals;
        }
        if let Some(workout_days) = self.workout_days {
            user.workout_days = Some(workout_days);
        }
        if let Some(calorie_target) = self.calorie_target {
            user.calorie_target = Some(calorie_target);
        }
    }
}

/// User routes handler
pub struct UserRoutes;

impl UserRoutes {
    /// Create all user routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        let limited = rate_limiting::attach(
            Router::new()
                .route("/api/users", post(Self::handle_create))
                .with_state(resources.clone()),
            resources.config.rate_limit.enabled,
            &resources.limits.auth,
        );

        Router::new()
            .route("/api/users/:id", get(Self::handle_get))
            .route("/api/users/:id", patch(Self::handle_update))
            .with_state(resources)
            .merge(limited)
    }

    /// Handle POST /api/users - Register a new account
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        AppJson(body): AppJson<CreateUserRequest>,
    ) -> Result<Response, AppError> {
        if body.username.trim().is_empty() {
            return Err(AppError::invalid_input("Username cannot be empty"));
        }
        if body.password.is_empty() {
            return Err(AppError::invalid_input("Password cannot be empty"));
        }

        let user: User = body.into();
        resources.storage.create_user(&user).await?;

        Ok((StatusCode::CREATED, Json(user)).into_response())
    }

    /// Handle GET /api/users/:id - Fetch a profile
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let user_id = parse_uuid(&id, "user ID")?;
        let user = require_user(resources.storage.as_ref(), user_id).await?;

        Ok((StatusCode::OK, Json(user)).into_response())
    }

    /// Handle PATCH /api/users/:id - Update profile fields
    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<String>,
        AppJson(body): AppJson<UpdateUserRequest>,
    ) -> Result<Response, AppError> {
        let user_id = parse_uuid(&id, "user ID")?;
        let mut user = require_user(resources.storage.as_ref(), user_id).await?;

        body.apply_to(&mut user);
        resources.storage.update_user(&user).await?;

        Ok((StatusCode::OK, Json(user)).into_response())
    }
}
