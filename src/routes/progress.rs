// ABOUTME: Route handlers for body weight and workout count progress entries
// ABOUTME: The latest entry doubles as the user's running totals
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitGenius

//! Progress routes

use crate::{
    errors::{AppError, ErrorCode},
    models::ProgressEntry,
    rate_limiting,
    resources::ServerResources,
    routes::{parse_uuid, require_user, AppJson},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

/// Request body for recording a progress entry
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProgressRequest {
    /// Owner of the entry
    pub user_id: String,
    /// Body weight in pounds
    #[serde(default)]
    pub weight: Option<f64>,
    /// Running total of completed workouts, defaults to 0
    #[serde(default)]
    pub workouts_completed: Option<u32>,
    /// Calories consumed that day, defaults to 0
    #[serde(default)]
    pub calories_consumed: Option<u32>,
}

/// Progress routes handler
pub struct ProgressRoutes;

impl ProgressRoutes {
    /// Create all progress routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        let limited = rate_limiting::attach(
            Router::new()
                .route("/api/progress", post(Self::handle_create))
                .with_state(resources.clone()),
            resources.config.rate_limit.enabled,
            &resources.limits.create,
        );

        Router::new()
            .route("/api/progress/user/:user_id", get(Self::handle_history))
            .route("/api/progress/latest/:user_id", get(Self::handle_latest))
            .with_state(resources)
            .merge(limited)
    }

    /// Handle POST /api/progress - Record a progress entry
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        AppJson(body): AppJson<CreateProgressRequest>,
    ) -> Result<Response, AppError> {
        let user_id = parse_uuid(&body.user_id, "user ID")?;
        require_user(resources.storage.as_ref(), user_id).await?;

        let entry = ProgressEntry {
            id: Uuid::new_v4(),
            user_id,
            weight: body.weight,
            workouts_completed: body.workouts_completed.unwrap_or(0),
            calories_consumed: body.calories_consumed.unwrap_or(0),
            entry_date: Utc::now(),
        };
        resources.storage.create_progress_entry(&entry).await?;

        Ok((StatusCode::CREATED, Json(entry)).into_response())
    }

    /// Handle GET /api/progress/user/:user_id - Progress history, newest first
    async fn handle_history(
        State(resources): State<Arc<ServerResources>>,
        Path(user_id): Path<String>,
    ) -> Result<Response, AppError> {
        let user_id = parse_uuid(&user_id, "user ID")?;
        let entries = resources.storage.get_user_progress(user_id).await?;

        Ok((StatusCode::OK, Json(entries)).into_response())
    }

    /// Handle GET /api/progress/latest/:user_id - Most recent entry or 404
    async fn handle_latest(
        State(resources): State<Arc<ServerResources>>,
        Path(user_id): Path<String>,
    ) -> Result<Response, AppError> {
        let user_id = parse_uuid(&user_id, "user ID")?;
        let entry = resources
            .storage
            .get_latest_progress(user_id)
            .await?
            .ok_or_else(|| AppError::new(ErrorCode::ResourceNotFound, "No progress data found"))?;

        Ok((StatusCode::OK, Json(entry)).into_response())
    }
}
