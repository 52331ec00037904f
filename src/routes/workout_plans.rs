// ABOUTME: Route handlers for workout plan generation, retrieval, and readiness adjustment
// ABOUTME: Each user holds one current plan; generating or adjusting replaces it
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitGenius

//! Workout plan routes
//!
//! Generation builds a trainer prompt from the stored profile and runs the
//! coach service. Adjustment rescales an existing plan with the readiness
//! score from today's check-in unless the caller supplies one.

use crate::{
    errors::{AppError, ErrorCode},
    intelligence::adjust_plan,
    logging::AppLogger,
    models::{PlanDetails, WorkoutPlan},
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
use std::time::Instant;
use uuid::Uuid;

/// Request body for generating a workout plan
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratePlanRequest {
    /// User whose profile drives the trainer prompt
    pub user_id: String,
}

/// Request body for adjusting a plan by readiness
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdjustPlanRequest {
    /// Owner of the plan
    pub user_id: String,
    /// Readiness score to adjust by; defaults to today's check-in
    #[serde(default)]
    pub readiness_score: Option<u8>,
    /// Plan to adjust; defaults to the stored current plan
    #[serde(default)]
    pub current_plan: Option<PlanDetails>,
}

/// Workout plan routes handler
pub struct WorkoutPlanRoutes;

impl WorkoutPlanRoutes {
    /// Create all workout plan routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        let limited = rate_limiting::attach(
            Router::new()
                .route("/api/workout-plans/generate", post(Self::handle_generate))
                .with_state(resources.clone()),
            resources.config.rate_limit.enabled,
            &resources.limits.ai,
        );

        Router::new()
            .route("/api/workout-plans/user/:user_id", get(Self::handle_get))
            .route("/api/workout-plans/adjust", post(Self::handle_adjust))
            .with_state(resources)
            .merge(limited)
    }

    /// Handle POST /api/workout-plans/generate - Build and store a new plan
    async fn handle_generate(
        State(resources): State<Arc<ServerResources>>,
        AppJson(body): AppJson<GeneratePlanRequest>,
    ) -> Result<Response, AppError> {
        let user_id = parse_uuid(&body.user_id, "user ID")?;
        let user = require_user(resources.storage.as_ref(), user_id).await?;

        let started = Instant::now();
        let result = resources.coach.generate_workout_plan(&user).await;
        let elapsed = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        AppLogger::log_generation(
            &user_id.to_string(),
            "workout_plan",
            result.is_ok(),
            elapsed,
        );
        let details = result?;

        let plan = WorkoutPlan {
            id: Uuid::new_v4(),
            user_id,
            plan: details,
            created_at: Utc::now(),
        };
        resources.storage.upsert_workout_plan(&plan).await?;

        Ok((StatusCode::OK, Json(plan)).into_response())
    }

    /// Handle GET /api/workout-plans/user/:user_id - Current plan or 404
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        Path(user_id): Path<String>,
    ) -> Result<Response, AppError> {
        let user_id = parse_uuid(&user_id, "user ID")?;
        let plan = resources
            .storage
            .get_workout_plan(user_id)
            .await?
            .ok_or_else(|| AppError::new(ErrorCode::ResourceNotFound, "No workout plan found"))?;

        Ok((StatusCode::OK, Json(plan)).into_response())
    }

    /// Handle POST /api/workout-plans/adjust - Rescale the plan by readiness
    async fn handle_adjust(
        State(resources): State<Arc<ServerResources>>,
        AppJson(body): AppJson<AdjustPlanRequest>,
    ) -> Result<Response, AppError> {
        let user_id = parse_uuid(&body.user_id, "user ID")?;

        let readiness = match body.readiness_score {
            Some(score) => score,
            None => resources
                .storage
                .get_checkin_on(user_id, Utc::now().date_naive())
                .await?
                .map(|checkin| checkin.readiness_score)
                .ok_or_else(|| {
                    AppError::new(ErrorCode::ResourceNotFound, "No check-in found for today")
                })?,
        };

        let details = match body.current_plan {
            Some(plan) => plan,
            None => resources
                .storage
                .get_workout_plan(user_id)
                .await?
                .map(|stored| stored.plan)
                .ok_or_else(|| {
                    AppError::new(ErrorCode::ResourceNotFound, "No workout plan found")
                })?,
        };

        let plan = WorkoutPlan {
            id: Uuid::new_v4(),
            user_id,
            plan: adjust_plan(readiness, &details),
            created_at: Utc::now(),
        };
        resources.storage.upsert_workout_plan(&plan).await?;

        Ok((StatusCode::OK, Json(plan)).into_response())
    }
}
