// ABOUTME: Route handler for AI meal plan generation from the stored profile
// ABOUTME: Plans are returned to the client directly and never persisted
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitGenius

//! Meal plan routes

use crate::{
    errors::AppError,
    logging::AppLogger,
    rate_limiting,
    resources::ServerResources,
    routes::{parse_uuid, require_user, AppJson},
};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Instant;

/// Request body for generating a meal plan
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateMealPlanRequest {
    /// User whose profile drives the nutritionist prompt
    pub user_id: String,
}

/// Meal plan routes handler
pub struct MealPlanRoutes;

impl MealPlanRoutes {
    /// Create all meal plan routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        rate_limiting::attach(
            Router::new()
                .route("/api/meal-plans/generate", post(Self::handle_generate))
                .with_state(resources.clone()),
            resources.config.rate_limit.enabled,
            &resources.limits.ai,
        )
    }

    /// Handle POST /api/meal-plans/generate - Build a meal plan, no persistence
    async fn handle_generate(
        State(resources): State<Arc<ServerResources>>,
        AppJson(body): AppJson<GenerateMealPlanRequest>,
    ) -> Result<Response, AppError> {
        let user_id = parse_uuid(&body.user_id, "user ID")?;
        let user = require_user(resources.storage.as_ref(), user_id).await?;

        let started = Instant::now();
        let result = resources.coach.generate_meal_plan(&user).await;
        let elapsed = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        AppLogger::log_generation(&user_id.to_string(), "meal_plan", result.is_ok(), elapsed);
        let meal_plan = result?;

        Ok((StatusCode::OK, Json(meal_plan)).into_response())
    }
}
