// ABOUTME: Route handlers for daily wellness check-ins and readiness scoring
// ABOUTME: One check-in per user per UTC day; each response carries the readiness message
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitGenius

//! Check-in routes
//!
//! Submitting a check-in validates the five wellness ratings, computes the
//! readiness score, and rejects a second submission on the same UTC day
//! with a conflict.

use crate::{
    errors::{AppError, ErrorCode},
    intelligence::{current_streak, readiness_score, ReadinessBracket, WellnessRatings},
    logging::AppLogger,
    models::CheckIn,
    rate_limiting,
    resources::ServerResources,
    routes::{parse_uuid, require_user, AppJson},
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Request body for submitting a daily check-in
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCheckInRequest {
    /// Owner of the check-in
    pub user_id: String,
    /// Sleep quality rating, 1 to 10
    pub sleep_quality: u8,
    /// Energy level rating, 1 to 10
    pub energy_level: u8,
    /// Muscle soreness rating, 1 to 10
    pub soreness: u8,
    /// Mood rating, 1 to 10
    pub mood: u8,
    /// Stress rating, 1 to 10
    pub stress: u8,
    /// Free-form notes
    #[serde(default)]
    pub notes: Option<String>,
}

impl CreateCheckInRequest {
    const fn ratings(&self) -> WellnessRatings {
        WellnessRatings {
            sleep_quality: self.sleep_quality,
            energy_level: self.energy_level,
            soreness: self.soreness,
            mood: self.mood,
            stress: self.stress,
        }
    }
}

/// Response for a submitted check-in: the stored record plus the
/// readiness message for the client to display
#[derive(Debug, Serialize)]
pub struct CheckInResponse {
    /// The stored check-in
    #[serde(flatten)]
    pub checkin: CheckIn,
    /// Readiness guidance matching the score bracket
    pub message: String,
}

/// Query parameters for check-in history
#[derive(Debug, Deserialize, Default)]
pub struct CheckInHistoryQuery {
    /// Maximum number of check-ins to return, newest first
    pub limit: Option<usize>,
}

/// Response for the current check-in streak
#[derive(Debug, Serialize)]
pub struct StreakResponse {
    /// Consecutive days with a check-in, counted back from today
    pub streak: u32,
}

/// Check-in routes handler
pub struct CheckInRoutes;

impl CheckInRoutes {
    /// Create all check-in routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        let limited = rate_limiting::attach(
            Router::new()
                .route("/api/checkins", post(Self::handle_create))
                .with_state(resources.clone()),
            resources.config.rate_limit.enabled,
            &resources.limits.create,
        );

        Router::new()
            .route("/api/checkins/today/:user_id", get(Self::handle_today))
            .route("/api/checkins/user/:user_id", get(Self::handle_history))
            .route("/api/checkins/streak/:user_id", get(Self::handle_streak))
            .with_state(resources)
            .merge(limited)
    }

    /// Handle POST /api/checkins - Submit today's wellness ratings
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        AppJson(body): AppJson<CreateCheckInRequest>,
    ) -> Result<Response, AppError> {
        let user_id = parse_uuid(&body.user_id, "user ID")?;
        require_user(resources.storage.as_ref(), user_id).await?;

        let ratings = body.ratings();
        ratings.validate()?;
        let score = readiness_score(&ratings);

        let checkin = CheckIn {
            id: Uuid::new_v4(),
            user_id,
            sleep_quality: body.sleep_quality,
            energy_level: body.energy_level,
            soreness: body.soreness,
            mood: body.mood,
            stress: body.stress,
            readiness_score: score,
            notes: body.notes,
            checkin_date: Utc::now(),
        };
        resources.storage.create_checkin(&checkin).await?;
        AppLogger::log_checkin(&user_id.to_string(), score);

        let response = CheckInResponse {
            message: ReadinessBracket::for_score(score).message().to_owned(),
            checkin,
        };
        Ok((StatusCode::CREATED, Json(response)).into_response())
    }

    /// Handle GET /api/checkins/today/:user_id - Today's check-in or 404
    async fn handle_today(
        State(resources): State<Arc<ServerResources>>,
        Path(user_id): Path<String>,
    ) -> Result<Response, AppError> {
        let user_id = parse_uuid(&user_id, "user ID")?;
        let today = Utc::now().date_naive();

        let checkin = resources
            .storage
            .get_checkin_on(user_id, today)
            .await?
            .ok_or_else(|| {
                AppError::new(ErrorCode::ResourceNotFound, "No check-in found for today")
            })?;

        Ok((StatusCode::OK, Json(checkin)).into_response())
    }

    /// Handle GET /api/checkins/user/:user_id - Check-in history, newest first
    async fn handle_history(
        State(resources): State<Arc<ServerResources>>,
        Path(user_id): Path<String>,
        Query(query): Query<CheckInHistoryQuery>,
    ) -> Result<Response, AppError> {
        let user_id = parse_uuid(&user_id, "user ID")?;
        let checkins = resources
            .storage
            .get_user_checkins(user_id, query.limit)
            .await?;

        Ok((StatusCode::OK, Json(checkins)).into_response())
    }

    /// Handle GET /api/checkins/streak/:user_id - Consecutive check-in days
    async fn handle_streak(
        State(resources): State<Arc<ServerResources>>,
        Path(user_id): Path<String>,
    ) -> Result<Response, AppError> {
        let user_id = parse_uuid(&user_id, "user ID")?;
        let checkins = resources.storage.get_user_checkins(user_id, None).await?;
        let dates: Vec<_> = checkins.iter().map(|c| c.checkin_date).collect();

        let response = StreakResponse {
            streak: current_streak(&dates),
        };
        Ok((StatusCode::OK, Json(response)).into_response())
    }
}
