// ABOUTME: Route handlers for the achievement catalog, earned badges, and progress
// ABOUTME: Earning is idempotent per user and achievement type
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitGenius

//! Achievement routes
//!
//! The catalog is fixed at compile time. Progress toward unearned badges
//! is estimated from the latest progress entry and the check-in history;
//! an earned badge always reports 100%.

use crate::{
    errors::AppError,
    intelligence::constants::achievements::PERFECT_DAY_READINESS,
    intelligence::{
        current_streak, progress_percent, AchievementDefinition, AchievementInputs,
        ACHIEVEMENT_DEFINITIONS,
    },
    logging::AppLogger,
    models::{Achievement, AchievementCategory},
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
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use uuid::Uuid;

/// Request body for recording an earned achievement
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordAchievementRequest {
    /// User who earned the badge
    pub user_id: String,
    /// Stable catalog identifier
    pub achievement_type: String,
    /// Display name
    pub name: String,
    /// What was accomplished
    pub description: String,
    /// Grouping category
    pub category: AchievementCategory,
    /// Badge emoji
    pub icon: String,
}

/// One catalog entry with the user's progress toward it
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AchievementProgress {
    /// The catalog entry
    #[serde(flatten)]
    pub definition: AchievementDefinition,
    /// Progress percentage in `[0, 100]`
    pub progress: f64,
    /// Whether the user has earned this badge
    pub earned: bool,
}

/// Achievement routes handler
pub struct AchievementRoutes;

impl AchievementRoutes {
    /// Create all achievement routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        let limited = rate_limiting::attach(
            Router::new()
                .route("/api/achievements", post(Self::handle_record))
                .with_state(resources.clone()),
            resources.config.rate_limit.enabled,
            &resources.limits.create,
        );

        Router::new()
            .route(
                "/api/achievements/definitions",
                get(Self::handle_definitions),
            )
            .route("/api/achievements/user/:user_id", get(Self::handle_earned))
            .route(
                "/api/achievements/progress/:user_id",
                get(Self::handle_progress),
            )
            .with_state(resources)
            .merge(limited)
    }

    /// Handle GET /api/achievements/definitions - The fixed catalog
    async fn handle_definitions() -> Result<Response, AppError> {
        Ok((StatusCode::OK, Json(ACHIEVEMENT_DEFINITIONS)).into_response())
    }

    /// Handle GET /api/achievements/user/:user_id - Earned achievements
    async fn handle_earned(
        State(resources): State<Arc<ServerResources>>,
        Path(user_id): Path<String>,
    ) -> Result<Response, AppError> {
        let user_id = parse_uuid(&user_id, "user ID")?;
        let achievements = resources.storage.get_user_achievements(user_id).await?;

        Ok((StatusCode::OK, Json(achievements)).into_response())
    }

    /// Handle GET /api/achievements/progress/:user_id - Progress per catalog entry
    async fn handle_progress(
        State(resources): State<Arc<ServerResources>>,
        Path(user_id): Path<String>,
    ) -> Result<Response, AppError> {
        let user_id = parse_uuid(&user_id, "user ID")?;

        let earned: HashSet<String> = resources
            .storage
            .get_user_achievements(user_id)
            .await?
            .into_iter()
            .map(|a| a.achievement_type)
            .collect();
        let checkins = resources.storage.get_user_checkins(user_id, None).await?;
        let latest = resources.storage.get_latest_progress(user_id).await?;

        let dates: Vec<_> = checkins.iter().map(|c| c.checkin_date).collect();
        let high_readiness = checkins
            .iter()
            .filter(|c| c.readiness_score > PERFECT_DAY_READINESS)
            .count();
        let inputs = AchievementInputs {
            workouts_completed: latest.map_or(0, |entry| entry.workouts_completed),
            current_streak: current_streak(&dates),
            high_readiness_checkins: u32::try_from(high_readiness).unwrap_or(u32::MAX),
        };

        let progress: Vec<AchievementProgress> = ACHIEVEMENT_DEFINITIONS
            .iter()
            .map(|definition| {
                let earned = earned.contains(definition.achievement_type);
                AchievementProgress {
                    definition: *definition,
                    progress: if earned {
                        100.0
                    } else {
                        progress_percent(definition, &inputs)
                    },
                    earned,
                }
            })
            .collect();

        Ok((StatusCode::OK, Json(progress)).into_response())
    }

    /// Handle POST /api/achievements - Record an earned badge, idempotently
    async fn handle_record(
        State(resources): State<Arc<ServerResources>>,
        AppJson(body): AppJson<RecordAchievementRequest>,
    ) -> Result<Response, AppError> {
        let user_id = parse_uuid(&body.user_id, "user ID")?;
        require_user(resources.storage.as_ref(), user_id).await?;

        let candidate = Achievement {
            id: Uuid::new_v4(),
            user_id,
            achievement_type: body.achievement_type,
            name: body.name,
            description: body.description,
            category: body.category,
            icon: body.icon,
            earned_at: Utc::now(),
        };
        let stored = resources.storage.record_achievement(&candidate).await?;
        if stored.id == candidate.id {
            AppLogger::log_achievement(&user_id.to_string(), &stored.achievement_type);
        }

        Ok((StatusCode::CREATED, Json(stored)).into_response())
    }
}
