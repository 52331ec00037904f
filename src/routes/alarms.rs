// ABOUTME: Route handlers for workout alarm CRUD
// ABOUTME: Alarm times are wall-clock HH:MM strings with per-weekday schedules
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitGenius

//! Alarm routes

use crate::{
    errors::{AppError, ErrorCode},
    models::WorkoutAlarm,
    rate_limiting,
    resources::ServerResources,
    routes::{parse_uuid, require_user, AppJson},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, patch, post},
    Json, Router,
};
use chrono::{NaiveTime, Utc};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

/// Request body for creating an alarm
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAlarmRequest {
    /// Owner of the alarm
    pub user_id: String,
    /// Wall-clock trigger time, `HH:MM`
    pub time: String,
    /// Weekday names the alarm fires on
    #[serde(default)]
    pub days: Vec<String>,
    /// Motivational message shown when the alarm fires
    #[serde(default)]
    pub message: Option<String>,
    /// Whether the alarm starts enabled, defaults to true
    #[serde(default)]
    pub is_active: Option<bool>,
}

/// Request body for partially updating an alarm
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAlarmRequest {
    /// Wall-clock trigger time, `HH:MM`
    pub time: Option<String>,
    /// Weekday names the alarm fires on
    pub days: Option<Vec<String>>,
    /// Motivational message shown when the alarm fires
    pub message: Option<String>,
    /// Whether the alarm is enabled
    pub is_active: Option<bool>,
}

/// Alarm routes handler
pub struct AlarmRoutes;

impl AlarmRoutes {
    /// Create all alarm routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        let limited = rate_limiting::attach(
            Router::new()
                .route("/api/alarms", post(Self::handle_create))
                .with_state(resources.clone()),
            resources.config.rate_limit.enabled,
            &resources.limits.create,
        );

        Router::new()
            .route("/api/alarms/user/:user_id", get(Self::handle_list))
            .route("/api/alarms/:id", patch(Self::handle_update))
            .route("/api/alarms/:id", delete(Self::handle_delete))
            .with_state(resources)
            .merge(limited)
    }

    /// Handle POST /api/alarms - Create an alarm
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        AppJson(body): AppJson<CreateAlarmRequest>,
    ) -> Result<Response, AppError> {
        let user_id = parse_uuid(&body.user_id, "user ID")?;
        require_user(resources.storage.as_ref(), user_id).await?;
        validate_alarm_time(&body.time)?;

        let alarm = WorkoutAlarm {
            id: Uuid::new_v4(),
            user_id,
            time: body.time,
            days: body.days,
            message: body.message,
            is_active: body.is_active.unwrap_or(true),
            created_at: Utc::now(),
        };
        resources.storage.create_alarm(&alarm).await?;

        Ok((StatusCode::CREATED, Json(alarm)).into_response())
    }

    /// Handle GET /api/alarms/user/:user_id - List a user's alarms
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        Path(user_id): Path<String>,
    ) -> Result<Response, AppError> {
        let user_id = parse_uuid(&user_id, "user ID")?;
        let alarms = resources.storage.get_user_alarms(user_id).await?;

        Ok((StatusCode::OK, Json(alarms)).into_response())
    }

    /// Handle PATCH /api/alarms/:id - Update alarm fields
    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<String>,
        AppJson(body): AppJson<UpdateAlarmRequest>,
    ) -> Result<Response, AppError> {
        let alarm_id = parse_uuid(&id, "alarm ID")?;
        let mut alarm = resources
            .storage
            .get_alarm(alarm_id)
            .await?
            .ok_or_else(|| AppError::not_found("Alarm"))?;

        if let Some(time) = body.time {
            validate_alarm_time(&time)?;
            alarm.time = time;
        }
        if let Some(days) = body.days {
            alarm.days = days;
        }
        if let Some(message) = body.message {
            alarm.message = Some(message);
        }
        if let Some(is_active) = body.is_active {
            alarm.is_active = is_active;
        }
        resources.storage.update_alarm(&alarm).await?;

        Ok((StatusCode::OK, Json(alarm)).into_response())
    }

    /// Handle DELETE /api/alarms/:id - Remove an alarm
    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let alarm_id = parse_uuid(&id, "alarm ID")?;
        resources.storage.delete_alarm(alarm_id).await?;

        Ok((StatusCode::NO_CONTENT, ()).into_response())
    }
}

fn validate_alarm_time(raw: &str) -> Result<(), AppError> {
    NaiveTime::parse_from_str(raw, "%H:%M").map_err(|_| {
        AppError::new(
            ErrorCode::InvalidFormat,
            "Invalid time format, expected HH:MM",
        )
    })?;
    Ok(())
}
