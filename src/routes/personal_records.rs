// ABOUTME: Route handlers for exercise personal records
// ABOUTME: Units default from the record type when the caller omits them
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitGenius

//! Personal record routes

use crate::{
    errors::AppError,
    models::{PersonalRecord, RecordKind},
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

/// Request body for recording a personal record
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRecordRequest {
    /// User who set the record
    pub user_id: String,
    /// Exercise the record was set on
    pub exercise_name: String,
    /// What kind of record this is
    pub record_type: RecordKind,
    /// The record value
    pub value: f64,
    /// Measurement unit; defaults by record type when omitted
    #[serde(default)]
    pub unit: Option<String>,
    /// Free-form notes
    #[serde(default)]
    pub notes: Option<String>,
}

/// Personal record routes handler
pub struct PersonalRecordRoutes;

impl PersonalRecordRoutes {
    /// Create all personal record routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        let limited = rate_limiting::attach(
            Router::new()
                .route("/api/personal-records", post(Self::handle_create))
                .with_state(resources.clone()),
            resources.config.rate_limit.enabled,
            &resources.limits.create,
        );

        Router::new()
            .route(
                "/api/personal-records/user/:user_id",
                get(Self::handle_list),
            )
            .with_state(resources)
            .merge(limited)
    }

    /// Handle POST /api/personal-records - Record a new personal best
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        AppJson(body): AppJson<CreateRecordRequest>,
    ) -> Result<Response, AppError> {
        let user_id = parse_uuid(&body.user_id, "user ID")?;
        require_user(resources.storage.as_ref(), user_id).await?;

        if body.exercise_name.trim().is_empty() {
            return Err(AppError::invalid_input("Exercise name cannot be empty"));
        }

        let record = PersonalRecord {
            id: Uuid::new_v4(),
            user_id,
            exercise_name: body.exercise_name,
            record_type: body.record_type,
            value: body.value,
            unit: body
                .unit
                .unwrap_or_else(|| body.record_type.default_unit().to_owned()),
            notes: body.notes,
            achieved_at: Utc::now(),
        };
        resources.storage.create_personal_record(&record).await?;

        Ok((StatusCode::CREATED, Json(record)).into_response())
    }

    /// Handle GET /api/personal-records/user/:user_id - Records, newest first
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        Path(user_id): Path<String>,
    ) -> Result<Response, AppError> {
        let user_id = parse_uuid(&user_id, "user ID")?;
        let records = resources.storage.get_user_personal_records(user_id).await?;

        Ok((StatusCode::OK, Json(records)).into_response())
    }
}
