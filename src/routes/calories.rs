// ABOUTME: Route handlers for food analysis and the daily calorie log
// ABOUTME: Analysis estimates nutrition; the log stores what the user actually ate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitGenius

//! Calorie routes
//!
//! Analysis runs the coach service, which answers with a pseudo-random
//! estimate when no LLM key is configured. Log entries are plain storage
//! writes with a per-day filter on reads.

use crate::{
    errors::{AppError, ErrorCode},
    logging::AppLogger,
    models::CalorieEntry,
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
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use uuid::Uuid;

/// Default portion count when the caller omits one
const DEFAULT_QUANTITY: u32 = 1;
/// Default portion unit when the caller omits one
const DEFAULT_UNIT: &str = "serving";

/// Request body for analyzing a food's nutrition
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeFoodRequest {
    /// Food to look up
    pub food_name: String,
    /// Portion count, defaults to 1
    #[serde(default)]
    pub quantity: Option<u32>,
    /// Portion unit, defaults to "serving"
    #[serde(default)]
    pub unit: Option<String>,
}

/// Request body for logging a calorie entry
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCalorieEntryRequest {
    /// Owner of the entry
    pub user_id: String,
    /// Food eaten
    pub food_name: String,
    /// Calories consumed
    pub calories: u32,
    /// Protein grams, when known
    #[serde(default)]
    pub protein: Option<u32>,
    /// Portion count, defaults to 1
    #[serde(default)]
    pub quantity: Option<u32>,
    /// Portion unit, defaults to "serving"
    #[serde(default)]
    pub unit: Option<String>,
}

/// Query parameters for the calorie log
#[derive(Debug, Deserialize, Default)]
pub struct CalorieLogQuery {
    /// Restrict entries to one UTC day, formatted `YYYY-MM-DD`
    pub date: Option<String>,
}

/// Response for today's calorie total
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalCaloriesResponse {
    /// Calories summed over today's entries
    pub total_calories: u64,
}

/// Calorie routes handler
pub struct CalorieRoutes;

impl CalorieRoutes {
    /// Create all calorie routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        let analyze = rate_limiting::attach(
            Router::new()
                .route("/api/calories/analyze", post(Self::handle_analyze))
                .with_state(resources.clone()),
            resources.config.rate_limit.enabled,
            &resources.limits.ai,
        );
        let log = rate_limiting::attach(
            Router::new()
                .route("/api/calories", post(Self::handle_create))
                .with_state(resources.clone()),
            resources.config.rate_limit.enabled,
            &resources.limits.create,
        );

        Router::new()
            .route("/api/calories/user/:user_id", get(Self::handle_log))
            .route("/api/calories/today/:user_id", get(Self::handle_today_total))
            .with_state(resources)
            .merge(analyze)
            .merge(log)
    }

    /// Handle POST /api/calories/analyze - Estimate nutrition for a food
    async fn handle_analyze(
        State(resources): State<Arc<ServerResources>>,
        AppJson(body): AppJson<AnalyzeFoodRequest>,
    ) -> Result<Response, AppError> {
        if body.food_name.trim().is_empty() {
            return Err(AppError::invalid_input("Food name cannot be empty"));
        }
        let quantity = body.quantity.unwrap_or(DEFAULT_QUANTITY);
        let unit = body.unit.as_deref().unwrap_or(DEFAULT_UNIT);

        let started = Instant::now();
        let result = resources
            .coach
            .analyze_food(&body.food_name, quantity, unit)
            .await;
        let elapsed = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        AppLogger::log_generation("anonymous", "food_analysis", result.is_ok(), elapsed);
        let estimate = result?;

        Ok((StatusCode::OK, Json(estimate)).into_response())
    }

    /// Handle POST /api/calories - Log a calorie entry
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        AppJson(body): AppJson<CreateCalorieEntryRequest>,
    ) -> Result<Response, AppError> {
        let user_id = parse_uuid(&body.user_id, "user ID")?;
        require_user(resources.storage.as_ref(), user_id).await?;

        if body.food_name.trim().is_empty() {
            return Err(AppError::invalid_input("Food name cannot be empty"));
        }

        let entry = CalorieEntry {
            id: Uuid::new_v4(),
            user_id,
            food_name: body.food_name,
            calories: body.calories,
            protein: body.protein,
            quantity: body.quantity.unwrap_or(DEFAULT_QUANTITY),
            unit: body.unit.unwrap_or_else(|| DEFAULT_UNIT.to_owned()),
            entry_date: Utc::now(),
        };
        resources.storage.create_calorie_entry(&entry).await?;

        Ok((StatusCode::CREATED, Json(entry)).into_response())
    }

    /// Handle GET /api/calories/user/:user_id - Calorie log, optionally one day
    async fn handle_log(
        State(resources): State<Arc<ServerResources>>,
        Path(user_id): Path<String>,
        Query(query): Query<CalorieLogQuery>,
    ) -> Result<Response, AppError> {
        let user_id = parse_uuid(&user_id, "user ID")?;
        let date = query.date.as_deref().map(parse_log_date).transpose()?;

        let entries = resources
            .storage
            .get_user_calorie_entries(user_id, date)
            .await?;

        Ok((StatusCode::OK, Json(entries)).into_response())
    }

    /// Handle GET /api/calories/today/:user_id - Sum of today's calories
    async fn handle_today_total(
        State(resources): State<Arc<ServerResources>>,
        Path(user_id): Path<String>,
    ) -> Result<Response, AppError> {
        let user_id = parse_uuid(&user_id, "user ID")?;
        let today = Utc::now().date_naive();

        let entries = resources
            .storage
            .get_user_calorie_entries(user_id, Some(today))
            .await?;
        let response = TotalCaloriesResponse {
            total_calories: entries.iter().map(|e| u64::from(e.calories)).sum(),
        };

        Ok((StatusCode::OK, Json(response)).into_response())
    }
}

fn parse_log_date(raw: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
        AppError::new(
            ErrorCode::InvalidFormat,
            "Invalid date format, expected YYYY-MM-DD",
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_dates_parse_iso_days_only() {
        assert_eq!(
            parse_log_date("2025-03-10").unwrap(),
            NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
        );

        for bad in ["2025-3-10T00:00:00", "03/10/2025", "yesterday"] {
            assert_eq!(parse_log_date(bad).unwrap_err().http_status(), 400);
        }
    }

    #[test]
    fn today_total_serializes_camel_case() {
        let response = TotalCaloriesResponse {
            total_calories: 1750,
        };
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["totalCalories"], 1750);
    }
}
