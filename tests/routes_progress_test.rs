// ABOUTME: Integration tests for progress entry recording and retrieval
// ABOUTME: Covers count defaults, newest-first history, and the latest lookup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitGenius

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use common::{create_test_resources, create_test_user};
use fitgenius::models::ProgressEntry;
use fitgenius::routes::ProgressRoutes;
use helpers::axum_test::AxumTestRequest;

use axum::http::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn test_create_records_the_full_snapshot() {
    let resources = create_test_resources();
    let user = create_test_user(&resources).await;
    let router = ProgressRoutes::routes(resources);

    let response = AxumTestRequest::post("/api/progress")
        .json(&json!({
            "userId": user.id.to_string(),
            "weight": 163.2,
            "workoutsCompleted": 12,
            "caloriesConsumed": 2150
        }))
        .send(router)
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let entry: ProgressEntry = response.json();
    assert_eq!(entry.user_id, user.id);
    assert_eq!(entry.weight, Some(163.2));
    assert_eq!(entry.workouts_completed, 12);
    assert_eq!(entry.calories_consumed, 2150);
}

#[tokio::test]
async fn test_create_defaults_counts_to_zero() {
    let resources = create_test_resources();
    let user = create_test_user(&resources).await;
    let router = ProgressRoutes::routes(resources);

    let response = AxumTestRequest::post("/api/progress")
        .json(&json!({"userId": user.id.to_string()}))
        .send(router)
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let entry: ProgressEntry = response.json();
    assert_eq!(entry.weight, None);
    assert_eq!(entry.workouts_completed, 0);
    assert_eq!(entry.calories_consumed, 0);
}

#[tokio::test]
async fn test_create_requires_an_existing_user() {
    let resources = create_test_resources();
    let router = ProgressRoutes::routes(resources);

    let response = AxumTestRequest::post("/api/progress")
        .json(&json!({"userId": uuid::Uuid::new_v4().to_string()}))
        .send(router)
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_history_lists_newest_entries_first() {
    let resources = create_test_resources();
    let user = create_test_user(&resources).await;
    let router = ProgressRoutes::routes(resources);

    for workouts in [5, 6, 7] {
        AxumTestRequest::post("/api/progress")
            .json(&json!({
                "userId": user.id.to_string(),
                "workoutsCompleted": workouts
            }))
            .send(router.clone())
            .await
            .assert_status(StatusCode::CREATED);
    }

    let response = AxumTestRequest::get(&format!("/api/progress/user/{}", user.id))
        .send(router)
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let entries: Vec<ProgressEntry> = response.json();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0].workouts_completed, 7);
    assert_eq!(entries[2].workouts_completed, 5);
}

#[tokio::test]
async fn test_latest_returns_the_most_recent_entry() {
    let resources = create_test_resources();
    let user = create_test_user(&resources).await;
    let router = ProgressRoutes::routes(resources);

    for weight in [165.0, 164.1] {
        AxumTestRequest::post("/api/progress")
            .json(&json!({"userId": user.id.to_string(), "weight": weight}))
            .send(router.clone())
            .await
            .assert_status(StatusCode::CREATED);
    }

    let response = AxumTestRequest::get(&format!("/api/progress/latest/{}", user.id))
        .send(router)
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let entry: ProgressEntry = response.json();
    assert_eq!(entry.weight, Some(164.1));
}

#[tokio::test]
async fn test_latest_without_entries_is_not_found() {
    let resources = create_test_resources();
    let user = create_test_user(&resources).await;
    let router = ProgressRoutes::routes(resources);

    let response = AxumTestRequest::get(&format!("/api/progress/latest/{}", user.id))
        .send(router)
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["error"]["message"], "No progress data found");
}
