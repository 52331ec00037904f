// ABOUTME: Integration tests for food analysis and the daily calorie log
// ABOUTME: Covers the no-key estimate path, log defaults, and date filtering
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitGenius

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use common::{create_stubbed_resources, create_test_resources, create_test_user};
use fitgenius::models::{CalorieEntry, Confidence, NutritionEstimate};
use fitgenius::routes::CalorieRoutes;
use helpers::axum_test::AxumTestRequest;

use axum::http::StatusCode;
use serde_json::{json, Value};

// ============================================================================
// Analysis Tests
// ============================================================================

#[tokio::test]
async fn test_analyze_without_provider_returns_an_estimate() {
    let resources = create_test_resources();
    let router = CalorieRoutes::routes(resources);

    let response = AxumTestRequest::post("/api/calories/analyze")
        .json(&json!({"foodName": "grilled salmon", "quantity": 2, "unit": "fillet"}))
        .send(router)
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let estimate: NutritionEstimate = response.json();
    assert_eq!(estimate.food, "grilled salmon");
    assert_eq!(estimate.quantity, 2);
    assert_eq!(estimate.unit, "fillet");
    assert_eq!(estimate.confidence, Confidence::Medium);
    assert!((100..400).contains(&estimate.calories));
}

#[tokio::test]
async fn test_analyze_defaults_quantity_and_unit() {
    let resources = create_test_resources();
    let router = CalorieRoutes::routes(resources);

    let response = AxumTestRequest::post("/api/calories/analyze")
        .json(&json!({"foodName": "banana"}))
        .send(router)
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let estimate: NutritionEstimate = response.json();
    assert_eq!(estimate.quantity, 1);
    assert_eq!(estimate.unit, "serving");
}

#[tokio::test]
async fn test_analyze_parses_provider_completions() {
    let reply = json!({
        "food": "grilled salmon",
        "quantity": 1,
        "unit": "fillet",
        "calories": 367,
        "protein": 39,
        "carbs": 0,
        "fat": 22,
        "confidence": "high"
    });
    let resources = create_stubbed_resources(&reply.to_string());
    let router = CalorieRoutes::routes(resources);

    let response = AxumTestRequest::post("/api/calories/analyze")
        .json(&json!({"foodName": "grilled salmon", "unit": "fillet"}))
        .send(router)
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let estimate: NutritionEstimate = response.json();
    assert_eq!(estimate.calories, 367);
    assert_eq!(estimate.confidence, Confidence::High);
}

#[tokio::test]
async fn test_analyze_rejects_blank_food_names() {
    let resources = create_test_resources();
    let router = CalorieRoutes::routes(resources);

    let response = AxumTestRequest::post("/api/calories/analyze")
        .json(&json!({"foodName": "   "}))
        .send(router)
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "INVALID_INPUT");
    assert_eq!(body["error"]["message"], "Food name cannot be empty");
}

// ============================================================================
// Calorie Log Tests
// ============================================================================

#[tokio::test]
async fn test_log_entry_applies_portion_defaults() {
    let resources = create_test_resources();
    let user = create_test_user(&resources).await;
    let router = CalorieRoutes::routes(resources);

    let response = AxumTestRequest::post("/api/calories")
        .json(&json!({
            "userId": user.id.to_string(),
            "foodName": "Greek yogurt",
            "calories": 120,
            "protein": 15
        }))
        .send(router)
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let entry: CalorieEntry = response.json();
    assert_eq!(entry.user_id, user.id);
    assert_eq!(entry.food_name, "Greek yogurt");
    assert_eq!(entry.calories, 120);
    assert_eq!(entry.protein, Some(15));
    assert_eq!(entry.quantity, 1);
    assert_eq!(entry.unit, "serving");
}

#[tokio::test]
async fn test_log_entry_requires_an_existing_user() {
    let resources = create_test_resources();
    let router = CalorieRoutes::routes(resources);

    let response = AxumTestRequest::post("/api/calories")
        .json(&json!({
            "userId": uuid::Uuid::new_v4().to_string(),
            "foodName": "Greek yogurt",
            "calories": 120
        }))
        .send(router)
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_log_entry_rejects_blank_food_names() {
    let resources = create_test_resources();
    let user = create_test_user(&resources).await;
    let router = CalorieRoutes::routes(resources);

    let response = AxumTestRequest::post("/api/calories")
        .json(&json!({
            "userId": user.id.to_string(),
            "foodName": "",
            "calories": 120
        }))
        .send(router)
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"]["message"], "Food name cannot be empty");
}

#[tokio::test]
async fn test_log_lists_newest_entries_first() {
    let resources = create_test_resources();
    let user = create_test_user(&resources).await;
    let router = CalorieRoutes::routes(resources);

    for food in ["oats", "chicken wrap", "protein shake"] {
        AxumTestRequest::post("/api/calories")
            .json(&json!({
                "userId": user.id.to_string(),
                "foodName": food,
                "calories": 300
            }))
            .send(router.clone())
            .await
            .assert_status(StatusCode::CREATED);
    }

    let response = AxumTestRequest::get(&format!("/api/calories/user/{}", user.id))
        .send(router)
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let entries: Vec<CalorieEntry> = response.json();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0].food_name, "protein shake");
    assert_eq!(entries[2].food_name, "oats");
}

#[tokio::test]
async fn test_log_filters_by_date() {
    let resources = create_test_resources();
    let user = create_test_user(&resources).await;
    let router = CalorieRoutes::routes(resources.clone());

    AxumTestRequest::post("/api/calories")
        .json(&json!({
            "userId": user.id.to_string(),
            "foodName": "today's lunch",
            "calories": 600
        }))
        .send(router.clone())
        .await
        .assert_status(StatusCode::CREATED);

    // A week-old entry inserted directly, below the one-day route granularity
    let old_entry = CalorieEntry {
        id: uuid::Uuid::new_v4(),
        user_id: user.id,
        food_name: "last week's dinner".to_owned(),
        calories: 800,
        protein: None,
        quantity: 1,
        unit: "serving".to_owned(),
        entry_date: chrono::Utc::now() - chrono::Duration::days(7),
    };
    resources
        .storage
        .create_calorie_entry(&old_entry)
        .await
        .unwrap();

    let today = chrono::Utc::now().date_naive();
    let response = AxumTestRequest::get(&format!(
        "/api/calories/user/{}?date={}",
        user.id, today
    ))
    .send(router.clone())
    .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let entries: Vec<CalorieEntry> = response.json();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].food_name, "today's lunch");

    let unfiltered: Vec<CalorieEntry> = AxumTestRequest::get(&format!(
        "/api/calories/user/{}",
        user.id
    ))
    .send(router)
    .await
    .json();
    assert_eq!(unfiltered.len(), 2);
}

#[tokio::test]
async fn test_log_rejects_malformed_dates() {
    let resources = create_test_resources();
    let user = create_test_user(&resources).await;
    let router = CalorieRoutes::routes(resources);

    let response = AxumTestRequest::get(&format!(
        "/api/calories/user/{}?date=03/10/2025",
        user.id
    ))
    .send(router)
    .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "INVALID_FORMAT");
    assert_eq!(
        body["error"]["message"],
        "Invalid date format, expected YYYY-MM-DD"
    );
}

#[tokio::test]
async fn test_today_total_sums_only_todays_entries() {
    let resources = create_test_resources();
    let user = create_test_user(&resources).await;
    let router = CalorieRoutes::routes(resources.clone());

    for calories in [450, 700] {
        AxumTestRequest::post("/api/calories")
            .json(&json!({
                "userId": user.id.to_string(),
                "foodName": "meal",
                "calories": calories
            }))
            .send(router.clone())
            .await
            .assert_status(StatusCode::CREATED);
    }

    let yesterday_entry = CalorieEntry {
        id: uuid::Uuid::new_v4(),
        user_id: user.id,
        food_name: "yesterday".to_owned(),
        calories: 999,
        protein: None,
        quantity: 1,
        unit: "serving".to_owned(),
        entry_date: chrono::Utc::now() - chrono::Duration::days(1),
    };
    resources
        .storage
        .create_calorie_entry(&yesterday_entry)
        .await
        .unwrap();

    let response = AxumTestRequest::get(&format!("/api/calories/today/{}", user.id))
        .send(router)
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["totalCalories"], 1150);
}
