// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides resource builders, stub LLM providers, and user creation helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitGenius
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::module_name_repetitions
)]
//! Shared test utilities for `fitgenius`
//!
//! This module provides common test setup functions to reduce duplication
//! across integration tests.

use std::sync::{Arc, Once};

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use uuid::Uuid;

use fitgenius::coach::CoachService;
use fitgenius::config::environment::{RateLimitConfig, ServerConfig};
use fitgenius::errors::AppError;
use fitgenius::llm::{ChatRequest, ChatResponse, LlmProvider};
use fitgenius::models::User;
use fitgenius::resources::ServerResources;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        // Check for TEST_LOG environment variable to control test logging level
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            Ok("WARN" | "ERROR") | _ => tracing::Level::WARN, // Default to WARN for quiet tests
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Default server configuration with rate limiting switched off, so route
/// tests never trip a tier while exercising unrelated behavior
pub fn unlimited_config() -> ServerConfig {
    ServerConfig {
        rate_limit: RateLimitConfig { enabled: false },
        ..ServerConfig::default()
    }
}

/// Standard test resources: in-memory storage, fallback coach, no limits
pub fn create_test_resources() -> Arc<ServerResources> {
    init_test_logging();
    ServerResources::builder()
        .with_config(Arc::new(unlimited_config()))
        .with_coach(CoachService::without_llm())
        .build_arc()
        .expect("Failed to build test resources")
}

/// Test resources with rate limiting enabled, for limiter behavior tests
pub fn create_rate_limited_resources() -> Arc<ServerResources> {
    init_test_logging();
    ServerResources::builder()
        .with_coach(CoachService::without_llm())
        .build_arc()
        .expect("Failed to build rate limited test resources")
}

/// Test resources whose coach wraps a stub LLM that always replies with
/// `content`, for generation success paths
pub fn create_stubbed_resources(content: &str) -> Arc<ServerResources> {
    init_test_logging();
    ServerResources::builder()
        .with_config(Arc::new(unlimited_config()))
        .with_coach(CoachService::new(Some(Arc::new(StubLlm::returning(
            content,
        )))))
        .build_arc()
        .expect("Failed to build stubbed test resources")
}

/// Test resources whose coach wraps an LLM that fails every completion,
/// for provider error propagation tests
pub fn create_failing_resources() -> Arc<ServerResources> {
    init_test_logging();
    ServerResources::builder()
        .with_config(Arc::new(unlimited_config()))
        .with_coach(CoachService::new(Some(Arc::new(FailingLlm))))
        .build_arc()
        .expect("Failed to build failing test resources")
}

/// Create and store a test user with a unique username
pub async fn create_test_user(resources: &ServerResources) -> User {
    let user = User {
        id: Uuid::new_v4(),
        username: format!("athlete_{}", Uuid::new_v4().simple()),
        password: "correct-horse-battery".to_owned(),
        age: Some(30),
        weight: Some(165.0),
        height: Some(70.0),
        fitness_level: Some("intermediate".to_owned()),
        goals: vec!["strength".to_owned(), "endurance".to_owned()],
        workout_days: Some(4),
        calorie_target: Some(2400),
        created_at: Utc::now(),
    };
    resources
        .storage
        .create_user(&user)
        .await
        .expect("Failed to store test user");
    user
}

/// A workout plan payload in the shape the trainer prompt asks for
pub fn sample_plan_json() -> serde_json::Value {
    json!({
        "overview": "Push/pull split with one recovery day",
        "weeklySchedule": [
            {
                "day": "Monday",
                "workoutType": "Push",
                "duration": 60,
                "exercises": [
                    {"name": "Bench Press", "sets": 3, "reps": 10, "instructions": "Control the descent"},
                    {"name": "Overhead Press", "sets": 3, "reps": 8}
                ]
            },
            {
                "day": "Wednesday",
                "workoutType": "Pull",
                "duration": 60,
                "exercises": [
                    {"name": "Deadlift", "sets": 3, "reps": 5}
                ]
            }
        ],
        "tips": ["Warm up for ten minutes before lifting"]
    })
}

/// A meal plan payload in the shape the nutritionist prompt asks for
pub fn sample_meal_plan_json() -> serde_json::Value {
    json!({
        "dailyNutritionTargets": {
            "calories": 2400,
            "protein": 150,
            "carbs": 250,
            "fat": 80
        },
        "proteinSources": [
            {"name": "Chicken breast", "serving": "100g", "calories": 165, "protein": 31, "benefits": "Lean and versatile"}
        ],
        "sampleMeals": [
            {"mealType": "Breakfast", "name": "Oatmeal with whey", "ingredients": ["oats", "whey", "banana"], "calories": 450, "protein": 35}
        ],
        "tips": ["Prep meals on Sunday"]
    })
}

/// Stub provider returning a canned completion, for generation tests
pub struct StubLlm {
    reply: String,
}

impl StubLlm {
    pub fn returning(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
        }
    }
}

#[async_trait]
impl LlmProvider for StubLlm {
    fn name(&self) -> &'static str {
        "stub"
    }

    fn display_name(&self) -> &'static str {
        "Stub Provider"
    }

    fn default_model(&self) -> &str {
        "stub-model"
    }

    async fn complete(&self, _request: &ChatRequest) -> Result<ChatResponse, AppError> {
        Ok(ChatResponse {
            content: self.reply.clone(),
            model: "stub-model".to_owned(),
            usage: None,
            finish_reason: Some("stop".to_owned()),
        })
    }

    async fn health_check(&self) -> Result<bool, AppError> {
        Ok(true)
    }
}

/// Stub provider that fails every completion, for error propagation tests
pub struct FailingLlm;

#[async_trait]
impl LlmProvider for FailingLlm {
    fn name(&self) -> &'static str {
        "failing-stub"
    }

    fn display_name(&self) -> &'static str {
        "Failing Stub Provider"
    }

    fn default_model(&self) -> &str {
        "stub-model"
    }

    async fn complete(&self, _request: &ChatRequest) -> Result<ChatResponse, AppError> {
        Err(AppError::external_service(
            "Stub Provider",
            "simulated completion failure",
        ))
    }

    async fn health_check(&self) -> Result<bool, AppError> {
        Ok(false)
    }
}
