// ABOUTME: Route handlers for chat history, the AI coach conversation, and the raw LLM proxy
// ABOUTME: Coach replies never fail; the raw proxy surfaces provider errors directly
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitGenius

//! Chat routes
//!
//! The coach endpoint stores the user's message, builds the persona prompt
//! from profile, today's readiness, and plan state, and stores the
//! assistant's reply so history survives reloads.

use crate::{
    coach::CoachContext,
    errors::AppError,
    logging::AppLogger,
    models::{ChatMessage, ChatRole},
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
use std::sync::Arc;
use std::time::Instant;
use uuid::Uuid;

/// Request body for storing one chat message verbatim
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMessageRequest {
    /// Owner of the conversation
    pub user_id: String,
    /// Message text
    pub content: String,
    /// Who said it
    pub role: ChatRole,
}

/// Request body for talking to the AI coach
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoachChatRequest {
    /// Owner of the conversation
    pub user_id: String,
    /// The user's message to the coach
    pub content: String,
}

/// Request body for the raw LLM proxy
#[derive(Debug, Deserialize)]
pub struct AiChatRequest {
    /// Prompt forwarded to the provider unchanged
    pub prompt: String,
}

/// Response from the raw LLM proxy
#[derive(Debug, Serialize)]
pub struct AiChatResponse {
    /// The provider's completion text
    pub response: String,
}

/// Chat routes handler
pub struct ChatRoutes;

impl ChatRoutes {
    /// Create all chat routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        let store = rate_limiting::attach(
            Router::new()
                .route("/api/chat", post(Self::handle_create))
                .with_state(resources.clone()),
            resources.config.rate_limit.enabled,
            &resources.limits.create,
        );
        let ai = rate_limiting::attach(
            Router::new()
                .route("/api/chat/coach", post(Self::handle_coach))
                .route("/api/ai/chat", post(Self::handle_direct))
                .with_state(resources.clone()),
            resources.config.rate_limit.enabled,
            &resources.limits.ai,
        );

        Router::new()
            .route("/api/chat/user/:user_id", get(Self::handle_history))
            .with_state(resources)
            .merge(store)
            .merge(ai)
    }

    /// Handle POST /api/chat - Store a message as sent
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        AppJson(body): AppJson<CreateMessageRequest>,
    ) -> Result<Response, AppError> {
        let user_id = parse_uuid(&body.user_id, "user ID")?;
        require_user(resources.storage.as_ref(), user_id).await?;
        if body.content.trim().is_empty() {
            return Err(AppError::invalid_input("Message content cannot be empty"));
        }

        let message = ChatMessage {
            id: Uuid::new_v4(),
            user_id,
            role: body.role,
            content: body.content,
            created_at: Utc::now(),
        };
        resources.storage.create_chat_message(&message).await?;

        Ok((StatusCode::CREATED, Json(message)).into_response())
    }

    /// Handle GET /api/chat/user/:user_id - Conversation, oldest first
    async fn handle_history(
        State(resources): State<Arc<ServerResources>>,
        Path(user_id): Path<String>,
    ) -> Result<Response, AppError> {
        let user_id = parse_uuid(&user_id, "user ID")?;
        let messages = resources.storage.get_user_chat_messages(user_id).await?;

        Ok((StatusCode::OK, Json(messages)).into_response())
    }

    /// Handle POST /api/chat/coach - Converse with the AI coach
    async fn handle_coach(
        State(resources): State<Arc<ServerResources>>,
        AppJson(body): AppJson<CoachChatRequest>,
    ) -> Result<Response, AppError> {
        let user_id = parse_uuid(&body.user_id, "user ID")?;
        let user = require_user(resources.storage.as_ref(), user_id).await?;
        if body.content.trim().is_empty() {
            return Err(AppError::invalid_input("Message content cannot be empty"));
        }

        let user_message = ChatMessage {
            id: Uuid::new_v4(),
            user_id,
            role: ChatRole::User,
            content: body.content,
            created_at: Utc::now(),
        };
        resources.storage.create_chat_message(&user_message).await?;

        let today_readiness = resources
            .storage
            .get_checkin_on(user_id, Utc::now().date_naive())
            .await?
            .map(|checkin| checkin.readiness_score);
        let has_plan = resources.storage.get_workout_plan(user_id).await?.is_some();
        let context = CoachContext::for_user(&user, today_readiness, has_plan);

        let started = Instant::now();
        let reply = resources
            .coach
            .coach_reply(&context, &user_message.content)
            .await;
        let elapsed = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        AppLogger::log_generation(&user_id.to_string(), "coach_chat", true, elapsed);

        let assistant_message = ChatMessage {
            id: Uuid::new_v4(),
            user_id,
            role: ChatRole::Assistant,
            content: reply,
            created_at: Utc::now(),
        };
        resources
            .storage
            .create_chat_message(&assistant_message)
            .await?;

        Ok((StatusCode::OK, Json(assistant_message)).into_response())
    }

    /// Handle POST /api/ai/chat - Raw LLM proxy
    async fn handle_direct(
        State(resources): State<Arc<ServerResources>>,
        AppJson(body): AppJson<AiChatRequest>,
    ) -> Result<Response, AppError> {
        if body.prompt.trim().is_empty() {
            return Err(AppError::invalid_input("Prompt cannot be empty"));
        }

        let response = AiChatResponse {
            response: resources.coach.direct_reply(&body.prompt).await?,
        };
        Ok((StatusCode::OK, Json(response)).into_response())
    }
}
