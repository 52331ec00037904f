// ABOUTME: Centralized resource container for dependency injection across routes
// ABOUTME: Manages shared storage, coach, configuration, and rate limiter instances
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitGenius

//! # Server Resources Module
//!
//! Centralized resource container for dependency injection.
//! Routes receive one `Arc<ServerResources>` instead of threading each
//! dependency through individually.

use std::sync::Arc;

use tracing::info;

use crate::coach::CoachService;
use crate::config::environment::ServerConfig;
use crate::errors::AppResult;
use crate::llm::openai::{OpenAiConfig, OpenAiProvider};
use crate::llm::LlmProvider;
use crate::rate_limiting::RateLimitTiers;
use crate::storage::memory::MemoryStorage;
use crate::storage::StorageProvider;

/// Centralized resource container for dependency injection
#[derive(Clone)]
pub struct ServerResources {
    /// Persistence backend
    pub storage: Arc<dyn StorageProvider>,
    /// AI coach operations
    pub coach: Arc<CoachService>,
    /// Runtime configuration
    pub config: Arc<ServerConfig>,
    /// Rate limiter tiers shared across the router
    pub limits: RateLimitTiers,
}

impl ServerResources {
    /// Create server resources from storage and configuration.
    ///
    /// Builds the LLM provider from the configuration when an API key is
    /// present; otherwise the coach runs in fallback mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the LLM HTTP client cannot be constructed.
    pub fn new(storage: Arc<dyn StorageProvider>, config: Arc<ServerConfig>) -> AppResult<Self> {
        let coach = Arc::new(build_coach(&config)?);
        Ok(Self {
            storage,
            coach,
            config,
            limits: RateLimitTiers::new(),
        })
    }

    /// Create a new builder for `ServerResources`
    #[must_use]
    pub const fn builder() -> ServerResourcesBuilder {
        ServerResourcesBuilder::new()
    }
}

fn build_coach(config: &ServerConfig) -> AppResult<CoachService> {
    if config.llm.is_configured() {
        let provider = OpenAiProvider::new(OpenAiConfig {
            base_url: config.llm.base_url.clone(),
            api_key: config.llm.api_key.clone(),
            default_model: config.llm.model.clone(),
        })?;
        info!(
            "AI coach enabled with model {} at {}",
            config.llm.model, config.llm.base_url
        );
        let llm: Arc<dyn LlmProvider> = Arc::new(provider);
        Ok(CoachService::new(Some(llm)))
    } else {
        info!("No LLM API key configured; AI coach will serve fallback responses");
        Ok(CoachService::without_llm())
    }
}

/// Builder for `ServerResources` with test-friendly defaults.
///
/// Unset fields fall back to in-memory storage, default configuration,
/// and a coach derived from that configuration.
pub struct ServerResourcesBuilder {
    storage: Option<Arc<dyn StorageProvider>>,
    coach: Option<Arc<CoachService>>,
    config: Option<Arc<ServerConfig>>,
}

impl ServerResourcesBuilder {
    /// Create a new builder
    #[must_use]
    pub const fn new() -> Self {
        Self {
            storage: None,
            coach: None,
            config: None,
        }
    }

    /// Set the storage backend
    #[must_use]
    pub fn with_storage(mut self, storage: Arc<dyn StorageProvider>) -> Self {
        self.storage = Some(storage);
        self
    }

    /// Set the coach service directly, bypassing configuration
    #[must_use]
    pub fn with_coach(mut self, coach: CoachService) -> Self {
        self.coach = Some(Arc::new(coach));
        self
    }

    /// Set the server configuration
    #[must_use]
    pub fn with_config(mut self, config: Arc<ServerConfig>) -> Self {
        self.config = Some(config);
        self
    }

    /// Build the `ServerResources`
    ///
    /// # Errors
    ///
    /// Returns an error if the coach must be derived from configuration
    /// and the LLM HTTP client cannot be constructed.
    pub fn build(self) -> AppResult<ServerResources> {
        let config = self
            .config
            .unwrap_or_else(|| Arc::new(ServerConfig::default()));
        let storage = self
            .storage
            .unwrap_or_else(|| Arc::new(MemoryStorage::new()));
        let coach = match self.coach {
            Some(coach) => coach,
            None => Arc::new(build_coach(&config)?),
        };
        Ok(ServerResources {
            storage,
            coach,
            config,
            limits: RateLimitTiers::new(),
        })
    }

    /// Build the `ServerResources` wrapped in an `Arc`
    ///
    /// # Errors
    ///
    /// Returns an error if the coach must be derived from configuration
    /// and the LLM HTTP client cannot be constructed.
    pub fn build_arc(self) -> AppResult<Arc<ServerResources>> {
        Ok(Arc::new(self.build()?))
    }
}

impl Default for ServerResourcesBuilder {
    fn default() -> Self {
        Self::new()
    }
}
