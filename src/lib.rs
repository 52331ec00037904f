// ABOUTME: Main library entry point for the FitGenius fitness tracking backend
// ABOUTME: Exposes readiness scoring, plan adjustment, storage, LLM coaching, and REST routes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitGenius

#![deny(unsafe_code)]

//! # FitGenius Server
//!
//! A fitness tracking backend built around an adaptive readiness pipeline:
//! daily wellness check-ins produce a composite readiness score, and that
//! score scales the volume and intensity of an AI-generated workout plan.
//!
//! ## Features
//!
//! - **Readiness scoring**: five wellness ratings combine into a 0-100 score
//! - **Plan adjustment**: workout plans scale up or down with daily readiness
//! - **AI coaching**: workout plans, meal plans, and chat via an
//!   OpenAI-compatible provider, with deterministic fallbacks
//! - **Tracking**: calories, progress, alarms, achievements, personal records
//! - **Injected storage**: all persistence sits behind a trait, with a
//!   volatile in-memory reference implementation
//!
//! ## Quick Start
//!
//! 1. Export `OPENAI_API_KEY` if AI generation should hit a real model
//! 2. Start the server with `fitgenius-server`
//! 3. Point the web client at `http://localhost:8080/api`
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use fitgenius::config::environment::ServerConfig;
//! use fitgenius::errors::AppResult;
//!
//! fn main() -> AppResult<()> {
//!     // Load configuration
//!     let config = ServerConfig::from_env()?;
//!
//!     println!("FitGenius server configured with port: HTTP={}", config.http_port);
//!
//!     Ok(())
//! }
//! ```

// ── Public API ──────────────────────────────────────────────────────────
// These modules are used by the server binary (src/bin/) and integration
// tests (tests/). They must remain `pub` so external consumers can access them.

/// AI coach services: plan generation, nutrition analysis, persona chat
pub mod coach;

/// Configuration management from environment variables
pub mod config;

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Pure fitness algorithms: readiness scoring, plan adjustment, streaks
pub mod intelligence;

/// LLM provider abstraction for AI chat integration
pub mod llm;

/// Production logging and structured output
pub mod logging;

/// Common data models for users, plans, check-ins, and tracking entries
pub mod models;

/// Unified rate limiting for the public API surface
pub mod rate_limiting;

/// Shared server dependency container
pub mod resources;

/// `HTTP` routes for the REST API
pub mod routes;

/// `HTTP` server assembly and lifecycle
pub mod server;

/// Storage abstraction with an in-memory reference implementation
pub mod storage;
