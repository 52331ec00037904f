// ABOUTME: Configuration management module for centralized server settings
// ABOUTME: Parses environment variables into validated, typed runtime configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitGenius
//! Configuration module for the FitGenius server
//!
//! All runtime configuration comes from environment variables; there is no
//! config file. [`environment::ServerConfig::from_env`] reads, validates, and
//! returns the full configuration in one step.

/// Environment and server configuration
pub mod environment;

// Re-export main configuration types from environment
pub use environment::{LlmConfig, LogLevel, RateLimitConfig, ServerConfig};
