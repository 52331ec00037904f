// ABOUTME: Production server binary wiring configuration, logging, and storage together
// ABOUTME: Starts the FitGenius REST API with graceful shutdown handling
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitGenius

//! # FitGenius Server Binary
//!
//! This binary starts the FitGenius fitness tracking API with readiness
//! scoring, adaptive workout plans, and AI coaching.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use fitgenius::{
    config::environment::{LogLevel, ServerConfig},
    logging::LoggingConfig,
    resources::ServerResources,
    server::HttpServer,
    storage::memory::MemoryStorage,
};
use tracing::{error, info};

/// Command line arguments for the server binary
#[derive(Parser)]
#[command(name = "fitgenius-server")]
#[command(about = "FitGenius - Fitness tracking API with adaptive AI coaching")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override HTTP bind host
    #[arg(long)]
    http_host: Option<String>,

    /// Override log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Handle container environments where clap may not work properly
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Argument parsing failed: {e}");
            eprintln!("Using default configuration for production mode");
            Args {
                http_port: None,
                http_host: None,
                log_level: None,
            }
        }
    };

    // Load configuration from environment
    let mut config = ServerConfig::from_env()?;

    // Apply command line overrides
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if let Some(http_host) = args.http_host {
        config.http_host = http_host;
    }

    // Initialize production logging
    let mut logging_config = LoggingConfig::from_env();
    if let Some(log_level) = args.log_level {
        config.log_level = LogLevel::from_str_or_default(&log_level);
        logging_config.level = config.log_level.to_string();
    }
    logging_config.init()?;

    info!("Starting FitGenius API - Production Mode");
    info!("{}", config.summary());

    let config = Arc::new(config);
    let storage = Arc::new(MemoryStorage::new());
    let resources = Arc::new(ServerResources::new(storage, config.clone())?);
    let server = HttpServer::new(resources);

    // Display all available API endpoints
    display_available_endpoints(&config);

    info!("Ready to track fitness data!");

    if let Err(e) = server.serve().await {
        error!("Server error: {e}");
        return Err(e.into());
    }

    Ok(())
}

/// Display all available API endpoints with their addresses
fn display_available_endpoints(config: &ServerConfig) {
    let host = &config.http_host;
    let port = config.http_port;

    info!("=== Available API Endpoints ===");
    display_health_endpoints(host, port);
    display_user_endpoints(host, port);
    display_checkin_endpoints(host, port);
    display_plan_endpoints(host, port);
    display_nutrition_endpoints(host, port);
    display_tracking_endpoints(host, port);
    display_achievement_endpoints(host, port);
    display_chat_endpoints(host, port);
    info!("=== End of Endpoint List ===");
}

#[allow(clippy::cognitive_complexity)]
fn display_health_endpoints(host: &str, port: u16) {
    info!("Service Health:");
    info!("   Health Check:      GET  http://{host}:{port}/health");
    info!("   Readiness Probe:   GET  http://{host}:{port}/ready");
}

#[allow(clippy::cognitive_complexity)]
fn display_user_endpoints(host: &str, port: u16) {
    info!("User Accounts:");
    info!("   Register User:     POST http://{host}:{port}/api/users");
    info!("   Get User:          GET  http://{host}:{port}/api/users/{{id}}");
    info!("   Update Profile:    PATCH http://{host}:{port}/api/users/{{id}}");
}

#[allow(clippy::cognitive_complexity)]
fn display_checkin_endpoints(host: &str, port: u16) {
    info!("Wellness Check-ins:");
    info!("   Submit Check-in:   POST http://{host}:{port}/api/checkins");
    info!("   Today's Check-in:  GET  http://{host}:{port}/api/checkins/today/{{user_id}}");
    info!("   Check-in History:  GET  http://{host}:{port}/api/checkins/user/{{user_id}}");
    info!("   Current Streak:    GET  http://{host}:{port}/api/checkins/streak/{{user_id}}");
}

#[allow(clippy::cognitive_complexity)]
fn display_plan_endpoints(host: &str, port: u16) {
    info!("Workout Plans:");
    info!("   Generate Plan:     POST http://{host}:{port}/api/workout-plans/generate");
    info!("   Current Plan:      GET  http://{host}:{port}/api/workout-plans/user/{{user_id}}");
    info!("   Adjust Plan:       POST http://{host}:{port}/api/workout-plans/adjust");
}

#[allow(clippy::cognitive_complexity)]
fn display_nutrition_endpoints(host: &str, port: u16) {
    info!("Nutrition:");
    info!("   Generate Meal Plan: POST http://{host}:{port}/api/meal-plans/generate");
    info!("   Analyze Food:      POST http://{host}:{port}/api/calories/analyze");
    info!("   Log Calories:      POST http://{host}:{port}/api/calories");
    info!("   Calorie Log:       GET  http://{host}:{port}/api/calories/user/{{user_id}}");
    info!("   Today's Total:     GET  http://{host}:{port}/api/calories/today/{{user_id}}");
}

#[allow(clippy::cognitive_complexity)]
fn display_tracking_endpoints(host: &str, port: u16) {
    info!("Tracking:");
    info!("   Create Alarm:      POST http://{host}:{port}/api/alarms");
    info!("   List Alarms:       GET  http://{host}:{port}/api/alarms/user/{{user_id}}");
    info!("   Log Progress:      POST http://{host}:{port}/api/progress");
    info!("   Latest Progress:   GET  http://{host}:{port}/api/progress/latest/{{user_id}}");
    info!("   Record PR:         POST http://{host}:{port}/api/personal-records");
    info!("   List PRs:          GET  http://{host}:{port}/api/personal-records/user/{{user_id}}");
}

#[allow(clippy::cognitive_complexity)]
fn display_achievement_endpoints(host: &str, port: u16) {
    info!("Achievements:");
    info!("   Catalog:           GET  http://{host}:{port}/api/achievements/definitions");
    info!("   Earned:            GET  http://{host}:{port}/api/achievements/user/{{user_id}}");
    info!("   Progress:          GET  http://{host}:{port}/api/achievements/progress/{{user_id}}");
    info!("   Record:            POST http://{host}:{port}/api/achievements");
}

#[allow(clippy::cognitive_complexity)]
fn display_chat_endpoints(host: &str, port: u16) {
    info!("Coaching Chat:");
    info!("   Store Message:     POST http://{host}:{port}/api/chat");
    info!("   Chat History:      GET  http://{host}:{port}/api/chat/user/{{user_id}}");
    info!("   Coach Reply:       POST http://{host}:{port}/api/chat/coach");
    info!("   Direct AI Chat:    POST http://{host}:{port}/api/ai/chat");
}
