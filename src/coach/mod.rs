// ABOUTME: AI coach features: plan generation, nutrition analysis, and chat replies
// ABOUTME: Wraps the LLM provider and supplies deterministic fallbacks where the API allows them
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitGenius

//! # AI Coach
//!
//! Everything that turns user data into LLM prompts and LLM output back
//! into typed responses. [`CoachService`] is the single entry point;
//! routes never talk to the provider directly.

/// Keyword-based replies used when the LLM is unavailable
pub mod fallbacks;

/// Persona prompts and prompt builders
pub mod prompts;

/// LLM-backed coach operations
pub mod service;

pub use fallbacks::CoachContext;
pub use service::{CoachService, MealPlanParams, WorkoutPlanParams};
