// ABOUTME: Pure fitness algorithms with no I/O: readiness, adjustment, streaks, achievements
// ABOUTME: Every function here is synchronous and safe to call concurrently
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitGenius

//! # Fitness Intelligence
//!
//! The pure computational core of the server. All functions take immutable
//! inputs and return new outputs; persistence and transport live elsewhere.

/// Achievement catalog and progress computation
pub mod achievements;

/// Tunable constants for scoring and adjustment
pub mod constants;

/// Readiness-based workout plan scaling
pub mod plan_adjuster;

/// Composite readiness scoring from wellness ratings
pub mod readiness;

/// Consecutive-day check-in streak computation
pub mod streaks;

pub use achievements::{
    find_definition, progress_percent, AchievementDefinition, AchievementInputs,
    AchievementMetric, ACHIEVEMENT_DEFINITIONS,
};
pub use plan_adjuster::adjust_plan;
pub use readiness::{readiness_score, ReadinessBracket, WellnessRatings};
pub use streaks::{current_streak, streak_as_of};
