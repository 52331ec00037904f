// ABOUTME: Built-in achievement catalog plus progress estimation toward each badge
// ABOUTME: Definitions are static; progress is computed from workout and check-in history
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitGenius

//! Achievement catalog.
//!
//! Eight built-in achievements across five categories. Definitions never
//! change at runtime; earned achievements are stored per user, and
//! [`progress_percent`] estimates how close an unearned badge is.

use serde::Serialize;

use crate::intelligence::constants::achievements::{
    BASELINE_STRENGTH_IMPROVEMENT, MORNING_WORKOUT_SHARE, PERFECT_DAY_SHARE,
};
use crate::models::AchievementCategory;

/// Metric an achievement's requirement is measured against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementMetric {
    /// Total workouts completed across all progress entries
    WorkoutsCompleted,
    /// Current consecutive-day check-in streak
    WorkoutStreak,
    /// Workouts completed before noon
    MorningWorkouts,
    /// Ratio of current max lift to starting max lift
    StrengthImprovement,
    /// Days where every nutrition and workout goal was hit
    PerfectDays,
}

/// A single entry in the built-in achievement catalog.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AchievementDefinition {
    /// Stable identifier ("first_workout", "week_streak", ...)
    pub achievement_type: &'static str,
    /// Display name
    pub name: &'static str,
    /// What the user has to do to earn it
    pub description: &'static str,
    /// Badge emoji
    pub icon: &'static str,
    /// Grouping category
    pub category: AchievementCategory,
    /// Threshold the metric must reach
    pub requirement: f64,
    /// Metric the threshold applies to
    pub metric: AchievementMetric,
}

/// The full built-in catalog, in display order.
pub const ACHIEVEMENT_DEFINITIONS: [AchievementDefinition; 8] = [
    AchievementDefinition {
        achievement_type: "first_workout",
        name: "First Steps",
        description: "Complete your first workout",
        icon: "🎯",
        category: AchievementCategory::Milestone,
        requirement: 1.0,
        metric: AchievementMetric::WorkoutsCompleted,
    },
    AchievementDefinition {
        achievement_type: "week_streak",
        name: "Week Warrior",
        description: "Complete workouts for 7 days straight",
        icon: "🔥",
        category: AchievementCategory::Streak,
        requirement: 7.0,
        metric: AchievementMetric::WorkoutStreak,
    },
    AchievementDefinition {
        achievement_type: "month_streak",
        name: "Monthly Master",
        description: "Complete workouts for 30 days straight",
        icon: "👑",
        category: AchievementCategory::Streak,
        requirement: 30.0,
        metric: AchievementMetric::WorkoutStreak,
    },
    AchievementDefinition {
        achievement_type: "early_bird",
        name: "Early Bird",
        description: "Complete 5 morning workouts",
        icon: "🌅",
        category: AchievementCategory::Consistency,
        requirement: 5.0,
        metric: AchievementMetric::MorningWorkouts,
    },
    AchievementDefinition {
        achievement_type: "strength_gains",
        name: "Strength Gains",
        description: "Increase your max weight by 50%",
        icon: "💪",
        category: AchievementCategory::Progress,
        requirement: 1.5,
        metric: AchievementMetric::StrengthImprovement,
    },
    AchievementDefinition {
        achievement_type: "consistency_king",
        name: "Consistency King",
        description: "Complete 50 total workouts",
        icon: "⭐",
        category: AchievementCategory::Milestone,
        requirement: 50.0,
        metric: AchievementMetric::WorkoutsCompleted,
    },
    AchievementDefinition {
        achievement_type: "perfect_week",
        name: "Perfect Week",
        description: "Hit all nutrition and workout goals for a week",
        icon: "✨",
        category: AchievementCategory::Excellence,
        requirement: 7.0,
        metric: AchievementMetric::PerfectDays,
    },
    AchievementDefinition {
        achievement_type: "century_club",
        name: "Century Club",
        description: "Complete 100 total workouts",
        icon: "🏆",
        category: AchievementCategory::Milestone,
        requirement: 100.0,
        metric: AchievementMetric::WorkoutsCompleted,
    },
];

/// Looks up a catalog entry by its stable identifier.
#[must_use]
pub fn find_definition(achievement_type: &str) -> Option<&'static AchievementDefinition> {
    ACHIEVEMENT_DEFINITIONS
        .iter()
        .find(|definition| definition.achievement_type == achievement_type)
}

/// Aggregated history an achievement's progress is estimated from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AchievementInputs {
    /// Total workouts from the user's latest progress entry
    pub workouts_completed: u32,
    /// Current consecutive-day check-in streak
    pub current_streak: u32,
    /// Check-ins whose readiness score exceeded the perfect-day bar
    pub high_readiness_checkins: u32,
}

/// Estimates progress toward one achievement as a percentage in `[0, 100]`.
///
/// Morning workouts and perfect days are derived from totals until those
/// events are tracked individually; strength improvement reports a fixed
/// baseline until per-lift history exists.
#[must_use]
pub fn progress_percent(definition: &AchievementDefinition, inputs: &AchievementInputs) -> f64 {
    let attained = match definition.metric {
        AchievementMetric::WorkoutsCompleted => f64::from(inputs.workouts_completed),
        AchievementMetric::WorkoutStreak => f64::from(inputs.current_streak),
        AchievementMetric::MorningWorkouts => {
            (f64::from(inputs.workouts_completed) * MORNING_WORKOUT_SHARE).floor()
        }
        AchievementMetric::StrengthImprovement => BASELINE_STRENGTH_IMPROVEMENT,
        AchievementMetric::PerfectDays => {
            (f64::from(inputs.high_readiness_checkins) * PERFECT_DAY_SHARE).floor()
        }
    };
    (attained / definition.requirement * 100.0).min(100.0)
}
