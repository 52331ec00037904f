// ABOUTME: Scales a stored workout plan up or down based on today's readiness score
// ABOUTME: Pure transformation with hard floors and ceilings so repeated adjustment stays sane
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitGenius

//! Readiness-based plan adjustment.
//!
//! A readiness score below 60 scales the plan down; above 85 scales it up;
//! anything in between leaves the plan untouched. The input plan is never
//! mutated. Durations, sets, and reps carry hard floors (and a duration
//! ceiling) so adjusting an already-adjusted plan cannot run away.

use crate::intelligence::constants::adjustment::{
    HIGH_DURATION_FACTOR, HIGH_READINESS_CUTOFF, LOW_DURATION_FACTOR, LOW_READINESS_CUTOFF,
    MAX_DURATION_MINUTES, MIN_DURATION_MINUTES, MIN_REPS, MIN_SETS, REPS_STEP, SETS_STEP,
};
use crate::models::{Intensity, PlanDay, PlanDetails, PlanExercise};

/// Direction a plan moves when readiness falls outside the neutral band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Reduce,
    Amplify,
}

/// `None` means the score sits in the neutral 60-85 band.
const fn direction_for(score: u8) -> Option<Direction> {
    if score < LOW_READINESS_CUTOFF {
        Some(Direction::Reduce)
    } else if score > HIGH_READINESS_CUTOFF {
        Some(Direction::Amplify)
    } else {
        None
    }
}

/// Returns a copy of `plan` scaled for the given readiness score.
///
/// Low readiness (`score < 60`): intensity `Low`, duration x0.7 with a
/// 20-minute floor, one fewer set (min 1), two fewer reps (min 5).
///
/// High readiness (`score > 85`): intensity `High`, duration x1.2 with a
/// 90-minute ceiling, one extra set, two extra reps.
///
/// Scores of 60 through 85 return the plan unchanged, intensity included.
/// Fields a day or exercise does not carry are left absent.
#[must_use]
pub fn adjust_plan(readiness_score: u8, plan: &PlanDetails) -> PlanDetails {
    let Some(direction) = direction_for(readiness_score) else {
        return plan.clone();
    };

    PlanDetails {
        overview: plan.overview.clone(),
        weekly_schedule: plan
            .weekly_schedule
            .iter()
            .map(|day| adjust_day(direction, day))
            .collect(),
        tips: plan.tips.clone(),
    }
}

fn adjust_day(direction: Direction, day: &PlanDay) -> PlanDay {
    let intensity = match direction {
        Direction::Reduce => Intensity::Low,
        Direction::Amplify => Intensity::High,
    };

    PlanDay {
        day: day.day.clone(),
        workout_type: day.workout_type.clone(),
        duration: day.duration.map(|minutes| scale_duration(direction, minutes)),
        intensity: Some(intensity),
        exercises: day
            .exercises
            .iter()
            .map(|exercise| adjust_exercise(direction, exercise))
            .collect(),
    }
}

fn adjust_exercise(direction: Direction, exercise: &PlanExercise) -> PlanExercise {
    let (sets, reps) = match direction {
        Direction::Reduce => (
            exercise.sets.map(|s| s.saturating_sub(SETS_STEP).max(MIN_SETS)),
            exercise.reps.map(|r| r.saturating_sub(REPS_STEP).max(MIN_REPS)),
        ),
        Direction::Amplify => (
            exercise.sets.map(|s| s.saturating_add(SETS_STEP)),
            exercise.reps.map(|r| r.saturating_add(REPS_STEP)),
        ),
    };

    PlanExercise {
        name: exercise.name.clone(),
        sets,
        reps,
        instructions: exercise.instructions.clone(),
    }
}

fn scale_duration(direction: Direction, minutes: u32) -> u32 {
    let scaled = match direction {
        Direction::Reduce => {
            (f64::from(minutes) * LOW_DURATION_FACTOR).max(f64::from(MIN_DURATION_MINUTES))
        }
        Direction::Amplify => {
            (f64::from(minutes) * HIGH_DURATION_FACTOR).min(f64::from(MAX_DURATION_MINUTES))
        }
    };
    scaled.round() as u32
}
