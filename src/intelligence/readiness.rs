// ABOUTME: Composite readiness scoring from five daily wellness ratings
// ABOUTME: Produces a 0-100 score plus a coaching message bracket
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitGenius

//! Readiness scoring.
//!
//! A daily check-in captures five self-reported ratings on a 1-10 scale.
//! Sleep quality, energy, and mood count directly; soreness and stress
//! count inverted because high values mean the body is less ready.

use crate::errors::{AppError, AppResult};
use crate::intelligence::constants::readiness::{
    GOOD_THRESHOLD, HIGH_THRESHOLD, INVERSION_PIVOT, MAX_COMBINED_POINTS, MAX_RATING,
    MIN_RATING, MODERATE_THRESHOLD,
};

/// The five self-reported wellness ratings from a daily check-in.
///
/// Each rating is on a 1-10 scale. Call [`WellnessRatings::validate`] at
/// the API boundary; the scorer itself tolerates out-of-range values by
/// clamping the final score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WellnessRatings {
    /// How well the user slept (1 = terrible, 10 = excellent)
    pub sleep_quality: u8,
    /// Current energy level (1 = exhausted, 10 = energized)
    pub energy_level: u8,
    /// Muscle soreness (1 = none, 10 = very sore)
    pub soreness: u8,
    /// Overall mood (1 = low, 10 = great)
    pub mood: u8,
    /// Stress level (1 = relaxed, 10 = overwhelmed)
    pub stress: u8,
}

impl WellnessRatings {
    /// Checks that every rating sits inside the 1-10 scale.
    ///
    /// # Errors
    ///
    /// Returns [`AppError`] with `VALUE_OUT_OF_RANGE` naming the first
    /// offending field.
    pub fn validate(&self) -> AppResult<()> {
        let fields = [
            ("sleepQuality", self.sleep_quality),
            ("energyLevel", self.energy_level),
            ("soreness", self.soreness),
            ("mood", self.mood),
            ("stress", self.stress),
        ];
        for (name, value) in fields {
            if !(MIN_RATING..=MAX_RATING).contains(&value) {
                return Err(AppError::value_out_of_range(
                    name,
                    i64::from(MIN_RATING),
                    i64::from(MAX_RATING),
                ));
            }
        }
        Ok(())
    }
}

/// Computes the 0-100 readiness score from wellness ratings.
///
/// Formula: `round((sleep + energy + (11 - soreness) + mood + (11 - stress)) / 50 * 100)`
///
/// Halves round up. The result is clamped to `[0, 100]` so malformed
/// ratings can never push the score outside its documented range.
#[must_use]
pub fn readiness_score(ratings: &WellnessRatings) -> u8 {
    let pivot = i32::from(INVERSION_PIVOT);
    let points = i32::from(ratings.sleep_quality)
        + i32::from(ratings.energy_level)
        + (pivot - i32::from(ratings.soreness))
        + i32::from(ratings.mood)
        + (pivot - i32::from(ratings.stress));
    let percent = (f64::from(points) / MAX_COMBINED_POINTS * 100.0).round();
    percent.clamp(0.0, 100.0) as u8
}

/// Coaching bracket derived from a readiness score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadinessBracket {
    /// 85-100: primed for intense training
    High,
    /// 70-84: normal training intensity
    Good,
    /// 55-69: lighter training or active recovery
    Moderate,
    /// 0-54: rest day
    Low,
}

impl ReadinessBracket {
    /// Maps a readiness score onto its coaching bracket.
    #[must_use]
    pub const fn for_score(score: u8) -> Self {
        if score >= HIGH_THRESHOLD {
            Self::High
        } else if score >= GOOD_THRESHOLD {
            Self::Good
        } else if score >= MODERATE_THRESHOLD {
            Self::Moderate
        } else {
            Self::Low
        }
    }

    /// User-facing message shown with the score after a check-in.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::High => "You're firing on all cylinders! 💪 Great day for intense training.",
            Self::Good => "Feeling good! 👍 Normal training intensity recommended.",
            Self::Moderate => "A bit tired today. 😌 Consider lighter training or active recovery.",
            Self::Low => "Your body needs rest. 😴 Perfect day for recovery or light stretching.",
        }
    }
}
