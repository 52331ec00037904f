// ABOUTME: Named constants for readiness scoring, plan adjustment, and achievement progress
// ABOUTME: Grouped by concern so tuning one subsystem never touches another
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitGenius

//! Shared constants for the intelligence layer.
//!
//! All magic numbers used by the scorers live here with documentation on
//! where each value comes from and what changing it would affect.

/// Readiness scoring scale and message thresholds
pub mod readiness {
    /// Lowest accepted value for any wellness rating
    pub const MIN_RATING: u8 = 1;

    /// Highest accepted value for any wellness rating
    pub const MAX_RATING: u8 = 10;

    /// Pivot used to invert negative ratings: an inverted rating is
    /// `INVERSION_PIVOT - rating`, mapping 1 -> 10 and 10 -> 1
    pub const INVERSION_PIVOT: u8 = 11;

    /// Maximum combined points across the five ratings (5 x 10)
    pub const MAX_COMBINED_POINTS: f64 = 50.0;

    /// Scores at or above this are "firing on all cylinders"
    pub const HIGH_THRESHOLD: u8 = 85;

    /// Scores at or above this get normal-intensity guidance
    pub const GOOD_THRESHOLD: u8 = 70;

    /// Scores at or above this get lighter-training guidance
    pub const MODERATE_THRESHOLD: u8 = 55;
}

/// Plan adjustment cutoffs, scaling factors, and safety floors
pub mod adjustment {
    /// Readiness strictly below this triggers a reduced plan
    pub const LOW_READINESS_CUTOFF: u8 = 60;

    /// Readiness strictly above this triggers an amplified plan
    pub const HIGH_READINESS_CUTOFF: u8 = 85;

    /// Duration multiplier when readiness is low
    pub const LOW_DURATION_FACTOR: f64 = 0.7;

    /// Duration multiplier when readiness is high
    pub const HIGH_DURATION_FACTOR: f64 = 1.2;

    /// Shortest session an adjustment may produce, in minutes
    pub const MIN_DURATION_MINUTES: u32 = 20;

    /// Longest session an adjustment may produce, in minutes
    pub const MAX_DURATION_MINUTES: u32 = 90;

    /// Sets added or removed per adjustment step
    pub const SETS_STEP: u32 = 1;

    /// Reps added or removed per adjustment step
    pub const REPS_STEP: u32 = 2;

    /// An adjusted exercise never drops below this many sets
    pub const MIN_SETS: u32 = 1;

    /// An adjusted exercise never drops below this many reps
    pub const MIN_REPS: u32 = 5;
}

/// Estimation factors for achievement progress
pub mod achievements {
    /// Share of total workouts assumed to happen in the morning until
    /// per-session timestamps are tracked
    pub const MORNING_WORKOUT_SHARE: f64 = 0.3;

    /// Fixed strength-improvement ratio reported until per-lift history exists
    pub const BASELINE_STRENGTH_IMPROVEMENT: f64 = 1.2;

    /// Readiness score a check-in must exceed to count toward perfect days
    pub const PERFECT_DAY_READINESS: u8 = 80;

    /// Share of high-readiness check-ins counted as perfect days
    pub const PERFECT_DAY_SHARE: f64 = 0.5;
}
