// ABOUTME: LLM-backed coach operations: plan generation, food analysis, and chat replies
// ABOUTME: Generators require a configured provider; analysis and chat degrade gracefully without one
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitGenius

use std::sync::Arc;

use rand::Rng;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::fallbacks::{fallback_reply, CoachContext, EMPTY_REPLY};
use super::prompts;
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::llm::{ChatMessage, ChatRequest, LlmProvider};
use crate::models::{Confidence, MealPlan, NutritionEstimate, PlanDetails, User};

/// Token cap for plan generation responses
const PLAN_MAX_TOKENS: u32 = 2000;

/// Token cap for food analysis responses
const ANALYSIS_MAX_TOKENS: u32 = 500;

// Profile defaults substituted when the stored user lacks a value the
// prompt needs
const DEFAULT_AGE: u32 = 30;
const DEFAULT_WEIGHT_KG: f64 = 70.0;
const DEFAULT_HEIGHT_CM: f64 = 170.0;
const DEFAULT_FITNESS_LEVEL: &str = "beginner";
const DEFAULT_WORKOUT_DAYS: u32 = 3;
const DEFAULT_CALORIE_TARGET: u32 = 2000;
const DEFAULT_PROTEIN_TARGET_GRAMS: u32 = 150;
const PROTEIN_GRAMS_PER_KG: f64 = 2.0;

// Macro ranges for the estimate produced when no provider is configured
const FALLBACK_CALORIES: std::ops::Range<u32> = 100..400;
const FALLBACK_PROTEIN: std::ops::Range<u32> = 5..25;
const FALLBACK_CARBS: std::ops::Range<u32> = 10..50;
const FALLBACK_FAT: std::ops::Range<u32> = 2..17;

// ================================================================================================
// Prompt Parameters
// ================================================================================================

/// Profile values the workout plan prompt interpolates
#[derive(Debug, Clone)]
pub struct WorkoutPlanParams {
    /// Age in years
    pub age: u32,
    /// Weight in kilograms
    pub weight: f64,
    /// Height in centimeters
    pub height: f64,
    /// Self-reported fitness level
    pub fitness_level: String,
    /// Free-form fitness goals
    pub goals: Vec<String>,
    /// Desired training days per week
    pub workout_days: u32,
}

impl WorkoutPlanParams {
    /// Extracts prompt parameters from a stored user, filling gaps with defaults
    #[must_use]
    pub fn from_profile(user: &User) -> Self {
        Self {
            age: user.age.unwrap_or(DEFAULT_AGE),
            weight: user.weight.unwrap_or(DEFAULT_WEIGHT_KG),
            height: user.height.unwrap_or(DEFAULT_HEIGHT_CM),
            fitness_level: user
                .fitness_level
                .clone()
                .unwrap_or_else(|| DEFAULT_FITNESS_LEVEL.to_owned()),
            goals: user.goals.clone(),
            workout_days: user.workout_days.unwrap_or(DEFAULT_WORKOUT_DAYS),
        }
    }
}

/// Targets the meal plan prompt interpolates
#[derive(Debug, Clone)]
pub struct MealPlanParams {
    /// Daily calorie target
    pub calorie_target: u32,
    /// Daily protein target in grams
    pub protein_target: u32,
    /// Free-form fitness goals
    pub goals: Vec<String>,
}

impl MealPlanParams {
    /// Extracts prompt parameters from a stored user.
    ///
    /// The protein target is derived from body weight at 2g per kilogram
    /// when a weight is on file.
    #[must_use]
    pub fn from_profile(user: &User) -> Self {
        let protein_target = user.weight.map_or(DEFAULT_PROTEIN_TARGET_GRAMS, |kg| {
            (kg * PROTEIN_GRAMS_PER_KG).round() as u32
        });
        Self {
            calorie_target: user.calorie_target.unwrap_or(DEFAULT_CALORIE_TARGET),
            protein_target,
            goals: user.goals.clone(),
        }
    }
}

// ================================================================================================
// Coach Service
// ================================================================================================

/// All AI coach operations behind one handle.
///
/// Holds the configured LLM provider, or `None` when no API key was supplied.
/// Plan generation refuses to run without a provider; food analysis falls
/// back to a rough estimate and chat falls back to keyword replies.
pub struct CoachService {
    llm: Option<Arc<dyn LlmProvider>>,
}

impl CoachService {
    /// Creates a coach over an optional LLM provider
    #[must_use]
    pub fn new(llm: Option<Arc<dyn LlmProvider>>) -> Self {
        Self { llm }
    }

    /// Creates a coach with no provider, serving fallbacks only
    #[must_use]
    pub const fn without_llm() -> Self {
        Self { llm: None }
    }

    /// Whether an LLM provider is available
    #[must_use]
    pub const fn is_llm_configured(&self) -> bool {
        self.llm.is_some()
    }

    /// Generates a personalized workout plan from the user's profile.
    ///
    /// # Errors
    ///
    /// Returns an unavailability error when no LLM provider is configured,
    /// and propagates provider failures and unparseable responses.
    pub async fn generate_workout_plan(&self, user: &User) -> AppResult<PlanDetails> {
        let llm = self.require_llm()?;
        let params = WorkoutPlanParams::from_profile(user);
        debug!("Generating workout plan for user {}", user.id);

        let request = ChatRequest::new(vec![
            ChatMessage::system(prompts::TRAINER_SYSTEM_PROMPT),
            ChatMessage::user(prompts::workout_plan_prompt(&params)),
        ])
        .with_max_tokens(PLAN_MAX_TOKENS)
        .with_json_output();

        let response = llm.complete(&request).await?;
        parse_generated(
            &response.content,
            "Failed to generate workout plan. Please try again.",
        )
    }

    /// Generates a personalized meal plan from the user's targets.
    ///
    /// # Errors
    ///
    /// Returns an unavailability error when no LLM provider is configured,
    /// and propagates provider failures and unparseable responses.
    pub async fn generate_meal_plan(&self, user: &User) -> AppResult<MealPlan> {
        let llm = self.require_llm()?;
        let params = MealPlanParams::from_profile(user);
        debug!("Generating meal plan for user {}", user.id);

        let request = ChatRequest::new(vec![
            ChatMessage::system(prompts::NUTRITIONIST_SYSTEM_PROMPT),
            ChatMessage::user(prompts::meal_plan_prompt(&params)),
        ])
        .with_max_tokens(PLAN_MAX_TOKENS)
        .with_json_output();

        let response = llm.complete(&request).await?;
        parse_generated(
            &response.content,
            "Failed to generate meal plan. Please try again.",
        )
    }

    /// Estimates the nutritional content of a quantity of food.
    ///
    /// Without a provider this returns a rough randomized estimate at
    /// medium confidence instead of failing.
    ///
    /// # Errors
    ///
    /// Propagates provider failures and unparseable responses when a
    /// provider is configured.
    pub async fn analyze_food(
        &self,
        food_name: &str,
        quantity: u32,
        unit: &str,
    ) -> AppResult<NutritionEstimate> {
        let Some(llm) = &self.llm else {
            debug!("No LLM provider configured, returning estimated nutrition data");
            return Ok(estimated_nutrition(food_name, quantity, unit));
        };

        let request = ChatRequest::new(vec![
            ChatMessage::system(prompts::NUTRITION_DATABASE_SYSTEM_PROMPT),
            ChatMessage::user(prompts::food_analysis_prompt(food_name, quantity, unit)),
        ])
        .with_max_tokens(ANALYSIS_MAX_TOKENS)
        .with_json_output();

        let response = llm.complete(&request).await?;
        parse_generated(
            &response.content,
            "Failed to analyze food calories. Please try again.",
        )
    }

    /// Produces a conversational coach reply, never failing.
    ///
    /// Provider errors and empty completions degrade to canned replies so
    /// the chat endpoint always has something to say.
    pub async fn coach_reply(&self, context: &CoachContext, message: &str) -> String {
        if let Some(llm) = &self.llm {
            let request =
                ChatRequest::new(vec![ChatMessage::user(prompts::coach_prompt(context, message))]);
            match llm.complete(&request).await {
                Ok(response) => {
                    let content = response.content.trim();
                    if content.is_empty() {
                        return EMPTY_REPLY.to_owned();
                    }
                    return content.to_owned();
                }
                Err(err) => {
                    warn!("Coach completion failed, using fallback reply: {err}");
                }
            }
        }
        fallback_reply(context, message)
    }

    /// Sends a raw prompt to the provider and returns the completion text.
    ///
    /// # Errors
    ///
    /// Returns an unavailability error when no LLM provider is configured,
    /// and propagates provider failures.
    pub async fn direct_reply(&self, prompt: &str) -> AppResult<String> {
        let llm = self.require_llm()?;
        let request = ChatRequest::new(vec![ChatMessage::user(prompt.to_owned())]);
        let response = llm.complete(&request).await?;
        Ok(response.content)
    }

    fn require_llm(&self) -> AppResult<&Arc<dyn LlmProvider>> {
        self.llm.as_ref().ok_or_else(|| {
            AppError::new(
                ErrorCode::ExternalServiceUnavailable,
                "AI features require an API key. Set OPENAI_API_KEY to enable them.",
            )
        })
    }
}

// ================================================================================================
// Helpers
// ================================================================================================

fn parse_generated<T: DeserializeOwned>(content: &str, failure_message: &str) -> AppResult<T> {
    serde_json::from_str(content).map_err(|err| {
        warn!("Generated response did not match the expected shape: {err}");
        AppError::new(ErrorCode::ExternalServiceError, failure_message)
    })
}

fn estimated_nutrition(food_name: &str, quantity: u32, unit: &str) -> NutritionEstimate {
    let mut rng = rand::thread_rng();
    NutritionEstimate {
        food: food_name.to_owned(),
        quantity,
        unit: unit.to_owned(),
        calories: rng.gen_range(FALLBACK_CALORIES),
        protein: rng.gen_range(FALLBACK_PROTEIN),
        carbs: rng.gen_range(FALLBACK_CARBS),
        fat: rng.gen_range(FALLBACK_FAT),
        confidence: Confidence::Medium,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use crate::llm::ChatResponse;

    struct CannedProvider {
        reply: Result<String, ErrorCode>,
    }

    #[async_trait]
    impl LlmProvider for CannedProvider {
        fn name(&self) -> &'static str {
            "canned"
        }

        fn display_name(&self) -> &'static str {
            "Canned"
        }

        fn default_model(&self) -> &str {
            "canned-1"
        }

        async fn complete(&self, _request: &ChatRequest) -> Result<ChatResponse, AppError> {
            match &self.reply {
                Ok(content) => Ok(ChatResponse {
                    content: content.clone(),
                    model: "canned-1".to_owned(),
                    usage: None,
                    finish_reason: None,
                }),
                Err(code) => Err(AppError::new(*code, "canned failure")),
            }
        }

        async fn health_check(&self) -> Result<bool, AppError> {
            Ok(true)
        }
    }

    fn coach_with_reply(reply: &str) -> CoachService {
        CoachService::new(Some(Arc::new(CannedProvider {
            reply: Ok(reply.to_owned()),
        })))
    }

    fn failing_coach() -> CoachService {
        CoachService::new(Some(Arc::new(CannedProvider {
            reply: Err(ErrorCode::ExternalServiceError),
        })))
    }

    fn bare_user() -> User {
        User {
            id: uuid::Uuid::new_v4(),
            username: "casey".to_owned(),
            password: "secret".to_owned(),
            age: None,
            weight: None,
            height: None,
            fitness_level: None,
            goals: vec![],
            workout_days: None,
            calorie_target: None,
            created_at: chrono::Utc::now(),
        }
    }

    fn chat_context() -> CoachContext {
        CoachContext {
            user_name: "casey".to_owned(),
            goals: vec!["strength".to_owned()],
            fitness_level: None,
            today_readiness: Some(88),
            has_workout_plan: false,
        }
    }

    #[test]
    fn workout_params_fill_profile_gaps() {
        let params = WorkoutPlanParams::from_profile(&bare_user());

        assert_eq!(params.age, 30);
        assert!((params.weight - 70.0).abs() < f64::EPSILON);
        assert!((params.height - 170.0).abs() < f64::EPSILON);
        assert_eq!(params.fitness_level, "beginner");
        assert_eq!(params.workout_days, 3);
    }

    #[test]
    fn meal_params_derive_protein_from_weight() {
        let mut user = bare_user();
        user.weight = Some(82.4);
        user.calorie_target = Some(2600);

        let params = MealPlanParams::from_profile(&user);

        assert_eq!(params.calorie_target, 2600);
        assert_eq!(params.protein_target, 165);
    }

    #[test]
    fn meal_params_default_without_weight() {
        let params = MealPlanParams::from_profile(&bare_user());

        assert_eq!(params.calorie_target, 2000);
        assert_eq!(params.protein_target, 150);
    }

    #[tokio::test]
    async fn generators_refuse_without_provider() {
        let coach = CoachService::without_llm();
        let user = bare_user();

        let workout = coach.generate_workout_plan(&user).await;
        let meal = coach.generate_meal_plan(&user).await;

        assert_eq!(
            workout.unwrap_err().code,
            ErrorCode::ExternalServiceUnavailable
        );
        assert_eq!(meal.unwrap_err().code, ErrorCode::ExternalServiceUnavailable);
    }

    #[tokio::test]
    async fn workout_generation_parses_plan_json() {
        let coach = coach_with_reply(
            r#"{"overview":"Push/pull split","weeklySchedule":[{"day":"Monday","workoutType":"Push","duration":45,"exercises":[{"name":"Bench Press","sets":3,"reps":10}]}],"tips":["Warm up first"]}"#,
        );

        let plan = coach.generate_workout_plan(&bare_user()).await.unwrap();

        assert_eq!(plan.overview.as_deref(), Some("Push/pull split"));
        assert_eq!(plan.weekly_schedule.len(), 1);
        assert_eq!(plan.weekly_schedule[0].exercises[0].name, "Bench Press");
        assert_eq!(plan.tips, vec!["Warm up first"]);
    }

    #[tokio::test]
    async fn unparseable_plan_reports_generation_failure() {
        let coach = coach_with_reply("not json at all");

        let err = coach.generate_workout_plan(&bare_user()).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::ExternalServiceError);
        assert_eq!(
            err.message,
            "Failed to generate workout plan. Please try again."
        );
    }

    #[tokio::test]
    async fn analysis_without_provider_estimates_in_range() {
        let coach = CoachService::without_llm();

        let estimate = coach.analyze_food("mystery stew", 1, "bowl").await.unwrap();

        assert_eq!(estimate.food, "mystery stew");
        assert_eq!(estimate.quantity, 1);
        assert_eq!(estimate.unit, "bowl");
        assert!((100..400).contains(&estimate.calories));
        assert!((5..25).contains(&estimate.protein));
        assert!((10..50).contains(&estimate.carbs));
        assert!((2..17).contains(&estimate.fat));
        assert_eq!(estimate.confidence, Confidence::Medium);
    }

    #[tokio::test]
    async fn analysis_with_provider_propagates_failure() {
        let coach = failing_coach();

        let err = coach.analyze_food("apple", 1, "piece").await.unwrap_err();

        assert_eq!(err.code, ErrorCode::ExternalServiceError);
    }

    #[tokio::test]
    async fn chat_uses_completion_when_available() {
        let coach = coach_with_reply("  Keep pushing, you are doing great!  ");

        let reply = coach.coach_reply(&chat_context(), "How am I doing?").await;

        assert_eq!(reply, "Keep pushing, you are doing great!");
    }

    #[tokio::test]
    async fn chat_empty_completion_gets_default_reply() {
        let coach = coach_with_reply("   ");

        let reply = coach.coach_reply(&chat_context(), "hello").await;

        assert_eq!(reply, EMPTY_REPLY);
    }

    #[tokio::test]
    async fn chat_falls_back_on_provider_failure() {
        let coach = failing_coach();

        let reply = coach.coach_reply(&chat_context(), "workout advice?").await;

        assert!(reply.starts_with("Based on your 88% readiness score today,"));
    }

    #[tokio::test]
    async fn direct_reply_requires_provider() {
        let coach = CoachService::without_llm();

        let err = coach.direct_reply("ping").await.unwrap_err();

        assert_eq!(err.code, ErrorCode::ExternalServiceUnavailable);
    }
}
