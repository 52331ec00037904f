// ABOUTME: Keyword-based coach replies used when no LLM provider is configured
// ABOUTME: Holds the chat context snapshot the prompt builder and fallbacks share
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitGenius

use crate::models::User;

/// Reply returned when the LLM answers with empty content
pub const EMPTY_REPLY: &str =
    "I'm here to help you achieve your fitness goals! What would you like to know?";

const NUTRITION_REPLY: &str = "Nutrition is key to reaching your fitness goals! \
     Focus on getting adequate protein, staying hydrated, and eating whole foods. \
     Would you like help creating a meal plan?";

/// Per-request snapshot of the chatting user's state
///
/// Assembled by the chat route from storage so the coach never needs a
/// storage handle of its own.
#[derive(Debug, Clone)]
pub struct CoachContext {
    /// Name the coach addresses the user by
    pub user_name: String,
    /// Free-form fitness goals
    pub goals: Vec<String>,
    /// Self-reported fitness level
    pub fitness_level: Option<String>,
    /// Readiness score from today's check-in, if one exists
    pub today_readiness: Option<u8>,
    /// Whether the user has a current workout plan
    pub has_workout_plan: bool,
}

impl CoachContext {
    /// Builds a context from a stored user plus today's derived state
    #[must_use]
    pub fn for_user(user: &User, today_readiness: Option<u8>, has_workout_plan: bool) -> Self {
        Self {
            user_name: user.username.clone(),
            goals: user.goals.clone(),
            fitness_level: user.fitness_level.clone(),
            today_readiness,
            has_workout_plan,
        }
    }
}

/// Qualifier appended to the readiness score in the coach prompt
#[must_use]
pub const fn energy_qualifier(score: u8) -> &'static str {
    if score > 75 {
        "(Good energy)"
    } else if score > 50 {
        "(Moderate energy)"
    } else {
        "(Low energy)"
    }
}

/// Canned reply keyed off the message topic, used when the LLM call fails
/// or no provider is configured
#[must_use]
pub fn fallback_reply(context: &CoachContext, message: &str) -> String {
    let lower = message.to_lowercase();

    if lower.contains("workout") {
        let score = context.today_readiness.unwrap_or(0);
        let suggestion = if score > 75 {
            "you're in great shape for an intense workout! 💪"
        } else if score > 50 {
            "a moderate workout would be perfect. Listen to your body!"
        } else {
            "consider some light stretching or active recovery today. 🧘‍♀️"
        };
        return format!("Based on your {score}% readiness score today, {suggestion}");
    }

    if lower.contains("nutrition") || lower.contains("diet") {
        return NUTRITION_REPLY.to_owned();
    }

    let goal = if context.goals.is_empty() {
        "general fitness".to_owned()
    } else {
        context.goals.join(", ")
    };
    format!(
        "Hi {name}! I'm here to support your {goal} journey. How can I help you today? 🌟",
        name = context.user_name,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context_with_readiness(today_readiness: Option<u8>) -> CoachContext {
        CoachContext {
            user_name: "jordan".to_owned(),
            goals: vec!["muscle gain".to_owned()],
            fitness_level: Some("intermediate".to_owned()),
            today_readiness,
            has_workout_plan: true,
        }
    }

    #[test]
    fn workout_reply_scales_with_readiness() {
        let high = fallback_reply(&context_with_readiness(Some(90)), "Plan my workout");
        assert_eq!(
            high,
            "Based on your 90% readiness score today, you're in great shape for an intense workout! 💪"
        );

        let moderate = fallback_reply(&context_with_readiness(Some(60)), "workout ideas?");
        assert!(moderate.contains("a moderate workout would be perfect"));

        let low = fallback_reply(&context_with_readiness(Some(30)), "should I workout");
        assert!(low.contains("light stretching or active recovery"));
    }

    #[test]
    fn missing_readiness_reads_as_zero() {
        let reply = fallback_reply(&context_with_readiness(None), "workout?");
        assert!(reply.starts_with("Based on your 0% readiness score today,"));
        assert!(reply.contains("light stretching"));
    }

    #[test]
    fn nutrition_and_diet_get_the_nutrition_tip() {
        let context = context_with_readiness(Some(70));
        let nutrition = fallback_reply(&context, "Any NUTRITION advice?");
        let diet = fallback_reply(&context, "help with my diet");

        assert_eq!(nutrition, NUTRITION_REPLY);
        assert_eq!(diet, NUTRITION_REPLY);
    }

    #[test]
    fn other_messages_get_a_greeting_with_goals() {
        let reply = fallback_reply(&context_with_readiness(Some(70)), "hello there");
        assert_eq!(
            reply,
            "Hi jordan! I'm here to support your muscle gain journey. How can I help you today? 🌟"
        );
    }

    #[test]
    fn greeting_defaults_to_general_fitness_without_goals() {
        let mut context = context_with_readiness(None);
        context.goals.clear();
        let reply = fallback_reply(&context, "hey coach");
        assert!(reply.contains("your general fitness journey"));
    }

    #[test]
    fn energy_qualifier_brackets() {
        assert_eq!(energy_qualifier(76), "(Good energy)");
        assert_eq!(energy_qualifier(75), "(Moderate energy)");
        assert_eq!(energy_qualifier(51), "(Moderate energy)");
        assert_eq!(energy_qualifier(50), "(Low energy)");
    }
}
