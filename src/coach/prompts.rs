// ABOUTME: System prompts and user prompt builders for the AI coach
// ABOUTME: Prompt structure mirrors the typed response models so JSON output parses directly
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitGenius

use super::fallbacks::{energy_qualifier, CoachContext};
use super::service::{MealPlanParams, WorkoutPlanParams};

/// System prompt for workout plan generation
pub const TRAINER_SYSTEM_PROMPT: &str = "You are a certified personal trainer and fitness expert. \
     Create personalized workout plans based on user goals and fitness levels. \
     Always respond with valid JSON.";

/// System prompt for meal plan generation
pub const NUTRITIONIST_SYSTEM_PROMPT: &str = "You are a certified nutritionist and dietary expert. \
     Create personalized meal plans based on user goals and nutritional needs. \
     Always respond with valid JSON.";

/// System prompt for food analysis
pub const NUTRITION_DATABASE_SYSTEM_PROMPT: &str = "You are a nutritional database expert. \
     Provide accurate calorie and macronutrient information for foods. \
     Always respond with valid JSON.";

/// Builds the workout plan request prompt from a user's profile
#[must_use]
pub fn workout_plan_prompt(params: &WorkoutPlanParams) -> String {
    format!(
        r#"Create a personalized workout plan for a {age}-year-old person who weighs {weight}kg, is {height}cm tall, has a {fitness_level} fitness level, and wants to work out {workout_days} days per week. Their goals are: {goals}.

Please provide a structured workout plan in JSON format with the following structure:
{{
  "overview": "Brief description of the plan",
  "weeklySchedule": [
    {{
      "day": "Monday",
      "workoutType": "Upper Body",
      "duration": 45,
      "intensity": "Normal",
      "exercises": [
        {{
          "name": "Exercise name",
          "sets": 3,
          "reps": 12,
          "instructions": "Brief instructions"
        }}
      ]
    }}
  ],
  "tips": ["Training tips array"]
}}"#,
        age = params.age,
        weight = params.weight,
        height = params.height,
        fitness_level = params.fitness_level,
        workout_days = params.workout_days,
        goals = goals_text(&params.goals),
    )
}

/// Builds the meal plan request prompt from calorie and protein targets
#[must_use]
pub fn meal_plan_prompt(params: &MealPlanParams) -> String {
    format!(
        r#"Create a personalized meal plan for someone with a daily calorie target of {calories} calories and protein target of {protein}g. Their fitness goals are: {goals}.

Please provide a structured meal plan in JSON format with the following structure:
{{
  "dailyNutritionTargets": {{
    "calories": {calories},
    "protein": {protein},
    "carbs": 250,
    "fat": 70
  }},
  "proteinSources": [
    {{
      "name": "Food name",
      "serving": "Serving size",
      "calories": 165,
      "protein": 31,
      "benefits": "Why this food fits their goals"
    }}
  ],
  "sampleMeals": [
    {{
      "mealType": "Breakfast",
      "name": "Meal name",
      "ingredients": ["Ingredient list"],
      "calories": 450,
      "protein": 35
    }}
  ],
  "tips": ["Nutrition tips array"]
}}

The mealType field must be one of "Breakfast", "Lunch", "Dinner", or "Snack"."#,
        calories = params.calorie_target,
        protein = params.protein_target,
        goals = goals_text(&params.goals),
    )
}

/// Builds the food analysis prompt for a quantity of a named food
#[must_use]
pub fn food_analysis_prompt(food_name: &str, quantity: u32, unit: &str) -> String {
    format!(
        r#"Analyze the nutritional content of {quantity} {unit} of "{food_name}".

Please provide the nutritional information in JSON format:
{{
  "food": "{food_name}",
  "quantity": {quantity},
  "unit": "{unit}",
  "calories": 250,
  "protein": 12,
  "carbs": 30,
  "fat": 8,
  "confidence": "high"
}}

Set confidence to "high", "medium", or "low" based on how well-known this food is."#,
    )
}

/// Builds the conversational coach prompt with the user's current context
#[must_use]
pub fn coach_prompt(context: &CoachContext, message: &str) -> String {
    let readiness_line = context.today_readiness.map_or_else(
        || "not recorded yet".to_owned(),
        |score| format!("{score}% {}", energy_qualifier(score)),
    );
    format!(
        r#"You are FitGenius AI Coach, a supportive and knowledgeable fitness coach.

User Context:
- Name: {name}
- Fitness Goal: {goal}
- Activity Level: {level}
- Today's Readiness Score: {readiness}
- Has Workout Plan: {has_plan}

User Message: "{message}"

Provide a helpful, encouraging, and personalized response. Keep it conversational, supportive, and under 150 words. Include specific fitness advice when relevant."#,
        name = context.user_name,
        goal = goals_text(&context.goals),
        level = context.fitness_level.as_deref().unwrap_or("beginner"),
        readiness = readiness_line,
        has_plan = if context.has_workout_plan { "Yes" } else { "No" },
    )
}

fn goals_text(goals: &[String]) -> String {
    if goals.is_empty() {
        "general fitness".to_owned()
    } else {
        goals.join(", ")
    }
}
