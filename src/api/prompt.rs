// Prompt assembly from structured request fields

use super::types::RecipeRequest;

/// Literal output-schema template appended to every recipe prompt. The agent
/// is prompted by example, not by a machine-checked schema, so this text is
/// part of the external contract and must not drift.
const RECIPE_TEMPLATE: &str = r#"
{
  "name": "Recipe Name",
  "description": "Brief description",
  "prep_time": "X minutes",
  "cook_time": "X minutes",
  "servings": "X",
  "difficulty": "Easy/Medium/Hard",
  "ingredients": [
    {"item": "ingredient name", "amount": "quantity", "unit": "unit"}
  ],
  "instructions": [
    {"step": 1, "instruction": "First step"},
    {"step": 2, "instruction": "Second step"}
  ],
  "tips": ["helpful tip 1", "helpful tip 2"],
  "nutrition": {
    "calories": "approximate calories per serving",
    "protein": "protein content",
    "carbs": "carbohydrate content",
    "fat": "fat content"
  }
}"#;

/// Build the recipe generation prompt. Field order is fixed: ingredients,
/// dietary restrictions, cuisine, meal type, cooking time, then the schema
/// template.
pub fn recipe_prompt(request: &RecipeRequest) -> String {
    let mut parts = vec![format!(
        "Create a detailed recipe using these ingredients: {}",
        request.ingredients.join(", ")
    )];

    if !request.dietary_restrictions.is_empty() {
        parts.push(format!(
            "Dietary restrictions: {}",
            request.dietary_restrictions.join(", ")
        ));
    }

    if let Some(cuisine) = &request.cuisine_type {
        parts.push(format!("Cuisine type: {}", cuisine));
    }

    if let Some(meal) = &request.meal_type {
        parts.push(format!("Meal type: {}", meal));
    }

    if let Some(time) = &request.cooking_time {
        parts.push(format!("Cooking time preference: {}", time));
    }

    parts.push(RECIPE_TEMPLATE.to_string());

    parts.join("\n")
}

/// Build the search agent prompt
pub fn search_prompt(query: &str) -> String {
    format!(
        "Search for information about: {}. Provide a comprehensive summary with key findings.",
        query
    )
}
