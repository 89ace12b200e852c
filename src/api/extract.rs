// Recovery of a structured recipe record from free-form agent output

use super::types::{Nutrition, RecipeIngredient, RecipeRecord, RecipeRequest, RecipeStep};
use serde_json::Value;
use tracing::warn;

/// Top-level keys a parsed recipe must carry. Value shapes are deliberately
/// not checked; presence is the whole contract.
pub const REQUIRED_RECIPE_FIELDS: [&str; 8] = [
    "name",
    "description",
    "prep_time",
    "cook_time",
    "servings",
    "difficulty",
    "ingredients",
    "instructions",
];

/// Extract a recipe record from raw agent output. Never fails: on malformed
/// syntax or missing required keys a record is synthesized from the original
/// request instead, trading recipe fidelity for availability.
pub fn extract_recipe(raw: &str, request: &RecipeRequest) -> Value {
    let content = raw.trim();

    // Greedy span from the first '{' to the last '}', to tolerate agents
    // that wrap their JSON in prose or markdown fences. Not a nested-brace
    // parser; spurious braces in prose are absorbed by the fallback.
    let candidate = match (content.find('{'), content.rfind('}')) {
        (Some(start), Some(end)) if start < end => &content[start..=end],
        _ => content,
    };

    match serde_json::from_str::<Value>(candidate) {
        Ok(value) if has_required_fields(&value) => value,
        Ok(_) => {
            warn!("parsed recipe is missing required fields, synthesizing fallback");
            fallback_value(request)
        }
        Err(e) => {
            warn!(error = %e, "failed to parse recipe JSON, synthesizing fallback");
            fallback_value(request)
        }
    }
}

fn has_required_fields(value: &Value) -> bool {
    match value.as_object() {
        Some(map) => REQUIRED_RECIPE_FIELDS
            .iter()
            .all(|field| map.contains_key(*field)),
        None => false,
    }
}

fn fallback_value(request: &RecipeRequest) -> Value {
    // A RecipeRecord of plain strings and vectors always serializes
    serde_json::to_value(fallback_recipe(request)).expect("recipe record serializes")
}

/// Deterministically synthesize a valid recipe record from the request alone
pub fn fallback_recipe(request: &RecipeRequest) -> RecipeRecord {
    let cuisine = request
        .cuisine_type
        .as_deref()
        .map(title_case)
        .unwrap_or_default();
    let meal = request
        .meal_type
        .as_deref()
        .map(title_case)
        .unwrap_or_else(|| "Dish".to_string());
    let lead_ingredients = request
        .ingredients
        .iter()
        .take(2)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");

    let restrictions = if request.dietary_restrictions.is_empty() {
        "no dietary restrictions".to_string()
    } else {
        request.dietary_restrictions.join(", ")
    };

    let all_ingredients = request.ingredients.join(", ");

    RecipeRecord {
        name: format!("{} {} with {}", cuisine, meal, lead_ingredients)
            .trim()
            .to_string(),
        description: format!(
            "A delicious recipe using {} with {}",
            all_ingredients, restrictions
        ),
        prep_time: "15 minutes".to_string(),
        cook_time: request
            .cooking_time
            .clone()
            .unwrap_or_else(|| "30 minutes".to_string()),
        servings: "4".to_string(),
        difficulty: "Medium".to_string(),
        ingredients: request
            .ingredients
            .iter()
            .map(|item| RecipeIngredient {
                item: item.clone(),
                amount: "1-2".to_string(),
                unit: "portions".to_string(),
            })
            .collect(),
        instructions: vec![
            RecipeStep {
                step: 1,
                instruction: format!("Prepare all ingredients: {}", all_ingredients),
            },
            RecipeStep {
                step: 2,
                instruction: "Heat oil in a large pan over medium heat".to_string(),
            },
            RecipeStep {
                step: 3,
                instruction: "Add ingredients and cook according to recipe requirements"
                    .to_string(),
            },
            RecipeStep {
                step: 4,
                instruction: "Season with salt, pepper, and herbs to taste".to_string(),
            },
            RecipeStep {
                step: 5,
                instruction: "Serve hot and enjoy!".to_string(),
            },
        ],
        tips: vec![
            "Adjust seasoning to taste".to_string(),
            "Feel free to substitute ingredients based on availability".to_string(),
        ],
        nutrition: Nutrition {
            calories: "300-400 per serving".to_string(),
            protein: "15-25g".to_string(),
            carbs: "20-40g".to_string(),
            fat: "10-20g".to_string(),
        },
    }
}

/// Uppercase the first letter of each word, lowercase the rest
fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
