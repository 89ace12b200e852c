// Tests for prompt assembly
// Run with cargo test --test test_prompt

use souschef::api::types::RecipeRequest;
use souschef::api::{recipe_prompt, search_prompt};

#[cfg(test)]
mod prompt_tests {
    use super::*;

    /// All fields present appear as lines in the fixed order
    #[test]
    fn test_recipe_prompt_field_order() {
        let request = RecipeRequest {
            ingredients: vec!["chicken".into(), "rice".into()],
            dietary_restrictions: vec!["vegan".into(), "gluten-free".into()],
            cuisine_type: Some("thai".into()),
            meal_type: Some("dinner".into()),
            cooking_time: Some("30 minutes".into()),
        };

        let prompt = recipe_prompt(&request);
        let expected_head = "Create a detailed recipe using these ingredients: chicken, rice\n\
             Dietary restrictions: vegan, gluten-free\n\
             Cuisine type: thai\n\
             Meal type: dinner\n\
             Cooking time preference: 30 minutes\n";
        assert!(
            prompt.starts_with(expected_head),
            "prompt head was:\n{}",
            prompt
        );
    }

    /// Absent optional fields produce no lines at all
    #[test]
    fn test_recipe_prompt_omits_absent_fields() {
        let request = RecipeRequest {
            ingredients: vec!["tofu".into()],
            dietary_restrictions: vec![],
            cuisine_type: None,
            meal_type: None,
            cooking_time: None,
        };

        let prompt = recipe_prompt(&request);
        assert!(prompt.starts_with("Create a detailed recipe using these ingredients: tofu\n"));
        assert!(!prompt.contains("Dietary restrictions"));
        assert!(!prompt.contains("Cuisine type"));
        assert!(!prompt.contains("Meal type"));
        assert!(!prompt.contains("Cooking time preference"));
    }

    /// The literal schema template closes the prompt, separated by a blank
    /// line from the last field
    #[test]
    fn test_recipe_prompt_template() {
        let request = RecipeRequest {
            ingredients: vec!["tofu".into()],
            dietary_restrictions: vec![],
            cuisine_type: None,
            meal_type: None,
            cooking_time: None,
        };

        let prompt = recipe_prompt(&request);
        assert!(prompt.contains("tofu\n\n{\n  \"name\": \"Recipe Name\""));
        assert!(prompt.contains("{\"item\": \"ingredient name\", \"amount\": \"quantity\", \"unit\": \"unit\"}"));
        assert!(prompt.contains("{\"step\": 1, \"instruction\": \"First step\"}"));
        assert!(prompt.contains("{\"step\": 2, \"instruction\": \"Second step\"}"));
        assert!(prompt.contains("\"calories\": \"approximate calories per serving\""));
        assert!(prompt.ends_with("}"));
    }

    /// The search prompt is one templated sentence
    #[test]
    fn test_search_prompt() {
        assert_eq!(
            search_prompt("rust ownership"),
            "Search for information about: rust ownership. \
             Provide a comprehensive summary with key findings."
        );
    }
}
