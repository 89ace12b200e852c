// Integration tests for recipe extraction and fallback synthesis
// Run with cargo test --test test_extract

use serde_json::{json, Value};
use souschef::api::types::RecipeRequest;
use souschef::api::{extract_recipe, fallback_recipe};

fn request(
    ingredients: &[&str],
    restrictions: &[&str],
    cuisine: Option<&str>,
    meal: Option<&str>,
    time: Option<&str>,
) -> RecipeRequest {
    RecipeRequest {
        ingredients: ingredients.iter().map(|s| s.to_string()).collect(),
        dietary_restrictions: restrictions.iter().map(|s| s.to_string()).collect(),
        cuisine_type: cuisine.map(String::from),
        meal_type: meal.map(String::from),
        cooking_time: time.map(String::from),
    }
}

#[cfg(test)]
mod extraction_tests {
    use super::*;

    /// JSON embedded in prose is extracted unchanged
    #[test]
    fn test_extracts_embedded_json() {
        let req = request(&["chicken", "rice"], &[], Some("thai"), None, None);
        let raw = r#"Here you go: {"name":"Thai Chicken Rice","description":"...","prep_time":"10m","cook_time":"20m","servings":"2","difficulty":"Easy","ingredients":[],"instructions":[]}"#;

        let recipe = extract_recipe(raw, &req);
        assert_eq!(recipe["name"], "Thai Chicken Rice");
        assert_eq!(recipe["difficulty"], "Easy");
    }

    /// Validation checks key presence only, never value shapes
    #[test]
    fn test_lenient_value_shapes_accepted() {
        let req = request(&["tofu"], &[], None, None, None);
        let raw = json!({
            "name": "Odd Record",
            "description": 42,
            "prep_time": null,
            "cook_time": ["20m"],
            "servings": 2,
            "difficulty": {"level": "hard"},
            "ingredients": "not a list",
            "instructions": {},
            "extra_key": "survives"
        })
        .to_string();

        let recipe = extract_recipe(&raw, &req);
        assert_eq!(recipe["name"], "Odd Record");
        assert_eq!(recipe["extra_key"], "survives");
        assert_eq!(recipe["servings"], 2);
    }

    /// JSON inside a markdown fence is still found via the brace span
    #[test]
    fn test_markdown_fenced_json() {
        let req = request(&["eggs"], &[], None, None, None);
        let raw = "```json\n{\"name\":\"Omelette\",\"description\":\"d\",\"prep_time\":\"5m\",\"cook_time\":\"5m\",\"servings\":\"1\",\"difficulty\":\"Easy\",\"ingredients\":[],\"instructions\":[]}\n```";

        let recipe = extract_recipe(raw, &req);
        assert_eq!(recipe["name"], "Omelette");
    }

    /// Missing required key triggers the fallback
    #[test]
    fn test_missing_required_key_falls_back() {
        let req = request(&["beef", "noodles"], &[], None, None, None);
        // No "difficulty"
        let raw = r#"{"name":"Beef Noodles","description":"d","prep_time":"5m","cook_time":"5m","servings":"2","ingredients":[],"instructions":[]}"#;

        let recipe = extract_recipe(raw, &req);
        assert_eq!(recipe["difficulty"], "Medium");
        assert_eq!(recipe["servings"], "4");
    }

    /// Plain refusal text triggers the fallback
    #[test]
    fn test_prose_falls_back() {
        let req = request(&["chicken", "rice"], &[], Some("thai"), None, None);
        let recipe = extract_recipe("I cannot help with that.", &req);

        let name = recipe["name"].as_str().unwrap();
        assert!(name.starts_with("Thai"), "name was {:?}", name);
        assert!(name.contains("chicken"));
        assert!(name.contains("rice"));
        assert_eq!(recipe["instructions"].as_array().unwrap().len(), 5);
    }

    /// Spurious braces in prose produce an unparsable span, absorbed by
    /// the fallback
    #[test]
    fn test_spurious_braces_fall_back() {
        let req = request(&["salt"], &[], None, None, None);
        let recipe = extract_recipe("add {salt} and later {pepper} to taste", &req);
        assert_eq!(recipe["difficulty"], "Medium");
    }

    /// Valid JSON that is not an object falls back
    #[test]
    fn test_non_object_json_falls_back() {
        let req = request(&["milk"], &[], None, None, None);
        let recipe = extract_recipe("42", &req);
        assert_eq!(recipe["prep_time"], "15 minutes");
    }
}

#[cfg(test)]
mod fallback_tests {
    use super::*;

    /// Ingredient count and order are preserved
    #[test]
    fn test_ingredients_preserved() {
        let req = request(&["c", "b", "a"], &[], None, None, None);
        let record = fallback_recipe(&req);

        let items: Vec<&str> = record.ingredients.iter().map(|i| i.item.as_str()).collect();
        assert_eq!(items, vec!["c", "b", "a"]);
        for ingredient in &record.ingredients {
            assert_eq!(ingredient.amount, "1-2");
            assert_eq!(ingredient.unit, "portions");
        }
    }

    /// Steps are numbered exactly 1 through 5
    #[test]
    fn test_step_numbering() {
        let req = request(&["x"], &[], None, None, None);
        let record = fallback_recipe(&req);

        let steps: Vec<u32> = record.instructions.iter().map(|s| s.step).collect();
        assert_eq!(steps, vec![1, 2, 3, 4, 5]);
        assert!(record.instructions[0].instruction.contains("x"));
    }

    /// Name composes title-cased cuisine and meal with the first two
    /// ingredients
    #[test]
    fn test_name_composition() {
        let req = request(
            &["chicken", "rice", "basil"],
            &[],
            Some("thai"),
            Some("dinner"),
            None,
        );
        assert_eq!(fallback_recipe(&req).name, "Thai Dinner with chicken, rice");

        let req = request(&["chicken", "rice"], &[], None, None, None);
        assert_eq!(fallback_recipe(&req).name, "Dish with chicken, rice");

        let req = request(&["tofu"], &[], Some("PAN asian"), None, None);
        assert_eq!(fallback_recipe(&req).name, "Pan Asian Dish with tofu");
    }

    /// Description names all ingredients and the restrictions (or the
    /// no-restrictions phrase)
    #[test]
    fn test_description() {
        let req = request(&["a", "b"], &["vegan", "gluten-free"], None, None, None);
        assert_eq!(
            fallback_recipe(&req).description,
            "A delicious recipe using a, b with vegan, gluten-free"
        );

        let req = request(&["a"], &[], None, None, None);
        assert_eq!(
            fallback_recipe(&req).description,
            "A delicious recipe using a with no dietary restrictions"
        );
    }

    /// Fixed literals and the cooking time override
    #[test]
    fn test_fixed_fields() {
        let req = request(&["x"], &[], None, None, Some("45 minutes"));
        let record = fallback_recipe(&req);

        assert_eq!(record.prep_time, "15 minutes");
        assert_eq!(record.cook_time, "45 minutes");
        assert_eq!(record.servings, "4");
        assert_eq!(record.difficulty, "Medium");
        assert_eq!(record.tips.len(), 2);
        assert_eq!(record.nutrition.calories, "300-400 per serving");
        assert_eq!(record.nutrition.protein, "15-25g");
        assert_eq!(record.nutrition.carbs, "20-40g");
        assert_eq!(record.nutrition.fat, "10-20g");

        let req = request(&["x"], &[], None, None, None);
        assert_eq!(fallback_recipe(&req).cook_time, "30 minutes");
    }

    /// The synthesized record always carries every required key
    #[test]
    fn test_record_is_valid() {
        let req = request(&["x"], &[], None, None, None);
        let value: Value = extract_recipe("not json at all", &req);
        let map = value.as_object().unwrap();

        for field in souschef::api::REQUIRED_RECIPE_FIELDS {
            assert!(map.contains_key(field), "missing {}", field);
        }
    }
}
