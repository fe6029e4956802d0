//! Chat-facing rendering of extracted recipes.

use crate::model::RecipeRecord;

/// Format a recipe for user display.
pub fn format_recipe(recipe: &RecipeRecord) -> String {
    let mut output = Vec::new();
    output.push(format!("🍳 {}", recipe.title));

    if !recipe.servings.is_empty() {
        output.push(format!("👥 Serves: {}", recipe.servings));
    }
    if !recipe.prep_time.is_empty() {
        output.push(format!("⏲️ Prep Time: {}", recipe.prep_time));
    }
    if !recipe.cook_time.is_empty() {
        output.push(format!("⏰ Cook Time: {}", recipe.cook_time));
    }

    if !recipe.ingredients.is_empty() {
        output.push(String::new());
        output.push("📝 Ingredients:".to_string());
        for ingredient in &recipe.ingredients {
            let parts: Vec<&str> = [
                ingredient.amount.as_str(),
                ingredient.unit.as_str(),
                ingredient.name.as_str(),
            ]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect();
            output.push(format!("- {}", parts.join(" ")));
        }
    }

    if !recipe.instructions.is_empty() {
        output.push(String::new());
        output.push("👩‍🍳 Instructions:".to_string());
        for (index, step) in recipe.instructions.iter().enumerate() {
            output.push(format!("{}. {}", index + 1, step));
        }
    }

    if !recipe.source.is_empty() {
        output.push(String::new());
        output.push(format!("Source: {}", recipe.source));
    }
    if let Some(note) = &recipe.note {
        output.push(format!("⚠️ {note}"));
    }

    output.join("\n")
}
