//! Scoring of the recipe corpus against a set of available ingredients.

use crate::model::{CorpusRecipe, RecipeMatch};
use std::cmp::Ordering;
use std::collections::BTreeSet;

/// Matches returned per query.
pub const MAX_MATCHES: usize = 5;

/// Rank corpus recipes by how many of the available ingredients they use.
///
/// Ingredient names are compared lowercased and trimmed. Recipes with no
/// overlap are excluded; ties on `(match_count, sustainability_score)`
/// keep their corpus order. An empty ingredient list yields an empty
/// result rather than an error.
pub fn find_matches(
    available_ingredients: &[String],
    corpus: &[CorpusRecipe],
) -> Vec<RecipeMatch> {
    let available = normalize(available_ingredients.iter().map(String::as_str));
    if available.is_empty() {
        return Vec::new();
    }

    let mut matches = Vec::new();
    for recipe in corpus {
        let recipe_ingredients =
            normalize(recipe.ingredients.iter().map(|ing| ing.name.as_str()));
        let matching: BTreeSet<String> = recipe_ingredients
            .intersection(&available)
            .cloned()
            .collect();
        if matching.is_empty() {
            continue;
        }
        let missing: BTreeSet<String> = recipe_ingredients
            .difference(&available)
            .cloned()
            .collect();
        matches.push(RecipeMatch {
            title: recipe.title.clone(),
            match_count: matching.len(),
            matching_ingredients: matching,
            missing_ingredients: missing,
            sustainability_score: recipe.sustainability_score,
            image_url: recipe.image_url.clone(),
            preparation_time: recipe.preparation_time.clone(),
            difficulty: recipe.difficulty.clone(),
        });
    }

    // sort_by is stable, so full ties retain corpus order
    matches.sort_by(|a, b| {
        b.match_count.cmp(&a.match_count).then(
            b.sustainability_score
                .partial_cmp(&a.sustainability_score)
                .unwrap_or(Ordering::Equal),
        )
    });
    matches.truncate(MAX_MATCHES);
    matches
}

fn normalize<'a>(names: impl Iterator<Item = &'a str>) -> BTreeSet<String> {
    names
        .map(|name| name.trim().to_lowercase())
        .filter(|name| !name.is_empty())
        .collect()
}
