//! Loading of the static resources: the fridge listing and the recipe
//! corpus. One malformed entry never aborts a load.

use crate::error::AssistantError;
use crate::fridge::parse_listing;
use crate::model::{CorpusRecipe, IngredientRecord};
use log::warn;
use serde_json::Value;
use std::path::Path;

/// Read the recipe corpus from a JSON array, skipping malformed entries.
pub fn load_corpus(path: &Path) -> Result<Vec<CorpusRecipe>, AssistantError> {
    let raw = std::fs::read_to_string(path)?;
    let entries: Vec<Value> = serde_json::from_str(&raw)?;

    let mut corpus = Vec::new();
    for entry in entries {
        match serde_json::from_value::<CorpusRecipe>(entry) {
            Ok(recipe) => corpus.push(recipe),
            Err(err) => warn!("Skipping malformed corpus entry: {err}"),
        }
    }
    Ok(corpus)
}

/// Read and parse the fridge listing, one ingredient per line.
pub fn load_fridge_listing(path: &Path) -> Result<Vec<IngredientRecord>, AssistantError> {
    let raw = std::fs::read_to_string(path)?;
    Ok(parse_listing(&raw))
}
