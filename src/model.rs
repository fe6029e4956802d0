use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Risk classification of a fridge item, parsed case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    NotSpecified,
}

impl RiskLevel {
    /// Unknown tokens map to `NotSpecified` rather than failing the line.
    pub fn parse(token: &str) -> Self {
        match token.to_ascii_lowercase().as_str() {
            "low" => RiskLevel::Low,
            "medium" => RiskLevel::Medium,
            "high" => RiskLevel::High,
            _ => RiskLevel::NotSpecified,
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
            RiskLevel::NotSpecified => "Not specified",
        };
        write!(f, "{label}")
    }
}

/// One fridge item, parsed from a single listing line.
#[derive(Debug, Clone, Serialize)]
pub struct IngredientRecord {
    pub name: String,
    /// Quantity string with the unit embedded, e.g. "500g".
    pub amount: String,
    /// Free-text age descriptor, e.g. "3 days".
    pub age: String,
    pub risk_level: RiskLevel,
    /// Remaining shelf life, 0-100.
    pub risk_percentage: f64,
    /// kg CO2e attributed to the item.
    pub co2_impact: f64,
}

/// Risk-ranked summary derived from a sequence of fridge records.
///
/// `urgent_items` is always a subset of `high_risk_items`; both preserve
/// the input order of the records they were built from.
#[derive(Debug, Clone)]
pub struct RiskReport {
    pub high_risk_items: Vec<IngredientRecord>,
    pub urgent_items: Vec<IngredientRecord>,
    pub total_co2_at_risk: f64,
    pub driving_equivalent_km: f64,
    pub priority_actions: Vec<String>,
    pub items_table: String,
}

/// Caller-facing result of the fridge analysis boundary: a rendered summary
/// plus recipe suggestions, degraded to a fixed message on failure.
#[derive(Debug, Clone, Serialize)]
pub struct FridgeAnalysis {
    pub summary: String,
    pub recipes: Vec<RecipeMatch>,
}

/// One ingredient of a recipe.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecipeIngredient {
    pub name: String,
    #[serde(default)]
    pub amount: String,
    #[serde(default)]
    pub unit: String,
}

/// Structured recipe data recovered from a URL.
///
/// `estimated` is true only when the record was guessed from the URL alone;
/// in that case `note` carries a disclaimer and no ingredients or
/// instructions are present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecipeRecord {
    pub title: String,
    #[serde(default)]
    pub ingredients: Vec<RecipeIngredient>,
    #[serde(default)]
    pub instructions: Vec<String>,
    #[serde(default)]
    pub servings: String,
    #[serde(default)]
    pub prep_time: String,
    #[serde(default)]
    pub cook_time: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub source: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub estimated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// One entry of the static recipe corpus.
#[derive(Debug, Clone, Deserialize)]
pub struct CorpusRecipe {
    pub title: String,
    #[serde(default)]
    pub ingredients: Vec<RecipeIngredient>,
    #[serde(default = "default_sustainability_score")]
    pub sustainability_score: f64,
    #[serde(default = "default_image_url")]
    pub image_url: String,
    #[serde(default = "default_not_specified")]
    pub preparation_time: String,
    #[serde(default = "default_difficulty")]
    pub difficulty: String,
}

fn default_sustainability_score() -> f64 {
    5.0
}

fn default_image_url() -> String {
    "default_recipe_image.jpg".to_string()
}

fn default_not_specified() -> String {
    "Not specified".to_string()
}

fn default_difficulty() -> String {
    "Medium".to_string()
}

/// A corpus recipe scored against the available ingredients.
#[derive(Debug, Clone, Serialize)]
pub struct RecipeMatch {
    pub title: String,
    pub matching_ingredients: BTreeSet<String>,
    pub missing_ingredients: BTreeSet<String>,
    pub match_count: usize,
    pub sustainability_score: f64,
    pub image_url: String,
    pub preparation_time: String,
    pub difficulty: String,
}
