//! Core engine for a sustainable kitchen assistant.
//!
//! The agent layer on top of this crate answers sustainability and recipe
//! questions; everything it calls into lives here: parsing fridge
//! listings into typed records, aggregating them into risk-ranked
//! CO2-weighted reports, matching recipes against available ingredients,
//! and recovering structured recipe data from arbitrary URLs through a
//! layered fallback pipeline.

pub mod config;
pub mod corpus;
pub mod error;
pub mod extract;
pub mod format;
pub mod fridge;
pub mod matcher;
pub mod model;
pub mod transcribe;

pub use crate::config::{AnalysisConfig, AppConfig, FetchConfig, ProviderConfig};
pub use crate::error::AssistantError;
pub use crate::extract::{extract_recipe, Extraction, KnownSite};
pub use crate::format::format_recipe;
pub use crate::fridge::{analyze_fridge, parse_line, parse_listing};
pub use crate::matcher::find_matches;
pub use crate::model::{
    CorpusRecipe, FridgeAnalysis, IngredientRecord, RecipeIngredient, RecipeMatch,
    RecipeRecord, RiskLevel, RiskReport,
};
pub use crate::transcribe::Transcriber;
