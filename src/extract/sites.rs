//! Registry of sites with known structured markup and URL conventions.

use crate::model::RecipeRecord;
use regex::Regex;
use std::sync::LazyLock;

// chefkoch-style URLs carry a numeric id segment before the slug
static LEADING_ID: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+/").unwrap());

const ESTIMATE_NOTE: &str =
    "This is an estimated interpretation based on the URL, since the recipe page itself could not be read.";

/// Sites with a registered structured extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KnownSite {
    Chefkoch,
    KitchenStories,
}

impl KnownSite {
    /// Exact hostname lookup; a leading `www.` is tolerated, anything
    /// else falls through to the AI stage.
    pub fn for_host(host: &str) -> Option<Self> {
        match host.strip_prefix("www.").unwrap_or(host) {
            "chefkoch.de" => Some(KnownSite::Chefkoch),
            "kitchenstories.com" => Some(KnownSite::KitchenStories),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            KnownSite::Chefkoch => "Chefkoch.de",
            KnownSite::KitchenStories => "Kitchen Stories",
        }
    }

    fn recipe_path_marker(self) -> &'static str {
        match self {
            KnownSite::Chefkoch => "/rezepte/",
            KnownSite::KitchenStories => "/recipes/",
        }
    }

    /// The site whose recipe path convention the URL follows, if any.
    pub fn matching_convention(url: &str) -> Option<Self> {
        let site = Self::for_host(host_of(url))?;
        url.contains(site.recipe_path_marker()).then_some(site)
    }
}

/// Hostname portion of a URL.
pub fn host_of(url: &str) -> &str {
    let rest = url.split("//").nth(1).unwrap_or(url);
    rest.split('/').next().unwrap_or(rest)
}

/// Educated guess at a recipe from the URL structure alone. Applies only
/// to URLs following a known site's recipe path convention; the result is
/// marked estimated and carries no ingredients or instructions.
pub fn guess_recipe(url: &str) -> Option<RecipeRecord> {
    let site = KnownSite::matching_convention(url)?;
    let slug = url.trim_end_matches('/').rsplit('/').next()?;
    let slug = LEADING_ID.replace(slug, "");
    let slug = slug
        .trim_end_matches(".html")
        .trim_end_matches(".htm")
        .replace('-', " ");

    Some(RecipeRecord {
        title: title_case(&slug),
        source: site.label().to_string(),
        estimated: true,
        note: Some(ESTIMATE_NOTE.to_string()),
        ..Default::default()
    })
}

fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
