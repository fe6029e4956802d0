//! Recipe extraction pipeline.
//!
//! One URL goes through up to three stages, each cheaper in confidence
//! than the last: a structured schema parse for registered sites, an
//! AI pass over the visible page text, and finally an educated guess from
//! the URL structure. Each stage failure is logged and demotes the
//! request to the next stage; the pipeline itself never returns an error.

mod ai;
mod fetch;
mod json_ld;
mod sites;

pub use self::ai::AiExtractor;
pub use self::fetch::PageFetcher;
pub use self::sites::KnownSite;

use crate::config::AppConfig;
use crate::error::AssistantError;
use crate::model::RecipeRecord;
use log::{debug, warn};
use scraper::Html;

/// Terminal states of the extraction pipeline.
#[derive(Debug)]
pub enum Extraction {
    /// Recovered from an embedded machine-readable recipe block.
    Structured(RecipeRecord),
    /// Recovered by the AI pass over the page text.
    AiExtracted(RecipeRecord),
    /// Guessed from the URL structure alone; no page content was readable.
    Estimated(RecipeRecord),
    /// No stage could recover any recipe data.
    Failed,
}

impl Extraction {
    pub fn into_recipe(self) -> Option<RecipeRecord> {
        match self {
            Extraction::Structured(recipe)
            | Extraction::AiExtracted(recipe)
            | Extraction::Estimated(recipe) => Some(recipe),
            Extraction::Failed => None,
        }
    }
}

/// Run the pipeline for one URL. Exactly one attempt per stage, no
/// retries; abandoning callers simply drop the future.
pub async fn extract_recipe(url: &str, config: &AppConfig) -> Extraction {
    if let Some(body) = fetch_stage(url, config).await {
        // scraper documents are not Send, so everything derived from the
        // page is pulled out before the AI stage awaits
        let (structured, page_text) = structured_stage(url, &body);
        if let Some(recipe) = structured {
            return Extraction::Structured(recipe);
        }

        match ai_stage(&page_text, url, config).await {
            Ok(recipe) => return Extraction::AiExtracted(recipe),
            Err(err) => warn!("AI extraction failed for {url}: {err}"),
        }
    }

    match sites::guess_recipe(url) {
        Some(recipe) => Extraction::Estimated(recipe),
        None => {
            warn!("no extraction stage could recover a recipe from {url}");
            Extraction::Failed
        }
    }
}

async fn fetch_stage(url: &str, config: &AppConfig) -> Option<String> {
    let fetcher = match PageFetcher::new(&config.fetch) {
        Ok(fetcher) => fetcher,
        Err(err) => {
            warn!("could not build page fetcher: {err}");
            return None;
        }
    };
    match fetcher.fetch(url).await {
        Ok(body) => Some(body),
        Err(err) => {
            warn!("fetch failed for {url}: {err}");
            None
        }
    }
}

/// Structured attempt plus the page text the AI stage needs if it fails.
fn structured_stage(url: &str, body: &str) -> (Option<RecipeRecord>, String) {
    let document = Html::parse_document(body);
    let host = sites::host_of(url);

    let structured = match KnownSite::for_host(host) {
        Some(site) => match json_ld::parse_document(&document, host) {
            Ok(recipe) => Some(recipe),
            Err(err) => {
                debug!("{} structured parse failed for {url}: {err}", site.label());
                None
            }
        },
        None => {
            debug!("no structured extractor registered for host {host}");
            None
        }
    };

    let page_text = if structured.is_none() {
        ai::visible_text(&document)
    } else {
        String::new()
    };
    (structured, page_text)
}

async fn ai_stage(
    page_text: &str,
    url: &str,
    config: &AppConfig,
) -> Result<RecipeRecord, AssistantError> {
    let extractor = AiExtractor::from_config(&config.provider)?;
    extractor.extract(page_text, sites::host_of(url)).await
}
