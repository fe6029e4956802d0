//! AI-assisted extraction from pages without usable structured markup.

use crate::config::ProviderConfig;
use crate::error::AssistantError;
use crate::extract::json_ld::Scalar;
use crate::model::{RecipeIngredient, RecipeRecord};
use log::debug;
use reqwest::Client;
use scraper::{ElementRef, Html, Node};
use serde::Deserialize;
use serde_json::{json, Value};

/// Character budget for the page text sent to the model.
pub const TEXT_BUDGET: usize = 4000;

const EXTRACTION_PROMPT: &str = r#"
You extract recipe information from webpage text.
Return only a JSON object with this structure:

{
  "title": "Recipe title",
  "ingredients": [
    {"name": "ingredient name", "amount": "amount", "unit": "unit"}
  ],
  "instructions": ["step 1", "step 2"],
  "servings": "number of servings",
  "prep_time": "preparation time",
  "cook_time": "cooking time"
}
"#;

/// Client for the LLM completion service with a strict JSON reply contract.
pub struct AiExtractor {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl AiExtractor {
    /// Create an extractor from configuration; the API key may also come
    /// from the OPENAI_API_KEY environment variable.
    pub fn from_config(config: &ProviderConfig) -> Result<Self, AssistantError> {
        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var("OPENAI_API_KEY").ok())
            .ok_or_else(|| {
                AssistantError::AiError(
                    "OPENAI_API_KEY not found in config or environment".to_string(),
                )
            })?;

        Ok(AiExtractor {
            client: Client::new(),
            api_key,
            base_url: config.base_url.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }

    #[doc(hidden)]
    pub fn with_base_url(api_key: String, base_url: String, model: String) -> Self {
        AiExtractor {
            client: Client::new(),
            api_key,
            base_url,
            model,
            temperature: 0.3,
            max_tokens: 1024,
        }
    }

    /// One completion call over the page text; any transport, status or
    /// reply-format problem is an error the pipeline demotes to the next
    /// stage.
    pub async fn extract(
        &self,
        page_text: &str,
        source: &str,
    ) -> Result<RecipeRecord, AssistantError> {
        let excerpt = truncate_chars(page_text, TEXT_BUDGET);

        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&json!({
                "model": self.model,
                "response_format": {"type": "json_object"},
                "messages": [
                    {"role": "system", "content": EXTRACTION_PROMPT},
                    {"role": "user", "content": excerpt}
                ],
                "temperature": self.temperature,
                "max_tokens": self.max_tokens
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AssistantError::HttpStatus(response.status()));
        }

        let body: Value = response.json().await?;
        debug!("{body:?}");
        let content = body["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| {
                AssistantError::AiError("completion reply carried no content".to_string())
            })?;

        let reply: AiRecipe = serde_json::from_str(content)?;
        Ok(reply.into_record(source))
    }
}

#[derive(Debug, Deserialize)]
struct AiRecipe {
    title: String,
    #[serde(default)]
    ingredients: Vec<RecipeIngredient>,
    #[serde(default)]
    instructions: Vec<String>,
    servings: Option<Scalar>,
    #[serde(default)]
    prep_time: String,
    #[serde(default)]
    cook_time: String,
}

impl AiRecipe {
    fn into_record(self, source: &str) -> RecipeRecord {
        RecipeRecord {
            title: self.title,
            ingredients: self.ingredients,
            instructions: self.instructions,
            servings: self.servings.map(Scalar::into_string).unwrap_or_default(),
            prep_time: self.prep_time,
            cook_time: self.cook_time,
            image_url: String::new(),
            source: source.to_string(),
            estimated: false,
            note: None,
        }
    }
}

/// Visible text of the page: everything except non-content regions
/// (script, style, nav, footer, header, aside and friends) and hidden
/// elements, one text node per line.
pub(crate) fn visible_text(document: &Html) -> String {
    let mut lines = Vec::new();
    collect_text(&document.root_element(), &mut lines);
    lines.join("\n")
}

fn collect_text(element: &ElementRef, lines: &mut Vec<String>) {
    if skipped_tag(element) || hidden(element) {
        return;
    }
    for child in element.children() {
        match child.value() {
            Node::Text(text) => {
                let cleaned = text.split_whitespace().collect::<Vec<_>>().join(" ");
                if !cleaned.is_empty() {
                    lines.push(cleaned);
                }
            }
            Node::Element(_) => {
                if let Some(child_ref) = ElementRef::wrap(child) {
                    collect_text(&child_ref, lines);
                }
            }
            _ => {}
        }
    }
}

fn skipped_tag(element: &ElementRef) -> bool {
    matches!(
        element.value().name().to_lowercase().as_str(),
        "script" | "style" | "nav" | "footer" | "header" | "aside" | "noscript" | "iframe" | "svg"
    )
}

fn hidden(element: &ElementRef) -> bool {
    element.value().attr("hidden").is_some()
        || element
            .value()
            .attr("style")
            .map(|style| style.contains("display: none") || style.contains("visibility: hidden"))
            .unwrap_or(false)
}

/// Truncate on a character boundary so multi-byte text never splits.
fn truncate_chars(text: &str, budget: usize) -> &str {
    match text.char_indices().nth(budget) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
