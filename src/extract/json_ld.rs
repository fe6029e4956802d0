//! Structured extraction from embedded schema.org Recipe blocks.
//!
//! Real-world JSON-LD is messy: the recipe node may sit at the top level,
//! inside an array, or inside an `@graph`; most fields come in several
//! shapes. The untagged enums below absorb the variants seen in the wild.

use crate::error::AssistantError;
use crate::model::{RecipeIngredient, RecipeRecord};
use html_escape::decode_html_entities;
use log::debug;
use regex::Regex;
use scraper::{Html, Selector};
use serde::Deserialize;
use serde_json::Value;
use std::sync::LazyLock;

// leading quantity and optional unit of a free-text ingredient line
static QUANTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?<amount>\d+(?:[.,/]\d+)?)\s*(?<unit>\p{L}+\.?)?\s+(?<name>.+)$").unwrap()
});

#[derive(Debug, Deserialize)]
struct SchemaRecipe {
    name: String,
    #[serde(rename = "recipeIngredient", default)]
    recipe_ingredient: Vec<SchemaIngredient>,
    #[serde(rename = "recipeInstructions")]
    recipe_instructions: SchemaInstructions,
    #[serde(rename = "recipeYield")]
    recipe_yield: Option<SchemaYield>,
    #[serde(rename = "prepTime")]
    prep_time: Option<String>,
    #[serde(rename = "cookTime")]
    cook_time: Option<String>,
    #[serde(default)]
    image: SchemaImage,
}

/// String-or-number scalar, as sites disagree on numeric fields.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum Scalar {
    Number(f64),
    Text(String),
}

impl Scalar {
    pub(crate) fn into_string(self) -> String {
        match self {
            Scalar::Number(n) if n.fract() == 0.0 => format!("{}", n as i64),
            Scalar::Number(n) => n.to_string(),
            Scalar::Text(text) => text,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SchemaIngredient {
    Text(String),
    Object {
        name: String,
        amount: Option<Scalar>,
        #[serde(rename = "unitOfMeasurement")]
        unit: Option<String>,
    },
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SchemaYield {
    One(Scalar),
    Many(Vec<Scalar>),
}

impl SchemaYield {
    fn into_string(self) -> String {
        match self {
            SchemaYield::One(value) => value.into_string(),
            SchemaYield::Many(values) => values
                .into_iter()
                .next()
                .map(Scalar::into_string)
                .unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ImageObject {
    url: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SchemaImage {
    None,
    Url(String),
    Object(ImageObject),
    Urls(Vec<String>),
    Objects(Vec<ImageObject>),
}

impl Default for SchemaImage {
    fn default() -> Self {
        SchemaImage::None
    }
}

impl SchemaImage {
    fn into_url(self) -> String {
        match self {
            SchemaImage::None => String::new(),
            SchemaImage::Url(url) => url,
            SchemaImage::Object(image) => image.url,
            SchemaImage::Urls(urls) => urls.into_iter().next().unwrap_or_default(),
            SchemaImage::Objects(images) => images
                .into_iter()
                .next()
                .map(|image| image.url)
                .unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct InstructionObject {
    text: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SchemaInstructions {
    Text(String),
    Steps(Vec<String>),
    StepObjects(Vec<InstructionObject>),
    HowTo(Vec<HowToNode>),
}

#[derive(Debug, Deserialize)]
#[serde(tag = "@type")]
enum HowToNode {
    HowToStep(HowToStep),
    HowToSection(HowToSection),
}

#[derive(Debug, Deserialize)]
struct HowToStep {
    text: Option<String>,
    description: Option<String>,
}

impl HowToStep {
    fn into_texts(self) -> Vec<String> {
        self.text.into_iter().chain(self.description).collect()
    }
}

#[derive(Debug, Deserialize)]
struct HowToSection {
    #[serde(rename = "itemListElement")]
    item_list_element: Vec<HowToStep>,
}

impl SchemaInstructions {
    fn into_steps(self) -> Vec<String> {
        match self {
            SchemaInstructions::Text(text) => vec![decode(&text)],
            SchemaInstructions::Steps(steps) => {
                steps.iter().map(|step| decode(step)).collect()
            }
            SchemaInstructions::StepObjects(steps) => {
                steps.iter().map(|step| decode(&step.text)).collect()
            }
            SchemaInstructions::HowTo(nodes) => nodes
                .into_iter()
                .flat_map(|node| match node {
                    HowToNode::HowToStep(step) => step.into_texts(),
                    HowToNode::HowToSection(section) => section
                        .item_list_element
                        .into_iter()
                        .flat_map(HowToStep::into_texts)
                        .collect(),
                })
                .map(|text| decode(&text))
                .collect(),
        }
    }
}

/// Parse the first usable schema.org Recipe block out of the document.
pub fn parse_document(document: &Html, host: &str) -> Result<RecipeRecord, AssistantError> {
    let selector = Selector::parse("script[type='application/ld+json']").unwrap();

    for script in document.select(&selector) {
        let cleaned = sanitize_json(&script.inner_html());
        let Ok(json) = serde_json::from_str::<Value>(&cleaned) else {
            continue;
        };
        if let Some(node) = recipe_node(&json) {
            match serde_json::from_value::<SchemaRecipe>(node.clone()) {
                Ok(schema) => return Ok(into_record(schema, host)),
                Err(err) => debug!("Recipe schema block rejected: {err}"),
            }
        }
    }

    Err(AssistantError::SchemaError(
        "no machine-readable recipe block found".to_string(),
    ))
}

fn recipe_node(json: &Value) -> Option<&Value> {
    if let Some(items) = json.as_array() {
        items
            .iter()
            .find(|item| item.get("recipeInstructions").is_some())
    } else if json.get("recipeInstructions").is_some() {
        Some(json)
    } else if let Some(graph) = json.get("@graph") {
        graph.as_array()?.iter().find(|item| {
            item.get("@type") == Some(&Value::String("Recipe".to_string()))
        })
    } else {
        None
    }
}

fn into_record(schema: SchemaRecipe, host: &str) -> RecipeRecord {
    RecipeRecord {
        title: decode(&schema.name),
        ingredients: schema
            .recipe_ingredient
            .into_iter()
            .map(into_ingredient)
            .collect(),
        instructions: schema.recipe_instructions.into_steps(),
        servings: schema
            .recipe_yield
            .map(SchemaYield::into_string)
            .unwrap_or_default(),
        prep_time: schema.prep_time.unwrap_or_default(),
        cook_time: schema.cook_time.unwrap_or_default(),
        image_url: schema.image.into_url(),
        source: host.to_string(),
        estimated: false,
        note: None,
    }
}

fn into_ingredient(raw: SchemaIngredient) -> RecipeIngredient {
    match raw {
        SchemaIngredient::Object { name, amount, unit } => RecipeIngredient {
            name: decode(&name),
            amount: amount.map(Scalar::into_string).unwrap_or_default(),
            unit: unit.unwrap_or_default(),
        },
        SchemaIngredient::Text(text) => split_quantity(&decode(&text)),
    }
}

/// Split a free-text ingredient line like "500 g flour" into its parts;
/// lines without a leading quantity keep the whole text as the name.
fn split_quantity(text: &str) -> RecipeIngredient {
    match QUANTITY.captures(text.trim()) {
        Some(caps) => RecipeIngredient {
            name: caps["name"].to_string(),
            amount: caps["amount"].to_string(),
            unit: caps
                .name("unit")
                .map(|unit| unit.as_str().to_string())
                .unwrap_or_default(),
        },
        None => RecipeIngredient {
            name: text.trim().to_string(),
            amount: String::new(),
            unit: String::new(),
        },
    }
}

fn decode(text: &str) -> String {
    // double-encoded entities show up in the wild
    decode_html_entities(&decode_html_entities(text)).into_owned()
}

fn sanitize_json(json_str: &str) -> String {
    let mut cleaned = json_str.trim().to_string();

    // some sites prepend junk before the JSON payload
    if !cleaned.starts_with('{') && !cleaned.starts_with('[') {
        if let Some(start) = cleaned.find('{') {
            cleaned = cleaned[start..].to_string();
        }
    }

    // trailing commas and stray HTML comments break strict parsing
    cleaned = cleaned.replace(",]", "]").replace(",}", "}");
    cleaned.replace("<!--", "").replace("-->", "")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document_with(json_ld: &str) -> Html {
        let html = format!(
            r#"
            <!DOCTYPE html>
            <html>
            <head>
                <script type="application/ld+json">
                    {json_ld}
                </script>
            </head>
            <body></body>
            </html>
            "#
        );
        Html::parse_document(&html)
    }

    #[test]
    fn test_parse_basic_recipe() {
        let document = document_with(
            r#"
        {
            "@context": "https://schema.org/",
            "@type": "Recipe",
            "name": "Chocolate Chip Cookies",
            "image": "https://example.com/cookie.jpg",
            "recipeIngredient": ["200 g flour", "sugar", "chocolate chips"],
            "recipeInstructions": "Mix ingredients. Bake at 350F for 10 minutes.",
            "recipeYield": "12 cookies",
            "prepTime": "PT15M",
            "cookTime": "PT10M"
        }
        "#,
        );

        let recipe = parse_document(&document, "example.com").unwrap();

        assert_eq!(recipe.title, "Chocolate Chip Cookies");
        assert_eq!(recipe.image_url, "https://example.com/cookie.jpg");
        assert_eq!(recipe.servings, "12 cookies");
        assert_eq!(recipe.prep_time, "PT15M");
        assert_eq!(recipe.cook_time, "PT10M");
        assert_eq!(recipe.source, "example.com");
        assert!(!recipe.estimated);

        assert_eq!(recipe.ingredients[0].amount, "200");
        assert_eq!(recipe.ingredients[0].unit, "g");
        assert_eq!(recipe.ingredients[0].name, "flour");
        assert_eq!(recipe.ingredients[1].name, "sugar");
        assert_eq!(recipe.ingredients[1].amount, "");

        assert_eq!(
            recipe.instructions,
            vec!["Mix ingredients. Bake at 350F for 10 minutes."]
        );
    }

    #[test]
    fn test_parse_recipe_from_array_with_how_to_steps() {
        let document = document_with(
            r#"
        [
            {
                "@type": "Recipe",
                "name": "Pasta Carbonara",
                "image": ["https://example.com/c1.jpg", "https://example.com/c2.jpg"],
                "recipeIngredient": ["spaghetti", "eggs"],
                "recipeInstructions": [
                    {"@type": "HowToStep", "text": "Cook pasta"},
                    {"@type": "HowToStep", "text": "Fry bacon"}
                ]
            },
            {
                "@type": "WebSite",
                "name": "Recipe Website"
            }
        ]
        "#,
        );

        let recipe = parse_document(&document, "example.com").unwrap();

        assert_eq!(recipe.title, "Pasta Carbonara");
        assert_eq!(recipe.image_url, "https://example.com/c1.jpg");
        assert_eq!(recipe.instructions, vec!["Cook pasta", "Fry bacon"]);
    }

    #[test]
    fn test_parse_recipe_from_graph() {
        let document = document_with(
            r#"
        {
            "@graph": [
                {"@type": "WebPage", "name": "Some page"},
                {
                    "@type": "Recipe",
                    "name": "Apfelkuchen",
                    "recipeIngredient": [
                        {"name": "Mehl", "amount": 500, "unitOfMeasurement": "g"}
                    ],
                    "recipeInstructions": ["Teig kneten", "Backen"]
                }
            ]
        }
        "#,
        );

        let recipe = parse_document(&document, "chefkoch.de").unwrap();

        assert_eq!(recipe.title, "Apfelkuchen");
        assert_eq!(recipe.ingredients[0].name, "Mehl");
        assert_eq!(recipe.ingredients[0].amount, "500");
        assert_eq!(recipe.ingredients[0].unit, "g");
        assert_eq!(recipe.instructions, vec!["Teig kneten", "Backen"]);
    }

    #[test]
    fn test_sections_are_flattened_in_order() {
        let document = document_with(
            r#"
        {
            "@type": "Recipe",
            "name": "Layer Cake",
            "recipeIngredient": ["flour"],
            "recipeInstructions": [
                {"@type": "HowToSection", "itemListElement": [
                    {"@type": "HowToStep", "text": "Make the base"},
                    {"@type": "HowToStep", "text": "Chill it"}
                ]},
                {"@type": "HowToStep", "text": "Decorate"}
            ]
        }
        "#,
        );

        let recipe = parse_document(&document, "example.com").unwrap();
        assert_eq!(
            recipe.instructions,
            vec!["Make the base", "Chill it", "Decorate"]
        );
    }

    #[test]
    fn test_missing_required_fields_is_a_schema_error() {
        // recipe node present but no name, so deserialization must fail
        let document = document_with(
            r#"
        {
            "@type": "Recipe",
            "recipeInstructions": ["step 1"]
        }
        "#,
        );

        let result = parse_document(&document, "chefkoch.de");
        assert!(matches!(result, Err(AssistantError::SchemaError(_))));
    }

    #[test]
    fn test_page_without_schema_block_is_a_schema_error() {
        let document = Html::parse_document("<html><body><p>No recipe</p></body></html>");
        let result = parse_document(&document, "chefkoch.de");
        assert!(matches!(result, Err(AssistantError::SchemaError(_))));
    }

    #[test]
    fn test_entities_are_decoded() {
        let document = document_with(
            r#"
        {
            "@type": "Recipe",
            "name": "Fish &amp;amp; Chips",
            "recipeIngredient": ["fish"],
            "recipeInstructions": "Fry everything."
        }
        "#,
        );

        let recipe = parse_document(&document, "example.com").unwrap();
        assert_eq!(recipe.title, "Fish & Chips");
    }

    #[test]
    fn test_split_quantity_variants() {
        let ing = split_quantity("2 eggs");
        assert_eq!(ing.amount, "2");
        assert_eq!(ing.unit, "");
        assert_eq!(ing.name, "eggs");

        let ing = split_quantity("1/2 cup sugar");
        assert_eq!(ing.amount, "1/2");
        assert_eq!(ing.unit, "cup");
        assert_eq!(ing.name, "sugar");

        let ing = split_quantity("salt to taste");
        assert_eq!(ing.amount, "");
        assert_eq!(ing.name, "salt to taste");
    }
}
