//! Structured-metadata extraction tier (schema.org JSON-LD).
//!
//! The highest-confidence source: publishers that embed a Recipe object give
//! us exact title, ingredient and instruction text. Real-world blocks are
//! frequently malformed, so every script block is sanitized and parsed
//! independently; a block that still fails to parse is logged and skipped,
//! never aborting extraction.

use html_escape::decode_html_entities;
use log::{debug, warn};
use scraper::{Html, Selector};
use serde::Deserialize;
use serde_json::Value;

use super::ContentExtractor;
use crate::model::ExtractedContent;

pub struct JsonLdTier;

#[derive(Debug, Deserialize)]
struct JsonLdRecipe {
    name: Option<String>,
    #[serde(rename = "recipeIngredient")]
    recipe_ingredient: Option<Vec<String>>,
    #[serde(rename = "recipeInstructions")]
    recipe_instructions: Option<RecipeInstructions>,
    #[serde(rename = "recipeYield")]
    recipe_yield: Option<RecipeYield>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RecipeInstructions {
    Text(String),
    Nodes(Vec<InstructionNode>),
    // Anything else (a stray object, a number) contributes no steps but
    // must not make the whole recipe unreadable.
    Other(Value),
}

/// One entry of a recipeInstructions array: a bare string, a HowToStep, or
/// a HowToSection wrapping further steps.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InstructionNode {
    Text(String),
    Step(InstructionStep),
    Section(InstructionSection),
    Other(Value),
}

#[derive(Debug, Deserialize)]
struct InstructionStep {
    text: String,
}

#[derive(Debug, Deserialize)]
struct InstructionSection {
    #[serde(rename = "itemListElement")]
    item_list_element: Vec<InstructionNode>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RecipeYield {
    Text(String),
    Number(serde_json::Number),
    Many(Vec<RecipeYield>),
    Other(Value),
}

/// Publishers escape entities inconsistently; decoding twice settles both
/// single- and double-escaped text.
fn decode_html_symbols(text: &str) -> String {
    decode_html_entities(&decode_html_entities(text)).into_owned()
}

/// Cleans the common breakages seen inside ld+json script bodies: CDATA
/// wrappers, HTML comments, leading junk before the first brace/bracket and
/// trailing commas.
fn sanitize_json(raw: &str) -> String {
    let mut cleaned = raw.trim().to_string();

    cleaned = cleaned
        .replace("<![CDATA[", "")
        .replace("]]>", "")
        .replace("<!--", "")
        .replace("-->", "");

    if !cleaned.starts_with('{') && !cleaned.starts_with('[') {
        if let Some(start) = cleaned.find(|c: char| c == '{' || c == '[') {
            cleaned = cleaned[start..].to_string();
        }
    }

    cleaned = cleaned.replace(",]", "]").replace(",}", "}");

    cleaned.trim().to_string()
}

fn type_matches_recipe(type_value: &Value) -> bool {
    match type_value {
        Value::String(name) => name.eq_ignore_ascii_case("recipe"),
        Value::Array(names) => names.iter().any(type_matches_recipe),
        _ => false,
    }
}

/// Locates a recipe-typed object directly, inside a top-level array, or
/// inside an `@graph` collection wrapper.
fn find_recipe(value: &Value) -> Option<&Value> {
    match value {
        Value::Object(fields) => {
            if fields.get("@type").is_some_and(type_matches_recipe) {
                return Some(value);
            }
            fields.get("@graph").and_then(find_recipe)
        }
        Value::Array(items) => items.iter().find_map(find_recipe),
        _ => None,
    }
}

fn flatten_instruction_nodes(nodes: &[InstructionNode], out: &mut Vec<String>) {
    for node in nodes {
        match node {
            InstructionNode::Text(text) => out.push(text.clone()),
            InstructionNode::Step(step) => out.push(step.text.clone()),
            InstructionNode::Section(section) => {
                flatten_instruction_nodes(&section.item_list_element, out)
            }
            InstructionNode::Other(value) => {
                warn!("Ignoring unrecognized instruction node: {value}");
            }
        }
    }
}

fn instructions_text(instructions: &RecipeInstructions) -> Option<String> {
    let steps = match instructions {
        RecipeInstructions::Text(text) => vec![text.clone()],
        RecipeInstructions::Nodes(nodes) => {
            let mut steps = Vec::new();
            flatten_instruction_nodes(nodes, &mut steps);
            steps
        }
        RecipeInstructions::Other(value) => {
            warn!("Ignoring unrecognized recipeInstructions shape: {value}");
            Vec::new()
        }
    };
    let steps: Vec<String> = steps
        .iter()
        .map(|step| decode_html_symbols(step.trim()))
        .filter(|step| !step.is_empty())
        .collect();
    (!steps.is_empty()).then(|| steps.join("\n"))
}

fn yield_text(recipe_yield: &RecipeYield) -> Option<String> {
    let text = match recipe_yield {
        RecipeYield::Text(text) => text.trim().to_string(),
        RecipeYield::Number(number) => number.to_string(),
        RecipeYield::Many(values) => values
            .iter()
            .filter_map(yield_text)
            .collect::<Vec<_>>()
            .join(", "),
        RecipeYield::Other(_) => String::new(),
    };
    (!text.is_empty()).then_some(text)
}

impl From<JsonLdRecipe> for ExtractedContent {
    fn from(recipe: JsonLdRecipe) -> Self {
        ExtractedContent {
            title: recipe
                .name
                .map(|name| decode_html_symbols(name.trim()))
                .filter(|name| !name.is_empty()),
            ingredients_text: recipe.recipe_ingredient.and_then(|lines| {
                let lines: Vec<String> = lines
                    .iter()
                    .map(|line| decode_html_symbols(line.trim()))
                    .filter(|line| !line.is_empty())
                    .collect();
                (!lines.is_empty()).then(|| lines.join("\n"))
            }),
            instructions_text: recipe.recipe_instructions.as_ref().and_then(instructions_text),
            recipe_yield_text: recipe.recipe_yield.as_ref().and_then(yield_text),
        }
    }
}

impl ContentExtractor for JsonLdTier {
    fn name(&self) -> &'static str {
        "json-ld"
    }

    fn extract(&self, document: &Html) -> ExtractedContent {
        let selector = Selector::parse("script[type='application/ld+json']").unwrap();

        for script in document.select(&selector) {
            let cleaned = sanitize_json(&script.inner_html());
            let parsed: Value = match serde_json::from_str(&cleaned) {
                Ok(value) => value,
                Err(err) => {
                    warn!("Skipping malformed JSON-LD block: {err}");
                    continue;
                }
            };

            let Some(recipe_value) = find_recipe(&parsed) else {
                continue;
            };
            match serde_json::from_value::<JsonLdRecipe>(recipe_value.clone()) {
                Ok(recipe) => {
                    debug!("Found JSON-LD recipe: {recipe:?}");
                    return ExtractedContent::from(recipe);
                }
                Err(err) => {
                    warn!("Skipping unreadable JSON-LD recipe object: {err}");
                }
            }
        }

        ExtractedContent::default()
    }
}
