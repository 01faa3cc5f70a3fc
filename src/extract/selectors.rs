//! CSS-selector heuristic tier and the final title fallback.
//!
//! Runs when a page carries no usable structured metadata. Selector lists
//! cover the common recipe-card plugins (WPRM, Tasty, Mediavine) plus
//! generic class names and microdata attributes; the first pattern with a
//! non-empty match wins for each field.

use std::collections::HashSet;

use log::debug;
use scraper::{ElementRef, Html, Selector};

use super::ContentExtractor;
use crate::model::ExtractedContent;

pub struct SelectorTier;
pub struct TitleFallbackTier;

const INGREDIENT_SELECTORS: &[&str] = &[
    ".wprm-recipe-ingredient",
    ".wprm-recipe-ingredients-container li",
    ".tasty-recipes-ingredients li",
    ".mv-create-ingredients li",
    "[itemprop='recipeIngredient']",
    ".recipe-ingredients li",
    ".recipe-ingredient",
    ".ingredient-list li",
    ".ingredients li",
    "ul.ingredients li",
    "[class*='ingredient'] li",
];

const INSTRUCTION_ITEM_SELECTORS: &[&str] = &[
    ".wprm-recipe-instruction",
    ".tasty-recipes-instructions li",
    ".mv-create-instructions li",
    "[itemprop='recipeInstructions'] li",
    ".recipe-instructions li",
    ".instructions li",
    ".directions li",
    ".recipe-instruction",
    ".instruction",
];

const INSTRUCTION_BLOCK_SELECTORS: &[&str] = &[
    ".wprm-recipe-instructions-container",
    ".recipe-instructions",
    ".instructions",
    ".directions",
    ".recipe-directions",
    "[itemprop='recipeInstructions']",
];

const YIELD_SELECTORS: &[&str] = &[
    "[itemprop='recipeYield']",
    ".wprm-recipe-servings",
    ".recipe-yield",
    ".recipe-servings",
    ".tasty-recipes-yield",
    ".yield",
    ".servings",
];

const YIELD_KEYWORDS: &[&str] = &["servings:", "yield:", "makes:"];

fn element_text(element: ElementRef) -> String {
    element
        .text()
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

/// Collects the de-duplicated text of every node matching the first selector
/// that matches anything. Set semantics: repeated lines (print vs. card
/// views of the same list) collapse to one.
fn collect_items(document: &Html, selectors: &[&str]) -> Vec<String> {
    for selector_str in selectors {
        let Ok(selector) = Selector::parse(selector_str) else {
            continue;
        };
        let mut seen = HashSet::new();
        let mut items = Vec::new();
        for element in document.select(&selector) {
            let text = element_text(element);
            if !text.is_empty() && seen.insert(text.clone()) {
                items.push(text);
            }
        }
        if !items.is_empty() {
            debug!("Matched {} items with selector {selector_str}", items.len());
            return items;
        }
    }
    Vec::new()
}

fn extract_ingredients(document: &Html) -> Option<String> {
    let items = collect_items(document, INGREDIENT_SELECTORS);
    (!items.is_empty()).then(|| items.join("\n"))
}

fn extract_instructions(document: &Html) -> Option<String> {
    // Item-level selectors first: one element per step.
    let items = collect_items(document, INSTRUCTION_ITEM_SELECTORS);
    if !items.is_empty() {
        return Some(items.join("\n"));
    }

    // Block-level fallback: take the container's text and split the
    // concatenated text into steps on newlines.
    for selector_str in INSTRUCTION_BLOCK_SELECTORS {
        let Ok(selector) = Selector::parse(selector_str) else {
            continue;
        };
        if let Some(block) = document.select(&selector).next() {
            // Concatenate text nodes as-is: line breaks come from the
            // document, never from inline markup boundaries.
            let steps: Vec<String> = block
                .text()
                .collect::<String>()
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect();
            if !steps.is_empty() {
                debug!("Matched instruction block with selector {selector_str}");
                return Some(steps.join("\n"));
            }
        }
    }

    None
}

fn extract_yield(document: &Html) -> Option<String> {
    for selector_str in YIELD_SELECTORS {
        let Ok(selector) = Selector::parse(selector_str) else {
            continue;
        };
        for element in document.select(&selector) {
            let text = element_text(element);
            if !text.is_empty() {
                return Some(text);
            }
        }
    }

    // Keyword containment scan: find the first line anywhere on the page
    // that carries a literal "Servings:"/"Yield:"/"Makes:" label.
    let candidates = Selector::parse("p, span, div, li, td, h2, h3, h4").unwrap();
    for element in document.select(&candidates) {
        for line in element.text().collect::<Vec<_>>().join("\n").lines() {
            let lowered = line.to_lowercase();
            if YIELD_KEYWORDS.iter().any(|keyword| lowered.contains(keyword)) {
                return Some(line.trim().to_string());
            }
        }
    }

    None
}

impl ContentExtractor for SelectorTier {
    fn name(&self) -> &'static str {
        "css-selectors"
    }

    fn extract(&self, document: &Html) -> ExtractedContent {
        ExtractedContent {
            title: None,
            ingredients_text: extract_ingredients(document),
            instructions_text: extract_instructions(document),
            recipe_yield_text: extract_yield(document),
        }
    }
}

impl ContentExtractor for TitleFallbackTier {
    fn name(&self) -> &'static str {
        "title-fallback"
    }

    fn extract(&self, document: &Html) -> ExtractedContent {
        let page_title = Selector::parse("title").unwrap();
        let headings = Selector::parse("h1, h2").unwrap();

        let title = document
            .select(&page_title)
            .map(element_text)
            .find(|text| !text.is_empty())
            .or_else(|| {
                document
                    .select(&headings)
                    .map(element_text)
                    .find(|text| !text.is_empty())
            });

        ExtractedContent {
            title,
            ..ExtractedContent::default()
        }
    }
}
