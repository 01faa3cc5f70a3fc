//! Tiered extraction of recipe content from raw HTML.
//!
//! Tiers run in confidence order and each one only fills fields the earlier
//! tiers left empty: structured JSON-LD metadata first, CSS-selector
//! heuristics second, the page title last. Extraction never fails; a page
//! with no recipe markup at all simply comes back with null fields.

use log::debug;
use scraper::Html;

mod json_ld;
mod selectors;

pub use json_ld::JsonLdTier;
pub use selectors::{SelectorTier, TitleFallbackTier};

use crate::model::ExtractedContent;

/// One extraction strategy. Returns a partial [`ExtractedContent`]; fields
/// it cannot determine stay `None` for the next tier.
pub trait ContentExtractor {
    fn name(&self) -> &'static str;
    fn extract(&self, document: &Html) -> ExtractedContent;
}

/// Extracts `{title, ingredients, instructions, yield}` text from a recipe
/// page. Pure function, no I/O.
///
/// Later tiers are skipped once every field is populated, so a page with
/// complete JSON-LD never pays for the selector scan.
pub fn extract_recipe_content(html: &str) -> ExtractedContent {
    let document = Html::parse_document(html);
    let tiers: [&dyn ContentExtractor; 3] = [&JsonLdTier, &SelectorTier, &TitleFallbackTier];

    let mut content = ExtractedContent::default();
    for tier in tiers {
        if content.is_complete() {
            break;
        }
        debug!("Running extraction tier: {}", tier.name());
        content = content.merge_missing(tier.extract(&document));
    }
    content
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structured_data_wins_over_selector_markup() {
        // Both tiers could answer; the JSON-LD values must win untouched.
        let html = r#"
            <html>
            <head>
                <title>SEO Page Title | Some Blog</title>
                <script type="application/ld+json">
                {
                    "@type": "Recipe",
                    "name": "Real Title",
                    "recipeIngredient": ["1 cup rice"],
                    "recipeInstructions": "Cook the rice.",
                    "recipeYield": "2 servings"
                }
                </script>
            </head>
            <body>
                <h1 class="recipe-title">Wrong Title</h1>
                <ul class="recipe-ingredients"><li>999 cups wrong</li></ul>
                <div class="instructions"><p>Wrong step</p></div>
            </body>
            </html>
        "#;

        let content = extract_recipe_content(html);

        assert_eq!(content.title.as_deref(), Some("Real Title"));
        assert_eq!(content.ingredients_text.as_deref(), Some("1 cup rice"));
        assert_eq!(content.instructions_text.as_deref(), Some("Cook the rice."));
        assert_eq!(content.recipe_yield_text.as_deref(), Some("2 servings"));
    }

    #[test]
    fn test_selector_tier_fills_fields_metadata_missed() {
        // JSON-LD knows the name only; ingredients come from the markup.
        let html = r#"
            <html>
            <head>
                <script type="application/ld+json">{"@type": "Recipe", "name": "Half Done"}</script>
            </head>
            <body>
                <ul class="ingredients"><li>3 eggs</li><li>1 cup milk</li></ul>
            </body>
            </html>
        "#;

        let content = extract_recipe_content(html);

        assert_eq!(content.title.as_deref(), Some("Half Done"));
        assert_eq!(content.ingredients_text.as_deref(), Some("3 eggs\n1 cup milk"));
        assert_eq!(content.instructions_text, None);
    }

    #[test]
    fn test_malformed_json_ld_falls_back_to_selectors() {
        let html = r#"
            <html>
            <head>
                <title>Fallback Soup</title>
                <script type="application/ld+json">{"broken": </script>
            </head>
            <body>
                <ul class="recipe-ingredients"><li>1 onion</li></ul>
                <div class="directions"><p>Chop the onion.</p></div>
            </body>
            </html>
        "#;

        let content = extract_recipe_content(html);

        assert_eq!(content.title.as_deref(), Some("Fallback Soup"));
        assert_eq!(content.ingredients_text.as_deref(), Some("1 onion"));
        assert_eq!(content.instructions_text.as_deref(), Some("Chop the onion."));
    }

    #[test]
    fn test_page_without_recipe_markup_never_fails() {
        let html = "<html><head><title>Just a Blog Post</title></head><body><p>Hello</p></body></html>";

        let content = extract_recipe_content(html);

        assert_eq!(content.title.as_deref(), Some("Just a Blog Post"));
        assert_eq!(content.ingredients_text, None);
        assert_eq!(content.instructions_text, None);
        assert_eq!(content.recipe_yield_text, None);
    }
}
