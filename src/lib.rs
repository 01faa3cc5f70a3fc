//! Recipe ingestion and normalization core: HTML content extraction,
//! ingredient string parsing, coercion of loosely-shaped upstream JSON,
//! user-edit reconciliation, URL canonicalization and text truncation.
//!
//! Everything here is pure and synchronous; fetching, model calls and
//! storage live with the callers.

pub mod error;
pub mod extract;
pub mod ingredient;
pub mod model;
pub mod text;
pub mod url;

pub use error::IngestError;
pub use extract::extract_recipe_content;
pub use ingredient::{
    coerce_groups, coerce_ingredients, encode_display_name, parse_display_name,
    parse_ingredient_line, reconcile, resolve_original_name, EditState, UnitTable,
};
pub use model::{
    AppliedChange, Coerced, ExtractedContent, IngredientGroup, StructuredIngredient, Substitution,
};
pub use text::{truncate_text_by_lines, truncate_text_by_lines_with, DEFAULT_TRUNCATION_MARKER};
pub use self::url::{normalize_url, urls_equivalent};
