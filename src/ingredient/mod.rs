//! Ingredient parsing, coercion and edit reconciliation.

mod changes;
mod coerce;
mod parser;
mod units;

pub use changes::{
    encode_display_name, parse_display_name, reconcile, resolve_original_name, DisplayIngredient,
    DisplayName, EditState,
};
pub use coerce::{coerce_groups, coerce_ingredients};
pub use parser::{parse_ingredient_line, parse_ingredient_line_with, ParsedIngredient};
pub use units::UnitTable;
