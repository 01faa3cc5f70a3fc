//! Reconciliation of user edits (substitutions, removals) against the
//! canonical ingredient list.
//!
//! The [`AppliedChange`] log is the source of truth. For rendering, each
//! ingredient gets an explicit [`EditState`] plus a display name that embeds
//! the state as text (`"butter (removed)"`, `"almond flour (substituted for
//! flour)"`). The display name is a derived, re-parseable projection: the
//! encoder and [`parse_display_name`] are exact inverses for any name that
//! does not itself contain the literal marker substrings.

use lazy_static::lazy_static;
use regex::Regex;

use crate::model::{AppliedChange, StructuredIngredient};

/// Edit status of one ingredient after overlaying the change log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditState {
    Normal,
    Removed,
    Substituted { original_name: String },
}

/// The result of parsing a display name back into its parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayName {
    pub base_name: String,
    pub is_removed: bool,
    pub substituted_for: Option<String>,
}

/// One ingredient prepared for rendering: the data to show (the substitute
/// when one applies), its edit state, and the encoded display name. The
/// underlying structured data is never edited in place.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayIngredient {
    pub ingredient: StructuredIngredient,
    pub state: EditState,
    pub display_name: String,
}

lazy_static! {
    static ref REMOVED_RE: Regex = Regex::new(r"(?i)^(.*)\s+\(removed\)$").unwrap();
    static ref SUBSTITUTED_RE: Regex =
        Regex::new(r"(?i)^(.*)\s+\(substituted for (.*)\)$").unwrap();
}

/// Parses a display name into its base name and edit markers.
///
/// Known limitation: a real ingredient name that itself ends in the literal
/// text `"(removed)"` or `"(substituted for ...)"` will be misclassified;
/// there is no escaping in the string form. Callers that hold the change log
/// should prefer [`reconcile`] and its [`EditState`], which has no such
/// ambiguity.
pub fn parse_display_name(name: &str) -> DisplayName {
    if let Some(caps) = REMOVED_RE.captures(name) {
        return DisplayName {
            base_name: caps[1].to_string(),
            is_removed: true,
            substituted_for: None,
        };
    }
    if let Some(caps) = SUBSTITUTED_RE.captures(name) {
        return DisplayName {
            base_name: caps[1].to_string(),
            is_removed: false,
            substituted_for: Some(caps[2].to_string()),
        };
    }
    DisplayName {
        base_name: name.to_string(),
        is_removed: false,
        substituted_for: None,
    }
}

/// Encodes a name plus edit state into the display form. Exact inverse of
/// [`parse_display_name`] for non-colliding names.
pub fn encode_display_name(name: &str, state: &EditState) -> String {
    match state {
        EditState::Normal => name.to_string(),
        EditState::Removed => format!("{name} (removed)"),
        EditState::Substituted { original_name } => {
            format!("{name} (substituted for {original_name})")
        }
    }
}

/// Maps an edited display name back to the original ingredient's canonical
/// name, for re-querying against the stored recipe.
///
/// The lookup key is the parsed `substituted_for` (or the base name when the
/// ingredient was not substituted). If some change's `to.name` equals the
/// key, that change's `from` is returned; otherwise the key itself is.
pub fn resolve_original_name(changes: &[AppliedChange], display_name: &str) -> String {
    let parsed = parse_display_name(display_name);
    let key = parsed.substituted_for.unwrap_or(parsed.base_name);

    changes
        .iter()
        .find(|change| {
            change
                .to
                .as_ref()
                .is_some_and(|substitute| substitute.name == key)
        })
        .map(|change| change.from.clone())
        .unwrap_or(key)
}

/// Overlays the change log onto a canonical ingredient list for rendering.
///
/// Changes are matched by original name, order-independently. A removal
/// keeps the original data (struck through in the UI); a substitution swaps
/// in the substitute's data.
pub fn reconcile(
    ingredients: &[StructuredIngredient],
    changes: &[AppliedChange],
) -> Vec<DisplayIngredient> {
    ingredients
        .iter()
        .map(|ingredient| {
            let change = changes.iter().find(|change| change.from == ingredient.name);
            match change {
                None => DisplayIngredient {
                    ingredient: ingredient.clone(),
                    state: EditState::Normal,
                    display_name: ingredient.name.clone(),
                },
                Some(AppliedChange { to: None, .. }) => DisplayIngredient {
                    ingredient: ingredient.clone(),
                    state: EditState::Removed,
                    display_name: encode_display_name(&ingredient.name, &EditState::Removed),
                },
                Some(AppliedChange {
                    to: Some(substitute),
                    from,
                }) => {
                    let state = EditState::Substituted {
                        original_name: from.clone(),
                    };
                    DisplayIngredient {
                        display_name: encode_display_name(&substitute.name, &state),
                        ingredient: substitute.clone(),
                        state,
                    }
                }
            }
        })
        .collect()
}
