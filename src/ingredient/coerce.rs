//! Coercion of heterogeneous ingredient data into the canonical model.
//!
//! The upstream model call returns loosely-shaped JSON: plain strings,
//! partial objects, grouped or ungrouped lists, and the occasional null.
//! Everything that can be fit into [`StructuredIngredient`] is; everything
//! else is dropped, with a warning for shapes that look like bugs. The
//! caller always receives a valid (possibly shorter) list, never a partial
//! or corrupt entry.

use log::warn;
use serde_json::Value;

use super::parser::parse_ingredient_line;
use crate::model::{Coerced, IngredientGroup, StructuredIngredient, Substitution};

/// Coerces a JSON array of strings and/or partial objects into structured
/// ingredients. Non-array input yields an empty list.
///
/// Idempotent on already-canonical input: serialized [`StructuredIngredient`]
/// objects pass through unchanged.
pub fn coerce_ingredients(items: &Value) -> Coerced<Vec<StructuredIngredient>> {
    let mut warnings = Vec::new();
    let value = coerce_item_array(items, &mut warnings);
    Coerced { value, warnings }
}

/// Coerces a JSON array of `{name, ingredients}` group objects. A missing or
/// empty group name defaults to `"Main"`; groups whose ingredient list is
/// empty after item coercion are dropped.
pub fn coerce_groups(groups: &Value) -> Coerced<Vec<IngredientGroup>> {
    let mut warnings = Vec::new();
    let mut out = Vec::new();

    let Some(array) = groups.as_array() else {
        return Coerced {
            value: out,
            warnings,
        };
    };

    for group in array {
        match group {
            Value::Null => {}
            Value::Object(fields) => {
                let name = fields
                    .get("name")
                    .and_then(Value::as_str)
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .unwrap_or("Main");
                let ingredients =
                    coerce_item_array(fields.get("ingredients").unwrap_or(&Value::Null), &mut warnings);
                if !ingredients.is_empty() {
                    out.push(IngredientGroup {
                        name: name.to_string(),
                        ingredients,
                    });
                }
            }
            other => {
                let message = format!("Dropped non-object ingredient group: {other}");
                warn!("{message}");
                warnings.push(message);
            }
        }
    }

    Coerced {
        value: out,
        warnings,
    }
}

fn coerce_item_array(items: &Value, warnings: &mut Vec<String>) -> Vec<StructuredIngredient> {
    let Some(array) = items.as_array() else {
        return Vec::new();
    };
    array
        .iter()
        .filter_map(|item| coerce_item(item, warnings))
        .collect()
}

fn coerce_item(item: &Value, warnings: &mut Vec<String>) -> Option<StructuredIngredient> {
    match item {
        // Nulls and empty strings are expected noise, dropped silently.
        Value::Null => None,
        Value::String(line) => {
            let line = line.trim();
            if line.is_empty() {
                return None;
            }
            let parsed = parse_ingredient_line(line);
            Some(StructuredIngredient {
                name: parsed.name,
                amount: parsed.amount,
                unit: parsed.unit,
                preparation: parsed.preparation,
                suggested_substitutions: None,
            })
        }
        Value::Object(fields) => {
            let name = fields
                .get("name")
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|name| !name.is_empty());
            match name {
                Some(name) => Some(StructuredIngredient {
                    name: name.to_string(),
                    amount: text_field(fields, "amount"),
                    unit: text_field(fields, "unit"),
                    preparation: text_field(fields, "preparation"),
                    suggested_substitutions: substitutions_field(fields, warnings),
                }),
                None => {
                    let message = format!("Dropped ingredient object without a name: {item}");
                    warn!("{message}");
                    warnings.push(message);
                    None
                }
            }
        }
        other => {
            let message = format!("Dropped unrecognized ingredient item: {other}");
            warn!("{message}");
            warnings.push(message);
            None
        }
    }
}

/// Reads an optional text field, stringifying bare numbers ("amount": 2)
/// that the model sometimes emits.
fn text_field(fields: &serde_json::Map<String, Value>, key: &str) -> Option<String> {
    match fields.get(key) {
        Some(Value::String(text)) => {
            let text = text.trim();
            (!text.is_empty()).then(|| text.to_string())
        }
        Some(Value::Number(number)) => Some(number.to_string()),
        _ => None,
    }
}

/// `suggested_substitutions` is kept only when it is already an array;
/// entries that fail to deserialize are dropped with a warning.
fn substitutions_field(
    fields: &serde_json::Map<String, Value>,
    warnings: &mut Vec<String>,
) -> Option<Vec<Substitution>> {
    let array = fields.get("suggested_substitutions")?.as_array()?;
    let subs = array
        .iter()
        .filter_map(|entry| match serde_json::from_value::<Substitution>(entry.clone()) {
            Ok(sub) => Some(sub),
            Err(err) => {
                let message = format!("Dropped malformed substitution ({err}): {entry}");
                warn!("{message}");
                warnings.push(message);
                None
            }
        })
        .collect();
    Some(subs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_strings_are_parsed_and_nulls_dropped() {
        let input = json!(["1 cup rice", null, "", "2 large eggs"]);
        let coerced = coerce_ingredients(&input);

        assert_eq!(coerced.value.len(), 2);
        assert_eq!(coerced.value[0].name, "rice");
        assert_eq!(coerced.value[0].amount.as_deref(), Some("1"));
        assert_eq!(coerced.value[0].unit.as_deref(), Some("cup"));
        assert_eq!(coerced.value[1].name, "large eggs");
        assert!(coerced.warnings.is_empty());
    }

    #[test]
    fn test_objects_default_missing_fields_to_null() {
        let input = json!([{"name": "butter"}]);
        let coerced = coerce_ingredients(&input);

        assert_eq!(
            coerced.value,
            vec![StructuredIngredient::named("butter")]
        );
    }

    #[test]
    fn test_nameless_objects_and_junk_are_dropped_with_warning() {
        let input = json!([{"amount": "1", "unit": "cup"}, 42, true]);
        let coerced = coerce_ingredients(&input);

        assert!(coerced.value.is_empty());
        assert_eq!(coerced.warnings.len(), 3);
    }

    #[test]
    fn test_numeric_amount_is_stringified() {
        let input = json!([{"name": "sugar", "amount": 2, "unit": "tbsp"}]);
        let coerced = coerce_ingredients(&input);

        assert_eq!(coerced.value[0].amount.as_deref(), Some("2"));
    }

    #[test]
    fn test_substitutions_kept_only_when_array() {
        let input = json!([
            {"name": "flour", "suggested_substitutions": [
                {"name": "almond flour", "amount": "1", "unit": "cup", "description": null}
            ]},
            {"name": "milk", "suggested_substitutions": "oat milk"}
        ]);
        let coerced = coerce_ingredients(&input);

        let subs = coerced.value[0].suggested_substitutions.as_ref().unwrap();
        assert_eq!(subs.len(), 1);
        assert_eq!(subs[0].name, "almond flour");
        assert_eq!(coerced.value[1].suggested_substitutions, None);
    }

    #[test]
    fn test_group_coercion_drops_empty_groups_and_defaults_name() {
        let input = json!([
            {"name": "Sauce", "ingredients": []},
            {"name": "Main", "ingredients": ["1 cup rice"]},
            {"ingredients": ["2 tbsp soy sauce"]}
        ]);
        let coerced = coerce_groups(&input);

        assert_eq!(coerced.value.len(), 2);
        assert_eq!(coerced.value[0].name, "Main");
        assert_eq!(coerced.value[0].ingredients.len(), 1);
        assert_eq!(coerced.value[0].ingredients[0].name, "rice");
        assert_eq!(coerced.value[1].name, "Main");
        assert_eq!(coerced.value[1].ingredients[0].unit.as_deref(), Some("tbsp"));
    }

    #[test]
    fn test_idempotent_on_canonical_input() {
        let input = json!(["1 1/2 cups flour, sifted", {"name": "salt", "amount": null}]);
        let once = coerce_ingredients(&input);
        let reserialized = serde_json::to_value(&once.value).unwrap();
        let twice = coerce_ingredients(&reserialized);

        assert_eq!(once.value, twice.value);
        assert!(twice.warnings.is_empty());
    }

    #[test]
    fn test_non_array_input_yields_empty_list() {
        assert!(coerce_ingredients(&Value::Null).value.is_empty());
        assert!(coerce_groups(&json!("not an array")).value.is_empty());
    }
}
