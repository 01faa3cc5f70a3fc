use serde::{Deserialize, Serialize};

/// An ingredient decomposed into separate quantity/unit/name/preparation
/// fields, as opposed to a single free-text line.
///
/// `name` never carries quantity or unit text once parsed. If `amount` and
/// `unit` are both `None` the ingredient is quantity-less ("to taste",
/// descriptive) and still carries a non-empty `name`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuredIngredient {
    pub name: String,
    #[serde(default)]
    pub amount: Option<String>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub preparation: Option<String>,
    #[serde(default)]
    pub suggested_substitutions: Option<Vec<Substitution>>,
}

impl StructuredIngredient {
    /// A bare ingredient with only a name, everything else unset.
    pub fn named(name: impl Into<String>) -> Self {
        StructuredIngredient {
            name: name.into(),
            amount: None,
            unit: None,
            preparation: None,
            suggested_substitutions: None,
        }
    }
}

/// A suggested replacement for one ingredient. Attached to exactly one
/// [`StructuredIngredient`], never shared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Substitution {
    pub name: String,
    #[serde(default)]
    pub amount: Option<AmountValue>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Substitution amounts arrive from upstream JSON as either a string
/// ("1 1/2") or a bare number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AmountValue {
    Text(String),
    Number(f64),
}

/// An ordered, named partition of a recipe's ingredients (e.g. "Main",
/// "Sauce"). A recipe with one implicit group is a single-element vec.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientGroup {
    pub name: String,
    pub ingredients: Vec<StructuredIngredient>,
}

/// A recorded user edit against an ingredient, keyed by its original name.
///
/// `to == None` denotes removal; `to` non-null denotes substitution. The log
/// is append-style and matched by name, not position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppliedChange {
    pub from: String,
    pub to: Option<StructuredIngredient>,
}

/// Text sections pulled out of a recipe page, handed to the downstream
/// prompt-building step. Intermediate only, never persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExtractedContent {
    pub title: Option<String>,
    pub ingredients_text: Option<String>,
    pub instructions_text: Option<String>,
    pub recipe_yield_text: Option<String>,
}

impl ExtractedContent {
    /// True once every field is populated; extraction tiers stop early when
    /// this holds.
    pub fn is_complete(&self) -> bool {
        self.title.is_some()
            && self.ingredients_text.is_some()
            && self.instructions_text.is_some()
            && self.recipe_yield_text.is_some()
    }

    /// Fill only the fields still unset from `other`, leaving populated
    /// fields untouched. Higher-confidence tiers always run first, so a
    /// later tier can never overwrite an earlier one.
    pub fn merge_missing(mut self, other: ExtractedContent) -> ExtractedContent {
        if self.title.is_none() {
            self.title = other.title;
        }
        if self.ingredients_text.is_none() {
            self.ingredients_text = other.ingredients_text;
        }
        if self.instructions_text.is_none() {
            self.instructions_text = other.instructions_text;
        }
        if self.recipe_yield_text.is_none() {
            self.recipe_yield_text = other.recipe_yield_text;
        }
        self
    }
}

/// A value plus the non-fatal warnings accumulated while producing it.
///
/// The coercion layer never fails outright: items it cannot fit into the
/// data model are dropped and noted here, so callers can log or surface
/// partial-failure diagnostics without exceptions disrupting the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct Coerced<T> {
    pub value: T,
    pub warnings: Vec<String>,
}

impl<T> Coerced<T> {
    pub fn clean(value: T) -> Self {
        Coerced {
            value,
            warnings: Vec::new(),
        }
    }
}
