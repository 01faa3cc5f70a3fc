//! Single-line ingredient parsing.
//!
//! Turns a free-text line like "1 1/2 cups flour, sifted" into separate
//! amount/unit/name/preparation fields. The grammar is ambiguous, so the
//! parser tries an ordered list of amount patterns and refuses to guess when
//! no amount is present at all: free-form entries like "fresh cilantro for
//! garnish" pass through as-is rather than being mangled.

use lazy_static::lazy_static;
use regex::Regex;

use super::units::UnitTable;

/// The decomposed form of one ingredient line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedIngredient {
    pub amount: Option<String>,
    pub unit: Option<String>,
    pub name: String,
    pub preparation: Option<String>,
}

lazy_static! {
    // Ordered amount patterns, first match wins. Each requires whitespace or
    // end-of-input after the match so "1-2" never half-matches as "1".
    static ref MIXED_FRACTION_RE: Regex = Regex::new(r"^(\d+\s+\d+/\d+)(\s+|$)").unwrap();
    static ref FRACTION_RE: Regex = Regex::new(r"^(\d+/\d+)(\s+|$)").unwrap();
    static ref DECIMAL_RE: Regex = Regex::new(r"^(\d+\.\d+)(\s+|$)").unwrap();
    static ref RANGE_RE: Regex =
        Regex::new(r"^(\d+(?:\.\d+)?(?:\s*[-–]\s*|\s+to\s+)\d+(?:\.\d+)?)(\s+|$)").unwrap();
    static ref WHOLE_RE: Regex = Regex::new(r"^(\d+)(\s+|$)").unwrap();
    static ref APPROX_RE: Regex =
        Regex::new(r"(?i)^(?:about|approximately|approx\.?|around)\s+").unwrap();
    static ref VAGUE_RE: Regex =
        Regex::new(r"(?i)^(?:a\s+pinch\s+of|a\s+dash\s+of|a\s+splash\s+of|a\s+handful\s+of|some)\s+")
            .unwrap();
    static ref OF_PREFIX_RE: Regex = Regex::new(r"(?i)^of\s+").unwrap();
}

/// Parses one ingredient line with the standard unit table.
pub fn parse_ingredient_line(line: &str) -> ParsedIngredient {
    parse_ingredient_line_with(line, UnitTable::standard())
}

/// Parses one ingredient line against a caller-supplied unit table.
pub fn parse_ingredient_line_with(line: &str, table: &UnitTable) -> ParsedIngredient {
    let trimmed = line.trim();

    // Everything after the first comma is preparation ("sifted", "at room
    // temperature"), never part of the name.
    let (main, preparation) = match trimmed.split_once(',') {
        Some((clause, rest)) => {
            let rest = rest.trim();
            let prep = (!rest.is_empty()).then(|| rest.to_string());
            (clause.trim(), prep)
        }
        None => (trimmed, None),
    };

    let normalized = normalize_vulgar_fractions(main);
    match match_amount(&normalized) {
        Some((amount, rest)) => {
            let (unit, name) = match_unit(rest, table);
            ParsedIngredient {
                amount: Some(amount),
                unit,
                name,
                preparation,
            }
        }
        // No numeric amount and no vague-quantity phrase: keep the whole
        // clause untouched as the name.
        None => ParsedIngredient {
            amount: None,
            unit: None,
            name: main.to_string(),
            preparation,
        },
    }
}

/// Rewrites unicode vulgar fractions to their ASCII form ("1½" -> "1 1/2")
/// so the amount patterns only have to deal with one spelling.
fn normalize_vulgar_fractions(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match vulgar_fraction(ch) {
            Some(ascii) => {
                if out.ends_with(|c: char| c.is_ascii_digit()) {
                    out.push(' ');
                }
                out.push_str(ascii);
            }
            None => out.push(ch),
        }
    }
    out
}

fn vulgar_fraction(ch: char) -> Option<&'static str> {
    match ch {
        '½' => Some("1/2"),
        '⅓' => Some("1/3"),
        '⅔' => Some("2/3"),
        '¼' => Some("1/4"),
        '¾' => Some("3/4"),
        '⅕' => Some("1/5"),
        '⅖' => Some("2/5"),
        '⅗' => Some("3/5"),
        '⅘' => Some("4/5"),
        '⅙' => Some("1/6"),
        '⅚' => Some("5/6"),
        '⅛' => Some("1/8"),
        '⅜' => Some("3/8"),
        '⅝' => Some("5/8"),
        '⅞' => Some("7/8"),
        _ => None,
    }
}

/// Matches a leading amount and returns it plus the unconsumed remainder.
fn match_amount(text: &str) -> Option<(String, &str)> {
    if let Some(result) = match_numeric_amount(text) {
        return Some(result);
    }

    // "about 1 cup": consume the hedge word, then require a numeric amount.
    if let Some(m) = APPROX_RE.find(text) {
        if let Some(result) = match_numeric_amount(&text[m.end()..]) {
            return Some(result);
        }
    }

    // Vague quantities normalize to the placeholder "1": present but
    // uncountable.
    if let Some(m) = VAGUE_RE.find(text) {
        return Some(("1".to_string(), text[m.end()..].trim_start()));
    }

    None
}

fn match_numeric_amount(text: &str) -> Option<(String, &str)> {
    let patterns = [
        &*MIXED_FRACTION_RE,
        &*FRACTION_RE,
        &*DECIMAL_RE,
        &*RANGE_RE,
        &*WHOLE_RE,
    ];
    for pattern in patterns {
        if let Some(caps) = pattern.captures(text) {
            let amount = caps.get(1).unwrap().as_str().to_string();
            let rest = text[caps.get(0).unwrap().end()..].trim_start();
            return Some((amount, rest));
        }
    }
    None
}

/// Matches a canonical unit token immediately after the amount. Descriptor
/// words are pushed back into the name; a lone "of" after a recognized unit
/// is consumed ("1 cup of flour" -> "flour").
fn match_unit(rest: &str, table: &UnitTable) -> (Option<String>, String) {
    let mut tokens = rest.splitn(2, char::is_whitespace);
    let first = tokens.next().unwrap_or("");
    let remainder = tokens.next().unwrap_or("");

    if first.is_empty() || table.is_descriptor(first) {
        return (None, rest.trim().to_string());
    }

    match table.canonical_unit(first) {
        Some(canonical) => {
            let name = remainder.trim_start();
            let name = match OF_PREFIX_RE.find(name) {
                Some(m) => &name[m.end()..],
                None => name,
            };
            (Some(canonical.to_string()), name.trim().to_string())
        }
        None => (None, rest.trim().to_string()),
    }
}
