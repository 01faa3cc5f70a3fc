//! URL canonicalization for cache/lookup keys.
//!
//! Two URLs pointing at the same recipe page should always map to the same
//! key, regardless of tracking parameters, fragments, `www.` prefixes or
//! parameter order the share-sheet tacked on.

use std::collections::HashSet;

use lazy_static::lazy_static;
use log::warn;
use url::{form_urlencoded, Url};

use crate::error::IngestError;

lazy_static! {
    /// Query parameters that never affect page identity: UTM campaign tags,
    /// click IDs, affiliate tags and analytics cookies.
    static ref TRACKING_PARAMS: HashSet<&'static str> = [
        "gclid",
        "gclsrc",
        "dclid",
        "fbclid",
        "msclkid",
        "twclid",
        "yclid",
        "igshid",
        "mc_cid",
        "mc_eid",
        "mkt_tok",
        "ref",
        "ref_src",
        "referrer",
        "aff_id",
        "affiliate_id",
        "afftrack",
        "_ga",
        "_gl",
        "_hsenc",
        "_hsmi",
        "vero_id",
        "oly_anon_id",
        "oly_enc_id",
        "s_cid",
        "wickedid",
    ]
    .into_iter()
    .collect();
}

fn is_tracking_param(key: &str) -> bool {
    let key = key.to_ascii_lowercase();
    key.starts_with("utm_") || TRACKING_PARAMS.contains(key.as_str())
}

/// Deterministically maps a raw URL string to the canonical form used as a
/// cache key.
///
/// Missing schemes default to `https`, the host is lowercased and stripped
/// of a leading `www.`, the fragment and known tracking parameters are
/// removed, remaining query parameters are sorted by key, and a single
/// trailing slash is dropped unless the path is exactly `/`.
///
/// If the input cannot be parsed as a URL at all, a best-effort cleanup is
/// returned instead of an error: canonicalization must always produce some
/// deterministic string. The only failure is an empty input.
pub fn normalize_url(raw: &str) -> Result<String, IngestError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(IngestError::InvalidInput(
            "URL must be a non-empty string".to_string(),
        ));
    }

    // Protocol-relative first, then bare host/path.
    let with_scheme = if let Some(rest) = trimmed.strip_prefix("//") {
        format!("https://{rest}")
    } else if !trimmed.contains("://") {
        format!("https://{trimmed}")
    } else {
        trimmed.to_string()
    };

    match Url::parse(&with_scheme) {
        Ok(url) if url.has_host() => Ok(canonicalize(url)),
        _ => {
            warn!("Could not parse URL, falling back to best-effort cleanup: {raw}");
            Ok(best_effort_cleanup(&with_scheme))
        }
    }
}

fn canonicalize(mut url: Url) -> String {
    url.set_fragment(None);

    // The url crate already lowercases the host and drops default ports
    // (:443 on https, :80 on http) during parsing.
    if let Some(host) = url.host_str() {
        if let Some(bare) = host.strip_prefix("www.") {
            if !bare.is_empty() {
                let bare = bare.to_string();
                let _ = url.set_host(Some(&bare));
            }
        }
    }

    let mut pairs: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| !is_tracking_param(key))
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();
    if pairs.is_empty() {
        url.set_query(None);
    } else {
        // Stable sort keeps each repeated key's value list in original order.
        pairs.sort_by(|a, b| a.0.cmp(&b.0));
        let query = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(pairs)
            .finish();
        url.set_query(Some(&query));
    }

    // Strip one trailing slash, but only when the result would not still
    // end in one: "/a//" is left alone so canonicalization stays a
    // projection.
    let path = url.path().to_string();
    if let Some(stripped) = path.strip_suffix('/') {
        if !stripped.is_empty() && !stripped.ends_with('/') {
            url.set_path(stripped);
        }
    }

    url.to_string()
}

/// Degraded cleanup for input the URL parser rejects: strip the fragment,
/// drop one trailing slash and lowercase. Deterministic, never fails.
fn best_effort_cleanup(raw: &str) -> String {
    let without_fragment = raw.split('#').next().unwrap_or(raw);
    let without_slash = without_fragment
        .strip_suffix('/')
        .unwrap_or(without_fragment);
    without_slash.to_lowercase()
}

/// True when both inputs canonicalize to the same string. Any normalization
/// failure counts as non-equivalence.
pub fn urls_equivalent(a: &str, b: &str) -> bool {
    match (normalize_url(a), normalize_url(b)) {
        (Ok(left), Ok(right)) => left == right,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adds_https_scheme() {
        assert_eq!(
            normalize_url("example.com/recipe").unwrap(),
            "https://example.com/recipe"
        );
        assert_eq!(
            normalize_url("//example.com/recipe").unwrap(),
            "https://example.com/recipe"
        );
    }

    #[test]
    fn test_lowercases_host_and_strips_www() {
        assert_eq!(
            normalize_url("https://WWW.Example.COM/Recipe").unwrap(),
            "https://example.com/Recipe"
        );
    }

    #[test]
    fn test_removes_fragment_and_default_port() {
        assert_eq!(
            normalize_url("https://example.com:443/recipe#comments").unwrap(),
            "https://example.com/recipe"
        );
        assert_eq!(
            normalize_url("http://example.com:80/recipe").unwrap(),
            "http://example.com/recipe"
        );
    }

    #[test]
    fn test_strips_tracking_params() {
        let url = "https://example.com/r?utm_source=x&utm_medium=y&fbclid=abc&gclid=1&page=2";
        assert_eq!(normalize_url(url).unwrap(), "https://example.com/r?page=2");
    }

    #[test]
    fn test_sorts_query_params_stably() {
        assert_eq!(
            normalize_url("https://example.com/r?b=2&a=1&b=1").unwrap(),
            "https://example.com/r?a=1&b=2&b=1"
        );
    }

    #[test]
    fn test_strips_single_trailing_slash() {
        assert_eq!(
            normalize_url("https://example.com/recipe/").unwrap(),
            "https://example.com/recipe"
        );
        // A bare host keeps its root path.
        assert_eq!(
            normalize_url("https://example.com/").unwrap(),
            "https://example.com/"
        );
        // Doubled slashes stay put: stripping one would leave a trailing
        // slash and make a second normalization pass differ from the first.
        let doubled = normalize_url("https://example.com/recipe//").unwrap();
        assert_eq!(doubled, "https://example.com/recipe//");
        assert_eq!(normalize_url(&doubled).unwrap(), doubled);
    }

    #[test]
    fn test_idempotent() {
        let inputs = [
            "Example.com/Recipes/Pasta/?utm_source=share&b=2&a=1#step-3",
            "//www.example.com:443/r?fbclid=x",
            "https://example.com/a%20b?q=hello world",
        ];
        for input in inputs {
            let once = normalize_url(input).unwrap();
            let twice = normalize_url(&once).unwrap();
            assert_eq!(once, twice, "normalization not idempotent for {input}");
        }
    }

    #[test]
    fn test_unparseable_input_degrades() {
        // Spaces in the host position make the parse fail; cleanup still
        // yields a deterministic string.
        let out = normalize_url("not a real url/#frag").unwrap();
        assert_eq!(out, "https://not a real url");
    }

    #[test]
    fn test_empty_input_is_an_error() {
        assert!(matches!(
            normalize_url("   "),
            Err(IngestError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_equivalence() {
        assert!(urls_equivalent(
            "https://www.example.com/recipe?utm_source=mail",
            "example.com/recipe/"
        ));
        assert!(!urls_equivalent(
            "https://example.com/recipe",
            "https://example.com/other"
        ));
        assert!(!urls_equivalent("", "https://example.com"));
    }
}
