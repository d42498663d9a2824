//! URL validation and normalization.
//!
//! Normalization only fills in a missing scheme; everything else (path case,
//! trailing slashes, query order) is preserved exactly as submitted.

use regex::Regex;
use std::sync::LazyLock;
use url::Url;

/// Scheme prepended to inputs that carry neither `http://` nor `https://`.
const DEFAULT_SCHEME_PREFIX: &str = "https://";

/// Host heuristic: dot-separated labels ending in a 2-6 letter final label.
static DOMAIN_HOST_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[0-9a-z.-]+\.[a-z]{2,6}$").expect("domain host regex is valid")
});

/// Normalizes a URL by trimming whitespace and adding `https://` if no
/// `http://` or `https://` prefix is present.
///
/// Empty input normalizes to an empty string.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(normalize_url("  example.com "), "https://example.com");
/// assert_eq!(normalize_url("http://example.com/Path/"), "http://example.com/Path/");
/// assert_eq!(normalize_url(""), "");
/// ```
pub fn normalize_url(input: &str) -> String {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return String::new();
    }

    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("{DEFAULT_SCHEME_PREFIX}{trimmed}")
    }
}

/// Returns true if `input` is an acceptable URL to shorten.
///
/// # Rules
///
/// After [`normalize_url`], the URL must:
///
/// 1. parse as an absolute `http`/`https` URL with a host, and
/// 2. have a host that looks like a domain name (`example.com`, `a.b.co.uk`);
///    IP literals and single-label hosts such as `localhost` are rejected.
///
/// Both checks must pass.
pub fn validate_url(input: &str) -> bool {
    let normalized = normalize_url(input);
    if normalized.is_empty() {
        return false;
    }

    let Ok(parsed) = Url::parse(&normalized) else {
        return false;
    };

    if !matches!(parsed.scheme(), "http" | "https") {
        return false;
    }

    match parsed.host_str() {
        Some(host) => DOMAIN_HOST_REGEX.is_match(host),
        None => false,
    }
}
