//! Metric naming rules for the Prometheus backend.
//!
//! Backend identifiers allow `[a-zA-Z0-9_]`; span names are free-form, so
//! everything else maps to `_`. Two raw names that sanitize identically
//! share one histogram (accepted collision, not an error).

/// Truncation bound applied to raw span names before mapping.
pub const MAX_NAME_LEN: usize = 100;

/// Sanitize a free-form span name into a backend-safe identifier.
///
/// Empty input stays empty; callers treat an empty result as "no metric".
pub fn sanitize(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }
    let mut s: String = raw
        .chars()
        .take(MAX_NAME_LEN)
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    let first = s.chars().next();
    match first {
        Some(c) if c.is_ascii_digit() => s.insert_str(0, "key_"),
        Some('_') => s.insert_str(0, "key"),
        _ => {}
    }
    s
}

/// Build the registry key for a span name: `namespace_<sanitized>` when a
/// namespace is configured, the sanitized name otherwise.
pub fn metric_name(namespace: &str, span_name: &str) -> String {
    let sanitized = sanitize(span_name);
    if namespace.is_empty() {
        sanitized
    } else {
        format!("{namespace}_{sanitized}")
    }
}

/// Whether a span name looks like a URL path.
///
/// HTTP frameworks emit one span per request path, ID segments included.
/// Recording those would explode metric cardinality, so they are dropped
/// outright.
pub fn is_path_like(name: &str) -> bool {
    name.starts_with('/')
}

/// Whether a configured namespace can prefix metric names without needing
/// sanitization itself. Empty means "no prefix" and is valid.
pub fn is_valid_namespace(ns: &str) -> bool {
    let mut chars = ns.chars();
    match chars.next() {
        None => true,
        Some(c) if !c.is_ascii_alphabetic() => false,
        Some(_) => chars.all(|c| c.is_ascii_alphanumeric() || c == '_'),
    }
}
