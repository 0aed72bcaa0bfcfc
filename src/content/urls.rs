// URL helpers — canonical form, host extraction, and a naive registrable domain.
//
// All helpers degrade gracefully: an unparsable URL is returned unchanged
// (or as None) rather than surfacing an error to the rule that asked.

use url::Url;

/// Query parameters that only carry campaign attribution.
pub const TRACKING_PARAMS: &[&str] = &[
    "utm_source",
    "utm_medium",
    "utm_campaign",
    "utm_content",
    "utm_term",
    "fbclid",
    "gclid",
];

/// Canonicalize a URL: lowercase host, tracking parameters removed,
/// remaining query parameters sorted by key.
///
/// Returns the input unchanged if it does not parse as an absolute URL.
pub fn normalize_url(url: &str) -> String {
    let Ok(mut parsed) = Url::parse(url) else {
        return url.to_string();
    };

    // Special schemes already lowercase their host; other schemes keep it verbatim.
    if let Some(lower) = parsed.host_str().map(str::to_lowercase) {
        if parsed.host_str() != Some(lower.as_str()) && parsed.set_host(Some(&lower)).is_err() {
            return url.to_string();
        }
    }

    let mut kept: Vec<(String, String)> = parsed
        .query_pairs()
        .filter(|(key, _)| !is_tracking_param(key))
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();
    // Stable: repeated keys keep their relative order.
    kept.sort_by(|a, b| a.0.cmp(&b.0));

    if kept.is_empty() {
        parsed.set_query(None);
    } else {
        parsed.query_pairs_mut().clear().extend_pairs(kept.iter());
    }

    parsed.to_string()
}

fn is_tracking_param(key: &str) -> bool {
    TRACKING_PARAMS.contains(&key)
}

/// Return the host of `url`, or None if it does not parse or has no host.
pub fn extract_domain(url: &str) -> Option<String> {
    Url::parse(url)
        .ok()
        .and_then(|parsed| parsed.host_str().map(str::to_string))
}

/// Approximate the registrable domain as the last two dot-separated labels.
///
/// This is deliberately naive: multi-label public suffixes such as `co.uk`
/// come back as the suffix itself (`a.example.co.uk` yields `co.uk`).
/// Hostnames with fewer than two labels are returned unchanged.
pub fn get_etld_plus_one(hostname: &str) -> String {
    let labels: Vec<&str> = hostname.split('.').collect();
    if labels.len() < 2 {
        return hostname.to_string();
    }
    labels[labels.len() - 2..].join(".")
}
