//! Text helpers for slugs, excerpts and form input.

use url::Url;

/// Lowercase ASCII slug of `value`, runs of other characters collapse into one `-`.
///
/// Returns an empty string when nothing slug-worthy remains.
pub fn slugify(value: &str) -> String {
    let mut slug = String::with_capacity(value.len());
    let mut pending_dash = false;

    for c in value.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else if c.is_whitespace() || c == '-' || c == '_' {
            pending_dash = true;
        }
    }

    slug
}

/// Shortens `content` to at most `max_chars` characters, ending in `…` when cut.
pub fn excerpt(content: &str, max_chars: usize) -> String {
    if content.chars().count() <= max_chars {
        return content.to_string();
    }

    let mut cut: String = content.chars().take(max_chars.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

/// Trimmed value, `None` for blank input.
pub fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Whether `value` parses as an absolute http(s) URL with a host.
pub fn is_http_url(value: &str) -> bool {
    Url::parse(value).is_ok_and(|url| {
        matches!(url.scheme(), "http" | "https") && url.host_str().is_some_and(|h| !h.is_empty())
    })
}
