//! Textual link rewriting and header insertion.
//!
//! Rewriting runs over the untouched source text, not a re-serialized parse
//! tree: the tolerant parser may normalize case or whitespace, and the
//! output must stay byte-faithful outside the rewritten links. Each
//! collected link is replaced wherever it appears wrapped in double quotes,
//! single quotes, or a CSS `url(...)` pair. An identical literal elsewhere
//! in the document (visible text included) is rewritten too; that is a
//! documented limitation of textual substitution.

use std::sync::LazyLock;

use regex::{NoExpand, Regex};

/// Matches every opening `<head...>` tag.
static HEAD_TAG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?im)(<head[^>]*>)").expect("head tag pattern is valid"));

/// Replace every collected relative link in `html` with its absolute form.
///
/// Links starting with `/` are resolved against the base URL's origin
/// (trailing slash stripped); all others against the base URL with exactly
/// one trailing slash. An empty base URL disables rewriting.
pub fn rewrite_links(html: &str, links: &[String], base_url: &str) -> String {
    if base_url.is_empty() {
        return html.to_string();
    }

    let base_origin = base_url.trim_end_matches('/');
    let base_with_slash = format!("{base_origin}/");

    let mut html = html.to_string();

    for link in links {
        if link.is_empty() {
            continue;
        }

        let prefix = if link.starts_with('/') { base_origin } else { base_with_slash.as_str() };
        let absolute = format!("{prefix}{link}");
        let escaped = regex::escape(link);

        let forms = [
            (format!(r#"(?im)"{escaped}""#), format!(r#""{absolute}""#)),
            (format!("(?im)'{escaped}'"), format!("'{absolute}'")),
            // Style url(...) wrappers.
            (format!(r"(?im)\(\s*{escaped}\s*\)"), format!("({absolute})")),
        ];

        for (pattern, replacement) in forms {
            let re = Regex::new(&pattern).expect("escaped link pattern is valid");
            html = re.replace_all(&html, NoExpand(&replacement)).into_owned();
        }
    }

    html
}

/// Insert `header` right after every opening head tag.
///
/// No-op for an empty header. A malformed document with more than one head
/// tag receives the header more than once; that behavior is kept as is.
pub fn insert_header(html: &str, header: &str) -> String {
    if header.is_empty() {
        return html.to_string();
    }

    HEAD_TAG_PATTERN
        .replace_all(html, |caps: &regex::Captures| format!("{}\n{}\n", &caps[1], header))
        .into_owned()
}
