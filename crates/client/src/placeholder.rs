//! Placeholder location and document splitting.
//!
//! A placeholder is an on-page marker of the form `##name##` or
//! `##name(param)##` denoting the point where externally generated content
//! gets spliced in.

use regex::Regex;
use serde::Serialize;

/// A document split at its placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SplitDocument {
    /// Text before the placeholder; the whole document when absent.
    pub html_before: String,
    /// Text after the placeholder; empty when absent.
    pub html_after: String,
    /// Trimmed content of the optional `(...)` group, when non-empty.
    pub parameters: Option<String>,
}

/// Split `html` at the first occurrence of the named placeholder.
///
/// The name is normalized by trimming whitespace and surrounding `#`
/// characters, so `"guestbook"`, `"##guestbook##"` and `" #guestbook# "`
/// address the same marker. The name match itself is case-sensitive.
pub fn split_at_placeholder(html: &str, placeholder: &str) -> SplitDocument {
    let name = placeholder.trim().trim_matches('#').trim();
    let pattern = format!(r"##{}(\([^)]*\))?##", regex::escape(name));
    let re = Regex::new(&pattern).expect("placeholder pattern is valid");

    match re.captures(html) {
        Some(caps) => {
            let whole = caps.get(0).expect("group 0 always present");

            let parameters = caps.get(1).and_then(|group| {
                let inner = group.as_str().trim().trim_matches(|c| c == '(' || c == ')').trim();
                if inner.is_empty() { None } else { Some(inner.to_string()) }
            });

            SplitDocument {
                html_before: html[..whole.start()].to_string(),
                html_after: html[whole.end()..].to_string(),
                parameters,
            }
        }
        None => SplitDocument { html_before: html.to_string(), html_after: String::new(), parameters: None },
    }
}
