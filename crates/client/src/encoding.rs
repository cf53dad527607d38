//! Charset detection and resolution for fetched documents.
//!
//! Pages are fetched as raw bytes and may declare their own charset in a
//! `<meta http-equiv="Content-Type" ...>` tag. Detection decodes the bytes
//! once with the default single-byte encoding, which maps every byte to some
//! character and is therefore good enough to locate the declaration.

use std::sync::LazyLock;

use encoding_rs::{Encoding, WINDOWS_1252};
use regex::Regex;

/// Default encoding: used for charset sniffing and as the fallback when a
/// page declares no charset or an unrecognized one.
pub static DEFAULT_ENCODING: &Encoding = WINDOWS_1252;

/// Matches `<meta http-equiv="Content-Type" content="text/html; charset=utf-8">`.
static CHARSET_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<meta\s+http-equiv\s*=\s*["'\s]?Content-Type\b.*?charset\s*=\s*([^"'\s>]*)"#)
        .expect("charset pattern is valid")
});

/// Scan raw document bytes for a declared charset name.
///
/// Returns the name exactly as written in the document, without checking
/// whether it resolves to a known encoding.
pub fn detect_declared_charset(content: &[u8]) -> Option<String> {
    if content.is_empty() {
        return None;
    }

    let (text, _, _) = DEFAULT_ENCODING.decode(content);
    CHARSET_PATTERN.captures(&text).map(|caps| caps[1].to_string())
}

/// Resolve a declared charset name to a concrete encoding.
///
/// An unrecognized or missing name falls back to [`DEFAULT_ENCODING`] with
/// a logged warning; this never fails.
pub fn resolve_encoding(label: Option<&str>) -> &'static Encoding {
    let label = match label {
        Some(l) if !l.is_empty() => l,
        _ => return DEFAULT_ENCODING,
    };

    match Encoding::for_label(label.as_bytes()) {
        Some(encoding) => encoding,
        None => {
            tracing::warn!(
                label,
                fallback = DEFAULT_ENCODING.name(),
                "unsupported encoding label, falling back to default"
            );
            DEFAULT_ENCODING
        }
    }
}
