//! Relative link collection from tolerant HTML traversal.
//!
//! The document is scanned as a flat token stream in source order. Element
//! events are matched against the link-bearing element table; comment events
//! are re-tokenized and scanned recursively, because legacy pages hide real
//! markup inside comments. Scanning at the tokenizer level keeps elements
//! that HTML5 tree construction would drop (a `td` outside a table, say) and
//! never fails on malformed input.

mod elements;

use std::sync::LazyLock;

use regex::Regex;

use crate::parse::{MarkupEvent, markup_events};

pub use elements::{LINK_ELEMENTS, link_attributes};

/// Comment re-scans deeper than this are skipped; links found so far are
/// kept.
const MAX_COMMENT_DEPTH: usize = 50;

/// Matches CSS `url(...)` references inside a style attribute value.
static STYLE_URL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)url\s*\(\s*([^)\s]+)\s*\)").expect("style url pattern is valid"));

/// Whether `url` is absolute: contains `:` at a position greater than 0
/// with a syntactically valid scheme name before it.
pub fn is_absolute_url(url: &str) -> bool {
    match url.find(':') {
        Some(pos) if pos > 0 => is_valid_scheme(&url[..pos]),
        _ => false,
    }
}

fn is_valid_scheme(scheme: &str) -> bool {
    let mut chars = scheme.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Collect every relative link in `html`, in document order, duplicates
/// preserved. Links found inside a comment are appended once that comment's
/// sub-scan completes.
pub fn collect_links(html: &str) -> Vec<String> {
    let mut links = Vec::new();
    collect_into(html, 0, &mut links);
    links
}

fn collect_into(html: &str, depth: usize, links: &mut Vec<String>) {
    if depth > MAX_COMMENT_DEPTH {
        tracing::warn!(depth, "comment nesting exceeds scan depth limit, skipping deeper levels");
        return;
    }

    for event in markup_events(html) {
        match event {
            MarkupEvent::Comment(comment) => {
                collect_into(&comment, depth + 1, links);
            }
            MarkupEvent::ElementStart { name, attrs } => match link_attributes(&name) {
                Some(attr_names) => {
                    for (attr_name, attr_value) in &attrs {
                        collect_style_links(attr_name, attr_value, links);

                        for candidate in attr_names {
                            if candidate.eq_ignore_ascii_case(attr_name) && !is_absolute_url(attr_value) {
                                links.push(attr_value.clone());
                            }
                        }
                    }
                }
                None => {
                    // Unregistered tags still get the style scan.
                    for (attr_name, attr_value) in &attrs {
                        collect_style_links(attr_name, attr_value, links);
                    }
                }
            },
        }
    }
}

fn collect_style_links(attribute_name: &str, attribute_value: &str, links: &mut Vec<String>) {
    if !attribute_name.eq_ignore_ascii_case("style") {
        return;
    }

    for caps in STYLE_URL_PATTERN.captures_iter(attribute_value) {
        let url = &caps[1];
        if !is_absolute_url(url) {
            links.push(url.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_absolute_url_classification() {
        assert!(is_absolute_url("http://x"));
        assert!(is_absolute_url("mailto:a@b"));
        assert!(is_absolute_url("a+b-c.d:rest"));
        assert!(!is_absolute_url("/a/b"));
        assert!(!is_absolute_url(":x"));
        assert!(!is_absolute_url("img/x.png"));
        assert!(!is_absolute_url("1http://x"));
        assert!(!is_absolute_url("ht tp://x"));
        assert!(!is_absolute_url(""));
    }

    #[test]
    fn test_collect_anchor_href() {
        let links = collect_links(r#"<a href="page.html">x</a>"#);
        assert_eq!(links, vec!["page.html"]);
    }

    #[test]
    fn test_collect_skips_absolute() {
        let links = collect_links(r#"<a href="http://other.example/page.html">x</a><a href="rel.html">y</a>"#);
        assert_eq!(links, vec!["rel.html"]);
    }

    #[test]
    fn test_collect_img_attributes() {
        let links = collect_links(r##"<img src="a.png" lowsrc="b.png" usemap="#map">"##);
        assert!(links.contains(&"a.png".to_string()));
        assert!(links.contains(&"b.png".to_string()));
        assert!(links.contains(&"#map".to_string()));
    }

    #[test]
    fn test_collect_preserves_duplicates() {
        let links = collect_links(r#"<a href="same.html">1</a><a href="same.html">2</a>"#);
        assert_eq!(links, vec!["same.html", "same.html"]);
    }

    #[test]
    fn test_collect_style_urls_on_unregistered_tag() {
        let links = collect_links(r#"<div style="background: url(bg.png); color: red">x</div>"#);
        assert_eq!(links, vec!["bg.png"]);
    }

    #[test]
    fn test_collect_style_urls_on_link_bearing_tag() {
        // A style attribute on a registered link element is still scanned.
        let links = collect_links(r#"<td background="tile.gif" style="background: url(over.png)">x</td>"#);
        assert!(links.contains(&"tile.gif".to_string()));
        assert!(links.contains(&"over.png".to_string()));
    }

    #[test]
    fn test_collect_table_cell_background_outside_table() {
        // Legacy sliced-image layouts put background on bare table parts; a
        // tree-building parse would discard these tags outside a table.
        let links = collect_links(r#"<tr background="row.gif"><th background="head.gif"><td background="cell.gif">x</td></th></tr>"#);
        assert_eq!(links, vec!["row.gif", "head.gif", "cell.gif"]);
    }

    #[test]
    fn test_collect_table_cell_background_inside_comment() {
        let links = collect_links(r#"<!-- <td background="tile.gif">x</td> -->"#);
        assert_eq!(links, vec!["tile.gif"]);
    }

    #[test]
    fn test_collect_style_skips_absolute_urls() {
        let links = collect_links(r#"<div style="background: url(https://cdn.example/bg.png)">x</div>"#);
        assert!(links.is_empty());
    }

    #[test]
    fn test_collect_inside_comment() {
        let links = collect_links(r#"<p>x</p><!-- <a href="rel.html">hidden</a> -->"#);
        assert_eq!(links, vec!["rel.html"]);
    }

    #[test]
    fn test_collect_inside_nested_comment() {
        let links = collect_links(r#"<!-- <div> <a href="deep.html">x</a> </div> -->"#);
        assert_eq!(links, vec!["deep.html"]);
    }

    #[test]
    fn test_collect_malformed_input_never_panics() {
        let links = collect_links("<a href='unclosed <div <<< &&& <img src=broken.png");
        // Tolerant parsing: no panic, best-effort collection.
        assert!(links.iter().all(|l| !is_absolute_url(l)));
    }

    #[test]
    fn test_collect_document_order() {
        let html = r#"<a href="first.html">1</a><img src="second.png"><a href="third.html">3</a>"#;
        assert_eq!(collect_links(html), vec!["first.html", "second.png", "third.html"]);
    }

    #[test]
    fn test_recursion_depth_is_bounded() {
        // Each level of scanning re-parses the comment body as a fragment,
        // which re-discovers a comment again. Build pathological input that
        // nests comment markers; the scan must terminate and keep what it
        // found.
        let mut html = String::from(r#"<a href="kept.html">x</a>"#);
        for _ in 0..60 {
            html = format!("<!--{html}-->");
        }
        let links = collect_links(&html);
        assert!(links.len() <= 1);
    }
}
