//! Table of link-bearing HTML elements.
//!
//! Tag-to-attribute mapping taken from the Perl HTML::Tagset module's
//! `%linkElements` hash.

/// Lower-cased tag name to the attribute names that carry URLs.
pub static LINK_ELEMENTS: &[(&str, &[&str])] = &[
    ("a", &["href"]),
    ("applet", &["archive", "codebase", "code"]),
    ("area", &["href"]),
    ("base", &["href"]),
    ("bgsound", &["src"]),
    ("blockquote", &["cite"]),
    ("body", &["background"]),
    ("del", &["cite"]),
    ("embed", &["pluginspage", "src"]),
    ("form", &["action"]),
    ("frame", &["src", "longdesc"]),
    ("iframe", &["src", "longdesc"]),
    ("ilayer", &["background"]),
    ("img", &["src", "lowsrc", "longdesc", "usemap"]),
    ("input", &["src", "usemap"]),
    ("ins", &["cite"]),
    ("isindex", &["action"]),
    ("head", &["profile"]),
    ("layer", &["background", "src"]),
    ("link", &["href"]),
    ("object", &["classid", "codebase", "data", "archive", "usemap"]),
    ("q", &["cite"]),
    ("script", &["src", "for"]),
    ("table", &["background"]),
    ("td", &["background"]),
    ("th", &["background"]),
    ("tr", &["background"]),
    ("xmp", &["href"]),
];

/// Look up the registered link attributes for a tag, by lower-cased name.
pub fn link_attributes(tag: &str) -> Option<&'static [&'static str]> {
    let tag = tag.to_ascii_lowercase();
    LINK_ELEMENTS.iter().find(|(name, _)| *name == tag).map(|(_, attrs)| *attrs)
}
