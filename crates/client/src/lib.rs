//! Client code for pagesplice.
//!
//! This crate provides the HTTP fetch pipeline, charset handling, link
//! collection and rewriting, and the page grabber that splices fetched
//! documents around a placeholder.

pub mod encoding;
pub mod fetch;
pub mod grabber;
pub mod links;
pub mod parse;
pub mod placeholder;
pub mod rewrite;

pub use encoding::{DEFAULT_ENCODING, detect_declared_charset, resolve_encoding};
pub use fetch::{FetchClient, FetchConfig, PageFetcher};
pub use grabber::{FetchRequest, PageGrabber};
pub use links::{collect_links, is_absolute_url};
pub use placeholder::{SplitDocument, split_at_placeholder};
pub use rewrite::{insert_header, rewrite_links};
