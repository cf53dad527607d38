//! The fetch/rewrite/split pipeline.
//!
//! [`PageGrabber`] fetches a remote HTML document (or reuses a fresh cached
//! copy), collects its relative links from a tolerant parse, rewrites those
//! links to absolute form in the raw text, optionally injects extra header
//! markup, and splits the result at a placeholder marker. Everything runs
//! synchronously on the calling thread.

use std::sync::Arc;
use std::time::Duration;

use encoding_rs::Encoding;
use pagesplice_core::{Error, PageCache, SessionStore};

use crate::encoding::{DEFAULT_ENCODING, detect_declared_charset, resolve_encoding};
use crate::fetch::PageFetcher;
use crate::links::collect_links;
use crate::placeholder::split_at_placeholder;
use crate::rewrite::{insert_header, rewrite_links};

/// One content-fetch request.
#[derive(Debug, Clone)]
pub struct FetchRequest {
    /// Placeholder to split at, e.g. "guestbook" or "##guestbook##".
    pub placeholder: String,
    /// Absolute URL to download from.
    pub fetch_from_url: String,
    /// Base URL prefixed to relative links; empty disables rewriting.
    pub base_url: String,
    /// Extra markup inserted after the opening head tag.
    pub header: Option<String>,
    /// How long a grabbed page stays valid in the cache.
    pub cache_duration: Duration,
}

/// Result of a successful grab, published through the accessors.
struct GrabbedPage {
    html_before: String,
    html_after: String,
    placeholder_parameters: Option<String>,
    encoding_name: Option<String>,
    encoding: &'static Encoding,
}

/// Grabs a web page, makes all links absolute to the base URL and splits
/// the grabbed HTML at the placeholder.
pub struct PageGrabber {
    fetcher: Arc<dyn PageFetcher>,
    store: Arc<dyn SessionStore>,
    result: Option<GrabbedPage>,
}

impl PageGrabber {
    /// Create a grabber using `fetcher` for network reads and `store` as
    /// the session-scoped cache backing.
    pub fn new(fetcher: Arc<dyn PageFetcher>, store: Arc<dyn SessionStore>) -> Self {
        Self { fetcher, store, result: None }
    }

    /// Run the pipeline. On success the result accessors are filled.
    ///
    /// A failed fetch falls back to any cached copy, even a stale one, with
    /// the error logged; without a cached copy the failure propagates.
    pub fn fetch_content(&mut self, request: &FetchRequest) -> Result<(), Error> {
        self.result = None;

        let cache = PageCache::new(self.store.clone(), &request.fetch_from_url, request.cache_duration);

        let mut encoding_name = None;
        let mut encoding = DEFAULT_ENCODING;

        let html = match cache.fresh_content() {
            Some(cached) => cached,
            None => {
                let html = match self.read_remote_document(&request.fetch_from_url, &mut encoding_name, &mut encoding)
                {
                    Ok(html) => html,
                    Err(e) => match cache.cached_content() {
                        // Report the error but continue with the stale copy.
                        Some(stale) => {
                            tracing::error!(
                                url = %request.fetch_from_url,
                                error = %e,
                                "document retrieval failed, continuing with cached copy"
                            );
                            stale
                        }
                        None => return Err(e),
                    },
                };

                cache.store_content(&html);
                html
            }
        };

        let links = collect_links(&html);
        let rewritten = rewrite_links(&html, &links, &request.base_url);
        let rewritten = insert_header(&rewritten, request.header.as_deref().unwrap_or(""));
        let split = split_at_placeholder(&rewritten, &request.placeholder);

        self.result = Some(GrabbedPage {
            html_before: split.html_before,
            html_after: split.html_after,
            placeholder_parameters: split.parameters,
            encoding_name,
            encoding,
        });

        Ok(())
    }

    /// HTML before the placeholder. Valid after a successful fetch.
    pub fn html_before(&self) -> Result<&str, Error> {
        self.ready("html_before").map(|page| page.html_before.as_str())
    }

    /// HTML after the placeholder. Valid after a successful fetch.
    pub fn html_after(&self) -> Result<&str, Error> {
        self.ready("html_after").map(|page| page.html_after.as_str())
    }

    /// Placeholder parameters from the last fetch, if the marker carried a
    /// non-empty `(...)` group.
    pub fn placeholder_parameters(&self) -> Result<Option<&str>, Error> {
        self.ready("placeholder_parameters").map(|page| page.placeholder_parameters.as_deref())
    }

    /// Charset name declared by the fetched page, if any. Stays `None` when
    /// the document came from the cache.
    pub fn source_page_encoding_name(&self) -> Result<Option<&str>, Error> {
        self.ready("source_page_encoding_name").map(|page| page.encoding_name.as_deref())
    }

    /// Encoding the page was decoded with; the default when no charset was
    /// declared, resolvable, or detected (cache hits included).
    pub fn source_page_encoding(&self) -> Result<&'static Encoding, Error> {
        self.ready("source_page_encoding").map(|page| page.encoding)
    }

    /// Drop the held halves. Accessors fail again until the next fetch.
    pub fn clear(&mut self) {
        self.result = None;
    }

    fn ready(&self, accessor: &'static str) -> Result<&GrabbedPage, Error> {
        self.result.as_ref().ok_or(Error::ResultsNotReady(accessor))
    }

    fn read_remote_document(
        &self,
        url: &str,
        encoding_name: &mut Option<String>,
        encoding: &mut &'static Encoding,
    ) -> Result<String, Error> {
        let bytes = self.fetcher.fetch_bytes(url)?;

        *encoding_name = detect_declared_charset(&bytes);
        tracing::info!(
            url,
            encoding = encoding_name.as_deref().unwrap_or("<none>"),
            "detected encoding for remote HTML document"
        );

        *encoding = resolve_encoding(encoding_name.as_deref());
        let (text, _, _) = encoding.decode(&bytes);
        Ok(text.into_owned())
    }
}
