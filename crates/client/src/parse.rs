//! Tolerant markup tokenization.
//!
//! Wraps html5ever's tokenizer as a flat event stream: element start tags
//! (with attributes) and comments, in source order. Tokenization is
//! deliberately used instead of tree construction — the HTML5 tree builder
//! drops table-scoped tags (`td`, `th`, `tr`, ...) that appear outside a
//! table context, while the tokenizer reports every tag it sees. Malformed
//! input degrades to best-guess tokens; this never fails.

use std::cell::RefCell;

use html5ever::tendril::StrTendril;
use html5ever::tokenizer::states::RawKind;
use html5ever::tokenizer::{
    BufferQueue, TagKind, Token, TokenSink, TokenSinkResult, Tokenizer, TokenizerOpts,
};

/// A structural event from the tolerant scan of an HTML document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkupEvent {
    /// An element start tag; tag and attribute names are lower-cased by the
    /// tokenizer.
    ElementStart {
        name: String,
        attrs: Vec<(String, String)>,
    },
    /// A comment's text content.
    Comment(String),
}

#[derive(Default)]
struct EventSink {
    events: RefCell<Vec<MarkupEvent>>,
}

impl TokenSink for EventSink {
    type Handle = ();

    fn process_token(&self, token: Token, _line_number: u64) -> TokenSinkResult<()> {
        match token {
            Token::TagToken(tag) if tag.kind == TagKind::StartTag => {
                let attrs = tag
                    .attrs
                    .iter()
                    .map(|attr| (attr.name.local.to_string(), attr.value.to_string()))
                    .collect();
                self.events.borrow_mut().push(MarkupEvent::ElementStart { name: tag.name.to_string(), attrs });

                // Without a tree builder the sink has to switch the
                // tokenizer into raw-text mode itself, or script/style
                // bodies would be scanned as markup.
                match tag.name.as_ref() {
                    "script" => return TokenSinkResult::RawData(RawKind::ScriptData),
                    "style" | "xmp" | "noembed" | "noframes" => {
                        return TokenSinkResult::RawData(RawKind::Rawtext);
                    }
                    "title" | "textarea" => return TokenSinkResult::RawData(RawKind::Rcdata),
                    _ => {}
                }
            }
            Token::CommentToken(text) => {
                self.events.borrow_mut().push(MarkupEvent::Comment(text.to_string()));
            }
            _ => {}
        }

        TokenSinkResult::Continue
    }
}

/// Tokenize `html` into element-start and comment events in source order.
///
/// Context-free: a `<td>` outside any table still produces its event, which
/// tree-building parsers would silently drop.
pub fn markup_events(html: &str) -> Vec<MarkupEvent> {
    let queue = BufferQueue::default();
    queue.push_back(StrTendril::from_slice(html));

    let tokenizer = Tokenizer::new(EventSink::default(), TokenizerOpts::default());
    let _ = tokenizer.feed(&queue);
    tokenizer.end();

    tokenizer.sink.events.into_inner()
}
