//! The HTML frontend: a tag-stack mapper over an HTML token stream.
//!
//! Tokenization is html5ever's job; [`tokenize`] adapts its tokenizer to
//! the three token kinds the mapper consumes ([`HtmlToken`]), so
//! [`TagMapper`] itself is testable with hand-built streams. The mapper
//! keeps a stack of the currently-open tags and renders text through the
//! capability its enclosing tag maps to, falling back to verbatim output
//! for everything it does not recognize.

use std::cell::RefCell;
use std::collections::HashMap;

use html5ever::tendril::StrTendril;
use html5ever::tokenizer::{
    BufferQueue, TagKind, Token, TokenSink, TokenSinkResult, Tokenizer, TokenizerOpts,
};
use log::warn;

use super::Reader;
use crate::errors::{ConversionError, Diagnostic};
use crate::kinds::{BlockKind, Flags};
use crate::resolver::Pass;
use crate::writers::Writer;

/// The token interface between the external tokenizer and the mapper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HtmlToken {
    StartTag {
        name: String,
        attrs: Vec<(String, String)>,
        self_closing: bool,
    },
    EndTag {
        name: String,
    },
    Text(String),
}

// elements that never receive an end tag and never hold the stack
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

struct TokenCollector {
    tokens: RefCell<Vec<HtmlToken>>,
}

impl TokenSink for TokenCollector {
    type Handle = ();

    fn process_token(&self, token: Token, _line_number: u64) -> TokenSinkResult<()> {
        let mut tokens = self.tokens.borrow_mut();
        match token {
            Token::TagToken(tag) => {
                let name = tag.name.to_string();
                match tag.kind {
                    TagKind::StartTag => tokens.push(HtmlToken::StartTag {
                        name,
                        attrs: tag
                            .attrs
                            .iter()
                            .map(|attr| (attr.name.local.to_string(), attr.value.to_string()))
                            .collect(),
                        self_closing: tag.self_closing,
                    }),
                    TagKind::EndTag => tokens.push(HtmlToken::EndTag { name }),
                }
            }
            Token::CharacterTokens(text) => {
                // the tokenizer may split runs of text; keep them whole
                if let Some(HtmlToken::Text(prev)) = tokens.last_mut() {
                    prev.push_str(&text);
                } else {
                    tokens.push(HtmlToken::Text(text.to_string()));
                }
            }
            // comments, doctypes, parse errors, and EOF carry nothing to map
            _ => {}
        }
        TokenSinkResult::Continue
    }
}

/// Runs html5ever's tokenizer over the source and yields the mapper's
/// token kinds.
pub fn tokenize(source: &str) -> Vec<HtmlToken> {
    let input = BufferQueue::default();
    if !source.is_empty() {
        input.push_back(StrTendril::from(source));
    }
    let tokenizer = Tokenizer::new(
        TokenCollector {
            tokens: RefCell::new(Vec::new()),
        },
        TokenizerOpts::default(),
    );
    let _ = tokenizer.feed(&input);
    tokenizer.end();
    tokenizer.sink.tokens.into_inner()
}

/// Maps tag names to the capability used for text inside them. The default
/// table covers the fixed mappings; consumers extend it programmatically or
/// from JSON configuration without touching the mapper.
#[derive(Debug, Clone)]
pub struct TagTable(HashMap<String, BlockKind>);

impl Default for TagTable {
    fn default() -> Self {
        let mut table = HashMap::new();
        for (tag, kind) in [
            ("br", BlockKind::LineBreak),
            ("strong", BlockKind::Bold),
            ("b", BlockKind::Bold),
            ("em", BlockKind::Italic),
            ("i", BlockKind::Italic),
            ("strike", BlockKind::StrikeThrough),
            ("small", BlockKind::Small),
        ] {
            table.insert(tag.to_string(), kind);
        }
        TagTable(table)
    }
}

impl TagTable {
    pub fn with_mapping(mut self, tag: impl Into<String>, kind: BlockKind) -> Self {
        self.0.insert(tag.into(), kind);
        self
    }

    /// Extends the table from a JSON object of `"tag": "kind"` pairs, e.g.
    /// `{"code": "monospace", "del": "strike_through"}`.
    pub fn with_json_mappings(mut self, json: &str) -> Result<Self, serde_json::Error> {
        let mappings: HashMap<String, BlockKind> = serde_json::from_str(json)?;
        self.0.extend(mappings);
        Ok(self)
    }

    pub fn kind_for(&self, tag: &str) -> Option<BlockKind> {
        self.0.get(tag).copied()
    }
}

/// Consumes an HTML token stream and drives the bound writer, tracking the
/// open-tag context. The tag stack is pass-scoped: empty before the first
/// token and, for well-formed input, after the last.
pub struct TagMapper {
    table: TagTable,
}

impl TagMapper {
    pub fn new() -> Self {
        TagMapper {
            table: TagTable::default(),
        }
    }

    pub fn with_table(table: TagTable) -> Self {
        TagMapper { table }
    }

    /// Maps a token stream against the writer. Unbalanced end tags and tags
    /// left open at end of input are diagnostics, never fatal.
    pub fn map_tokens<I>(
        &self,
        tokens: I,
        writer: &dyn Writer,
        pass: &mut Pass,
    ) -> Result<String, ConversionError>
    where
        I: IntoIterator<Item = HtmlToken>,
    {
        let mut output = String::new();
        let mut stack: Vec<(String, Flags)> = Vec::new();

        for token in tokens {
            match token {
                HtmlToken::StartTag {
                    name,
                    attrs,
                    self_closing,
                } => {
                    let flags: Flags = attrs.into_iter().collect();
                    if self_closing || VOID_ELEMENTS.contains(&name.as_str()) {
                        output.push_str(&self.render_void(&name, flags, writer, pass)?);
                    } else {
                        stack.push((name, flags));
                    }
                }
                HtmlToken::EndTag { name } => match stack.last() {
                    Some((top, _)) if *top == name => {
                        stack.pop();
                    }
                    Some((top, _)) => {
                        warn!("end tag </{name}> does not match open <{top}>");
                        pass.diagnostics.push(Diagnostic::new(
                            0,
                            None,
                            format!("end tag </{name}> does not match open <{top}>"),
                        ));
                    }
                    None => {
                        warn!("end tag </{name}> with no open tag");
                        pass.diagnostics.push(Diagnostic::new(
                            0,
                            None,
                            format!("end tag </{name}> with no open tag"),
                        ));
                    }
                },
                HtmlToken::Text(data) => {
                    let rendered = match stack.last() {
                        Some((top, flags)) => match self.table.kind_for(top) {
                            Some(kind) => {
                                Some(writer.render(kind, &data, flags, &mut pass.toggles)?)
                            }
                            None => None,
                        },
                        None => None,
                    };
                    match rendered {
                        // empty means the writer did nothing with the text
                        Some(rendered) if !rendered.is_empty() => output.push_str(&rendered),
                        _ => output.push_str(&data),
                    }
                }
            }
        }

        if !stack.is_empty() {
            let open: Vec<&str> = stack.iter().map(|(name, _)| name.as_str()).collect();
            warn!("document ended with open tags: {}", open.join(", "));
            pass.diagnostics.push(Diagnostic::new(
                0,
                None,
                format!("document ended with open tags: {}", open.join(", ")),
            ));
        }

        Ok(output)
    }

    // void elements render off the stack; <img> carries its target in `src`
    fn render_void(
        &self,
        name: &str,
        mut flags: Flags,
        writer: &dyn Writer,
        pass: &mut Pass,
    ) -> Result<String, ConversionError> {
        if name == "img" {
            let src = flags.remove("src").unwrap_or_default();
            return writer.render(BlockKind::Image, &src, &flags, &mut pass.toggles);
        }
        match self.table.kind_for(name) {
            Some(kind) => writer.render(kind, "", &flags, &mut pass.toggles),
            None => Ok(String::new()),
        }
    }
}

impl Default for TagMapper {
    fn default() -> Self {
        Self::new()
    }
}

impl Reader for TagMapper {
    fn feed(
        &self,
        source: &str,
        writer: &dyn Writer,
        pass: &mut Pass,
    ) -> Result<String, ConversionError> {
        self.map_tokens(tokenize(source), writer, pass)
    }
}
