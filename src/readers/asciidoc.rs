//! The AsciiDoc rule set for the pattern reader.
//!
//! [`asciidoc_reader`] registers recognition rules for the AsciiDoc
//! constructs the engine understands: document toggle directives, section
//! titles, fenced literal/source/listing blocks, `[literal]`/`[listing]`
//! styled paragraphs, block images, includes, admonition paragraphs,
//! tables, whole-line spans, and bare URLs. Comment lines are consumed and
//! dropped.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::{CallbackResult, LineCursor, PatternReader};
use crate::errors::CallbackError;
use crate::kinds::{BlockKind, Flags};

static RE_LITERAL_FENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\.\.\.\.\s*$").unwrap());
static RE_LISTING_FENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^----\s*$").unwrap());
static RE_TABLE_FENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\|===+\s*$").unwrap());

/// Builds a [`PatternReader`] loaded with the AsciiDoc rules, in
/// match-priority order.
pub fn asciidoc_reader() -> PatternReader {
    let mut reader = PatternReader::new();
    let rules: Vec<(
        &str,
        fn(&Captures, &mut LineCursor) -> CallbackResult,
        BlockKind,
    )> = vec![
        (r"^:hide-uri-scheme:\s*$", directive, BlockKind::HideUriScheme),
        (r"^:!hide-uri-scheme:\s*$", directive, BlockKind::ShowUriScheme),
        (r"^:!numbered:\s*$", directive, BlockKind::HideSectionNumbers),
        (r"^:numbered:\s*$", directive, BlockKind::ShowSectionNumbers),
        (r"^//", directive, BlockKind::Invalid),
        (r"^(?P<marker>=+)\s+(?P<title>.+?)\s*$", section, BlockKind::Section),
        (r"^\.\.\.\.\s*$", literal_block, BlockKind::LiteralBlock),
        (
            r"^\[source(?:,\s*(?P<lang>[^\]\s]+))?\]\s*$",
            code_block,
            BlockKind::CodeBlock,
        ),
        (r"^----\s*$", listing_block, BlockKind::ListingBlock),
        (r"^\[literal\]\s*$", styled_paragraph, BlockKind::Literal),
        (r"^\[listing\]\s*$", styled_paragraph, BlockKind::Listing),
        (
            r"^image::(?P<target>\S+)\[(?P<attrs>[^\]]*)\]\s*$",
            image,
            BlockKind::Image,
        ),
        (
            r"^include::(?P<target>\S+)\[(?P<attrs>[^\]]*)\]\s*$",
            include,
            BlockKind::Include,
        ),
        (
            r"^(?P<type>NOTE|TIP|IMPORTANT|CAUTION|WARNING):\s+(?P<text>.+)$",
            admonition,
            BlockKind::Admonition,
        ),
        (r"^\|===+\s*$", table, BlockKind::Table),
        (r"^\*(?P<text>[^*]+)\*\s*$", span, BlockKind::Bold),
        (r"^_(?P<text>[^_]+)_\s*$", span, BlockKind::Italic),
        (r"^`(?P<text>[^`]+)`\s*$", span, BlockKind::Monospace),
        (r"^(?P<url>https?://\S+)\s*$", bare_url, BlockKind::Link),
    ];
    for (pattern, callback, kind) in rules {
        reader
            .register(pattern, callback, kind)
            .expect("static rule pattern");
    }
    reader
}

fn directive(_caps: &Captures, _cursor: &mut LineCursor) -> CallbackResult {
    Ok((String::new(), Flags::new()))
}

fn section(caps: &Captures, _cursor: &mut LineCursor) -> CallbackResult {
    let marker = named(caps, "marker")?;
    let title = named(caps, "title")?;
    let mut flags = Flags::new();
    flags.insert("level", marker.len().to_string());
    Ok((title.to_string(), flags))
}

fn literal_block(_caps: &Captures, cursor: &mut LineCursor) -> CallbackResult {
    let content = consume_fenced(cursor, &RE_LITERAL_FENCE, "....")?;
    Ok((content, Flags::new()))
}

fn code_block(caps: &Captures, cursor: &mut LineCursor) -> CallbackResult {
    match cursor.next_line() {
        Some(line) if RE_LISTING_FENCE.is_match(line) => {}
        _ => {
            return Err(CallbackError::Other(
                "expected a ---- fence after the [source] style".to_string(),
            ));
        }
    }
    let content = consume_fenced(cursor, &RE_LISTING_FENCE, "----")?;
    let mut flags = Flags::new();
    if let Some(lang) = caps.name("lang") {
        flags.insert("lang", lang.as_str());
    }
    Ok((content, flags))
}

fn listing_block(_caps: &Captures, cursor: &mut LineCursor) -> CallbackResult {
    let content = consume_fenced(cursor, &RE_LISTING_FENCE, "----")?;
    Ok((content, Flags::new()))
}

// [literal] and [listing] style the paragraph that follows them
fn styled_paragraph(_caps: &Captures, cursor: &mut LineCursor) -> CallbackResult {
    let mut body: Vec<&str> = Vec::new();
    while let Some(line) = cursor.peek() {
        if line.trim().is_empty() {
            break;
        }
        cursor.next_line();
        body.push(line);
    }
    Ok((body.join("\n"), Flags::new()))
}

fn image(caps: &Captures, _cursor: &mut LineCursor) -> CallbackResult {
    let target = named(caps, "target")?;
    let mut flags = Flags::new();
    let mut positional = ["alt", "width", "height"].into_iter();
    for part in split_attrs(named(caps, "attrs")?) {
        match part.split_once('=') {
            Some((key, value)) => flags.insert(key.trim(), unquote(value.trim())),
            None => {
                let Some(key) = positional.next() else { continue };
                if !part.is_empty() {
                    flags.insert(key, unquote(&part));
                }
            }
        }
    }
    Ok((target.to_string(), flags))
}

fn include(caps: &Captures, _cursor: &mut LineCursor) -> CallbackResult {
    Ok((named(caps, "target")?.to_string(), Flags::new()))
}

fn admonition(caps: &Captures, _cursor: &mut LineCursor) -> CallbackResult {
    let mut flags = Flags::new();
    flags.insert("type", named(caps, "type")?);
    Ok((named(caps, "text")?.to_string(), flags))
}

fn table(_caps: &Captures, cursor: &mut LineCursor) -> CallbackResult {
    let content = consume_fenced(cursor, &RE_TABLE_FENCE, "|===")?;
    Ok((content, Flags::new()))
}

fn span(caps: &Captures, _cursor: &mut LineCursor) -> CallbackResult {
    Ok((named(caps, "text")?.to_string(), Flags::new()))
}

fn bare_url(caps: &Captures, _cursor: &mut LineCursor) -> CallbackResult {
    Ok((named(caps, "url")?.to_string(), Flags::new()))
}

fn named<'c>(caps: &'c Captures, group: &'static str) -> Result<&'c str, CallbackError> {
    caps.name(group)
        .map(|m| m.as_str())
        .ok_or(CallbackError::MissingCapture(group))
}

/// Reads lines up to the closing fence. Hitting end of input first is the
/// unterminated-block condition; the reader then emits everything consumed
/// verbatim.
fn consume_fenced(
    cursor: &mut LineCursor,
    fence: &Regex,
    fence_name: &str,
) -> Result<String, CallbackError> {
    let mut body: Vec<&str> = Vec::new();
    loop {
        match cursor.next_line() {
            Some(line) if fence.is_match(line) => return Ok(body.join("\n")),
            Some(line) => body.push(line),
            None => return Err(CallbackError::Unterminated(fence_name.to_string())),
        }
    }
}

// commas split attributes except inside double quotes
fn split_attrs(attrs: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    for c in attrs.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                current.push(c);
            }
            ',' if !in_quotes => {
                parts.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(c),
        }
    }
    if !current.trim().is_empty() {
        parts.push(current.trim().to_string());
    }
    parts
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}
