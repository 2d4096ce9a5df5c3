//! Writers render semantic events into target-language text. Each target
//! format implements [`Writer`], one capability per renderable
//! [`BlockKind`] plus the four toggle operations; readers and the mapper
//! depend only on this trait, never on a concrete writer.
//!
//! Current writers:
//!
//! - [`asciidoc::AsciidocWriter`]
//! - [`html::HtmlWriter`]

pub mod asciidoc;
pub mod html;

use clap::ValueEnum;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::ConversionError;
use crate::kinds::{BlockKind, Flags};

/// The formats a conversion can read from or write to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Asciidoc,
    Html,
}

/// Pass-scoped rendering switches. A fresh value is created for every
/// conversion pass; writers read it on each render call and mutate it only
/// through the four toggle operations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderToggles {
    /// `http://www.example.com` displays as `www.example.com`
    pub hide_uri_scheme: bool,
    /// `1.2 Section` displays as `Section`
    pub hide_section_numbers: bool,
}

// "1.", "1.2", "1.2.3." etc. at the start of a section title
static RE_SECTION_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+(\.\d+)*\.?\s+").unwrap());

/// Strips a leading section number from a title, for writers honoring
/// [`RenderToggles::hide_section_numbers`].
pub(crate) fn strip_section_number(title: &str) -> &str {
    match RE_SECTION_NUMBER.find(title) {
        Some(m) => &title[m.end()..],
        None => title,
    }
}

/// Strips the scheme from a URI, for writers honoring
/// [`RenderToggles::hide_uri_scheme`].
pub(crate) fn strip_uri_scheme(uri: &str) -> &str {
    match uri.split_once("://") {
        Some((_, rest)) => rest,
        None => uri,
    }
}

/// One render capability per renderable block kind, uniform signature
/// `(content, flags, toggles) -> rendered text`, plus the four toggle
/// operations. Defaults render nothing, so a writer only implements the
/// capabilities its target language can express; `passthrough` defaults to
/// identity and carries unmatched input.
///
/// An empty return value means "this writer has no rendering for that
/// construct" and callers fall back accordingly; it is never an error.
pub trait Writer {
    fn bold(&self, _content: &str, _flags: &Flags, _toggles: &RenderToggles) -> String {
        String::new()
    }

    fn italic(&self, _content: &str, _flags: &Flags, _toggles: &RenderToggles) -> String {
        String::new()
    }

    fn monospace(&self, _content: &str, _flags: &Flags, _toggles: &RenderToggles) -> String {
        String::new()
    }

    fn superscript(&self, _content: &str, _flags: &Flags, _toggles: &RenderToggles) -> String {
        String::new()
    }

    fn subscript(&self, _content: &str, _flags: &Flags, _toggles: &RenderToggles) -> String {
        String::new()
    }

    fn underline(&self, _content: &str, _flags: &Flags, _toggles: &RenderToggles) -> String {
        String::new()
    }

    fn strike_through(&self, _content: &str, _flags: &Flags, _toggles: &RenderToggles) -> String {
        String::new()
    }

    fn small(&self, _content: &str, _flags: &Flags, _toggles: &RenderToggles) -> String {
        String::new()
    }

    fn overline(&self, _content: &str, _flags: &Flags, _toggles: &RenderToggles) -> String {
        String::new()
    }

    /// Content is the link target; the optional `text` flag supplies display
    /// text. Writers honor [`RenderToggles::hide_uri_scheme`] when deriving
    /// display text from the target.
    fn link(&self, _content: &str, _flags: &Flags, _toggles: &RenderToggles) -> String {
        String::new()
    }

    fn line_break(&self, _content: &str, _flags: &Flags, _toggles: &RenderToggles) -> String {
        String::new()
    }

    /// Content is the title; the `level` flag (default "1") selects depth.
    /// Writers honor [`RenderToggles::hide_section_numbers`].
    fn section(&self, _content: &str, _flags: &Flags, _toggles: &RenderToggles) -> String {
        String::new()
    }

    /// Content is the image target. Recognized flags: `alt`, `width`,
    /// `height`; remaining keys are forwarded in insertion order by writers
    /// with free-form attribute support.
    fn image(&self, _content: &str, _flags: &Flags, _toggles: &RenderToggles) -> String {
        String::new()
    }

    fn literal(&self, _content: &str, _flags: &Flags, _toggles: &RenderToggles) -> String {
        String::new()
    }

    fn literal_block(&self, _content: &str, _flags: &Flags, _toggles: &RenderToggles) -> String {
        String::new()
    }

    /// The `lang` flag names the source language when known.
    fn code_block(&self, _content: &str, _flags: &Flags, _toggles: &RenderToggles) -> String {
        String::new()
    }

    fn listing(&self, _content: &str, _flags: &Flags, _toggles: &RenderToggles) -> String {
        String::new()
    }

    fn listing_block(&self, _content: &str, _flags: &Flags, _toggles: &RenderToggles) -> String {
        String::new()
    }

    /// The `type` flag (default "NOTE") selects the admonition variant.
    fn admonition(&self, _content: &str, _flags: &Flags, _toggles: &RenderToggles) -> String {
        String::new()
    }

    /// The `sub-table` flag marks a table nested inside another table.
    fn table(&self, _content: &str, _flags: &Flags, _toggles: &RenderToggles) -> String {
        String::new()
    }

    fn table_cell(&self, _content: &str, _flags: &Flags, _toggles: &RenderToggles) -> String {
        String::new()
    }

    fn include(&self, _content: &str, _flags: &Flags, _toggles: &RenderToggles) -> String {
        String::new()
    }

    /// The `number` flag (default "1") is the callout marker.
    fn callout(&self, _content: &str, _flags: &Flags, _toggles: &RenderToggles) -> String {
        String::new()
    }

    /// Identity by default; carries unmatched lines and verbatim text.
    fn passthrough(&self, content: &str, _flags: &Flags, _toggles: &RenderToggles) -> String {
        content.to_string()
    }

    /// Toggle operations mutate the pass state and return the
    /// target-language directive for the toggle, or the empty string for
    /// targets with no such directive.
    fn hide_uri_scheme(&self, toggles: &mut RenderToggles) -> String {
        toggles.hide_uri_scheme = true;
        String::new()
    }

    fn show_uri_scheme(&self, toggles: &mut RenderToggles) -> String {
        toggles.hide_uri_scheme = false;
        String::new()
    }

    fn hide_section_numbers(&self, toggles: &mut RenderToggles) -> String {
        toggles.hide_section_numbers = true;
        String::new()
    }

    fn show_section_numbers(&self, toggles: &mut RenderToggles) -> String {
        toggles.hide_section_numbers = false;
        String::new()
    }

    /// Routes one semantic event to its capability. `Invalid` is a hard
    /// error; readers must drop it before dispatch.
    fn render(
        &self,
        kind: BlockKind,
        content: &str,
        flags: &Flags,
        toggles: &mut RenderToggles,
    ) -> Result<String, ConversionError> {
        let rendered = match kind {
            BlockKind::Invalid => return Err(ConversionError::InvalidKindDispatched),
            BlockKind::Bold => self.bold(content, flags, toggles),
            BlockKind::Italic => self.italic(content, flags, toggles),
            BlockKind::Monospace => self.monospace(content, flags, toggles),
            BlockKind::Superscript => self.superscript(content, flags, toggles),
            BlockKind::Subscript => self.subscript(content, flags, toggles),
            BlockKind::Underline => self.underline(content, flags, toggles),
            BlockKind::StrikeThrough => self.strike_through(content, flags, toggles),
            BlockKind::Small => self.small(content, flags, toggles),
            BlockKind::Overline => self.overline(content, flags, toggles),
            BlockKind::Link => self.link(content, flags, toggles),
            BlockKind::LineBreak => self.line_break(content, flags, toggles),
            BlockKind::Section => self.section(content, flags, toggles),
            BlockKind::Image => self.image(content, flags, toggles),
            BlockKind::Literal => self.literal(content, flags, toggles),
            BlockKind::LiteralBlock => self.literal_block(content, flags, toggles),
            BlockKind::CodeBlock => self.code_block(content, flags, toggles),
            BlockKind::Listing => self.listing(content, flags, toggles),
            BlockKind::ListingBlock => self.listing_block(content, flags, toggles),
            BlockKind::Admonition => self.admonition(content, flags, toggles),
            BlockKind::Table => self.table(content, flags, toggles),
            BlockKind::TableCell => self.table_cell(content, flags, toggles),
            BlockKind::Include => self.include(content, flags, toggles),
            BlockKind::Callout => self.callout(content, flags, toggles),
            BlockKind::HideUriScheme => self.hide_uri_scheme(toggles),
            BlockKind::ShowUriScheme => self.show_uri_scheme(toggles),
            BlockKind::HideSectionNumbers => self.hide_section_numbers(toggles),
            BlockKind::ShowSectionNumbers => self.show_section_numbers(toggles),
        };
        Ok(rendered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_section_number() {
        assert_eq!(strip_section_number("1.2 Section"), "Section");
        assert_eq!(strip_section_number("3. Overview"), "Overview");
        assert_eq!(strip_section_number("10.4.1 Deep"), "Deep");
        assert_eq!(strip_section_number("Section"), "Section");
        assert_eq!(strip_section_number("2026 in review"), "in review");
    }

    #[test]
    fn test_strip_uri_scheme() {
        assert_eq!(strip_uri_scheme("http://www.example.com"), "www.example.com");
        assert_eq!(strip_uri_scheme("www.example.com"), "www.example.com");
    }

    struct NullWriter;
    impl Writer for NullWriter {}

    #[test]
    fn test_default_capabilities_render_nothing() {
        let w = NullWriter;
        let mut toggles = RenderToggles::default();
        let out = w
            .render(BlockKind::Bold, "text", &Flags::new(), &mut toggles)
            .unwrap();
        assert_eq!(out, "");
    }

    #[test]
    fn test_passthrough_defaults_to_identity() {
        let w = NullWriter;
        assert_eq!(
            w.passthrough("just text", &Flags::new(), &RenderToggles::default()),
            "just text"
        );
    }

    #[test]
    fn test_invalid_kind_is_a_hard_error() {
        let w = NullWriter;
        let mut toggles = RenderToggles::default();
        assert!(
            w.render(BlockKind::Invalid, "", &Flags::new(), &mut toggles)
                .is_err()
        );
    }

    #[test]
    fn test_default_toggles_mutate_state() {
        let w = NullWriter;
        let mut toggles = RenderToggles::default();
        w.hide_uri_scheme(&mut toggles);
        assert!(toggles.hide_uri_scheme);
        w.show_uri_scheme(&mut toggles);
        assert!(!toggles.hide_uri_scheme);
    }
}
