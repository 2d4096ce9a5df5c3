//! HTML rendering for the writer capabilities.
//!
//! Text content and attribute values are escaped on the way out. HTML has no
//! rendering-toggle directives, so the toggle operations flip the pass state
//! and return empty strings. Constructs HTML cannot express (`include`)
//! render nothing.

use html_escape::{encode_double_quoted_attribute, encode_text};

use super::{RenderToggles, Writer, strip_section_number, strip_uri_scheme};
use crate::kinds::Flags;

/// Renders semantic events as HTML.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlWriter;

fn wrap(tag: &str, content: &str) -> String {
    format!("<{tag}>{}</{tag}>", encode_text(content))
}

impl Writer for HtmlWriter {
    fn bold(&self, content: &str, _flags: &Flags, _toggles: &RenderToggles) -> String {
        wrap("b", content)
    }

    fn italic(&self, content: &str, _flags: &Flags, _toggles: &RenderToggles) -> String {
        wrap("i", content)
    }

    fn monospace(&self, content: &str, _flags: &Flags, _toggles: &RenderToggles) -> String {
        wrap("code", content)
    }

    fn superscript(&self, content: &str, _flags: &Flags, _toggles: &RenderToggles) -> String {
        wrap("sup", content)
    }

    fn subscript(&self, content: &str, _flags: &Flags, _toggles: &RenderToggles) -> String {
        wrap("sub", content)
    }

    fn underline(&self, content: &str, _flags: &Flags, _toggles: &RenderToggles) -> String {
        wrap("u", content)
    }

    fn strike_through(&self, content: &str, _flags: &Flags, _toggles: &RenderToggles) -> String {
        wrap("s", content)
    }

    fn small(&self, content: &str, _flags: &Flags, _toggles: &RenderToggles) -> String {
        wrap("small", content)
    }

    fn overline(&self, content: &str, _flags: &Flags, _toggles: &RenderToggles) -> String {
        format!(
            "<span style=\"text-decoration: overline\">{}</span>",
            encode_text(content)
        )
    }

    fn link(&self, content: &str, flags: &Flags, toggles: &RenderToggles) -> String {
        let text = match flags.get("text") {
            Some(text) => text,
            None if toggles.hide_uri_scheme => strip_uri_scheme(content),
            None => content,
        };
        format!(
            "<a href=\"{}\">{}</a>",
            encode_double_quoted_attribute(content),
            encode_text(text)
        )
    }

    fn line_break(&self, content: &str, _flags: &Flags, _toggles: &RenderToggles) -> String {
        format!("{}<br>", encode_text(content))
    }

    fn section(&self, content: &str, flags: &Flags, toggles: &RenderToggles) -> String {
        let level = flags
            .get("level")
            .and_then(|level| level.parse::<usize>().ok())
            .unwrap_or(1)
            .clamp(1, 6);
        let title = if toggles.hide_section_numbers {
            strip_section_number(content)
        } else {
            content
        };
        format!("<h{level}>{}</h{level}>", encode_text(title))
    }

    /// Same fixed attribute order as the AsciiDoc writer: alt, width/height
    /// (only when both are present), then remaining flags in insertion
    /// order.
    fn image(&self, content: &str, flags: &Flags, _toggles: &RenderToggles) -> String {
        let mut attrs = format!("src=\"{}\"", encode_double_quoted_attribute(content));
        if let Some(alt) = flags.get("alt") {
            attrs.push_str(&format!(" alt=\"{}\"", encode_double_quoted_attribute(alt)));
        }
        if let (Some(width), Some(height)) = (flags.get("width"), flags.get("height")) {
            attrs.push_str(&format!(
                " width=\"{}\" height=\"{}\"",
                encode_double_quoted_attribute(width),
                encode_double_quoted_attribute(height)
            ));
        }
        for (key, value) in flags.iter() {
            if !matches!(key, "alt" | "width" | "height") {
                attrs.push_str(&format!(
                    " {key}=\"{}\"",
                    encode_double_quoted_attribute(value)
                ));
            }
        }
        format!("<img {attrs}>")
    }

    fn literal(&self, content: &str, _flags: &Flags, _toggles: &RenderToggles) -> String {
        wrap("pre", content)
    }

    fn literal_block(&self, content: &str, _flags: &Flags, _toggles: &RenderToggles) -> String {
        wrap("pre", content)
    }

    fn code_block(&self, content: &str, flags: &Flags, _toggles: &RenderToggles) -> String {
        let code = match flags.get("lang") {
            Some(lang) => format!(
                "<code class=\"language-{}\">{}</code>",
                encode_double_quoted_attribute(lang),
                encode_text(content)
            ),
            None => wrap("code", content),
        };
        format!("<pre>{code}</pre>")
    }

    fn listing(&self, content: &str, _flags: &Flags, _toggles: &RenderToggles) -> String {
        wrap("pre", content)
    }

    fn listing_block(&self, content: &str, _flags: &Flags, _toggles: &RenderToggles) -> String {
        wrap("pre", content)
    }

    fn admonition(&self, content: &str, flags: &Flags, _toggles: &RenderToggles) -> String {
        let variant = flags.get("type").unwrap_or("NOTE").to_lowercase();
        format!(
            "<div class=\"admonition {variant}\">{}</div>",
            encode_text(content)
        )
    }

    fn table(&self, content: &str, _flags: &Flags, _toggles: &RenderToggles) -> String {
        format!("<table>\n{}\n</table>", encode_text(content))
    }

    fn table_cell(&self, content: &str, _flags: &Flags, _toggles: &RenderToggles) -> String {
        wrap("td", content)
    }

    // no HTML equivalent for file inclusion
    fn include(&self, _content: &str, _flags: &Flags, _toggles: &RenderToggles) -> String {
        String::new()
    }

    fn callout(&self, content: &str, flags: &Flags, _toggles: &RenderToggles) -> String {
        let number = flags.get("number").unwrap_or("1");
        format!(
            "<span class=\"callout\">{number}</span> {}",
            encode_text(content)
        )
    }
}
