//! AsciiDoc rendering for every writer capability.

use super::{RenderToggles, Writer, strip_section_number, strip_uri_scheme};
use crate::kinds::Flags;

/// Renders semantic events as AsciiDoc markup.
#[derive(Debug, Clone, Copy, Default)]
pub struct AsciidocWriter;

impl Writer for AsciidocWriter {
    fn bold(&self, content: &str, _flags: &Flags, _toggles: &RenderToggles) -> String {
        format!("*{content}*")
    }

    fn italic(&self, content: &str, _flags: &Flags, _toggles: &RenderToggles) -> String {
        format!("_{content}_")
    }

    fn monospace(&self, content: &str, _flags: &Flags, _toggles: &RenderToggles) -> String {
        format!("`{content}`")
    }

    fn superscript(&self, content: &str, _flags: &Flags, _toggles: &RenderToggles) -> String {
        format!("^{content}^")
    }

    fn subscript(&self, content: &str, _flags: &Flags, _toggles: &RenderToggles) -> String {
        format!("~{content}~")
    }

    fn underline(&self, content: &str, _flags: &Flags, _toggles: &RenderToggles) -> String {
        format!("[.underline]#{content}#")
    }

    fn strike_through(&self, content: &str, _flags: &Flags, _toggles: &RenderToggles) -> String {
        format!("[.line-through]#{content}#")
    }

    fn small(&self, content: &str, _flags: &Flags, _toggles: &RenderToggles) -> String {
        format!("[.small]#{content}#")
    }

    fn overline(&self, content: &str, _flags: &Flags, _toggles: &RenderToggles) -> String {
        format!("[.overline]#{content}#")
    }

    fn link(&self, content: &str, flags: &Flags, toggles: &RenderToggles) -> String {
        let text = match flags.get("text") {
            Some(text) => text,
            None if toggles.hide_uri_scheme => strip_uri_scheme(content),
            None => "",
        };
        format!("link:{content}[{text}]")
    }

    fn line_break(&self, content: &str, _flags: &Flags, _toggles: &RenderToggles) -> String {
        format!("{content} +\n")
    }

    fn section(&self, content: &str, flags: &Flags, toggles: &RenderToggles) -> String {
        let level = flags
            .get("level")
            .and_then(|level| level.parse::<usize>().ok())
            .unwrap_or(1)
            .max(1);
        let title = if toggles.hide_section_numbers {
            strip_section_number(content)
        } else {
            content
        };
        format!("{} {}", "=".repeat(level), title)
    }

    /// Attribute order is fixed: alt, width/height (only when both are
    /// present), then remaining flags in insertion order.
    fn image(&self, content: &str, flags: &Flags, _toggles: &RenderToggles) -> String {
        let mut options: Vec<String> = Vec::new();
        if let Some(alt) = flags.get("alt") {
            options.push(format!("\"{alt}\""));
        }
        if let (Some(width), Some(height)) = (flags.get("width"), flags.get("height")) {
            options.push(width.to_string());
            options.push(height.to_string());
        }
        for (key, value) in flags.iter() {
            if !matches!(key, "alt" | "width" | "height") {
                options.push(format!("{key}=\"{value}\""));
            }
        }
        format!("image::{content}[{}]", options.join(","))
    }

    fn literal(&self, content: &str, _flags: &Flags, _toggles: &RenderToggles) -> String {
        format!("[literal]\n{content}")
    }

    fn literal_block(&self, content: &str, _flags: &Flags, _toggles: &RenderToggles) -> String {
        format!("....\n{content}\n....")
    }

    fn code_block(&self, content: &str, flags: &Flags, _toggles: &RenderToggles) -> String {
        let style = match flags.get("lang") {
            Some(lang) => format!("[source,{lang}]"),
            None => "[source]".to_string(),
        };
        format!("{style}\n----\n{content}\n----")
    }

    fn listing(&self, content: &str, _flags: &Flags, _toggles: &RenderToggles) -> String {
        format!("[listing]\n{content}")
    }

    fn listing_block(&self, content: &str, _flags: &Flags, _toggles: &RenderToggles) -> String {
        format!("----\n{content}\n----")
    }

    fn admonition(&self, content: &str, flags: &Flags, _toggles: &RenderToggles) -> String {
        let variant = flags.get("type").unwrap_or("NOTE").to_uppercase();
        format!("{variant}: {content}")
    }

    fn table(&self, content: &str, flags: &Flags, _toggles: &RenderToggles) -> String {
        let fence = if flags.contains("sub-table") {
            "!===="
        } else {
            "|===="
        };
        format!("{fence}\n{content}\n{fence}")
    }

    fn table_cell(&self, content: &str, _flags: &Flags, _toggles: &RenderToggles) -> String {
        format!("|{content}")
    }

    fn include(&self, content: &str, _flags: &Flags, _toggles: &RenderToggles) -> String {
        format!("include::{content}[]")
    }

    fn callout(&self, content: &str, flags: &Flags, _toggles: &RenderToggles) -> String {
        let number = flags.get("number").unwrap_or("1");
        format!("<{number}> {content}")
    }

    fn hide_uri_scheme(&self, toggles: &mut RenderToggles) -> String {
        toggles.hide_uri_scheme = true;
        ":hide-uri-scheme:".to_string()
    }

    fn show_uri_scheme(&self, toggles: &mut RenderToggles) -> String {
        toggles.hide_uri_scheme = false;
        ":!hide-uri-scheme:".to_string()
    }

    fn hide_section_numbers(&self, toggles: &mut RenderToggles) -> String {
        toggles.hide_section_numbers = true;
        ":!numbered:".to_string()
    }

    fn show_section_numbers(&self, toggles: &mut RenderToggles) -> String {
        toggles.hide_section_numbers = false;
        ":numbered:".to_string()
    }
}
