//! The resolver binds one reader (or mapper) to one writer and performs
//! end-to-end conversion. It is the only place aware of both concrete ends;
//! everything else talks through the [`Reader`] and [`Writer`] traits, which
//! is what lets a new language pair slot in without touching the engine.

use crate::errors::{ConversionError, Diagnostic};
use crate::readers::asciidoc::asciidoc_reader;
use crate::readers::html::TagMapper;
use crate::readers::Reader;
use crate::writers::asciidoc::AsciidocWriter;
use crate::writers::html::HtmlWriter;
use crate::writers::{Format, RenderToggles, Writer};

/// Everything scoped to one conversion pass: the rendering toggles and the
/// diagnostics collected along the way. A fresh `Pass` is created per
/// `convert` call, so passes never leak state into one another.
#[derive(Debug, Default)]
pub struct Pass {
    pub toggles: RenderToggles,
    pub diagnostics: Vec<Diagnostic>,
}

/// The outcome of a conversion: best-effort output plus any recoverable
/// problems found along the way.
#[derive(Debug)]
pub struct Conversion {
    pub output: String,
    pub diagnostics: Vec<Diagnostic>,
}

/// Binds a reader to a writer for a fixed language pair.
///
/// `convert` is deterministic and side-effect free: all pass state lives in
/// the `Pass` it creates, so repeated or interleaved calls cannot influence
/// each other, and separate `Resolver` instances can run on separate
/// threads.
pub struct Resolver<R, W> {
    reader: R,
    writer: W,
}

impl<R: Reader, W: Writer> Resolver<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Resolver { reader, writer }
    }

    pub fn convert(&self, source: &str) -> Result<Conversion, ConversionError> {
        let mut pass = Pass::default();
        let output = self.reader.feed(source, &self.writer, &mut pass)?;
        Ok(Conversion {
            output,
            diagnostics: pass.diagnostics,
        })
    }
}

/// Convenience for callers that pick formats at runtime (the CLI): wires
/// the stock reader and writer for the pair and converts.
pub fn convert_between(
    from: Format,
    to: Format,
    source: &str,
) -> Result<Conversion, ConversionError> {
    let reader: Box<dyn Reader> = match from {
        Format::Asciidoc => Box::new(asciidoc_reader()),
        Format::Html => Box::new(TagMapper::new()),
    };
    let writer: Box<dyn Writer> = match to {
        Format::Asciidoc => Box::new(AsciidocWriter),
        Format::Html => Box::new(HtmlWriter),
    };
    let mut pass = Pass::default();
    let output = reader.feed(source, writer.as_ref(), &mut pass)?;
    Ok(Conversion {
        output,
        diagnostics: pass.diagnostics,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_is_deterministic() {
        let resolver = Resolver::new(asciidoc_reader(), HtmlWriter);
        let source = "== Title\n\njust text\n";
        let first = resolver.convert(source).unwrap();
        let second = resolver.convert(source).unwrap();
        assert_eq!(first.output, second.output);
    }

    #[test]
    fn test_toggles_do_not_leak_across_passes() {
        let resolver = Resolver::new(asciidoc_reader(), AsciidocWriter);
        let hidden = resolver
            .convert(":hide-uri-scheme:\nhttps://example.com")
            .unwrap();
        assert!(hidden.output.contains("link:https://example.com[example.com]"));
        // a fresh pass starts with the scheme shown again
        let fresh = resolver.convert("https://example.com").unwrap();
        assert!(fresh.output.contains("link:https://example.com[]"));
    }

    #[test]
    fn test_convert_between_pairs() {
        let conversion =
            convert_between(Format::Asciidoc, Format::Html, "== Title").unwrap();
        assert_eq!(conversion.output, "<h2>Title</h2>");
        let conversion = convert_between(Format::Html, Format::Asciidoc, "<b>hi</b>").unwrap();
        assert_eq!(conversion.output, "*hi*");
    }
}
