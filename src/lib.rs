//! Conversion between lightweight markup languages (currently AsciiDoc and
//! HTML).
//!
//! This crate provides a CLI tool (`markshift`) for converting documents
//! between formats, and library access to the conversion engine: readers
//! that recognize source-language constructs, writers that render them in a
//! target language, and the resolver that binds one of each.
//!
//! The engine is a small compiler. A frontend turns source text into
//! semantic events (a [`kinds::BlockKind`] plus content and
//! [`kinds::Flags`]), and a [`writers::Writer`] renders each event as
//! target-language text:
//!
//! - [`readers::PatternReader`] recognizes line-oriented constructs through
//!   an ordered rule table with multi-line lookahead (the AsciiDoc rule set
//!   lives in [`readers::asciidoc`]);
//! - [`readers::html::TagMapper`] produces the same events from an HTML
//!   token stream, tracking the open-tag context;
//! - [`resolver::Resolver`] wires a reader to a writer and exposes
//!   `convert`, which returns best-effort output plus any diagnostics
//!   collected during the pass.
//!
//! Adding a format means supplying one new reader and/or writer; the engine
//! itself stays untouched.
//!
//! ```
//! use markshift::resolver::Resolver;
//! use markshift::readers::asciidoc::asciidoc_reader;
//! use markshift::writers::html::HtmlWriter;
//!
//! let resolver = Resolver::new(asciidoc_reader(), HtmlWriter);
//! let conversion = resolver.convert("== Title").unwrap();
//! assert_eq!(conversion.output, "<h2>Title</h2>");
//! ```

pub mod errors;
pub mod kinds;
pub mod readers;
pub mod resolver;
pub mod writers;
