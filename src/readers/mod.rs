//! Readers recognize source-language constructs and drive a bound writer.
//!
//! [`PatternReader`] is the rule-table frontend: an ordered set of
//! `(pattern, callback, BlockKind)` rules scanned line-by-line with
//! lookahead. The HTML frontend ([`html::TagMapper`]) produces the same
//! semantic events from a tag token stream instead of patterns. Both
//! implement [`Reader`], the only interface the resolver needs.

pub mod asciidoc;
pub mod html;

use log::warn;
use regex::{Captures, Regex};

use crate::errors::{CallbackError, ConversionError, Diagnostic, RegisterError};
use crate::kinds::{BlockKind, Flags};
use crate::resolver::Pass;
use crate::writers::Writer;

/// A source-language frontend: consumes source text and drives the bound
/// writer in input order, collecting diagnostics into the pass.
pub trait Reader {
    fn feed(
        &self,
        source: &str,
        writer: &dyn Writer,
        pass: &mut Pass,
    ) -> Result<String, ConversionError>;
}

/// Cursor over the lines remaining after a rule match. Callbacks advance it
/// to consume lookahead lines; consumed lines are never re-matched by other
/// rules. A per-callback budget bounds how far a single callback may read.
pub struct LineCursor<'a> {
    lines: &'a [&'a str],
    pos: usize,
    budget: Option<usize>,
    exhausted: bool,
}

impl<'a> LineCursor<'a> {
    fn new(lines: &'a [&'a str]) -> Self {
        LineCursor {
            lines,
            pos: 0,
            budget: None,
            exhausted: false,
        }
    }

    /// Consumes and returns the next line, or `None` at end of input or
    /// when the lookahead budget is spent.
    pub fn next_line(&mut self) -> Option<&'a str> {
        if self.budget == Some(0) {
            self.exhausted = true;
            return None;
        }
        let line = self.lines.get(self.pos).copied()?;
        self.pos += 1;
        if let Some(remaining) = self.budget.as_mut() {
            *remaining -= 1;
        }
        Some(line)
    }

    /// The next line without consuming it.
    pub fn peek(&self) -> Option<&'a str> {
        if self.budget == Some(0) {
            return None;
        }
        self.lines.get(self.pos).copied()
    }

    /// 1-based number of the most recently consumed line.
    pub fn line_number(&self) -> usize {
        self.pos
    }

    pub fn is_at_end(&self) -> bool {
        self.pos >= self.lines.len()
    }

    fn set_budget(&mut self, lines: usize) {
        self.budget = Some(lines);
        self.exhausted = false;
    }

    fn clear_budget(&mut self) {
        self.budget = None;
    }
}

/// What a rule callback produces: the event content plus its flags.
pub type CallbackResult = Result<(String, Flags), CallbackError>;

type RuleCallback = Box<dyn Fn(&Captures, &mut LineCursor) -> CallbackResult + Send + Sync>;

struct Rule {
    pattern: Regex,
    callback: RuleCallback,
    kind: BlockKind,
}

const DEFAULT_LOOKAHEAD_BUDGET: usize = 10_000;

/// Recognizes one source language through an ordered rule table.
///
/// Rules are tried in registration order against each line; the first rule
/// whose pattern matches anywhere in the line wins, and no other rule is
/// tried for that line. Unmatched lines pass through unchanged. A rule
/// registered with [`BlockKind::Invalid`] consumes its match and emits
/// nothing, which is how comment-like constructs are dropped.
pub struct PatternReader {
    rules: Vec<Rule>,
    lookahead_budget: usize,
}

impl PatternReader {
    pub fn new() -> Self {
        PatternReader {
            rules: Vec::new(),
            lookahead_budget: DEFAULT_LOOKAHEAD_BUDGET,
        }
    }

    /// Caps how many lookahead lines a single callback may consume.
    pub fn with_lookahead_budget(mut self, lines: usize) -> Self {
        self.lookahead_budget = lines;
        self
    }

    /// Adds a rule. Rules are immutable once registered and owned by this
    /// reader; registration order is match-priority order.
    pub fn register<F>(
        &mut self,
        pattern: &str,
        callback: F,
        kind: BlockKind,
    ) -> Result<(), RegisterError>
    where
        F: Fn(&Captures, &mut LineCursor) -> CallbackResult + Send + Sync + 'static,
    {
        self.rules.push(Rule {
            pattern: Regex::new(pattern)?,
            callback: Box::new(callback),
            kind,
        });
        Ok(())
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }
}

impl Default for PatternReader {
    fn default() -> Self {
        Self::new()
    }
}

impl Reader for PatternReader {
    fn feed(
        &self,
        source: &str,
        writer: &dyn Writer,
        pass: &mut Pass,
    ) -> Result<String, ConversionError> {
        let lines: Vec<&str> = source.lines().collect();
        let mut cursor = LineCursor::new(&lines);
        let mut segments: Vec<String> = Vec::new();

        loop {
            cursor.clear_budget();
            let Some(line) = cursor.next_line() else { break };
            let line_number = cursor.line_number();

            let matched = self
                .rules
                .iter()
                .find_map(|rule| rule.pattern.captures(line).map(|caps| (rule, caps)));
            let Some((rule, caps)) = matched else {
                segments.push(writer.passthrough(line, &Flags::new(), &pass.toggles));
                continue;
            };

            cursor.set_budget(self.lookahead_budget);
            let result = (rule.callback)(&caps, &mut cursor);
            if cursor.exhausted {
                warn!(
                    "rule at line {line_number} consumed its lookahead budget of {} lines",
                    self.lookahead_budget
                );
                pass.diagnostics.push(Diagnostic::new(
                    line_number,
                    Some(rule.kind),
                    format!("lookahead budget of {} lines exhausted", self.lookahead_budget),
                ));
            }
            cursor.clear_budget();

            match result {
                Ok(_) if rule.kind == BlockKind::Invalid => {} // dropped, never dispatched
                Ok((content, flags)) => {
                    let rendered = writer.render(rule.kind, &content, &flags, &mut pass.toggles)?;
                    // empty means the writer has no rendering for this kind
                    if !rendered.is_empty() {
                        segments.push(rendered);
                    }
                }
                Err(err) => {
                    // recoverable: everything the callback consumed, matched
                    // line included, goes out verbatim as one segment
                    warn!("recovered from rule failure at line {line_number}: {err}");
                    pass.diagnostics
                        .push(Diagnostic::new(line_number, Some(rule.kind), err.to_string()));
                    let consumed = lines[line_number - 1..cursor.line_number()].join("\n");
                    segments.push(writer.passthrough(&consumed, &Flags::new(), &pass.toggles));
                }
            }
        }

        let mut output = segments.join("\n");
        if source.ends_with('\n') && !segments.is_empty() {
            output.push('\n');
        }
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writers::asciidoc::AsciidocWriter;

    fn feed(reader: &PatternReader, source: &str) -> (String, Vec<Diagnostic>) {
        let mut pass = Pass::default();
        let output = reader.feed(source, &AsciidocWriter, &mut pass).unwrap();
        (output, pass.diagnostics)
    }

    #[test]
    fn test_cursor_walks_lines_in_order() {
        let lines = ["a", "b", "c"];
        let mut cursor = LineCursor::new(&lines);
        assert_eq!(cursor.peek(), Some("a"));
        assert_eq!(cursor.next_line(), Some("a"));
        assert_eq!(cursor.line_number(), 1);
        assert_eq!(cursor.next_line(), Some("b"));
        assert_eq!(cursor.next_line(), Some("c"));
        assert!(cursor.is_at_end());
        assert_eq!(cursor.next_line(), None);
    }

    #[test]
    fn test_cursor_budget_stops_consumption() {
        let lines = ["a", "b", "c"];
        let mut cursor = LineCursor::new(&lines);
        cursor.set_budget(2);
        assert_eq!(cursor.next_line(), Some("a"));
        assert_eq!(cursor.next_line(), Some("b"));
        assert_eq!(cursor.next_line(), None);
        assert!(cursor.exhausted);
        cursor.clear_budget();
        assert_eq!(cursor.next_line(), Some("c"));
    }

    #[test]
    fn test_unmatched_lines_pass_through() {
        let reader = PatternReader::new();
        let (output, diagnostics) = feed(&reader, "just text\nmore text");
        assert_eq!(output, "just text\nmore text");
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_first_matching_rule_wins() {
        let mut reader = PatternReader::new();
        reader
            .register(
                r"^x+$",
                |caps, _| Ok((format!("first:{}", &caps[0]), Flags::new())),
                BlockKind::Bold,
            )
            .unwrap();
        reader
            .register(
                r"^xx$",
                |caps, _| Ok((format!("second:{}", &caps[0]), Flags::new())),
                BlockKind::Italic,
            )
            .unwrap();
        let (output, _) = feed(&reader, "xx");
        assert_eq!(output, "*first:xx*");
    }

    #[test]
    fn test_invalid_kind_rule_drops_its_match() {
        let mut reader = PatternReader::new();
        reader
            .register(
                r"^//",
                |_, _| Ok((String::new(), Flags::new())),
                BlockKind::Invalid,
            )
            .unwrap();
        let (output, diagnostics) = feed(&reader, "// a comment\ntext");
        assert_eq!(output, "text");
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_callback_failure_recovers_with_diagnostic() {
        let mut reader = PatternReader::new();
        reader
            .register(
                r"^bad$",
                |_, _| Err(CallbackError::Other("boom".to_string())),
                BlockKind::Bold,
            )
            .unwrap();
        let (output, diagnostics) = feed(&reader, "bad\ngood");
        assert_eq!(output, "bad\ngood");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].line, 1);
        assert_eq!(diagnostics[0].kind, Some(BlockKind::Bold));
    }

    #[test]
    fn test_consumed_lookahead_is_not_rematched() {
        let mut reader = PatternReader::new();
        reader
            .register(
                r"^begin$",
                |_, cursor| {
                    let mut body = Vec::new();
                    while let Some(line) = cursor.next_line() {
                        if line == "end" {
                            break;
                        }
                        body.push(line.to_string());
                    }
                    Ok((body.join("\n"), Flags::new()))
                },
                BlockKind::LiteralBlock,
            )
            .unwrap();
        // "begin" inside the block must not restart the rule
        let (output, _) = feed(&reader, "begin\nbegin\nend");
        assert_eq!(output, "....\nbegin\n....");
    }

    #[test]
    fn test_bad_pattern_is_rejected_at_registration() {
        let mut reader = PatternReader::new();
        let result = reader.register(
            r"([unclosed",
            |_, _| Ok((String::new(), Flags::new())),
            BlockKind::Bold,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_lookahead_budget_surfaces_diagnostic() {
        let mut reader = PatternReader::new().with_lookahead_budget(2);
        reader
            .register(
                r"^eat$",
                |_, cursor| {
                    while cursor.next_line().is_some() {}
                    Ok(("ate".to_string(), Flags::new()))
                },
                BlockKind::Bold,
            )
            .unwrap();
        let (output, diagnostics) = feed(&reader, "eat\na\nb\nc\nd");
        // two lines consumed under the budget, the rest continue the scan
        assert_eq!(output, "*ate*\nc\nd");
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].message.contains("lookahead budget"));
    }
}
