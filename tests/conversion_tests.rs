use markshift::readers::asciidoc::asciidoc_reader;
use markshift::resolver::{Resolver, convert_between};
use markshift::writers::Format;
use markshift::writers::asciidoc::AsciidocWriter;
use markshift::writers::html::HtmlWriter;
use rstest::rstest;

#[test]
fn test_section_line_renders_as_asciidoc() {
    let resolver = Resolver::new(asciidoc_reader(), AsciidocWriter);
    let conversion = resolver.convert("== Title").unwrap();
    assert_eq!(conversion.output, "== Title");
    assert!(conversion.diagnostics.is_empty());
}

#[test]
fn test_bold_html_renders_as_asciidoc() {
    let conversion = convert_between(Format::Html, Format::Asciidoc, "<b>hi</b>").unwrap();
    assert_eq!(conversion.output, "*hi*");
}

#[rstest]
#[case("just text")]
#[case("nothing here matches\nany rule at all")]
#[case("trailing newline survives\n")]
fn test_unrecognized_content_is_unchanged(#[case] source: &str) {
    let conversion = convert_between(Format::Asciidoc, Format::Html, source).unwrap();
    assert_eq!(conversion.output, source);
    assert!(conversion.diagnostics.is_empty());
}

#[test]
fn test_unterminated_block_completes_with_diagnostic() {
    let source = "....\nline one\nline two";
    let conversion = convert_between(Format::Asciidoc, Format::Html, source).unwrap();
    // the whole block, fence included, comes out as one verbatim segment
    assert_eq!(conversion.output, source);
    assert_eq!(conversion.diagnostics.len(), 1);
    assert!(conversion.diagnostics[0].message.contains("unterminated"));
    assert_eq!(conversion.diagnostics[0].line, 1);
}

#[test]
fn test_hidden_uri_scheme_applies_to_later_links_only() {
    let source = "https://one.example\n:hide-uri-scheme:\nhttps://two.example";
    let conversion = convert_between(Format::Asciidoc, Format::Asciidoc, source).unwrap();
    assert_eq!(
        conversion.output,
        "link:https://one.example[]\n:hide-uri-scheme:\nlink:https://two.example[two.example]"
    );
}

#[test]
fn test_fresh_pass_shows_uri_scheme_again() {
    let resolver = Resolver::new(asciidoc_reader(), AsciidocWriter);
    let hidden = resolver
        .convert(":hide-uri-scheme:\nhttps://example.com")
        .unwrap();
    assert!(hidden.output.ends_with("link:https://example.com[example.com]"));
    let fresh = resolver.convert("https://example.com").unwrap();
    assert_eq!(fresh.output, "link:https://example.com[]");
}

#[test]
fn test_section_numbering_toggles_mid_pass() {
    let source = "== 1.1 Alpha\n:!numbered:\n== 1.2 Beta\n:numbered:\n== 1.3 Gamma";
    let conversion = convert_between(Format::Asciidoc, Format::Asciidoc, source).unwrap();
    assert_eq!(
        conversion.output,
        "== 1.1 Alpha\n:!numbered:\n== Beta\n:numbered:\n== 1.3 Gamma"
    );
}

#[test]
fn test_convert_is_deterministic_across_calls() {
    let resolver = Resolver::new(asciidoc_reader(), HtmlWriter);
    let source = ":!numbered:\n== 1.2 Setup\n\n*important*\n";
    let first = resolver.convert(source).unwrap();
    // an unrelated conversion in between must not influence the next one
    resolver.convert(":hide-uri-scheme:\nhttps://example.com").unwrap();
    let second = resolver.convert(source).unwrap();
    assert_eq!(first.output, second.output);
}

#[test]
fn test_document_asciidoc_to_html() {
    let source = "= Document\n\nfirst paragraph\n\n[source,rust]\n----\nfn main() {}\n----\n\nimage::logo.png[Logo,64,64]\n";
    let conversion = convert_between(Format::Asciidoc, Format::Html, source).unwrap();
    assert_eq!(
        conversion.output,
        "<h1>Document</h1>\n\nfirst paragraph\n\n\
         <pre><code class=\"language-rust\">fn main() {}</code></pre>\n\n\
         <img src=\"logo.png\" alt=\"Logo\" width=\"64\" height=\"64\">\n"
    );
    assert!(conversion.diagnostics.is_empty());
}

#[test]
fn test_resolvers_run_independently_on_threads() {
    let handles: Vec<_> = (0..4)
        .map(|i| {
            std::thread::spawn(move || {
                let resolver = Resolver::new(asciidoc_reader(), AsciidocWriter);
                // half the threads hide the scheme, half do not
                let source = if i % 2 == 0 {
                    ":hide-uri-scheme:\nhttps://example.com"
                } else {
                    "https://example.com"
                };
                (i, resolver.convert(source).unwrap().output)
            })
        })
        .collect();
    for handle in handles {
        let (i, output) = handle.join().unwrap();
        if i % 2 == 0 {
            assert!(output.ends_with("link:https://example.com[example.com]"));
        } else {
            assert_eq!(output, "link:https://example.com[]");
        }
    }
}
