//! Markdown renderer: turns a markdown document into a complete HTML page.
//!
//! pulldown-cmark does the parsing and the bulk of the HTML output. This
//! module rewrites its event stream on the way through so the page gets
//! what the plain HTML writer does not produce on its own:
//!
//! - generated `id`s on every heading without an explicit `{#id}`,
//! - numbered footnote references that link to an end-of-document
//!   footnote list, each entry carrying a `↩` link back to its reference,
//! - the `<head>` boilerplate: title, stylesheet, prism.js highlighting.

use std::collections::{HashMap, HashSet};
use std::fmt::Write as _;

use pulldown_cmark::{CowStr, Event, HeadingLevel, Options, Parser, Tag, TagEnd, html};
use pulldown_cmark_escape::{escape_href, escape_html};
use tracing::debug;

use crate::anchor::AnchorSet;

/// Glyph for the link from a footnote back to where it was referenced.
pub const FOOTNOTE_RETURN_GLYPH: &str = "↩";

/// prism.js 1.28.0 from cdnjs, pinned by SRI hash. Code blocks are
/// highlighted client-side when the browser loads the page.
const PRISM_HEAD: &str = concat!(
    r#"<link rel="stylesheet" href="https://cdnjs.cloudflare.com/ajax/libs/prism/1.28.0/themes/prism.min.css" integrity="sha512-tN7Ec6zAFaVSG3TpNAKtk4DOHNpSwKHxxrsiw4GHKESGPs5njn/0sMCUMl2svV4wo4BK/rCP7juYz+zx+l6oeQ==" crossorigin="anonymous" referrerpolicy="no-referrer" />"#,
    r#"<script src="https://cdnjs.cloudflare.com/ajax/libs/prism/1.28.0/components/prism-core.min.js" integrity="sha512-9khQRAUBYEJDCDVP2yw3LRUQvjJ0Pjx0EShmaQjcHa6AXiOv6qHQu9lCAIR8O+/D8FtaCoJ2c0Tf9Xo7hYH01Q==" crossorigin="anonymous" referrerpolicy="no-referrer"></script>"#,
    r#"<script src="https://cdnjs.cloudflare.com/ajax/libs/prism/1.28.0/plugins/autoloader/prism-autoloader.min.js" integrity="sha512-fTl/qcO1VgvKtOMApX2PdZzkziyr2stM65GYPLGuYMnuMm1z2JLJG6XVU7C/mR+E7xBUqCivykuhlzfqxXBXbg==" crossorigin="anonymous" referrerpolicy="no-referrer"></script>"#,
);

/// Markdown extensions enabled for every document.
fn markdown_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_HEADING_ATTRIBUTES
        | Options::ENABLE_DEFINITION_LIST
        | Options::ENABLE_SMART_PUNCTUATION
        | Options::ENABLE_MATH
        | Options::ENABLE_SUPERSCRIPT
        | Options::ENABLE_SUBSCRIPT
}

/// Renders raw markdown bytes into a standalone HTML page.
///
/// Invalid UTF-8 is replaced rather than rejected; malformed markdown is
/// rendered however pulldown-cmark sees fit. `title` and `stylesheet` are
/// emitted as given.
pub fn render_page(markdown: &[u8], title: &str, stylesheet: &str) -> Vec<u8> {
    let source = String::from_utf8_lossy(markdown);
    let body = render_body(&source);

    let mut page = String::with_capacity(body.len() + PRISM_HEAD.len() + 512);
    page.push_str("<!DOCTYPE html>\n<html>\n<head>\n  <title>");
    push_escaped_html(&mut page, title);
    page.push_str("</title>\n");
    let _ = writeln!(
        page,
        r#"  <meta name="generator" content="litex {}">"#,
        env!("CARGO_PKG_VERSION")
    );
    page.push_str("  <meta charset=\"utf-8\">\n");
    page.push_str(r#"  <link rel="stylesheet" type="text/css" href=""#);
    push_escaped_href(&mut page, stylesheet);
    page.push_str("\">\n  ");
    page.push_str(PRISM_HEAD);
    page.push_str("\n</head>\n<body>\n\n");
    page.push_str(&body);
    page.push_str("\n</body>\n</html>\n");

    page.into_bytes()
}

/// Renders markdown into the HTML that goes inside `<body>`.
pub fn render_body(source: &str) -> String {
    let events: Vec<Event<'_>> = Parser::new_ext(source, markdown_options()).collect();

    // Explicit ids are claimed up front so a generated id never shadows
    // one that appears later in the document.
    let mut anchors = AnchorSet::new();
    for event in &events {
        if let Event::Start(Tag::Heading { id: Some(id), .. }) = event {
            anchors.reserve(id);
        }
    }

    let mut rewriter = Rewriter::new(anchors);
    for event in events {
        rewriter.feed(event);
    }
    rewriter.finish()
}

// Writing into a String cannot fail.
fn push_escaped_html(out: &mut String, text: &str) {
    let _ = escape_html(out, text);
}

fn push_escaped_href(out: &mut String, text: &str) {
    let _ = escape_href(out, text);
}

/// A heading whose id can only be computed once its text is known.
struct PendingHeading<'a> {
    level: HeadingLevel,
    classes: Vec<CowStr<'a>>,
    attrs: Vec<(CowStr<'a>, Option<CowStr<'a>>)>,
    inner: Vec<Event<'a>>,
    text: String,
}

/// A footnote definition lifted out of the body.
struct Definition<'a> {
    label: String,
    events: Vec<Event<'a>>,
}

/// Per-label footnote bookkeeping.
struct FootnoteSlot {
    number: usize,
    references: usize,
}

/// Assigns footnote numbers in order of first appearance.
#[derive(Default)]
struct FootnoteIndex {
    slots: HashMap<String, FootnoteSlot>,
}

impl FootnoteIndex {
    /// Number for `label`, allocating the next one if unseen.
    ///
    /// Labels match case-insensitively, as footnote labels do in GFM.
    fn number(&mut self, label: &str) -> usize {
        let next = self.slots.len() + 1;
        self.slots
            .entry(label.to_lowercase())
            .or_insert(FootnoteSlot {
                number: next,
                references: 0,
            })
            .number
    }

    /// Number for `label` if it has been referenced at least once.
    fn referenced(&self, label: &str) -> Option<usize> {
        self.slots
            .get(&label.to_lowercase())
            .filter(|slot| slot.references > 0)
            .map(|slot| slot.number)
    }

    /// Markup for one in-text reference to `label`.
    ///
    /// The first reference gets `fnref:N`; repeats get `fnref:N-2`, … so
    /// element ids stay unique.
    fn reference(&mut self, label: &str) -> String {
        let number = self.number(label);
        let references = match self.slots.get_mut(&label.to_lowercase()) {
            Some(slot) => {
                slot.references += 1;
                slot.references
            }
            None => 1,
        };
        let ref_id = if references == 1 {
            format!("fnref:{number}")
        } else {
            format!("fnref:{number}-{references}")
        };
        format!(
            r##"<sup class="footnote-ref" id="{ref_id}"><a href="#fn:{number}">{number}</a></sup>"##
        )
    }
}

/// Streaming rewrite of pulldown-cmark events.
///
/// Events are routed to the innermost open collector: a pending heading,
/// else the innermost open footnote definition, else the document body.
struct Rewriter<'a> {
    anchors: AnchorSet,
    footnotes: FootnoteIndex,
    body: Vec<Event<'a>>,
    heading: Option<PendingHeading<'a>>,
    open_definitions: Vec<Definition<'a>>,
    definitions: Vec<Definition<'a>>,
    /// Set right after a definition is lifted out; cleared by any output.
    lifted: bool,
}

impl<'a> Rewriter<'a> {
    fn new(anchors: AnchorSet) -> Self {
        Self {
            anchors,
            footnotes: FootnoteIndex::default(),
            body: Vec::new(),
            heading: None,
            open_definitions: Vec::new(),
            definitions: Vec::new(),
            lifted: false,
        }
    }

    fn target(&mut self) -> &mut Vec<Event<'a>> {
        if let Some(heading) = self.heading.as_mut() {
            &mut heading.inner
        } else if let Some(definition) = self.open_definitions.last_mut() {
            &mut definition.events
        } else {
            &mut self.body
        }
    }

    fn emit(&mut self, event: Event<'a>) {
        self.lifted = false;
        self.target().push(event);
    }

    /// Closes a container, dropping it instead when lifting a footnote
    /// definition out of it left it empty.
    fn close(&mut self, end: TagEnd) {
        if self.lifted {
            let target = self.target();
            if let Some(Event::Start(tag)) = target.last() {
                if tag.to_end() == end {
                    target.pop();
                    return;
                }
            }
        }
        self.emit(Event::End(end));
    }

    fn feed(&mut self, event: Event<'a>) {
        match event {
            // ── Headings without an explicit id ─────────────────────
            Event::Start(Tag::Heading {
                level,
                id: None,
                classes,
                attrs,
            }) => {
                self.heading = Some(PendingHeading {
                    level,
                    classes,
                    attrs,
                    inner: Vec::new(),
                    text: String::new(),
                });
            }
            Event::End(TagEnd::Heading(level)) if self.heading.is_some() => {
                let Some(heading) = self.heading.take() else {
                    return;
                };
                let id = self.anchors.unique(&heading.text);
                self.emit(Event::Start(Tag::Heading {
                    level: heading.level,
                    id: Some(CowStr::from(id)),
                    classes: heading.classes,
                    attrs: heading.attrs,
                }));
                for inner in heading.inner {
                    self.emit(inner);
                }
                self.emit(Event::End(TagEnd::Heading(level)));
            }

            // ── Footnotes ────────────────────────────────────────────
            Event::Start(Tag::FootnoteDefinition(label)) => {
                self.open_definitions.push(Definition {
                    label: label.to_string(),
                    events: Vec::new(),
                });
            }
            Event::End(TagEnd::FootnoteDefinition) => {
                if let Some(definition) = self.open_definitions.pop() {
                    self.definitions.push(definition);
                }
                self.lifted = true;
            }
            Event::FootnoteReference(label) => {
                let markup = self.footnotes.reference(&label);
                self.emit(Event::InlineHtml(CowStr::from(markup)));
            }

            // ── Everything else passes through ───────────────────────
            Event::End(end) => self.close(end),
            other => {
                if let (Some(heading), Event::Text(text) | Event::Code(text)) =
                    (self.heading.as_mut(), &other)
                {
                    heading.text.push_str(text);
                }
                self.emit(other);
            }
        }
    }

    fn finish(self) -> String {
        let mut out = String::new();
        html::push_html(&mut out, self.body.into_iter());

        if self.definitions.is_empty() {
            return out;
        }

        // Only referenced notes are listed; a return link needs a target.
        let mut numbered: Vec<(usize, Vec<Event<'a>>)> = Vec::new();
        let mut seen = HashSet::new();
        for definition in self.definitions {
            let Some(number) = self.footnotes.referenced(&definition.label) else {
                debug!(label = %definition.label, "skipping unreferenced footnote");
                continue;
            };
            if seen.insert(number) {
                numbered.push((number, definition.events));
            }
        }
        if numbered.is_empty() {
            return out;
        }
        numbered.sort_by_key(|(number, _)| *number);
        debug!(count = numbered.len(), "rendering footnotes");

        out.push_str("<div class=\"footnotes\">\n<hr>\n<ol>\n");
        for (number, mut events) in numbered {
            append_return_link(&mut events, number);
            let _ = write!(out, "<li id=\"fn:{number}\" value=\"{number}\">");
            html::push_html(&mut out, events.into_iter());
            out.push_str("</li>\n");
        }
        out.push_str("</ol>\n</div>\n");

        out
    }
}

/// Puts the `↩` link at the end of the definition's last paragraph, or
/// after its content when it does not end in one.
fn append_return_link(events: &mut Vec<Event<'_>>, number: usize) {
    let link = Event::InlineHtml(CowStr::from(format!(
        r##" <a class="footnote-return" href="#fnref:{number}">{FOOTNOTE_RETURN_GLYPH}</a>"##
    )));
    match events.last() {
        Some(Event::End(TagEnd::Paragraph)) => {
            let at = events.len() - 1;
            events.insert(at, link);
        }
        _ => events.push(link),
    }
}

#[cfg(test)]
#[path = "render_tests.rs"]
mod tests;
