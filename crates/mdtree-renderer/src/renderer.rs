//! Markdown event renderer.

use std::collections::HashMap;
use std::fmt::Write;
use std::path::PathBuf;

use pulldown_cmark::{CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};

use crate::html::{self, AlertKind};
use crate::image::{ImageRewriter, RewriteError};
use crate::state::{CodeBlockState, HeadingState, ImageState, TableState, TocEntry, escape_html};
use crate::util::heading_level_to_num;

/// Result of rendering markdown.
#[derive(Clone, Debug)]
pub struct RenderResult {
    /// Rendered HTML body.
    pub html: String,
    /// Table of contents entries in document order.
    pub toc: Vec<TocEntry>,
}

/// Error returned when rendering fails.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The image rewriter rejected an image source.
    #[error("Failed to rewrite image '{src}': {source}")]
    ImageRewrite {
        /// Image source as written in the document.
        src: String,
        /// Error returned by the rewriter.
        #[source]
        source: RewriteError,
    },
    /// Syntax highlighting failed for a code block.
    #[error("Failed to highlight {language} code block: {source}")]
    Highlight {
        /// Language of the code block, `text` when none was given.
        language: String,
        #[source]
        source: syntect::Error,
    },
}

/// Markdown features the renderer honors.
///
/// [`Default`] enables the GitHub Flavored Markdown set: heading IDs, fenced
/// code languages, tables, strikethrough, task lists and alerts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct RenderFeatures {
    /// Write `id` attributes on headings.
    pub heading_ids: bool,
    /// Turn fenced code info strings into `language-*` classes.
    pub fenced_code_lang: bool,
    /// Highlight code blocks with `syntax-*` classed spans inside
    /// `<div class="codehilite">`.
    pub code_hilite: bool,
    /// Pipe tables.
    pub tables: bool,
    /// `~~strikethrough~~`.
    pub strikethrough: bool,
    /// `- [x]` task lists.
    pub tasklists: bool,
    /// Smart quotes and dashes.
    pub smart_punctuation: bool,
    /// Definition lists.
    pub definition_lists: bool,
    /// `> [!NOTE]` callouts.
    pub alerts: bool,
    /// `{#id .class}` heading attributes.
    pub heading_attributes: bool,
    /// `[^name]` footnotes.
    pub footnotes: bool,
}

impl RenderFeatures {
    /// Every feature disabled; plain `CommonMark`.
    #[must_use]
    pub fn commonmark() -> Self {
        Self {
            heading_ids: false,
            fenced_code_lang: false,
            code_hilite: false,
            tables: false,
            strikethrough: false,
            tasklists: false,
            smart_punctuation: false,
            definition_lists: false,
            alerts: false,
            heading_attributes: false,
            footnotes: false,
        }
    }

    /// Parser options for these features.
    #[must_use]
    pub fn parser_options(&self) -> Options {
        let flags = [
            (self.tables, Options::ENABLE_TABLES),
            (self.strikethrough, Options::ENABLE_STRIKETHROUGH),
            (self.tasklists, Options::ENABLE_TASKLISTS),
            (self.smart_punctuation, Options::ENABLE_SMART_PUNCTUATION),
            (self.definition_lists, Options::ENABLE_DEFINITION_LIST),
            (self.alerts, Options::ENABLE_GFM),
            (self.heading_attributes, Options::ENABLE_HEADING_ATTRIBUTES),
            (self.footnotes, Options::ENABLE_FOOTNOTES),
        ];
        flags
            .into_iter()
            .filter(|(enabled, _)| *enabled)
            .fold(Options::empty(), |acc, (_, flag)| acc | flag)
    }
}

impl Default for RenderFeatures {
    fn default() -> Self {
        Self {
            heading_ids: true,
            fenced_code_lang: true,
            tables: true,
            strikethrough: true,
            tasklists: true,
            alerts: true,
            ..Self::commonmark()
        }
    }
}

/// Markdown to HTML renderer.
///
/// Collects table of contents entries while rendering and optionally routes
/// every image through an [`ImageRewriter`].
pub struct MarkdownRenderer {
    output: String,
    features: RenderFeatures,
    code: CodeBlockState,
    table: TableState,
    image: ImageState,
    heading: HeadingState,
    heading_classes: Vec<String>,
    pending_image: Option<(String, String)>,
    rewriter: Option<(Box<dyn ImageRewriter>, PathBuf)>,
    footnotes: HashMap<String, usize>,
    /// Stack of alert kinds for nested blockquotes (regular blockquote uses None).
    alert_stack: Vec<Option<AlertKind>>,
    error: Option<RenderError>,
}

impl MarkdownRenderer {
    /// Create a renderer with the default feature set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            output: String::with_capacity(4096),
            features: RenderFeatures::default(),
            code: CodeBlockState::default(),
            table: TableState::default(),
            image: ImageState::default(),
            heading: HeadingState::default(),
            heading_classes: Vec::new(),
            pending_image: None,
            rewriter: None,
            footnotes: HashMap::new(),
            alert_stack: Vec::new(),
            error: None,
        }
    }

    /// Replace the feature set.
    #[must_use]
    pub fn with_features(mut self, features: RenderFeatures) -> Self {
        self.features = features;
        self
    }

    /// Route image sources through `rewriter`, resolving against `base_dir`.
    #[must_use]
    pub fn with_image_rewriter<R>(mut self, rewriter: R, base_dir: impl Into<PathBuf>) -> Self
    where
        R: ImageRewriter + 'static,
    {
        self.rewriter = Some((Box::new(rewriter), base_dir.into()));
        self
    }

    /// Parser options for the configured features.
    #[must_use]
    pub fn parser_options(&self) -> Options {
        self.features.parser_options()
    }

    /// Create a configured parser for the given markdown text.
    #[must_use]
    pub fn create_parser<'a>(&self, markdown: &'a str) -> Parser<'a> {
        Parser::new_ext(markdown, self.parser_options())
    }

    /// Render markdown text directly using configured parser options.
    pub fn render_markdown(&mut self, markdown: &str) -> Result<RenderResult, RenderError> {
        let parser = self.create_parser(markdown);
        self.render(parser)
    }

    /// Render markdown events and return the result.
    ///
    /// Rendering state is reset afterwards, so the renderer can be reused.
    pub fn render<'a, I>(&mut self, events: I) -> Result<RenderResult, RenderError>
    where
        I: Iterator<Item = Event<'a>>,
    {
        for event in events {
            self.process_event(event);
        }

        let html = std::mem::take(&mut self.output);
        let toc = self.heading.take_toc();
        self.heading = HeadingState::default();
        self.footnotes.clear();
        self.alert_stack.clear();

        match self.error.take() {
            Some(err) => Err(err),
            None => Ok(RenderResult { html, toc }),
        }
    }

    /// Push content to output or heading buffer based on context.
    fn push_inline(&mut self, content: &str) {
        if self.heading.is_active() {
            self.heading.push_html(content);
        } else {
            self.output.push_str(content);
        }
    }

    fn process_event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start_tag(tag),
            Event::End(tag) => self.end_tag(tag),
            Event::Text(text) | Event::InlineMath(text) | Event::DisplayMath(text) => {
                self.text(&text);
            }
            Event::Code(code) => self.inline_code(&code),
            Event::Html(html) | Event::InlineHtml(html) => self.raw_html(&html),
            Event::SoftBreak => self.soft_break(),
            Event::HardBreak => self.push_inline("<br>"),
            Event::Rule => self.output.push_str("<hr>"),
            Event::TaskListMarker(checked) => html::task_list_marker(checked, &mut self.output),
            Event::FootnoteReference(name) => {
                let number = self.footnote_number(&name);
                let mut marker = String::new();
                html::footnote_reference(&name, number, &mut marker);
                self.push_inline(&marker);
            }
        }
    }

    #[allow(clippy::too_many_lines)]
    fn start_tag(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => self.output.push_str("<p>"),
            Tag::Heading {
                level, id, classes, ..
            } => {
                self.heading_classes = classes.iter().map(ToString::to_string).collect();
                self.heading
                    .start_heading(heading_level_to_num(level), id.map(|id| id.to_string()));
            }
            Tag::BlockQuote(kind) => {
                if let Some(bq_kind) = kind {
                    let alert_kind = AlertKind::from(bq_kind);
                    self.alert_stack.push(Some(alert_kind));
                    html::alert_start(alert_kind, &mut self.output);
                } else {
                    self.alert_stack.push(None);
                    self.output.push_str("<blockquote>");
                }
            }
            Tag::CodeBlock(kind) => {
                let lang = match kind {
                    CodeBlockKind::Fenced(ref info) if self.features.fenced_code_lang => info
                        .split_whitespace()
                        .next()
                        .map(|lang| lang.trim_start_matches('.').to_owned())
                        .filter(|lang| !lang.is_empty()),
                    _ => None,
                };
                self.code.start(lang);
            }
            Tag::List(start) => match start {
                Some(1) => self.output.push_str("<ol>"),
                Some(n) => {
                    let _ = write!(self.output, r#"<ol start="{n}">"#);
                }
                None => self.output.push_str("<ul>"),
            },
            Tag::Item => self.output.push_str("<li>"),
            Tag::FootnoteDefinition(name) => {
                let number = self.footnote_number(&name);
                html::footnote_definition_start(&name, number, &mut self.output);
            }
            Tag::HtmlBlock | Tag::MetadataBlock(_) => {}
            Tag::DefinitionList => self.output.push_str("<dl>"),
            Tag::DefinitionListTitle => self.output.push_str("<dt>"),
            Tag::DefinitionListDefinition => self.output.push_str("<dd>"),
            Tag::Table(alignments) => {
                self.table.start(alignments);
                self.output.push_str("<table>");
            }
            Tag::TableHead => {
                self.table.start_head();
                self.output.push_str("<thead><tr>");
            }
            Tag::TableRow => {
                self.table.start_row();
                self.output.push_str("<tr>");
            }
            Tag::TableCell => {
                let align = self.table.current_alignment_style();
                let tag = if self.table.is_in_head() { "th" } else { "td" };
                let _ = write!(self.output, "<{tag}{align}>");
            }
            Tag::Emphasis => self.push_inline("<em>"),
            Tag::Strong => self.push_inline("<strong>"),
            Tag::Strikethrough => self.push_inline("<s>"),
            Tag::Superscript => self.push_inline("<sup>"),
            Tag::Subscript => self.push_inline("<sub>"),
            Tag::Link {
                dest_url, title, ..
            } => {
                let mut link = format!(r#"<a href="{}""#, escape_html(&dest_url));
                if !title.is_empty() {
                    let _ = write!(link, r#" title="{}""#, escape_html(&title));
                }
                link.push('>');
                self.push_inline(&link);
            }
            Tag::Image {
                dest_url, title, ..
            } => {
                // Alt text is collected until the matching end tag.
                if !self.image.is_active() {
                    self.pending_image = Some((dest_url.to_string(), title.to_string()));
                }
                self.image.start();
            }
        }
    }

    fn end_tag(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => self.output.push_str("</p>"),
            TagEnd::Heading(_) => self.end_heading(),
            TagEnd::BlockQuote(_) => match self.alert_stack.pop() {
                Some(Some(_)) => html::alert_end(&mut self.output),
                _ => self.output.push_str("</blockquote>"),
            },
            TagEnd::CodeBlock => {
                let (lang, content) = self.code.end();
                let written = html::code_block(
                    lang.as_deref(),
                    &content,
                    self.features.code_hilite,
                    &mut self.output,
                );
                if let Err(source) = written
                    && self.error.is_none()
                {
                    self.error = Some(RenderError::Highlight {
                        language: lang.unwrap_or_else(|| "text".to_owned()),
                        source,
                    });
                }
            }
            TagEnd::List(ordered) => {
                self.output
                    .push_str(if ordered { "</ol>" } else { "</ul>" });
            }
            TagEnd::Item => self.output.push_str("</li>"),
            TagEnd::FootnoteDefinition => self.output.push_str("</div>"),
            TagEnd::HtmlBlock | TagEnd::MetadataBlock(_) => {}
            TagEnd::Image => self.end_image(),
            TagEnd::DefinitionList => self.output.push_str("</dl>"),
            TagEnd::DefinitionListTitle => self.output.push_str("</dt>"),
            TagEnd::DefinitionListDefinition => self.output.push_str("</dd>"),
            TagEnd::Table => self.output.push_str("</tbody></table>"),
            TagEnd::TableHead => {
                self.output.push_str("</tr></thead><tbody>");
                self.table.end_head();
            }
            TagEnd::TableRow => self.output.push_str("</tr>"),
            TagEnd::TableCell => {
                self.output.push_str(if self.table.is_in_head() {
                    "</th>"
                } else {
                    "</td>"
                });
                self.table.next_cell();
            }
            TagEnd::Emphasis => self.push_inline("</em>"),
            TagEnd::Strong => self.push_inline("</strong>"),
            TagEnd::Strikethrough => self.push_inline("</s>"),
            TagEnd::Superscript => self.push_inline("</sup>"),
            TagEnd::Subscript => self.push_inline("</sub>"),
            TagEnd::Link => self.push_inline("</a>"),
        }
    }

    fn end_heading(&mut self) {
        let Some((level, id, html)) = self.heading.complete_heading() else {
            return;
        };
        let classes = std::mem::take(&mut self.heading_classes);

        let _ = write!(self.output, "<h{level}");
        if self.features.heading_ids {
            let _ = write!(self.output, r#" id="{}""#, escape_html(&id));
        }
        if !classes.is_empty() {
            let _ = write!(self.output, r#" class="{}""#, escape_html(&classes.join(" ")));
        }
        let _ = write!(self.output, ">{}</h{level}>", html.trim());
    }

    fn end_image(&mut self) {
        let Some(alt) = self.image.end() else {
            return;
        };
        let Some((src, title)) = self.pending_image.take() else {
            return;
        };

        let src = self.rewrite_image(src);
        let mut tag = String::new();
        html::image(&src, &alt, &title, &mut tag);
        self.push_inline(&tag);
    }

    /// Apply the image rewriter, recording the first failure.
    fn rewrite_image(&mut self, src: String) -> String {
        let Some((rewriter, base_dir)) = &self.rewriter else {
            return src;
        };
        if self.error.is_some() {
            return src;
        }
        match rewriter.rewrite(&src, base_dir) {
            Ok(rewritten) => rewritten,
            Err(source) => {
                self.error = Some(RenderError::ImageRewrite {
                    src: src.clone(),
                    source,
                });
                src
            }
        }
    }

    fn footnote_number(&mut self, name: &CowStr<'_>) -> usize {
        let next = self.footnotes.len() + 1;
        *self.footnotes.entry(name.to_string()).or_insert(next)
    }

    fn text(&mut self, text: &str) {
        if self.code.is_active() {
            self.code.push_str(text);
        } else if self.image.is_active() {
            self.image.push_str(text);
        } else if self.heading.is_active() {
            self.heading.push_text(text);
            self.heading.push_html(&escape_html(text));
        } else {
            self.output.push_str(&escape_html(text));
        }
    }

    fn inline_code(&mut self, code: &str) {
        if self.image.is_active() {
            self.image.push_str(code);
            return;
        }
        if self.heading.is_active() {
            self.heading.push_text(code);
        }
        self.push_inline(&format!("<code>{}</code>", escape_html(code)));
    }

    fn raw_html(&mut self, html: &str) {
        self.push_inline(html);
    }

    fn soft_break(&mut self) {
        if self.image.is_active() {
            self.image.push_str(" ");
        } else if self.heading.is_active() {
            self.heading.push_text(" ");
            self.heading.push_html("\n");
        } else {
            self.output.push('\n');
        }
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::Path;

    fn render_html(markdown: &str) -> RenderResult {
        MarkdownRenderer::new().render_markdown(markdown).unwrap()
    }

    fn render_with(features: RenderFeatures, markdown: &str) -> RenderResult {
        MarkdownRenderer::new()
            .with_features(features)
            .render_markdown(markdown)
            .unwrap()
    }

    #[test]
    fn test_html_basic_paragraph() {
        let result = render_html("Hello, world!");
        assert_eq!(result.html, "<p>Hello, world!</p>");
    }

    #[test]
    fn test_html_heading_with_id() {
        let result = render_html("## Section Title");
        assert_eq!(result.html, r#"<h2 id="section-title">Section Title</h2>"#);
        assert_eq!(result.toc.len(), 1);
        assert_eq!(result.toc[0].level, 2);
        assert_eq!(result.toc[0].title, "Section Title");
        assert_eq!(result.toc[0].id, "section-title");
    }

    #[test]
    fn test_heading_without_ids() {
        let features = RenderFeatures {
            heading_ids: false,
            ..RenderFeatures::default()
        };
        let result = render_with(features, "# Title");
        assert_eq!(result.html, "<h1>Title</h1>");
        // Entries are still collected.
        assert_eq!(result.toc.len(), 1);
    }

    #[test]
    fn test_h1_included_in_toc() {
        let result = render_html("# Title\n\n## Section\n\n### Sub");
        let levels: Vec<_> = result.toc.iter().map(|e| e.level).collect();
        assert_eq!(levels, vec![1, 2, 3]);
    }

    #[test]
    fn test_setext_heading() {
        let result = render_html("Title\n=====\n\nBody");
        assert!(result.html.starts_with(r#"<h1 id="title">Title</h1>"#));
    }

    #[test]
    fn test_heading_attributes() {
        let features = RenderFeatures {
            heading_attributes: true,
            ..RenderFeatures::default()
        };
        let result = render_with(features, "## Install {#setup .wide}");
        assert_eq!(
            result.html,
            r#"<h2 id="setup" class="wide">Install</h2>"#
        );
        assert_eq!(result.toc[0].id, "setup");
    }

    #[test]
    fn test_duplicate_heading_ids() {
        let result = render_html("## FAQ\n\n## FAQ\n\n## FAQ");
        assert_eq!(result.toc.len(), 3);
        assert_eq!(result.toc[0].id, "faq");
        assert_eq!(result.toc[1].id, "faq-1");
        assert_eq!(result.toc[2].id, "faq-2");
    }

    #[test]
    fn test_heading_with_inline_code() {
        let result = render_html("## Install `npm`");
        assert!(result.html.contains("<code>npm</code>"));
        assert_eq!(result.toc[0].title, "Install npm");
    }

    #[test]
    fn test_heading_with_link() {
        let result = render_html("## See [docs](https://example.com)");
        assert_eq!(
            result.html,
            r#"<h2 id="see-docs">See <a href="https://example.com">docs</a></h2>"#
        );
    }

    #[test]
    fn test_html_code_block() {
        let result = render_html("```rust\nfn main() {}\n```");
        assert_eq!(
            result.html,
            "<pre><code class=\"language-rust\">fn main() {}\n</code></pre>"
        );
    }

    #[test]
    fn test_code_block_without_fenced_languages() {
        let features = RenderFeatures {
            fenced_code_lang: false,
            ..RenderFeatures::default()
        };
        let result = render_with(features, "```rust\nfn main() {}\n```");
        assert!(result.html.starts_with("<pre><code>"));
    }

    #[test]
    fn test_code_block_hilite() {
        let features = RenderFeatures {
            code_hilite: true,
            ..RenderFeatures::default()
        };
        let result = render_with(features, "    indented");
        assert!(result.html.starts_with(r#"<div class="codehilite"><pre><code>"#));
    }

    #[test]
    fn test_code_block_hilite_highlights_fenced_language() {
        let features = RenderFeatures {
            code_hilite: true,
            ..RenderFeatures::default()
        };
        let result = render_with(features, "```python
if x:
    return 1
```");
        assert!(
            result
                .html
                .starts_with(r#"<div class="codehilite"><pre><code class="language-python">"#)
        );
        assert!(result.html.contains("syntax-keyword"));
        assert!(result.html.ends_with("</code></pre></div>"));
    }

    #[test]
    fn test_html_blockquote() {
        let result = render_html("> Note");
        assert_eq!(result.html, "<blockquote><p>Note</p></blockquote>");
    }

    #[test]
    fn test_alert() {
        let result = render_html("> [!WARNING]\n> Be careful!");
        assert!(result.html.contains(r#"<div class="admonition warning">"#));
        assert!(result.html.contains("Be careful!"));
    }

    #[test]
    fn test_alert_disabled() {
        let features = RenderFeatures {
            alerts: false,
            ..RenderFeatures::default()
        };
        let result = render_with(features, "> [!NOTE]\n> text");
        assert!(result.html.contains("<blockquote>"));
        assert!(!result.html.contains("admonition"));
    }

    #[test]
    fn test_html_image() {
        let result = render_html("![Alt text](image.png)");
        assert_eq!(
            result.html,
            r#"<p><img src="image.png" alt="Alt text"></p>"#
        );
    }

    #[test]
    fn test_html_table() {
        let result = render_html("| A | B |\n|---|--:|\n| 1 | 2 |");
        assert!(result.html.contains("<table><thead><tr><th>A</th>"));
        assert!(result.html.contains(r#"<td style="text-align:right">2</td>"#));
        assert!(result.html.ends_with("</tbody></table>"));
    }

    #[test]
    fn test_tables_disabled() {
        let result = render_with(RenderFeatures::commonmark(), "| A | B |\n|---|---|\n| 1 | 2 |");
        assert!(!result.html.contains("<table>"));
    }

    #[test]
    fn test_emphasis_and_strikethrough() {
        let result = render_html("*italic* **bold** ~~gone~~");
        assert_eq!(
            result.html,
            "<p><em>italic</em> <strong>bold</strong> <s>gone</s></p>"
        );
    }

    #[test]
    fn test_lists() {
        let result = render_html("- Item 1\n- Item 2");
        assert_eq!(result.html, "<ul><li>Item 1</li><li>Item 2</li></ul>");

        let result = render_html("3. Third\n4. Fourth");
        assert!(result.html.starts_with(r#"<ol start="3">"#));
    }

    #[test]
    fn test_task_list() {
        let result = render_html("- [ ] Unchecked\n- [x] Checked");
        assert!(result.html.contains(r#"<input type="checkbox" disabled>"#));
        assert!(
            result
                .html
                .contains(r#"<input type="checkbox" checked disabled>"#)
        );
    }

    #[test]
    fn test_footnotes() {
        let features = RenderFeatures {
            footnotes: true,
            ..RenderFeatures::default()
        };
        let result = render_with(features, "Text[^a].\n\n[^a]: The note.");
        assert!(result.html.contains(r##"<a href="#fn-a">1</a>"##));
        assert!(result.html.contains(r#"<div class="footnote" id="fn-a">"#));
    }

    #[test]
    fn test_definition_list() {
        let features = RenderFeatures {
            definition_lists: true,
            ..RenderFeatures::default()
        };
        let result = render_with(features, "Term\n: Definition");
        assert!(result.html.contains("<dl><dt>Term</dt><dd>"));
    }

    #[test]
    fn test_smart_punctuation() {
        let features = RenderFeatures {
            smart_punctuation: true,
            ..RenderFeatures::default()
        };
        let result = render_with(features, "\"quoted\" -- dash");
        assert!(result.html.contains('\u{201c}'));
        assert!(result.html.contains('\u{2013}'));
    }

    #[test]
    fn test_raw_html_passthrough() {
        let result = render_html("<div class=\"x\">raw</div>");
        assert_eq!(result.html.trim_end(), "<div class=\"x\">raw</div>");
    }

    #[test]
    fn test_image_rewriter() {
        let rewriter = |src: &str, base: &Path| -> Result<String, RewriteError> {
            Ok(format!("{}/{src}", base.display()))
        };
        let result = MarkdownRenderer::new()
            .with_image_rewriter(rewriter, "/base")
            .render_markdown("![a](one.png) ![b](two.png)")
            .unwrap();
        assert!(result.html.contains(r#"src="/base/one.png""#));
        assert!(result.html.contains(r#"src="/base/two.png""#));
    }

    #[test]
    fn test_image_rewriter_error_aborts() {
        let rewriter = |src: &str, _: &Path| -> Result<String, RewriteError> {
            Err(format!("missing {src}").into())
        };
        let err = MarkdownRenderer::new()
            .with_image_rewriter(rewriter, "/base")
            .render_markdown("![a](gone.png)")
            .unwrap_err();
        let RenderError::ImageRewrite { src, source } = err else {
            panic!("expected an image rewrite error, got {err}");
        };
        assert_eq!(src, "gone.png");
        assert_eq!(source.to_string(), "missing gone.png");
    }

    #[test]
    fn test_image_in_heading() {
        let result = render_html("## Logo ![l](l.png)");
        assert_eq!(
            result.html,
            r#"<h2 id="logo">Logo <img src="l.png" alt="l"></h2>"#
        );
    }

    #[test]
    fn test_renderer_reuse_resets_ids() {
        let mut renderer = MarkdownRenderer::new();
        let first = renderer.render_markdown("## A").unwrap();
        let second = renderer.render_markdown("## A").unwrap();
        assert_eq!(first.toc[0].id, "a");
        assert_eq!(second.toc[0].id, "a");
    }

    #[test]
    fn test_parser_options_default() {
        let options = RenderFeatures::default().parser_options();
        assert!(options.contains(Options::ENABLE_TABLES));
        assert!(options.contains(Options::ENABLE_STRIKETHROUGH));
        assert!(options.contains(Options::ENABLE_TASKLISTS));
        assert!(options.contains(Options::ENABLE_GFM));
        assert!(!options.contains(Options::ENABLE_FOOTNOTES));
    }

    #[test]
    fn test_parser_options_commonmark() {
        assert!(RenderFeatures::commonmark().parser_options().is_empty());
    }
}
