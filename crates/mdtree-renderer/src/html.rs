//! HTML fragments for block elements.

use std::fmt::Write;

use pulldown_cmark::BlockQuoteKind;

use crate::highlight::highlight_code;
use crate::state::escape_html;

/// Callout kind for `> [!NOTE]` style blockquotes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AlertKind {
    Note,
    Tip,
    Important,
    Warning,
    Caution,
}

impl AlertKind {
    fn class_and_title(self) -> (&'static str, &'static str) {
        match self {
            Self::Note => ("note", "Note"),
            Self::Tip => ("tip", "Tip"),
            Self::Important => ("important", "Important"),
            Self::Warning => ("warning", "Warning"),
            Self::Caution => ("caution", "Caution"),
        }
    }
}

impl From<BlockQuoteKind> for AlertKind {
    fn from(kind: BlockQuoteKind) -> Self {
        match kind {
            BlockQuoteKind::Note => Self::Note,
            BlockQuoteKind::Tip => Self::Tip,
            BlockQuoteKind::Important => Self::Important,
            BlockQuoteKind::Warning => Self::Warning,
            BlockQuoteKind::Caution => Self::Caution,
        }
    }
}

/// Write a code block. With `hilite` the code is highlighted into classed
/// spans inside a `<div class="codehilite">` wrapper.
pub(crate) fn code_block(
    lang: Option<&str>,
    content: &str,
    hilite: bool,
    out: &mut String,
) -> Result<(), syntect::Error> {
    let code = if hilite {
        out.push_str(r#"<div class="codehilite">"#);
        highlight_code(lang, content)?
    } else {
        escape_html(content)
    };
    if let Some(lang) = lang {
        let _ = write!(
            out,
            r#"<pre><code class="language-{}">{code}</code></pre>"#,
            escape_html(lang)
        );
    } else {
        let _ = write!(out, "<pre><code>{code}</code></pre>");
    }
    if hilite {
        out.push_str("</div>");
    }
    Ok(())
}

/// Open an admonition block.
pub(crate) fn alert_start(kind: AlertKind, out: &mut String) {
    let (class, title) = kind.class_and_title();
    let _ = write!(
        out,
        r#"<div class="admonition {class}"><p class="admonition-title">{title}</p>"#
    );
}

pub(crate) fn alert_end(out: &mut String) {
    out.push_str("</div>");
}

/// Write an `<img>` element.
pub(crate) fn image(src: &str, alt: &str, title: &str, out: &mut String) {
    let title_attr = if title.is_empty() {
        String::new()
    } else {
        format!(r#" title="{}""#, escape_html(title))
    };
    let _ = write!(
        out,
        r#"<img src="{}"{title_attr} alt="{}">"#,
        escape_html(src),
        escape_html(alt)
    );
}

pub(crate) fn task_list_marker(checked: bool, out: &mut String) {
    if checked {
        out.push_str(r#"<input type="checkbox" checked disabled> "#);
    } else {
        out.push_str(r#"<input type="checkbox" disabled> "#);
    }
}

/// Write a footnote reference marker.
pub(crate) fn footnote_reference(name: &str, number: usize, out: &mut String) {
    let id = escape_html(name);
    let _ = write!(
        out,
        r##"<sup class="footnote-ref" id="fnref-{id}"><a href="#fn-{id}">{number}</a></sup>"##
    );
}

/// Open a footnote definition.
pub(crate) fn footnote_definition_start(name: &str, number: usize, out: &mut String) {
    let _ = write!(
        out,
        r#"<div class="footnote" id="fn-{}"><sup class="footnote-label">{number}</sup>"#,
        escape_html(name)
    );
}
