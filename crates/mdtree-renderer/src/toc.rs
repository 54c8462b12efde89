//! Table of contents markup.

use std::fmt::Write;

use crate::state::{TocEntry, escape_html};

/// Render TOC entries as nested lists inside `<div class="toc">`.
///
/// Nesting follows heading levels: a deeper heading opens a child list under
/// the previous entry, a shallower one closes lists until a matching level is
/// found. Returns an empty string when there are no entries.
///
/// # Examples
///
/// ```
/// use mdtree_renderer::{TocEntry, render_toc};
///
/// let toc = render_toc(&[TocEntry {
///     level: 1,
///     title: "Intro".to_owned(),
///     id: "intro".to_owned(),
/// }]);
/// assert!(toc.contains(r##"<a href="#intro">Intro</a>"##));
/// ```
pub fn render_toc(entries: &[TocEntry]) -> String {
    if entries.is_empty() {
        return String::new();
    }

    let mut html = String::from("<div class=\"toc\">\n");
    // Levels of the currently open <ul> elements.
    let mut open: Vec<u8> = Vec::new();

    for entry in entries {
        while open.last().is_some_and(|&level| level > entry.level) {
            html.push_str("</li>\n</ul>\n");
            open.pop();
        }
        if open.last() == Some(&entry.level) {
            html.push_str("</li>\n");
        } else {
            html.push_str("<ul>\n");
            open.push(entry.level);
        }
        let _ = write!(
            html,
            r##"<li><a href="#{}">{}</a>"##,
            escape_html(&entry.id),
            escape_html(&entry.title)
        );
    }

    while open.pop().is_some() {
        html.push_str("</li>\n</ul>\n");
    }
    html.push_str("</div>\n");
    html
}
