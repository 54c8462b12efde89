//! HTML page template rendering.
//!
//! Fills the page template with the rendered body, the table of contents and
//! the inlined base assets. Templates use `minijinja` syntax and must reference
//! every placeholder in [`PLACEHOLDERS`].

use std::fmt::Write;

use mdtree_renderer::escape_html;
use minijinja::{Environment, UndefinedBehavior, Value, context};

/// Placeholders every page template must use.
pub const PLACEHOLDERS: [&str; 8] = [
    "title",
    "content",
    "toc_content",
    "css_base",
    "js_base",
    "css_more",
    "js_more",
    "generated_at",
];

const TEMPLATE_NAME: &str = "page.html";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Error returned when a page cannot be rendered.
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    #[error("Page template is missing the '{0}' placeholder")]
    MissingPlaceholder(&'static str),
    #[error("Invalid page template: {0}")]
    Template(#[from] minijinja::Error),
}

/// All data needed to render a page.
#[derive(Clone, Debug, Default)]
pub struct PageData {
    /// Page title; escaped on output.
    pub title: String,
    /// Rendered markdown body.
    pub content: String,
    /// Rendered table of contents.
    pub toc_html: String,
    /// Base stylesheet, inlined.
    pub css_base: String,
    /// Base script, inlined.
    pub js_base: String,
    /// Extra stylesheet URLs.
    pub css: Vec<String>,
    /// Extra script URLs.
    pub js: Vec<String>,
    /// Generation time, see [`timestamp`].
    pub generated_at: String,
}

/// Current local time formatted as `YYYY-MM-DD HH:MM:SS`.
#[must_use]
pub fn timestamp() -> String {
    chrono::Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// Render `<link>` elements for extra stylesheets, one per line.
#[must_use]
pub fn css_links(urls: &[String]) -> String {
    let mut html = String::new();
    for (i, url) in urls.iter().enumerate() {
        if i > 0 {
            html.push('\n');
        }
        let _ = write!(
            html,
            r#"<link href="{}" rel="stylesheet" type="text/css" />"#,
            escape_html(url)
        );
    }
    html
}

/// Render `<script>` elements for extra scripts, one per line.
#[must_use]
pub fn js_links(urls: &[String]) -> String {
    let mut html = String::new();
    for (i, url) in urls.iter().enumerate() {
        if i > 0 {
            html.push('\n');
        }
        let _ = write!(
            html,
            r#"<script type="text/javascript" src="{}"></script>"#,
            escape_html(url)
        );
    }
    html
}

/// Render a complete HTML page from `template`.
pub fn render_page(template: &str, page: &PageData) -> Result<String, PageError> {
    let mut env = Environment::new();
    env.set_undefined_behavior(UndefinedBehavior::Strict);
    env.add_template(TEMPLATE_NAME, template)?;
    let tmpl = env.get_template(TEMPLATE_NAME)?;

    let declared = tmpl.undeclared_variables(false);
    if let Some(missing) = PLACEHOLDERS.iter().find(|name| !declared.contains(**name)) {
        return Err(PageError::MissingPlaceholder(*missing));
    }

    let html = tmpl.render(context! {
        title => page.title,
        content => Value::from_safe_string(page.content.clone()),
        toc_content => Value::from_safe_string(page.toc_html.clone()),
        css_base => Value::from_safe_string(page.css_base.clone()),
        js_base => Value::from_safe_string(page.js_base.clone()),
        css_more => Value::from_safe_string(css_links(&page.css)),
        js_more => Value::from_safe_string(js_links(&page.js)),
        generated_at => page.generated_at,
    })?;
    Ok(html)
}
