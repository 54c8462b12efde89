//! Server-side syntax highlighting for code blocks.

use std::sync::LazyLock;

use syntect::html::{ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

/// Prefix of every highlight class, e.g. `syntax-keyword`.
const CLASS_STYLE: ClassStyle = ClassStyle::SpacedPrefixed { prefix: "syntax-" };

static SYNTAX_SET: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);

/// Highlight code into classed `<span>` markup.
///
/// Unknown or missing languages are treated as plain text. The returned
/// markup is HTML-escaped and ends with a newline.
pub(crate) fn highlight_code(
    language: Option<&str>,
    code: &str,
) -> Result<String, syntect::Error> {
    let syntax = language
        .and_then(|token| find_syntax(&SYNTAX_SET, token))
        .unwrap_or_else(|| SYNTAX_SET.find_syntax_plain_text());

    let mut code = code.to_owned();
    if !code.ends_with('\n') {
        code.push('\n');
    }

    let mut generator =
        ClassedHTMLGenerator::new_with_class_style(syntax, &SYNTAX_SET, CLASS_STYLE);
    for line in LinesWithEndings::from(&code) {
        generator.parse_html_for_line_which_includes_newline(line)?;
    }
    Ok(generator.finalize())
}

fn find_syntax<'a>(syntax_set: &'a SyntaxSet, token: &str) -> Option<&'a SyntaxReference> {
    let lowercase = token.to_ascii_lowercase();
    syntax_set
        .find_syntax_by_token(&lowercase)
        .or_else(|| syntax_set.find_syntax_by_name(token))
        .or_else(|| syntax_set.find_syntax_by_extension(&lowercase))
}
