//! Page title detection.

use std::sync::LazyLock;

use mdtree_config::strip_fenced;
use regex::Regex;

/// Title used when the document has no recognizable heading.
pub const DEFAULT_TITLE: &str = "MdTree";

static H1_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^ *#([^#\n][^\n]*?)#* *(?:\n|$)").unwrap());
static H2_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^ *##([^#\n][^\n]*?)#* *(?:\n|$)").unwrap());
static SETEXT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([^\n]+)\n *[=-]+ *(?:\n|$)").unwrap());

/// Guess a page title from the start of a markdown document.
///
/// Looks at the first line after any fenced front matter and leading blank
/// lines: an `# H1`, then an `## H2`, then a setext heading. Returns
/// [`DEFAULT_TITLE`] when none match.
///
/// # Examples
///
/// ```
/// use mdtree_core::extract_title;
///
/// assert_eq!(extract_title("\n\n# Getting Started ##\n"), "Getting Started");
/// assert_eq!(extract_title("Overview\n========\n"), "Overview");
/// assert_eq!(extract_title("plain text"), "MdTree");
/// ```
pub fn extract_title(text: &str) -> String {
    let body = skip_blank_lines(strip_fenced(text).unwrap_or(text));

    [&*H1_RE, &*H2_RE, &*SETEXT_RE]
        .into_iter()
        .find_map(|re| {
            re.captures(body)
                .map(|caps| caps[1].trim().to_owned())
                .filter(|title| !title.is_empty())
        })
        .unwrap_or_else(|| DEFAULT_TITLE.to_owned())
}

/// Drop leading lines that hold only whitespace.
fn skip_blank_lines(text: &str) -> &str {
    let mut rest = text;
    while let Some((line, tail)) = rest.split_once('\n') {
        if !line.trim().is_empty() {
            break;
        }
        rest = tail;
    }
    rest
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_h1() {
        assert_eq!(extract_title("# Title"), "Title");
        assert_eq!(extract_title("# Title #"), "Title");
        assert_eq!(extract_title("# Title ###   \n\nbody"), "Title");
        assert_eq!(extract_title("#Tight"), "Tight");
    }

    #[test]
    fn test_h1_after_blank_lines_and_spaces() {
        assert_eq!(extract_title("\n\n\n   # Indented\n"), "Indented");
    }

    #[test]
    fn test_whitespace_only_lines_skipped() {
        assert_eq!(extract_title("   \n# Real Title"), "Real Title");
        assert_eq!(extract_title("\t\n# Real Title"), "Real Title");
        assert_eq!(extract_title(" \r\n\n  \t \n## Later Title\n"), "Later Title");
    }

    #[test]
    fn test_h1_pattern_does_not_match_h2() {
        assert_eq!(extract_title("## Second\n"), "Second");
        assert_eq!(extract_title("### Third\n"), DEFAULT_TITLE);
    }

    #[test]
    fn test_setext() {
        assert_eq!(extract_title("Title\n=====\n"), "Title");
        assert_eq!(extract_title("Sub Title\n---\nbody"), "Sub Title");
        assert_eq!(extract_title("Title  \n  ==  \n"), "Title");
    }

    #[test]
    fn test_heading_must_be_first() {
        assert_eq!(extract_title("intro\n\n# Later"), DEFAULT_TITLE);
    }

    #[test]
    fn test_fenced_front_matter_skipped() {
        assert_eq!(
            extract_title("---\ntitle: ignored\n---\n\n# Real Title\n"),
            "Real Title"
        );
    }

    #[test]
    fn test_fallback() {
        assert_eq!(extract_title(""), DEFAULT_TITLE);
        assert_eq!(extract_title("#\n"), DEFAULT_TITLE);
        assert_eq!(extract_title("just text"), DEFAULT_TITLE);
    }
}
