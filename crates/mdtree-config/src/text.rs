//! Small text helpers shared by configuration merging and the pipeline.

use std::collections::HashSet;

/// Trim every entry, drop blank ones and remove duplicates.
///
/// The first occurrence of each entry keeps its position.
///
/// # Examples
///
/// ```
/// use mdtree_config::clean_list;
///
/// let cleaned = clean_list([" a.css ", "", "b.css", "a.css"]);
/// assert_eq!(cleaned, vec!["a.css", "b.css"]);
/// ```
pub fn clean_list<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter_map(|item| {
            let trimmed = item.as_ref().trim();
            (!trimmed.is_empty() && seen.insert(trimmed.to_owned())).then(|| trimmed.to_owned())
        })
        .collect()
}

/// Split every entry on commas, then [`clean_list`] the pieces.
///
/// Accepts both `["a.css,b.css"]` and `["a.css", "b.css"]`.
pub fn split_list<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let pieces: Vec<String> = items
        .into_iter()
        .flat_map(|item| {
            item.as_ref()
                .split(',')
                .map(str::to_owned)
                .collect::<Vec<_>>()
        })
        .collect();
    clean_list(pieces)
}

/// Coerce a front matter value to a boolean.
///
/// `"None"`, `"False"`, `"0"` and the empty string are false, anything else
/// is true.
pub fn to_bool(value: &str) -> bool {
    !matches!(value.trim(), "" | "None" | "False" | "0")
}

/// Strip a leading byte order mark and normalize line endings to `\n`.
pub fn normalize_text(text: &str) -> String {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    if text.contains('\r') {
        text.replace("\r\n", "\n").replace('\r', "\n")
    } else {
        text.to_owned()
    }
}
