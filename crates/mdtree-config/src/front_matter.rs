//! Document front matter parsing.
//!
//! Two syntaxes are recognized at the very top of a document:
//!
//! - A fenced block opened by `---` and closed by `---` or `...`, parsed as YAML.
//! - Bare `key: value` lines with 4-space indented continuation lines,
//!   ending at the first blank or non-matching line.
//!
//! Every value is normalized to a list of strings and keys are lowercased.

use std::collections::BTreeMap;

use serde_yaml::Value;

use crate::text::clean_list;

/// Parsed front matter: lowercase keys mapped to string lists.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrontMatter {
    entries: BTreeMap<String, Vec<String>>,
}

impl FrontMatter {
    /// Build front matter from key/value pairs.
    pub fn from_entries<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, Vec<String>)>,
        K: AsRef<str>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(key, values)| (key.as_ref().to_lowercase(), values))
                .collect(),
        }
    }

    /// All values for a key, empty if the key is absent.
    pub fn get(&self, key: &str) -> &[String] {
        self.entries.get(key).map_or(&[], Vec::as_slice)
    }

    /// First non-blank value for a key.
    pub fn first(&self, key: &str) -> Option<String> {
        clean_list(self.get(key)).into_iter().next()
    }

    /// Whether no keys were parsed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Split a document into its front matter and the remaining body.
///
/// Returns empty front matter and the whole text when none is present.
pub fn split_front_matter(text: &str) -> (FrontMatter, &str) {
    if let Some((block, body)) = split_fenced(text) {
        return match parse_fenced_block(block) {
            Some(front) => (front, body),
            None => (FrontMatter::default(), text),
        };
    }

    let (front, consumed) = parse_meta_lines(text);
    if front.is_empty() {
        (FrontMatter::default(), text)
    } else {
        (front, &text[consumed..])
    }
}

/// Return the body after a fenced front matter block, if there is one.
pub fn strip_fenced(text: &str) -> Option<&str> {
    let (block, body) = split_fenced(text)?;
    parse_fenced_block(block).map(|_| body)
}

/// Parse the inside of a `---` fence, as YAML first and as meta lines second.
///
/// A block with a line starting with `#` is a Markdown heading between two
/// rules, not front matter.
fn parse_fenced_block(block: &str) -> Option<FrontMatter> {
    if block.lines().any(|line| line.trim_start().starts_with('#')) {
        return None;
    }
    let front = parse_yaml_block(block).unwrap_or_else(|| parse_meta_lines(block).0);
    (!front.is_empty()).then_some(front)
}

/// Locate a `---` fenced block at the start of the text.
///
/// Returns `(block, body)` without the fence lines.
fn split_fenced(text: &str) -> Option<(&str, &str)> {
    let first_end = text.find('\n')?;
    if text[..first_end].trim_end() != "---" {
        return None;
    }

    let block_start = first_end + 1;
    let mut offset = block_start;
    for line in text[block_start..].split_inclusive('\n') {
        let content = line.trim_end();
        if content == "---" || content == "..." {
            return Some((&text[block_start..offset], &text[offset + line.len()..]));
        }
        offset += line.len();
    }
    None
}

/// Parse a fenced block as YAML. Returns `None` unless it is a mapping.
fn parse_yaml_block(block: &str) -> Option<FrontMatter> {
    if block.trim().is_empty() {
        return None;
    }
    let Value::Mapping(mapping) = serde_yaml::from_str::<Value>(block).ok()? else {
        return None;
    };

    let entries = mapping.into_iter().filter_map(|(key, value)| {
        let key = scalar_to_string(&key)?;
        let values = match value {
            Value::Sequence(items) => items.iter().filter_map(scalar_to_string).collect(),
            Value::Null => Vec::new(),
            other => vec![scalar_to_string(&other)?],
        };
        Some((key, values))
    });
    Some(FrontMatter::from_entries(entries))
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(if *b { "True" } else { "False" }.to_owned()),
        Value::Number(n) => Some(n.to_string()),
        Value::Tagged(tagged) => scalar_to_string(&tagged.value),
        Value::Null | Value::Sequence(_) | Value::Mapping(_) => None,
    }
}

/// Parse leading `key: value` lines.
///
/// Returns the parsed entries and the number of bytes consumed, including
/// the terminating blank line when present.
fn parse_meta_lines(text: &str) -> (FrontMatter, usize) {
    let mut entries: Vec<(String, Vec<String>)> = Vec::new();
    let mut consumed = 0;

    for line in text.split_inclusive('\n') {
        let content = line.trim_end_matches(['\n', '\r']);
        if content.trim().is_empty() {
            if !entries.is_empty() {
                consumed += line.len();
            }
            break;
        }

        if let Some((key, value)) = parse_meta_key(content) {
            entries.push((key, vec![value]));
        } else if let (Some(more), Some((_, values))) = (
            content.strip_prefix("    ").map(str::trim),
            entries.last_mut(),
        ) {
            values.push(more.to_owned());
        } else {
            break;
        }
        consumed += line.len();
    }

    if entries.is_empty() {
        return (FrontMatter::default(), 0);
    }

    let mut merged: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (key, values) in entries {
        merged.entry(key).or_default().extend(values);
    }
    (FrontMatter { entries: merged }, consumed)
}

/// Match `^[ ]{0,3}[A-Za-z0-9_-]+:\s*(.*)$`.
fn parse_meta_key(line: &str) -> Option<(String, String)> {
    let indent = line.len() - line.trim_start_matches(' ').len();
    if indent > 3 {
        return None;
    }
    let rest = &line[indent..];
    let colon = rest.find(':')?;
    let key = &rest[..colon];
    if key.is_empty()
        || !key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return None;
    }
    Some((key.to_lowercase(), rest[colon + 1..].trim().to_owned()))
}
