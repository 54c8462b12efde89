//! Markdown extension toggles.

use std::fmt;
use std::str::FromStr;

use crate::ConfigError;

/// Prefix accepted in front of extension names for compatibility with
/// documents written for Python-Markdown.
const PYTHON_PREFIX: &str = "markdown.extensions.";

/// Marker that turns an extension entry into a removal.
pub const REMOVAL_MARKER: char = '-';

/// Supported Markdown extensions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Extension {
    /// Front matter is stripped from the rendered body.
    Meta,
    /// Headings carry `id` attributes.
    HeaderId,
    /// A table of contents is generated.
    Toc,
    /// Pipe tables.
    Tables,
    /// Fenced code info strings become language classes.
    FencedCode,
    /// Code blocks are wrapped for syntax highlighting styles.
    CodeHilite,
    /// `~~deleted~~` text.
    Strikethrough,
    /// `- [ ]` task list items.
    TaskList,
    /// Smart quotes and dashes.
    Smarty,
    /// Definition lists.
    DefList,
    /// GitHub-style `> [!NOTE]` callouts.
    Admonition,
    /// `{#id .class}` heading attributes.
    AttrList,
    /// `[^1]` footnotes.
    Footnotes,
}

impl Extension {
    /// Every supported extension.
    pub const ALL: [Self; 13] = [
        Self::Meta,
        Self::HeaderId,
        Self::Toc,
        Self::Tables,
        Self::FencedCode,
        Self::CodeHilite,
        Self::Strikethrough,
        Self::TaskList,
        Self::Smarty,
        Self::DefList,
        Self::Admonition,
        Self::AttrList,
        Self::Footnotes,
    ];

    /// Extensions enabled when nothing else is requested.
    pub const DEFAULTS: [Self; 6] = [
        Self::Meta,
        Self::HeaderId,
        Self::Tables,
        Self::Toc,
        Self::FencedCode,
        Self::CodeHilite,
    ];

    /// Canonical name used in configuration and front matter.
    pub fn name(self) -> &'static str {
        match self {
            Self::Meta => "meta",
            Self::HeaderId => "headerid",
            Self::Toc => "toc",
            Self::Tables => "tables",
            Self::FencedCode => "fenced_code",
            Self::CodeHilite => "codehilite",
            Self::Strikethrough => "strikethrough",
            Self::TaskList => "tasklist",
            Self::Smarty => "smarty",
            Self::DefList => "def_list",
            Self::Admonition => "admonition",
            Self::AttrList => "attr_list",
            Self::Footnotes => "footnotes",
        }
    }
}

impl fmt::Display for Extension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Extension {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let name = trimmed.strip_prefix(PYTHON_PREFIX).unwrap_or(trimmed);
        let name = name.to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|ext| ext.name() == name)
            .ok_or_else(|| ConfigError::UnknownExtension(trimmed.to_owned()))
    }
}

/// A parsed extension list entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExtensionEntry {
    /// Enable the extension.
    Add(Extension),
    /// Remove the extension, overriding any request for it.
    Remove(Extension),
}

impl FromStr for ExtensionEntry {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().strip_prefix(REMOVAL_MARKER) {
            Some(name) => name.parse().map(Self::Remove),
            None => s.parse().map(Self::Add),
        }
    }
}

/// Resolve extension entries into an ordered, unique set.
///
/// Entries are applied on top of [`Extension::DEFAULTS`]. A removal entry
/// drops the extension no matter where the matching request appears.
pub fn resolve_extensions<I, S>(entries: I) -> Result<Vec<Extension>, ConfigError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut requested: Vec<Extension> = Extension::DEFAULTS.to_vec();
    let mut removed: Vec<Extension> = Vec::new();

    for entry in entries {
        let entry = entry.as_ref();
        if entry.trim().is_empty() {
            continue;
        }
        match entry.parse::<ExtensionEntry>()? {
            ExtensionEntry::Add(ext) => {
                if !requested.contains(&ext) {
                    requested.push(ext);
                }
            }
            ExtensionEntry::Remove(ext) => removed.push(ext),
        }
    }

    requested.retain(|ext| !removed.contains(ext));
    Ok(requested)
}
