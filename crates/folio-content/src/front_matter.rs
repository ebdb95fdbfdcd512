//! Front matter extraction for markdown documents.
//!
//! A front matter block is a YAML document fenced by `---` lines at the
//! very start of the file. Only the fields that affect navigation are read;
//! everything else is left to the rendering host.

use serde::Deserialize;

/// Navigation-relevant front matter fields.
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
pub(crate) struct FrontMatter {
    /// Replaces the file stem in the document id.
    pub id: Option<String>,
    pub title: Option<String>,
    /// Sidebar text, when it should differ from `title`.
    pub sidebar_label: Option<String>,
}

impl FrontMatter {
    /// Label for navigation: `sidebar_label`, else `title`.
    pub(crate) fn label(&self) -> Option<&str> {
        self.sidebar_label.as_deref().or(self.title.as_deref())
    }
}

/// Split markdown into its front matter block and body.
///
/// Returns `(None, content)` when the file does not open with a fence or the
/// closing fence is missing.
pub(crate) fn split(content: &str) -> (Option<&str>, &str) {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let Some(rest) = content
        .strip_prefix("---\n")
        .or_else(|| content.strip_prefix("---\r\n"))
    else {
        return (None, content);
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            return (Some(&rest[..offset]), &rest[offset + line.len()..]);
        }
        offset += line.len();
    }

    (None, content)
}

/// Parse a front matter block. Empty blocks yield the default.
pub(crate) fn parse(yaml: &str) -> Result<FrontMatter, serde_yaml::Error> {
    if yaml.trim().is_empty() {
        return Ok(FrontMatter::default());
    }
    serde_yaml::from_str(yaml)
}
