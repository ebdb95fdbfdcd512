//! Link target classification.
//!
//! Navbar and footer links point either at a documentation page, at another
//! site, or at an anchor on the current page. The kind is decided once,
//! when the configuration is built.

use serde::Serialize;

/// Classified link target.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Target {
    /// Documentation page, resolved against the navigation tree.
    Doc {
        /// Page id.
        id: String,
        /// Resolved page path (e.g., "docs/overview").
        path: String,
        /// Optional `#fragment` within the page.
        #[serde(skip_serializing_if = "Option::is_none")]
        fragment: Option<String>,
    },
    /// Absolute URL, used verbatim.
    External {
        url: String,
    },
    /// In-page anchor such as `#quickstart`.
    Anchor {
        fragment: String,
    },
}

/// Unresolved classification of a raw target string.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum TargetKind<'a> {
    Doc {
        id: &'a str,
        fragment: Option<&'a str>,
    },
    External,
    Anchor(&'a str),
}

/// Classify a raw target.
///
/// Doc targets may carry a leading `/` and the docs route base, so
/// `docs/overview`, `/docs/overview` and `overview` all name page `overview`.
pub(crate) fn classify<'a>(raw: &'a str, route_base: &str) -> TargetKind<'a> {
    if let Some(fragment) = raw.strip_prefix('#') {
        return TargetKind::Anchor(fragment);
    }
    if has_scheme(raw) || raw.starts_with("//") {
        return TargetKind::External;
    }

    let (path, fragment) = match raw.split_once('#') {
        Some((path, fragment)) => (path, Some(fragment)),
        None => (raw, None),
    };

    let path = path.trim_start_matches('/');
    let base = route_base.trim_matches('/');
    let id = if base.is_empty() {
        path
    } else {
        path.strip_prefix(base)
            .and_then(|rest| rest.strip_prefix('/'))
            .unwrap_or(path)
    };

    TargetKind::Doc {
        id: id.trim_end_matches('/'),
        fragment,
    }
}

/// Whether a string starts with a URL scheme (`https:`, `mailto:`).
pub(crate) fn has_scheme(raw: &str) -> bool {
    let Some((scheme, _)) = raw.split_once(':') else {
        return false;
    };
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}
