//! Filesystem content source.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::content::{ContentError, ContentErrorKind, ContentSource, Document};
use crate::front_matter;

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";

/// Markdown extensions recognized as documents.
const EXTENSIONS: [&str; 2] = ["md", "mdx"];

static H1_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^#\s+(.+)$").expect("H1 pattern is valid"));

/// Content source backed by a docs directory.
///
/// Every `.md` or `.mdx` file below the root is one document. Hidden and
/// underscore-prefixed entries are skipped, as are common build directories.
#[derive(Debug)]
pub struct FsContent {
    source_dir: PathBuf,
}

impl FsContent {
    /// Create a content source rooted at `source_dir`.
    #[must_use]
    pub fn new(source_dir: PathBuf) -> Self {
        Self { source_dir }
    }

    /// Scan directory recursively and collect documents.
    fn scan_directory(
        &self,
        dir_path: &Path,
        id_prefix: &str,
        seen: &mut HashSet<String>,
        documents: &mut Vec<Document>,
    ) -> Result<(), ContentError> {
        let entries = fs::read_dir(dir_path).map_err(|e| {
            ContentError::io(e, Some(dir_path.to_path_buf())).with_backend(BACKEND)
        })?;

        // Cache file type per entry to avoid repeated stat calls in sort.
        let mut entries: Vec<_> = entries
            .filter_map(Result::ok)
            .map(|e| {
                let is_dir = e.file_type().is_ok_and(|t| t.is_dir());
                let name = e.file_name().to_string_lossy().into_owned();
                (e, is_dir, name)
            })
            .collect();

        // Files before directories, then by name, so scans are reproducible.
        entries.sort_by(|(_, a_is_dir, a_name), (_, b_is_dir, b_name)| {
            a_is_dir.cmp(b_is_dir).then_with(|| a_name.cmp(b_name))
        });

        for (entry, is_dir, name) in entries {
            if name.starts_with('.') || name.starts_with('_') {
                continue;
            }

            if is_dir {
                if matches!(name.as_str(), "node_modules" | "target" | "build") {
                    continue;
                }
                let child_prefix = join_id(id_prefix, &name);
                self.scan_directory(&entry.path(), &child_prefix, seen, documents)?;
                continue;
            }

            let path = entry.path();
            let Some(stem) = markdown_stem(&path) else {
                continue;
            };

            let document = self.build_document(&path, id_prefix, stem)?;
            if seen.insert(document.id.clone()) {
                documents.push(document);
            } else {
                tracing::warn!(
                    id = %document.id,
                    path = %path.display(),
                    "Document id already taken, skipping"
                );
            }
        }

        Ok(())
    }

    /// Read one markdown file into a [`Document`].
    fn build_document(
        &self,
        path: &Path,
        id_prefix: &str,
        stem: &str,
    ) -> Result<Document, ContentError> {
        let content = fs::read_to_string(path)
            .map_err(|e| ContentError::io(e, Some(path.to_path_buf())).with_backend(BACKEND))?;

        let (yaml, body) = front_matter::split(&content);
        let front = match yaml {
            Some(yaml) => front_matter::parse(yaml).map_err(|e| {
                ContentError::new(ContentErrorKind::InvalidFrontMatter)
                    .with_backend(BACKEND)
                    .with_path(path)
                    .with_source(e)
            })?,
            None => front_matter::FrontMatter::default(),
        };

        let local_id = front.id.as_deref().unwrap_or(stem);
        let title = front
            .label()
            .map(str::to_owned)
            .or_else(|| extract_h1(body))
            .unwrap_or_else(|| title_from_stem(stem));

        let relative = path
            .strip_prefix(&self.source_dir)
            .map_or_else(|_| path.to_path_buf(), Path::to_path_buf);

        Ok(Document {
            id: join_id(id_prefix, local_id),
            title,
            path: Some(relative),
        })
    }
}

impl ContentSource for FsContent {
    fn scan(&self) -> Result<Vec<Document>, ContentError> {
        if !self.source_dir.exists() {
            tracing::warn!(
                dir = %self.source_dir.display(),
                "Content directory does not exist"
            );
            return Ok(Vec::new());
        }

        let mut seen = HashSet::new();
        let mut documents = Vec::new();
        self.scan_directory(&self.source_dir, "", &mut seen, &mut documents)?;

        tracing::debug!(count = documents.len(), "Scanned content directory");
        Ok(documents)
    }
}

/// File stem if the path has a markdown extension.
fn markdown_stem(path: &Path) -> Option<&str> {
    let ext = path.extension()?.to_str()?;
    if !EXTENSIONS.contains(&ext) {
        return None;
    }
    path.file_stem()?.to_str()
}

fn join_id(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_owned()
    } else {
        format!("{prefix}/{name}")
    }
}

/// Extract title from first H1 heading.
fn extract_h1(body: &str) -> Option<String> {
    H1_REGEX
        .captures(body)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_owned())
}

/// Generate title from a file stem (`web_app_example` -> `Web App Example`).
fn title_from_stem(stem: &str) -> String {
    stem.replace(['-', '_'], " ")
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                None => String::new(),
                Some(first) => first.to_uppercase().chain(chars).collect(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
