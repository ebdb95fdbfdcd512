//! Terminal reports for folio commands.

use console::{Style, Term};

/// Width of the rule under a report heading.
const RULE_WIDTH: usize = 60;

/// Writes command reports to stderr.
pub(crate) struct Output {
    term: Term,
    heading: Style,
    muted: Style,
    ok: Style,
    warn: Style,
    fail: Style,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            heading: Style::new().cyan().bold(),
            muted: Style::new().dim(),
            ok: Style::new().green(),
            warn: Style::new().yellow(),
            fail: Style::new().red(),
        }
    }

    fn line(&self, text: &str) {
        let _ = self.term.write_line(text);
    }

    /// Site title and edition, underlined.
    pub(crate) fn site_heading(&self, title: &str, edition: &str) {
        self.line(&format!(
            "{} {}",
            self.heading.apply_to(title),
            self.muted.apply_to(format!("[{edition}]"))
        ));
        self.line(&self.muted.apply_to("-".repeat(RULE_WIDTH)).to_string());
    }

    /// Sidebar category label; empty categories are flagged.
    pub(crate) fn category(&self, label: &str, pages: usize) {
        if pages == 0 {
            self.line(&format!("{label} {}", self.warn.apply_to("(no pages)")));
        } else {
            self.line(label);
        }
    }

    /// Page entry under a category.
    pub(crate) fn page(&self, title: &str, url: &str) {
        self.line(&format!("  {title} {}", self.muted.apply_to(url)));
    }

    /// Edition entry; the default one is marked and highlighted.
    pub(crate) fn edition(&self, name: &str, categories: usize, pages: usize, is_default: bool) {
        let summary = self
            .muted
            .apply_to(format!("({categories} categories, {pages} pages)"));
        if is_default {
            self.line(&format!("* {} {summary}", self.heading.apply_to(name)));
        } else {
            self.line(&format!("  {name} {summary}"));
        }
    }

    /// Labelled path, such as the source directory.
    pub(crate) fn path(&self, label: &str, path: &std::path::Path) {
        self.line(&format!("{label}: {}", path.display()));
    }

    /// Final success line.
    pub(crate) fn done(&self, msg: &str) {
        self.line(&self.ok.apply_to(msg).to_string());
    }

    /// Fatal error line.
    pub(crate) fn error(&self, msg: &str) {
        self.line(&self.fail.apply_to(msg).to_string());
    }
}
