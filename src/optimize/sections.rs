//! Splitting an optimized summary into titled bullet lists.
//!
//! The service is asked for blocks like
//!
//! ```text
//! Behaviors Observed:
//! - first
//! - second
//! ```
//!
//! separated by blank lines. Parsing is lenient: a block's first line is its
//! title, and only the following lines that start with `-` are kept as items.

/// Placeholder item for a section with no bullets.
pub const NONE_NOTED: &str = "None noted";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Title as written, minus its first `:` and surrounding whitespace.
    pub title: String,
    pub items: Vec<String>,
}

impl Section {
    /// Title with dashes removed, for headings.
    pub fn display_title(&self) -> String {
        self.title.replace('-', "").trim().to_string()
    }

    /// Items to render; an empty section shows [`NONE_NOTED`].
    pub fn display_items(&self) -> Vec<&str> {
        if self.items.is_empty() {
            vec![NONE_NOTED]
        } else {
            self.items.iter().map(String::as_str).collect()
        }
    }
}

/// Parse `text` into sections in order of first appearance.
///
/// Blocks with an empty title or a title starting with "Important" are
/// dropped. A repeated title replaces the items of the earlier block.
pub fn parse_sections(text: &str) -> Vec<Section> {
    let mut sections: Vec<Section> = Vec::new();

    for block in text.split("\n\n") {
        let mut lines = block.split('\n');
        let Some(first) = lines.next() else {
            continue;
        };

        let title = first.replacen(':', "", 1).trim().to_string();
        if title.is_empty() || title.starts_with("Important") {
            continue;
        }

        let items: Vec<String> = lines
            .map(str::trim)
            .filter(|line| line.starts_with('-'))
            .map(|line| line[1..].trim().to_string())
            .collect();

        match sections.iter_mut().find(|s| s.title == title) {
            Some(existing) => existing.items = items,
            None => sections.push(Section { title, items }),
        }
    }

    sections
}

/// Plain-text rendering used by the CLI.
pub fn render_sections(sections: &[Section]) -> String {
    let mut out = String::new();
    for (i, section) in sections.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&section.display_title());
        out.push('\n');
        for item in section.display_items() {
            out.push_str("  • ");
            out.push_str(item);
            out.push('\n');
        }
    }
    out
}
