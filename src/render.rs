//! Release-note rendering: markdown and Sparkle appcast HTML

use std::fmt::Write as _;

use regex::Regex;

use crate::conventional::{CategorizedChanges, Category};
use crate::domain::ChangeItem;

/// Output format for release notes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum NotesFormat {
    #[default]
    Markdown,
    /// HTML fragment for the Sparkle updater
    Sparkle,
}

/// Sections that make it into the output.
///
/// Uncategorized items only show up when nothing else was categorized.
fn visible_sections(changes: &CategorizedChanges) -> Vec<(Category, &[ChangeItem])> {
    let show_other = !changes.has_categorized();
    Category::ALL
        .into_iter()
        .filter(|category| (*category == Category::Other) == show_other)
        .map(|category| (category, changes.get(category)))
        .filter(|(_, items)| !items.is_empty())
        .collect()
}

pub fn render(changes: &CategorizedChanges, version: &str, format: NotesFormat) -> String {
    match format {
        NotesFormat::Markdown => render_markdown(changes, version),
        NotesFormat::Sparkle => render_sparkle(changes, version),
    }
}

fn render_markdown(changes: &CategorizedChanges, version: &str) -> String {
    let mut notes = format!("## Version {}\n\n", version);

    for (category, items) in visible_sections(changes) {
        let _ = writeln!(notes, "### {}", category.heading());
        for item in items {
            let _ = writeln!(notes, "- {}", item.text);
        }
        notes.push('\n');
    }

    notes.trim().to_string()
}

fn render_sparkle(changes: &CategorizedChanges, version: &str) -> String {
    let mut notes = format!("<h2>Version {}</h2>\n\n", escape_html(version));

    for (category, items) in visible_sections(changes) {
        let _ = writeln!(notes, "<h3>{}</h3>\n<ul>", category.heading());
        for item in items {
            let _ = writeln!(notes, "<li>{}</li>", escape_html(&item.text));
        }
        notes.push_str("</ul>\n\n");
    }

    notes.trim().to_string()
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Convert model-written markdown into a Sparkle HTML fragment.
///
/// Headings become `<hN>`, runs of bullet lines become one `<ul>`; other
/// lines pass through unchanged. Text that already starts with `<` is
/// returned as is.
pub fn markdown_to_sparkle(markdown: &str) -> String {
    if markdown.trim_start().starts_with('<') {
        return markdown.to_string();
    }

    let (Ok(heading), Ok(bullet)) = (
        Regex::new(r"^(#{1,6})\s+(.*)$"),
        Regex::new(r"^\s*[-*]\s+(.*)$"),
    ) else {
        return markdown.to_string();
    };

    let mut out: Vec<String> = Vec::new();
    let mut in_list = false;

    for line in markdown.lines() {
        if let Some(caps) = bullet.captures(line) {
            if !in_list {
                out.push("<ul>".to_string());
                in_list = true;
            }
            out.push(format!("<li>{}</li>", &caps[1]));
            continue;
        }

        if in_list {
            out.push("</ul>".to_string());
            in_list = false;
        }

        match heading.captures(line) {
            Some(caps) => {
                let level = caps[1].len();
                out.push(format!("<h{level}>{}</h{level}>", caps[2].trim()));
            }
            None => out.push(line.to_string()),
        }
    }

    if in_list {
        out.push("</ul>".to_string());
    }

    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CategoriesConfig;
    use crate::conventional::classify;

    fn changes(texts: &[&str]) -> CategorizedChanges {
        let items: Vec<ChangeItem> = texts.iter().map(|t| ChangeItem::new(*t)).collect();
        classify(&items, &CategoriesConfig::default())
    }

    #[test]
    fn test_markdown_sections_in_order() {
        let notes = render(
            &changes(&["Improve CPU usage", "Fix crash on load", "Add preset browser"]),
            "1.2.0",
            NotesFormat::Markdown,
        );
        assert_eq!(
            notes,
            "## Version 1.2.0\n\n\
             ### ✨ New Features\n- Add preset browser\n\n\
             ### 🐛 Bug Fixes\n- Fix crash on load\n\n\
             ### 🔧 Improvements\n- Improve CPU usage"
        );
    }

    #[test]
    fn test_other_suppressed_when_something_categorized() {
        let notes = render(
            &changes(&["Fix crash on load", "Tidy code"]),
            "1.0.1",
            NotesFormat::Markdown,
        );
        assert!(notes.contains("### 🐛 Bug Fixes"));
        assert!(!notes.contains("Changes"));
        assert!(!notes.contains("Tidy code"));
    }

    #[test]
    fn test_other_shown_when_alone() {
        let notes = render(&changes(&["Tidy code"]), "1.0.1", NotesFormat::Markdown);
        assert_eq!(notes, "## Version 1.0.1\n\n### 📝 Changes\n- Tidy code");
    }

    #[test]
    fn test_no_changes_renders_heading_only() {
        let notes = render(&CategorizedChanges::default(), "1.0.2", NotesFormat::Markdown);
        assert_eq!(notes, "## Version 1.0.2");
    }

    #[test]
    fn test_sparkle_output() {
        let notes = render(
            &changes(&["Fix <clip> & distortion"]),
            "2.0.0",
            NotesFormat::Sparkle,
        );
        assert_eq!(
            notes,
            "<h2>Version 2.0.0</h2>\n\n\
             <h3>🐛 Bug Fixes</h3>\n<ul>\n<li>Fix &lt;clip&gt; &amp; distortion</li>\n</ul>"
        );
    }

    #[test]
    fn test_sparkle_changes_section() {
        let notes = render(&changes(&["Tidy code"]), "2.0.0", NotesFormat::Sparkle);
        assert!(notes.contains("<h3>📝 Changes</h3>\n<ul>\n<li>Tidy code</li>\n</ul>"));
    }

    #[test]
    fn test_markdown_to_sparkle() {
        let markdown = "## Version 1.1.0\n\n### Features\n- Preset browser\n- Dark mode\n\nThanks for updating!";
        assert_eq!(
            markdown_to_sparkle(markdown),
            "<h2>Version 1.1.0</h2>\n\n<h3>Features</h3>\n<ul>\n<li>Preset browser</li>\n<li>Dark mode</li>\n</ul>\n\nThanks for updating!"
        );
    }

    #[test]
    fn test_markdown_to_sparkle_leaves_html_alone() {
        let html = "<h2>Version 1.1.0</h2>";
        assert_eq!(markdown_to_sparkle(html), html);
    }
}
