/// Summary used when a range has no history to report
pub const INITIAL_RELEASE: &str = "Initial release";

/// One unit of change, stripped of its revision id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeItem {
    pub text: String,
}

impl ChangeItem {
    pub fn new(text: impl Into<String>) -> Self {
        ChangeItem { text: text.into() }
    }

    /// Parse a one-line history entry (`<rev> <message>`).
    ///
    /// Entries without a message part yield `None`.
    pub fn from_log_line(line: &str) -> Option<Self> {
        let (_, message) = line.trim().split_once(' ')?;
        let message = message.trim();
        if message.is_empty() {
            return None;
        }
        Some(ChangeItem::new(message))
    }
}

/// Raw history lines together with the change items derived from them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeLog {
    raw: Vec<String>,
    items: Vec<ChangeItem>,
}

impl ChangeLog {
    /// Build from one-line history entries, newest first.
    ///
    /// An empty history collapses to a single synthetic "Initial release" item.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let raw: Vec<String> = lines
            .into_iter()
            .map(Into::into)
            .filter(|line| !line.trim().is_empty())
            .collect();

        if raw.is_empty() {
            return ChangeLog::initial_release();
        }

        let items = raw
            .iter()
            .filter_map(|line| ChangeItem::from_log_line(line))
            .collect();

        ChangeLog { raw, items }
    }

    pub fn initial_release() -> Self {
        ChangeLog {
            raw: vec![INITIAL_RELEASE.to_string()],
            items: vec![ChangeItem::new(INITIAL_RELEASE)],
        }
    }

    pub fn items(&self) -> &[ChangeItem] {
        &self.items
    }

    /// The history text as handed over by source control
    pub fn raw_text(&self) -> String {
        self.raw.join("\n")
    }
}
