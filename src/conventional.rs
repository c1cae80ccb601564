//! Keyword classification of change items into release-note sections

use crate::config::CategoriesConfig;
use crate::domain::ChangeItem;

/// Release-note section a change item belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Features,
    Fixes,
    Improvements,
    Other,
}

impl Category {
    /// Sections in the order they are rendered
    pub const ALL: [Category; 4] = [
        Category::Features,
        Category::Fixes,
        Category::Improvements,
        Category::Other,
    ];

    /// Section heading text, emoji included
    pub fn heading(&self) -> &'static str {
        match self {
            Category::Features => "✨ New Features",
            Category::Fixes => "🐛 Bug Fixes",
            Category::Improvements => "🔧 Improvements",
            Category::Other => "📝 Changes",
        }
    }
}

/// Change items grouped by category, input order kept within each group
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategorizedChanges {
    pub features: Vec<ChangeItem>,
    pub fixes: Vec<ChangeItem>,
    pub improvements: Vec<ChangeItem>,
    pub other: Vec<ChangeItem>,
}

impl CategorizedChanges {
    pub fn get(&self, category: Category) -> &[ChangeItem] {
        match category {
            Category::Features => &self.features,
            Category::Fixes => &self.fixes,
            Category::Improvements => &self.improvements,
            Category::Other => &self.other,
        }
    }

    fn push(&mut self, category: Category, item: ChangeItem) {
        match category {
            Category::Features => self.features.push(item),
            Category::Fixes => self.fixes.push(item),
            Category::Improvements => self.improvements.push(item),
            Category::Other => self.other.push(item),
        }
    }

    /// True when any of features, fixes or improvements has an item.
    /// Otherwise the uncategorized items stand in as the only section.
    pub fn has_categorized(&self) -> bool {
        !(self.features.is_empty() && self.fixes.is_empty() && self.improvements.is_empty())
    }
}

/// Category of a single change description
pub fn categorize(text: &str, keywords: &CategoriesConfig) -> Category {
    let lower = text.to_lowercase();
    let matches = |words: &[String]| {
        words
            .iter()
            .any(|word| lower.contains(word.to_lowercase().as_str()))
    };

    if matches(&keywords.features) {
        Category::Features
    } else if matches(&keywords.fixes) {
        Category::Fixes
    } else if matches(&keywords.improvements) {
        Category::Improvements
    } else {
        Category::Other
    }
}

pub fn classify(items: &[ChangeItem], keywords: &CategoriesConfig) -> CategorizedChanges {
    let mut categorized = CategorizedChanges::default();
    for item in items {
        categorized.push(categorize(&item.text, keywords), item.clone());
    }
    categorized
}
