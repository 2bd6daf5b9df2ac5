use std::fmt;

// ============================================================================
// Category
// ============================================================================

/// Display grouping shown as a pill under each trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Slang,
    Meme,
    Platform,
    Trend,
}

impl Category {
    pub fn label(self) -> &'static str {
        match self {
            Category::Slang => "Slang",
            Category::Meme => "Meme",
            Category::Platform => "Platform",
            Category::Trend => "Trend",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// Trend
// ============================================================================

/// A named external link. The first source of a trend backs "Learn more".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    pub name: String,
    pub url: String,
}

impl Source {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// One explained piece of internet culture.
///
/// Immutable once built. Ids are expected to be unique within a snapshot but
/// nothing enforces it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trend {
    pub id: String,
    pub title: String,
    pub short_summary: String,
    pub long_explanation: String,
    /// Empty for remote trends.
    pub example_sentence: String,
    pub category: Category,
    pub sources: Vec<Source>,
    /// Free-text search haystack, not displayed.
    pub tags: Vec<String>,
    /// Unix seconds of the originating post; `None` for bundled entries.
    pub published: Option<i64>,
}

impl Trend {
    /// The URL behind "Learn more", if the trend has any source at all.
    pub fn primary_source(&self) -> Option<&Source> {
        self.sources.first()
    }
}
