use serde::{Deserialize, Serialize};

/// One catalog row as it appears in the source CSV.
///
/// Every column is optional text: missing columns deserialize to `None`, and
/// numeric columns are parsed leniently later so a stray value never fails
/// the whole row.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRecipe {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub seo_title: Option<String>,
    #[serde(default)]
    pub sections: Option<String>,
    #[serde(default)]
    pub instructions: Option<String>,
    #[serde(default)]
    pub tags: Option<String>,
    #[serde(default)]
    pub total_time_minutes: Option<String>,
    #[serde(default)]
    pub prep_time_minutes: Option<String>,
    #[serde(default)]
    pub cook_time_minutes: Option<String>,
    #[serde(default)]
    pub num_servings: Option<String>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
}

/// Dietary/category labels of a recipe.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TagSet {
    /// Lowercased tag names, empty when structured parsing failed
    pub names: Vec<String>,
    /// Source text, kept for substring matching
    pub raw: String,
}

impl TagSet {
    /// Case- and separator-insensitive keyword test.
    ///
    /// The raw blob is checked first, so a keyword can match text that is
    /// not a tag name (for example a tag's display name or type).
    pub fn matches(&self, keyword: &str) -> bool {
        let needle = normalize_separators(keyword);
        if needle.is_empty() {
            return false;
        }

        normalize_separators(&self.raw).contains(&needle)
            || self
                .names
                .iter()
                .any(|name| normalize_separators(name).contains(&needle))
    }
}

/// Lowercase and treat `-`, `_` and whitespace as the same separator.
pub(crate) fn normalize_separators(text: &str) -> String {
    text.trim()
        .to_lowercase()
        .split(|c: char| c == '-' || c == '_' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// A catalog row after the record parser has run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedRecipe {
    /// SEO title, else display name, else "Unknown"
    pub title: String,
    /// Sorted, deduplicated, lowercase ingredient names joined by spaces
    pub ingredients_text: String,
    /// Newline-joined steps, or one of the instruction sentinels
    pub instructions_text: String,
    pub tags: TagSet,
    pub name: Option<String>,
    pub seo_title: Option<String>,
    pub total_time_minutes: Option<f64>,
    pub prep_time_minutes: Option<f64>,
    pub cook_time_minutes: Option<f64>,
    pub num_servings: Option<f64>,
    pub thumbnail_url: Option<String>,
}

impl NormalizedRecipe {
    /// Recipe with only the fields the engine needs; scalar fields are empty.
    pub fn new(
        title: impl Into<String>,
        ingredients_text: impl Into<String>,
        instructions_text: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            ingredients_text: ingredients_text.into(),
            instructions_text: instructions_text.into(),
            tags: TagSet::default(),
            name: None,
            seo_title: None,
            total_time_minutes: None,
            prep_time_minutes: None,
            cook_time_minutes: None,
            num_servings: None,
            thumbnail_url: None,
        }
    }
}

/// One recommendation handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedRecipe {
    pub title: String,
    pub ingredients_text: String,
    pub instructions_text: String,
    pub mood_tip: String,
    /// Cosine similarity in [0, 1]; `None` when no ingredients were given
    /// and no comparison was performed.
    pub similarity_score: Option<f64>,
    pub thumbnail_url: Option<String>,
}
