//! Mood and diet registry.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// Diet key meaning "no constraint".
pub const NO_DIET: &str = "none";

/// The moods a user can pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Stressed,
    Energized,
    Cozy,
    Adventurous,
    Romantic,
    Lazy,
    Social,
    Tired,
}

impl Mood {
    pub const ALL: [Mood; 8] = [
        Mood::Stressed,
        Mood::Energized,
        Mood::Cozy,
        Mood::Adventurous,
        Mood::Romantic,
        Mood::Lazy,
        Mood::Social,
        Mood::Tired,
    ];

    /// Substituted for keys that are not recognized.
    pub const DEFAULT: Mood = Mood::Cozy;

    pub fn key(&self) -> &'static str {
        match self {
            Mood::Stressed => "stressed",
            Mood::Energized => "energized",
            Mood::Cozy => "cozy",
            Mood::Adventurous => "adventurous",
            Mood::Romantic => "romantic",
            Mood::Lazy => "lazy",
            Mood::Social => "social",
            Mood::Tired => "tired",
        }
    }

    /// Look a key up case-insensitively, falling back to [`Mood::DEFAULT`].
    pub fn resolve(key: &str) -> Mood {
        let key = key.trim();
        Mood::ALL
            .into_iter()
            .find(|mood| mood.key().eq_ignore_ascii_case(key))
            .unwrap_or(Mood::DEFAULT)
    }

    pub fn entry(&self) -> MoodEntry {
        let (tip, filter) = match self {
            Mood::Stressed => (
                "Pair with deep breaths: Inhale 4, hold 4, exhale 4.",
                Some(FilterDirective::Quick),
            ),
            Mood::Energized => (
                "Blast your hype playlist while cooking!",
                Some(FilterDirective::Keyword("high-protein")),
            ),
            Mood::Cozy => (
                "Light a candle, dinner by feels.",
                Some(FilterDirective::Keyword("warm")),
            ),
            Mood::Adventurous => (
                "Mix cultures, bon appétit explorer!",
                Some(FilterDirective::Keyword("fusion")),
            ),
            Mood::Romantic => (
                "Dim the lights and save room for dessert.",
                Some(FilterDirective::Chocolate),
            ),
            Mood::Lazy => (
                "One pot, fewer dishes, more couch time.",
                Some(FilterDirective::OnePot),
            ),
            Mood::Social => (
                "Cook big and call your friends over.",
                Some(FilterDirective::Shareable),
            ),
            Mood::Tired => ("Keep it simple tonight, anything goes.", None),
        };

        MoodEntry {
            mood: *self,
            tip,
            filter,
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// How a mood narrows the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FilterDirective {
    /// Total time under 30 minutes
    Quick,
    /// Ingredient text mentions chocolate
    Chocolate,
    /// Tagged one-pot
    OnePot,
    /// Serves more than four
    Shareable,
    /// Ingredient or tag text contains the keyword
    Keyword(&'static str),
}

impl FilterDirective {
    pub fn label(&self) -> &'static str {
        match self {
            FilterDirective::Quick => "quick",
            FilterDirective::Chocolate => "chocolate",
            FilterDirective::OnePot => "one-pot",
            FilterDirective::Shareable => "shareable",
            FilterDirective::Keyword(keyword) => *keyword,
        }
    }
}

impl fmt::Display for FilterDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A mood with its tip and optional catalog filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MoodEntry {
    pub mood: Mood,
    pub tip: &'static str,
    pub filter: Option<FilterDirective>,
}

/// Every mood keyed by its string key.
pub fn moods() -> BTreeMap<&'static str, MoodEntry> {
    Mood::ALL
        .into_iter()
        .map(|mood| (mood.key(), mood.entry()))
        .collect()
}

/// Resolve a caller-supplied key, substituting the default mood when unknown.
pub fn resolve_mood(key: &str) -> MoodEntry {
    Mood::resolve(key).entry()
}

/// Diet keys offered to the user. Other keys are still matched as keywords.
pub fn diets() -> Vec<&'static str> {
    vec![
        NO_DIET,
        "vegan",
        "vegetarian",
        "low-carb",
        "gluten-free",
        "dairy-free",
    ]
}

/// Whether a diet key asks for no filtering.
pub fn is_no_diet(diet: &str) -> bool {
    let diet = diet.trim();
    diet.is_empty() || diet.eq_ignore_ascii_case(NO_DIET)
}
