use crate::moods::{Mood, NO_DIET};

/// Number of recipes returned when the caller does not say.
pub const DEFAULT_TOP_N: usize = 3;

/// What the user asked for: ingredients on hand, mood, diet and result count.
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationRequest {
    pub ingredients: Vec<String>,
    pub mood: String,
    pub diet: String,
    pub top_n: usize,
}

impl Default for RecommendationRequest {
    fn default() -> Self {
        Self {
            ingredients: Vec::new(),
            mood: Mood::DEFAULT.key().to_string(),
            diet: NO_DIET.to_string(),
            top_n: DEFAULT_TOP_N,
        }
    }
}

impl RecommendationRequest {
    /// Request with the default mood, no diet and three results
    ///
    /// # Example
    /// ```
    /// use mood_munch::RecommendationRequest;
    ///
    /// let request = RecommendationRequest::new(["chicken", "rice"])
    ///     .mood("stressed")
    ///     .top_n(2);
    /// assert_eq!(request.diet, "none");
    /// ```
    pub fn new<I, S>(ingredients: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ingredients: ingredients.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Split a comma-separated ingredient line, dropping blank entries.
    pub fn from_ingredient_line(line: &str) -> Self {
        Self::new(
            line.split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty()),
        )
    }

    pub fn mood(mut self, mood: impl Into<String>) -> Self {
        self.mood = mood.into();
        self
    }

    pub fn diet(mut self, diet: impl Into<String>) -> Self {
        self.diet = diet.into();
        self
    }

    /// Zero is accepted here and rejected when the request runs.
    pub fn top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }
}
