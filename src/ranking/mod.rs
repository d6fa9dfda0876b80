//! Similarity ranking of filtered recipes against the user's ingredients.

pub mod stop_words;
pub mod tfidf;

use std::num::NonZeroUsize;

use log::debug;

use crate::model::{NormalizedRecipe, RankedRecipe};
pub use tfidf::{cosine_similarity, tokenize, SparseVector, TfIdfVectorizer};

fn ranked(recipe: &NormalizedRecipe, mood_tip: &str, score: Option<f64>) -> RankedRecipe {
    RankedRecipe {
        title: recipe.title.clone(),
        ingredients_text: recipe.ingredients_text.clone(),
        instructions_text: recipe.instructions_text.clone(),
        mood_tip: mood_tip.to_string(),
        similarity_score: score,
        thumbnail_url: recipe.thumbnail_url.clone(),
    }
}

/// Pick the `top_n` recipes most similar to `ingredients`.
///
/// The vector space is fitted over every candidate plus the user's own
/// ingredient document. Results are ordered by descending cosine similarity,
/// ties keeping catalog order. Blank ingredients are ignored; if none remain
/// the first `top_n` candidates come back unscored.
pub fn rank(
    filtered: &[&NormalizedRecipe],
    ingredients: &[String],
    top_n: NonZeroUsize,
    mood_tip: &str,
) -> Vec<RankedRecipe> {
    let top_n = top_n.get();
    let wanted: Vec<&str> = ingredients
        .iter()
        .map(|i| i.trim())
        .filter(|i| !i.is_empty())
        .collect();

    if wanted.is_empty() {
        debug!("No ingredients given, skipping similarity ranking");
        return filtered
            .iter()
            .take(top_n)
            .map(|recipe| ranked(recipe, mood_tip, None))
            .collect();
    }

    let user_document = wanted.join(" ");
    let mut corpus: Vec<&str> = filtered
        .iter()
        .map(|recipe| recipe.ingredients_text.as_str())
        .collect();
    corpus.push(&user_document);

    let vectorizer = TfIdfVectorizer::fit(&corpus);
    let query = vectorizer.transform(&user_document);
    debug!(
        "Ranking {} recipes over {} terms",
        filtered.len(),
        vectorizer.vocabulary_len()
    );

    let mut scored: Vec<(&NormalizedRecipe, f64)> = filtered
        .iter()
        .map(|recipe| {
            let vector = vectorizer.transform(&recipe.ingredients_text);
            (*recipe, cosine_similarity(&query, &vector))
        })
        .collect();

    // sort_by is stable, so equal scores stay in catalog order
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));

    scored
        .into_iter()
        .take(top_n)
        .map(|(recipe, score)| ranked(recipe, mood_tip, Some(score)))
        .collect()
}
