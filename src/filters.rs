//! Diet and mood filtering with fallback to the less restrictive candidate set.

use log::{info, warn};

use crate::model::NormalizedRecipe;
use crate::moods::{is_no_diet, resolve_mood, FilterDirective, MoodEntry};

/// Exclusive; a missing total time never counts as quick.
const QUICK_MAX_MINUTES: f64 = 30.0;
/// Servings assumed when a recipe does not say.
const DEFAULT_SERVINGS: f64 = 1.0;
const SHAREABLE_MIN_SERVINGS: f64 = 4.0;

/// Keep the candidates matching `predicate`, unless none do.
///
/// An empty subset is discarded and the input returned unchanged, so a
/// filter stage can narrow the pool but never empty it.
pub fn apply_if_non_empty<'a, T, F>(
    candidates: Vec<&'a T>,
    stage: &str,
    predicate: F,
) -> Vec<&'a T>
where
    F: Fn(&T) -> bool,
{
    let subset: Vec<&T> = candidates
        .iter()
        .copied()
        .filter(|candidate| predicate(*candidate))
        .collect();

    if subset.is_empty() && !candidates.is_empty() {
        warn!(
            "Filter '{}' matched none of {} recipes, keeping the unfiltered set",
            stage,
            candidates.len()
        );
        return candidates;
    }

    info!("After {}: {} recipes", stage, subset.len());
    subset
}

/// Whether a recipe carries the diet in its tags.
pub fn matches_diet(recipe: &NormalizedRecipe, diet: &str) -> bool {
    recipe.tags.matches(diet)
}

/// Whether a recipe satisfies a mood's filter directive.
pub fn matches_directive(recipe: &NormalizedRecipe, directive: &FilterDirective) -> bool {
    match directive {
        FilterDirective::Quick => recipe
            .total_time_minutes
            .is_some_and(|minutes| minutes < QUICK_MAX_MINUTES),
        FilterDirective::Chocolate => recipe.ingredients_text.contains("chocolate"),
        FilterDirective::OnePot => recipe.tags.matches("one-pot"),
        FilterDirective::Shareable => {
            recipe.num_servings.unwrap_or(DEFAULT_SERVINGS) > SHAREABLE_MIN_SERVINGS
        }
        FilterDirective::Keyword(keyword) => {
            let keyword = keyword.to_lowercase();
            recipe.ingredients_text.to_lowercase().contains(&keyword)
                || recipe.tags.matches(&keyword)
        }
    }
}

/// Narrow the catalog by diet, then by the mood's directive.
///
/// Each stage falls back to its input when it would leave nothing, so the
/// result is empty only when the catalog is.
pub fn filter_with_mood<'a>(
    catalog: &'a [NormalizedRecipe],
    diet: &str,
    mood: &MoodEntry,
) -> Vec<&'a NormalizedRecipe> {
    let mut candidates: Vec<&NormalizedRecipe> = catalog.iter().collect();

    if !is_no_diet(diet) {
        let stage = format!("diet '{}'", diet.trim());
        candidates = apply_if_non_empty(candidates, &stage, |recipe| {
            matches_diet(recipe, diet)
        });
    }

    if let Some(directive) = &mood.filter {
        let stage = format!("mood '{}'", directive);
        candidates = apply_if_non_empty(candidates, &stage, |recipe| {
            matches_directive(recipe, directive)
        });
    }

    candidates
}

/// [`filter_with_mood`] for a mood key; unknown keys use the default mood.
pub fn filter<'a>(
    catalog: &'a [NormalizedRecipe],
    diet: &str,
    mood: &str,
) -> Vec<&'a NormalizedRecipe> {
    filter_with_mood(catalog, diet, &resolve_mood(mood))
}
