pub mod catalog;
pub mod config;
pub mod error;
pub mod filters;
pub mod model;
pub mod moods;
pub mod parsers;
pub mod ranking;
pub mod ratings;
pub mod recommender;
pub mod request;

use std::collections::BTreeMap;
use std::sync::OnceLock;

use log::warn;

pub use catalog::CatalogCache;
pub use config::{load_config, MunchConfig};
pub use error::MunchError;
pub use model::{NormalizedRecipe, RankedRecipe, RawRecipe, TagSet};
pub use moods::{diets, moods, resolve_mood, FilterDirective, Mood, MoodEntry};
pub use ratings::{Favorite, Rating, RatingStore};
pub use recommender::Recommender;
pub use request::RecommendationRequest;

static DEFAULT_ENGINE: OnceLock<Recommender> = OnceLock::new();

/// Process-wide engine over the configured catalog, backing the free
/// [`recommend`] function.
///
/// Configuration is read once; if it cannot be read the defaults apply.
/// Callers that need a different catalog, or want to reload it, should hold
/// their own [`Recommender`] as the CLI does.
pub fn default_recommender() -> &'static Recommender {
    DEFAULT_ENGINE.get_or_init(|| {
        let config = load_config().unwrap_or_else(|e| {
            warn!("Using default configuration: {}", e);
            MunchConfig::default()
        });
        Recommender::from_config(&config)
    })
}

/// Every mood keyed by name, with its tip and filter.
pub fn load_moods() -> BTreeMap<&'static str, MoodEntry> {
    moods()
}

/// Recommend up to `top_n` recipes from the configured catalog.
///
/// # Example
/// ```no_run
/// let picks = mood_munch::recommend(&["chicken".to_string()], "stressed", "none", 3)?;
/// for pick in picks {
///     println!("{} ({:?})", pick.title, pick.similarity_score);
/// }
/// # Ok::<(), mood_munch::MunchError>(())
/// ```
pub fn recommend(
    ingredients: &[String],
    mood: &str,
    diet: &str,
    top_n: usize,
) -> Result<Vec<RankedRecipe>, MunchError> {
    let request = RecommendationRequest::new(ingredients.iter().cloned())
        .mood(mood)
        .diet(diet)
        .top_n(top_n);
    default_recommender().recommend(&request)
}
