use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::sync::Arc;

use log::{info, warn};

use crate::catalog::CatalogCache;
use crate::config::MunchConfig;
use crate::filters::filter_with_mood;
use crate::model::{NormalizedRecipe, RankedRecipe};
use crate::moods::resolve_mood;
use crate::ranking::rank;
use crate::request::RecommendationRequest;
use crate::MunchError;

/// Recommendation engine over one lazily loaded catalog.
///
/// Clones share the same cache, so the catalog is parsed once no matter how
/// many threads hold a handle.
#[derive(Debug, Clone)]
pub struct Recommender {
    cache: Arc<CatalogCache>,
}

impl Recommender {
    /// Engine reading the CSV catalog at `path` on first use.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            cache: Arc::new(CatalogCache::new(path)),
        }
    }

    pub fn from_config(config: &MunchConfig) -> Self {
        Self::new(&config.catalog.path)
    }

    /// Engine over recipes that are already normalized.
    pub fn with_catalog(recipes: Vec<NormalizedRecipe>) -> Self {
        Self {
            cache: Arc::new(CatalogCache::preloaded(recipes)),
        }
    }

    pub fn catalog(&self) -> &[NormalizedRecipe] {
        self.cache.get()
    }

    /// Re-read the catalog on next use.
    ///
    /// Only a handle with no live clones owns the cache outright; while
    /// clones exist nothing is invalidated and `false` is returned.
    pub fn reload(&mut self) -> bool {
        match Arc::get_mut(&mut self.cache) {
            Some(cache) => {
                cache.reload();
                true
            }
            None => {
                warn!("Catalog is shared by other engine handles, not reloading");
                false
            }
        }
    }

    /// Filter the catalog for the request's diet and mood, then rank it.
    ///
    /// Returns an empty list only when the catalog itself is empty. Fails
    /// with [`MunchError::InvalidTopN`] when `top_n` is zero.
    pub fn recommend(
        &self,
        request: &RecommendationRequest,
    ) -> Result<Vec<RankedRecipe>, MunchError> {
        let top_n = NonZeroUsize::new(request.top_n).ok_or(MunchError::InvalidTopN)?;
        let mood = resolve_mood(&request.mood);

        let catalog = self.catalog();
        if catalog.is_empty() {
            info!("Catalog is empty, nothing to recommend");
            return Ok(Vec::new());
        }

        let filtered = filter_with_mood(catalog, &request.diet, &mood);
        let results = rank(&filtered, &request.ingredients, top_n, mood.tip);
        info!(
            "Recommended {} of {} candidates for mood '{}'",
            results.len(),
            filtered.len(),
            mood.mood
        );
        Ok(results)
    }
}
