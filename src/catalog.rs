//! Catalog loading and the process-wide normalized catalog cache.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::OnceLock;

use log::{debug, info, warn};

use crate::model::{NormalizedRecipe, RawRecipe};
use crate::parsers::{parse_ingredients, parse_instructions, parse_tags};
use crate::MunchError;

const UNKNOWN_TITLE: &str = "Unknown";

/// Lenient numeric parse: blanks and garbage become `None`.
fn parse_number(value: Option<&str>) -> Option<f64> {
    value
        .map(str::trim)
        .and_then(|v| v.parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case("nan"))
}

/// Run the record parser over one row.
///
/// Returns `None` when the row has no usable ingredients.
pub fn normalize(raw: RawRecipe) -> Option<NormalizedRecipe> {
    let ingredients_text = parse_ingredients(raw.sections.as_deref().unwrap_or_default());
    if ingredients_text.is_empty() {
        return None;
    }

    let name = non_blank(raw.name);
    let seo_title = non_blank(raw.seo_title);
    let title = seo_title
        .clone()
        .or_else(|| name.clone())
        .unwrap_or_else(|| UNKNOWN_TITLE.to_string());

    Some(NormalizedRecipe {
        title,
        ingredients_text,
        instructions_text: parse_instructions(raw.instructions.as_deref().unwrap_or_default()),
        tags: parse_tags(raw.tags.as_deref().unwrap_or_default()),
        name,
        seo_title,
        total_time_minutes: parse_number(raw.total_time_minutes.as_deref()),
        prep_time_minutes: parse_number(raw.prep_time_minutes.as_deref()),
        cook_time_minutes: parse_number(raw.cook_time_minutes.as_deref()),
        num_servings: parse_number(raw.num_servings.as_deref()),
        thumbnail_url: non_blank(raw.thumbnail_url),
    })
}

/// Read and normalize every row of a CSV catalog.
///
/// Rows that cannot be decoded or have no ingredients are skipped. Only a
/// failure to read the header row is an error.
pub fn load_from_reader<R: Read>(reader: R) -> Result<Vec<NormalizedRecipe>, MunchError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let mut recipes = Vec::new();
    let mut dropped = 0usize;

    for (index, record) in csv_reader.records().enumerate() {
        let row = match record.and_then(|r| r.deserialize::<RawRecipe>(Some(&headers))) {
            Ok(row) => row,
            Err(e) => {
                debug!("Skipping unreadable catalog row {}: {}", index + 1, e);
                dropped += 1;
                continue;
            }
        };

        match normalize(row) {
            Some(recipe) => recipes.push(recipe),
            None => {
                debug!("Dropping catalog row {}: no ingredients", index + 1);
                dropped += 1;
            }
        }
    }

    info!(
        "Parsed {} valid recipes ({} rows dropped)",
        recipes.len(),
        dropped
    );
    Ok(recipes)
}

/// Load a catalog file. A missing or unreadable file yields an empty catalog.
pub fn load(path: &Path) -> Vec<NormalizedRecipe> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) => {
            warn!("Catalog {} unavailable: {}", path.display(), e);
            return Vec::new();
        }
    };

    match load_from_reader(file) {
        Ok(recipes) => {
            if recipes.is_empty() {
                warn!("Catalog {} has no usable recipes", path.display());
            }
            recipes
        }
        Err(e) => {
            warn!("Catalog {} unreadable: {}", path.display(), e);
            Vec::new()
        }
    }
}

/// Lazily loaded, read-only normalized catalog.
///
/// The first call to [`CatalogCache::get`] loads the file; concurrent first
/// callers block until that single load finishes.
#[derive(Debug)]
pub struct CatalogCache {
    path: Option<PathBuf>,
    recipes: OnceLock<Vec<NormalizedRecipe>>,
    loads: AtomicUsize,
}

impl CatalogCache {
    /// Cache backed by a CSV file, loaded on first use.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            recipes: OnceLock::new(),
            loads: AtomicUsize::new(0),
        }
    }

    /// Cache seeded with already-normalized recipes.
    pub fn preloaded(recipes: Vec<NormalizedRecipe>) -> Self {
        let cell = OnceLock::new();
        let _ = cell.set(recipes);
        Self {
            path: None,
            recipes: cell,
            loads: AtomicUsize::new(0),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn is_loaded(&self) -> bool {
        self.recipes.get().is_some()
    }

    pub fn get(&self) -> &[NormalizedRecipe] {
        self.recipes.get_or_init(|| {
            let previous = self.loads.fetch_add(1, Ordering::Relaxed);
            debug!("Loading catalog (load #{})", previous + 1);
            match &self.path {
                Some(path) => load(path),
                None => Vec::new(),
            }
        })
    }

    /// How many times the catalog has been read.
    #[cfg(test)]
    pub(crate) fn load_count(&self) -> usize {
        self.loads.load(Ordering::Relaxed)
    }

    /// Drop the cached rows so the next [`get`](Self::get) reads the file again.
    ///
    /// A preloaded cache has no file behind it and becomes empty. An engine
    /// sharing the cache reaches this through [`Recommender::reload`].
    ///
    /// [`Recommender::reload`]: crate::Recommender::reload
    pub fn reload(&mut self) {
        if self.recipes.take().is_some() {
            debug!("Catalog cache invalidated");
        }
    }
}
