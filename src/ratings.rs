//! Rating store used by the presentation layer. The engine never reads it.

use std::path::Path;

use log::{debug, info};
use rusqlite::{params, Connection};
use serde::Serialize;

use crate::MunchError;

pub const MIN_SCORE: f64 = 1.0;
pub const MAX_SCORE: f64 = 5.0;

/// How many titles [`RatingStore::top_favorites`] returns.
pub const FAVORITES_LIMIT: usize = 5;

/// One stored rating.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rating {
    pub title: String,
    pub score: f64,
    pub mood: String,
    /// `YYYY-MM-DD HH:MM:SS`, UTC
    pub timestamp: String,
}

/// A title with its average score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Favorite {
    pub title: String,
    pub avg_score: f64,
}

/// SQLite-backed rating store.
pub struct RatingStore {
    conn: Connection,
}

impl RatingStore {
    /// Open or create the store at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, MunchError> {
        let path = path.as_ref();
        let conn = Connection::open(path)?;
        info!("Opened rating store {}", path.display());
        Self::with_connection(conn)
    }

    /// Store that lives only as long as the value.
    pub fn open_in_memory() -> Result<Self, MunchError> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self, MunchError> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS ratings (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                score REAL NOT NULL CHECK (score >= 1 AND score <= 5),
                mood TEXT NOT NULL,
                timestamp TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
            );

            CREATE INDEX IF NOT EXISTS idx_ratings_title ON ratings(title);
            CREATE INDEX IF NOT EXISTS idx_ratings_mood ON ratings(mood);
            "#,
        )?;
        Ok(Self { conn })
    }

    /// Record a 1-5 score for a recipe title under a mood.
    pub fn save_rating(&self, title: &str, score: f64, mood: &str) -> Result<(), MunchError> {
        if !(MIN_SCORE..=MAX_SCORE).contains(&score) {
            return Err(MunchError::InvalidRating(score));
        }

        self.conn.execute(
            "INSERT INTO ratings (title, score, mood) VALUES (?1, ?2, ?3)",
            params![title, score, mood],
        )?;
        debug!("Saved rating {} for '{}' ({})", score, title, mood);
        Ok(())
    }

    /// Best-rated titles by average score, optionally within one mood.
    pub fn top_favorites(&self, mood: Option<&str>) -> Result<Vec<Favorite>, MunchError> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT title, AVG(score) AS avg_score
            FROM ratings
            WHERE ?1 IS NULL OR mood = ?1
            GROUP BY title
            ORDER BY avg_score DESC, title ASC
            LIMIT ?2
            "#,
        )?;

        let rows = stmt.query_map(params![mood, FAVORITES_LIMIT as i64], |row| {
            Ok(Favorite {
                title: row.get(0)?,
                avg_score: row.get(1)?,
            })
        })?;

        let mut favorites = Vec::new();
        for row in rows {
            favorites.push(row?);
        }
        Ok(favorites)
    }

    /// Every rating in the order it was saved.
    pub fn all_ratings(&self) -> Result<Vec<Rating>, MunchError> {
        let mut stmt = self
            .conn
            .prepare("SELECT title, score, mood, timestamp FROM ratings ORDER BY id")?;

        let rows = stmt.query_map([], |row| {
            Ok(Rating {
                title: row.get(0)?,
                score: row.get(1)?,
                mood: row.get(2)?,
                timestamp: row.get(3)?,
            })
        })?;

        let mut ratings = Vec::new();
        for row in rows {
            ratings.push(row?);
        }
        Ok(ratings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_score_is_rejected() {
        let store = RatingStore::open_in_memory().unwrap();

        assert!(matches!(
            store.save_rating("Toast", 0.5, "tired"),
            Err(MunchError::InvalidRating(_))
        ));
        assert!(matches!(
            store.save_rating("Toast", 5.5, "tired"),
            Err(MunchError::InvalidRating(_))
        ));
        assert!(store.all_ratings().unwrap().is_empty());
    }

    #[test]
    fn test_favorites_are_averaged_and_sorted() {
        let store = RatingStore::open_in_memory().unwrap();
        store.save_rating("Toast", 2.0, "tired").unwrap();
        store.save_rating("Toast", 4.0, "tired").unwrap();
        store.save_rating("Curry", 5.0, "cozy").unwrap();

        let favorites = store.top_favorites(None).unwrap();
        assert_eq!(favorites.len(), 2);
        assert_eq!(favorites[0].title, "Curry");
        assert_eq!(favorites[1].avg_score, 3.0);
    }

    #[test]
    fn test_favorites_by_mood() {
        let store = RatingStore::open_in_memory().unwrap();
        store.save_rating("Toast", 3.0, "tired").unwrap();
        store.save_rating("Curry", 5.0, "cozy").unwrap();

        let favorites = store.top_favorites(Some("tired")).unwrap();
        assert_eq!(
            favorites,
            vec![Favorite {
                title: "Toast".to_string(),
                avg_score: 3.0
            }]
        );
        assert!(store.top_favorites(Some("romantic")).unwrap().is_empty());
    }

    #[test]
    fn test_favorites_are_limited() {
        let store = RatingStore::open_in_memory().unwrap();
        for i in 0..8 {
            store.save_rating(&format!("Dish {}", i), 4.0, "social").unwrap();
        }
        assert_eq!(store.top_favorites(None).unwrap().len(), FAVORITES_LIMIT);
    }

    #[test]
    fn test_all_ratings_in_insertion_order() {
        let store = RatingStore::open_in_memory().unwrap();
        store.save_rating("B", 1.0, "lazy").unwrap();
        store.save_rating("A", 5.0, "lazy").unwrap();

        let ratings = store.all_ratings().unwrap();
        let titles: Vec<&str> = ratings.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["B", "A"]);
        assert!(!ratings[0].timestamp.is_empty());
    }
}
