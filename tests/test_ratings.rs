use mood_munch::{MunchError, RatingStore};
use tempfile::tempdir;

#[test]
fn test_ratings_persist_across_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("faves.db");

    {
        let store = RatingStore::open(&path).unwrap();
        store.save_rating("Chicken Stir Fry", 5.0, "stressed").unwrap();
        store.save_rating("Beef Stew", 3.0, "cozy").unwrap();
        store.save_rating("Beef Stew", 4.0, "cozy").unwrap();
    }

    let store = RatingStore::open(&path).unwrap();
    let all = store.all_ratings().unwrap();
    assert_eq!(all.len(), 3);
    assert_eq!(all[0].title, "Chicken Stir Fry");
    assert_eq!(all[0].mood, "stressed");

    let favorites = store.top_favorites(None).unwrap();
    assert_eq!(favorites[0].title, "Chicken Stir Fry");
    assert_eq!(favorites[1].title, "Beef Stew");
    assert_eq!(favorites[1].avg_score, 3.5);

    let cozy = store.top_favorites(Some("cozy")).unwrap();
    assert_eq!(cozy.len(), 1);
    assert_eq!(cozy[0].title, "Beef Stew");
}

#[test]
fn test_invalid_rating_is_not_stored() {
    let store = RatingStore::open_in_memory().unwrap();

    let err = store.save_rating("Toast", 6.0, "lazy").unwrap_err();
    assert!(matches!(err, MunchError::InvalidRating(score) if score == 6.0));
    assert!(store.save_rating("Toast", f64::NAN, "lazy").is_err());
    assert!(store.all_ratings().unwrap().is_empty());
}

#[test]
fn test_boundary_scores_accepted() {
    let store = RatingStore::open_in_memory().unwrap();
    store.save_rating("Toast", 1.0, "lazy").unwrap();
    store.save_rating("Toast", 5.0, "lazy").unwrap();

    let favorites = store.top_favorites(Some("lazy")).unwrap();
    assert_eq!(favorites[0].avg_score, 3.0);
}
