use mood_munch::{
    resolve_mood, MunchError, NormalizedRecipe, RecommendationRequest, Recommender,
};

fn recipe(title: &str, ingredients: &str, minutes: f64) -> NormalizedRecipe {
    let mut recipe = NormalizedRecipe::new(title, ingredients, "Cook it.");
    recipe.total_time_minutes = Some(minutes);
    recipe
}

fn engine() -> Recommender {
    Recommender::with_catalog(vec![
        recipe("Chicken Stir Fry", "chicken rice sauce soy", 20.0),
        recipe("Beef Stew", "beef carrot potato", 90.0),
    ])
}

fn request(ingredients: &[&str], mood: &str, diet: &str, top_n: usize) -> RecommendationRequest {
    RecommendationRequest::new(ingredients.iter().copied())
        .mood(mood)
        .diet(diet)
        .top_n(top_n)
}

#[test]
fn test_stressed_keeps_quick_recipe() {
    let results = engine()
        .recommend(&request(&["chicken", "rice"], "stressed", "none", 2))
        .unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].title, "Chicken Stir Fry");
    assert!(results[0].similarity_score.unwrap() > 0.0);
    assert_eq!(results[0].mood_tip, resolve_mood("stressed").tip);
}

#[test]
fn test_romantic_without_chocolate_falls_back() {
    let results = engine()
        .recommend(&request(&["beef"], "romantic", "none", 3))
        .unwrap();

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].title, "Beef Stew");
}

#[test]
fn test_unknown_mood_gets_default_tip() {
    let results = engine()
        .recommend(&request(&["chicken"], "euphoric", "none", 3))
        .unwrap();

    assert!(!results.is_empty());
    assert!(results
        .iter()
        .all(|r| r.mood_tip == resolve_mood("cozy").tip));
}

#[test]
fn test_no_ingredients_returns_unscored_catalog_order() {
    let results = engine()
        .recommend(&request(&[" ", ""], "tired", "none", 1))
        .unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].title, "Chicken Stir Fry");
    assert_eq!(results[0].similarity_score, None);
}

#[test]
fn test_result_count_never_exceeds_top_n() {
    for top_n in 1..=4 {
        let results = engine()
            .recommend(&request(&["potato"], "tired", "none", top_n))
            .unwrap();
        assert!(results.len() <= top_n);
        assert_eq!(results.len(), top_n.min(2));
    }
}

#[test]
fn test_zero_results_requested_is_an_error() {
    let outcome = engine().recommend(&request(&["chicken"], "tired", "none", 0));
    assert!(matches!(outcome, Err(MunchError::InvalidTopN)));
}

#[test]
fn test_repeated_calls_are_identical() {
    let engine = engine();
    let req = request(&["rice", "carrot"], "tired", "none", 2);

    let first = engine.recommend(&req).unwrap();
    for _ in 0..5 {
        assert_eq!(engine.recommend(&req).unwrap(), first);
    }
}

#[test]
fn test_scores_are_ordered_and_bounded() {
    let results = engine()
        .recommend(&request(&["beef", "potato", "rice"], "tired", "none", 2))
        .unwrap();

    assert_eq!(results[0].title, "Beef Stew");
    for pair in results.windows(2) {
        assert!(pair[0].similarity_score >= pair[1].similarity_score);
    }
    for result in &results {
        let score = result.similarity_score.unwrap();
        assert!((0.0..=1.0).contains(&score));
    }
}

#[test]
fn test_results_serialize_with_null_sentinel() {
    let results = engine()
        .recommend(&request(&[], "tired", "none", 1))
        .unwrap();
    let json = serde_json::to_value(&results).unwrap();

    assert_eq!(json[0]["title"], "Chicken Stir Fry");
    assert!(json[0]["similarity_score"].is_null());
}
