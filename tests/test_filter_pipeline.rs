use mood_munch::filters::{filter, filter_with_mood};
use mood_munch::{resolve_mood, NormalizedRecipe, TagSet};

fn recipe(title: &str, ingredients: &str, tags: &str, minutes: Option<f64>) -> NormalizedRecipe {
    let mut recipe = NormalizedRecipe::new(title, ingredients, "Cook.");
    recipe.tags = mood_munch::parsers::parse_tags(tags);
    recipe.total_time_minutes = minutes;
    recipe
}

fn catalog() -> Vec<NormalizedRecipe> {
    vec![
        recipe(
            "Lentil Soup",
            "carrot lentils onion",
            "[{'name': 'vegan'}, {'name': 'one_pot_or_pan'}]",
            Some(45.0),
        ),
        recipe("Avocado Toast", "avocado bread", "[{'name': 'vegan'}]", Some(10.0)),
        recipe("Steak", "beef butter", "[{'name': 'low_carb'}]", Some(25.0)),
        recipe("Mac and Cheese", "cheese macaroni milk", "[]", None),
    ]
}

fn titles(recipes: &[&NormalizedRecipe]) -> Vec<String> {
    recipes.iter().map(|r| r.title.clone()).collect()
}

#[test]
fn test_diet_and_mood_both_narrow() {
    let catalog = catalog();
    assert_eq!(
        titles(&filter(&catalog, "vegan", "stressed")),
        vec!["Avocado Toast"]
    );
    assert_eq!(titles(&filter(&catalog, "vegan", "lazy")), vec!["Lentil Soup"]);
}

#[test]
fn test_romantic_without_chocolate_keeps_diet_set() {
    let catalog = catalog();
    let filtered = filter(&catalog, "vegan", "romantic");
    assert_eq!(titles(&filtered), vec!["Lentil Soup", "Avocado Toast"]);

    let unfiltered = filter(&catalog, "none", "romantic");
    assert_eq!(unfiltered.len(), catalog.len());
}

#[test]
fn test_unmatched_diet_is_ignored() {
    let catalog = catalog();
    assert_eq!(
        titles(&filter(&catalog, "paleo", "tired")),
        titles(&filter(&catalog, "none", "tired"))
    );
}

#[test]
fn test_diet_matching_ignores_separators() {
    let catalog = catalog();
    assert_eq!(titles(&filter(&catalog, "Low-Carb", "tired")), vec!["Steak"]);
}

#[test]
fn test_unknown_mood_uses_default_filter() {
    let catalog = catalog();
    assert_eq!(
        filter(&catalog, "none", "euphoric"),
        filter_with_mood(&catalog, "none", &resolve_mood("cozy"))
    );
}

#[test]
fn test_never_empty_for_non_empty_catalog() {
    let catalog = catalog();
    let diets = ["none", "vegan", "keto", "low-carb", ""];
    let moods = [
        "stressed",
        "energized",
        "cozy",
        "adventurous",
        "romantic",
        "lazy",
        "social",
        "tired",
        "unknown",
    ];

    for diet in diets {
        for mood in moods {
            let filtered = filter(&catalog, diet, mood);
            assert!(!filtered.is_empty(), "diet {diet} mood {mood}");
            assert!(filtered
                .iter()
                .all(|r| catalog.iter().any(|c| c.title == r.title)));
        }
    }
}

#[test]
fn test_raw_tag_text_used_when_tags_are_malformed() {
    let mut broken = NormalizedRecipe::new("Granola", "oats honey", "Bake.");
    broken.tags = TagSet {
        names: Vec::new(),
        raw: "[{'name': 'gluten_free', 'display_name': 'mom's'".to_string(),
    };
    let catalog = vec![broken, NormalizedRecipe::new("Bagel", "flour", "Bake.")];

    assert_eq!(
        titles(&filter(&catalog, "gluten-free", "tired")),
        vec!["Granola"]
    );
}
