use std::collections::BTreeSet;
use std::sync::LazyLock;

use log::debug;
use regex::Regex;
use serde_json::Value;

use super::{decode_html_symbols, first_success, is_blank, parse_quasi_json, Extractor};

/// `'name': '<value>'` fragments, with either quote style around the value
static NAME_FRAGMENT: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r#"(?i)['"]name['"]\s*:\s*(?:'([^']+)'|"([^"]+)")"#).ok()
});

/// sections -> components -> ingredient -> name
struct StructuredSections;

/// Regex scan for name fragments anywhere in the text
struct NameFragments;

impl Extractor for StructuredSections {
    fn name(&self) -> &'static str {
        "structured_sections"
    }

    fn extract(&self, raw: &str) -> Option<Vec<String>> {
        let sections = parse_quasi_json(raw)?;
        let sections = sections.as_array()?;

        let names = sections
            .iter()
            .filter_map(|section| section.get("components").and_then(Value::as_array))
            .flatten()
            .filter_map(|component| {
                component
                    .get("ingredient")
                    .and_then(|ingredient| ingredient.get("name"))
                    .and_then(Value::as_str)
            })
            .map(str::to_string)
            .collect();

        Some(names)
    }
}

impl Extractor for NameFragments {
    fn name(&self) -> &'static str {
        "name_fragments"
    }

    fn extract(&self, raw: &str) -> Option<Vec<String>> {
        let pattern = NAME_FRAGMENT.as_ref()?;
        let names: Vec<String> = pattern
            .captures_iter(raw)
            .filter_map(|cap| cap.get(1).or_else(|| cap.get(2)))
            .map(|m| m.as_str().to_string())
            .collect();

        if names.is_empty() {
            None
        } else {
            Some(names)
        }
    }
}

/// Extract a recipe's ingredient names from its `sections` field.
///
/// Returns the lowercase, deduplicated names joined by single spaces, in
/// sorted order. An empty string means nothing usable was found; the catalog
/// loader drops such rows.
pub fn parse_ingredients(sections: &str) -> String {
    if is_blank(sections) {
        return String::new();
    }

    let Some((tier, names)) = first_success(sections, &[&StructuredSections, &NameFragments])
    else {
        debug!("No ingredient names found in sections field");
        return String::new();
    };

    let unique: BTreeSet<String> = names
        .iter()
        .map(|name| decode_html_symbols(name).trim().to_lowercase())
        .filter(|name| !name.is_empty())
        .collect();

    debug!("Extracted {} ingredients via {}", unique.len(), tier);
    unique.into_iter().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECTIONS: &str = "[{'components': [{'raw_text': '1 lb chicken breast', \
        'ingredient': {'name': 'Chicken Breast', 'id': 1}, 'measurements': \
        [{'unit': {'name': 'pound'}}]}, {'ingredient': {'name': 'rice'}}], \
        'name': None, 'position': 1}, {'components': [{'ingredient': \
        {'name': ' soy sauce '}}, {'ingredient': {'name': 'rice'}}], 'name': 'Sauce'}]";

    #[test]
    fn test_structured_sections() {
        assert_eq!(parse_ingredients(SECTIONS), "chicken breast rice soy sauce");
    }

    #[test]
    fn test_structured_parse_ignores_unit_and_section_names() {
        let parsed = parse_ingredients(SECTIONS);
        assert!(!parsed.contains("pound"));
        assert!(!parsed.contains("Sauce"));
    }

    #[test]
    fn test_falls_back_to_name_fragments() {
        // the apostrophe in "baker's" breaks structured parsing
        let raw = "[{'components': [{'ingredient': {'name': 'flour'}}, \
            {'ingredient': {'name': 'baker's yeast'}}, {'ingredient': {'name': 'Salt'}}]}]";
        assert_eq!(parse_ingredients(raw), "baker flour salt");
    }

    #[test]
    fn test_html_entities_decoded() {
        let raw = "[{'components': [{'ingredient': {'name': 'salt &amp; pepper'}}]}]";
        assert_eq!(parse_ingredients(raw), "salt & pepper");
    }

    #[test]
    fn test_empty_and_garbage_input() {
        assert_eq!(parse_ingredients(""), "");
        assert_eq!(parse_ingredients("nan"), "");
        assert_eq!(parse_ingredients("{{{{ not even close"), "");
        assert_eq!(parse_ingredients("[]"), "");
    }

    #[test]
    fn test_parsing_is_idempotent() {
        let malformed = "[{'components': [{'ingredient': {'name': 'it's'}}, 'name': 'x'";
        assert_eq!(parse_ingredients(malformed), parse_ingredients(malformed));
        assert_eq!(parse_ingredients(SECTIONS), parse_ingredients(SECTIONS));
    }
}
