use serde_json::Value;

use super::{first_success, is_blank, parse_quasi_json, Extractor};
use crate::model::TagSet;

struct StructuredTags;

impl Extractor for StructuredTags {
    fn name(&self) -> &'static str {
        "structured_tags"
    }

    fn extract(&self, raw: &str) -> Option<Vec<String>> {
        let tags = parse_quasi_json(raw)?;
        let names = tags
            .as_array()?
            .iter()
            .filter_map(|tag| match tag {
                Value::String(name) => Some(name.as_str()),
                Value::Object(_) => tag.get("name").and_then(Value::as_str),
                _ => None,
            })
            .map(|name| name.trim().to_lowercase())
            .filter(|name| !name.is_empty())
            .collect();
        Some(names)
    }
}

/// Parse a `tags` field into tag names plus the raw text.
///
/// When structured parsing fails the name list stays empty and matching
/// falls back to a substring test against the raw text.
pub fn parse_tags(tags: &str) -> TagSet {
    if is_blank(tags) {
        return TagSet::default();
    }

    let names = first_success(tags, &[&StructuredTags])
        .map(|(_, names)| names)
        .unwrap_or_default();

    TagSet {
        names,
        raw: tags.trim().to_lowercase(),
    }
}
