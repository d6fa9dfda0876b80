//! Record parser for the catalog's nested, inconsistently quoted fields.
//!
//! Each field is handled by an ordered chain of [`Extractor`]s. The first
//! extractor that returns `Some` wins; later ones are only tried when the
//! earlier ones could not make sense of the text. None of the public parse
//! functions fail: the worst case is an empty value or a sentinel.

use html_escape::decode_html_entities;
use log::debug;

mod ingredients;
mod instructions;
mod quasi_json;
mod tags;

pub use ingredients::parse_ingredients;
pub use instructions::{
    parse_instructions, parse_instructions_detailed, InstructionTier, InstructionsOutcome,
    NO_INSTRUCTIONS, UNPARSEABLE_INSTRUCTIONS,
};
pub use quasi_json::{parse_quasi_json, to_json};
pub use tags::parse_tags;

/// One strategy for pulling a list of strings out of a raw field.
pub trait Extractor {
    /// Short label used in debug logs
    fn name(&self) -> &'static str;
    /// `None` means "this strategy does not apply", try the next one
    fn extract(&self, raw: &str) -> Option<Vec<String>>;
}

/// Run the chain in order and return the first success with its label.
pub(crate) fn first_success(
    raw: &str,
    chain: &[&dyn Extractor],
) -> Option<(&'static str, Vec<String>)> {
    for extractor in chain {
        match extractor.extract(raw) {
            Some(values) => return Some((extractor.name(), values)),
            None => debug!("Extractor '{}' found nothing, trying next", extractor.name()),
        }
    }
    None
}

fn decode_html_symbols(text: &str) -> String {
    // some catalog entries are double-encoded (&amp;amp;)
    decode_html_entities(&decode_html_entities(text)).into_owned()
}

/// Treat empty cells and pandas-style `nan` as missing.
pub(crate) fn is_blank(raw: &str) -> bool {
    let trimmed = raw.trim();
    trimmed.is_empty() || trimmed.eq_ignore_ascii_case("nan")
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Never;
    struct Always(&'static str);

    impl Extractor for Never {
        fn name(&self) -> &'static str {
            "never"
        }
        fn extract(&self, _raw: &str) -> Option<Vec<String>> {
            None
        }
    }

    impl Extractor for Always {
        fn name(&self) -> &'static str {
            self.0
        }
        fn extract(&self, raw: &str) -> Option<Vec<String>> {
            Some(vec![raw.to_string()])
        }
    }

    #[test]
    fn test_first_success_skips_failed_extractors() {
        let result = first_success("x", &[&Never, &Always("second"), &Always("third")]);
        assert_eq!(result, Some(("second", vec!["x".to_string()])));
    }

    #[test]
    fn test_first_success_none_when_all_fail() {
        assert_eq!(first_success("x", &[&Never, &Never]), None);
    }

    #[test]
    fn test_decode_double_encoded_entities() {
        assert_eq!(decode_html_symbols("salt &amp;amp; pepper"), "salt & pepper");
    }

    #[test]
    fn test_blank_detection() {
        assert!(is_blank("   "));
        assert!(is_blank("NaN"));
        assert!(!is_blank("[]"));
    }
}
