use serde_json::Value;

/// Rewrite Python-literal style text into JSON.
///
/// Single-quoted strings become double-quoted, embedded double quotes are
/// escaped, and the bare words `None`, `True`, `False` and `nan` become their
/// JSON counterparts. An apostrophe inside a single-quoted string that was not
/// escaped ends the string early; the result is then invalid JSON and the
/// caller falls through to its next strategy.
pub fn to_json(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 16);
    let mut chars = text.chars().peekable();
    let mut quote: Option<char> = None;

    while let Some(c) = chars.next() {
        match quote {
            Some(q) => match c {
                '\\' => match chars.next() {
                    Some('\'') => out.push('\''),
                    Some(next) => {
                        out.push('\\');
                        out.push(next);
                    }
                    None => out.push_str("\\\\"),
                },
                c if c == q => {
                    out.push('"');
                    quote = None;
                }
                '"' => out.push_str("\\\""),
                '\n' => out.push_str("\\n"),
                '\r' => out.push_str("\\r"),
                '\t' => out.push_str("\\t"),
                c => out.push(c),
            },
            None => match c {
                '\'' | '"' => {
                    out.push('"');
                    quote = Some(c);
                }
                c if c.is_ascii_alphabetic() => {
                    let mut word = String::from(c);
                    while let Some(&next) = chars.peek() {
                        if next.is_ascii_alphanumeric() || next == '_' {
                            word.push(next);
                            chars.next();
                        } else {
                            break;
                        }
                    }
                    out.push_str(match word.as_str() {
                        "None" | "nan" | "NaN" => "null",
                        "True" => "true",
                        "False" => "false",
                        other => other,
                    });
                }
                c => out.push(c),
            },
        }
    }

    out
}

/// Parse a field as JSON, first as-is and then after [`to_json`].
pub fn parse_quasi_json(text: &str) -> Option<Value> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    serde_json::from_str::<Value>(trimmed)
        .or_else(|_| serde_json::from_str::<Value>(&to_json(trimmed)))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_single_quotes_and_python_literals() {
        let raw = "[{'name': 'chicken', 'id': 12, 'appliance': None, 'ok': True}]";
        let value = parse_quasi_json(raw).unwrap();
        assert_eq!(
            value,
            json!([{"name": "chicken", "id": 12, "appliance": null, "ok": true}])
        );
    }

    #[test]
    fn test_apostrophe_inside_double_quoted_string() {
        let raw = r#"[{'display_text': "Don't overmix the \"batter\"."}]"#;
        let value = parse_quasi_json(raw).unwrap();
        assert_eq!(value[0]["display_text"], "Don't overmix the \"batter\".");
    }

    #[test]
    fn test_escaped_apostrophe_inside_single_quotes() {
        let raw = r"['chef\'s knife']";
        assert_eq!(parse_quasi_json(raw).unwrap(), json!(["chef's knife"]));
    }

    #[test]
    fn test_unescaped_apostrophe_breaks_parse() {
        assert!(parse_quasi_json("[{'name': 'chef's knife'}]").is_none());
    }

    #[test]
    fn test_valid_json_passes_through() {
        let raw = r#"{"name": "None of these"}"#;
        assert_eq!(parse_quasi_json(raw).unwrap()["name"], "None of these");
    }

    #[test]
    fn test_words_inside_strings_untouched() {
        assert_eq!(to_json("{'a': 'True None'}"), r#"{"a": "True None"}"#);
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_quasi_json("   ").is_none());
    }
}
