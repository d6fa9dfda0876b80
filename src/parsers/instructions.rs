use std::collections::HashSet;
use std::sync::LazyLock;

use log::debug;
use regex::Regex;
use serde_json::Value;

use super::{decode_html_symbols, first_success, is_blank, parse_quasi_json, Extractor};

/// Returned when the source row has no instructions at all.
pub const NO_INSTRUCTIONS: &str = "No instructions available.";

/// Returned when instructions were present but no tier could read them.
pub const UNPARSEABLE_INSTRUCTIONS: &str = "Instructions could not be parsed.";

/// Residue fragments must be longer than this many characters.
const MIN_RESIDUE_STEP_CHARS: usize = 10;

/// Words that end in a period without ending a sentence.
const ABBREVIATIONS: &[&str] = &[
    "approx", "tbsp", "tbs", "tsp", "oz", "lb", "lbs", "pkg", "qt", "pt", "fl", "min", "mins",
    "hr", "hrs", "sec", "no", "vs", "etc", "e.g", "i.e", "dr", "mr", "mrs", "st", "deg", "temp",
    "c", "f",
];

/// `display_text` or `raw_text` with its quoted value; group 1 is the key
static TEXT_FIELD: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)['"](display_text|raw_text)['"]\s*:\s*(?:'((?:[^'\\]|\\.)+)'|"((?:[^"\\]|\\.)+)")"#,
    )
    .ok()
});

static NUMBERED_STEP: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?:^|\s)\d+\.\s+((?:[^.?!\n]|\.\d)+[.?!])").ok());

/// Timing, position, id, temperature and appliance keys with their scalar values
static METADATA_PAIR: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)['"]?\b(?:start_time|end_time|position|id|temperature|appliance)\b['"]?\s*:\s*(?:none|null|true|false|nan|-?\d+(?:\.\d+)?|'[^']*'|"[^"]*")?"#,
    )
    .ok()
});

static TEXT_KEY: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r#"(?i)['"]?\b(?:display_text|raw_text)\b['"]?\s*:"#).ok());

/// Any other quoted `'key':` left over from records no earlier tier could read
static QUOTED_KEY: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r#"['"]\w+['"]\s*:"#).ok());

static BARE_LITERAL: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\b(?:None|True|False|null|NaN|nan)\b").ok());

static REPEATED_PUNCTUATION: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\s*,(?:\s*,)+|\s*:(?:\s*:)+").ok());

static HORIZONTAL_SPACE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"[ \t\r]+").ok());

/// Which strategy produced the steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstructionTier {
    /// Parsed as an ordered list of instruction records
    Structured,
    /// `display_text` / `raw_text` fragments found by pattern
    KeyValue,
    /// `1. Do this.` style numbered sentences
    NumberedSteps,
    /// Sentences recovered from the text once the structure was stripped
    Residue,
}

/// Result of [`parse_instructions_detailed`].
#[derive(Debug, Clone, PartialEq)]
pub enum InstructionsOutcome {
    Steps {
        tier: InstructionTier,
        steps: Vec<String>,
    },
    /// The field was empty or an empty list
    Missing,
    /// Text was present but every tier came up empty
    Unparseable,
}

impl InstructionsOutcome {
    /// Newline-joined steps, or the matching sentinel.
    pub fn text(&self) -> String {
        match self {
            InstructionsOutcome::Steps { steps, .. } => steps.join("\n"),
            InstructionsOutcome::Missing => NO_INSTRUCTIONS.to_string(),
            InstructionsOutcome::Unparseable => UNPARSEABLE_INSTRUCTIONS.to_string(),
        }
    }

    pub fn tier(&self) -> Option<InstructionTier> {
        match self {
            InstructionsOutcome::Steps { tier, .. } => Some(*tier),
            _ => None,
        }
    }
}

struct StructuredSteps;
struct KeyValueSteps;
struct NumberedSteps;
struct ResidueSteps;

impl StructuredSteps {
    fn step_text(record: &Value) -> Option<&str> {
        if let Some(text) = record.as_str() {
            return Some(text);
        }
        let field = |key: &str| {
            record
                .get(key)
                .and_then(Value::as_str)
                .filter(|text| !text.trim().is_empty())
        };
        field("display_text").or_else(|| field("raw_text"))
    }
}

impl Extractor for StructuredSteps {
    fn name(&self) -> &'static str {
        "structured"
    }

    fn extract(&self, raw: &str) -> Option<Vec<String>> {
        let records = parse_quasi_json(raw)?;
        let steps: Vec<String> = records
            .as_array()?
            .iter()
            .filter_map(Self::step_text)
            .map(str::to_string)
            .collect();
        non_empty(steps)
    }
}

impl Extractor for KeyValueSteps {
    fn name(&self) -> &'static str {
        "key_value"
    }

    /// Fragments are grouped into records by the `{` that precede them. A
    /// record's `display_text` wins; records without one keep their `raw_text`.
    fn extract(&self, raw: &str) -> Option<Vec<String>> {
        let pattern = TEXT_FIELD.as_ref()?;

        // (record, is display_text, value) in source order
        let mut fields: Vec<(usize, bool, &str)> = Vec::new();
        for cap in pattern.captures_iter(raw) {
            let (Some(key), Some(value)) = (cap.get(1), cap.get(2).or_else(|| cap.get(3))) else {
                continue;
            };
            let record = raw[..key.start()].matches('{').count();
            let is_display = key.as_str().eq_ignore_ascii_case("display_text");
            fields.push((record, is_display, value.as_str()));
        }

        let steps = fields
            .iter()
            .filter(|(record, is_display, _)| {
                *is_display
                    || !fields
                        .iter()
                        .any(|(other, other_display, _)| other == record && *other_display)
            })
            .map(|(_, _, value)| value.to_string())
            .collect();
        non_empty(steps)
    }
}

impl Extractor for NumberedSteps {
    fn name(&self) -> &'static str {
        "numbered_steps"
    }

    fn extract(&self, raw: &str) -> Option<Vec<String>> {
        let pattern = NUMBERED_STEP.as_ref()?;
        let steps = pattern
            .captures_iter(raw)
            .filter_map(|cap| cap.get(1))
            .map(|m| m.as_str().to_string())
            .collect();
        non_empty(steps)
    }
}

impl Extractor for ResidueSteps {
    fn name(&self) -> &'static str {
        "residue"
    }

    fn extract(&self, raw: &str) -> Option<Vec<String>> {
        let residue = strip_structure(raw);
        let steps = split_sentences(&residue)
            .into_iter()
            .filter(|fragment| fragment.chars().count() > MIN_RESIDUE_STEP_CHARS)
            .collect();
        non_empty(steps)
    }
}

fn non_empty(steps: Vec<String>) -> Option<Vec<String>> {
    if steps.is_empty() {
        None
    } else {
        Some(steps)
    }
}

fn replace_all(pattern: &Option<Regex>, text: &str, with: &str) -> String {
    match pattern {
        Some(re) => re.replace_all(text, with).into_owned(),
        None => text.to_string(),
    }
}

/// Remove keys, brackets and quoting, leaving only prose and line breaks.
fn strip_structure(raw: &str) -> String {
    let text = raw.replace("\\n", "\n").replace("\\t", " ");
    let text = replace_all(&METADATA_PAIR, &text, " ");
    let text = replace_all(&TEXT_KEY, &text, " ");
    let text = replace_all(&QUOTED_KEY, &text, " ");
    let text = replace_all(&BARE_LITERAL, &text, " ");

    let chars: Vec<char> = text.chars().collect();
    let mut stripped = String::with_capacity(text.len());
    for (i, &c) in chars.iter().enumerate() {
        match c {
            '[' | ']' | '{' | '}' | '"' | '\\' => stripped.push(' '),
            '\'' => {
                // keep apostrophes inside words (don't, chef's)
                let inside_word = i > 0
                    && chars[i - 1].is_alphanumeric()
                    && chars.get(i + 1).is_some_and(|next| next.is_alphanumeric());
                stripped.push(if inside_word { '\'' } else { ' ' });
            }
            c => stripped.push(c),
        }
    }

    let collapsed = replace_all(&REPEATED_PUNCTUATION, &stripped, ",");
    let collapsed = replace_all(&HORIZONTAL_SPACE, &collapsed, " ");
    collapsed
        .lines()
        .map(|line| line.trim().trim_start_matches([',', ':']).trim())
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn is_abbreviation(word: &str) -> bool {
    let word = word.trim_start_matches(|c: char| !c.is_alphanumeric());
    ABBREVIATIONS
        .iter()
        .any(|abbr| abbr.eq_ignore_ascii_case(word))
}

/// Split on newlines, ", " and sentence-ending punctuation followed by space.
///
/// A period does not end a sentence when the word before it is a known
/// abbreviation or the next word starts in lowercase.
fn split_sentences(text: &str) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut fragments = Vec::new();
    let mut current = String::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let next = chars.get(i + 1).copied();

        let boundary = match c {
            '\n' => true,
            ',' if next == Some(' ') => true,
            '.' | '?' | '!' if next.map_or(true, char::is_whitespace) => {
                let following = chars[i + 1..].iter().find(|ch| !ch.is_whitespace());
                let last_word = current.rsplit(' ').next().unwrap_or_default();
                c != '.'
                    || !(is_abbreviation(last_word) || following.is_some_and(|f| f.is_lowercase()))
            }
            _ => false,
        };

        if boundary {
            if matches!(c, '.' | '?' | '!') {
                current.push(c);
            }
            push_fragment(&mut fragments, &current);
            current.clear();
        } else {
            current.push(c);
        }
        i += 1;
    }
    push_fragment(&mut fragments, &current);

    fragments
}

fn push_fragment(fragments: &mut Vec<String>, fragment: &str) {
    let fragment = fragment.trim().trim_start_matches([',', ':', ';']).trim();
    if !fragment.is_empty() {
        fragments.push(fragment.to_string());
    }
}

/// Strip stray quote and escape characters around a step.
fn clean_step(step: &str) -> String {
    let unescaped = step
        .replace("\\'", "'")
        .replace("\\\"", "\"")
        .replace("\\n", " ")
        .replace("\\t", " ");
    decode_html_symbols(&unescaped)
        .trim_matches(|c: char| c == '\'' || c == '"' || c == '\\' || c.is_whitespace())
        .to_string()
}

fn is_empty_list(raw: &str) -> bool {
    parse_quasi_json(raw)
        .and_then(|value| value.as_array().map(Vec::is_empty))
        .unwrap_or(false)
}

/// Parse an instructions field, reporting which tier succeeded.
pub fn parse_instructions_detailed(instructions: &str) -> InstructionsOutcome {
    if is_blank(instructions) || is_empty_list(instructions) {
        return InstructionsOutcome::Missing;
    }

    let chain: [&dyn Extractor; 4] = [
        &StructuredSteps,
        &KeyValueSteps,
        &NumberedSteps,
        &ResidueSteps,
    ];
    let Some((name, raw_steps)) = first_success(instructions, &chain) else {
        debug!("All instruction tiers failed");
        return InstructionsOutcome::Unparseable;
    };

    let mut seen = HashSet::new();
    let steps: Vec<String> = raw_steps
        .iter()
        .map(|step| clean_step(step))
        .filter(|step| !step.is_empty())
        .filter(|step| seen.insert(step.clone()))
        .collect();

    if steps.is_empty() {
        return InstructionsOutcome::Unparseable;
    }

    let tier = match name {
        "structured" => InstructionTier::Structured,
        "key_value" => InstructionTier::KeyValue,
        "numbered_steps" => InstructionTier::NumberedSteps,
        _ => InstructionTier::Residue,
    };
    debug!("Extracted {} instruction steps via {}", steps.len(), name);

    InstructionsOutcome::Steps { tier, steps }
}

/// Parse an instructions field into newline-joined steps.
///
/// Returns [`NO_INSTRUCTIONS`] when the source had none and
/// [`UNPARSEABLE_INSTRUCTIONS`] when nothing could be recovered.
pub fn parse_instructions(instructions: &str) -> String {
    parse_instructions_detailed(instructions).text()
}
