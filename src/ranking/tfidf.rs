use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

use regex::Regex;

use super::stop_words::is_stop_word;

static WORD: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\w+").ok());

/// Term index to weight. Absent terms weigh zero.
pub type SparseVector = BTreeMap<usize, f64>;

/// Lowercased `\w+` tokens with English stop words removed.
pub fn tokenize(text: &str) -> Vec<String> {
    let Some(word) = WORD.as_ref() else {
        return Vec::new();
    };

    let lowered = text.to_lowercase();
    word.find_iter(&lowered)
        .map(|m| m.as_str())
        .filter(|token| !is_stop_word(token))
        .map(str::to_string)
        .collect()
}

/// Term-frequency / inverse-document-frequency model fitted on a corpus.
///
/// IDF is smoothed as `ln((1 + n) / (1 + df)) + 1`, so a term present in
/// every document still carries weight, and vectors are L2-normalized.
#[derive(Debug, Clone, Default)]
pub struct TfIdfVectorizer {
    vocabulary: BTreeMap<String, usize>,
    idf: Vec<f64>,
}

impl TfIdfVectorizer {
    pub fn fit<S: AsRef<str>>(documents: &[S]) -> Self {
        let mut document_frequency: BTreeMap<String, usize> = BTreeMap::new();
        for document in documents {
            let terms: BTreeSet<String> = tokenize(document.as_ref()).into_iter().collect();
            for term in terms {
                *document_frequency.entry(term).or_default() += 1;
            }
        }

        let n = documents.len() as f64;
        let mut vocabulary = BTreeMap::new();
        let mut idf = Vec::with_capacity(document_frequency.len());
        for (index, (term, df)) in document_frequency.into_iter().enumerate() {
            idf.push(((1.0 + n) / (1.0 + df as f64)).ln() + 1.0);
            vocabulary.insert(term, index);
        }

        Self { vocabulary, idf }
    }

    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn index_of(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    /// Weighted, unit-length vector of `text`. Terms outside the fitted
    /// vocabulary are ignored; text with no known terms maps to the empty vector.
    pub fn transform(&self, text: &str) -> SparseVector {
        let mut vector = SparseVector::new();
        for token in tokenize(text) {
            if let Some(index) = self.index_of(&token) {
                *vector.entry(index).or_default() += 1.0;
            }
        }

        for (index, weight) in vector.iter_mut() {
            *weight *= self.idf[*index];
        }

        let norm = l2_norm(&vector);
        if norm > 0.0 {
            vector.values_mut().for_each(|weight| *weight /= norm);
        }
        vector
    }
}

fn l2_norm(vector: &SparseVector) -> f64 {
    vector.values().map(|w| w * w).sum::<f64>().sqrt()
}

/// Cosine of the angle between two vectors, 0.0 when either is empty.
pub fn cosine_similarity(a: &SparseVector, b: &SparseVector) -> f64 {
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    let dot: f64 = small
        .iter()
        .filter_map(|(index, weight)| large.get(index).map(|other| weight * other))
        .sum();

    let norms = l2_norm(a) * l2_norm(b);
    if norms == 0.0 {
        return 0.0;
    }
    (dot / norms).clamp(0.0, 1.0)
}
