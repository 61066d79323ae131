// ABOUTME: TF-IDF text index with cosine similarity over short food descriptors
// ABOUTME: Smoothed IDF, English stop words removed, rows L2-normalized at fit time
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::cast_precision_loss)] // Safe: document and term counts are small

use std::collections::{BTreeMap, HashMap, HashSet};

const STOP_WORDS: &[&str] = &[
    "a", "about", "after", "all", "also", "an", "and", "any", "are", "as", "at", "be", "been",
    "but", "by", "can", "do", "for", "from", "had", "has", "have", "he", "her", "his", "how",
    "if", "in", "into", "is", "it", "its", "many", "may", "more", "most", "no", "nor", "not",
    "of", "off", "on", "once", "only", "or", "other", "our", "out", "over", "per", "same", "she",
    "so", "some", "such", "than", "that", "the", "their", "them", "then", "there", "these",
    "they", "this", "those", "to", "too", "under", "up", "very", "was", "we", "were", "what",
    "when", "where", "which", "while", "who", "why", "will", "with", "within", "without", "you",
    "your",
];

/// Lowercase word tokens of two or more alphanumeric characters, stop words removed
#[must_use]
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|token| token.chars().count() >= 2)
        .map(str::to_lowercase)
        .filter(|token| !STOP_WORDS.contains(&token.as_str()))
        .collect()
}

/// Cosine similarity of two equal-length vectors; 0 when either is all zeros
#[must_use]
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}

/// TF-IDF vectors for a fixed document set
#[derive(Debug, Clone, Default)]
pub struct TfIdfIndex {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    vectors: Vec<Vec<f64>>,
}

impl TfIdfIndex {
    /// Build the vocabulary and document vectors
    #[must_use]
    pub fn fit<S: AsRef<str>>(documents: &[S]) -> Self {
        let tokenized: Vec<Vec<String>> = documents.iter().map(|d| tokenize(d.as_ref())).collect();

        // sorted so term indices do not depend on hash order
        let mut document_frequency: BTreeMap<&str, usize> = BTreeMap::new();
        for tokens in &tokenized {
            let unique: HashSet<&str> = tokens.iter().map(String::as_str).collect();
            for term in unique {
                *document_frequency.entry(term).or_insert(0) += 1;
            }
        }

        let n_documents = documents.len() as f64;
        let mut vocabulary = HashMap::with_capacity(document_frequency.len());
        let mut idf = Vec::with_capacity(document_frequency.len());
        for (index, (term, df)) in document_frequency.into_iter().enumerate() {
            vocabulary.insert(term.to_owned(), index);
            idf.push(((n_documents + 1.0) / (df as f64 + 1.0)).ln() + 1.0);
        }

        let mut index = Self {
            vocabulary,
            idf,
            vectors: Vec::new(),
        };
        let vectors = tokenized.iter().map(|tokens| index.vectorize(tokens)).collect();
        index.vectors = vectors;
        index
    }

    /// Number of indexed documents
    #[must_use]
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    /// Whether the index holds no documents
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Vectorize unseen text against the fitted vocabulary; unknown terms are ignored
    #[must_use]
    pub fn transform(&self, text: &str) -> Vec<f64> {
        self.vectorize(&tokenize(text))
    }

    /// Up to `n` other documents most similar to document `index`, best first
    ///
    /// Ties keep document order. Returns nothing for an out-of-range index.
    #[must_use]
    pub fn most_similar(&self, index: usize, n: usize) -> Vec<(usize, f64)> {
        let Some(target) = self.vectors.get(index) else {
            return Vec::new();
        };
        let mut scored: Vec<(usize, f64)> = self
            .vectors
            .iter()
            .enumerate()
            .filter(|(other, _)| *other != index)
            .map(|(other, vector)| (other, cosine_similarity(target, vector)))
            .collect();
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));
        scored.truncate(n);
        scored
    }

    /// Up to `n` documents most similar to free text, best first
    #[must_use]
    pub fn query(&self, text: &str, n: usize) -> Vec<(usize, f64)> {
        let target = self.transform(text);
        let mut scored: Vec<(usize, f64)> = self
            .vectors
            .iter()
            .enumerate()
            .map(|(other, vector)| (other, cosine_similarity(&target, vector)))
            .collect();
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));
        scored.truncate(n);
        scored
    }

    fn vectorize(&self, tokens: &[String]) -> Vec<f64> {
        let mut vector = vec![0.0; self.vocabulary.len()];
        for token in tokens {
            if let Some(&term) = self.vocabulary.get(token) {
                vector[term] += 1.0;
            }
        }
        for (value, idf) in vector.iter_mut().zip(&self.idf) {
            *value *= idf;
        }
        let norm = vector.iter().map(|v| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            for value in &mut vector {
                *value /= norm;
            }
        }
        vector
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_drops_stop_words_and_short_tokens() {
        assert_eq!(
            tokenize("Oatmeal with a Berries, non-vegetarian"),
            vec!["oatmeal", "berries", "non", "vegetarian"]
        );
    }

    #[test]
    fn test_most_similar_prefers_shared_terms() {
        let index = TfIdfIndex::fit(&[
            "grilled chicken salad",
            "grilled salmon",
            "chicken curry rice",
            "fruit smoothie",
        ]);
        let similar = index.most_similar(0, 2);
        assert_eq!(similar.len(), 2);
        assert!(similar.iter().all(|(doc, _)| *doc != 0));
        assert!(similar[0].1 > 0.0);
        assert!(similar.iter().all(|(doc, _)| *doc != 3));
    }

    #[test]
    fn test_query_ignores_unknown_terms() {
        let index = TfIdfIndex::fit(&["greek yogurt", "tofu stir fry"]);
        let hits = index.query("crispy tofu with lasers", 1);
        assert_eq!(hits[0].0, 1);
        assert!(index.transform("lasers").iter().all(|v| v.abs() < f64::EPSILON));
    }

    #[test]
    fn test_cosine_of_zero_vector_is_zero() {
        assert!(cosine_similarity(&[0.0, 0.0], &[1.0, 2.0]).abs() < f64::EPSILON);
    }
}
