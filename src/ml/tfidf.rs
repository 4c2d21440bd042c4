//! TF-IDF vectorization of combined movie text.
//!
//! Term weights use smoothed inverse document frequency,
//! `idf(t) = ln((1 + n) / (1 + df(t))) + 1`, and every document row is
//! L2-normalized, so cosine scores over the resulting matrix land in [0, 1].

use crate::error::{ApiError, Result};
use ndarray::Array2;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::debug;

// Runs of two or more word characters, matched over lowercased input.
static TOKEN_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w\w+").unwrap());

fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    TOKEN_PATTERN
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// A fitted text-to-vector transform.
///
/// Fit once over the catalog corpus, or loaded pre-fitted from disk (see
/// [`crate::ml::persist`]). Applying a fitted vectorizer to new text silently
/// ignores terms outside its vocabulary; they contribute zero weight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f32>,
}

impl TfidfVectorizer {
    /// Learn vocabulary and IDF weights from the given corpus.
    ///
    /// Vocabulary columns are assigned in sorted term order, so fitting the
    /// same corpus twice produces identical vectorizers.
    pub fn fit<S: AsRef<str>>(corpus: &[S]) -> Result<Self> {
        if corpus.is_empty() {
            return Err(ApiError::EmptyCatalog(
                "cannot fit a vectorizer on an empty corpus".to_string(),
            ));
        }

        let n_docs = corpus.len();
        let mut doc_freq: HashMap<String, usize> = HashMap::new();
        for doc in corpus {
            let unique_terms: HashSet<String> = tokenize(doc.as_ref()).into_iter().collect();
            for term in unique_terms {
                *doc_freq.entry(term).or_insert(0) += 1;
            }
        }

        let mut terms: Vec<String> = doc_freq.keys().cloned().collect();
        terms.sort();

        let mut vocabulary = HashMap::with_capacity(terms.len());
        let mut idf = Vec::with_capacity(terms.len());
        for (index, term) in terms.into_iter().enumerate() {
            let df = doc_freq[&term];
            idf.push(((1 + n_docs) as f32 / (1 + df) as f32).ln() + 1.0);
            vocabulary.insert(term, index);
        }

        debug!(
            "Fitted TF-IDF vectorizer: {} terms over {} documents",
            vocabulary.len(),
            n_docs
        );

        Ok(Self { vocabulary, idf })
    }

    /// Transform a corpus into a document × vocabulary matrix of
    /// L2-normalized TF-IDF weights. Out-of-vocabulary terms are skipped.
    pub fn transform<S: AsRef<str>>(&self, corpus: &[S]) -> Result<Array2<f32>> {
        if corpus.is_empty() {
            return Err(ApiError::EmptyCatalog(
                "cannot transform an empty corpus".to_string(),
            ));
        }

        let mut matrix = Array2::<f32>::zeros((corpus.len(), self.dimension()));
        for (row, doc) in corpus.iter().enumerate() {
            let mut counts: HashMap<usize, f32> = HashMap::new();
            for token in tokenize(doc.as_ref()) {
                if let Some(&column) = self.vocabulary.get(&token) {
                    *counts.entry(column).or_insert(0.0) += 1.0;
                }
            }

            for (column, count) in counts {
                matrix[[row, column]] = count * self.idf[column];
            }

            let norm = {
                let values = matrix.row(row);
                values.dot(&values).sqrt()
            };
            if norm > 0.0 {
                matrix.row_mut(row).mapv_inplace(|weight| weight / norm);
            }
        }

        Ok(matrix)
    }

    /// Fit on a corpus and transform it in one step.
    pub fn fit_transform<S: AsRef<str>>(corpus: &[S]) -> Result<(Self, Array2<f32>)> {
        let vectorizer = Self::fit(corpus)?;
        let matrix = vectorizer.transform(corpus)?;
        Ok((vectorizer, matrix))
    }

    /// Number of vocabulary columns a transformed row will have.
    pub fn dimension(&self) -> usize {
        self.idf.len()
    }

    /// Check a (possibly externally supplied) vectorizer for structural
    /// consistency before it is used for similarity computation.
    pub fn validate(&self) -> Result<()> {
        if self.vocabulary.is_empty() {
            return Err(ApiError::IncompatibleModel(
                "vectorizer has an empty vocabulary".to_string(),
            ));
        }

        if self.vocabulary.len() != self.idf.len() {
            return Err(ApiError::IncompatibleModel(format!(
                "vocabulary has {} terms but {} IDF weights",
                self.vocabulary.len(),
                self.idf.len()
            )));
        }

        if let Some(&max_index) = self.vocabulary.values().max() {
            if max_index >= self.idf.len() {
                return Err(ApiError::IncompatibleModel(format!(
                    "vocabulary column {} is out of range for {} IDF weights",
                    max_index,
                    self.idf.len()
                )));
            }
        }

        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn from_parts(vocabulary: HashMap<String, usize>, idf: Vec<f32>) -> Self {
        Self { vocabulary, idf }
    }
}
