//! Saving and loading fitted vectorizers.
//!
//! The on-disk format is plain JSON so a vectorizer fitted in one process can
//! be reused in another without re-learning vocabulary or IDF weights.

use crate::error::{ApiError, Result};
use crate::ml::tfidf::TfidfVectorizer;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use tracing::info;

/// Load a pre-fitted vectorizer and check it is structurally usable.
pub fn load_vectorizer<P: AsRef<Path>>(path: P) -> Result<TfidfVectorizer> {
    let path = path.as_ref();
    let file = File::open(path)
        .map_err(|e| ApiError::ModelLoadError(format!("{}: {}", path.display(), e)))?;

    let vectorizer: TfidfVectorizer = serde_json::from_reader(BufReader::new(file))
        .map_err(|e| ApiError::ModelLoadError(format!("{}: {}", path.display(), e)))?;

    vectorizer.validate()?;
    info!(
        "Loaded pre-fitted TF-IDF vectorizer ({} terms) from {}",
        vectorizer.dimension(),
        path.display()
    );

    Ok(vectorizer)
}

/// Persist a fitted vectorizer as JSON.
pub fn save_vectorizer<P: AsRef<Path>>(path: P, vectorizer: &TfidfVectorizer) -> Result<()> {
    let file = File::create(path.as_ref())?;
    serde_json::to_writer(BufWriter::new(file), vectorizer)?;
    Ok(())
}
