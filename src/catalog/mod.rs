//! Movie catalog loading.
//!
//! The catalog is read once at startup and its row order is stable for the
//! process lifetime; every index handed around the rest of the crate is a
//! position in that order.

use crate::error::Result;
use crate::models::Movie;
use csv::ReaderBuilder;
use std::fs::File;
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone)]
pub struct Catalog {
    movies: Vec<Movie>,
}

impl Catalog {
    /// Load a catalog from a CSV file with a header row.
    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let catalog = Self::from_reader(file)?;
        info!(
            "Loaded {} movies from {}",
            catalog.len(),
            path.as_ref().display()
        );
        Ok(catalog)
    }

    /// Load a catalog from any CSV source with a header row.
    pub fn from_reader<R: std::io::Read>(reader: R) -> Result<Self> {
        let mut csv_reader = ReaderBuilder::new().has_headers(true).from_reader(reader);

        let mut movies = Vec::new();
        for record in csv_reader.deserialize() {
            let movie: Movie = record?;
            movies.push(movie);
        }

        Ok(Self { movies })
    }

    /// Build a catalog from records already in memory, preserving their order.
    pub fn from_movies(movies: Vec<Movie>) -> Self {
        Self { movies }
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Movie> {
        self.movies.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Movie> {
        self.movies.iter()
    }

    /// Resolve an exact title to its catalog index. Duplicate titles resolve
    /// to the first occurrence in catalog order.
    pub fn index_of_title(&self, title: &str) -> Option<usize> {
        self.movies
            .iter()
            .position(|movie| movie.title.as_deref() == Some(title))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_CSV: &str = "\
title,genres,overview,tagline
Inception,\"Action, Sci-Fi\",A thief steals secrets through dreams,Your mind is the scene of the crime
Heat,Crime,A detective hunts a master thief,
Inception,Drama,A duplicate row with the same title,
Unnamed,,,
";

    #[test]
    fn test_load_from_reader() {
        let catalog = Catalog::from_reader(SAMPLE_CSV.as_bytes()).unwrap();

        assert_eq!(catalog.len(), 4);
        assert_eq!(catalog.get(0).unwrap().title.as_deref(), Some("Inception"));
        assert_eq!(
            catalog.get(0).unwrap().genres.as_deref(),
            Some("Action, Sci-Fi")
        );
    }

    #[test]
    fn test_blank_cells_are_absent() {
        let catalog = Catalog::from_reader(SAMPLE_CSV.as_bytes()).unwrap();

        let heat = catalog.get(1).unwrap();
        assert!(heat.tagline.is_none());

        let unnamed = catalog.get(3).unwrap();
        assert!(unnamed.genres.is_none());
        assert!(unnamed.overview.is_none());
    }

    #[test]
    fn test_duplicate_title_resolves_to_first_occurrence() {
        let catalog = Catalog::from_reader(SAMPLE_CSV.as_bytes()).unwrap();

        assert_eq!(catalog.index_of_title("Inception"), Some(0));
        assert_eq!(catalog.index_of_title("Heat"), Some(1));
        assert_eq!(catalog.index_of_title("No Such Movie"), None);
    }
}
