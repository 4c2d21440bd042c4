use crate::catalog::Catalog;
use crate::error::{ApiError, Result};
use crate::ml::{combined_text, SimilarityIndex, TfidfVectorizer};
use crate::models::MovieRecommendation;
use std::cmp::Ordering;
use tracing::{debug, info};

/// How the text-to-vector transform is obtained at startup.
pub enum TransformMode {
    /// Learn vocabulary and IDF weights from the catalog itself.
    Fit,
    /// Reuse a previously fitted vectorizer; catalog terms outside its
    /// vocabulary contribute zero weight.
    Pretrained(TfidfVectorizer),
}

/// Content-based movie recommender.
///
/// Holds the catalog and the similarity index built over it. Both are
/// immutable after construction, so the service can be shared freely across
/// concurrent requests; `recommend` is a pure read.
pub struct RecommendationService {
    catalog: Catalog,
    index: SimilarityIndex,
}

impl RecommendationService {
    /// Build the vector space over the catalog and wrap it in a service.
    ///
    /// Fails on an empty catalog or a structurally broken pretrained
    /// vectorizer; both make every future query unanswerable, so they are
    /// startup-time fatal rather than per-query errors.
    pub fn build(catalog: Catalog, mode: TransformMode) -> Result<Self> {
        if catalog.is_empty() {
            return Err(ApiError::EmptyCatalog(
                "the movie catalog has no entries".to_string(),
            ));
        }

        let corpus: Vec<String> = catalog.iter().map(combined_text).collect();

        let matrix = match mode {
            TransformMode::Fit => {
                info!("Fitting TF-IDF vectorizer over {} movies", catalog.len());
                let (_, matrix) = TfidfVectorizer::fit_transform(&corpus)?;
                matrix
            }
            TransformMode::Pretrained(vectorizer) => {
                vectorizer.validate()?;
                info!(
                    "Applying pre-fitted TF-IDF vectorizer ({} terms) to {} movies",
                    vectorizer.dimension(),
                    catalog.len()
                );
                vectorizer.transform(&corpus)?
            }
        };

        debug!(
            "Built similarity matrix: {} movies x {} terms",
            matrix.nrows(),
            matrix.ncols()
        );

        Ok(Self {
            index: SimilarityIndex::new(matrix),
            catalog,
        })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Return up to `top_k` movies most similar to the one named `title`.
    ///
    /// An unknown title or `top_k == 0` yields an empty list; neither is an
    /// error. Duplicate titles resolve to their first catalog occurrence.
    /// Results are ordered by descending score, with equal scores ordered by
    /// ascending catalog index, and never include the queried movie itself.
    pub fn recommend(&self, title: &str, top_k: usize) -> Vec<MovieRecommendation> {
        if top_k == 0 {
            return Vec::new();
        }

        let Some(query_index) = self.catalog.index_of_title(title) else {
            info!("No catalog entry titled '{}'", title);
            return Vec::new();
        };

        let scores = self.index.similarity_row(query_index);

        let mut ranked: Vec<(usize, f32)> = scores.into_iter().enumerate().collect();
        ranked.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(Ordering::Equal)
                .then(a.0.cmp(&b.0))
        });

        let results: Vec<MovieRecommendation> = ranked
            .into_iter()
            .filter(|&(index, _)| index != query_index)
            .take(top_k)
            .filter_map(|(index, score)| {
                self.catalog.get(index).map(|movie| MovieRecommendation {
                    movie: movie.clone(),
                    similarity_score: score,
                })
            })
            .collect();

        debug!(
            "Ranked {} recommendations for '{}' (top_k={})",
            results.len(),
            title,
            top_k
        );

        results
    }

    /// `recommend`, then drop entries missing both display fields (genres and
    /// overview). The filter runs after top-k selection and dropped slots are
    /// not backfilled, so fewer than `top_k` results can come back even when
    /// more candidates exist.
    pub fn recommend_for_display(&self, title: &str, top_k: usize) -> Vec<MovieRecommendation> {
        let mut results = self.recommend(title, top_k);
        results.retain(|r| r.movie.genres.is_some() || r.movie.overview.is_some());
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Movie;

    fn movie(title: &str, genres: Option<&str>, overview: Option<&str>) -> Movie {
        Movie {
            title: Some(title.to_string()),
            genres: genres.map(str::to_string),
            overview: overview.map(str::to_string),
            tagline: None,
            production_companies: None,
            keywords: None,
        }
    }

    fn sample_catalog() -> Catalog {
        Catalog::from_movies(vec![
            movie("A", Some("scifi"), Some("space dream")),
            movie("B", Some("scifi"), Some("space dream")),
            movie("C", Some("romance"), Some("love story")),
        ])
    }

    fn sample_service() -> RecommendationService {
        RecommendationService::build(sample_catalog(), TransformMode::Fit).unwrap()
    }

    fn titles(results: &[MovieRecommendation]) -> Vec<&str> {
        results
            .iter()
            .map(|r| r.movie.title.as_deref().unwrap_or(""))
            .collect()
    }

    #[test]
    fn test_build_fails_on_empty_catalog() {
        let result = RecommendationService::build(Catalog::from_movies(Vec::new()), TransformMode::Fit);
        assert!(matches!(result, Err(ApiError::EmptyCatalog(_))));
    }

    #[test]
    fn test_build_fails_on_incompatible_pretrained_vectorizer() {
        let broken = TfidfVectorizer::from_parts(std::collections::HashMap::new(), Vec::new());
        let result = RecommendationService::build(sample_catalog(), TransformMode::Pretrained(broken));
        assert!(matches!(result, Err(ApiError::IncompatibleModel(_))));
    }

    #[test]
    fn test_identical_text_beats_unrelated_text() {
        let service = sample_service();
        let results = service.recommend("A", 1);

        assert_eq!(titles(&results), vec!["B"]);
        assert!((results[0].similarity_score - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_query_movie_is_never_recommended_to_itself() {
        let service = sample_service();
        for title in ["A", "B", "C"] {
            let results = service.recommend(title, 10);
            assert!(!titles(&results).contains(&title));
        }
    }

    #[test]
    fn test_result_size_is_bounded_by_top_k() {
        let service = sample_service();
        for top_k in 1..5 {
            assert!(service.recommend("A", top_k).len() <= top_k);
        }
    }

    #[test]
    fn test_fewer_than_top_k_candidates_returns_all_without_padding() {
        let service = sample_service();
        let results = service.recommend("A", 50);
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn test_unknown_title_returns_empty_result() {
        let service = sample_service();
        assert!(service.recommend("__no_such_title__", 3).is_empty());
    }

    #[test]
    fn test_zero_top_k_returns_empty_result() {
        let service = sample_service();
        assert!(service.recommend("A", 0).is_empty());
    }

    #[test]
    fn test_recommend_is_deterministic() {
        let service = sample_service();
        let first = service.recommend("A", 3);
        let second = service.recommend("A", 3);

        assert_eq!(titles(&first), titles(&second));
        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a.similarity_score, b.similarity_score);
        }
    }

    #[test]
    fn test_scores_are_non_increasing() {
        let service = sample_service();
        let results = service.recommend("C", 10);

        for pair in results.windows(2) {
            assert!(pair[0].similarity_score >= pair[1].similarity_score);
        }
    }

    #[test]
    fn test_equal_scores_order_by_catalog_index() {
        // Both candidates have text identical to the query, so both score 1.0
        // and only catalog order can separate them.
        let catalog = Catalog::from_movies(vec![
            movie("Query", Some("scifi"), Some("space dream")),
            movie("First", Some("scifi"), Some("space dream")),
            movie("Second", Some("scifi"), Some("space dream")),
        ]);
        let service = RecommendationService::build(catalog, TransformMode::Fit).unwrap();

        let results = service.recommend("Query", 2);
        assert_eq!(titles(&results), vec!["First", "Second"]);
    }

    #[test]
    fn test_duplicate_title_resolves_to_first_occurrence() {
        let catalog = Catalog::from_movies(vec![
            movie("Twin", Some("scifi"), Some("space dream")),
            movie("Other", Some("romance"), Some("love story")),
            movie("Twin", Some("romance"), Some("love story")),
        ]);
        let service = RecommendationService::build(catalog, TransformMode::Fit).unwrap();

        // The first "Twin" is the scifi one and shares no terms with "Other".
        // Had resolution picked the later duplicate, "Other" would match it
        // at full score instead.
        let results = service.recommend("Twin", 2);
        assert_eq!(results.len(), 2);
        assert_eq!(titles(&results)[0], "Other");
        assert!(results[0].similarity_score < 0.5);
    }

    #[test]
    fn test_movie_without_features_never_faults() {
        let catalog = Catalog::from_movies(vec![
            movie("A", Some("scifi"), Some("space dream")),
            movie("Blank", None, None),
            movie("C", Some("romance"), Some("love story")),
        ]);
        let service = RecommendationService::build(catalog, TransformMode::Fit).unwrap();

        let results = service.recommend("Blank", 10);
        assert_eq!(results.len(), 2);
        for result in &results {
            assert_eq!(result.similarity_score, 0.0);
        }
    }

    #[test]
    fn test_display_variant_drops_incomplete_entries_without_backfill() {
        let catalog = Catalog::from_movies(vec![
            movie("A", Some("scifi"), Some("space dream")),
            movie("B", Some("scifi"), Some("space dream")),
            movie("Blank", None, None),
        ]);
        let service = RecommendationService::build(catalog, TransformMode::Fit).unwrap();

        let unfiltered = service.recommend("A", 5);
        assert_eq!(titles(&unfiltered), vec!["B", "Blank"]);

        let filtered = service.recommend_for_display("A", 5);
        assert_eq!(titles(&filtered), vec!["B"]);
    }

    #[test]
    fn test_display_variant_keeps_entries_with_one_display_field() {
        let catalog = Catalog::from_movies(vec![
            movie("A", Some("scifi"), Some("space dream")),
            movie("GenreOnly", Some("scifi space dream"), None),
        ]);
        let service = RecommendationService::build(catalog, TransformMode::Fit).unwrap();

        let results = service.recommend_for_display("A", 5);
        assert_eq!(titles(&results), vec!["GenreOnly"]);
    }

    #[test]
    fn test_pretrained_mode_matches_fit_mode_on_same_corpus() {
        let corpus: Vec<String> = sample_catalog().iter().map(combined_text).collect();
        let vectorizer = TfidfVectorizer::fit(&corpus).unwrap();

        let fit_service = sample_service();
        let reuse_service =
            RecommendationService::build(sample_catalog(), TransformMode::Pretrained(vectorizer))
                .unwrap();

        let from_fit = fit_service.recommend("A", 2);
        let from_reuse = reuse_service.recommend("A", 2);

        assert_eq!(titles(&from_fit), titles(&from_reuse));
        for (a, b) in from_fit.iter().zip(&from_reuse) {
            assert!((a.similarity_score - b.similarity_score).abs() < 1e-6);
        }
    }

    #[test]
    fn test_pretrained_mode_tolerates_out_of_vocabulary_catalog() {
        let vectorizer = TfidfVectorizer::fit(&["scifi space dream"]).unwrap();

        let catalog = Catalog::from_movies(vec![
            movie("A", Some("scifi"), Some("space dream")),
            movie("New", Some("western"), Some("desert standoff")),
        ]);
        let service =
            RecommendationService::build(catalog, TransformMode::Pretrained(vectorizer)).unwrap();

        // "New" has no known terms, so it behaves like a zero vector.
        let results = service.recommend("New", 10);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].similarity_score, 0.0);
    }
}
