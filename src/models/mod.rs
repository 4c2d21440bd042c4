use serde::{Deserialize, Serialize};

// Re-export types from movie.rs
pub use movie::{Movie, MovieRecommendation};

mod movie;

/// Request structure for movie recommendations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationRequest {
    /// Exact title of the movie to find recommendations for
    pub title: String,
    /// Optional number of recommendations to return; falls back to the
    /// configured default when omitted
    #[serde(default)]
    pub top_k: Option<usize>,
}

/// Response structure for movie recommendations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationResponse {
    /// List of recommended movies, most similar first
    pub recommendations: Vec<MovieRecommendation>,
}
