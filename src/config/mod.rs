use crate::error::Result;
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Path to the movie catalog CSV file.
    pub catalog_path: String,
    /// Optional path to a pre-fitted TF-IDF vectorizer (JSON). When set, the
    /// vectorizer is loaded instead of fitted from the catalog at startup.
    pub vectorizer_path: Option<String>,
    /// Number of recommendations returned when a request omits `top_k`.
    pub default_top_k: usize,
}

impl Config {
    pub fn load() -> Result<Self> {
        Ok(Config {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .unwrap_or(3000),
            catalog_path: env::var("CATALOG_PATH")
                .unwrap_or_else(|_| "data/movies.csv".to_string()),
            vectorizer_path: env::var("VECTORIZER_PATH").ok().filter(|p| !p.is_empty()),
            default_top_k: env::var("DEFAULT_TOP_K")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5),
        })
    }
}
