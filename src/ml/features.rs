use crate::models::Movie;

/// Derive the single text string a movie is vectorized from.
///
/// Genres come first, then the overview, joined by one space. An absent field
/// contributes an empty string; a movie with neither field still yields a
/// (token-free) string. The ordering feeds vocabulary weighting, so it must
/// stay fixed for scores to be reproducible.
pub fn combined_text(movie: &Movie) -> String {
    let genres = movie.genres.as_deref().unwrap_or("");
    let overview = movie.overview.as_deref().unwrap_or("");
    format!("{} {}", genres, overview)
}
