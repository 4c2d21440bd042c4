use serde::{Deserialize, Deserializer, Serialize};

/// Treat blank or whitespace-only cells the same as missing ones, so absence
/// is a single typed state checked once downstream.
fn deserialize_optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }))
}

/// One catalog entry. `genres` and `overview` feed the similarity model; the
/// remaining optional fields are display-only and carried through unmodified.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Movie {
    #[serde(default, deserialize_with = "deserialize_optional_text")]
    pub title: Option<String>,
    #[serde(
        alias = "genre",
        default,
        deserialize_with = "deserialize_optional_text"
    )]
    pub genres: Option<String>,
    #[serde(
        alias = "description",
        default,
        deserialize_with = "deserialize_optional_text"
    )]
    pub overview: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_text")]
    pub tagline: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_text")]
    pub production_companies: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_text")]
    pub keywords: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieRecommendation {
    pub movie: Movie,
    pub similarity_score: f32,
}
