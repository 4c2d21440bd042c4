pub mod features;
pub mod persist;
pub mod similarity;
pub mod tfidf;

pub use features::combined_text;
pub use similarity::SimilarityIndex;
pub use tfidf::TfidfVectorizer;
