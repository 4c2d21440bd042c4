pub mod recommendation;

// Re-export public types
pub use recommendation::{RecommendationService, TransformMode};
