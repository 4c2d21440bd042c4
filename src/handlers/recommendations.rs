use crate::{
    config::Config,
    error::ApiError,
    models::{RecommendationRequest, RecommendationResponse},
    services::RecommendationService,
};
use actix_web::{
    web::{self, Json},
    HttpResponse,
};
use tracing::info;

pub fn recommendations_config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/recommendations").route(web::post().to(get_recommendations)));
}

/// Get movie recommendations for an exact catalog title.
///
/// A blank title is a 400; a title with no catalog match is an ordinary empty
/// result, not an error.
pub async fn get_recommendations(
    request: Json<RecommendationRequest>,
    recommendation_service: web::Data<RecommendationService>,
    config: web::Data<Config>,
) -> Result<HttpResponse, ApiError> {
    let title = request.title.trim();
    if title.is_empty() {
        return Err(ApiError::InvalidInput("Title cannot be empty".to_string()));
    }

    let top_k = request.top_k.unwrap_or(config.default_top_k);
    info!("Recommendation request for '{}' (top_k={})", title, top_k);

    let recommendations = recommendation_service.recommend_for_display(title, top_k);

    Ok(HttpResponse::Ok().json(RecommendationResponse { recommendations }))
}
