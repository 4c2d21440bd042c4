use crate::{
    catalog::Catalog,
    config::Config,
    error::Result,
    ml::persist,
    routes::api_routes,
    services::{RecommendationService, TransformMode},
};
use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::Context;
use log::info;
use std::net::TcpListener;

pub struct Application {
    port: u16,
    host: String,
    config: Config,
}

impl Application {
    /// Create a new application instance
    pub fn new(config: &Config) -> Self {
        Self {
            port: config.port,
            host: config.host.clone(),
            config: config.clone(),
        }
    }

    /// Build and run the server
    pub async fn run(&self) -> Result<()> {
        // Always bind to 0.0.0.0 for Docker compatibility
        let bind_address = format!("0.0.0.0:{}", self.port);
        let listener = TcpListener::bind(&bind_address)?;
        info!("Starting server at http://{}:{}", self.host, self.port);

        self.run_with_listener(listener).await
    }

    /// Run the server with a specific TCP listener
    /// This is useful for testing where we want to use a random port
    pub async fn run_with_listener(&self, listener: TcpListener) -> Result<()> {
        // Catalog and vector space are built once here; everything a request
        // touches afterwards is read-only.
        let catalog = Catalog::from_csv_path(&self.config.catalog_path)
            .with_context(|| format!("Failed to load catalog from {}", self.config.catalog_path))?;

        let transform_mode = match &self.config.vectorizer_path {
            Some(path) => {
                let vectorizer = persist::load_vectorizer(path)?;
                TransformMode::Pretrained(vectorizer)
            }
            None => TransformMode::Fit,
        };

        let recommendation_service = web::Data::new(
            RecommendationService::build(catalog, transform_mode)
                .context("Failed to build recommendation service")?,
        );
        let config = web::Data::new(self.config.clone());

        HttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header();

            App::new()
                .wrap(cors)
                .wrap(Logger::default())
                .app_data(recommendation_service.clone())
                .app_data(config.clone())
                .service(api_routes())
        })
        .listen(listener)?
        .run()
        .await?;

        Ok(())
    }
}
