use crate::api::requester_from_request;
use crate::config::ReviewsConfig;
use crate::db::Database;
use crate::error::ReviewError;
use crate::lifecycle::ReviewService;
use crate::models::requester::Requester;
use crate::registry::{ContentRegistry, InMemoryRegistry};
use actix_web::HttpRequest;
use leptos::logging::{log, warn};
use std::sync::Arc;

/// Shared state handed to every actix worker.
#[derive(Clone)]
pub struct AppState {
    pub service: ReviewService,
    pub session_cookie: String,
    pub trust_auth_headers: bool, // Read account headers set by an upstream auth proxy
}

impl AppState {
    pub fn new(service: ReviewService, session_cookie: impl Into<String>) -> Self {
        Self {
            service,
            session_cookie: session_cookie.into(),
            trust_auth_headers: false,
        }
    }

    pub fn with_auth_headers(mut self, trust: bool) -> Self {
        self.trust_auth_headers = trust;
        self
    }

    pub fn requester(&self, req: &HttpRequest) -> Requester {
        requester_from_request(req, &self.session_cookie, self.trust_auth_headers)
    }

    /// Opens the database, creates the schema and loads the content registry.
    pub async fn from_config(config: &ReviewsConfig) -> Result<Self, ReviewError> {
        let db = Database::new(&config.db_path)?;
        db.create_schema().await?;
        log!("[STATE] Schema ready in {}", config.db_path);

        let registry: Arc<dyn ContentRegistry> = match &config.content_file {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .map_err(|e| ReviewError::Config(format!("{}: {}", path, e)))?;
                let registry = InMemoryRegistry::from_json(&json)
                    .map_err(|e| ReviewError::Config(format!("{}: {}", path, e)))?;
                Arc::new(registry)
            }
            None => Arc::new(InMemoryRegistry::new()),
        };

        let service = ReviewService::new(db, registry, config.score_choices.clone());
        if config.trust_auth_headers {
            warn!("[STATE] Trusting account headers from upstream proxy");
        }
        Ok(Self::new(service, config.session_cookie.clone())
            .with_auth_headers(config.trust_auth_headers))
    }
}
