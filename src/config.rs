use crate::error::ReviewError;
use crate::models::score::{default_score_choices, parse_score_choices, ScoreChoice};
use leptos::logging::{log, warn};
use std::env;

pub const DEFAULT_DB_PATH: &str = "reviews.db";
pub const DEFAULT_SESSION_COOKIE: &str = "reviews_session";

/// Settings of the reviews service. The site address itself comes from the
/// leptos configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewsConfig {
    pub db_path: String,
    pub content_file: Option<String>, // JSON seed for the content registry
    pub score_choices: Vec<ScoreChoice>,
    pub session_cookie: String,
    pub trust_auth_headers: bool,
}

impl Default for ReviewsConfig {
    fn default() -> Self {
        Self {
            db_path: DEFAULT_DB_PATH.to_string(),
            content_file: None,
            score_choices: default_score_choices(),
            session_cookie: DEFAULT_SESSION_COOKIE.to_string(),
            trust_auth_headers: false,
        }
    }
}

impl ReviewsConfig {
    pub fn from_env() -> Result<Self, ReviewError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ReviewError> {
        let defaults = Self::default();

        let db_path = lookup("REVIEWS_DB_PATH").unwrap_or_else(|| {
            log!("[CONFIG] REVIEWS_DB_PATH not set, using default: {}", defaults.db_path);
            defaults.db_path.clone()
        });

        let content_file = lookup("REVIEWS_CONTENT_FILE").filter(|p| !p.trim().is_empty());
        if content_file.is_none() {
            warn!("[CONFIG] REVIEWS_CONTENT_FILE not set, content registry starts empty");
        }

        let score_choices = match lookup("REVIEWS_SCORE_CHOICES") {
            Some(raw) => parse_score_choices(&raw)
                .map_err(|e| ReviewError::Config(format!("REVIEWS_SCORE_CHOICES: {}", e)))?,
            None => defaults.score_choices.clone(),
        };

        let session_cookie = lookup("REVIEWS_SESSION_COOKIE")
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(defaults.session_cookie);

        let trust_auth_headers = lookup("REVIEWS_TRUST_AUTH_HEADERS")
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(defaults.trust_auth_headers);

        Ok(Self {
            db_path,
            content_file,
            score_choices,
            session_cookie,
            trust_auth_headers,
        })
    }
}
