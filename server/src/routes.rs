//! Route table shared by the server binary and the HTTP tests.
//!
//! Every endpoint is served at the root and again under `/api`, the prefix
//! the browser front-end calls.

use actix_cors::Cors;
use actix_web::http::header;
use actix_web::web;

use crate::api::{health, question, vote};
use crate::config::CorsConfig;
use crate::error::AppError;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(path_config())
        .app_data(query_config())
        .service(web::scope("/api").configure(endpoints))
        .configure(endpoints);
}

fn endpoints(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::health_check))
        .route("/question", web::get().to(question::get_random_question))
        .route("/question", web::post().to(question::submit_question))
        .route("/question/{id}", web::get().to(question::get_question))
        .route("/vote", web::post().to(vote::record_vote));
}

/// Malformed bodies answer with the same `{"error": …}` shape as every other failure
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| AppError::InvalidRequest(err.to_string()).into())
}

/// Unparseable path segments such as `/question/abc` are a 400, not a 404
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default()
        .error_handler(|err, _req| AppError::InvalidRequest(err.to_string()).into())
}

pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default()
        .error_handler(|err, _req| AppError::InvalidRequest(err.to_string()).into())
}

pub fn cors(config: &CorsConfig) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST"])
        .allowed_header(header::CONTENT_TYPE)
        .max_age(3600);

    for origin in &config.allowed_origins {
        cors = if origin == "*" {
            cors.allow_any_origin()
        } else {
            cors.allowed_origin(origin)
        };
    }

    cors
}
