//! Server-wide middleware configuration helpers.
//!
//! Middleware stack (outermost first):
//!
//! 1. **Logger**: request/response access log
//! 2. **CORS**: cross-origin resource sharing policy (via actix-cors)

use actix_cors::Cors;
use actix_web::http::{header::HeaderName, Method};
use actix_web::middleware;
use log::debug;
use sheetful_configs::ServerConfig;

/// Build CORS middleware from server configuration using actix-cors.
///
/// Maps all CorsSettings options to actix-cors builder methods.
/// See: https://docs.rs/actix-cors/latest/actix_cors/struct.Cors.html
pub fn build_cors_from_config(config: &ServerConfig) -> Cors {
    let cors_config = &config.security.cors;
    let wildcard = "*".to_string();

    let mut cors = Cors::default();

    let any_origin =
        cors_config.allowed_origins.is_empty() || cors_config.allowed_origins.contains(&wildcard);
    if any_origin {
        cors = cors.allow_any_origin();
        debug!("CORS: Allowing any origin");
    } else {
        for origin in &cors_config.allowed_origins {
            cors = cors.allowed_origin(origin);
        }
        debug!("CORS: Allowed origins: {:?}", cors_config.allowed_origins);
    }

    let methods: Vec<Method> = cors_config
        .allowed_methods
        .iter()
        .filter_map(|m| m.parse().ok())
        .collect();
    if !methods.is_empty() {
        cors = cors.allowed_methods(methods);
    }

    if cors_config.allowed_headers.contains(&wildcard) {
        cors = cors.allow_any_header();
    } else {
        let headers: Vec<HeaderName> = cors_config
            .allowed_headers
            .iter()
            .filter_map(|h| h.parse().ok())
            .collect();
        if !headers.is_empty() {
            cors = cors.allowed_headers(headers);
        }
    }

    if !cors_config.expose_headers.is_empty() {
        let expose_headers: Vec<HeaderName> = cors_config
            .expose_headers
            .iter()
            .filter_map(|h| h.parse().ok())
            .collect();
        cors = cors.expose_headers(expose_headers);
    }

    // Browsers refuse credentials with a wildcard origin; actix-cors echoes
    // the request origin instead when both are set.
    if cors_config.allow_credentials {
        cors = cors.supports_credentials();
    }

    cors.max_age(cors_config.max_age as usize)
}

/// Build the request logger middleware.
///
/// Query strings are left out of the access log since they may carry
/// `key=` parameters.
pub fn request_logger() -> middleware::Logger {
    middleware::Logger::new(r#"%a "%r" %s %b %Dms"#).exclude("/health")
}
