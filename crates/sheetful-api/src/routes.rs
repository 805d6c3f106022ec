//! API routes configuration

use crate::handlers::{health, sheets};
use actix_web::web;

/// Configure Sheetful routes
///
/// - GET / - Service banner
/// - GET /health - Liveness probe
/// - /{document}/{sheet}/... - Row endpoints (see [`sheets`])
///
/// Fixed-suffix routes (`/info`, `/bulk`) are registered before the
/// `/{row}` routes so they are never read as row indices.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(health::root_handler)
        .service(health::health_handler)
        .service(sheets::sheet_info_handler)
        .service(sheets::create_rows_bulk_handler)
        .service(sheets::update_rows_bulk_handler)
        .service(sheets::list_rows_handler)
        .service(sheets::create_row_handler)
        .service(sheets::get_row_handler)
        .service(sheets::update_row_handler);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::json_config;
    use crate::handlers::health::models::{HealthResponse, ServiceInfoResponse};
    use actix_web::{test, App};
    use sheetful_core::SheetsService;
    use sheetful_gateway::MemoryGateway;
    use std::sync::Arc;

    fn service() -> Arc<SheetsService> {
        let gateway = Arc::new(MemoryGateway::new());
        gateway
            .add_document("doc", "Doc")
            .add_sheet(0, "info", vec![vec!["name"], vec!["A"]]);
        Arc::new(SheetsService::new(gateway, Some("key".to_string())))
    }

    #[actix_rt::test]
    async fn test_root_and_health() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(service()))
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::get().uri("/").to_request();
        let body: ServiceInfoResponse = test::call_and_read_body_json(&app, req).await;
        assert!(body.message.starts_with("Sheetful API"));
        assert_eq!(body.version, env!("CARGO_PKG_VERSION"));

        let req = test::TestRequest::get().uri("/health").to_request();
        let body: HealthResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.status, "healthy");
        assert!(chrono::DateTime::parse_from_rfc3339(&body.timestamp).is_ok());
    }

    #[actix_rt::test]
    async fn test_info_suffix_is_not_a_row_index() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(service()))
                .app_data(json_config(1024))
                .configure(configure_routes),
        )
        .await;

        // The sheet itself is titled "info"; /info must still return metadata
        let req = test::TestRequest::get().uri("/doc/info/info").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["title"], "info");
        assert_eq!(body["headerValues"], serde_json::json!(["name"]));

        let req = test::TestRequest::get().uri("/doc/info/0").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, serde_json::json!({"name": "A"}));
    }

    #[actix_rt::test]
    async fn test_malformed_body_uses_error_body() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(service()))
                .app_data(json_config(1024))
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/doc/info")
            .insert_header(("content-type", "application/json"))
            .set_payload("[1, 2")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 400);

        let body: crate::ErrorResponse = test::read_body_json(resp).await;
        assert_eq!(body.error, "INVALID_INPUT");
    }
}
