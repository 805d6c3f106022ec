//! Shared fixtures for HTTP-level tests.
//!
//! Requests go through the same app wiring as the production server, with
//! the in-memory gateway standing in for Google Sheets.

#![allow(dead_code)]

use serde_json::Value;
use sheetful_gateway::{MemoryDocument, MemoryGateway};
use sheetful_server::lifecycle::{bootstrap_with_gateway, ApplicationComponents};
use sheetful_server::ServerConfig;
use std::sync::Arc;

pub const DOCUMENT_ID: &str = "doc";
pub const STATIC_KEY: &str = "test-api-key";

pub struct TestFixture {
    pub gateway: Arc<MemoryGateway>,
    pub document: Arc<MemoryDocument>,
    pub components: ApplicationComponents,
    pub config: ServerConfig,
}

impl TestFixture {
    /// Fixture whose service carries a static API key.
    pub fn new() -> Self {
        Self::with_key(Some(STATIC_KEY))
    }

    /// `People` (id 0, index 0) holds three data rows; `Archive` (id 7,
    /// index 1) holds one.
    pub fn with_key(key: Option<&str>) -> Self {
        let gateway = Arc::new(MemoryGateway::new());
        let document = gateway.add_document(DOCUMENT_ID, "Roster");
        document
            .add_sheet(
                0,
                "People",
                vec![
                    vec!["name", "age"],
                    vec!["Ann", "25"],
                    vec!["Bob", "41"],
                    vec!["Cid", "25"],
                ],
            )
            .add_sheet(7, "Archive", vec![vec!["name"], vec!["Old"]]);

        let mut config = ServerConfig::default();
        config.google.api_key = key.map(str::to_string);
        config.limits.max_request_body_size = 16 * 1024;

        let components = bootstrap_with_gateway(&config, gateway.clone());
        Self {
            gateway,
            document,
            components,
            config,
        }
    }

    /// Stored cell text of `sheet`, header row included.
    pub fn cells(&self, sheet: &str) -> Vec<Vec<String>> {
        self.document
            .rows(sheet)
            .unwrap_or_default()
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|cell| match cell {
                        Value::String(s) => s,
                        other => other.to_string(),
                    })
                    .collect()
            })
            .collect()
    }
}

/// Build the test service for a [`TestFixture`].
macro_rules! init_app {
    ($fixture:expr) => {
        actix_web::test::init_service(actix_web::App::new().configure(|cfg| {
            sheetful_server::lifecycle::configure_app(cfg, &$fixture.components, &$fixture.config)
        }))
        .await
    };
}
