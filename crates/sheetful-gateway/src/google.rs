//! Google Sheets v4 REST gateway.
//!
//! Endpoints used:
//! - `GET  /v4/spreadsheets/{id}?fields=properties.title,sheets.properties`
//! - `GET  /v4/spreadsheets/{id}/values/{range}`
//! - `POST /v4/spreadsheets/{id}/values:batchUpdate`
//! - `POST /v4/spreadsheets/{id}/values/{range}:append`

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use sheetful_commons::models::{CellValue, DocumentId, SheetHandle};
use std::sync::Arc;
use std::time::Duration;

use crate::a1;
use crate::credential::Credential;
use crate::error::{GatewayError, Result};
use crate::store::{AccessGateway, CellWrite, DocumentStore};

const METADATA_FIELDS: &str = "properties.title,sheets.properties";

/// Client options for the Google gateway.
#[derive(Debug, Clone)]
pub struct GoogleSheetsOptions {
    pub api_base_url: String,
    pub request_timeout: Duration,
    pub value_input_option: String,
    pub value_render_option: String,
}

impl Default for GoogleSheetsOptions {
    fn default() -> Self {
        Self {
            api_base_url: "https://sheets.googleapis.com".to_string(),
            request_timeout: Duration::from_secs(30),
            value_input_option: "USER_ENTERED".to_string(),
            value_render_option: "FORMATTED_VALUE".to_string(),
        }
    }
}

/// Access gateway backed by the Google Sheets v4 API.
#[derive(Clone)]
pub struct GoogleSheetsGateway {
    api: Arc<ApiClient>,
}

impl GoogleSheetsGateway {
    pub fn new(options: GoogleSheetsOptions) -> Result<Self> {
        // Fail fast on a base URL we can't extend with path segments
        ApiClient::build_url(&options.api_base_url, &[])?;

        let http = Client::builder()
            .timeout(options.request_timeout)
            .user_agent(concat!("sheetful/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| GatewayError::Transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            api: Arc::new(ApiClient { http, options }),
        })
    }
}

#[async_trait]
impl AccessGateway for GoogleSheetsGateway {
    async fn open(
        &self,
        document: &DocumentId,
        credential: &Credential,
    ) -> Result<Arc<dyn DocumentStore>> {
        log::debug!(
            "Opening document {} with {}",
            document,
            credential.kind()
        );
        let metadata = self.api.metadata(document, credential).await?;

        Ok(Arc::new(GoogleDocument {
            api: Arc::clone(&self.api),
            document_id: document.clone(),
            title: metadata.properties.title,
            credential: credential.clone(),
        }))
    }
}

struct ApiClient {
    http: Client,
    options: GoogleSheetsOptions,
}

impl ApiClient {
    fn build_url(base: &str, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(base).map_err(|e| {
            GatewayError::Transport(format!("Invalid API base URL '{}': {}", base, e))
        })?;
        {
            let mut path = url.path_segments_mut().map_err(|_| {
                GatewayError::Transport(format!("API base URL '{}' cannot carry a path", base))
            })?;
            path.pop_if_empty();
            path.push("v4").push("spreadsheets");
            for segment in segments {
                path.push(segment);
            }
        }
        Ok(url)
    }

    fn url(&self, segments: &[&str]) -> Result<Url> {
        Self::build_url(&self.options.api_base_url, segments)
    }

    fn authorize(&self, request: RequestBuilder, credential: &Credential) -> RequestBuilder {
        match credential {
            Credential::AccessToken(token) => request.bearer_auth(token),
            Credential::ApiKey(key) => request.query(&[("key", key.as_str())]),
        }
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        credential: &Credential,
    ) -> Result<T> {
        let response = self.authorize(request, credential).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = error_message(&body).unwrap_or_else(|| status.to_string());
            log::debug!("Sheets API returned {}: {}", status, message);
            return Err(GatewayError::from_status(status.as_u16(), message));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| GatewayError::Decode(e.to_string()))
    }

    async fn metadata(
        &self,
        document: &DocumentId,
        credential: &Credential,
    ) -> Result<SpreadsheetMetadata> {
        let url = self.url(&[document.as_str()])?;
        let request = self.http.get(url).query(&[("fields", METADATA_FIELDS)]);
        self.send(request, credential).await
    }

    async fn sheets(
        &self,
        document: &DocumentId,
        credential: &Credential,
    ) -> Result<Vec<SheetHandle>> {
        let metadata = self.metadata(document, credential).await?;
        Ok(metadata
            .sheets
            .iter()
            .map(|entry| entry.properties.to_handle())
            .collect())
    }

    async fn values(
        &self,
        document: &DocumentId,
        range: &str,
        credential: &Credential,
    ) -> Result<Vec<Vec<CellValue>>> {
        let url = self.url(&[document.as_str(), "values", range])?;
        let request = self.http.get(url).query(&[
            ("majorDimension", "ROWS"),
            ("valueRenderOption", self.options.value_render_option.as_str()),
        ]);
        let range: ValueRange = self.send(request, credential).await?;
        Ok(range.values)
    }
}

struct GoogleDocument {
    api: Arc<ApiClient>,
    document_id: DocumentId,
    title: String,
    credential: Credential,
}

impl GoogleDocument {
    async fn find_sheet<F>(&self, predicate: F) -> Result<Option<SheetHandle>>
    where
        F: Fn(&SheetHandle) -> bool + Send,
    {
        let sheets = self.api.sheets(&self.document_id, &self.credential).await?;
        Ok(sheets.into_iter().find(|sheet| predicate(sheet)))
    }
}

#[async_trait]
impl DocumentStore for GoogleDocument {
    fn document_id(&self) -> &DocumentId {
        &self.document_id
    }

    fn title(&self) -> &str {
        &self.title
    }

    async fn sheet_by_id(&self, id: i64) -> Result<Option<SheetHandle>> {
        self.find_sheet(|sheet| sheet.id == id).await
    }

    async fn sheet_by_index(&self, index: usize) -> Result<Option<SheetHandle>> {
        self.find_sheet(|sheet| sheet.index == index).await
    }

    async fn sheet_by_title(&self, title: &str) -> Result<Option<SheetHandle>> {
        self.find_sheet(|sheet| sheet.title == title).await
    }

    async fn read_values(&self, sheet: &SheetHandle) -> Result<Vec<Vec<CellValue>>> {
        let range = a1::sheet_range(&sheet.title);
        self.api
            .values(&self.document_id, &range, &self.credential)
            .await
    }

    async fn read_row(&self, sheet: &SheetHandle, row: usize) -> Result<Vec<CellValue>> {
        let range = a1::row_range(&sheet.title, row);
        let mut rows = self
            .api
            .values(&self.document_id, &range, &self.credential)
            .await?;
        Ok(if rows.is_empty() {
            Vec::new()
        } else {
            rows.swap_remove(0)
        })
    }

    async fn write_cells(&self, sheet: &SheetHandle, writes: &[CellWrite]) -> Result<()> {
        if writes.is_empty() {
            return Ok(());
        }

        let data: Vec<serde_json::Value> = writes
            .iter()
            .map(|write| {
                json!({
                    "range": a1::cell_ref(&sheet.title, write.row, write.column),
                    "values": [[write.value]],
                })
            })
            .collect();

        let url = self
            .api
            .url(&[self.document_id.as_str(), "values:batchUpdate"])?;
        let request = self.api.http.post(url).json(&json!({
            "valueInputOption": self.api.options.value_input_option,
            "data": data,
        }));

        let _: serde_json::Value = self.api.send(request, &self.credential).await?;
        log::debug!(
            "Wrote {} cell(s) to '{}' in {}",
            writes.len(),
            sheet.title,
            self.document_id
        );
        Ok(())
    }

    async fn append_rows(&self, sheet: &SheetHandle, rows: Vec<Vec<CellValue>>) -> Result<()> {
        if rows.is_empty() {
            return Ok(());
        }

        let count = rows.len();
        let target = format!("{}:append", a1::cell_ref(&sheet.title, 1, 1));
        let url = self
            .api
            .url(&[self.document_id.as_str(), "values", target.as_str()])?;
        let request = self
            .api
            .http
            .post(url)
            .query(&[
                ("valueInputOption", self.api.options.value_input_option.as_str()),
                ("insertDataOption", "INSERT_ROWS"),
            ])
            .json(&json!({
                "majorDimension": "ROWS",
                "values": rows,
            }));

        let _: serde_json::Value = self.api.send(request, &self.credential).await?;
        log::debug!(
            "Appended {} row(s) to '{}' in {}",
            count,
            sheet.title,
            self.document_id
        );
        Ok(())
    }
}

/// Extract `error.message` from a Google error envelope.
fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .map(|envelope| envelope.error.message)
        .filter(|message| !message.is_empty())
}

// Google omits zero-valued fields (sheetId 0, index 0), hence the defaults.

#[derive(Debug, Deserialize)]
struct SpreadsheetMetadata {
    #[serde(default)]
    properties: SpreadsheetProperties,
    #[serde(default)]
    sheets: Vec<SheetEntry>,
}

#[derive(Debug, Default, Deserialize)]
struct SpreadsheetProperties {
    #[serde(default)]
    title: String,
}

#[derive(Debug, Deserialize)]
struct SheetEntry {
    properties: SheetProperties,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SheetProperties {
    #[serde(default)]
    sheet_id: i64,
    #[serde(default)]
    title: String,
    #[serde(default)]
    index: usize,
    #[serde(default)]
    grid_properties: GridProperties,
}

impl SheetProperties {
    fn to_handle(&self) -> SheetHandle {
        SheetHandle::new(
            self.sheet_id,
            self.index,
            self.title.clone(),
            self.grid_properties.row_count,
            self.grid_properties.column_count,
        )
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GridProperties {
    #[serde(default)]
    row_count: usize,
    #[serde(default)]
    column_count: usize,
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<CellValue>>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_url_encodes_range() {
        let url = ApiClient::build_url(
            "https://sheets.googleapis.com",
            &["doc-1", "values", "'Class Data'!1:1"],
        )
        .unwrap();
        assert_eq!(
            url.as_str(),
            "https://sheets.googleapis.com/v4/spreadsheets/doc-1/values/'Class%20Data'!1:1"
        );
    }

    #[test]
    fn test_build_url_escapes_slashes_in_titles() {
        let url = ApiClient::build_url(
            "http://localhost:9000/",
            &["doc", "values", "'a/b'"],
        )
        .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:9000/v4/spreadsheets/doc/values/'a%2Fb'"
        );
    }

    #[test]
    fn test_gateway_rejects_bad_base_url() {
        let options = GoogleSheetsOptions {
            api_base_url: "not a url".to_string(),
            ..Default::default()
        };
        assert!(GoogleSheetsGateway::new(options).is_err());
    }

    #[test]
    fn test_metadata_defaults_for_omitted_zero_fields() {
        let body = r#"{
            "properties": {"title": "Roster"},
            "sheets": [
                {"properties": {"title": "Sheet1", "gridProperties": {"rowCount": 1000, "columnCount": 26}}},
                {"properties": {"sheetId": 812, "index": 1, "title": "People"}}
            ]
        }"#;
        let metadata: SpreadsheetMetadata = serde_json::from_str(body).unwrap();
        assert_eq!(metadata.properties.title, "Roster");

        let handles: Vec<SheetHandle> = metadata
            .sheets
            .iter()
            .map(|entry| entry.properties.to_handle())
            .collect();
        assert_eq!(handles[0], SheetHandle::new(0, 0, "Sheet1", 1000, 26));
        assert_eq!(handles[1], SheetHandle::new(812, 1, "People", 0, 0));
    }

    #[test]
    fn test_value_range_without_values() {
        let range: ValueRange =
            serde_json::from_str(r#"{"range":"'Empty'!A1:Z1000","majorDimension":"ROWS"}"#)
                .unwrap();
        assert!(range.values.is_empty());
    }

    #[test]
    fn test_error_message_extraction() {
        let body = r#"{"error":{"code":403,"message":"The caller does not have permission","status":"PERMISSION_DENIED"}}"#;
        assert_eq!(
            error_message(body).as_deref(),
            Some("The caller does not have permission")
        );
        assert_eq!(error_message("<html>oops</html>"), None);
    }

    /// One captured HTTP request: request line and JSON body.
    struct CapturedRequest {
        request_line: String,
        body: serde_json::Value,
    }

    /// Accept one connection on `listener`, answer `200 {}` and return what
    /// was sent.
    async fn capture_one(listener: tokio::net::TcpListener) -> CapturedRequest {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];
        let (head_end, content_length) = loop {
            let n = socket.read(&mut chunk).await.unwrap();
            assert!(n > 0, "connection closed before the request was complete");
            buf.extend_from_slice(&chunk[..n]);

            let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") else {
                continue;
            };
            let head = String::from_utf8_lossy(&buf[..end]).to_string();
            let length = head
                .lines()
                .filter_map(|line| line.split_once(':'))
                .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
                .and_then(|(_, value)| value.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= end + 4 + length {
                break (end, length);
            }
        };

        socket
            .write_all(
                b"HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: 2\r\nconnection: close\r\n\r\n{}",
            )
            .await
            .unwrap();

        let head = String::from_utf8_lossy(&buf[..head_end]).to_string();
        let body_bytes = &buf[head_end + 4..head_end + 4 + content_length];
        CapturedRequest {
            request_line: head.lines().next().unwrap_or_default().to_string(),
            body: serde_json::from_slice(body_bytes).unwrap_or(serde_json::Value::Null),
        }
    }

    async fn local_document() -> (GoogleDocument, tokio::net::TcpListener) {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let options = GoogleSheetsOptions {
            api_base_url: format!("http://{}", listener.local_addr().unwrap()),
            ..Default::default()
        };
        let gateway = GoogleSheetsGateway::new(options).unwrap();
        let document = GoogleDocument {
            api: gateway.api,
            document_id: DocumentId::new("doc1"),
            title: "Roster".to_string(),
            credential: Credential::ApiKey("k".to_string()),
        };
        (document, listener)
    }

    fn people() -> SheetHandle {
        SheetHandle::new(0, 0, "People", 3, 2)
    }

    #[tokio::test]
    async fn test_write_cells_uses_values_batch_update() {
        let (document, listener) = local_document().await;
        let server = tokio::spawn(capture_one(listener));

        document
            .write_cells(&people(), &[CellWrite::new(3, 2, "30")])
            .await
            .unwrap();
        let captured = server.await.unwrap();

        assert!(
            captured
                .request_line
                .starts_with("POST /v4/spreadsheets/doc1/values:batchUpdate?key=k "),
            "{}",
            captured.request_line
        );
        assert_eq!(
            captured.body,
            json!({
                "valueInputOption": "USER_ENTERED",
                "data": [{"range": "'People'!B3", "values": [["30"]]}],
            })
        );
    }

    #[tokio::test]
    async fn test_append_rows_inserts_after_table() {
        let (document, listener) = local_document().await;
        let server = tokio::spawn(capture_one(listener));

        document
            .append_rows(&people(), vec![vec![json!("C"), json!("")]])
            .await
            .unwrap();
        let captured = server.await.unwrap();

        assert!(captured.request_line.starts_with("POST /v4/spreadsheets/doc1/values/"));
        assert!(captured.request_line.contains(":append?"));
        assert!(captured.request_line.contains("insertDataOption=INSERT_ROWS"));
        assert!(captured.request_line.contains("valueInputOption=USER_ENTERED"));
        assert_eq!(
            captured.body,
            json!({"majorDimension": "ROWS", "values": [["C", ""]]})
        );
    }
}
