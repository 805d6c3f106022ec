use serde::Deserialize;

/// Query string of the listing endpoint.
///
/// Values are kept as text and validated by the handler so bad input gets
/// the standard error body.
#[derive(Debug, Default, Deserialize)]
pub struct ListRowsQuery {
    pub offset: Option<String>,
    pub limit: Option<String>,
    /// JSON object of equality criteria, e.g. `{"status":"active"}`
    pub query: Option<String>,
}
