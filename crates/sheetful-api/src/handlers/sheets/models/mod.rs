mod bulk_response;
mod list_query;

pub use bulk_response::BulkOperationResponse;
pub use list_query::ListRowsQuery;
