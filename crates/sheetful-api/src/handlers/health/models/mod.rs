mod health_response;
mod service_info;

pub use health_response::HealthResponse;
pub use service_info::ServiceInfoResponse;
