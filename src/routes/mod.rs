// Route exports
pub mod matches;

use actix_web::{error, web, HttpRequest};
use crate::models::ErrorResponse;

pub use matches::AppState;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::QueryConfig::default().error_handler(handle_query_payload_error));
    matches::configure(cfg);
}

/// Handle query payload errors
pub fn handle_query_payload_error(err: error::QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::info!("Query payload error on {}: {}", req.path(), err);
    ErrorResponse::bad_request("invalid_query", format!("Invalid query: {}", err)).into()
}
