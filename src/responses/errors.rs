use crate::errors::ServerError;
use crate::responses::json::json_bytes_response;
use astra::Response;

pub type ResultResp = Result<Response, ServerError>;

/// Convert a ServerError into a JSON `{"error": ...}` response
pub fn error_to_response(err: ServerError) -> Response {
    let status = err.status();
    let message = match &err {
        ServerError::NotFound(msg)
        | ServerError::BadRequest(msg)
        | ServerError::LoadFailure(msg) => msg.clone(),
        // Internal detail stays in the log.
        ServerError::DbError(_) | ServerError::Config(_) | ServerError::InternalError => {
            tracing::error!(error = %err, "request failed");
            "Internal Server Error".to_string()
        }
    };
    json_error_response(status, &message)
}

pub fn json_error_response(status: u16, message: &str) -> Response {
    let body = serde_json::json!({ "error": message }).to_string();
    json_bytes_response(status, body.into_bytes())
}
