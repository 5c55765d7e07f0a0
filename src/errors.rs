// errors.rs
use thiserror::Error;

/// Errors originating from either the server logic
/// (routing, missing records, bad input) or downstream layers (fixtures, DB).
///
/// Every variant carries a plain message; callers only ever show the text.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Load failed: {0}")]
    LoadFailure(String),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Database Error: {0}")]
    DbError(String),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Internal Server Error")]
    InternalError,
}

impl ServerError {
    pub fn not_found(what: &str) -> Self {
        ServerError::NotFound(format!("{what} not found"))
    }

    pub fn status(&self) -> u16 {
        match self {
            ServerError::NotFound(_) => 404,
            ServerError::BadRequest(_) => 400,
            ServerError::LoadFailure(_) => 503,
            ServerError::DbError(_) | ServerError::Config(_) | ServerError::InternalError => 500,
        }
    }
}

impl From<rusqlite::Error> for ServerError {
    fn from(e: rusqlite::Error) -> Self {
        ServerError::DbError(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_follow_error_kind() {
        assert_eq!(ServerError::not_found("Match").status(), 404);
        assert_eq!(ServerError::BadRequest("x".into()).status(), 400);
        assert_eq!(ServerError::LoadFailure("x".into()).status(), 503);
        assert_eq!(ServerError::InternalError.status(), 500);
    }

    #[test]
    fn not_found_message_names_the_record() {
        assert_eq!(
            ServerError::not_found("Property").to_string(),
            "Not Found: Property not found"
        );
    }
}
