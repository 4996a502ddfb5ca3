//! API error responses

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use lazy_static::lazy_static;
use medinfo_core::MedInfoError;
use regex::Regex;
use serde_json::json;

/// Error envelope returned by every endpoint as `{"error": message}`
pub struct ApiError(pub MedInfoError);

impl From<MedInfoError> for ApiError {
    fn from(err: MedInfoError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            tracing::error!("request failed: {}", self.0);
        }
        let message = sanitize_message(&self.0.to_string());
        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Strip HTML-looking fragments so provider markup never leaks into JSON
/// error fields
fn sanitize_message(message: &str) -> String {
    lazy_static! {
        static ref TAG_RE: Regex = Regex::new(r"<[^>]*>").unwrap();
    }
    TAG_RE.replace_all(message, "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_fragments_are_stripped() {
        assert_eq!(
            sanitize_message("<html><body>Bad Gateway</body></html> from upstream"),
            "Bad Gateway from upstream"
        );
        assert_eq!(sanitize_message("plain message"), "plain message");
    }

    #[test]
    fn test_unclosed_tags_are_stripped() {
        assert_eq!(sanitize_message("oops <b>bold"), "oops bold");
    }
}
