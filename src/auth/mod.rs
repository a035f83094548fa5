//! Capability check for the editor surface.
//!
//! A single "can edit members" predicate gates every field operation. The
//! predicate is a PSK comparison done in constant time to mitigate timing
//! attacks; there are no per-field or per-role distinctions.

use axum::{
    extract::Request,
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use subtle::ConstantTimeEq;

use crate::errors::{codes, ErrorDetails, ErrorResponse};

/// Header name for the capability key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// The capability predicate: does this key grant edit access?
///
/// With no key configured, every caller can edit (dev mode).
pub fn can_edit_members(expected_psk: Option<&str>, provided: Option<&str>) -> bool {
    match expected_psk {
        None => true,
        Some(expected) => match provided {
            Some(key) => constant_time_compare(key, expected),
            None => false,
        },
    }
}

/// Middleware enforcing the edit capability on the editor routes.
pub async fn edit_capability_layer(
    expected_psk: Option<String>,
    request: Request,
    next: Next,
) -> Response {
    // Get the capability key from the request header
    let provided = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string());

    // Fall back to the Authorization header as bearer token
    let provided = provided.or_else(|| {
        request
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.strip_prefix("Bearer "))
            .map(|s| s.to_string())
    });

    if can_edit_members(expected_psk.as_deref(), provided.as_deref()) {
        next.run(request).await
    } else {
        unauthorized_response("Missing or invalid capability key")
    }
}

/// Perform constant-time string comparison.
fn constant_time_compare(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

/// Create an unauthorized response.
fn unauthorized_response(message: &str) -> Response {
    let body = ErrorResponse {
        success: false,
        error: ErrorDetails {
            code: codes::UNAUTHORIZED.to_string(),
            message: message.to_string(),
        },
    };

    (StatusCode::UNAUTHORIZED, Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_time_compare_equal() {
        assert!(constant_time_compare("test-key-123", "test-key-123"));
    }

    #[test]
    fn test_constant_time_compare_not_equal() {
        assert!(!constant_time_compare("test-key-123", "test-key-124"));
    }

    #[test]
    fn test_constant_time_compare_different_lengths() {
        assert!(!constant_time_compare("short", "much-longer-key"));
    }

    #[test]
    fn test_capability_open_without_configured_key() {
        assert!(can_edit_members(None, None));
        assert!(can_edit_members(None, Some("anything")));
    }

    #[test]
    fn test_capability_requires_matching_key() {
        assert!(can_edit_members(Some("secret"), Some("secret")));
        assert!(!can_edit_members(Some("secret"), Some("wrong")));
        assert!(!can_edit_members(Some("secret"), None));
    }
}
