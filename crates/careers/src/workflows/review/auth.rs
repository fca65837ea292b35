use std::fmt;
use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::warn;

/// Shared secret expected in `Authorization: Bearer <token>` on admin routes.
///
/// Without a configured token every admin request is refused.
#[derive(Clone, Default)]
pub struct AdminToken(Option<Arc<str>>);

impl AdminToken {
    pub fn new(token: Option<String>) -> Self {
        Self(
            token
                .map(|token| token.trim().to_string())
                .filter(|token| !token.is_empty())
                .map(Arc::from),
        )
    }

    pub fn disabled() -> Self {
        Self(None)
    }

    pub fn is_configured(&self) -> bool {
        self.0.is_some()
    }

    pub fn verify(&self, presented: &str) -> bool {
        match &self.0 {
            Some(expected) => constant_time_eq(expected.as_bytes(), presented.as_bytes()),
            None => false,
        }
    }
}

impl fmt::Debug for AdminToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shown = if self.is_configured() {
            "<redacted>"
        } else {
            "<unset>"
        };
        f.debug_tuple("AdminToken").field(&shown).finish()
    }
}

fn constant_time_eq(expected: &[u8], presented: &[u8]) -> bool {
    if expected.len() != presented.len() {
        return false;
    }
    expected
        .iter()
        .zip(presented)
        .fold(0u8, |diff, (a, b)| diff | (a ^ b))
        == 0
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
}

/// Middleware rejecting requests that lack the admin bearer token.
pub async fn require_admin(
    State(token): State<AdminToken>,
    request: Request,
    next: Next,
) -> Response {
    let presented = bearer_token(request.headers());
    let token_present = presented.is_some();
    if presented.is_some_and(|presented| token.verify(presented)) {
        return next.run(request).await;
    }

    warn!(
        path = %request.uri().path(),
        token_present,
        "admin request denied"
    );
    (
        StatusCode::UNAUTHORIZED,
        [(header::WWW_AUTHENTICATE, "Bearer")],
        Json(json!({ "error": "unauthorized" })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn verifies_only_the_configured_token() {
        let token = AdminToken::new(Some(" s3cret ".to_string()));
        assert!(token.verify("s3cret"));
        assert!(!token.verify("s3cre"));
        assert!(!token.verify("S3CRET"));
    }

    #[test]
    fn unset_or_blank_token_rejects_everything() {
        assert!(!AdminToken::disabled().verify(""));
        assert!(!AdminToken::new(Some("   ".to_string())).is_configured());
    }

    #[test]
    fn debug_output_hides_the_secret() {
        let token = AdminToken::new(Some("s3cret".to_string()));
        assert!(!format!("{token:?}").contains("s3cret"));
    }

    #[test]
    fn reads_bearer_scheme_only() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        assert_eq!(bearer_token(&headers), None);
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
        assert_eq!(bearer_token(&headers), Some("abc"));
    }
}
