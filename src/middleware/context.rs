use std::convert::Infallible;

use axum::extract::FromRequestParts;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Per-request context handed explicitly to services.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub request_id: String,
}

impl RequestContext {
    pub fn detached() -> Self {
        Self {
            request_id: "-".to_string(),
        }
    }
}

impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        let request_id = parts
            .headers
            .get(REQUEST_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("-")
            .to_string();
        Ok(RequestContext { request_id })
    }
}
