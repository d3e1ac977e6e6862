use axum::{
    async_trait,
    body::Body,
    extract::{FromRequestParts, Request},
    http::{request::Parts, HeaderValue},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::{error::AppError, models::UserId};

/// HTTP header name for request ID
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Header carrying the caller's identity, set by the upstream auth proxy
pub const USER_ID_HEADER: &str = "x-user-id";

/// Per-request metadata stored in the request extensions
#[derive(Clone, Copy, Debug)]
pub struct RequestContext {
    pub request_id: Uuid,
    pub user: Option<UserId>,
}

impl RequestContext {
    fn from_parts(parts: &Parts) -> Self {
        let header = |name: &str| {
            parts
                .headers
                .get(name)
                .and_then(|h| h.to_str().ok())
                .map(str::to_string)
        };

        let request_id = header(REQUEST_ID_HEADER)
            .and_then(|s| Uuid::parse_str(&s).ok())
            .unwrap_or_else(Uuid::new_v4);

        let user = header(USER_ID_HEADER).and_then(|raw| match raw.parse::<UserId>() {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::warn!(request_id = %request_id, error = %e, "Ignoring malformed user header");
                None
            }
        });

        Self { request_id, user }
    }
}

/// Middleware that resolves the [`RequestContext`] and echoes the request ID.
///
/// An incoming `x-request-id` is reused when it is a valid UUID; otherwise a
/// new one is generated. The caller is read from `x-user-id`.
pub async fn request_context_middleware(request: Request, next: Next) -> Response {
    let (mut parts, body) = request.into_parts();
    let context = RequestContext::from_parts(&parts);
    parts.extensions.insert(context);

    let mut response = next.run(Request::from_parts(parts, body)).await;

    if let Ok(header_value) = HeaderValue::from_str(&context.request_id.to_string()) {
        response
            .headers_mut()
            .insert(REQUEST_ID_HEADER, header_value);
    }

    response
}

/// Tracing span for a request, tagged with its request ID and caller
pub fn make_span_with_request_context(request: &Request<Body>) -> tracing::Span {
    let context = request.extensions().get::<RequestContext>();

    let request_id = context
        .map(|c| c.request_id.to_string())
        .unwrap_or_else(|| "unknown".to_string());
    let user = context
        .and_then(|c| c.user)
        .map(|u| u.to_string())
        .unwrap_or_else(|| "anonymous".to_string());

    tracing::info_span!(
        "http_request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = %request_id,
        user = %user,
    )
}

/// Extractor for endpoints that act on behalf of a user
#[derive(Clone, Copy, Debug)]
pub struct CurrentUser(pub UserId);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<RequestContext>()
            .and_then(|context| context.user)
            .map(CurrentUser)
            .ok_or(AppError::Unauthenticated)
    }
}
