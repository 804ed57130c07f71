use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, Request},
    middleware::Next,
    response::Response,
};

use crate::{app::AppState, error::AppError};

/// Caller resolved from a bearer token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UserIdentity {
    pub user_id: i64,
}

pub async fn require_user(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_bearer(req.headers()).ok_or_else(unauthenticated_error)?;

    match state.store.resolve_token(&token).await? {
        Some(user_id) => {
            req.extensions_mut().insert(UserIdentity { user_id });
            Ok(next.run(req).await)
        }
        None => {
            tracing::debug!("rejected unknown or expired token");
            Err(unauthenticated_error())
        }
    }
}

fn extract_bearer(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?;
    let raw = value.to_str().ok()?;
    let token = raw
        .strip_prefix("Bearer ")
        .or_else(|| raw.strip_prefix("bearer "))?;
    if token.trim().is_empty() {
        None
    } else {
        Some(token.trim().to_string())
    }
}

pub fn unauthenticated_error() -> AppError {
    AppError::Unauthorized("身份认证信息未提供或已失效".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn extracts_bearer_token() {
        assert_eq!(extract_bearer(&headers("Bearer abc ")), Some("abc".to_string()));
        assert_eq!(extract_bearer(&headers("bearer xyz")), Some("xyz".to_string()));
    }

    #[test]
    fn rejects_other_schemes_and_blank_tokens() {
        assert_eq!(extract_bearer(&headers("Basic dXNlcg==")), None);
        assert_eq!(extract_bearer(&headers("Bearer   ")), None);
        assert_eq!(extract_bearer(&HeaderMap::new()), None);
    }
}
