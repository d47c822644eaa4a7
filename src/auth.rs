use axum::{extract::FromRequestParts, http::request::Parts};

use crate::error::ApiError;

/// Header carrying the stable opaque identifier of the authenticated caller.
pub const USER_ID_HEADER: &str = "x-user-id";
/// Header carrying the caller's email, when the identity layer knows it.
pub const USER_EMAIL_HEADER: &str = "x-user-email";

/// Authenticated caller identity.
///
/// OAuth sign-in itself happens upstream; the identity layer attaches the
/// result to each request as headers. `user_id` is the sole authorization
/// key. The email is a display attribute only and must never be used as a
/// join key, since emails can change or be reused.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: String,
    pub email: Option<String>,
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_owned)
            .ok_or(ApiError::Unauthenticated)?;

        let email = parts
            .headers
            .get(USER_EMAIL_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);

        Ok(AuthUser { user_id, email })
    }
}
