//! Authenticated-user extractor.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use crate::api::AppState;
use crate::auth::token_hash;
use crate::error::ApiError;
use crate::models::User;

// == Auth User ==
/// The account behind the request's `Authorization: Bearer <token>`
/// header.
///
/// Adding this as a handler argument makes the route require a live
/// session; any missing, malformed, unknown, or expired token rejects
/// with 401 before the handler body runs.
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

#[axum::async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or_else(|| ApiError::Unauthorized("Missing bearer token".to_string()))?;

        let user_id = state
            .db
            .find_session(&token_hash(token))?
            .ok_or_else(|| ApiError::Unauthorized("Invalid or expired token".to_string()))?;

        let user = state
            .db
            .find_user_by_id(user_id)?
            .ok_or_else(|| ApiError::Unauthorized("Invalid or expired token".to_string()))?;

        Ok(AuthUser(user))
    }
}
