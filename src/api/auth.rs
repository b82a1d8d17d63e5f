//! Account handlers: signup and login.

use axum::extract::State;
use axum::Json;
use tracing::info;

use crate::api::AppState;
use crate::auth::{generate_token, hash_password, token_hash, verify_password};
use crate::error::{ApiError, Result};
use crate::models::{AuthResponse, LoginRequest, Preferences, SignupRequest};

// == Signup ==
/// Handler for POST /users/signup
///
/// Creates an account, or reuses the one already registered under the
/// email: signing up twice is not an error, it returns 200 with a fresh
/// token either way. A bare `preferences` list in the body replaces the
/// account's category list.
pub async fn signup_handler(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> Result<Json<AuthResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(ApiError::Validation(error_msg));
    }

    let email = req.email.trim().to_lowercase();
    let name = req.name.trim();

    let user = match state.db.find_user_by_email(&email)? {
        Some(existing) => {
            if let Some(categories) = &req.preferences {
                state
                    .db
                    .update_preferences(existing.id, Some(categories), None)?;
            }
            existing
        }
        None => {
            let mut preferences = Preferences::default();
            if let Some(categories) = req.preferences.clone() {
                preferences.categories = categories;
            }

            let user = state.db.create_user(
                name,
                &email,
                &hash_password(&req.password),
                &preferences,
            )?;
            info!("New account {} ({})", user.id, user.email);
            user
        }
    };

    let token = issue_token(&state, user.id)?;
    Ok(Json(AuthResponse::new(&user, token)))
}

// == Login ==
/// Handler for POST /users/login
///
/// Unknown email and wrong password fail identically, so the response
/// does not reveal which accounts exist.
pub async fn login_handler(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(ApiError::Validation(error_msg));
    }

    let email = req.email.trim().to_lowercase();
    let user = state
        .db
        .find_user_by_email(&email)?
        .filter(|user| verify_password(&req.password, &user.password_hash))
        .ok_or_else(|| ApiError::Unauthorized("Invalid email or password".to_string()))?;

    let token = issue_token(&state, user.id)?;
    Ok(Json(AuthResponse::new(&user, token)))
}

// == Token Issue ==
/// Mints a bearer token and opens its session row.
fn issue_token(state: &AppState, user_id: i64) -> Result<String> {
    let token = generate_token();
    state
        .db
        .insert_session(&token_hash(&token), user_id, state.config.token_ttl)?;
    Ok(token)
}
