//! Preference handlers.
//!
//! Preferences drive the feed: the category and language lists chosen
//! here become the cache key and the upstream query for `GET /news`.

use axum::extract::State;
use axum::Json;

use crate::api::AppState;
use crate::auth::AuthUser;
use crate::error::Result;
use crate::models::PreferencesResponse;
use crate::models::PreferencesUpdate;

// == Get Preferences ==
/// Handler for GET /users/preferences
pub async fn get_preferences_handler(
    AuthUser(user): AuthUser,
) -> Json<PreferencesResponse> {
    Json(PreferencesResponse {
        preferences: user.preferences,
    })
}

// == Update Preferences ==
/// Handler for PUT /users/preferences
///
/// Replaces whichever lists the body carries; an omitted list keeps its
/// current value. Responds with the resulting preferences.
pub async fn update_preferences_handler(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(req): Json<PreferencesUpdate>,
) -> Result<Json<PreferencesResponse>> {
    let preferences = state.db.update_preferences(
        user.id,
        req.categories.as_deref(),
        req.languages.as_deref(),
    )?;

    Ok(Json(PreferencesResponse { preferences }))
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::cache::FeedCache;
    use crate::config::Config;
    use crate::models::Preferences;
    use crate::news::StubProvider;
    use crate::storage::Database;

    fn test_state() -> AppState {
        AppState::new(
            FeedCache::default(),
            Database::open_in_memory().unwrap(),
            Arc::new(StubProvider::default()),
            Config::default(),
        )
    }

    fn seed_auth_user(state: &AppState) -> AuthUser {
        let user = state
            .db
            .create_user("Ada", "ada@example.com", "salt$digest", &Preferences::default())
            .unwrap();
        AuthUser(user)
    }

    #[tokio::test]
    async fn test_get_preferences_returns_current_lists() {
        let state = test_state();
        let auth = seed_auth_user(&state);

        let response = get_preferences_handler(auth).await;

        assert_eq!(response.preferences.categories, vec!["general".to_string()]);
        assert_eq!(response.preferences.languages, vec!["en".to_string()]);
    }

    #[tokio::test]
    async fn test_update_replaces_only_given_lists() {
        let state = test_state();
        let auth = seed_auth_user(&state);
        let user_id = auth.0.id;

        let req = PreferencesUpdate {
            categories: Some(vec!["technology".to_string()]),
            languages: None,
        };
        let response = update_preferences_handler(State(state.clone()), auth, Json(req))
            .await
            .unwrap();

        assert_eq!(
            response.preferences.categories,
            vec!["technology".to_string()]
        );
        assert_eq!(response.preferences.languages, vec!["en".to_string()]);

        let reloaded = state.db.find_user_by_id(user_id).unwrap().unwrap();
        assert_eq!(
            reloaded.preferences.categories,
            vec!["technology".to_string()]
        );
    }
}
