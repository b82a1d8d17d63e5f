//! Request DTOs
//!
//! Incoming HTTP request bodies and query parameters, with the light
//! validation the API applies before touching storage.

use serde::Deserialize;

// == Signup Request ==
/// Body for `POST /users/signup`.
///
/// A bare `preferences` list is a category list, mirroring the original
/// client contract; languages are adjusted later via the preferences
/// endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub preferences: Option<Vec<String>>,
}

impl SignupRequest {
    /// Returns an error message if the request is invalid, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.name.trim().len() < 2 {
            return Some("Name must be at least 2 characters".to_string());
        }
        if !looks_like_email(&self.email) {
            return Some("Invalid email".to_string());
        }
        if self.password.len() < 6 {
            return Some("Password must be at least 6 characters".to_string());
        }
        None
    }
}

// == Login Request ==
/// Body for `POST /users/login`.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    /// Returns an error message if the request is invalid, None if valid.
    pub fn validate(&self) -> Option<String> {
        if !looks_like_email(&self.email) {
            return Some("Invalid email".to_string());
        }
        if self.password.is_empty() {
            return Some("Password required".to_string());
        }
        None
    }
}

// == Preferences Update ==
/// Body for `PUT /users/preferences`. Only the lists present in the body
/// are replaced; an empty body is a no-op that echoes current preferences.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PreferencesUpdate {
    #[serde(default)]
    pub categories: Option<Vec<String>>,
    #[serde(default)]
    pub languages: Option<Vec<String>>,
}

// == Feed Query ==
/// Query parameters for `GET /news`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedQuery {
    #[serde(default)]
    pub country: Option<String>,
}

// == Search Query ==
/// Query parameters for `GET /news/search/:keyword`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub page: Option<u32>,
}

/// Good-enough email shape check; real verification is the mail loop's job.
fn looks_like_email(s: &str) -> bool {
    let s = s.trim();
    match s.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.'),
        None => false,
    }
}
