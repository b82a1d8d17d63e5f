//! User Models
//!
//! Accounts and their news preferences.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// == Preferences ==
/// Per-user news preferences: the categories and languages a feed is built
/// from. New accounts start with `general` / `en`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default = "default_categories")]
    pub categories: Vec<String>,
    #[serde(default = "default_languages")]
    pub languages: Vec<String>,
}

fn default_categories() -> Vec<String> {
    vec!["general".to_string()]
}

fn default_languages() -> Vec<String> {
    vec!["en".to_string()]
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            categories: default_categories(),
            languages: default_languages(),
        }
    }
}

// == User ==
/// A registered account.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    /// Salted hash, never serialized
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub preferences: Preferences,
    pub created_at: DateTime<Utc>,
}
