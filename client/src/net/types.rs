//! Wire records for the REST API.
//!
//! DESIGN
//! ======
//! Field names mirror the backend's camelCase JSON. Anything the backend may
//! omit or null is optional here, so a sparse profile never fails to decode
//! and never blanks a whole discovery batch.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// Role sent on registration when the caller does not pick one.
pub const DEFAULT_ROLE: &str = "USER";

// =============================================================================
// AUTH
// =============================================================================

/// An authenticated account as returned by `/api/users/me`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub profile: Option<ProfileResponse>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoginCredentials {
    pub username: String,
    pub password: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RegisterData {
    pub username: String,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl RegisterData {
    /// Role to send, falling back to [`DEFAULT_ROLE`].
    #[must_use]
    pub fn role_or_default(&self) -> &str {
        self.role.as_deref().unwrap_or(DEFAULT_ROLE)
    }
}

/// Body of a successful login. The token is absent when the backend refuses
/// to issue one without failing the request.
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub token: Option<String>,
}

// =============================================================================
// PROFILE
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Gender {
    Male,
    Female,
    Diverse,
}

impl Gender {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
            Self::Diverse => "Diverse",
        }
    }
}

/// Id/name pair used for subjects, languages, and courses.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedRef {
    pub id: i64,
    pub name: String,
}

/// A profile card, as shown in discovery and on the own-profile page.
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileResponse {
    pub id: i64,
    pub vorname: Option<String>,
    pub gender: Option<Gender>,
    pub bio: Option<String>,
    /// ISO date (`YYYY-MM-DD`), possibly with a time suffix.
    pub birthdate: Option<String>,
    pub semester: Option<u32>,
    pub profile_picture_url: Option<String>,
    /// Degree programme name.
    pub course: Option<String>,
    pub subjects: Vec<NamedRef>,
    pub languages: Vec<NamedRef>,
    pub onboarding_step: u32,
    pub profile_complete: bool,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl ProfileResponse {
    /// First name for display, or a placeholder for incomplete profiles.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.vorname.as_deref().filter(|n| !n.trim().is_empty()).unwrap_or("Unnamed")
    }
}

/// Onboarding progress; one flag per onboarding step.
#[allow(clippy::struct_excessive_bools)]
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OnboardingStatus {
    pub current_step: u32,
    pub is_complete: bool,
    pub has_vorname: bool,
    pub has_profile_picture: bool,
    pub has_gender: bool,
    pub has_birthdate: bool,
    pub has_bio: bool,
    pub has_course: bool,
    pub has_semester: bool,
    pub has_subjects: bool,
    pub has_languages: bool,
}

// =============================================================================
// LIKES & MATCHES
// =============================================================================

/// Result of liking a candidate.
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResponse {
    pub is_match: bool,
    /// First name of the matched candidate, when the like produced a match.
    #[serde(default)]
    pub to_user_vorname: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Like {
    pub id: i64,
    #[serde(default)]
    pub from_user_vorname: Option<String>,
    pub from_user_username: String,
    #[serde(default)]
    pub to_user_vorname: Option<String>,
    pub to_user_username: String,
    #[serde(default)]
    pub is_match: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub match_id: i64,
    pub other_user_id: i64,
    #[serde(default)]
    pub other_user_vorname: Option<String>,
    pub other_user_username: String,
    #[serde(default)]
    pub profile_picture_url: Option<String>,
}
