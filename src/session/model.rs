//! Session and user profile data models.
//!
//! `UserProfile` is the one canonical shape for user data on this side of
//! the wire. The backend names fields inconsistently (`nome`/`name`,
//! `celular`/`phone`); that translation happens in the API adapter and
//! never leaks past it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Cached profile of the logged-in driver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Backend driver id. Absent for a minimal login-only profile until
    /// the first profile fetch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub cpf: String,
    /// Server-side reference to the uploaded profile photo, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
    /// When this session's profile was first created (login or register).
    pub registration_time: DateTime<Utc>,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            id: None,
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            cpf: String::new(),
            profile_image: None,
            registration_time: Utc::now(),
        }
    }
}

impl UserProfile {
    /// Minimal profile cached right after a plain login, before any
    /// profile fetch has run.
    pub fn minimal(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            ..Default::default()
        }
    }

    /// Apply a partial update, leaving unset fields unchanged.
    pub fn merge(&mut self, update: ProfileUpdate) {
        if let Some(id) = update.id {
            self.id = Some(id);
        }
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(email) = update.email {
            self.email = email;
        }
        if let Some(phone) = update.phone {
            self.phone = phone;
        }
        if let Some(cpf) = update.cpf {
            self.cpf = cpf;
        }
        if let Some(image) = update.profile_image {
            self.profile_image = Some(image);
        }
    }
}

/// Partial profile update for [`UserProfile::merge`]. Unset fields are
/// left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub id: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub cpf: Option<String>,
    pub profile_image: Option<String>,
}

/// The client-held pairing of auth token and cached profile.
///
/// Invariant: `token` present implies `user` present. A logged-in session
/// always carries a cached profile, even a minimal one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserProfile>,
}

impl Session {
    /// Empty (logged-out) session.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Authenticated session. The invariant holds by construction.
    pub fn authenticated(token: impl Into<String>, user: UserProfile) -> Self {
        Self {
            token: Some(token.into()),
            user: Some(user),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Enforce the `token ⇒ user` invariant: a token without a cached
    /// profile is unusable, so the whole pair downgrades to empty.
    /// Stores apply this on both load and save, so a reader can never
    /// observe an inconsistent pair.
    pub fn sanitized(self) -> Self {
        if self.token.is_some() && self.user.is_none() {
            Self::empty()
        } else {
            self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitized_drops_token_without_user() {
        let session = Session {
            token: Some("tok".into()),
            user: None,
        };
        assert_eq!(session.sanitized(), Session::empty());
    }

    #[test]
    fn sanitized_keeps_consistent_pairs() {
        let session = Session::authenticated("tok", UserProfile::minimal("a@b.com"));
        let sanitized = session.clone().sanitized();
        assert_eq!(sanitized, session);
        assert!(sanitized.is_authenticated());

        // A user without a token is a valid anonymous cache.
        let session = Session {
            token: None,
            user: Some(UserProfile::minimal("a@b.com")),
        };
        assert_eq!(session.clone().sanitized(), session);
    }

    #[test]
    fn merge_updates_only_set_fields() {
        let mut profile = UserProfile {
            name: "Ana Souza".into(),
            email: "ana@example.com".into(),
            phone: "11999990000".into(),
            cpf: "39053344705".into(),
            ..Default::default()
        };

        profile.merge(ProfileUpdate {
            phone: Some("11888887777".into()),
            ..Default::default()
        });

        assert_eq!(profile.phone, "11888887777");
        assert_eq!(profile.name, "Ana Souza");
        assert_eq!(profile.email, "ana@example.com");
        assert_eq!(profile.cpf, "39053344705");
    }

    #[test]
    fn profile_serde_roundtrip() {
        let profile = UserProfile {
            id: Some("drv_1".into()),
            name: "Ana".into(),
            email: "ana@example.com".into(),
            phone: "119".into(),
            cpf: "390".into(),
            profile_image: None,
            registration_time: Utc::now(),
        };
        let json = serde_json::to_string(&profile).unwrap();
        let parsed: UserProfile = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, profile);
    }
}
