//! Wire types for the backend REST surface.
//!
//! The backend is loose with field names: `nome` vs `name`, `celular` vs
//! `phone`, `token` vs `access_token`, numeric vs string ids. All of that
//! is absorbed here; the rest of the crate only sees the canonical
//! [`UserProfile`] shape.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::session::model::{ProfileUpdate, UserProfile};

/// Backend ids arrive as either numbers or strings depending on endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum WireId {
    Num(i64),
    Str(String),
}

impl WireId {
    pub fn into_string(self) -> String {
        match self {
            WireId::Num(n) => n.to_string(),
            WireId::Str(s) => s,
        }
    }
}

/// Structured error body the backend sends on failures.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub detail: Option<String>,
}

// ── Auth ────────────────────────────────────────────────────────────

/// Body for `POST /auth/register`.
#[derive(Debug, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub cpf: String,
    pub phone: String,
    pub password: String,
    pub confirm_password: String,
}

/// Response of `POST /auth/register`. Field names vary by backend
/// version, so everything is optional and resolved in [`Self::into_profile`].
#[derive(Debug, Deserialize)]
pub struct RegisterResponse {
    pub id: Option<WireId>,
    pub token: Option<String>,
    pub access_token: Option<String>,
    pub nome: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub cpf: Option<String>,
    pub phone: Option<String>,
    pub celular: Option<String>,
}

impl RegisterResponse {
    /// Token under either name, when the register endpoint returns one.
    pub fn token(&self) -> Option<&str> {
        self.access_token.as_deref().or(self.token.as_deref())
    }

    /// Build the canonical profile, falling back to the submitted fields
    /// where the backend echoed nothing.
    pub fn into_profile(self, submitted: &RegisterRequest) -> UserProfile {
        let name = non_empty(self.nome)
            .or_else(|| non_empty(self.name))
            .unwrap_or_else(|| submitted.name.clone());
        let phone = non_empty(self.phone)
            .or_else(|| non_empty(self.celular))
            .unwrap_or_else(|| submitted.phone.clone());

        UserProfile {
            id: self.id.map(WireId::into_string),
            name,
            email: non_empty(self.email).unwrap_or_else(|| submitted.email.clone()),
            phone,
            cpf: non_empty(self.cpf).unwrap_or_else(|| submitted.cpf.clone()),
            profile_image: None,
            registration_time: Utc::now(),
        }
    }
}

/// Body for `POST /auth/login`.
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response of `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
}

// ── Driver ──────────────────────────────────────────────────────────

/// Body for `PUT /driver/{id}`. The backend expects `nome`.
#[derive(Debug, Serialize)]
pub struct DriverUpdateRequest {
    pub nome: String,
    pub phone: String,
    pub email: String,
}

/// Response of `GET /driver/me` / `GET /driver/{id}`.
#[derive(Debug, Deserialize)]
pub struct DriverResponse {
    pub id: Option<WireId>,
    pub nome: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub celular: Option<String>,
    pub cpf: Option<String>,
    pub profile_image: Option<String>,
}

impl DriverResponse {
    /// Translate to a partial update over the cached profile.
    pub fn into_update(self) -> ProfileUpdate {
        ProfileUpdate {
            id: self.id.map(WireId::into_string),
            name: non_empty(self.nome).or_else(|| non_empty(self.name)),
            email: non_empty(self.email),
            phone: non_empty(self.phone).or_else(|| non_empty(self.celular)),
            cpf: non_empty(self.cpf),
            profile_image: self.profile_image,
        }
    }
}

// ── Vehicle ─────────────────────────────────────────────────────────

/// Response of `POST /driver/vehicle`.
#[derive(Debug, Deserialize)]
pub struct VehicleCreateResponse {
    pub id: WireId,
}

/// Body for `PUT /driver/vehicle/{id}`.
#[derive(Debug, Serialize)]
pub struct VehicleUpdateRequest {
    pub model: String,
    pub year: i32,
    pub color: String,
    pub plate: String,
}

/// Response of `GET /driver/vehicle/{id}`.
#[derive(Debug, Deserialize)]
pub struct VehicleResponse {
    pub id: Option<WireId>,
    pub model: Option<String>,
    pub year: Option<i32>,
    pub color: Option<String>,
    pub plate: Option<String>,
    pub image: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}
