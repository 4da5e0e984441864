//! Auth endpoints: account creation and credential login.

use secrecy::{ExposeSecret, SecretString};

use crate::error::Result;

use super::client::ApiClient;
use super::types::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};

impl ApiClient {
    /// `POST /auth/register`.
    pub async fn register(&self, request: &RegisterRequest) -> Result<RegisterResponse> {
        let response = self
            .send(
                self.http().post(self.url("/auth/register")).json(request),
                "Erro ao registrar",
            )
            .await?;

        let parsed = response
            .json::<RegisterResponse>()
            .await
            .map_err(crate::error::ApiError::from)?;
        tracing::info!("Account registered for {}", request.email);
        Ok(parsed)
    }

    /// `POST /auth/login`.
    pub async fn login(&self, email: &str, password: &SecretString) -> Result<LoginResponse> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.expose_secret().to_string(),
        };
        let response = self
            .send(
                self.http().post(self.url("/auth/login")).json(&body),
                "Erro ao fazer login",
            )
            .await?;

        let parsed = response
            .json::<LoginResponse>()
            .await
            .map_err(crate::error::ApiError::from)?;
        Ok(parsed)
    }
}
