//! Registration flow — coordinates the three onboarding steps.
//!
//! Each step validates locally, issues its backend calls, and advances
//! the state machine only on success. Secondary uploads in the driver
//! profile step are best-effort: their failures are logged and swallowed,
//! never blocking forward progress. Errors keep the user on the current
//! step; retries are user-initiated re-submits.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;

use crate::api::{ApiClient, DriverUpdateRequest, VehicleUpdateRequest};
use crate::auth::AuthContext;
use crate::error::{AuthError, Error, Result, UploadError, ValidationError};
use crate::session::ProfileUpdate;

use super::forms::{AccountForm, DriverProfileForm, MotorcycleForm};
use super::state::{RegistrationState, RegistrationStep};

/// Successful outcome of one step: the message shown to the user and the
/// step now active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepReport {
    pub message: String,
    pub step: RegistrationStep,
}

/// Drives the Account → DriverProfile → Motorcycle sequence.
pub struct RegistrationFlow {
    api: Arc<ApiClient>,
    auth: Arc<AuthContext>,
    state: RwLock<RegistrationState>,
    /// How long the success message stays visible before advancing.
    advance_delay: Duration,
}

impl RegistrationFlow {
    pub fn new(api: Arc<ApiClient>, auth: Arc<AuthContext>, advance_delay: Duration) -> Self {
        Self {
            api,
            auth,
            state: RwLock::new(RegistrationState::default()),
            advance_delay,
        }
    }

    /// Resume an in-progress onboarding at a known step, e.g. after a
    /// reload with a cached session.
    pub fn resume_at(
        api: Arc<ApiClient>,
        auth: Arc<AuthContext>,
        advance_delay: Duration,
        step: RegistrationStep,
    ) -> Self {
        Self {
            api,
            auth,
            state: RwLock::new(RegistrationState { step }),
            advance_delay,
        }
    }

    /// Step currently active.
    pub async fn step(&self) -> RegistrationStep {
        self.state.read().await.step
    }

    /// Step 1 — create the account. Advances unconditionally on success;
    /// the register operation itself performs the implicit login.
    pub async fn submit_account(&self, form: &AccountForm) -> Result<StepReport> {
        form.validate()?;

        self.auth.register(form.to_request()).await?;

        let step = self.advance().await;
        Ok(StepReport {
            message: "Conta criada com sucesso!".to_string(),
            step,
        })
    }

    /// Step 2 — save the driver profile.
    ///
    /// The field update gates the step. The photo and RG uploads that
    /// follow are issued sequentially and independently; a failure in one
    /// neither cancels the other nor blocks advancing.
    pub async fn submit_driver_profile(&self, form: &DriverProfileForm) -> Result<StepReport> {
        form.validate()?;
        let driver_id = self.driver_id().await?;

        let body = DriverUpdateRequest {
            nome: form.name.clone(),
            phone: form.phone.clone(),
            email: form.email.clone(),
        };
        self.api.driver_update(&driver_id, &body).await?;

        if let Some(photo) = form.profile_photo.attachment() {
            if let Err(e) = self.api.upload_profile_photo(&driver_id, photo).await {
                let upload = UploadError::new("profile photo", e.to_string());
                tracing::warn!("{upload}");
            }
        }

        if !form.rg.is_empty() {
            if let Err(e) = self.api.upload_rg(&driver_id, form.rg.attachments()).await {
                let upload = UploadError::new("RG", e.to_string());
                tracing::warn!("{upload}");
            }
        }

        self.auth
            .update_user(ProfileUpdate {
                name: Some(form.name.clone()),
                email: Some(form.email.clone()),
                phone: Some(form.phone.clone()),
                cpf: Some(form.cpf.clone()),
                ..Default::default()
            })
            .await?;

        // Let the success message be seen before the step changes.
        tokio::time::sleep(self.advance_delay).await;
        let step = self.advance().await;
        Ok(StepReport {
            message: "Dados salvos com sucesso!".to_string(),
            step,
        })
    }

    /// Step 3 — register the motorcycle. The multipart create and the
    /// follow-up metadata update must both succeed.
    pub async fn submit_motorcycle(&self, form: &MotorcycleForm) -> Result<StepReport> {
        let year = form.validate()?;
        let driver_id = self.driver_id().await?;

        let photo = form
            .photo
            .attachment()
            .ok_or_else(|| ValidationError::new("Selecione uma foto da moto!"))?;

        let vehicle_id = self.api.vehicle_create(&driver_id, photo).await?;

        let body = VehicleUpdateRequest {
            model: form.model.clone(),
            year,
            color: form.color.clone(),
            plate: form.plate.clone(),
        };
        self.api.vehicle_update(&vehicle_id, &body).await?;

        tokio::time::sleep(self.advance_delay).await;
        let step = self.advance().await;
        Ok(StepReport {
            message: "Moto cadastrada com sucesso!".to_string(),
            step,
        })
    }

    /// The session's driver id, the correlation key every step shares.
    async fn driver_id(&self) -> Result<String> {
        let snapshot = self.auth.snapshot().await;
        snapshot
            .user
            .and_then(|u| u.id)
            .ok_or_else(|| {
                Error::Auth(AuthError::Rejected {
                    message: "Usuário não autenticado. Faça login novamente.".to_string(),
                })
            })
    }

    async fn advance(&self) -> RegistrationStep {
        let mut state = self.state.write().await;
        match state.advance() {
            Ok(step) => step,
            Err(e) => {
                tracing::warn!("Failed to advance registration step: {e}");
                state.step
            }
        }
    }
}
