//! Driver endpoints: profile fetch/update and document uploads.

use reqwest::multipart::{Form, Part};

use crate::error::{ApiError, Result};
use crate::onboarding::attachments::{ImageAttachment, MAX_RG_FILES};
use crate::session::ProfileUpdate;

use super::client::ApiClient;
use super::types::{DriverResponse, DriverUpdateRequest};

impl ApiClient {
    /// `GET /driver/me` — profile of the logged-in driver.
    pub async fn driver_me(&self) -> Result<ProfileUpdate> {
        let request = self.authed(self.http().get(self.url("/driver/me"))).await;
        let response = self.send(request, "Erro ao carregar dados").await?;
        let parsed = response
            .json::<DriverResponse>()
            .await
            .map_err(ApiError::from)?;
        Ok(parsed.into_update())
    }

    /// `GET /driver/{id}`.
    pub async fn driver_get(&self, driver_id: &str) -> Result<ProfileUpdate> {
        let request = self
            .authed(self.http().get(self.url(&format!("/driver/{driver_id}"))))
            .await;
        let response = self.send(request, "Erro ao carregar dados").await?;
        let parsed = response
            .json::<DriverResponse>()
            .await
            .map_err(ApiError::from)?;
        Ok(parsed.into_update())
    }

    /// `PUT /driver/{id}` — the gating update of the driver-profile step.
    pub async fn driver_update(&self, driver_id: &str, body: &DriverUpdateRequest) -> Result<()> {
        let request = self
            .authed(
                self.http()
                    .put(self.url(&format!("/driver/{driver_id}")))
                    .json(body),
            )
            .await;
        self.send(request, "Erro ao salvar dados").await?;
        Ok(())
    }

    /// `POST /driver/upload/profile` — multipart `driver_id` + `file`.
    pub async fn upload_profile_photo(
        &self,
        driver_id: &str,
        photo: &ImageAttachment,
    ) -> Result<()> {
        let part = file_part(photo)?;
        let form = Form::new()
            .text("driver_id", driver_id.to_string())
            .part("file", part);

        let request = self
            .authed(self.http().post(self.url("/driver/upload/profile")))
            .await
            .multipart(form);
        self.send(request, "Erro ao enviar foto de perfil").await?;
        tracing::info!("Profile photo uploaded for driver {driver_id}");
        Ok(())
    }

    /// `POST /driver/upload/rg` — multipart `driver_id` + up to two
    /// `files` parts (front and back).
    pub async fn upload_rg(&self, driver_id: &str, files: &[ImageAttachment]) -> Result<()> {
        let mut form = Form::new().text("driver_id", driver_id.to_string());
        for file in files.iter().take(MAX_RG_FILES) {
            form = form.part("files", file_part(file)?);
        }

        let request = self
            .authed(self.http().post(self.url("/driver/upload/rg")))
            .await
            .multipart(form);
        self.send(request, "Erro ao enviar RG").await?;
        tracing::info!(
            "RG uploaded for driver {driver_id} ({} file(s))",
            files.len().min(MAX_RG_FILES)
        );
        Ok(())
    }
}

pub(crate) fn file_part(attachment: &ImageAttachment) -> Result<Part> {
    let part = Part::bytes(attachment.bytes.clone())
        .file_name(attachment.file_name.clone())
        .mime_str(&attachment.content_type)
        .map_err(ApiError::from)?;
    Ok(part)
}
