//! Vehicle endpoints: motorcycle record creation and maintenance.

use reqwest::multipart::Form;

use crate::error::{ApiError, Result};
use crate::onboarding::attachments::ImageAttachment;

use super::client::ApiClient;
use super::driver::file_part;
use super::types::{VehicleCreateResponse, VehicleResponse, VehicleUpdateRequest};

impl ApiClient {
    /// `POST /driver/vehicle` — multipart `file` + `driver_id`, returns
    /// the id of the created record.
    pub async fn vehicle_create(
        &self,
        driver_id: &str,
        photo: &ImageAttachment,
    ) -> Result<String> {
        let form = Form::new()
            .part("file", file_part(photo)?)
            .text("driver_id", driver_id.to_string());

        let request = self
            .authed(self.http().post(self.url("/driver/vehicle")))
            .await
            .multipart(form);
        let response = self.send(request, "Erro ao cadastrar moto").await?;
        let parsed = response
            .json::<VehicleCreateResponse>()
            .await
            .map_err(ApiError::from)?;
        Ok(parsed.id.into_string())
    }

    /// `PUT /driver/vehicle/{id}` — sets the remaining metadata fields.
    pub async fn vehicle_update(
        &self,
        vehicle_id: &str,
        body: &VehicleUpdateRequest,
    ) -> Result<()> {
        let request = self
            .authed(
                self.http()
                    .put(self.url(&format!("/driver/vehicle/{vehicle_id}")))
                    .json(body),
            )
            .await;
        self.send(request, "Erro ao cadastrar moto").await?;
        Ok(())
    }

    /// `GET /driver/vehicle/{id}`.
    pub async fn vehicle_get(&self, driver_id: &str) -> Result<VehicleResponse> {
        let request = self
            .authed(
                self.http()
                    .get(self.url(&format!("/driver/vehicle/{driver_id}"))),
            )
            .await;
        let response = self.send(request, "Erro ao carregar moto").await?;
        let parsed = response
            .json::<VehicleResponse>()
            .await
            .map_err(ApiError::from)?;
        Ok(parsed)
    }

    /// `DELETE /driver/vehicle/{id}`.
    pub async fn vehicle_delete(&self, vehicle_id: &str) -> Result<()> {
        let request = self
            .authed(
                self.http()
                    .delete(self.url(&format!("/driver/vehicle/{vehicle_id}"))),
            )
            .await;
        self.send(request, "Erro ao remover moto").await?;
        Ok(())
    }
}
