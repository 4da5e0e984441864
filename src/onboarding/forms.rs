//! Step forms and their fail-fast validation.
//!
//! Every step validates its required fields before any network call;
//! a failure produces an inline message and performs no I/O. Messages
//! are the product's user-facing Portuguese strings.

use chrono::Datelike;
use secrecy::{ExposeSecret, SecretString};

use crate::api::RegisterRequest;
use crate::error::ValidationError;

use super::attachments::{PhotoSelection, RgSelection};

/// Minimum password length accepted at account creation.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Step 1 — account creation fields.
#[derive(Debug)]
pub struct AccountForm {
    pub name: String,
    pub cpf: String,
    pub email: String,
    pub phone: String,
    pub password: SecretString,
    pub confirm_password: SecretString,
}

impl AccountForm {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let required = [
            &self.name,
            &self.cpf,
            &self.email,
            &self.phone,
        ];
        if required.iter().any(|f| f.trim().is_empty())
            || self.password.expose_secret().is_empty()
            || self.confirm_password.expose_secret().is_empty()
        {
            return Err(ValidationError::new("Por favor, preencha todos os campos!"));
        }

        if self.password.expose_secret() != self.confirm_password.expose_secret() {
            return Err(ValidationError::new("As senhas não coincidem!"));
        }

        if self.password.expose_secret().len() < MIN_PASSWORD_LEN {
            return Err(ValidationError::new(
                "A senha deve ter pelo menos 6 caracteres!",
            ));
        }

        Ok(())
    }

    /// Build the wire request. The secret leaves its wrapper only here,
    /// at the adapter boundary.
    pub fn to_request(&self) -> RegisterRequest {
        RegisterRequest {
            name: self.name.clone(),
            email: self.email.clone(),
            cpf: self.cpf.clone(),
            phone: self.phone.clone(),
            password: self.password.expose_secret().to_string(),
            confirm_password: self.confirm_password.expose_secret().to_string(),
        }
    }
}

/// Step 2 — driver profile fields plus the optional uploads.
#[derive(Debug, Default)]
pub struct DriverProfileForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub cpf: String,
    /// Free-text proof-of-address field; collected but not required.
    pub address_proof: String,
    pub profile_photo: PhotoSelection,
    pub rg: RgSelection,
}

impl DriverProfileForm {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let required = [&self.name, &self.email, &self.phone, &self.cpf];
        if required.iter().any(|f| f.trim().is_empty()) {
            return Err(ValidationError::new(
                "Preencha pelo menos Nome, Email, Celular e CPF.",
            ));
        }
        Ok(())
    }
}

/// Step 3 — motorcycle fields plus the required photo.
#[derive(Debug, Default)]
pub struct MotorcycleForm {
    pub model: String,
    /// Raw year input; parsed and range-checked during validation.
    pub year: String,
    pub plate: String,
    pub color: String,
    pub photo: PhotoSelection,
}

impl MotorcycleForm {
    /// Validate all fields and the photo; returns the parsed year.
    pub fn validate(&self) -> Result<i32, ValidationError> {
        let required = [&self.model, &self.year, &self.plate, &self.color];
        if required.iter().any(|f| f.trim().is_empty()) {
            return Err(ValidationError::new("Preencha todos os campos da moto!"));
        }

        if self.photo.is_empty() {
            return Err(ValidationError::new("Selecione uma foto da moto!"));
        }

        let year: i32 = self
            .year
            .trim()
            .parse()
            .map_err(|_| ValidationError::new("Ano inválido!"))?;
        let current_year = chrono::Utc::now().year();
        if !(1900..=current_year).contains(&year) {
            return Err(ValidationError::new("Ano inválido!"));
        }

        Ok(year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::onboarding::attachments::{ImageAttachment, PreviewRegistry};

    fn account_form() -> AccountForm {
        AccountForm {
            name: "Ana Souza".into(),
            cpf: "39053344705".into(),
            email: "ana@example.com".into(),
            phone: "11999990000".into(),
            password: SecretString::from("secret1"),
            confirm_password: SecretString::from("secret1"),
        }
    }

    fn photo() -> ImageAttachment {
        ImageAttachment::new("moto.png", "image/png", vec![1, 2, 3])
    }

    #[test]
    fn account_form_valid() {
        assert!(account_form().validate().is_ok());
    }

    #[test]
    fn account_form_missing_field() {
        let form = AccountForm {
            email: String::new(),
            ..account_form()
        };
        assert_eq!(
            form.validate().unwrap_err().message,
            "Por favor, preencha todos os campos!"
        );
    }

    #[test]
    fn account_form_password_mismatch() {
        let form = AccountForm {
            confirm_password: SecretString::from("different"),
            ..account_form()
        };
        assert_eq!(
            form.validate().unwrap_err().message,
            "As senhas não coincidem!"
        );
    }

    #[test]
    fn account_form_short_password() {
        let form = AccountForm {
            password: SecretString::from("abc"),
            confirm_password: SecretString::from("abc"),
            ..account_form()
        };
        assert_eq!(
            form.validate().unwrap_err().message,
            "A senha deve ter pelo menos 6 caracteres!"
        );
    }

    #[test]
    fn driver_profile_requires_core_fields() {
        let form = DriverProfileForm {
            name: "Ana".into(),
            email: "ana@example.com".into(),
            phone: String::new(),
            cpf: "390".into(),
            ..Default::default()
        };
        assert_eq!(
            form.validate().unwrap_err().message,
            "Preencha pelo menos Nome, Email, Celular e CPF."
        );
    }

    #[test]
    fn driver_profile_address_proof_is_optional() {
        let form = DriverProfileForm {
            name: "Ana".into(),
            email: "ana@example.com".into(),
            phone: "119".into(),
            cpf: "390".into(),
            ..Default::default()
        };
        assert!(form.validate().is_ok());
    }

    #[test]
    fn motorcycle_form_missing_text_field() {
        let form = MotorcycleForm {
            model: "CG 160".into(),
            year: "2022".into(),
            plate: String::new(),
            color: "vermelha".into(),
            ..Default::default()
        };
        assert_eq!(
            form.validate().unwrap_err().message,
            "Preencha todos os campos da moto!"
        );
    }

    #[test]
    fn motorcycle_form_missing_photo() {
        let form = MotorcycleForm {
            model: "CG 160".into(),
            year: "2022".into(),
            plate: "ABC1D23".into(),
            color: "vermelha".into(),
            ..Default::default()
        };
        assert_eq!(
            form.validate().unwrap_err().message,
            "Selecione uma foto da moto!"
        );
    }

    #[test]
    fn motorcycle_form_parses_year() {
        let registry = PreviewRegistry::new();
        let mut form = MotorcycleForm {
            model: "CG 160".into(),
            year: "2022".into(),
            plate: "ABC1D23".into(),
            color: "vermelha".into(),
            ..Default::default()
        };
        form.photo.select(photo(), &registry);
        assert_eq!(form.validate().unwrap(), 2022);
    }

    #[test]
    fn motorcycle_form_rejects_bad_year() {
        let registry = PreviewRegistry::new();
        let mut form = MotorcycleForm {
            model: "CG 160".into(),
            year: "not-a-year".into(),
            plate: "ABC1D23".into(),
            color: "vermelha".into(),
            ..Default::default()
        };
        form.photo.select(photo(), &registry);
        assert_eq!(form.validate().unwrap_err().message, "Ano inválido!");

        form.year = "1500".into();
        assert_eq!(form.validate().unwrap_err().message, "Ano inválido!");
    }
}
