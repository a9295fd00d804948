use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::types::{CertificateNumber, TypeConstraintError};

#[derive(Deserialize, Validate)]
pub struct VerifyCertificateForm {
    #[validate(length(min = 1))]
    pub certificate_number: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VerifyCertificateFormPayload {
    pub certificate_number: CertificateNumber,
}

#[derive(Debug, Error)]
pub enum VerifyCertificateFormError {
    #[error("Verify certificate form validation failed: {0}")]
    Validation(String),
    #[error("Verify certificate form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for VerifyCertificateFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for VerifyCertificateFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<VerifyCertificateForm> for VerifyCertificateFormPayload {
    type Error = VerifyCertificateFormError;

    fn try_from(value: VerifyCertificateForm) -> Result<Self, Self::Error> {
        value.validate()?;
        Ok(Self {
            certificate_number: CertificateNumber::new(value.certificate_number)?,
        })
    }
}
