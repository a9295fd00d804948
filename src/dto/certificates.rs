use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::domain::certificate::{Certificate, NewCertificate};
use crate::domain::types::{CertificateNumber, TypeConstraintError};

/// Wire representation of a certificate record.
///
/// Field names are part of the public API contract, so they stay camelCase
/// on the wire while the struct itself follows Rust naming.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateDto {
    pub certificate_id: String,
    pub holder_name: String,
    pub category: String,
    pub institute_name: String,
    pub issue_date: String,
}

impl CertificateDto {
    /// Parse the DTO into an insertable domain record, stamping the
    /// creation time.
    pub fn into_new_certificate(self) -> Result<NewCertificate, TypeConstraintError> {
        Ok(NewCertificate {
            number: CertificateNumber::new(self.certificate_id)?,
            holder_name: self.holder_name,
            category: self.category,
            institute_name: self.institute_name,
            issue_date: self.issue_date,
            created_at: Utc::now().naive_utc(),
        })
    }
}

impl From<Certificate> for CertificateDto {
    fn from(certificate: Certificate) -> Self {
        Self {
            certificate_id: certificate.number.into(),
            holder_name: certificate.holder_name,
            category: certificate.category,
            institute_name: certificate.institute_name,
            issue_date: certificate.issue_date,
        }
    }
}

impl From<&NewCertificate> for CertificateDto {
    fn from(certificate: &NewCertificate) -> Self {
        Self {
            certificate_id: certificate.number.to_string(),
            holder_name: certificate.holder_name.clone(),
            category: certificate.category.clone(),
            institute_name: certificate.institute_name.clone(),
            issue_date: certificate.issue_date.clone(),
        }
    }
}

/// Request body for `POST /api/verify-certificate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyCertificateRequest {
    #[serde(default)]
    pub certificate_number: String,
}

/// Response body for `POST /api/verify-certificate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyCertificateResponse {
    pub is_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificate_details: Option<CertificateDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl VerifyCertificateResponse {
    pub fn valid(details: CertificateDto) -> Self {
        Self {
            is_valid: true,
            certificate_details: Some(details),
            message: None,
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            certificate_details: None,
            message: Some(message.into()),
        }
    }
}

/// Request body for `POST /api/add-certificates`.
///
/// Both fields default when absent so that a wrong or missing passkey is
/// reported as an authorization failure rather than a malformed body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddCertificatesRequest {
    #[serde(default)]
    pub certificates: Option<Vec<CertificateDto>>,
    #[serde(default)]
    pub passkey: String,
}

/// Response body for `POST /api/add-certificates`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddCertificatesResponse {
    pub message: String,
    pub added_certificates: Vec<CertificateDto>,
}

impl AddCertificatesResponse {
    pub fn added(certificates: Vec<CertificateDto>) -> Self {
        Self {
            message: "Certificates added successfully".to_string(),
            added_certificates: certificates,
        }
    }
}

/// Error body shared by every failing API response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
