use std::collections::HashSet;

use crate::domain::certificate::NewCertificate;
use crate::domain::types::CertificateNumber;
use crate::dto::certificates::{
    AddCertificatesRequest, AddCertificatesResponse, CertificateDto, VerifyCertificateRequest,
    VerifyCertificateResponse,
};
use crate::repository::errors::RepositoryError;
use crate::repository::{CertificateReader, CertificateWriter};
use crate::services::errors::{ServiceError, ServiceResult};
use crate::services::pdf::{CertificateStamper, StampedCertificate};

/// Checks a certificate number against the registry.
///
/// An unknown number is a regular outcome, not an error: the response
/// carries `is_valid: false` and a message instead.
pub fn verify_certificate(
    request: VerifyCertificateRequest,
    repo: &impl CertificateReader,
) -> ServiceResult<VerifyCertificateResponse> {
    let number = CertificateNumber::new(request.certificate_number)
        .map_err(|_| ServiceError::Validation("Certificate number is required".to_string()))?;

    match repo.get_certificate_by_number(&number) {
        Ok(Some(certificate)) => Ok(VerifyCertificateResponse::valid(certificate.into())),
        Ok(None) => Ok(VerifyCertificateResponse::invalid("Certificate not found")),
        Err(e) => {
            log::error!("Failed to look up certificate {number}: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Compare the caller's passkey against the configured secret.
pub fn authorize_passkey(passkey: &str, admin_passkey: &str) -> ServiceResult<()> {
    if passkey != admin_passkey {
        return Err(ServiceError::Unauthorized);
    }
    Ok(())
}

/// Ingests a batch of certificates after checking the admin passkey.
///
/// The passkey is checked before anything else, so an unauthorized caller
/// learns nothing about the payload. Numbers already present in the
/// registry are silently skipped; only when every candidate is already
/// known does the call fail with a conflict.
pub fn add_certificates<R>(
    request: AddCertificatesRequest,
    admin_passkey: &str,
    repo: &R,
) -> ServiceResult<AddCertificatesResponse>
where
    R: CertificateReader + CertificateWriter,
{
    authorize_passkey(&request.passkey, admin_passkey)?;

    let candidates = match request.certificates {
        Some(candidates) if !candidates.is_empty() => candidates,
        _ => {
            return Err(ServiceError::Validation(
                "Certificates array is required".to_string(),
            ));
        }
    };

    // The first occurrence wins when a number repeats within the batch.
    let mut seen = HashSet::new();
    let mut parsed: Vec<NewCertificate> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        let record = candidate
            .into_new_certificate()
            .map_err(|e| ServiceError::Validation(e.to_string()))?;
        if seen.insert(record.number.clone()) {
            parsed.push(record);
        }
    }

    let numbers: Vec<CertificateNumber> = parsed.iter().map(|c| c.number.clone()).collect();
    let existing = repo.list_existing_numbers(&numbers).map_err(|e| {
        log::error!("Failed to check existing certificate numbers: {e}");
        ServiceError::Internal
    })?;

    let insertable: Vec<NewCertificate> = parsed
        .into_iter()
        .filter(|c| !existing.contains(&c.number))
        .collect();

    if insertable.is_empty() {
        return Err(ServiceError::Conflict(
            "All certificates already exist in the database".to_string(),
        ));
    }

    match repo.create_certificates(&insertable) {
        Ok(_) => Ok(AddCertificatesResponse::added(
            insertable.iter().map(CertificateDto::from).collect(),
        )),
        // A concurrent batch can win the race between the existence check
        // and the insert; the unique index rolls the whole batch back.
        Err(RepositoryError::DuplicateKey(message)) => {
            log::error!("Certificate batch collided on the unique index: {message}");
            Err(ServiceError::Conflict(
                "All certificates already exist in the database".to_string(),
            ))
        }
        Err(e) => {
            log::error!("Failed to insert certificates: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Renders a stamped PDF copy of a stored certificate.
pub fn download_certificate(
    number: &CertificateNumber,
    repo: &impl CertificateReader,
    stamper: &CertificateStamper,
) -> ServiceResult<StampedCertificate> {
    let certificate = match repo.get_certificate_by_number(number) {
        Ok(Some(certificate)) => certificate,
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to look up certificate {number}: {e}");
            return Err(ServiceError::Internal);
        }
    };

    stamper.stamp(&certificate).map_err(|e| {
        log::error!("Failed to stamp certificate {number}: {e}");
        ServiceError::Internal
    })
}
