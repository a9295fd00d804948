use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{CertificateId, CertificateNumber};

/// A certificate record looked up by its printed number.
///
/// Records are created once during ingestion and never updated or deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Certificate {
    pub id: CertificateId,
    pub number: CertificateNumber,
    pub holder_name: String,
    pub category: String,
    pub institute_name: String,
    /// Opaque issue date text exactly as printed; never parsed.
    pub issue_date: String,
    pub created_at: NaiveDateTime,
}

/// Data required to insert a new [`Certificate`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewCertificate {
    pub number: CertificateNumber,
    pub holder_name: String,
    pub category: String,
    pub institute_name: String,
    pub issue_date: String,
    pub created_at: NaiveDateTime,
}
