use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::certificate::{
    Certificate as DomainCertificate, NewCertificate as DomainNewCertificate,
};
use crate::domain::types::{CertificateNumber, TypeConstraintError};

/// Diesel model representing the `certificates` table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::certificates)]
pub struct Certificate {
    pub id: i32,
    pub number: String,
    pub holder_name: String,
    pub category: String,
    pub institute_name: String,
    pub issue_date: String,
    pub created_at: NaiveDateTime,
}

/// Insertable form of [`Certificate`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::certificates)]
pub struct NewCertificate {
    pub number: String,
    pub holder_name: String,
    pub category: String,
    pub institute_name: String,
    pub issue_date: String,
    pub created_at: NaiveDateTime,
}

impl TryFrom<Certificate> for DomainCertificate {
    type Error = TypeConstraintError;

    fn try_from(certificate: Certificate) -> Result<Self, Self::Error> {
        Ok(Self {
            id: certificate.id.try_into()?,
            number: CertificateNumber::new(certificate.number)?,
            holder_name: certificate.holder_name,
            category: certificate.category,
            institute_name: certificate.institute_name,
            issue_date: certificate.issue_date,
            created_at: certificate.created_at,
        })
    }
}

impl From<DomainNewCertificate> for NewCertificate {
    fn from(certificate: DomainNewCertificate) -> Self {
        Self {
            number: certificate.number.into_inner(),
            holder_name: certificate.holder_name,
            category: certificate.category,
            institute_name: certificate.institute_name,
            issue_date: certificate.issue_date,
            created_at: certificate.created_at,
        }
    }
}
