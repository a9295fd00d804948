use std::collections::HashSet;

use diesel::prelude::*;

use crate::domain::certificate::{Certificate, NewCertificate};
use crate::domain::types::CertificateNumber;
use crate::models::certificate::{
    Certificate as DbCertificate, NewCertificate as DbNewCertificate,
};
use crate::repository::errors::RepositoryResult;
use crate::repository::{CertificateReader, CertificateWriter, DieselRepository};

impl CertificateReader for DieselRepository {
    fn get_certificate_by_number(
        &self,
        number: &CertificateNumber,
    ) -> RepositoryResult<Option<Certificate>> {
        use crate::schema::certificates;

        let mut conn = self.conn()?;

        let certificate = certificates::table
            .filter(certificates::number.eq(number.as_str()))
            .first::<DbCertificate>(&mut conn)
            .optional()?;

        let certificate = certificate.map(TryInto::try_into).transpose()?;
        Ok(certificate)
    }

    fn list_existing_numbers(
        &self,
        numbers: &[CertificateNumber],
    ) -> RepositoryResult<HashSet<CertificateNumber>> {
        use crate::schema::certificates;

        if numbers.is_empty() {
            return Ok(HashSet::new());
        }

        let mut conn = self.conn()?;

        let present = certificates::table
            .filter(certificates::number.eq_any(numbers.iter().map(CertificateNumber::as_str)))
            .select(certificates::number)
            .load::<String>(&mut conn)?;

        present
            .into_iter()
            .map(|number| CertificateNumber::new(number).map_err(Into::into))
            .collect()
    }
}

impl CertificateWriter for DieselRepository {
    fn create_certificates(&self, certificates: &[NewCertificate]) -> RepositoryResult<usize> {
        use crate::schema::certificates;

        let mut conn = self.conn()?;
        let rows: Vec<DbNewCertificate> =
            certificates.iter().cloned().map(Into::into).collect();

        let affected = conn.transaction(|conn| {
            diesel::insert_into(certificates::table)
                .values(&rows)
                .execute(conn)
        })?;

        Ok(affected)
    }
}
