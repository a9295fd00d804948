use std::collections::HashSet;

use crate::db::{DbConnection, DbPool};
use crate::domain::certificate::{Certificate, NewCertificate};
use crate::domain::types::CertificateNumber;
use crate::repository::errors::RepositoryResult;

pub mod certificate;
pub mod errors;
#[cfg(test)]
pub mod test;

/// Repository implementation backed by Diesel and SQLite.
///
/// The underlying `r2d2::Pool` is cheap to clone, allowing the repository to
/// be passed around freely between handlers.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository from an established database pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a pooled database connection.
    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Read-only operations for certificate records.
pub trait CertificateReader {
    /// Exact-match lookup by printed certificate number.
    fn get_certificate_by_number(
        &self,
        number: &CertificateNumber,
    ) -> RepositoryResult<Option<Certificate>>;
    /// Of the given numbers, return the subset already present in the store.
    fn list_existing_numbers(
        &self,
        numbers: &[CertificateNumber],
    ) -> RepositoryResult<HashSet<CertificateNumber>>;
}

/// Write operations for certificate records.
pub trait CertificateWriter {
    /// Insert the given records as one all-or-nothing batch, returning the
    /// number of rows written.
    fn create_certificates(&self, certificates: &[NewCertificate]) -> RepositoryResult<usize>;
}
