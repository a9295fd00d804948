use std::collections::HashSet;
use std::sync::Mutex;

use crate::domain::certificate::{Certificate, NewCertificate};
use crate::domain::types::CertificateNumber;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{CertificateReader, CertificateWriter};

/// Simple in-memory repository used for unit tests.
#[derive(Default)]
pub struct TestRepository {
    certificates: Vec<Certificate>,
    created: Mutex<Vec<NewCertificate>>,
    fail: bool,
    duplicate_on_write: bool,
}

impl TestRepository {
    pub fn new(certificates: Vec<Certificate>) -> Self {
        Self {
            certificates,
            ..Self::default()
        }
    }

    /// Make every repository call fail, for exercising error paths.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Make writes fail with a duplicate-key error, as a lost insert race
    /// against the unique index would.
    pub fn duplicate_writes() -> Self {
        Self {
            duplicate_on_write: true,
            ..Self::default()
        }
    }

    /// Records handed to [`CertificateWriter::create_certificates`] so far.
    pub fn created(&self) -> Vec<NewCertificate> {
        self.created.lock().expect("test repository lock").clone()
    }

    fn check_failure(&self) -> RepositoryResult<()> {
        if self.fail {
            Err(RepositoryError::Database(
                diesel::result::Error::BrokenTransactionManager,
            ))
        } else {
            Ok(())
        }
    }
}

impl CertificateReader for TestRepository {
    fn get_certificate_by_number(
        &self,
        number: &CertificateNumber,
    ) -> RepositoryResult<Option<Certificate>> {
        self.check_failure()?;
        Ok(self
            .certificates
            .iter()
            .find(|c| &c.number == number)
            .cloned())
    }

    fn list_existing_numbers(
        &self,
        numbers: &[CertificateNumber],
    ) -> RepositoryResult<HashSet<CertificateNumber>> {
        self.check_failure()?;
        Ok(self
            .certificates
            .iter()
            .filter(|c| numbers.contains(&c.number))
            .map(|c| c.number.clone())
            .collect())
    }
}

impl CertificateWriter for TestRepository {
    fn create_certificates(&self, certificates: &[NewCertificate]) -> RepositoryResult<usize> {
        self.check_failure()?;
        if self.duplicate_on_write {
            return Err(RepositoryError::DuplicateKey(
                "UNIQUE constraint failed: certificates.number".to_string(),
            ));
        }
        let mut created = self.created.lock().expect("test repository lock");
        created.extend_from_slice(certificates);
        Ok(certificates.len())
    }
}
