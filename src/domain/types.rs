//! Strongly-typed value objects used by domain entities.
//!
//! Domain structs carry these wrappers instead of raw primitives so that
//! identifiers are validated once, at the boundary.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced when attempting to construct constrained domain types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// An identifier was zero or negative.
    #[error("{0} must be greater than zero")]
    NonPositiveId(&'static str),
    /// A string was empty or whitespace-only after trimming.
    #[error("{0} cannot be empty")]
    EmptyString(&'static str),
}

/// Storage row identifier for a certificate, distinct from the printed
/// certificate number.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct CertificateId(i32);

impl CertificateId {
    /// Creates a new identifier ensuring it is greater than zero.
    pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
        if value > 0 {
            Ok(Self(value))
        } else {
            Err(TypeConstraintError::NonPositiveId("certificate_id"))
        }
    }

    /// Returns the raw `i32` backing this identifier.
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl Display for CertificateId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i32> for CertificateId {
    type Error = TypeConstraintError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CertificateId> for i32 {
    fn from(value: CertificateId) -> Self {
        value.0
    }
}

impl PartialEq<i32> for CertificateId {
    fn eq(&self, other: &i32) -> bool {
        self.0 == *other
    }
}

impl PartialEq<CertificateId> for i32 {
    fn eq(&self, other: &CertificateId) -> bool {
        *self == other.0
    }
}

/// The unique business key printed on a certificate.
///
/// Trimmed on construction; all store lookups and duplicate checks use this
/// form, so an identifier with stray surrounding whitespace still matches.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct CertificateNumber(String);

impl CertificateNumber {
    /// Constructs a trimmed, non-empty certificate number.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let trimmed = value.into().trim().to_string();
        if trimmed.is_empty() {
            Err(TypeConstraintError::EmptyString("certificate number"))
        } else {
            Ok(Self(trimmed))
        }
    }

    /// Borrow the value as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper and return the owned string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for CertificateNumber {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::ops::Deref for CertificateNumber {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.as_str()
    }
}

impl AsRef<str> for CertificateNumber {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl TryFrom<String> for CertificateNumber {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for CertificateNumber {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CertificateNumber> for String {
    fn from(value: CertificateNumber) -> Self {
        value.0
    }
}

impl PartialEq<&str> for CertificateNumber {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl PartialEq<CertificateNumber> for &str {
    fn eq(&self, other: &CertificateNumber) -> bool {
        *self == other.as_str()
    }
}
