//! Persistence-agnostic domain entities and value types.

pub mod certificate;
pub mod types;
