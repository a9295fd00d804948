//! Diesel table models and runtime configuration.

pub mod certificate;
pub mod config;
