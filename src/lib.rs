//! Core library exports for the Attesta service.
//!
//! This crate exposes the domain, persistence, forms, routes and service
//! layers used by the Attesta certificate verification application. The
//! `data` feature builds only the reusable persistence layer; the `server`
//! feature adds the Actix-web application on top.

#[cfg(feature = "data")]
pub mod db;
#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "data")]
pub mod models;
#[cfg(feature = "data")]
pub mod repository;
#[cfg(feature = "data")]
pub mod schema;

#[cfg(feature = "server")]
pub mod dto;
#[cfg(feature = "server")]
pub mod forms;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "server")]
pub mod services;
