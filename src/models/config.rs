//! Runtime configuration for the Attesta service.
//!
//! Everything the process needs is collected into one [`ServerConfig`] that
//! is loaded at startup and handed to constructors; nothing reads the
//! environment after boot.

use serde::Deserialize;

/// Text placement for one stamped line, in PDF points.
///
/// `y_from_top` is measured down from the top edge of the page so values can
/// be read straight off the template artwork; the stamper converts to PDF
/// bottom-left coordinates using the page height.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct StampPosition {
    pub x: f32,
    pub y_from_top: f32,
    pub size: f32,
}

/// Template and placement settings for the downloadable certificate PDF.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StampConfig {
    /// Template PDF whose first page receives the overlay.
    pub template_path: String,
    pub holder_name: StampPosition,
    pub verification_id: StampPosition,
}

impl Default for StampConfig {
    fn default() -> Self {
        Self {
            template_path: "assets/certificate-template.pdf".to_string(),
            holder_name: StampPosition {
                x: 114.0,
                y_from_top: 127.0,
                size: 12.0,
            },
            verification_id: StampPosition {
                x: 105.0,
                y_from_top: 200.0,
                size: 6.0,
            },
        }
    }
}

/// Configuration options for the Attesta service.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Address the HTTP server binds to.
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Path of the SQLite database file.
    #[serde(default = "default_database_url")]
    pub database_url: String,
    /// Shared secret required by the ingestion endpoints.
    pub admin_passkey: String,
    /// Glob from which Tera loads page templates.
    #[serde(default = "default_templates_glob")]
    pub templates_glob: String,
    /// Directory served as static assets.
    #[serde(default = "default_assets_dir")]
    pub assets_dir: String,
    #[serde(default)]
    pub stamp: StampConfig,
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_database_url() -> String {
    "attesta.db".to_string()
}

fn default_templates_glob() -> String {
    "templates/**/*.html".to_string()
}

fn default_assets_dir() -> String {
    "assets".to_string()
}

#[cfg(feature = "server")]
impl ServerConfig {
    /// Load configuration from an optional `attesta.yaml` next to the binary
    /// plus `ATTESTA_*` environment variables; the environment wins.
    ///
    /// Nested keys use `__`, e.g. `ATTESTA_STAMP__TEMPLATE_PATH`.
    pub fn load() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::with_name("attesta").required(false))
            .add_source(config::Environment::with_prefix("ATTESTA").separator("__"))
            .build()?
            .try_deserialize()
    }
}
