//! benchview Client - REST access to the session API.
//!
//! Provides [`RestSessionClient`], the production implementation of
//! `benchview_reader::SessionSource`, and its TOML configuration.
//!
//! ```ignore
//! let config = ClientConfig::load()?;
//! let client = Arc::new(RestSessionClient::new(&config)?);
//! let service = ReportService::new(client, ReaderConfig::default());
//! let (summaries, total) = service.list_summaries(50).await;
//! ```

pub mod config;
pub mod rest;

pub use config::{ClientConfig, ConfigError};
pub use rest::RestSessionClient;
