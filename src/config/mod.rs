//! Configuration loaded from `.pwvault.toml` and the environment.

pub mod settings;

pub use settings::{Settings, APP_SECRET_ENV};
