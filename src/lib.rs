//! # sshkey-normalize
//!
//! Turns an SSH private key that went through a secret store, CI variable or
//! web form (base64'd, squashed onto one line with `\n` escapes, CRLF'd) back
//! into a proper PEM file, and installs it with a client config suited to
//! unattended `ssh`.
//!
//! The pipeline is strictly sequential:
//! [`key::decode_if_wrapped`] → [`key::normalize`] → [`key::classify`] →
//! [`materialize::materialize`] → [`report::report`]. Only the
//! materialize step can fail.

pub mod cli;
pub mod config;
pub mod key;
pub mod materialize;
pub mod report;

pub use config::Config;
pub use key::{KeyFormat, KeyText};

/// Result type alias for sshkey-normalize operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for sshkey-normalize operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Writing the key or client config failed
    #[error("Materialize error: {0}")]
    Materialize(#[from] materialize::MaterializeError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
