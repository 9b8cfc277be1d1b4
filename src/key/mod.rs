//! Private key text handling
//!
//! This module holds the text-level pipeline that turns whatever the caller
//! handed us into canonical PEM: unwrapping base64, repairing line endings
//! and boundary markers, and sniffing the key encoding.

use std::fmt;

pub mod classify;
pub mod decode;
pub mod normalize;

pub use classify::classify;
pub use decode::{decode_if_wrapped, Decoded};
pub use normalize::normalize;

/// Private key encoding family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyFormat {
    /// PKCS#1 `RSA PRIVATE KEY`
    Rsa,
    /// PKCS#8 `PRIVATE KEY`
    Pkcs8,
    /// `OPENSSH PRIVATE KEY`
    OpenSsh,
    /// SEC1 `EC PRIVATE KEY`
    EllipticCurve,
    /// Base64 blob that hides a PEM block we don't have a label for
    Base64Wrapped,
    /// Nothing recognizable
    Unknown,
}

impl KeyFormat {
    /// Human-readable label used in summaries and logs
    pub fn label(&self) -> &'static str {
        match self {
            KeyFormat::Rsa => "RSA (PKCS#1)",
            KeyFormat::Pkcs8 => "PKCS#8",
            KeyFormat::OpenSsh => "OpenSSH",
            KeyFormat::EllipticCurve => "EC (SEC1)",
            KeyFormat::Base64Wrapped => "base64-wrapped PEM",
            KeyFormat::Unknown => "unknown",
        }
    }

    /// Whether this is one of the labelled PEM families
    pub fn is_recognized(&self) -> bool {
        !matches!(self, KeyFormat::Base64Wrapped | KeyFormat::Unknown)
    }
}

impl fmt::Display for KeyFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Key content at some point in the pipeline.
///
/// Every stage consumes one `KeyText` and hands back a new one; there is no
/// way to edit the content in place. The `Debug` output only shows the
/// length since the content is secret.
#[derive(Clone, PartialEq, Eq)]
pub struct KeyText(String);

impl KeyText {
    /// Wrap raw text
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over lines (without terminators)
    pub fn lines(&self) -> std::str::Lines<'_> {
        self.0.lines()
    }

    pub fn line_count(&self) -> usize {
        self.0.lines().count()
    }

    pub fn first_line(&self) -> Option<&str> {
        self.0.lines().next()
    }

    pub fn last_line(&self) -> Option<&str> {
        self.0.lines().last()
    }

    /// Run a text transform and return the result as a new `KeyText`
    pub fn map(&self, f: impl FnOnce(&str) -> String) -> KeyText {
        KeyText(f(&self.0))
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Debug for KeyText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KeyText({} bytes)", self.0.len())
    }
}

impl From<String> for KeyText {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for KeyText {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for KeyText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
