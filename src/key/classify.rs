//! Key format sniffing
//!
//! Purely advisory: the result is shown to the user but never decides
//! whether the key gets written.

use super::{decode::unwrap_pem_tolerant, KeyFormat};

/// Marker substrings checked in order, first hit wins
const MARKERS: &[(&str, KeyFormat)] = &[
    ("BEGIN RSA PRIVATE KEY", KeyFormat::Rsa),
    ("BEGIN PRIVATE KEY", KeyFormat::Pkcs8),
    ("BEGIN OPENSSH PRIVATE KEY", KeyFormat::OpenSsh),
    ("BEGIN EC PRIVATE KEY", KeyFormat::EllipticCurve),
];

/// Classify `normalized` text.
///
/// When no known marker is present, `original` (the text as it was before
/// any decoding or normalization) is checked for a base64 layer hiding a
/// PEM block. That check forgives missing `=` padding, unlike the decoder.
pub fn classify(normalized: &str, original: &str) -> KeyFormat {
    MARKERS
        .iter()
        .find(|(marker, _)| normalized.contains(marker))
        .map(|&(_, format)| format)
        .unwrap_or_else(|| {
            if unwrap_pem_tolerant(original).is_some() {
                KeyFormat::Base64Wrapped
            } else {
                KeyFormat::Unknown
            }
        })
}
