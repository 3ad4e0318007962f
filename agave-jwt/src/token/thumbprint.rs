//! Certificate thumbprint for the token header.
//!
//! The thumbprint is derived in two encoding steps:
//!
//! ```text
//! digest     = SHA-1(certificate DER)              20 bytes
//! hex        = lowercase hex of digest             40 ASCII characters
//! thumbprint = base64url(hex as UTF-8 bytes)       56 characters, padded
//! ```
//!
//! This is not the RFC 7515 `x5t#S256` form (base64url of the raw SHA-256
//! digest). Gateways that verify these tokens decode the header value back to
//! the hex text, so the encoding must stay byte-for-byte as above.

use base64::{Engine, engine::general_purpose::URL_SAFE};
use der::Encode;
use sha1::{Digest, Sha1};
use x509_cert::Certificate;

use crate::error::{Result, TokenError};

/// Computes the header thumbprint of a DER-encoded certificate.
///
/// # Examples
///
/// ```
/// use agave_jwt::token::thumbprint::compute_thumbprint;
///
/// let thumbprint = compute_thumbprint(b"not really a certificate");
/// assert_eq!(thumbprint.len(), 56);
/// assert!(thumbprint.ends_with("=="));
/// ```
#[must_use]
pub fn compute_thumbprint(certificate_der: &[u8]) -> String {
    let digest = Sha1::digest(certificate_der);
    let hex_digest = hex::encode(digest);
    // hex text only yields base64 digits below 58, so URL_SAFE and STANDARD agree
    URL_SAFE.encode(hex_digest.as_bytes())
}

/// DER-encodes `certificate` and computes its header thumbprint.
///
/// # Errors
///
/// Returns [`TokenError::CertificateEncoding`] if the certificate cannot be
/// DER-encoded. `tenant_domain` is carried in the error for context.
pub fn certificate_thumbprint(certificate: &Certificate, tenant_domain: &str) -> Result<String> {
    let der = certificate.to_der().map_err(|source| TokenError::CertificateEncoding {
        tenant_domain: tenant_domain.to_owned(),
        source,
    })?;
    Ok(compute_thumbprint(&der))
}
