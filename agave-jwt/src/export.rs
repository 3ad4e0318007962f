//! Public key export for token verifiers.
//!
//! Verifiers are provisioned with the tenant's public key rather than the full
//! certificate. The key is exported as its DER `SubjectPublicKeyInfo` under a
//! `CERTIFICATE` PEM label, which is what existing provisioning scripts read.

use base64::{Engine, engine::general_purpose::STANDARD};
use der::Encode;
use x509_cert::Certificate;

use crate::error::{Result, TokenError};

/// PEM label wrapped around the exported key.
pub const PEM_LABEL: &str = "CERTIFICATE";

/// Base64 line width of the exported body.
pub const LINE_WIDTH: usize = 76;

/// Renders the public key of `certificate` as PEM text.
///
/// The body is the standard-alphabet base64 of the DER `SubjectPublicKeyInfo`,
/// broken into [`LINE_WIDTH`] lines. The text has no trailing newline.
///
/// # Errors
///
/// Returns [`TokenError::KeyMaterial`] if the public key cannot be DER-encoded.
///
/// # Examples
///
/// ```no_run
/// use agave_jwt::{export::public_key_pem, keystore::{KeyMaterialProvider, PemKeyStore}};
///
/// # fn example() -> agave_jwt::Result<()> {
/// let store = PemKeyStore::open("/etc/agave/keystore")?;
/// let pem = public_key_pem(&store.certificate("tenant")?)?;
/// assert!(pem.starts_with("-----BEGIN CERTIFICATE-----\n"));
/// # Ok(())
/// # }
/// ```
pub fn public_key_pem(certificate: &Certificate) -> Result<String> {
    let spki = certificate
        .tbs_certificate
        .subject_public_key_info
        .to_der()
        .map_err(|e| TokenError::KeyMaterial(format!("public key encoding failed: {e}")))?;

    let body = STANDARD.encode(spki);
    let mut pem = String::with_capacity(body.len() + body.len() / LINE_WIDTH + 64);
    pem.push_str("-----BEGIN ");
    pem.push_str(PEM_LABEL);
    pem.push_str("-----\n");
    for (i, c) in body.chars().enumerate() {
        if i > 0 && i % LINE_WIDTH == 0 {
            pem.push('\n');
        }
        pem.push(c);
    }
    pem.push_str("\n-----END ");
    pem.push_str(PEM_LABEL);
    pem.push_str("-----");
    Ok(pem)
}
