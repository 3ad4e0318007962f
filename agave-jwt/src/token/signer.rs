//! RS256 compact serialization of gateway tokens.
//!
//! ```text
//! base64url(header JSON) . base64url(claims JSON) . base64url(RSASSA-PKCS1-v1_5-SHA256 signature)
//! ```
//!
//! The signature covers the ASCII bytes of the first two segments joined by `.`.

use std::fmt;

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use pkcs8::PrivateKeyInfo;
use rsa::{RsaPrivateKey, pkcs1v15::SigningKey};
use serde::Serialize;
use sha2::Sha256;
use signature::{SignatureEncoding, Signer};
use tracing::{debug, instrument, warn};

use crate::{
    error::{Result, TokenError},
    keystore::PrivateKey,
    token::claims::ClaimSet,
};

/// JWS algorithm of every token.
pub const ALGORITHM: &str = "RS256";

/// Header parameter carrying the certificate thumbprint.
///
/// The name is the SHA-256 thumbprint parameter, while the value is built
/// from a SHA-1 digest (see [`crate::token::thumbprint`]). Verifiers depend
/// on this pairing.
pub const THUMBPRINT_PARAMETER: &str = "x5t#S256";

/// JOSE header of a gateway token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Header {
    /// Always [`ALGORITHM`].
    #[serde(rename = "alg")]
    pub algorithm: &'static str,

    /// Thumbprint of the signing certificate.
    #[serde(rename = "x5t#S256")]
    pub certificate_thumbprint: String,
}

impl Header {
    /// Creates an RS256 header carrying `certificate_thumbprint`.
    #[must_use]
    pub fn new(certificate_thumbprint: impl Into<String>) -> Self {
        Self { algorithm: ALGORITHM, certificate_thumbprint: certificate_thumbprint.into() }
    }
}

/// Signed token in compact form.
///
/// Segments are base64url without padding. The token is immutable once
/// produced; [`Display`](fmt::Display) yields the `header.payload.signature`
/// string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedToken {
    header: String,
    payload: String,
    signature: String,
}

impl SignedToken {
    /// Encoded header segment.
    #[must_use]
    pub fn header_segment(&self) -> &str {
        &self.header
    }

    /// Encoded claims segment.
    #[must_use]
    pub fn payload_segment(&self) -> &str {
        &self.payload
    }

    /// Encoded signature segment.
    #[must_use]
    pub fn signature_segment(&self) -> &str {
        &self.signature
    }

    /// Bytes covered by the signature: `header.payload`.
    #[must_use]
    pub fn signing_input(&self) -> String {
        format!("{}.{}", self.header, self.payload)
    }

    /// Compact serialization, `header.payload.signature`.
    #[must_use]
    pub fn serialize(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for SignedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.header, self.payload, self.signature)
    }
}

/// Signs `claims` under `header` with an RSA `private_key`.
///
/// # Errors
///
/// Returns [`TokenError::Signing`] if the key is not an RSA key, the key
/// structure is malformed, JSON encoding fails, or the RSA operation fails.
#[instrument(skip_all, fields(sub = %claims.subject, x5t = %header.certificate_thumbprint))]
pub fn sign(header: &Header, claims: &ClaimSet, private_key: &PrivateKey) -> Result<SignedToken> {
    let signing_key = rsa_signing_key(private_key)?;

    let header_json = serde_json::to_string(header)
        .map_err(|e| TokenError::Signing(format!("JWT header encoding failed: {e}")))?;
    let payload_json = serde_json::to_string(claims)
        .map_err(|e| TokenError::Signing(format!("JWT payload encoding failed: {e}")))?;

    let header = URL_SAFE_NO_PAD.encode(header_json.as_bytes());
    let payload = URL_SAFE_NO_PAD.encode(payload_json.as_bytes());
    let signing_input = format!("{header}.{payload}");

    let signature = signing_key
        .try_sign(signing_input.as_bytes())
        .map_err(|e| TokenError::Signing(format!("RSA signature failed: {e}")))?;
    let signature = URL_SAFE_NO_PAD.encode(signature.to_bytes());

    debug!("token signed");
    Ok(SignedToken { header, payload, signature })
}

fn rsa_signing_key(private_key: &PrivateKey) -> Result<SigningKey<Sha256>> {
    let info = PrivateKeyInfo::try_from(private_key.as_pkcs8_der())
        .map_err(|e| TokenError::Signing(format!("malformed private key: {e}")))?;

    if info.algorithm.oid != rsa::pkcs1::ALGORITHM_OID {
        warn!(oid = %info.algorithm.oid, "signing key is not an RSA key");
        return Err(TokenError::Signing(format!(
            "private key is not an RSA key (algorithm {})",
            info.algorithm.oid
        )));
    }

    let rsa_key = RsaPrivateKey::try_from(info)
        .map_err(|e| TokenError::Signing(format!("malformed RSA private key: {e}")))?;
    Ok(SigningKey::<Sha256>::new(rsa_key))
}
