//! Error types for gateway token issuance.
//!
//! Every fallible operation in this crate returns [`Result`]. Each variant of
//! [`TokenError`] names the stage of issuance that failed, so callers can tell
//! a key store problem apart from a certificate or signing problem without
//! parsing messages.
//!
//! # Error Categories
//!
//! - **Key material** ([`TokenError::KeyMaterial`]): alias missing, wrong
//!   password, unreadable or malformed key store entries
//! - **Certificate** ([`TokenError::CertificateEncoding`]): the certificate
//!   cannot be DER-encoded for the thumbprint
//! - **Signing** ([`TokenError::Signing`]): the private key is not an RSA key,
//!   or the signature primitive rejected the input
//! - **Configuration** ([`TokenError::InvalidConfig`]): issuer settings failed
//!   validation
//!
//! None of these are transient. Issuance is deterministic for fixed inputs, so
//! nothing in this crate retries.
//!
//! # Examples
//!
//! ```
//! use agave_jwt::error::{Result, TokenError};
//!
//! fn require_alias(alias: &str) -> Result<&str> {
//!     if alias.is_empty() {
//!         return Err(TokenError::KeyMaterial("keystore alias required".to_owned()));
//!     }
//!     Ok(alias)
//! }
//!
//! assert!(require_alias("").is_err());
//! ```

use thiserror::Error;

/// Result type alias for token operations.
pub type Result<T> = std::result::Result<T, TokenError>;

/// Errors that can occur while issuing a gateway token.
///
/// Errors are terminal: a failure in any stage aborts issuance and no partial
/// token is produced.
#[must_use = "errors should be handled, propagated, or explicitly panicked"]
#[derive(Debug, Error)]
pub enum TokenError {
    /// Key material could not be obtained from the key store.
    ///
    /// Common causes include:
    /// - The alias has no entry in the store
    /// - The private key password is wrong
    /// - A key or certificate file is not valid PEM
    ///
    /// # Recovery
    ///
    /// Check the key store location, the alias, and the key password.
    #[error("key material unavailable: {0}")]
    KeyMaterial(String),

    /// The certificate could not be DER-encoded for thumbprint computation.
    ///
    /// The thumbprint is a precondition for issuance, so this is fatal.
    #[error("error obtaining certificate thumbprint for tenant {tenant_domain}")]
    CertificateEncoding {
        /// Tenant domain the certificate was loaded for.
        tenant_domain: String,
        /// Underlying DER encoding failure.
        #[source]
        source: der::Error,
    },

    /// The private key could not be used to sign the token.
    ///
    /// Raised when the key is not an RSA key, when the PKCS#8 structure is
    /// malformed, or when the RSA signature operation fails.
    ///
    /// # Recovery
    ///
    /// Verify the alias refers to an RSA key pair.
    #[error("error using tenant signing key: {0}")]
    Signing(String),

    /// Issuer configuration failed validation.
    ///
    /// # Examples
    ///
    /// ```
    /// use agave_jwt::error::TokenError;
    ///
    /// let err = TokenError::InvalidConfig("validity_ms must be positive".to_owned());
    /// assert!(err.to_string().contains("invalid issuer configuration"));
    /// ```
    #[error("invalid issuer configuration: {0}")]
    InvalidConfig(String),
}
