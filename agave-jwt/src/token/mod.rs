//! Gateway token construction and signing.
//!
//! A token is assembled in four steps, each in its own module:
//!
//! 1. [`claims`]: the registered and gateway claims for a tenant user
//! 2. [`thumbprint`]: the fingerprint of the signing certificate
//! 3. [`signer`]: the RS256 header, signature and compact serialization
//! 4. [`service`]: [`TokenService`] runs the three above for one issuance
//!
//! # Token Format
//!
//! ```text
//! header  = {"alg":"RS256","x5t#S256":"<thumbprint>"}
//! payload = {"iss":…,"sub":…,"iat":…,"exp":…,"http://wso2.org/claims/…":…}
//! token   = base64url(header) "." base64url(payload) "." base64url(signature)
//! ```
//!
//! # Examples
//!
//! ```no_run
//! use agave_jwt::{
//!     keystore::{KeyMaterialProvider, PemKeyStore},
//!     token::TokenService,
//! };
//!
//! # fn example() -> agave_jwt::Result<()> {
//! let store = PemKeyStore::open("/etc/agave/keystore")?;
//! let material = store.key_material("tenant", "changeit")?;
//!
//! let token = TokenService::default().issue_token(
//!     "TACC",
//!     "alice",
//!     &material.private_key,
//!     &material.certificate,
//! )?;
//!
//! assert_eq!(token.matches('.').count(), 2);
//! # Ok(())
//! # }
//! ```

pub mod claims;
pub mod service;
pub mod signer;
pub mod thumbprint;

#[cfg(test)]
mod tests;

pub use claims::{ClaimSet, RoleList, build_claims};
pub use service::TokenService;
pub use signer::{Header, SignedToken, sign};
pub use thumbprint::{certificate_thumbprint, compute_thumbprint};
