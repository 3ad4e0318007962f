//! Agave JWT: gateway identity tokens for Agave tenants
//!
//! The API gateway in front of Agave services trusts RS256-signed JSON Web
//! Tokens that describe the calling user in the WSO2 claims vocabulary. This
//! crate issues those tokens from a tenant's signing key and certificate.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────┐   alias + password   ┌──────────────────┐
//! │ KeyMaterialProvider│◄─────────────────────│   TokenService   │
//! │   (PemKeyStore)    │─────────────────────►│                  │
//! └────────────────────┘  key + certificate   │ 1. build_claims  │
//!                                             │ 2. thumbprint    │
//!                                             │ 3. sign (RS256)  │
//!                                             └────────┬─────────┘
//!                                                      │
//!                                        header.payload.signature
//! ```
//!
//! - [`token::claims`]: registered claims plus the namespaced gateway claims
//! - [`token::thumbprint`]: certificate fingerprint placed in the header
//! - [`token::signer`]: RS256 signature and compact serialization
//! - [`keystore`]: loads tenant keys and certificates by alias
//! - [`export`]: PEM rendering of a certificate's public key
//! - [`config`]: issuer settings, defaulting to the gateway's values
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use agave_jwt::{keystore::PemKeyStore, token::TokenService};
//!
//! # fn example() -> agave_jwt::Result<()> {
//! // Directory containing tenant.crt and tenant.key
//! let store = PemKeyStore::open("/etc/agave/keystore")?;
//!
//! let token = TokenService::default().issue_for_alias(&store, "tenant", "changeit", "TACC", "alice")?;
//!
//! println!("{token}");
//! # Ok(())
//! # }
//! ```
//!
//! # Token Validity
//!
//! Every token is valid for [`config::DEFAULT_VALIDITY_MS`] (four minutes)
//! from the moment of issuance. `iat` and `exp` are whole seconds since the
//! Unix epoch.
//!
//! # Error Handling
//!
//! All fallible operations return [`Result`]. Failures are reported as
//! [`TokenError`]; no partially built token is ever returned.
//!
//! # Observability
//!
//! Issuance is instrumented with [`tracing`] spans. Install a subscriber (for
//! example `tracing-subscriber`) to see them; without one they cost nothing.
//! Key passwords and key bytes are never recorded.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod config;
pub mod error;
pub mod export;
pub mod keystore;
pub mod token;

pub use config::IssuerConfig;
pub use error::{Result, TokenError};
pub use token::TokenService;
