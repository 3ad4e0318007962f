//! Issuer configuration.
//!
//! The gateway constants stamped into every token live here as named,
//! overridable settings. [`IssuerConfig::default`] carries the production
//! values; tests and deployments may load alternatives from TOML.

use std::{path::Path, time::Duration};

use serde::Deserialize;

use crate::error::{Result, TokenError};

/// Issuer identifier of the API gateway.
pub const DEFAULT_ISSUER: &str = "wso2.org/products/am";

/// Namespace prefix for gateway claims. Claim names are `{namespace}/{name}`.
pub const DEFAULT_CLAIMS_NAMESPACE: &str = "http://wso2.org/claims";

/// Token lifetime in milliseconds (4 minutes).
pub const DEFAULT_VALIDITY_MS: u64 = 240_000;

/// Sentinel tenant id of the super tenant that owns every end user.
pub const DEFAULT_END_USER_TENANT_ID: &str = "-1234";

/// Domain used to synthesize end-user email addresses.
pub const DEFAULT_EMAIL_DOMAIN: &str = "example.com";

/// Tenant domain reported when a certificate cannot be fingerprinted.
pub const DEFAULT_TENANT_DOMAIN: &str = "sandbox.agaveplatform.org";

/// Settings that shape every issued token.
///
/// # Examples
///
/// ```
/// use agave_jwt::config::IssuerConfig;
///
/// let config = IssuerConfig::from_toml_str(
///     r#"
///     issuer = "gateway.test"
///     validity_ms = 60000
/// "#,
/// )
/// .unwrap();
///
/// assert_eq!(config.issuer, "gateway.test");
/// assert_eq!(config.validity_ms, 60_000);
/// assert_eq!(config.claims_namespace, "http://wso2.org/claims");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IssuerConfig {
    /// Value of the `iss` claim.
    pub issuer: String,

    /// Prefix for the gateway claim group, without a trailing `/`.
    pub claims_namespace: String,

    /// Distance between `iat` and `exp`, in milliseconds.
    pub validity_ms: u64,

    /// Value of the `enduserTenantId` claim.
    pub end_user_tenant_id: String,

    /// Domain appended to the username to form `emailaddress`.
    pub email_domain: String,

    /// Tenant domain used in certificate error context.
    pub tenant_domain: String,
}

impl Default for IssuerConfig {
    fn default() -> Self {
        Self {
            issuer: DEFAULT_ISSUER.to_owned(),
            claims_namespace: DEFAULT_CLAIMS_NAMESPACE.to_owned(),
            validity_ms: DEFAULT_VALIDITY_MS,
            end_user_tenant_id: DEFAULT_END_USER_TENANT_ID.to_owned(),
            email_domain: DEFAULT_EMAIL_DOMAIN.to_owned(),
            tenant_domain: DEFAULT_TENANT_DOMAIN.to_owned(),
        }
    }
}

impl IssuerConfig {
    /// Parses and validates a TOML document. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::InvalidConfig`] if the document is not valid TOML,
    /// names an unknown key, or fails [`validate`](Self::validate).
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        let config: Self = toml::from_str(toml)
            .map_err(|e| TokenError::InvalidConfig(format!("failed to parse TOML: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::InvalidConfig`] if the file cannot be read or its
    /// contents are rejected by [`from_toml_str`](Self::from_toml_str).
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            TokenError::InvalidConfig(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&contents)
    }

    /// Checks the settings for values that would produce malformed tokens.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::InvalidConfig`] if the issuer or namespace is
    /// empty, the namespace ends with `/`, or the validity window is zero or
    /// not a multiple of 1000 ms.
    pub fn validate(&self) -> Result<()> {
        if self.issuer.trim().is_empty() {
            return Err(TokenError::InvalidConfig("issuer must not be empty".to_owned()));
        }

        if self.claims_namespace.trim().is_empty() {
            return Err(TokenError::InvalidConfig("claims_namespace must not be empty".to_owned()));
        }

        // claim names are joined with '/', a trailing one would double it
        if self.claims_namespace.ends_with('/') {
            return Err(TokenError::InvalidConfig(format!(
                "claims_namespace must not end with '/': {}",
                self.claims_namespace
            )));
        }

        if self.validity_ms == 0 {
            return Err(TokenError::InvalidConfig("validity_ms must be positive".to_owned()));
        }

        // iat and exp are whole seconds
        if self.validity_ms % 1000 != 0 {
            return Err(TokenError::InvalidConfig(format!(
                "validity_ms must be a whole number of seconds: {}",
                self.validity_ms
            )));
        }

        Ok(())
    }

    /// Token lifetime as a [`Duration`].
    #[must_use]
    pub const fn validity(&self) -> Duration {
        Duration::from_millis(self.validity_ms)
    }
}
