//! Token issuance for tenant users.

use chrono::{DateTime, Utc};
use tracing::{debug, instrument};
use x509_cert::Certificate;

use crate::{
    config::IssuerConfig,
    error::Result,
    keystore::{KeyMaterialProvider, PrivateKey},
    token::{
        claims::build_claims,
        signer::{Header, SignedToken, sign},
        thumbprint::certificate_thumbprint,
    },
};

/// Issues signed gateway tokens.
///
/// The service holds only its [`IssuerConfig`]; key material is supplied per
/// call, so one service can be shared across threads and tenants.
///
/// # Examples
///
/// ```no_run
/// use agave_jwt::{keystore::PemKeyStore, token::TokenService};
///
/// # fn example() -> agave_jwt::Result<()> {
/// let store = PemKeyStore::open("/etc/agave/keystore")?;
/// let service = TokenService::default();
///
/// let token = service.issue_for_alias(&store, "tenant", "changeit", "TACC", "alice")?;
/// println!("{token}");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct TokenService {
    config: IssuerConfig,
}

impl TokenService {
    /// Creates a service with a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`crate::TokenError::InvalidConfig`] if `config` fails
    /// [`IssuerConfig::validate`].
    pub fn new(config: IssuerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Configuration used for every token.
    #[must_use]
    pub const fn config(&self) -> &IssuerConfig {
        &self.config
    }

    /// Issues a compact token for `username` in `tenant_id`, valid from now.
    ///
    /// # Errors
    ///
    /// Returns [`crate::TokenError::CertificateEncoding`] if the certificate
    /// cannot be fingerprinted, or [`crate::TokenError::Signing`] if the key
    /// cannot sign.
    pub fn issue_token(
        &self,
        tenant_id: &str,
        username: &str,
        private_key: &PrivateKey,
        certificate: &Certificate,
    ) -> Result<String> {
        self.issue_token_at(tenant_id, username, private_key, certificate, Utc::now())
            .map(|token| token.serialize())
    }

    /// Issues a token as if the current time were `now`.
    ///
    /// # Errors
    ///
    /// Fails as [`issue_token`](Self::issue_token) does.
    #[instrument(skip(self, private_key, certificate), fields(iat = now.timestamp()))]
    pub fn issue_token_at(
        &self,
        tenant_id: &str,
        username: &str,
        private_key: &PrivateKey,
        certificate: &Certificate,
        now: DateTime<Utc>,
    ) -> Result<SignedToken> {
        let claims = build_claims(&self.config, tenant_id, username, now);
        let thumbprint = certificate_thumbprint(certificate, &self.config.tenant_domain)?;
        let token = sign(&Header::new(thumbprint), &claims, private_key)?;

        debug!(exp = claims.expiration_time.timestamp(), "token issued");
        Ok(token)
    }

    /// Loads the key material stored under `alias` and issues a token with it.
    ///
    /// # Errors
    ///
    /// Returns [`crate::TokenError::KeyMaterial`] if `provider` cannot supply
    /// the alias, otherwise fails as [`issue_token`](Self::issue_token) does.
    pub fn issue_for_alias<P>(
        &self,
        provider: &P,
        alias: &str,
        password: &str,
        tenant_id: &str,
        username: &str,
    ) -> Result<String>
    where
        P: KeyMaterialProvider + ?Sized,
    {
        let material = provider.key_material(alias, password)?;
        self.issue_token(tenant_id, username, &material.private_key, &material.certificate)
    }
}
