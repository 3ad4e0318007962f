//! Command-line front end for Agave gateway tokens.
//!
//! Two binaries share this library:
//!
//! - `agave-jwt-signer` prints a signed token for a tenant user
//! - `agave-cert-reader` prints the public key verifiers need
//!
//! Each binary parses its arguments with clap (usage errors exit with status
//! 2), installs logging, and calls one function here. Failures come back as
//! [`anyhow::Error`] with the library error as the root cause, and `main`
//! exits with status 1.

pub mod args;
pub mod observability;

use agave_jwt::{
    IssuerConfig, TokenService,
    export::public_key_pem,
    keystore::{KeyMaterialProvider, PemKeyStore},
};
use anyhow::Context;
use tracing::info;

use crate::args::{CertReaderArgs, SignerArgs};

/// Issues the compact token described by `args`.
///
/// # Errors
///
/// Returns an error if the issuer configuration cannot be loaded, the key
/// store cannot be opened, or issuance fails.
pub fn sign_token(args: &SignerArgs) -> anyhow::Result<String> {
    let config = match &args.config {
        Some(path) => IssuerConfig::from_file(path)
            .with_context(|| format!("unable to load issuer configuration {}", path.display()))?,
        None => IssuerConfig::default(),
    };
    let service = TokenService::new(config)?;

    let store = open_store(&args.key_store.keystore)?;
    let token = service
        .issue_for_alias(
            &store,
            &args.key_store.alias,
            &args.keypass,
            &args.tenant,
            &args.username,
        )
        .with_context(|| {
            format!("unable to issue token for {} in tenant {}", args.username, args.tenant)
        })?;

    info!(alias = %args.key_store.alias, tenant = %args.tenant, "token issued");
    Ok(token)
}

/// Exports the public key of the entry described by `args`.
///
/// # Errors
///
/// Returns an error if the key store cannot be opened, the alias has no
/// certificate, or the key cannot be encoded.
pub fn export_public_key(args: &CertReaderArgs) -> anyhow::Result<String> {
    let store = open_store(&args.key_store.keystore)?;
    let certificate = store.certificate(&args.key_store.alias).with_context(|| {
        format!("unable to read public certificate for {}", store.root().display())
    })?;
    Ok(public_key_pem(&certificate)?)
}

fn open_store(path: &std::path::Path) -> anyhow::Result<PemKeyStore> {
    PemKeyStore::open(path).with_context(|| format!("unable to open key store {}", path.display()))
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use agave_jwt::TokenError;

    use super::*;
    use crate::args::KeyStoreArgs;

    const FIXTURES: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../agave-jwt/tests/fixtures");

    fn signer_args(alias: &str, keypass: &str) -> SignerArgs {
        SignerArgs {
            key_store: KeyStoreArgs { keystore: PathBuf::from(FIXTURES), alias: alias.to_owned(), storepass: None },
            username: "alice".to_owned(),
            tenant: "TACC".to_owned(),
            keypass: keypass.to_owned(),
            config: None,
        }
    }

    #[test]
    fn test_sign_token() {
        let token = sign_token(&signer_args("tenant", "changeit")).unwrap();
        assert_eq!(token.matches('.').count(), 2);
    }

    #[test]
    fn test_sign_token_wrong_password() {
        let err = sign_token(&signer_args("tenant", "wrong")).unwrap_err();

        assert!(err.to_string().contains("unable to issue token for alice in tenant TACC"));
        assert!(matches!(err.root_cause().downcast_ref::<TokenError>(), Some(TokenError::KeyMaterial(_))));
    }

    #[test]
    fn test_sign_token_missing_store() {
        let mut args = signer_args("tenant", "changeit");
        args.key_store.keystore = PathBuf::from("/nonexistent/agave/keystore");

        let err = sign_token(&args).unwrap_err();
        assert!(err.to_string().starts_with("unable to open key store"));
    }

    #[test]
    fn test_sign_token_with_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("issuer.toml");
        std::fs::write(&path, "issuer = \"agave.test\"\n").unwrap();

        let mut args = signer_args("tenant", "changeit");
        args.config = Some(path);
        assert!(sign_token(&args).is_ok());
    }

    #[test]
    fn test_sign_token_invalid_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("issuer.toml");
        std::fs::write(&path, "validity_ms = 0\n").unwrap();

        let mut args = signer_args("tenant", "changeit");
        args.config = Some(path);
        let err = sign_token(&args).unwrap_err();
        assert!(err.to_string().starts_with("unable to load issuer configuration"));
    }

    #[test]
    fn test_export_public_key() {
        let args = CertReaderArgs {
            key_store: KeyStoreArgs { keystore: PathBuf::from(FIXTURES), alias: "tenant".to_owned(), storepass: None },
        };
        let pem = export_public_key(&args).unwrap();

        assert!(pem.starts_with("-----BEGIN CERTIFICATE-----\nMIIBIjANBgkqhkiG9w0BAQEFAAOCAQ8A"));
        assert!(pem.ends_with("gX0yyQIDAQAB\n-----END CERTIFICATE-----"));
    }

    #[test]
    fn test_export_unknown_alias() {
        let args = CertReaderArgs {
            key_store: KeyStoreArgs { keystore: PathBuf::from(FIXTURES), alias: "missing".to_owned(), storepass: None },
        };
        let err = export_public_key(&args).unwrap_err();
        assert!(err.to_string().starts_with("unable to read public certificate"));
    }
}
