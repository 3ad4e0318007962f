//! Command-line arguments shared by the signer and the certificate reader.
//!
//! Every argument falls back to an environment variable, so both tools can
//! run unattended in containers with nothing on the command line.

use std::path::PathBuf;

use clap::{Args, Parser};
use unicode_normalization::UnicodeNormalization;

/// Locates one entry of a key store.
#[derive(Debug, Clone, Args)]
pub struct KeyStoreArgs {
    /// Key store directory holding `<alias>.crt` and `<alias>.key` files.
    #[arg(value_name = "FILE", env = "AGAVE_KEYSTORE_FILE")]
    pub keystore: PathBuf,

    /// Alias of the key store entry.
    #[arg(short, long, env = "AGAVE_ALIAS", value_parser = parse_alias)]
    pub alias: String,

    /// Accepted for compatibility with Java key store invocations and ignored.
    /// PEM key stores have no store password.
    #[arg(short, long, env = "AGAVE_STOREPASS", hide = true, hide_env_values = true)]
    pub storepass: Option<String>,
}

/// Arguments of `agave-jwt-signer`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "agave-jwt-signer",
    version,
    about = "Generates a signed JWT for an Agave user in the gateway's claims format"
)]
pub struct SignerArgs {
    #[command(flatten)]
    pub key_store: KeyStoreArgs,

    /// Agave username injected into the token.
    #[arg(short, long, env = "AGAVE_USERNAME", value_parser = parse_username)]
    pub username: String,

    /// Agave tenant code. Normalized to upper-case ASCII.
    #[arg(short, long, env = "AGAVE_TENANT", value_parser = parse_tenant)]
    pub tenant: String,

    /// Password of the private key referenced by the alias.
    #[arg(short = 'k', long, env = "AGAVE_KEYPASS", hide_env_values = true, value_parser = parse_keypass)]
    pub keypass: String,

    /// TOML file overriding the issuer settings.
    #[arg(long, value_name = "PATH", env = "AGAVE_JWT_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Arguments of `agave-cert-reader`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "agave-cert-reader",
    version,
    about = "Exports the public key of a key store entry for validating tokens"
)]
pub struct CertReaderArgs {
    #[command(flatten)]
    pub key_store: KeyStoreArgs,
}

/// Normalizes a tenant code to the form used in role names.
///
/// The code is decomposed (NFD), non-ASCII characters are dropped, anything
/// other than ASCII letters, digits, `_` and `+` becomes `_`, and the result
/// is upper-cased.
///
/// ```
/// use agave_jwt_cli::args::normalize_tenant;
///
/// assert_eq!(normalize_tenant("Tacc-Prod é"), "TACC_PROD_E");
/// ```
#[must_use]
pub fn normalize_tenant(tenant: &str) -> String {
    tenant
        .nfd()
        .filter(char::is_ascii)
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' || c == '+' { c } else { '_' })
        .collect::<String>()
        .to_ascii_uppercase()
}

fn parse_tenant(value: &str) -> Result<String, String> {
    if value.is_empty() {
        return Err("Agave tenant code required".to_owned());
    }
    let tenant = normalize_tenant(value);
    if tenant.is_empty() {
        return Err(format!("tenant code '{value}' has no ASCII characters"));
    }
    Ok(tenant)
}

fn parse_username(value: &str) -> Result<String, String> {
    non_empty(value, "Agave username required")
}

fn parse_alias(value: &str) -> Result<String, String> {
    non_empty(value, "keystore alias required")
}

fn parse_keypass(value: &str) -> Result<String, String> {
    non_empty(value, "private key password required")
}

fn non_empty(value: &str, message: &str) -> Result<String, String> {
    if value.is_empty() { Err(message.to_owned()) } else { Ok(value.to_owned()) }
}
