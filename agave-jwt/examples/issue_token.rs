//! Token issuance example for the Agave gateway.
//!
//! Opens the fixture key store, issues a token for one user, and prints the
//! decoded segments next to the public key a verifier would be given.
//!
//! Run with: `cargo run --example issue_token`

#![allow(clippy::print_stdout, reason = "examples need output")]

use agave_jwt::{
    TokenService,
    export::public_key_pem,
    keystore::{KeyMaterialProvider, PemKeyStore},
};
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Agave JWT: Token Issuance Example\n");

    let store = PemKeyStore::open(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures"))?;
    println!("Key store: {}", store.root().display());
    println!("Aliases:   {}", store.aliases().collect::<Vec<_>>().join(", "));

    let service = TokenService::default();
    let token = service.issue_for_alias(&store, "tenant", "changeit", "TACC", "alice")?;

    println!("\nCompact token:\n{token}\n");

    for (name, segment) in ["header", "payload"].into_iter().zip(token.split('.')) {
        let json: serde_json::Value = serde_json::from_slice(&URL_SAFE_NO_PAD.decode(segment)?)?;
        println!("{name}:\n{}\n", serde_json::to_string_pretty(&json)?);
    }

    println!("Verifier public key:");
    println!("{}", public_key_pem(&store.certificate("tenant")?)?);

    println!(
        "\n✓ Token valid for {} seconds",
        service.config().validity().as_secs()
    );

    Ok(())
}
