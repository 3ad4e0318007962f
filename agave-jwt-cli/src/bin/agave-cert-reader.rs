//! Prints the public key of a key store entry for token verifiers.
//!
//! ```text
//! agave-cert-reader /etc/agave/keystore -a tenant
//! ```

#![allow(clippy::print_stdout, reason = "the exported key is the program output")]

use agave_jwt_cli::{
    args::CertReaderArgs,
    export_public_key,
    observability::{LogFormat, init_observability},
};
use clap::Parser;

fn main() -> anyhow::Result<()> {
    let args = CertReaderArgs::parse();
    init_observability(LogFormat::from_env());

    println!("{}", export_public_key(&args)?);
    Ok(())
}
