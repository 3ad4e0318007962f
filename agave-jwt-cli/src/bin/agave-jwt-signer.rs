//! Prints a signed gateway token for an Agave user.
//!
//! ```text
//! agave-jwt-signer /etc/agave/keystore -u alice -t tacc -a tenant -k changeit
//! ```

#![allow(clippy::print_stdout, reason = "the token is the program output")]

use agave_jwt_cli::{
    args::SignerArgs,
    observability::{LogFormat, init_observability},
    sign_token,
};
use clap::Parser;

fn main() -> anyhow::Result<()> {
    let args = SignerArgs::parse();
    init_observability(LogFormat::from_env());

    let token = sign_token(&args)?;
    println!("{token}");
    Ok(())
}
