use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};

use crate::commands::{KeygenCommand, SelftestCommand, SignCommand, VerifyCommand};
use crate::elliptic::EllipticCryptosystem;

/**
    ECDSA P-256 / SHA-256 signature checker.
*/
#[derive(Parser, Debug)]
#[command(name = "p256check", version)]
pub struct Cli {
    /// Curve name (P-256, NIST256p, secp256r1 or prime256v1).
    #[arg(long, default_value = "P-256", global = true)]
    pub curve: String,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Verify a signature over a message or digest.
    Verify(VerifyCommand),
    /// Sign a message or digest with a private key.
    Sign(SignCommand),
    /// Generate a new key pair.
    Keygen(KeygenCommand),
    /// Check the built-in vector and its single-byte mutations (default).
    Selftest(SelftestCommand),
}

impl Cli {
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }

    /// Returns whether the command succeeded; failed verification is not an error.
    pub fn run(self) -> Result<bool> {
        let crypto = EllipticCryptosystem::new_standard(&self.curve)
            .with_context(|| format!("cannot use curve {:?}", self.curve))?;
        let command = self
            .command
            .unwrap_or(Command::Selftest(SelftestCommand::default()));

        match command {
            Command::Verify(cmd) => cmd.run(crypto),
            Command::Sign(cmd) => cmd.run(crypto),
            Command::Keygen(cmd) => cmd.run(crypto),
            Command::Selftest(cmd) => cmd.run(crypto),
        }
    }
}
