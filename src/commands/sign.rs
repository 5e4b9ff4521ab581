use anyhow::{Context, Result};
use clap::Args;

use super::input::MessageInput;
use crate::elliptic::{ECPrivateKey, EllipticCryptosystem};

/**
    Sign with a P-256 private key (RFC 6979 deterministic nonces).
*/
#[derive(Args, Debug)]
pub struct SignCommand {
    /// Private key scalar as 32 bytes of hex.
    #[arg(long)]
    pub private_key: String,
    #[command(flatten)]
    pub input: MessageInput,
    /// Print the signature as DER instead of raw r||s.
    #[arg(long)]
    pub der: bool,
}

impl SignCommand {
    pub fn run(self, crypto: EllipticCryptosystem) -> Result<bool> {
        let private_key =
            ECPrivateKey::from_hex(&self.private_key).context("failed to parse private key")?;
        let digest = self.input.digest()?;
        let signature = crypto
            .sign(&digest, &private_key)
            .context("failed to sign")?;

        println!("Public Key: {}", private_key.get_public_key().to_raw_hex());
        if self.der {
            println!("Signature:  {}", signature.to_der_hex());
        } else {
            println!("Signature:  {}", signature.to_raw_hex());
        }
        Ok(true)
    }
}
