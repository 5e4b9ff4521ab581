use anyhow::{Context, Result};
use clap::Args;
use log::info;

use super::input::MessageInput;
use crate::elliptic::{ECDSASignature, ECPublicKey, EllipticCryptosystem};

/**
    Verify an ECDSA signature.
*/
#[derive(Args, Debug)]
pub struct VerifyCommand {
    /// Public key as hex: raw X||Y (64 bytes) or SEC1 (33 or 65 bytes).
    #[arg(long)]
    pub public_key: String,
    /// Signature as hex: raw r||s (64 bytes) or DER.
    #[arg(long)]
    pub signature: String,
    #[command(flatten)]
    pub input: MessageInput,
    /// Reject signatures whose s lies in the upper half of the group order.
    #[arg(long)]
    pub require_low_s: bool,
}

impl VerifyCommand {
    pub fn run(self, crypto: EllipticCryptosystem) -> Result<bool> {
        let crypto = crypto.with_low_s_required(self.require_low_s);
        let public_key =
            ECPublicKey::from_hex(&self.public_key).context("failed to parse public key")?;
        let signature =
            ECDSASignature::from_hex(&self.signature).context("failed to parse signature")?;
        let digest = self.input.digest()?;

        let verified = crypto
            .verify_digest(&digest, &signature, &public_key)
            .context("verification could not be performed")?;
        info!("digest {} verified={}", hex::encode(&digest), verified);
        println!("verification result: {}", verified);
        Ok(verified)
    }
}
