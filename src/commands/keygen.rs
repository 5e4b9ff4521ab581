use anyhow::Result;
use clap::Args;
use log::info;

use crate::elliptic::EllipticCryptosystem;

/**
    Generate a P-256 key pair.
*/
#[derive(Args, Debug)]
pub struct KeygenCommand {}

impl KeygenCommand {
    pub fn run(self, mut crypto: EllipticCryptosystem) -> Result<bool> {
        let private_key = crypto.generate_private_key();
        let public_key = private_key.get_public_key();
        info!("generated key pair");

        println!("Private Key:        {}", private_key.to_hex());
        println!("Public Key (raw):   {}", public_key.to_raw_hex());
        println!("Public Key (SEC1):  {}", public_key.to_sec1_hex(false));
        println!("Public Key (comp.): {}", public_key.to_sec1_hex(true));
        Ok(true)
    }
}
