use anyhow::{Context, Result};
use clap::Args;
use log::{info, warn};

use crate::elliptic::EllipticCryptosystem;
use crate::vectors;

/**
    Verify the built-in vector, then check that every single-byte mutation
    of its message, key and signature is rejected.
*/
#[derive(Args, Debug, Default)]
pub struct SelftestCommand {}

impl SelftestCommand {
    pub fn run(self, crypto: EllipticCryptosystem) -> Result<bool> {
        let report = vectors::mutation_sweep(&crypto).context("failed to load built-in vector")?;

        println!("verification result: {}", report.vector_verified);
        println!(
            "mutations rejected: {}/{}",
            report.mutations - report.accepted.len(),
            report.mutations
        );
        for mutation in &report.accepted {
            warn!("mutated input still verified: {mutation}");
        }
        info!("selftest passed={}", report.passed());
        Ok(report.passed())
    }
}
