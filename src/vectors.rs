//! Known-good P-256 vector captured from an ATECC608 secure element (key slot 2).

use crate::elliptic::{ECDSASignature, ECPublicKey, EllipticCryptosystem, EllipticError};
use crate::encoding::decode_hex;
use log::debug;

/// "hello from AWS EduKit"
pub const MESSAGE_HEX: &str = "68656c6c6f2066726f6d20415753204564754b6974";
/// SHA-256 of the message; this is what the secure element actually signs.
pub const DIGEST_HEX: &str = "7d38de03dd4e59df9ff50595939faa2df53bc7366ddb5706e1bd49bfe675d531";
pub const PUBLIC_KEY_HEX: &str = "9A94C6A3F7922DB74E0552C09D9C5529438379D8797E8CE448DDB953F02A653097B23E971BE0EC700B07A255FED0FEFB4527FE4DEAEE071A7A99B40F8193AAC0";
pub const SIGNATURE_HEX: &str = "68D27AAC01D7768013E01D672958B7889C9F667DA1E7797CBFE21E23D7BE120892FE12388202CFE2B922D5EF57BBB5D377B9FE893A6DC0B084417846CCE0B266";

pub struct FixedInputs {
    pub message: Vec<u8>,
    pub public_key: ECPublicKey,
    pub signature: ECDSASignature,
}

pub fn fixed_inputs() -> Result<FixedInputs, EllipticError> {
    Ok(FixedInputs {
        message: decode_hex("message", MESSAGE_HEX)?,
        public_key: ECPublicKey::from_hex(PUBLIC_KEY_HEX)?,
        signature: ECDSASignature::from_hex(SIGNATURE_HEX)?,
    })
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct SweepReport {
    pub vector_verified: bool,
    pub mutations: usize,
    /// Mutated inputs that still verified. Must stay zero.
    pub accepted: Vec<String>,
}

impl SweepReport {
    pub fn passed(&self) -> bool {
        self.vector_verified && self.accepted.is_empty()
    }
}

/// Verifies the fixed vector, then flips every byte of every input one at a
/// time and checks that none of the mutants verify.
pub fn mutation_sweep(crypto: &EllipticCryptosystem) -> Result<SweepReport, EllipticError> {
    let fields = [
        decode_hex("message", MESSAGE_HEX)?,
        decode_hex("public key", PUBLIC_KEY_HEX)?,
        decode_hex("signature", SIGNATURE_HEX)?,
    ];

    let mut report = SweepReport {
        vector_verified: attempt(crypto, &fields),
        ..Default::default()
    };

    for (field, name) in ["message", "public key", "signature"].into_iter().enumerate() {
        for i in 0..fields[field].len() {
            let mut mutated = fields.clone();
            mutated[field][i] ^= 0xff;
            report.mutations += 1;
            if attempt(crypto, &mutated) {
                report.accepted.push(format!("{name} byte {i}"));
            }
        }
    }
    debug!("mutation sweep: {} mutations, {} accepted", report.mutations, report.accepted.len());
    Ok(report)
}

// Malformed inputs count as rejections.
fn attempt(crypto: &EllipticCryptosystem, [message, public_key, signature]: &[Vec<u8>; 3]) -> bool {
    let result = ECPublicKey::from_bytes(public_key).and_then(|public_key| {
        let signature = ECDSASignature::from_bytes(signature)?;
        crypto.verify(message, &signature, &public_key)
    });
    matches!(result, Ok(true))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sweep_rejects_every_mutation() {
        let crypto = EllipticCryptosystem::new_standard("P-256").unwrap();
        let report = mutation_sweep(&crypto).unwrap();
        assert!(report.vector_verified);
        assert_eq!(report.mutations, 21 + 64 + 64);
        assert!(report.accepted.is_empty(), "accepted: {:?}", report.accepted);
        assert!(report.passed());
    }

    #[test]
    fn sweep_fails_under_low_s_policy() {
        let crypto = EllipticCryptosystem::new_standard("P-256")
            .unwrap()
            .with_low_s_required(true);
        let report = mutation_sweep(&crypto).unwrap();
        assert!(!report.vector_verified);
        assert!(!report.passed());
    }
}
