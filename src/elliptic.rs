use crate::encoding;
use log::{debug, warn};
use p256::ecdsa::signature::hazmat::{PrehashSigner, PrehashVerifier};
use p256::ecdsa::{Signature, SigningKey, VerifyingKey};
use p256::elliptic_curve::sec1::Tag;
use p256::EncodedPoint;
use sha2::{Digest, Sha256};

/// Raw `X || Y` public key, as dumped by ATECC608 secure elements.
pub const RAW_PUBLIC_KEY_LEN: usize = 64;
pub const UNCOMPRESSED_PUBLIC_KEY_LEN: usize = 65;
pub const COMPRESSED_PUBLIC_KEY_LEN: usize = 33;
/// Raw `r || s` signature.
pub const RAW_SIGNATURE_LEN: usize = 64;
pub const PRIVATE_KEY_LEN: usize = 32;
/// bits2field refuses digests shorter than half the field size.
pub const MIN_DIGEST_LEN: usize = 16;

#[derive(thiserror::Error, Debug)]
pub enum EllipticError {
    #[error("the signature is malformed")]
    MalformedSignature,
    #[error("point is not on the curve")]
    NotOnCurve,
    #[error("the public key is malformed: {0}")]
    MalformedPublicKey(String),
    #[error("invalid key length: expected {expected}, got {got}")]
    InvalidKeyLength { expected: &'static str, got: usize },
    #[error("digest is too short: {got} bytes")]
    MalformedDigest { got: usize },
    #[error("the private key is not a valid scalar")]
    InvalidPrivateKey,
    #[error("invalid hex: {0}")]
    InvalidHex(String),
    #[error("unexpected error: {0}")]
    Other(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyEncoding {
    Raw,
    Uncompressed,
    Compressed,
}

#[derive(Clone, Debug)]
pub struct ECPublicKey {
    inner: VerifyingKey,
}

impl ECPublicKey {
    /// Accepts raw `X || Y` (64 bytes) as well as SEC1 uncompressed (65 bytes)
    /// and compressed (33 bytes) points.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, EllipticError> {
        let format = match bytes.len() {
            RAW_PUBLIC_KEY_LEN => KeyEncoding::Raw,
            UNCOMPRESSED_PUBLIC_KEY_LEN => KeyEncoding::Uncompressed,
            COMPRESSED_PUBLIC_KEY_LEN => KeyEncoding::Compressed,
            got => {
                return Err(EllipticError::InvalidKeyLength {
                    expected: "64, 65 or 33",
                    got,
                })
            }
        };
        debug!("decoding {:?} public key ({} bytes)", format, bytes.len());

        let point = if format == KeyEncoding::Raw {
            let mut tagged = Vec::with_capacity(UNCOMPRESSED_PUBLIC_KEY_LEN);
            tagged.push(0x04);
            tagged.extend_from_slice(bytes);
            EncodedPoint::from_bytes(&tagged)
        } else {
            EncodedPoint::from_bytes(bytes)
        }
        .map_err(|e| EllipticError::MalformedPublicKey(e.to_string()))?;

        // sec1 also takes the compact 0x05 form at 33 bytes
        let tag_matches = match format {
            KeyEncoding::Raw | KeyEncoding::Uncompressed => point.tag() == Tag::Uncompressed,
            KeyEncoding::Compressed => {
                matches!(point.tag(), Tag::CompressedEvenY | Tag::CompressedOddY)
            }
        };
        if !tag_matches {
            return Err(EllipticError::MalformedPublicKey(format!(
                "tag {:#04x} does not match a {} byte key",
                bytes[0],
                bytes.len()
            )));
        }

        // also rejects the identity
        let inner = VerifyingKey::from_encoded_point(&point).map_err(|_| EllipticError::NotOnCurve)?;
        Ok(ECPublicKey { inner })
    }

    pub fn from_hex(text: &str) -> Result<Self, EllipticError> {
        Self::from_bytes(&encoding::decode_hex("public key", text)?)
    }

    pub fn to_raw_hex(&self) -> String {
        let point = self.inner.to_encoded_point(false);
        hex::encode_upper(&point.as_bytes()[1..])
    }

    pub fn to_sec1_hex(&self, compress: bool) -> String {
        hex::encode(self.inner.to_encoded_point(compress).as_bytes())
    }
}

impl PartialEq for ECPublicKey {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

#[derive(Clone, Debug)]
pub struct ECDSASignature {
    inner: Signature,
}

impl ECDSASignature {
    /// ASN.1 DER, or fixed-size `r || s` when exactly 64 bytes long. A 64
    /// byte input that parses as DER is taken as DER.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, EllipticError> {
        let inner = if bytes.len() == RAW_SIGNATURE_LEN {
            match bytes[0] {
                0x30 => Signature::from_der(bytes).or_else(|_| Signature::from_slice(bytes)),
                _ => Signature::from_slice(bytes),
            }
        } else {
            debug!("decoding {} byte signature as DER", bytes.len());
            Signature::from_der(bytes)
        }
        .map_err(|_| EllipticError::MalformedSignature)?;
        Ok(ECDSASignature { inner })
    }

    pub fn from_hex(text: &str) -> Result<Self, EllipticError> {
        Self::from_bytes(&encoding::decode_hex("signature", text)?)
    }

    pub fn to_raw_hex(&self) -> String {
        hex::encode_upper(self.inner.to_bytes())
    }

    pub fn to_der_hex(&self) -> String {
        hex::encode(self.inner.to_der().as_bytes())
    }

    pub fn is_low_s(&self) -> bool {
        self.inner.normalize_s().is_none()
    }

    /// Rewrites `s` as `n - s` when it lies in the upper half of the order.
    pub fn normalize_s(&self) -> ECDSASignature {
        match self.inner.normalize_s() {
            Some(inner) => ECDSASignature { inner },
            None => self.clone(),
        }
    }
}

#[derive(Clone)]
pub struct ECPrivateKey {
    inner: SigningKey,
    public_key: ECPublicKey,
}

impl ECPrivateKey {
    fn new(inner: SigningKey) -> Self {
        let public_key = ECPublicKey {
            inner: *inner.verifying_key(),
        };
        ECPrivateKey { inner, public_key }
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, EllipticError> {
        if bytes.len() != PRIVATE_KEY_LEN {
            return Err(EllipticError::InvalidKeyLength {
                expected: "32",
                got: bytes.len(),
            });
        }
        let inner = SigningKey::from_slice(bytes).map_err(|_| EllipticError::InvalidPrivateKey)?;
        Ok(Self::new(inner))
    }

    pub fn from_hex(text: &str) -> Result<Self, EllipticError> {
        Self::from_bytes(&encoding::decode_hex("private key", text)?)
    }

    pub fn to_hex(&self) -> String {
        hex::encode_upper(self.inner.to_bytes())
    }

    pub fn get_public_key(&self) -> ECPublicKey {
        self.public_key.clone()
    }
}

pub struct EllipticCryptosystem {
    rng: rand::rngs::ThreadRng, // ThreadRng is a CSPRNG
    require_low_s: bool,
}

impl EllipticCryptosystem {
    pub fn new_standard(name: &str) -> Result<Self, EllipticError> {
        match name.to_ascii_lowercase().as_str() {
            "p-256" | "p256" | "nist256p" | "secp256r1" | "prime256v1" => Ok(EllipticCryptosystem {
                rng: rand::thread_rng(),
                require_low_s: false,
            }),
            _ => Err(EllipticError::Other(format!("unknown curve: {}", name))),
        }
    }

    /// Treat signatures with `s > n/2` as invalid.
    pub fn with_low_s_required(mut self, require_low_s: bool) -> Self {
        self.require_low_s = require_low_s;
        self
    }

    pub fn generate_private_key(&mut self) -> ECPrivateKey {
        ECPrivateKey::new(SigningKey::random(&mut self.rng))
    }

    /// Deterministic (RFC 6979) signature over a precomputed digest.
    pub fn sign(&self, hash: &[u8], private_key: &ECPrivateKey) -> Result<ECDSASignature, EllipticError> {
        check_digest(hash)?;
        let inner: Signature = private_key
            .inner
            .sign_prehash(hash)
            .map_err(|e| EllipticError::Other(e.to_string()))?;
        Ok(ECDSASignature { inner })
    }

    pub fn sign_message(&self, message: &[u8], private_key: &ECPrivateKey) -> Result<ECDSASignature, EllipticError> {
        self.sign(&Sha256::digest(message), private_key)
    }

    pub fn verify(&self, message: &[u8], signature: &ECDSASignature, public_key: &ECPublicKey) -> Result<bool, EllipticError> {
        let digest = Sha256::digest(message);
        debug!("message digest {}", hex::encode(digest));
        self.verify_digest(&digest, signature, public_key)
    }

    /// `Ok(false)` is a well-formed signature that does not match; `Err` is
    /// input that cannot be verified at all.
    pub fn verify_digest(&self, hash: &[u8], signature: &ECDSASignature, public_key: &ECPublicKey) -> Result<bool, EllipticError> {
        check_digest(hash)?;
        if self.require_low_s && !signature.is_low_s() {
            warn!("rejecting high-S signature");
            return Ok(false);
        }
        Ok(public_key.inner.verify_prehash(hash, &signature.inner).is_ok())
    }
}

fn check_digest(hash: &[u8]) -> Result<(), EllipticError> {
    if hash.len() < MIN_DIGEST_LEN {
        return Err(EllipticError::MalformedDigest { got: hash.len() });
    }
    Ok(())
}
