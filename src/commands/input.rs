use anyhow::{Context, Result};
use clap::Args;
use sha2::{Digest, Sha256};

use crate::encoding::decode_hex;

/**
    What gets signed or verified: exactly one of a hex message, a text
    message, or a precomputed SHA-256 digest.
*/
#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct MessageInput {
    /// Message bytes as hex.
    #[arg(long)]
    pub message: Option<String>,
    /// Message as UTF-8 text.
    #[arg(long)]
    pub message_text: Option<String>,
    /// Precomputed SHA-256 digest as hex (skips hashing).
    #[arg(long)]
    pub digest: Option<String>,
}

impl MessageInput {
    /// Resolves the input to the digest that is actually signed.
    pub fn digest(&self) -> Result<Vec<u8>> {
        if let Some(digest) = &self.digest {
            return decode_hex("digest", digest).context("failed to decode digest");
        }
        let message = match (&self.message, &self.message_text) {
            (Some(hex), _) => decode_hex("message", hex).context("failed to decode message")?,
            (None, Some(text)) => text.as_bytes().to_vec(),
            (None, None) => anyhow::bail!("no message given"),
        };
        Ok(Sha256::digest(&message).to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vectors::{DIGEST_HEX, MESSAGE_HEX};

    fn input(message: Option<&str>, message_text: Option<&str>, digest: Option<&str>) -> MessageInput {
        MessageInput {
            message: message.map(str::to_owned),
            message_text: message_text.map(str::to_owned),
            digest: digest.map(str::to_owned),
        }
    }

    #[test]
    fn all_forms_resolve_to_the_same_digest() {
        let expected = hex::decode(DIGEST_HEX).unwrap();
        assert_eq!(input(Some(MESSAGE_HEX), None, None).digest().unwrap(), expected);
        assert_eq!(
            input(None, Some("hello from AWS EduKit"), None).digest().unwrap(),
            expected
        );
        assert_eq!(input(None, None, Some(DIGEST_HEX)).digest().unwrap(), expected);
    }

    #[test]
    fn bad_hex_is_reported() {
        let err = input(Some("xyz"), None, None).digest().unwrap_err();
        assert!(format!("{err:#}").contains("message"));
    }
}
