use crate::elliptic::EllipticError;

/// Decodes a hex literal, ignoring ASCII whitespace and an optional `0x`
/// prefix. `label` names the field in error messages.
pub fn decode_hex(label: &str, text: &str) -> Result<Vec<u8>, EllipticError> {
    let trimmed = text.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    let compact: String = digits.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    hex::decode(&compact).map_err(|e| EllipticError::InvalidHex(format!("{label}: {e}")))
}
