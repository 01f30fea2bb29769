use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use tiny_keccak::{Hasher, Keccak};

use crate::error::AddressError;

/// Hex digits in a zero-padded address.
pub const ADDRESS_HEX_LEN: usize = 64;

/// A validated Starknet address in checksum-normalized form.
///
/// Construction goes through [`Address::parse`], so every value of this type
/// holds a field element below 2^251 rendered as `0x` plus 64 checksum-cased
/// hex digits. Anything that fails parsing, the range bound, or checksum
/// validation never becomes an `Address`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address {
    checksum: String,
}

impl Address {
    /// Parse and checksum-normalize a raw address string.
    ///
    /// Accepts an optional `0x` prefix and any amount of left zero-padding.
    /// An all-lowercase (or all-uppercase) input carries no checksum claim
    /// and is normalized as-is; a mixed-case input must match its computed
    /// checksum casing exactly.
    pub fn parse(raw: &str) -> Result<Self, AddressError> {
        let invalid = || AddressError::InvalidChecksum {
            input: raw.to_string(),
        };

        let trimmed = raw.trim();
        let hex_part = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);

        if hex_part.is_empty()
            || hex_part.len() > ADDRESS_HEX_LEN
            || !hex_part.bytes().all(|b| b.is_ascii_hexdigit())
        {
            return Err(invalid());
        }

        let value = BigUint::parse_bytes(hex_part.to_ascii_lowercase().as_bytes(), 16)
            .ok_or_else(invalid)?;

        // Addresses are field elements below 2^251.
        if value >= (BigUint::from(1u8) << 251usize) {
            return Err(invalid());
        }

        let checksum = checksum_hex(&value);

        // Mixed case claims a checksum and must reproduce it exactly.
        let has_upper = hex_part.bytes().any(|b| b.is_ascii_uppercase());
        let has_lower = hex_part.bytes().any(|b| b.is_ascii_lowercase());
        if has_upper && has_lower {
            let padded = format!("{hex_part:0>ADDRESS_HEX_LEN$}");
            if padded != checksum {
                return Err(invalid());
            }
        }

        Ok(Self {
            checksum: format!("0x{checksum}"),
        })
    }

    /// Whether `candidate` is already in exact checksum casing.
    pub fn is_checksum_valid(candidate: &str) -> bool {
        let Ok(parsed) = Self::parse(candidate) else {
            return false;
        };
        let trimmed = candidate.trim();
        let hex_part = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);
        format!("0x{hex_part:0>ADDRESS_HEX_LEN$}") == parsed.checksum
    }

    /// The full checksum form: `0x` plus 64 cased hex digits.
    pub fn as_str(&self) -> &str {
        &self.checksum
    }

    /// Lowercase form, used as lookup key and identicon seed.
    pub fn lowercase(&self) -> String {
        self.checksum.to_lowercase()
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.checksum)
    }
}

impl TryFrom<String> for Address {
    type Error = AddressError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Address> for String {
    fn from(address: Address) -> Self {
        address.checksum
    }
}

/// Checksum casing over the padded lowercase hex digits.
///
/// The digest is keccak-256 of the minimal big-endian byte encoding of the
/// address value; hex digit `i` is uppercased iff nibble `i` of the digest
/// is >= 8.
fn checksum_hex(value: &BigUint) -> String {
    let mut hasher = Keccak::v256();
    hasher.update(&value.to_bytes_be());
    let mut hash = [0u8; 32];
    hasher.finalize(&mut hash);

    let padded = format!("{:0>ADDRESS_HEX_LEN$}", value.to_str_radix(16));
    let mut out = String::with_capacity(ADDRESS_HEX_LEN);
    for (i, c) in padded.chars().enumerate() {
        let nibble = if i % 2 == 0 {
            hash[i / 2] >> 4
        } else {
            hash[i / 2] & 0x0f
        };
        if nibble >= 8 {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c);
        }
    }
    out
}
