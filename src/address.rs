//! SS58 account identifiers.
//!
//! An [`AccountId32`] is the raw 32-byte public key; the SS58 string form
//! carries a network prefix and a blake2b checksum on top of it. Recipient
//! addresses are decoded (and therefore checksum-verified) before any call
//! is built, so a mistyped address is a construction-time error attributed
//! to its entry rather than a dispatch failure.

use blake2::{Blake2b512, Digest};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de::Error as _};
use std::{fmt, str::FromStr};

/// Polkadot mainnet prefix.
pub const POLKADOT_PREFIX: u16 = 0;
/// Kusama prefix.
pub const KUSAMA_PREFIX: u16 = 2;
/// Astar prefix.
pub const ASTAR_PREFIX: u16 = 5;
/// Generic Substrate prefix, used when no network is implied.
pub const GENERIC_PREFIX: u16 = 42;

/// Prefix of the SS58 checksum preimage.
const SS58_PREIMAGE_PREFIX: &[u8] = b"SS58PRE";
/// Length of the checksum for 32-byte account ids.
const CHECKSUM_LEN: usize = 2;

/// Errors produced while decoding an SS58 address.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AddressError {
    /// The string is not valid base58.
    #[error("invalid address `{0}`: not base58")]
    BadBase58(String),
    /// The decoded payload has an unexpected length.
    #[error("invalid address `{0}`: unexpected payload length")]
    BadLength(String),
    /// The network prefix byte is reserved or unsupported.
    #[error("invalid address `{0}`: reserved network prefix")]
    BadPrefix(String),
    /// The checksum does not match the payload.
    #[error("invalid address `{0}`: checksum mismatch")]
    BadChecksum(String),
    /// A network prefix outside the 14-bit SS58 range.
    #[error("network prefix {0} is out of the SS58 range")]
    PrefixOutOfRange(u16),
}

/// A 32-byte ledger account identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AccountId32(pub [u8; 32]);

impl AccountId32 {
    /// Decodes an SS58 string, returning the account and its network prefix.
    pub fn from_ss58(address: &str) -> Result<(Self, u16), AddressError> {
        let data = bs58::decode(address)
            .into_vec()
            .map_err(|_| AddressError::BadBase58(address.to_owned()))?;

        if data.len() < 2 {
            return Err(AddressError::BadLength(address.to_owned()));
        }
        let (prefix_len, prefix) = match data[0] {
            0..=63 => (1, u16::from(data[0])),
            64..=127 => {
                // Two-byte prefix: 14 bits spread over the low bits of both
                // bytes, per the SS58 registry format.
                let lower = (data[0] << 2) | (data[1] >> 6);
                let upper = data[1] & 0b0011_1111;
                (2, u16::from(lower) | (u16::from(upper) << 8))
            }
            _ => return Err(AddressError::BadPrefix(address.to_owned())),
        };

        if data.len() != prefix_len + 32 + CHECKSUM_LEN {
            return Err(AddressError::BadLength(address.to_owned()));
        }

        let (payload, checksum) = data.split_at(prefix_len + 32);
        if ss58_checksum(payload) != checksum {
            return Err(AddressError::BadChecksum(address.to_owned()));
        }

        let mut key = [0u8; 32];
        key.copy_from_slice(&payload[prefix_len..]);
        Ok((Self(key), prefix))
    }

    /// Encodes the account as an SS58 string with the given network prefix.
    pub fn to_ss58(&self, prefix: u16) -> Result<String, AddressError> {
        let mut data = Vec::with_capacity(2 + 32 + CHECKSUM_LEN);
        match prefix {
            0..=63 => data.push(prefix as u8),
            64..=16_383 => {
                let first = ((prefix & 0b0000_0000_1111_1100) as u8) >> 2;
                let second = ((prefix >> 8) as u8) | (((prefix & 0b11) as u8) << 6);
                data.push(first | 0b0100_0000);
                data.push(second);
            }
            _ => return Err(AddressError::PrefixOutOfRange(prefix)),
        }
        data.extend_from_slice(&self.0);

        let checksum = ss58_checksum(&data);
        data.extend_from_slice(&checksum);
        Ok(bs58::encode(data).into_string())
    }
}

/// First two bytes of `blake2b-512("SS58PRE" ++ payload)`.
fn ss58_checksum(payload: &[u8]) -> [u8; CHECKSUM_LEN] {
    let mut hasher = Blake2b512::new();
    hasher.update(SS58_PREIMAGE_PREFIX);
    hasher.update(payload);
    let hash = hasher.finalize();

    let mut checksum = [0u8; CHECKSUM_LEN];
    checksum.copy_from_slice(&hash[..CHECKSUM_LEN]);
    checksum
}

impl FromStr for AccountId32 {
    type Err = AddressError;

    /// Parses an SS58 address with any network prefix.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_ss58(s).map(|(account, _)| account)
    }
}

impl fmt::Display for AccountId32 {
    /// Formats with the generic Substrate prefix; the prefix is cosmetic and
    /// carries no on-chain meaning.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The generic prefix is single-byte and cannot fail to encode.
        f.write_str(&self.to_ss58(GENERIC_PREFIX).expect("generic prefix is in range"))
    }
}

impl Serialize for AccountId32 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for AccountId32 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Well-known development account `//Alice`.
    const ALICE_SS58: &str = "5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY";
    const ALICE_KEY: [u8; 32] = [
        0xd4, 0x35, 0x93, 0xc7, 0x15, 0xfd, 0xd3, 0x1c, 0x61, 0x14, 0x1a, 0xbd, 0x04, 0xa9,
        0x9f, 0xd6, 0x82, 0x2c, 0x85, 0x58, 0x85, 0x4c, 0xcd, 0xe3, 0x9a, 0x56, 0x84, 0xe7,
        0xa5, 0x6d, 0xa2, 0x7d,
    ];

    #[test]
    fn decodes_known_account() {
        let (account, prefix) = AccountId32::from_ss58(ALICE_SS58).unwrap();
        assert_eq!(account.0, ALICE_KEY);
        assert_eq!(prefix, GENERIC_PREFIX);
    }

    #[test]
    fn encode_decode_roundtrip_across_prefixes() {
        let account = AccountId32(ALICE_KEY);
        for prefix in [POLKADOT_PREFIX, KUSAMA_PREFIX, ASTAR_PREFIX, GENERIC_PREFIX, 2254] {
            let encoded = account.to_ss58(prefix).unwrap();
            let (decoded, decoded_prefix) = AccountId32::from_ss58(&encoded).unwrap();
            assert_eq!(decoded, account);
            assert_eq!(decoded_prefix, prefix);
        }
    }

    #[test]
    fn display_uses_generic_prefix() {
        assert_eq!(AccountId32(ALICE_KEY).to_string(), ALICE_SS58);
    }

    #[test]
    fn rejects_corrupted_checksum() {
        // Flip the final character.
        let mut corrupted = ALICE_SS58.to_owned();
        corrupted.pop();
        corrupted.push('Z');
        assert!(matches!(
            AccountId32::from_ss58(&corrupted),
            Err(AddressError::BadChecksum(_) | AddressError::BadBase58(_))
        ));
    }

    #[test]
    fn rejects_truncated_payload() {
        let encoded = bs58::encode(&[42u8, 1, 2, 3]).into_string();
        assert_eq!(
            AccountId32::from_ss58(&encoded),
            Err(AddressError::BadLength(encoded.clone()))
        );
    }

    #[test]
    fn rejects_out_of_range_prefix() {
        assert_eq!(
            AccountId32(ALICE_KEY).to_ss58(20_000),
            Err(AddressError::PrefixOutOfRange(20_000))
        );
    }

    #[test]
    fn serde_roundtrip() {
        let account = AccountId32(ALICE_KEY);
        let json = serde_json::to_string(&account).unwrap();
        assert_eq!(json, format!("\"{ALICE_SS58}\""));
        assert_eq!(serde_json::from_str::<AccountId32>(&json).unwrap(), account);
    }
}
