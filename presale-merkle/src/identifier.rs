use std::fmt;
use std::str::FromStr;

use presale_hash::{leaf_hash, Digest};
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};

use crate::WhitelistError;

pub const IDENTIFIER_LEN: usize = 32;

/// A participant's 32-byte account key.
///
/// Ordering and equality are defined on the raw bytes. The base58 text form
/// is only a display/transport encoding.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Identifier([u8; IDENTIFIER_LEN]);

impl Identifier {
    pub const fn new(bytes: [u8; IDENTIFIER_LEN]) -> Self { Self(bytes) }

    pub fn as_bytes(&self) -> &[u8; IDENTIFIER_LEN] { &self.0 }

    /// Merkle leaf for this identifier.
    pub fn leaf(&self) -> Digest { leaf_hash(&self.0) }
}

impl From<[u8; IDENTIFIER_LEN]> for Identifier {
    fn from(bytes: [u8; IDENTIFIER_LEN]) -> Self { Self(bytes) }
}

impl TryFrom<&[u8]> for Identifier {
    type Error = WhitelistError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        let arr: [u8; IDENTIFIER_LEN] = bytes.try_into().map_err(|_| {
            WhitelistError::InvalidLength { expected: IDENTIFIER_LEN, actual: bytes.len() }
        })?;
        Ok(Self(arr))
    }
}

impl FromStr for Identifier {
    type Err = WhitelistError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = bs58::decode(s).into_vec().map_err(|source| WhitelistError::InvalidEncoding {
            value: s.to_string(),
            source,
        })?;
        Self::try_from(bytes.as_slice())
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&bs58::encode(self.0).into_string())
    }
}

impl fmt::Debug for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Identifier({self})")
    }
}

// Text formats carry base58, binary formats carry the raw 32 bytes.
impl Serialize for Identifier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.collect_str(self)
        } else {
            self.0.serialize(serializer)
        }
    }
}

impl<'de> Deserialize<'de> for Identifier {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            deserializer.deserialize_str(Base58Visitor)
        } else {
            <[u8; IDENTIFIER_LEN]>::deserialize(deserializer).map(Self)
        }
    }
}

struct Base58Visitor;

impl Visitor<'_> for Base58Visitor {
    type Value = Identifier;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a base58 encoded 32-byte identifier")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        v.parse().map_err(E::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base58_round_trip_keeps_bytes() {
        let id = Identifier::new([9u8; 32]);
        let text = id.to_string();
        assert_eq!(text.parse::<Identifier>().unwrap(), id);
    }

    #[test]
    fn system_program_key_is_all_zero() {
        let id: Identifier = "11111111111111111111111111111111".parse().unwrap();
        assert_eq!(id.as_bytes(), &[0u8; 32]);
    }

    #[test]
    fn rejects_short_and_long_keys() {
        let short = bs58::encode([1u8; 31]).into_string();
        let long = bs58::encode([1u8; 33]).into_string();
        for text in [short, long] {
            match text.parse::<Identifier>() {
                Err(WhitelistError::InvalidLength { expected: 32, .. }) => {}
                other => panic!("unexpected {other:?}"),
            }
        }
    }

    #[test]
    fn rejects_non_base58_characters() {
        // '0', 'O', 'I' and 'l' are outside the base58 alphabet
        assert!(matches!(
            "0OIl".parse::<Identifier>(),
            Err(WhitelistError::InvalidEncoding { .. })
        ));
    }

    #[test]
    fn ordering_follows_raw_bytes() {
        let mut a = [0u8; 32];
        let mut b = [0u8; 32];
        a[0] = 1;
        b[31] = 0xff;
        assert!(Identifier::new(b) < Identifier::new(a));
    }

    #[test]
    fn json_uses_base58_and_bincode_uses_bytes() {
        let id = Identifier::new([3u8; 32]);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{id}\""));
        assert_eq!(serde_json::from_str::<Identifier>(&json).unwrap(), id);

        let bin = bincode::serialize(&id).unwrap();
        assert_eq!(bin, vec![3u8; 32]);
        assert_eq!(bincode::deserialize::<Identifier>(&bin).unwrap(), id);
    }
}
