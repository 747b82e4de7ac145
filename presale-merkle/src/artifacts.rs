//! Serialization adapters for whitelist outputs.
//!
//! The engine produces raw digests; consumers want either hex strings or
//! plain byte arrays in JSON, and tooling sometimes wants a compact binary
//! bundle. All three shapes are derived from the same [`Whitelist`].
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use presale_hash::{to_prefixed_hex, Digest, DIGEST_LEN, ZERO_DIGEST};
use serde::{Deserialize, Serialize};

use crate::{Identifier, Whitelist, WhitelistError};

/// Parse a 32-byte value from hex, with or without a `0x` prefix.
pub fn parse_digest(s: &str) -> Result<Digest, WhitelistError> {
    let s = s.trim();
    let clean = s.strip_prefix("0x").unwrap_or(s);
    if clean.len() != DIGEST_LEN * 2 {
        return Err(WhitelistError::InvalidDigest(format!(
            "expected {} hex chars, got {}",
            DIGEST_LEN * 2,
            clean.len()
        )));
    }
    let mut out = ZERO_DIGEST;
    hex::decode_to_slice(clean, &mut out)
        .map_err(|e| WhitelistError::InvalidDigest(e.to_string()))?;
    Ok(out)
}

/// A root as it appears in configuration: hex text or a list of bytes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RootInput {
    Hex(String),
    Bytes(Vec<u8>),
}

impl RootInput {
    pub fn resolve(&self) -> Result<Digest, WhitelistError> {
        match self {
            RootInput::Hex(s) => parse_digest(s),
            RootInput::Bytes(b) => b.as_slice().try_into().map_err(|_| {
                WhitelistError::InvalidDigest(format!("expected {DIGEST_LEN} bytes, got {}", b.len()))
            }),
        }
    }
}

impl Default for RootInput {
    fn default() -> Self { RootInput::Bytes(ZERO_DIGEST.to_vec()) }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProofEncoding {
    #[default]
    Hex,
    Bytes,
}

impl FromStr for ProofEncoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "hex" => Ok(ProofEncoding::Hex),
            "bytes" => Ok(ProofEncoding::Bytes),
            other => Err(format!("unknown proof encoding {other:?} (expected hex or bytes)")),
        }
    }
}

impl fmt::Display for ProofEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ProofEncoding::Hex => "hex",
            ProofEncoding::Bytes => "bytes",
        })
    }
}

/// One proof in its transport shape.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EncodedProof {
    /// Unprefixed lowercase hex per node.
    Hex(Vec<String>),
    Bytes(Vec<Digest>),
}

impl EncodedProof {
    pub fn encode(path: &[Digest], encoding: ProofEncoding) -> Self {
        match encoding {
            ProofEncoding::Hex => EncodedProof::Hex(path.iter().map(hex::encode).collect()),
            ProofEncoding::Bytes => EncodedProof::Bytes(path.to_vec()),
        }
    }

    pub fn decode(&self) -> Result<Vec<Digest>, WhitelistError> {
        match self {
            EncodedProof::Hex(nodes) => nodes.iter().map(|n| parse_digest(n)).collect(),
            EncodedProof::Bytes(nodes) => Ok(nodes.clone()),
        }
    }
}

/// JSON artifact published after a whitelist import.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WhitelistArtifacts {
    pub root: String,
    pub count: usize,
    pub encoding: ProofEncoding,
    pub whitelist: Vec<Identifier>,
    pub proofs: BTreeMap<Identifier, EncodedProof>,
}

impl WhitelistArtifacts {
    pub fn new(whitelist: &Whitelist, encoding: ProofEncoding) -> Self {
        let proofs = whitelist
            .proofs()
            .into_iter()
            .map(|(id, path)| (id, EncodedProof::encode(&path, encoding)))
            .collect();
        Self {
            root: to_prefixed_hex(&whitelist.root()),
            count: whitelist.len(),
            encoding,
            whitelist: whitelist.identifiers().to_vec(),
            proofs,
        }
    }

    pub fn root_digest(&self) -> Result<Digest, WhitelistError> { parse_digest(&self.root) }

    pub fn proof_for(&self, id: &Identifier) -> Result<Vec<Digest>, WhitelistError> {
        self.proofs
            .get(id)
            .ok_or_else(|| WhitelistError::NotFound(id.to_string()))?
            .decode()
    }

    pub fn to_json_pretty(&self) -> Result<String, WhitelistError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(text: &str) -> Result<Self, WhitelistError> {
        Ok(serde_json::from_str(text)?)
    }
}

/// Binary form: every leaf in order with its own proof, duplicates included.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhitelistBundle {
    pub root: Digest,
    pub entries: Vec<(Identifier, Vec<Digest>)>,
}

impl WhitelistBundle {
    pub fn new(whitelist: &Whitelist) -> Result<Self, WhitelistError> {
        let entries = whitelist
            .identifiers()
            .iter()
            .enumerate()
            .map(|(i, id)| whitelist.proof_at(i).map(|path| (*id, path)))
            .collect::<Result<Vec<_>, WhitelistError>>()?;
        Ok(Self { root: whitelist.root(), entries })
    }

    pub fn to_bincode(&self) -> Result<Vec<u8>, WhitelistError> { Ok(bincode::serialize(self)?) }

    pub fn from_bincode(bytes: &[u8]) -> Result<Self, WhitelistError> {
        Ok(bincode::deserialize(bytes)?)
    }
}
