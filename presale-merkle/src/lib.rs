// File: presale-merkle/src/lib.rs
//! Merkle whitelist engine.
//!
//! Turns an ordered list of 32-byte participant identifiers into a root and
//! per-identifier inclusion proofs that the on-chain verifier accepts:
//! keccak256 leaves over the raw key bytes, sorted pair hashing, and an odd
//! trailing node hashed with itself.
mod artifacts;
mod error;
mod identifier;
mod list;
mod tree;
mod whitelist;

pub use artifacts::{
    parse_digest, EncodedProof, ProofEncoding, RootInput, WhitelistArtifacts, WhitelistBundle,
};
pub use error::WhitelistError;
pub use identifier::{Identifier, IDENTIFIER_LEN};
pub use list::{parse_identifier_list, read_identifier_list};
pub use tree::{admits, MerkleTree};
pub use whitelist::{build_tree, Commitment, Whitelist};

pub use presale_hash::{Digest, DIGEST_LEN, ZERO_DIGEST};
