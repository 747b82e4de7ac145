// File: presale-hash/src/lib.rs
//! Keccak-256 primitives shared by the whitelist tooling.
//!
//! The byte layout here has to match the on-chain verifier exactly:
//! leaves are the bare hash of the identifier bytes (no domain prefix),
//! and interior nodes hash the two children in ascending byte order.
use sha3::{Digest as _, Keccak256};

pub const DIGEST_LEN: usize = 32;

/// A 32-byte Keccak-256 output.
pub type Digest = [u8; DIGEST_LEN];

/// Root published when the whitelist is empty or disabled.
pub const ZERO_DIGEST: Digest = [0u8; DIGEST_LEN];

#[inline]
pub fn keccak256(data: &[u8]) -> Digest {
    Keccak256::digest(data).into()
}

/// Leaf hash of a participant identifier's raw bytes.
#[inline]
pub fn leaf_hash(identifier: &[u8]) -> Digest {
    keccak256(identifier)
}

/// Hash two sibling nodes, smaller one first.
///
/// Equal inputs (the odd-node self pairing) simply hash `a || a`.
#[inline]
pub fn hash_pair(a: &Digest, b: &Digest) -> Digest {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    Keccak256::new()
        .chain_update(lo)
        .chain_update(hi)
        .finalize()
        .into()
}

/// `0x`-prefixed lowercase hex, the transport form for roots.
pub fn to_prefixed_hex(digest: &Digest) -> String {
    format!("0x{}", hex::encode(digest))
}
