// File: presale-merkle/src/tree.rs
use presale_hash::{hash_pair, Digest, ZERO_DIGEST};
use rayon::prelude::*;
use tracing::{debug, trace};

/// Binary Merkle tree with sorted pair hashing.
///
/// Levels are stored bottom-up; `levels[0]` holds the leaves in input order.
/// A level with an odd node count pairs its last node with itself.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MerkleTree {
    levels: Vec<Vec<Digest>>,
}

impl MerkleTree {
    pub fn build(leaves: Vec<Digest>) -> Self {
        if leaves.is_empty() {
            return Self::default();
        }
        let mut levels = vec![leaves];
        loop {
            let current = &levels[levels.len() - 1];
            if current.len() <= 1 {
                break;
            }
            let next: Vec<Digest> = current.par_chunks(2).map(parent).collect();
            trace!(level = levels.len(), nodes = next.len(), "hashed level");
            levels.push(next);
        }
        debug!(leaves = levels[0].len(), depth = levels.len() - 1, "built merkle tree");
        Self { levels }
    }

    /// Root of the tree; all zeroes when there are no leaves.
    pub fn root(&self) -> Digest {
        self.levels
            .last()
            .and_then(|top| top.first())
            .copied()
            .unwrap_or(ZERO_DIGEST)
    }

    pub fn leaf_count(&self) -> usize {
        self.levels.first().map_or(0, Vec::len)
    }

    /// Number of sibling nodes in every proof.
    pub fn depth(&self) -> usize {
        self.levels.len().saturating_sub(1)
    }

    pub fn leaves(&self) -> &[Digest] {
        self.levels.first().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn levels(&self) -> &[Vec<Digest>] {
        &self.levels
    }

    /// Sibling path for the leaf at `idx`, or `None` when out of range.
    pub fn open(&self, mut idx: usize) -> Option<Vec<Digest>> {
        if idx >= self.leaf_count() {
            return None;
        }
        let mut path = Vec::with_capacity(self.depth());
        for level in &self.levels[..self.depth()] {
            // the unpaired tail node is its own sibling
            let sibling = level.get(idx ^ 1).unwrap_or(&level[idx]);
            path.push(*sibling);
            idx >>= 1;
        }
        Some(path)
    }

    /// Recompute the root from `leaf` and `path` and compare.
    ///
    /// Sorted pair hashing means no left/right bits are needed.
    pub fn verify(root: &Digest, leaf: &Digest, path: &[Digest]) -> bool {
        let computed = path.iter().fold(*leaf, |acc, sibling| hash_pair(&acc, sibling));
        &computed == root
    }
}

fn parent(pair: &[Digest]) -> Digest {
    let left = &pair[0];
    let right = pair.get(1).unwrap_or(left);
    hash_pair(left, right)
}

/// Whitelist gate as applied by the on-chain program: a zero root disables
/// gating and admits everyone.
pub fn admits(root: &Digest, leaf: &Digest, path: &[Digest]) -> bool {
    root == &ZERO_DIGEST || MerkleTree::verify(root, leaf, path)
}
