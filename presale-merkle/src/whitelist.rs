// File: presale-merkle/src/whitelist.rs
use std::collections::{BTreeMap, HashMap};

use presale_hash::Digest;
use rayon::prelude::*;
use tracing::info;

use crate::{Identifier, MerkleTree, WhitelistError};

/// Root plus the proof of every listed identifier.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Commitment {
    pub root: Digest,
    pub proofs: BTreeMap<Identifier, Vec<Digest>>,
}

/// Build the whitelist commitment for an ordered identifier list.
pub fn build_tree(identifiers: &[Identifier]) -> Commitment {
    Whitelist::build(identifiers.to_vec()).commitment()
}

/// A Merkle whitelist over participant identifiers, in input order.
#[derive(Clone, Debug)]
pub struct Whitelist {
    identifiers: Vec<Identifier>,
    tree: MerkleTree,
    // last occurrence wins for duplicates
    positions: HashMap<Identifier, usize>,
}

impl Whitelist {
    pub fn build(identifiers: Vec<Identifier>) -> Self {
        let leaves: Vec<Digest> = identifiers.par_iter().map(Identifier::leaf).collect();
        let tree = MerkleTree::build(leaves);
        let positions = identifiers.iter().enumerate().map(|(i, id)| (*id, i)).collect();
        info!(
            entries = identifiers.len(),
            depth = tree.depth(),
            root = %hex::encode(tree.root()),
            "built whitelist"
        );
        Self { identifiers, tree, positions }
    }

    pub fn root(&self) -> Digest { self.tree.root() }

    pub fn len(&self) -> usize { self.identifiers.len() }

    pub fn is_empty(&self) -> bool { self.identifiers.is_empty() }

    pub fn identifiers(&self) -> &[Identifier] { &self.identifiers }

    pub fn tree(&self) -> &MerkleTree { &self.tree }

    pub fn contains(&self, id: &Identifier) -> bool { self.positions.contains_key(id) }

    pub fn proof_at(&self, index: usize) -> Result<Vec<Digest>, WhitelistError> {
        self.tree
            .open(index)
            .ok_or(WhitelistError::IndexOutOfRange { index, len: self.len() })
    }

    pub fn proof_for(&self, id: &Identifier) -> Result<Vec<Digest>, WhitelistError> {
        let index = *self
            .positions
            .get(id)
            .ok_or_else(|| WhitelistError::NotFound(id.to_string()))?;
        self.proof_at(index)
    }

    /// Check `proof` for `id` against this whitelist's root.
    pub fn verify(&self, id: &Identifier, proof: &[Digest]) -> bool {
        MerkleTree::verify(&self.root(), &id.leaf(), proof)
    }

    pub fn proofs(&self) -> BTreeMap<Identifier, Vec<Digest>> {
        self.positions
            .iter()
            .filter_map(|(id, &i)| self.tree.open(i).map(|path| (*id, path)))
            .collect()
    }

    pub fn commitment(&self) -> Commitment {
        Commitment { root: self.root(), proofs: self.proofs() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use presale_hash::{hash_pair, ZERO_DIGEST};
    use rand::{rngs::StdRng, Rng, SeedableRng};

    fn random_ids(n: usize, seed: u64) -> Vec<Identifier> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..n).map(|_| Identifier::new(rng.gen())).collect()
    }

    #[test]
    fn empty_input_gives_zero_root_and_no_proofs() {
        let c = build_tree(&[]);
        assert_eq!(c.root, ZERO_DIGEST);
        assert!(c.proofs.is_empty());
    }

    #[test]
    fn single_identifier_root_is_its_leaf() {
        let id = Identifier::new([42u8; 32]);
        let c = build_tree(&[id]);
        assert_eq!(c.root, id.leaf());
        assert_eq!(c.proofs[&id], Vec::<Digest>::new());
    }

    #[test]
    fn three_identifiers_unpaired_sibling_is_itself() {
        let ids = random_ids(3, 7);
        let wl = Whitelist::build(ids.clone());
        let proof = wl.proof_for(&ids[2]).unwrap();
        assert_eq!(proof.len(), 2);
        assert_eq!(proof[0], ids[2].leaf());
        assert_eq!(proof[1], hash_pair(&ids[0].leaf(), &ids[1].leaf()));
        assert!(wl.verify(&ids[2], &proof));
    }

    #[test]
    fn every_proof_verifies_and_any_flipped_byte_fails() {
        for n in [2usize, 3, 5, 8, 13] {
            let ids = random_ids(n, n as u64);
            let c = build_tree(&ids);
            for id in &ids {
                let proof = &c.proofs[id];
                assert!(MerkleTree::verify(&c.root, &id.leaf(), proof));
                for node in 0..proof.len() {
                    for byte in 0..32 {
                        let mut bad = proof.clone();
                        bad[node][byte] ^= 0x01;
                        assert!(!MerkleTree::verify(&c.root, &id.leaf(), &bad));
                    }
                }
            }
        }
    }

    #[test]
    fn rebuild_is_deterministic() {
        let ids = random_ids(1000, 99);
        assert_eq!(build_tree(&ids), build_tree(&ids));
    }

    #[test]
    fn input_order_matters() {
        let ids = random_ids(3, 1);
        let mut reordered = ids.clone();
        reordered.swap(0, 2);
        assert_ne!(build_tree(&ids).root, build_tree(&reordered).root);
    }

    #[test]
    fn duplicates_each_get_a_leaf() {
        let ids = random_ids(2, 3);
        let dup = vec![ids[0], ids[1], ids[0]];
        let wl = Whitelist::build(dup.clone());
        assert_eq!(wl.tree().leaf_count(), 3);
        assert_eq!(wl.proofs().len(), 2);
        // both occurrences carry valid proofs
        assert!(wl.verify(&ids[0], &wl.proof_at(0).unwrap()));
        assert!(wl.verify(&ids[0], &wl.proof_at(2).unwrap()));
        assert_eq!(wl.proof_for(&ids[0]).unwrap(), wl.proof_at(2).unwrap());
    }

    #[test]
    fn unknown_identifier_is_not_found() {
        let ids = random_ids(4, 5);
        let wl = Whitelist::build(ids);
        let stranger = Identifier::new([0u8; 32]);
        assert!(matches!(wl.proof_for(&stranger), Err(WhitelistError::NotFound(_))));
        assert!(matches!(
            wl.proof_at(4),
            Err(WhitelistError::IndexOutOfRange { index: 4, len: 4 })
        ));
        let empty = Whitelist::build(Vec::new());
        assert!(matches!(empty.proof_for(&stranger), Err(WhitelistError::NotFound(_))));
    }

    #[test]
    fn large_list_builds_iteratively() {
        let ids = random_ids(50_000, 11);
        let wl = Whitelist::build(ids.clone());
        assert_eq!(wl.tree().depth(), 16);
        for i in [0usize, 1, 25_000, 49_999] {
            assert!(wl.verify(&ids[i], &wl.proof_at(i).unwrap()));
        }
    }
}
