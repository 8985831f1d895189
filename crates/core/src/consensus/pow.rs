use sha2::{Digest, Sha256};
use tinychain_common::config::protocol;

/// Proof-of-work miner
///
/// The predicate hashes the decimal texts of the previous proof and the
/// candidate concatenated, and requires `difficulty` leading zero hex digits.
/// Verification is O(1); finding a proof costs ~16^difficulty hash attempts
/// on average, which is what paces block creation.
#[derive(Debug, Clone)]
pub struct Miner {
    /// Required number of leading zero hex digits
    difficulty: usize,

    /// Optional cap on search iterations; `None` searches unbounded
    max_iterations: Option<u64>,
}

impl Miner {
    /// Create a miner with the given difficulty and iteration cap
    pub fn new(difficulty: usize, max_iterations: Option<u64>) -> Self {
        Self {
            difficulty,
            max_iterations,
        }
    }

    /// Whether `proof` is a valid successor to `last_proof`
    pub fn valid_proof(&self, last_proof: u64, proof: u64) -> bool {
        let digest = hex::encode(Sha256::digest(format!("{last_proof}{proof}")));
        match digest.as_bytes().get(..self.difficulty) {
            Some(prefix) => prefix.iter().all(|b| *b == b'0'),
            // A difficulty longer than the digest is unsatisfiable.
            None => false,
        }
    }

    /// Linear search for the first valid proof, starting at 0
    ///
    /// Returns `None` only when the configured iteration cap is reached
    /// before a proof is found; an uncapped search always terminates with a
    /// proof (almost surely).
    pub fn find_proof(&self, last_proof: u64) -> Option<u64> {
        let mut proof: u64 = 0;
        let mut iterations: u64 = 0;

        loop {
            if self.valid_proof(last_proof, proof) {
                return Some(proof);
            }

            iterations += 1;
            if let Some(cap) = self.max_iterations {
                if iterations >= cap {
                    return None;
                }
            }

            proof += 1;
        }
    }
}

impl Default for Miner {
    fn default() -> Self {
        Self::new(protocol::DEFAULT_DIFFICULTY, None)
    }
}
