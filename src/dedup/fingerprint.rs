//! Group fingerprinting.
//!
//! A fingerprint is a 32-byte digest of the normalized lines joined by `\n`.
//! SHA-256 is the default so fingerprints match those produced by other
//! tools hashing the same text; BLAKE3 is faster on large exports.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::groups::Fingerprint;
use super::normalizer::NormalizedGroup;

/// Digest used for group fingerprints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    /// SHA-256
    #[default]
    Sha256,
    /// BLAKE3
    Blake3,
}

impl std::fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HashAlgorithm::Sha256 => write!(f, "sha256"),
            HashAlgorithm::Blake3 => write!(f, "blake3"),
        }
    }
}

/// Computes fingerprints for normalized groups.
#[derive(Debug, Clone, Copy, Default)]
pub struct Fingerprinter {
    algorithm: HashAlgorithm,
}

impl Fingerprinter {
    /// Create a fingerprinter using `algorithm`.
    #[must_use]
    pub fn new(algorithm: HashAlgorithm) -> Self {
        Self { algorithm }
    }

    /// The configured digest.
    #[must_use]
    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    /// Fingerprint a normalized group.
    ///
    /// Returns `None` for an empty group, which is never deduplicated.
    #[must_use]
    pub fn fingerprint(&self, normalized: &NormalizedGroup) -> Option<Fingerprint> {
        if normalized.is_empty() {
            return None;
        }
        Some(self.digest(normalized.joined().as_bytes()))
    }

    /// Digest raw bytes with the configured algorithm.
    #[must_use]
    pub fn digest(&self, data: &[u8]) -> Fingerprint {
        match self.algorithm {
            HashAlgorithm::Sha256 => {
                let mut hasher = Sha256::new();
                hasher.update(data);
                Fingerprint::from_bytes(hasher.finalize().into())
            }
            HashAlgorithm::Blake3 => Fingerprint::from_bytes(*blake3::hash(data).as_bytes()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalized(lines: &[&str]) -> NormalizedGroup {
        NormalizedGroup::from(lines.iter().map(|s| s.to_string()).collect::<Vec<_>>())
    }

    #[test]
    fn test_empty_group_has_no_fingerprint() {
        let fingerprinter = Fingerprinter::default();
        assert!(fingerprinter.fingerprint(&NormalizedGroup::default()).is_none());
    }

    #[test]
    fn test_sha256_known_digest() {
        let fingerprinter = Fingerprinter::new(HashAlgorithm::Sha256);
        let fp = fingerprinter.fingerprint(&normalized(&["abc"])).unwrap();
        assert_eq!(
            fp.to_hex(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_lines_joined_with_newline() {
        let fingerprinter = Fingerprinter::default();
        let joined = fingerprinter.fingerprint(&normalized(&["a", "b"])).unwrap();
        assert_eq!(joined, fingerprinter.digest(b"a\nb"));
        assert_ne!(joined, fingerprinter.digest(b"ab"));
    }

    #[test]
    fn test_deterministic() {
        let fingerprinter = Fingerprinter::new(HashAlgorithm::Blake3);
        let group = normalized(&["Hello", "world"]);
        assert_eq!(
            fingerprinter.fingerprint(&group),
            fingerprinter.fingerprint(&group)
        );
    }

    #[test]
    fn test_algorithms_differ() {
        let group = normalized(&["Hello"]);
        let sha = Fingerprinter::new(HashAlgorithm::Sha256).fingerprint(&group);
        let blake = Fingerprinter::new(HashAlgorithm::Blake3).fingerprint(&group);
        assert_ne!(sha, blake);
    }

    #[test]
    fn test_blake3_matches_reference() {
        let fingerprinter = Fingerprinter::new(HashAlgorithm::Blake3);
        let fp = fingerprinter.digest(b"Hello");
        assert_eq!(fp.as_bytes(), blake3::hash(b"Hello").as_bytes());
    }
}
