//! Cipher configuration
//!
//! [`CipherOptions`] is the immutable configuration record an
//! [`AuthenticatedCipher`](super::AuthenticatedCipher) captures at
//! construction. It can be built with chained setters, from an ordered list of
//! [`CipherOption`] values, or deserialised from a config file. Later settings
//! override earlier ones touching the same field.
//!
//! The secret is deliberately not part of this record.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::core::{CipherError, Operation};

/// Algorithm used when no option selects one.
pub const DEFAULT_ALGORITHM: AesAlgorithm = AesAlgorithm::Aes256;

/// The 96-bit nonce length recommended for GCM (NIST SP 800-38D).
pub const GCM_STANDARD_NONCE_LENGTH: usize = 12;

/// Nonce length used when no option sets one.
pub const DEFAULT_NONCE_LENGTH: usize = GCM_STANDARD_NONCE_LENGTH;

/// HKDF hash used when no option selects one.
pub const DEFAULT_KDF_HASH: KdfHash = KdfHash::Sha256;

/// Smallest nonce length GCM can be built with. There is no upper bound
/// beyond what one HKDF expansion can produce.
pub const MIN_NONCE_LENGTH: usize = 1;

/// AES variant; selects the derived key length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AesAlgorithm {
    #[serde(rename = "AES128")]
    Aes128,
    #[serde(rename = "AES192")]
    Aes192,
    #[serde(rename = "AES256")]
    Aes256,
}

impl AesAlgorithm {
    /// Key length in bytes: 16, 24 or 32.
    pub const fn key_length(self) -> usize {
        match self {
            AesAlgorithm::Aes128 => 16,
            AesAlgorithm::Aes192 => 24,
            AesAlgorithm::Aes256 => 32,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            AesAlgorithm::Aes128 => "AES128",
            AesAlgorithm::Aes192 => "AES192",
            AesAlgorithm::Aes256 => "AES256",
        }
    }
}

impl Default for AesAlgorithm {
    fn default() -> Self {
        DEFAULT_ALGORITHM
    }
}

impl fmt::Display for AesAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for AesAlgorithm {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_label(s).as_str() {
            "AES128" => Ok(AesAlgorithm::Aes128),
            "AES192" => Ok(AesAlgorithm::Aes192),
            "AES256" => Ok(AesAlgorithm::Aes256),
            _ => Err(UnknownLabel(s.to_string())),
        }
    }
}

/// Hash function underlying HKDF.
///
/// SHA-1 is accepted only so data produced by peers configured with it stays
/// readable; prefer the SHA-2 or SHA-3 families for new deployments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KdfHash {
    #[serde(rename = "SHA-1")]
    Sha1,
    #[serde(rename = "SHA-224")]
    Sha224,
    #[serde(rename = "SHA-256")]
    Sha256,
    #[serde(rename = "SHA-384")]
    Sha384,
    #[serde(rename = "SHA-512")]
    Sha512,
    #[serde(rename = "SHA3-224")]
    Sha3_224,
    #[serde(rename = "SHA3-256")]
    Sha3_256,
    #[serde(rename = "SHA3-384")]
    Sha3_384,
    #[serde(rename = "SHA3-512")]
    Sha3_512,
}

impl KdfHash {
    /// Digest size in bytes.
    pub const fn output_size(self) -> usize {
        match self {
            KdfHash::Sha1 => 20,
            KdfHash::Sha224 | KdfHash::Sha3_224 => 28,
            KdfHash::Sha256 | KdfHash::Sha3_256 => 32,
            KdfHash::Sha384 | KdfHash::Sha3_384 => 48,
            KdfHash::Sha512 | KdfHash::Sha3_512 => 64,
        }
    }

    /// Most bytes one HKDF expansion can produce (RFC 5869: 255 blocks).
    pub const fn max_output_length(self) -> usize {
        255 * self.output_size()
    }

    pub const fn label(self) -> &'static str {
        match self {
            KdfHash::Sha1 => "SHA-1",
            KdfHash::Sha224 => "SHA-224",
            KdfHash::Sha256 => "SHA-256",
            KdfHash::Sha384 => "SHA-384",
            KdfHash::Sha512 => "SHA-512",
            KdfHash::Sha3_224 => "SHA3-224",
            KdfHash::Sha3_256 => "SHA3-256",
            KdfHash::Sha3_384 => "SHA3-384",
            KdfHash::Sha3_512 => "SHA3-512",
        }
    }
}

impl Default for KdfHash {
    fn default() -> Self {
        DEFAULT_KDF_HASH
    }
}

impl fmt::Display for KdfHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for KdfHash {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_label(s).as_str() {
            "SHA1" => Ok(KdfHash::Sha1),
            "SHA224" => Ok(KdfHash::Sha224),
            "SHA256" => Ok(KdfHash::Sha256),
            "SHA384" => Ok(KdfHash::Sha384),
            "SHA512" => Ok(KdfHash::Sha512),
            "SHA3224" => Ok(KdfHash::Sha3_224),
            "SHA3256" => Ok(KdfHash::Sha3_256),
            "SHA3384" => Ok(KdfHash::Sha3_384),
            "SHA3512" => Ok(KdfHash::Sha3_512),
            _ => Err(UnknownLabel(s.to_string())),
        }
    }
}

/// Returned when parsing an algorithm or hash label fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown label: {0:?}")]
pub struct UnknownLabel(pub String);

fn normalize_label(s: &str) -> String {
    s.chars()
        .filter(|c| *c != '-' && *c != '_')
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// A single configuration mutation, applied in list order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CipherOption {
    Algorithm(AesAlgorithm),
    /// Values other than 12 deviate from the GCM recommendation.
    NonceLength(usize),
    KdfHash(KdfHash),
    KdfInfo(Vec<u8>),
}

/// Immutable cipher configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CipherOptions {
    algorithm: AesAlgorithm,
    nonce_length: usize,
    kdf_hash: KdfHash,
    kdf_info: Vec<u8>,
}

impl Default for CipherOptions {
    fn default() -> Self {
        Self {
            algorithm: DEFAULT_ALGORITHM,
            nonce_length: DEFAULT_NONCE_LENGTH,
            kdf_hash: DEFAULT_KDF_HASH,
            kdf_info: Vec::new(),
        }
    }
}

impl CipherOptions {
    /// Defaults: AES-256, 12-byte nonce, HKDF-SHA-256, empty info.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn aes128(self) -> Self {
        self.with_algorithm(AesAlgorithm::Aes128)
    }

    pub fn aes192(self) -> Self {
        self.with_algorithm(AesAlgorithm::Aes192)
    }

    pub fn aes256(self) -> Self {
        self.with_algorithm(AesAlgorithm::Aes256)
    }

    pub fn with_algorithm(mut self, algorithm: AesAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Set the GCM nonce length in bytes.
    ///
    /// 12 is the standard length. Any other positive value is accepted and
    /// switches GCM to deriving its initial counter through GHASH, which is
    /// interoperable but outside the recommended profile. Zero fails when the
    /// AEAD is built; a length HKDF cannot produce fails at derivation.
    pub fn with_nonce_length(mut self, nonce_length: usize) -> Self {
        self.nonce_length = nonce_length;
        self
    }

    pub fn with_kdf_hash(mut self, kdf_hash: KdfHash) -> Self {
        self.kdf_hash = kdf_hash;
        self
    }

    /// Set the HKDF info (context/application binding) bytes.
    pub fn with_kdf_info(mut self, info: impl Into<Vec<u8>>) -> Self {
        self.kdf_info = info.into();
        self
    }

    /// Apply one option; overrides whatever the field held before.
    pub fn apply(self, option: CipherOption) -> Self {
        match option {
            CipherOption::Algorithm(algorithm) => self.with_algorithm(algorithm),
            CipherOption::NonceLength(len) => self.with_nonce_length(len),
            CipherOption::KdfHash(hash) => self.with_kdf_hash(hash),
            CipherOption::KdfInfo(info) => self.with_kdf_info(info),
        }
    }

    pub fn algorithm(&self) -> AesAlgorithm {
        self.algorithm
    }

    pub fn key_length(&self) -> usize {
        self.algorithm.key_length()
    }

    pub fn nonce_length(&self) -> usize {
        self.nonce_length
    }

    pub fn kdf_hash(&self) -> KdfHash {
        self.kdf_hash
    }

    pub fn kdf_info(&self) -> &[u8] {
        &self.kdf_info
    }

    /// Whether the nonce length is the GCM-recommended 12 bytes.
    pub fn uses_standard_nonce(&self) -> bool {
        self.nonce_length == GCM_STANDARD_NONCE_LENGTH
    }

    /// Check ahead of time what the first encrypt or decrypt would reject.
    ///
    /// Construction never fails; this is an opt-in early check reporting the
    /// same error the derivation or AEAD construction stage would.
    pub fn validate(&self) -> Result<(), CipherError> {
        let requested = self.key_length().checked_add(self.nonce_length);
        let limit = self.kdf_hash.max_output_length();
        match requested {
            Some(requested) if requested <= limit => {}
            _ => {
                return Err(CipherError::Derivation {
                    operation: Operation::Derive,
                    requested: requested.unwrap_or(usize::MAX),
                    limit,
                });
            }
        }

        if self.nonce_length < MIN_NONCE_LENGTH {
            return Err(CipherError::ModeConstruction {
                operation: Operation::BuildAead,
                nonce_length: self.nonce_length,
            });
        }

        Ok(())
    }
}

impl FromIterator<CipherOption> for CipherOptions {
    fn from_iter<I: IntoIterator<Item = CipherOption>>(iter: I) -> Self {
        iter.into_iter().fold(Self::default(), Self::apply)
    }
}

impl Extend<CipherOption> for CipherOptions {
    fn extend<I: IntoIterator<Item = CipherOption>>(&mut self, iter: I) {
        for option in iter {
            *self = std::mem::take(self).apply(option);
        }
    }
}
