//! Salt-driven authenticated encryption using HKDF + AES-GCM
//!
//! [`AuthenticatedCipher`] captures a secret and an immutable
//! [`CipherOptions`] once, then serves any number of encrypt/decrypt calls.
//! Every call:
//! 1. derives `(key, nonce)` from `(secret, salt, info)` via HKDF
//! 2. builds AES-GCM for that key with the configured nonce length
//! 3. seals or opens with no associated data
//!
//! Output layout: `encrypted-plaintext || tag(16)`. The salt is not embedded;
//! the caller transports or regenerates it.
//!
//! # Salt Uniqueness
//!
//! The salt is the only per-message input besides the plaintext. Encrypting
//! two different plaintexts under the same secret and salt reuses the GCM
//! (key, nonce) pair, which leaks the XOR of the plaintexts and allows tag
//! forgery. Salts must be unique per message.

use std::fmt;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, trace, warn};
use zeroize::Zeroizing;

use super::aead::{AeadHandle, build_aead};
use super::key_derivation::{DerivedKeyMaterial, derive_key_nonce};
use super::options::{AesAlgorithm, CipherOption, CipherOptions};
use crate::metrics::OperationMetrics;

// CPU feature detection
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
use std::arch::is_x86_feature_detected;

/// Public operation during which an error surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Encrypt,
    Decrypt,
    Derive,
    BuildAead,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Operation::Encrypt => "encrypt",
            Operation::Decrypt => "decrypt",
            Operation::Derive => "derive",
            Operation::BuildAead => "build aead",
        })
    }
}

/// Errors that can occur during derivation, construction or sealing/opening.
///
/// Messages carry lengths and operation names only, never key material.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CipherError {
    #[error("{operation}: hkdf expand of {requested} bytes exceeds the {limit}-byte stream limit")]
    Derivation {
        operation: Operation,
        requested: usize,
        limit: usize,
    },

    #[error("{operation}: unsupported AES key length {key_length} (expected 16, 24 or 32)")]
    CipherConstruction {
        operation: Operation,
        key_length: usize,
    },

    #[error("{operation}: unsupported GCM nonce length {nonce_length}")]
    ModeConstruction {
        operation: Operation,
        nonce_length: usize,
    },

    #[error("{operation}: message authentication failed")]
    Authentication { operation: Operation },

    #[error("{operation}: expected a {expected}-byte nonce, got {actual} bytes")]
    InvalidNonceLength {
        operation: Operation,
        expected: usize,
        actual: usize,
    },

    #[error("{operation}: {length}-byte message exceeds the GCM size limit")]
    MessageTooLarge { operation: Operation, length: usize },
}

/// Fieldless view of [`CipherError`] for matching on the failing stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Derivation,
    CipherConstruction,
    ModeConstruction,
    Authentication,
    InvalidNonceLength,
    MessageTooLarge,
}

impl CipherError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CipherError::Derivation { .. } => ErrorKind::Derivation,
            CipherError::CipherConstruction { .. } => ErrorKind::CipherConstruction,
            CipherError::ModeConstruction { .. } => ErrorKind::ModeConstruction,
            CipherError::Authentication { .. } => ErrorKind::Authentication,
            CipherError::InvalidNonceLength { .. } => ErrorKind::InvalidNonceLength,
            CipherError::MessageTooLarge { .. } => ErrorKind::MessageTooLarge,
        }
    }

    /// Operation the error is attributed to.
    pub fn operation(&self) -> Operation {
        match self {
            CipherError::Derivation { operation, .. }
            | CipherError::CipherConstruction { operation, .. }
            | CipherError::ModeConstruction { operation, .. }
            | CipherError::Authentication { operation }
            | CipherError::InvalidNonceLength { operation, .. }
            | CipherError::MessageTooLarge { operation, .. } => *operation,
        }
    }

    /// Re-attribute a stage error to the public operation that triggered it.
    pub fn during(mut self, op: Operation) -> Self {
        match &mut self {
            CipherError::Derivation { operation, .. }
            | CipherError::CipherConstruction { operation, .. }
            | CipherError::ModeConstruction { operation, .. }
            | CipherError::Authentication { operation }
            | CipherError::InvalidNonceLength { operation, .. }
            | CipherError::MessageTooLarge { operation, .. } => *operation = op,
        }
        self
    }

    pub fn is_authentication_failure(&self) -> bool {
        self.kind() == ErrorKind::Authentication
    }
}

/// Symmetric authenticated cipher deriving a fresh key and nonce per salt.
///
/// Immutable after construction; share it across threads behind an `Arc`.
#[derive(Clone)]
pub struct AuthenticatedCipher {
    secret: Zeroizing<Vec<u8>>,
    options: CipherOptions,
    hardware_acceleration_detected: bool,
}

impl AuthenticatedCipher {
    /// Create a cipher from a secret and a configuration record.
    ///
    /// Never fails. Malformed configuration (nonce length 0, say) surfaces on
    /// the first encrypt or decrypt; call [`CipherOptions::validate`] to check
    /// up front. The secret's strength is the caller's responsibility.
    pub fn new(secret: impl AsRef<[u8]>, options: CipherOptions) -> Self {
        let hardware_acceleration_detected = Self::detect_hardware_acceleration();

        debug!(
            algorithm = %options.algorithm(),
            nonce_length = options.nonce_length(),
            kdf_hash = %options.kdf_hash(),
            hardware_accelerated = hardware_acceleration_detected,
            "authenticated cipher configured"
        );
        if !options.uses_standard_nonce() {
            warn!(
                nonce_length = options.nonce_length(),
                "non-standard GCM nonce length configured; 12 bytes is recommended"
            );
        }

        Self {
            secret: Zeroizing::new(secret.as_ref().to_vec()),
            options,
            hardware_acceleration_detected,
        }
    }

    /// Create a cipher from an ordered list of options applied over the defaults.
    pub fn with_options(
        secret: impl AsRef<[u8]>,
        options: impl IntoIterator<Item = CipherOption>,
    ) -> Self {
        Self::new(secret, options.into_iter().collect())
    }

    pub fn options(&self) -> &CipherOptions {
        &self.options
    }

    pub fn algorithm(&self) -> AesAlgorithm {
        self.options.algorithm()
    }

    /// Detect hardware acceleration capabilities
    ///
    /// Informational only: the `aes` crate selects AES-NI / ARMv8 crypto
    /// instructions at runtime on its own.
    fn detect_hardware_acceleration() -> bool {
        #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
        {
            is_x86_feature_detected!("aes") && is_x86_feature_detected!("pclmulqdq")
        }

        #[cfg(target_arch = "aarch64")]
        {
            std::arch::is_aarch64_feature_detected!("aes")
                && std::arch::is_aarch64_feature_detected!("pmull")
        }

        #[cfg(not(any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64")))]
        {
            false
        }
    }

    pub fn hardware_acceleration_enabled(&self) -> bool {
        self.hardware_acceleration_detected
    }

    /// Derive the `(key, nonce)` pair for `salt`.
    ///
    /// Key bytes come first, nonce bytes continue the same HKDF stream.
    pub fn derive(&self, salt: &[u8]) -> Result<DerivedKeyMaterial, CipherError> {
        derive_key_nonce(
            self.options.kdf_hash(),
            &self.secret,
            salt,
            self.options.kdf_info(),
            self.options.key_length(),
            self.options.nonce_length(),
        )
    }

    /// Build AES-GCM for `key` with this cipher's nonce length.
    pub fn build_aead(&self, key: &[u8]) -> Result<AeadHandle, CipherError> {
        build_aead(key, self.options.nonce_length())
    }

    /// Encrypt and authenticate `plaintext` under the key/nonce derived from `salt`.
    ///
    /// # Returns
    /// `encrypted-plaintext || tag`, always `plaintext.len() + 16` bytes.
    /// Deterministic for identical secret, options, salt and plaintext.
    pub fn encrypt(&self, plaintext: &[u8], salt: &[u8]) -> Result<Vec<u8>, CipherError> {
        self.encrypt_with_metrics(plaintext, salt)
            .map(|(ciphertext, _)| ciphertext)
    }

    /// Decrypt and verify `ciphertext` with the salt it was encrypted under.
    ///
    /// # Errors
    /// [`CipherError::Authentication`] on any verification failure: tampered
    /// data, wrong salt and wrong secret are indistinguishable.
    pub fn decrypt(&self, ciphertext: &[u8], salt: &[u8]) -> Result<Vec<u8>, CipherError> {
        self.decrypt_with_metrics(ciphertext, salt)
            .map(|(plaintext, _)| plaintext)
    }

    /// [`encrypt`](Self::encrypt), also returning per-stage timings.
    pub fn encrypt_with_metrics(
        &self,
        plaintext: &[u8],
        salt: &[u8],
    ) -> Result<(Vec<u8>, OperationMetrics), CipherError> {
        let op = Operation::Encrypt;
        let (material, aead, derivation_micros) = self.prepare(salt, op)?;

        let aead_start = Instant::now();
        let ciphertext = aead
            .seal(material.nonce(), plaintext)
            .map_err(|e| e.during(op))?;
        let aead_micros = aead_start.elapsed().as_micros() as u64;

        trace!(
            plaintext_len = plaintext.len(),
            ciphertext_len = ciphertext.len(),
            "sealed"
        );

        let metrics = OperationMetrics::new()
            .with_derivation(derivation_micros)
            .with_aead(aead_micros, self.hardware_acceleration_detected)
            .with_sizes(plaintext.len(), ciphertext.len());
        Ok((ciphertext, metrics))
    }

    /// [`decrypt`](Self::decrypt), also returning per-stage timings.
    pub fn decrypt_with_metrics(
        &self,
        ciphertext: &[u8],
        salt: &[u8],
    ) -> Result<(Vec<u8>, OperationMetrics), CipherError> {
        let op = Operation::Decrypt;
        let (material, aead, derivation_micros) = self.prepare(salt, op)?;

        let aead_start = Instant::now();
        let plaintext = aead.open(material.nonce(), ciphertext).map_err(|e| {
            debug!(ciphertext_len = ciphertext.len(), "authentication failed");
            e.during(op)
        })?;
        let aead_micros = aead_start.elapsed().as_micros() as u64;

        trace!(
            ciphertext_len = ciphertext.len(),
            plaintext_len = plaintext.len(),
            "opened"
        );

        let metrics = OperationMetrics::new()
            .with_derivation(derivation_micros)
            .with_aead(aead_micros, self.hardware_acceleration_detected)
            .with_sizes(ciphertext.len(), plaintext.len());
        Ok((plaintext, metrics))
    }

    /// Stages 1 and 2: fresh derivation and AEAD construction for one call.
    fn prepare(
        &self,
        salt: &[u8],
        op: Operation,
    ) -> Result<(DerivedKeyMaterial, AeadHandle, u64), CipherError> {
        let start = Instant::now();
        let material = self.derive(salt).map_err(|e| e.during(op))?;
        let derivation_micros = start.elapsed().as_micros() as u64;

        let aead = self.build_aead(material.key()).map_err(|e| e.during(op))?;
        Ok((material, aead, derivation_micros))
    }
}

impl fmt::Debug for AuthenticatedCipher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthenticatedCipher")
            .field("secret", &"[REDACTED]")
            .field("options", &self.options)
            .field(
                "hardware_acceleration_detected",
                &self.hardware_acceleration_detected,
            )
            .finish()
    }
}
