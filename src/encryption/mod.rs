//! Salt-driven authenticated encryption
//!
//! Three stages run strictly in sequence for every operation:
//! 1. HKDF expands `(secret, salt, info)` into `key || nonce`
//! 2. An AES block cipher of the derived key length is wrapped in GCM with the
//!    configured nonce length
//! 3. The payload is sealed or opened with no associated data
//!
//! Nothing is cached between calls. Each call owns its derivation output and
//! AEAD handle, so one cipher can be shared across threads without locking.

pub mod aead;
pub mod core;
pub mod key_derivation;
pub mod options;
pub mod salt;

// Re-exports for convenience
pub use aead::{AeadHandle, build_aead};
pub use self::core::{AuthenticatedCipher, CipherError, ErrorKind, Operation};
pub use key_derivation::{DerivedKeyMaterial, derive_key_nonce};
pub use options::{
    AesAlgorithm, CipherOption, CipherOptions, DEFAULT_ALGORITHM, DEFAULT_KDF_HASH,
    DEFAULT_NONCE_LENGTH, GCM_STANDARD_NONCE_LENGTH, KdfHash, MIN_NONCE_LENGTH, UnknownLabel,
};
pub use salt::{SALT_LENGTH, int32_salt, int64_salt};

/// GCM authentication tag length in bytes, appended to every ciphertext.
pub const TAG_LENGTH: usize = 16;

/// Length of the ciphertext produced for a plaintext of `plaintext_len` bytes.
pub const fn ciphertext_length(plaintext_len: usize) -> usize {
    plaintext_len + TAG_LENGTH
}
