//! # salted-aead
//!
//! Per-message key derivation (HKDF) plus authenticated encryption (AES-GCM),
//! driven by an explicit salt.
//!
//! One long-lived secret, one salt per message. Every call expands
//! `(secret, salt, info)` through HKDF into an AES key followed by a GCM nonce,
//! then seals or opens the payload. No key or nonce is ever stored or
//! transmitted; only the salt travels next to the ciphertext.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use salted_aead::{AuthenticatedCipher, CipherOptions, int64_salt};
//!
//! let cipher = AuthenticatedCipher::new(b"shared secret", CipherOptions::default());
//! let salt = int64_salt(1_700_000_000);
//!
//! let ciphertext = cipher.encrypt(b"payload", &salt).unwrap();
//! let plaintext = cipher.decrypt(&ciphertext, &salt).unwrap();
//! assert_eq!(plaintext, b"payload");
//! assert_eq!(ciphertext.len(), b"payload".len() + 16);
//! ```
//!
//! ## Configuration
//!
//! | Option | Values | Default |
//! |:-------|:-------|:-------:|
//! | algorithm | AES-128, AES-192, AES-256 | AES-256 |
//! | nonce length | any positive length | 12 |
//! | HKDF hash | SHA-1, SHA-2 (224/256/384/512), SHA-3 (224/256/384/512) | SHA-256 |
//! | HKDF info | any bytes | empty |
//!
//! ## Security Properties
//!
//! - **Salt uniqueness is the caller's job**: reusing a salt under the same
//!   secret reuses the (key, nonce) pair.
//! - **Bit-exact layout**: ciphertext is `encrypted-plaintext || tag(16)`.
//! - **No oracle**: every open failure is reported as the same
//!   authentication error.
//! - **Memory hygiene**: `zeroize` on drop for the secret and derived material.

// Per-call observability
pub mod metrics;
pub use metrics::OperationMetrics;

pub mod encryption;
pub use encryption::{
    AeadHandle, AesAlgorithm, AuthenticatedCipher, CipherError, CipherOption, CipherOptions,
    DerivedKeyMaterial, ErrorKind, KdfHash, Operation, TAG_LENGTH, build_aead, ciphertext_length,
    derive_key_nonce, int32_salt, int64_salt,
};
