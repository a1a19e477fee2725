//! Per-message key and nonce derivation using HKDF
//!
//! One HKDF expansion (RFC 5869) per call, keyed by the long-lived secret and
//! salted by the caller's per-message salt. The AEAD key is the first
//! `key_length` bytes of the output stream and the nonce is the next
//! `nonce_length` bytes of the *same* stream. Changing the key length
//! therefore shifts the nonce even for an identical salt; this ordering is
//! part of the wire contract and must not change.
//!
//! Nothing is cached. Every call re-derives from scratch.

use hkdf::Hkdf;
use sha1::Sha1;
use sha2::{Sha224, Sha256, Sha384, Sha512};
use sha3::{Sha3_224, Sha3_256, Sha3_384, Sha3_512};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use super::core::{CipherError, Operation};
use super::options::KdfHash;

/// Key and nonce derived for a single message. Zeroized on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct DerivedKeyMaterial {
    key: Vec<u8>,
    nonce: Vec<u8>,
}

impl DerivedKeyMaterial {
    pub fn key(&self) -> &[u8] {
        &self.key
    }

    pub fn nonce(&self) -> &[u8] {
        &self.nonce
    }
}

impl fmt::Debug for DerivedKeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DerivedKeyMaterial")
            .field("key_length", &self.key.len())
            .field("nonce_length", &self.nonce.len())
            .finish_non_exhaustive()
    }
}

/// Derive `(key, nonce)` from `(secret, salt, info)`.
///
/// # Arguments
/// * `hash` - Hash underlying HKDF
/// * `secret` - HKDF input keying material
/// * `salt` - HKDF salt; an empty salt behaves as a hash-length zero salt
/// * `info` - HKDF info (context binding), may be empty
/// * `key_length` / `nonce_length` - bytes to read for each, key first
///
/// # Errors
/// [`CipherError::Derivation`] if the stream cannot produce
/// `key_length + nonce_length` bytes (more than 255 hash blocks).
pub fn derive_key_nonce(
    hash: KdfHash,
    secret: &[u8],
    salt: &[u8],
    info: &[u8],
    key_length: usize,
    nonce_length: usize,
) -> Result<DerivedKeyMaterial, CipherError> {
    let limit = hash.max_output_length();
    let requested = key_length
        .checked_add(nonce_length)
        .ok_or(CipherError::Derivation {
            operation: Operation::Derive,
            requested: usize::MAX,
            limit,
        })?;

    // Single expansion: reading key then nonce from one stream is the same
    // as splitting one contiguous output
    let mut okm = Zeroizing::new(vec![0u8; requested]);
    let expanded = match hash {
        KdfHash::Sha1 => Hkdf::<Sha1>::new(Some(salt), secret).expand(info, &mut okm),
        KdfHash::Sha224 => Hkdf::<Sha224>::new(Some(salt), secret).expand(info, &mut okm),
        KdfHash::Sha256 => Hkdf::<Sha256>::new(Some(salt), secret).expand(info, &mut okm),
        KdfHash::Sha384 => Hkdf::<Sha384>::new(Some(salt), secret).expand(info, &mut okm),
        KdfHash::Sha512 => Hkdf::<Sha512>::new(Some(salt), secret).expand(info, &mut okm),
        KdfHash::Sha3_224 => Hkdf::<Sha3_224>::new(Some(salt), secret).expand(info, &mut okm),
        KdfHash::Sha3_256 => Hkdf::<Sha3_256>::new(Some(salt), secret).expand(info, &mut okm),
        KdfHash::Sha3_384 => Hkdf::<Sha3_384>::new(Some(salt), secret).expand(info, &mut okm),
        KdfHash::Sha3_512 => Hkdf::<Sha3_512>::new(Some(salt), secret).expand(info, &mut okm),
    };
    expanded.map_err(|_| CipherError::Derivation {
        operation: Operation::Derive,
        requested,
        limit,
    })?;

    let (key, nonce) = okm.split_at(key_length);
    Ok(DerivedKeyMaterial {
        key: key.to_vec(),
        nonce: nonce.to_vec(),
    })
}
