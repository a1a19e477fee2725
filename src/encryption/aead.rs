//! AES-GCM construction with an explicit nonce length
//!
//! The nonce length is a first-class configuration value rather than the
//! library's 96-bit default. 12-byte nonces go through `aes-gcm` directly.
//! Any other positive length derives the initial counter block J0 through
//! GHASH (NIST SP 800-38D, section 7.1), which `aes-gcm` only supports for
//! nonce sizes known at compile time, so that path drives `ghash` and a
//! 32-bit big-endian `ctr` over the `aes` block cipher itself.

use aes::cipher::{BlockCipher, BlockEncrypt, BlockSizeUser};
use aes::{Aes128, Aes192, Aes256};
use aes_gcm::aead::consts::{U12, U16};
use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{AesGcm, Nonce};
use ctr::cipher::{InnerIvInit, StreamCipherCore};
use ghash::GHash;
use ghash::universal_hash::UniversalHash;
use std::fmt;

use super::TAG_LENGTH;
use super::core::{CipherError, Operation};
use super::options::GCM_STANDARD_NONCE_LENGTH;

type Block = ghash::Block;
type Ctr32BE<C> = ctr::CtrCore<C, ctr::flavors::Ctr32BE>;

/// Largest plaintext GCM may process under one (key, nonce): 2^39 - 256 bits.
const GCM_MAX_PLAINTEXT: u64 = (1 << 36) - 32;

/// Seal/open with a caller-provided nonce and no associated data.
trait GcmMode {
    fn seal(&self, nonce: &[u8], plaintext: &[u8]) -> Result<Vec<u8>, aes_gcm::Error>;
    fn open(&self, nonce: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>, aes_gcm::Error>;
}

impl<C> GcmMode for AesGcm<C, U12>
where
    C: BlockCipher + BlockSizeUser<BlockSize = U16> + BlockEncrypt,
{
    fn seal(&self, nonce: &[u8], plaintext: &[u8]) -> Result<Vec<u8>, aes_gcm::Error> {
        self.encrypt(Nonce::<U12>::from_slice(nonce), plaintext)
    }

    fn open(&self, nonce: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>, aes_gcm::Error> {
        self.decrypt(Nonce::<U12>::from_slice(nonce), ciphertext)
    }
}

/// GCM for nonces of any length other than 12 bytes.
///
/// `J0 = GHASH_H(nonce || pad || 0^64 || bitlen(nonce))`. Keystream and tag
/// then follow the same construction as the 96-bit path.
struct GhashCounterGcm<C> {
    cipher: C,
    ghash: GHash,
}

impl<C> GhashCounterGcm<C>
where
    C: BlockCipher + BlockSizeUser<BlockSize = U16> + BlockEncrypt,
{
    fn new(cipher: C) -> Self {
        // H = E_K(0^128)
        let mut ghash_key = ghash::Key::default();
        cipher.encrypt_block(&mut ghash_key);

        Self {
            cipher,
            ghash: GHash::new(&ghash_key),
        }
    }

    /// Counter positioned at inc32(J0), plus the tag mask E_K(J0).
    fn init_ctr(&self, nonce: &[u8]) -> (Ctr32BE<&C>, Block) {
        let j0 = self.ghash_with_length(nonce).finalize();

        let mut ctr = Ctr32BE::<&C>::inner_iv_init(&self.cipher, &j0);
        let mut tag_mask = Block::default();
        ctr.write_keystream_block(&mut tag_mask);
        (ctr, tag_mask)
    }

    /// GHASH over zero-padded `data` followed by the length block
    /// `0^64 || bitlen(data)`. With no associated data this serves both J0
    /// and the tag.
    fn ghash_with_length(&self, data: &[u8]) -> GHash {
        let mut ghash = self.ghash.clone();
        ghash.update_padded(data);

        let mut lengths = Block::default();
        lengths[8..].copy_from_slice(&((data.len() as u64) * 8).to_be_bytes());
        ghash.update(&[lengths]);
        ghash
    }
}

impl<C> GcmMode for GhashCounterGcm<C>
where
    C: BlockCipher + BlockSizeUser<BlockSize = U16> + BlockEncrypt,
{
    fn seal(&self, nonce: &[u8], plaintext: &[u8]) -> Result<Vec<u8>, aes_gcm::Error> {
        if plaintext.len() as u64 > GCM_MAX_PLAINTEXT {
            return Err(aes_gcm::Error);
        }

        let (ctr, tag_mask) = self.init_ctr(nonce);
        let mut sealed = Vec::with_capacity(plaintext.len() + TAG_LENGTH);
        sealed.extend_from_slice(plaintext);
        ctr.apply_keystream_partial(sealed.as_mut_slice().into());

        let mut tag = self.ghash_with_length(&sealed).finalize();
        xor_in_place(&mut tag, &tag_mask);
        sealed.extend_from_slice(&tag);
        Ok(sealed)
    }

    fn open(&self, nonce: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>, aes_gcm::Error> {
        let body_len = ciphertext
            .len()
            .checked_sub(TAG_LENGTH)
            .ok_or(aes_gcm::Error)?;
        if body_len as u64 > GCM_MAX_PLAINTEXT {
            return Err(aes_gcm::Error);
        }
        let (body, tag) = ciphertext.split_at(body_len);

        let (ctr, tag_mask) = self.init_ctr(nonce);

        // Unmask the received tag so GHASH can compare it in constant time
        let mut expected = Block::clone_from_slice(tag);
        xor_in_place(&mut expected, &tag_mask);
        self.ghash_with_length(body)
            .verify(&expected)
            .map_err(|_| aes_gcm::Error)?;

        let mut plaintext = body.to_vec();
        ctr.apply_keystream_partial(plaintext.as_mut_slice().into());
        Ok(plaintext)
    }
}

fn xor_in_place(block: &mut Block, mask: &Block) {
    for (byte, mask_byte) in block.iter_mut().zip(mask.iter()) {
        *byte ^= mask_byte;
    }
}

/// An AES-GCM instance keyed with one derived key.
pub struct AeadHandle {
    mode: Box<dyn GcmMode>,
    key_length: usize,
    nonce_length: usize,
}

impl AeadHandle {
    pub fn key_length(&self) -> usize {
        self.key_length
    }

    pub fn nonce_length(&self) -> usize {
        self.nonce_length
    }

    /// Encrypt and authenticate `plaintext`.
    ///
    /// # Returns
    /// `encrypted-plaintext || tag(16)`
    pub fn seal(&self, nonce: &[u8], plaintext: &[u8]) -> Result<Vec<u8>, CipherError> {
        self.check_nonce(nonce, Operation::Encrypt)?;
        self.mode
            .seal(nonce, plaintext)
            .map_err(|_| CipherError::MessageTooLarge {
                operation: Operation::Encrypt,
                length: plaintext.len(),
            })
    }

    /// Verify the tag and decrypt `ciphertext` (`encrypted-plaintext || tag`).
    ///
    /// Any failure, including input shorter than the tag, is reported as
    /// [`CipherError::Authentication`]. No partial plaintext is returned.
    pub fn open(&self, nonce: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>, CipherError> {
        self.check_nonce(nonce, Operation::Decrypt)?;
        self.mode
            .open(nonce, ciphertext)
            .map_err(|_| CipherError::Authentication {
                operation: Operation::Decrypt,
            })
    }

    fn check_nonce(&self, nonce: &[u8], operation: Operation) -> Result<(), CipherError> {
        // from_slice panics on a length mismatch
        if nonce.len() != self.nonce_length {
            return Err(CipherError::InvalidNonceLength {
                operation,
                expected: self.nonce_length,
                actual: nonce.len(),
            });
        }
        Ok(())
    }
}

impl fmt::Debug for AeadHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AeadHandle")
            .field("key_length", &self.key_length)
            .field("nonce_length", &self.nonce_length)
            .finish_non_exhaustive()
    }
}

/// Build AES-GCM for `key` with a nonce of `nonce_length` bytes.
///
/// # Errors
/// * [`CipherError::CipherConstruction`] - key is not 16, 24 or 32 bytes
/// * [`CipherError::ModeConstruction`] - nonce length of zero
pub fn build_aead(key: &[u8], nonce_length: usize) -> Result<AeadHandle, CipherError> {
    let mode = match key.len() {
        16 => gcm_mode::<Aes128>(key, nonce_length)?,
        24 => gcm_mode::<Aes192>(key, nonce_length)?,
        32 => gcm_mode::<Aes256>(key, nonce_length)?,
        other => {
            return Err(CipherError::CipherConstruction {
                operation: Operation::BuildAead,
                key_length: other,
            });
        }
    };

    Ok(AeadHandle {
        mode,
        key_length: key.len(),
        nonce_length,
    })
}

fn gcm_mode<C>(key: &[u8], nonce_length: usize) -> Result<Box<dyn GcmMode>, CipherError>
where
    C: BlockCipher + BlockSizeUser<BlockSize = U16> + BlockEncrypt + KeyInit + 'static,
{
    let bad_key = |_| CipherError::CipherConstruction {
        operation: Operation::BuildAead,
        key_length: key.len(),
    };

    match nonce_length {
        0 => Err(CipherError::ModeConstruction {
            operation: Operation::BuildAead,
            nonce_length,
        }),
        GCM_STANDARD_NONCE_LENGTH => {
            let mode = AesGcm::<C, U12>::new_from_slice(key).map_err(bad_key)?;
            Ok(Box::new(mode))
        }
        _ => {
            let cipher = C::new_from_slice(key).map_err(bad_key)?;
            Ok(Box::new(GhashCounterGcm::new(cipher)))
        }
    }
}
