#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use salted_aead::{AesAlgorithm, KdfHash, derive_key_nonce};

#[derive(Arbitrary, Debug)]
enum Hash {
    Sha1,
    Sha224,
    Sha256,
    Sha384,
    Sha512,
    Sha3_224,
    Sha3_256,
    Sha3_384,
    Sha3_512,
}

#[derive(Arbitrary, Debug)]
struct KeyDerivationInput {
    secret: Vec<u8>,
    salt: Vec<u8>,
    info: Vec<u8>,
    hash: Hash,
    algorithm: u8,
    nonce_length: u16,
}

fuzz_target!(|input: KeyDerivationInput| {
    // Validates: no panics, exact output lengths, determinism, stream continuity

    let hash = match input.hash {
        Hash::Sha1 => KdfHash::Sha1,
        Hash::Sha224 => KdfHash::Sha224,
        Hash::Sha256 => KdfHash::Sha256,
        Hash::Sha384 => KdfHash::Sha384,
        Hash::Sha512 => KdfHash::Sha512,
        Hash::Sha3_224 => KdfHash::Sha3_224,
        Hash::Sha3_256 => KdfHash::Sha3_256,
        Hash::Sha3_384 => KdfHash::Sha3_384,
        Hash::Sha3_512 => KdfHash::Sha3_512,
    };
    let algorithm = match input.algorithm % 3 {
        0 => AesAlgorithm::Aes128,
        1 => AesAlgorithm::Aes192,
        _ => AesAlgorithm::Aes256,
    };
    let key_length = algorithm.key_length();
    let nonce_length = input.nonce_length as usize;

    let result = derive_key_nonce(
        hash,
        &input.secret,
        &input.salt,
        &input.info,
        key_length,
        nonce_length,
    );

    match result {
        Ok(material) => {
            assert!(key_length + nonce_length <= hash.max_output_length());
            assert_eq!(material.key().len(), key_length);
            assert_eq!(material.nonce().len(), nonce_length);

            let again = derive_key_nonce(
                hash,
                &input.secret,
                &input.salt,
                &input.info,
                key_length,
                nonce_length,
            )
            .expect("Deterministic derivation should succeed again");
            assert_eq!(material.key(), again.key());
            assert_eq!(material.nonce(), again.nonce());

            // Nonce continues the key's stream: a zero-length key sees it first
            let flat = derive_key_nonce(
                hash,
                &input.secret,
                &input.salt,
                &input.info,
                0,
                key_length + nonce_length,
            )
            .expect("Same total length should succeed");
            assert_eq!(&flat.nonce()[..key_length], material.key());
            assert_eq!(&flat.nonce()[key_length..], material.nonce());
        }
        Err(_) => {
            // Only an exhausted HKDF stream may fail
            assert!(key_length + nonce_length > hash.max_output_length());
        }
    }
});
