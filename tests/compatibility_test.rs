//! Cross-implementation compatibility tests
//!
//! Verifies derivation and sealing are bit-exact against known-answer vectors
//! produced by an independent HKDF (RFC 5869) + AES-GCM implementation. The
//! vectors pin down the byte layout other implementations rely on:
//! key bytes first, nonce bytes continuing the same HKDF stream, and
//! `encrypted-plaintext || tag` output.

use std::fs;
use std::path::Path;

use salted_aead::{AesAlgorithm, AuthenticatedCipher, CipherOptions, KdfHash};

/// Vector file structure
#[derive(serde::Deserialize)]
struct VectorFile {
    secret: String, // Hex-encoded secret shared by every vector
    vectors: Vec<TestVector>,
}

#[derive(serde::Deserialize)]
struct TestVector {
    name: String,
    algorithm: String,
    nonce_length: usize,
    kdf_hash: String,
    kdf_info: String,   // Hex
    salt: String,       // Hex
    plaintext: String,  // Hex
    key: String,        // Hex, expected derived key
    nonce: String,      // Hex, expected derived nonce
    ciphertext: String, // Hex, expected ciphertext || tag
}

fn load_vectors() -> VectorFile {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/compatibility/test_vectors.json");
    let json = fs::read_to_string(&path).expect("Failed to read test vector file");
    serde_json::from_str(&json).expect("Failed to parse test vector JSON")
}

fn cipher_for(secret: &[u8], vector: &TestVector) -> AuthenticatedCipher {
    let algorithm: AesAlgorithm = vector.algorithm.parse().expect("known algorithm label");
    let kdf_hash: KdfHash = vector.kdf_hash.parse().expect("known hash label");
    let info = hex::decode(&vector.kdf_info).expect("Failed to decode kdf_info hex");

    AuthenticatedCipher::new(
        secret,
        CipherOptions::new()
            .with_algorithm(algorithm)
            .with_nonce_length(vector.nonce_length)
            .with_kdf_hash(kdf_hash)
            .with_kdf_info(info),
    )
}

#[test]
fn test_vectors_derive_expected_key_and_nonce() {
    let file = load_vectors();
    let secret = hex::decode(&file.secret).expect("Failed to decode secret hex");

    for vector in &file.vectors {
        let cipher = cipher_for(&secret, vector);
        let salt = hex::decode(&vector.salt).unwrap();

        let material = cipher.derive(&salt).unwrap();

        assert_eq!(hex::encode(material.key()), vector.key, "key mismatch: {}", vector.name);
        assert_eq!(
            hex::encode(material.nonce()),
            vector.nonce,
            "nonce mismatch: {}",
            vector.name
        );
    }
}

#[test]
fn test_vectors_encrypt_bit_exact() {
    let file = load_vectors();
    let secret = hex::decode(&file.secret).unwrap();

    for vector in &file.vectors {
        let cipher = cipher_for(&secret, vector);
        let salt = hex::decode(&vector.salt).unwrap();
        let plaintext = hex::decode(&vector.plaintext).unwrap();

        let ciphertext = cipher.encrypt(&plaintext, &salt).unwrap();

        assert_eq!(
            hex::encode(&ciphertext),
            vector.ciphertext,
            "ciphertext mismatch: {}",
            vector.name
        );
        assert_eq!(ciphertext.len(), plaintext.len() + 16);
    }
}

#[test]
fn test_vectors_decrypt_foreign_ciphertext() {
    let file = load_vectors();
    let secret = hex::decode(&file.secret).unwrap();

    for vector in &file.vectors {
        let cipher = cipher_for(&secret, vector);
        let salt = hex::decode(&vector.salt).unwrap();
        let ciphertext = hex::decode(&vector.ciphertext).unwrap();

        let plaintext = cipher.decrypt(&ciphertext, &salt).unwrap();

        assert_eq!(hex::encode(plaintext), vector.plaintext, "{}", vector.name);
    }
}

#[test]
fn test_vector_file_covers_every_algorithm() {
    let file = load_vectors();

    for label in ["AES128", "AES192", "AES256"] {
        assert!(
            file.vectors.iter().any(|v| v.algorithm == label),
            "no vector for {label}"
        );
    }
    assert!(file.vectors.iter().any(|v| v.nonce_length != 12));
}

#[test]
fn test_vectors_with_nonces_longer_than_a_block() {
    let file = load_vectors();
    let secret = hex::decode(&file.secret).unwrap();

    let long: Vec<&TestVector> = file.vectors.iter().filter(|v| v.nonce_length > 32).collect();
    assert!(long.iter().any(|v| v.nonce_length == 64));

    for vector in long {
        let cipher = cipher_for(&secret, vector);
        let salt = hex::decode(&vector.salt).unwrap();
        let ciphertext = hex::decode(&vector.ciphertext).unwrap();

        assert_eq!(cipher.derive(&salt).unwrap().nonce().len(), vector.nonce_length);
        let plaintext = cipher
            .decrypt(&ciphertext, &salt)
            .unwrap_or_else(|e| panic!("{}: {e}", vector.name));
        assert_eq!(hex::encode(plaintext), vector.plaintext, "{}", vector.name);
    }
}

#[test]
fn test_vector_file_covers_every_hash_family() {
    let file = load_vectors();

    for label in ["SHA-1", "SHA-224", "SHA-256", "SHA-384", "SHA-512", "SHA3-256"] {
        assert!(
            file.vectors.iter().any(|v| v.kdf_hash == label),
            "no vector for {label}"
        );
    }
}
