#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use salted_aead::{AuthenticatedCipher, CipherOptions, ErrorKind};

#[derive(Arbitrary, Debug)]
struct DecryptInput {
    secret: Vec<u8>,
    salt: Vec<u8>,
    ciphertext: Vec<u8>,
    plaintext: Vec<u8>,
    nonce_length: u8,
}

fuzz_target!(|input: DecryptInput| {
    // Attack: forged ciphertexts under arbitrary secrets, salts and nonce lengths
    // Validates: no panics, forgeries rejected, valid data still opens

    let nonce_length = (input.nonce_length as usize).max(1);
    let cipher = AuthenticatedCipher::new(
        &input.secret,
        CipherOptions::new().with_nonce_length(nonce_length),
    );

    if let Err(err) = cipher.decrypt(&input.ciphertext, &input.salt) {
        assert_eq!(err.kind(), ErrorKind::Authentication);
    }

    let sealed = cipher
        .encrypt(&input.plaintext, &input.salt)
        .expect("supported configuration must seal");
    assert_eq!(sealed.len(), input.plaintext.len() + 16);

    let opened = cipher
        .decrypt(&sealed, &input.salt)
        .expect("freshly sealed data must open");
    assert_eq!(opened, input.plaintext);

    if !sealed.is_empty() {
        let mut forged = sealed.clone();
        let index = input.ciphertext.len() % forged.len();
        forged[index] ^= 0x01;
        assert!(cipher.decrypt(&forged, &input.salt).is_err());
    }
});
