//! Quick throughput verification - run with: cargo run --release --example bench_throughput
use salted_aead::{AuthenticatedCipher, CipherOptions, int64_salt};
use std::time::Instant;

fn bench_size(cipher: &AuthenticatedCipher, label: &str, size: usize, iterations: usize) {
    // Pseudo-random payload
    let data: Vec<u8> = (0..size).map(|i| ((i * 17 + 31) % 256) as u8).collect();

    let size_label = if size >= 1024 * 1024 {
        format!("{}MB", size / 1024 / 1024)
    } else if size >= 1024 {
        format!("{}KB", size / 1024)
    } else {
        format!("{}B", size)
    };

    println!(
        "\n=== {} | {} data, {} iterations ===",
        label, size_label, iterations
    );

    // Encrypt: fresh HKDF derivation + AES-GCM seal per call
    {
        let start = Instant::now();
        for i in 0..iterations {
            let _ = cipher.encrypt(&data, &int64_salt(i as i64)).unwrap();
        }
        let elapsed = start.elapsed();
        let bytes_per_sec = (size * iterations) as f64 / elapsed.as_secs_f64();
        println!("encrypt:         {:.2} GB/s", bytes_per_sec / 1e9);
    }

    // Decrypt
    {
        let salt = int64_salt(0);
        let ciphertext = cipher.encrypt(&data, &salt).unwrap();
        let start = Instant::now();
        for _ in 0..iterations {
            let _ = cipher.decrypt(&ciphertext, &salt).unwrap();
        }
        let elapsed = start.elapsed();
        let bytes_per_sec = (size * iterations) as f64 / elapsed.as_secs_f64();
        println!("decrypt:         {:.2} GB/s", bytes_per_sec / 1e9);
    }

    // Derivation alone dominates small payloads
    {
        let start = Instant::now();
        for i in 0..iterations {
            let _ = cipher.derive(&int64_salt(i as i64)).unwrap();
        }
        let per_call = start.elapsed().as_nanos() as f64 / iterations as f64;
        println!("derive:          {:.0} ns/call", per_call);
    }
}

fn main() {
    let secret = [0x42u8; 32];
    let configurations = [
        ("AES-128", CipherOptions::new().aes128()),
        ("AES-256", CipherOptions::new().aes256()),
        ("AES-256 nonce16", CipherOptions::new().with_nonce_length(16)),
    ];

    for (label, options) in configurations {
        let cipher = AuthenticatedCipher::new(secret, options);
        if label == "AES-128" {
            println!(
                "hardware acceleration: {}",
                cipher.hardware_acceleration_enabled()
            );
        }

        bench_size(&cipher, label, 64, 100_000);
        bench_size(&cipher, label, 4 * 1024, 50_000);
        bench_size(&cipher, label, 1024 * 1024, 200);
    }
}
