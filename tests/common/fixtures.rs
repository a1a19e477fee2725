//! Test fixtures and constants for salted-aead tests.
//!
//! Fixed key material and salts keep known-answer checks reproducible;
//! `random_bytes` draws from the system CSPRNG for tests that must not depend
//! on any particular secret.

#![allow(dead_code)]

use ring::rand::{SecureRandom, SystemRandom};

// ============================================================================
// Common Test Data
// ============================================================================

/// Empty data - minimal test case for boundary conditions
pub const EMPTY_DATA: &[u8] = b"";

/// Small data - typical short string for basic validation
pub const SMALL_DATA: &[u8] = b"hello world";

/// Unicode data - validates that payloads are treated as opaque bytes
pub const UNICODE_DATA: &[u8] = "Hello 世界 🚀 Rust".as_bytes();

/// Timestamp used as the canonical integer salt in known-answer tests
pub const TEST_TIMESTAMP: i64 = 1_700_000_000;

// ============================================================================
// Secret Material
// ============================================================================

/// 32-byte ASCII secret shared with the JSON known-answer vectors
pub const TEST_SECRET: &[u8; 32] = b"test_master_key_32_bytes_long!!!";

/// A second secret for wrong-secret checks
pub const OTHER_SECRET: &[u8; 32] = b"another_master_key_32_bytes_long";

// ============================================================================
// Helper Functions
// ============================================================================

/// Fill `length` bytes from the system CSPRNG
pub fn random_bytes(length: usize) -> Vec<u8> {
    let rng = SystemRandom::new();
    let mut bytes = vec![0u8; length];
    rng.fill(&mut bytes).expect("system RNG should be available");
    bytes
}

/// Hex-encoded random secret, the shape services usually configure
pub fn random_hex_secret(length: usize) -> String {
    hex::encode(random_bytes(length))
}

/// Generate deterministic pseudo-random data
///
/// Uses a simple PRNG (not cryptographically secure). Deterministic seed
/// ensures reproducibility across runs.
pub fn generate_pseudo_random_data(size: usize, seed: u64) -> Vec<u8> {
    let mut rng = SimplePcg::new(seed);
    (0..size).map(|_| rng.next_byte()).collect()
}

// Simple PCG random number generator (deterministic, not crypto-secure)
struct SimplePcg {
    state: u64,
}

impl SimplePcg {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next_byte(&mut self) -> u8 {
        // PCG algorithm: https://www.pcg-random.org/
        let old_state = self.state;
        self.state = old_state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        let xor_shifted = (((old_state >> 18) ^ old_state) >> 27) as u32;
        let rot = (old_state >> 59) as u32;
        (xor_shifted.rotate_right(rot) & 0xff) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_constants() {
        assert_eq!(EMPTY_DATA, b"");
        assert_eq!(SMALL_DATA, b"hello world");
        assert!(UNICODE_DATA.len() > SMALL_DATA.len());
        assert_eq!(TEST_SECRET.len(), 32);
        assert_ne!(TEST_SECRET, OTHER_SECRET);
    }

    #[test]
    fn test_random_bytes_vary() {
        let a = random_bytes(32);
        let b = random_bytes(32);
        assert_eq!(a.len(), 32);
        assert_ne!(a, b);
        assert_eq!(random_hex_secret(16).len(), 32);
    }

    #[test]
    fn test_generate_pseudo_random_data() {
        let data1 = generate_pseudo_random_data(1000, 12345);
        let data2 = generate_pseudo_random_data(1000, 12345);
        let data3 = generate_pseudo_random_data(1000, 54321);

        // Same seed produces same data (deterministic)
        assert_eq!(data1, data2);

        // Different seed produces different data
        assert_ne!(data1, data3);
    }
}
