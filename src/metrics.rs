//! Observability metrics for cipher operations
//!
//! Per-call timings of the derivation and AEAD stages. Metrics are returned
//! to the caller with each result rather than stored on the cipher, so
//! concurrent calls never contend on shared state.

use serde::{Deserialize, Serialize};

/// Metrics for one encrypt or decrypt call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationMetrics {
    /// HKDF derivation time in microseconds
    pub derivation_time_micros: u64,

    /// Seal/open time in microseconds
    pub aead_time_micros: u64,

    /// Bytes consumed (plaintext for encrypt, ciphertext for decrypt)
    pub input_bytes: usize,

    /// Bytes produced
    pub output_bytes: usize,

    /// Whether AES/GHASH hardware instructions were detected
    pub hardware_accelerated: bool,
}

impl OperationMetrics {
    /// Create new empty metrics
    pub fn new() -> Self {
        OperationMetrics {
            derivation_time_micros: 0,
            aead_time_micros: 0,
            input_bytes: 0,
            output_bytes: 0,
            hardware_accelerated: false,
        }
    }

    /// Set derivation metrics
    pub fn with_derivation(mut self, time_micros: u64) -> Self {
        self.derivation_time_micros = time_micros;
        self
    }

    /// Set AEAD metrics
    pub fn with_aead(mut self, time_micros: u64, hw_accel: bool) -> Self {
        self.aead_time_micros = time_micros;
        self.hardware_accelerated = hw_accel;
        self
    }

    pub fn with_sizes(mut self, input_bytes: usize, output_bytes: usize) -> Self {
        self.input_bytes = input_bytes;
        self.output_bytes = output_bytes;
        self
    }

    /// Total operation time in microseconds
    pub fn total_time_micros(&self) -> u64 {
        self.derivation_time_micros
            .saturating_add(self.aead_time_micros)
    }
}

impl Default for OperationMetrics {
    fn default() -> Self {
        Self::new()
    }
}
