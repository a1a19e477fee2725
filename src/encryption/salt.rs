//! Integer salt encoders
//!
//! Callers usually hold a natural unique identifier per message (row id,
//! timestamp, sequence number). These helpers give it one canonical 8-byte
//! little-endian encoding, so two parties encoding the same integer always
//! derive the same key and nonce. Uniqueness is not enforced here.

/// Length of every encoded integer salt.
pub const SALT_LENGTH: usize = 8;

/// Encode a 64-bit integer as an 8-byte little-endian salt.
pub fn int64_salt(value: i64) -> [u8; SALT_LENGTH] {
    value.to_le_bytes()
}

/// Encode a 32-bit integer as an 8-byte salt.
///
/// The value's 4 little-endian bytes come first; the upper 4 bytes are zero.
/// The encoding differs from [`int64_salt`] for negative values.
pub fn int32_salt(value: i32) -> [u8; SALT_LENGTH] {
    let mut salt = [0u8; SALT_LENGTH];
    salt[..4].copy_from_slice(&value.to_le_bytes());
    salt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int64_salt_little_endian() {
        assert_eq!(
            int64_salt(1_700_000_000),
            [0x00, 0xf1, 0x53, 0x65, 0x00, 0x00, 0x00, 0x00]
        );
        assert_eq!(int64_salt(0), [0u8; 8]);
        assert_eq!(int64_salt(-1), [0xff; 8]);
    }

    #[test]
    fn test_int32_salt_zero_extended() {
        assert_eq!(int32_salt(-1), [0xff, 0xff, 0xff, 0xff, 0, 0, 0, 0]);
        assert_eq!(int32_salt(0x0102_0304), [0x04, 0x03, 0x02, 0x01, 0, 0, 0, 0]);
    }

    #[test]
    fn test_salt_encoding_deterministic() {
        assert_eq!(int64_salt(-1), int64_salt(-1));
        assert_eq!(int32_salt(-1), int32_salt(-1));
        // Same magnitude, different widths: only non-negative values agree
        assert_eq!(int64_salt(42), int32_salt(42));
        assert_ne!(int64_salt(-1), int32_salt(-1));
    }
}
