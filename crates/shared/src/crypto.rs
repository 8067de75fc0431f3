//! Cryptographic utilities for share-event anonymization.

use chrono::NaiveDate;
use sha2::{Digest, Sha256};

/// Length of the stored IP digest in hex characters.
pub const IP_HASH_LEN: usize = 16;

/// Computes SHA-256 hash of the input and returns it as a hex string.
pub fn sha256_hex(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    hex::encode(hasher.finalize())
}

/// Day-rotating one-way digest of a client IP.
///
/// The calendar date is mixed into the digest, so the same IP produces a
/// different hash on each day. Same-day requests from one IP still collide,
/// which is what the analytics rollup needs. Truncated to [`IP_HASH_LEN`]
/// hex characters for storage economy.
pub fn ip_hash(client_ip: &str, day: NaiveDate) -> String {
    let digest = sha256_hex(&format!("{}{}", client_ip, day.format("%Y-%m-%d")));
    digest[..IP_HASH_LEN].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_hex() {
        let hash = sha256_hex("test");
        assert_eq!(hash.len(), 64);
        assert_eq!(
            hash,
            "9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08"
        );
    }

    #[test]
    fn test_sha256_hex_empty_string() {
        let hash = sha256_hex("");
        assert_eq!(hash.len(), 64);
        // SHA256 of empty string
        assert_eq!(
            hash,
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_sha256_hex_deterministic() {
        let hash1 = sha256_hex("same_input");
        let hash2 = sha256_hex("same_input");
        assert_eq!(hash1, hash2);
    }

    #[test]
    fn test_ip_hash_length() {
        let day = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        assert_eq!(ip_hash("203.0.113.7", day).len(), IP_HASH_LEN);
    }

    #[test]
    fn test_ip_hash_same_day_stable() {
        let day = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        assert_eq!(ip_hash("203.0.113.7", day), ip_hash("203.0.113.7", day));
    }

    #[test]
    fn test_ip_hash_rotates_across_days() {
        let monday = NaiveDate::from_ymd_opt(2024, 5, 6).unwrap();
        let tuesday = NaiveDate::from_ymd_opt(2024, 5, 7).unwrap();
        assert_ne!(ip_hash("203.0.113.7", monday), ip_hash("203.0.113.7", tuesday));
    }

    #[test]
    fn test_ip_hash_distinct_ips() {
        let day = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        assert_ne!(ip_hash("203.0.113.7", day), ip_hash("203.0.113.8", day));
    }
}
