//! Integrity digest over cached x/y series
//!
//! Each series is written as its elements joined by `,`, x first and then y,
//! with no separator between the two. Elements use `f64`'s `Display` output:
//! the shortest decimal string that parses back to the same bits, never in
//! exponent notation and independent of locale. The resulting bytes are
//! hashed with SHA-256 and rendered as lowercase hex.

use sha2::{Digest, Sha256};

/// Canonical text form of a single value as fed into the digest
pub fn format_value(value: f64) -> String {
    format!("{}", value)
}

fn write_series(hasher: &mut Sha256, values: &[f64]) {
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            hasher.update(b",");
        }
        hasher.update(format_value(*value).as_bytes());
    }
}

/// Compute the hex SHA-256 digest of `x` followed by `y`
pub fn compute_digest(x: &[f64], y: &[f64]) -> String {
    let mut hasher = Sha256::new();
    write_series(&mut hasher, x);
    write_series(&mut hasher, y);
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sha256_hex(data: &[u8]) -> String {
        format!("{:x}", Sha256::digest(data))
    }

    #[test]
    fn test_format_value_is_pinned() {
        assert_eq!(format_value(5.0), "5");
        assert_eq!(format_value(0.1), "0.1");
        assert_eq!(format_value(-2.5), "-2.5");
        assert_eq!(format_value(-0.0), "-0");
        assert_eq!(format_value(1e21), "1000000000000000000000");
        assert_eq!(format_value(1e-7), "0.0000001");
        assert_eq!(format_value(0.1 + 0.2), "0.30000000000000004");
    }

    #[test]
    fn test_format_value_round_trips() {
        for value in [0.1, 1.0 / 3.0, -123.456e-12, f64::MAX, f64::MIN_POSITIVE] {
            let parsed: f64 = format_value(value).parse().unwrap();
            assert_eq!(parsed.to_bits(), value.to_bits());
        }
    }

    #[test]
    fn test_digest_matches_byte_stream() {
        let digest = compute_digest(&[1.0, 2.5], &[3.0, -4.25]);
        assert_eq!(digest, sha256_hex(b"1,2.53,-4.25"));
    }

    #[test]
    fn test_digest_of_empty_series() {
        // SHA-256 of the empty string
        assert_eq!(
            compute_digest(&[], &[]),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_digest_is_hex_256() {
        let digest = compute_digest(&[0.5], &[0.25]);
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_digest_is_order_sensitive() {
        let a = compute_digest(&[1.0, 2.0], &[3.0, 4.0]);
        assert_ne!(a, compute_digest(&[2.0, 1.0], &[3.0, 4.0]));
        assert_ne!(a, compute_digest(&[3.0, 4.0], &[1.0, 2.0]));
    }

    #[test]
    fn test_digest_detects_single_value_change() {
        let x = [5.1, 6.2, 7.3];
        let y = [1.0, 2.0, 3.0];
        let base = compute_digest(&x, &y);
        let mut tampered = y;
        tampered[1] = 2.0000000001;
        assert_ne!(base, compute_digest(&x, &tampered));
    }
}
