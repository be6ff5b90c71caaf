//! Base-36 codes for short recipe links.

use crate::error::ShortLinkError;

const ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

pub fn encode(id: i32) -> String {
    let mut n = id.unsigned_abs();
    let mut digits = Vec::new();

    loop {
        digits.push(char::from(ALPHABET[(n % 36) as usize]));
        n /= 36;
        if n == 0 {
            break;
        }
    }

    if id < 0 {
        digits.push('-');
    }

    digits.into_iter().rev().collect()
}

/// Decode a code produced by [`encode`]. Only canonical codes of positive ids are accepted.
pub fn decode(code: &str) -> Result<i32, ShortLinkError> {
    let invalid = || ShortLinkError::InvalidCode(code.to_string());

    let id = i32::from_str_radix(code, 36).map_err(|_| invalid())?;
    if id <= 0 || encode(id) != code {
        return Err(invalid());
    }

    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode() {
        assert_eq!(encode(1), "1");
        assert_eq!(encode(35), "z");
        assert_eq!(encode(36), "10");
        assert_eq!(encode(1295), "zz");
        assert_eq!(encode(0), "0");
    }

    #[test]
    fn test_decode() {
        assert_eq!(decode("10"), Ok(36));
        assert_eq!(decode("zz"), Ok(1295));
        assert_eq!(decode(&encode(i32::MAX)), Ok(i32::MAX));
    }

    #[test]
    fn test_decode_rejects_non_canonical() {
        for code in ["", "0", "00a", "ZZ", "+1", "-1", "a b", "zzzzzzzzz"] {
            assert!(decode(code).is_err(), "{code:?} should be rejected");
        }
    }
}
