//! Pure base62 and big-endian codecs for 64 bit identifiers.
//!
//! The base62 alphabet is ordered `0-9`, `A-Z`, `a-z`, which matches ASCII
//! order. Combined with fixed-width zero padding this makes the lexicographic
//! order of encoded ids equal to their numeric order.
//!
//! Decoding is lenient: characters outside the alphabet count as the zero
//! digit and over-length input is folded in arithmetically. The only failure
//! is signed 64 bit overflow, reported as `None`.

/// Base62 digits in ascending order.
pub const BASE62_ALPHABET: &[u8; 62] =
    b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Number of base62 digits needed for any `u64`.
pub const BASE62_LEN: usize = 11;

/// Number of bytes in the big-endian form.
pub const BE_BYTES_LEN: usize = 8;

const BASE: u64 = 62;

/// Encode `value` as exactly [`BASE62_LEN`] base62 digits, most significant
/// first, left-padded with `'0'`.
pub fn encode_base62(value: u64) -> [u8; BASE62_LEN] {
    let mut buf = [BASE62_ALPHABET[0]; BASE62_LEN];
    encode_base62_into(value, &mut buf);
    buf
}

/// Encode `value` into `buf`, right-aligned and left-padded with `'0'` to the
/// full length of `buf`.
///
/// Digits that do not fit are dropped from the most significant end, so `buf`
/// should hold at least [`BASE62_LEN`] bytes for arbitrary values.
pub fn encode_base62_into(mut value: u64, buf: &mut [u8]) {
    for slot in buf.iter_mut().rev() {
        let q = value / BASE;
        *slot = BASE62_ALPHABET[(value - q * BASE) as usize];
        value = q;
    }
}

/// Maps a base62 character to its digit value. Unknown characters map to 0.
#[inline]
pub fn digit(c: char) -> i64 {
    match c {
        '0'..='9' => c as i64 - '0' as i64,
        'A'..='Z' => c as i64 - 'A' as i64 + 10,
        'a'..='z' => c as i64 - 'a' as i64 + 36,
        _ => 0,
    }
}

/// Decode base62 text, most significant digit first.
///
/// Returns `None` as soon as the accumulated value leaves the signed 64 bit
/// range; the rest of the input is not consumed.
pub fn decode_base62(text: &str) -> Option<i64> {
    fold(text.chars().map(digit), BASE as i64)
}

/// Decode base62 digits given as raw bytes, e.g. the output of
/// [`encode_base62`]. Each byte is one digit.
pub fn decode_base62_bytes(bytes: &[u8]) -> Option<i64> {
    fold(bytes.iter().map(|&b| digit(b as char)), BASE as i64)
}

/// Encode `value` as two's-complement big-endian bytes.
#[inline]
pub fn encode_be_bytes(value: i64) -> [u8; BE_BYTES_LEN] {
    value.to_be_bytes()
}

/// Decode big-endian bytes by accumulating `value * 256 + byte`.
///
/// Input longer than [`BE_BYTES_LEN`] is accepted: extra leading bytes are
/// folded in like any other, so leading zeros are harmless and anything else
/// overflows. Returns `None` on signed 64 bit overflow.
pub fn decode_be_bytes(bytes: &[u8]) -> Option<i64> {
    fold(bytes.iter().map(|&b| i64::from(b)), 256)
}

fn fold(digits: impl Iterator<Item = i64>, base: i64) -> Option<i64> {
    let mut acc: i64 = 0;
    for d in digits {
        acc = acc.checked_mul(base)?.checked_add(d)?;
    }
    Some(acc)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoded(value: u64) -> String {
        String::from_utf8(encode_base62(value).to_vec()).unwrap()
    }

    #[test]
    fn encode_pads_to_eleven_digits() {
        assert_eq!(encoded(0), "00000000000");
        assert_eq!(encoded(1), "00000000001");
        assert_eq!(encoded(63), "00000000011");
        assert_eq!(encoded(124), "00000000020");
        assert_eq!(encoded(125), "00000000021");
        assert_eq!(encoded(i64::MAX as u64), "AzL8n0Y58m7");
        assert_eq!(encoded(u64::MAX), "LygHa16AHYF");
    }

    #[test]
    fn encode_into_shorter_buffer_keeps_low_digits() {
        let mut buf = [0u8; 3];
        encode_base62_into(125, &mut buf);
        assert_eq!(&buf, b"021");
    }

    #[test]
    fn digit_matches_alphabet_position() {
        for (i, &c) in BASE62_ALPHABET.iter().enumerate() {
            assert_eq!(digit(c as char), i as i64);
        }
        assert_eq!(digit('!'), 0);
        assert_eq!(digit('é'), 0);
    }

    #[test]
    fn decode_base62_values() {
        assert_eq!(decode_base62("00000000001"), Some(1));
        assert_eq!(decode_base62("11"), Some(63));
        assert_eq!(decode_base62("020"), Some(124));
        assert_eq!(decode_base62("0021"), Some(125));
        assert_eq!(decode_base62(""), Some(0));
        assert_eq!(decode_base62("AzL8n0Y58m7"), Some(i64::MAX));
        assert_eq!(decode_base62("ZZZZZZZZZZZ"), None);
        assert_eq!(decode_base62("ZZZZZZZZZZZZ"), None);
    }

    #[test]
    fn decode_treats_unknown_characters_as_zero() {
        assert_eq!(decode_base62("1-"), Some(62));
        assert_eq!(decode_base62("1é"), Some(62));
        assert_eq!(decode_base62_bytes(b"1-"), Some(62));
    }

    #[test]
    fn decode_base62_bytes_matches_text() {
        let buf = encode_base62(3_263_530_505_704_195);
        assert_eq!(decode_base62_bytes(&buf), Some(3_263_530_505_704_195));
    }

    #[test]
    fn encode_be_bytes_values() {
        assert_eq!(encode_be_bytes(0), [0; 8]);
        assert_eq!(encode_be_bytes(1), [0, 0, 0, 0, 0, 0, 0, 1]);
        assert_eq!(
            encode_be_bytes(3_263_530_505_704_195),
            [0, 11, 152, 41, 232, 129, 147, 3]
        );
        assert_eq!(
            encode_be_bytes(3_263_530_505_704_640),
            [0, 11, 152, 41, 232, 129, 148, 192]
        );
        assert_eq!(encode_be_bytes(-1), [255; 8]);
    }

    #[test]
    fn decode_be_bytes_values() {
        assert_eq!(decode_be_bytes(&[0, 0, 0, 0, 0, 0, 0, 1]), Some(1));
        assert_eq!(decode_be_bytes(&[0, 0, 0, 0, 0, 0, 0, 125]), Some(125));
        assert_eq!(
            decode_be_bytes(&[127, 255, 255, 255, 255, 255, 255, 255]),
            Some(i64::MAX)
        );
        assert_eq!(decode_be_bytes(&[255; 8]), None);
        assert_eq!(decode_be_bytes(&[255; 9]), None);
    }

    #[test]
    fn decode_be_bytes_folds_extra_length() {
        assert_eq!(decode_be_bytes(&[0, 0, 0, 0, 0, 0, 0, 0, 0, 7]), Some(7));
        assert_eq!(decode_be_bytes(&[1, 2]), Some(258));
    }
}
