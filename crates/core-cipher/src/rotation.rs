use crate::CipherModule;

/// Case-preserving rotation over the 26 ASCII letters; everything else passes through.
///
/// Works on bytes as well as text: bytes outside `A-Z`/`a-z` (including every
/// byte of a multi-byte or non-UTF-8 sequence) are copied unchanged.
///
/// Keys are reduced with Euclidean remainder, so `29` rotates like `3` and `-1`
/// like `25`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RotationCipher;

impl RotationCipher {
    pub fn rotate(text: &str, key: i64) -> String {
        let shift = key.rem_euclid(26) as u8;
        text.chars()
            .map(|c| match c {
                'a'..='z' => rotate_in(c, b'a', shift),
                'A'..='Z' => rotate_in(c, b'A', shift),
                other => other,
            })
            .collect()
    }

    pub fn rotate_bytes(line: &[u8], key: i64) -> Vec<u8> {
        let shift = key.rem_euclid(26) as u8;
        line.iter()
            .map(|&b| match b {
                b'a'..=b'z' => rotate_byte(b, b'a', shift),
                b'A'..=b'Z' => rotate_byte(b, b'A', shift),
                other => other,
            })
            .collect()
    }
}

fn rotate_in(c: char, base: u8, shift: u8) -> char {
    char::from(rotate_byte(c as u8, base, shift))
}

fn rotate_byte(b: u8, base: u8, shift: u8) -> u8 {
    base + (b - base + shift) % 26
}

impl CipherModule for RotationCipher {
    fn name(&self) -> &'static str {
        "rotation"
    }

    fn encrypt(&self, text: &str, key: i64) -> String {
        Self::rotate(text, key)
    }

    fn decrypt(&self, text: &str, key: i64) -> String {
        Self::rotate(text, -key.rem_euclid(26))
    }

    fn encrypt_bytes(&self, line: &[u8], key: i64) -> Vec<u8> {
        Self::rotate_bytes(line, key)
    }

    fn decrypt_bytes(&self, line: &[u8], key: i64) -> Vec<u8> {
        Self::rotate_bytes(line, -key.rem_euclid(26))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encrypts_hello_with_key_three() {
        assert_eq!(RotationCipher.encrypt("Hello", 3), "Khoor");
        assert_eq!(RotationCipher.decrypt("Khoor", 3), "Hello");
    }

    #[test]
    fn key_is_reduced_mod_26() {
        assert_eq!(RotationCipher.encrypt("Hello", 29), "Khoor");
        assert_eq!(RotationCipher.decrypt("Khoor", 29), "Hello");
        assert_eq!(RotationCipher.encrypt("abc", 26), "abc");
    }

    #[test]
    fn wraps_within_case() {
        assert_eq!(RotationCipher.encrypt("xyz XYZ", 3), "abc ABC");
    }

    #[test]
    fn non_alphabetic_passes_through() {
        assert_eq!(RotationCipher.encrypt("a1, b2! é", 1), "b1, c2! é");
    }

    #[test]
    fn bytes_outside_ascii_letters_pass_through() {
        let line = b"caf\xe9 \xff!";
        let secret = RotationCipher.encrypt_bytes(line, 3);
        assert_eq!(secret, b"fdi\xe9 \xff!".to_vec());
        assert_eq!(RotationCipher.decrypt_bytes(&secret, 3), line.to_vec());
    }

    #[test]
    fn negative_key_rotates_backwards() {
        assert_eq!(RotationCipher.encrypt("abc", -1), "zab");
        assert_eq!(RotationCipher.decrypt("zab", -1), "abc");
    }
}
