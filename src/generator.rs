//! Random password generation.

use rand::rngs::OsRng;
use rand::seq::SliceRandom;
use secrecy::SecretString;

pub const GENERATED_LENGTH: usize = 16;

/// Letters, digits and the symbols offered by the generator.
pub const ALPHABET: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%^&*()-_=+[]{}|;:,.<>?";

/// Generates a 16 character password.
pub fn generate_password() -> SecretString {
    generate_password_with_len(GENERATED_LENGTH)
}

/// Each character is drawn independently and uniformly from [`ALPHABET`]
/// using the operating system CSPRNG.
pub fn generate_password_with_len(len: usize) -> SecretString {
    let mut rng = OsRng;
    let password: String = (0..len)
        .filter_map(|_| ALPHABET.choose(&mut rng).map(|&b| b as char))
        .collect();

    #[cfg(feature = "tracing")]
    tracing::debug!("generated a {} character password", len);

    SecretString::new(password.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::collections::HashSet;

    #[test]
    fn test_generated_length() {
        for _ in 0..100 {
            assert_eq!(generate_password().expose_secret().chars().count(), GENERATED_LENGTH);
        }
    }

    #[test]
    fn test_generated_chars_in_alphabet() {
        for _ in 0..100 {
            let pwd = generate_password();
            assert!(pwd.expose_secret().bytes().all(|b| ALPHABET.contains(&b)));
        }
    }

    #[test]
    fn test_alphabet_has_no_duplicates() {
        let unique: HashSet<_> = ALPHABET.iter().collect();
        assert_eq!(unique.len(), ALPHABET.len());
        assert_eq!(ALPHABET.len(), 26 + 26 + 10 + 26);
    }

    #[test]
    fn test_generated_passwords_differ() {
        let a = generate_password();
        let b = generate_password();
        assert_ne!(a.expose_secret(), b.expose_secret());
    }

    #[test]
    fn test_custom_length() {
        assert_eq!(generate_password_with_len(0).expose_secret(), "");
        assert_eq!(generate_password_with_len(64).expose_secret().len(), 64);
    }

    #[test]
    fn test_every_symbol_eventually_drawn() {
        let mut seen = HashSet::new();
        for _ in 0..2000 {
            seen.extend(generate_password().expose_secret().bytes());
        }
        assert_eq!(seen.len(), ALPHABET.len());
    }
}
