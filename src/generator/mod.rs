//! Random password generation.
//!
//! Passwords always contain at least one character from every selected
//! class. When the requested length fits in the character set, no
//! character repeats.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::errors::{PwVaultError, Result};

pub const MIN_LENGTH: usize = 12;
pub const MAX_LENGTH: usize = 50;

const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
const DIGITS: &str = "0123456789";
const SYMBOLS: &str = "!@#$%^&*()-_=+[]{}|;:,.<>?/`~";

/// Which character classes to draw from, and how many characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorSettings {
    #[serde(default = "default_length")]
    pub length: usize,
    #[serde(default = "default_true")]
    pub uppercase: bool,
    #[serde(default = "default_true")]
    pub lowercase: bool,
    #[serde(default = "default_true")]
    pub numbers: bool,
    #[serde(default = "default_true")]
    pub symbols: bool,
}

fn default_length() -> usize {
    MIN_LENGTH
}

fn default_true() -> bool {
    true
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            length: default_length(),
            uppercase: true,
            lowercase: true,
            numbers: true,
            symbols: true,
        }
    }
}

impl GeneratorSettings {
    /// The selected classes, in a fixed order.
    fn classes(&self) -> Vec<&'static str> {
        [
            (self.uppercase, UPPERCASE),
            (self.lowercase, LOWERCASE),
            (self.numbers, DIGITS),
            (self.symbols, SYMBOLS),
        ]
        .into_iter()
        .filter_map(|(on, set)| on.then_some(set))
        .collect()
    }

    pub fn validate(&self) -> Result<()> {
        if !(MIN_LENGTH..=MAX_LENGTH).contains(&self.length) {
            return Err(PwVaultError::InvalidGeneratorSettings(format!(
                "length must be between {MIN_LENGTH} and {MAX_LENGTH} characters, got {}",
                self.length
            )));
        }
        if self.classes().is_empty() {
            return Err(PwVaultError::InvalidGeneratorSettings(
                "at least one character type must be selected".into(),
            ));
        }
        Ok(())
    }

    /// Number of distinct characters the password is drawn from.
    pub fn charset_size(&self) -> usize {
        self.classes().iter().map(|set| set.chars().count()).sum()
    }
}

/// A freshly generated password and its theoretical strength.
#[derive(Debug)]
pub struct GeneratedPassword {
    pub password: Zeroizing<String>,
    pub entropy_bits: f64,
}

/// `log2(charset_size) * length`, rounded to two decimals.
pub fn entropy_bits(charset_size: usize, length: usize) -> f64 {
    if charset_size == 0 || length == 0 {
        return 0.0;
    }
    let bits = (charset_size as f64).log2() * length as f64;
    (bits * 100.0).round() / 100.0
}

/// Generate a password according to `settings`.
pub fn generate(settings: &GeneratorSettings) -> Result<GeneratedPassword> {
    settings.validate()?;

    let mut rng = rand::rng();
    let classes = settings.classes();
    let charset: Vec<char> = classes.iter().flat_map(|set| set.chars()).collect();
    let unique = settings.length <= charset.len();

    // One guaranteed character per selected class.
    let mut chars: Vec<char> = classes
        .iter()
        .map(|set| {
            let set: Vec<char> = set.chars().collect();
            set[rng.random_range(0..set.len())]
        })
        .collect();

    let remaining = settings.length - chars.len();
    if unique {
        let mut available: Vec<char> = charset
            .iter()
            .copied()
            .filter(|c| !chars.contains(c))
            .collect();
        for _ in 0..remaining {
            let idx = rng.random_range(0..available.len());
            chars.push(available.swap_remove(idx));
        }
    } else {
        for _ in 0..remaining {
            chars.push(charset[rng.random_range(0..charset.len())]);
        }
    }

    chars.shuffle(&mut rng);

    Ok(GeneratedPassword {
        password: Zeroizing::new(chars.into_iter().collect()),
        entropy_bits: entropy_bits(charset.len(), settings.length),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_web_client() {
        let s = GeneratorSettings::default();
        assert_eq!(s.length, 12);
        assert!(s.uppercase && s.lowercase && s.numbers && s.symbols);
        assert_eq!(s.charset_size(), 26 + 26 + 10 + 29);
    }

    #[test]
    fn rejects_out_of_range_length() {
        for length in [0, 11, 51] {
            let s = GeneratorSettings {
                length,
                ..GeneratorSettings::default()
            };
            assert!(matches!(
                s.validate(),
                Err(PwVaultError::InvalidGeneratorSettings(_))
            ));
        }
    }

    #[test]
    fn rejects_empty_selection() {
        let s = GeneratorSettings {
            length: 16,
            uppercase: false,
            lowercase: false,
            numbers: false,
            symbols: false,
        };
        assert!(generate(&s).is_err());
    }

    #[test]
    fn entropy_formula() {
        assert_eq!(entropy_bits(16, 12), 48.0);
        assert_eq!(entropy_bits(0, 12), 0.0);
        assert!((entropy_bits(91, 12) - 78.09).abs() < 1e-9);
    }
}
