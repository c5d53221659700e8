//! Dogtag to alias transform
//!
//! The backend does not accept public dogtags directly. Each character is
//! swapped through a fixed cipher over `0-9a-z` before alias resolution.

use std::collections::HashMap;

use crate::{Error, LookupTables, Result};

/// Symbols covered by the cipher
pub const ALPHABET: &str = "0123456789abcdefghijklmnopqrstuvwxyz";

/// Reference cipher pairs (plain, encoded)
///
/// Digits move forward by eight (mod 10), letters move back by two.
pub const REFERENCE_PAIRS: [(char, char); 36] = [
    ('0', '8'), ('1', '9'), ('2', '0'), ('3', '1'), ('4', '2'), ('5', '3'),
    ('6', '4'), ('7', '5'), ('8', '6'), ('9', '7'),
    ('a', 'y'), ('b', 'z'), ('c', 'a'), ('d', 'b'), ('e', 'c'), ('f', 'd'),
    ('g', 'e'), ('h', 'f'), ('i', 'g'), ('j', 'h'), ('k', 'i'), ('l', 'j'),
    ('m', 'k'), ('n', 'l'), ('o', 'm'), ('p', 'n'), ('q', 'o'), ('r', 'p'),
    ('s', 'q'), ('t', 'r'), ('u', 's'), ('v', 't'), ('w', 'u'), ('x', 'v'),
    ('y', 'w'), ('z', 'x'),
];

/// Bijective per-character substitution over [`ALPHABET`]
#[derive(Debug, Clone)]
pub struct SubstitutionTable {
    forward: HashMap<char, char>,
    inverse: HashMap<char, char>,
}

impl SubstitutionTable {
    /// Build a table from (plain, encoded) pairs
    ///
    /// Fails unless the pairs form a bijection over the whole alphabet.
    pub fn new(pairs: &[(char, char)]) -> Result<Self> {
        let mut forward = HashMap::with_capacity(ALPHABET.len());
        let mut inverse = HashMap::with_capacity(ALPHABET.len());

        for &(plain, encoded) in pairs {
            if !ALPHABET.contains(plain) || !ALPHABET.contains(encoded) {
                return Err(Error::Config(format!(
                    "Cipher pair ({:?}, {:?}) is outside 0-9a-z",
                    plain, encoded
                )));
            }
            if forward.insert(plain, encoded).is_some() {
                return Err(Error::Config(format!("Cipher maps {:?} twice", plain)));
            }
            if inverse.insert(encoded, plain).is_some() {
                return Err(Error::Config(format!(
                    "Cipher produces {:?} from more than one symbol",
                    encoded
                )));
            }
        }

        if forward.len() != ALPHABET.len() {
            return Err(Error::Config(format!(
                "Cipher covers {} of {} symbols",
                forward.len(),
                ALPHABET.len()
            )));
        }

        Ok(Self { forward, inverse })
    }

    /// Encode a dogtag into its alias
    pub fn encode(&self, input: &str) -> String {
        Self::substitute(&self.forward, input)
    }

    /// Recover a dogtag from its alias
    pub fn decode(&self, input: &str) -> String {
        Self::substitute(&self.inverse, input)
    }

    fn substitute(map: &HashMap<char, char>, input: &str) -> String {
        input
            .chars()
            .flat_map(char::to_lowercase)
            .map(|c| map.get(&c).copied().unwrap_or(c))
            .collect()
    }
}

impl Default for SubstitutionTable {
    fn default() -> Self {
        Self::new(&REFERENCE_PAIRS).expect("Reference cipher is not a bijection")
    }
}

/// Alias sent to the backend for a dogtag
pub fn encode(tables: &LookupTables, dogtag: &str) -> String {
    tables.cipher.encode(dogtag)
}
