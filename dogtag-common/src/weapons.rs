//! Weapon code translation
//!
//! Profiles store weapons as internal codes such as `AR11_upgrade3`. The
//! leading code is swapped for the in-game name; any suffix is kept.

use serde::Deserialize;

/// Reference weapon codes in lookup order
pub const REFERENCE_CODES: [(&str, &str); 21] = [
    ("AR11", "Red34"),
    ("AR71", "Grinder"),
    ("SR26", "Imp-S"),
    ("SR31", "BSW77"),
    ("SMG71", "Whisper"),
    ("SG41", "LSG-2SB"),
    ("SG31", "DBS 4"),
    ("AR26", "KOG V"),
    ("AR31", "PR39"),
    ("SG71", "Buckshot"),
    ("SG08", "Searing"),
    ("SMG31", "Bramson"),
    ("SMG04", "Bosk"),
    ("SMG26", "FS80"),
    ("SR41", "Dread Eye"),
    ("SR71", "Vice"),
    ("LMG71", "R.C.F.-08"),
    ("LMG41", "OR-HE"),
    ("LMG31", "Hauzzer 45"),
    ("LMG26", "Shred-4"),
    ("LMG25", "QKR-89"),
];

/// One prefix translation
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CodeEntry {
    pub prefix: String,
    pub name: String,
}

/// Ordered prefix table; the first matching entry wins
#[derive(Debug, Clone)]
pub struct CodeTable {
    entries: Vec<CodeEntry>,
}

impl CodeTable {
    pub fn new(entries: Vec<CodeEntry>) -> Self {
        Self { entries }
    }

    /// Append entries after the existing ones
    pub fn extend<I: IntoIterator<Item = CodeEntry>>(&mut self, extra: I) {
        self.entries.extend(extra);
    }

    pub fn entries(&self) -> &[CodeEntry] {
        &self.entries
    }

    /// Translate a raw weapon code
    ///
    /// Only the first occurrence of the matched prefix is replaced. Codes
    /// with no known prefix come back unchanged.
    pub fn translate(&self, raw: &str) -> String {
        self.entries
            .iter()
            .find(|entry| raw.starts_with(entry.prefix.as_str()))
            .map(|entry| raw.replacen(entry.prefix.as_str(), &entry.name, 1))
            .unwrap_or_else(|| raw.to_string())
    }
}

impl Default for CodeTable {
    fn default() -> Self {
        Self::new(
            REFERENCE_CODES
                .iter()
                .map(|&(prefix, name)| CodeEntry {
                    prefix: prefix.to_string(),
                    name: name.to_string(),
                })
                .collect(),
        )
    }
}
