//! VIP tier classification

use crate::{Error, Result};

/// Reference thresholds: (minimum points, tier)
pub const REFERENCE_TIERS: [(i64, u8); 10] = [
    (30000, 10),
    (17500, 9),
    (12500, 8),
    (6500, 7),
    (4300, 6),
    (2000, 5),
    (860, 4),
    (350, 3),
    (150, 2),
    (0, 1),
];

/// Threshold table, held sorted by minimum descending
#[derive(Debug, Clone)]
pub struct TierTable {
    tiers: Vec<(i64, u8)>,
}

impl TierTable {
    pub fn new(mut tiers: Vec<(i64, u8)>) -> Result<Self> {
        if tiers.is_empty() {
            return Err(Error::Config("Tier table is empty".to_string()));
        }
        tiers.sort_by(|a, b| b.0.cmp(&a.0));
        Ok(Self { tiers })
    }

    /// Tier for a points total
    ///
    /// Scores under every threshold land in the lowest tier; scores above
    /// the top threshold stay in the top tier.
    pub fn classify(&self, score: i64) -> u8 {
        self.tiers
            .iter()
            .find(|(minimum, _)| *minimum <= score)
            .or_else(|| self.tiers.last())
            .map(|(_, tier)| *tier)
            .unwrap_or_default()
    }

    /// Display label, e.g. `VIP 4`
    pub fn label(&self, score: i64) -> String {
        format!("VIP {}", self.classify(score))
    }

    pub fn lowest(&self) -> u8 {
        self.tiers.last().map(|(_, tier)| *tier).unwrap_or_default()
    }

    pub fn highest(&self) -> u8 {
        self.tiers.first().map(|(_, tier)| *tier).unwrap_or_default()
    }
}

impl Default for TierTable {
    fn default() -> Self {
        Self::new(REFERENCE_TIERS.to_vec()).expect("Reference tier table is empty")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundaries() {
        let table = TierTable::default();
        assert_eq!(table.classify(0), 1);
        assert_eq!(table.classify(149), 1);
        assert_eq!(table.classify(150), 2);
        assert_eq!(table.classify(859), 3);
        assert_eq!(table.classify(860), 4);
        assert_eq!(table.classify(29999), 9);
        assert_eq!(table.classify(30000), 10);
    }

    #[test]
    fn test_clamps_at_both_ends() {
        let table = TierTable::default();
        assert_eq!(table.classify(-500), table.lowest());
        assert_eq!(table.classify(i64::MIN), 1);
        assert_eq!(table.classify(i64::MAX), table.highest());
        assert_eq!(table.highest(), 10);
    }

    #[test]
    fn test_monotonic() {
        let table = TierTable::default();
        let mut previous = table.classify(-10);
        for score in (-10..40_000).step_by(7) {
            let tier = table.classify(score);
            assert!(tier >= previous, "tier dropped at {}", score);
            previous = tier;
        }
    }

    #[test]
    fn test_default_is_reference_table() {
        let table = TierTable::default();
        for (minimum, tier) in REFERENCE_TIERS {
            assert_eq!(table.classify(minimum), tier);
        }
        assert_eq!(table.lowest(), 1);
    }

    #[test]
    fn test_label() {
        let table = TierTable::default();
        assert_eq!(table.label(0), "VIP 1");
        assert_eq!(table.label(12500), "VIP 8");
    }

    #[test]
    fn test_new_sorts_and_rejects_empty() {
        let table = TierTable::new(vec![(0, 1), (100, 3), (50, 2)]).unwrap();
        assert_eq!(table.classify(75), 2);
        assert_eq!(table.classify(100), 3);
        assert!(TierTable::new(Vec::new()).is_err());
    }

    #[test]
    fn test_score_below_lowest_minimum() {
        let table = TierTable::new(vec![(10, 2), (5, 1)]).unwrap();
        assert_eq!(table.classify(0), 1);
    }
}
