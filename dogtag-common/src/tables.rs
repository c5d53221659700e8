//! Static lookup tables
//!
//! Built once at startup and shared read-only by every request.

use once_cell::sync::Lazy;

use crate::alias::SubstitutionTable;
use crate::config::ServiceConfig;
use crate::vip::TierTable;
use crate::weapons::CodeTable;

/// Reference tables with no configuration applied
pub static REFERENCE_TABLES: Lazy<LookupTables> = Lazy::new(LookupTables::default);

/// Every table the normalizer and alias transform read
#[derive(Debug, Clone, Default)]
pub struct LookupTables {
    pub cipher: SubstitutionTable,
    pub weapons: CodeTable,
    pub tiers: TierTable,
}

impl LookupTables {
    /// Reference tables plus any weapon codes from the config file
    pub fn from_config(config: &ServiceConfig) -> Self {
        let mut tables = Self::default();
        tables.weapons.extend(config.weapon.iter().cloned());
        tables
    }
}
