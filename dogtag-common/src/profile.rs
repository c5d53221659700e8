//! Profile normalization
//!
//! Turns a raw backend profile into the flat summary shown to users.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::tree::{
    as_score, collect_by_key_casefold, display_text, find_first_by_key, is_truthy,
    sum_by_key_substring,
};
use crate::LookupTables;

pub const NO_CLAN: &str = "No Clan";
pub const UNKNOWN_COUNTRY: &str = "Unknown";

/// Normalized player profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileSummary {
    pub clan_name: String,
    pub country: String,
    /// Tier label, e.g. `VIP 3`
    pub vip_level: String,
    pub vip_points: i64,
    /// Weapon names in profile order, duplicates kept
    pub weapons: Vec<String>,
    pub total_kills: i64,
}

/// Build a [`ProfileSummary`] from a raw profile
///
/// Never fails. Missing or falsy fields fall back to `No Clan`, `Unknown`
/// and zero points. Kills are summed over every integer whose key contains
/// `kill`; see [`sum_by_key_substring`] for how nested counters are read.
pub fn normalize(tables: &LookupTables, raw: &Value) -> ProfileSummary {
    let clan_name = text_or(find_first_by_key(raw, "name"), NO_CLAN);
    let country = text_or(find_first_by_key(raw, "country"), UNKNOWN_COUNTRY);

    let vip_points = find_first_by_key(raw, "vip_points")
        .filter(|v| is_truthy(v))
        .map(as_score)
        .unwrap_or(0);

    let weapons: Vec<String> = collect_by_key_casefold(raw, "weapons")
        .into_iter()
        .map(|code| tables.weapons.translate(&display_text(code)))
        .collect();

    let total_kills = sum_by_key_substring(raw, "kill");

    debug!(
        weapons = weapons.len(),
        total_kills,
        vip_points,
        "Normalized profile"
    );

    ProfileSummary {
        clan_name,
        country,
        vip_level: tables.tiers.label(vip_points),
        vip_points,
        weapons,
        total_kills,
    }
}

fn text_or(value: Option<&Value>, fallback: &str) -> String {
    value
        .filter(|v| is_truthy(v))
        .map(display_text)
        .unwrap_or_else(|| fallback.to_string())
}
