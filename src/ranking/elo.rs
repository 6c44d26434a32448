use crate::{
    models::{OakError, Result, Tier},
    utils::normalize,
};

/// Largest level gap allowed between two ranked opponents.
const MAX_LEVEL_GAP: u8 = 2;

/// Largest gap when the lowest tier is involved.
const MAX_LEVEL_GAP_LOWEST: u8 = 1;

/// Resolve a tier from any accepted spelling: the English label, the
/// league's native label, the compact enum name or a known alias, ignoring
/// case, accents and spaces.
pub fn tier_from_name(name: &str) -> Result<Tier> {
    let key = normalize(name);
    Tier::ALL
        .iter()
        .copied()
        .find(|tier| {
            normalize(tier.as_str()) == key
                || normalize(tier.native_label()) == key
                || normalize(&format!("{:?}", tier)) == key
                || tier.aliases().iter().any(|alias| normalize(alias) == key)
        })
        .ok_or_else(|| OakError::TierNotFound(name.to_string()))
}

/// Ordinal level (0..=7) for a tier name.
pub fn to_level(name: &str) -> Result<u8> {
    tier_from_name(name).map(|tier| tier.level())
}

/// Whether two levels may meet in a ranked battle.
///
/// Level 0 only meets levels up to one above it; everyone else may face
/// opponents up to two levels away.
pub fn validate_matchup(level_a: u8, level_b: u8) -> bool {
    let diff = level_a.abs_diff(level_b);
    let lowest = Tier::Straggler.level();

    if level_a == lowest || level_b == lowest {
        diff <= MAX_LEVEL_GAP_LOWEST
    } else {
        diff <= MAX_LEVEL_GAP
    }
}

pub fn is_valid_matchup(a: Tier, b: Tier) -> bool {
    validate_matchup(a.level(), b.level())
}
