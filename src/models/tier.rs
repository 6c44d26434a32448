use serde::{Deserialize, Serialize};
use std::fmt;

/// Ranked tier ("elo"), ordered from lowest to highest.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tier {
    Straggler,   // 0-99
    Bronze,      // 100-299
    Silver,      // 300-499
    Gold,        // 500-749
    Platinum,    // 750-849
    Diamond,     // 850-949
    Master,      // 950-999
    GrandMaster, // 1000+
}

impl Tier {
    pub const ALL: [Tier; 8] = [
        Tier::Straggler,
        Tier::Bronze,
        Tier::Silver,
        Tier::Gold,
        Tier::Platinum,
        Tier::Diamond,
        Tier::Master,
        Tier::GrandMaster,
    ];

    /// Ordinal level, 0 for Straggler up to 7 for Grand Master.
    pub fn level(&self) -> u8 {
        *self as u8
    }

    pub fn from_level(level: u8) -> Option<Self> {
        Self::ALL.get(level as usize).copied()
    }

    pub fn is_lowest(&self) -> bool {
        *self == Tier::Straggler
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Straggler => "Straggler",
            Tier::Bronze => "Bronze",
            Tier::Silver => "Silver",
            Tier::Gold => "Gold",
            Tier::Platinum => "Platinum",
            Tier::Diamond => "Diamond",
            Tier::Master => "Master",
            Tier::GrandMaster => "Grand Master",
        }
    }

    /// Label used by the league's own spreadsheets and members.
    pub fn native_label(&self) -> &'static str {
        match self {
            Tier::Straggler => "Retardatário",
            Tier::Bronze => "Bronze",
            Tier::Silver => "Prata",
            Tier::Gold => "Ouro",
            Tier::Platinum => "Platina",
            Tier::Diamond => "Diamante",
            Tier::Master => "Mestre",
            Tier::GrandMaster => "Grão Mestre",
        }
    }

    /// Extra spellings members use for a tier.
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Tier::GrandMaster => &["grandmestre", "grão-mestre"],
            _ => &[],
        }
    }

    /// Embed colour for trainer cards.
    pub fn color(&self) -> u32 {
        match self {
            Tier::Straggler => 0xb73232,
            Tier::Bronze => 0xc0702d,
            Tier::Silver => 0x8e8e8e,
            Tier::Gold => 0xbfa617,
            Tier::Platinum => 0xd7d7d7,
            Tier::Diamond => 0x59d0e4,
            Tier::Master => 0x80e891,
            Tier::GrandMaster => 0x303030,
        }
    }

    pub fn badge_url(&self) -> &'static str {
        match self {
            Tier::Straggler => "http://bit.ly/2ZGr8qJ",
            Tier::Bronze => "http://bit.ly/2ZMhKWM",
            Tier::Silver => "http://bit.ly/2HCsbSr",
            Tier::Gold => "http://bit.ly/2HE0wQR",
            Tier::Platinum => "http://bit.ly/32nmwHw",
            Tier::Diamond => "http://bit.ly/34jdT2M",
            Tier::Master => "http://bit.ly/2ZNonYV",
            Tier::GrandMaster => "http://bit.ly/2Zyf0fv",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels_follow_declaration_order() {
        for (i, tier) in Tier::ALL.iter().enumerate() {
            assert_eq!(tier.level() as usize, i);
            assert_eq!(Tier::from_level(i as u8), Some(*tier));
        }
        assert_eq!(Tier::from_level(8), None);
    }

    #[test]
    fn test_only_straggler_is_lowest() {
        assert!(Tier::Straggler.is_lowest());
        assert!(Tier::ALL[1..].iter().all(|t| !t.is_lowest()));
    }
}
