use crate::models::{OakError, Result, Tier};

/// Inclusive lower bound of each tier, ascending. Each band ends where the
/// next one starts; the last band is unbounded.
pub const TIER_BANDS: [(u32, Tier); 8] = [
    (0, Tier::Straggler),
    (100, Tier::Bronze),
    (300, Tier::Silver),
    (500, Tier::Gold),
    (750, Tier::Platinum),
    (850, Tier::Diamond),
    (950, Tier::Master),
    (1000, Tier::GrandMaster),
];

/// Map a ranked score to its tier.
pub fn classify(score: u32) -> Tier {
    for (i, (lower, tier)) in TIER_BANDS.iter().enumerate() {
        let upper = TIER_BANDS.get(i + 1).map(|(next, _)| *next);
        if score >= *lower && upper.map_or(true, |u| score < u) {
            return *tier;
        }
    }
    Tier::GrandMaster
}

/// Parse a score cell and classify it.
pub fn classify_str(score: &str) -> Result<Tier> {
    parse_score(score).map(classify)
}

pub fn parse_score(score: &str) -> Result<u32> {
    score
        .trim()
        .parse::<u32>()
        .map_err(|_| OakError::FormatError(score.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_straggler_band() {
        for score in 0..100 {
            assert_eq!(classify(score), Tier::Straggler);
        }
    }

    #[test]
    fn test_boundaries_flip_exactly() {
        let boundaries = [
            (100, Tier::Straggler, Tier::Bronze),
            (300, Tier::Bronze, Tier::Silver),
            (500, Tier::Silver, Tier::Gold),
            (750, Tier::Gold, Tier::Platinum),
            (850, Tier::Platinum, Tier::Diamond),
            (950, Tier::Diamond, Tier::Master),
            (1000, Tier::Master, Tier::GrandMaster),
        ];

        for (boundary, below, at) in boundaries {
            assert_eq!(classify(boundary - 1), below, "score {}", boundary - 1);
            assert_eq!(classify(boundary), at, "score {}", boundary);
        }
    }

    #[test]
    fn test_grand_master_is_unbounded() {
        assert_eq!(classify(1000), Tier::GrandMaster);
        assert_eq!(classify(5000), Tier::GrandMaster);
        assert_eq!(classify(u32::MAX), Tier::GrandMaster);
    }

    #[test]
    fn test_classify_str() {
        assert_eq!(classify_str(" 420 ").unwrap(), Tier::Silver);
        assert!(matches!(classify_str("abc"), Err(OakError::FormatError(_))));
        assert!(matches!(classify_str("-5"), Err(OakError::FormatError(_))));
    }
}
