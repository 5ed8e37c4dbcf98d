use crate::decompose::first_standard_pattern;
use crate::tile::Counts;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialHand {
    SevenPairs,
    ThirteenOrphans,
}

/// Indices of the 13 terminal and honor kinds.
pub const ORPHANS: [usize; 13] = [0, 8, 9, 17, 18, 26, 27, 28, 29, 30, 31, 32, 33];

/// Seven distinct kinds, each held exactly twice.
pub fn is_seven_pairs(counts: &Counts) -> bool {
    counts.iter().all(|&c| c == 0 || c == 2) && counts.iter().filter(|&&c| c == 2).count() == 7
}

/// One of each terminal/honor kind, one of them doubled, nothing else.
pub fn is_thirteen_orphans(counts: &Counts) -> bool {
    let mut pair_found = false;

    for (i, &c) in counts.iter().enumerate() {
        let orphan = ORPHANS.contains(&i);
        match (orphan, c) {
            (false, 0) | (true, 1) => {}
            (true, 2) if !pair_found => pair_found = true,
            _ => return false,
        }
    }

    pair_found
}

pub fn detect_special(counts: &Counts) -> Option<SpecialHand> {
    if is_seven_pairs(counts) {
        Some(SpecialHand::SevenPairs)
    } else if is_thirteen_orphans(counts) {
        Some(SpecialHand::ThirteenOrphans)
    } else {
        None
    }
}

/// Whether a concealed hand wins under any shape. Seven pairs and thirteen
/// orphans only apply to a full 14-tile concealed hand.
pub fn is_complete(counts: &Counts) -> bool {
    let total: usize = counts.iter().map(|&c| c as usize).sum();
    if total % 3 != 2 {
        return false;
    }
    if first_standard_pattern(counts, (total - 2) / 3).is_some() {
        return true;
    }
    total == 14 && detect_special(counts).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile::{parse_tiles, to_counts};

    fn counts(codes: &[&str]) -> Counts {
        to_counts(&parse_tiles(codes).unwrap())
    }

    #[test]
    fn seven_pairs_needs_seven_distinct_kinds() {
        let c = counts(&[
            "m1", "m1", "m5", "m5", "p2", "p2", "p9", "p9", "s3", "s3", "z1", "z1", "z7", "z7",
        ]);
        assert!(is_seven_pairs(&c));
        assert_eq!(detect_special(&c), Some(SpecialHand::SevenPairs));

        // a quad is not two pairs
        let c = counts(&[
            "m1", "m1", "m1", "m1", "p2", "p2", "p9", "p9", "s3", "s3", "z1", "z1", "z7", "z7",
        ]);
        assert!(!is_seven_pairs(&c));
    }

    #[test]
    fn thirteen_orphans_shape() {
        let c = counts(&[
            "m1", "m9", "p1", "p9", "s1", "s9", "z1", "z2", "z3", "z4", "z5", "z6", "z7", "z7",
        ]);
        assert!(is_thirteen_orphans(&c));

        // simple tile in place of the pair
        let c = counts(&[
            "m1", "m9", "p1", "p9", "s1", "s9", "z1", "z2", "z3", "z4", "z5", "z6", "z7", "m5",
        ]);
        assert!(!is_thirteen_orphans(&c));

        // two pairs, one orphan missing
        let c = counts(&[
            "m1", "m1", "p1", "p9", "s1", "s9", "z1", "z2", "z3", "z4", "z5", "z6", "z7", "z7",
        ]);
        assert!(!is_thirteen_orphans(&c));
    }

    #[test]
    fn completeness_covers_every_shape() {
        let standard = counts(&[
            "m1", "m2", "m3", "p4", "p5", "p6", "s7", "s8", "s9", "z5", "z5", "z5", "m9", "m9",
        ]);
        assert!(is_complete(&standard));

        let pairs = counts(&[
            "m1", "m1", "m5", "m5", "p2", "p2", "p9", "p9", "s3", "s3", "z1", "z1", "z7", "z7",
        ]);
        assert!(is_complete(&pairs));

        let small = counts(&["s4", "s5", "s6", "z6", "z6"]);
        assert!(is_complete(&small));

        let broken = counts(&[
            "m1", "m2", "m4", "p4", "p5", "p6", "s7", "s8", "s9", "z5", "z5", "z5", "m9", "m9",
        ]);
        assert!(!is_complete(&broken));
    }
}
