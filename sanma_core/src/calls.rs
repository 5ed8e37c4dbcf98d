use crate::error::CoreResult;
use crate::shanten::{hand_counts, Estimator};
use crate::tile::{to_counts, Tile};

fn held(hand: &[Tile], target: Tile) -> usize {
    hand.iter().filter(|&&t| t == target).count()
}

/// Pon needs two matching concealed tiles.
pub fn can_pon(hand: &[Tile], target: Tile) -> bool {
    held(hand, target) >= 2
}

/// Open kan on a discard needs three matching concealed tiles.
pub fn can_kan(hand: &[Tile], target: Tile) -> bool {
    held(hand, target) >= 3
}

/// Every kind held four times, in canonical order.
pub fn concealed_kan_options(hand: &[Tile]) -> Vec<Tile> {
    let counts = to_counts(hand);
    counts
        .iter()
        .enumerate()
        .filter(|(_, &c)| c == 4)
        .filter_map(|(i, _)| Tile::from_index(i))
        .collect()
}

/// Sequences the discard can complete, each sorted low to high.
pub fn chi_options(hand: &[Tile], target: Tile) -> Vec<[Tile; 3]> {
    if target.is_honor() {
        return vec![];
    }

    let r = target.rank() as i8;
    let same_suit = |rank: i8| -> Option<Tile> {
        if !(1..=9).contains(&rank) {
            return None;
        }
        Tile::from_index((target.index() as i8 + rank - r) as usize)
    };

    [(r - 2, r - 1), (r - 1, r + 1), (r + 1, r + 2)]
        .into_iter()
        .filter_map(|(a, b)| {
            let (ta, tb) = (same_suit(a)?, same_suit(b)?);
            (hand.contains(&ta) && hand.contains(&tb)).then(|| {
                let mut option = [ta, target, tb];
                option.sort_unstable();
                option
            })
        })
        .collect()
}

/// A just-drawn hand may declare riichi when some discard leaves it tenpai.
pub fn can_declare_riichi(hand: &[Tile], already_declared: bool) -> CoreResult<bool> {
    let counts = hand_counts(hand)?;
    if already_declared || hand.len() % 3 != 2 {
        return Ok(false);
    }

    let mut est = Estimator::default();
    let mut scratch = counts;
    for i in 0..scratch.len() {
        if scratch[i] == 0 {
            continue;
        }
        scratch[i] -= 1;
        let tenpai = est.shanten(&scratch) == 0;
        scratch[i] += 1;
        if tenpai {
            return Ok(true);
        }
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile::parse_tiles;

    fn tiles(codes: &[&str]) -> Vec<Tile> {
        parse_tiles(codes).unwrap()
    }

    fn t(code: &str) -> Tile {
        Tile::from_code(code).unwrap()
    }

    #[test]
    fn pon_and_kan_count_copies() {
        let hand = tiles(&["z5", "z5", "z5", "m1", "m1", "p3"]);
        assert!(can_pon(&hand, t("z5")));
        assert!(can_kan(&hand, t("z5")));
        assert!(can_pon(&hand, t("m1")));
        assert!(!can_kan(&hand, t("m1")));
        assert!(!can_pon(&hand, t("p3")));
    }

    #[test]
    fn concealed_kan_lists_quads_only() {
        let hand = tiles(&["s7", "s7", "s7", "s7", "m1", "m1", "m1", "p2"]);
        assert_eq!(concealed_kan_options(&hand), vec![t("s7")]);
        assert!(concealed_kan_options(&tiles(&["m1", "m1", "m1"])).is_empty());
    }

    #[test]
    fn chi_offers_each_completion() {
        let hand = tiles(&["p3", "p4", "p6", "p7", "m1"]);
        let opts = chi_options(&hand, t("p5"));
        assert_eq!(
            opts,
            vec![
                [t("p3"), t("p4"), t("p5")],
                [t("p4"), t("p5"), t("p6")],
                [t("p5"), t("p6"), t("p7")],
            ]
        );

        let edge = tiles(&["p3", "p4", "p7"]);
        assert_eq!(chi_options(&edge, t("p5")), vec![[t("p3"), t("p4"), t("p5")]]);
    }

    #[test]
    fn chi_stays_inside_the_suit() {
        let hand = tiles(&["m8", "m9", "p1", "p2"]);
        assert!(chi_options(&hand, t("p1")).is_empty());
        assert_eq!(chi_options(&hand, t("m7")), vec![[t("m7"), t("m8"), t("m9")]]);
        assert_eq!(chi_options(&hand, t("p3")), vec![[t("p1"), t("p2"), t("p3")]]);
        assert!(chi_options(&tiles(&["z1", "z2"]), t("z3")).is_empty());
    }

    #[test]
    fn riichi_needs_a_tenpai_discard() {
        let hand = tiles(&[
            "m1", "m2", "m3", "p4", "p5", "p6", "s7", "s8", "s9", "z5", "z5", "z5", "m9", "z1",
        ]);
        assert!(can_declare_riichi(&hand, false).unwrap());
        assert!(!can_declare_riichi(&hand, true).unwrap());

        let far = tiles(&[
            "m1", "m4", "m7", "p2", "p5", "p8", "s3", "s6", "s9", "z1", "z2", "z3", "z4", "z5",
        ]);
        assert!(!can_declare_riichi(&far, false).unwrap());
    }
}
