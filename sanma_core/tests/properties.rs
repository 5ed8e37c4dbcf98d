//! Property-based invariants for the evaluator.

use proptest::prelude::*;
use sanma_core::{
    all_kinds, calc_points, calculate_shanten, evaluate_hand, is_complete, round_up_100,
    standard_patterns, to_counts, Counts, HandResult, Meld, MeldKind, RuleContext, Ruleset, Seat,
    Tile, WinType, Wind, KINDS,
};

/// Build a complete hand from four (triplet?, kind) seeds plus a pair kind.
/// Sequence seeds that cannot start a run fall back to a triplet.
fn build_hand(seeds: &[(bool, usize)], pair: usize) -> Vec<Tile> {
    let mut hand = vec![];
    for &(triplet, i) in seeds {
        let t = Tile::from_index(i).unwrap();
        match (triplet, t.offset(1).zip(t.offset(2))) {
            (false, Some((b, c))) => hand.extend([t, b, c]),
            _ => hand.extend([t; 3]),
        }
    }
    let p = Tile::from_index(pair).unwrap();
    hand.extend([p, p]);
    hand
}

fn legal(counts: &Counts) -> bool {
    counts.iter().all(|&c| c <= 4)
}

fn complete_hand() -> impl Strategy<Value = Vec<Tile>> {
    (
        prop::collection::vec((any::<bool>(), 0..KINDS), 4),
        0..KINDS,
    )
        .prop_map(|(seeds, pair)| build_hand(&seeds, pair))
        .prop_filter("more than four copies", |h| legal(&to_counts(h)))
}

/// Tiles of `hand` that `target` does not account for, copies included.
fn distance(hand: &[Tile], target: &[Tile]) -> usize {
    let (a, b) = (to_counts(hand), to_counts(target));
    a.iter().zip(b).map(|(&x, y)| x.saturating_sub(y) as usize).sum()
}

fn consumed(pair: Tile, melds: &[Meld]) -> Counts {
    let mut c = [0u8; KINDS];
    c[pair.index()] += 2;
    for m in melds {
        for t in m.tiles() {
            c[t.index()] += 1;
        }
    }
    c
}

#[test]
fn codec_round_trip() {
    for (i, t) in all_kinds().enumerate() {
        assert_eq!(t.index(), i);
        assert_eq!(Tile::from_index(i), Some(t));
        assert_eq!(Tile::from_code(&t.code()).unwrap(), t);
    }
    assert!(Tile::from_index(KINDS).is_none());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    #[test]
    fn rounding_is_idempotent(x in 0u64..100_000_000) {
        let r = round_up_100(x).unwrap();
        prop_assert_eq!(round_up_100(r), Some(r));
        prop_assert!(r >= x && r - x < 100);
    }

    #[test]
    fn settlement_sums_to_zero(
        han in 1u32..14,
        fu in (2u32..12).prop_map(|f| f * 10),
        winner in 0usize..3,
        loser_step in 1usize..3,
        tsumo in any::<bool>(),
        honba in 0u32..10,
        kyotaku in 0u32..5,
    ) {
        let hand = HandResult {
            han,
            yakuman: 0,
            fu,
            yaku: vec![],
            dora: 0,
            base_points: fu as u64 * (1u64 << (han + 2)),
        };
        let winner = Seat::ALL[winner];
        let loser = Seat::ALL[(winner as usize + loser_step) % 3];
        let (win_type, loser) = if tsumo {
            (WinType::Tsumo, None)
        } else {
            (WinType::Ron, Some(loser))
        };

        let b = calc_points(&hand, winner, win_type, loser, honba, kyotaku).unwrap();
        prop_assert_eq!(b.deltas.values().sum::<i64>(), 0);
        prop_assert!(b.deltas[&winner] > 0);
        prop_assert_eq!(b.pool_bonus, 1000 * kyotaku as i64);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn decompositions_consume_exactly_the_hand(hand in complete_hand()) {
        let counts = to_counts(&hand);
        let patterns = standard_patterns(&counts, 4, 128);
        prop_assert!(!patterns.is_empty());
        for p in &patterns {
            prop_assert_eq!(p.melds.len(), 4);
            prop_assert_eq!(consumed(p.pair, &p.melds), counts);
            for m in &p.melds {
                if m.kind == MeldKind::Sequence {
                    prop_assert!(!m.tile.is_honor());
                }
            }
        }
    }

    #[test]
    fn built_hands_are_complete(hand in complete_hand()) {
        let counts = to_counts(&hand);
        prop_assert!(is_complete(&counts));
        prop_assert_eq!(calculate_shanten(&hand).unwrap(), -1);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    /// Swapping one tile of a complete hand for an arbitrary kind: shanten is
    /// -1 exactly when the result still completes.
    #[test]
    fn swapped_hands_agree_with_completeness(
        hand in complete_hand(),
        pos in 0usize..14,
        replacement in 0..KINDS,
    ) {
        let mut swapped = hand.clone();
        swapped[pos] = Tile::from_index(replacement).unwrap();
        let counts = to_counts(&swapped);
        prop_assume!(legal(&counts));

        let s = calculate_shanten(&swapped).unwrap();
        prop_assert_eq!(s == -1, is_complete(&counts));
        prop_assert!((-1..=2).contains(&s));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    /// Two tiles of a complete hand are swapped out, then one is put back.
    /// The restored hand is one tile closer to the complete hand, so its
    /// shanten must not exceed that of the doubly swapped one.
    #[test]
    fn restoring_a_tile_never_raises_shanten(
        hand in complete_hand(),
        first in 0usize..14,
        step in 1usize..14,
        x in 0..KINDS,
        y in 0..KINDS,
    ) {
        let second = (first + step) % 14;
        let mut swapped = hand.clone();
        swapped[first] = Tile::from_index(x).unwrap();
        swapped[second] = Tile::from_index(y).unwrap();
        prop_assume!(legal(&to_counts(&swapped)));
        prop_assume!(!is_complete(&to_counts(&swapped)));

        let mut restored = swapped.clone();
        restored[first] = hand[first];
        prop_assume!(legal(&to_counts(&restored)));
        prop_assume!(distance(&restored, &hand) < distance(&swapped, &hand));

        let before = calculate_shanten(&swapped).unwrap();
        let after = calculate_shanten(&restored).unwrap();
        prop_assert!(after <= before, "{} -> {}", before, after);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn default_cap_matches_a_wide_search(hand in complete_hand(), tsumo in any::<bool>()) {
        let win = if tsumo { WinType::Tsumo } else { WinType::Ron };
        let ctx = RuleContext::new(win, Wind::E, Wind::S);
        let wide = Ruleset {
            decomposition_cap: 4096,
            ..Ruleset::default()
        };

        let capped = evaluate_hand(&hand, &ctx, &Ruleset::default()).unwrap();
        let full = evaluate_hand(&hand, &ctx, &wide).unwrap();
        prop_assert!(capped.is_some());
        prop_assert_eq!(capped, full);
    }
}
