use crate::error::{CoreError, CoreResult};
use crate::special::is_complete;
use crate::tile::{check_copies, to_counts, Counts, Tile, KINDS};
use std::collections::HashMap;

/// Value reported for a drawn hand when no discard yields a better estimate.
pub const SHANTEN_CEILING: i8 = 8;

/// Distance to tenpai: -1 complete, 0 tenpai, 1 one step away, 2 anything
/// further. Accepts `13 - 3k` (waiting) and `14 - 3k` (just drew) hands.
pub fn calculate_shanten(hand: &[Tile]) -> CoreResult<i8> {
    let counts = hand_counts(hand)?;
    Ok(Estimator::default().shanten(&counts))
}

/// Validate a concealed hand's length and copies, returning its counts.
pub(crate) fn hand_counts(hand: &[Tile]) -> CoreResult<Counts> {
    let len = hand.len();
    if len == 0 || len > 14 || len % 3 == 0 {
        return Err(CoreError::invalid(format!("impossible hand length: {len}")));
    }
    let counts = to_counts(hand);
    check_copies(&counts)?;
    Ok(counts)
}

/// Recursive estimator. The memo tables are keyed on count vectors, so a
/// single estimator may be reused across related queries within one call.
#[derive(Default)]
pub(crate) struct Estimator {
    drawn: HashMap<Counts, i8>,
    waiting: HashMap<Counts, i8>,
    ready: HashMap<Counts, bool>,
}

impl Estimator {
    pub fn shanten(&mut self, counts: &Counts) -> i8 {
        let total: usize = counts.iter().map(|&c| c as usize).sum();
        if total % 3 == 2 {
            self.drawn_hand(counts)
        } else {
            self.waiting_hand(counts)
        }
    }

    fn drawn_hand(&mut self, counts: &Counts) -> i8 {
        if let Some(&s) = self.drawn.get(counts) {
            return s;
        }

        let s = if is_complete(counts) {
            -1
        } else {
            let mut best = SHANTEN_CEILING;
            let mut scratch = *counts;
            for i in 0..KINDS {
                if scratch[i] == 0 {
                    continue;
                }
                scratch[i] -= 1;
                best = best.min(self.waiting_hand(&scratch));
                scratch[i] += 1;
                if best == 0 {
                    break;
                }
            }
            best
        };

        self.drawn.insert(*counts, s);
        s
    }

    fn waiting_hand(&mut self, counts: &Counts) -> i8 {
        if let Some(&s) = self.waiting.get(counts) {
            return s;
        }

        let s = if self.is_ready(counts) {
            0
        } else if self.one_exchange_from_ready(counts) {
            1
        } else {
            2
        };

        self.waiting.insert(*counts, s);
        s
    }

    /// Some draw of any of the 34 kinds completes the hand. Copies already
    /// held are not subtracted from the wall.
    fn is_ready(&mut self, counts: &Counts) -> bool {
        if let Some(&r) = self.ready.get(counts) {
            return r;
        }

        let mut scratch = *counts;
        let mut ready = false;
        for d in 0..KINDS {
            scratch[d] += 1;
            ready = is_complete(&scratch);
            scratch[d] -= 1;
            if ready {
                break;
            }
        }

        self.ready.insert(*counts, ready);
        ready
    }

    /// Some draw followed by some discard leaves a ready hand.
    fn one_exchange_from_ready(&mut self, counts: &Counts) -> bool {
        let mut scratch = *counts;
        for d in 0..KINDS {
            scratch[d] += 1;
            for i in 0..KINDS {
                if i == d || scratch[i] == 0 {
                    continue;
                }
                scratch[i] -= 1;
                let ready = self.is_ready(&scratch);
                scratch[i] += 1;
                if ready {
                    return true;
                }
            }
            scratch[d] -= 1;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile::parse_tiles;

    fn shanten(codes: &[&str]) -> i8 {
        calculate_shanten(&parse_tiles(codes).unwrap()).unwrap()
    }

    #[test]
    fn complete_hand_is_minus_one() {
        assert_eq!(
            shanten(&["m1", "m2", "m3", "p4", "p5", "p6", "s7", "s8", "s9", "z5", "z5", "z5", "m9", "m9"]),
            -1
        );
        assert_eq!(
            shanten(&["m1", "m1", "m5", "m5", "p2", "p2", "p9", "p9", "s3", "s3", "z1", "z1", "z7", "z7"]),
            -1
        );
    }

    #[test]
    fn tenpai_hand_is_zero() {
        // waits on m9 for the pair
        assert_eq!(
            shanten(&["m1", "m2", "m3", "p4", "p5", "p6", "s7", "s8", "s9", "z5", "z5", "z5", "m9"]),
            0
        );
        // thirteen-orphans thirteen-sided wait
        assert_eq!(
            shanten(&["m1", "m9", "p1", "p9", "s1", "s9", "z1", "z2", "z3", "z4", "z5", "z6", "z7"]),
            0
        );
    }

    #[test]
    fn one_away_and_far_hands() {
        assert_eq!(
            shanten(&["m1", "m2", "m3", "p4", "p5", "p6", "s7", "s8", "z1", "z5", "z5", "z5", "m9"]),
            1
        );
        assert_eq!(
            shanten(&["m1", "m4", "m7", "p2", "p5", "p8", "s3", "s6", "s9", "z1", "z2", "z3", "z4"]),
            2
        );
    }

    #[test]
    fn all_four_copies_held_still_waits() {
        // z1 x4 plus three runs: drawing z1 reads as pair + triplet
        assert_eq!(
            shanten(&["z1", "z1", "z1", "z1", "m2", "m3", "m4", "p4", "p5", "p6", "s7", "s8", "s9"]),
            0
        );
    }

    #[test]
    fn drawn_hand_takes_best_discard() {
        // discarding z1 leaves tenpai
        assert_eq!(
            shanten(&["m1", "m2", "m3", "p4", "p5", "p6", "s7", "s8", "s9", "z5", "z5", "z5", "m9", "z1"]),
            0
        );
    }

    #[test]
    fn called_hands_use_smaller_shapes() {
        assert_eq!(shanten(&["s4", "s5", "s6", "z6", "z6"]), -1);
        assert_eq!(shanten(&["s4", "s5", "z6", "z6"]), 0);
    }

    #[test]
    fn rejects_impossible_lengths() {
        let tiles = parse_tiles(&["m1", "m2", "m3"]).unwrap();
        assert!(calculate_shanten(&tiles).is_err());
        let five = parse_tiles(&["m1", "m1", "m1", "m1", "m1"]).unwrap();
        assert!(calculate_shanten(&five).is_err());
    }
}
