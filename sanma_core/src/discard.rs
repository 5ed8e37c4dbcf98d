use crate::error::{CoreError, CoreResult};
use crate::shanten::{hand_counts, Estimator};
use crate::tile::Tile;
use std::collections::HashSet;

/// Index into `hand` of the tile to throw from a 14-3k hand.
///
/// Minimizes shanten after the discard. Ties go to a tile in `safe`, then to
/// the earliest position in `hand`.
pub fn choose_discard(hand: &[Tile], safe: &HashSet<Tile>) -> CoreResult<usize> {
    let counts = hand_counts(hand)?;
    if hand.len() % 3 != 2 {
        return Err(CoreError::invalid(format!(
            "discard needs a 14-3k hand, got {} tiles",
            hand.len()
        )));
    }

    let mut est = Estimator::default();
    let mut best: Option<((i8, bool), usize)> = None;

    for (pos, &t) in hand.iter().enumerate() {
        let mut after = counts;
        after[t.index()] -= 1;
        // 小さいほど良い
        let key = (est.shanten(&after), !safe.contains(&t));
        if best.map_or(true, |(k, _)| key < k) {
            best = Some((key, pos));
        }
    }

    // hand_counts rejects empty hands
    Ok(best.map_or(0, |(_, pos)| pos))
}
