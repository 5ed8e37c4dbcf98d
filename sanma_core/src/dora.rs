use crate::tile::{Counts, Tile};

/// Convert dora indicator tile -> actual dora tile
pub fn indicator_to_dora(ind: Tile) -> Tile {
    ind.next_in_cycle()
}

/// Count dora across every held tile (concealed + called) for each indicator.
/// The same indicator listed twice counts twice.
pub fn count_dora(all_tiles: &Counts, indicators: &[Tile]) -> u32 {
    indicators
        .iter()
        .map(|&ind| all_tiles[indicator_to_dora(ind).index()] as u32)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile::{parse_tiles, to_counts};

    #[test]
    fn counts_next_tile_per_indicator() {
        let held = to_counts(&parse_tiles(&["m1", "m1", "z1", "z5", "p5"]).unwrap());
        let inds = parse_tiles(&["m9", "z4", "z7"]).unwrap();
        // m9 -> m1 (x2), z4 -> z1, z7 -> z5
        assert_eq!(count_dora(&held, &inds), 4);
        assert_eq!(count_dora(&held, &[]), 0);
    }
}
