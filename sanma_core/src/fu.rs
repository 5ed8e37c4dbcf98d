use crate::decompose::{Block, BlockKind};
use crate::tile::Tile;
use crate::RuleContext;

/// Seven pairs is always 25 fu.
pub const SEVEN_PAIRS_FU: u32 = 25;

/// Fu for a standard-shape candidate. `blocks` holds both the concealed
/// melds of the decomposition and the called melds.
pub fn calc_fu(blocks: &[Block], pair: Tile, ctx: &RuleContext, pinfu: bool) -> u32 {
    // 平和は固定
    if pinfu {
        return if ctx.is_tsumo() { 20 } else { 30 };
    }

    let mut fu: u32 = 20;

    if ctx.is_tsumo() {
        fu += 2;
    } else if ctx.is_concealed() {
        fu += 10;
    }

    fu += blocks.iter().map(block_fu).sum::<u32>();

    if is_value_pair(pair, ctx) {
        fu += 2;
    }

    round_up_10(fu).max(20)
}

fn round_up_10(x: u32) -> u32 {
    x.div_ceil(10) * 10
}

/// Dragon, seat wind or round wind.
pub fn is_value_pair(pair: Tile, ctx: &RuleContext) -> bool {
    pair.is_dragon() || pair == ctx.seat_wind.tile() || pair == ctx.round_wind.tile()
}

fn block_fu(block: &Block) -> u32 {
    let th = block.tile.is_terminal_or_honor();
    match block.kind {
        BlockKind::Sequence => 0,
        BlockKind::Triplet => triplet_fu(th, block.open),
        BlockKind::Quad => kan_fu(th, block.open),
    }
}

fn triplet_fu(terminal_or_honor: bool, open: bool) -> u32 {
    match (open, terminal_or_honor) {
        (true, false) => 2,
        (true, true) => 4,
        (false, false) => 4,
        (false, true) => 8,
    }
}

fn kan_fu(terminal_or_honor: bool, open: bool) -> u32 {
    triplet_fu(terminal_or_honor, open) * 4
}
