use crate::decompose::{standard_patterns, Block, BlockKind, Layout};
use crate::dora::count_dora;
use crate::error::{CoreError, CoreResult};
use crate::fu::{calc_fu, SEVEN_PAIRS_FU};
use crate::points::{base_points, YAKUMAN_BASE};
use crate::special::{detect_special, SpecialHand};
use crate::tile::{check_copies, to_counts, Tile};
use crate::yaku::{eval_layout, eval_situational, eval_yakuman, HandView, Yaku, YakuResult};
use crate::{CalledMeld, HandResult, MeldType, Riichi, RuleContext, Ruleset};
use tracing::{debug, trace};

/// Main indicator plus one per declared quad.
pub const MAX_INDICATORS: usize = 5;

/// Evaluate a concealed hand (winning tile included) under `ctx`.
///
/// Returns `Ok(None)` when the tiles do not form any winning shape. When
/// several readings exist the one with the highest base points wins, ties
/// going to the higher han.
pub fn score_best(
    tiles: &[Tile],
    ctx: &RuleContext,
    rules: &Ruleset,
) -> CoreResult<Option<HandResult>> {
    let called = melds_to_blocks(&ctx.melds)?;
    if called.len() > 4 {
        return Err(CoreError::invalid(format!(
            "too many called melds: {}",
            called.len()
        )));
    }

    // 副露ブロックを除いた面子数
    let melds_needed = 4 - called.len();
    let expected = 2 + 3 * melds_needed;
    if tiles.len() != expected {
        return Err(CoreError::invalid(format!(
            "expected {} concealed tiles with {} called melds, got {}",
            expected,
            called.len(),
            tiles.len()
        )));
    }

    for (name, inds) in [
        ("dora", &ctx.dora_indicators),
        ("ura", &ctx.ura_indicators),
    ] {
        if inds.len() > MAX_INDICATORS {
            return Err(CoreError::invalid(format!(
                "too many {} indicators: {}",
                name,
                inds.len()
            )));
        }
    }

    let concealed = to_counts(tiles);
    let mut all = concealed;
    for t in ctx.melds.iter().flat_map(|m| m.tiles.iter()) {
        all[t.index()] += 1;
    }

    // 表示牌も山の牌なので枚数制限に含める
    let mut visible = all;
    for t in ctx.dora_indicators.iter().chain(&ctx.ura_indicators) {
        visible[t.index()] += 1;
    }
    check_copies(&visible)?;

    // 七対子/国士は副露不可
    let special = if ctx.melds.is_empty() {
        detect_special(&concealed)
    } else {
        None
    };

    let layouts: Vec<Layout> = standard_patterns(&concealed, melds_needed, rules.decomposition_cap)
        .iter()
        .map(|p| Layout::new(p, &called))
        .collect();

    if layouts.is_empty() && special.is_none() {
        return Ok(None);
    }

    let hand = HandView {
        ctx,
        rules,
        concealed: &concealed,
        all: &all,
    };

    // ===== 役満が一つでもあれば通常役は見ない =====
    let ym = eval_yakuman(&hand, special, &layouts);
    if ym.yakuman > 0 {
        debug!(yakuman = ym.yakuman, "yakuman hand");
        return Ok(Some(HandResult {
            han: ym.han,
            yakuman: ym.yakuman,
            fu: 0,
            yaku: ym.yaku,
            dora: 0,
            base_points: YAKUMAN_BASE * ym.yakuman as u64,
        }));
    }

    let situational = eval_situational(&hand);
    let dora = DoraHan::count(&hand);
    let mut best: Option<HandResult> = None;

    if special == Some(SpecialHand::SevenPairs) {
        let mut r = situational.clone();
        r.add(Yaku::Chiitoitsu, 2);
        best = pick(best, finish(r, SEVEN_PAIRS_FU, dora, rules));
    }

    for layout in &layouts {
        let mut r = situational.clone();
        let pinfu = eval_layout(&hand, layout, &mut r);
        let fu = calc_fu(&layout.blocks, layout.pair, ctx, pinfu);
        best = pick(best, finish(r, fu, dora, rules));
    }

    if let Some(b) = &best {
        debug!(
            han = b.han,
            fu = b.fu,
            base_points = b.base_points,
            yaku = b.yaku.len(),
            candidates = layouts.len(),
            "selected candidate"
        );
    }
    Ok(best)
}

#[derive(Debug, Clone, Copy)]
struct DoraHan {
    dora: u32,
    ura: u32,
}

impl DoraHan {
    fn count(hand: &HandView) -> Self {
        let dora = count_dora(hand.all, &hand.ctx.dora_indicators);
        // 裏ドラは立直時のみ
        let ura = if hand.ctx.flags.riichi != Riichi::None {
            count_dora(hand.all, &hand.ctx.ura_indicators)
        } else {
            0
        };
        DoraHan { dora, ura }
    }
}

/// Dora last, then the 1-han floor, then base points.
fn finish(mut r: YakuResult, fu: u32, dora: DoraHan, rules: &Ruleset) -> HandResult {
    if dora.dora > 0 {
        r.add(Yaku::Dora, dora.dora);
    }
    if dora.ura > 0 {
        r.add(Yaku::UraDora, dora.ura);
    }
    if r.han == 0 {
        r.add(Yaku::NoYaku, 1);
    }

    let base_points = base_points(r.han, fu, rules);
    trace!(han = r.han, fu, base_points, "candidate");

    HandResult {
        han: r.han,
        yakuman: 0,
        fu,
        yaku: r.yaku,
        dora: dora.dora + dora.ura,
        base_points,
    }
}

fn pick(best: Option<HandResult>, cand: HandResult) -> Option<HandResult> {
    match best {
        Some(b) if (b.base_points, b.han) >= (cand.base_points, cand.han) => Some(b),
        _ => Some(cand),
    }
}

/// Convert called melds to scoring blocks, rejecting malformed shapes.
fn melds_to_blocks(melds: &[CalledMeld]) -> CoreResult<Vec<Block>> {
    melds.iter().map(meld_to_block).collect()
}

fn meld_to_block(m: &CalledMeld) -> CoreResult<Block> {
    let mut tiles = m.tiles.clone();
    tiles.sort_unstable();

    let malformed = || CoreError::invalid(format!("malformed {:?}: {:?}", m.meld_type, m.tiles));
    let first = *tiles.first().ok_or_else(malformed)?;
    let all_same = tiles.iter().all(|&t| t == first);

    let kind = match m.meld_type {
        MeldType::Chi => {
            let run = tiles.len() == 3
                && first.offset(1) == Some(tiles[1])
                && first.offset(2) == Some(tiles[2]);
            if !run {
                return Err(malformed());
            }
            BlockKind::Sequence
        }
        MeldType::Pon => {
            if tiles.len() != 3 || !all_same {
                return Err(malformed());
            }
            BlockKind::Triplet
        }
        MeldType::Minkan | MeldType::Ankan => {
            if tiles.len() != 4 || !all_same {
                return Err(malformed());
            }
            BlockKind::Quad
        }
    };

    Ok(Block {
        kind,
        tile: first,
        open: m.meld_type != MeldType::Ankan,
    })
}
