use crate::engine::score_best;
use crate::error::{CoreError, CoreResult};
use crate::points::calc_points;
use crate::tile::Tile;
use crate::{HandResult, RuleContext, Ruleset, ScoreRequest, ScoreResult};

/// Han, fu and yaku of a winning hand; `Ok(None)` if it does not win.
pub fn evaluate_hand(
    tiles: &[Tile],
    ctx: &RuleContext,
    rules: &Ruleset,
) -> CoreResult<Option<HandResult>> {
    score_best(tiles, ctx, rules)
}

/// Evaluate and settle a win at a three-player table.
pub fn score(req: &ScoreRequest) -> CoreResult<Option<ScoreResult>> {
    let ctx = &req.context;
    if req.winner.wind() != ctx.seat_wind {
        return Err(CoreError::invalid(format!(
            "winner {:?} does not sit at {:?}",
            req.winner, ctx.seat_wind
        )));
    }

    let rules = req.ruleset.clone().unwrap_or_default();
    let Some(hand) = score_best(&req.tiles, ctx, &rules)? else {
        return Ok(None);
    };

    let pts = calc_points(
        &hand,
        req.winner,
        ctx.win_type,
        req.loser,
        req.honba,
        req.kyotaku,
    )?;

    Ok(Some(ScoreResult {
        hand,
        deltas: pts.deltas,
        pool_bonus: pts.pool_bonus,
        label: pts.label,
    }))
}
