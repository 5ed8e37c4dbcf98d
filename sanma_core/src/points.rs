use crate::error::{CoreError, CoreResult};
use crate::{HandResult, Ruleset, Seat, WinType};
use std::collections::BTreeMap;

/// Base points per yakuman.
pub const YAKUMAN_BASE: u64 = 8000;
/// Honba rider per paying seat.
pub const HONBA_UNIT: i64 = 100;
/// One riichi stick on the table.
pub const KYOTAKU_UNIT: i64 = 1000;

/// Ceiling to the next multiple of 100; `None` past `u64::MAX`.
pub fn round_up_100(x: u64) -> Option<u64> {
    x.div_ceil(100).checked_mul(100)
}

/// Largest single payment; leaves room for riders and the winner's sum.
const MAX_PAYMENT: i64 = i64::MAX / 4;

/// round_up_100(base * mult) as a signed payment, or an error on overflow.
fn payment(base: u64, mult: u64) -> CoreResult<i64> {
    base.checked_mul(mult)
        .and_then(round_up_100)
        .and_then(|p| i64::try_from(p).ok())
        .filter(|&p| p <= MAX_PAYMENT)
        .ok_or_else(|| CoreError::invalid(format!("payment overflows for base {base}")))
}

/// base points = fu * 2^(han+2), optionally capped at the limit tiers.
pub fn base_points(han: u32, fu: u32, rules: &Ruleset) -> u64 {
    if rules.limit_hands {
        let capped = match han {
            13.. => Some(8000),
            11..=12 => Some(6000),
            8..=10 => Some(4000),
            6..=7 => Some(3000),
            5 => Some(2000),
            4 if fu >= 40 => Some(2000),
            3 if fu >= 70 => Some(2000),
            _ => None,
        };
        if let Some(base) = capped {
            return base;
        }
    }

    // 2^(han+2) overflows u64 long before any real hand gets there
    (fu as u64).saturating_mul(1u64.checked_shl(han + 2).unwrap_or(u64::MAX))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointBreakdown {
    /// Per-seat movement of the payment and honba; sums to zero.
    pub deltas: BTreeMap<Seat, i64>,
    /// Riichi sticks moved from the table to the winner.
    pub pool_bonus: i64,
    pub label: String,
}

/// Sanma payment. East is the dealer.
///
/// - ron: round_up_100(base * 6 or * 4), all from the discarder
/// - dealer tsumo: each of the two others pays round_up_100(base * 3)
/// - non-dealer tsumo: round_up_100(base * 4) split in two, each half
///   rounded up again and paid by each of the two others
/// - honba: +100 per paying seat (ron: +300 from the discarder)
/// - kyotaku: +1000 per stick to the winner from the table
pub fn calc_points(
    hand: &HandResult,
    winner: Seat,
    win_type: WinType,
    loser: Option<Seat>,
    honba: u32,
    kyotaku: u32,
) -> CoreResult<PointBreakdown> {
    let base = hand.base_points;
    let dealer = winner.is_dealer();
    let honba = honba as i64;

    let mut deltas: BTreeMap<Seat, i64> = Seat::ALL.iter().map(|&s| (s, 0)).collect();
    let mut pay = |from: Seat, amount: i64| {
        *deltas.entry(from).or_insert(0) -= amount;
        *deltas.entry(winner).or_insert(0) += amount;
    };

    let payment = match win_type {
        WinType::Ron => {
            let loser = loser
                .ok_or_else(|| CoreError::invalid("ron settlement needs a discarder"))?;
            if loser == winner {
                return Err(CoreError::invalid("winner cannot be the discarder"));
            }

            let ron = payment(base, if dealer { 6 } else { 4 })?;
            pay(loser, ron + 3 * HONBA_UNIT * honba);
            format!("ron {ron}")
        }
        WinType::Tsumo => {
            let each = if dealer {
                payment(base, 3)?
            } else {
                // 二人で折半、端数はそれぞれ切り上げ
                let total = payment(base, 4)?;
                payment(total as u64 / 2, 1)?
            };

            for &s in Seat::ALL.iter().filter(|&&s| s != winner) {
                pay(s, each + HONBA_UNIT * honba);
            }
            if dealer {
                format!("tsumo {each} all")
            } else {
                format!("tsumo {each}/{each}")
            }
        }
    };

    // 供託は勝者が総取り
    let pool_bonus = KYOTAKU_UNIT * kyotaku as i64;

    let label = if hand.yakuman > 0 {
        format!("yakuman x{} {}", hand.yakuman, payment)
    } else {
        format!("{} han {} fu {}", hand.han, hand.fu, payment)
    };

    Ok(PointBreakdown {
        deltas,
        pool_bonus,
        label,
    })
}
