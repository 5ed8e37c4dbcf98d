use crate::decompose::Layout;
use crate::fu::is_value_pair;
use crate::special::SpecialHand;
use crate::tile::{Counts, Honor, Suit, Tile};
use crate::{Riichi, RuleContext, Ruleset, WinType};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Scoring category identifiers. Serialized as opaque snake_case strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Yaku {
    // 役満
    Tenhou,
    Chiihou,
    Kokushi,
    Tsuuiisou,
    Ryuuiisou,
    Chinroutou,
    ChuurenPoutou,
    Suuankou,
    Daisangen,
    Shousuushii,
    Daisuushii,
    Suukantsu,

    // 状況役
    Riichi,
    DoubleRiichi,
    Ippatsu,
    MenzenTsumo,
    Chankan,
    Rinshan,
    Haitei,
    Houtei,

    // 牌の種類で決まる役
    Tanyao,
    Honitsu,
    Chinitsu,
    Honroutou,

    // 分解に依存する役
    Chiitoitsu,
    Pinfu,
    Iipeikou,
    Ryanpeikou,
    YakuhaiHaku,
    YakuhaiHatsu,
    YakuhaiChun,
    SeatWind,
    RoundWind,
    Toitoi,
    Ittsu,
    SanshokuDoujun,
    SanshokuDoukou,
    Sanankou,
    Chanta,
    Junchan,
    Shousangen,
    Sankantsu,

    Dora,
    UraDora,
    /// Placeholder so a hand with nothing else still pays 1 han.
    NoYaku,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct YakuResult {
    pub yakuman: u32,
    pub han: u32,
    pub yaku: Vec<Yaku>,
}

impl YakuResult {
    /// Duplicates collapse: a category only ever counts once.
    pub(crate) fn add(&mut self, y: Yaku, han: u32) {
        if !self.yaku.contains(&y) {
            self.yaku.push(y);
            self.han += han;
        }
    }

    fn add_yakuman(&mut self, y: Yaku) {
        if !self.yaku.contains(&y) {
            self.yaku.push(y);
            self.yakuman += 1;
        }
    }
}

/// Everything about the hand that does not depend on the decomposition.
pub struct HandView<'a> {
    pub ctx: &'a RuleContext,
    pub rules: &'a Ruleset,
    /// Concealed tiles only.
    pub concealed: &'a Counts,
    /// Concealed plus called tiles, quads counted as four.
    pub all: &'a Counts,
}

impl HandView<'_> {
    fn menzen(&self) -> bool {
        self.ctx.is_concealed()
    }

    fn held(&self) -> impl Iterator<Item = Tile> + '_ {
        self.all
            .iter()
            .enumerate()
            .filter(|(_, &c)| c > 0)
            .filter_map(|(i, _)| Tile::from_index(i))
    }
}

// =====================
// 役満
// =====================

/// Yakuman tier. Every layout is a valid standard decomposition of the same
/// hand; a pattern yakuman holds if any of them shows it.
pub fn eval_yakuman(hand: &HandView, special: Option<SpecialHand>, layouts: &[Layout]) -> YakuResult {
    let mut r = YakuResult::default();
    let ctx = hand.ctx;
    let first_turn = ctx.win_type == WinType::Tsumo && ctx.melds.is_empty();

    if first_turn && ctx.flags.tenhou && ctx.is_dealer() {
        r.add_yakuman(Yaku::Tenhou);
    }
    if first_turn && ctx.flags.chihou && !ctx.is_dealer() {
        r.add_yakuman(Yaku::Chiihou);
    }

    if special == Some(SpecialHand::ThirteenOrphans) {
        r.add_yakuman(Yaku::Kokushi);
    }

    if hand.held().all(|t| t.is_honor()) {
        r.add_yakuman(Yaku::Tsuuiisou);
    }
    if hand.held().all(is_green) {
        r.add_yakuman(Yaku::Ryuuiisou);
    }
    if hand.held().all(|t| t.is_terminal()) {
        r.add_yakuman(Yaku::Chinroutou);
    }
    if ctx.melds.is_empty() && is_chuuren(hand.concealed) {
        r.add_yakuman(Yaku::ChuurenPoutou);
    }

    for layout in layouts {
        if layout.concealed_sets() == 4 {
            r.add_yakuman(Yaku::Suuankou);
        }
        if is_daisangen(layout) {
            r.add_yakuman(Yaku::Daisangen);
        }
        if let Some(y) = suushii(layout) {
            r.add_yakuman(y);
        }
    }

    if ctx.quad_count() == 4 {
        r.add_yakuman(Yaku::Suukantsu);
    }

    r.han = 13 * r.yakuman;
    r
}

fn is_green(t: Tile) -> bool {
    matches!(t.code().as_str(), "s2" | "s3" | "s4" | "s6" | "s8" | "z6")
}

/// 1112345678999 + any one tile of the same suit.
fn is_chuuren(concealed: &Counts) -> bool {
    const BASE: [u8; 9] = [3, 1, 1, 1, 1, 1, 1, 1, 3];

    let total: u8 = concealed.iter().sum();
    if total != 14 {
        return false;
    }
    (0..3).any(|suit| {
        let block = &concealed[suit * 9..suit * 9 + 9];
        block.iter().sum::<u8>() == 14 && block.iter().zip(BASE).all(|(&c, b)| c >= b)
    })
}

fn dragon_sets(layout: &Layout) -> usize {
    layout.sets().filter(|b| b.tile.is_dragon()).count()
}

fn wind_sets(layout: &Layout) -> usize {
    layout.sets().filter(|b| b.tile.is_wind()).count()
}

fn is_daisangen(layout: &Layout) -> bool {
    dragon_sets(layout) == 3
}

fn suushii(layout: &Layout) -> Option<Yaku> {
    match (wind_sets(layout), layout.pair.is_wind()) {
        (4, _) => Some(Yaku::Daisuushii),
        (3, true) => Some(Yaku::Shousuushii),
        _ => None,
    }
}

// =====================
// 通常役：手牌全体で決まるもの
// =====================

/// Categories that hold for every candidate of the hand alike: situation
/// flags and tile-content yaku.
pub fn eval_situational(hand: &HandView) -> YakuResult {
    let mut r = YakuResult::default();
    let ctx = hand.ctx;
    let menzen = hand.menzen();
    let tsumo = ctx.win_type == WinType::Tsumo;

    match ctx.flags.riichi {
        Riichi::None => {}
        Riichi::Single => r.add(Yaku::Riichi, 1),
        Riichi::Double => r.add(Yaku::DoubleRiichi, 2),
    }
    if ctx.flags.ippatsu && ctx.flags.riichi != Riichi::None {
        r.add(Yaku::Ippatsu, 1);
    }
    if menzen && tsumo {
        r.add(Yaku::MenzenTsumo, 1);
    }
    if ctx.flags.chankan && !tsumo {
        r.add(Yaku::Chankan, 1);
    }
    if ctx.flags.rinshan && tsumo {
        r.add(Yaku::Rinshan, 1);
    }
    if ctx.flags.haitei && tsumo {
        r.add(Yaku::Haitei, 1);
    }
    if ctx.flags.houtei && !tsumo {
        r.add(Yaku::Houtei, 1);
    }

    // 喰いタンはルール次第
    if (menzen || hand.rules.open_tanyao) && hand.held().all(|t| t.is_simple()) {
        r.add(Yaku::Tanyao, 1);
    }

    if let Some((y, h)) = honitsu_chinitsu(hand, menzen) {
        r.add(y, h);
    }

    if hand.held().all(|t| t.is_terminal_or_honor()) {
        r.add(Yaku::Honroutou, 2);
    }

    r
}

fn honitsu_chinitsu(hand: &HandView, menzen: bool) -> Option<(Yaku, u32)> {
    let mut suit_seen = None;
    let mut has_honor = false;

    for t in hand.held() {
        if t.is_honor() {
            has_honor = true;
            continue;
        }
        suit_seen = match suit_seen {
            None => Some(t.suit()),
            Some(s) if s == t.suit() => Some(s),
            Some(_) => return None,
        };
    }

    suit_seen?;

    if has_honor {
        Some((Yaku::Honitsu, if menzen { 3 } else { 2 }))
    } else {
        Some((Yaku::Chinitsu, if menzen { 6 } else { 5 }))
    }
}

// =====================
// 通常役：分解ごとに決まるもの
// =====================

/// Decomposition-dependent categories for one standard layout, added onto
/// `r`. Returns whether the layout is pinfu, which fixes its fu.
pub fn eval_layout(hand: &HandView, layout: &Layout, r: &mut YakuResult) -> bool {
    let ctx = hand.ctx;
    let menzen = hand.menzen();

    // ===== 平和 =====
    let pinfu = menzen
        && layout.blocks.iter().all(|b| b.is_sequence())
        && !is_value_pair(layout.pair, ctx);
    if pinfu {
        r.add(Yaku::Pinfu, 1);
    }

    // ===== 一盃口 / 二盃口（門前限定） =====
    if menzen {
        if let Some((y, h)) = iipeikou_ryanpeikou(layout) {
            r.add(y, h);
        }
    }

    add_yakuhai(r, layout, ctx);

    if layout.blocks.iter().all(|b| b.is_set()) {
        r.add(Yaku::Toitoi, 2);
    }

    if ittsuu(layout) {
        r.add(Yaku::Ittsu, if menzen { 2 } else { 1 });
    }
    if sanshoku_doujun(layout) {
        r.add(Yaku::SanshokuDoujun, if menzen { 2 } else { 1 });
    }
    if is_sanshoku_doukou(layout) {
        r.add(Yaku::SanshokuDoukou, 2);
    }

    if layout.concealed_sets() >= 3 {
        r.add(Yaku::Sanankou, 2);
    }

    if let Some((y, h)) = chanta_junchan(layout, menzen) {
        r.add(y, h);
    }

    if dragon_sets(layout) == 2 && layout.pair.is_dragon() {
        r.add(Yaku::Shousangen, 2);
    }

    if ctx.quad_count() == 3 {
        r.add(Yaku::Sankantsu, 2);
    }

    pinfu
}

fn iipeikou_ryanpeikou(layout: &Layout) -> Option<(Yaku, u32)> {
    let mut m = HashMap::<Tile, u8>::new();
    for b in layout.sequences().filter(|b| !b.open) {
        *m.entry(b.tile).or_insert(0) += 1;
    }

    let pairs: u8 = m.values().map(|&c| c / 2).sum();
    match pairs {
        0 => None,
        1 => Some((Yaku::Iipeikou, 1)),
        _ => Some((Yaku::Ryanpeikou, 3)),
    }
}

fn add_yakuhai(r: &mut YakuResult, layout: &Layout, ctx: &RuleContext) {
    for b in layout.sets() {
        match b.tile.honor() {
            Some(Honor::White) => r.add(Yaku::YakuhaiHaku, 1),
            Some(Honor::Green) => r.add(Yaku::YakuhaiHatsu, 1),
            Some(Honor::Red) => r.add(Yaku::YakuhaiChun, 1),
            _ => {}
        }

        // 連風牌なら両方乗る
        if b.tile == ctx.seat_wind.tile() {
            r.add(Yaku::SeatWind, 1);
        }
        if b.tile == ctx.round_wind.tile() {
            r.add(Yaku::RoundWind, 1);
        }
    }
}

fn has_sequence(layout: &Layout, suit: Suit, rank: u8) -> bool {
    layout
        .sequences()
        .any(|b| b.tile.suit() == suit && b.tile.rank() == rank)
}

fn ittsuu(layout: &Layout) -> bool {
    [Suit::Man, Suit::Pin, Suit::Sou]
        .into_iter()
        .any(|s| [1, 4, 7].into_iter().all(|rank| has_sequence(layout, s, rank)))
}

fn sanshoku_doujun(layout: &Layout) -> bool {
    (1..=7).any(|rank| {
        [Suit::Man, Suit::Pin, Suit::Sou]
            .into_iter()
            .all(|s| has_sequence(layout, s, rank))
    })
}

fn is_sanshoku_doukou(layout: &Layout) -> bool {
    (1..=9).any(|rank| {
        [Suit::Man, Suit::Pin, Suit::Sou].into_iter().all(|s| {
            layout
                .sets()
                .any(|b| b.tile.suit() == s && b.tile.rank() == rank)
        })
    })
}

fn chanta_junchan(layout: &Layout, menzen: bool) -> Option<(Yaku, u32)> {
    if !layout.pair.is_terminal_or_honor() {
        return None;
    }
    if !layout.blocks.iter().all(|b| b.has_terminal_or_honor()) {
        return None;
    }
    // 順子なしは混老頭/対々和の領分
    layout.sequences().next()?;

    let any_honor = layout.pair.is_honor() || layout.sets().any(|b| b.tile.is_honor());
    if any_honor {
        Some((Yaku::Chanta, if menzen { 2 } else { 1 }))
    } else {
        Some((Yaku::Junchan, if menzen { 3 } else { 2 }))
    }
}
