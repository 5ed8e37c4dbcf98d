use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum Wind {
    E,
    S,
    W,
    N,
}

impl Wind {
    pub fn tile(self) -> Tile {
        let h = match self {
            Wind::E => Honor::East,
            Wind::S => Honor::South,
            Wind::W => Honor::West,
            Wind::N => Honor::North,
        };
        Tile::honor_tile(h)
    }
}

/// The three seats of a sanma table. East is the dealer.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Seat {
    East,
    South,
    West,
}

impl Seat {
    pub const ALL: [Seat; 3] = [Seat::East, Seat::South, Seat::West];

    pub fn wind(self) -> Wind {
        match self {
            Seat::East => Wind::E,
            Seat::South => Wind::S,
            Seat::West => Wind::W,
        }
    }

    pub fn is_dealer(self) -> bool {
        self == Seat::East
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum WinType {
    Ron,
    Tsumo,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum Riichi {
    #[default]
    None,
    #[serde(rename = "RIICHI")]
    Single,
    Double,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum MeldType {
    Chi,
    Pon,
    Minkan,
    Ankan,
}

/// A meld already removed from the hand by a call or a declared quad.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CalledMeld {
    #[serde(rename = "type")]
    pub meld_type: MeldType,
    pub tiles: Vec<Tile>,
    /// Seat the called tile came from; `None` for a concealed quad.
    #[serde(default)]
    pub from: Option<Seat>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Flags {
    pub riichi: Riichi,
    pub ippatsu: bool,
    pub rinshan: bool,
    pub chankan: bool,
    pub haitei: bool,
    pub houtei: bool,
    pub tenhou: bool,
    pub chihou: bool,
}

/// Situation at the moment of winning. Never mutated by the evaluator.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RuleContext {
    pub win_type: WinType,
    pub round_wind: Wind,
    pub seat_wind: Wind,

    #[serde(default)]
    pub dora_indicators: Vec<Tile>,
    #[serde(default)]
    pub ura_indicators: Vec<Tile>,

    #[serde(default)]
    pub melds: Vec<CalledMeld>,

    #[serde(default)]
    pub flags: Flags,
}

impl RuleContext {
    pub fn new(win_type: WinType, round_wind: Wind, seat_wind: Wind) -> Self {
        Self {
            win_type,
            round_wind,
            seat_wind,
            dora_indicators: vec![],
            ura_indicators: vec![],
            melds: vec![],
            flags: Flags::default(),
        }
    }

    pub fn is_tsumo(&self) -> bool {
        self.win_type == WinType::Tsumo
    }

    /// Chi, pon and open quads break concealment; a concealed quad does not.
    pub fn is_concealed(&self) -> bool {
        self.melds.iter().all(|m| m.meld_type == MeldType::Ankan)
    }

    pub fn quad_count(&self) -> usize {
        self.melds
            .iter()
            .filter(|m| matches!(m.meld_type, MeldType::Minkan | MeldType::Ankan))
            .count()
    }

    pub fn is_dealer(&self) -> bool {
        self.seat_wind == Wind::E
    }
}

/// Rule options that are fixed for a table rather than per win.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct Ruleset {
    /// All-simples also counts on an open hand.
    pub open_tanyao: bool,
    /// Cap ordinary base points at mangan/haneman/baiman/sanbaiman/yakuman.
    pub limit_hands: bool,
    /// Maximum number of decompositions explored per hand.
    pub decomposition_cap: usize,
}

impl Default for Ruleset {
    fn default() -> Self {
        Self {
            open_tanyao: true,
            limit_hands: false,
            decomposition_cap: decompose::DEFAULT_CAP,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandResult {
    pub han: u32,
    /// Number of distinct yakuman achieved; 0 for an ordinary hand.
    pub yakuman: u32,
    /// Meaningless (0) when `yakuman > 0`.
    pub fu: u32,
    pub yaku: Vec<Yaku>,
    pub dora: u32,
    pub base_points: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HandRequest {
    pub context: RuleContext,
    /// Concealed tiles including the winning tile.
    pub tiles: Vec<Tile>,
    #[serde(default)]
    pub ruleset: Option<Ruleset>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScoreRequest {
    pub context: RuleContext,
    /// Concealed tiles including the winning tile.
    pub tiles: Vec<Tile>,

    pub winner: Seat,
    /// Discarder on a ron win.
    #[serde(default)]
    pub loser: Option<Seat>,

    #[serde(default)]
    pub honba: u32,
    #[serde(default)]
    pub kyotaku: u32,

    #[serde(default)]
    pub ruleset: Option<Ruleset>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreResult {
    #[serde(flatten)]
    pub hand: HandResult,
    /// Per-seat point movement from the payment and honba; sums to zero.
    pub deltas: BTreeMap<Seat, i64>,
    /// Riichi sticks collected from the table by the winner.
    pub pool_bonus: i64,
    pub label: String,
}

mod calls;
mod decompose;
mod discard;
mod dora;
mod engine;
mod error;
mod fu;
mod points;
mod score;
mod shanten;
mod special;
mod tile;
mod yaku;

pub use calls::{can_declare_riichi, can_kan, can_pon, chi_options, concealed_kan_options};
pub use decompose::{standard_patterns, HandPattern, Meld, MeldKind};
pub use discard::choose_discard;
pub use error::{CoreError, CoreResult};
pub use points::{calc_points, round_up_100, PointBreakdown};
pub use score::{evaluate_hand, score};
pub use shanten::calculate_shanten;
pub use special::{is_complete, is_seven_pairs, is_thirteen_orphans};
pub use tile::{all_kinds, parse_tiles, sort_tiles, to_counts, Counts, Honor, Suit, Tile, KINDS};
pub use yaku::Yaku;
