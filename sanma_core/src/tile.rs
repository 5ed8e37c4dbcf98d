use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Number of distinct tile kinds.
pub const KINDS: usize = 34;

/// Per-kind tile counts, indexed by `Tile::index`.
pub type Counts = [u8; KINDS];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Suit {
    Man,
    Pin,
    Sou,
    Honor,
}

impl Suit {
    fn code(self) -> char {
        match self {
            Suit::Man => 'm',
            Suit::Pin => 'p',
            Suit::Sou => 's',
            Suit::Honor => 'z',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Honor {
    East,
    South,
    West,
    North,
    White,
    Green,
    Red,
}

/// One of the 34 tile kinds.
///
/// Canonical index: man 0..=8, pin 9..=17, sou 18..=26, honors 27..=33
/// (east, south, west, north, white, green, red). The derived ordering is
/// the display/search order.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tile(u8);

impl Tile {
    pub fn from_index(index: usize) -> Option<Self> {
        (index < KINDS).then_some(Tile(index as u8))
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Parse a two-character token: `m1`..`s9` or `z1`..`z7`.
    pub fn from_code(code: &str) -> CoreResult<Self> {
        let bytes = code.as_bytes();
        if bytes.len() != 2 {
            return Err(CoreError::invalid(format!("invalid tile code: {code}")));
        }

        let rank = (bytes[1] as char)
            .to_digit(10)
            .ok_or_else(|| CoreError::invalid(format!("invalid rank: {code}")))?
            as usize;

        let (base, max_rank) = match bytes[0] as char {
            'm' => (0, 9),
            'p' => (9, 9),
            's' => (18, 9),
            'z' => (27, 7),
            _ => return Err(CoreError::invalid(format!("invalid suit: {code}"))),
        };
        if !(1..=max_rank).contains(&rank) {
            return Err(CoreError::invalid(format!("invalid rank: {code}")));
        }

        Ok(Tile((base + rank - 1) as u8))
    }

    pub fn honor_tile(h: Honor) -> Self {
        let offset = match h {
            Honor::East => 0,
            Honor::South => 1,
            Honor::West => 2,
            Honor::North => 3,
            Honor::White => 4,
            Honor::Green => 5,
            Honor::Red => 6,
        };
        Tile(27 + offset)
    }

    pub fn suit(self) -> Suit {
        match self.0 {
            0..=8 => Suit::Man,
            9..=17 => Suit::Pin,
            18..=26 => Suit::Sou,
            _ => Suit::Honor,
        }
    }

    /// 1..=9 for numerals, 1..=7 for honors.
    pub fn rank(self) -> u8 {
        if self.is_honor() {
            self.0 - 26
        } else {
            self.0 % 9 + 1
        }
    }

    pub fn honor(self) -> Option<Honor> {
        match self.0 {
            27 => Some(Honor::East),
            28 => Some(Honor::South),
            29 => Some(Honor::West),
            30 => Some(Honor::North),
            31 => Some(Honor::White),
            32 => Some(Honor::Green),
            33 => Some(Honor::Red),
            _ => None,
        }
    }

    pub fn is_honor(self) -> bool {
        self.0 >= 27
    }

    pub fn is_wind(self) -> bool {
        (27..=30).contains(&self.0)
    }

    pub fn is_dragon(self) -> bool {
        self.0 >= 31
    }

    pub fn is_terminal(self) -> bool {
        !self.is_honor() && matches!(self.rank(), 1 | 9)
    }

    pub fn is_terminal_or_honor(self) -> bool {
        self.is_honor() || self.is_terminal()
    }

    pub fn is_simple(self) -> bool {
        !self.is_terminal_or_honor()
    }

    /// Same-suit tile `step` ranks above, if it exists. Honors never chain.
    pub fn offset(self, step: u8) -> Option<Self> {
        if self.is_honor() || self.rank() + step > 9 {
            None
        } else {
            Some(Tile(self.0 + step))
        }
    }

    /// Next tile in the dora cycle: 9 wraps to 1 within a suit, winds and
    /// dragons wrap within their own groups.
    pub fn next_in_cycle(self) -> Self {
        match self.0 {
            8 | 17 | 26 => Tile(self.0 - 8),
            30 => Tile(27),
            33 => Tile(31),
            i => Tile(i + 1),
        }
    }

    pub fn code(self) -> String {
        format!("{}{}", self.suit().code(), self.rank())
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.suit().code(), self.rank())
    }
}

impl fmt::Debug for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl FromStr for Tile {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tile::from_code(s)
    }
}

impl Serialize for Tile {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Tile {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Tile::from_code(&s).map_err(serde::de::Error::custom)
    }
}

/// All 34 kinds in canonical order.
pub fn all_kinds() -> impl Iterator<Item = Tile> {
    (0..KINDS as u8).map(Tile)
}

pub fn parse_tiles<S: AsRef<str>>(codes: &[S]) -> CoreResult<Vec<Tile>> {
    codes.iter().map(|c| Tile::from_code(c.as_ref())).collect()
}

pub fn to_counts(tiles: &[Tile]) -> Counts {
    let mut counts = [0u8; KINDS];
    for t in tiles {
        counts[t.index()] += 1;
    }
    counts
}

/// Reject any kind held more than four times.
pub fn check_copies(counts: &Counts) -> CoreResult<()> {
    match counts.iter().position(|&c| c > 4) {
        Some(i) => Err(CoreError::invalid(format!(
            "more than four copies of {}",
            Tile(i as u8)
        ))),
        None => Ok(()),
    }
}

/// Canonical display order: man, pin, sou, honors; ranks ascending.
pub fn sort_tiles(tiles: &mut [Tile]) {
    tiles.sort_unstable();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_valid_code() {
        for t in all_kinds() {
            assert_eq!(Tile::from_code(&t.code()).unwrap(), t);
        }
        assert_eq!(Tile::from_code("m1").unwrap().index(), 0);
        assert_eq!(Tile::from_code("p5").unwrap().index(), 13);
        assert_eq!(Tile::from_code("z7").unwrap().index(), 33);
    }

    #[test]
    fn rejects_unknown_codes() {
        for bad in ["", "m0", "z8", "x1", "1m", "m10", "s"] {
            assert!(Tile::from_code(bad).is_err(), "{bad} should be rejected");
        }
        assert!(Tile::from_index(34).is_none());
    }

    #[test]
    fn dora_cycle_wraps_within_groups() {
        let next = |c: &str| Tile::from_code(c).unwrap().next_in_cycle().code();
        assert_eq!(next("m9"), "m1");
        assert_eq!(next("p4"), "p5");
        assert_eq!(next("z4"), "z1");
        assert_eq!(next("z7"), "z5");
        assert_eq!(next("z5"), "z6");
    }

    #[test]
    fn sorts_numerals_before_honors() {
        let mut tiles = parse_tiles(&["z1", "s3", "m9", "p1", "m2"]).unwrap();
        sort_tiles(&mut tiles);
        let codes: Vec<_> = tiles.iter().map(|t| t.code()).collect();
        assert_eq!(codes, ["m2", "m9", "p1", "s3", "z1"]);
    }

    #[test]
    fn serde_uses_codes() {
        let t: Tile = serde_json::from_str("\"s7\"").unwrap();
        assert_eq!(serde_json::to_string(&t).unwrap(), "\"s7\"");
        assert!(serde_json::from_str::<Tile>("\"q1\"").is_err());
    }
}
