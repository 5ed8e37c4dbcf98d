use crate::tile::{Counts, Tile};
use serde::Serialize;
use std::collections::HashSet;
use tracing::debug;

/// Exploration budget for all-results mode.
pub const DEFAULT_CAP: usize = 128;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MeldKind {
    Sequence,
    Triplet,
}

/// A concealed meld found by decomposition. `tile` is the lowest tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Meld {
    pub kind: MeldKind,
    pub tile: Tile,
}

impl Meld {
    /// Sequences are only built after `sequence_fits` has found both
    /// neighbours, so the offsets below always exist.
    pub fn tiles(&self) -> [Tile; 3] {
        match self.kind {
            MeldKind::Triplet => [self.tile; 3],
            MeldKind::Sequence => [
                self.tile,
                self.tile.offset(1).unwrap_or(self.tile),
                self.tile.offset(2).unwrap_or(self.tile),
            ],
        }
    }
}

/// One pair plus the melds covering the rest of the concealed tiles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HandPattern {
    pub pair: Tile,
    pub melds: Vec<Meld>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Sequence,
    Triplet,
    Quad,
}

/// A meld as seen by the scorer: concealed melds from a pattern and called
/// melds from the context, side by side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    pub kind: BlockKind,
    pub tile: Tile,
    pub open: bool,
}

impl Block {
    pub fn concealed(m: &Meld) -> Self {
        let kind = match m.kind {
            MeldKind::Sequence => BlockKind::Sequence,
            MeldKind::Triplet => BlockKind::Triplet,
        };
        Block {
            kind,
            tile: m.tile,
            open: false,
        }
    }

    pub fn is_sequence(&self) -> bool {
        self.kind == BlockKind::Sequence
    }

    /// Triplet or quad.
    pub fn is_set(&self) -> bool {
        !self.is_sequence()
    }

    pub fn has_terminal_or_honor(&self) -> bool {
        match self.kind {
            BlockKind::Sequence => matches!(self.tile.rank(), 1 | 7),
            _ => self.tile.is_terminal_or_honor(),
        }
    }
}

/// A candidate ready for scoring: pair plus every block, called ones included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub pair: Tile,
    pub blocks: Vec<Block>,
}

impl Layout {
    pub fn new(pattern: &HandPattern, called: &[Block]) -> Self {
        let mut blocks: Vec<Block> = pattern.melds.iter().map(Block::concealed).collect();
        blocks.extend_from_slice(called);
        Layout {
            pair: pattern.pair,
            blocks,
        }
    }

    pub fn sets(&self) -> impl Iterator<Item = &Block> {
        self.blocks.iter().filter(|b| b.is_set())
    }

    pub fn sequences(&self) -> impl Iterator<Item = &Block> {
        self.blocks.iter().filter(|b| b.is_sequence())
    }

    pub fn concealed_sets(&self) -> usize {
        self.sets().filter(|b| !b.open).count()
    }
}

fn sequence_fits(counts: &Counts, t: Tile) -> Option<(usize, usize)> {
    let (t2, t3) = (t.offset(1)?, t.offset(2)?);
    (counts[t2.index()] > 0 && counts[t3.index()] > 0).then(|| (t2.index(), t3.index()))
}

fn first_nonzero(counts: &Counts) -> Option<Tile> {
    counts
        .iter()
        .position(|&c| c > 0)
        .and_then(Tile::from_index)
}

/// Single-result mode: the first full decomposition of `counts` into melds,
/// trying the triplet before the sequence at the lowest remaining kind.
/// `counts` is restored before returning.
pub fn find_melds(counts: &mut Counts) -> Option<Vec<Meld>> {
    let mut acc = vec![];
    first_melds(counts, &mut acc).then_some(acc)
}

fn first_melds(counts: &mut Counts, acc: &mut Vec<Meld>) -> bool {
    let Some(t) = first_nonzero(counts) else {
        return true;
    };
    let i = t.index();

    if counts[i] >= 3 {
        counts[i] -= 3;
        acc.push(Meld { kind: MeldKind::Triplet, tile: t });
        let found = first_melds(counts, acc);
        counts[i] += 3;
        if found {
            return true;
        }
        acc.pop();
    }

    if let Some((j, k)) = sequence_fits(counts, t) {
        counts[i] -= 1;
        counts[j] -= 1;
        counts[k] -= 1;
        acc.push(Meld { kind: MeldKind::Sequence, tile: t });
        let found = first_melds(counts, acc);
        counts[i] += 1;
        counts[j] += 1;
        counts[k] += 1;
        if found {
            return true;
        }
        acc.pop();
    }

    false
}

/// All-results mode: every distinct decomposition of `counts`, up to `cap`.
/// `counts` is restored before returning.
pub fn find_all_melds(counts: &mut Counts, cap: usize) -> Vec<Vec<Meld>> {
    let mut search = AllMelds {
        cap,
        seen: HashSet::new(),
        results: vec![],
        acc: vec![],
    };
    search.run(counts);
    search.results
}

struct AllMelds {
    cap: usize,
    seen: HashSet<Vec<Meld>>,
    results: Vec<Vec<Meld>>,
    acc: Vec<Meld>,
}

impl AllMelds {
    fn run(&mut self, counts: &mut Counts) {
        if self.results.len() >= self.cap {
            return;
        }

        let Some(t) = first_nonzero(counts) else {
            let mut signature = self.acc.clone();
            signature.sort_unstable();
            if self.seen.insert(signature.clone()) {
                self.results.push(signature);
            }
            return;
        };
        let i = t.index();

        if counts[i] >= 3 {
            counts[i] -= 3;
            self.acc.push(Meld { kind: MeldKind::Triplet, tile: t });
            self.run(counts);
            self.acc.pop();
            counts[i] += 3;
        }

        if let Some((j, k)) = sequence_fits(counts, t) {
            counts[i] -= 1;
            counts[j] -= 1;
            counts[k] -= 1;
            self.acc.push(Meld { kind: MeldKind::Sequence, tile: t });
            self.run(counts);
            self.acc.pop();
            counts[i] += 1;
            counts[j] += 1;
            counts[k] += 1;
        }
    }
}

fn total(counts: &Counts) -> usize {
    counts.iter().map(|&c| c as usize).sum()
}

/// First (pair, melds) split of a concealed hand needing `melds_needed` melds.
pub fn first_standard_pattern(counts: &Counts, melds_needed: usize) -> Option<HandPattern> {
    if total(counts) != 2 + 3 * melds_needed {
        return None;
    }

    let mut scratch = *counts;
    for i in 0..scratch.len() {
        if scratch[i] < 2 {
            continue;
        }
        scratch[i] -= 2;
        let melds = find_melds(&mut scratch);
        scratch[i] += 2;

        if let Some(melds) = melds.filter(|m| m.len() == melds_needed) {
            return Some(HandPattern {
                pair: Tile::from_index(i)?,
                melds,
            });
        }
    }
    None
}

/// Every (pair, melds) split across every pair choice, up to `cap` in total.
pub fn standard_patterns(counts: &Counts, melds_needed: usize, cap: usize) -> Vec<HandPattern> {
    let mut results = vec![];
    if total(counts) != 2 + 3 * melds_needed {
        return results;
    }

    let mut scratch = *counts;
    for i in 0..scratch.len() {
        if scratch[i] < 2 {
            continue;
        }
        let budget = cap.saturating_sub(results.len());
        if budget == 0 {
            debug!(cap, "decomposition cap reached");
            break;
        }
        let Some(pair) = Tile::from_index(i) else {
            continue;
        };

        scratch[i] -= 2;
        let found = find_all_melds(&mut scratch, budget);
        scratch[i] += 2;

        results.extend(
            found
                .into_iter()
                .filter(|m| m.len() == melds_needed)
                .map(|melds| HandPattern { pair, melds }),
        );
    }
    results
}
