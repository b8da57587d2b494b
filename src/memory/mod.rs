//! Memory matching game.
//!
//! Twelve face-down tiles hide six symbols, two of each. The player turns two
//! over; after a short pause a matching pair stays face up and a mismatched
//! pair turns back. Finding every pair unlocks the secret message.
//!
//! The engine is a plain state machine that never touches a clock. Callers pass
//! the current time into [`MemoryGame::activate`] and [`MemoryGame::advance`];
//! the pauses are kept as deferred tasks tagged with the generation of the deal
//! that scheduled them, so a task left over from an earlier deal is dropped
//! instead of resolving tiles that no longer exist. A browser host arms a
//! one-shot timer for [`MemoryGame::next_deadline`] and calls `advance` when it
//! fires; tests just call `advance` with a later timestamp.

use std::fmt;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::MEMORY_SYMBOLS;
use crate::config::MemoryConfig;

mod tile;

pub use tile::{Tile, TileFace};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum GamePhase {
    /// No deal yet.
    #[default]
    Idle,
    Playing,
    /// Every pair found. The win reveal may still be pending.
    Won,
}

/// Observable consequences of a user action or a fired deferred task.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    Flipped { index: usize, symbol: &'static str },
    Matched { first: usize, second: usize, pairs: usize },
    Mismatched { first: usize, second: usize },
    /// Fired once per deal, `win_delay_ms` after the last match.
    Won { generation: u64 },
}

/// A fixed deal that does not consist of exact pairs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DealError {
    Empty,
    Unpaired { symbol: &'static str, count: usize },
}

impl fmt::Display for DealError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DealError::Empty => write!(f, "deal has no tiles"),
            DealError::Unpaired { symbol, count } => {
                write!(f, "symbol '{symbol}' appears {count} times, expected 2")
            }
        }
    }
}

impl std::error::Error for DealError {}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Task {
    Resolve,
    RevealWin,
}

#[derive(Clone, Copy, Debug)]
struct Deferred {
    due_ms: f64,
    generation: u64,
    task: Task,
}

/// Serializable view of a game for hosts and debugging.
#[cfg(feature = "serde")]
#[derive(Clone, Debug, Serialize)]
pub struct GameSnapshot {
    pub generation: u64,
    pub phase: GamePhase,
    pub matched_pairs: usize,
    pub total_pairs: usize,
    pub locked: bool,
    pub selection: Vec<usize>,
    pub tiles: Vec<Tile>,
}

#[derive(Clone, Debug)]
pub struct MemoryGame {
    config: MemoryConfig,
    tiles: Vec<Tile>,
    /// At most two indices of flipped, unresolved tiles.
    selection: Vec<usize>,
    matched_pairs: usize,
    locked: bool,
    phase: GamePhase,
    generation: u64,
    pending: Vec<Deferred>,
    win_announced: bool,
}

impl Default for MemoryGame {
    fn default() -> Self {
        Self::new(MemoryConfig::default())
    }
}

impl MemoryGame {
    pub fn new(config: MemoryConfig) -> Self {
        Self {
            config,
            tiles: Vec::new(),
            selection: Vec::with_capacity(2),
            matched_pairs: 0,
            locked: false,
            phase: GamePhase::Idle,
            generation: 0,
            pending: Vec::new(),
            win_announced: false,
        }
    }

    /// Deal a fresh shuffled board, discarding all previous state.
    pub fn setup<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let mut deck: Vec<&'static str> = MEMORY_SYMBOLS
            .iter()
            .chain(MEMORY_SYMBOLS.iter())
            .copied()
            .collect();
        deck.shuffle(rng);
        self.deal(deck);
    }

    /// Deal `symbols` in the given order. Every symbol must appear exactly twice.
    pub fn setup_with(&mut self, symbols: &[&'static str]) -> Result<(), DealError> {
        if symbols.is_empty() {
            return Err(DealError::Empty);
        }
        for symbol in symbols {
            let count = symbols.iter().filter(|s| *s == symbol).count();
            if count != 2 {
                return Err(DealError::Unpaired {
                    symbol: *symbol,
                    count,
                });
            }
        }
        self.deal(symbols.to_vec());
        Ok(())
    }

    fn deal(&mut self, deck: Vec<&'static str>) {
        self.generation += 1;
        self.tiles = deck.into_iter().map(Tile::new).collect();
        self.selection.clear();
        self.matched_pairs = 0;
        self.locked = false;
        self.pending.clear();
        self.win_announced = false;
        self.phase = GamePhase::Playing;
    }

    /// Turn tile `index` face up. Returns no events when the flip is not allowed:
    /// board locked mid-resolution, tile already up or matched, two tiles already
    /// selected, no deal in progress, or an out-of-range index.
    pub fn activate(&mut self, index: usize, now_ms: f64) -> Vec<GameEvent> {
        if self.phase != GamePhase::Playing || self.locked || self.selection.len() >= 2 {
            return Vec::new();
        }
        let Some(tile) = self.tiles.get_mut(index) else {
            return Vec::new();
        };
        if tile.face != TileFace::Hidden {
            return Vec::new();
        }
        tile.face = TileFace::Flipped;
        let symbol = tile.symbol;
        self.selection.push(index);

        if self.selection.len() == 2 {
            self.locked = true;
            self.schedule(Task::Resolve, now_ms + self.config.resolve_delay_ms as f64);
        }
        vec![GameEvent::Flipped { index, symbol }]
    }

    /// Run every deferred task due at or before `now_ms`, earliest first.
    pub fn advance(&mut self, now_ms: f64) -> Vec<GameEvent> {
        let mut events = Vec::new();
        while let Some(pos) = self.next_due(now_ms) {
            let deferred = self.pending.remove(pos);
            if deferred.generation != self.generation {
                continue;
            }
            match deferred.task {
                Task::Resolve => self.resolve(deferred.due_ms, &mut events),
                Task::RevealWin => {
                    if !self.win_announced {
                        self.win_announced = true;
                        events.push(GameEvent::Won {
                            generation: self.generation,
                        });
                    }
                }
            }
        }
        events
    }

    /// Earliest pending deadline, if any task is waiting.
    pub fn next_deadline(&self) -> Option<f64> {
        self.pending
            .iter()
            .map(|d| d.due_ms)
            .min_by(|a, b| a.total_cmp(b))
    }

    fn next_due(&self, now_ms: f64) -> Option<usize> {
        self.pending
            .iter()
            .enumerate()
            .filter(|(_, d)| d.due_ms <= now_ms)
            .min_by(|(_, a), (_, b)| a.due_ms.total_cmp(&b.due_ms))
            .map(|(i, _)| i)
    }

    fn schedule(&mut self, task: Task, due_ms: f64) {
        self.pending.push(Deferred {
            due_ms,
            generation: self.generation,
            task,
        });
    }

    fn resolve(&mut self, at_ms: f64, events: &mut Vec<GameEvent>) {
        if let [first, second] = self.selection[..] {
            if self.tiles[first].symbol == self.tiles[second].symbol {
                self.tiles[first].face = TileFace::Matched;
                self.tiles[second].face = TileFace::Matched;
                self.matched_pairs += 1;
                events.push(GameEvent::Matched {
                    first,
                    second,
                    pairs: self.matched_pairs,
                });
                if self.matched_pairs == self.total_pairs() {
                    self.phase = GamePhase::Won;
                    self.schedule(Task::RevealWin, at_ms + self.config.win_delay_ms as f64);
                }
            } else {
                self.tiles[first].face = TileFace::Hidden;
                self.tiles[second].face = TileFace::Hidden;
                events.push(GameEvent::Mismatched { first, second });
            }
        }
        self.selection.clear();
        self.locked = false;
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn tile(&self, index: usize) -> Option<&Tile> {
        self.tiles.get(index)
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn matched_pairs(&self) -> usize {
        self.matched_pairs
    }

    pub fn total_pairs(&self) -> usize {
        self.tiles.len() / 2
    }

    pub fn selection(&self) -> &[usize] {
        &self.selection
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[cfg(feature = "serde")]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            generation: self.generation,
            phase: self.phase,
            matched_pairs: self.matched_pairs,
            total_pairs: self.total_pairs(),
            locked: self.locked,
            selection: self.selection.clone(),
            tiles: self.tiles.clone(),
        }
    }
}
