//! Memory-match card game.
//!
//! [`MemoryMatch`] is the pure engine: it never waits. A mismatched pair is
//! reported as a [`PendingRevert`] which the caller applies after the
//! mismatch delay. [`MemoryMatchSession`] does that through a [`Scheduler`].
//!
//! Every deal gets a fresh id. A revert carries the id of the deal it was
//! issued for and is ignored by any other deal, so restarting mid-delay can
//! never flip tiles on the new board.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::AppError;
use crate::scheduler::{Scheduler, TimerHandle};

/// Lion, panda, frog
pub const DEFAULT_SYMBOLS: [&str; 3] = ["🦁", "🐼", "🐸"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryTile {
    pub id: u32,
    pub symbol: String,
    pub is_flipped: bool,
}

/// Deferred "turn these two back over" for a mismatched pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingRevert {
    pub first: u32,
    pub second: u32,
    deal: Uuid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlipOutcome {
    /// Flip not allowed right now (pair in progress, solved or unknown tile)
    Ignored,
    /// First tile of a pair turned over
    Revealed,
    Matched { first: u32, second: u32, won: bool },
    /// Pair differs; apply the revert after the mismatch delay
    Mismatched(PendingRevert),
}

#[derive(Debug, Clone)]
pub struct MemoryMatch {
    deal: Uuid,
    symbols: Vec<String>,
    tiles: Vec<MemoryTile>,
    flipped: Vec<u32>,
    solved: Vec<u32>,
}

impl MemoryMatch {
    /// Deal two tiles per symbol and shuffle them.
    ///
    /// The shuffle is a uniform Fisher-Yates permutation.
    pub fn new_game<S, R>(symbols: &[S], rng: &mut R) -> Result<Self, AppError>
    where
        S: AsRef<str>,
        R: Rng + ?Sized,
    {
        if symbols.is_empty() {
            return Err(AppError::Validation("A memory deck needs at least one symbol".to_string()));
        }
        let mut unique = HashSet::new();
        for symbol in symbols {
            if !unique.insert(symbol.as_ref()) {
                return Err(AppError::Validation(format!(
                    "Symbol '{}' listed twice; each symbol already gets a pair",
                    symbol.as_ref()
                )));
            }
        }

        let symbols: Vec<String> = symbols.iter().map(|s| s.as_ref().to_string()).collect();
        let mut game = Self {
            deal: Uuid::nil(),
            symbols,
            tiles: Vec::new(),
            flipped: Vec::new(),
            solved: Vec::new(),
        };
        game.reset(rng);
        Ok(game)
    }

    /// Re-deal the same symbols. Outstanding reverts become stale.
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let mut tiles: Vec<MemoryTile> = self
            .symbols
            .iter()
            .flat_map(|symbol| [symbol.clone(), symbol.clone()])
            .enumerate()
            .map(|(i, symbol)| MemoryTile {
                id: i as u32 + 1,
                symbol,
                is_flipped: false,
            })
            .collect();
        tiles.shuffle(rng);

        self.deal = Uuid::new_v4();
        self.tiles = tiles;
        self.flipped.clear();
        self.solved.clear();
        debug!("Dealt memory deck {} with {} tiles", self.deal, self.tiles.len());
    }

    /// Turn a tile face up.
    pub fn flip(&mut self, id: u32) -> FlipOutcome {
        if self.flipped.len() == 2 || self.solved.contains(&id) || self.flipped.contains(&id) {
            debug!("Ignoring flip of tile {}", id);
            return FlipOutcome::Ignored;
        }
        let Some(tile) = self.tiles.iter_mut().find(|t| t.id == id) else {
            debug!("Ignoring flip of unknown tile {}", id);
            return FlipOutcome::Ignored;
        };

        tile.is_flipped = true;
        self.flipped.push(id);

        let [first, second] = match self.flipped.as_slice() {
            [_] => return FlipOutcome::Revealed,
            [first, second] => [*first, *second],
            _ => return FlipOutcome::Ignored,
        };

        if self.symbol_of(first) == self.symbol_of(second) {
            self.solved.extend([first, second]);
            self.flipped.clear();
            let won = self.is_won();
            if won {
                info!("Memory deck {} solved", self.deal);
            }
            FlipOutcome::Matched { first, second, won }
        } else {
            FlipOutcome::Mismatched(PendingRevert {
                first,
                second,
                deal: self.deal,
            })
        }
    }

    /// Turn a mismatched pair back over. Returns false if the revert is stale.
    pub fn revert(&mut self, pending: PendingRevert) -> bool {
        if pending.deal != self.deal || self.flipped != [pending.first, pending.second] {
            debug!("Dropping stale revert of tiles {} and {}", pending.first, pending.second);
            return false;
        }

        for tile in self.tiles.iter_mut() {
            if (tile.id == pending.first || tile.id == pending.second)
                && !self.solved.contains(&tile.id)
            {
                tile.is_flipped = false;
            }
        }
        self.flipped.clear();
        true
    }

    pub fn tiles(&self) -> &[MemoryTile] {
        &self.tiles
    }

    /// Face-up tiles not yet matched (0, 1 or 2)
    pub fn flipped(&self) -> &[u32] {
        &self.flipped
    }

    pub fn solved(&self) -> &[u32] {
        &self.solved
    }

    pub fn is_won(&self) -> bool {
        !self.tiles.is_empty() && self.solved.len() == self.tiles.len()
    }

    pub fn deal_id(&self) -> Uuid {
        self.deal
    }

    fn symbol_of(&self, id: u32) -> Option<&str> {
        self.tiles
            .iter()
            .find(|t| t.id == id)
            .map(|t| t.symbol.as_str())
    }
}

/// Memory game with the mismatch revert driven by a scheduler.
pub struct MemoryMatchSession {
    game: Arc<Mutex<MemoryMatch>>,
    scheduler: Arc<dyn Scheduler>,
    mismatch_delay: Duration,
    rng: StdRng,
    revert_timer: Option<TimerHandle>,
}

impl MemoryMatchSession {
    pub fn new<S: AsRef<str>>(
        symbols: &[S],
        scheduler: Arc<dyn Scheduler>,
        mismatch_delay: Duration,
        mut rng: StdRng,
    ) -> Result<Self, AppError> {
        let game = MemoryMatch::new_game(symbols, &mut rng)?;
        Ok(Self {
            game: Arc::new(Mutex::new(game)),
            scheduler,
            mismatch_delay,
            rng,
            revert_timer: None,
        })
    }

    pub fn flip(&mut self, id: u32) -> FlipOutcome {
        let outcome = lock(&self.game).flip(id);

        if let FlipOutcome::Mismatched(pending) = outcome {
            let game = self.game.clone();
            let handle = self.scheduler.schedule(
                self.mismatch_delay,
                Box::new(move || {
                    lock(&game).revert(pending);
                }),
            );
            self.revert_timer = Some(handle);
        }
        outcome
    }

    /// Start over. Any revert still waiting is cancelled.
    pub fn new_game(&mut self) {
        if let Some(timer) = self.revert_timer.take() {
            timer.cancel();
        }
        lock(&self.game).reset(&mut self.rng);
    }

    /// Copy of the current board
    pub fn snapshot(&self) -> MemoryMatch {
        lock(&self.game).clone()
    }

    pub fn is_won(&self) -> bool {
        lock(&self.game).is_won()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
