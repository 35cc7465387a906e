//! Single-ply tactical opponent
//!
//! The agent never searches ahead. During placement it blocks an
//! immediate opponent line or places at random; once its pieces are all
//! placed it looks for a winning relocation, then a block, then falls back
//! to a random relocation or window shift.

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use crate::board::{Board, Coord};
use crate::game::{completes_line, Action, GameState, Player, Snapshot};

/// Heuristic opponent for one player symbol
pub struct HeuristicAgent {
    pub player: Player,
    rng: ChaCha8Rng,
}

impl HeuristicAgent {
    pub fn new(player: Player) -> Self {
        Self::with_seed(player, 42)
    }

    pub fn with_seed(player: Player, seed: u64) -> Self {
        Self::with_rng(player, ChaCha8Rng::seed_from_u64(seed))
    }

    pub fn with_rng(player: Player, rng: ChaCha8Rng) -> Self {
        Self { player, rng }
    }

    /// Propose an action for the agent's player, or `None` to pass
    pub fn decide(&mut self, snapshot: &Snapshot<'_>) -> Option<Action> {
        decide(snapshot, self.player, &mut self.rng)
    }

    /// Convenience for drivers holding the whole state
    pub fn decide_for(&mut self, state: &GameState) -> Option<Action> {
        self.decide(&state.snapshot())
    }
}

// ============================================================================
// DECISION PHASES
// ============================================================================

/// Pure decision function over a snapshot and a random source
pub fn decide<R: Rng + ?Sized>(snapshot: &Snapshot<'_>, player: Player, rng: &mut R) -> Option<Action> {
    let opponent = player.opponent();

    if snapshot.placed.get(player) < snapshot.max_pieces {
        if let Some(to) = find_block(snapshot, opponent) {
            tracing::debug!(%player, %to, "blocking placement");
            return Some(Action::Place { to });
        }
        let to = empty_cells(snapshot).choose(rng).copied()?;
        return Some(Action::Place { to });
    }

    if let Some((from, to)) = find_winning_relocation(snapshot, player) {
        tracing::debug!(%player, %from, %to, "winning relocation");
        return Some(Action::Relocate { from, to });
    }

    if let Some(to) = find_block(snapshot, opponent) {
        if let Some(&from) = own_pieces_in_window(snapshot, player).choose(rng) {
            tracing::debug!(%player, %from, %to, "blocking relocation");
            return Some(Action::Relocate { from, to });
        }
    }

    fallback(snapshot, player, rng)
}

/// First empty window cell, row-major, where `opponent` would complete a line
pub fn find_block(snapshot: &Snapshot<'_>, opponent: Player) -> Option<Coord> {
    empty_cells(snapshot)
        .into_iter()
        .find(|&c| completes_line(snapshot.board, snapshot.window, c, opponent, snapshot.line_length))
}

/// First (piece, target) pair whose relocation completes a line for `player`
pub fn find_winning_relocation(snapshot: &Snapshot<'_>, player: Player) -> Option<(Coord, Coord)> {
    let targets = empty_cells(snapshot);
    for from in own_pieces_in_window(snapshot, player) {
        let mut board: Board = snapshot.board.clone();
        board.set(from, None);
        for &to in &targets {
            if completes_line(&board, snapshot.window, to, player, snapshot.line_length) {
                return Some((from, to));
            }
        }
    }
    None
}

/// Random relocation or random window shift, chosen uniformly among
/// whichever exist
pub fn fallback<R: Rng + ?Sized>(snapshot: &Snapshot<'_>, player: Player, rng: &mut R) -> Option<Action> {
    let mut options = Vec::with_capacity(2);

    let pieces = own_pieces_in_window(snapshot, player);
    let targets = empty_cells(snapshot);
    if let (Some(&from), Some(&to)) = (pieces.choose(rng), targets.choose(rng)) {
        options.push(Action::Relocate { from, to });
    }

    let shifts = snapshot.window.legal_shifts(snapshot.board_size);
    if let Some(&direction) = shifts.choose(rng) {
        options.push(Action::ShiftWindow { direction });
    }

    options.choose(rng).copied()
}

// ============================================================================
// HELPERS
// ============================================================================

fn empty_cells(snapshot: &Snapshot<'_>) -> Vec<Coord> {
    snapshot
        .window
        .cells()
        .filter(|&c| snapshot.board.is_empty(c))
        .collect()
}

fn own_pieces_in_window(snapshot: &Snapshot<'_>, player: Player) -> Vec<Coord> {
    snapshot
        .window
        .cells()
        .filter(|&c| snapshot.board.get(c) == Some(player))
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================
