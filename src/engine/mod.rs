//! The engine: move evaluation and negamax search.
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use log::{debug, trace};
use crate::chess::{Board, Color, Error, Move, Result};

mod eval;
pub use eval::{evaluate_move, evaluate_move_with, PstMode};

/// The smallest depth [`search_move`] accepts. Below it the search cannot
/// see its own side being mated; at depth 3 both sides' mates are visible.
pub const MIN_SEARCH_DEPTH: u32 = 3;

/// The score of a line that captures a king.
const KING_CAPTURE_SCORE: i32 = 4_000;

/// Initial best score, below any reachable cumulative swing, so that the
/// first move examined always becomes the provisional best.
const SCORE_FLOOR: i32 = -4_196;

/// Cumulative scores beyond this threshold can only come from a line that
/// wins a king; everything reachable by ordinary material swings stays
/// within it.
const MATE_THRESHOLD: i32 = 1_260;

////////////////////////////////////////////////////////////////////////////////////////////////////
/// The outcome of a [`search_move`] call.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SearchResult {
    best_move: Option<Move>,
    opponent_mated: bool,
}

impl SearchResult {
    /// Returns the selected move, or `None` when the mover has no moves or
    /// every line loses the mover's king.
    pub fn best_move(&self) -> Option<Move> {
        self.best_move
    }

    /// Returns `true` if the selected move forces the capture of the
    /// opposing king within the search depth. Checkmate and stalemate are
    /// not distinguished.
    pub fn opponent_mated(&self) -> bool {
        self.opponent_mated
    }

    fn none() -> SearchResult {
        SearchResult {
            best_move: None,
            opponent_mated: false,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Returns the cumulative score of the best line from `board` to `depth`
/// plies, from the perspective of the original caller.
///
/// Each ply greedily follows the single highest-scoring move (first seen
/// wins ties). When that move captures a king the recursion short-circuits
/// to `-4000` regardless of remaining depth, which is how king safety
/// surfaces in this engine: there is no legality filtering anywhere below
/// this point.
pub fn nega_max(board: &Board, depth: u32) -> Result<i32> {
    if depth == 0 {
        return Ok(0);
    }
    let moves = board.moves()?;
    if moves.is_empty() {
        return Ok(0);
    }

    let mut best_score = SCORE_FLOOR;
    let mut best_move = Move::from_word(0);
    for mv in moves.iter() {
        let score = eval::evaluate_move(board, mv);
        if score > best_score {
            best_score = score;
            best_move = mv;
        }
    }

    if board.nibble(best_move.destination_cell()) & 0x7 == 6 {
        return Ok(-KING_CAPTURE_SCORE);
    }

    let continuation = nega_max(&board.apply_move(best_move), depth - 1)?;
    // alternate the perspective the accumulated total is expressed from
    Ok(if board.turn() == Color::Black {
        best_score + continuation
    } else {
        -best_score + continuation
    })
}

/// Searches for the best move from `board` at the given depth.
///
/// Every candidate is scored as its own evaluation plus the [`nega_max`]
/// continuation of the opponent's best play; ties keep the earliest
/// candidate in generation order. A best score below `-1260` means every
/// line loses the mover's king, reported as no move at all.
///
/// # Errors
///
/// Fails with [`Error::InvalidDepth`] when `depth` is below
/// [`MIN_SEARCH_DEPTH`], and propagates [`Error::CapacityExceeded`] from
/// move generation.
pub fn search_move(board: &Board, depth: u32) -> Result<SearchResult> {
    if depth < MIN_SEARCH_DEPTH {
        return Err(Error::InvalidDepth);
    }
    let moves = board.moves()?;
    if moves.is_empty() {
        return Ok(SearchResult::none());
    }

    let mut best_score = SCORE_FLOOR;
    let mut best_move = Move::from_word(0);
    for mv in moves.iter() {
        let score = eval::evaluate_move(board, mv) + nega_max(&board.apply_move(mv), depth - 1)?;
        trace!("candidate {} scores {}", mv, score);
        if score > best_score {
            best_score = score;
            best_move = mv;
        }
    }

    if best_score < -MATE_THRESHOLD {
        debug!("no playable line at depth {}: best score {}", depth, best_score);
        return Ok(SearchResult::none());
    }

    debug!("selected {} at depth {} with score {}", best_move, depth, best_score);
    Ok(SearchResult {
        best_move: Some(best_move),
        opponent_mated: best_score > MATE_THRESHOLD,
    })
}

/// Checks a caller-supplied move for full legality: the geometric rules of
/// the piece, then a one-reply probe that rejects moves after which the
/// opponent's best single move wins the mover's king.
///
/// The probe inherits a known blind spot of the scoring scheme: a reply
/// that could capture the king is only seen when it is also the opponent's
/// highest-scoring move.
pub fn is_legal_move(board: &Board, mv: Move) -> Result<bool> {
    if !board.is_pseudo_legal(mv) {
        return Ok(false);
    }
    Ok(nega_max(&board.apply_move(mv), 1)? >= -MATE_THRESHOLD)
}
