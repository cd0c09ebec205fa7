//! Contains a builder for `Board`
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use super::*;

////////////////////////////////////////////////////////////////////////////////////////////////////
/// A builder for `Board`, for setting up arbitrary positions.
///
/// Squares and pieces are typed, so every built board satisfies the
/// structural invariants by construction, including the placement of the
/// side-to-move marker.
///
/// ```
/// use minichess::chess::{BoardBuilder, Color, Piece};
///
/// let board = BoardBuilder::new()
///     .piece(Color::White, Piece::Rook, "a1".parse()?)
///     .piece(Color::Black, Piece::King, "a6".parse()?)
///     .turn(Color::White)
///     .build();
/// assert!(board.validate().is_ok());
/// # Ok::<(), minichess::chess::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct BoardBuilder {
    cells: [u8; Square::COUNT],
    turn: Color,
}

impl BoardBuilder {
    /// Creates a new builder for an empty board with the white-coded side
    /// to move
    pub fn new() -> Self {
        BoardBuilder {
            cells: [0; Square::COUNT],
            turn: Color::White,
        }
    }

    /// Sets the piece at `square`
    pub fn piece(&mut self, color: Color, piece: Piece, square: Square) -> &mut Self {
        self.cells[square.packed_index()] = ((color as u8) << 3) | piece as u8;
        self
    }

    /// Clears the piece at `square`
    pub fn clear(&mut self, square: Square) -> &mut Self {
        self.cells[square.packed_index()] = 0;
        self
    }

    /// Sets the side to move
    pub fn turn(&mut self, color: Color) -> &mut Self {
        self.turn = color;
        self
    }

    /// Builds the board word
    pub fn build(&self) -> Board {
        let mut board = Board::empty();
        for (k, &nibble) in self.cells.iter().enumerate() {
            board.set_nibble(CELL_OF[k] as usize, nibble);
        }
        if self.turn == Color::Black {
            // move the marker to its parking corner
            board.set_nibble(0, 0);
            board.set_nibble(63, 1);
        }
        board
    }
}

impl Default for BoardBuilder {
    fn default() -> Self {
        Self::new()
    }
}
