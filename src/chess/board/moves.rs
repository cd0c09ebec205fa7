//! Move generation for the packed board
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use super::*;

/// Knight step offsets, one per byte, least-significant byte first.
const KNIGHT_STEPS: u32 = 0x060A_0F11;
/// King step offsets, one per byte, least-significant byte first.
const KING_STEPS: u32 = 0x0107_0809;

/// Bit `d` is set iff `d` is the absolute cell delta of a knight step.
const KNIGHT_DELTAS: u64 = 0x28440;
/// Bit `d` is set iff `d` is the absolute cell delta of a king step.
const KING_DELTAS: u64 = 0x382;

impl Board {
    /// Generates every pseudo-legal move for the side to move, in a fixed
    /// generation order.
    ///
    /// Pseudo-legal means geometrically legal, on the board, and not
    /// capturing an own piece. Moves that leave the mover's king
    /// capturable are *not* filtered out here; the search surfaces them
    /// through the king-capture score and [`crate::engine::is_legal_move`]
    /// rejects them for caller-supplied moves.
    pub fn moves(&self) -> Result<MoveList> {
        let mut list = MoveList::new();
        for &cell in CELL_OF.iter() {
            let cell = cell as usize;
            let piece = self.nibble(cell);
            if piece == 0 || piece >> 3 != self.turn_bit() {
                continue;
            }
            match piece & 0x7 {
                1 => self.pawn_moves(cell, &mut list)?,
                4 => self.step_moves(cell, KNIGHT_STEPS, &mut list)?,
                6 => self.step_moves(cell, KING_STEPS, &mut list)?,
                kind => self.sliding_moves(cell, kind, &mut list)?,
            }
        }
        Ok(list)
    }

    /// Pawns advance one square, two from their starting rank, and capture
    /// one square diagonally forward. The quiet advance is suppressed on
    /// the far rank, where it would step onto the sentinel rail.
    fn pawn_moves(&self, cell: usize, list: &mut MoveList) -> Result<()> {
        if playable(cell + 8) && self.nibble(cell + 8) == 0 {
            list.push(Move::from_cells(cell, cell + 8))?;
            if cell >> 3 == 2 && self.nibble(cell + 16) == 0 {
                list.push(Move::from_cells(cell, cell + 16))?;
            }
        }
        if self.is_capture(cell + 7) {
            list.push(Move::from_cells(cell, cell + 7))?;
        }
        if self.is_capture(cell + 9) {
            list.push(Move::from_cells(cell, cell + 9))?;
        }
        Ok(())
    }

    /// Knights and kings try each packed offset in both directions.
    fn step_moves(&self, cell: usize, steps: u32, list: &mut MoveList) -> Result<()> {
        for i in 0..4 {
            let step = ((steps >> (8 * i)) & 0xFF) as usize;
            if self.is_valid_target((cell + step) as i32) {
                list.push(Move::from_cells(cell, cell + step))?;
            }
            if step <= cell && self.is_valid_target((cell - step) as i32) {
                list.push(Move::from_cells(cell, cell - step))?;
            }
        }
        Ok(())
    }

    /// Rooks slide along the orthogonal rays, bishops along the diagonal
    /// rays, queens along both (orthogonals first).
    fn sliding_moves(&self, cell: usize, kind: u8, list: &mut MoveList) -> Result<()> {
        if kind == 3 || kind == 5 {
            for &direction in &[1i32, -1, 8, -8] {
                self.ray_moves(cell, direction, list)?;
            }
        }
        if kind == 2 || kind == 5 {
            for &direction in &[7i32, -7, 9, -9] {
                self.ray_moves(cell, direction, list)?;
            }
        }
        Ok(())
    }

    /// Walks one ray, appending every valid square and stopping after a
    /// capture or at the first invalid square.
    fn ray_moves(&self, cell: usize, direction: i32, list: &mut MoveList) -> Result<()> {
        let mut to = cell as i32 + direction;
        loop {
            // cell 0 carries the side-to-move marker, which the falling
            // diagonal would otherwise read as a capturable piece
            if direction == -9 && to == 0 {
                break;
            }
            if !self.is_valid_target(to) {
                break;
            }
            list.push(Move::from_cells(cell, to as usize))?;
            if self.is_capture(to as usize) {
                break;
            }
            to += direction;
        }
        Ok(())
    }

    /// Checks that `mv` is geometrically playable for the side to move:
    /// both endpoints on the board, an own piece on the origin, and the
    /// movement pattern of that piece with a clear path.
    ///
    /// King safety is not considered; [`crate::engine::is_legal_move`]
    /// layers the one-reply probe on top of this check.
    pub fn is_pseudo_legal(&self, mv: Move) -> bool {
        let from = mv.origin_cell();
        let to = mv.destination_cell();
        if !playable(from) || !playable(to) {
            return false;
        }
        let piece = self.nibble(from);
        if piece == 0 || piece >> 3 != self.turn_bit() {
            return false;
        }
        let delta = (to as i32 - from as i32).abs() as usize;
        match piece & 0x7 {
            1 => {
                if to <= from {
                    return false;
                }
                match to - from {
                    8 => self.nibble(to) == 0,
                    16 => from >> 3 == 2 && self.nibble(from + 8) == 0 && self.nibble(to) == 0,
                    7 | 9 => self.is_capture(to),
                    _ => false,
                }
            }
            4 => (KNIGHT_DELTAS >> delta) & 1 == 1 && self.is_valid_target(to as i32),
            6 => (KING_DELTAS >> delta) & 1 == 1 && self.is_valid_target(to as i32),
            2 => self.search_ray(from, to, 7) || self.search_ray(from, to, 9),
            3 => self.search_ray(from, to, 1) || self.search_ray(from, to, 8),
            5 => {
                self.search_ray(from, to, 1)
                    || self.search_ray(from, to, 8)
                    || self.search_ray(from, to, 7)
                    || self.search_ray(from, to, 9)
            }
            _ => false,
        }
    }

    /// Checks whether a slide from `from` to `to` exists along rays with
    /// step `step`: the distance must be a whole number of steps and every
    /// intermediate cell an empty playable square.
    fn search_ray(&self, from: usize, to: usize, step: usize) -> bool {
        let (lo, hi) = if from < to { (from, to) } else { (to, from) };
        if (hi - lo) % step != 0 {
            return false;
        }
        let mut cell = lo + step;
        while cell < hi {
            if !playable(cell) || self.nibble(cell) != 0 {
                return false;
            }
            cell += step;
        }
        self.is_valid_target(to as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chess::BoardBuilder;

    fn words(list: &MoveList) -> Vec<String> {
        list.iter().map(|mv| mv.to_string()).collect()
    }

    fn board(pieces: &[(Color, Piece, &str)], turn: Color) -> Board {
        let mut builder = BoardBuilder::new();
        for &(color, piece, square) in pieces {
            builder.piece(color, piece, square.parse().unwrap());
        }
        builder.turn(turn).build()
    }

    #[test]
    fn knight_moves_from_the_center() {
        let b = board(&[(Color::White, Piece::Knight, "d4")], Color::White);
        assert_eq!(
            words(&b.moves().unwrap()),
            ["d4e6", "d4c2", "d4c6", "d4e2", "d4f5", "d4b3", "d4b5", "d4f3"]
        );
    }

    #[test]
    fn knight_moves_from_the_corner() {
        let b = board(&[(Color::White, Piece::Knight, "a1")], Color::White);
        assert_eq!(words(&b.moves().unwrap()), ["a1b3", "a1c2"]);
    }

    #[test]
    fn king_moves_from_the_center() {
        let b = board(&[(Color::White, Piece::King, "d4")], Color::White);
        assert_eq!(
            words(&b.moves().unwrap()),
            ["d4e5", "d4c3", "d4d5", "d4d3", "d4c5", "d4e3", "d4e4", "d4c4"]
        );
    }

    #[test]
    fn rook_moves_ray_by_ray() {
        let b = board(&[(Color::White, Piece::Rook, "d4")], Color::White);
        assert_eq!(
            words(&b.moves().unwrap()),
            [
                "d4e4", "d4f4", "d4c4", "d4b4", "d4a4", "d4d5", "d4d6", "d4d3", "d4d2", "d4d1"
            ]
        );
    }

    #[test]
    fn bishop_moves_stop_before_the_marker_corner() {
        let b = board(&[(Color::White, Piece::Bishop, "d4")], Color::White);
        assert_eq!(
            words(&b.moves().unwrap()),
            ["d4c5", "d4b6", "d4e3", "d4f2", "d4e5", "d4f6", "d4c3", "d4b2", "d4a1"]
        );
    }

    #[test]
    fn queen_moves_orthogonals_before_diagonals() {
        let b = board(&[(Color::White, Piece::Queen, "d4")], Color::White);
        assert_eq!(
            words(&b.moves().unwrap()),
            [
                "d4e4", "d4f4", "d4c4", "d4b4", "d4a4", "d4d5", "d4d6", "d4d3", "d4d2", "d4d1",
                "d4c5", "d4b6", "d4e3", "d4f2", "d4e5", "d4f6", "d4c3", "d4b2", "d4a1"
            ]
        );
    }

    #[test]
    fn pawn_moves_with_both_captures() {
        let b = board(
            &[
                (Color::White, Piece::Pawn, "b2"),
                (Color::Black, Piece::Pawn, "a3"),
                (Color::Black, Piece::Pawn, "c3"),
            ],
            Color::White,
        );
        assert_eq!(words(&b.moves().unwrap()), ["b2b3", "b2b4", "b2a3", "b2c3"]);
    }

    #[test]
    fn blocked_pawn_has_no_moves() {
        let b = board(
            &[
                (Color::White, Piece::Pawn, "b2"),
                (Color::Black, Piece::Pawn, "b3"),
            ],
            Color::White,
        );
        assert!(b.moves().unwrap().is_empty());
    }

    #[test]
    fn pawn_double_advance_needs_both_squares_empty() {
        let b = board(
            &[
                (Color::White, Piece::Pawn, "b2"),
                (Color::Black, Piece::Pawn, "b4"),
            ],
            Color::White,
        );
        assert_eq!(words(&b.moves().unwrap()), ["b2b3"]);
    }

    #[test]
    fn pawn_on_the_far_rank_has_no_quiet_advance() {
        let b = board(&[(Color::White, Piece::Pawn, "b6")], Color::White);
        assert!(b.moves().unwrap().is_empty());
    }

    #[test]
    fn rays_stop_on_the_first_capture() {
        let b = board(
            &[
                (Color::White, Piece::Rook, "a1"),
                (Color::Black, Piece::Pawn, "a3"),
                (Color::White, Piece::Pawn, "f1"),
            ],
            Color::White,
        );
        assert_eq!(
            words(&b.moves().unwrap()),
            ["a1b1", "a1c1", "a1d1", "a1e1", "a1a2", "a1a3", "f1f2"]
        );
    }

    #[test]
    fn generation_skips_the_opponent() {
        let b = board(
            &[
                (Color::White, Piece::Rook, "a1"),
                (Color::Black, Piece::Rook, "f6"),
            ],
            Color::Black,
        );
        for mv in b.moves().unwrap().iter() {
            assert_eq!(mv.origin().unwrap().to_string(), "f6");
        }
    }

    #[test]
    fn starting_position_has_sixteen_moves() {
        let list = Board::new().moves().unwrap();
        assert_eq!(
            words(&list),
            [
                "b1c3", "b1a3", "e1f3", "e1d3", "a2a3", "a2a4", "b2b3", "b2b4", "c2c3", "c2c4",
                "d2d3", "d2d4", "e2e3", "e2e4", "f2f3", "f2f4"
            ]
        );
    }

    #[test]
    fn generated_moves_are_pseudo_legal_and_sound() {
        let boards = [
            Board::new(),
            Board::new().apply_move("c2c4".parse().unwrap()),
            board(
                &[
                    (Color::White, Piece::Queen, "d4"),
                    (Color::White, Piece::King, "a1"),
                    (Color::Black, Piece::Rook, "d6"),
                    (Color::Black, Piece::King, "f6"),
                ],
                Color::White,
            ),
        ];
        for b in boards.iter() {
            for mv in b.moves().unwrap().iter() {
                let origin = mv.origin().expect("origin on the board");
                assert!(mv.destination().is_some(), "destination on the board");
                let (color, _) = b.piece_at(origin).expect("own piece on the origin");
                assert_eq!(color, b.turn());
                assert!(b.is_pseudo_legal(mv), "{} accepted by the checker", mv);
            }
        }
    }

    #[test]
    fn pseudo_legal_rejects_bad_geometry() {
        let start = Board::new();
        let mv = |s: &str| s.parse::<Move>().unwrap();
        assert!(!start.is_pseudo_legal(mv("a2b2"))); // pawn sideways
        assert!(!start.is_pseudo_legal(mv("a2b3"))); // pawn capture without a victim
        assert!(!start.is_pseudo_legal(mv("a1a3"))); // rook through own pawn
        assert!(!start.is_pseudo_legal(mv("d4d5"))); // empty origin
        assert!(!start.is_pseudo_legal(mv("a5a4"))); // opponent's piece
        assert!(!start.is_pseudo_legal(Move::from_word(0x211))); // rail endpoints
        assert!(start.is_pseudo_legal(mv("b1c3")));
        assert!(start.is_pseudo_legal(mv("c2c4")));
    }

    #[test]
    fn pseudo_legal_rejects_rank_wrapping_slides() {
        // a rook on f1 may not "slide" to a2 even though the cell indices
        // are adjacent in the packed word
        let b = board(&[(Color::White, Piece::Rook, "f1")], Color::White);
        assert!(!b.is_pseudo_legal("f1a2".parse().unwrap()));
        assert!(b.is_pseudo_legal("f1a1".parse().unwrap()));
        assert!(b.is_pseudo_legal("f1f6".parse().unwrap()));
    }
}
