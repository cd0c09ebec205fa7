//! Functions to evaluate a move.
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use crate::chess::{Board, Move};

////////////////////////////////////////////////////////////////////////////////////////////////////
// Piece-square tables, one placement value per playable square in packed
// (row-major) order, packed into 256-bit words stored as little-endian
// limbs. Pawns, bishops, rooks and knights use 7-bit entries with entry 35
// in the least-significant bits. Queens and kings need 12-bit entries and
// are split across two words: a near half for entries 0..18 and a far half
// for entries 18..36, each likewise ending with its last entry in the
// least-significant bits.
//
// The values hover around each piece's base worth: pawn 20, bishop 66,
// rook 100, knight 64, queen 180 and king 4000. The king's worth is chosen
// so that any line capturing a king outweighs every reachable material
// swing put together.

const PAWN_TABLE: [u64; 4] = [
    0x103C_54A1_4285_0A14,
    0x0A94_3468_A152_A788,
    0xC78F_1E28_58C1_82C5,
    0x0285_0A14_2850_F1E3,
];
const BISHOP_TABLE: [u64; 4] = [
    0x4287_01F4_0810_203E,
    0x2044_8912_2408_10E1,
    0x50A1_4081_0E24_4870,
    0x07D0_2040_80FA_0428,
];
const ROOK_TABLE: [u64; 4] = [
    0x64C9_8F26_4CB9_7264,
    0xF1E4_C993_263C_7932,
    0xD9B3_65C7_9326_4C98,
    0x0C99_3264_C993_2E6C,
];
const KNIGHT_TABLE: [u64; 4] = [
    0xC178_E1B3_874E_9C36,
    0x9D41_8912_0BA7_0F20,
    0x101E_3875_0224_480E,
    0x06CE_1B36_70E9_C3C8,
];
const QUEEN_TABLE_NEAR: [u64; 4] = [
    0x30B4_0B50_B50B_40B3,
    0xB40B_40B4_0B40_B20B,
    0x0B30_B30B_20B0_0B20,
    0x0000_0000_000B_00B2,
];
const QUEEN_TABLE_FAR: [u64; 4] = [
    0x00B2_0B30_B30B_20B0,
    0xB40B_50B4_0B40_B20B,
    0x0B50_B50B_40B3_0B20,
    0x0000_0000_000B_30B5,
];
const KING_TABLE_NEAR: [u64; 4] = [
    0xCF9A_F98F_98F9_AF9B,
    0x98F9_6F96_F98F_9AF9,
    0xF96F_96F9_8F9A_F9AF,
    0x0000_0000_00F9_AF98,
];
const KING_TABLE_FAR: [u64; 4] = [
    0x4FA6_FA2F_A2FA_6FA4,
    0xA1FA_0FA0_FA1F_A1FA,
    0xF9CF_9CF9_CF9E_FA1F,
    0x0000_0000_00F9_EF9C,
];

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Selects how the mover's old and new placement values dispatch into the
/// split queen and king tables.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PstMode {
    /// Each read selects the table half its own square falls in. This is
    /// the corrected dispatch and the default.
    Split,
    /// Both reads use the half selected by the origin square, reproducing
    /// the historical behaviour in which a queen or king crossing the
    /// table midpoint reads past the end of its half and scores zero
    /// there. Only useful for replaying games recorded under that rule.
    OriginHalf,
}

/// Returns the score of playing `mv` on `board` from the mover's
/// perspective: the change in the mover's placement value plus the
/// placement value of whatever stood on the destination.
///
/// Both endpoints of `mv` must be playable squares; the score of any other
/// word is unspecified (but computing it will not panic).
pub fn evaluate_move(board: &Board, mv: Move) -> i32 {
    evaluate_move_with(board, mv, PstMode::Split)
}

/// Like [`evaluate_move`], with an explicit [`PstMode`].
pub fn evaluate_move_with(board: &Board, mv: Move, mode: PstMode) -> i32 {
    let from = mv.origin_cell() as i32;
    let to = mv.destination_cell() as i32;
    let from_k = 6 * ((from >> 3) - 1) + ((from & 7) - 1);
    let to_k = 6 * ((to >> 3) - 1) + ((to & 7) - 1);

    let mover = board.nibble(mv.origin_cell()) & 0x7;
    let target = board.nibble(mv.destination_cell()) & 0x7;

    let capture = if target == 0 { 0 } else { placement(target, to_k) };
    let (old, new) = match mode {
        PstMode::Split => (placement(mover, from_k), placement(mover, to_k)),
        PstMode::OriginHalf => placement_from_origin_half(mover, from_k, to_k),
    };
    capture + new - old
}

/// Placement value of a piece kind on packed square `k`, dispatching each
/// split-table read on its own square.
fn placement(kind: u8, k: i32) -> i32 {
    match kind {
        1 => field(&PAWN_TABLE, 7 * (35 - k), 7),
        2 => field(&BISHOP_TABLE, 7 * (35 - k), 7),
        3 => field(&ROOK_TABLE, 7 * (35 - k), 7),
        4 => field(&KNIGHT_TABLE, 7 * (35 - k), 7),
        5 if k < 18 => field(&QUEEN_TABLE_NEAR, 12 * (17 - k), 12),
        5 => field(&QUEEN_TABLE_FAR, 12 * (35 - k), 12),
        6 if k < 18 => field(&KING_TABLE_NEAR, 12 * (17 - k), 12),
        6 => field(&KING_TABLE_FAR, 12 * (35 - k), 12),
        _ => 0,
    }
}

/// Old and new placement values with both reads forced into the table half
/// of the origin square. Out-of-range offsets read as zero, as they did in
/// the 256-bit arithmetic this reproduces.
fn placement_from_origin_half(kind: u8, from_k: i32, to_k: i32) -> (i32, i32) {
    let (near, far) = match kind {
        5 => (&QUEEN_TABLE_NEAR, &QUEEN_TABLE_FAR),
        6 => (&KING_TABLE_NEAR, &KING_TABLE_FAR),
        _ => return (placement(kind, from_k), placement(kind, to_k)),
    };
    if from_k < 18 {
        (
            field(near, 12 * (17 - from_k), 12),
            field(near, 12 * (17 - to_k), 12),
        )
    } else {
        (
            field(far, 12 * (35 - from_k), 12),
            field(far, 12 * (35 - to_k), 12),
        )
    }
}

/// Extracts `width` bits at `offset` from a 256-bit word. Offsets outside
/// the word read as zero, matching a shift of the underlying wide integer.
fn field(word: &[u64; 4], offset: i32, width: u32) -> i32 {
    if offset < 0 || offset >= 256 {
        return 0;
    }
    let offset = offset as usize;
    let shift = offset % 64;
    let limb = offset / 64;
    let mut bits = word[limb] >> shift;
    if shift + width as usize > 64 && limb + 1 < 4 {
        bits |= word[limb + 1] << (64 - shift);
    }
    (bits & ((1 << width) - 1)) as i32
}
