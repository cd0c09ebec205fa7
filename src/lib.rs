//! A chess engine for a six-by-six board.
//!
//! The board holds a reduced piece set (no castling, en passant or
//! promotion) and is packed into a single 256-bit word. The [`chess`]
//! module implements the board codec and move generation; the [`engine`]
//! module implements move evaluation and a negamax search.
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
#![warn(missing_docs, missing_debug_implementations, unused_extern_crates)]

pub mod chess;
pub mod engine;
