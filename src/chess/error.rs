//! Defines the error types needed by the chess module
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::fmt;

/// A specialized `Result` type for board and engine operations.
pub type Result<T> = std::result::Result<T, Error>;

////////////////////////////////////////////////////////////////////////////////////////////////////
/// An error from a board or engine operation
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Error {
    /// The board word has a non-empty sentinel cell, a misplaced turn
    /// marker, or a cell with an out-of-range piece kind
    InvalidBoard,
    /// The cell index does not name a playable square
    InvalidSquare,
    /// The search depth is below the supported minimum
    InvalidDepth,
    /// More moves were generated than the move list can hold
    CapacityExceeded,
    /// Cannot parse the input
    ParseError,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidBoard => "malformed board word",
            Error::InvalidSquare => "cell index is not a playable square",
            Error::InvalidDepth => "search depth below the supported minimum",
            Error::CapacityExceeded => "move list capacity exceeded",
            Error::ParseError => "cannot parse the input",
        }
        .fmt(f)
    }
}

impl std::error::Error for Error {}
