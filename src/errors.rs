// This file is part of the pgn-tree library.
// Copyright (C) 2026 The pgn-tree developers
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <http://www.gnu.org/licenses/>.

use std::io;

use crate::Position;

/// Fatal error that ends a [`GameStream`](crate::GameStream).
///
/// Malformed PGN never produces an `Error`. It is reported as
/// [`Diagnostic`](crate::Diagnostic)s on the affected game instead.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Reading from the underlying source failed.
    #[error("failed to read pgn source: {0}")]
    Io(#[from] io::Error),
    /// Variations nested deeper than [`Config::max_depth`](crate::Config::max_depth).
    #[error("variations nested deeper than {limit} at {position}")]
    TooDeep { limit: usize, position: Position },
    /// A game with more plies than [`Config::max_plies`](crate::Config::max_plies).
    #[error("game has more than {limit} plies at {position}")]
    TooManyPlies { limit: usize, position: Position },
}

impl Error {
    /// Whether the error was caused by a configured resource limit rather
    /// than by the source.
    pub fn is_limit(&self) -> bool {
        matches!(self, Error::TooDeep { .. } | Error::TooManyPlies { .. })
    }
}
