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

/// Resource limits of a [`GameStream`](crate::GameStream).
///
/// Exceeding a limit aborts the stream with a fatal
/// [`Error`](crate::Error). `None` disables the limit.
///
/// # Examples
///
/// ```
/// use pgn_tree::{Config, Error, GameStream};
///
/// let config = Config {
///     max_depth: Some(2),
///     ..Config::default()
/// };
///
/// let mut games = GameStream::with_config(&b"1. e4 (1. d4 (1. c4 (1. Nf3))) *"[..], config);
/// assert!(matches!(games.next(), Some(Err(Error::TooDeep { limit: 2, .. }))));
/// assert!(games.next().is_none());
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Config {
    /// Maximum nesting of variations. Defaults to `Some(128)`.
    pub max_depth: Option<usize>,
    /// Maximum number of plies in one game, counted over the mainline and
    /// all variations. Defaults to `Some(65_536)`.
    pub max_plies: Option<usize>,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            max_depth: Some(128),
            max_plies: Some(65_536),
        }
    }
}

impl Config {
    /// No limits at all.
    pub const UNLIMITED: Config = Config {
        max_depth: None,
        max_plies: None,
    };
}
