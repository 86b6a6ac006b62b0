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

use std::{error::Error, fmt, str::FromStr};

/// A game termination marker: `1-0`, `0-1`, `1/2-1/2` or `*`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Outcome {
    /// `1-0`
    WhiteWins,
    /// `0-1`
    BlackWins,
    /// `1/2-1/2`
    Draw,
    /// `*`, game ongoing, abandoned or result unknown.
    Unknown,
}

impl Outcome {
    /// Parses a result token.
    ///
    /// # Errors
    ///
    /// Returns [`ParseOutcomeError`] for anything but the four PGN result
    /// tokens.
    ///
    /// # Examples
    ///
    /// ```
    /// use pgn_tree::Outcome;
    ///
    /// assert_eq!(Outcome::from_ascii(b"1/2-1/2"), Ok(Outcome::Draw));
    /// assert!(Outcome::from_ascii(b"1-1").is_err());
    /// ```
    pub fn from_ascii(s: &[u8]) -> Result<Outcome, ParseOutcomeError> {
        match s {
            b"1-0" => Ok(Outcome::WhiteWins),
            b"0-1" => Ok(Outcome::BlackWins),
            b"1/2-1/2" => Ok(Outcome::Draw),
            b"*" => Ok(Outcome::Unknown),
            _ => Err(ParseOutcomeError),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Outcome::WhiteWins => "1-0",
            Outcome::BlackWins => "0-1",
            Outcome::Draw => "1/2-1/2",
            Outcome::Unknown => "*",
        }
    }

    pub const fn is_known(self) -> bool {
        !matches!(self, Outcome::Unknown)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Outcome {
    type Err = ParseOutcomeError;

    fn from_str(s: &str) -> Result<Outcome, ParseOutcomeError> {
        Outcome::from_ascii(s.as_bytes())
    }
}

/// Error when parsing the textual representation of an [`Outcome`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseOutcomeError;

impl fmt::Display for ParseOutcomeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid outcome")
    }
}

impl Error for ParseOutcomeError {}
