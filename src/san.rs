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

//! Decode Standard Algebraic Notation without board state.
//!
//! The decoder only looks at the shape of a word: piece letter,
//! disambiguation, capture marker, destination square, promotion and
//! check suffixes. It never consults a position, so `Nf3` is decoded even
//! if no knight can reach `f3`.
//!
//! # Examples
//!
//! ```
//! use pgn_tree::{Role, Square, san::{San, SanPlus, Suffix}};
//!
//! let san_plus: SanPlus = "exd8=Q+".parse()?;
//! assert_eq!(san_plus.suffix, Some(Suffix::Check));
//! assert_eq!(san_plus.san, San::Normal {
//!     role: Role::Pawn,
//!     file: Some(pgn_tree::File::E),
//!     rank: None,
//!     capture: true,
//!     to: "d8".parse::<Square>()?,
//!     promotion: Some(Role::Queen),
//! });
//! assert_eq!(san_plus.to_string(), "exd8=Q+");
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```

use std::{error::Error, fmt, str::FromStr};

use bitflags::bitflags;

use crate::{CastlingSide, File, Rank, Role, Square};

/// Words longer than this are never valid SAN.
const MAX_SAN_LEN: usize = 16;

/// Why a word could not be decoded as SAN.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum UnparsedReason {
    /// Nothing left after stripping suffixes.
    Empty,
    /// Longer than any valid SAN.
    TooLong,
    /// Uppercase letter that is not `N`, `B`, `R`, `Q`, `K` or `P`.
    UnknownPiece,
    /// The word does not end in a square.
    InvalidDestination,
    /// Unexpected characters between the piece and the destination.
    InvalidDisambiguation,
    /// Promotion of a piece, to a pawn or king, or not on the last rank.
    InvalidPromotion,
    /// `e.p.` on anything but a pawn capture.
    InvalidEnPassant,
}

impl UnparsedReason {
    /// Short stable code for the reason, used in diagnostics.
    pub const fn code(self) -> &'static str {
        match self {
            UnparsedReason::Empty => "empty",
            UnparsedReason::TooLong => "too-long",
            UnparsedReason::UnknownPiece => "unknown-piece",
            UnparsedReason::InvalidDestination => "invalid-destination",
            UnparsedReason::InvalidDisambiguation => "invalid-disambiguation",
            UnparsedReason::InvalidPromotion => "invalid-promotion",
            UnparsedReason::InvalidEnPassant => "invalid-en-passant",
        }
    }
}

impl fmt::Display for UnparsedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Error when parsing a syntactically invalid SAN.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseSanError {
    reason: UnparsedReason,
}

impl ParseSanError {
    const fn new(reason: UnparsedReason) -> ParseSanError {
        ParseSanError { reason }
    }

    pub const fn reason(&self) -> UnparsedReason {
        self.reason
    }
}

impl fmt::Display for ParseSanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid san ({})", self.reason)
    }
}

impl Error for ParseSanError {}

bitflags! {
    /// Markers carried by a decoded move.
    #[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize))]
    pub struct MoveFlags: u8 {
        const CAPTURE = 1 << 0;
        const CHECK = 1 << 1;
        const CHECKMATE = 1 << 2;
        const CASTLE_KINGSIDE = 1 << 3;
        const CASTLE_QUEENSIDE = 1 << 4;
        /// The move was written with an `e.p.` suffix.
        const EN_PASSANT = 1 << 5;
    }
}

/// A move in Standard Algebraic Notation.
#[derive(Debug, PartialEq, Eq, Clone, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum San {
    Normal {
        role: Role,
        file: Option<File>,
        rank: Option<Rank>,
        capture: bool,
        to: Square,
        promotion: Option<Role>,
    },
    Castle(CastlingSide),
}

impl San {
    /// Parses a SAN. Ignores a possible check, checkmate or en passant
    /// suffix.
    ///
    /// # Errors
    ///
    /// Returns [`ParseSanError`] if `san` is not syntactically valid.
    pub fn from_ascii(san: &[u8]) -> Result<San, ParseSanError> {
        SanPlus::from_ascii(san).map(|san_plus| san_plus.san)
    }

    fn decode(san: &[u8]) -> Result<San, ParseSanError> {
        match san {
            b"O-O" | b"0-0" => return Ok(San::Castle(CastlingSide::KingSide)),
            b"O-O-O" | b"0-0-0" => return Ok(San::Castle(CastlingSide::QueenSide)),
            _ => (),
        }

        let mut rest = san;

        let promotion = match *rest {
            [.., b'=', piece] => {
                rest = &rest[..rest.len() - 2];
                Some(
                    Role::from_upper_char(char::from(piece))
                        .ok_or(ParseSanError::new(UnparsedReason::InvalidPromotion))?,
                )
            }
            [.., b'1' | b'8', piece] if piece.is_ascii_uppercase() => {
                rest = &rest[..rest.len() - 1];
                Some(
                    Role::from_upper_char(char::from(piece))
                        .ok_or(ParseSanError::new(UnparsedReason::InvalidPromotion))?,
                )
            }
            _ => None,
        };

        if rest.len() < 2 {
            return Err(ParseSanError::new(if rest.is_empty() {
                UnparsedReason::Empty
            } else {
                UnparsedReason::InvalidDestination
            }));
        }
        let (head, dest) = rest.split_at(rest.len() - 2);
        let to = Square::from_ascii(dest)
            .map_err(|_| ParseSanError::new(UnparsedReason::InvalidDestination))?;
        rest = head;

        let capture = matches!(rest.last(), Some(b'x' | b':'));
        if capture {
            rest = &rest[..rest.len() - 1];
        }

        let role = match rest.first() {
            Some(&ch) if ch.is_ascii_uppercase() => {
                rest = &rest[1..];
                Role::from_upper_char(char::from(ch))
                    .ok_or(ParseSanError::new(UnparsedReason::UnknownPiece))?
            }
            _ => Role::Pawn,
        };

        let file = rest.first().and_then(|&ch| File::from_char(char::from(ch)));
        if file.is_some() {
            rest = &rest[1..];
        }

        let rank = rest.first().and_then(|&ch| Rank::from_char(char::from(ch)));
        if rank.is_some() {
            rest = &rest[1..];
        }

        if !rest.is_empty() {
            return Err(ParseSanError::new(UnparsedReason::InvalidDisambiguation));
        }

        if let Some(promoted) = promotion {
            if role != Role::Pawn || !promoted.is_promotion_target() || !to.rank().is_backrank()
            {
                return Err(ParseSanError::new(UnparsedReason::InvalidPromotion));
            }
        }

        Ok(San::Normal {
            role,
            file,
            rank,
            capture,
            to,
            promotion,
        })
    }

    /// The piece that moves. `King` for castling.
    pub const fn role(&self) -> Role {
        match *self {
            San::Normal { role, .. } => role,
            San::Castle(_) => Role::King,
        }
    }

    /// The destination square, unknown for castling without board state.
    pub const fn to(&self) -> Option<Square> {
        match *self {
            San::Normal { to, .. } => Some(to),
            San::Castle(_) => None,
        }
    }

    pub const fn is_capture(&self) -> bool {
        matches!(*self, San::Normal { capture: true, .. })
    }
}

impl FromStr for San {
    type Err = ParseSanError;

    fn from_str(san: &str) -> Result<San, ParseSanError> {
        San::from_ascii(san.as_bytes())
    }
}

impl fmt::Display for San {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            San::Normal {
                role,
                file,
                rank,
                capture,
                to,
                promotion,
            } => {
                if role != Role::Pawn {
                    write!(f, "{}", role.upper_char())?;
                }
                if let Some(file) = file {
                    write!(f, "{}", file.char())?;
                }
                if let Some(rank) = rank {
                    write!(f, "{}", rank.char())?;
                }
                if capture {
                    f.write_str("x")?;
                }
                write!(f, "{to}")?;
                if let Some(promotion) = promotion {
                    write!(f, "={}", promotion.upper_char())?;
                }
                Ok(())
            }
            San::Castle(side) => f.write_str(side.notation()),
        }
    }
}

/// Check (`+`) or checkmate (`#`) suffix.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Suffix {
    Check,
    Checkmate,
}

impl Suffix {
    pub const fn char(self) -> char {
        match self {
            Suffix::Check => '+',
            Suffix::Checkmate => '#',
        }
    }

    pub const fn from_char(ch: char) -> Option<Suffix> {
        match ch {
            '+' => Some(Suffix::Check),
            '#' => Some(Suffix::Checkmate),
            _ => None,
        }
    }
}

impl fmt::Display for Suffix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.char())
    }
}

/// A [`San`] with possible check, checkmate and en passant suffixes.
#[derive(Debug, PartialEq, Eq, Clone, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SanPlus {
    pub san: San,
    pub suffix: Option<Suffix>,
    pub en_passant: bool,
}

impl SanPlus {
    /// Parses a SAN and its suffixes, scanning from the right.
    ///
    /// # Errors
    ///
    /// Returns [`ParseSanError`] if `san` is not syntactically valid. The
    /// error carries the [`UnparsedReason`].
    pub fn from_ascii(san: &[u8]) -> Result<SanPlus, ParseSanError> {
        if san.len() > MAX_SAN_LEN {
            return Err(ParseSanError::new(UnparsedReason::TooLong));
        }

        let mut rest = san;
        let mut suffix = strip_suffix(&mut rest);

        let en_passant = rest.ends_with(b"e.p.");
        if en_passant {
            rest = &rest[..rest.len() - 4];
            if rest.last() == Some(&b' ') {
                rest = &rest[..rest.len() - 1];
            }
            if suffix.is_none() {
                suffix = strip_suffix(&mut rest);
            }
        }

        let san = San::decode(rest)?;

        if en_passant
            && !matches!(
                san,
                San::Normal {
                    role: Role::Pawn,
                    capture: true,
                    promotion: None,
                    ..
                }
            )
        {
            return Err(ParseSanError::new(UnparsedReason::InvalidEnPassant));
        }

        Ok(SanPlus {
            san,
            suffix,
            en_passant,
        })
    }

    /// All markers of the move as [`MoveFlags`].
    pub fn flags(&self) -> MoveFlags {
        let mut flags = MoveFlags::empty();
        match self.san {
            San::Normal { capture: true, .. } => flags |= MoveFlags::CAPTURE,
            San::Castle(CastlingSide::KingSide) => flags |= MoveFlags::CASTLE_KINGSIDE,
            San::Castle(CastlingSide::QueenSide) => flags |= MoveFlags::CASTLE_QUEENSIDE,
            San::Normal { .. } => (),
        }
        match self.suffix {
            Some(Suffix::Check) => flags |= MoveFlags::CHECK,
            Some(Suffix::Checkmate) => flags |= MoveFlags::CHECKMATE,
            None => (),
        }
        flags.set(MoveFlags::EN_PASSANT, self.en_passant);
        flags
    }
}

fn strip_suffix(rest: &mut &[u8]) -> Option<Suffix> {
    let suffix = rest
        .last()
        .and_then(|&ch| Suffix::from_char(char::from(ch)))?;
    *rest = &rest[..rest.len() - 1];
    Some(suffix)
}

impl FromStr for SanPlus {
    type Err = ParseSanError;

    fn from_str(san: &str) -> Result<SanPlus, ParseSanError> {
        SanPlus::from_ascii(san.as_bytes())
    }
}

impl fmt::Display for SanPlus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.san)?;
        if self.en_passant {
            f.write_str("e.p.")?;
        }
        if let Some(suffix) = self.suffix {
            write!(f, "{suffix}")?;
        }
        Ok(())
    }
}
