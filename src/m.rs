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

use std::fmt;

use crate::{
    comment::Comment,
    nag::Nag,
    san::{MoveFlags, San, SanPlus, UnparsedReason},
    tree::Annotations,
    File, Rank, Role, Square,
};

/// What a movetext word decoded to.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum MoveKind {
    /// A structurally valid SAN.
    Parsed(SanPlus),
    /// A word that is not SAN. The raw text is kept in place.
    Unparsed(UnparsedReason),
}

/// A move of the movetext, with the comments and annotation glyphs
/// written after it.
///
/// # Examples
///
/// ```
/// use pgn_tree::{File, Move, Role, Square, san::MoveFlags};
///
/// let m = Move::from_raw("Nbxd7+");
/// assert_eq!(m.role(), Some(Role::Knight));
/// assert_eq!(m.from_file(), Some(File::B));
/// assert_eq!(m.to(), "d7".parse::<Square>().ok());
/// assert_eq!(m.flags(), MoveFlags::CAPTURE | MoveFlags::CHECK);
///
/// let garbage = Move::from_raw("Zz9");
/// assert!(garbage.is_unparsed());
/// assert_eq!(garbage.raw(), "Zz9");
/// ```
#[derive(Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Move {
    kind: MoveKind,
    raw: String,
    annotations: Annotations,
}

impl Move {
    /// Decodes a movetext word. Never fails: words that are not SAN become
    /// [`MoveKind::Unparsed`].
    pub fn from_raw(raw: impl Into<String>) -> Move {
        let raw = raw.into();
        let kind = match SanPlus::from_ascii(raw.as_bytes()) {
            Ok(san_plus) => MoveKind::Parsed(san_plus),
            Err(err) => MoveKind::Unparsed(err.reason()),
        };
        Move {
            kind,
            raw,
            annotations: Annotations::default(),
        }
    }

    pub fn kind(&self) -> &MoveKind {
        &self.kind
    }

    /// The decoded SAN, or `None` if the word is not SAN.
    pub fn san(&self) -> Option<&SanPlus> {
        match self.kind {
            MoveKind::Parsed(ref san_plus) => Some(san_plus),
            MoveKind::Unparsed(_) => None,
        }
    }

    pub fn unparsed_reason(&self) -> Option<UnparsedReason> {
        match self.kind {
            MoveKind::Parsed(_) => None,
            MoveKind::Unparsed(reason) => Some(reason),
        }
    }

    pub fn is_unparsed(&self) -> bool {
        matches!(self.kind, MoveKind::Unparsed(_))
    }

    /// The word exactly as it appeared in the source.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The moving piece. Castling moves the king.
    pub fn role(&self) -> Option<Role> {
        self.san().map(|san_plus| san_plus.san.role())
    }

    /// The file given to disambiguate the origin square, if any.
    pub fn from_file(&self) -> Option<File> {
        match self.san()?.san {
            San::Normal { file, .. } => file,
            San::Castle(_) => None,
        }
    }

    /// The rank given to disambiguate the origin square, if any.
    pub fn from_rank(&self) -> Option<Rank> {
        match self.san()?.san {
            San::Normal { rank, .. } => rank,
            San::Castle(_) => None,
        }
    }

    /// The destination square. `None` for castling and unparsed moves.
    pub fn to(&self) -> Option<Square> {
        self.san()?.san.to()
    }

    pub fn promotion(&self) -> Option<Role> {
        match self.san()?.san {
            San::Normal { promotion, .. } => promotion,
            San::Castle(_) => None,
        }
    }

    /// Capture, check and castling markers. Empty for unparsed moves.
    pub fn flags(&self) -> MoveFlags {
        self.san().map_or(MoveFlags::empty(), SanPlus::flags)
    }

    pub fn comments(&self) -> &[Comment] {
        self.annotations.comments()
    }

    pub fn nags(&self) -> &[Nag] {
        self.annotations.nags()
    }

    pub fn annotations(&self) -> &Annotations {
        &self.annotations
    }

    pub(crate) fn annotations_mut(&mut self) -> &mut Annotations {
        &mut self.annotations
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)?;
        if self.is_unparsed() {
            f.write_str("?!")?;
        }
        if !self.annotations.is_empty() {
            write!(f, " {:?}", self.annotations)?;
        }
        Ok(())
    }
}

/// Writes the canonical SAN, or the raw text of an unparsed move.
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            MoveKind::Parsed(ref san_plus) => write!(f, "{san_plus}"),
            MoveKind::Unparsed(_) => f.write_str(&self.raw),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{san::Suffix, CastlingSide};

    #[test]
    fn test_castles() {
        let m = Move::from_raw("0-0-0#");
        assert_eq!(m.role(), Some(Role::King));
        assert_eq!(m.to(), None);
        assert_eq!(
            m.flags(),
            MoveFlags::CASTLE_QUEENSIDE | MoveFlags::CHECKMATE
        );
        assert_eq!(m.san().map(|s| &s.san), Some(&San::Castle(CastlingSide::QueenSide)));
        assert_eq!(m.san().and_then(|s| s.suffix), Some(Suffix::Checkmate));
        assert_eq!(m.to_string(), "O-O-O#");
        assert_eq!(m.raw(), "0-0-0#");
    }

    #[test]
    fn test_promotion() {
        let m = Move::from_raw("bxa1=N");
        assert_eq!(m.role(), Some(Role::Pawn));
        assert_eq!(m.from_file(), Some(File::B));
        assert_eq!(m.from_rank(), None);
        assert_eq!(m.to(), Some(Square::from_coords(File::A, Rank::First)));
        assert_eq!(m.promotion(), Some(Role::Knight));
        assert_eq!(m.flags(), MoveFlags::CAPTURE);
    }

    #[test]
    fn test_unparsed() {
        let m = Move::from_raw("Zz9");
        assert_eq!(m.unparsed_reason(), Some(UnparsedReason::InvalidDestination));
        assert_eq!(m.role(), None);
        assert_eq!(m.flags(), MoveFlags::empty());
        assert_eq!(m.to_string(), "Zz9");
        assert_eq!(format!("{m:?}"), "Zz9?!");
    }
}
