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

/// A numeric annotation glyph like `?`, `!!` or `$42`.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Nag(pub u8);

impl Nag {
    /// Tries to parse a NAG from ASCII.
    ///
    /// # Examples
    ///
    /// ```
    /// use pgn_tree::Nag;
    ///
    /// assert_eq!(Nag::from_ascii(b"??"), Ok(Nag(4)));
    /// assert_eq!(Nag::from_ascii(b"$24"), Ok(Nag(24)));
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an [`InvalidNag`] error if the input is neither a known glyph
    /// (`?!`, `!`, ...) nor a valid numeric annotation (`$0`, ..., `$255`).
    pub fn from_ascii(s: &[u8]) -> Result<Nag, InvalidNag> {
        if let Some(&(_, nag)) = GLYPHS.iter().find(|(glyph, _)| glyph.as_bytes() == s) {
            return Ok(nag);
        }
        match s {
            [b'$', digits @ ..] if !digits.is_empty() => {
                btoi::btou(digits).ok().map(Nag).ok_or(InvalidNag)
            }
            _ => Err(InvalidNag),
        }
    }

    /// The suffix glyph of one of the six traditional move assessments.
    ///
    /// # Examples
    ///
    /// ```
    /// use pgn_tree::Nag;
    ///
    /// assert_eq!(Nag::DUBIOUS_MOVE.glyph(), Some("?!"));
    /// assert_eq!(Nag(14).glyph(), None);
    /// ```
    pub fn glyph(self) -> Option<&'static str> {
        GLYPHS
            .iter()
            .find(|&&(_, nag)| nag == self)
            .map(|&(glyph, _)| glyph)
    }

    /// A good move (`!`).
    pub const GOOD_MOVE: Nag = Nag(1);

    /// A mistake (`?`).
    pub const MISTAKE: Nag = Nag(2);

    /// A brilliant move (`!!`).
    pub const BRILLIANT_MOVE: Nag = Nag(3);

    /// A blunder (`??`).
    pub const BLUNDER: Nag = Nag(4);

    /// A speculative move (`!?`).
    pub const SPECULATIVE_MOVE: Nag = Nag(5);

    /// A dubious move (`?!`).
    pub const DUBIOUS_MOVE: Nag = Nag(6);
}

const GLYPHS: [(&str, Nag); 6] = [
    ("!", Nag::GOOD_MOVE),
    ("?", Nag::MISTAKE),
    ("!!", Nag::BRILLIANT_MOVE),
    ("??", Nag::BLUNDER),
    ("!?", Nag::SPECULATIVE_MOVE),
    ("?!", Nag::DUBIOUS_MOVE),
];

/// Writes `$n`. The alternate form (`{:#}`) prefers the suffix glyph.
impl fmt::Display for Nag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.glyph() {
            Some(glyph) if f.alternate() => f.write_str(glyph),
            _ => write!(f, "${}", self.0),
        }
    }
}

impl From<u8> for Nag {
    fn from(nag: u8) -> Nag {
        Nag(nag)
    }
}

impl From<Nag> for u8 {
    fn from(Nag(nag): Nag) -> u8 {
        nag
    }
}

impl FromStr for Nag {
    type Err = InvalidNag;

    fn from_str(s: &str) -> Result<Nag, InvalidNag> {
        Nag::from_ascii(s.as_bytes())
    }
}

/// Error when parsing an invalid NAG.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct InvalidNag;

impl fmt::Display for InvalidNag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid nag")
    }
}

impl Error for InvalidNag {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nag() {
        assert_eq!(Nag::from_ascii(b"$1"), Ok(Nag(1)));
        assert_eq!(Nag::from_ascii(b"$12"), Ok(Nag(12)));
        assert_eq!(Nag::from_ascii(b"$123"), Ok(Nag(123)));
        assert_eq!(Nag::from_ascii(b"$1234"), Err(InvalidNag));
        assert_eq!(Nag::from_ascii(b"$256"), Err(InvalidNag));
        assert_eq!(Nag::from_ascii(b"$"), Err(InvalidNag));
        assert_eq!(Nag::from_ascii(b"!!!"), Err(InvalidNag));
    }

    #[test]
    fn test_glyphs() {
        assert_eq!("!?".parse(), Ok(Nag::SPECULATIVE_MOVE));
        assert_eq!("?!".parse(), Ok(Nag::DUBIOUS_MOVE));
        assert_eq!(Nag::BLUNDER.to_string(), "$4");
        assert_eq!(format!("{:#}", Nag::BLUNDER), "??");
        assert_eq!(format!("{:#}", Nag(7)), "$7");
    }

    #[test]
    fn test_glyph_table_is_consistent() {
        for n in 0..=u8::MAX {
            let nag = Nag(n);
            if let Some(glyph) = nag.glyph() {
                assert_eq!(glyph.parse(), Ok(nag));
            }
        }
        assert_eq!((1..=6).filter(|&n| Nag(n).glyph().is_some()).count(), 6);
    }
}
