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

//! Non-fatal problems found while parsing a game.

use std::fmt;

/// A location in the source: byte offset from the start of the stream and
/// 1-based line number.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Position {
    pub offset: u64,
    pub line: u64,
}

impl Position {
    pub const START: Position = Position { offset: 0, line: 1 };
}

impl Default for Position {
    fn default() -> Position {
        Position::START
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {} (byte {})", self.line, self.offset)
    }
}

/// Category of a [`Diagnostic`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum DiagnosticKind {
    /// A tag pair that is not of the form `[Key "Value"]`, or a duplicate
    /// key.
    MalformedTag,
    /// A movetext word that is not syntactically valid SAN.
    UnparsableMove,
    /// A `(` without `)`, a `)` without `(`, or a variation before the
    /// first move.
    UnbalancedVariation,
    /// A `{` comment without `}`.
    UnbalancedComment,
    /// The movetext did not end with `1-0`, `0-1`, `1/2-1/2` or `*`.
    MissingResult,
    /// Anything else: bad move numbers, stray characters, invalid glyphs,
    /// encoding noise, tag/result disagreements.
    Other,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match *self {
            DiagnosticKind::MalformedTag => "malformed tag",
            DiagnosticKind::UnparsableMove => "unparsable move",
            DiagnosticKind::UnbalancedVariation => "unbalanced variation",
            DiagnosticKind::UnbalancedComment => "unbalanced comment",
            DiagnosticKind::MissingResult => "missing result",
            DiagnosticKind::Other => "other",
        })
    }
}

/// A recoverable problem attached to the game it was found in.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub position: Position,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} at {}", self.kind, self.message, self.position)
    }
}

/// Collects the diagnostics of the game currently being parsed.
#[derive(Debug, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Diagnostics {
        Diagnostics::default()
    }

    pub fn push(&mut self, kind: DiagnosticKind, position: Position, message: impl Into<String>) {
        let diagnostic = Diagnostic {
            kind,
            position,
            message: message.into(),
        };
        log::debug!("{diagnostic}");
        self.entries.push(diagnostic);
    }

    /// Hands out everything collected so far and starts over.
    pub fn take(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.entries)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[cfg(test)]
    pub fn kinds(&self) -> Vec<DiagnosticKind> {
        self.entries.iter().map(|d| d.kind).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_resets() {
        let mut diagnostics = Diagnostics::default();
        diagnostics.push(DiagnosticKind::Other, Position::START, "first");
        diagnostics.push(DiagnosticKind::MissingResult, Position { offset: 7, line: 2 }, "second");

        let taken = diagnostics.take();
        assert_eq!(taken.len(), 2);
        assert_eq!(taken[1].to_string(), "missing result: second at line 2 (byte 7)");
        assert!(diagnostics.take().is_empty());
    }
}
