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

use crate::{
    diagnostic::{Diagnostic, DiagnosticKind, Diagnostics, Position},
    m::Move,
    outcome::Outcome,
    tag::Tags,
    tree::{Annotations, VariationNode, Walk},
    writer,
};

/// A parsed game: tag pairs, the move tree and the result, together with
/// everything that was wrong with its source.
///
/// # Examples
///
/// ```
/// use pgn_tree::{parse_all, Outcome};
///
/// let pgn = b"[White \"Morphy\"]\n[Result \"1-0\"]\n\n1. e4 e5 2. Nf3 d6 (2... Nc6) 1-0";
/// let games = parse_all(&pgn[..])?;
/// let game = &games[0];
///
/// assert_eq!(game.tag("White"), Some("Morphy"));
/// assert_eq!(game.outcome(), Outcome::WhiteWins);
/// assert_eq!(game.moves_text(), "1. e4 e5 2. Nf3 d6");
/// assert_eq!(game.walk().count(), 5);
/// assert!(game.diagnostics().is_empty());
/// # Ok::<_, pgn_tree::Error>(())
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Game {
    tags: Tags,
    mainline: VariationNode,
    outcome: Option<Outcome>,
    diagnostics: Vec<Diagnostic>,
    position: Position,
}

impl Game {
    /// Assembles a game from its parsed parts. Consumes the collected
    /// diagnostics.
    pub(crate) fn build(
        tags: Tags,
        mainline: VariationNode,
        outcome: Option<Outcome>,
        diagnostics: &mut Diagnostics,
        start: Position,
        end: Position,
    ) -> Game {
        match (outcome, tags.get("Result")) {
            (None, _) => {
                diagnostics.push(
                    DiagnosticKind::MissingResult,
                    end,
                    "movetext does not end with a result",
                );
            }
            (Some(outcome), Some(tag)) if tag != outcome.as_str() => {
                diagnostics.push(
                    DiagnosticKind::Other,
                    start,
                    format!("Result tag {tag:?} disagrees with result {outcome}"),
                );
            }
            _ => (),
        }

        let game = Game {
            tags,
            mainline,
            outcome,
            diagnostics: diagnostics.take(),
            position: start,
        };
        log::trace!(
            "game at {} with {} mainline moves and {} diagnostics",
            game.position,
            game.mainline.len(),
            game.diagnostics.len()
        );
        game
    }

    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key)
    }

    pub fn tags(&self) -> &Tags {
        &self.tags
    }

    pub fn mainline(&self) -> &VariationNode {
        &self.mainline
    }

    pub fn mainline_moves(&self) -> impl DoubleEndedIterator<Item = &Move> + ExactSizeIterator {
        self.mainline.moves()
    }

    /// Every move of the game, including all variations, depth first.
    pub fn walk(&self) -> Walk<'_> {
        self.mainline.walk()
    }

    /// The result of the game. [`Outcome::Unknown`] if the movetext did
    /// not end with a result token.
    pub fn outcome(&self) -> Outcome {
        self.outcome.unwrap_or(Outcome::Unknown)
    }

    /// The result token at the end of the movetext, if there was one.
    pub fn result_token(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Comments and glyphs before the first move.
    pub fn pregame(&self) -> &Annotations {
        self.mainline.leading()
    }

    /// Where the game starts in the source.
    pub fn position(&self) -> Position {
        self.position
    }

    /// The mainline as plain movetext, without comments, glyphs,
    /// variations or result.
    pub fn moves_text(&self) -> String {
        let mut text = String::new();
        let mut ply = self.mainline.start_ply();
        for (i, mv) in self.mainline.moves().enumerate() {
            if i > 0 {
                text.push(' ');
            }
            if ply % 2 == 0 {
                text.push_str(&format!("{}. ", ply / 2 + 1));
            } else if i == 0 {
                text.push_str(&format!("{}... ", ply / 2 + 1));
            }
            text.push_str(&mv.to_string());
            ply = ply.saturating_add(1);
        }
        text
    }

    /// Writes the game as PGN text with the default
    /// [`writer::Config`]. Parsing the text again gives an equivalent
    /// game.
    pub fn to_pgn_text(&self) -> String {
        writer::to_pgn_text(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{parse_all, Comment};

    fn parse_one(pgn: &str) -> Game {
        let mut games = parse_all(pgn.as_bytes()).expect("in-memory read");
        assert_eq!(games.len(), 1);
        games.remove(0)
    }

    fn kinds(game: &Game) -> Vec<DiagnosticKind> {
        game.diagnostics().iter().map(|d| d.kind).collect()
    }

    #[test]
    fn test_missing_result() {
        let game = parse_one("1. e4 e5");
        assert_eq!(game.outcome(), Outcome::Unknown);
        assert_eq!(game.result_token(), None);
        assert_eq!(kinds(&game), [DiagnosticKind::MissingResult]);

        let game = parse_one("1. e4 e5 *");
        assert_eq!(game.result_token(), Some(Outcome::Unknown));
        assert!(game.diagnostics().is_empty());
    }

    #[test]
    fn test_result_tag_mismatch() {
        let game = parse_one("[Result \"1-0\"]\n\n1. f3 e5 2. g4 Qh4# 0-1");
        assert_eq!(game.outcome(), Outcome::BlackWins);
        assert_eq!(kinds(&game), [DiagnosticKind::Other]);
    }

    #[test]
    fn test_moves_text() {
        let game = parse_one("{ Start } 12... Nf6 { x } 13. Qe2 $1 (13. Qd3) 13... O-O 1/2-1/2");
        assert_eq!(game.moves_text(), "12... Nf6 13. Qe2 O-O");
        assert_eq!(game.pregame().comments(), [Comment::brace("Start")]);
    }

    #[test]
    fn test_walk() {
        let game = parse_one("1. e4 (1. d4 d5) e5 *");
        let walked: Vec<_> = game
            .walk()
            .map(|visit| (visit.mv.raw(), visit.depth, visit.ply))
            .collect();
        assert_eq!(walked, [("e4", 0, 0), ("d4", 1, 0), ("d5", 1, 1), ("e5", 0, 1)]);
    }

    #[test]
    fn test_position() {
        let games = parse_all(&b"1. e4 *\n\n[Event \"B\"]\n1. d4 *"[..]).expect("in-memory read");
        assert_eq!(games[0].position(), Position::START);
        assert_eq!(games[1].position(), Position { offset: 9, line: 3 });
    }
}
