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

use std::{
    io::{self, Read},
    iter::FusedIterator,
};

use crate::{
    diagnostic::{Diagnostics, Position},
    errors::Error,
    game::Game,
    lexer::{Lexer, Token},
    movetext::MovetextParser,
    tag::TagParser,
    Config,
};

/// Lazily reads games from a source, one per call to
/// [`next()`](Iterator::next).
///
/// Malformed games are still returned, with [`Game::diagnostics()`]
/// explaining what was wrong. Only I/O errors and exceeded limits of the
/// [`Config`] are returned as `Err`. After an error the stream yields
/// `None`.
///
/// # Examples
///
/// ```
/// use pgn_tree::GameStream;
///
/// let pgn = b"[Event \"A\"]\n[Result \"*\"]\n\n1. e4 *\n\n[Event \"B\"]\n[Result \"*\"]\n\n1. d4 *\n";
///
/// let events = GameStream::open(&pgn[..])
///     .map(|game| game.map(|game| game.tag("Event").map(str::to_owned)))
///     .collect::<Result<Vec<_>, _>>()?;
///
/// assert_eq!(events, [Some("A".to_owned()), Some("B".to_owned())]);
/// # Ok::<_, pgn_tree::Error>(())
/// ```
#[derive(Debug)]
pub struct GameStream<R> {
    lexer: Lexer<R>,
    config: Config,
    diagnostics: Diagnostics,
    fused: bool,
}

impl<R: Read> GameStream<R> {
    pub fn open(source: R) -> GameStream<R> {
        GameStream::with_config(source, Config::default())
    }

    pub fn with_config(source: R, config: Config) -> GameStream<R> {
        GameStream {
            lexer: Lexer::new(source),
            config,
            diagnostics: Diagnostics::new(),
            fused: false,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The position in the source up to which games have been read.
    pub fn position(&self) -> Position {
        self.lexer.position()
    }

    fn read_game(&mut self) -> Result<Option<Game>, Error> {
        let mut tags = TagParser::default();
        let mut movetext = MovetextParser::new(self.config);
        let mut in_tags = true;
        let mut span: Option<(Position, Position)> = None;

        while let Some(spanned) = self.lexer.next_token(&mut self.diagnostics)? {
            if spanned.token == Token::GameBoundary {
                if span.is_some() {
                    break;
                }
                continue;
            }

            span.get_or_insert((spanned.position, spanned.position)).1 = spanned.position;

            if in_tags {
                if tags.feed(&spanned, &mut self.diagnostics) {
                    continue;
                }
                // Comments before the first move do not end the tag
                // section.
                in_tags = matches!(
                    spanned.token,
                    Token::CommentBrace(_) | Token::CommentLine(_) | Token::Nag(_)
                );
            }
            movetext.feed(spanned, &mut self.diagnostics)?;
        }

        let Some((start, end)) = span else {
            // Nothing but junk after the last game.
            for diagnostic in self.diagnostics.take() {
                log::debug!("dropped after the last game: {diagnostic}");
            }
            return Ok(None);
        };

        let tags = tags.finish(start, &mut self.diagnostics);
        let (mainline, outcome) = movetext.finish(&mut self.diagnostics);
        Ok(Some(Game::build(
            tags,
            mainline,
            outcome,
            &mut self.diagnostics,
            start,
            end,
        )))
    }
}

impl<R: Read> Iterator for GameStream<R> {
    type Item = Result<Game, Error>;

    fn next(&mut self) -> Option<Result<Game, Error>> {
        if self.fused {
            return None;
        }
        match self.read_game() {
            Ok(Some(game)) => Some(Ok(game)),
            Ok(None) => {
                self.fused = true;
                None
            }
            Err(err) => {
                log::warn!("aborting pgn stream: {err}");
                self.fused = true;
                Some(Err(err))
            }
        }
    }
}

impl<R: Read> FusedIterator for GameStream<R> {}

/// Reads all games of a source.
///
/// # Errors
///
/// See [`GameStream`]. Games before the error are discarded.
pub fn parse_all<R: Read>(source: R) -> Result<Vec<Game>, Error> {
    GameStream::open(source).collect()
}

/// Like [`parse_all()`], reading from a string.
pub fn parse_str(pgn: &str) -> Result<Vec<Game>, Error> {
    parse_all(io::Cursor::new(pgn))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DiagnosticKind;

    struct Failing<'a> {
        data: &'a [u8],
    }

    impl Read for Failing<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.data.is_empty() {
                return Err(io::Error::other("disk on fire"));
            }
            let n = self.data.read(buf)?;
            Ok(n)
        }
    }

    #[test]
    fn test_games_in_order() {
        let pgn = "1. e4 1-0\n\n1. d4 0-1\n\n\n1. c4 1/2-1/2\n\n";
        let games = parse_str(pgn).expect("in-memory read");
        let firsts: Vec<_> = games
            .iter()
            .map(|game| game.mainline_moves().next().map(|m| m.raw().to_owned()))
            .collect();
        assert_eq!(
            firsts,
            [Some("e4".to_owned()), Some("d4".to_owned()), Some("c4".to_owned())]
        );
    }

    #[test]
    fn test_diagnostics_stay_with_their_game() {
        let pgn = "[Event \"A\"]\n[Result \"*\"]\n\n1. e4 (1. d4 *\n\n[Event \"B\"]\n[Result \"*\"]\n\n1. d4 *";
        let games = parse_str(pgn).expect("in-memory read");
        assert_eq!(games.len(), 2);
        assert_eq!(
            games[0].diagnostics().iter().map(|d| d.kind).collect::<Vec<_>>(),
            [DiagnosticKind::UnbalancedVariation]
        );
        assert!(games[1].diagnostics().is_empty());
    }

    #[test]
    fn test_empty_and_escape_only() {
        assert!(parse_str("").expect("empty").is_empty());
        assert!(parse_str("\n\n% nothing here\n  \n").expect("blank").is_empty());
    }

    #[test]
    fn test_junk_after_last_game() {
        let games = parse_str("[Result \"1-0\"]\n\n1. e4 1-0\n\x1a").expect("in-memory read");
        assert_eq!(games.len(), 1);
        assert!(games[0].diagnostics().is_empty());

        let games = parse_str("1. e4 1-0\n\n}\n").expect("in-memory read");
        assert_eq!(games.len(), 1);
        assert!(games[0].diagnostics().is_empty());
    }

    #[test]
    fn test_io_error_fuses() {
        let mut stream = GameStream::open(Failing { data: b"1. e4 *\n\n1. d4" });
        assert!(matches!(stream.next(), Some(Ok(_))));
        assert!(matches!(stream.next(), Some(Err(Error::Io(_)))));
        assert!(stream.next().is_none());
    }

    #[test]
    fn test_position_checkpoint() {
        let mut stream = GameStream::open(&b"1. e4 *\n\n1. d4 *"[..]);
        assert_eq!(stream.position(), Position::START);
        assert!(stream.next().is_some());
        assert_eq!(stream.position(), Position { offset: 9, line: 3 });
        assert!(stream.next().is_some());
        assert!(stream.next().is_none());
    }
}
