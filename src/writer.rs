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

//! Writes games back to PGN text.

use std::{
    io::{self, Write},
    slice,
};

use crate::{
    comment::{Comment, CommentKind},
    game::Game,
    outcome::Outcome,
    tag,
    tree::{Annotations, Ply, VariationNode},
};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Config {
    /// Movetext lines are broken before a word that would make them longer
    /// than this. `None` writes the movetext on a single line.
    ///
    /// Defaults to `Some(80)`.
    pub line_width: Option<usize>,
    /// Whether to include a space after a move number (`"1. e4"` if `true`, `"1.e4"` otherwise).
    ///
    /// Defaults to `true`.
    pub space_after_move_number: bool,
    /// Whether to include spaces inside variation parentheses (`"( 1. d4 )"` if `true`, `"(1. d4)"` otherwise).
    ///
    /// Defaults to `false`.
    pub space_around_variation: bool,
    /// Whether to include spaces inside comment braces (`"{ text }"` if `true`, `"{text}"` otherwise).
    ///
    /// Defaults to `true`. Comments only survive a round trip unchanged
    /// if this is enabled.
    pub space_around_comments: bool,
    /// Whether to write the NAGs `$1` to `$6` as suffix glyphs
    /// (`"e4!"` if `true`, `"e4 $1"` otherwise).
    ///
    /// Defaults to `false`.
    pub glyphs: bool,
}

impl Config {
    /// A space optimized [`Config`].
    pub const COMPACT: Config = Config {
        line_width: None,
        space_after_move_number: false,
        space_around_variation: false,
        space_around_comments: false,
        glyphs: true,
    };
}

impl Default for Config {
    fn default() -> Config {
        Config {
            line_width: Some(80),
            space_after_move_number: true,
            space_around_variation: false,
            space_around_comments: true,
            glyphs: false,
        }
    }
}

/// A line of the tree being written.
struct Cursor<'a> {
    plies: slice::Iter<'a, Ply>,
    ply: u32,
    /// Variations of the move just written.
    variations: slice::Iter<'a, VariationNode>,
    /// Whether the next black move needs its number repeated.
    need_number: bool,
}

impl<'a> Cursor<'a> {
    fn new(node: &'a VariationNode) -> Cursor<'a> {
        Cursor {
            plies: node.plies().iter(),
            ply: node.start_ply(),
            variations: Default::default(),
            need_number: true,
        }
    }
}

/// Writes [`Game`]s to any [`Write`].
///
/// # Examples
///
/// ```
/// use pgn_tree::{parse_all, writer::Writer};
///
/// let games = parse_all(&b"1. e4 e5 (1... c5) 2. Nf3 *\n\n1. d4 d5 1/2-1/2"[..])?;
///
/// let mut writer = Writer::new(Vec::new());
/// for game in &games {
///     writer.write_game(game)?;
/// }
///
/// assert_eq!(
///     String::from_utf8(writer.into_inner())?,
///     "1. e4 e5 (1... c5) 2. Nf3 *\n\n1. d4 d5 1/2-1/2\n",
/// );
/// # Ok::<_, Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct Writer<W> {
    pub writer: W,
    config: Config,
    games_written: usize,
    buffer: String,
    /// Length of the current movetext line.
    line_len: usize,
    /// The next word is attached without a space.
    glue: bool,
    /// A line comment was written, the next word starts a new line.
    newline: bool,
}

impl<W> Writer<W> {
    pub fn new(writer: W) -> Writer<W> {
        Writer::with_config(writer, Config::default())
    }

    pub fn with_config(writer: W, config: Config) -> Writer<W> {
        Writer {
            writer,
            config,
            games_written: 0,
            buffer: String::with_capacity(1024),
            line_len: 0,
            glue: false,
            newline: false,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Renders a game into the internal buffer, replacing its contents.
    fn render(&mut self, game: &Game) {
        self.buffer.clear();
        if self.games_written > 0 {
            self.buffer.push('\n');
        }

        for (key, value) in game.tags().iter() {
            self.buffer.push('[');
            self.buffer.push_str(key);
            self.buffer.push_str(" \"");
            self.buffer.push_str(&tag::escape(value));
            self.buffer.push_str("\"]\n");
        }
        if !game.tags().is_empty() {
            self.buffer.push('\n');
        }

        self.line_len = 0;
        self.glue = false;
        self.newline = false;
        self.movetext(game.mainline());
        self.word(game.result_token().unwrap_or(Outcome::Unknown).as_str());
        self.buffer.push('\n');
    }

    fn movetext(&mut self, mainline: &VariationNode) {
        self.annotations(mainline.leading(), false);
        let mut stack = vec![Cursor::new(mainline)];

        while let Some(cursor) = stack.last_mut() {
            if let Some(variation) = cursor.variations.next() {
                cursor.need_number = true;
                self.word("(");
                self.glue = !self.config.space_around_variation;
                self.annotations(variation.leading(), false);
                stack.push(Cursor::new(variation));
            } else if let Some(ply) = cursor.plies.next() {
                let number = cursor.ply / 2 + 1;
                if cursor.ply % 2 == 0 {
                    self.move_number(number, ".");
                } else if cursor.need_number {
                    self.move_number(number, "...");
                }
                self.word(&ply.mv().to_string());
                self.annotations(ply.mv().annotations(), true);

                cursor.ply = cursor.ply.saturating_add(1);
                cursor.need_number = !ply.mv().comments().is_empty();
                cursor.variations = ply.variations().iter();
            } else {
                stack.pop();
                if !stack.is_empty() {
                    self.glue = !self.config.space_around_variation;
                    self.word(")");
                }
            }
        }
    }

    fn move_number(&mut self, number: u32, dots: &str) {
        let mut digits = [0; 10];
        let mut pos = digits.len();
        let mut n = number;
        loop {
            pos -= 1;
            digits[pos] = b'0' + (n % 10) as u8;
            n /= 10;
            if n == 0 {
                break;
            }
        }
        let mut word = String::with_capacity(digits.len() - pos + dots.len());
        word.extend(digits[pos..].iter().copied().map(char::from));
        word.push_str(dots);
        self.word(&word);
        self.glue = !self.config.space_after_move_number;
    }

    fn annotations(&mut self, annotations: &Annotations, after_move: bool) {
        for (i, nag) in annotations.nags().iter().enumerate() {
            match nag.glyph().filter(|_| self.config.glyphs) {
                Some(glyph) => {
                    // Only the first glyph sticks to the move. Two glued
                    // glyphs would read back as one.
                    self.glue |= after_move && i == 0;
                    self.word(glyph);
                }
                None => self.word(&nag.to_string()),
            }
        }
        for comment in annotations.comments() {
            self.comment(comment);
        }
    }

    fn comment(&mut self, comment: &Comment) {
        match comment.kind {
            CommentKind::Brace => {
                let space = if self.config.space_around_comments { " " } else { "" };
                self.word(&format!("{{{space}{}{space}}}", comment.text));
            }
            CommentKind::Line => {
                self.word(&format!("; {}", comment.text));
                self.newline = true;
            }
        }
    }

    /// Appends a word of movetext, separated by a space or a line break.
    fn word(&mut self, word: &str) {
        if self.newline {
            self.buffer.push('\n');
            self.line_len = 0;
        } else if self.line_len > 0 && !self.glue {
            let width = self.line_len + 1 + word.len();
            if self.config.line_width.is_some_and(|max| width > max) {
                self.buffer.push('\n');
                self.line_len = 0;
            } else {
                self.buffer.push(' ');
                self.line_len += 1;
            }
        }
        self.newline = false;
        self.glue = false;

        self.buffer.push_str(word);
        self.line_len = match word.rfind('\n') {
            Some(eol) => word.len() - eol - 1,
            None => self.line_len + word.len(),
        };
    }
}

impl<W: Write> Writer<W> {
    /// Writes a game, preceded by an empty line if it is not the first.
    /// Returns the number of bytes written.
    ///
    /// # Errors
    ///
    /// The only errors are from [`W::write_all`](Write::write_all).
    pub fn write_game(&mut self, game: &Game) -> io::Result<usize> {
        self.render(game);
        self.writer.write_all(self.buffer.as_bytes())?;
        self.games_written += 1;
        Ok(self.buffer.len())
    }
}

/// Renders a single game with the default [`Config`].
pub(crate) fn to_pgn_text(game: &Game) -> String {
    let mut writer = Writer::new(io::sink());
    writer.render(game);
    writer.buffer
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_all;

    fn rewrite(pgn: &str, config: Config) -> String {
        let games = parse_all(pgn.as_bytes()).expect("in-memory read");
        let mut writer = Writer::with_config(Vec::new(), config);
        for game in &games {
            writer.write_game(game).expect("write to vec");
        }
        String::from_utf8(writer.into_inner()).expect("utf-8")
    }

    #[test]
    fn test_tags() {
        assert_eq!(
            rewrite("[Event \"Unit \\\"testing\\\" \\\\o/\"]\n[Result \"*\"]\n*", Config::default()),
            "[Event \"Unit \\\"testing\\\" \\\\o/\"]\n[Result \"*\"]\n\n*\n"
        );
    }

    #[test]
    fn test_annotations() {
        assert_eq!(
            rewrite(
                "{start} 1. e4 ! {good} e5 ; line\n 2. Nf3?? 0-1",
                Config::default()
            ),
            "{ start } 1. e4 $1 { good } 1... e5 ; line\n2. Nf3 $4 0-1\n"
        );
    }

    #[test]
    fn test_glyphs() {
        let config = Config {
            glyphs: true,
            ..Config::default()
        };
        assert_eq!(
            rewrite("1. e4 $1 $4 e5 $14 2. Nf3 ?! *", config),
            "1. e4! ?? e5 $14 2. Nf3?! *\n"
        );
        assert_eq!(
            rewrite("1. e4! ?? e5 $14 2. Nf3?! *", Config::default()),
            "1. e4 $1 $4 e5 $14 2. Nf3 $6 *\n"
        );
        assert_eq!(rewrite("{x} ! 1. e4 *", Config::COMPACT), "! {x} 1.e4 *\n");
    }

    #[test]
    fn test_variations() {
        let pgn = "1. e4 (1. d4 d5 (1... Nf6 2. c4)) (1. c4) 1... e5 2. Nf3 *";
        assert_eq!(
            rewrite(pgn, Config::default()),
            "1. e4 (1. d4 d5 (1... Nf6 2. c4)) (1. c4) 1... e5 2. Nf3 *\n"
        );
        assert_eq!(
            rewrite(
                pgn,
                Config {
                    space_around_variation: true,
                    ..Config::COMPACT
                }
            ),
            "1.e4 ( 1.d4 d5 ( 1...Nf6 2.c4 ) ) ( 1.c4 ) 1...e5 2.Nf3 *\n"
        );
    }

    #[test]
    fn test_unparsed_and_missing_result() {
        assert_eq!(
            rewrite("1. e4 Zz9 0-0-0", Config::default()),
            "1. e4 Zz9 2. O-O-O *\n"
        );
    }

    #[test]
    fn test_line_width() {
        let moves = "1. e4 e5 2. Nf3 Nc6 3. Bb5 a6 4. Ba4 Nf6 5. O-O Be7 *";
        let written = rewrite(
            moves,
            Config {
                line_width: Some(20),
                ..Config::default()
            },
        );
        assert_eq!(
            written,
            "1. e4 e5 2. Nf3 Nc6\n3. Bb5 a6 4. Ba4 Nf6\n5. O-O Be7 *\n"
        );
        assert!(written.lines().all(|line| line.len() <= 20));
    }
}
