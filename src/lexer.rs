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

//! Turns a byte stream into PGN tokens.
//!
//! The [`Lexer`] is pull based: every call to [`Lexer::next_token()`]
//! reads just enough of the source to produce one token. It never fails on
//! malformed input. Problems are recorded in the caller's [`Diagnostics`]
//! and the lexer resynchronizes at the next recognizable token.
//!
//! The lexer also decides where one game ends and the next begins, and
//! reports it as [`Token::GameBoundary`]:
//!
//! * Once movetext has started, a blank line or a `[` ends the game.
//! * After a result token, the game also ends at the next move number,
//!   move, `(` or `[`.
//!
//! Blank lines inside the tag section or between the tags and the
//! movetext never end a game.

use std::io::{self, Read};

use arrayvec::ArrayVec;

use crate::{
    buffer::Buffer,
    diagnostic::{DiagnosticKind, Diagnostics, Position},
    nag::Nag,
    outcome::Outcome,
    tag,
};

/// A lexical unit of PGN.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum Token {
    /// `[`
    TagOpen,
    /// The name of a tag pair.
    TagKey(String),
    /// The unescaped value of a tag pair.
    TagValue(String),
    /// `]`
    TagClose,
    /// `12.` or, with `black` set, `12...`.
    MoveNumber { number: u32, black: bool },
    /// Any other word in the movetext, like `Nf3` or `Zz9`.
    SanWord(String),
    /// `{ ... }`
    CommentBrace(String),
    /// `; ...`
    CommentLine(String),
    /// `(`
    VariationOpen,
    /// `)`
    VariationClose,
    /// `$7`, `!`, `??`, ...
    Nag(Nag),
    /// `1-0`, `0-1`, `1/2-1/2` or `*`.
    Result(Outcome),
    /// The previous game ended, the next token belongs to a new game.
    GameBoundary,
}

/// A [`Token`] and where it starts.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Spanned {
    pub token: Token,
    pub position: Position,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum State {
    Tags,
    Movetext,
    AfterResult,
}

/// How far ahead an unterminated comment looks for a tag line.
const TAG_LINE_LOOKAHEAD: usize = 1024;

/// Whether `data` starts with a line of the form `[Key "Value"]`.
fn is_tag_line(data: &[u8]) -> bool {
    let line = match memchr::memchr(b'\n', data) {
        Some(eol) => &data[..eol],
        None => data,
    };
    let Some(inner) = line
        .trim_ascii_end()
        .strip_prefix(b"[")
        .and_then(|line| line.strip_suffix(b"]"))
    else {
        return false;
    };
    let inner = inner.trim_ascii();
    let key_len = inner
        .iter()
        .position(|&ch| !(ch.is_ascii_alphanumeric() || ch == b'_'))
        .unwrap_or(inner.len());
    if !inner.first().is_some_and(u8::is_ascii_alphabetic) {
        return false;
    }
    let value = inner[key_len..].trim_ascii_start();
    value.len() >= 2 && value.starts_with(b"\"") && value.ends_with(b"\"")
}

fn is_delimiter(ch: u8) -> bool {
    matches!(
        ch,
        b' ' | b'\t'
            | b'\x1a'
            | b'\n'
            | b'\r'
            | b'{'
            | b'}'
            | b'('
            | b')'
            | b'['
            | b']'
            | b'!'
            | b'?'
            | b'$'
            | b';'
            | b'.'
            | b'"'
            | b'*'
    )
}

fn decode_utf8(
    bytes: Vec<u8>,
    what: &str,
    position: Position,
    diagnostics: &mut Diagnostics,
) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => {
            diagnostics.push(
                DiagnosticKind::Other,
                position,
                format!("invalid utf-8 in {what}"),
            );
            String::from_utf8_lossy(err.as_bytes()).into_owned()
        }
    }
}

/// Pull-based tokenizer over any [`Read`].
#[derive(Debug)]
pub struct Lexer<R> {
    buffer: Buffer<R>,
    position: Position,
    state: State,
    /// Line breaks seen since the last token.
    newlines: usize,
    started: bool,
    /// Tokens already lexed but not yet handed out, in reverse order.
    pending: ArrayVec<Spanned, 4>,
}

impl<R: Read> Lexer<R> {
    pub fn new(reader: R) -> Lexer<R> {
        Lexer {
            buffer: Buffer::new(reader),
            position: Position::START,
            state: State::Tags,
            newlines: 1,
            started: false,
            pending: ArrayVec::new(),
        }
    }

    /// The position of the next unread byte.
    ///
    /// This is a checkpoint: lexing can be paused here and resumed later
    /// with another call to [`Lexer::next_token()`].
    pub fn position(&self) -> Position {
        self.pending
            .last()
            .map_or(self.position, |spanned| spanned.position)
    }

    fn consume(&mut self, n: usize) {
        let data = self.buffer.data();
        let n = n.min(data.len());
        self.position.line += memchr::memchr_iter(b'\n', &data[..n]).count() as u64;
        self.position.offset += n as u64;
        self.buffer.consume(n);
    }

    fn bump(&mut self) {
        self.consume(1);
    }

    fn peek(&mut self) -> io::Result<Option<u8>> {
        self.buffer.peek()
    }

    fn skip_bom(&mut self) -> io::Result<()> {
        if self.buffer.ensure_bytes::<3>()?.starts_with(b"\xef\xbb\xbf") {
            self.buffer.consume(3);
            self.position.offset += 3;
        }
        Ok(())
    }

    fn skip_until_eol(&mut self) -> io::Result<()> {
        loop {
            let data = self.buffer.ensure_bytes::<1>()?;
            if data.is_empty() {
                return Ok(());
            }
            match memchr::memchr(b'\n', data) {
                Some(eol) => {
                    self.consume(eol);
                    return Ok(());
                }
                None => {
                    let len = data.len();
                    self.consume(len);
                }
            }
        }
    }

    /// Reads the next token. Returns `None` at the end of the source.
    ///
    /// # Errors
    ///
    /// Only I/O errors of the underlying reader.
    pub fn next_token(&mut self, diagnostics: &mut Diagnostics) -> io::Result<Option<Spanned>> {
        if let Some(spanned) = self.pending.pop() {
            return Ok(Some(spanned));
        }

        if !self.started {
            self.started = true;
            self.skip_bom()?;
        }

        loop {
            let Some(ch) = self.peek()? else {
                return Ok(None);
            };

            match ch {
                b'\n' => {
                    self.newlines += 1;
                    self.bump();
                    continue;
                }
                // \x1a is the DOS end of file marker.
                b' ' | b'\t' | b'\r' | b'\x0c' | b'\x0b' | b'\x1a' => {
                    self.bump();
                    continue;
                }
                b'%' if self.newlines > 0 => {
                    // Escape line.
                    self.skip_until_eol()?;
                    if self.newlines < 2 {
                        self.newlines = 0;
                    }
                    continue;
                }
                _ => (),
            }

            let position = self.position;

            if self.ends_game(ch) {
                log::trace!("game boundary at {position}");
                self.state = State::Tags;
                self.newlines = 0;
                return Ok(Some(Spanned {
                    token: Token::GameBoundary,
                    position,
                }));
            }
            self.newlines = 0;

            let token = match ch {
                b'[' => self.lex_tag(position, diagnostics)?,
                b'{' => self.lex_brace_comment(position, diagnostics)?,
                b';' => {
                    self.bump();
                    self.lex_line_comment(position, diagnostics)?
                }
                b'(' => {
                    self.bump();
                    Token::VariationOpen
                }
                b')' => {
                    self.bump();
                    Token::VariationClose
                }
                b'*' => {
                    self.bump();
                    Token::Result(Outcome::Unknown)
                }
                b'$' | b'!' | b'?' => match self.lex_nag(position, diagnostics)? {
                    Some(token) => token,
                    None => continue,
                },
                b'.' => {
                    self.bump();
                    continue;
                }
                b']' | b'}' | b'"' => {
                    self.bump();
                    diagnostics.push(
                        DiagnosticKind::Other,
                        position,
                        format!("stray {:?} in movetext", char::from(ch)),
                    );
                    continue;
                }
                _ => match self.lex_word(position, diagnostics)? {
                    Some(token) => token,
                    None => continue,
                },
            };

            self.state = match token {
                Token::Result(_) => State::AfterResult,
                Token::TagOpen
                | Token::TagKey(_)
                | Token::TagValue(_)
                | Token::TagClose
                | Token::CommentBrace(_)
                | Token::CommentLine(_)
                | Token::Nag(_) => self.state,
                _ => match self.state {
                    State::Tags => State::Movetext,
                    state => state,
                },
            };

            return Ok(Some(Spanned { token, position }));
        }
    }

    fn ends_game(&self, ch: u8) -> bool {
        match self.state {
            State::Tags => false,
            State::Movetext => self.newlines >= 2 || ch == b'[',
            State::AfterResult => {
                self.newlines >= 2 || matches!(ch, b'[' | b'(' | b'*') || !is_delimiter(ch)
            }
        }
    }

    fn skip_inline_space(&mut self) -> io::Result<()> {
        while let Some(b' ' | b'\t' | b'\r') = self.peek()? {
            self.bump();
        }
        Ok(())
    }

    /// Lexes `[Key "Value"]`. Returns the first token and queues the rest.
    fn lex_tag(&mut self, start: Position, diagnostics: &mut Diagnostics) -> io::Result<Token> {
        self.bump();
        let mut tokens: ArrayVec<Spanned, 4> = ArrayVec::new();
        tokens.push(Spanned {
            token: Token::TagOpen,
            position: start,
        });

        self.skip_inline_space()?;
        let key_position = self.position;
        let mut key = Vec::new();
        while let Some(ch) = self.peek()? {
            if ch.is_ascii_whitespace() || matches!(ch, b'"' | b'[' | b']') {
                break;
            }
            key.push(ch);
            self.bump();
        }
        if key.is_empty() {
            diagnostics.push(DiagnosticKind::MalformedTag, key_position, "missing tag name");
        } else {
            let key = decode_utf8(key, "tag name", key_position, diagnostics);
            tokens.push(Spanned {
                token: Token::TagKey(key),
                position: key_position,
            });
        }

        self.skip_inline_space()?;
        let value_position = self.position;
        let mut terminated = true;
        match self.peek()? {
            Some(b'"') => {
                self.bump();
                let mut raw = Vec::new();
                terminated = loop {
                    match self.peek()? {
                        None | Some(b'\n') => break false,
                        Some(b'"') => {
                            self.bump();
                            break true;
                        }
                        Some(b'\\') => {
                            raw.push(b'\\');
                            self.bump();
                            if let Some(ch) = self.peek()? {
                                if ch != b'\n' {
                                    raw.push(ch);
                                    self.bump();
                                }
                            }
                        }
                        Some(ch) => {
                            raw.push(ch);
                            self.bump();
                        }
                    }
                };
                if terminated {
                    let value = tag::unescape(&raw).into_owned();
                    let value = decode_utf8(value, "tag value", value_position, diagnostics);
                    tokens.push(Spanned {
                        token: Token::TagValue(value),
                        position: value_position,
                    });
                } else {
                    diagnostics.push(
                        DiagnosticKind::MalformedTag,
                        value_position,
                        "unterminated tag value",
                    );
                }
            }
            _ => {
                diagnostics.push(
                    DiagnosticKind::MalformedTag,
                    value_position,
                    "missing quoted tag value",
                );
            }
        }

        if terminated {
            self.skip_inline_space()?;
        }
        let close_position = self.position;
        if self.peek()? == Some(b']') {
            self.bump();
        } else {
            if terminated {
                diagnostics.push(DiagnosticKind::MalformedTag, close_position, "missing ]");
            }
            self.resync_tag()?;
        }
        tokens.push(Spanned {
            token: Token::TagClose,
            position: close_position,
        });

        let mut tokens = tokens.into_iter();
        let first = tokens.next().map_or(Token::TagOpen, |spanned| spanned.token);
        self.pending.extend(tokens.rev());
        Ok(first)
    }

    /// Skips to the next `]` (consumed) or line break (not consumed).
    fn resync_tag(&mut self) -> io::Result<()> {
        loop {
            let data = self.buffer.ensure_bytes::<1>()?;
            if data.is_empty() {
                return Ok(());
            }
            match memchr::memchr2(b']', b'\n', data) {
                Some(i) => {
                    let close = data[i] == b']';
                    self.consume(if close { i + 1 } else { i });
                    log::trace!("resynchronized malformed tag at {}", self.position);
                    return Ok(());
                }
                None => {
                    let len = data.len();
                    self.consume(len);
                }
            }
        }
    }

    fn lex_brace_comment(
        &mut self,
        start: Position,
        diagnostics: &mut Diagnostics,
    ) -> io::Result<Token> {
        self.bump();
        let mut text = Vec::new();
        let mut after_newline = false;
        let closed = loop {
            if after_newline
                && self.peek()? == Some(b'[')
                && is_tag_line(self.buffer.ensure_bytes::<TAG_LINE_LOOKAHEAD>()?)
            {
                // The next game started: the comment was never closed.
                break false;
            }
            after_newline = false;
            let data = self.buffer.ensure_bytes::<1>()?;
            if data.is_empty() {
                break false;
            }
            match memchr::memchr2(b'}', b'\n', data) {
                Some(i) if data[i] == b'}' => {
                    text.extend_from_slice(&data[..i]);
                    self.consume(i + 1);
                    break true;
                }
                Some(i) => {
                    text.extend_from_slice(&data[..=i]);
                    self.consume(i + 1);
                    after_newline = true;
                }
                None => {
                    text.extend_from_slice(data);
                    let len = data.len();
                    self.consume(len);
                }
            }
        };

        if closed {
            if text.first() == Some(&b' ') {
                text.remove(0);
            }
            if text.last() == Some(&b' ') {
                text.pop();
            }
        } else {
            diagnostics.push(
                DiagnosticKind::UnbalancedComment,
                start,
                "comment opened with { is never closed",
            );
            let trimmed = text.trim_ascii();
            text = trimmed.to_vec();
            // The trailing line break belongs to the whitespace before the
            // next token.
            self.newlines = usize::from(after_newline);
        }

        Ok(Token::CommentBrace(decode_utf8(
            text,
            "comment",
            start,
            diagnostics,
        )))
    }

    fn lex_line_comment(
        &mut self,
        start: Position,
        diagnostics: &mut Diagnostics,
    ) -> io::Result<Token> {
        let mut text = Vec::new();
        loop {
            let data = self.buffer.ensure_bytes::<1>()?;
            if data.is_empty() {
                break;
            }
            match memchr::memchr(b'\n', data) {
                Some(eol) => {
                    text.extend_from_slice(&data[..eol]);
                    self.consume(eol);
                    break;
                }
                None => {
                    text.extend_from_slice(data);
                    let len = data.len();
                    self.consume(len);
                }
            }
        }
        let text = decode_utf8(text, "comment", start, diagnostics);
        Ok(Token::CommentLine(text.trim().to_owned()))
    }

    fn lex_nag(
        &mut self,
        start: Position,
        diagnostics: &mut Diagnostics,
    ) -> io::Result<Option<Token>> {
        let mut raw: Vec<u8> = Vec::new();
        match self.peek()? {
            Some(b'$') => {
                raw.push(b'$');
                self.bump();
                while let Some(ch @ b'0'..=b'9') = self.peek()? {
                    raw.push(ch);
                    self.bump();
                }
            }
            _ => {
                while let Some(ch @ (b'!' | b'?')) = self.peek()? {
                    raw.push(ch);
                    self.bump();
                }
            }
        }

        match Nag::from_ascii(&raw) {
            Ok(nag) => Ok(Some(Token::Nag(nag))),
            Err(_) => {
                diagnostics.push(
                    DiagnosticKind::Other,
                    start,
                    format!("invalid annotation glyph {:?}", String::from_utf8_lossy(&raw)),
                );
                Ok(None)
            }
        }
    }

    /// Lexes a move number, result or SAN-like word.
    fn lex_word(
        &mut self,
        start: Position,
        diagnostics: &mut Diagnostics,
    ) -> io::Result<Option<Token>> {
        let mut word = Vec::new();
        while let Some(ch) = self.peek()? {
            if is_delimiter(ch) {
                break;
            }
            word.push(ch);
            self.bump();
        }

        if word.iter().all(u8::is_ascii_digit) {
            let mut dots = 0;
            while self.peek()? == Some(b'.') {
                dots += 1;
                self.bump();
            }
            return Ok(match btoi::btou::<u32>(&word) {
                Ok(number) => Some(Token::MoveNumber {
                    number,
                    black: dots >= 2,
                }),
                Err(_) => {
                    diagnostics.push(
                        DiagnosticKind::Other,
                        start,
                        format!("move number {} out of range", String::from_utf8_lossy(&word)),
                    );
                    None
                }
            });
        }

        if let Ok(outcome) = Outcome::from_ascii(&word) {
            return Ok(Some(Token::Result(outcome)));
        }

        self.absorb_en_passant(&mut word)?;

        Ok(Some(Token::SanWord(decode_utf8(
            word,
            "movetext",
            start,
            diagnostics,
        ))))
    }

    /// Appends an `e.p.` suffix written after the move, like `exd6e.p.` or
    /// `exd6 e.p.`, and a check suffix after it.
    fn absorb_en_passant(&mut self, word: &mut Vec<u8>) -> io::Result<()> {
        let data = self.buffer.ensure_bytes::<6>()?;
        let consumed = if word.ends_with(b"e") && data.starts_with(b".p.") {
            3
        } else if data.starts_with(b" e.p.") {
            5
        } else {
            return Ok(());
        };
        if data.get(consumed).is_some_and(|&ch| !is_delimiter(ch) && !matches!(ch, b'+' | b'#')) {
            return Ok(());
        }
        if consumed == 3 {
            word.extend_from_slice(b".p.");
        } else {
            word.extend_from_slice(b"e.p.");
        }
        if let Some(&suffix @ (b'+' | b'#')) = data.get(consumed) {
            word.push(suffix);
            self.consume(consumed + 1);
        } else {
            self.consume(consumed);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(pgn: &str) -> (Vec<Token>, Vec<DiagnosticKind>) {
        let mut lexer = Lexer::new(pgn.as_bytes());
        let mut diagnostics = Diagnostics::default();
        let mut tokens = Vec::new();
        while let Some(spanned) = lexer.next_token(&mut diagnostics).expect("in-memory read") {
            tokens.push(spanned.token);
        }
        (tokens, diagnostics.kinds())
    }

    fn san(s: &str) -> Token {
        Token::SanWord(s.to_owned())
    }

    #[test]
    fn test_tags_and_movetext() {
        let (tokens, diagnostics) = lex("[Event \"Te\\\"st\"]\n\n1. e4 1... e5 2.Nf3 1-0");
        assert_eq!(
            tokens,
            [
                Token::TagOpen,
                Token::TagKey("Event".into()),
                Token::TagValue("Te\"st".into()),
                Token::TagClose,
                Token::MoveNumber { number: 1, black: false },
                san("e4"),
                Token::MoveNumber { number: 1, black: true },
                san("e5"),
                Token::MoveNumber { number: 2, black: false },
                san("Nf3"),
                Token::Result(Outcome::WhiteWins),
            ]
        );
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_comments_nags_variations() {
        let (tokens, diagnostics) = lex("e4 { best by test } $1 (d4!? ; queen pawn\n) e5?? *");
        assert_eq!(
            tokens,
            [
                san("e4"),
                Token::CommentBrace("best by test".into()),
                Token::Nag(Nag::GOOD_MOVE),
                Token::VariationOpen,
                san("d4"),
                Token::Nag(Nag::SPECULATIVE_MOVE),
                Token::CommentLine("queen pawn".into()),
                Token::VariationClose,
                san("e5"),
                Token::Nag(Nag::BLUNDER),
                Token::Result(Outcome::Unknown),
            ]
        );
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_blank_line_ends_movetext_only() {
        let (tokens, _) = lex("[A \"1\"]\n\n[B \"2\"]\n\n1. e4\n\n1. d4");
        let boundaries = tokens
            .iter()
            .filter(|token| **token == Token::GameBoundary)
            .count();
        assert_eq!(boundaries, 1);
        assert_eq!(tokens.last(), Some(&san("d4")));
    }

    #[test]
    fn test_tag_after_result() {
        let (tokens, _) = lex("1. e4 0-1 [Event \"Next\"] 1. d4 1/2-1/2");
        assert_eq!(tokens[3], Token::GameBoundary);
        assert_eq!(tokens[4], Token::TagOpen);
        assert_eq!(tokens.last(), Some(&Token::Result(Outcome::Draw)));
    }

    #[test]
    fn test_comment_after_result_stays() {
        let (tokens, _) = lex("e4 1-0 {final}\n[Event \"Next\"]");
        assert_eq!(tokens[2], Token::CommentBrace("final".into()));
        assert_eq!(tokens[3], Token::GameBoundary);
    }

    #[test]
    fn test_move_after_result_starts_new_game() {
        let (tokens, _) = lex("1. e4 1-0 1. d4 *");
        assert_eq!(tokens[3], Token::GameBoundary);
        assert_eq!(tokens[4], Token::MoveNumber { number: 1, black: false });
    }

    #[test]
    fn test_unterminated_tag_value() {
        let (tokens, diagnostics) = lex("[Event \"oops\n[Site \"ok\"]\n");
        assert_eq!(
            tokens,
            [
                Token::TagOpen,
                Token::TagKey("Event".into()),
                Token::TagClose,
                Token::TagOpen,
                Token::TagKey("Site".into()),
                Token::TagValue("ok".into()),
                Token::TagClose,
            ]
        );
        assert_eq!(diagnostics, [DiagnosticKind::MalformedTag]);
    }

    #[test]
    fn test_missing_tag_parts() {
        let (tokens, diagnostics) = lex("[ \"v\"]\n[Key]\n[Key \"v\"\n");
        assert_eq!(tokens.len(), 10);
        assert_eq!(
            diagnostics,
            [
                DiagnosticKind::MalformedTag,
                DiagnosticKind::MalformedTag,
                DiagnosticKind::MalformedTag,
            ]
        );
    }

    #[test]
    fn test_unterminated_comment_stops_at_tags() {
        let (tokens, diagnostics) = lex("1. e4 { never closed\n1. e5\n[Event \"B\"]\n1. d4 *");
        assert_eq!(
            tokens[2],
            Token::CommentBrace("never closed\n1. e5".into())
        );
        assert_eq!(tokens[3], Token::GameBoundary);
        assert_eq!(tokens[4], Token::TagOpen);
        assert_eq!(diagnostics, [DiagnosticKind::UnbalancedComment]);
    }

    #[test]
    fn test_unterminated_comment_at_eof() {
        let (tokens, diagnostics) = lex("e4 {trailing");
        assert_eq!(tokens[1], Token::CommentBrace("trailing".into()));
        assert_eq!(diagnostics, [DiagnosticKind::UnbalancedComment]);
    }

    #[test]
    fn test_closed_comment_with_bracket_line() {
        let (tokens, diagnostics) = lex("1. e4 { multi\n[Note] line } e5 *");
        assert_eq!(
            tokens,
            [
                Token::MoveNumber { number: 1, black: false },
                san("e4"),
                Token::CommentBrace("multi\n[Note] line".into()),
                san("e5"),
                Token::Result(Outcome::Unknown),
            ]
        );
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_tag_line() {
        assert!(is_tag_line(b"[Event \"B\"]\n1. d4"));
        assert!(is_tag_line(b"[ Site  \"\" ]  \r\n"));
        assert!(is_tag_line(b"[Round \"1\"]"));
        assert!(!is_tag_line(b"[Note] line }"));
        assert!(!is_tag_line(b"[Event \"B\"] and more\n"));
        assert!(!is_tag_line(b"[1 \"B\"]\n"));
        assert!(!is_tag_line(b"[Event]\n"));
    }

    #[test]
    fn test_dos_end_of_file() {
        let (tokens, diagnostics) = lex("1. e4 1-0\n\x1a");
        assert_eq!(tokens.last(), Some(&Token::Result(Outcome::WhiteWins)));
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_en_passant_suffix() {
        let (tokens, _) = lex("exd6 e.p. exd3e.p.+ e4");
        assert_eq!(tokens, [san("exd6e.p."), san("exd3e.p.+"), san("e4")]);
    }

    #[test]
    fn test_escape_lines_and_bom() {
        let (tokens, _) = lex("\u{feff}% generated\n[A \"b\"]\n%skip me\n1. e4 *");
        assert_eq!(tokens[0], Token::TagOpen);
        assert_eq!(tokens.len(), 7);
    }

    #[test]
    fn test_stray_characters_and_bad_glyphs() {
        let (tokens, diagnostics) = lex("e4 } $ !!! $300 e5");
        assert_eq!(tokens, [san("e4"), san("e5")]);
        assert_eq!(diagnostics, [DiagnosticKind::Other; 4]);
    }

    #[test]
    fn test_positions() {
        let mut lexer = Lexer::new(&b"[A \"b\"]\n1. e4"[..]);
        let mut diagnostics = Diagnostics::default();
        let mut last = None;
        while let Some(spanned) = lexer.next_token(&mut diagnostics).unwrap() {
            last = Some(spanned);
        }
        assert_eq!(
            last,
            Some(Spanned {
                token: san("e4"),
                position: Position { offset: 11, line: 2 },
            })
        );
        assert_eq!(lexer.position(), Position { offset: 13, line: 2 });
    }
}
