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

//! Builds the move tree of one game from its movetext tokens.

use crate::{
    comment::Comment,
    diagnostic::{DiagnosticKind, Diagnostics, Position},
    errors::Error,
    lexer::{Spanned, Token},
    m::Move,
    outcome::Outcome,
    tree::{Annotations, Ply, VariationNode},
    Config,
};

/// A line under construction.
#[derive(Debug)]
struct Frame {
    node: VariationNode,
    /// The ply of the next move in this line.
    next_ply: u32,
    /// Opened before any move it could be an alternative to. Its contents
    /// are moved back into the parent when it closes.
    transparent: bool,
    opened_at: Position,
}

impl Frame {
    fn new(start_ply: u32, transparent: bool, opened_at: Position) -> Frame {
        Frame {
            node: VariationNode::new(start_ply),
            next_ply: start_ply,
            transparent,
            opened_at,
        }
    }

    fn annotations_mut(&mut self) -> &mut Annotations {
        match self.node.plies.last_mut() {
            Some(ply) => ply.mv.annotations_mut(),
            None => &mut self.node.leading,
        }
    }
}

#[derive(Debug)]
pub(crate) struct MovetextParser {
    config: Config,
    mainline: Frame,
    /// Open variations, innermost last.
    stack: Vec<Frame>,
    plies: usize,
    outcome: Option<Outcome>,
}

impl MovetextParser {
    pub fn new(config: Config) -> MovetextParser {
        MovetextParser {
            config,
            mainline: Frame::new(0, false, Position::START),
            stack: Vec::new(),
            plies: 0,
            outcome: None,
        }
    }

    fn top(&mut self) -> &mut Frame {
        self.stack.last_mut().unwrap_or(&mut self.mainline)
    }

    /// Feeds one token of the movetext.
    ///
    /// # Errors
    ///
    /// Fails only when a configured limit of `Config` is exceeded.
    pub fn feed(&mut self, spanned: Spanned, diagnostics: &mut Diagnostics) -> Result<(), Error> {
        let position = spanned.position;
        match spanned.token {
            Token::MoveNumber { number, black } => {
                self.move_number(number, black, position, diagnostics);
            }
            Token::SanWord(word) => self.push_move(word, position, diagnostics)?,
            Token::CommentBrace(text) => {
                self.top().annotations_mut().push_comment(Comment::brace(text));
            }
            Token::CommentLine(text) => {
                self.top().annotations_mut().push_comment(Comment::line(text));
            }
            Token::Nag(nag) => self.top().annotations_mut().push_nag(nag),
            Token::VariationOpen => self.open_variation(position, diagnostics)?,
            Token::VariationClose => {
                if self.stack.is_empty() {
                    diagnostics.push(
                        DiagnosticKind::UnbalancedVariation,
                        position,
                        "unmatched ) ignored",
                    );
                } else {
                    self.close_variation();
                }
            }
            Token::Result(outcome) => {
                self.close_all(diagnostics);
                self.outcome = Some(outcome);
            }
            // The lexer ends the game before any tag.
            Token::TagOpen
            | Token::TagKey(_)
            | Token::TagValue(_)
            | Token::TagClose
            | Token::GameBoundary => (),
        }
        Ok(())
    }

    fn move_number(
        &mut self,
        number: u32,
        black: bool,
        position: Position,
        diagnostics: &mut Diagnostics,
    ) {
        let ply = number
            .saturating_sub(1)
            .saturating_mul(2)
            .saturating_add(u32::from(black));

        if self.stack.is_empty() && self.mainline.node.is_empty() {
            // The first number of the game decides where it starts.
            self.mainline.node.start_ply = ply;
            self.mainline.next_ply = ply;
            if number == 0 {
                diagnostics.push(DiagnosticKind::Other, position, "move number 0");
            }
            return;
        }

        let expected = self.top().next_ply;
        let fits = number != 0
            && if black {
                ply == expected
            } else {
                number == expected / 2 + 1
            };
        if !fits {
            diagnostics.push(
                DiagnosticKind::Other,
                position,
                format!(
                    "move number {}{} does not match expected {}{}",
                    number,
                    if black { "..." } else { "." },
                    expected / 2 + 1,
                    if expected % 2 == 1 { "..." } else { "." },
                ),
            );
        }
    }

    fn push_move(
        &mut self,
        word: String,
        position: Position,
        diagnostics: &mut Diagnostics,
    ) -> Result<(), Error> {
        if let Some(limit) = self.config.max_plies {
            if self.plies >= limit {
                return Err(Error::TooManyPlies { limit, position });
            }
        }
        self.plies += 1;

        let mv = Move::from_raw(word);
        if let Some(reason) = mv.unparsed_reason() {
            diagnostics.push(
                DiagnosticKind::UnparsableMove,
                position,
                format!("{:?} is not a move: {reason}", mv.raw()),
            );
        }

        let frame = self.top();
        frame.node.plies.push(Ply::new(mv));
        frame.next_ply = frame.next_ply.saturating_add(1);
        Ok(())
    }

    fn open_variation(
        &mut self,
        position: Position,
        diagnostics: &mut Diagnostics,
    ) -> Result<(), Error> {
        if let Some(limit) = self.config.max_depth {
            if self.stack.len() >= limit {
                return Err(Error::TooDeep { limit, position });
            }
        }

        let parent = self.top();
        let frame = if parent.node.is_empty() {
            let next_ply = parent.next_ply;
            diagnostics.push(
                DiagnosticKind::UnbalancedVariation,
                position,
                "variation before the first move",
            );
            Frame::new(next_ply, true, position)
        } else {
            // An alternative to the move just played.
            Frame::new(parent.next_ply.saturating_sub(1), false, position)
        };
        self.stack.push(frame);
        Ok(())
    }

    fn close_variation(&mut self) {
        let Some(frame) = self.stack.pop() else {
            return;
        };
        let parent = self.top();
        if !frame.transparent {
            if let Some(ply) = parent.node.plies.last_mut() {
                ply.variations.push(frame.node);
                return;
            }
        }
        parent.node.leading.append(frame.node.leading);
        parent.node.plies.extend(frame.node.plies);
        parent.next_ply = frame.next_ply;
    }

    fn close_all(&mut self, diagnostics: &mut Diagnostics) {
        while let Some(frame) = self.stack.last() {
            // A variation before the first move was reported when opened.
            if !frame.transparent {
                diagnostics.push(
                    DiagnosticKind::UnbalancedVariation,
                    frame.opened_at,
                    "variation is never closed",
                );
            }
            self.close_variation();
        }
    }

    /// Closes whatever is still open and returns the mainline and the
    /// result token, if any.
    pub fn finish(mut self, diagnostics: &mut Diagnostics) -> (VariationNode, Option<Outcome>) {
        self.close_all(diagnostics);
        (self.mainline.node, self.outcome)
    }
}
