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

//! The move tree of a game.
//!
//! A [`VariationNode`] is a line of play: a sequence of [`Ply`]s, where
//! every ply can carry alternative lines starting at that ply. The
//! mainline of a game is the root node.

use std::fmt;

use crate::{comment::Comment, m::Move, nag::Nag};

/// Comments and annotation glyphs attached to one place in the movetext.
#[derive(Clone, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Annotations {
    comments: Vec<Comment>,
    nags: Vec<Nag>,
}

impl Annotations {
    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    pub fn nags(&self) -> &[Nag] {
        &self.nags
    }

    pub fn is_empty(&self) -> bool {
        self.comments.is_empty() && self.nags.is_empty()
    }

    pub(crate) fn push_comment(&mut self, comment: Comment) {
        self.comments.push(comment);
    }

    pub(crate) fn push_nag(&mut self, nag: Nag) {
        self.nags.push(nag);
    }

    pub(crate) fn append(&mut self, other: Annotations) {
        self.comments.extend(other.comments);
        self.nags.extend(other.nags);
    }
}

impl fmt::Debug for Annotations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(&self.nags)
            .entries(&self.comments)
            .finish()
    }
}

/// A move and the variations that replace it.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Ply {
    pub(crate) mv: Move,
    pub(crate) variations: Vec<VariationNode>,
}

impl Ply {
    pub fn new(mv: Move) -> Ply {
        Ply {
            mv,
            variations: Vec::new(),
        }
    }

    pub fn mv(&self) -> &Move {
        &self.mv
    }

    /// Alternatives to this move, in source order.
    pub fn variations(&self) -> &[VariationNode] {
        &self.variations
    }
}

/// A line of play.
///
/// Plies are counted from the start of the game: `0` is the first white
/// move, `1` the first black move, and so on.
#[derive(Clone, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct VariationNode {
    pub(crate) leading: Annotations,
    pub(crate) start_ply: u32,
    pub(crate) plies: Vec<Ply>,
}

impl VariationNode {
    pub fn new(start_ply: u32) -> VariationNode {
        VariationNode {
            leading: Annotations::default(),
            start_ply,
            plies: Vec::new(),
        }
    }

    /// Comments and glyphs before the first move of the line.
    pub fn leading(&self) -> &Annotations {
        &self.leading
    }

    /// The ply of the first move.
    pub fn start_ply(&self) -> u32 {
        self.start_ply
    }

    pub fn plies(&self) -> &[Ply] {
        &self.plies
    }

    pub fn moves(&self) -> impl DoubleEndedIterator<Item = &Move> + ExactSizeIterator {
        self.plies.iter().map(Ply::mv)
    }

    pub fn len(&self) -> usize {
        self.plies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plies.is_empty()
    }

    /// Visits every move of this line and all nested variations, depth
    /// first, in the order they appear in PGN text.
    pub fn walk(&self) -> Walk<'_> {
        Walk {
            stack: vec![(self, 0, 0)],
        }
    }
}

impl fmt::Debug for VariationNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VariationNode")
            .field("start_ply", &self.start_ply)
            .field("leading", &self.leading)
            .field("plies", &self.plies)
            .finish()
    }
}

/// A move reached by [`VariationNode::walk()`].
#[derive(Copy, Clone, Debug)]
pub struct Visit<'a> {
    pub mv: &'a Move,
    /// `0` for the line that was walked, `1` for its variations, ...
    pub depth: usize,
    pub ply: u32,
}

/// Depth-first iterator over a move tree. See [`VariationNode::walk()`].
#[derive(Debug, Clone)]
pub struct Walk<'a> {
    stack: Vec<(&'a VariationNode, usize, usize)>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = Visit<'a>;

    fn next(&mut self) -> Option<Visit<'a>> {
        loop {
            let (node, index, depth) = self.stack.last_mut()?;
            let (node, depth) = (*node, *depth);
            let Some(ply) = node.plies.get(*index) else {
                self.stack.pop();
                continue;
            };
            let visit = Visit {
                mv: &ply.mv,
                depth,
                ply: node.start_ply.saturating_add(*index as u32),
            };
            *index += 1;
            self.stack
                .extend(ply.variations.iter().rev().map(|v| (v, 0, depth + 1)));
            return Some(visit);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(start_ply: u32, moves: &[&str]) -> VariationNode {
        let mut node = VariationNode::new(start_ply);
        node.plies
            .extend(moves.iter().map(|raw| Ply::new(Move::from_raw(*raw))));
        node
    }

    #[test]
    fn test_walk_order() {
        // 1. e4 (1. d4 d5 (1... Nf6)) (1. c4) e5
        let mut d4 = line(0, &["d4", "d5"]);
        d4.plies[1].variations.push(line(1, &["Nf6"]));
        let mut mainline = line(0, &["e4", "e5"]);
        mainline.plies[0].variations.push(d4);
        mainline.plies[0].variations.push(line(0, &["c4"]));

        let visited: Vec<_> = mainline
            .walk()
            .map(|visit| (visit.mv.raw(), visit.depth, visit.ply))
            .collect();
        assert_eq!(
            visited,
            [
                ("e4", 0, 0),
                ("d4", 1, 0),
                ("d5", 1, 1),
                ("Nf6", 2, 1),
                ("c4", 1, 0),
                ("e5", 0, 1),
            ]
        );
    }

    #[test]
    fn test_empty_walk() {
        assert_eq!(VariationNode::new(7).walk().count(), 0);
    }
}
