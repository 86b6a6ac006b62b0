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

use std::{borrow::Cow, fmt};

use crate::{
    diagnostic::{DiagnosticKind, Diagnostics, Position},
    lexer::{Spanned, Token},
};

/// The Seven Tag Roster, in export order.
pub const SEVEN_TAG_ROSTER: [&str; 7] = ["Event", "Site", "Date", "Round", "White", "Black", "Result"];

/// Decodes escaped quotes and backslashes of a raw tag value. Allocates
/// only when the value actually contains escape sequences.
///
/// > A quote inside a string is represented by the backslash immediately
/// > followed by a quote. A backslash inside a string is represented by
/// > two adjacent backslashes.
pub(crate) fn unescape(raw: &[u8]) -> Cow<'_, [u8]> {
    let mut head = 0;
    let mut decoded: Vec<u8> = Vec::new();
    let mut escapes = memchr::memchr_iter(b'\\', raw);
    while let Some(escape) = escapes.next() {
        if escape < head {
            continue;
        }
        if let Some(b'\\' | b'"') = raw.get(escape + 1) {
            decoded.extend_from_slice(&raw[head..escape]);
            head = escape + 1;
            if raw[escape + 1] == b'\\' {
                // The escaped backslash must not start another escape.
                decoded.push(b'\\');
                head += 1;
            }
        }
    }
    if head == 0 {
        Cow::Borrowed(raw)
    } else {
        decoded.extend_from_slice(&raw[head..]);
        Cow::Owned(decoded)
    }
}

/// Escapes quotes and backslashes for writing a tag value.
pub(crate) fn escape(value: &str) -> Cow<'_, str> {
    if !value.contains(['\\', '"']) {
        return Cow::Borrowed(value);
    }
    let mut escaped = String::with_capacity(value.len() + 2);
    for ch in value.chars() {
        if ch == '\\' || ch == '"' {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    Cow::Owned(escaped)
}

/// The tag pairs of a game, like `[White "Deep Blue"]`.
///
/// Keeps the order in which keys first appeared. Setting an existing key
/// replaces its value in place.
///
/// # Examples
///
/// ```
/// use pgn_tree::Tags;
///
/// let mut tags = Tags::new();
/// tags.insert("White", "Deep Blue");
/// tags.insert("Black", "Kasparov");
/// tags.insert("White", "Deeper Blue");
///
/// assert_eq!(tags.get("White"), Some("Deeper Blue"));
/// assert_eq!(tags.keys().collect::<Vec<_>>(), ["White", "Black"]);
/// ```
#[derive(Clone, Default, Eq, PartialEq, Hash)]
pub struct Tags {
    pairs: Vec<(String, String)>,
}

impl Tags {
    pub const fn new() -> Tags {
        Tags { pairs: Vec::new() }
    }

    /// Sets a tag, keeping the position of an earlier value with the same
    /// key. Returns the replaced value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let key = key.into();
        let value = value.into();
        match self.pairs.iter_mut().find(|(k, _)| *k == key) {
            Some((_, old)) => Some(std::mem::replace(old, value)),
            None => {
                self.pairs.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.pairs.iter().map(|(k, _)| k.as_str())
    }

    /// Iterates over `(key, value)` pairs in source order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl fmt::Debug for Tags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Tags {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Tags {
        let mut tags = Tags::new();
        for (k, v) in iter {
            tags.insert(k, v);
        }
        tags
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Tags {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

/// Builds [`Tags`] from the tag tokens at the start of a game.
///
/// Only complete `TagOpen TagKey TagValue TagClose` runs are recorded. The
/// lexer already reported whatever made a run incomplete.
#[derive(Debug, Default)]
pub(crate) struct TagParser {
    tags: Tags,
    key: Option<(String, Position)>,
    value: Option<String>,
}

impl TagParser {
    /// Feeds one token. Returns `false` if the token does not belong to
    /// the tag section.
    pub fn feed(&mut self, spanned: &Spanned, diagnostics: &mut Diagnostics) -> bool {
        match &spanned.token {
            Token::TagOpen => {
                self.key = None;
                self.value = None;
            }
            Token::TagKey(key) => self.key = Some((key.clone(), spanned.position)),
            Token::TagValue(value) => self.value = Some(value.clone()),
            Token::TagClose => {
                if let (Some((key, position)), Some(value)) = (self.key.take(), self.value.take()) {
                    if let Some(old) = self.tags.insert(key.as_str(), value) {
                        diagnostics.push(
                            DiagnosticKind::MalformedTag,
                            position,
                            format!("duplicate tag {key:?} replaces {old:?}"),
                        );
                    }
                }
            }
            _ => return false,
        }
        true
    }

    /// Finishes the tag section.
    pub fn finish(self, start: Position, diagnostics: &mut Diagnostics) -> Tags {
        if !self.tags.is_empty() && !self.tags.contains_key("Result") {
            diagnostics.push(
                DiagnosticKind::Other,
                start,
                "tag section has no Result tag",
            );
        }
        self.tags
    }
}
