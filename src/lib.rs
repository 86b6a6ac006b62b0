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

//! A resilient, streaming parser for Portable Game Notation.
//!
//! Reads any number of games from a [`Read`](std::io::Read) and turns each
//! one into a [`Game`]: tag pairs, a tree of moves with nested variations,
//! comments and annotation glyphs, and the result. Moves are decoded from
//! Standard Algebraic Notation without a board, so no legality checks
//! happen.
//!
//! Real world PGN is often broken. Nothing malformed stops the parser:
//! problems become [`Diagnostic`]s attached to the game they were found in,
//! and parsing resumes with the next token.
//!
//! # Examples
//!
//! Parse a game:
//!
//! ```
//! use pgn_tree::{parse_str, DiagnosticKind, Outcome};
//!
//! let games = parse_str("[Event \"Casual\"]\n\n1. e4 (1. d4 d5) e5 Zz9 *")?;
//! let game = &games[0];
//!
//! assert_eq!(game.tag("Event"), Some("Casual"));
//! assert_eq!(game.outcome(), Outcome::Unknown);
//!
//! let mainline: Vec<&str> = game.mainline_moves().map(|m| m.raw()).collect();
//! assert_eq!(mainline, ["e4", "e5", "Zz9"]);
//!
//! let e4 = &game.mainline().plies()[0];
//! assert_eq!(e4.variations()[0].moves().count(), 2);
//!
//! assert_eq!(game.diagnostics().len(), 2);
//! assert_eq!(game.diagnostics()[0].kind, DiagnosticKind::UnparsableMove);
//! # Ok::<_, pgn_tree::Error>(())
//! ```
//!
//! Stream games from a file without reading it all at once:
//!
//! ```no_run
//! use std::{fs::File, io};
//!
//! use pgn_tree::GameStream;
//!
//! let file = File::open("lichess_db.pgn")?;
//! for game in GameStream::open(io::BufReader::new(file)) {
//!     let game = game?;
//!     println!("{} moves", game.mainline_moves().len());
//! }
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```
//!
//! # Feature flags
//!
//! * `serde`: Implements [`serde::Serialize`](https://docs.rs/serde/1/serde/trait.Serialize.html)
//!   for the data model, from [`Game`] down to [`Square`].

#![doc(html_root_url = "https://docs.rs/pgn-tree/0.1.0")]
#![forbid(unsafe_code)]
#![warn(missing_debug_implementations)]
#![cfg_attr(docs_rs, feature(doc_auto_cfg))]

mod buffer;
mod comment;
mod config;
mod diagnostic;
mod errors;
mod game;
mod m;
mod movetext;
mod nag;
mod outcome;
mod role;
mod square;
mod stream;
mod tag;
mod tree;

pub mod lexer;
pub mod san;
pub mod writer;

pub use comment::{Comment, CommentKind};
pub use config::Config;
pub use diagnostic::{Diagnostic, DiagnosticKind, Diagnostics, Position};
pub use errors::Error;
pub use game::Game;
pub use m::{Move, MoveKind};
pub use nag::{InvalidNag, Nag};
pub use outcome::{Outcome, ParseOutcomeError};
pub use role::{CastlingSide, Role};
pub use square::{File, ParseSquareError, Rank, Square};
pub use stream::{parse_all, parse_str, GameStream};
pub use tag::{Tags, SEVEN_TAG_ROSTER};
pub use tree::{Annotations, Ply, VariationNode, Visit, Walk};
