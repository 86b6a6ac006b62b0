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
    cmp,
    io::{self, Read},
};

pub const CAPACITY: usize = 1 << 14;

/// Fixed-capacity refill buffer over a reader.
#[derive(Debug, Clone)]
pub(crate) struct Buffer<R> {
    buffer: Box<[u8]>,
    /// The start of the valid data.
    ///
    /// Never greater than `self.end`.
    start: usize,
    /// The end of the valid data + 1 (not a valid index).
    ///
    /// Never greater than [`CAPACITY`].
    end: usize,
    reader: R,
}

impl<R: Read> Buffer<R> {
    pub fn new(reader: R) -> Buffer<R> {
        Buffer {
            buffer: vec![0; CAPACITY].into_boxed_slice(),
            start: 0,
            end: 0,
            reader,
        }
    }

    /// Gets the valid data in the buffer.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.buffer[self.start..self.end]
    }

    /// Discards `n` many bytes at the front of [`Self::data`].
    #[inline]
    pub fn consume(&mut self, n: usize) {
        self.start = cmp::min(self.start + n, self.end);
    }

    /// Ensures that `N` bytes are in the buffer and returns the data.
    ///
    /// The only situation where the returned slice has fewer than `N`
    /// elements is if EOF was encountered.
    pub fn ensure_bytes<const N: usize>(&mut self) -> io::Result<&[u8]> {
        const {
            assert!(N <= CAPACITY);
        }

        if self.end + N > CAPACITY {
            self.backshift();
        }

        while self.end - self.start < N {
            let len = match self.reader.read(&mut self.buffer[self.end..]) {
                Ok(len) => len,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(err),
            };

            // EOF
            if len == 0 {
                break;
            }

            self.end += len;
        }

        Ok(self.data())
    }

    /// Gets the first byte, reading more if the buffer is empty.
    #[inline]
    pub fn peek(&mut self) -> io::Result<Option<u8>> {
        Ok(self.ensure_bytes::<1>()?.first().copied())
    }

    /// Moves [`Self::data`] to the beginning.
    fn backshift(&mut self) {
        self.buffer.copy_within(self.start..self.end, 0);
        self.end -= self.start;
        self.start = 0;
    }
}
