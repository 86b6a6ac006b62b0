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

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use pgn_tree::{san::SanPlus, writer::Writer, GameStream, Move};

const GAME: &str = r#"[Event "Rated Blitz game"]
[Site "https://lichess.org/Wx2jKpLm"]
[White "alice"]
[Black "bob"]
[Result "0-1"]

1. e4 { [%clk 0:03:00] } 1... e5 { [%clk 0:03:00] } 2. Nf3 Nc6 3. Bc4 Bc5
4. c3 Nf6 5. d4 exd4 6. cxd4 Bb4+ 7. Bd2 Bxd2+ 8. Nbxd2 d5 (8... Nxe4 9. d5 $1)
9. exd5 Nxd5 10. Qb3 Nce7 11. O-O O-O 12. Rfe1 c6 13. Ne4 Nf5 14. Neg5 h6
15. Nxf7 Rxf7 16. Bxd5 cxd5 17. Qxd5 Qf6 18. Re8+ Rf8 19. Rxf8+ Kxf8 0-1

"#;

fn corpus(games: usize) -> String {
    GAME.repeat(games)
}

fn bench_stream(c: &mut Criterion) {
    let mut group = c.benchmark_group("stream");
    for games in [10, 1000] {
        let pgn = corpus(games);
        group.throughput(Throughput::Bytes(pgn.len() as u64));
        group.bench_function(format!("{games} games"), |b| {
            b.iter(|| {
                let mut plies = 0;
                for game in GameStream::open(black_box(pgn.as_bytes())) {
                    plies += game.expect("in-memory read").walk().count();
                }
                plies
            })
        });
    }
    group.finish();
}

fn bench_write(c: &mut Criterion) {
    let games = pgn_tree::parse_str(&corpus(100)).expect("in-memory read");
    c.bench_function("write 100 games", |b| {
        b.iter(|| {
            let mut writer = Writer::new(Vec::with_capacity(128 * 1024));
            for game in &games {
                writer.write_game(black_box(game)).expect("write to vec");
            }
            writer.into_inner()
        })
    });
}

fn bench_san(c: &mut Criterion) {
    let words: [&[u8]; 6] = [b"e4", b"Nbxd7+", b"exd8=Q#", b"O-O-O", b"R1a3", b"Zz9"];
    c.bench_function("san from ascii", |b| {
        b.iter(|| {
            words
                .iter()
                .filter(|word| SanPlus::from_ascii(black_box(word)).is_ok())
                .count()
        })
    });
    c.bench_function("move from raw", |b| {
        b.iter(|| Move::from_raw(black_box("Qh4xe1#")).flags())
    });
}

criterion_group!(benches, bench_stream, bench_write, bench_san);
criterion_main!(benches);
