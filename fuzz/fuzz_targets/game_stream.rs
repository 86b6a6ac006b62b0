#![no_main]

use std::io;

use libfuzzer_sys::fuzz_target;
use pgn_tree::{Config, GameStream};

fuzz_target!(|data: &[u8]| {
    let config = Config {
        max_depth: Some(32),
        max_plies: Some(4096),
    };

    let mut last_offset = 0;
    for game in GameStream::with_config(io::Cursor::new(data), config) {
        let Ok(game) = game else {
            break;
        };
        // Games come out in source order and never overlap.
        assert!(game.position().offset >= last_offset);
        last_offset = game.position().offset;
        assert_eq!(
            game.walk().filter(|visit| visit.depth == 0).count(),
            game.mainline_moves().len()
        );
    }
});
