#![no_main]

use libfuzzer_sys::fuzz_target;
use pgn_tree::parse_str;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(games) = parse_str(text) else {
        return;
    };

    for game in games {
        // Only games that parsed cleanly are expected to survive a round
        // trip unchanged.
        if !game.diagnostics().is_empty() {
            continue;
        }
        let written = game.to_pgn_text();
        let reparsed = parse_str(&written).expect("in-memory read");
        assert_eq!(reparsed.len(), 1, "{written}");
        assert_eq!(reparsed[0].tags(), game.tags());
        assert_eq!(reparsed[0].mainline(), game.mainline());
        assert_eq!(reparsed[0].result_token(), game.result_token());
    }
});
