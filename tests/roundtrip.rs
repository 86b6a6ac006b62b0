use pgn_tree::{
    parse_str,
    san::{San, SanPlus, Suffix},
    CastlingSide, File, Game, Outcome, Rank, Role, Square,
};
use proptest::prelude::*;

#[derive(Debug, Clone)]
struct GenPly {
    san: String,
    nags: Vec<u8>,
    comment: Option<String>,
    variations: Vec<Vec<String>>,
}

#[derive(Debug, Clone)]
struct GenGame {
    tags: Vec<(String, String)>,
    plies: Vec<GenPly>,
    outcome: Outcome,
}

fn arb_role() -> impl Strategy<Value = Role> {
    prop_oneof![
        Just(Role::Pawn),
        Just(Role::Knight),
        Just(Role::Bishop),
        Just(Role::Rook),
        Just(Role::Queen),
        Just(Role::King),
    ]
}

fn arb_square() -> impl Strategy<Value = Square> {
    (0..8usize, 0..8usize).prop_map(|(file, rank)| Square::from_coords(File::ALL[file], Rank::ALL[rank]))
}

fn arb_san() -> impl Strategy<Value = San> {
    let normal = (
        arb_role(),
        prop::option::of(0..8usize),
        prop::option::of(0..8usize),
        any::<bool>(),
        arb_square(),
        prop::option::of(prop_oneof![
            Just(Role::Knight),
            Just(Role::Bishop),
            Just(Role::Rook),
            Just(Role::Queen),
        ]),
    )
        .prop_map(|(role, file, rank, capture, to, promotion)| San::Normal {
            role,
            file: file.map(|i| File::ALL[i]),
            rank: rank.map(|i| Rank::ALL[i]),
            capture,
            to,
            promotion: promotion.filter(|_| role == Role::Pawn && to.rank().is_backrank()),
        });
    prop_oneof![
        8 => normal,
        1 => Just(San::Castle(CastlingSide::KingSide)),
        1 => Just(San::Castle(CastlingSide::QueenSide)),
    ]
}

fn arb_san_plus() -> impl Strategy<Value = String> {
    (
        arb_san(),
        prop::option::of(prop_oneof![Just(Suffix::Check), Just(Suffix::Checkmate)]),
    )
        .prop_map(|(san, suffix)| {
            SanPlus {
                san,
                suffix,
                en_passant: false,
            }
            .to_string()
        })
}

fn arb_ply() -> impl Strategy<Value = GenPly> {
    (
        arb_san_plus(),
        prop::collection::vec(any::<u8>(), 0..3),
        prop::option::of("[a-zA-Z0-9 ,.!?-]{0,30}"),
        prop::collection::vec(prop::collection::vec(arb_san_plus(), 1..4), 0..2),
    )
        .prop_map(|(san, nags, comment, variations)| GenPly {
            san,
            nags,
            comment,
            variations,
        })
}

fn arb_game() -> impl Strategy<Value = GenGame> {
    (
        prop::collection::btree_map("[A-Z][A-Za-z0-9_]{0,8}", "[ -~]{0,20}", 0..6),
        prop::collection::vec(arb_ply(), 0..40),
        prop_oneof![
            Just(Outcome::WhiteWins),
            Just(Outcome::BlackWins),
            Just(Outcome::Draw),
            Just(Outcome::Unknown),
        ],
    )
        .prop_map(|(tags, plies, outcome)| GenGame {
            tags: tags
                .into_iter()
                .filter(|(key, _)| key != "Result")
                .chain([("Result".to_owned(), outcome.to_string())])
                .collect(),
            plies,
            outcome,
        })
}

fn number(ply: usize, force: bool) -> Option<String> {
    if ply % 2 == 0 {
        Some(format!("{}.", ply / 2 + 1))
    } else if force {
        Some(format!("{}...", ply / 2 + 1))
    } else {
        None
    }
}

/// Renders in a compact style unlike the one of the writer.
fn render(game: &GenGame) -> String {
    let mut text = String::new();
    for (key, value) in &game.tags {
        let value = value.replace('\\', "\\\\").replace('"', "\\\"");
        text.push_str(&format!("[{key} \"{value}\"]\n"));
    }
    text.push('\n');

    let mut force = true;
    for (ply, gen) in game.plies.iter().enumerate() {
        if let Some(number) = number(ply, force) {
            text.push_str(&number);
        }
        text.push_str(&gen.san);
        for nag in &gen.nags {
            text.push_str(&format!(" ${nag}"));
        }
        if let Some(comment) = &gen.comment {
            text.push_str(&format!(" {{{comment}}}"));
        }
        for variation in &gen.variations {
            text.push_str(" (");
            for (i, san) in variation.iter().enumerate() {
                if let Some(number) = number(ply + i, i == 0) {
                    text.push_str(&number);
                }
                text.push_str(san);
                text.push(' ');
            }
            text.push(')');
        }
        text.push(' ');
        force = gen.comment.is_some() || !gen.variations.is_empty();
    }
    text.push_str(game.outcome.as_str());
    text.push('\n');
    text
}

fn parse_one(pgn: &str) -> Game {
    let mut games = parse_str(pgn).expect("in-memory read");
    assert_eq!(games.len(), 1, "{pgn}");
    games.remove(0)
}

proptest! {
    #[test]
    fn san_decoding_is_total(bytes in prop::collection::vec(any::<u8>(), 0..24)) {
        let _ = SanPlus::from_ascii(&bytes);
    }

    #[test]
    fn decoded_san_is_written_canonically(word in "[a-hxKQRBNPO0=+#:. 1-8-]{1,12}") {
        if let Ok(san_plus) = SanPlus::from_ascii(word.as_bytes()) {
            prop_assert_eq!(SanPlus::from_ascii(san_plus.to_string().as_bytes()), Ok(san_plus));
        }
    }

    #[test]
    fn parsing_never_fails_on_garbage(text in "\\PC{0,300}") {
        prop_assert!(parse_str(&text).is_ok());
    }

    #[test]
    fn written_games_parse_back(gen in arb_game()) {
        let pgn = render(&gen);
        let game = parse_one(&pgn);

        prop_assert!(game.diagnostics().is_empty(), "{:#?}\n{}", game.diagnostics(), pgn);
        prop_assert_eq!(
            game.mainline_moves().map(|m| m.raw()).collect::<Vec<_>>(),
            gen.plies.iter().map(|ply| ply.san.as_str()).collect::<Vec<_>>()
        );
        prop_assert_eq!(game.result_token(), Some(gen.outcome));

        let written = game.to_pgn_text();
        let reparsed = parse_one(&written);

        prop_assert!(reparsed.diagnostics().is_empty(), "{:#?}\n{}", reparsed.diagnostics(), written);
        prop_assert_eq!(reparsed.tags(), game.tags());
        prop_assert_eq!(reparsed.mainline(), game.mainline());
        prop_assert_eq!(reparsed.result_token(), game.result_token());
    }
}
