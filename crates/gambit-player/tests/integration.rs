//! End-to-end tests for the move source chain and game session against a
//! scripted rules engine, temp-file opening books, and a loopback
//! tablebase stub.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread;

use gambit_player::{GameSession, MoveSourceChain, PlayerConfig, Provenance, TablebaseConfig};
use gambit_rules::{Color, MoveError, PieceKind, RulesEngine};

const ROOT_FEN: &str = "stub/root";

/// A scripted one-ply game: the root position has a fixed move list and
/// every move leads to a terminal, materially level position.
#[derive(Clone, Debug, PartialEq)]
struct StubPosition {
    fen: String,
    to_move: Color,
    legal: Vec<String>,
    white_pawns: u32,
    black_pawns: u32,
}

impl StubPosition {
    fn root(legal: &[&str]) -> Self {
        StubPosition {
            fen: ROOT_FEN.to_string(),
            to_move: Color::White,
            legal: legal.iter().map(|s| s.to_string()).collect(),
            white_pawns: 0,
            black_pawns: 0,
        }
    }
}

struct StubRules;

impl RulesEngine for StubRules {
    type Position = StubPosition;
    type Move = String;

    fn side_to_move(&self, position: &StubPosition) -> Color {
        position.to_move
    }

    fn is_game_over(&self, position: &StubPosition) -> bool {
        position.legal.is_empty()
    }

    fn is_checkmate(&self, _: &StubPosition) -> bool {
        false
    }

    fn legal_moves(&self, position: &StubPosition) -> Vec<String> {
        position.legal.clone()
    }

    fn apply(&self, position: &StubPosition, mv: &String) -> StubPosition {
        StubPosition {
            fen: format!("{}/{}", position.fen, mv),
            to_move: position.to_move.opposite(),
            legal: Vec::new(),
            white_pawns: position.white_pawns,
            black_pawns: position.black_pawns,
        }
    }

    fn piece_count(&self, position: &StubPosition, kind: PieceKind, color: Color) -> u32 {
        if kind != PieceKind::Pawn {
            return 0;
        }
        match color {
            Color::White => position.white_pawns,
            Color::Black => position.black_pawns,
        }
    }

    fn to_fen(&self, position: &StubPosition) -> String {
        position.fen.clone()
    }

    fn parse_move(&self, position: &StubPosition, uci: &str) -> Result<String, MoveError> {
        let well_formed = (4..=5).contains(&uci.len())
            && uci.chars().all(|c| c.is_ascii_alphanumeric());
        if !well_formed {
            return Err(MoveError::InvalidFormat(uci.to_string()));
        }
        if position.legal.iter().any(|legal| legal == uci) {
            Ok(uci.to_string())
        } else {
            Err(MoveError::Illegal(uci.to_string()))
        }
    }

    fn move_to_uci(&self, mv: &String) -> String {
        mv.clone()
    }
}

/// One-shot HTTP stub on a loopback port.
fn stub_server(status_line: &'static str, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    thread::spawn(move || {
        if let Ok((mut stream, _)) = listener.accept() {
            let mut buf = [0u8; 2048];
            let _ = stream.read(&mut buf);
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            let _ = stream.write_all(response.as_bytes());
        }
    });
    format!("http://{}", addr)
}

fn book_with(fen: &str, uci: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"{}": [{{"uci": "{}", "weight": 10}}]}}"#,
        fen, uci
    )
    .unwrap();
    file
}

fn empty_book() -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{{}}").unwrap();
    file
}

#[test]
fn tablebase_wins_over_books_and_search() {
    let endpoint = stub_server("200 OK", r#"{"bestmove": "c2c4"}"#);
    let book = book_with(ROOT_FEN, "d2d4");

    let config = PlayerConfig {
        tablebase: Some(TablebaseConfig {
            endpoint,
            timeout_ms: 2000,
        }),
        books: vec![book.path().to_path_buf()],
        ..PlayerConfig::default()
    };
    let chain = MoveSourceChain::from_config(&config).unwrap();

    let root = StubPosition::root(&["e2e4", "d2d4", "c2c4"]);
    let selected = chain.next_move(&StubRules, &root, Color::White).unwrap();

    assert_eq!(selected.provenance, Provenance::Tablebase);
    assert_eq!(selected.mv, "c2c4");
}

#[test]
fn server_error_falls_through_to_first_matching_book() {
    let endpoint = stub_server("500 Internal Server Error", "{}");
    let miss = empty_book();
    let hit = book_with(ROOT_FEN, "d2d4");

    let config = PlayerConfig {
        tablebase: Some(TablebaseConfig {
            endpoint,
            timeout_ms: 2000,
        }),
        books: vec![miss.path().to_path_buf(), hit.path().to_path_buf()],
        ..PlayerConfig::default()
    };
    let chain = MoveSourceChain::from_config(&config).unwrap();

    let root = StubPosition::root(&["e2e4", "d2d4"]);
    let selected = chain.next_move(&StubRules, &root, Color::White).unwrap();

    assert_eq!(selected.provenance, Provenance::Book(1));
    assert_eq!(selected.mv, "d2d4");
}

#[test]
fn earlier_book_shadows_later_book() {
    let first = book_with(ROOT_FEN, "e2e4");
    let second = book_with(ROOT_FEN, "d2d4");

    let config = PlayerConfig {
        books: vec![first.path().to_path_buf(), second.path().to_path_buf()],
        ..PlayerConfig::default()
    };
    let chain = MoveSourceChain::from_config(&config).unwrap();

    let root = StubPosition::root(&["e2e4", "d2d4"]);
    let selected = chain.next_move(&StubRules, &root, Color::White).unwrap();

    assert_eq!(selected.provenance, Provenance::Book(0));
    assert_eq!(selected.mv, "e2e4");
}

#[test]
fn illegal_tablebase_move_falls_through() {
    // The stub answers with a well-formed move that is not legal here.
    let endpoint = stub_server("200 OK", r#"{"bestmove": "h7h8q"}"#);
    let book = book_with(ROOT_FEN, "d2d4");

    let config = PlayerConfig {
        tablebase: Some(TablebaseConfig {
            endpoint,
            timeout_ms: 2000,
        }),
        books: vec![book.path().to_path_buf()],
        ..PlayerConfig::default()
    };
    let chain = MoveSourceChain::from_config(&config).unwrap();

    let root = StubPosition::root(&["e2e4", "d2d4"]);
    let selected = chain.next_move(&StubRules, &root, Color::White).unwrap();

    assert_eq!(selected.provenance, Provenance::Book(0));
}

#[test]
fn illegal_book_move_falls_through_to_search() {
    let book = book_with(ROOT_FEN, "h7h8q");

    let config = PlayerConfig {
        books: vec![book.path().to_path_buf()],
        ..PlayerConfig::default()
    };
    let chain = MoveSourceChain::from_config(&config).unwrap();

    let root = StubPosition::root(&["e2e4", "d2d4"]);
    let selected = chain.next_move(&StubRules, &root, Color::White).unwrap();

    assert_eq!(selected.provenance, Provenance::Search);
}

#[test]
fn search_is_the_terminal_fallback() {
    let chain = MoveSourceChain::new(5);

    // Every line leaves material level, so the first enumerated move wins.
    let root = StubPosition::root(&["g1f3", "e2e4", "d2d4"]);
    let selected = chain.next_move(&StubRules, &root, Color::White).unwrap();

    assert_eq!(selected.provenance, Provenance::Search);
    assert_eq!(selected.mv, "g1f3");
}

#[test]
fn session_plays_engine_turn_and_commits() {
    let chain = MoveSourceChain::new(3);
    let root = StubPosition::root(&["e2e4", "d2d4"]);
    let mut session = GameSession::new(StubRules, root, Color::White, chain);

    assert!(session.engine_to_move());
    let selected = session.play_engine_turn().unwrap();

    assert_eq!(selected.provenance, Provenance::Search);
    assert_eq!(session.side_to_move(), Color::Black);
    assert!(session.is_game_over());
}

#[test]
fn session_rejects_engine_turn_after_game_over() {
    let chain = MoveSourceChain::new(3);
    let mut session = GameSession::new(StubRules, StubPosition::root(&[]), Color::White, chain);

    assert!(session.play_engine_turn().is_err());
}

#[test]
fn malformed_human_move_leaves_position_untouched() {
    let chain = MoveSourceChain::new(3);
    let root = StubPosition::root(&["e2e4"]);
    let mut session = GameSession::new(StubRules, root.clone(), Color::Black, chain);

    let err = session.play_human_move("??").unwrap_err();
    assert!(matches!(err, MoveError::InvalidFormat(_)));
    assert_eq!(session.position(), &root);
}

#[test]
fn illegal_human_move_leaves_position_untouched() {
    let chain = MoveSourceChain::new(3);
    let root = StubPosition::root(&["e2e4"]);
    let mut session = GameSession::new(StubRules, root.clone(), Color::Black, chain);

    let err = session.play_human_move("a2a3").unwrap_err();
    assert!(matches!(err, MoveError::Illegal(_)));
    assert_eq!(session.position(), &root);
}

#[test]
fn legal_human_move_advances_the_game() {
    let chain = MoveSourceChain::new(3);
    let root = StubPosition::root(&["e2e4"]);
    let mut session = GameSession::new(StubRules, root, Color::Black, chain);

    assert_eq!(session.legal_moves(), vec!["e2e4".to_string()]);
    session.play_human_move("e2e4").unwrap();
    assert_eq!(session.side_to_move(), Color::Black);
    assert!(session.is_game_over());
}

#[test]
fn material_score_reads_the_current_position() {
    let chain = MoveSourceChain::new(3);
    let mut root = StubPosition::root(&["e2e4"]);
    root.white_pawns = 3;
    root.black_pawns = 1;
    let session = GameSession::new(StubRules, root, Color::White, chain);

    assert_eq!(session.material_score(), 2);
}
