use zugzwang_core::movegen::{can_reach, en_passant_target};
use zugzwang_core::{
    CastleSide, Color, PieceKind, PieceSnapshot, Position, PositionError, ReachMode,
    Snapshot, Square, SNAPSHOT_VERSION,
};

fn sq(rank: u8, file: u8) -> Square {
    Square::new(rank, file).expect("valid square")
}

fn piece(kind: PieceKind, rank: u8, file: u8) -> PieceSnapshot {
    PieceSnapshot {
        kind,
        square: Some(sq(rank, file)),
        moved: false,
        ep_active: false,
    }
}

fn captured(kind: PieceKind) -> PieceSnapshot {
    PieceSnapshot {
        kind,
        square: None,
        moved: true,
        ep_active: false,
    }
}

fn custom(turn: Color, white: Vec<PieceSnapshot>, black: Vec<PieceSnapshot>) -> Position {
    Position::from_snapshot(&Snapshot {
        version: SNAPSHOT_VERSION,
        turn,
        move_number: 1,
        white,
        black,
    })
    .expect("valid test snapshot")
}

fn play(position: &mut Position, from: (u8, u8), to: (u8, u8)) {
    let id = position
        .piece_at(sq(from.0, from.1))
        .expect("piece on from-square");
    position
        .make_move(id, sq(to.0, to.1), None)
        .expect("move applies");
}

#[test]
fn make_unmake_round_trip_restores_position() {
    let mut position = Position::standard();
    let before = position.snapshot();

    play(&mut position, (1, 4), (3, 4));
    assert_eq!(position.turn, Color::Black);
    assert_eq!(position.move_number, 2);
    assert_eq!(position.history.len(), 1);

    position.unmake_move().expect("history is non-empty");
    assert_eq!(position.snapshot(), before);
    assert_eq!(position.history.len(), 0);
    assert!(matches!(
        position.unmake_move(),
        Err(PositionError::EmptyHistory)
    ));
}

#[test]
fn wrong_turn_is_rejected_without_mutation() {
    let mut position = Position::standard();
    let before = position.snapshot();
    let black_pawn = position.piece_at(sq(6, 4)).expect("black e-pawn");
    assert_eq!(
        position.make_move(black_pawn, sq(4, 4), None),
        Err(PositionError::WrongTurn)
    );
    assert_eq!(position.snapshot(), before);
}

#[test]
fn double_step_opens_window_for_one_ply_only() {
    let mut position = Position::standard();
    play(&mut position, (1, 3), (3, 3)); // d2-d4
    play(&mut position, (6, 0), (5, 0)); // a7-a6
    play(&mut position, (3, 3), (4, 3)); // d4-d5
    assert_eq!(en_passant_target(&position, Color::White), None);

    play(&mut position, (6, 4), (4, 4)); // e7-e5, double step
    assert_eq!(en_passant_target(&position, Color::White), Some(sq(5, 4)));
    // The window never belongs to the pawn's own side.
    assert_eq!(en_passant_target(&position, Color::Black), None);

    let capturer = position.piece_at(sq(4, 3)).expect("white d5 pawn");
    assert!(can_reach(&position, capturer, sq(5, 4), ReachMode::Move));

    // Decline: after one further move pair the window is gone.
    play(&mut position, (1, 7), (2, 7)); // h2-h3
    play(&mut position, (5, 0), (4, 0)); // a6-a5
    assert_eq!(en_passant_target(&position, Color::White), None);
    assert!(!can_reach(&position, capturer, sq(5, 4), ReachMode::Move));
}

#[test]
fn en_passant_capture_removes_the_skipped_pawn() {
    let mut position = Position::standard();
    play(&mut position, (1, 3), (3, 3)); // d2-d4
    play(&mut position, (6, 0), (5, 0)); // a7-a6
    play(&mut position, (3, 3), (4, 3)); // d4-d5
    play(&mut position, (6, 4), (4, 4)); // e7-e5

    let victim = position.piece_at(sq(4, 4)).expect("black e5 pawn");
    play(&mut position, (4, 3), (5, 4)); // d5xe6 en passant

    assert_eq!(position.piece_at(sq(4, 4)), None, "victim square vacated");
    assert_eq!(position.piece_at(sq(4, 3)), None);
    let mover = position.piece_at(sq(5, 4)).expect("capturer on e6");
    assert_eq!(mover.owner, Color::White);
    assert_eq!(
        position.piece(victim).expect("victim slot remains").square,
        None
    );
    assert_eq!(position.en_passant_pawn(), None);

    // Undo restores the victim and the window.
    position.unmake_move().expect("history is non-empty");
    assert_eq!(position.piece_at(sq(4, 4)), Some(victim));
    assert!(position.piece(victim).expect("victim slot").ep_active);
    assert_eq!(en_passant_target(&position, Color::White), Some(sq(5, 4)));
}

#[test]
fn promotion_reuses_a_captured_slot() {
    let mut position = custom(
        Color::White,
        vec![
            piece(PieceKind::King, 0, 4),
            captured(PieceKind::Queen),
            piece(PieceKind::Pawn, 6, 0),
        ],
        vec![piece(PieceKind::King, 7, 4)],
    );
    let before = position.snapshot();
    assert_eq!(position.player(Color::White).count_of(PieceKind::Queen), 1);

    let pawn = position.piece_at(sq(6, 0)).expect("white a7 pawn");
    position
        .make_move(pawn, sq(7, 0), Some(PieceKind::Queen))
        .expect("promotion applies");

    assert_eq!(position.player(Color::White).count_of(PieceKind::Queen), 1);
    let queen = position.piece_at(sq(7, 0)).expect("promoted queen");
    assert_eq!(position.piece(queen).expect("queen slot").kind, PieceKind::Queen);
    assert_eq!(position.piece(pawn).expect("pawn slot").square, None);

    position.unmake_move().expect("history is non-empty");
    assert_eq!(position.snapshot(), before);
}

#[test]
fn promotion_appends_when_no_slot_is_free() {
    let mut position = custom(
        Color::White,
        vec![
            piece(PieceKind::King, 0, 4),
            piece(PieceKind::Queen, 0, 3),
            piece(PieceKind::Pawn, 6, 0),
        ],
        vec![piece(PieceKind::King, 7, 4)],
    );
    let before = position.snapshot();

    let pawn = position.piece_at(sq(6, 0)).expect("white a7 pawn");
    position
        .make_move(pawn, sq(7, 0), Some(PieceKind::Queen))
        .expect("promotion applies");

    assert_eq!(position.player(Color::White).count_of(PieceKind::Queen), 2);
    assert_eq!(position.pieces(Color::White).len(), 4);
    let queen = position.piece_at(sq(7, 0)).expect("promoted queen");
    assert!(position.piece(queen).expect("queen slot").moved);

    position.unmake_move().expect("history is non-empty");
    assert_eq!(position.pieces(Color::White).len(), 3);
    assert_eq!(position.snapshot(), before);
}

#[test]
fn promotion_to_king_or_pawn_is_refused() {
    let mut position = custom(
        Color::White,
        vec![piece(PieceKind::King, 0, 4), piece(PieceKind::Pawn, 6, 0)],
        vec![piece(PieceKind::King, 7, 4)],
    );
    let before = position.snapshot();
    let pawn = position.piece_at(sq(6, 0)).expect("white a7 pawn");
    assert_eq!(
        position.make_move(pawn, sq(7, 0), Some(PieceKind::King)),
        Err(PositionError::InvalidPromotion)
    );
    assert_eq!(
        position.make_move(pawn, sq(7, 0), Some(PieceKind::Pawn)),
        Err(PositionError::InvalidPromotion)
    );
    assert_eq!(position.snapshot(), before);
}

#[test]
fn movement_flags_are_set_for_king_rook_and_pawn() {
    let mut position = Position::standard();
    play(&mut position, (1, 4), (3, 4));
    let pawn = position.piece_at(sq(3, 4)).expect("moved pawn");
    assert!(position.piece(pawn).expect("pawn slot").moved);

    play(&mut position, (6, 4), (4, 4));
    let king = position.piece_at(sq(0, 4)).expect("white king");
    assert!(!position.piece(king).expect("king slot").moved);
    play(&mut position, (0, 4), (1, 4));
    assert!(position.piece(king).expect("king slot").moved);
}

#[test]
fn castle_execution_and_undo() {
    let mut position = custom(
        Color::White,
        vec![
            piece(PieceKind::King, 0, 4),
            piece(PieceKind::Rook, 0, 7),
            piece(PieceKind::Rook, 0, 0),
        ],
        vec![piece(PieceKind::King, 7, 4)],
    );
    let before = position.snapshot();

    position
        .castle(Color::White, CastleSide::King)
        .expect("castle applies");
    let king = position.piece_at(sq(0, 6)).expect("king on g1");
    let rook = position.piece_at(sq(0, 5)).expect("rook on f1");
    assert_eq!(position.piece(king).expect("king slot").kind, PieceKind::King);
    assert_eq!(position.piece(rook).expect("rook slot").kind, PieceKind::Rook);
    assert!(position.piece(king).expect("king slot").moved);
    assert!(position.piece(rook).expect("rook slot").moved);
    assert_eq!(position.piece_at(sq(0, 4)), None);
    assert_eq!(position.piece_at(sq(0, 7)), None);
    assert_eq!(position.turn, Color::Black);

    position.unmake_move().expect("history is non-empty");
    assert_eq!(position.snapshot(), before);

    // Queen side lands on c1/d1.
    position
        .castle(Color::White, CastleSide::Queen)
        .expect("castle applies");
    assert!(position.piece_at(sq(0, 2)).is_some());
    assert!(position.piece_at(sq(0, 3)).is_some());
    assert_eq!(position.piece_at(sq(0, 0)), None);
}

#[test]
fn captured_pieces_keep_their_slot() {
    let mut position = Position::standard();
    play(&mut position, (1, 4), (3, 4)); // e2-e4
    play(&mut position, (6, 3), (4, 3)); // d7-d5
    let victim = position.piece_at(sq(4, 3)).expect("black d5 pawn");
    let white_count = position.pieces(Color::White).len();
    let black_count = position.pieces(Color::Black).len();

    play(&mut position, (3, 4), (4, 3)); // exd5

    assert_eq!(position.pieces(Color::White).len(), white_count);
    assert_eq!(position.pieces(Color::Black).len(), black_count);
    assert_eq!(position.piece(victim).expect("victim slot").square, None);
    let capturer = position.piece_at(sq(4, 3)).expect("capturer on d5");
    assert_eq!(capturer.owner, Color::White);
}
