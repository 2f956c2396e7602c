use crate::types::{CastleSide, Color, PieceKind, Square};

pub const KING_STEPS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

pub const KNIGHT_JUMPS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

pub const BISHOP_DIRS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

pub const ROOK_DIRS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

pub const QUEEN_DIRS: [(i8, i8); 8] = KING_STEPS;

/// Template vectors for every kind except the pawn, whose vectors depend on
/// its owner (see `pawn_advance`/`pawn_captures`).
pub const fn step_vectors(kind: PieceKind) -> &'static [(i8, i8)] {
    match kind {
        PieceKind::Pawn => &[],
        PieceKind::Knight => &KNIGHT_JUMPS,
        PieceKind::Bishop => &BISHOP_DIRS,
        PieceKind::Rook => &ROOK_DIRS,
        PieceKind::Queen => &QUEEN_DIRS,
        PieceKind::King => &KING_STEPS,
    }
}

pub const fn pawn_direction(color: Color) -> i8 {
    match color {
        Color::White => 1,
        Color::Black => -1,
    }
}

pub const fn pawn_advance(color: Color) -> (i8, i8) {
    (pawn_direction(color), 0)
}

pub const fn pawn_captures(color: Color) -> [(i8, i8); 2] {
    let dir = pawn_direction(color);
    [(dir, -1), (dir, 1)]
}

pub const fn home_rank(color: Color) -> u8 {
    match color {
        Color::White => 0,
        Color::Black => 7,
    }
}

pub const fn pawn_rank(color: Color) -> u8 {
    match color {
        Color::White => 1,
        Color::Black => 6,
    }
}

pub const fn promotion_rank(color: Color) -> u8 {
    match color {
        Color::White => 7,
        Color::Black => 0,
    }
}

pub const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

pub const KING_FILE: u8 = 4;

pub const fn rook_start_square(color: Color, side: CastleSide) -> Square {
    let file = match side {
        CastleSide::King => 7,
        CastleSide::Queen => 0,
    };
    Square::new_unchecked(home_rank(color), file)
}

/// Post-castle king square, fixed per color and side.
pub const fn king_castle_square(color: Color, side: CastleSide) -> Square {
    let file = match side {
        CastleSide::King => 6,
        CastleSide::Queen => 2,
    };
    Square::new_unchecked(home_rank(color), file)
}

/// Post-castle rook square, fixed per color and side.
pub const fn rook_castle_square(color: Color, side: CastleSide) -> Square {
    let file = match side {
        CastleSide::King => 5,
        CastleSide::Queen => 3,
    };
    Square::new_unchecked(home_rank(color), file)
}

pub const SQUARES: [Square; 64] = [
    Square::new_unchecked(0, 0),
    Square::new_unchecked(0, 1),
    Square::new_unchecked(0, 2),
    Square::new_unchecked(0, 3),
    Square::new_unchecked(0, 4),
    Square::new_unchecked(0, 5),
    Square::new_unchecked(0, 6),
    Square::new_unchecked(0, 7),
    Square::new_unchecked(1, 0),
    Square::new_unchecked(1, 1),
    Square::new_unchecked(1, 2),
    Square::new_unchecked(1, 3),
    Square::new_unchecked(1, 4),
    Square::new_unchecked(1, 5),
    Square::new_unchecked(1, 6),
    Square::new_unchecked(1, 7),
    Square::new_unchecked(2, 0),
    Square::new_unchecked(2, 1),
    Square::new_unchecked(2, 2),
    Square::new_unchecked(2, 3),
    Square::new_unchecked(2, 4),
    Square::new_unchecked(2, 5),
    Square::new_unchecked(2, 6),
    Square::new_unchecked(2, 7),
    Square::new_unchecked(3, 0),
    Square::new_unchecked(3, 1),
    Square::new_unchecked(3, 2),
    Square::new_unchecked(3, 3),
    Square::new_unchecked(3, 4),
    Square::new_unchecked(3, 5),
    Square::new_unchecked(3, 6),
    Square::new_unchecked(3, 7),
    Square::new_unchecked(4, 0),
    Square::new_unchecked(4, 1),
    Square::new_unchecked(4, 2),
    Square::new_unchecked(4, 3),
    Square::new_unchecked(4, 4),
    Square::new_unchecked(4, 5),
    Square::new_unchecked(4, 6),
    Square::new_unchecked(4, 7),
    Square::new_unchecked(5, 0),
    Square::new_unchecked(5, 1),
    Square::new_unchecked(5, 2),
    Square::new_unchecked(5, 3),
    Square::new_unchecked(5, 4),
    Square::new_unchecked(5, 5),
    Square::new_unchecked(5, 6),
    Square::new_unchecked(5, 7),
    Square::new_unchecked(6, 0),
    Square::new_unchecked(6, 1),
    Square::new_unchecked(6, 2),
    Square::new_unchecked(6, 3),
    Square::new_unchecked(6, 4),
    Square::new_unchecked(6, 5),
    Square::new_unchecked(6, 6),
    Square::new_unchecked(6, 7),
    Square::new_unchecked(7, 0),
    Square::new_unchecked(7, 1),
    Square::new_unchecked(7, 2),
    Square::new_unchecked(7, 3),
    Square::new_unchecked(7, 4),
    Square::new_unchecked(7, 5),
    Square::new_unchecked(7, 6),
    Square::new_unchecked(7, 7),
];
