use arrayvec::ArrayVec;

use crate::constants::{
    home_rank, king_castle_square, pawn_captures, pawn_direction, rook_start_square, step_vectors,
    KING_FILE, KING_STEPS, SQUARES,
};
use crate::position::Position;
use crate::types::{CastleSide, Color, PieceId, PieceKind, ReachMode, Square};

/// Squares along a single template vector, nearest first. Longest possible
/// slide is seven squares.
pub type Path = ArrayVec<Square, 7>;

pub type SquareSet = ArrayVec<Square, 64>;

/// Walks one template vector from `origin`. The walk stops after one step for
/// non-sliding pieces, at the board edge, at the supplied destination, or on
/// the first occupied square (which is still yielded, so the caller can tell
/// a capture from a blocked path).
pub fn trace_vector(
    position: &Position,
    origin: Square,
    vector: (i8, i8),
    slides: bool,
    stop_at: Option<Square>,
) -> Path {
    let mut out = Path::new();
    let mut current = origin;
    loop {
        let Some(next) = current.offset(vector.0, vector.1) else {
            break;
        };
        out.push(next);
        if !slides || Some(next) == stop_at || position.board.get(next).is_some() {
            break;
        }
        current = next;
    }
    out
}

/// Whether `id` can move onto (or, in attack mode, covers) `destination`.
/// Pure read; captured pieces reach nothing, and no piece reaches its own
/// square.
pub fn can_reach(position: &Position, id: PieceId, destination: Square, mode: ReachMode) -> bool {
    let Some(piece) = position.piece(id) else {
        return false;
    };
    let Some(origin) = piece.square else {
        return false;
    };
    if origin == destination || !destination.is_valid() {
        return false;
    }

    let dest_owner = position.board.get(destination).map(|occ| occ.owner);
    if mode == ReachMode::Move && dest_owner == Some(id.owner) {
        return false;
    }

    if piece.kind == PieceKind::Pawn {
        return pawn_can_reach(position, id.owner, piece.moved, origin, destination, dest_owner, mode);
    }

    let slides = piece.kind.slides();
    for &vector in step_vectors(piece.kind) {
        let path = trace_vector(position, origin, vector, slides, Some(destination));
        // The trace stops on the first occupant, so reaching the destination
        // implies every square before it was empty.
        if path.last() == Some(&destination) {
            return true;
        }
    }
    false
}

fn pawn_can_reach(
    position: &Position,
    owner: Color,
    moved: bool,
    origin: Square,
    destination: Square,
    dest_owner: Option<Color>,
    mode: ReachMode,
) -> bool {
    let diagonal_hit = pawn_captures(owner)
        .iter()
        .any(|&(dr, df)| origin.offset(dr, df) == Some(destination));

    // A pawn covers only its capture diagonals, never its forward square.
    if mode == ReachMode::Attack {
        return diagonal_hit;
    }

    if diagonal_hit {
        return dest_owner == Some(owner.opponent())
            || en_passant_target(position, owner) == Some(destination);
    }

    // Plain advance: destination must be empty.
    if dest_owner.is_some() {
        return false;
    }
    let dir = pawn_direction(owner);
    let Some(one_step) = origin.offset(dir, 0) else {
        return false;
    };
    if one_step == destination {
        return true;
    }
    // Double step: unmoved pawn, intermediate square clear. A blocked pawn
    // loses its double-step reach entirely.
    if moved || position.board.get(one_step).is_some() {
        return false;
    }
    origin.offset(2 * dir, 0) == Some(destination)
}

/// The square an opposing pawn may currently be captured onto en passant,
/// valid for exactly the ply after that pawn's double step.
pub fn en_passant_target(position: &Position, mover: Color) -> Option<Square> {
    let id = position.en_passant_pawn()?;
    if id.owner != mover.opponent() {
        return None;
    }
    let pawn = position.piece(id)?;
    if !pawn.ep_active {
        return None;
    }
    pawn.ep_skip
}

/// True iff any of the defender's opponent's pieces covers `square`.
pub fn square_attacked(position: &Position, square: Square, defender: Color) -> bool {
    let attacker = defender.opponent();
    for (index, piece) in position.pieces(attacker).iter().enumerate() {
        if piece.square.is_none() {
            continue;
        }
        let id = PieceId::new(attacker, index as u8);
        if can_reach(position, id, square, ReachMode::Attack) {
            return true;
        }
    }
    false
}

/// A captured king counts as the extreme case of check.
pub fn in_check(position: &Position, color: Color) -> bool {
    match position.king(color) {
        Some(king) => match king.square {
            Some(square) => square_attacked(position, square, color),
            None => true,
        },
        None => true,
    }
}

/// The king's one-step candidate squares: on-board and not occupied by the
/// player's own pieces.
pub fn escape_squares(position: &Position, color: Color) -> ArrayVec<Square, 8> {
    let mut out = ArrayVec::new();
    let Some(king_square) = position.king(color).and_then(|king| king.square) else {
        return out;
    };
    for &(dr, df) in &KING_STEPS {
        let Some(square) = king_square.offset(dr, df) else {
            continue;
        };
        if position.board.get(square).map(|occ| occ.owner) == Some(color) {
            continue;
        }
        out.push(square);
    }
    out
}

/// Checkmate as king mobility versus opponent coverage: the player is in
/// check and every candidate escape square is covered (pawn capture squares
/// count even while empty). An empty candidate set is not reported as mate.
///
/// This deliberately does not consider blocking the check or capturing the
/// checking piece with another piece.
pub fn is_checkmate(position: &Position, color: Color) -> bool {
    if !in_check(position, color) {
        return false;
    }
    let escapes = escape_squares(position, color);
    if escapes.is_empty() {
        return false;
    }
    escapes
        .iter()
        .all(|&square| square_attacked(position, square, color))
}

/// The five castling gates, short-circuiting left to right: both pieces on
/// the board, neither ever moved, the squares between them empty, the king
/// not currently attacked, and no square the king crosses or lands on
/// attacked.
pub fn castle_allowed(position: &Position, color: Color, side: CastleSide) -> bool {
    let Some(king) = position.king(color) else {
        return false;
    };
    let Some(king_square) = king.square else {
        return false;
    };
    if king.moved || king_square != Square::new_unchecked(home_rank(color), KING_FILE) {
        return false;
    }

    let rook_square = rook_start_square(color, side);
    let rook = position
        .board
        .get(rook_square)
        .filter(|id| id.owner == color)
        .and_then(|id| position.piece(id));
    match rook {
        Some(rook) if rook.kind == PieceKind::Rook && !rook.moved => {}
        _ => return false,
    }

    let (lo, hi) = if rook_square.file < king_square.file {
        (rook_square.file + 1, king_square.file - 1)
    } else {
        (king_square.file + 1, rook_square.file - 1)
    };
    for file in lo..=hi {
        if !position
            .board
            .is_empty_square(Square::new_unchecked(king_square.rank, file))
        {
            return false;
        }
    }

    if square_attacked(position, king_square, color) {
        return false;
    }
    let target = king_castle_square(color, side);
    let step = if target.file > king_square.file { 1 } else { -1 };
    let mut file = king_square.file as i8 + step;
    loop {
        let square = Square::new_unchecked(king_square.rank, file as u8);
        if square_attacked(position, square, color) {
            return false;
        }
        if square == target {
            break;
        }
        file += step;
    }
    true
}

/// Union of squares the player's pieces can move onto, for an automated
/// caller picking candidate moves. Castling is not included (it is attempted
/// through its own entry point), and candidates may still be rejected for
/// exposing the mover's own king.
pub fn available_destinations(position: &Position, color: Color) -> SquareSet {
    let mut out = SquareSet::new();
    for (index, piece) in position.pieces(color).iter().enumerate() {
        if piece.square.is_none() {
            continue;
        }
        let id = PieceId::new(color, index as u8);
        for square in SQUARES {
            if out.contains(&square) {
                continue;
            }
            if can_reach(position, id, square, ReachMode::Move) {
                out.push(square);
            }
        }
    }
    out
}
