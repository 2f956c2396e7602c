use crate::constants::{home_rank, pawn_direction, pawn_rank, BACK_RANK};
use crate::types::{Color, PieceKind, Square};

/// Per-piece movement state. Captured pieces keep their slot with
/// `square = None`; promotion may later reuse such a slot for its kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceState {
    pub kind: PieceKind,
    pub owner: Color,
    pub square: Option<Square>,
    pub moved: bool,
    /// Pawn only: the square a double step would skip over, fixed at
    /// creation. Read only while `ep_active` holds.
    pub ep_skip: Option<Square>,
    /// Pawn only: true during the single ply after its own double step.
    pub ep_active: bool,
}

impl PieceState {
    pub fn new(kind: PieceKind, owner: Color, square: Square) -> Self {
        let ep_skip = if kind == PieceKind::Pawn {
            square.offset(pawn_direction(owner), 0)
        } else {
            None
        };
        Self {
            kind,
            owner,
            square: Some(square),
            moved: false,
            ep_skip,
            ep_active: false,
        }
    }

    /// A piece materialized by promotion. It starts off-board (the executor
    /// assigns the destination) and counts as already moved, so a promoted
    /// rook can never satisfy the castling gates.
    pub fn promoted(kind: PieceKind, owner: Color) -> Self {
        Self {
            kind,
            owner,
            square: None,
            moved: true,
            ep_skip: None,
            ep_active: false,
        }
    }
}

/// One side's pieces. Slots are appended at setup (back rank in file order,
/// then the eight pawns) and by promotion; they are never removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    color: Color,
    pieces: Vec<PieceState>,
}

impl Player {
    pub fn new(color: Color, pieces: Vec<PieceState>) -> Self {
        Self { color, pieces }
    }

    pub fn standard(color: Color) -> Self {
        let mut pieces = Vec::with_capacity(16);
        for (file, &kind) in BACK_RANK.iter().enumerate() {
            let square = Square::new_unchecked(home_rank(color), file as u8);
            pieces.push(PieceState::new(kind, color, square));
        }
        for file in 0..8 {
            let square = Square::new_unchecked(pawn_rank(color), file);
            pieces.push(PieceState::new(PieceKind::Pawn, color, square));
        }
        Self { color, pieces }
    }

    pub const fn color(&self) -> Color {
        self.color
    }

    pub fn pieces(&self) -> &[PieceState] {
        &self.pieces
    }

    pub fn get(&self, index: u8) -> Option<&PieceState> {
        self.pieces.get(usize::from(index))
    }

    pub(crate) fn get_mut(&mut self, index: u8) -> Option<&mut PieceState> {
        self.pieces.get_mut(usize::from(index))
    }

    pub fn king_index(&self) -> Option<u8> {
        self.pieces
            .iter()
            .position(|piece| piece.kind == PieceKind::King)
            .map(|index| index as u8)
    }

    pub fn count_of(&self, kind: PieceKind) -> usize {
        self.pieces.iter().filter(|piece| piece.kind == kind).count()
    }

    /// Slot for a promotion to `kind`: a captured piece of that kind if one
    /// exists, else a freshly appended one. Returns the slot index and, for a
    /// reused slot, its prior state (needed to unmake the move).
    pub(crate) fn promotion_slot(&mut self, kind: PieceKind) -> (u8, Option<PieceState>) {
        if let Some(index) = self
            .pieces
            .iter()
            .position(|piece| piece.kind == kind && piece.square.is_none())
        {
            (index as u8, Some(self.pieces[index]))
        } else {
            self.pieces.push(PieceState::promoted(kind, self.color));
            ((self.pieces.len() - 1) as u8, None)
        }
    }

    pub(crate) fn pop_piece(&mut self) {
        self.pieces.pop();
    }
}
