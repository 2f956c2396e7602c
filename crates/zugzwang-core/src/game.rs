use crate::constants::promotion_rank;
use crate::movegen::{self, SquareSet};
use crate::position::{HistoryEntry, Position, PositionError};
use crate::types::{CastleSide, Color, MoveOutcome, PieceId, PieceKind, ReachMode, Square};

/// Rules-engine façade consumed by the turn loop. The caller identifies a
/// piece and destination (notation parsing happens upstream); the engine
/// decides legality, applies accepted moves and answers check queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chess {
    position: Position,
}

impl Chess {
    pub fn new() -> Self {
        Self {
            position: Position::standard(),
        }
    }

    pub fn from_position(position: Position) -> Self {
        Self { position }
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn turn(&self) -> Color {
        self.position.turn
    }

    pub fn move_number(&self) -> u32 {
        self.position.move_number
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.position.history
    }

    pub fn piece_at(&self, square: Square) -> Option<PieceId> {
        self.position.piece_at(square)
    }

    /// Validates and, if legal, applies a candidate move. Geometry failures
    /// and moves that would leave the mover's own king in check come back as
    /// `applied: false`; calling out of turn or with a captured piece is a
    /// caller error.
    pub fn attempt_move(
        &mut self,
        id: PieceId,
        destination: Square,
        promotion: Option<PieceKind>,
    ) -> Result<MoveOutcome, PositionError> {
        if id.owner != self.position.turn {
            return Err(PositionError::WrongTurn);
        }
        let piece = *self.position.piece(id).ok_or(PositionError::MissingPiece)?;
        if piece.square.is_none() {
            return Err(PositionError::MissingPiece);
        }

        if !movegen::can_reach(&self.position, id, destination, ReachMode::Move) {
            return Ok(MoveOutcome::rejected());
        }

        let en_passant = piece.kind == PieceKind::Pawn
            && self.position.board.get(destination).is_none()
            && movegen::en_passant_target(&self.position, id.owner) == Some(destination);
        let capture = if en_passant {
            self.position
                .en_passant_pawn()
                .and_then(|vid| self.position.piece(vid))
                .and_then(|victim| victim.square)
        } else {
            self.position.board.get(destination).map(|_| destination)
        };
        let promoted = (piece.kind == PieceKind::Pawn
            && destination.rank == promotion_rank(id.owner))
        .then(|| promotion.unwrap_or(PieceKind::Queen));

        self.position.make_move(id, destination, promotion)?;

        // A move may not leave the mover's own king in check.
        if movegen::in_check(&self.position, id.owner) {
            self.position.unmake_move()?;
            return Ok(MoveOutcome::rejected());
        }

        Ok(MoveOutcome {
            applied: true,
            capture,
            en_passant,
            promoted,
        })
    }

    /// Attempts to castle. Returns false without mutating if any gate fails.
    pub fn attempt_castle(&mut self, color: Color, side: CastleSide) -> bool {
        if color != self.position.turn {
            return false;
        }
        if !movegen::castle_allowed(&self.position, color, side) {
            return false;
        }
        self.position.castle(color, side).is_ok()
    }

    pub fn in_check(&self, color: Color) -> bool {
        movegen::in_check(&self.position, color)
    }

    pub fn is_checkmate(&self, color: Color) -> bool {
        movegen::is_checkmate(&self.position, color)
    }

    pub fn king_captured(&self, color: Color) -> bool {
        self.position
            .king(color)
            .is_none_or(|king| king.square.is_none())
    }

    pub fn available_destinations(&self, color: Color) -> SquareSet {
        movegen::available_destinations(&self.position, color)
    }

    pub fn undo(&mut self) -> Result<(), PositionError> {
        self.position.unmake_move()
    }
}

impl Default for Chess {
    fn default() -> Self {
        Self::new()
    }
}
