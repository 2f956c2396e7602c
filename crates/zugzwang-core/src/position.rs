use thiserror::Error;

use crate::board::{Board, BoardError};
use crate::constants::{king_castle_square, promotion_rank, rook_castle_square, rook_start_square};
use crate::movegen;
use crate::pieces::{PieceState, Player};
use crate::types::{CastleSide, Color, PieceId, PieceKind, Square};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PositionError {
    #[error("move color does not match turn")]
    WrongTurn,
    #[error("piece is captured or does not exist")]
    MissingPiece,
    #[error("promotion choice must be knight, bishop, rook or queen")]
    InvalidPromotion,
    #[error("no move to unmake")]
    EmptyHistory,
    #[error("board error")]
    Board(#[from] BoardError),
}

/// Everything needed to reverse one applied move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryEntry {
    pub id: PieceId,
    pub from: Square,
    pub to: Square,
    /// The moved piece's full state before the move.
    pub moved_before: PieceState,
    pub captured: Option<(PieceId, PieceState)>,
    /// Promotion slot and, when a captured slot was reused, its prior state.
    /// `None` in the second position means the slot was freshly appended.
    pub promoted: Option<(PieceId, Option<PieceState>)>,
    /// Castling rook and its state before the move.
    pub castle_rook: Option<(PieceId, PieceState)>,
    /// Owner of the en-passant window before this ply, if any.
    pub prev_ep: Option<PieceId>,
    pub turn: Color,
    pub move_number: u32,
}

/// Full game state: the occupancy grid, both piece collections, whose turn it
/// is, the one-ply en-passant window and the move history. `make_move` and
/// `castle` are the only writers; every query is a pure read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    pub board: Board,
    players: [Player; 2],
    pub turn: Color,
    ep_pawn: Option<PieceId>,
    pub move_number: u32,
    pub history: Vec<HistoryEntry>,
}

impl Position {
    /// Standard starting layout: back rank R N B Q K B N R, pawns on each
    /// side's second rank, White to move.
    pub fn standard() -> Self {
        Self::assemble(
            [
                Player::standard(Color::White),
                Player::standard(Color::Black),
            ],
            Color::White,
            1,
        )
    }

    /// Builds a position from already-validated players: every piece square
    /// must be in bounds and uniquely occupied (the snapshot loader checks
    /// this before calling).
    pub(crate) fn assemble(players: [Player; 2], turn: Color, move_number: u32) -> Self {
        let mut board = Board::empty();
        let mut ep_pawn = None;
        for player in &players {
            for (index, piece) in player.pieces().iter().enumerate() {
                let id = PieceId::new(player.color(), index as u8);
                if let Some(square) = piece.square {
                    board
                        .put(id, square)
                        .expect("assembled piece squares are in bounds");
                }
                if piece.ep_active {
                    ep_pawn = Some(id);
                }
            }
        }
        Self {
            board,
            players,
            turn,
            ep_pawn,
            move_number,
            history: Vec::new(),
        }
    }

    pub fn player(&self, color: Color) -> &Player {
        &self.players[color.index()]
    }

    pub fn pieces(&self, color: Color) -> &[PieceState] {
        self.players[color.index()].pieces()
    }

    pub fn piece(&self, id: PieceId) -> Option<&PieceState> {
        self.players[id.owner.index()].get(id.index)
    }

    pub fn piece_at(&self, square: Square) -> Option<PieceId> {
        self.board.get(square)
    }

    pub fn king(&self, color: Color) -> Option<&PieceState> {
        let index = self.players[color.index()].king_index()?;
        self.players[color.index()].get(index)
    }

    pub fn king_id(&self, color: Color) -> Option<PieceId> {
        self.players[color.index()]
            .king_index()
            .map(|index| PieceId::new(color, index))
    }

    pub fn en_passant_pawn(&self) -> Option<PieceId> {
        self.ep_pawn
    }

    fn piece_state_mut(&mut self, id: PieceId) -> Result<&mut PieceState, PositionError> {
        self.players[id.owner.index()]
            .get_mut(id.index)
            .ok_or(PositionError::MissingPiece)
    }

    /// Applies an already-validated move: relocates the piece, removes the
    /// captured occupant (resolving the en-passant victim square), applies
    /// promotion atomically, resets movement flags and advances the
    /// en-passant window and turn. Legality is not re-checked here.
    pub fn make_move(
        &mut self,
        id: PieceId,
        destination: Square,
        promotion: Option<PieceKind>,
    ) -> Result<(), PositionError> {
        if id.owner != self.turn {
            return Err(PositionError::WrongTurn);
        }
        let piece = *self.piece(id).ok_or(PositionError::MissingPiece)?;
        let from = piece.square.ok_or(PositionError::MissingPiece)?;

        let promoting =
            piece.kind == PieceKind::Pawn && destination.rank == promotion_rank(id.owner);
        let promoted_kind = if promoting {
            let kind = promotion.unwrap_or(PieceKind::Queen);
            if !kind.promotable() {
                return Err(PositionError::InvalidPromotion);
            }
            Some(kind)
        } else {
            None
        };

        // The vacated square is the destination for a normal capture, or the
        // victim pawn's own square for en passant.
        let victim_id = match self.board.get(destination) {
            Some(occupant) => Some(occupant),
            None if piece.kind == PieceKind::Pawn
                && movegen::en_passant_target(self, self.turn) == Some(destination) =>
            {
                self.ep_pawn
            }
            None => None,
        };
        let captured = match victim_id {
            Some(vid) => Some((vid, *self.piece(vid).ok_or(PositionError::MissingPiece)?)),
            None => None,
        };

        let mut entry = HistoryEntry {
            id,
            from,
            to: destination,
            moved_before: piece,
            captured,
            promoted: None,
            castle_rook: None,
            prev_ep: self.ep_pawn,
            turn: self.turn,
            move_number: self.move_number,
        };

        if let Some((vid, state)) = captured {
            if let Some(square) = state.square {
                self.board.clear(square)?;
            }
            self.piece_state_mut(vid)?.square = None;
        }
        self.board.clear(from)?;

        let mover_id = if let Some(kind) = promoted_kind {
            let (slot, prior) = self.players[id.owner.index()].promotion_slot(kind);
            let promoted_id = PieceId::new(id.owner, slot);
            entry.promoted = Some((promoted_id, prior));

            // Retire the pawn and seat the chosen piece in one step.
            let pawn = self.piece_state_mut(id)?;
            pawn.square = None;
            pawn.moved = true;
            pawn.ep_active = false;
            let promoted = self.piece_state_mut(promoted_id)?;
            promoted.square = Some(destination);
            promoted.moved = true;
            promoted_id
        } else {
            let mover = self.piece_state_mut(id)?;
            mover.square = Some(destination);
            if matches!(
                piece.kind,
                PieceKind::King | PieceKind::Rook | PieceKind::Pawn
            ) {
                mover.moved = true;
            }
            id
        };
        self.board.put(mover_id, destination)?;

        let double_step =
            piece.kind == PieceKind::Pawn && from.rank.abs_diff(destination.rank) == 2;
        self.advance_en_passant_window(if double_step { Some(id) } else { None })?;

        self.history.push(entry);
        self.turn = self.turn.opponent();
        self.move_number = self.move_number.saturating_add(1);
        Ok(())
    }

    /// Executes a castle for `color` on `side`. The gates in
    /// `movegen::castle_allowed` must have been checked first.
    pub fn castle(&mut self, color: Color, side: CastleSide) -> Result<(), PositionError> {
        if color != self.turn {
            return Err(PositionError::WrongTurn);
        }
        let king_id = self.king_id(color).ok_or(PositionError::MissingPiece)?;
        let king = *self.piece(king_id).ok_or(PositionError::MissingPiece)?;
        let king_from = king.square.ok_or(PositionError::MissingPiece)?;
        let rook_from = rook_start_square(color, side);
        let rook_id = self.board.get(rook_from).ok_or(PositionError::MissingPiece)?;
        let rook = *self.piece(rook_id).ok_or(PositionError::MissingPiece)?;

        let entry = HistoryEntry {
            id: king_id,
            from: king_from,
            to: king_castle_square(color, side),
            moved_before: king,
            captured: None,
            promoted: None,
            castle_rook: Some((rook_id, rook)),
            prev_ep: self.ep_pawn,
            turn: self.turn,
            move_number: self.move_number,
        };

        self.board.clear(king_from)?;
        self.board.clear(rook_from)?;
        let king_to = king_castle_square(color, side);
        let rook_to = rook_castle_square(color, side);
        {
            let king = self.piece_state_mut(king_id)?;
            king.square = Some(king_to);
            king.moved = true;
        }
        {
            let rook = self.piece_state_mut(rook_id)?;
            rook.square = Some(rook_to);
            rook.moved = true;
        }
        self.board.put(king_id, king_to)?;
        self.board.put(rook_id, rook_to)?;

        self.advance_en_passant_window(None)?;
        self.history.push(entry);
        self.turn = self.turn.opponent();
        self.move_number = self.move_number.saturating_add(1);
        Ok(())
    }

    /// Reverses the most recent move, restoring piece states, board cells and
    /// the previous en-passant window.
    pub fn unmake_move(&mut self) -> Result<(), PositionError> {
        let entry = self.history.pop().ok_or(PositionError::EmptyHistory)?;

        self.board.clear(entry.to)?;
        if let Some((rook_id, rook_before)) = entry.castle_rook {
            let rook_now = self
                .piece(rook_id)
                .and_then(|rook| rook.square)
                .ok_or(PositionError::MissingPiece)?;
            self.board.clear(rook_now)?;
            *self.piece_state_mut(rook_id)? = rook_before;
            let rook_from = rook_before.square.ok_or(PositionError::MissingPiece)?;
            self.board.put(rook_id, rook_from)?;
        }
        if let Some((promoted_id, prior)) = entry.promoted {
            match prior {
                Some(state) => *self.piece_state_mut(promoted_id)? = state,
                // A freshly appended slot is always the newest, and history
                // unwinds newest-first.
                None => self.players[promoted_id.owner.index()].pop_piece(),
            }
        }
        *self.piece_state_mut(entry.id)? = entry.moved_before;
        self.board.put(entry.id, entry.from)?;
        if let Some((vid, state)) = entry.captured {
            *self.piece_state_mut(vid)? = state;
            if let Some(square) = state.square {
                self.board.put(vid, square)?;
            }
        }

        if let Some(current) = self.ep_pawn.take() {
            self.piece_state_mut(current)?.ep_active = false;
        }
        if let Some(prev) = entry.prev_ep {
            self.piece_state_mut(prev)?.ep_active = true;
        }
        self.ep_pawn = entry.prev_ep;

        self.turn = entry.turn;
        self.move_number = entry.move_number;
        Ok(())
    }

    /// Closes the previous ply's en-passant window and opens one for
    /// `newly_active`, the pawn that just double-stepped. At most one pawn is
    /// ever flagged.
    fn advance_en_passant_window(
        &mut self,
        newly_active: Option<PieceId>,
    ) -> Result<(), PositionError> {
        if let Some(old) = self.ep_pawn.take() {
            if Some(old) != newly_active {
                self.piece_state_mut(old)?.ep_active = false;
            }
        }
        if let Some(id) = newly_active {
            self.piece_state_mut(id)?.ep_active = true;
        }
        self.ep_pawn = newly_active;
        Ok(())
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::standard()
    }
}
