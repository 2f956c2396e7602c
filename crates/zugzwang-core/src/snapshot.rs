use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{pawn_direction, pawn_rank};
use crate::pieces::{PieceState, Player};
use crate::position::Position;
use crate::types::{Color, PieceKind, Square};

pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotError {
    #[error("unsupported snapshot version {0}")]
    Version(u32),
    #[error("piece square out of bounds")]
    OutOfBounds,
    #[error("two pieces occupy the same square")]
    DuplicateOccupancy,
    #[error("each side must have exactly one king")]
    KingCount,
    #[error("en-passant flag on an ineligible piece")]
    BadEnPassant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceSnapshot {
    pub kind: PieceKind,
    pub square: Option<Square>,
    pub moved: bool,
    pub ep_active: bool,
}

/// Explicit, versioned image of the full entity graph: both piece
/// collections in slot order, the side to move and the move counter. The
/// occupancy grid is derived, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub version: u32,
    pub turn: Color,
    pub move_number: u32,
    pub white: Vec<PieceSnapshot>,
    pub black: Vec<PieceSnapshot>,
}

impl Snapshot {
    fn side(&self, color: Color) -> &[PieceSnapshot] {
        match color {
            Color::White => &self.white,
            Color::Black => &self.black,
        }
    }
}

impl Position {
    pub fn snapshot(&self) -> Snapshot {
        let collect = |color: Color| {
            self.pieces(color)
                .iter()
                .map(|piece| PieceSnapshot {
                    kind: piece.kind,
                    square: piece.square,
                    moved: piece.moved,
                    ep_active: piece.ep_active,
                })
                .collect()
        };
        Snapshot {
            version: SNAPSHOT_VERSION,
            turn: self.turn,
            move_number: self.move_number,
            white: collect(Color::White),
            black: collect(Color::Black),
        }
    }

    /// Rebuilds a position from a snapshot, verifying the invariants the
    /// engine otherwise assumes: squares in bounds, unique occupancy,
    /// exactly one king per side, and at most one en-passant-eligible pawn.
    pub fn from_snapshot(snapshot: &Snapshot) -> Result<Self, SnapshotError> {
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::Version(snapshot.version));
        }

        let mut occupied = [[false; 8]; 8];
        let mut ep_count = 0usize;
        for color in [Color::White, Color::Black] {
            let side = snapshot.side(color);
            if side
                .iter()
                .filter(|piece| piece.kind == PieceKind::King)
                .count()
                != 1
            {
                return Err(SnapshotError::KingCount);
            }
            for piece in side {
                if let Some(square) = piece.square {
                    if !square.is_valid() {
                        return Err(SnapshotError::OutOfBounds);
                    }
                    let cell =
                        &mut occupied[usize::from(square.rank)][usize::from(square.file)];
                    if *cell {
                        return Err(SnapshotError::DuplicateOccupancy);
                    }
                    *cell = true;
                }
                if piece.ep_active {
                    if piece.kind != PieceKind::Pawn || piece.square.is_none() {
                        return Err(SnapshotError::BadEnPassant);
                    }
                    ep_count += 1;
                }
            }
        }
        if ep_count > 1 {
            return Err(SnapshotError::BadEnPassant);
        }

        let restore = |color: Color| {
            let pieces = snapshot
                .side(color)
                .iter()
                .map(|piece| restore_piece(piece, color))
                .collect();
            Player::new(color, pieces)
        };
        Ok(Self::assemble(
            [restore(Color::White), restore(Color::Black)],
            snapshot.turn,
            snapshot.move_number,
        ))
    }
}

fn restore_piece(piece: &PieceSnapshot, color: Color) -> PieceState {
    let dir = pawn_direction(color);
    // The skip square is fixed at creation; recover it from where the pawn
    // stands now. An en-passant-eligible pawn sits one step past its skip
    // square, an unmoved pawn one step before it.
    let ep_skip = match (piece.kind, piece.square) {
        (PieceKind::Pawn, Some(square)) if piece.ep_active => square.offset(-dir, 0),
        (PieceKind::Pawn, Some(square)) if square.rank == pawn_rank(color) => {
            square.offset(dir, 0)
        }
        _ => None,
    };
    PieceState {
        kind: piece.kind,
        owner: color,
        square: piece.square,
        moved: piece.moved,
        ep_skip,
        ep_active: piece.ep_active,
    }
}
