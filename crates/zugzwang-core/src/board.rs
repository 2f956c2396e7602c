use crate::types::{PieceId, Square};
use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    #[error("square out of bounds")]
    OutOfBounds,
}

/// The 8x8 occupancy grid. Cells index into the players' piece collections;
/// the board never owns piece state. Mutation is reserved for the move
/// executor in `position.rs`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Board {
    cells: [[Option<PieceId>; 8]; 8],
}

impl Board {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn get(&self, square: Square) -> Option<PieceId> {
        let (r, f) = square_coords(square)?;
        self.cells[r][f]
    }

    pub fn is_empty_square(&self, square: Square) -> bool {
        self.get(square).is_none()
    }

    pub(crate) fn put(&mut self, id: PieceId, square: Square) -> Result<(), BoardError> {
        let (r, f) = square_coords(square).ok_or(BoardError::OutOfBounds)?;
        self.cells[r][f] = Some(id);
        Ok(())
    }

    pub(crate) fn clear(&mut self, square: Square) -> Result<Option<PieceId>, BoardError> {
        let (r, f) = square_coords(square).ok_or(BoardError::OutOfBounds)?;
        Ok(self.cells[r][f].take())
    }
}

fn square_coords(square: Square) -> Option<(usize, usize)> {
    if !square.is_valid() {
        return None;
    }
    Some((usize::from(square.rank), usize::from(square.file)))
}
