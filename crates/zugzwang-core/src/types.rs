use serde::{Deserialize, Serialize};

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    White = 0,
    Black = 1,
}

impl Color {
    pub const fn opponent(self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }
}

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    Pawn = 0,
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
    King = 5,
}

impl PieceKind {
    pub const ALL: [Self; 6] = [
        Self::Pawn,
        Self::Knight,
        Self::Bishop,
        Self::Rook,
        Self::Queen,
        Self::King,
    ];

    /// Sliding pieces extend along a vector until blocked.
    pub const fn slides(self) -> bool {
        matches!(self, Self::Bishop | Self::Rook | Self::Queen)
    }

    /// Kinds a pawn may promote to.
    pub const fn promotable(self) -> bool {
        matches!(self, Self::Knight | Self::Bishop | Self::Rook | Self::Queen)
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Square {
    pub rank: u8,
    pub file: u8,
}

impl Square {
    pub const fn new(rank: u8, file: u8) -> Option<Self> {
        if rank <= 7 && file <= 7 {
            Some(Self { rank, file })
        } else {
            None
        }
    }

    pub const fn new_unchecked(rank: u8, file: u8) -> Self {
        Self { rank, file }
    }

    pub const fn is_valid(self) -> bool {
        self.rank <= 7 && self.file <= 7
    }

    /// The square one step along `(dr, df)`, or `None` past the board edge.
    pub const fn offset(self, dr: i8, df: i8) -> Option<Self> {
        let rank = self.rank as i8 + dr;
        let file = self.file as i8 + df;
        if rank < 0 || rank > 7 || file < 0 || file > 7 {
            None
        } else {
            Some(Self {
                rank: rank as u8,
                file: file as u8,
            })
        }
    }

    /// Parses coordinate text such as "e4" (file letter, rank digit).
    pub fn parse(input: &str) -> Option<Self> {
        let mut chars = input.chars();
        let file = chars.next()?;
        let rank = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        if !('a'..='h').contains(&file) || !('1'..='8').contains(&rank) {
            return None;
        }
        Some(Self {
            rank: rank as u8 - b'1',
            file: file as u8 - b'a',
        })
    }
}

/// Stable handle to a piece in its owner's collection. Pieces are created at
/// setup (or by promotion) and never removed, so indices stay valid for the
/// life of a game.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceId {
    pub owner: Color,
    pub index: u8,
}

impl PieceId {
    pub const fn new(owner: Color, index: u8) -> Self {
        Self { owner, index }
    }
}

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastleSide {
    King = 0,
    Queen = 1,
}

/// How a reachability query treats the destination square.
///
/// `Move` is a real candidate move: a destination holding the mover's own
/// piece is rejected, and pawn advances are considered. `Attack` asks whether
/// the square is covered: own-occupied destinations count (the square is
/// defended) and pawns cover only their diagonal capture squares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReachMode {
    Move,
    Attack,
}

/// Result of an attempted move, surfaced to the turn loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    pub applied: bool,
    /// Square vacated by a captured piece. For en passant this is the
    /// victim's square, not the destination.
    pub capture: Option<Square>,
    pub en_passant: bool,
    pub promoted: Option<PieceKind>,
}

impl MoveOutcome {
    pub const fn rejected() -> Self {
        Self {
            applied: false,
            capture: None,
            en_passant: false,
            promoted: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_square() {
        assert_eq!(Square::parse("a1"), Some(Square::new_unchecked(0, 0)));
        assert_eq!(Square::parse("e4"), Some(Square::new_unchecked(3, 4)));
        assert_eq!(Square::parse("h8"), Some(Square::new_unchecked(7, 7)));
        assert_eq!(Square::parse("i1"), None);
        assert_eq!(Square::parse("a9"), None);
        assert_eq!(Square::parse("a10"), None);
        assert_eq!(Square::parse(""), None);
    }

    #[test]
    fn offset_respects_board_edge() {
        let corner = Square::new_unchecked(0, 0);
        assert_eq!(corner.offset(-1, 0), None);
        assert_eq!(corner.offset(0, -1), None);
        assert_eq!(corner.offset(1, 1), Some(Square::new_unchecked(1, 1)));
        assert_eq!(Square::new_unchecked(7, 7).offset(1, 0), None);
    }

    #[test]
    fn sliding_kinds() {
        assert!(PieceKind::Bishop.slides());
        assert!(PieceKind::Rook.slides());
        assert!(PieceKind::Queen.slides());
        assert!(!PieceKind::Pawn.slides());
        assert!(!PieceKind::Knight.slides());
        assert!(!PieceKind::King.slides());
    }

    #[test]
    fn opponent_flips() {
        assert_eq!(Color::White.opponent(), Color::Black);
        assert_eq!(Color::Black.opponent(), Color::White);
    }
}
