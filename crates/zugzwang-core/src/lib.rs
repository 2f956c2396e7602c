pub mod board;
pub mod constants;
pub mod game;
pub mod movegen;
pub mod pieces;
pub mod position;
pub mod snapshot;
pub mod types;

pub use board::{Board, BoardError};
pub use constants::SQUARES;
pub use game::Chess;
pub use pieces::{PieceState, Player};
pub use position::{HistoryEntry, Position, PositionError};
pub use snapshot::{PieceSnapshot, Snapshot, SnapshotError, SNAPSHOT_VERSION};
pub use types::{CastleSide, Color, MoveOutcome, PieceId, PieceKind, ReachMode, Square};
