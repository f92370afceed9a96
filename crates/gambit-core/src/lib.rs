//! Core chess types: board representation, move generation, and game rules.

mod bitboard;
mod board;
mod castle_rights;
mod chess_move;
mod color;
mod error;
mod fen;
mod make_move;
mod movegen;
mod perft;
mod piece;
mod position;
mod square;
mod zobrist;

pub use bitboard::Bitboard;
pub use board::Board;
pub use castle_rights::{CastleRights, CastleSide};
pub use chess_move::{MAX_MOVES, Move, MoveFlag, MoveList};
pub use color::Color;
pub use error::{BoardError, FenError, MoveParseError};
pub use perft::{divide, perft};
pub use piece::{Piece, PieceKind};
pub use position::Position;
pub use square::Square;

/// FEN of the standard starting position.
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
