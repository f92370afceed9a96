//! Error types for FEN parsing, board validation and move parsing.

use crate::color::Color;

/// Errors that occur when parsing a FEN string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FenError {
    /// Fewer than four or more than six space-separated fields.
    #[error("expected 4 to 6 FEN fields, found {found}")]
    WrongFieldCount { found: usize },
    #[error("expected 8 ranks in piece placement, found {found}")]
    WrongRankCount { found: usize },
    /// A rank describes more or fewer than 8 squares. `rank_index` 0 is the eighth rank.
    #[error("rank {rank_index} describes {length} squares, expected 8")]
    BadRankLength { rank_index: usize, length: usize },
    #[error("invalid piece character: '{character}'")]
    InvalidPieceChar { character: char },
    #[error("invalid active color: \"{found}\"")]
    InvalidColor { found: String },
    #[error("invalid castling character: '{character}'")]
    InvalidCastlingChar { character: char },
    #[error("invalid en passant square: \"{found}\"")]
    InvalidEnPassant { found: String },
    #[error("invalid {field}: \"{found}\"")]
    InvalidMoveCounter { field: &'static str, found: String },
    #[error("invalid board: {source}")]
    InvalidBoard {
        #[from]
        source: BoardError,
    },
}

/// Errors from structural validation of a [`Board`](crate::board::Board).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("expected 1 king for {color:?}, found {count}")]
    InvalidKingCount { color: Color, count: u32 },
    #[error("pawns found on back rank")]
    PawnsOnBackRank,
    /// The side not to move is in check.
    #[error("side not to move is in check")]
    OpponentInCheck,
}

/// Errors from resolving a coordinate-notation move against a position.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveParseError {
    #[error("malformed move: \"{0}\"")]
    Malformed(String),
    #[error("illegal move in this position: \"{0}\"")]
    Illegal(String),
}
