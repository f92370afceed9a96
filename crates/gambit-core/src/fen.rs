//! FEN parsing (`FromStr`) and serialization (`Display`) for [`Board`].

use std::fmt;
use std::str::FromStr;

use crate::board::Board;
use crate::castle_rights::CastleRights;
use crate::color::Color;
use crate::error::FenError;
use crate::piece::{Piece, PieceKind};
use crate::square::Square;

impl FromStr for Board {
    type Err = FenError;

    /// Parse a FEN string. The two move counters may be omitted.
    fn from_str(fen: &str) -> Result<Board, FenError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if !(4..=6).contains(&fields.len()) {
            return Err(FenError::WrongFieldCount { found: fields.len() });
        }

        let mut board = Board::empty();
        parse_placement(fields[0], &mut board)?;

        let side_to_move = match fields[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => {
                return Err(FenError::InvalidColor {
                    found: other.to_string(),
                });
            }
        };
        let castling = CastleRights::from_fen(fields[2])?;
        let en_passant = match fields[3] {
            "-" => None,
            text => Some(parse_en_passant(text, side_to_move, &board)?),
        };
        let halfmove_clock = parse_counter(fields.get(4).copied(), "halfmove clock", 0)?;
        let fullmove_number = parse_counter(fields.get(5).copied(), "fullmove number", 1)?;

        board.set_state(side_to_move, castling, en_passant, halfmove_clock, fullmove_number.max(1));
        board.validate()?;
        Ok(board)
    }
}

fn parse_placement(placement: &str, board: &mut Board) -> Result<(), FenError> {
    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::WrongRankCount { found: ranks.len() });
    }
    for (rank_index, rank_text) in ranks.iter().enumerate() {
        let rank = 7 - rank_index as u8;
        let mut file = 0usize;
        for c in rank_text.chars() {
            if let Some(skip) = c.to_digit(10).filter(|d| (1..=8).contains(d)) {
                file += skip as usize;
                continue;
            }
            let piece = Piece::from_fen_char(c).ok_or(FenError::InvalidPieceChar { character: c })?;
            if file < 8 {
                board.put_piece(Square::new(file as u8, rank), piece);
            }
            file += 1;
        }
        if file != 8 {
            return Err(FenError::BadRankLength {
                rank_index,
                length: file,
            });
        }
    }
    Ok(())
}

/// The target must be empty, on the pushing side's third rank, with the
/// pushed pawn right behind it.
fn parse_en_passant(text: &str, side_to_move: Color, board: &Board) -> Result<Square, FenError> {
    let invalid = || FenError::InvalidEnPassant {
        found: text.to_string(),
    };
    let target = Square::from_algebraic(text).ok_or_else(invalid)?;
    let (target_rank, pawn_rank) = match side_to_move {
        Color::White => (5, 4),
        Color::Black => (2, 3),
    };
    let pushed = Piece::new(!side_to_move, PieceKind::Pawn);
    if target.rank() != target_rank
        || board.piece_on(target).is_some()
        || board.piece_on(Square::new(target.file(), pawn_rank)) != Some(pushed)
    {
        return Err(invalid());
    }
    Ok(target)
}

fn parse_counter(field: Option<&str>, name: &'static str, default: u16) -> Result<u16, FenError> {
    match field {
        None => Ok(default),
        Some(text) => text.parse().map_err(|_| FenError::InvalidMoveCounter {
            field: name,
            found: text.to_string(),
        }),
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8u8).rev() {
            let mut empty = 0;
            for file in 0..8u8 {
                match self.piece_on(Square::new(file, rank)) {
                    Some(piece) => {
                        if empty > 0 {
                            write!(f, "{empty}")?;
                            empty = 0;
                        }
                        write!(f, "{}", piece.fen_char())?;
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                write!(f, "{empty}")?;
            }
            if rank > 0 {
                f.write_str("/")?;
            }
        }
        write!(f, " {} {} ", self.side_to_move(), self.castling())?;
        match self.en_passant() {
            Some(sq) => write!(f, "{sq}")?,
            None => f.write_str("-")?,
        }
        write!(f, " {} {}", self.halfmove_clock(), self.fullmove_number())
    }
}
