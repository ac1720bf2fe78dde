//! Forsyth-Edwards Notation, the canonical text form of a [`Position`].
//!
//! This is also what the engine bridge sends over `position fen ...`.

use std::fmt::Write;

use crate::board::{CastlingRights, Position};
use crate::errors::FenError;
use crate::types::*;

impl Position {
    /// Parse a FEN string. The halfmove and fullmove fields are optional and
    /// default to `0` and `1`.
    pub fn from_fen(fen: &str) -> Result<Position, FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.len() < 4 {
            return Err(FenError::MissingFields(parts.len()));
        }

        let mut pos = Position::empty();

        let ranks: Vec<&str> = parts[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::RankCount(ranks.len()));
        }
        for (rank_idx, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - rank_idx as u8; // FEN lists rank 8 .. 1
            let mut file: u8 = 0;
            for ch in rank_str.chars() {
                if let Some(d) = ch.to_digit(10) {
                    if d == 0 || d > 8 {
                        return Err(FenError::RankWidth { rank: rank + 1 });
                    }
                    file += d as u8;
                } else {
                    let pc = Piece::from_char(ch).ok_or(FenError::InvalidPiece(ch))?;
                    if file >= 8 {
                        return Err(FenError::RankWidth { rank: rank + 1 });
                    }
                    pos.set_piece(Square::at(file, rank), Some(pc));
                    file += 1;
                }
                if file > 8 {
                    return Err(FenError::RankWidth { rank: rank + 1 });
                }
            }
            if file != 8 {
                return Err(FenError::RankWidth { rank: rank + 1 });
            }
        }

        for c in [Color::White, Color::Black] {
            let kings = pos
                .pieces()
                .filter(|(_, pc)| *pc == Piece::new(c, PieceKind::King))
                .count();
            if kings != 1 {
                return Err(FenError::KingCount);
            }
        }

        pos.side_to_move = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(FenError::InvalidSideToMove(other.to_string())),
        };

        pos.castling = parse_castling(parts[2])?;

        pos.en_passant = match parts[3] {
            "-" => None,
            s => {
                let sq: Square = s
                    .parse()
                    .map_err(|_| FenError::InvalidEnPassant(s.to_string()))?;
                if !pos.can_be_en_passant_target(sq) {
                    return Err(FenError::InvalidEnPassant(s.to_string()));
                }
                Some(sq)
            }
        };

        pos.halfmove_clock = parse_counter(parts.get(4).copied().unwrap_or("0"))?;
        pos.fullmove_number = parse_counter(parts.get(5).copied().unwrap_or("1"))?;

        if pos.in_check(pos.side_to_move.other()) {
            return Err(FenError::OpponentInCheck(pos.side_to_move.other()));
        }

        Ok(pos)
    }

    /// An en passant target sits on the third rank from the side that just
    /// moved, empty, with that side's pawn directly in front of it.
    fn can_be_en_passant_target(&self, sq: Square) -> bool {
        let mover = self.side_to_move;
        let pusher = mover.other();
        let expected_rank = match mover {
            Color::White => 5,
            Color::Black => 2,
        };
        if sq.rank() != expected_rank || self.piece_at(sq).is_some() {
            return false;
        }
        sq.offset(0, pusher.forward())
            .and_then(|pawn_sq| self.piece_at(pawn_sq))
            == Some(Piece::new(pusher, PieceKind::Pawn))
    }

    pub fn to_fen(&self) -> String {
        let mut fen = String::with_capacity(90);
        for rank in (0..8u8).rev() {
            let mut empty = 0;
            for file in 0..8u8 {
                match self.piece_at(Square::at(file, rank)) {
                    Some(pc) => {
                        if empty > 0 {
                            let _ = write!(fen, "{empty}");
                            empty = 0;
                        }
                        fen.push(pc.to_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                let _ = write!(fen, "{empty}");
            }
            if rank > 0 {
                fen.push('/');
            }
        }

        fen.push(' ');
        fen.push(match self.side_to_move {
            Color::White => 'w',
            Color::Black => 'b',
        });

        fen.push(' ');
        let rights = [
            (self.castling.wk, 'K'),
            (self.castling.wq, 'Q'),
            (self.castling.bk, 'k'),
            (self.castling.bq, 'q'),
        ];
        if rights.iter().any(|(on, _)| *on) {
            fen.extend(rights.iter().filter(|(on, _)| *on).map(|(_, c)| *c));
        } else {
            fen.push('-');
        }

        match self.en_passant {
            Some(sq) => {
                let _ = write!(fen, " {sq}");
            }
            None => fen.push_str(" -"),
        }

        let _ = write!(fen, " {} {}", self.halfmove_clock, self.fullmove_number);
        fen
    }
}

fn parse_castling(field: &str) -> Result<CastlingRights, FenError> {
    let mut castling = CastlingRights::NONE;
    if field == "-" {
        return Ok(castling);
    }
    for c in field.chars() {
        match c {
            'K' => castling.wk = true,
            'Q' => castling.wq = true,
            'k' => castling.bk = true,
            'q' => castling.bq = true,
            _ => return Err(FenError::InvalidCastling(field.to_string())),
        }
    }
    Ok(castling)
}

fn parse_counter(field: &str) -> Result<u32, FenError> {
    field
        .parse()
        .map_err(|_| FenError::InvalidCounter(field.to_string()))
}

#[cfg(test)]
#[path = "fen_tests.rs"]
mod fen_tests;
