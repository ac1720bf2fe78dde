use crate::attacks::is_square_attacked;
use crate::errors::IllegalMoveError;
use crate::movegen::legal_moves;
use crate::types::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CastlingRights {
    pub wk: bool,
    pub wq: bool,
    pub bk: bool,
    pub bq: bool,
}

impl CastlingRights {
    pub const ALL: CastlingRights = CastlingRights {
        wk: true,
        wq: true,
        bk: true,
        bq: true,
    };

    pub const NONE: CastlingRights = CastlingRights {
        wk: false,
        wq: false,
        bk: false,
        bq: false,
    };

    pub fn kingside(&self, c: Color) -> bool {
        match c {
            Color::White => self.wk,
            Color::Black => self.bk,
        }
    }

    pub fn queenside(&self, c: Color) -> bool {
        match c {
            Color::White => self.wq,
            Color::Black => self.bq,
        }
    }

    fn revoke_all(&mut self, c: Color) {
        match c {
            Color::White => {
                self.wk = false;
                self.wq = false;
            }
            Color::Black => {
                self.bk = false;
                self.bq = false;
            }
        }
    }

    /// Drop whichever right depends on a rook standing on `sq`.
    fn revoke_rook_square(&mut self, sq: Square) {
        match sq {
            Square::A1 => self.wq = false,
            Square::H1 => self.wk = false,
            Square::A8 => self.bq = false,
            Square::H8 => self.bk = false,
            _ => {}
        }
    }
}

/// A complete chess position: placement plus all state needed to generate
/// moves and adjudicate draws.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    pub board: [Option<Piece>; 64],
    pub side_to_move: Color,
    pub castling: CastlingRights,
    /// Square skipped by a pawn that just advanced two ranks.
    pub en_passant: Option<Square>,
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}

impl Position {
    pub const STARTPOS_FEN: &'static str =
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    /// An empty board with White to move and no castling rights.
    pub fn empty() -> Self {
        Position {
            board: [None; 64],
            side_to_move: Color::White,
            castling: CastlingRights::NONE,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    pub fn startpos() -> Self {
        let mut p = Position {
            castling: CastlingRights::ALL,
            ..Position::empty()
        };

        let back = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for (f, &kind) in back.iter().enumerate() {
            p.board[8 + f] = Some(Piece::new(Color::White, PieceKind::Pawn));
            p.board[48 + f] = Some(Piece::new(Color::Black, PieceKind::Pawn));
            p.board[f] = Some(Piece::new(Color::White, kind));
            p.board[56 + f] = Some(Piece::new(Color::Black, kind));
        }
        p
    }

    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.board[sq.index()]
    }

    pub fn set_piece(&mut self, sq: Square, pc: Option<Piece>) {
        self.board[sq.index()] = pc;
    }

    /// Every occupied square with its piece, a1 first.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.piece_at(sq).map(|pc| (sq, pc)))
    }

    pub fn king_square(&self, c: Color) -> Option<Square> {
        self.pieces()
            .find(|(_, pc)| pc.color == c && pc.kind == PieceKind::King)
            .map(|(sq, _)| sq)
    }

    pub fn in_check(&self, c: Color) -> bool {
        match self.king_square(c) {
            Some(ksq) => is_square_attacked(self, ksq, c.other()),
            None => false,
        }
    }

    /// Material count in pawns, positive when White is ahead.
    pub fn material_balance(&self) -> i32 {
        self.pieces()
            .map(|(_, pc)| match pc.color {
                Color::White => pc.kind.value(),
                Color::Black => -pc.kind.value(),
            })
            .sum()
    }

    /// Apply a legal move and return the resulting position.
    ///
    /// The receiver is left untouched. Anything outside `legal_moves(self)`
    /// is rejected.
    pub fn apply_move(&self, mv: Move) -> Result<Position, IllegalMoveError> {
        if !legal_moves(self).contains(&mv) {
            return Err(IllegalMoveError {
                mv,
                fen: self.to_fen(),
            });
        }
        let mut next = self.clone();
        next.play_unchecked(mv);
        Ok(next)
    }

    /// Mechanically play `mv` without checking legality.
    ///
    /// The from-square must hold a piece; an empty from-square leaves the
    /// position unchanged.
    pub fn play_unchecked(&mut self, mv: Move) {
        let Some(moved) = self.piece_at(mv.from) else {
            return;
        };
        let mut captured = self.piece_at(mv.to);

        self.en_passant = None;

        if mv.kind == MoveKind::EnPassant {
            // The captured pawn sits behind the destination square.
            if let Some(cs) = mv.to.offset(0, -moved.color.forward()) {
                captured = self.piece_at(cs);
                self.set_piece(cs, None);
            }
        }

        self.set_piece(mv.from, None);
        self.set_piece(mv.to, Some(moved));

        if moved.kind == PieceKind::Pawn && mv.to.rank() == moved.color.other().back_rank() {
            let kind = mv.promotion.unwrap_or(PieceKind::Queen);
            self.set_piece(mv.to, Some(Piece::new(moved.color, kind)));
        }

        if let Some((rf, rt)) = castle_rook_squares(moved.color, mv.kind) {
            let rook = self.piece_at(rf);
            self.set_piece(rf, None);
            self.set_piece(rt, rook);
        }

        match moved.kind {
            PieceKind::King => self.castling.revoke_all(moved.color),
            PieceKind::Rook => self.castling.revoke_rook_square(mv.from),
            _ => {}
        }
        if let Some(cp) = captured {
            if cp.kind == PieceKind::Rook {
                self.castling.revoke_rook_square(mv.to);
            }
        }

        if mv.kind == MoveKind::DoublePawnPush {
            self.en_passant = mv.from.offset(0, moved.color.forward());
        }

        self.halfmove_clock = if moved.kind == PieceKind::Pawn || captured.is_some() {
            0
        } else {
            self.halfmove_clock + 1
        };

        if self.side_to_move == Color::Black {
            self.fullmove_number += 1;
        }
        self.side_to_move = self.side_to_move.other();
    }
}

/// Rook relocation (from, to) for a castling move of `c`.
pub(crate) fn castle_rook_squares(c: Color, kind: MoveKind) -> Option<(Square, Square)> {
    match (c, kind) {
        (Color::White, MoveKind::CastleKingside) => Some((Square::H1, Square::F1)),
        (Color::White, MoveKind::CastleQueenside) => Some((Square::A1, Square::D1)),
        (Color::Black, MoveKind::CastleKingside) => Some((Square::H8, Square::F8)),
        (Color::Black, MoveKind::CastleQueenside) => Some((Square::A8, Square::D8)),
        _ => None,
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
