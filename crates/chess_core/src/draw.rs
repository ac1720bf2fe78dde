//! Draw rules that depend on the position alone.

use crate::board::Position;
use crate::types::{Color, PieceKind};

impl Position {
    /// Fifty full moves (100 plies) without a pawn move or capture.
    pub fn is_fifty_move_draw(&self) -> bool {
        self.halfmove_clock >= 100
    }

    /// Neither side can ever deliver mate.
    ///
    /// Covers king against king, a lone minor piece against a bare king, and
    /// any number of bishops where every bishop stands on the same square
    /// colour. Two knights are not treated as insufficient.
    pub fn is_insufficient_material(&self) -> bool {
        let mut minors = [0u8; 2];
        let mut knights = 0u8;
        let mut light_bishops = 0u8;
        let mut dark_bishops = 0u8;

        for (sq, pc) in self.pieces() {
            match pc.kind {
                PieceKind::King => {}
                PieceKind::Pawn | PieceKind::Rook | PieceKind::Queen => return false,
                PieceKind::Knight => {
                    knights += 1;
                    minors[pc.color.idx()] += 1;
                }
                PieceKind::Bishop => {
                    if sq.is_light() {
                        light_bishops += 1;
                    } else {
                        dark_bishops += 1;
                    }
                    minors[pc.color.idx()] += 1;
                }
            }
        }

        let total = minors[Color::White.idx()] + minors[Color::Black.idx()];
        if total <= 1 {
            return true;
        }
        // Only bishops left, all on one colour complex.
        knights == 0 && (light_bishops == 0 || dark_bishops == 0)
    }
}
