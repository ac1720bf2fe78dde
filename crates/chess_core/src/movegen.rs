use crate::attacks::{is_square_attacked, DIAGONALS, KING_OFFSETS, KNIGHT_OFFSETS, ORTHOGONALS};
use crate::board::Position;
use crate::types::*;

/// All legal moves for the side to move.
///
/// The result is a set: every move appears once and the order carries no
/// meaning.
pub fn legal_moves(pos: &Position) -> Vec<Move> {
    let mut out = Vec::with_capacity(64);
    legal_moves_into(pos, &mut out);
    out
}

/// Generate all legal moves into the provided buffer, reusing it across calls.
pub fn legal_moves_into(pos: &Position, out: &mut Vec<Move>) {
    out.clear();
    pseudo_moves(pos, out);

    let mover = pos.side_to_move;
    let mut scratch = pos.clone();
    out.retain(|&mv| {
        scratch.clone_from(pos);
        scratch.play_unchecked(mv);
        !scratch.in_check(mover)
    });
}

/// Legal moves of the piece standing on `from`.
pub fn legal_moves_from(pos: &Position, from: Square) -> Vec<Move> {
    let mut moves = legal_moves(pos);
    moves.retain(|mv| mv.from == from);
    moves
}

fn pseudo_moves(pos: &Position, out: &mut Vec<Move>) {
    for (sq, pc) in pos.pieces() {
        if pc.color != pos.side_to_move {
            continue;
        }
        match pc.kind {
            PieceKind::Pawn => gen_pawn(pos, sq, pc.color, out),
            PieceKind::Knight => gen_steps(pos, sq, pc.color, out, &KNIGHT_OFFSETS),
            PieceKind::Bishop => gen_slider(pos, sq, pc.color, out, &DIAGONALS),
            PieceKind::Rook => gen_slider(pos, sq, pc.color, out, &ORTHOGONALS),
            PieceKind::Queen => {
                gen_slider(pos, sq, pc.color, out, &DIAGONALS);
                gen_slider(pos, sq, pc.color, out, &ORTHOGONALS);
            }
            PieceKind::King => {
                gen_steps(pos, sq, pc.color, out, &KING_OFFSETS);
                gen_castle(pos, sq, pc.color, out);
            }
        }
    }
}

fn push_pawn_move(from: Square, to: Square, c: Color, out: &mut Vec<Move>) {
    if to.rank() == c.other().back_rank() {
        for pk in PieceKind::PROMOTIONS {
            out.push(Move::promoting(from, to, pk));
        }
    } else {
        out.push(Move::new(from, to));
    }
}

fn gen_pawn(pos: &Position, from: Square, c: Color, out: &mut Vec<Move>) {
    let dir = c.forward();
    let start_rank = match c {
        Color::White => 1,
        Color::Black => 6,
    };

    if let Some(to) = from.offset(0, dir) {
        if pos.piece_at(to).is_none() {
            push_pawn_move(from, to, c, out);

            if from.rank() == start_rank {
                if let Some(to2) = to.offset(0, dir) {
                    if pos.piece_at(to2).is_none() {
                        out.push(Move::with_kind(from, to2, MoveKind::DoublePawnPush));
                    }
                }
            }
        }
    }

    for df in [-1, 1] {
        let Some(to) = from.offset(df, dir) else {
            continue;
        };
        match pos.piece_at(to) {
            Some(tpc) if tpc.color != c => push_pawn_move(from, to, c, out),
            Some(_) => {}
            None if pos.en_passant == Some(to) => {
                out.push(Move::with_kind(from, to, MoveKind::EnPassant));
            }
            None => {}
        }
    }
}

fn gen_steps(pos: &Position, from: Square, c: Color, out: &mut Vec<Move>, deltas: &[(i8, i8)]) {
    for &(df, dr) in deltas {
        if let Some(to) = from.offset(df, dr) {
            match pos.piece_at(to) {
                Some(pc) if pc.color == c => {}
                _ => out.push(Move::new(from, to)),
            }
        }
    }
}

fn gen_slider(pos: &Position, from: Square, c: Color, out: &mut Vec<Move>, dirs: &[(i8, i8)]) {
    for &(df, dr) in dirs {
        let mut cur = from.offset(df, dr);
        while let Some(to) = cur {
            match pos.piece_at(to) {
                None => out.push(Move::new(from, to)),
                Some(pc) if pc.color != c => {
                    out.push(Move::new(from, to));
                    break;
                }
                _ => break,
            }
            cur = to.offset(df, dr);
        }
    }
}

fn gen_castle(pos: &Position, from: Square, c: Color, out: &mut Vec<Move>) {
    let rank = c.back_rank();
    let home = |file: u8| Square::at(file, rank);
    if from != home(4) {
        return;
    }
    // Castling out of check is never allowed.
    if pos.in_check(c) {
        return;
    }

    let enemy = c.other();
    let own_rook = Some(Piece::new(c, PieceKind::Rook));
    let empty = |files: &[u8]| files.iter().all(|&f| pos.piece_at(home(f)).is_none());
    let safe = |files: &[u8]| {
        files
            .iter()
            .all(|&f| !is_square_attacked(pos, home(f), enemy))
    };

    // King side: e->g, f and g empty and unattacked.
    if pos.castling.kingside(c)
        && pos.piece_at(home(7)) == own_rook
        && empty(&[5, 6])
        && safe(&[5, 6])
    {
        out.push(Move::with_kind(from, home(6), MoveKind::CastleKingside));
    }
    // Queen side: e->c, b, c and d empty; only c and d need be unattacked.
    if pos.castling.queenside(c)
        && pos.piece_at(home(0)) == own_rook
        && empty(&[1, 2, 3])
        && safe(&[2, 3])
    {
        out.push(Move::with_kind(from, home(2), MoveKind::CastleQueenside));
    }
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;
