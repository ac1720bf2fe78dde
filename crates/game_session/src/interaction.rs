//! Turns raw pointer events into session inputs and exposes what a board
//! renderer should highlight.

use chess_core::{Move, Square};

use crate::session::{Input, Session};

/// Pointer activity reported by the host. `None` is a point off the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEvent {
    /// Button pressed; a drag may follow.
    PickUp(Option<Square>),
    /// Pointer moved with the button held.
    Drag(Option<Square>),
    /// Button released.
    Release(Option<Square>),
    /// Press and release reported as one event by hosts without drag support.
    Click(Option<Square>),
}

#[derive(Debug, Default)]
pub struct InteractionAdapter {
    held: Option<Square>,
    /// The held square was already the selection when it was pressed.
    held_was_selected: bool,
    dragged: bool,
}

impl InteractionAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Square under a pressed button, if any.
    pub fn held(&self) -> Option<Square> {
        self.held
    }

    pub fn is_dragging(&self) -> bool {
        self.held.is_some() && self.dragged
    }

    pub fn translate(&mut self, event: PointerEvent, session: &Session) -> Option<Input> {
        match event {
            PointerEvent::PickUp(None) => {
                self.reset();
                session.selected().map(|_| Input::Deselect)
            }
            PointerEvent::PickUp(Some(sq)) => {
                self.held = Some(sq);
                self.dragged = false;
                self.held_was_selected = session.selected() == Some(sq);
                // Pressing the selection again is decided on release
                (!self.held_was_selected).then_some(Input::Select(sq))
            }
            PointerEvent::Drag(at) => {
                if self.held.is_some() && at != self.held {
                    self.dragged = true;
                }
                None
            }
            PointerEvent::Release(at) => {
                let held = self.held.take();
                let dragged = std::mem::take(&mut self.dragged);
                let was_selected = std::mem::take(&mut self.held_was_selected);
                let held = held?;
                match at {
                    None => session.selected().map(|_| Input::Deselect),
                    Some(sq) if sq == held => {
                        if dragged {
                            session.selected().map(|_| Input::Deselect)
                        } else if was_selected {
                            // Second click on the selected piece
                            Some(Input::Select(sq))
                        } else {
                            None
                        }
                    }
                    // Drop on another square: only meaningful if the
                    // pick-up left the held piece selected
                    Some(sq) => (session.selected() == Some(held)).then_some(Input::Select(sq)),
                }
            }
            PointerEvent::Click(Some(sq)) => {
                self.reset();
                Some(Input::Select(sq))
            }
            PointerEvent::Click(None) => {
                self.reset();
                Some(Input::Deselect)
            }
        }
    }

    fn reset(&mut self) {
        self.held = None;
        self.held_was_selected = false;
        self.dragged = false;
    }
}

/// Squares a renderer marks on top of the position.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Highlights {
    pub selected: Option<Square>,
    pub destinations: Vec<Square>,
    pub last_move: Option<Move>,
    /// King of the side to move when it stands in check.
    pub checked_king: Option<Square>,
}

impl Highlights {
    pub fn is_destination(&self, sq: Square) -> bool {
        self.destinations.contains(&sq)
    }

    pub fn is_last_move(&self, sq: Square) -> bool {
        self.last_move.is_some_and(|m| m.from == sq || m.to == sq)
    }
}

/// Marks for the position on display, which is a past one while the session
/// is browsing its history.
pub fn highlights(session: &Session) -> Highlights {
    let position = session.viewed_position();
    let to_move = position.side_to_move;
    Highlights {
        selected: session.selected(),
        destinations: session.destinations().to_vec(),
        last_move: session.viewed_last_move(),
        checked_king: if position.in_check(to_move) {
            position.king_square(to_move)
        } else {
            None
        },
    }
}

/// Where the board is drawn, in the host's pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoardGeometry {
    pub origin_x: f32,
    pub origin_y: f32,
    pub square_size: f32,
}

impl BoardGeometry {
    pub fn new(origin_x: f32, origin_y: f32, square_size: f32) -> Self {
        BoardGeometry {
            origin_x,
            origin_y,
            square_size,
        }
    }

    pub fn board_size(&self) -> f32 {
        self.square_size * 8.0
    }
}

/// Square under the point `(x, y)`, with y growing downwards. Unflipped
/// boards show rank 8 at the top and the a-file on the left.
pub fn square_at(x: f32, y: f32, geometry: BoardGeometry, flipped: bool) -> Option<Square> {
    if geometry.square_size <= 0.0 {
        return None;
    }
    let col = ((x - geometry.origin_x) / geometry.square_size).floor();
    let row = ((y - geometry.origin_y) / geometry.square_size).floor();
    if !(0.0..8.0).contains(&col) || !(0.0..8.0).contains(&row) {
        return None;
    }
    let (col, row) = (col as i8, row as i8);
    if flipped {
        Square::new(7 - col, row)
    } else {
        Square::new(col, 7 - row)
    }
}

/// Top-left pixel of `sq`; the inverse of [`square_at`].
pub fn square_origin(sq: Square, geometry: BoardGeometry, flipped: bool) -> (f32, f32) {
    let (file, rank) = (sq.file() as f32, sq.rank() as f32);
    let (col, row) = if flipped {
        (7.0 - file, rank)
    } else {
        (file, 7.0 - rank)
    };
    (
        geometry.origin_x + col * geometry.square_size,
        geometry.origin_y + row * geometry.square_size,
    )
}

#[cfg(test)]
#[path = "interaction_tests.rs"]
mod interaction_tests;
