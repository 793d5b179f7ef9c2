//! Screen geometry for the board: where cells and the restart button sit,
//! and which cell a pointer position falls into.

use ratatui::layout::{Position, Rect};

use super::state::SIZE;

/// One cell in terminal characters. Twice as wide as tall looks square.
pub const CELL_WIDTH: u16 = 11;
pub const CELL_HEIGHT: u16 = 5;
pub const BOARD_WIDTH: u16 = CELL_WIDTH * SIZE as u16;
pub const BOARD_HEIGHT: u16 = CELL_HEIGHT * SIZE as u16;
pub const HEADER_HEIGHT: u16 = 3;
pub const BUTTON_WIDTH: u16 = 15;
pub const BUTTON_HEIGHT: u16 = 3;
const GAP: u16 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BoardLayout {
    pub header: Rect,
    pub board: Rect,
    pub restart: Rect,
}

impl BoardLayout {
    /// Centers header, board and restart button inside `area`. Anything that
    /// does not fit is clipped to `area`.
    pub fn new(area: Rect) -> Self {
        let total = HEADER_HEIGHT + BOARD_HEIGHT + GAP + BUTTON_HEIGHT;
        let top = area.y + area.height.saturating_sub(total) / 2;
        let board_x = area.x + area.width.saturating_sub(BOARD_WIDTH) / 2;

        let header = Rect::new(area.x, top, area.width, HEADER_HEIGHT);
        let board = Rect::new(board_x, top + HEADER_HEIGHT, BOARD_WIDTH, BOARD_HEIGHT);
        let restart = Rect::new(
            area.x + area.width.saturating_sub(BUTTON_WIDTH) / 2,
            board.bottom() + GAP,
            BUTTON_WIDTH,
            BUTTON_HEIGHT,
        );

        Self {
            header: header.intersection(area),
            board: board.intersection(area),
            restart: restart.intersection(area),
        }
    }

    pub fn cell_rect(&self, row: usize, col: usize) -> Rect {
        let cell = Rect::new(
            self.board.x + col as u16 * CELL_WIDTH,
            self.board.y + row as u16 * CELL_HEIGHT,
            CELL_WIDTH,
            CELL_HEIGHT,
        );
        cell.intersection(self.board)
    }

    /// Grid cell under the pointer, by integer division of the offset from
    /// the board origin.
    pub fn cell_at(&self, x: u16, y: u16) -> Option<(usize, usize)> {
        if !self.board.contains(Position::new(x, y)) {
            return None;
        }
        let row = ((y - self.board.y) / CELL_HEIGHT) as usize;
        let col = ((x - self.board.x) / CELL_WIDTH) as usize;
        (row < SIZE && col < SIZE).then_some((row, col))
    }

    pub fn restart_hit(&self, x: u16, y: u16) -> bool {
        self.restart.contains(Position::new(x, y))
    }

    /// Middle of the board, in terminal coordinates.
    pub fn center(&self) -> (f32, f32) {
        (
            self.board.x as f32 + self.board.width as f32 / 2.0,
            self.board.y as f32 + self.board.height as f32 / 2.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn board_is_centered() {
        let layout = BoardLayout::new(Rect::new(0, 0, 80, 24));
        assert_eq!(layout.board, Rect::new(23, 4, 33, 15));
        assert_eq!(layout.header, Rect::new(0, 1, 80, 3));
        assert_eq!(layout.restart, Rect::new(32, 20, 15, 3));
    }

    #[test]
    fn pointer_maps_by_integer_division() {
        let layout = BoardLayout::new(Rect::new(0, 0, 80, 24));
        assert_eq!(layout.cell_at(23, 4), Some((0, 0)));
        assert_eq!(layout.cell_at(33, 8), Some((0, 0)));
        assert_eq!(layout.cell_at(34, 9), Some((1, 1)));
        assert_eq!(layout.cell_at(55, 18), Some((2, 2)));
        assert_eq!(layout.cell_at(56, 18), None);
        assert_eq!(layout.cell_at(22, 4), None);
        assert_eq!(layout.cell_at(30, 3), None);
    }

    #[test]
    fn cell_rects_tile_the_board() {
        let layout = BoardLayout::new(Rect::new(0, 0, 80, 24));
        assert_eq!(layout.cell_rect(0, 0), Rect::new(23, 4, 11, 5));
        assert_eq!(layout.cell_rect(2, 1), Rect::new(34, 14, 11, 5));
    }

    #[test]
    fn restart_button_hit_test() {
        let layout = BoardLayout::new(Rect::new(0, 0, 80, 24));
        assert!(layout.restart_hit(32, 20));
        assert!(layout.restart_hit(46, 22));
        assert!(!layout.restart_hit(47, 22));
        assert!(!layout.restart_hit(40, 19));
    }

    #[test]
    fn tiny_terminal_clips_everything() {
        let area = Rect::new(0, 0, 20, 10);
        let layout = BoardLayout::new(area);
        assert!(area.contains(Position::new(layout.board.x, layout.board.y)));
        assert!(layout.board.right() <= area.right());
        assert!(layout.restart.is_empty());
    }
}
