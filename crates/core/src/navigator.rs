//! Directional focus movement over a 1-D list of cells laid out as a grid.
//!
//! The column count is a step function of viewport width and is recomputed on
//! every directional command. Moves that would leave `[0, len)` are ignored; there
//! is no wraparound and no clamping.

use tracing::trace;

/// Directional input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// One row up.
    Up,
    /// One row down.
    Down,
    /// Previous cell.
    Left,
    /// Next cell.
    Right,
}

impl Direction {
    /// All four directions.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Parse a direction name (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "up" => Some(Direction::Up),
            "down" => Some(Direction::Down),
            "left" => Some(Direction::Left),
            "right" => Some(Direction::Right),
            _ => None,
        }
    }
}

/// Column count for a viewport `width` in pixels.
pub fn columns_for(width: u32) -> usize {
    match width {
        0..=280 => 3,
        281..=360 => 4,
        361..=480 => 6,
        _ => 9,
    }
}

/// Next focus index, or `None` when the move would leave the grid.
///
/// Returns `None` as well when `current` is not inside `[0, len)` or `columns` is zero.
pub fn next_index(
    current: usize,
    direction: Direction,
    columns: usize,
    len: usize,
) -> Option<usize> {
    if current >= len || columns == 0 {
        return None;
    }

    let target = match direction {
        Direction::Right => current.checked_add(1),
        Direction::Left => current.checked_sub(1),
        Direction::Down => current.checked_add(columns),
        Direction::Up => current.checked_sub(columns),
    }?;

    (target < len).then_some(target)
}

/// Focus state over `len` cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusGrid {
    len: usize,
    focus: Option<usize>,
}

impl FocusGrid {
    /// Grid over `len` cells, focused on cell 0 when any cell exists.
    pub fn new(len: usize) -> Self {
        Self {
            len,
            focus: (len > 0).then_some(0),
        }
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the grid has no cells.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Focused cell, `None` only for an empty grid.
    pub fn focused(&self) -> Option<usize> {
        self.focus
    }

    /// Move focus for a viewport of `width` pixels.
    ///
    /// Returns the new focus when it changed, `None` for an ignored move.
    pub fn move_focus(&mut self, direction: Direction, width: u32) -> Option<usize> {
        let current = self.focus?;
        let columns = columns_for(width);
        let next = next_index(current, direction, columns, self.len)?;
        trace!(from = current, to = next, columns, ?direction, "focus moved");
        self.focus = Some(next);
        Some(next)
    }

    /// Focus a specific cell. Out-of-range cells are ignored.
    pub fn set_focus(&mut self, cell: usize) -> bool {
        if cell >= self.len {
            return false;
        }
        self.focus = Some(cell);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_breakpoints() {
        assert_eq!(columns_for(0), 3);
        assert_eq!(columns_for(280), 3);
        assert_eq!(columns_for(281), 4);
        assert_eq!(columns_for(360), 4);
        assert_eq!(columns_for(361), 6);
        assert_eq!(columns_for(480), 6);
        assert_eq!(columns_for(481), 9);
        assert_eq!(columns_for(u32::MAX), 9);
    }

    #[test]
    fn vertical_moves_in_four_column_grid() {
        assert_eq!(next_index(1, Direction::Down, 4, 12), Some(5));
        assert_eq!(next_index(5, Direction::Up, 4, 12), Some(1));
        assert_eq!(next_index(1, Direction::Up, 4, 12), None);
        assert_eq!(next_index(9, Direction::Down, 4, 12), None);
    }

    #[test]
    fn horizontal_moves_do_not_wrap() {
        assert_eq!(next_index(0, Direction::Left, 4, 12), None);
        assert_eq!(next_index(11, Direction::Right, 4, 12), None);
        // Row ends flow into the neighbouring row; only the grid ends stop.
        assert_eq!(next_index(3, Direction::Right, 4, 12), Some(4));
        assert_eq!(next_index(4, Direction::Left, 4, 12), Some(3));
    }

    #[test]
    fn partial_last_row_blocks_down() {
        // 10 cells in 4 columns: last row holds 8 and 9.
        assert_eq!(next_index(5, Direction::Down, 4, 10), Some(9));
        assert_eq!(next_index(6, Direction::Down, 4, 10), None);
    }

    #[test]
    fn invalid_inputs_never_move() {
        assert_eq!(next_index(0, Direction::Right, 4, 0), None);
        assert_eq!(next_index(12, Direction::Left, 4, 12), None);
        assert_eq!(next_index(3, Direction::Down, 0, 12), None);
    }

    #[test]
    fn direction_names_parse() {
        assert_eq!(Direction::parse("Up"), Some(Direction::Up));
        assert_eq!(Direction::parse("RIGHT"), Some(Direction::Right));
        assert_eq!(Direction::parse("north"), None);
    }

    #[test]
    fn focus_grid_starts_at_zero() {
        assert_eq!(FocusGrid::new(12).focused(), Some(0));
    }

    #[test]
    fn empty_focus_grid_ignores_everything() {
        let mut grid = FocusGrid::new(0);
        assert!(grid.is_empty());
        assert_eq!(grid.focused(), None);
        for direction in Direction::ALL {
            assert_eq!(grid.move_focus(direction, 1024), None);
        }
        assert!(!grid.set_focus(0));
        assert_eq!(grid.focused(), None);
    }

    #[test]
    fn focus_grid_uses_width_at_move_time() {
        let mut grid = FocusGrid::new(37);
        assert_eq!(grid.move_focus(Direction::Down, 1024), Some(9));
        // Narrow viewport: 3 columns.
        assert_eq!(grid.move_focus(Direction::Down, 200), Some(12));
        assert_eq!(grid.move_focus(Direction::Up, 300), Some(8));
        assert_eq!(grid.move_focus(Direction::Up, 1024), None);
        assert_eq!(grid.focused(), Some(8));
    }
}
