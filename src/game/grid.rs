use std::fmt;

use serde::{Deserialize, Serialize};

use super::state::Position;

/// Number of distinct cell tags
pub const CELL_KINDS: usize = 5;

/// Tag stored in every grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    Wall,
    Food,
    SnakeHead,
    SnakeBody,
}

impl Cell {
    /// Integer tag used by flat observations
    pub fn code(self) -> u8 {
        match self {
            Cell::Empty => 0,
            Cell::Wall => 1,
            Cell::Food => 2,
            Cell::SnakeHead => 3,
            Cell::SnakeBody => 4,
        }
    }

    fn symbol(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Wall => '#',
            Cell::Food => '*',
            Cell::SnakeHead => '@',
            Cell::SnakeBody => 'o',
        }
    }
}

/// Square grid of cell tags, stored column by column (index = x * size + y)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    size: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create an empty grid surrounded by walls
    pub fn new(size: usize) -> Self {
        let mut cells = vec![Cell::Empty; size * size];
        for y in 0..size {
            for x in 0..size {
                if x == 0 || y == 0 || x == size - 1 || y == size - 1 {
                    cells[x * size + y] = Cell::Wall;
                }
            }
        }
        Self { size, cells }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// All cells, column by column
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Linear index of a position, `None` when off the grid
    pub fn index_of(&self, pos: Position) -> Option<usize> {
        let size = self.size as i32;
        if pos.x < 0 || pos.y < 0 || pos.x >= size || pos.y >= size {
            return None;
        }
        Some(pos.x as usize * self.size + pos.y as usize)
    }

    pub fn position_of(&self, index: usize) -> Position {
        Position::new((index / self.size) as i32, (index % self.size) as i32)
    }

    pub fn get(&self, pos: Position) -> Option<Cell> {
        self.index_of(pos).map(|idx| self.cells[idx])
    }

    pub(crate) fn set(&mut self, pos: Position, cell: Cell) {
        if let Some(idx) = self.index_of(pos) {
            self.cells[idx] = cell;
        }
    }

    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|&&c| c == cell).count()
    }

    /// Scan forward from `start`, wrapping once around the grid,
    /// and return the first empty cell
    pub fn find_empty_from(&self, start: usize) -> Option<Position> {
        let total = self.cells.len();
        (0..total)
            .map(|offset| (start + offset) % total)
            .find(|&idx| self.cells[idx] == Cell::Empty)
            .map(|idx| self.position_of(idx))
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.size {
            let line: String = (0..self.size)
                .map(|x| self.cells[x * self.size + y].symbol())
                .collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
