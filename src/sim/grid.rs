//! Discrete board geometry
//!
//! Positions are pixel coordinates that are always multiples of the cell
//! size, so they can be handed straight to a renderer.

use glam::IVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A grid-aligned cell (top-left corner, in pixels)
pub type Position = IVec2;

/// Cardinal travel direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Velocity of one cell along this direction
    pub fn delta(self, cell: i32) -> IVec2 {
        match self {
            Direction::Up => IVec2::new(0, -cell),
            Direction::Down => IVec2::new(0, cell),
            Direction::Left => IVec2::new(-cell, 0),
            Direction::Right => IVec2::new(cell, 0),
        }
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    /// True if turning from `self` to `other` changes the axis of travel
    pub fn is_perpendicular(self, other: Direction) -> bool {
        self.is_horizontal() != other.is_horizontal()
    }
}

/// Board dimensions and cell size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    pub width: i32,
    pub height: i32,
    pub cell: i32,
}

impl Grid {
    pub fn new(width: i32, height: i32, cell: i32) -> Self {
        Self {
            width,
            height,
            cell,
        }
    }

    pub fn cols(&self) -> i32 {
        self.width / self.cell
    }

    pub fn rows(&self) -> i32 {
        self.height / self.cell
    }

    pub fn cell_count(&self) -> usize {
        (self.cols().max(0) * self.rows().max(0)) as usize
    }

    pub fn is_in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }

    /// Uniformly random cell inside the board
    pub fn random_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> Position {
        IVec2::new(
            rng.random_range(0..self.cols()) * self.cell,
            rng.random_range(0..self.rows()) * self.cell,
        )
    }

    /// All cells in row-major order
    pub fn cells(self) -> impl Iterator<Item = Position> {
        let (cols, cell) = (self.cols(), self.cell);
        (0..self.rows()).flat_map(move |row| (0..cols).map(move |col| IVec2::new(col, row) * cell))
    }
}
