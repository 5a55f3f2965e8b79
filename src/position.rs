// Grid positions and movement arithmetic
//
// A Position is a cell index on a width x height grid. Dimensions may be unknown
// for a bare index; any geometric operation then borrows them from the other
// operand, and fails if neither side knows them.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::StrategyError;
use crate::types::{ActionSet, Move};

/// Width and height of a rectangular maze
///
/// Only built through `GridSize::new`, so the cell count always fits in `usize`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridSize {
    width: usize,
    height: usize,
    cells: usize,
}

impl GridSize {
    /// Validates raw dimensions coming from the host
    pub fn new(width: i64, height: i64) -> Result<Self, StrategyError> {
        let invalid = StrategyError::InvalidGridSize { width, height };
        if width <= 0 || height <= 0 {
            return Err(invalid);
        }
        let (w, h) = match (usize::try_from(width), usize::try_from(height)) {
            (Ok(w), Ok(h)) => (w, h),
            _ => return Err(invalid),
        };
        let cells = w.checked_mul(h).ok_or(invalid)?;
        Ok(GridSize {
            width: w,
            height: h,
            cells,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cells(&self) -> usize {
        self.cells
    }
}

impl fmt::Display for GridSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// One cell of the maze. Equality and hashing look at the index only.
#[derive(Debug, Clone, Copy)]
pub struct Position {
    index: usize,
    grid: Option<GridSize>,
}

impl PartialEq for Position {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl Eq for Position {}

impl Hash for Position {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.index.hash(state);
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.coordinates() {
            Ok((x, y)) => write!(f, "{} ({}, {})", self.index, x, y),
            Err(_) => write!(f, "{}", self.index),
        }
    }
}

impl Position {
    /// A bare index with no known dimensions
    pub fn bare(index: usize) -> Self {
        Position { index, grid: None }
    }

    /// Converts a raw host location into a position on `grid`
    pub fn on_grid(raw: i64, grid: GridSize) -> Result<Self, StrategyError> {
        if raw < 0 {
            return Err(StrategyError::InvalidLocation { value: raw });
        }
        let index = raw as usize;
        if index >= grid.cells() {
            return Err(StrategyError::LocationOutOfBounds { index, grid });
        }
        Ok(Position {
            index,
            grid: Some(grid),
        })
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn grid(&self) -> Option<GridSize> {
        self.grid
    }

    fn require_grid(&self) -> Result<GridSize, StrategyError> {
        self.grid
            .ok_or(StrategyError::MissingDimensions { index: self.index })
    }

    /// Dimensions shared by both operands for a single geometric call
    fn shared_grid(&self, other: &Position) -> Result<GridSize, StrategyError> {
        match (self.grid, other.grid) {
            (Some(left), Some(right)) if left != right => {
                Err(StrategyError::DimensionMismatch { left, right })
            }
            (Some(grid), _) | (None, Some(grid)) => Ok(grid),
            (None, None) => Err(StrategyError::MissingDimensions { index: self.index }),
        }
    }

    fn coordinates_on(&self, grid: GridSize) -> (usize, usize) {
        (self.index % grid.width, self.index / grid.width)
    }

    /// Splits the index into (x, y)
    pub fn coordinates(&self) -> Result<(usize, usize), StrategyError> {
        let grid = self.require_grid()?;
        Ok(self.coordinates_on(grid))
    }

    /// Vector difference `self - other` as (dx, dy)
    pub fn offset_from(&self, other: &Position) -> Result<(i64, i64), StrategyError> {
        let grid = self.shared_grid(other)?;
        let (x, y) = self.coordinates_on(grid);
        let (ox, oy) = other.coordinates_on(grid);
        Ok((x as i64 - ox as i64, y as i64 - oy as i64))
    }

    /// Taxicab distance between two cells
    pub fn distance(&self, other: &Position) -> Result<usize, StrategyError> {
        let (dx, dy) = self.offset_from(other)?;
        Ok((dx.unsigned_abs() + dy.unsigned_abs()) as usize)
    }

    /// Single step toward `target`. Vertical moves take precedence over horizontal ones.
    pub fn direction_toward(&self, target: &Position) -> Result<Move, StrategyError> {
        let (dx, dy) = target.offset_from(self)?;
        let mv = if dy < 0 {
            Move::Up
        } else if dy > 0 {
            Move::Down
        } else if dx > 0 {
            Move::Right
        } else if dx < 0 {
            Move::Left
        } else {
            Move::Nothing
        };
        Ok(mv)
    }

    /// Label of the next step toward `target`
    pub fn next_action_toward<'a>(
        &self,
        target: &Position,
        actions: &'a ActionSet,
    ) -> Result<&'a str, StrategyError> {
        Ok(actions.label(self.direction_toward(target)?))
    }

    /// New position one step away; moves off the grid leave the agent in place
    pub fn step(&self, mv: Move) -> Result<Position, StrategyError> {
        let grid = self.require_grid()?;
        let (x, y) = self.coordinates_on(grid);
        let (x, y) = match mv {
            Move::Up if y > 0 => (x, y - 1),
            Move::Down if y + 1 < grid.height => (x, y + 1),
            Move::Right if x + 1 < grid.width => (x + 1, y),
            Move::Left if x > 0 => (x - 1, y),
            _ => (x, y),
        };
        Ok(Position {
            index: y * grid.width + x,
            grid: self.grid,
        })
    }

    /// Applies a host action label
    pub fn apply_action(&self, label: &str, actions: &ActionSet) -> Result<Position, StrategyError> {
        let mv = actions.resolve(label)?;
        self.step(mv)
    }
}
