use alloc::vec::Vec;
use core::fmt;
use core::fmt::Display;
use core::hash::BuildHasher;
use core::hash::Hasher;

use crate::array_hash::ArrayHash;
use crate::array_set;
use crate::array_set::ArraySet;
use crate::error::Error;

/// A cell position on the unbounded plane. `y` grows upwards.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cell {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
}

/// Offsets of the eight surrounding cells, top row first.
const OFFSETS: [(i32, i32); 8] = [
    (-1, 1),
    (0, 1),
    (1, 1),
    (-1, 0),
    (1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];

impl Cell {
    /// Creates a cell at `(x, y)`.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the eight cells surrounding this one.
    ///
    /// Coordinates wrap at the edges of `i32`.
    pub fn neighbors(self) -> impl Iterator<Item = Cell> {
        OFFSETS
            .iter()
            .map(move |&(dx, dy)| Cell::new(self.x.wrapping_add(dx), self.y.wrapping_add(dy)))
    }
}

impl From<(i32, i32)> for Cell {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// The R-pentomino, a methuselah that settles at 116 cells after 1103
/// generations.
pub const R_PENTOMINO: [Cell; 5] = [
    Cell::new(0, 0),
    Cell::new(0, 1),
    Cell::new(1, 1),
    Cell::new(-1, 0),
    Cell::new(0, -1),
];

/// The Acorn, a methuselah of seven cells.
pub const ACORN: [Cell; 7] = [
    Cell::new(-2, 2),
    Cell::new(0, 1),
    Cell::new(-3, 0),
    Cell::new(-2, 0),
    Cell::new(1, 0),
    Cell::new(2, 0),
    Cell::new(3, 0),
];

/// A cheap positional hash for [`Cell`]: `x * 65521 + y` in wrapping
/// arithmetic.
///
/// Each `i32` written is folded in as `state * 65521 + value`, so a `Cell`
/// (which writes `x` then `y`) hashes to exactly `x * 65521 + y`. The origin
/// hashes to `0`, which the table stores under a perturbed slot hash.
#[derive(Clone, Copy, Debug, Default)]
pub struct CellHasher {
    state: u64,
}

const CELL_MULTIPLIER: u64 = 65521;

impl CellHasher {
    #[inline]
    fn fold(&mut self, value: u64) {
        let shifted = self.state.wrapping_mul(CELL_MULTIPLIER);
        self.state = shifted.wrapping_add(value);
    }
}

impl Hasher for CellHasher {
    #[inline]
    fn finish(&self) -> u64 {
        self.state
    }

    fn write(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.fold(u64::from(byte));
        }
    }

    #[inline]
    fn write_i32(&mut self, i: i32) {
        self.fold(i64::from(i) as u64);
    }
}

/// Builds [`CellHasher`]s. Stateless, so every board hashes cells the same
/// way.
#[derive(Clone, Copy, Debug, Default)]
pub struct CellHashBuilder;

impl BuildHasher for CellHashBuilder {
    type Hasher = CellHasher;

    fn build_hasher(&self) -> Self::Hasher {
        CellHasher::default()
    }
}

/// One generation of a Game of Life pattern.
///
/// A board holds the set of live cells and the number of generations since
/// it was seeded. Stepping produces a new board and leaves the old one
/// untouched.
///
/// # Examples
///
/// ```rust
/// use array_hash::life::Board;
/// use array_hash::life::R_PENTOMINO;
///
/// let board = Board::new(R_PENTOMINO)?;
/// let next = board.step()?;
///
/// assert_eq!(next.generation(), 1);
/// assert_eq!(next.population(), 6);
/// # Ok::<(), array_hash::Error>(())
/// ```
#[derive(Clone, Debug)]
pub struct Board<S = CellHashBuilder> {
    alive: ArraySet<Cell, S>,
    generation: u64,
}

impl Board<CellHashBuilder> {
    /// Seeds a board with the given live cells, hashed with
    /// [`CellHashBuilder`].
    ///
    /// # Errors
    ///
    /// Never fails in practice: the live set is sized from the seed.
    pub fn new<I>(cells: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = Cell>,
    {
        Self::with_hasher(cells, CellHashBuilder)
    }
}

impl<S> Board<S>
where
    S: BuildHasher + Clone,
{
    /// Seeds a board with the given live cells and hasher builder.
    ///
    /// Duplicate cells are collapsed.
    ///
    /// # Errors
    ///
    /// Never fails in practice: the live set is sized from the seed.
    pub fn with_hasher<I>(cells: I, hash_builder: S) -> Result<Self, Error>
    where
        I: IntoIterator<Item = Cell>,
    {
        let cells: Vec<Cell> = cells.into_iter().collect();
        let mut alive = ArraySet::with_capacity_and_hasher(cells.len(), hash_builder);
        for cell in cells {
            alive.insert(cell)?;
        }

        Ok(Self {
            alive,
            generation: 0,
        })
    }

    /// Computes the next generation.
    ///
    /// Every live cell adds one to the neighbour count of each of its eight
    /// neighbours, in a table sized for eight entries per live cell. A cell
    /// is alive in the next generation if its count is 3, or if its count is
    /// 2 and it is alive now. The next live set is sized from the number of
    /// counted cells.
    ///
    /// # Errors
    ///
    /// Never fails in practice: both tables are sized for the worst case.
    pub fn step(&self) -> Result<Self, Error> {
        let hash_builder = self.alive.hasher().clone();
        let mut counts: ArrayHash<Cell, u8, S> = ArrayHash::with_capacity_and_hasher(
            self.alive.len().saturating_mul(OFFSETS.len()),
            hash_builder.clone(),
        );
        for cell in &self.alive {
            for neighbor in cell.neighbors() {
                *counts.entry(neighbor)?.or_default() += 1;
            }
        }

        let mut alive = ArraySet::with_capacity_and_hasher(counts.len(), hash_builder);
        for (cell, &count) in &counts {
            if count == 3 || (count == 2 && self.alive.contains(cell)) {
                alive.insert(*cell)?;
            }
        }

        Ok(Self {
            alive,
            generation: self.generation + 1,
        })
    }

    /// Steps `generations` times.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`step`](Self::step).
    pub fn advance(self, generations: u64) -> Result<Self, Error> {
        let mut board = self;
        for _ in 0..generations {
            board = board.step()?;
        }
        Ok(board)
    }

    /// Returns `true` if `cell` is alive.
    pub fn is_alive(&self, cell: Cell) -> bool {
        self.alive.contains(&cell)
    }
}

impl<S> Board<S> {
    /// Number of live cells.
    pub fn population(&self) -> usize {
        self.alive.len()
    }

    /// Generations stepped since the board was seeded.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The live cells, in no particular order.
    pub fn cells(&self) -> array_set::Iter<'_, Cell> {
        self.alive.iter()
    }

    /// The lower-left and upper-right corners of the smallest rectangle
    /// containing every live cell, or `None` for an empty board.
    pub fn bounding_box(&self) -> Option<(Cell, Cell)> {
        let mut cells = self.alive.iter();
        let first = *cells.next()?;
        Some(cells.fold((first, first), |(min, max), cell| {
            (
                Cell::new(min.x.min(cell.x), min.y.min(cell.y)),
                Cell::new(max.x.max(cell.x), max.y.max(cell.y)),
            )
        }))
    }
}

/// Renders the bounding box row by row from the top, `@` for a live cell and
/// a space for a dead one, each row ending in a newline. An empty board
/// renders as nothing.
impl<S> Display for Board<S>
where
    S: BuildHasher + Clone,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some((min, max)) = self.bounding_box() else {
            return Ok(());
        };

        for y in (min.y..=max.y).rev() {
            for x in min.x..=max.x {
                let glyph = if self.is_alive(Cell::new(x, y)) {
                    '@'
                } else {
                    ' '
                };
                write!(f, "{glyph}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
