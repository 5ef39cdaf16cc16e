#![no_std]

extern crate alloc;

use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use adjacency::*;
pub use config::*;
pub use error::*;
pub use generator::*;
pub use grid::*;
pub use reveal::*;
pub use session::*;
pub use types::*;

mod adjacency;
mod config;
mod error;
mod generator;
mod grid;
mod reveal;
mod session;
mod types;

/// Where the mines are. One per session, created on the first reveal.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineLayout {
    mine_mask: Array2<bool>,
    mine_count: CellCount,
}

impl MineLayout {
    /// Fails when either side is longer than a [`Coord`] can address.
    pub fn from_mine_mask(mine_mask: Array2<bool>) -> Result<Self> {
        let (rows, cols) = mine_mask.dim();
        if Coord::try_from(rows).is_err() {
            return Err(InvalidConfigReason::HeightOutOfRange.into());
        }
        if Coord::try_from(cols).is_err() {
            return Err(InvalidConfigReason::WidthOutOfRange.into());
        }

        // at most Coord::MAX squared cells, which fits CellCount
        let mine_count = mine_mask.iter().filter(|&&is_mine| is_mine).count() as CellCount;
        Ok(Self {
            mine_mask,
            mine_count,
        })
    }

    /// `size` is `(height, width)`.
    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());

        for &coords in mine_coords {
            if !in_bounds(coords, size) {
                return Err(GameError::IndexOutOfRange);
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        Self::from_mine_mask(mine_mask)
    }

    pub fn game_config(&self) -> GameConfig {
        let (height, width) = self.size();
        GameConfig::new_unchecked(width, height, self.mine_count)
    }

    pub fn size(&self) -> Coord2 {
        grid_size(&self.mine_mask)
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn total_cells(&self) -> CellCount {
        let (height, width) = self.size();
        mult(height, width)
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self.mine_mask
            .get(coords.to_nd_index())
            .copied()
            .unwrap_or(false)
    }

    pub fn mine_mask(&self) -> &Array2<bool> {
        &self.mine_mask
    }

    pub fn iter_mines(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.mine_mask
            .indexed_iter()
            .filter(|&(_, &is_mine)| is_mine)
            .map(|((i, j), _)| (i as Coord, j as Coord))
    }
}

impl Index<Coord2> for MineLayout {
    type Output = bool;

    fn index(&self, (i, j): Coord2) -> &Self::Output {
        &self.mine_mask[(i as usize, j as usize)]
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlagOutcome {
    NoChange,
    Changed,
}

impl FlagOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

/// Answer to a once-per-second timer tick.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Still playing, with the new elapsed seconds.
    Counted(u32),
    /// Not playing, the host should cancel its interval.
    Stopped,
}

impl TickOutcome {
    pub const fn is_running(self) -> bool {
        matches!(self, Self::Counted(_))
    }
}
