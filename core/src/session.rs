use alloc::vec::Vec;
use core::num::Saturating;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - Ready -> Playing (first reveal)
/// - Ready -> Success (first reveal opens every safe cell)
/// - Playing -> Success
/// - Playing -> Failed
/// - any -> Ready (reset)
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Ready,
    Playing,
    Success,
    Failed,
}

impl GamePhase {
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }

    pub const fn is_playing(self) -> bool {
        matches!(self, Self::Playing)
    }

    /// No reveals or flags are accepted until a reset.
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Success | Self::Failed)
    }
}

impl Default for GamePhase {
    fn default() -> Self {
        Self::Ready
    }
}

/// Cells opened by one reveal and the phase right after it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RevealResult {
    pub opened_cells: Vec<Coord2>,
    pub phase: GamePhase,
}

impl RevealResult {
    fn unchanged(phase: GamePhase) -> Self {
        Self {
            opened_cells: Vec::new(),
            phase,
        }
    }

    pub fn has_update(&self) -> bool {
        !self.opened_cells.is_empty()
    }
}

/// What a renderer may know about one cell.
///
/// `is_mine` is only present once mines are placed, `adjacency_count` only once the cell is opened or the game is
/// over.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellView {
    pub is_opened: bool,
    pub has_flag: bool,
    pub adjacency_count: Option<u8>,
    pub is_mine: Option<bool>,
}

/// Everything that only exists after the first reveal.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
struct Minefield {
    layout: MineLayout,
    adjacency: Array2<u8>,
    visited: Array2<bool>,
}

impl Minefield {
    fn new(layout: MineLayout) -> Self {
        let adjacency = compute_adjacency(layout.mine_mask());
        let visited = Array2::default(layout.size().to_nd_index());
        Self {
            layout,
            adjacency,
            visited,
        }
    }

    fn generate(config: GameConfig, seed: u64, safe: Coord2) -> Result<Self> {
        let layout = RandomMineGenerator::new(seed, safe).generate(config)?;
        Ok(Self::new(layout))
    }

    fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        self.adjacency[coords.to_nd_index()]
    }
}

/// One game from first click to win or loss, replaced wholesale on reset.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Session {
    mode: GameMode,
    bounds: ConfigBounds,
    seed: u64,
    grid: Grid,
    minefield: Option<Minefield>,
    phase: GamePhase,
    opened_count: Saturating<CellCount>,
    flag_count: Saturating<CellCount>,
    elapsed_secs: u32,
    triggered_mine: Option<Coord2>,
}

impl Session {
    /// New session checked against the default board limits.
    pub fn new(config: GameConfig, seed: u64) -> Result<Self> {
        Self::with_bounds(config, ConfigBounds::default(), seed)
    }

    pub fn with_bounds(config: GameConfig, bounds: ConfigBounds, seed: u64) -> Result<Self> {
        let config = config.validate(&bounds)?;
        log::debug!("New session {:?}, seed: {}", config, seed);
        Ok(Self::blank(GameMode::from_config(config), bounds, seed))
    }

    /// Session over a fixed layout, mines are not generated on the first reveal.
    ///
    /// The layout still needs at least one mine and one safe cell.
    pub fn from_layout(layout: MineLayout) -> Result<Self> {
        let config = layout.game_config().validate(&ConfigBounds::PERMISSIVE)?;
        let mut session = Self::blank(GameMode::from_config(config), ConfigBounds::PERMISSIVE, 0);
        session.minefield = Some(Minefield::new(layout));
        Ok(session)
    }

    fn blank(mode: GameMode, bounds: ConfigBounds, seed: u64) -> Self {
        let config = mode.config();
        Self {
            mode,
            bounds,
            seed,
            grid: Grid::new(config.width, config.height),
            minefield: None,
            phase: GamePhase::Ready,
            opened_count: Saturating(0),
            flag_count: Saturating(0),
            elapsed_secs: 0,
            triggered_mine: None,
        }
    }

    pub fn config(&self) -> GameConfig {
        self.mode.config()
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn bounds(&self) -> &ConfigBounds {
        &self.bounds
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        self.phase.is_finished()
    }

    /// Shape as `(height, width)`.
    pub fn size(&self) -> Coord2 {
        self.config().size()
    }

    pub fn total_mines(&self) -> CellCount {
        self.config().count
    }

    pub fn opened_count(&self) -> CellCount {
        self.opened_count.0
    }

    /// Cells still closed, mines included.
    pub fn remaining_cells(&self) -> CellCount {
        self.config().total_cells().saturating_sub(self.opened_count.0)
    }

    pub fn flag_count(&self) -> CellCount {
        self.flag_count.0
    }

    /// How many mines have not been flagged yet, negative when over-flagged.
    pub fn mines_left(&self) -> i32 {
        i32::from(self.total_mines()) - i32::from(self.flag_count.0)
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn mine_layout(&self) -> Option<&MineLayout> {
        self.minefield.as_ref().map(|minefield| &minefield.layout)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if in_bounds(coords, self.size()) {
            Ok(coords)
        } else {
            Err(GameError::IndexOutOfRange)
        }
    }

    /// Left click. Places the mines on the first call, then floods out from `coords`.
    pub fn reveal_cell(&mut self, coords: Coord2) -> Result<RevealResult> {
        let coords = self.validate_coords(coords)?;

        if self.phase.is_finished() {
            log::trace!("Ignoring reveal at {:?}, game is over", coords);
            return Ok(RevealResult::unchanged(self.phase));
        }

        let mut minefield = match self.minefield.take() {
            Some(minefield) => minefield,
            None => Minefield::generate(self.config(), self.seed, coords)?,
        };
        self.mark_started();

        let opened_cells = reveal(
            coords,
            minefield.layout.mine_mask(),
            &minefield.adjacency,
            &mut minefield.visited,
        );
        for &pos in &opened_cells {
            self.open_cell(pos);
        }

        if !opened_cells.is_empty() && minefield.layout.contains_mine(coords) {
            self.triggered_mine = Some(coords);
            self.end_game(false);
        } else if self.opened_count.0 >= minefield.layout.safe_cell_count() {
            self.end_game(true);
        }
        self.minefield = Some(minefield);

        Ok(RevealResult {
            opened_cells,
            phase: self.phase,
        })
    }

    /// Right click. Flips the flag on a closed cell.
    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<FlagOutcome> {
        let coords = self.validate_coords(coords)?;

        if self.phase.is_finished() {
            log::trace!("Ignoring flag at {:?}, game is over", coords);
            return Ok(FlagOutcome::NoChange);
        }

        let cell = self.grid.cell_mut(coords)?;
        if cell.is_opened {
            return Ok(FlagOutcome::NoChange);
        }

        cell.has_flag = !cell.has_flag;
        if cell.has_flag {
            self.flag_count += 1;
        } else {
            self.flag_count -= 1;
        }
        log::trace!("Flag at {:?} is now {}", coords, cell.has_flag);
        Ok(FlagOutcome::Changed)
    }

    pub fn cell_view(&self, coords: Coord2) -> Result<CellView> {
        let cell = self.grid.cell(coords)?;
        let minefield = self.minefield.as_ref();
        let disclose_count = cell.is_opened || self.phase.is_finished();

        Ok(CellView {
            is_opened: cell.is_opened,
            has_flag: cell.has_flag,
            adjacency_count: minefield
                .filter(|_| disclose_count)
                .map(|minefield| minefield.adjacent_mine_count(coords)),
            is_mine: minefield.map(|minefield| minefield.layout.contains_mine(coords)),
        })
    }

    /// Called by the host once per second.
    pub fn tick(&mut self) -> TickOutcome {
        if self.phase.is_playing() {
            self.elapsed_secs = self.elapsed_secs.saturating_add(1);
            TickOutcome::Counted(self.elapsed_secs)
        } else {
            TickOutcome::Stopped
        }
    }

    /// Back to `Ready` with the same config. The next game draws a new layout.
    pub fn reset(&mut self) {
        let seed = next_seed(self.seed);
        log::debug!("Reset to {:?}, seed: {}", self.mode, seed);
        *self = Self::blank(self.mode, self.bounds, seed);
    }

    pub fn change_mode(&mut self, mode: GameMode) -> Result<()> {
        let config = mode.config().validate(&self.bounds)?;
        self.mode = GameMode::from_config(config);
        self.reset();
        Ok(())
    }

    pub fn change_config(&mut self, config: GameConfig) -> Result<()> {
        self.change_mode(GameMode::Custom(config))
    }

    fn open_cell(&mut self, coords: Coord2) {
        let Ok(cell) = self.grid.cell_mut(coords) else {
            return;
        };
        if cell.is_opened {
            return;
        }
        cell.is_opened = true;
        if cell.has_flag {
            cell.has_flag = false;
            self.flag_count -= 1;
        }
        self.opened_count += 1;
    }

    fn mark_started(&mut self) {
        if self.phase.is_ready() {
            log::debug!("Game started");
            self.phase = GamePhase::Playing;
            self.elapsed_secs = 0;
        }
    }

    fn end_game(&mut self, won: bool) {
        if self.phase.is_finished() {
            return;
        }

        self.phase = if won {
            GamePhase::Success
        } else {
            GamePhase::Failed
        };
        log::debug!(
            "Game ended in {:?} after {}s, {} cells opened",
            self.phase,
            self.elapsed_secs,
            self.opened_count.0
        );
    }
}

/// Advances a seed so consecutive games in a session get different layouts.
fn next_seed(seed: u64) -> u64 {
    seed.wrapping_add(0x9e37_79b9_7f4a_7c15)
}
