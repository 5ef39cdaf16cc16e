use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub width: Coord,
    pub height: Coord,
    pub count: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(width: Coord, height: Coord, count: CellCount) -> Self {
        Self {
            width,
            height,
            count,
        }
    }

    /// Builds a config that is structurally playable: a non-empty board with at least one mine and at least one safe
    /// cell. Size limits are not applied here, see [`GameConfig::validate`].
    pub fn new(width: Coord, height: Coord, count: CellCount) -> Result<Self> {
        Self::new_unchecked(width, height, count).validate(&ConfigBounds::PERMISSIVE)
    }

    /// Board shape as `(height, width)`.
    pub const fn size(&self) -> Coord2 {
        (self.height, self.width)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.width, self.height)
    }

    pub const fn safe_cell_count(&self) -> CellCount {
        self.total_cells().saturating_sub(self.count)
    }

    pub fn validate(self, bounds: &ConfigBounds) -> Result<Self> {
        use InvalidConfigReason::*;

        if !bounds.allows_size(self.width) {
            return Err(WidthOutOfRange.into());
        }
        if !bounds.allows_size(self.height) {
            return Err(HeightOutOfRange.into());
        }
        if self.count < bounds.min_count {
            return Err(TooFewMines.into());
        }
        if self.count > bounds.max_count(self.total_cells()) {
            return Err(TooManyMines.into());
        }
        Ok(self)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        GameMode::Beginner.config()
    }
}

/// Limits a custom board must respect.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigBounds {
    pub min_size: Coord,
    pub max_size: Coord,
    pub min_count: CellCount,
    /// Mines may fill at most `1 / density_divisor` of the board.
    pub density_divisor: CellCount,
}

impl ConfigBounds {
    /// Anything with at least one mine and one safe cell.
    pub const PERMISSIVE: Self = Self {
        min_size: 1,
        max_size: Coord::MAX,
        min_count: 1,
        density_divisor: 1,
    };

    pub const fn allows_size(&self, size: Coord) -> bool {
        size >= self.min_size && size <= self.max_size
    }

    /// Largest mine count allowed for a board with `total_cells` cells, always leaving one safe cell.
    pub const fn max_count(&self, total_cells: CellCount) -> CellCount {
        let by_density = match total_cells.checked_div(self.density_divisor) {
            Some(count) => count,
            None => total_cells,
        };
        let leave_one_safe = total_cells.saturating_sub(1);
        if by_density < leave_one_safe {
            by_density
        } else {
            leave_one_safe
        }
    }
}

impl Default for ConfigBounds {
    fn default() -> Self {
        Self {
            min_size: 8,
            max_size: 50,
            min_count: 1,
            density_divisor: 3,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    Beginner,
    Intermediate,
    Expert,
    Custom(GameConfig),
}

impl GameMode {
    pub const PRESETS: [GameMode; 3] = [Self::Beginner, Self::Intermediate, Self::Expert];

    pub const fn config(self) -> GameConfig {
        use GameMode::*;
        match self {
            Beginner => GameConfig::new_unchecked(8, 8, 10),
            Intermediate => GameConfig::new_unchecked(16, 16, 40),
            Expert => GameConfig::new_unchecked(32, 16, 100),
            Custom(config) => config,
        }
    }

    pub const fn name(self) -> &'static str {
        use GameMode::*;
        match self {
            Beginner => "beginner",
            Intermediate => "intermediate",
            Expert => "expert",
            Custom(_) => "custom",
        }
    }

    /// Maps a config back to its preset, if it is one.
    pub fn from_config(config: GameConfig) -> Self {
        Self::PRESETS
            .into_iter()
            .find(|preset| preset.config() == config)
            .unwrap_or(Self::Custom(config))
    }
}

impl Default for GameMode {
    fn default() -> Self {
        Self::Beginner
    }
}
