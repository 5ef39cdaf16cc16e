use ndarray::Array2;
use rand::prelude::*;

use super::*;

/// Draws allowed per board cell before placement gives up.
const DRAWS_PER_CELL: u32 = 64;

/// Purely random placement that never puts a mine on the first clicked cell.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomMineGenerator {
    seed: u64,
    safe: Coord2,
}

impl RandomMineGenerator {
    pub fn new(seed: u64, safe: Coord2) -> Self {
        Self { seed, safe }
    }
}

impl MineGenerator for RandomMineGenerator {
    fn generate(self, config: GameConfig) -> Result<MineLayout> {
        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mine_mask = generate_mines(
            self.safe,
            config.width,
            config.height,
            config.count,
            &mut rng,
        )?;
        MineLayout::from_mine_mask(mine_mask)
    }
}

/// Places `count` mines by rejection sampling, skipping `safe` and cells that already hold a mine.
///
/// The result is indexed `[height][width]`.
pub fn generate_mines(
    safe: Coord2,
    width: Coord,
    height: Coord,
    count: CellCount,
    rng: &mut SmallRng,
) -> Result<Array2<bool>> {
    if width == 0 {
        return Err(InvalidConfigReason::WidthOutOfRange.into());
    }
    if height == 0 {
        return Err(InvalidConfigReason::HeightOutOfRange.into());
    }

    let size = (height, width);
    let total_cells = mult(width, height);
    if count >= total_cells {
        log::warn!(
            "Cannot place {} mines on {} cells and keep a safe start",
            count,
            total_cells
        );
        return Err(InvalidConfigReason::TooManyMines.into());
    }
    if !in_bounds(safe, size) {
        return Err(GameError::IndexOutOfRange);
    }

    let max_draws = DRAWS_PER_CELL.saturating_mul(total_cells.into()).max(DRAWS_PER_CELL);
    let mut mines: Array2<bool> = Array2::default(size.to_nd_index());
    let mut placed: CellCount = 0;
    let mut draws: u32 = 0;

    while placed < count {
        if draws >= max_draws {
            log::warn!(
                "Gave up placing mines after {} draws, placed {} of {}",
                draws,
                placed,
                count
            );
            return Err(GameError::GenerationExhausted(draws));
        }
        draws += 1;

        let coords: Coord2 = (rng.random_range(0..height), rng.random_range(0..width));
        if coords == safe {
            continue;
        }
        let tile = &mut mines[coords.to_nd_index()];
        if *tile {
            continue;
        }
        *tile = true;
        placed += 1;
    }

    log::debug!(
        "Placed {} mines on {}x{} in {} draws, safe start at {:?}",
        count,
        width,
        height,
        draws,
        safe
    );
    Ok(mines)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rng(seed: u64) -> SmallRng {
        SmallRng::seed_from_u64(seed)
    }

    #[test]
    fn places_exact_count_and_skips_safe_cell() {
        for seed in 0..32 {
            let mines = generate_mines((3, 4), 8, 8, 10, &mut rng(seed)).unwrap();

            assert_eq!(mines.dim(), (8, 8));
            assert_eq!(mines.iter().filter(|&&is_mine| is_mine).count(), 10);
            assert!(!mines[[3, 4]]);
        }
    }

    #[test]
    fn dense_board_leaves_only_safe_cell() {
        let mines = generate_mines((1, 2), 3, 2, 5, &mut rng(7)).unwrap();

        assert_eq!(mines.iter().filter(|&&is_mine| is_mine).count(), 5);
        assert!(!mines[[1, 2]]);
    }

    #[test]
    fn rejects_full_board() {
        assert_eq!(
            generate_mines((0, 0), 3, 3, 9, &mut rng(0)),
            Err(GameError::InvalidConfig(InvalidConfigReason::TooManyMines))
        );
        assert_eq!(
            generate_mines((0, 0), 3, 3, 12, &mut rng(0)),
            Err(GameError::InvalidConfig(InvalidConfigReason::TooManyMines))
        );
    }

    #[test]
    fn rejects_safe_cell_off_board() {
        assert_eq!(
            generate_mines((8, 0), 8, 8, 10, &mut rng(0)),
            Err(GameError::IndexOutOfRange)
        );
    }

    #[test]
    fn rejects_empty_board() {
        assert_eq!(
            generate_mines((0, 0), 0, 8, 1, &mut rng(0)),
            Err(GameError::InvalidConfig(InvalidConfigReason::WidthOutOfRange))
        );
    }

    #[test]
    fn same_seed_same_layout() {
        let config = GameConfig::new_unchecked(16, 16, 40);
        let a = RandomMineGenerator::new(42, (5, 5)).generate(config).unwrap();
        let b = RandomMineGenerator::new(42, (5, 5)).generate(config).unwrap();

        assert_eq!(a, b);
        assert_eq!(a.mine_count(), 40);
        assert_eq!(a.size(), (16, 16));
        assert!(!a.contains_mine((5, 5)));
    }
}
