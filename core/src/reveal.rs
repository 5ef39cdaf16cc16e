use alloc::collections::VecDeque;
use alloc::vec::Vec;
use ndarray::Array2;

use crate::*;

/// Breadth-first flood fill for a single click at `start`.
///
/// Returns the cells to open, in the order they were reached. Each returned cell is marked in `visited`, so a
/// later call sharing the same `visited` grid never returns it again. Expansion continues only through safe cells
/// with no adjacent mines; a mine is opened on its own.
///
/// Bounds and visited checks happen when a cell leaves the queue, so the queue may hold duplicates.
pub fn reveal(
    start: Coord2,
    mine_mask: &Array2<bool>,
    adjacency: &Array2<u8>,
    visited: &mut Array2<bool>,
) -> Vec<Coord2> {
    let mut opened = Vec::new();
    let mut to_visit = VecDeque::from([start]);

    while let Some(coords) = to_visit.pop_front() {
        let index = coords.to_nd_index();
        match visited.get_mut(index) {
            Some(seen) if !*seen => *seen = true,
            _ => continue,
        }
        opened.push(coords);

        let is_mine = mine_mask.get(index).copied().unwrap_or(true);
        if !is_mine && adjacency.get(index) == Some(&0) {
            to_visit.extend(visited.iter_neighbors(coords));
        }
    }

    log::trace!("Reveal from {:?} opened {} cells", start, opened.len());
    opened
}
