use ndarray::Array2;

use crate::*;

/// Counts, for every cell, the mines among its in-bounds neighbors. The cell itself is not counted.
pub fn compute_adjacency(mine_mask: &Array2<bool>) -> Array2<u8> {
    Array2::from_shape_fn(mine_mask.dim(), |(i, j)| {
        mine_mask
            .iter_neighbor_cells((i as Coord, j as Coord))
            .filter(|&is_mine| is_mine)
            .count() as u8
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_field_is_all_zero() {
        let mines: Array2<bool> = Array2::default([4, 6]);

        let counts = compute_adjacency(&mines);

        assert_eq!(counts.dim(), (4, 6));
        assert!(counts.iter().all(|&count| count == 0));
    }

    #[test]
    fn single_mine_marks_its_neighbors() {
        let layout = MineLayout::from_mine_coords((4, 5), &[(1, 3)]).unwrap();

        let counts = compute_adjacency(layout.mine_mask());

        let neighbors: alloc::vec::Vec<_> = NeighborIter::new((1, 3), (4, 5)).collect();
        for ((i, j), &count) in counts.indexed_iter() {
            let coords = (i as Coord, j as Coord);
            let expected = if neighbors.contains(&coords) { 1 } else { 0 };
            assert_eq!(count, expected, "at {:?}", coords);
        }
    }

    #[test]
    fn corner_mine_clips_at_edges() {
        let layout = MineLayout::from_mine_coords((3, 3), &[(0, 0)]).unwrap();

        let counts = compute_adjacency(layout.mine_mask());

        assert_eq!(counts[[0, 0]], 0);
        assert_eq!(counts[[0, 1]], 1);
        assert_eq!(counts[[1, 1]], 1);
        assert_eq!(counts[[2, 2]], 0);
    }

    #[test]
    fn surrounded_cell_counts_eight() {
        let ring = [(0, 0), (0, 1), (0, 2), (1, 0), (1, 2), (2, 0), (2, 1), (2, 2)];
        let layout = MineLayout::from_mine_coords((3, 3), &ring).unwrap();

        let counts = compute_adjacency(layout.mine_mask());

        assert_eq!(counts[[1, 1]], 8);
        assert_eq!(counts[[0, 0]], 2);
        assert_eq!(counts[[0, 1]], 4);
    }
}
