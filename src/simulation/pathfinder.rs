//! Shortest-path search over road cells
//!
//! Breadth-first search across 4-directional neighbors. Only `Road` and
//! `Destination` cells are traversable; the cell a car currently stands on
//! does not need to be (cars step off their spawn onto the first road tile).

use std::collections::{HashMap, HashSet, VecDeque};

use super::grid::GridModel;
use super::types::GridCoord;

/// Neighbor expansion order for the search: +x, +y, -x, -y.
///
/// Equal-length paths are tie-broken by this order, so every front end sees
/// cars take the same route for the same grid. Do not reorder.
pub const EXPANSION_ORDER: [(i32, i32); 4] = [(1, 0), (0, 1), (-1, 0), (0, -1)];

/// Finds the shortest route from `start` to `goal` over traversable cells.
///
/// Returns the sequence of coordinates from the cell after `start` up to and
/// including `goal`, or an empty vector when no route exists (the caller
/// treats that as an unroutable car). `start` itself is never required to be
/// traversable.
pub fn find_path(grid: &GridModel, start: GridCoord, goal: GridCoord) -> Vec<GridCoord> {
    if start == goal {
        return Vec::new();
    }

    let mut queue: VecDeque<GridCoord> = VecDeque::new();
    let mut visited: HashSet<GridCoord> = HashSet::new();
    let mut came_from: HashMap<GridCoord, GridCoord> = HashMap::new();

    queue.push_back(start);
    visited.insert(start);

    while let Some(cell) = queue.pop_front() {
        if cell == goal {
            // Walk parents back to the start, then flip into travel order.
            let mut path = Vec::new();
            let mut current = goal;
            while current != start {
                path.push(current);
                current = came_from[&current];
            }
            path.reverse();
            return path;
        }

        for (dx, dy) in EXPANSION_ORDER {
            let next = GridCoord::new(cell.x + dx, cell.y + dy);
            if visited.contains(&next) || !grid.is_traversable(next) {
                continue;
            }
            visited.insert(next);
            came_from.insert(next, cell);
            queue.push_back(next);
        }
    }

    Vec::new()
}
