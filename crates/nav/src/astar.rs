use std::cmp::Reverse;
use std::collections::hash_map::Entry;
use std::collections::{BinaryHeap, HashMap, HashSet};

use islewalk_common::TileCoord;
use serde::{Deserialize, Serialize};

use crate::grid::GridModel;

/// Expansion cap used when no explicit [`SearchConfig`] is given.
pub const DEFAULT_MAX_ITERATIONS: usize = 10_000;

/// Tiles from (excluding) the start up to and including the goal.
pub type Path = Vec<TileCoord>;

/// Cardinal neighbours first, then diagonals. Tie-breaking depends on this
/// order, so changing it changes which of several equal-cost paths is returned.
const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (0, 1),
    (1, 0),
    (0, -1),
    (-1, 0),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

/// Every step costs the same, diagonals included.
const STEP_COST: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Node expansions allowed before the search gives up.
    pub max_iterations: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

/// A* over a [`GridModel`] with 8-way movement and a Manhattan heuristic.
///
/// Manhattan distance overestimates once diagonal steps are allowed, so
/// returned paths are valid but not guaranteed shortest around obstacles.
#[derive(Debug, Clone, Copy, Default)]
pub struct Pathfinder {
    config: SearchConfig,
}

#[derive(Debug, Clone, Copy)]
struct Node {
    g: u32,
    h: u32,
    parent: Option<TileCoord>,
    /// Order in which the tile first entered the open set; breaks f ties.
    order: u32,
}

/// Heap entry ordered by (f, discovery order), smallest first.
type OpenEntry = Reverse<(u32, u32, TileCoord)>;

impl Pathfinder {
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> SearchConfig {
        self.config
    }

    /// Find a route from `start` to `goal`.
    ///
    /// Returns `Some(vec![])` when `start == goal` and `None` when the goal is
    /// unreachable or the expansion cap is hit.
    pub fn search<G: GridModel + ?Sized>(
        &self,
        start: TileCoord,
        goal: TileCoord,
        grid: &G,
    ) -> Option<Path> {
        if start == goal {
            return Some(Vec::new());
        }

        let mut nodes: HashMap<TileCoord, Node> = HashMap::new();
        let mut open: BinaryHeap<OpenEntry> = BinaryHeap::new();
        let mut closed: HashSet<TileCoord> = HashSet::new();

        let h = heuristic(start, goal);
        nodes.insert(
            start,
            Node {
                g: 0,
                h,
                parent: None,
                order: 0,
            },
        );
        open.push(Reverse((h, 0, start)));
        let mut next_order: u32 = 1;
        let mut expansions: usize = 0;

        while let Some(Reverse((_, _, current))) = open.pop() {
            // A cheaper duplicate of this tile was already expanded.
            if closed.contains(&current) {
                continue;
            }
            if expansions >= self.config.max_iterations {
                tracing::debug!(
                    %start,
                    %goal,
                    expansions,
                    "search hit expansion cap"
                );
                return None;
            }
            expansions += 1;

            if current == goal {
                tracing::trace!(%start, %goal, expansions, "path found");
                return Some(reconstruct(&nodes, goal));
            }
            closed.insert(current);

            let g = nodes[&current].g + STEP_COST;
            for (dx, dy) in NEIGHBOR_OFFSETS {
                let neighbor = current.offset(dx, dy);
                if closed.contains(&neighbor)
                    || !grid.in_bounds(neighbor)
                    || grid.is_blocked(neighbor)
                {
                    continue;
                }

                match nodes.entry(neighbor) {
                    Entry::Vacant(slot) => {
                        let h = heuristic(neighbor, goal);
                        slot.insert(Node {
                            g,
                            h,
                            parent: Some(current),
                            order: next_order,
                        });
                        open.push(Reverse((g + h, next_order, neighbor)));
                        next_order += 1;
                    }
                    Entry::Occupied(mut slot) => {
                        let node = slot.get_mut();
                        if g < node.g {
                            node.g = g;
                            node.parent = Some(current);
                            // Stale entry stays in the heap and is skipped
                            // once this tile is closed.
                            open.push(Reverse((g + node.h, node.order, neighbor)));
                        }
                    }
                }
            }
        }

        tracing::debug!(%start, %goal, expansions, "open set exhausted, no path");
        None
    }
}

/// Search with the default configuration.
pub fn search<G: GridModel + ?Sized>(start: TileCoord, goal: TileCoord, grid: &G) -> Option<Path> {
    Pathfinder::default().search(start, goal, grid)
}

fn heuristic(a: TileCoord, b: TileCoord) -> u32 {
    a.manhattan(b)
}

fn reconstruct(nodes: &HashMap<TileCoord, Node>, goal: TileCoord) -> Path {
    let mut path = Vec::new();
    let mut cursor = Some(goal);
    while let Some(tile) = cursor {
        let Some(node) = nodes.get(&tile) else {
            break;
        };
        // The start node is the only one without a parent; leave it out.
        if node.parent.is_none() {
            break;
        }
        path.push(tile);
        cursor = node.parent;
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::OccupancyGrid;

    fn t(x: i32, y: i32) -> TileCoord {
        TileCoord::new(x, y)
    }

    fn assert_walkable(path: &[TileCoord], start: TileCoord, grid: &OccupancyGrid) {
        let mut prev = start;
        for &tile in path {
            assert!(grid.in_bounds(tile), "{tile} out of bounds");
            assert!(!grid.is_blocked(tile), "{tile} is blocked");
            assert_eq!(prev.chebyshev(tile), 1, "{prev} -> {tile} is not one step");
            prev = tile;
        }
    }

    #[test]
    fn start_equals_goal_is_empty_path() {
        let grid = OccupancyGrid::new(5, 5).unwrap();
        assert_eq!(search(t(2, 2), t(2, 2), &grid), Some(Vec::new()));
    }

    #[test]
    fn blocked_goal_is_unreachable() {
        let grid = OccupancyGrid::with_blocked(5, 5, [t(4, 4)]).unwrap();
        assert_eq!(search(t(0, 0), t(4, 4), &grid), None);
    }

    #[test]
    fn out_of_bounds_goal_is_unreachable() {
        let grid = OccupancyGrid::new(5, 5).unwrap();
        assert_eq!(search(t(0, 0), t(5, 2), &grid), None);
        assert_eq!(search(t(0, 0), t(-1, 0), &grid), None);
    }

    #[test]
    fn open_diagonal_takes_nine_steps() {
        let grid = OccupancyGrid::new(10, 10).unwrap();
        let path = search(t(0, 0), t(9, 9), &grid).unwrap();
        assert_eq!(path.len(), 9);
        assert_eq!(path.last(), Some(&t(9, 9)));
        assert!(!path.contains(&t(0, 0)));
        assert_walkable(&path, t(0, 0), &grid);
    }

    #[test]
    fn open_grid_paths_match_chebyshev_distance() {
        let grid = OccupancyGrid::new(12, 12).unwrap();
        let pairs = [
            (t(0, 0), t(9, 3)),
            (t(11, 0), t(0, 11)),
            (t(5, 5), t(5, 0)),
            (t(3, 7), t(10, 8)),
            (t(6, 2), t(1, 1)),
        ];
        for (start, goal) in pairs {
            let path = search(start, goal, &grid).unwrap();
            assert_eq!(path.len() as u32, start.chebyshev(goal), "{start} -> {goal}");
            assert_walkable(&path, start, &grid);
        }
    }

    #[test]
    fn routes_around_a_wall() {
        let grid = OccupancyGrid::from_ascii(
            "
            ...#....
            ...#....
            ...#....
            ...#....
            ........
            ",
        )
        .unwrap();
        let path = search(t(0, 0), t(7, 0), &grid).unwrap();
        assert_walkable(&path, t(0, 0), &grid);
        assert_eq!(path.last(), Some(&t(7, 0)));
        assert!(path.contains(&t(3, 4)), "must pass through the gap");
    }

    #[test]
    fn enclosed_goal_is_unreachable() {
        let grid = OccupancyGrid::from_ascii(
            "
            ......
            ..###.
            ..#.#.
            ..###.
            ......
            ",
        )
        .unwrap();
        assert_eq!(search(t(0, 0), t(3, 2), &grid), None);
    }

    #[test]
    fn blocked_start_can_still_leave() {
        let grid = OccupancyGrid::with_blocked(4, 4, [t(0, 0)]).unwrap();
        let path = search(t(0, 0), t(2, 0), &grid).unwrap();
        assert_eq!(path, vec![t(1, 0), t(2, 0)]);
    }

    #[test]
    fn repeated_searches_are_identical() {
        let grid = OccupancyGrid::from_ascii(
            "
            ..........
            ..####....
            .....#....
            ..#..#.##.
            ..#.......
            ",
        )
        .unwrap();
        let a = search(t(0, 4), t(9, 0), &grid);
        let b = search(t(0, 4), t(9, 0), &grid);
        assert!(a.is_some());
        assert_eq!(a, b);
    }

    #[test]
    fn grid_changes_between_searches_are_respected() {
        let mut grid = OccupancyGrid::new(6, 3).unwrap();
        let first = search(t(0, 1), t(5, 1), &grid).unwrap();
        assert!(first.contains(&t(3, 1)));

        grid.set_blocked(t(3, 1), true);
        let second = search(t(0, 1), t(5, 1), &grid).unwrap();
        assert!(!second.contains(&t(3, 1)));
        assert_walkable(&second, t(0, 1), &grid);
    }

    #[test]
    fn expansion_cap_fails_like_no_path() {
        let grid = OccupancyGrid::new(50, 50).unwrap();
        let capped = Pathfinder::new(SearchConfig { max_iterations: 5 });
        assert_eq!(capped.search(t(0, 0), t(49, 49), &grid), None);
        assert!(Pathfinder::default().search(t(0, 0), t(49, 49), &grid).is_some());
    }

    #[test]
    fn adjacent_goal_is_single_step() {
        let grid = OccupancyGrid::new(3, 3).unwrap();
        assert_eq!(search(t(1, 1), t(2, 2), &grid), Some(vec![t(2, 2)]));
        assert_eq!(search(t(1, 1), t(1, 2), &grid), Some(vec![t(1, 2)]));
    }

    #[test]
    fn default_config_uses_ten_thousand_expansions() {
        assert_eq!(SearchConfig::default().max_iterations, 10_000);
    }
}
