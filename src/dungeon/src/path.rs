//! Shortest paths on the 8-connected grid.
//!
//! Every query goes through one breadth-first propagation outward from the
//! target. On a uniform-cost grid this gives the same distances as Dijkstra.
//! The target itself is always part of the search; every other cell,
//! including the source, must satisfy the mode's passability rule.

use std::collections::{HashMap, VecDeque};

use crate::Position;

/// Neighbour order used for expansion and for breaking ties on the way back.
const DIRS: [(i32, i32); 8] = [
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

/// How cells are judged while searching.
pub enum PathMode<'a> {
    /// Every cell counts as open. The search stays inside the bounding
    /// rectangle of the two endpoints, which always contains a shortest path.
    IgnoreObstacles,
    /// Only cells accepted by the predicate can be entered.
    Obstacles(&'a dyn Fn(i32, i32) -> bool),
}

pub struct Pathfinder;

impl Pathfinder {
    /// Path from `source` to `target`, both included, source first.
    ///
    /// Returns a single cell when source and target coincide and an empty
    /// path when the target cannot be reached.
    pub fn shortest_path(source: Position, target: Position, mode: &PathMode) -> Vec<Position> {
        let dist = Self::propagate(target, Some(source), mode);
        Self::walk_back(source, target, &dist)
    }

    /// Number of steps between two cells, ignoring everything on the map.
    pub fn shortest_dist(a: Position, b: Position) -> usize {
        Self::shortest_path(a, b, &PathMode::IgnoreObstacles)
            .len()
            .saturating_sub(1)
    }

    /// Step counts from every reachable cell to `target`.
    pub fn distance_field(
        target: Position,
        passable: &dyn Fn(i32, i32) -> bool,
    ) -> HashMap<Position, u32> {
        Self::propagate(target, None, &PathMode::Obstacles(passable))
    }

    fn propagate(
        target: Position,
        stop_at: Option<Position>,
        mode: &PathMode,
    ) -> HashMap<Position, u32> {
        let bounds = stop_at.map(|s| {
            (
                s.x.min(target.x),
                s.y.min(target.y),
                s.x.max(target.x),
                s.y.max(target.y),
            )
        });
        let open = |p: Position| match mode {
            PathMode::IgnoreObstacles => match bounds {
                Some((x0, y0, x1, y1)) => p.x >= x0 && p.x <= x1 && p.y >= y0 && p.y <= y1,
                None => false,
            },
            PathMode::Obstacles(passable) => passable(p.x, p.y),
        };

        let mut dist = HashMap::new();
        let mut queue = VecDeque::new();
        dist.insert(target, 0u32);
        queue.push_back(target);

        while let Some(current) = queue.pop_front() {
            if Some(current) == stop_at {
                break;
            }
            let next = dist[&current] + 1;
            for (dx, dy) in DIRS {
                let p = current.offset(dx, dy);
                if dist.contains_key(&p) || !open(p) {
                    continue;
                }
                dist.insert(p, next);
                queue.push_back(p);
            }
        }
        dist
    }

    fn walk_back(
        source: Position,
        target: Position,
        dist: &HashMap<Position, u32>,
    ) -> Vec<Position> {
        let Some(&start) = dist.get(&source) else {
            return Vec::new();
        };

        let mut path = Vec::with_capacity(start as usize + 1);
        let mut current = source;
        path.push(current);
        while current != target {
            let wanted = dist[&current] - 1;
            let step = DIRS
                .iter()
                .map(|&(dx, dy)| current.offset(dx, dy))
                .find(|p| dist.get(p) == Some(&wanted));
            match step {
                Some(p) => {
                    current = p;
                    path.push(p);
                }
                None => return Vec::new(),
            }
        }
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Map;
    use proptest::prelude::*;

    #[test]
    fn test_same_cell() {
        let p = Position::new(3, 3);
        assert_eq!(
            Pathfinder::shortest_path(p, p, &PathMode::IgnoreObstacles),
            vec![p]
        );
        assert_eq!(Pathfinder::shortest_dist(p, p), 0);
    }

    #[test]
    fn test_distance_ignoring_obstacles_is_chebyshev() {
        let a = Position::new(0, 0);
        assert_eq!(Pathfinder::shortest_dist(a, Position::new(5, 2)), 5);
        assert_eq!(Pathfinder::shortest_dist(Position::new(-3, 4), a), 4);
        assert_eq!(Pathfinder::shortest_dist(a, Position::new(1, 1)), 1);
    }

    #[test]
    fn test_path_goes_around_wall() {
        let map = Map::from_ascii(&[".....", ".###.", "....."]);
        let passable = |x: i32, y: i32| map.is_passable(x, y);
        let path = Pathfinder::shortest_path(
            Position::new(0, 1),
            Position::new(4, 1),
            &PathMode::Obstacles(&passable),
        );

        assert_eq!(path.first(), Some(&Position::new(0, 1)));
        assert_eq!(path.last(), Some(&Position::new(4, 1)));
        assert_eq!(path.len(), 5);
        for pair in path.windows(2) {
            assert_eq!(pair[0].chebyshev(pair[1]), 1);
            assert!(map.is_passable(pair[1].x, pair[1].y));
        }
    }

    #[test]
    fn test_unreachable_target() {
        let map = Map::from_ascii(&["..#..", "..#..", "..#.."]);
        let passable = |x: i32, y: i32| map.is_passable(x, y);
        let path = Pathfinder::shortest_path(
            Position::new(0, 0),
            Position::new(4, 2),
            &PathMode::Obstacles(&passable),
        );
        assert!(path.is_empty());
    }

    #[test]
    fn test_distance_field() {
        let map = Map::from_ascii(&["...", ".#.", "..."]);
        let passable = |x: i32, y: i32| map.is_passable(x, y);
        let field = Pathfinder::distance_field(Position::new(0, 0), &passable);

        assert_eq!(field[&Position::new(0, 0)], 0);
        assert_eq!(field[&Position::new(2, 2)], 3);
        assert!(!field.contains_key(&Position::new(1, 1)));
        assert_eq!(field.len(), 8);
    }

    fn grid_with_walls(walls: &[(i32, i32)]) -> Map {
        let mut map = Map::new(8, 8);
        for &(x, y) in walls {
            map.set_terrain(x, y, crate::Terrain::Wall);
        }
        map
    }

    proptest! {
        #[test]
        fn prop_path_length_is_symmetric(
            walls in proptest::collection::vec((0i32..8, 0i32..8), 0..20),
            a in (0i32..8, 0i32..8),
            b in (0i32..8, 0i32..8),
        ) {
            let walls: Vec<_> = walls.into_iter().filter(|&w| w != a && w != b).collect();
            let map = grid_with_walls(&walls);
            let passable = |x: i32, y: i32| map.is_passable(x, y);
            let mode = PathMode::Obstacles(&passable);

            let forward = Pathfinder::shortest_path(a.into(), b.into(), &mode);
            let backward = Pathfinder::shortest_path(b.into(), a.into(), &mode);
            prop_assert_eq!(forward.len(), backward.len());
        }

        #[test]
        fn prop_ignore_obstacles_matches_chebyshev(
            a in (-20i32..20, -20i32..20),
            b in (-20i32..20, -20i32..20),
        ) {
            let (a, b): (Position, Position) = (a.into(), b.into());
            prop_assert_eq!(Pathfinder::shortest_dist(a, b), a.chebyshev(b) as usize);
        }
    }
}
