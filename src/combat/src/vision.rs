//! Field of view via recursive shadowcasting.
//!
//! The sweep runs once per octant. Range is a ring distance (a square
//! around the viewer), matching 8-directional movement. Opaque cells
//! are themselves visible but hide everything behind them.
use std::collections::HashSet;

/// Multipliers mapping octant-local (col, row) to world offsets.
const OCTANTS: [(i32, i32, i32, i32); 8] = [
    (1, 0, 0, 1),
    (0, 1, 1, 0),
    (0, -1, 1, 0),
    (-1, 0, 0, 1),
    (-1, 0, 0, -1),
    (0, -1, -1, 0),
    (0, 1, -1, 0),
    (1, 0, 0, -1),
];

pub struct VisionSystem;

impl VisionSystem {
    /// Calculate the field of view from `(x, y)`.
    /// Returns the set of coordinates visible from there, the origin included.
    pub fn calculate_fov(
        x: i32,
        y: i32,
        range: u32,
        is_blocked: &dyn Fn(i32, i32) -> bool,
    ) -> HashSet<(i32, i32)> {
        let mut visible = HashSet::new();
        visible.insert((x, y));

        let radius = range as i32;
        for octant in OCTANTS {
            Self::cast_light((x, y), 1, 1.0, 0.0, radius, octant, is_blocked, &mut visible);
        }
        visible
    }

    #[allow(clippy::too_many_arguments)]
    fn cast_light(
        origin: (i32, i32),
        row: i32,
        mut start: f64,
        end: f64,
        radius: i32,
        (xx, xy, yx, yy): (i32, i32, i32, i32),
        is_blocked: &dyn Fn(i32, i32) -> bool,
        visible: &mut HashSet<(i32, i32)>,
    ) {
        if start < end {
            return;
        }

        let mut new_start = 0.0;
        for j in row..=radius {
            let dy = -j;
            let mut blocked = false;

            for dx in -j..=0 {
                let left_slope = (dx as f64 - 0.5) / (dy as f64 + 0.5);
                let right_slope = (dx as f64 + 0.5) / (dy as f64 - 0.5);
                if start < right_slope {
                    continue;
                }
                if end > left_slope {
                    break;
                }

                let cx = origin.0 + dx * xx + dy * xy;
                let cy = origin.1 + dx * yx + dy * yy;
                visible.insert((cx, cy));

                let opaque = is_blocked(cx, cy);
                if blocked {
                    if opaque {
                        new_start = right_slope;
                        continue;
                    }
                    blocked = false;
                    start = new_start;
                } else if opaque && j < radius {
                    blocked = true;
                    Self::cast_light(
                        origin,
                        j + 1,
                        start,
                        left_slope,
                        radius,
                        (xx, xy, yx, yy),
                        is_blocked,
                        visible,
                    );
                    new_start = right_slope;
                }
            }

            if blocked {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn open(_: i32, _: i32) -> bool {
        false
    }

    #[test]
    fn test_open_field_is_square() {
        let fov = VisionSystem::calculate_fov(0, 0, 2, &open);
        assert_eq!(fov.len(), 25);
        assert!(fov.contains(&(2, 2)));
        assert!(fov.contains(&(-2, 1)));
        assert!(!fov.contains(&(3, 0)));
    }

    #[test]
    fn test_zero_range_sees_only_origin() {
        let fov = VisionSystem::calculate_fov(5, 5, 0, &open);
        assert_eq!(fov.into_iter().collect::<Vec<_>>(), vec![(5, 5)]);
    }

    #[test]
    fn test_wall_blocks_line_behind_it() {
        // wall two cells east of the viewer
        let is_blocked = |x: i32, y: i32| x == 2 && y == 0;
        let fov = VisionSystem::calculate_fov(0, 0, 5, &is_blocked);

        assert!(fov.contains(&(1, 0)));
        assert!(fov.contains(&(2, 0)), "the wall itself is visible");
        assert!(!fov.contains(&(3, 0)));
        assert!(!fov.contains(&(4, 0)));
        assert!(fov.contains(&(3, 3)));
    }

    #[test]
    fn test_walled_room() {
        // 5x5 room with walls at |x| == 3 or |y| == 3
        let is_blocked = |x: i32, y: i32| x.abs() >= 3 || y.abs() >= 3;
        let fov = VisionSystem::calculate_fov(0, 0, 8, &is_blocked);

        assert!(fov.contains(&(3, 0)));
        assert!(fov.contains(&(-3, -3)));
        assert!(!fov.contains(&(4, 0)));
        assert!(!fov.contains(&(0, -5)));
    }

    proptest! {
        #[test]
        fn prop_cells_behind_a_wall_in_a_straight_line_are_hidden(
            wall in 1i32..5,
            beyond in 1i32..5,
            dir in 0usize..4,
        ) {
            let (ux, uy) = [(1, 0), (-1, 0), (0, 1), (0, -1)][dir];
            let is_blocked = move |x: i32, y: i32| x == ux * wall && y == uy * wall;
            let fov = VisionSystem::calculate_fov(0, 0, 10, &is_blocked);
            let target = (ux * (wall + beyond), uy * (wall + beyond));
            prop_assert!(!fov.contains(&target));
        }
    }
}
