//! 地图生成器
//!
//! `Arena` 只有外墙，`Cellular` 用元胞自动机生成洞穴，`Empty` 全是地面。

use std::collections::HashMap;

use combat::SimRng;
use error::SimError;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::{Map, Pathfinder, Position, Terrain};

/// 初始墙壁比例
const WALL_CHANCE: f64 = 0.45;
/// 平滑次数
const SMOOTH_PASSES: usize = 4;

#[derive(Debug, Display, EnumString, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum MapKind {
    Arena,
    Cellular,
    Empty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapGen {
    pub kind: MapKind,
    pub cols: i32,
    pub rows: i32,
}

impl MapGen {
    pub fn new(kind: MapKind, cols: i32, rows: i32) -> Self {
        Self { kind, cols, rows }
    }

    pub fn from_name(name: &str, cols: i32, rows: i32) -> Result<Self, SimError> {
        let kind = name
            .parse::<MapKind>()
            .map_err(|_| SimError::UnknownGenerator(name.to_string()))?;
        Ok(Self::new(kind, cols, rows))
    }

    pub fn generate(&self, rng: &mut SimRng) -> Map {
        let map = match self.kind {
            MapKind::Empty => Map::new(self.cols, self.rows),
            MapKind::Arena => Map::from_fn(self.cols, self.rows, |x, y| {
                if self.is_border(x, y) {
                    Terrain::Wall
                } else {
                    Terrain::Floor
                }
            }),
            MapKind::Cellular => self.cellular(rng),
        };
        tracing::debug!(
            kind = %self.kind,
            cols = self.cols,
            rows = self.rows,
            free = map.get_free().len(),
            "map generated"
        );
        map
    }

    fn is_border(&self, x: i32, y: i32) -> bool {
        x == 0 || y == 0 || x == self.cols - 1 || y == self.rows - 1
    }

    fn cellular(&self, rng: &mut SimRng) -> Map {
        let mut walls: Vec<bool> = (0..self.rows * self.cols)
            .map(|_| rng.random_bool(WALL_CHANCE))
            .collect();

        for _ in 0..SMOOTH_PASSES {
            walls = (0..self.rows)
                .flat_map(|y| (0..self.cols).map(move |x| (x, y)))
                .map(|(x, y)| {
                    let around = self.walls_around(&walls, x, y);
                    // 4-5 规则
                    if walls[self.index(x, y)] {
                        around >= 4
                    } else {
                        around >= 5
                    }
                })
                .collect();
        }

        let mut map = Map::from_fn(self.cols, self.rows, |x, y| {
            if self.is_border(x, y) || walls[self.index(x, y)] {
                Terrain::Wall
            } else {
                Terrain::Floor
            }
        });
        Self::keep_largest_region(&mut map);
        map
    }

    fn index(&self, x: i32, y: i32) -> usize {
        y as usize * self.cols as usize + x as usize
    }

    /// 八邻域中的墙数，地图外算作墙
    fn walls_around(&self, walls: &[bool], x: i32, y: i32) -> usize {
        let mut count = 0;
        for dy in -1..=1 {
            for dx in -1..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let (nx, ny) = (x + dx, y + dy);
                let outside = nx < 0 || ny < 0 || nx >= self.cols || ny >= self.rows;
                if outside || walls[self.index(nx, ny)] {
                    count += 1;
                }
            }
        }
        count
    }

    /// 只保留最大的连通区域，其余地面填成墙
    fn keep_largest_region(map: &mut Map) {
        let mut region_of: HashMap<Position, usize> = HashMap::new();
        let mut sizes: Vec<usize> = Vec::new();

        for start in map.get_free() {
            if region_of.contains_key(&start) {
                continue;
            }
            let field = Pathfinder::distance_field(start, &|x, y| map.is_passable(x, y));
            let region = sizes.len();
            sizes.push(field.len());
            for pos in field.into_keys() {
                region_of.insert(pos, region);
            }
        }

        let Some(largest) = sizes
            .iter()
            .enumerate()
            .max_by_key(|&(_, size)| *size)
            .map(|(region, _)| region)
        else {
            return;
        };
        for (pos, region) in region_of {
            if region != largest {
                map.set_terrain(pos.x, pos.y, Terrain::Wall);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn connected(map: &Map) -> bool {
        let free = map.get_free();
        let Some(&start) = free.first() else {
            return true;
        };
        let field = Pathfinder::distance_field(start, &|x, y| map.is_passable(x, y));
        free.iter().all(|p| field.contains_key(p))
    }

    #[test]
    fn test_from_name() {
        assert_eq!(MapGen::from_name("Arena", 5, 5).unwrap().kind, MapKind::Arena);
        assert_eq!(MapGen::from_name("cellular", 5, 5).unwrap().kind, MapKind::Cellular);
        assert!(matches!(
            MapGen::from_name("maze", 5, 5),
            Err(SimError::UnknownGenerator(name)) if name == "maze"
        ));
    }

    #[test]
    fn test_arena_has_walls_only_on_border() {
        let map = MapGen::new(MapKind::Arena, 6, 4).generate(&mut SimRng::new(1));
        assert_eq!(map.get_free().len(), 4 * 2);
        assert!(!map.is_passable(0, 2));
        assert!(!map.is_passable(5, 3));
        assert!(map.is_passable(1, 1));
    }

    #[test]
    fn test_cellular_is_connected_and_reproducible() {
        let generator = MapGen::new(MapKind::Cellular, 40, 20);
        for seed in 0..5 {
            let a = generator.generate(&mut SimRng::new(seed));
            let b = generator.generate(&mut SimRng::new(seed));
            assert_eq!(a, b);
            assert!(connected(&a), "seed {seed} left a disconnected cave");
            assert!(!a.is_passable(0, 0));
        }
    }
}
