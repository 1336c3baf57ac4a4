// src/dungeon/src/map.rs
use combat::VisionSystem;
use serde::{Deserialize, Serialize};

use crate::{
    Position,
    cell::{MapCell, Terrain},
};

/// 固定大小的格子网格，创建后不再改变尺寸
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Map {
    cols: i32,
    rows: i32,
    cells: Vec<MapCell>,
}

impl Map {
    /// 全部为地板的地图
    pub fn new(cols: i32, rows: i32) -> Self {
        Self::from_fn(cols, rows, |_, _| Terrain::Floor)
    }

    pub fn from_fn(cols: i32, rows: i32, terrain: impl Fn(i32, i32) -> Terrain) -> Self {
        let cols = cols.max(0);
        let rows = rows.max(0);
        let mut cells = Vec::with_capacity(cols as usize * rows as usize);
        for y in 0..rows {
            for x in 0..cols {
                cells.push(MapCell::new(terrain(x, y)));
            }
        }
        Self { cols, rows, cells }
    }

    /// 由字符行构建地图：`#` 为墙，其余为地板
    pub fn from_ascii(rows: &[&str]) -> Self {
        let cols = rows.iter().map(|row| row.chars().count()).max().unwrap_or(0) as i32;
        Self::from_fn(cols, rows.len() as i32, |x, y| {
            match rows[y as usize].chars().nth(x as usize) {
                Some('#') => Terrain::Wall,
                _ => Terrain::Floor,
            }
        })
    }

    pub fn cols(&self) -> i32 {
        self.cols
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    pub fn has_xy(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.cols && y < self.rows
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        self.has_xy(x, y)
            .then(|| y as usize * self.cols as usize + x as usize)
    }

    pub fn cell(&self, x: i32, y: i32) -> Option<&MapCell> {
        self.index(x, y).and_then(|i| self.cells.get(i))
    }

    pub(crate) fn cell_mut(&mut self, x: i32, y: i32) -> Option<&mut MapCell> {
        self.index(x, y).and_then(move |i| self.cells.get_mut(i))
    }

    /// 修改基础地形（地图生成用）
    pub fn set_terrain(&mut self, x: i32, y: i32, terrain: Terrain) -> bool {
        match self.cell_mut(x, y) {
            Some(cell) => {
                cell.terrain = terrain;
                true
            }
            None => false,
        }
    }

    /// 越界、墙或有角色时不可通行
    pub fn is_passable(&self, x: i32, y: i32) -> bool {
        self.cell(x, y).is_some_and(MapCell::is_free)
    }

    /// 越界和墙都阻挡视线
    pub fn light_passes(&self, x: i32, y: i32) -> bool {
        self.cell(x, y).is_some_and(|cell| cell.terrain.light_passes())
    }

    /// 所有空闲格子，按行优先排列
    pub fn get_free(&self) -> Vec<Position> {
        self.positions()
            .filter(|p| self.is_passable(p.x, p.y))
            .collect()
    }

    /// 从 `origin` 出发、半径 `range` 内可见的地图内格子，按行优先排列
    pub fn visible_cells(&self, origin: Position, range: u32) -> Vec<Position> {
        if !self.has_xy(origin.x, origin.y) {
            return Vec::new();
        }
        let is_blocked = |x: i32, y: i32| !self.light_passes(x, y);
        let mut cells: Vec<Position> =
            VisionSystem::calculate_fov(origin.x, origin.y, range, &is_blocked)
                .into_iter()
                .filter(|&(x, y)| self.has_xy(x, y))
                .map(Position::from)
                .collect();
        cells.sort_by_key(|p| (p.y, p.x));
        cells
    }

    pub(crate) fn mark_explored(&mut self, cells: &[Position]) {
        for p in cells {
            if let Some(cell) = self.cell_mut(p.x, p.y) {
                cell.mark_explored();
            }
        }
    }

    pub fn is_explored(&self, x: i32, y: i32) -> bool {
        self.cell(x, y).is_some_and(MapCell::is_explored)
    }

    pub fn explored_cells(&self) -> Vec<Position> {
        self.positions()
            .filter(|p| self.is_explored(p.x, p.y))
            .collect()
    }

    fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.rows).flat_map(move |y| (0..self.cols).map(move |x| Position::new(x, y)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ActorId;

    fn room() -> Map {
        Map::from_ascii(&["#####", "#...#", "#.#.#", "#...#", "#####"])
    }

    #[test]
    fn test_out_of_bounds_is_never_passable() {
        let map = Map::new(3, 3);
        for (x, y) in [(-1, 0), (0, -1), (3, 0), (0, 3), (i32::MIN, i32::MAX)] {
            assert!(!map.is_passable(x, y));
            assert!(!map.light_passes(x, y));
            assert!(map.cell(x, y).is_none());
        }
    }

    #[test]
    fn test_from_ascii() {
        let map = room();
        assert_eq!((map.cols(), map.rows()), (5, 5));
        assert!(!map.is_passable(0, 0));
        assert!(map.is_passable(1, 1));
        assert!(!map.is_passable(2, 2));
        assert_eq!(map.get_free().len(), 8);
    }

    #[test]
    fn test_occupied_cell_blocks_passage_not_sight() {
        let mut map = room();
        map.cell_mut(1, 1).unwrap().actors.push(ActorId(1));
        assert!(!map.is_passable(1, 1));
        assert!(map.light_passes(1, 1));
        assert!(!map.get_free().contains(&Position::new(1, 1)));
    }

    #[test]
    fn test_visible_cells_stay_in_bounds() {
        let map = Map::new(4, 4);
        let seen = map.visible_cells(Position::new(0, 0), 10);
        assert_eq!(seen.len(), 16);
        assert_eq!(seen[0], Position::new(0, 0));
    }

    #[test]
    fn test_pillar_hides_cell_behind_it() {
        let map = Map::from_ascii(&[".....", ".....", "..#..", ".....", "....."]);
        let seen = map.visible_cells(Position::new(2, 0), 4);
        assert!(seen.contains(&Position::new(2, 2)));
        assert!(!seen.contains(&Position::new(2, 3)));
        assert!(!seen.contains(&Position::new(2, 4)));
    }

    #[test]
    fn test_explored_is_append_only() {
        let mut map = room();
        assert!(map.explored_cells().is_empty());
        map.mark_explored(&[Position::new(1, 1), Position::new(9, 9)]);
        map.mark_explored(&[Position::new(2, 1)]);
        assert_eq!(
            map.explored_cells(),
            vec![Position::new(1, 1), Position::new(2, 1)]
        );
    }
}
