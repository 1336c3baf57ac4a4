// src/dungeon/src/cell.rs
use items::ItemId;
use serde::{Deserialize, Serialize};
use strum::Display;

use crate::{ActorId, StairsId, stairs::StairsDir, trap::Trap};

/// 基础地形
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
pub enum Terrain {
    Floor,
    Wall,
}

impl Terrain {
    /// 是否可以站立
    pub fn is_walkable(self) -> bool {
        matches!(self, Terrain::Floor)
    }

    /// 是否透光
    pub fn light_passes(self) -> bool {
        !matches!(self, Terrain::Wall)
    }
}

/// 放在格子上的地图元素
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Element {
    Stairs { id: StairsId, dir: StairsDir },
}

/// 表示地图上的一个格子
///
/// 一种基础地形加四个互相独立的有序列表。
/// 实体本身由 `Level` 持有，格子里只记录它们的 id。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapCell {
    pub terrain: Terrain,
    pub(crate) actors: Vec<ActorId>,
    pub(crate) items: Vec<ItemId>,
    pub(crate) elements: Vec<Element>,
    pub(crate) traps: Vec<Trap>,
    explored: bool,
}

impl MapCell {
    pub fn new(terrain: Terrain) -> Self {
        Self {
            terrain,
            actors: Vec::new(),
            items: Vec::new(),
            elements: Vec::new(),
            traps: Vec::new(),
            explored: false,
        }
    }

    pub fn actors(&self) -> &[ActorId] {
        &self.actors
    }

    pub fn items(&self) -> &[ItemId] {
        &self.items
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn traps(&self) -> &[Trap] {
        &self.traps
    }

    pub fn has_actors(&self) -> bool {
        !self.actors.is_empty()
    }

    pub fn has_items(&self) -> bool {
        !self.items.is_empty()
    }

    /// 格子上的第一个楼梯
    pub fn stairs(&self) -> Option<(StairsId, StairsDir)> {
        self.elements.iter().find_map(|element| match element {
            Element::Stairs { id, dir } => Some((*id, *dir)),
        })
    }

    /// 地形可走且没有角色
    pub fn is_free(&self) -> bool {
        self.terrain.is_walkable() && self.actors.is_empty()
    }

    pub fn is_explored(&self) -> bool {
        self.explored
    }

    /// 探索标记只增不减
    pub(crate) fn mark_explored(&mut self) {
        self.explored = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_free_cell() {
        let mut cell = MapCell::new(Terrain::Floor);
        assert!(cell.is_free());
        cell.actors.push(ActorId(1));
        assert!(!cell.is_free());
        assert!(!MapCell::new(Terrain::Wall).is_free());
    }

    #[test]
    fn test_stairs_lookup() {
        let mut cell = MapCell::new(Terrain::Floor);
        assert_eq!(cell.stairs(), None);
        cell.elements.push(Element::Stairs {
            id: StairsId(4),
            dir: StairsDir::Up,
        });
        assert_eq!(cell.stairs(), Some((StairsId(4), StairsDir::Up)));
    }

    #[test]
    fn test_terrain_names() {
        assert_eq!(Terrain::Wall.to_string(), "wall");
        assert!(!Terrain::Wall.light_passes());
        assert!(Terrain::Floor.is_walkable());
    }
}
