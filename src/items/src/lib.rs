//src/items/src/lib.rs
//! 物品、容器与装备
//!
//! 物品只被一个容器拥有（地面格子、背包或装备槽），
//! `Item::owner` 只是指回持有者的非拥有引用。

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

pub mod container;
pub mod equipment;
pub mod inventory;

pub use crate::container::ItemContainer;
pub use crate::equipment::{EquipSlot, Equipment, SlotKind};
pub use crate::inventory::InvAndEquip;

/// 物品唯一标识
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(pub u32);

/// 物品类型
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
pub enum ItemKind {
    Food,
    Weapon,
    Armor,
    Potion,
    Misc,
}

impl ItemKind {
    /// 该类物品默认的装备位
    pub fn default_slot(self) -> Option<SlotKind> {
        match self {
            ItemKind::Weapon => Some(SlotKind::Hand),
            ItemKind::Armor => Some(SlotKind::Chest),
            _ => None,
        }
    }
}

/// 物品当前的持有者（非拥有引用）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Holder {
    /// 躺在某层的地面格子上
    Cell { level: usize, x: i32, y: i32 },
    /// 在角色背包里
    Inventory { actor: u32 },
    /// 装备在角色身上
    Equipment { actor: u32, slot: SlotKind },
}

/// 可被持有的实体
pub trait Ownable {
    fn owner(&self) -> Option<&Holder>;

    /// 只更新引用，不移动实体本身
    fn set_owner(&mut self, holder: Holder);

    fn has_owner(&self) -> bool {
        self.owner().is_some()
    }
}

/// 基础物品结构
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub kind: ItemKind,
    pub name: String,
    pub weight: u32,
    /// 可装备时占用的装备位
    pub slot: Option<SlotKind>,
    owner: Option<Holder>,
}

impl Item {
    pub fn new(id: ItemId, kind: ItemKind, name: &str) -> Self {
        Self {
            id,
            kind,
            name: name.to_string(),
            weight: 1,
            slot: kind.default_slot(),
            owner: None,
        }
    }

    pub fn with_slot(mut self, slot: SlotKind) -> Self {
        self.slot = Some(slot);
        self
    }

    pub fn with_weight(mut self, weight: u32) -> Self {
        self.weight = weight;
        self
    }

    pub fn is_equippable(&self) -> bool {
        self.slot.is_some()
    }
}

impl Ownable for Item {
    fn owner(&self) -> Option<&Holder> {
        self.owner.as_ref()
    }

    fn set_owner(&mut self, holder: Holder) {
        self.owner = Some(holder);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_default_slots() {
        let sword = Item::new(ItemId(1), ItemKind::Weapon, "Sword");
        assert_eq!(sword.slot, Some(SlotKind::Hand));
        assert!(sword.is_equippable());

        let bread = Item::new(ItemId(2), ItemKind::Food, "Bread");
        assert!(!bread.is_equippable());

        let amulet = Item::new(ItemId(3), ItemKind::Misc, "Amulet").with_slot(SlotKind::Neck);
        assert_eq!(amulet.slot, Some(SlotKind::Neck));
    }

    #[test]
    fn test_set_owner_only_updates_reference() {
        let mut item = Item::new(ItemId(7), ItemKind::Potion, "Potion").with_weight(2);
        assert!(!item.has_owner());

        item.set_owner(Holder::Cell { level: 0, x: 3, y: 4 });
        item.set_owner(Holder::Inventory { actor: 1 });

        assert_eq!(item.owner(), Some(&Holder::Inventory { actor: 1 }));
        assert_eq!(item.weight, 2);
    }

    #[test]
    fn test_kind_names() {
        let names: Vec<String> = ItemKind::iter().map(|k| k.to_string()).collect();
        assert_eq!(names, vec!["food", "weapon", "armor", "potion", "misc"]);
    }
}
