use error::InventoryError;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoEnumIterator};

use crate::{Holder, Item, ItemId, Ownable};

/// 装备位
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SlotKind {
    Hand,
    Head,
    Chest,
    Neck,
    Feet,
}

impl SlotKind {
    /// 每个装备位可同时容纳的物品数
    pub fn capacity(self) -> usize {
        match self {
            SlotKind::Hand => 2,
            _ => 1,
        }
    }
}

/// 固定容量的单个装备位
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipSlot {
    kind: SlotKind,
    items: Vec<Item>,
}

impl EquipSlot {
    pub fn new(kind: SlotKind) -> Self {
        Self {
            kind,
            items: Vec::with_capacity(kind.capacity()),
        }
    }

    pub fn kind(&self) -> SlotKind {
        self.kind
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.kind.capacity()
    }

    /// 装备物品；装备位已满时原样返还
    pub fn equip(&mut self, actor: u32, mut item: Item) -> Result<(), Item> {
        if self.is_full() {
            return Err(item);
        }
        item.set_owner(Holder::Equipment {
            actor,
            slot: self.kind,
        });
        self.items.push(item);
        Ok(())
    }

    /// 卸下第 `index` 个物品
    pub fn unequip(&mut self, index: usize) -> Option<Item> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }
}

/// 角色的全部装备位
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
    actor: u32,
    slots: Vec<EquipSlot>,
}

impl Equipment {
    pub fn new(actor: u32) -> Self {
        Self {
            actor,
            slots: SlotKind::iter().map(EquipSlot::new).collect(),
        }
    }

    pub fn slot(&self, kind: SlotKind) -> Option<&EquipSlot> {
        self.slots.iter().find(|slot| slot.kind == kind)
    }

    fn slot_mut(&mut self, kind: SlotKind) -> Option<&mut EquipSlot> {
        self.slots.iter_mut().find(|slot| slot.kind == kind)
    }

    /// 装备到物品自带的装备位，没有则放在手上
    pub fn equip_item(&mut self, item: Item) -> Result<(), (InventoryError, Item)> {
        let kind = item.slot.unwrap_or(SlotKind::Hand);
        let actor = self.actor;
        match self.slot_mut(kind) {
            Some(slot) => slot
                .equip(actor, item)
                .map_err(|item| (InventoryError::SlotFull(kind.to_string()), item)),
            None => Err((InventoryError::SlotFull(kind.to_string()), item)),
        }
    }

    pub fn unequip_item(&mut self, kind: SlotKind, index: usize) -> Result<Item, InventoryError> {
        self.slot_mut(kind)
            .and_then(|slot| slot.unequip(index))
            .ok_or_else(|| InventoryError::NothingEquipped {
                slot: kind.to_string(),
                index,
            })
    }

    pub fn is_equipped(&self, id: ItemId) -> bool {
        self.slots
            .iter()
            .any(|slot| slot.items.iter().any(|item| item.id == id))
    }

    /// 所有已装备物品
    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.slots.iter().flat_map(|slot| slot.items.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ItemKind;

    fn dagger(id: u32) -> Item {
        Item::new(ItemId(id), ItemKind::Weapon, "Dagger")
    }

    #[test]
    fn test_slot_capacities() {
        assert_eq!(SlotKind::Hand.capacity(), 2);
        for kind in [SlotKind::Head, SlotKind::Chest, SlotKind::Neck, SlotKind::Feet] {
            assert_eq!(kind.capacity(), 1);
        }
    }

    #[test]
    fn test_two_hands_then_full() {
        let mut equipment = Equipment::new(1);
        assert!(equipment.equip_item(dagger(1)).is_ok());
        assert!(equipment.equip_item(dagger(2)).is_ok());

        let (err, returned) = equipment.equip_item(dagger(3)).unwrap_err();
        assert_eq!(err, InventoryError::SlotFull("hand".into()));
        assert_eq!(returned.id, ItemId(3));
        assert_eq!(equipment.items().count(), 2);
    }

    #[test]
    fn test_equip_sets_owner_and_unequip() {
        let mut equipment = Equipment::new(9);
        let helmet = Item::new(ItemId(4), ItemKind::Armor, "Helmet").with_slot(SlotKind::Head);
        equipment.equip_item(helmet).unwrap();

        let slot = equipment.slot(SlotKind::Head).unwrap();
        assert_eq!(
            slot.items()[0].owner(),
            Some(&Holder::Equipment {
                actor: 9,
                slot: SlotKind::Head
            })
        );
        assert!(equipment.is_equipped(ItemId(4)));

        let removed = equipment.unequip_item(SlotKind::Head, 0).unwrap();
        assert_eq!(removed.id, ItemId(4));
        assert!(equipment.unequip_item(SlotKind::Head, 0).is_err());
    }
}
