//! 背包 + 装备组合，每个角色持有一份。

use error::InventoryError;
use serde::{Deserialize, Serialize};

use crate::{Equipment, Holder, Item, ItemContainer, ItemId, SlotKind};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvAndEquip {
    inventory: ItemContainer,
    equipment: Equipment,
}

impl InvAndEquip {
    pub fn new(actor: u32) -> Self {
        Self {
            inventory: ItemContainer::new(Holder::Inventory { actor }),
            equipment: Equipment::new(actor),
        }
    }

    pub fn add_item(&mut self, item: Item) {
        self.inventory.add_item(item);
    }

    /// 从背包移到装备栏；失败时物品留在背包
    pub fn equip_item(&mut self, id: ItemId) -> Result<(), InventoryError> {
        let item = self
            .inventory
            .remove_item(id)
            .ok_or(InventoryError::NotInInventory(id.0))?;
        match self.equipment.equip_item(item) {
            Ok(()) => Ok(()),
            Err((err, item)) => {
                self.inventory.add_item(item);
                Err(err)
            }
        }
    }

    /// 从装备栏放回背包
    pub fn unequip_item(&mut self, slot: SlotKind, index: usize) -> Result<(), InventoryError> {
        let item = self.equipment.unequip_item(slot, index)?;
        tracing::debug!(item = item.id.0, %slot, "unequipped");
        self.inventory.add_item(item);
        Ok(())
    }

    pub fn inventory(&self) -> &ItemContainer {
        &self.inventory
    }

    pub fn equipment(&self) -> &Equipment {
        &self.equipment
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ItemKind, Ownable};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_equip_requires_inventory() {
        let mut inv = InvAndEquip::new(1);
        assert_eq!(
            inv.equip_item(ItemId(5)),
            Err(InventoryError::NotInInventory(5))
        );
    }

    #[test]
    fn test_equip_and_unequip_round_trip() {
        let mut inv = InvAndEquip::new(1);
        inv.add_item(Item::new(ItemId(1), ItemKind::Weapon, "Sword"));

        inv.equip_item(ItemId(1)).unwrap();
        assert!(inv.inventory().is_empty());
        assert!(inv.equipment().is_equipped(ItemId(1)));

        inv.unequip_item(SlotKind::Hand, 0).unwrap();
        let back = inv.inventory().get(ItemId(1)).unwrap();
        assert_eq!(back.owner(), Some(&Holder::Inventory { actor: 1 }));
        assert!(!inv.equipment().is_equipped(ItemId(1)));
    }

    #[test]
    fn test_full_slot_keeps_item_in_inventory() {
        let mut inv = InvAndEquip::new(2);
        for id in 1..=3 {
            inv.add_item(Item::new(ItemId(id), ItemKind::Weapon, "Dagger"));
        }
        inv.equip_item(ItemId(1)).unwrap();
        inv.equip_item(ItemId(2)).unwrap();

        assert_eq!(
            inv.equip_item(ItemId(3)),
            Err(InventoryError::SlotFull("hand".into()))
        );
        assert!(inv.inventory().has_item(ItemId(3)));
    }
}
