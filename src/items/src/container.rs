use serde::{Deserialize, Serialize};

use crate::{Holder, Item, ItemId, Ownable};

/// 有序的物品容器（背包）
///
/// 容器拥有其中的物品，并成为它们的持有者。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemContainer {
    holder: Holder,
    items: Vec<Item>,
}

impl ItemContainer {
    pub fn new(holder: Holder) -> Self {
        Self {
            holder,
            items: Vec::new(),
        }
    }

    /// 放入物品并接管持有关系
    pub fn add_item(&mut self, mut item: Item) {
        item.set_owner(self.holder);
        self.items.push(item);
    }

    /// 取出物品；不存在时返回 None
    pub fn remove_item(&mut self, id: ItemId) -> Option<Item> {
        let index = self.items.iter().position(|item| item.id == id)?;
        Some(self.items.remove(index))
    }

    pub fn has_item(&self, id: ItemId) -> bool {
        self.items.iter().any(|item| item.id == id)
    }

    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn first(&self) -> Option<&Item> {
        self.items.first()
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn total_weight(&self) -> u32 {
        self.items.iter().map(|item| item.weight).sum()
    }
}
