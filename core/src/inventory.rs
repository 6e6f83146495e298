use alloc::vec::Vec;
use core::fmt;
use serde::{Deserialize, Serialize};

use crate::*;

/// Identity of an unplaced pipe, unique within its inventory and never reused.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ItemId(u32);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: ItemId,
    pub pipe: PipeType,
}

/// Pipes the player has not placed yet, kept in insertion order for display.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Inventory {
    items: Vec<InventoryItem>,
    next_id: u32,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, pipe: PipeType) -> ItemId {
        let id = ItemId(self.next_id);
        self.next_id += 1;
        self.items.push(InventoryItem { id, pipe });
        id
    }

    pub fn remove(&mut self, id: ItemId) -> Result<InventoryItem> {
        let index = self.position(id)?;
        Ok(self.items.remove(index))
    }

    /// Turns the item to its next orientation, keeping its id and listing position.
    pub fn rotate_in_place(&mut self, id: ItemId) -> Result<PipeType> {
        let index = self.position(id)?;
        let item = &mut self.items[index];
        item.pipe = item.pipe.rotated();
        Ok(item.pipe)
    }

    pub fn get(&self, id: ItemId) -> Option<&InventoryItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn list(&self) -> &[InventoryItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn position(&self, id: ItemId) -> Result<usize> {
        self.items
            .iter()
            .position(|item| item.id == id)
            .ok_or(GameError::ItemNotFound)
    }
}
