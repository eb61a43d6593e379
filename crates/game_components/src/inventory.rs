//! Slot-based item storage.

use engine_component::Component;
use serde::{Deserialize, Serialize};

use crate::resources::ItemKind;

/// A stack of items in one inventory slot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Item {
    pub kind: ItemKind,
    pub name: String,
    pub count: u32,
}

impl Item {
    #[must_use]
    pub fn new(kind: ItemKind, name: impl Into<String>, count: u32) -> Self {
        Self {
            kind,
            name: name.into(),
            count,
        }
    }

    /// An item named after its kind.
    #[must_use]
    pub fn of_kind(kind: ItemKind, count: u32) -> Self {
        Self::new(kind, kind.label(), count)
    }

    fn stacks_with(&self, other: &Item) -> bool {
        self.kind.is_stackable() && self.kind == other.kind && self.name == other.name
    }
}

/// Fixed-size row of item slots with one selected slot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Inventory {
    pub slots: Vec<Option<Item>>,
    pub selected_slot: usize,
}

impl Inventory {
    /// Default number of slots.
    pub const DEFAULT_SLOTS: usize = 9;

    /// An empty inventory with `size` slots.
    #[must_use]
    pub fn with_slots(size: usize) -> Self {
        Self {
            slots: vec![None; size],
            selected_slot: 0,
        }
    }

    /// Store `item`, merging into an existing stack when possible,
    /// otherwise taking the first empty slot.
    ///
    /// Returns `false` if there was no room; the inventory is unchanged.
    pub fn add_item(&mut self, item: Item) -> bool {
        if let Some(stack) = self
            .slots
            .iter_mut()
            .flatten()
            .find(|stack| stack.stacks_with(&item))
        {
            stack.count = stack.count.saturating_add(item.count);
            return true;
        }
        match self.slots.iter_mut().find(|slot| slot.is_none()) {
            Some(slot) => {
                *slot = Some(item);
                true
            }
            None => false,
        }
    }

    /// Empty `slot` and return what was in it.
    pub fn remove_item(&mut self, slot: usize) -> Option<Item> {
        self.slots.get_mut(slot).and_then(Option::take)
    }

    /// Select `slot`. Returns `false` if it is out of range.
    pub fn select_slot(&mut self, slot: usize) -> bool {
        if slot < self.slots.len() {
            self.selected_slot = slot;
            true
        } else {
            false
        }
    }

    /// The item in the selected slot.
    #[must_use]
    pub fn selected_item(&self) -> Option<&Item> {
        self.slots.get(self.selected_slot).and_then(Option::as_ref)
    }

    /// Total count of `kind` across all slots.
    #[must_use]
    pub fn count_of(&self, kind: ItemKind) -> u32 {
        self.slots
            .iter()
            .flatten()
            .filter(|item| item.kind == kind)
            .map(|item| item.count)
            .sum()
    }

    /// Returns `true` if every slot is occupied.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }
}

impl Default for Inventory {
    fn default() -> Self {
        Self::with_slots(Self::DEFAULT_SLOTS)
    }
}

impl Component for Inventory {
    fn type_name() -> &'static str {
        "Inventory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_item_stacks_same_kind_and_name() {
        let mut inv = Inventory::with_slots(3);
        assert!(inv.add_item(Item::of_kind(ItemKind::Wood, 2)));
        assert!(inv.add_item(Item::of_kind(ItemKind::Wood, 3)));
        assert_eq!(inv.slots[0].as_ref().map(|i| i.count), Some(5));
        assert!(inv.slots[1].is_none());
    }

    #[test]
    fn test_different_names_do_not_stack() {
        let mut inv = Inventory::with_slots(3);
        assert!(inv.add_item(Item::new(ItemKind::Wood, "Oak", 1)));
        assert!(inv.add_item(Item::new(ItemKind::Wood, "Pine", 1)));
        assert!(inv.slots[1].is_some());
        assert_eq!(inv.count_of(ItemKind::Wood), 2);
    }

    #[test]
    fn test_eggs_never_stack() {
        let mut inv = Inventory::with_slots(2);
        assert!(inv.add_item(Item::of_kind(ItemKind::Egg, 1)));
        assert!(inv.add_item(Item::of_kind(ItemKind::Egg, 1)));
        assert!(inv.is_full());
        assert!(!inv.add_item(Item::of_kind(ItemKind::Egg, 1)));
    }

    #[test]
    fn test_full_inventory_still_stacks() {
        let mut inv = Inventory::with_slots(1);
        assert!(inv.add_item(Item::of_kind(ItemKind::Stone, 1)));
        assert!(!inv.add_item(Item::of_kind(ItemKind::Wood, 1)));
        assert!(inv.add_item(Item::of_kind(ItemKind::Stone, 4)));
        assert_eq!(inv.count_of(ItemKind::Stone), 5);
    }

    #[test]
    fn test_remove_and_select() {
        let mut inv = Inventory::with_slots(2);
        inv.add_item(Item::of_kind(ItemKind::Fruit, 1));
        assert!(inv.select_slot(0));
        assert_eq!(inv.selected_item().map(|i| i.kind), Some(ItemKind::Fruit));
        assert!(!inv.select_slot(2));
        assert_eq!(inv.selected_slot, 0);

        let taken = inv.remove_item(0);
        assert_eq!(taken.map(|i| i.count), Some(1));
        assert!(inv.selected_item().is_none());
        assert!(inv.remove_item(0).is_none());
        assert!(inv.remove_item(7).is_none());
    }

    #[test]
    fn test_inventory_serde_shape() {
        let mut inv = Inventory::with_slots(1);
        inv.add_item(Item::of_kind(ItemKind::Gold, 2));
        let json = serde_json::to_value(&inv).unwrap();
        assert_eq!(json["slots"][0]["name"], "Gold");
        assert_eq!(json["selected_slot"], 0);
    }
}
