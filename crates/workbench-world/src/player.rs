//! The crafting player: carried stacks, worn items, bionics and bio-power.

use serde::{Deserialize, Serialize};
use tracing::debug;
use workbench_types::{BionicId, Item, Point};

use crate::error::WorldError;

/// An installed bionic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bionic {
    /// Bionic id (`bio_tools_welder`).
    pub id: BionicId,
}

impl Bionic {
    /// An installed bionic.
    pub fn new(id: impl Into<BionicId>) -> Self {
        Self { id: id.into() }
    }
}

/// The player whose possessions and surroundings are searched.
///
/// The carried inventory is a list of stacks; a stack groups identical items
/// and is removed once it becomes empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Where the player stands.
    #[serde(default)]
    pub position: Point,
    /// Carried item stacks.
    #[serde(default)]
    pub inventory: Vec<Vec<Item>>,
    /// Worn items.
    #[serde(default)]
    pub worn: Vec<Item>,
    /// Installed bionics.
    #[serde(default)]
    pub bionics: Vec<Bionic>,
    /// Bio-power available to bionics.
    #[serde(default)]
    pub power: i64,
}

impl Player {
    /// A player standing at `position` with nothing.
    pub fn new(position: Point) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Add a carried stack.
    #[must_use]
    pub fn with_stack(mut self, stack: Vec<Item>) -> Self {
        self.inventory.push(stack);
        self
    }

    /// Add a worn item.
    #[must_use]
    pub fn wearing(mut self, item: Item) -> Self {
        self.worn.push(item);
        self
    }

    /// Install a bionic.
    #[must_use]
    pub fn with_bionic(mut self, id: impl Into<BionicId>) -> Self {
        self.bionics.push(Bionic::new(id));
        self
    }

    /// Set bio-power.
    #[must_use]
    pub const fn with_power(mut self, power: i64) -> Self {
        self.power = power;
        self
    }

    /// Length of a stack, or `None` if the stack does not exist.
    pub fn stack_len(&self, stack: usize) -> Option<usize> {
        self.inventory.get(stack).map(Vec::len)
    }

    /// Borrow a carried item mutably.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::SlotOutOfRange`] if the stack or index is missing.
    pub fn stack_item_mut(&mut self, stack: usize, index: usize) -> Result<&mut Item, WorldError> {
        let stacks = self.inventory.len();
        let items = self
            .inventory
            .get_mut(stack)
            .ok_or(WorldError::SlotOutOfRange {
                index: stack,
                len: stacks,
            })?;
        let len = items.len();
        items
            .get_mut(index)
            .ok_or(WorldError::SlotOutOfRange { index, len })
    }

    /// Remove a carried item, leaving a possibly empty stack behind.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::SlotOutOfRange`] if the stack or index is missing.
    pub fn remove_stack_item(&mut self, stack: usize, index: usize) -> Result<Item, WorldError> {
        let stacks = self.inventory.len();
        let items = self
            .inventory
            .get_mut(stack)
            .ok_or(WorldError::SlotOutOfRange {
                index: stack,
                len: stacks,
            })?;
        let len = items.len();
        if index >= len {
            return Err(WorldError::SlotOutOfRange { index, len });
        }
        Ok(items.remove(index))
    }

    /// Borrow a worn item mutably.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::SlotOutOfRange`] if the index is missing.
    pub fn worn_item_mut(&mut self, index: usize) -> Result<&mut Item, WorldError> {
        let len = self.worn.len();
        self.worn
            .get_mut(index)
            .ok_or(WorldError::SlotOutOfRange { index, len })
    }

    /// Remove a worn item.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::SlotOutOfRange`] if the index is missing.
    pub fn remove_worn(&mut self, index: usize) -> Result<Item, WorldError> {
        let len = self.worn.len();
        if index >= len {
            return Err(WorldError::SlotOutOfRange { index, len });
        }
        Ok(self.worn.remove(index))
    }

    /// Drop stacks that became empty.
    pub fn remove_empty_stacks(&mut self) {
        self.inventory.retain(|stack| !stack.is_empty());
    }

    /// Whether a bionic is installed.
    pub fn has_bionic(&self, id: &BionicId) -> bool {
        self.bionics.iter().any(|b| &b.id == id)
    }

    /// Spend up to `amount` bio-power; returns how much was spent.
    pub fn drain_power(&mut self, amount: i64) -> i64 {
        let drained = amount.clamp(0, self.power.max(0));
        self.power = self.power.saturating_sub(drained);
        debug!(drained, left = self.power, "Drained bio-power");
        drained
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_stacks_are_compacted() {
        let mut player = Player::new(Point::new(0, 0))
            .with_stack(vec![Item::new("hammer")])
            .with_stack(vec![Item::new("2x4"), Item::new("2x4")]);
        assert!(player.remove_stack_item(0, 0).is_ok());
        assert_eq!(player.stack_len(0), Some(0));
        player.remove_empty_stacks();
        assert_eq!(player.inventory.len(), 1);
        assert_eq!(player.stack_len(0), Some(2));
    }

    #[test]
    fn power_drain_is_capped() {
        let mut player = Player::default().with_power(40);
        assert_eq!(player.drain_power(25), 25);
        assert_eq!(player.drain_power(25), 15);
        assert_eq!(player.power, 0);
    }

    #[test]
    fn missing_slots_are_errors() {
        let mut player = Player::default().wearing(Item::new("apron"));
        assert!(player.stack_item_mut(0, 0).is_err());
        assert!(player.worn_item_mut(0).is_ok());
        assert!(player.remove_worn(1).is_err());
    }
}
