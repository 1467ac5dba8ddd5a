//! Slot assignment state for composing a custom bundle
//!
//! A [`SlotBoard`] is a fixed-size arena indexed by slot position, sized by
//! the bundle configuration's slot count. It is transient UI-side state:
//! discarded on navigation, consumed when the finished bundle becomes a
//! cart line.

use shared::cart::{CartLine, SlotChoice};
use shared::models::BundleConfig;
use thiserror::Error;

/// Slot assignment errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuilderError {
    #[error("bundle {0} is not customizable")]
    NotCustomizable(String),

    #[error("bundle {0} has no slots")]
    NoSlots(String),

    #[error("slot {index} is out of range (bundle has {total} slots)")]
    SlotOutOfRange { index: u32, total: u32 },

    #[error("no free slot remains")]
    NoFreeSlot,

    #[error("bundle incomplete: slots {missing:?} are empty")]
    Incomplete { missing: Vec<u32> },
}

/// Fixed-cardinality slot assignment state
#[derive(Debug, Clone)]
pub struct SlotBoard {
    config_id: String,
    slots: Vec<Option<String>>,
}

impl SlotBoard {
    /// Start composing a bundle from its configuration
    pub fn new(config: &BundleConfig) -> Result<Self, BuilderError> {
        if !config.is_customizable {
            return Err(BuilderError::NotCustomizable(config.id.clone()));
        }
        if config.total_slots == 0 {
            return Err(BuilderError::NoSlots(config.id.clone()));
        }
        Ok(Self {
            config_id: config.id.clone(),
            slots: vec![None; config.total_slots as usize],
        })
    }

    pub fn config_id(&self) -> &str {
        &self.config_id
    }

    pub fn total_slots(&self) -> u32 {
        self.slots.len() as u32
    }

    pub fn filled_count(&self) -> u32 {
        self.slots.iter().filter(|s| s.is_some()).count() as u32
    }

    /// True iff every slot is occupied
    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(|s| s.is_some())
    }

    /// Assign a reference to a specific slot, overwriting any occupant
    /// (last write wins, no history)
    pub fn assign(&mut self, slot_index: u32, reference: impl Into<String>) -> Result<(), BuilderError> {
        let total = self.slots.len() as u32;
        let slot = self
            .slots
            .get_mut(slot_index as usize)
            .ok_or(BuilderError::SlotOutOfRange {
                index: slot_index,
                total,
            })?;
        *slot = Some(reference.into());
        Ok(())
    }

    /// Assign to the lowest-indexed empty slot
    ///
    /// This is the catalog grid "add" path where the customer did not pick a
    /// slot explicitly; the choice is deterministic. Returns the slot used.
    pub fn auto_assign(&mut self, reference: impl Into<String>) -> Result<u32, BuilderError> {
        let index = self
            .slots
            .iter()
            .position(|s| s.is_none())
            .ok_or(BuilderError::NoFreeSlot)?;
        self.slots[index] = Some(reference.into());
        Ok(index as u32)
    }

    /// Clear a slot; returns whether it was occupied
    pub fn remove(&mut self, slot_index: u32) -> Result<bool, BuilderError> {
        let total = self.slots.len() as u32;
        let slot = self
            .slots
            .get_mut(slot_index as usize)
            .ok_or(BuilderError::SlotOutOfRange {
                index: slot_index,
                total,
            })?;
        Ok(slot.take().is_some())
    }

    /// Occupied slots in ascending slot order
    pub fn choices(&self) -> Vec<SlotChoice> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| {
                slot.as_ref().map(|reference| SlotChoice {
                    slot_index: i as u32,
                    reference: reference.clone(),
                })
            })
            .collect()
    }

    /// Consume the board into a custom-bundle cart line
    ///
    /// Every slot must be filled; an incomplete board is an explicit
    /// rejection naming the empty slots, never a silent no-op.
    pub fn into_cart_line(self, quantity: u32) -> Result<CartLine, BuilderError> {
        let missing: Vec<u32> = self
            .slots
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_none())
            .map(|(i, _)| i as u32)
            .collect();
        if !missing.is_empty() {
            return Err(BuilderError::Incomplete { missing });
        }
        let choices = self.choices();
        Ok(CartLine::custom_bundle(self.config_id, choices, quantity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(total_slots: u32) -> BundleConfig {
        BundleConfig {
            id: "set-custom".to_string(),
            name: "Discovery Set".to_string(),
            total_slots,
            volume_ml: 5,
            base_price: 4500,
            is_customizable: true,
            is_active: true,
        }
    }

    #[test]
    fn test_complete_board() {
        let mut board = SlotBoard::new(&config(3)).unwrap();
        assert!(!board.is_complete());

        board.assign(0, "var-a").unwrap();
        board.assign(1, "var-b").unwrap();
        board.assign(2, "var-c").unwrap();

        assert!(board.is_complete());
        assert_eq!(board.filled_count(), board.total_slots());
    }

    #[test]
    fn test_assign_overwrites() {
        let mut board = SlotBoard::new(&config(2)).unwrap();
        board.assign(0, "var-a").unwrap();
        board.assign(0, "var-b").unwrap();

        let choices = board.choices();
        assert_eq!(choices.len(), 1);
        assert_eq!(choices[0].reference, "var-b");
    }

    #[test]
    fn test_assign_out_of_range() {
        let mut board = SlotBoard::new(&config(2)).unwrap();
        assert_eq!(
            board.assign(2, "var-a"),
            Err(BuilderError::SlotOutOfRange { index: 2, total: 2 })
        );
    }

    #[test]
    fn test_auto_assign_lowest_empty() {
        let mut board = SlotBoard::new(&config(3)).unwrap();
        board.assign(1, "var-b").unwrap();

        assert_eq!(board.auto_assign("var-a").unwrap(), 0);
        assert_eq!(board.auto_assign("var-c").unwrap(), 2);
        assert_eq!(board.auto_assign("var-d"), Err(BuilderError::NoFreeSlot));
    }

    #[test]
    fn test_remove_clears_slot() {
        let mut board = SlotBoard::new(&config(2)).unwrap();
        board.assign(0, "var-a").unwrap();

        assert!(board.remove(0).unwrap());
        assert!(!board.remove(0).unwrap());
        assert_eq!(board.filled_count(), 0);
    }

    #[test]
    fn test_incomplete_rejection_names_slots() {
        let mut board = SlotBoard::new(&config(3)).unwrap();
        board.assign(1, "var-b").unwrap();

        match board.into_cart_line(1) {
            Err(BuilderError::Incomplete { missing }) => assert_eq!(missing, vec![0, 2]),
            other => panic!("expected Incomplete, got {:?}", other),
        }
    }

    #[test]
    fn test_into_cart_line_ascending_choices() {
        let mut board = SlotBoard::new(&config(3)).unwrap();
        board.assign(2, "var-c").unwrap();
        board.assign(0, "var-a").unwrap();
        board.assign(1, "var-b").unwrap();

        let line = board.into_cart_line(2).unwrap();
        match line {
            CartLine::CustomBundle {
                config_id,
                choices,
                quantity,
                ..
            } => {
                assert_eq!(config_id, "set-custom");
                assert_eq!(quantity, 2);
                let indices: Vec<u32> = choices.iter().map(|c| c.slot_index).collect();
                assert_eq!(indices, vec![0, 1, 2]);
            }
            other => panic!("expected CustomBundle, got {:?}", other),
        }
    }

    #[test]
    fn test_non_customizable_rejected() {
        let mut c = config(3);
        c.is_customizable = false;
        assert_eq!(
            SlotBoard::new(&c).unwrap_err(),
            BuilderError::NotCustomizable("set-custom".to_string())
        );
    }
}
