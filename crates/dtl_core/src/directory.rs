//! Read-only id → display-name resolution.
//!
//! Rounds store opaque equipment identifiers; anything that wants a label
//! asks a directory. A missing record is not an error: callers fall back
//! to "Unknown" (or the raw id) and move on, so stale references in old
//! rounds never break display or aggregation.

use crate::models::{EquipmentSet, EquipmentSlot};

pub trait EquipmentDirectory {
    /// Display name for the id in the given slot, if the record exists.
    fn equipment_name(&self, slot: EquipmentSlot, id: &str) -> Option<String>;

    /// Label with the standard fallback for missing or empty ids.
    fn display_name(&self, slot: EquipmentSlot, id: &str) -> String {
        self.equipment_name(slot, id).unwrap_or_else(|| "Unknown".to_string())
    }
}

impl EquipmentDirectory for EquipmentSet {
    fn equipment_name(&self, slot: EquipmentSlot, id: &str) -> Option<String> {
        self.name_for(slot, id).map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Gun;

    #[test]
    fn test_display_name_fallback() {
        let mut set = EquipmentSet::new();
        set.guns.push(Gun::new("gun-1", "Miroku MK38"));

        assert_eq!(set.display_name(EquipmentSlot::Gun, "gun-1"), "Miroku MK38");
        assert_eq!(set.display_name(EquipmentSlot::Gun, "gun-gone"), "Unknown");
        assert_eq!(set.display_name(EquipmentSlot::Gun, ""), "Unknown");
        assert_eq!(set.display_name(EquipmentSlot::Ammunition, "gun-1"), "Unknown");
    }
}
