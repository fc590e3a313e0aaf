//! Equipment and venue reference records.
//!
//! Read-only lookup data the scoring engine never depends on: rounds carry
//! opaque identifiers, and these records exist so callers can resolve them
//! to display names and offer pick lists. Managing the records (beyond
//! plain data entry) is outside the core.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::round::EquipmentSlot;

/// Shotgun record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Gun {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub manufacturer: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub notes: String,
    pub created_at: DateTime<Utc>,
}

/// Choke tube record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Choke {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub manufacturer: String,
    /// e.g. "half", "three-quarter", "full"
    #[serde(default)]
    pub constriction: String,
    #[serde(default)]
    pub notes: String,
    pub created_at: DateTime<Utc>,
}

/// Cartridge record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ammunition {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub manufacturer: String,
    /// e.g. "7.5", "8"
    #[serde(default)]
    pub shot_size: String,
    #[serde(default)]
    pub notes: String,
    pub created_at: DateTime<Utc>,
}

/// Shooting ground record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Club {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub notes: String,
    pub created_at: DateTime<Utc>,
}

impl Gun {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            manufacturer: String::new(),
            model: String::new(),
            notes: String::new(),
            created_at: Utc::now(),
        }
    }
}

impl Choke {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            manufacturer: String::new(),
            constriction: String::new(),
            notes: String::new(),
            created_at: Utc::now(),
        }
    }
}

impl Ammunition {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            manufacturer: String::new(),
            shot_size: String::new(),
            notes: String::new(),
            created_at: Utc::now(),
        }
    }
}

impl Club {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            city: String::new(),
            state: String::new(),
            notes: String::new(),
            created_at: Utc::now(),
        }
    }
}

/// A user's reference data: everything the setup pick lists draw from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EquipmentSet {
    #[serde(default)]
    pub guns: Vec<Gun>,
    #[serde(default)]
    pub chokes: Vec<Choke>,
    #[serde(default)]
    pub ammunition: Vec<Ammunition>,
    #[serde(default)]
    pub clubs: Vec<Club>,
}

impl EquipmentSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.guns.is_empty()
            && self.chokes.is_empty()
            && self.ammunition.is_empty()
            && self.clubs.is_empty()
    }

    /// Display name for an equipment id in a given slot, if on file.
    ///
    /// Both choke slots resolve against the same choke list.
    pub fn name_for(&self, slot: EquipmentSlot, id: &str) -> Option<&str> {
        if id.is_empty() {
            return None;
        }
        match slot {
            EquipmentSlot::Gun => {
                self.guns.iter().find(|g| g.id == id).map(|g| g.name.as_str())
            }
            EquipmentSlot::OverChoke | EquipmentSlot::UnderChoke => {
                self.chokes.iter().find(|c| c.id == id).map(|c| c.name.as_str())
            }
            EquipmentSlot::Ammunition => {
                self.ammunition.iter().find(|a| a.id == id).map(|a| a.name.as_str())
            }
        }
    }
}
