//! Equipment inventories and the equipment catalog

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::error::{GarrisonError, Result};

/// Item name -> count. Zero counts are never stored.
///
/// Iteration order of the underlying map is unspecified; anything shown to
/// the operator goes through [`Inventory::sorted`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Inventory {
    items: AHashMap<String, u32>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, item: &str) -> u32 {
        self.items.get(item).copied().unwrap_or(0)
    }

    pub fn contains(&self, item: &str) -> bool {
        self.items.contains_key(item)
    }

    pub fn add(&mut self, item: &str, quantity: u32) {
        if quantity == 0 {
            return;
        }
        let count = self.items.entry(item.to_string()).or_insert(0);
        *count = count.saturating_add(quantity);
    }

    /// Remove `quantity` units; fails without mutation if not enough are held
    pub fn take(&mut self, item: &str, quantity: u32) -> Result<()> {
        let available = self.count(item);
        if !self.contains(item) || available < quantity {
            return Err(GarrisonError::InsufficientEquipment {
                item: item.to_string(),
                requested: quantity,
                available,
            });
        }

        let remaining = available - quantity;
        if remaining == 0 {
            self.items.remove(item);
        } else {
            self.items.insert(item.to_string(), remaining);
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.items.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Items sorted by name
    pub fn sorted(&self) -> Vec<(&str, u32)> {
        let mut items: Vec<_> = self.iter().collect();
        items.sort_by(|a, b| a.0.cmp(b.0));
        items
    }

    /// Add every item of this inventory into a running total
    pub fn add_to(&self, totals: &mut AHashMap<String, u32>) {
        for (item, quantity) in self.iter() {
            let total = totals.entry(item.to_string()).or_insert(0);
            *total = total.saturating_add(quantity);
        }
    }
}

/// A known piece of equipment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentSpec {
    pub name: String,
    pub weight: f32,
    pub effectiveness: u8,
}

impl EquipmentSpec {
    pub fn new(name: &str, weight: f32, effectiveness: u8) -> Self {
        Self {
            name: name.to_string(),
            weight,
            effectiveness,
        }
    }
}

pub fn default_catalog() -> Vec<EquipmentSpec> {
    vec![
        EquipmentSpec::new("Rifle", 4.5, 7),
        EquipmentSpec::new("Pistol", 1.0, 4),
        EquipmentSpec::new("Medkit", 2.0, 8),
        EquipmentSpec::new("Radio", 1.0, 3),
        EquipmentSpec::new("Binoculars", 1.0, 5),
        EquipmentSpec::new("Ammo", 0.5, 6),
        EquipmentSpec::new("Grenade", 0.7, 8),
        EquipmentSpec::new("Water", 1.5, 4),
        EquipmentSpec::new("Night Scope", 1.2, 7),
    ]
}

/// Lookup table over the configured equipment
#[derive(Debug, Clone)]
pub struct EquipmentCatalog {
    specs: Vec<EquipmentSpec>,
}

impl EquipmentCatalog {
    pub fn new(specs: Vec<EquipmentSpec>) -> Self {
        Self { specs }
    }

    /// Case-insensitive lookup
    pub fn find(&self, name: &str) -> Option<&EquipmentSpec> {
        let name = name.trim().to_lowercase();
        self.specs.iter().find(|s| s.name.to_lowercase() == name)
    }

    /// Canonical catalog name for free-text input
    pub fn resolve(&self, name: &str) -> Result<&str> {
        self.find(name)
            .map(|s| s.name.as_str())
            .ok_or_else(|| GarrisonError::UnknownEquipment(name.trim().to_string()))
    }

    pub fn specs(&self) -> &[EquipmentSpec] {
        &self.specs
    }
}

impl Default for EquipmentCatalog {
    fn default() -> Self {
        Self::new(default_catalog())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inventory_add_take() {
        let mut inv = Inventory::new();
        inv.add("Ammo", 5);
        inv.add("Ammo", 3);
        assert_eq!(inv.count("Ammo"), 8);

        inv.take("Ammo", 2).unwrap();
        assert_eq!(inv.count("Ammo"), 6);
    }

    #[test]
    fn test_large_grants_saturate() {
        let mut inv = Inventory::new();
        inv.add("Ammo", 3_000_000_000);
        inv.add("Ammo", 3_000_000_000);
        assert_eq!(inv.count("Ammo"), u32::MAX);

        let mut totals = AHashMap::new();
        inv.add_to(&mut totals);
        inv.add_to(&mut totals);
        assert_eq!(totals["Ammo"], u32::MAX);
    }

    #[test]
    fn test_take_exact_removes_key() {
        let mut inv = Inventory::new();
        inv.add("Grenade", 2);
        inv.take("Grenade", 2).unwrap();
        assert!(!inv.contains("Grenade"));
        assert!(inv.is_empty());
    }

    #[test]
    fn test_take_insufficient_leaves_state() {
        let mut inv = Inventory::new();
        inv.add("Medkit", 1);

        let err = inv.take("Medkit", 3).unwrap_err();
        assert!(matches!(
            err,
            GarrisonError::InsufficientEquipment { requested: 3, available: 1, .. }
        ));
        assert_eq!(inv.count("Medkit"), 1);

        assert!(inv.take("Radio", 1).is_err());
        assert!(!inv.contains("Radio"));
    }

    #[test]
    fn test_zero_add_is_ignored() {
        let mut inv = Inventory::new();
        inv.add("Water", 0);
        assert!(!inv.contains("Water"));
    }

    #[test]
    fn test_sorted_is_by_name() {
        let mut inv = Inventory::new();
        inv.add("Water", 1);
        inv.add("Ammo", 2);
        inv.add("Radio", 3);
        let names: Vec<_> = inv.sorted().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["Ammo", "Radio", "Water"]);
    }

    #[test]
    fn test_catalog_resolve_is_case_insensitive() {
        let catalog = EquipmentCatalog::default();
        assert_eq!(catalog.resolve("night scope").unwrap(), "Night Scope");
        assert_eq!(catalog.find("RIFLE").unwrap().effectiveness, 7);
        assert!(matches!(
            catalog.resolve("Laser"),
            Err(GarrisonError::UnknownEquipment(_))
        ));
    }
}
