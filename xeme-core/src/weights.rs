//! Payout weights keyed by display value.
//!
//! Every display value pays the default weight unless it has an explicit
//! override. An override equal to the default is never stored, so "uses
//! the default" and "overridden" stay distinguishable.
#![allow(clippy::float_cmp)]

use std::collections::BTreeMap;

use crate::constants::DEFAULT_WEIGHT;
use crate::preset::Variant;
use crate::transform::Transform;

#[derive(Debug, Clone, PartialEq)]
pub struct WeightTable {
    default_weight: f64,
    overrides: BTreeMap<u32, f64>,
}

impl Default for WeightTable {
    fn default() -> Self {
        Self {
            default_weight: DEFAULT_WEIGHT,
            overrides: BTreeMap::new(),
        }
    }
}

impl WeightTable {
    /// Table with `default_weight` and the given overrides, pruning any
    /// override equal to the default.
    #[must_use]
    pub fn from_parts(default_weight: f64, overrides: BTreeMap<u32, f64>) -> Self {
        let mut table = Self {
            default_weight,
            overrides,
        };
        table.prune();
        table
    }

    /// Fresh table carrying a built-in game's payouts.
    #[must_use]
    pub fn preset(variant: Variant) -> Self {
        let mut table = Self::default();
        table.load_preset(variant);
        table
    }

    /// Drop every override and restore the built-in default weight.
    pub fn reset(&mut self) {
        self.overrides.clear();
        self.default_weight = DEFAULT_WEIGHT;
    }

    /// Replace the whole table with a built-in game's payouts.
    pub fn load_preset(&mut self, variant: Variant) {
        self.reset();
        self.overrides.extend(variant.weight_overrides().iter().copied());
    }

    /// Weight paid when the player draws `raw`, looked up by its display value.
    #[must_use]
    pub fn get_weight(&self, raw: u32, transform: Transform) -> f64 {
        self.weight_for_display(transform.apply(raw))
    }

    #[must_use]
    pub fn weight_for_display(&self, display: u32) -> f64 {
        self.overrides
            .get(&display)
            .copied()
            .unwrap_or(self.default_weight)
    }

    /// Override one display value. Setting it to the default removes the override.
    pub fn set_weight(&mut self, display: u32, weight: f64) {
        if weight == self.default_weight {
            self.overrides.remove(&display);
        } else {
            self.overrides.insert(display, weight);
        }
    }

    /// Remove an override, returning the weight it carried.
    pub fn remove_weight(&mut self, display: u32) -> Option<f64> {
        self.overrides.remove(&display)
    }

    /// Change the default, then drop overrides that now equal it.
    pub fn set_default_weight(&mut self, weight: f64) {
        self.default_weight = weight;
        self.prune();
    }

    #[must_use]
    pub const fn default_weight(&self) -> f64 {
        self.default_weight
    }

    #[must_use]
    pub const fn overrides(&self) -> &BTreeMap<u32, f64> {
        &self.overrides
    }

    #[must_use]
    pub fn has_override(&self, display: u32) -> bool {
        self.overrides.contains_key(&display)
    }

    /// Exactly these overrides, no more and no fewer.
    #[must_use]
    pub fn overrides_match(&self, expected: &[(u32, f64)]) -> bool {
        self.overrides.len() == expected.len()
            && expected
                .iter()
                .all(|(display, weight)| self.overrides.get(display) == Some(weight))
    }

    /// Largest weight any draw can pay.
    #[must_use]
    pub fn max_weight(&self) -> f64 {
        self.overrides
            .values()
            .copied()
            .fold(self.default_weight, f64::max)
    }

    fn prune(&mut self) {
        let default_weight = self.default_weight;
        self.overrides.retain(|_, weight| *weight != default_weight);
    }
}
