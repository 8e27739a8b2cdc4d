//! Transferable configuration: the full reproducible state of a calculation.
//!
//! JSON shape:
//!
//! ```json
//! {
//!   "mode": "Modulo",
//!   "weights": { "defaultWeight": 2.0, "weights": { "0": 3.0 } },
//!   "orders": { "player": [[1, 10, 29], ...], "host": [[], [1, 10, 29], ...] }
//! }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Result, XemeError};
use crate::order::TierOrder;
use crate::transform::TransformMode;
use crate::weights::WeightTable;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightsConfig {
    pub default_weight: f64,
    pub weights: BTreeMap<u32, f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrdersConfig {
    pub player: Vec<Vec<u32>>,
    pub host: Vec<Vec<u32>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    pub mode: TransformMode,
    pub weights: WeightsConfig,
    pub orders: OrdersConfig,
}

/// A configuration that passed validation, ready to replace live state.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedState {
    pub mode: TransformMode,
    pub weights: WeightTable,
    pub player: TierOrder,
    pub house: TierOrder,
}

impl Configuration {
    /// Snapshot live state.
    #[must_use]
    pub fn capture(
        mode: TransformMode,
        weights: &WeightTable,
        player: &TierOrder,
        house: &TierOrder,
    ) -> Self {
        Self {
            mode,
            weights: WeightsConfig {
                default_weight: weights.default_weight(),
                weights: weights.overrides().clone(),
            },
            orders: OrdersConfig {
                player: player.to_lists(),
                host: house.to_lists(),
            },
        }
    }

    /// # Errors
    ///
    /// Returns [`XemeError::MalformedConfiguration`] when the payload is not
    /// valid JSON or does not have the configuration shape.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// # Errors
    ///
    /// Returns [`XemeError::MalformedConfiguration`] if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// # Errors
    ///
    /// Returns [`XemeError::MalformedConfiguration`] if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check every field against `bound` and build the in-memory state.
    ///
    /// Weight overrides equal to the default are pruned. Nothing is
    /// returned unless the whole payload is valid.
    ///
    /// # Errors
    ///
    /// Returns [`XemeError::MalformedConfiguration`] for a non-finite weight
    /// or a raw value outside `0..bound`, and [`XemeError::InvalidParameter`]
    /// for a zero bound.
    pub fn validate(&self, bound: u32) -> Result<ValidatedState> {
        if bound == 0 {
            return Err(XemeError::invalid("bound", bound, "must be at least 1"));
        }
        if !self.weights.default_weight.is_finite() {
            return Err(XemeError::malformed("defaultWeight must be a finite number"));
        }
        if let Some((display, _)) = self
            .weights
            .weights
            .iter()
            .find(|(_, weight)| !weight.is_finite())
        {
            return Err(XemeError::malformed(format!(
                "weight for display value {display} must be a finite number"
            )));
        }
        check_lists("player", &self.orders.player, bound)?;
        check_lists("host", &self.orders.host, bound)?;

        Ok(ValidatedState {
            mode: self.mode,
            weights: WeightTable::from_parts(
                self.weights.default_weight,
                self.weights.weights.clone(),
            ),
            player: TierOrder::from_lists(&self.orders.player),
            house: TierOrder::from_lists(&self.orders.host),
        })
    }
}

fn check_lists(side: &str, lists: &[Vec<u32>], bound: u32) -> Result<()> {
    for (tier, list) in lists.iter().enumerate() {
        if let Some(value) = list.iter().find(|&&value| value >= bound) {
            return Err(XemeError::malformed(format!(
                "{side} tier {tier} holds {value}, outside 0..{bound}"
            )));
        }
    }
    Ok(())
}
