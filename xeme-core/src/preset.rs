//! Built-in games and detection of the game a state reproduces.
//!
//! Each variant is described in display space as a sequence of groupings,
//! lowest rank first. A grouping becomes a tier by taking the union of its
//! display values' raw preimages.

use std::fmt;
use std::str::FromStr;

use log::debug;
use serde::{Deserialize, Serialize};
use smallvec::{SmallVec, smallvec};

use crate::constants::{
    DEFAULT_BASE, DEFAULT_BOUND, DEFAULT_WEIGHT, JEME_OVERRIDES, LEME_OVERRIDES, REME_OVERRIDES,
};
use crate::error::{Result, XemeError};
use crate::order::TierOrder;
use crate::transform::{Base, Transform, inverse_preimage_multi};
use crate::weights::WeightTable;

/// Display values sharing one tier.
pub type Grouping = SmallVec<[u32; 4]>;

/// The three built-in games.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Every display value its own tier, zero on top.
    Reme,
    /// Low values pooled, zero and one sharing the top tier.
    Jeme,
    /// Two and nine pooled at the bottom; the house pools eight and nine instead.
    Leme,
}

impl Variant {
    pub const ALL: [Self; 3] = [Self::Reme, Self::Jeme, Self::Leme];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Reme => "reme",
            Self::Jeme => "jeme",
            Self::Leme => "leme",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Reme => "REME",
            Self::Jeme => "JEME",
            Self::Leme => "LEME",
        }
    }

    /// Display-value payouts that differ from the default weight.
    #[must_use]
    pub const fn weight_overrides(self) -> &'static [(u32, f64)] {
        match self {
            Self::Reme => REME_OVERRIDES,
            Self::Jeme => JEME_OVERRIDES,
            Self::Leme => LEME_OVERRIDES,
        }
    }

    /// Player groupings, lowest rank first.
    #[must_use]
    pub fn player_groupings(self, base: Base) -> Vec<Grouping> {
        match self {
            Self::Reme => (1..base.get())
                .map(single)
                .chain([single(0)])
                .collect(),
            Self::Jeme => [smallvec![2, 3, 4, 5]]
                .into_iter()
                .chain((6..10).map(single))
                .chain([smallvec![0, 1]])
                .collect(),
            Self::Leme => [smallvec![2, 9]]
                .into_iter()
                .chain((3..9).map(single))
                .chain([smallvec![1, 0]])
                .collect(),
        }
    }

    /// House groupings, lowest rank first. The first grouping is always empty.
    #[must_use]
    pub fn house_groupings(self, base: Base) -> Vec<Grouping> {
        match self {
            Self::Reme | Self::Jeme => [Grouping::new()]
                .into_iter()
                .chain(self.player_groupings(base))
                .collect(),
            Self::Leme => [Grouping::new()]
                .into_iter()
                .chain((2..8).map(single))
                .chain([smallvec![8, 9], smallvec![1, 0]])
                .collect(),
        }
    }

    /// Payout for a raw draw under this game's weights.
    #[must_use]
    pub fn weight(self, raw: u32, base: Base) -> f64 {
        let display = Transform::Modulo(base).apply(raw);
        self.weight_overrides()
            .iter()
            .find(|(key, _)| *key == display)
            .map_or(DEFAULT_WEIGHT, |&(_, weight)| weight)
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Variant {
    type Err = XemeError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|variant| variant.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| XemeError::UnknownVariant(s.to_string()))
    }
}

fn single(display: u32) -> Grouping {
    smallvec![display]
}

fn expand(groupings: Vec<Grouping>, bound: u32, base: Base) -> Result<TierOrder> {
    let order: TierOrder = groupings
        .into_iter()
        .map(|grouping| inverse_preimage_multi(grouping, bound, base))
        .collect();
    order.check_partition(bound)?;
    Ok(order)
}

/// Player order of a built-in game.
///
/// # Errors
///
/// Returns [`XemeError::InvalidParameter`] for a zero bound, or
/// [`XemeError::PartitionViolation`] when `base` leaves display values the
/// game's groupings do not cover.
pub fn build_player_order(variant: Variant, bound: u32, base: Base) -> Result<TierOrder> {
    expand(variant.player_groupings(base), bound, base)
}

/// House order of a built-in game.
///
/// # Errors
///
/// Same conditions as [`build_player_order`].
pub fn build_house_order(variant: Variant, bound: u32, base: Base) -> Result<TierOrder> {
    expand(variant.house_groupings(base), bound, base)
}

/// A built-in game materialized for one bound and base.
#[derive(Debug, Clone, PartialEq)]
pub struct Preset {
    pub variant: Variant,
    pub player: TierOrder,
    pub house: TierOrder,
    pub weights: WeightTable,
}

impl Preset {
    /// # Errors
    ///
    /// Same conditions as [`build_player_order`].
    pub fn build(variant: Variant, bound: u32, base: Base) -> Result<Self> {
        Ok(Self {
            variant,
            player: build_player_order(variant, bound, base)?,
            house: build_house_order(variant, bound, base)?,
            weights: WeightTable::preset(variant),
        })
    }

    /// Preset on the canonical 37-value wheel with base 10.
    ///
    /// # Errors
    ///
    /// Never fails for the built-in games; the signature matches [`Self::build`].
    pub fn canonical(variant: Variant) -> Result<Self> {
        Self::build(variant, DEFAULT_BOUND, Base::new(DEFAULT_BASE)?)
    }
}

/// Which built-in game, if any, a state reproduces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresetStatus {
    Preset(Variant),
    Custom,
}

impl PresetStatus {
    #[must_use]
    pub const fn is_custom(self) -> bool {
        matches!(self, Self::Custom)
    }
}

impl fmt::Display for PresetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Preset(variant) => f.write_str(variant.label()),
            Self::Custom => f.write_str("Custom"),
        }
    }
}

/// Compare a state against every built-in game on the canonical wheel.
///
/// Weights are checked first; reference orders are only built for a game
/// whose weights already match.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn detect_preset(player: &TierOrder, house: &TierOrder, weights: &WeightTable) -> PresetStatus {
    if weights.default_weight() != DEFAULT_WEIGHT {
        return PresetStatus::Custom;
    }
    for variant in Variant::ALL {
        if !weights.overrides_match(variant.weight_overrides()) {
            continue;
        }
        let Ok(reference) = Preset::canonical(variant) else {
            continue;
        };
        if player.is_equivalent(&reference.player) && house.is_equivalent(&reference.house) {
            debug!("state matches built-in game {variant}");
            return PresetStatus::Preset(variant);
        }
    }
    PresetStatus::Custom
}
