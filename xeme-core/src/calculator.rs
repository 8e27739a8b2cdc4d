//! The computation context: the single owner of orders and weights.
//!
//! Hosts edit state through the `_mut` accessors or by loading a preset or
//! configuration, then ask for results explicitly. Nothing recomputes on
//! its own.

use log::{debug, warn};

use crate::config::Configuration;
use crate::ev::{EvReport, compute_ev, evaluate};
use crate::error::Result;
use crate::order::TierOrder;
use crate::preset::{Preset, PresetStatus, Variant, detect_preset};
use crate::transform::{Base, Transform, TransformMode};
use crate::weights::WeightTable;

#[derive(Debug, Clone, PartialEq)]
pub struct Calculator {
    bound: u32,
    base: Base,
    mode: TransformMode,
    player: TierOrder,
    house: TierOrder,
    weights: WeightTable,
}

impl Calculator {
    /// Calculator loaded with the first built-in game.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::XemeError::InvalidParameter`] for a zero bound.
    pub fn new(bound: u32, base: Base) -> Result<Self> {
        Self::with_preset(Variant::Reme, bound, base)
    }

    /// # Errors
    ///
    /// Fails when the game cannot be built for `bound` and `base`; see
    /// [`crate::preset::build_player_order`].
    pub fn with_preset(variant: Variant, bound: u32, base: Base) -> Result<Self> {
        let preset = Preset::build(variant, bound, base)?;
        Ok(Self {
            bound,
            base,
            mode: TransformMode::default(),
            player: preset.player,
            house: preset.house,
            weights: preset.weights,
        })
    }

    #[must_use]
    pub const fn bound(&self) -> u32 {
        self.bound
    }

    #[must_use]
    pub const fn base(&self) -> Base {
        self.base
    }

    #[must_use]
    pub const fn mode(&self) -> TransformMode {
        self.mode
    }

    /// The active display transform: mode plus this calculator's base.
    #[must_use]
    pub const fn transform(&self) -> Transform {
        self.mode.with_base(self.base)
    }

    /// Switch display transform. Weight keys are read in the new display space.
    pub fn set_mode(&mut self, mode: TransformMode) {
        self.mode = mode;
    }

    #[must_use]
    pub const fn player_order(&self) -> &TierOrder {
        &self.player
    }

    #[must_use]
    pub const fn house_order(&self) -> &TierOrder {
        &self.house
    }

    #[must_use]
    pub const fn weights(&self) -> &WeightTable {
        &self.weights
    }

    pub fn player_order_mut(&mut self) -> &mut TierOrder {
        &mut self.player
    }

    pub fn house_order_mut(&mut self) -> &mut TierOrder {
        &mut self.house
    }

    pub fn weights_mut(&mut self) -> &mut WeightTable {
        &mut self.weights
    }

    /// Replace both orders from the line-per-tier display format.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::XemeError::MalformedConfiguration`] for an unparsable line or
    /// a raw value outside the bound;
    /// neither order changes in that case.
    pub fn set_orders_from_display(&mut self, player: &str, house: &str) -> Result<()> {
        let transform = self.transform();
        let player = TierOrder::parse_display(player, transform, self.bound)?;
        let house = TierOrder::parse_display(house, transform, self.bound)?;
        self.player = player;
        self.house = house;
        Ok(())
    }

    /// Replace orders and weights with a built-in game.
    ///
    /// # Errors
    ///
    /// Fails like [`Self::with_preset`]; state is untouched on failure.
    pub fn load_preset(&mut self, variant: Variant) -> Result<()> {
        let preset = Preset::build(variant, self.bound, self.base)?;
        self.player = preset.player;
        self.house = preset.house;
        self.weights = preset.weights;
        debug!("loaded preset {variant} (bound {}, base {})", self.bound, self.base);
        Ok(())
    }

    /// Replace mode, orders, and weights with a configuration.
    ///
    /// The whole payload is validated before anything is replaced.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::XemeError::MalformedConfiguration`] when validation fails.
    pub fn load_configuration(&mut self, config: &Configuration) -> Result<()> {
        let state = config.validate(self.bound).inspect_err(|err| {
            warn!("rejected configuration: {err}");
        })?;
        self.mode = state.mode;
        self.weights = state.weights;
        self.player = state.player;
        self.house = state.house;
        debug!(
            "loaded configuration: {} player tiers, {} house tiers, {} weight overrides",
            self.player.len(),
            self.house.len(),
            self.weights.overrides().len()
        );
        Ok(())
    }

    /// Parse and load a configuration in one step.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::XemeError::MalformedConfiguration`] for bad JSON or a payload
    /// that fails validation.
    pub fn load_configuration_json(&mut self, json: &str) -> Result<()> {
        let config = Configuration::from_json(json).inspect_err(|err| {
            warn!("rejected configuration: {err}");
        })?;
        self.load_configuration(&config)
    }

    #[must_use]
    pub fn configuration(&self) -> Configuration {
        Configuration::capture(self.mode, &self.weights, &self.player, &self.house)
    }

    /// Payout for a raw draw under the current weights and transform.
    #[must_use]
    pub fn weight_of(&self, raw: u32) -> f64 {
        self.weights.get_weight(raw, self.transform())
    }

    /// # Errors
    ///
    /// Returns [`crate::error::XemeError::ValueNotRanked`] when an order misses a value.
    pub fn expected_value(&self) -> Result<f64> {
        compute_ev(
            &self.player,
            &self.house,
            |raw| self.weight_of(raw),
            self.bound,
        )
    }

    /// # Errors
    ///
    /// Returns [`crate::error::XemeError::InvalidParameter`] for zero rounds and
    /// [`crate::error::XemeError::ValueNotRanked`] when an order misses a value.
    pub fn evaluate(&self, rounds: u32) -> Result<EvReport> {
        evaluate(
            &self.player,
            &self.house,
            |raw| self.weight_of(raw),
            self.bound,
            rounds,
        )
    }

    #[must_use]
    pub fn preset_status(&self) -> PresetStatus {
        detect_preset(&self.player, &self.house, &self.weights)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{DEFAULT_BASE, DEFAULT_BOUND};
    use crate::error::XemeError;

    fn canonical() -> Calculator {
        Calculator::new(DEFAULT_BOUND, Base::new(DEFAULT_BASE).unwrap()).unwrap()
    }

    #[test]
    fn starts_as_reme() {
        let calc = canonical();
        assert_eq!(calc.preset_status(), PresetStatus::Preset(Variant::Reme));
        let ev = calc.expected_value().unwrap();
        assert!((ev - 36.0 / 37.0).abs() < 1e-12);
    }

    #[test]
    fn preset_loads_fully_replace_state() {
        let mut calc = canonical();
        calc.weights_mut().set_weight(5, 9.0);
        calc.player_order_mut().push_tier([40].into());
        assert!(calc.preset_status().is_custom());

        calc.load_preset(Variant::Jeme).unwrap();
        assert_eq!(calc.preset_status(), PresetStatus::Preset(Variant::Jeme));
        assert!(!calc.weights().has_override(5));
    }

    #[test]
    fn rejected_configuration_leaves_state_untouched() {
        let mut calc = canonical();
        let before = calc.clone();
        let mut config = calc.configuration();
        config.orders.host.push(vec![99]);
        assert!(calc.load_configuration(&config).is_err());
        assert_eq!(calc, before);

        assert!(calc.load_configuration_json("{\"mode\": 3}").is_err());
        assert_eq!(calc, before);
    }

    #[test]
    fn removing_a_value_breaks_evaluation() {
        let mut calc = canonical();
        calc.house_order_mut().tier_mut(5).unwrap().remove(&5);
        assert_eq!(
            calc.evaluate(1),
            Err(XemeError::ValueNotRanked { value: 5 })
        );
    }

    #[test]
    fn display_edits_use_the_active_transform() {
        let mut calc = canonical();
        calc.set_mode(TransformMode::Raw);
        let values: Vec<String> = (0..37).map(|v| v.to_string()).collect();
        let everything = values.join(",");
        calc.set_orders_from_display(&everything, &everything).unwrap();
        assert_eq!(calc.player_order().len(), 1);
        // Raw mode keys weights by raw value, so only raw 0 pays 3.
        assert!((calc.weight_of(0) - 3.0).abs() < f64::EPSILON);
        assert!((calc.weight_of(19) - 2.0).abs() < f64::EPSILON);
        assert!(calc.set_orders_from_display("1,a", "").is_err());
        assert_eq!(calc.player_order().len(), 1);
    }

    #[test]
    fn raw_display_edits_stay_inside_the_bound() {
        let mut calc = canonical();
        calc.set_mode(TransformMode::Raw);
        let values: Vec<String> = (0..37).map(|v| v.to_string()).collect();
        let everything = values.join(",");
        let player = format!("{everything}\n40");
        let err = calc.set_orders_from_display(&player, &everything).unwrap_err();
        assert!(matches!(err, XemeError::MalformedConfiguration(_)));
        assert_eq!(calc.preset_status(), PresetStatus::Preset(Variant::Reme));

        calc.set_orders_from_display(&everything, &everything).unwrap();
        let mut restored = canonical();
        restored.load_configuration(&calc.configuration()).unwrap();
        assert_eq!(restored.player_order(), calc.player_order());
    }
}
