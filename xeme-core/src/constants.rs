//! Centralized defaults for the xeme calculation engine.
//!
//! These values define the canonical game table. Presets and preset
//! detection are pinned to them, so changing one changes which states are
//! recognized as built-in games.

// Value space ---------------------------------------------------------------
/// Size of the raw value space: a single-zero wheel, 0 through 36.
pub const DEFAULT_BOUND: u32 = 37;
/// Modulus of the xeme transform.
pub const DEFAULT_BASE: u32 = 10;

// Weights -------------------------------------------------------------------
/// Payout weight for every display value without an explicit override.
pub const DEFAULT_WEIGHT: f64 = 2.0;

// Preset overrides (display value, weight) ----------------------------------
pub(crate) const REME_OVERRIDES: &[(u32, f64)] = &[(0, 3.0)];
pub(crate) const JEME_OVERRIDES: &[(u32, f64)] = &[(0, 5.0), (1, 4.0)];
pub(crate) const LEME_OVERRIDES: &[(u32, f64)] = &[(0, 4.0), (1, 3.0)];
